//! Basic graph operations for adding and querying entities and relationships

use super::types::{
    Entity, EntityId, EntityKind, RelationKind, Relationship, ReturnSite, Tag, VariabilityCounters,
};
use petgraph::graph::DiGraph;
use petgraph::visit::EdgeRef;
use std::collections::HashMap;

/// In-memory entity/relationship store.
///
/// Entities live in a flat arena addressed by [`EntityId`]; adjacency is
/// available from both endpoints, so subtype and supertype queries never need
/// back-references between entities. Classes and interfaces are additionally
/// indexed by `(kind, qualified name)`.
#[derive(Debug, Clone, Default)]
pub struct VariabilityGraph {
    pub(super) graph: DiGraph<Entity, Relationship>,
    type_index: HashMap<(EntityKind, String), EntityId>,
    return_sites: Vec<ReturnSite>,
}

impl VariabilityGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the class/interface named `name` with `match_tags` merged in, or
    /// create it carrying `create_tags`.
    ///
    /// Member kinds are not unique by name, so for them this always creates.
    pub fn upsert_entity(
        &mut self,
        name: &str,
        kind: EntityKind,
        create_tags: &[Tag],
        match_tags: &[Tag],
    ) -> EntityId {
        if !kind.is_type() {
            return self.create_entity(name, kind, create_tags);
        }

        if let Some(&id) = self.type_index.get(&(kind, name.to_string())) {
            self.graph[id].tags.extend(match_tags.iter().copied());
            return id;
        }

        if !create_tags.contains(&Tag::OutOfScope) {
            if let Some(id) = self.adopt_placeholder(name, kind) {
                self.graph[id].tags.extend(match_tags.iter().copied());
                return id;
            }
        }

        self.create_entity(name, kind, create_tags)
    }

    /// Re-key an out-of-scope placeholder recorded under the other type kind
    /// as `kind`, so a declaration seen after its first reference reuses it.
    fn adopt_placeholder(&mut self, name: &str, kind: EntityKind) -> Option<EntityId> {
        let other = match kind {
            EntityKind::Class => EntityKind::Interface,
            EntityKind::Interface => EntityKind::Class,
            _ => return None,
        };
        let key = (other, name.to_string());
        let id = *self.type_index.get(&key)?;
        if !self.graph[id].has_tag(Tag::OutOfScope) {
            return None;
        }

        self.type_index.remove(&key);
        self.type_index.insert((kind, name.to_string()), id);
        self.graph[id].kind = kind;
        Some(id)
    }

    /// Insert a new entity unconditionally.
    pub fn create_entity(&mut self, name: &str, kind: EntityKind, tags: &[Tag]) -> EntityId {
        let mut entity = Entity::new(name, kind);
        entity.tags.extend(tags.iter().copied());
        let id = self.graph.add_node(entity);

        if kind.is_type() {
            self.type_index.entry((kind, name.to_string())).or_insert(id);
        }
        id
    }

    pub fn add_edge(&mut self, from: EntityId, to: EntityId, relation: Relationship) {
        self.graph.add_edge(from, to, relation);
    }

    pub fn add_relation(&mut self, from: EntityId, to: EntityId, kind: RelationKind) {
        self.add_edge(from, to, Relationship::new(kind));
    }

    pub fn lookup(&self, name: &str, kind: EntityKind) -> Option<EntityId> {
        self.type_index.get(&(kind, name.to_string())).copied()
    }

    /// Look a type name up as a class first, then as an interface.
    pub fn lookup_type(&self, name: &str) -> Option<EntityId> {
        self.lookup(name, EntityKind::Class)
            .or_else(|| self.lookup(name, EntityKind::Interface))
    }

    /// True if any relationship, of any kind, goes from `from` to `to`.
    pub fn has_direct_edge(&self, from: EntityId, to: EntityId) -> bool {
        self.graph.find_edge(from, to).is_some()
    }

    pub fn entity(&self, id: EntityId) -> &Entity {
        &self.graph[id]
    }

    pub fn try_entity(&self, id: EntityId) -> Option<&Entity> {
        self.graph.node_weight(id)
    }

    pub fn has_tag(&self, id: EntityId, tag: Tag) -> bool {
        self.graph[id].has_tag(tag)
    }

    /// Add a tag; returns true if it was not already present.
    pub fn add_tag(&mut self, id: EntityId, tag: Tag) -> bool {
        self.graph[id].tags.insert(tag)
    }

    pub fn remove_tag(&mut self, id: EntityId, tag: Tag) -> bool {
        self.graph[id].tags.remove(&tag)
    }

    pub fn set_counters(&mut self, id: EntityId, counters: VariabilityCounters) {
        self.graph[id].counters = counters;
    }

    pub fn record_return(&mut self, site: ReturnSite) {
        self.return_sites.push(site);
    }

    pub fn return_sites(&self) -> &[ReturnSite] {
        &self.return_sites
    }

    pub fn entity_ids(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.graph.node_indices()
    }

    pub fn entities(&self) -> impl Iterator<Item = (EntityId, &Entity)> + '_ {
        self.graph
            .node_indices()
            .map(move |id| (id, &self.graph[id]))
    }

    /// All class and interface entities, in insertion order
    pub fn type_entities(&self) -> impl Iterator<Item = (EntityId, &Entity)> + '_ {
        self.entities().filter(|(_, entity)| entity.kind.is_type())
    }

    pub fn entities_of_kind(&self, kind: EntityKind) -> impl Iterator<Item = (EntityId, &Entity)> + '_ {
        self.entities().filter(move |(_, entity)| entity.kind == kind)
    }

    /// Relationships as `(from, to, payload)`, in insertion order
    pub fn relationships(&self) -> impl Iterator<Item = (EntityId, EntityId, &Relationship)> + '_ {
        self.graph
            .edge_references()
            .map(|edge| (edge.source(), edge.target(), edge.weight()))
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn relationship_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn inheritance_count(&self) -> usize {
        self.relationships()
            .filter(|(_, _, relation)| relation.kind.is_inheritance())
            .count()
    }
}
