//! Typed traversals over the variability graph
//!
//! These replace ad hoc graph queries: every question the detectors, metric
//! and labeling passes ask is answered from the adjacency lists directly.

use super::graph_operations::VariabilityGraph;
use super::types::{EntityId, EntityKind, RelationKind};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use std::collections::HashSet;

impl VariabilityGraph {
    /// Distinct direct subtypes (targets of EXTENDS/IMPLEMENTS edges leaving `id`),
    /// sorted by id.
    pub fn subtypes(&self, id: EntityId) -> Vec<EntityId> {
        self.neighbors_by(id, Direction::Outgoing, |kind| kind.is_inheritance())
    }

    /// Distinct direct supertypes (sources of EXTENDS/IMPLEMENTS edges reaching `id`).
    pub fn supertypes(&self, id: EntityId) -> Vec<EntityId> {
        self.neighbors_by(id, Direction::Incoming, |kind| kind.is_inheritance())
    }

    /// Distinct direct supertypes reached through EXTENDS only.
    pub fn extended_types(&self, id: EntityId) -> Vec<EntityId> {
        self.neighbors_by(id, Direction::Incoming, |kind| kind == RelationKind::Extends)
    }

    /// Distinct direct subtypes reached through EXTENDS only.
    pub fn extending_types(&self, id: EntityId) -> Vec<EntityId> {
        self.neighbors_by(id, Direction::Outgoing, |kind| kind == RelationKind::Extends)
    }

    /// Methods or constructors declared by `owner`.
    pub fn members(&self, owner: EntityId, kind: EntityKind) -> Vec<EntityId> {
        self.neighbors_by(owner, Direction::Outgoing, |relation| {
            relation == RelationKind::Method
        })
        .into_iter()
        .filter(|member| self.entity(*member).kind == kind)
        .collect()
    }

    /// Declared types of the attributes owned by `owner`, one entry per attribute.
    pub fn attribute_types(&self, owner: EntityId) -> Vec<&str> {
        self.graph
            .edges_directed(owner, Direction::Outgoing)
            .filter(|edge| edge.weight().kind == RelationKind::Attribute)
            .filter_map(|edge| edge.weight().declared_type.as_deref())
            .collect()
    }

    pub fn attribute_count(&self, owner: EntityId) -> usize {
        self.graph
            .edges_directed(owner, Direction::Outgoing)
            .filter(|edge| edge.weight().kind == RelationKind::Attribute)
            .count()
    }

    /// Every type name used as the declared type of some attribute in the graph.
    pub fn attribute_type_names(&self) -> HashSet<&str> {
        self.relationships()
            .filter(|(_, _, relation)| relation.kind == RelationKind::Attribute)
            .filter_map(|(_, _, relation)| relation.declared_type.as_deref())
            .collect()
    }

    /// True if `candidate` is reachable from `ancestor` through one or more
    /// EXTENDS/IMPLEMENTS edges.
    pub fn is_descendant(&self, ancestor: EntityId, candidate: EntityId) -> bool {
        let mut visited = HashSet::new();
        let mut stack = self.subtypes(ancestor);

        while let Some(current) = stack.pop() {
            if current == candidate {
                return true;
            }
            if visited.insert(current) {
                stack.extend(self.subtypes(current));
            }
        }
        false
    }

    fn neighbors_by(
        &self,
        id: EntityId,
        direction: Direction,
        accept: impl Fn(RelationKind) -> bool,
    ) -> Vec<EntityId> {
        let mut neighbors: Vec<EntityId> = self
            .graph
            .edges_directed(id, direction)
            .filter(|edge| accept(edge.weight().kind))
            .map(|edge| match direction {
                Direction::Outgoing => edge.target(),
                Direction::Incoming => edge.source(),
            })
            .collect();
        neighbors.sort();
        neighbors.dedup();
        neighbors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::types::{Relationship, Tag};

    fn shapes() -> (VariabilityGraph, EntityId, EntityId, EntityId, EntityId) {
        let mut graph = VariabilityGraph::new();
        let shape = graph.upsert_entity("Shape", EntityKind::Class, &[Tag::Abstract], &[]);
        let polygon = graph.upsert_entity("Polygon", EntityKind::Class, &[], &[]);
        let square = graph.upsert_entity("Square", EntityKind::Class, &[], &[]);
        let circle = graph.upsert_entity("Circle", EntityKind::Class, &[], &[]);
        graph.add_relation(shape, polygon, RelationKind::Extends);
        graph.add_relation(polygon, square, RelationKind::Extends);
        graph.add_relation(shape, circle, RelationKind::Extends);
        (graph, shape, polygon, square, circle)
    }

    #[test]
    fn test_subtypes_and_supertypes() {
        let (graph, shape, polygon, square, circle) = shapes();
        assert_eq!(graph.subtypes(shape), vec![polygon, circle]);
        assert_eq!(graph.supertypes(square), vec![polygon]);
        assert!(graph.subtypes(circle).is_empty());
    }

    #[test]
    fn test_duplicate_edges_count_once() {
        let (mut graph, shape, _, _, circle) = shapes();
        graph.add_relation(shape, circle, RelationKind::Implements);
        assert_eq!(graph.subtypes(shape).len(), 2);
    }

    #[test]
    fn test_is_descendant_is_transitive_and_strict() {
        let (graph, shape, polygon, square, circle) = shapes();
        assert!(graph.is_descendant(shape, square));
        assert!(graph.is_descendant(polygon, square));
        assert!(!graph.is_descendant(square, shape));
        assert!(!graph.is_descendant(shape, shape));
        assert!(!graph.is_descendant(polygon, circle));
    }

    #[test]
    fn test_members_filter_by_kind() {
        let (mut graph, shape, _, _, _) = shapes();
        let area = graph.create_entity("area", EntityKind::Method, &[]);
        let ctor = graph.create_entity("Shape", EntityKind::Constructor, &[]);
        graph.add_relation(shape, area, RelationKind::Method);
        graph.add_relation(shape, ctor, RelationKind::Method);

        assert_eq!(graph.members(shape, EntityKind::Method), vec![area]);
        assert_eq!(graph.members(shape, EntityKind::Constructor), vec![ctor]);
    }

    #[test]
    fn test_attribute_types() {
        let (mut graph, shape, polygon, _, _) = shapes();
        let inner = graph.create_entity("inner", EntityKind::Attribute, &[]);
        graph.add_edge(polygon, inner, Relationship::attribute("Shape"));

        assert_eq!(graph.attribute_types(polygon), vec!["Shape"]);
        assert_eq!(graph.attribute_count(polygon), 1);
        assert_eq!(graph.attribute_count(shape), 0);
        assert!(graph.attribute_type_names().contains("Shape"));
    }
}
