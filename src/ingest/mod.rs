//! Ingestion of discovery events into a graph store
//!
//! A [`Session`] is the front door for language front ends. Every declaration
//! is validated locally, then applied through the [`GraphStore`] with each
//! store call wrapped in the retry policy. Declarations may arrive in any
//! order: references to types not declared yet create out-of-scope
//! placeholders, and a later declaration of the same type adopts the
//! placeholder.

pub mod events;
pub mod resolution;

pub use events::{parse_events, read_events, DiscoveryEvent, EventParseFailure, ParsedEvents};
pub use resolution::{resolve_supertype, ResolvedName};

use crate::config::VarmapConfig;
use crate::errors::{StoreError, VarmapError};
use crate::graph::{
    EntityId, EntityKind, GraphStore, RelationKind, Relationship, ReturnSite, Tag,
    VariabilityGraph,
};
use crate::resilience::with_retry;
use serde::Serialize;
use std::path::Path;
use tracing::{debug, info, warn};

/// Counters describing what ingestion did with the events it received
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct IngestReport {
    pub accepted: usize,
    pub rejected: usize,
    pub placeholders_created: usize,
    pub corrected_inheritance_links: usize,
    pub duplicate_links_skipped: usize,
}

/// Ingestion and analysis session over one graph store
pub struct Session<S: GraphStore = VariabilityGraph> {
    pub(crate) store: S,
    pub(crate) config: VarmapConfig,
    pub(crate) report: IngestReport,
}

impl Session<VariabilityGraph> {
    /// Session over a fresh in-memory graph
    pub fn in_memory(config: VarmapConfig) -> Self {
        Self::new(VariabilityGraph::new(), config)
    }
}

impl<S: GraphStore> Session<S> {
    pub fn new(store: S, config: VarmapConfig) -> Self {
        Self {
            store,
            config,
            report: IngestReport::default(),
        }
    }

    pub fn config(&self) -> &VarmapConfig {
        &self.config
    }

    pub fn report(&self) -> IngestReport {
        self.report
    }

    pub fn graph(&self) -> &VariabilityGraph {
        self.store.graph()
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Declare a class or interface.
    ///
    /// Re-declarations merge tags. Returns `Ok(None)` when the declaration is
    /// malformed and was rejected.
    pub fn declare_entity(
        &mut self,
        name: &str,
        kind: EntityKind,
        tags: &[Tag],
    ) -> Result<Option<EntityId>, VarmapError> {
        if let Err(reason) = validate_name("entity", name).and_then(|_| validate_type_kind(kind)) {
            return Ok(self.reject(reason));
        }

        // OUT_OF_SCOPE only ever marks a freshly created entity
        let match_tags: Vec<Tag> = tags
            .iter()
            .copied()
            .filter(|tag| *tag != Tag::OutOfScope)
            .collect();
        let id = self.call("upsert_entity", |store| {
            store.upsert_entity(name, kind, tags, &match_tags)
        })?;
        if !tags.contains(&Tag::OutOfScope) {
            self.call("mark_declared", |store| store.mark_declared(id))?;
        }

        debug!(entity = name, %kind, "declared entity");
        self.report.accepted += 1;
        Ok(Some(id))
    }

    /// Declare a method or constructor of `owner`. Members are never merged,
    /// overloads each get their own entity.
    pub fn declare_member(
        &mut self,
        owner: &str,
        name: &str,
        kind: EntityKind,
        tags: &[Tag],
    ) -> Result<Option<EntityId>, VarmapError> {
        let validation = validate_name("member owner", owner)
            .and_then(|_| validate_name("member", name))
            .and_then(|_| {
                if kind.is_member() {
                    Ok(())
                } else {
                    Err(format!("member {} must be METHOD or CONSTRUCTOR, got {}", name, kind))
                }
            });
        if let Err(reason) = validation {
            return Ok(self.reject(reason));
        }

        let (owner_id, _) = self.resolve_type(owner, EntityKind::Class)?;
        let member = self.call("create_entity", |store| store.create_entity(name, kind, tags))?;
        self.call("add_edge", |store| {
            store.add_edge(owner_id, member, Relationship::new(RelationKind::Method))
        })?;

        debug!(owner, member = name, %kind, "declared member");
        self.report.accepted += 1;
        Ok(Some(member))
    }

    /// Declare that `to` extends or implements `from`.
    ///
    /// `imports` are the imports of the file declaring `to`; when non-empty
    /// they are used to correct the supertype name.
    pub fn declare_edge(
        &mut self,
        from: &str,
        to: &str,
        kind: RelationKind,
        imports: &[String],
    ) -> Result<bool, VarmapError> {
        let validation = validate_name("supertype", from)
            .and_then(|_| validate_name("subtype", to))
            .and_then(|_| {
                if kind.is_inheritance() {
                    Ok(())
                } else {
                    Err(format!("edge {} -> {} must be EXTENDS or IMPLEMENTS, got {}", from, to, kind))
                }
            });
        if let Err(reason) = validation {
            self.reject(reason);
            return Ok(false);
        }

        let resolved = {
            let retry = &self.config.retry;
            let store = &self.store;
            resolve_supertype(from, imports, |candidate| {
                with_retry(retry, "lookup", || lookup_type(store, candidate))
                    .map(|found| found.is_some())
            })?
        };
        if resolved.corrected {
            debug!(supplied = from, resolved = %resolved.name, "corrected supertype name");
            self.report.corrected_inheritance_links += 1;
        }
        if resolved.name == to {
            self.reject(format!("{} cannot be its own supertype", to));
            return Ok(false);
        }

        let (sub_id, sub_kind) = self.resolve_type(to, EntityKind::Class)?;
        let super_kind = match kind {
            RelationKind::Implements => EntityKind::Interface,
            _ => sub_kind,
        };
        let (super_id, _) = self.resolve_type(&resolved.name, super_kind)?;

        if self.call("has_direct_edge", |store| store.has_direct_edge(super_id, sub_id))? {
            debug!(from = %resolved.name, to, "inheritance link already present");
            self.report.duplicate_links_skipped += 1;
            self.report.accepted += 1;
            return Ok(false);
        }

        self.call("add_edge", |store| {
            store.add_edge(super_id, sub_id, Relationship::new(kind))
        })?;
        debug!(from = %resolved.name, to, %kind, "declared inheritance link");
        self.report.accepted += 1;
        Ok(true)
    }

    /// Declare an attribute of `owner` whose declared type is `declared_type`.
    pub fn declare_attribute_type(
        &mut self,
        owner: &str,
        attribute: &str,
        declared_type: &str,
    ) -> Result<Option<EntityId>, VarmapError> {
        let validation = validate_name("attribute owner", owner)
            .and_then(|_| validate_name("attribute", attribute))
            .and_then(|_| validate_name("attribute type", declared_type));
        if let Err(reason) = validation {
            return Ok(self.reject(reason));
        }

        let (owner_id, _) = self.resolve_type(owner, EntityKind::Class)?;
        let attribute_id = self.call("create_entity", |store| {
            store.create_entity(attribute, EntityKind::Attribute, &[])
        })?;
        self.call("add_edge", |store| {
            store.add_edge(owner_id, attribute_id, Relationship::attribute(declared_type))
        })?;

        debug!(owner, attribute, declared_type, "declared attribute");
        self.report.accepted += 1;
        Ok(Some(attribute_id))
    }

    /// Record a return statement of type `returned` inside method `method` of
    /// `owner`, whose declared return type is `declared_return`.
    pub fn declare_return(
        &mut self,
        owner: &str,
        method: &str,
        declared_return: &str,
        returned: &str,
    ) -> Result<bool, VarmapError> {
        let validation = validate_name("return owner", owner)
            .and_then(|_| validate_name("method", method))
            .and_then(|_| validate_name("declared return type", declared_return))
            .and_then(|_| validate_name("returned type", returned));
        if let Err(reason) = validation {
            self.reject(reason);
            return Ok(false);
        }

        let (owner_id, _) = self.resolve_type(owner, EntityKind::Class)?;
        let site = ReturnSite {
            owner: owner_id,
            method: method.to_string(),
            declared_return: declared_return.to_string(),
            returned: returned.to_string(),
        };
        self.call("record_return", |store| store.record_return(site.clone()))?;

        self.report.accepted += 1;
        Ok(true)
    }

    /// Apply one decoded event. Only fatal store errors are returned.
    pub fn apply(&mut self, event: &DiscoveryEvent) -> Result<(), VarmapError> {
        match event {
            DiscoveryEvent::Entity { name, kind, tags } => {
                self.declare_entity(name, *kind, tags)?;
            }
            DiscoveryEvent::Member {
                owner,
                name,
                kind,
                tags,
            } => {
                self.declare_member(owner, name, *kind, tags)?;
            }
            DiscoveryEvent::Edge {
                from,
                to,
                kind,
                imports,
            } => {
                self.declare_edge(from, to, *kind, imports)?;
            }
            DiscoveryEvent::Attribute {
                owner,
                name,
                declared_type,
            } => {
                self.declare_attribute_type(owner, name, declared_type)?;
            }
            DiscoveryEvent::Return {
                owner,
                method,
                declared_return,
                returned,
            } => {
                self.declare_return(owner, method, declared_return, returned)?;
            }
        }
        Ok(())
    }

    pub fn ingest_events<'a>(
        &mut self,
        events: impl IntoIterator<Item = &'a DiscoveryEvent>,
    ) -> Result<(), VarmapError> {
        events.into_iter().try_for_each(|event| self.apply(event))
    }

    /// Read a JSON Lines event file and apply every decodable event.
    pub fn ingest_file(&mut self, path: &Path) -> Result<IngestReport, VarmapError> {
        let parsed = read_events(path)?;
        for failure in &parsed.failures {
            self.reject(format!(
                "{}:{}: {}",
                path.display(),
                failure.line,
                failure.message
            ));
        }
        self.ingest_events(&parsed.events)?;

        info!(
            path = %path.display(),
            accepted = self.report.accepted,
            rejected = self.report.rejected,
            "ingested discovery events"
        );
        Ok(self.report)
    }

    /// Find a declared class/interface by name, or create an out-of-scope
    /// placeholder of `fallback` kind.
    fn resolve_type(
        &mut self,
        name: &str,
        fallback: EntityKind,
    ) -> Result<(EntityId, EntityKind), VarmapError> {
        let existing = {
            let store = &self.store;
            with_retry(&self.config.retry, "lookup", || lookup_type(store, name))?
        };
        if let Some(found) = existing {
            return Ok(found);
        }

        let id = self.call("upsert_entity", |store| {
            store.upsert_entity(name, fallback, &[Tag::OutOfScope], &[])
        })?;
        debug!(entity = name, kind = %fallback, "created out-of-scope placeholder");
        self.report.placeholders_created += 1;
        Ok((id, fallback))
    }

    pub(crate) fn call<T>(
        &mut self,
        operation: &str,
        mut op: impl FnMut(&mut S) -> Result<T, StoreError>,
    ) -> Result<T, VarmapError> {
        let store = &mut self.store;
        with_retry(&self.config.retry, operation, || op(store))
    }

    fn reject(&mut self, reason: String) -> Option<EntityId> {
        let error = VarmapError::malformed(reason);
        warn!("Rejected {}", error);
        self.report.rejected += 1;
        None
    }
}

fn lookup_type<S: GraphStore>(
    store: &S,
    name: &str,
) -> Result<Option<(EntityId, EntityKind)>, StoreError> {
    for kind in [EntityKind::Class, EntityKind::Interface] {
        if let Some(id) = store.lookup(name, kind)? {
            return Ok(Some((id, kind)));
        }
    }
    Ok(None)
}

fn validate_name(what: &str, name: &str) -> Result<(), String> {
    if name.trim().is_empty() {
        Err(format!("empty {} name", what))
    } else {
        Ok(())
    }
}

fn validate_type_kind(kind: EntityKind) -> Result<(), String> {
    if kind.is_type() {
        Ok(())
    } else {
        Err(format!("entity kind must be CLASS or INTERFACE, got {}", kind))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> Session {
        Session::in_memory(VarmapConfig::default())
    }

    #[test]
    fn test_supertype_before_declaration_is_adopted() {
        let mut session = session();
        assert!(session
            .declare_edge("Shape", "Circle", RelationKind::Extends, &[])
            .unwrap());
        let shape = session.graph().lookup("Shape", EntityKind::Class).unwrap();
        assert!(session.graph().has_tag(shape, Tag::OutOfScope));

        let declared = session
            .declare_entity("Shape", EntityKind::Class, &[Tag::Abstract])
            .unwrap()
            .unwrap();
        assert_eq!(declared, shape);
        assert!(!session.graph().has_tag(shape, Tag::OutOfScope));
        assert!(session.graph().has_tag(shape, Tag::Abstract));
    }

    #[test]
    fn test_implements_creates_interface_placeholder() {
        let mut session = session();
        session
            .declare_entity("Circle", EntityKind::Class, &[])
            .unwrap();
        session
            .declare_edge("Drawable", "Circle", RelationKind::Implements, &[])
            .unwrap();

        let drawable = session
            .graph()
            .lookup("Drawable", EntityKind::Interface)
            .unwrap();
        assert!(session.graph().has_tag(drawable, Tag::OutOfScope));
        assert_eq!(session.report().placeholders_created, 1);
    }

    #[test]
    fn test_interface_extending_interface_keeps_kind() {
        let mut session = session();
        session
            .declare_entity("List", EntityKind::Interface, &[])
            .unwrap();
        session
            .declare_edge("Collection", "List", RelationKind::Extends, &[])
            .unwrap();
        assert!(session
            .graph()
            .lookup("Collection", EntityKind::Interface)
            .is_some());
    }

    #[test]
    fn test_out_of_scope_reference_keeps_declared_entity_visible() {
        let mut session = session();
        let declared = session
            .declare_entity("Shape", EntityKind::Interface, &[])
            .unwrap()
            .unwrap();
        let referenced = session
            .declare_entity("Shape", EntityKind::Interface, &[Tag::OutOfScope])
            .unwrap()
            .unwrap();

        assert_eq!(declared, referenced);
        assert!(!session.graph().has_tag(declared, Tag::OutOfScope));
    }

    #[test]
    fn test_interface_declared_after_its_extends_edge_reuses_placeholder() {
        let mut session = session();
        session
            .declare_edge("Collection", "List", RelationKind::Extends, &[])
            .unwrap();
        let collection = session
            .declare_entity("Collection", EntityKind::Interface, &[])
            .unwrap()
            .unwrap();
        let list = session
            .declare_entity("List", EntityKind::Interface, &[])
            .unwrap()
            .unwrap();

        let graph = session.graph();
        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.subtypes(collection), vec![list]);
        assert!(!graph.has_tag(collection, Tag::OutOfScope));
        assert!(!graph.has_tag(list, Tag::OutOfScope));
    }

    #[test]
    fn test_repeated_edge_is_stored_once() {
        let mut session = session();
        session
            .declare_edge("Shape", "Circle", RelationKind::Extends, &[])
            .unwrap();
        let added = session
            .declare_edge("Shape", "Circle", RelationKind::Extends, &[])
            .unwrap();

        assert!(!added);
        assert_eq!(session.graph().inheritance_count(), 1);
        assert_eq!(session.report().duplicate_links_skipped, 1);
    }

    #[test]
    fn test_malformed_declarations_are_rejected_not_fatal() {
        let mut session = session();
        assert_eq!(
            session.declare_entity("  ", EntityKind::Class, &[]).unwrap(),
            None
        );
        assert_eq!(
            session
                .declare_entity("draw", EntityKind::Method, &[])
                .unwrap(),
            None
        );
        assert_eq!(
            session
                .declare_member("Shape", "draw", EntityKind::Attribute, &[])
                .unwrap(),
            None
        );
        assert!(!session
            .declare_edge("Shape", "Circle", RelationKind::Method, &[])
            .unwrap());
        assert!(!session
            .declare_edge("Shape", "Shape", RelationKind::Extends, &[])
            .unwrap());

        assert_eq!(session.report().rejected, 5);
        assert_eq!(session.report().accepted, 0);
        assert_eq!(session.graph().node_count(), 0);
    }

    #[test]
    fn test_corrected_links_are_counted() {
        let mut session = session();
        session
            .declare_entity("geometry.Shape", EntityKind::Class, &[])
            .unwrap();
        session
            .declare_edge(
                "Shape",
                "geometry.round.Circle",
                RelationKind::Extends,
                &["geometry.*".to_string()],
            )
            .unwrap();

        let shape = session
            .graph()
            .lookup("geometry.Shape", EntityKind::Class)
            .unwrap();
        assert_eq!(session.graph().subtypes(shape).len(), 1);
        assert_eq!(session.report().corrected_inheritance_links, 1);
        assert_eq!(session.graph().lookup_type("Shape"), None);
    }

    #[test]
    fn test_member_of_undeclared_owner_creates_placeholder() {
        let mut session = session();
        let member = session
            .declare_member("Circle", "area", EntityKind::Method, &[])
            .unwrap()
            .unwrap();
        let circle = session.graph().lookup("Circle", EntityKind::Class).unwrap();

        assert!(session.graph().has_direct_edge(circle, member));
        assert!(session.graph().has_tag(circle, Tag::OutOfScope));
    }
}
