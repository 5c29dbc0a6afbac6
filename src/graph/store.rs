//! Store seam between ingestion and the graph backend
//!
//! Ingestion talks to a [`GraphStore`] so that a remote backend can sit behind
//! the same calls; every call may fail with a transient
//! [`StoreError::Unavailable`] and is wrapped in the retry policy by the caller.
//! The analysis passes run on the [`VariabilityGraph`] snapshot the store
//! exposes once ingestion is complete.

use super::graph_operations::VariabilityGraph;
use super::types::{EntityId, EntityKind, Relationship, ReturnSite, Tag};
use crate::errors::StoreError;

pub trait GraphStore {
    /// Readiness check, retried before the analysis passes start.
    fn ensure_available(&self) -> Result<(), StoreError> {
        Ok(())
    }

    fn upsert_entity(
        &mut self,
        name: &str,
        kind: EntityKind,
        create_tags: &[Tag],
        match_tags: &[Tag],
    ) -> Result<EntityId, StoreError>;

    fn create_entity(
        &mut self,
        name: &str,
        kind: EntityKind,
        tags: &[Tag],
    ) -> Result<EntityId, StoreError>;

    fn add_edge(
        &mut self,
        from: EntityId,
        to: EntityId,
        relation: Relationship,
    ) -> Result<(), StoreError>;

    fn lookup(&self, name: &str, kind: EntityKind) -> Result<Option<EntityId>, StoreError>;

    fn has_direct_edge(&self, from: EntityId, to: EntityId) -> Result<bool, StoreError>;

    /// Drop the out-of-scope marker of an entity that has now been declared.
    fn mark_declared(&mut self, id: EntityId) -> Result<(), StoreError>;

    fn record_return(&mut self, site: ReturnSite) -> Result<(), StoreError>;

    fn graph(&self) -> &VariabilityGraph;

    fn graph_mut(&mut self) -> &mut VariabilityGraph;
}

impl GraphStore for VariabilityGraph {
    fn upsert_entity(
        &mut self,
        name: &str,
        kind: EntityKind,
        create_tags: &[Tag],
        match_tags: &[Tag],
    ) -> Result<EntityId, StoreError> {
        Ok(VariabilityGraph::upsert_entity(
            self,
            name,
            kind,
            create_tags,
            match_tags,
        ))
    }

    fn create_entity(
        &mut self,
        name: &str,
        kind: EntityKind,
        tags: &[Tag],
    ) -> Result<EntityId, StoreError> {
        Ok(VariabilityGraph::create_entity(self, name, kind, tags))
    }

    fn add_edge(
        &mut self,
        from: EntityId,
        to: EntityId,
        relation: Relationship,
    ) -> Result<(), StoreError> {
        VariabilityGraph::add_edge(self, from, to, relation);
        Ok(())
    }

    fn lookup(&self, name: &str, kind: EntityKind) -> Result<Option<EntityId>, StoreError> {
        Ok(VariabilityGraph::lookup(self, name, kind))
    }

    fn has_direct_edge(&self, from: EntityId, to: EntityId) -> Result<bool, StoreError> {
        Ok(VariabilityGraph::has_direct_edge(self, from, to))
    }

    fn mark_declared(&mut self, id: EntityId) -> Result<(), StoreError> {
        self.remove_tag(id, Tag::OutOfScope);
        Ok(())
    }

    fn record_return(&mut self, site: ReturnSite) -> Result<(), StoreError> {
        VariabilityGraph::record_return(self, site);
        Ok(())
    }

    fn graph(&self) -> &VariabilityGraph {
        self
    }

    fn graph_mut(&mut self) -> &mut VariabilityGraph {
        self
    }
}
