//! Entity/relationship store for variability analysis
//!
//! The graph holds classes, interfaces and their members as typed entities,
//! connected by directed typed relationships. Inheritance edges point from the
//! supertype to the subtype (`Shape -EXTENDS-> Circle`); member edges point
//! from the owning type to the member.

mod graph_operations;
mod store;
mod traversal;
mod types;

pub use graph_operations::VariabilityGraph;
pub use store::GraphStore;
pub use types::{
    simple_name, Entity, EntityId, EntityKind, RelationKind, Relationship, ReturnSite, Tag,
    VariabilityCounters,
};
