// Export modules for library usage
pub mod cli;
pub mod commands;
pub mod config;
pub mod errors;
pub mod graph;
pub mod inference;
pub mod ingest;
pub mod io;
pub mod labeling;
pub mod metrics;
pub mod patterns;
pub mod pipeline;
pub mod resilience;

// Re-export commonly used types
pub use crate::config::{RetryConfig, VarmapConfig};
pub use crate::errors::{StoreError, VarmapError};
pub use crate::graph::{
    Entity, EntityId, EntityKind, GraphStore, RelationKind, Relationship, Tag,
    VariabilityCounters, VariabilityGraph,
};
pub use crate::ingest::{DiscoveryEvent, IngestReport, Session};
pub use crate::io::{GraphDocument, Statistics};
pub use crate::patterns::{PatternDetector, PatternMatch, PatternRecognizer, PatternType};
pub use crate::pipeline::{default_stats_path, RunSummary};
