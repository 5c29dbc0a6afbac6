//! CLI command implementations for varmap.
//!
//! Available commands:
//! - **analyze**: Ingest a discovery event file and export the variability graph
//! - **init**: Initialize a new varmap configuration file

pub mod analyze;
pub mod init;

pub use analyze::{handle_analyze, AnalyzeConfig};
pub use init::init_config;
