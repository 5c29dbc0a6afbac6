//! Configuration for varmap runs
//!
//! Configuration is read from `.varmap.toml`, searched for in the current
//! directory and its ancestors, or passed explicitly on the command line.
//! Every field has a default, so an empty or missing file is valid.

mod core;
mod loader;
pub mod retry;

pub use self::core::{DetectionConfig, OutputConfig, VarmapConfig};
pub use loader::{
    directory_ancestors, load_config, load_config_from, load_config_from_dir,
    parse_and_validate_config, CONFIG_FILE_NAME,
};
pub use retry::RetryConfig;

/// Default configuration file contents written by `varmap init`
pub const DEFAULT_CONFIG_TOML: &str = r#"# Varmap Configuration

[retry]
# Total attempts per graph store call, the first one included
max_attempts = 10
# Fixed delay between attempts
delay_ms = 5000

[detection]
strategy = true
factory = true
decorator = true
# Mark classes declaring an abstract method as abstract
infer_abstract = true
# Run the pattern detectors concurrently
parallel = true

[output]
pretty = false
"#;
