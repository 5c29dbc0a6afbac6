use serde::{Deserialize, Serialize};

use super::retry::RetryConfig;

/// Root configuration structure for varmap
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct VarmapConfig {
    /// Graph store retry policy
    #[serde(default)]
    pub retry: RetryConfig,

    /// Pattern detection and inference toggles
    #[serde(default)]
    pub detection: DetectionConfig,

    /// Output artifact formatting
    #[serde(default)]
    pub output: OutputConfig,
}

/// Which detectors and inference passes run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectionConfig {
    #[serde(default = "default_true")]
    pub strategy: bool,

    #[serde(default = "default_true")]
    pub factory: bool,

    #[serde(default = "default_true")]
    pub decorator: bool,

    /// Mark classes declaring an abstract method as abstract
    #[serde(default = "default_true")]
    pub infer_abstract: bool,

    /// Run the pattern detectors concurrently
    #[serde(default = "default_true")]
    pub parallel: bool,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            strategy: true,
            factory: true,
            decorator: true,
            infer_abstract: true,
            parallel: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct OutputConfig {
    /// Pretty-print the JSON artifacts
    #[serde(default)]
    pub pretty: bool,
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_detection_section_keeps_defaults() {
        let config: VarmapConfig = toml::from_str(
            r#"
            [detection]
            factory = false
            "#,
        )
        .unwrap();

        assert!(!config.detection.factory);
        assert!(config.detection.strategy);
        assert!(config.detection.decorator);
        assert!(config.detection.parallel);
        assert_eq!(config.retry, RetryConfig::default());
        assert!(!config.output.pretty);
    }
}
