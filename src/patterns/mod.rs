//! Design pattern detection over the variability graph
//!
//! Each recognizer is a read-only heuristic over a graph snapshot, so the
//! recognizers can run concurrently. Their matches are collected first and
//! applied as tags afterwards, which gives the labeling pass a complete set of
//! pattern tags to read.

pub mod decorator;
pub mod factory;
pub mod strategy;

use crate::config::DetectionConfig;
use crate::graph::{EntityId, Tag, VariabilityGraph};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Types of design patterns that can be detected
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PatternType {
    Strategy,
    Factory,
    Decorator,
}

impl PatternType {
    pub fn tag(self) -> Tag {
        match self {
            PatternType::Strategy => Tag::Strategy,
            PatternType::Factory => Tag::Factory,
            PatternType::Decorator => Tag::Decorator,
        }
    }
}

impl fmt::Display for PatternType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PatternType::Strategy => "strategy",
            PatternType::Factory => "factory",
            PatternType::Decorator => "decorator",
        };
        f.write_str(name)
    }
}

/// An entity recognized as taking part in a pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternMatch {
    pub pattern_type: PatternType,
    pub entity: EntityId,
    pub reasoning: String,
}

/// Entities newly tagged with each pattern
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PatternCounts {
    pub strategy: usize,
    pub factory: usize,
    pub decorator: usize,
}

impl PatternCounts {
    fn record(&mut self, pattern: PatternType) {
        match pattern {
            PatternType::Strategy => self.strategy += 1,
            PatternType::Factory => self.factory += 1,
            PatternType::Decorator => self.decorator += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.strategy + self.factory + self.decorator
    }
}

/// Trait for pattern recognition implementations
pub trait PatternRecognizer: Send + Sync {
    fn name(&self) -> &str;
    fn detect(&self, graph: &VariabilityGraph) -> Vec<PatternMatch>;
}

/// Main pattern detector that coordinates all pattern recognizers
pub struct PatternDetector {
    recognizers: Vec<Box<dyn PatternRecognizer>>,
    parallel: bool,
}

impl Default for PatternDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl PatternDetector {
    pub fn new() -> Self {
        Self::from_config(&DetectionConfig::default())
    }

    /// Detector running only the recognizers enabled in `config`
    pub fn from_config(config: &DetectionConfig) -> Self {
        let mut recognizers: Vec<Box<dyn PatternRecognizer>> = Vec::new();
        if config.strategy {
            recognizers.push(Box::new(strategy::StrategyPatternRecognizer::new()));
        }
        if config.factory {
            recognizers.push(Box::new(factory::FactoryPatternRecognizer::new()));
        }
        if config.decorator {
            recognizers.push(Box::new(decorator::DecoratorPatternRecognizer::new()));
        }

        Self {
            recognizers,
            parallel: config.parallel,
        }
    }

    pub fn recognizer_names(&self) -> Vec<&str> {
        self.recognizers.iter().map(|r| r.name()).collect()
    }

    /// Run every recognizer and return their matches, one per
    /// (entity, pattern) pair, ordered by entity.
    pub fn detect_all_patterns(&self, graph: &VariabilityGraph) -> Vec<PatternMatch> {
        let per_recognizer: Vec<Vec<PatternMatch>> = if self.parallel {
            self.recognizers
                .par_iter()
                .map(|recognizer| recognizer.detect(graph))
                .collect()
        } else {
            self.recognizers
                .iter()
                .map(|recognizer| recognizer.detect(graph))
                .collect()
        };

        let mut matches: Vec<PatternMatch> = per_recognizer.into_iter().flatten().collect();
        matches.sort_by_key(|m| (m.entity, m.pattern_type));
        matches.dedup_by_key(|m| (m.entity, m.pattern_type));
        matches
    }
}

/// Tag the matched entities; returns how many tags were newly added.
pub fn apply_matches(graph: &mut VariabilityGraph, matches: &[PatternMatch]) -> PatternCounts {
    let mut counts = PatternCounts::default();
    for found in matches {
        if graph.add_tag(found.entity, found.pattern_type.tag()) {
            tracing::debug!(
                entity = %graph.entity(found.entity).name,
                pattern = %found.pattern_type,
                "{}",
                found.reasoning
            );
            counts.record(found.pattern_type);
        }
    }
    counts
}

fn make_match(pattern_type: PatternType, entity: EntityId, reasoning: String) -> PatternMatch {
    PatternMatch {
        pattern_type,
        entity,
        reasoning,
    }
}
