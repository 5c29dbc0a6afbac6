//! Strategy pattern recognition
//!
//! A strategy is a type some class holds as a field, which is either named
//! like a strategy or has several interchangeable implementations.

use super::{make_match, PatternMatch, PatternRecognizer, PatternType};
use crate::graph::VariabilityGraph;

/// Minimum number of direct subtypes for a field type to count as a strategy
const MIN_IMPLEMENTATIONS: usize = 2;

pub struct StrategyPatternRecognizer;

impl Default for StrategyPatternRecognizer {
    fn default() -> Self {
        Self::new()
    }
}

impl StrategyPatternRecognizer {
    pub fn new() -> Self {
        Self
    }
}

impl PatternRecognizer for StrategyPatternRecognizer {
    fn name(&self) -> &str {
        "Strategy"
    }

    fn detect(&self, graph: &VariabilityGraph) -> Vec<PatternMatch> {
        let field_types = graph.attribute_type_names();

        graph
            .type_entities()
            .filter(|(_, entity)| !entity.is_out_of_scope())
            .filter(|(_, entity)| field_types.contains(entity.name.as_str()))
            .filter_map(|(id, entity)| {
                let implementations = graph.subtypes(id).len();
                if entity.simple_name().contains("Strategy") {
                    Some(make_match(
                        PatternType::Strategy,
                        id,
                        format!("{} is held as a field and named as a strategy", entity.name),
                    ))
                } else if implementations >= MIN_IMPLEMENTATIONS {
                    Some(make_match(
                        PatternType::Strategy,
                        id,
                        format!(
                            "{} is held as a field and has {} implementations",
                            entity.name, implementations
                        ),
                    ))
                } else {
                    None
                }
            })
            .collect()
    }
}
