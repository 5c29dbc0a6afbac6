//! Factory pattern recognition
//!
//! A factory is a type named as one, or a type with a method whose declared
//! return type is a variation point and which actually returns one of its
//! descendants.

use super::{make_match, PatternMatch, PatternRecognizer, PatternType};
use crate::graph::{EntityId, VariabilityGraph};
use std::collections::BTreeMap;

/// Minimum number of direct subtypes of the declared return type
const MIN_PRODUCTS: usize = 2;

pub struct FactoryPatternRecognizer;

impl Default for FactoryPatternRecognizer {
    fn default() -> Self {
        Self::new()
    }
}

impl FactoryPatternRecognizer {
    pub fn new() -> Self {
        Self
    }

    fn named_factories(&self, graph: &VariabilityGraph) -> Vec<PatternMatch> {
        graph
            .type_entities()
            .filter(|(_, entity)| !entity.is_out_of_scope())
            .filter(|(_, entity)| entity.name.contains("Factory"))
            .map(|(id, entity)| {
                make_match(
                    PatternType::Factory,
                    id,
                    format!("{} is named as a factory", entity.name),
                )
            })
            .collect()
    }

    /// Owners of methods returning a subtype of their declared product type
    fn creating_methods(&self, graph: &VariabilityGraph) -> Vec<PatternMatch> {
        let mut creators: BTreeMap<EntityId, String> = BTreeMap::new();

        for site in graph.return_sites() {
            if creators.contains_key(&site.owner) || graph.entity(site.owner).is_out_of_scope() {
                continue;
            }
            let (Some(product), Some(returned)) = (
                graph.lookup_type(&site.declared_return),
                graph.lookup_type(&site.returned),
            ) else {
                continue;
            };

            if graph.subtypes(product).len() >= MIN_PRODUCTS
                && graph.is_descendant(product, returned)
            {
                creators.insert(
                    site.owner,
                    format!(
                        "{}.{} declares {} and returns {}",
                        graph.entity(site.owner).name,
                        site.method,
                        site.declared_return,
                        site.returned
                    ),
                );
            }
        }

        creators
            .into_iter()
            .map(|(owner, reasoning)| make_match(PatternType::Factory, owner, reasoning))
            .collect()
    }
}

impl PatternRecognizer for FactoryPatternRecognizer {
    fn name(&self) -> &str {
        "Factory"
    }

    fn detect(&self, graph: &VariabilityGraph) -> Vec<PatternMatch> {
        let mut matches = self.named_factories(graph);
        matches.extend(self.creating_methods(graph));
        matches
    }
}
