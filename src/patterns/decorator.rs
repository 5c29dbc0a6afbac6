//! Decorator pattern recognition
//!
//! A decorator wraps an instance of its own base type: it extends a base with
//! several subclasses, has concrete decorators of its own, and holds a field
//! of the base type. Classes named as decorators that hold any field also
//! count.

use super::{make_match, PatternMatch, PatternRecognizer, PatternType};
use crate::graph::{Entity, EntityId, EntityKind, VariabilityGraph};

/// Minimum number of direct subclasses of the decorated base
const MIN_BASE_SUBCLASSES: usize = 2;

pub struct DecoratorPatternRecognizer;

impl Default for DecoratorPatternRecognizer {
    fn default() -> Self {
        Self::new()
    }
}

impl DecoratorPatternRecognizer {
    pub fn new() -> Self {
        Self
    }

    fn named_decorator(&self, graph: &VariabilityGraph, id: EntityId, entity: &Entity) -> Option<String> {
        (entity.name.contains("Decorator") && graph.attribute_count(id) > 0)
            .then(|| format!("{} is named as a decorator and holds a field", entity.name))
    }

    /// The base class `id` decorates, if it has the wrapping shape
    fn wrapped_base<'g>(&self, graph: &'g VariabilityGraph, id: EntityId) -> Option<&'g Entity> {
        if graph.extending_types(id).is_empty() {
            return None;
        }
        let field_types = graph.attribute_types(id);

        graph
            .extended_types(id)
            .into_iter()
            .filter(|base| graph.subtypes(*base).len() >= MIN_BASE_SUBCLASSES)
            .map(|base| graph.entity(base))
            .find(|base| field_types.contains(&base.name.as_str()))
    }
}

impl PatternRecognizer for DecoratorPatternRecognizer {
    fn name(&self) -> &str {
        "Decorator"
    }

    fn detect(&self, graph: &VariabilityGraph) -> Vec<PatternMatch> {
        graph
            .entities_of_kind(EntityKind::Class)
            .filter(|(_, entity)| !entity.is_out_of_scope())
            .filter_map(|(id, entity)| {
                let reasoning = self.named_decorator(graph, id, entity).or_else(|| {
                    self.wrapped_base(graph, id).map(|base| {
                        format!("{} extends and wraps an instance of {}", entity.name, base.name)
                    })
                })?;
                Some(make_match(PatternType::Decorator, id, reasoning))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{RelationKind, Relationship};

    struct Windows {
        graph: VariabilityGraph,
        decorator: EntityId,
        plain: EntityId,
    }

    /// Window <- {ScrollWindow, PlainWindow}; ScrollWindow <- VerticalScroll
    fn windows(wrapped_type: &str) -> Windows {
        let mut graph = VariabilityGraph::new();
        let window = graph.create_entity("Window", EntityKind::Class, &[]);
        let decorator = graph.create_entity("ScrollWindow", EntityKind::Class, &[]);
        let plain = graph.create_entity("PlainWindow", EntityKind::Class, &[]);
        let concrete = graph.create_entity("VerticalScroll", EntityKind::Class, &[]);
        graph.add_relation(window, decorator, RelationKind::Extends);
        graph.add_relation(window, plain, RelationKind::Extends);
        graph.add_relation(decorator, concrete, RelationKind::Extends);

        let inner = graph.create_entity("inner", EntityKind::Attribute, &[]);
        graph.add_edge(decorator, inner, Relationship::attribute(wrapped_type));

        Windows {
            graph,
            decorator,
            plain,
        }
    }

    fn detected(graph: &VariabilityGraph) -> Vec<EntityId> {
        DecoratorPatternRecognizer::new()
            .detect(graph)
            .into_iter()
            .map(|m| m.entity)
            .collect()
    }

    #[test]
    fn test_wrapping_subclass_is_detected_and_sibling_is_not() {
        let windows = windows("Window");
        let found = detected(&windows.graph);
        assert_eq!(found, vec![windows.decorator]);
        assert!(!found.contains(&windows.plain));
    }

    #[test]
    fn test_field_of_unrelated_type_is_not_wrapping() {
        let windows = windows("Border");
        assert!(detected(&windows.graph).is_empty());
    }

    #[test]
    fn test_wrapper_without_concrete_decorators_is_ignored() {
        let mut graph = VariabilityGraph::new();
        let window = graph.create_entity("Window", EntityKind::Class, &[]);
        let wrapper = graph.create_entity("ScrollWindow", EntityKind::Class, &[]);
        let plain = graph.create_entity("PlainWindow", EntityKind::Class, &[]);
        graph.add_relation(window, wrapper, RelationKind::Extends);
        graph.add_relation(window, plain, RelationKind::Extends);
        let inner = graph.create_entity("inner", EntityKind::Attribute, &[]);
        graph.add_edge(wrapper, inner, Relationship::attribute("Window"));

        assert!(detected(&graph).is_empty());
    }

    #[test]
    fn test_decorator_name_requires_a_field() {
        let mut graph = VariabilityGraph::new();
        let bare = graph.create_entity("LoggingDecorator", EntityKind::Class, &[]);
        assert!(detected(&graph).is_empty());

        let field = graph.create_entity("target", EntityKind::Attribute, &[]);
        graph.add_edge(bare, field, Relationship::attribute("Service"));
        assert_eq!(detected(&graph), vec![bare]);
    }
}
