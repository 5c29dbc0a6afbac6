//! Abstract-class inference
//!
//! Front ends for languages without an `abstract` keyword only see abstract
//! methods (pure virtual functions). A class declaring at least one method
//! tagged ABSTRACT is itself abstract.

use crate::graph::{EntityKind, Tag, VariabilityGraph};

/// Tag every class owning an abstract method as ABSTRACT; returns how many
/// classes gained the tag.
pub fn infer_abstract_classes(graph: &mut VariabilityGraph) -> usize {
    let abstract_owners: Vec<_> = graph
        .entities_of_kind(EntityKind::Class)
        .filter(|(_, class)| !class.has_tag(Tag::Abstract))
        .map(|(id, _)| id)
        .filter(|id| {
            graph
                .members(*id, EntityKind::Method)
                .into_iter()
                .any(|method| graph.has_tag(method, Tag::Abstract))
        })
        .collect();

    abstract_owners
        .into_iter()
        .filter(|id| graph.add_tag(*id, Tag::Abstract))
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::RelationKind;

    #[test]
    fn test_class_with_pure_virtual_method_becomes_abstract() {
        let mut graph = VariabilityGraph::new();
        let window = graph.create_entity("gui::Window", EntityKind::Class, &[]);
        let draw = graph.create_entity("draw", EntityKind::Method, &[Tag::Abstract]);
        graph.add_relation(window, draw, RelationKind::Method);

        let plain = graph.create_entity("gui::Label", EntityKind::Class, &[]);
        let text = graph.create_entity("text", EntityKind::Method, &[]);
        graph.add_relation(plain, text, RelationKind::Method);

        assert_eq!(infer_abstract_classes(&mut graph), 1);
        assert!(graph.has_tag(window, Tag::Abstract));
        assert!(!graph.has_tag(plain, Tag::Abstract));

        assert_eq!(infer_abstract_classes(&mut graph), 0);
    }
}
