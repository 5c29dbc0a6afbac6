//! Variation point and variant labeling
//!
//! Rules run in a fixed order, each reading the tags the previous ones set:
//!
//! 1. `VP`: a declared interface, abstract class, pattern participant, or type
//!    with at least one direct subtype.
//! 2. `METHOD_LEVEL_VP`: a declared entity with overloaded methods or
//!    constructors.
//! 3. `VARIANT`: a direct subtype of a `VP`.
//!
//! Labels are only ever added, so relabeling an unchanged graph is a no-op.

use crate::graph::{Entity, EntityKind, Tag, VariabilityGraph};
use serde::Serialize;

/// Entities that gained each label during one labeling run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LabelCounts {
    pub variation_points: usize,
    pub method_level_vps: usize,
    pub variants: usize,
}

pub fn is_variation_point(entity: &Entity) -> bool {
    if entity.is_out_of_scope() {
        return false;
    }
    entity.kind == EntityKind::Interface
        || (entity.kind == EntityKind::Class && entity.has_tag(Tag::Abstract))
        || entity.has_pattern()
        || entity.counters.class_variants > 0
}

pub fn is_method_level_vp(entity: &Entity) -> bool {
    !entity.is_out_of_scope()
        && (entity.counters.method_vps > 0 || entity.counters.constructor_vps > 0)
}

pub fn apply_labels(graph: &mut VariabilityGraph) -> LabelCounts {
    let mut counts = LabelCounts::default();

    let vps: Vec<_> = graph
        .entities()
        .filter(|(_, entity)| is_variation_point(entity))
        .map(|(id, _)| id)
        .collect();
    for id in vps {
        if graph.add_tag(id, Tag::Vp) {
            counts.variation_points += 1;
        }
    }

    let method_level: Vec<_> = graph
        .entities()
        .filter(|(_, entity)| is_method_level_vp(entity))
        .map(|(id, _)| id)
        .collect();
    for id in method_level {
        if graph.add_tag(id, Tag::MethodLevelVp) {
            counts.method_level_vps += 1;
        }
    }

    let variants: Vec<_> = graph
        .type_entities()
        .filter(|(id, _)| {
            graph
                .supertypes(*id)
                .into_iter()
                .any(|parent| graph.has_tag(parent, Tag::Vp))
        })
        .map(|(id, _)| id)
        .collect();
    for id in variants {
        if graph.add_tag(id, Tag::Variant) {
            counts.variants += 1;
        }
    }

    tracing::debug!(
        vps = counts.variation_points,
        method_level_vps = counts.method_level_vps,
        variants = counts.variants,
        "applied variability labels"
    );
    counts
}
