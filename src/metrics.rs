//! Derived variability counters
//!
//! Counters are recomputed from the raw graph on every call: each type entity
//! is reset before its counters are written, so repeated runs over an
//! unchanged graph produce identical values.

use crate::graph::{EntityId, EntityKind, VariabilityCounters, VariabilityGraph};
use std::collections::HashMap;

/// Overload figures for one group of same-named members
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OverloadSummary {
    /// Names shared by two or more members
    pub colliding_names: usize,
    /// Members belonging to any colliding name group
    pub colliding_members: usize,
}

/// Group member names and count the collisions.
pub fn summarize_overloads<'a>(names: impl IntoIterator<Item = &'a str>) -> OverloadSummary {
    let mut groups: HashMap<&str, usize> = HashMap::new();
    for name in names {
        *groups.entry(name).or_default() += 1;
    }

    groups
        .values()
        .filter(|&&size| size >= 2)
        .fold(OverloadSummary::default(), |acc, &size| OverloadSummary {
            colliding_names: acc.colliding_names + 1,
            colliding_members: acc.colliding_members + size,
        })
}

/// Counters for a single entity as derived from the current graph.
pub fn counters_for(graph: &VariabilityGraph, id: EntityId) -> VariabilityCounters {
    let entity = graph.entity(id);
    let mut counters = VariabilityCounters::default();

    if entity.kind.is_type() {
        counters.class_variants = graph.subtypes(id).len();
    }

    if entity.kind == EntityKind::Class {
        let methods = graph.members(id, EntityKind::Method);
        let overloads =
            summarize_overloads(methods.iter().map(|method| graph.entity(*method).name.as_str()));
        counters.method_vps = overloads.colliding_names;
        counters.method_variants = overloads.colliding_members;

        let constructors = graph.members(id, EntityKind::Constructor).len();
        if constructors > 1 {
            counters.constructor_vps = 1;
            counters.constructor_variants = constructors;
        }
    }

    counters
}

/// Recompute the counters of every entity in the graph.
pub fn compute_counters(graph: &mut VariabilityGraph) {
    let computed: Vec<_> = graph
        .entity_ids()
        .map(|id| (id, counters_for(graph, id)))
        .collect();

    for (id, counters) in computed {
        graph.set_counters(id, counters);
    }
    tracing::debug!(entities = graph.node_count(), "computed variability counters");
}
