//! Exported artifacts: the labeled graph document and the statistics document
//!
//! Only declared entities carrying a variability label are exported. Out of
//! scope placeholders stay in the graph for traversal but never appear in
//! either document.

use crate::graph::{Entity, EntityId, Tag, VariabilityGraph};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A labeled entity as written to the graph document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeRecord {
    /// Entity kind followed by the entity's tags
    pub types: Vec<String>,
    pub name: String,
    #[serde(rename = "methodVPs")]
    pub method_vps: usize,
    #[serde(rename = "constructorVPs")]
    pub constructor_vps: usize,
    #[serde(rename = "methodVariants")]
    pub method_variants: usize,
    #[serde(rename = "constructorVariants")]
    pub constructor_variants: usize,
    #[serde(rename = "classVariants")]
    pub class_variants: usize,
}

impl NodeRecord {
    pub fn from_entity(entity: &Entity) -> Self {
        let types = std::iter::once(entity.kind.as_str())
            .chain(entity.tags.iter().map(|tag| tag.as_str()))
            .map(str::to_string)
            .collect();

        Self {
            types,
            name: entity.name.clone(),
            method_vps: entity.counters.method_vps,
            constructor_vps: entity.counters.constructor_vps,
            method_variants: entity.counters.method_variants,
            constructor_variants: entity.counters.constructor_variants,
            class_variants: entity.counters.class_variants,
        }
    }
}

/// An inheritance relationship between two exported nodes, supertype first
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkRecord {
    pub source: String,
    pub target: String,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphDocument {
    pub nodes: Vec<NodeRecord>,
    pub links: Vec<LinkRecord>,
}

/// True if the entity belongs in the exported graph
pub fn is_exported(entity: &Entity) -> bool {
    !entity.is_out_of_scope()
        && [Tag::Vp, Tag::Variant, Tag::MethodLevelVp]
            .iter()
            .any(|tag| entity.has_tag(*tag))
}

impl GraphDocument {
    pub fn from_graph(graph: &VariabilityGraph) -> Self {
        let exported: HashSet<EntityId> = graph
            .entities()
            .filter(|(_, entity)| is_exported(entity))
            .map(|(id, _)| id)
            .collect();

        let nodes = graph
            .entities()
            .filter(|(id, _)| exported.contains(id))
            .map(|(_, entity)| NodeRecord::from_entity(entity))
            .collect();

        let mut seen = HashSet::new();
        let links = graph
            .relationships()
            .filter(|(_, _, relation)| relation.kind.is_inheritance())
            .filter(|(from, to, _)| exported.contains(from) && exported.contains(to))
            .filter(|(from, to, relation)| seen.insert((*from, *to, relation.kind)))
            .map(|(from, to, relation)| LinkRecord {
                source: graph.entity(from).name.clone(),
                target: graph.entity(to).name.clone(),
                kind: relation.kind.as_str().to_string(),
            })
            .collect();

        Self { nodes, links }
    }
}

/// Aggregate variability figures over all declared entities
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statistics {
    #[serde(rename = "VPs")]
    pub vps: usize,
    #[serde(rename = "methodsVPs")]
    pub methods_vps: usize,
    #[serde(rename = "constructorsVPs")]
    pub constructors_vps: usize,
    #[serde(rename = "methodLevelVPs")]
    pub method_level_vps: usize,
    #[serde(rename = "classLevelVPs")]
    pub class_level_vps: usize,
    pub variants: usize,
    #[serde(rename = "methodsVariants")]
    pub methods_variants: usize,
    #[serde(rename = "constructorsVariants")]
    pub constructors_variants: usize,
    #[serde(rename = "methodLevelVariants")]
    pub method_level_variants: usize,
    #[serde(rename = "classLevelVariants")]
    pub class_level_variants: usize,
}

impl Statistics {
    pub fn from_graph(graph: &VariabilityGraph) -> Self {
        let mut stats = graph
            .entities()
            .map(|(_, entity)| entity)
            .filter(|entity| !entity.is_out_of_scope())
            .fold(Statistics::default(), |mut acc, entity| {
                acc.methods_vps += entity.counters.method_vps;
                acc.constructors_vps += entity.counters.constructor_vps;
                acc.methods_variants += entity.counters.method_variants;
                acc.constructors_variants += entity.counters.constructor_variants;
                if entity.has_tag(Tag::Vp) {
                    acc.class_level_vps += 1;
                } else if entity.has_tag(Tag::Variant) {
                    acc.class_level_variants += 1;
                }
                acc
            });

        stats.method_level_vps = stats.methods_vps + stats.constructors_vps;
        stats.vps = stats.class_level_vps + stats.method_level_vps;
        stats.method_level_variants = stats.methods_variants + stats.constructors_variants;
        stats.variants = stats.class_level_variants + stats.method_level_variants;
        stats
    }
}
