//! Core entity and relationship types of the variability graph

use petgraph::graph::NodeIndex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Stable handle of an entity inside a [`super::VariabilityGraph`].
pub type EntityId = NodeIndex;

/// Structural kind of an entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntityKind {
    Class,
    Interface,
    Method,
    Constructor,
    Attribute,
}

impl EntityKind {
    /// Classes and interfaces are unique by qualified name; members are not.
    pub fn is_type(self) -> bool {
        matches!(self, EntityKind::Class | EntityKind::Interface)
    }

    pub fn is_member(self) -> bool {
        matches!(self, EntityKind::Method | EntityKind::Constructor)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EntityKind::Class => "CLASS",
            EntityKind::Interface => "INTERFACE",
            EntityKind::Method => "METHOD",
            EntityKind::Constructor => "CONSTRUCTOR",
            EntityKind::Attribute => "ATTRIBUTE",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Labels carried by an entity.
///
/// Declaration-time tags (`Abstract`, `OutOfScope`, the template family) come
/// from the front end; `Strategy`, `Factory` and `Decorator` are added by the
/// pattern detectors; `Vp`, `Variant` and `MethodLevelVp` by the labeling pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Tag {
    Abstract,
    OutOfScope,
    Vp,
    Variant,
    MethodLevelVp,
    Template,
    TemplateSpecialization,
    TemplateInstantiation,
    Strategy,
    Factory,
    Decorator,
}

impl Tag {
    pub const PATTERNS: [Tag; 3] = [Tag::Strategy, Tag::Factory, Tag::Decorator];

    pub fn as_str(self) -> &'static str {
        match self {
            Tag::Abstract => "ABSTRACT",
            Tag::OutOfScope => "OUT_OF_SCOPE",
            Tag::Vp => "VP",
            Tag::Variant => "VARIANT",
            Tag::MethodLevelVp => "METHOD_LEVEL_VP",
            Tag::Template => "TEMPLATE",
            Tag::TemplateSpecialization => "TEMPLATE_SPECIALIZATION",
            Tag::TemplateInstantiation => "TEMPLATE_INSTANTIATION",
            Tag::Strategy => "STRATEGY",
            Tag::Factory => "FACTORY",
            Tag::Decorator => "DECORATOR",
        }
    }

    pub fn is_pattern(self) -> bool {
        Self::PATTERNS.contains(&self)
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of a directed relationship
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RelationKind {
    Extends,
    Implements,
    Method,
    Attribute,
}

impl RelationKind {
    pub fn is_inheritance(self) -> bool {
        matches!(self, RelationKind::Extends | RelationKind::Implements)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RelationKind::Extends => "EXTENDS",
            RelationKind::Implements => "IMPLEMENTS",
            RelationKind::Method => "METHOD",
            RelationKind::Attribute => "ATTRIBUTE",
        }
    }
}

impl fmt::Display for RelationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-entity variability counters produced by the metric pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariabilityCounters {
    pub method_vps: usize,
    pub constructor_vps: usize,
    pub method_variants: usize,
    pub constructor_variants: usize,
    pub class_variants: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entity {
    pub name: String,
    pub kind: EntityKind,
    pub tags: BTreeSet<Tag>,
    pub counters: VariabilityCounters,
}

impl Entity {
    pub fn new(name: impl Into<String>, kind: EntityKind) -> Self {
        Self {
            name: name.into(),
            kind,
            tags: BTreeSet::new(),
            counters: VariabilityCounters::default(),
        }
    }

    pub fn has_tag(&self, tag: Tag) -> bool {
        self.tags.contains(&tag)
    }

    pub fn is_out_of_scope(&self) -> bool {
        self.has_tag(Tag::OutOfScope)
    }

    pub fn has_pattern(&self) -> bool {
        Tag::PATTERNS.iter().any(|tag| self.has_tag(*tag))
    }

    /// Trailing segment of the qualified name (`a.b.Shape` or `ns::Shape` -> `Shape`)
    pub fn simple_name(&self) -> &str {
        simple_name(&self.name)
    }
}

/// Edge payload. Attribute edges carry the declared type of the attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relationship {
    pub kind: RelationKind,
    pub declared_type: Option<String>,
}

impl Relationship {
    pub fn new(kind: RelationKind) -> Self {
        Self {
            kind,
            declared_type: None,
        }
    }

    pub fn attribute(declared_type: impl Into<String>) -> Self {
        Self {
            kind: RelationKind::Attribute,
            declared_type: Some(declared_type.into()),
        }
    }
}

/// A return statement inside a non-constructor method, as seen by the front end
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReturnSite {
    pub owner: EntityId,
    pub method: String,
    pub declared_return: String,
    pub returned: String,
}

pub fn simple_name(qualified: &str) -> &str {
    let after_path = qualified.rsplit("::").next().unwrap_or(qualified);
    after_path.rsplit('.').next().unwrap_or(after_path)
}
