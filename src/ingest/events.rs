//! Discovery events and their JSON Lines encoding
//!
//! A front end that cannot link against the library writes one event per
//! line:
//!
//! ```text
//! {"event":"entity","name":"shapes.Shape","kind":"CLASS","tags":["ABSTRACT"]}
//! {"event":"edge","from":"shapes.Shape","to":"shapes.Circle","kind":"EXTENDS"}
//! {"event":"member","owner":"shapes.Circle","name":"area","kind":"METHOD"}
//! ```
//!
//! Blank lines and lines starting with `#` are ignored.

use crate::errors::VarmapError;
use crate::graph::{EntityKind, RelationKind, Tag};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One declaration discovered by a language front end
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum DiscoveryEvent {
    /// A class or interface declaration
    Entity {
        name: String,
        kind: EntityKind,
        #[serde(default)]
        tags: Vec<Tag>,
    },
    /// A method or constructor declared by `owner`
    Member {
        owner: String,
        name: String,
        kind: EntityKind,
        #[serde(default)]
        tags: Vec<Tag>,
    },
    /// An inheritance relationship, supertype `from`, subtype `to`
    Edge {
        from: String,
        to: String,
        kind: RelationKind,
        #[serde(default)]
        imports: Vec<String>,
    },
    /// An attribute of `owner` with its declared type
    Attribute {
        owner: String,
        name: String,
        declared_type: String,
    },
    /// A return statement inside a non-constructor method of `owner`
    Return {
        owner: String,
        method: String,
        declared_return: String,
        returned: String,
    },
}

/// A line that could not be decoded into an event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventParseFailure {
    pub line: usize,
    pub message: String,
}

/// Decoded events plus the lines that failed, in file order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedEvents {
    pub events: Vec<DiscoveryEvent>,
    pub failures: Vec<EventParseFailure>,
}

pub fn parse_events(contents: &str) -> ParsedEvents {
    let mut parsed = ParsedEvents::default();

    for (index, line) in contents.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        match serde_json::from_str::<DiscoveryEvent>(trimmed) {
            Ok(event) => parsed.events.push(event),
            Err(e) => parsed.failures.push(EventParseFailure {
                line: index + 1,
                message: e.to_string(),
            }),
        }
    }

    parsed
}

pub fn read_events(path: &Path) -> Result<ParsedEvents, VarmapError> {
    let contents = std::fs::read_to_string(path)?;
    Ok(parse_events(&contents))
}
