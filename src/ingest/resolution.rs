//! Supertype name correction through the declaring file's imports
//!
//! Front ends that cannot bind a supertype reliably pass the supertype name as
//! they saw it, plus the imports of the declaring file. Resolution order:
//!
//! 1. the first single-type import ending in `.<SimpleName>`;
//! 2. for each on-demand import `a.b.*`, an already declared type `a.b.<SimpleName>`.
//!
//! If neither applies, the supplied name is kept.

use crate::graph::simple_name;

/// Outcome of resolving a supertype name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedName {
    pub name: String,
    /// The resolved name differs from the one supplied
    pub corrected: bool,
}

/// Resolve `supplied` against `imports`; `is_declared` answers whether a
/// qualified type name already exists in the store.
pub fn resolve_supertype<E>(
    supplied: &str,
    imports: &[String],
    mut is_declared: impl FnMut(&str) -> Result<bool, E>,
) -> Result<ResolvedName, E> {
    let keep = || ResolvedName {
        name: supplied.to_string(),
        corrected: false,
    };

    if imports.is_empty() {
        return Ok(keep());
    }

    let simple = simple_name(supplied);
    let suffix = format!(".{}", simple);

    let single_type = imports
        .iter()
        .filter(|import| !import.ends_with(".*"))
        .find(|import| import.ends_with(&suffix) || import.as_str() == simple);
    if let Some(import) = single_type {
        return Ok(resolved(supplied, import.clone()));
    }

    for package in imports.iter().filter_map(|import| import.strip_suffix(".*")) {
        let candidate = format!("{}.{}", package, simple);
        if is_declared(&candidate)? {
            return Ok(resolved(supplied, candidate));
        }
    }

    Ok(keep())
}

fn resolved(supplied: &str, name: String) -> ResolvedName {
    ResolvedName {
        corrected: name != supplied,
        name,
    }
}
