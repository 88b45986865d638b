//! Manifest readers shared by the detectors.
//!
//! Every reader is best-effort: an unreadable or malformed manifest yields
//! an empty dependency list rather than an error, since detection must be a
//! pure predicate over the tree with no side effects.

use std::collections::BTreeSet;
use std::path::Path;

use aho_corasick::AhoCorasick;

/// Dependency names declared in a JSON manifest (package.json,
/// composer.json): the keys of the named dependency tables.
pub fn json_dependencies(path: &Path, tables: &[&str]) -> Vec<String> {
    let Ok(content) = std::fs::read_to_string(path) else {
        return Vec::new();
    };
    let Ok(value) = serde_json::from_str::<serde_json::Value>(&content) else {
        return Vec::new();
    };

    let mut deps = Vec::new();
    for table in tables {
        if let Some(map) = value.get(table).and_then(|v| v.as_object()) {
            deps.extend(map.keys().cloned());
        }
    }
    deps.sort();
    deps
}

/// Dependency names declared in a TOML manifest (Cargo.toml): the keys of
/// the named dependency tables.
pub fn toml_table_dependencies(path: &Path, tables: &[&str]) -> Vec<String> {
    let Ok(content) = std::fs::read_to_string(path) else {
        return Vec::new();
    };
    let Ok(value) = content.parse::<toml::Value>() else {
        return Vec::new();
    };

    let mut deps = Vec::new();
    for table in tables {
        // Dotted paths: "workspace.dependencies" walks nested tables.
        let mut cursor = Some(&value);
        for part in table.split('.') {
            cursor = cursor.and_then(|v| v.get(part));
        }
        if let Some(toml::Value::Table(map)) = cursor {
            deps.extend(map.keys().cloned());
        }
    }
    deps.sort();
    deps
}

/// Dependency specifiers from a pyproject.toml `[project] dependencies`
/// array (PEP 621), reduced to bare distribution names.
pub fn pyproject_dependencies(path: &Path) -> Vec<String> {
    let Ok(content) = std::fs::read_to_string(path) else {
        return Vec::new();
    };
    let Ok(value) = content.parse::<toml::Value>() else {
        return Vec::new();
    };

    let mut deps = Vec::new();
    if let Some(toml::Value::Array(items)) =
        value.get("project").and_then(|p| p.get("dependencies"))
    {
        for item in items {
            if let Some(spec) = item.as_str() {
                deps.push(requirement_name(spec));
            }
        }
    }
    deps.sort();
    deps
}

/// Dependency names from a requirements.txt-style file: one specifier per
/// line, comments and blank lines skipped.
pub fn requirements_dependencies(path: &Path) -> Vec<String> {
    let Ok(content) = std::fs::read_to_string(path) else {
        return Vec::new();
    };

    let mut deps: Vec<String> = content
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with('#') && !l.starts_with('-'))
        .map(requirement_name)
        .collect();
    deps.sort();
    deps
}

/// Module paths from a go.mod require block (or single-line requires).
pub fn gomod_dependencies(path: &Path) -> Vec<String> {
    let Ok(content) = std::fs::read_to_string(path) else {
        return Vec::new();
    };

    let mut deps = Vec::new();
    let mut in_block = false;
    for line in content.lines() {
        let line = line.trim();
        if line.starts_with("require (") {
            in_block = true;
            continue;
        }
        if in_block {
            if line == ")" {
                in_block = false;
                continue;
            }
            if let Some(module) = line.split_whitespace().next() {
                deps.push(module.to_string());
            }
        } else if let Some(rest) = line.strip_prefix("require ") {
            if let Some(module) = rest.split_whitespace().next() {
                deps.push(module.to_string());
            }
        }
    }
    deps.sort();
    deps
}

/// Reduce a PEP 508 requirement specifier to its distribution name:
/// `fastapi[all]>=0.100` → `fastapi`.
fn requirement_name(spec: &str) -> String {
    spec.chars()
        .take_while(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_' || *c == '.')
        .collect::<String>()
        .to_lowercase()
}

/// Match declared dependency names against framework markers, returning the
/// framework tags whose markers matched. Markers are literal multi-pattern
/// searched via Aho-Corasick; a dependency counts when a marker matches
/// anywhere in its name ("react-dom" carries the "react" marker).
pub fn match_markers(deps: &[String], markers: &[(&str, &str)]) -> BTreeSet<String> {
    if deps.is_empty() || markers.is_empty() {
        return BTreeSet::new();
    }

    let patterns: Vec<&str> = markers.iter().map(|(marker, _)| *marker).collect();
    let Ok(ac) = AhoCorasick::new(&patterns) else {
        return BTreeSet::new();
    };

    let mut tags = BTreeSet::new();
    for dep in deps {
        for m in ac.find_iter(dep.as_str()) {
            tags.insert(markers[m.pattern().as_usize()].1.to_string());
        }
    }
    tags
}

/// Whether a dependency list declares an exact package name.
pub fn has_dependency(deps: &[String], name: &str) -> bool {
    deps.iter().any(|d| d == name)
}
