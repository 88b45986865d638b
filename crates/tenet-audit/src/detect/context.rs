//! The immutable per-run project snapshot.

use std::collections::BTreeSet;

use serde::Serialize;

/// What detection learned about the audited tree.
///
/// Produced once per run and never mutated afterward; every downstream
/// stage receives it by shared reference. Sets are ordered so serialized
/// output is deterministic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectContext {
    ecosystem: String,
    frameworks: BTreeSet<String>,
    enabled_ecosystems: BTreeSet<String>,
}

impl ProjectContext {
    pub fn new(
        ecosystem: String,
        frameworks: BTreeSet<String>,
        enabled_ecosystems: BTreeSet<String>,
    ) -> Self {
        Self {
            ecosystem,
            frameworks,
            enabled_ecosystems,
        }
    }

    pub fn ecosystem(&self) -> &str {
        &self.ecosystem
    }

    pub fn frameworks(&self) -> &BTreeSet<String> {
        &self.frameworks
    }

    pub fn enabled_ecosystems(&self) -> &BTreeSet<String> {
        &self.enabled_ecosystems
    }

    /// The tags a rule's `applicable_to` set is matched against:
    /// the frameworks plus the ecosystem itself.
    pub fn applicability_tags(&self) -> BTreeSet<&str> {
        let mut tags: BTreeSet<&str> = self.frameworks.iter().map(|s| s.as_str()).collect();
        tags.insert(self.ecosystem.as_str());
        tags
    }
}
