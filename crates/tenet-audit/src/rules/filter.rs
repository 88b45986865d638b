//! Rule filtering — narrows a document to the rules applicable to a
//! detected ecosystem/framework set.

use crate::detect::ProjectContext;

use super::loader::{CompiledRule, CompiledRuleDocument};

/// The rules that will actually run, still grouped under their categories.
///
/// A category with zero active rules keeps its configured weight so the
/// score denominator is unchanged; filtering must never inflate scores.
#[derive(Debug, Clone)]
pub struct ActiveRuleSet {
    pub ecosystem: String,
    pub categories: Vec<ActiveCategory>,
}

#[derive(Debug, Clone)]
pub struct ActiveCategory {
    pub name: String,
    pub weight: u32,
    pub rules: Vec<CompiledRule>,
}

impl ActiveRuleSet {
    pub fn rule_count(&self) -> usize {
        self.categories.iter().map(|c| c.rules.len()).sum()
    }

    /// Iterate `(category, rule)` pairs in document order.
    pub fn iter_rules(&self) -> impl Iterator<Item = (&ActiveCategory, &CompiledRule)> {
        self.categories
            .iter()
            .flat_map(|c| c.rules.iter().map(move |r| (c, r)))
    }

    /// Find an active rule by id.
    pub fn rule(&self, id: &str) -> Option<&CompiledRule> {
        self.iter_rules().map(|(_, r)| r).find(|r| r.id == id)
    }

    /// The union of active `file_pattern` globs, or `None` if any active
    /// rule is unscoped (in which case every text file is a candidate).
    pub fn include_globs(&self) -> Option<Vec<String>> {
        let mut globs = Vec::new();
        for (_, rule) in self.iter_rules() {
            match rule.file_pattern {
                Some(ref pattern) => {
                    let raw = pattern.as_str().to_string();
                    if !globs.contains(&raw) {
                        globs.push(raw);
                    }
                }
                None => return None,
            }
        }
        Some(globs)
    }
}

/// Filter a document down to the rules active for `ctx`.
///
/// A rule is active iff its `applicable_to` set contains `"*"` or
/// intersects the context's frameworks plus its ecosystem.
pub fn filter(doc: &CompiledRuleDocument, ctx: &ProjectContext) -> ActiveRuleSet {
    let tags = ctx.applicability_tags();

    let categories = doc
        .categories
        .iter()
        .map(|category| ActiveCategory {
            name: category.name.clone(),
            weight: category.weight,
            rules: category
                .rules
                .iter()
                .filter(|rule| rule.applies_to(&tags))
                .cloned()
                .collect(),
        })
        .collect();

    ActiveRuleSet {
        ecosystem: doc.ecosystem.clone(),
        categories,
    }
}
