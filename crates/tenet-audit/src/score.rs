//! Score aggregation — converts violations into per-category and overall
//! scores under the document's category weights.
//!
//! Each category starts at its configured weight; every rule with n
//! violations deducts `penalty(severity) × √n`. The square root gives
//! diminishing returns per repeated violation of the same rule while
//! keeping the deduction strictly monotonic: more violations of
//! equal-or-higher severity never increase a category's score.

use std::collections::BTreeMap;

use crate::evaluate::Violation;
use crate::rules::{ActiveRuleSet, Severity};

/// Aggregated scores for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scores {
    /// Sum of category scores, clamped to [0, 100].
    pub overall: u32,
    pub categories: BTreeMap<String, u32>,
}

/// Aggregate violations into category and overall scores.
///
/// Categories with zero active rules (or zero violations) score their full
/// configured weight, so filtering can never inflate the overall score.
pub fn aggregate(violations: &[Violation], rules: &ActiveRuleSet) -> Scores {
    // (category, rule_id) → (severity, count). BTreeMap so the float
    // accumulation below runs in a deterministic order.
    let mut by_rule: BTreeMap<(&str, &str), (Severity, u32)> = BTreeMap::new();
    for v in violations {
        let entry = by_rule
            .entry((v.category.as_str(), v.rule_id.as_str()))
            .or_insert((v.severity, 0));
        // Severity orders most-severe-first; keep the highest observed.
        entry.0 = entry.0.min(v.severity);
        entry.1 += 1;
    }

    let mut categories = BTreeMap::new();
    for category in &rules.categories {
        let deduction: f64 = by_rule
            .iter()
            .filter(|((cat, _), _)| *cat == category.name)
            .map(|(_, (severity, count))| {
                severity.penalty() as f64 * (*count as f64).sqrt()
            })
            .sum();

        let score = (category.weight as f64 - deduction).max(0.0).round() as u32;
        categories.insert(category.name.clone(), score);
    }

    let overall = categories.values().sum::<u32>().min(100);
    Scores {
        overall,
        categories,
    }
}
