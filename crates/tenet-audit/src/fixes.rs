//! Fix suggestion — maps violations to suggested replacement text.
//!
//! The engine only suggests; applying a fix is an external editing
//! collaborator that must be given explicit confirmation. Nothing here
//! touches the filesystem.

use serde::Serialize;

use crate::evaluate::Violation;
use crate::rules::ActiveRuleSet;

/// A suggested edit for one violation.
#[derive(Debug, Clone, Serialize)]
pub struct FixSuggestion {
    pub violation: Violation,
    pub suggested_text: String,
}

/// Suggest fixes for violations against the rule set that produced them.
///
/// Suggestions are generated per category strategy; rules with a `doc_ref`
/// have the reference appended so the collaborator can cite the standard.
pub fn suggest(violations: &[Violation], rules: &ActiveRuleSet) -> Vec<FixSuggestion> {
    violations
        .iter()
        .filter_map(|v| {
            let text = suggestion_text(v)?;
            let text = match rules.rule(&v.rule_id).and_then(|r| r.doc_ref.as_deref()) {
                Some(doc_ref) => format!("{text} (see {doc_ref})"),
                None => text,
            };
            Some(FixSuggestion {
                violation: v.clone(),
                suggested_text: text,
            })
        })
        .collect()
}

/// Pick a suggestion by category. Categories without a strategy produce no
/// suggestion; the violation message already states the problem.
fn suggestion_text(v: &Violation) -> Option<String> {
    let text = match v.category.as_str() {
        "naming" => format!(
            "Rename the declaration at {}:{} to match the project convention",
            v.file,
            v.line.unwrap_or(0)
        ),
        "security" => format!(
            "Replace the flagged construct at {}:{} with a safe equivalent: {}",
            v.file,
            v.line.unwrap_or(0),
            v.message
        ),
        "error_handling" => format!(
            "Handle or propagate the error at {}:{} instead of discarding it",
            v.file,
            v.line.unwrap_or(0)
        ),
        "documentation" => format!(
            "Resolve or remove the stale marker at {}:{}",
            v.file,
            v.line.unwrap_or(0)
        ),
        "structure" | "safety" => format!(
            "Rework {}:{}: {}",
            v.file,
            v.line.unwrap_or(0),
            v.message
        ),
        _ => return None,
    };
    Some(text)
}
