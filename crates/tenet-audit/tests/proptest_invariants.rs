//! Property-based tests for scoring invariants.
//!
//! Fuzz-verifies:
//!   - overall score bounds (0 ≤ score ≤ 100) for arbitrary violation sets
//!   - monotonicity: adding a violation never increases any score

use std::collections::BTreeSet;

use proptest::prelude::*;

use tenet_audit::detect::ProjectContext;
use tenet_audit::evaluate::Violation;
use tenet_audit::rules::{filter, loader, ActiveRuleSet, Severity};
use tenet_audit::score::aggregate;

const DOC: &str = r#"
[document]
ecosystem = "python"
schema_version = "1"

[categories.naming]
weight = 20

[[categories.naming.rules]]
id = "NAME-1"
pattern = 'camelCase'
severity = "warning"
message = "naming"

[categories.security]
weight = 45

[[categories.security.rules]]
id = "SEC-1"
pattern = 'eval'
severity = "error"
message = "security"

[[categories.security.rules]]
id = "SEC-2"
pattern = 'exec'
severity = "warning"
message = "security"

[categories.structure]
weight = 35

[[categories.structure.rules]]
id = "STR-1"
pattern = 'print'
severity = "info"
message = "structure"
"#;

fn active() -> ActiveRuleSet {
    let doc = loader::load_from_str("prop", DOC).expect("valid doc");
    let ctx = ProjectContext::new("python".to_string(), BTreeSet::new(), BTreeSet::new());
    filter::filter(&doc, &ctx)
}

const RULES: &[(&str, &str, Severity)] = &[
    ("NAME-1", "naming", Severity::Warning),
    ("SEC-1", "security", Severity::Error),
    ("SEC-2", "security", Severity::Warning),
    ("STR-1", "structure", Severity::Info),
];

fn violation(rule_index: usize, file_index: u8) -> Violation {
    let (rule_id, category, severity) = RULES[rule_index % RULES.len()];
    Violation {
        rule_id: rule_id.to_string(),
        category: category.to_string(),
        file: format!("src/file_{file_index}.py"),
        line: Some(u32::from(file_index) + 1),
        severity,
        message: String::new(),
    }
}

proptest! {
    /// Scores stay inside [0, 100] for any violation multiset.
    #[test]
    fn prop_overall_score_bounded(
        picks in prop::collection::vec((0usize..4, any::<u8>()), 0..200)
    ) {
        let violations: Vec<Violation> =
            picks.iter().map(|(r, f)| violation(*r, *f)).collect();
        let rules = active();
        let scores = aggregate(&violations, &rules);

        prop_assert!(scores.overall <= 100);
        for category in &rules.categories {
            let score = scores.categories[&category.name];
            prop_assert!(
                score <= category.weight,
                "category score {} exceeds weight {}",
                score,
                category.weight
            );
        }
    }

    /// Adding one violation never increases any score.
    #[test]
    fn prop_adding_a_violation_is_monotone(
        picks in prop::collection::vec((0usize..4, any::<u8>()), 0..100),
        extra in (0usize..4, any::<u8>())
    ) {
        let rules = active();
        let violations: Vec<Violation> =
            picks.iter().map(|(r, f)| violation(*r, *f)).collect();
        let before = aggregate(&violations, &rules);

        let mut more = violations;
        more.push(violation(extra.0, extra.1));
        let after = aggregate(&more, &rules);

        prop_assert!(after.overall <= before.overall);
        for (name, score) in &after.categories {
            prop_assert!(score <= &before.categories[name]);
        }
    }

    /// Aggregation is order-independent: shuffling the violation list
    /// cannot change any score.
    #[test]
    fn prop_aggregation_is_order_independent(
        picks in prop::collection::vec((0usize..4, any::<u8>()), 0..60)
    ) {
        let rules = active();
        let violations: Vec<Violation> =
            picks.iter().map(|(r, f)| violation(*r, *f)).collect();
        let forward = aggregate(&violations, &rules);

        let mut reversed = violations;
        reversed.reverse();
        let backward = aggregate(&reversed, &rules);

        prop_assert_eq!(forward, backward);
    }
}
