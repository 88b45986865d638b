//! Rule document errors.
//!
//! Every variant is fatal for the run: a rule document is either valid in
//! full or rejected in full. No partial document is ever produced.

use super::error_code::{self, TenetErrorCode};

/// Errors raised while loading and validating a rule document.
#[derive(Debug, thiserror::Error)]
pub enum RuleError {
    #[error("No rule document for ecosystem '{ecosystem}'")]
    UnknownEcosystem { ecosystem: String },

    #[error("Rule document parse error in {source_name}: {message}")]
    Parse { source_name: String, message: String },

    #[error("Failed to read rule document {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("Duplicate rule id '{id}' in document '{document}'")]
    DuplicateRuleId { document: String, id: String },

    #[error("Invalid pattern in rule '{rule_id}': {message}")]
    InvalidPattern { rule_id: String, message: String },

    #[error("Invalid file pattern in rule '{rule_id}': {message}")]
    InvalidFilePattern { rule_id: String, message: String },

    #[error("Rule '{rule_id}' has an empty applicable_to list")]
    EmptyApplicability { rule_id: String },

    #[error("Category weights in document '{document}' sum to {actual}, expected 100")]
    WeightSum { document: String, actual: u32 },

    #[error("Unsupported schema_version '{version}' in document '{document}'")]
    UnsupportedSchemaVersion { document: String, version: String },
}

impl TenetErrorCode for RuleError {
    fn error_code(&self) -> &'static str {
        error_code::RULE_VALIDATION
    }
}
