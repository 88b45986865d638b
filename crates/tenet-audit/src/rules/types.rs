//! Serde types defining the TOML rule document schema.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Severity of a rule or violation. Ordered most severe first, so sorting
/// ascending puts errors at the top of a report.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
    schemars::JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl Severity {
    /// Deduction points for score aggregation.
    pub fn penalty(&self) -> u32 {
        match self {
            Self::Error => 10,
            Self::Warning => 3,
            Self::Info => 1,
        }
    }

    /// One level down; `info` has no lower level.
    pub fn downgraded(&self) -> Severity {
        match self {
            Self::Error => Self::Warning,
            Self::Warning | Self::Info => Self::Info,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warning => write!(f, "warning"),
            Self::Info => write!(f, "info"),
        }
    }
}

/// Top-level rule document (one TOML file per ecosystem).
///
/// Categories are a `BTreeMap` so every iteration over the document is
/// deterministic. Invariant, enforced at load time: category weights sum to
/// exactly 100.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct RuleDocument {
    /// Document metadata.
    pub document: DocumentMeta,
    /// Weighted rule categories, keyed by category name.
    #[serde(default)]
    pub categories: BTreeMap<String, Category>,
}

/// Document metadata — the audited ecosystem and the schema version.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct DocumentMeta {
    /// Ecosystem this document applies to (e.g., "python").
    pub ecosystem: String,
    /// Document format version (current major: 1).
    pub schema_version: String,
}

/// A named, weighted group of rules contributing to the overall score.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct Category {
    /// Contribution to the overall score. All weights in a document sum
    /// to 100.
    pub weight: u32,
    /// Rules in authored order.
    #[serde(default)]
    pub rules: Vec<Rule>,
}

/// A single pattern-based check.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct Rule {
    /// Unique id within the document (e.g., "PY-SEC-001").
    pub id: String,
    /// Regex tested against file content; each match site yields one
    /// violation.
    pub pattern: String,
    /// Glob restricting which files the rule sees (root-relative,
    /// '/'-separated). Absent = every enumerated file.
    pub file_pattern: Option<String>,
    /// Violation severity.
    pub severity: Severity,
    /// Message attached to each violation.
    pub message: String,
    /// Ecosystem/framework tags this rule applies to; `"*"` = always.
    #[serde(default = "default_applicable_to")]
    pub applicable_to: Vec<String>,
    /// Link to the standard or style guide the rule enforces.
    pub doc_ref: Option<String>,
}

fn default_applicable_to() -> Vec<String> {
    vec!["*".to_string()]
}

/// Generate a JSON Schema for the rule document format, for authors
/// validating their TOML files.
pub fn generate_json_schema() -> schemars::schema::RootSchema {
    schemars::schema_for!(RuleDocument)
}
