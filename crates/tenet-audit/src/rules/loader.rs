//! Rule document loader — parses and compiles TOML rule documents.
//!
//! Validation is strict and fail-fast: a document is either valid in full
//! or rejected in full. Regexes and globs are compiled here so evaluation
//! is allocation-free per file.

use regex::Regex;
use rustc_hash::FxHashSet;
use smallvec::SmallVec;

use tenet_core::errors::RuleError;

use super::types::{RuleDocument, Severity};

/// Supported rule document schema major version.
const SUPPORTED_SCHEMA_MAJOR: &str = "1";

/// A validated, compiled rule document ready for filtering and evaluation.
#[derive(Debug, Clone)]
pub struct CompiledRuleDocument {
    pub ecosystem: String,
    pub schema_version: String,
    /// Categories sorted by name.
    pub categories: Vec<CompiledCategory>,
}

impl CompiledRuleDocument {
    pub fn rule_count(&self) -> usize {
        self.categories.iter().map(|c| c.rules.len()).sum()
    }
}

/// A category with its compiled rules, authored order preserved.
#[derive(Debug, Clone)]
pub struct CompiledCategory {
    pub name: String,
    pub weight: u32,
    pub rules: Vec<CompiledRule>,
}

/// A rule with its pattern and file glob pre-compiled.
#[derive(Debug, Clone)]
pub struct CompiledRule {
    pub id: String,
    pub pattern: Regex,
    pub file_pattern: Option<glob::Pattern>,
    pub severity: Severity,
    pub message: String,
    pub applicable_to: SmallVec<[String; 2]>,
    pub doc_ref: Option<String>,
}

impl CompiledRule {
    /// Whether the rule applies under the given tag set. `"*"` matches
    /// every project.
    pub fn applies_to(&self, tags: &std::collections::BTreeSet<&str>) -> bool {
        self.applicable_to
            .iter()
            .any(|t| t == "*" || tags.contains(t.as_str()))
    }
}

/// Parse, validate, and compile a rule document from a TOML string.
/// `source_name` identifies the document in error messages.
pub fn load_from_str(
    source_name: &str,
    toml_str: &str,
) -> Result<CompiledRuleDocument, RuleError> {
    let doc: RuleDocument = toml::from_str(toml_str).map_err(|e| RuleError::Parse {
        source_name: source_name.to_string(),
        message: e.to_string(),
    })?;
    compile_document(source_name, doc)
}

/// Parse, validate, and compile a rule document from a file.
pub fn load_from_file(path: &std::path::Path) -> Result<CompiledRuleDocument, RuleError> {
    let content = std::fs::read_to_string(path).map_err(|e| RuleError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    load_from_str(&path.display().to_string(), &content)
}

fn compile_document(
    source_name: &str,
    doc: RuleDocument,
) -> Result<CompiledRuleDocument, RuleError> {
    let major = doc
        .document
        .schema_version
        .split('.')
        .next()
        .unwrap_or_default();
    if major != SUPPORTED_SCHEMA_MAJOR {
        return Err(RuleError::UnsupportedSchemaVersion {
            document: source_name.to_string(),
            version: doc.document.schema_version,
        });
    }

    let weight_sum: u32 = doc.categories.values().map(|c| c.weight).sum();
    if weight_sum != 100 {
        return Err(RuleError::WeightSum {
            document: source_name.to_string(),
            actual: weight_sum,
        });
    }

    let mut seen_ids = FxHashSet::default();
    let mut categories = Vec::with_capacity(doc.categories.len());

    // BTreeMap iteration gives categories sorted by name.
    for (name, category) in doc.categories {
        let mut rules = Vec::with_capacity(category.rules.len());
        for rule in category.rules {
            if !seen_ids.insert(rule.id.clone()) {
                return Err(RuleError::DuplicateRuleId {
                    document: source_name.to_string(),
                    id: rule.id,
                });
            }
            rules.push(compile_rule(rule)?);
        }
        categories.push(CompiledCategory {
            name,
            weight: category.weight,
            rules,
        });
    }

    Ok(CompiledRuleDocument {
        ecosystem: doc.document.ecosystem,
        schema_version: doc.document.schema_version,
        categories,
    })
}

fn compile_rule(rule: super::types::Rule) -> Result<CompiledRule, RuleError> {
    if rule.pattern.is_empty() {
        return Err(RuleError::InvalidPattern {
            rule_id: rule.id,
            message: "pattern must not be empty".to_string(),
        });
    }

    let pattern = Regex::new(&rule.pattern).map_err(|e| RuleError::InvalidPattern {
        rule_id: rule.id.clone(),
        message: e.to_string(),
    })?;

    let file_pattern = match rule.file_pattern {
        Some(ref raw) => Some(glob::Pattern::new(raw).map_err(|e| {
            RuleError::InvalidFilePattern {
                rule_id: rule.id.clone(),
                message: e.to_string(),
            }
        })?),
        None => None,
    };

    if rule.applicable_to.is_empty() {
        return Err(RuleError::EmptyApplicability { rule_id: rule.id });
    }

    Ok(CompiledRule {
        id: rule.id,
        pattern,
        file_pattern,
        severity: rule.severity,
        message: rule.message,
        applicable_to: rule.applicable_to.into(),
        doc_ref: rule.doc_ref,
    })
}
