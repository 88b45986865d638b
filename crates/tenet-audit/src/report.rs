//! Report building — assembles the immutable, deterministically ordered
//! `ScoreReport`.
//!
//! The violation order is load-bearing: severity first (errors at the
//! top), then category name, then file path, then line. Without it, two
//! runs over identical input could emit differently-ordered but
//! semantically-identical reports and fail reproducibility checks.

use std::collections::BTreeMap;

use serde::Serialize;

use tenet_core::config::AuditMode;

use crate::detect::ProjectContext;
use crate::evaluate::{Evaluation, SkippedFile, Violation};
use crate::score::Scores;

/// The immutable output of one audit run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreReport {
    pub ecosystem: String,
    pub frameworks: Vec<String>,
    pub overall_score: u32,
    pub category_scores: BTreeMap<String, u32>,
    pub violations: Vec<Violation>,
    pub skipped_files: Vec<SkippedFile>,
    pub stats: AuditStats,
}

/// Run statistics carried alongside the scores.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuditStats {
    pub files_considered: usize,
    pub files_evaluated: usize,
    pub duration_ms: u64,
    pub mode: AuditMode,
    /// The run deadline fired; `skipped_files` holds the unevaluated rest.
    pub timed_out: bool,
}

impl ScoreReport {
    pub fn violation_count(&self) -> usize {
        self.violations.len()
    }

    /// Violations of a given severity, for summaries.
    pub fn count_by_severity(&self, severity: crate::rules::Severity) -> usize {
        self.violations
            .iter()
            .filter(|v| v.severity == severity)
            .count()
    }
}

/// Build the final report from the run's pieces.
pub fn build(
    ctx: &ProjectContext,
    evaluation: Evaluation,
    scores: Scores,
    stats: AuditStats,
) -> ScoreReport {
    let Evaluation {
        mut violations,
        mut skipped,
        ..
    } = evaluation;

    violations.sort_by(|a, b| {
        a.severity
            .cmp(&b.severity)
            .then_with(|| a.category.cmp(&b.category))
            .then_with(|| a.file.cmp(&b.file))
            .then_with(|| a.line.unwrap_or(0).cmp(&b.line.unwrap_or(0)))
    });
    skipped.sort_by(|a, b| a.file.cmp(&b.file));

    ScoreReport {
        ecosystem: ctx.ecosystem().to_string(),
        frameworks: ctx.frameworks().iter().cloned().collect(),
        overall_score: scores.overall,
        category_scores: scores.categories,
        violations,
        skipped_files: skipped,
        stats,
    }
}
