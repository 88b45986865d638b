//! Rule evaluation — applies the active rule set to enumerated files.
//!
//! This is the engine's only parallel stage: each file is evaluated
//! independently on a rayon worker and writes only to a private list
//! merged by the collect. Matching is pure; a read failure on one file is
//! recorded in the skip list and never aborts the run.

use std::path::Path;

use rayon::prelude::*;
use serde::Serialize;

use tenet_core::config::Strictness;
use tenet_core::events::{AuditEventHandler, ScanProgressEvent};

use crate::rules::{ActiveRuleSet, Severity};
use crate::scanner::RunDeadline;

/// A single rule match site. Created only here, never mutated afterward.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub rule_id: String,
    pub category: String,
    /// Root-relative, '/'-separated path.
    pub file: String,
    /// 1-based line of the match site.
    pub line: Option<u32>,
    pub severity: Severity,
    pub message: String,
}

/// A file the evaluator could not examine, with the reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedFile {
    pub file: String,
    pub reason: SkipReason,
}

/// Why a file was skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The file could not be read.
    Io(String),
    /// The run deadline fired before this file was evaluated.
    Timeout,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(message) => write!(f, "io: {message}"),
            Self::Timeout => write!(f, "timeout"),
        }
    }
}

impl Serialize for SkipReason {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// The evaluator's raw output, before sorting by the report builder.
#[derive(Debug, Clone, Default)]
pub struct Evaluation {
    pub violations: Vec<Violation>,
    pub skipped: Vec<SkippedFile>,
    /// Files actually read and matched.
    pub evaluated: usize,
}

impl Evaluation {
    /// Whether the run deadline fired during evaluation.
    pub fn timed_out(&self) -> bool {
        self.skipped
            .iter()
            .any(|s| s.reason == SkipReason::Timeout)
    }
}

enum FileOutcome {
    Evaluated(Vec<Violation>),
    Skipped(SkippedFile),
}

/// Applies an active rule set to files.
pub struct Evaluator<'a> {
    rules: &'a ActiveRuleSet,
    strictness: Strictness,
    deadline: RunDeadline,
}

impl<'a> Evaluator<'a> {
    pub fn new(rules: &'a ActiveRuleSet, strictness: Strictness, deadline: RunDeadline) -> Self {
        Self {
            rules,
            strictness,
            deadline,
        }
    }

    /// Evaluate every file against the active rules.
    ///
    /// Progress is reported through `handler` from worker threads. Output
    /// ordering is unspecified here; the report builder imposes the total
    /// order.
    pub fn evaluate(
        &self,
        root: &Path,
        files: &[std::path::PathBuf],
        handler: &dyn AuditEventHandler,
    ) -> Evaluation {
        let total = files.len();
        let processed = std::sync::atomic::AtomicUsize::new(0);

        let outcomes: Vec<FileOutcome> = files
            .par_iter()
            .map(|path| {
                let count = processed.fetch_add(1, std::sync::atomic::Ordering::Relaxed);
                if count % 100 == 0 {
                    handler.on_scan_progress(&ScanProgressEvent {
                        processed: count,
                        total,
                    });
                }
                self.evaluate_file(root, path)
            })
            .collect();

        let mut evaluation = Evaluation::default();
        for outcome in outcomes {
            match outcome {
                FileOutcome::Evaluated(violations) => {
                    evaluation.evaluated += 1;
                    evaluation.violations.extend(violations);
                }
                FileOutcome::Skipped(skipped) => evaluation.skipped.push(skipped),
            }
        }
        evaluation
    }

    fn evaluate_file(&self, root: &Path, path: &Path) -> FileOutcome {
        let rel = relative_path(root, path);

        if self.deadline.expired() {
            return FileOutcome::Skipped(SkippedFile {
                file: rel,
                reason: SkipReason::Timeout,
            });
        }

        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                tracing::warn!(file = %rel, error = %e, "file read error");
                return FileOutcome::Skipped(SkippedFile {
                    file: rel,
                    reason: SkipReason::Io(e.to_string()),
                });
            }
        };

        let mut violations = Vec::new();
        for (category, rule) in self.rules.iter_rules() {
            if let Some(ref pattern) = rule.file_pattern {
                if !pattern.matches(&rel) {
                    continue;
                }
            }
            for m in rule.pattern.find_iter(&content) {
                violations.push(Violation {
                    rule_id: rule.id.clone(),
                    category: category.name.clone(),
                    file: rel.clone(),
                    line: Some(line_of_offset(&content, m.start())),
                    severity: self.effective_severity(rule.severity),
                    message: rule.message.clone(),
                });
            }
        }
        FileOutcome::Evaluated(violations)
    }

    fn effective_severity(&self, severity: Severity) -> Severity {
        match self.strictness {
            Strictness::Strict => severity,
            Strictness::Advisory => match severity {
                Severity::Error => severity.downgraded(),
                other => other,
            },
        }
    }
}

/// 1-based line number of a byte offset.
fn line_of_offset(content: &str, offset: usize) -> u32 {
    1 + content.as_bytes()[..offset]
        .iter()
        .filter(|b| **b == b'\n')
        .count() as u32
}

/// Root-relative, '/'-separated path for reports and glob matching.
pub fn relative_path(root: &Path, path: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    let parts: Vec<String> = rel
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    parts.join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_of_offset_is_one_based() {
        let content = "a\nb\nc";
        assert_eq!(line_of_offset(content, 0), 1);
        assert_eq!(line_of_offset(content, 2), 2);
        assert_eq!(line_of_offset(content, 4), 3);
    }
}
