//! Report rendering for the terminal.

use std::fmt::Write as _;

use tenet_audit::fixes::FixSuggestion;
use tenet_audit::rules::Severity;
use tenet_audit::ScoreReport;
use tenet_core::events::{
    AuditEventHandler, PhaseChangedEvent, RulesLoadedEvent, ScanProgressEvent,
};

/// Event handler for `--verbose`: phases and scan progress on stderr, so
/// stdout stays clean for the report itself.
pub struct ProgressHandler;

impl AuditEventHandler for ProgressHandler {
    fn on_phase_changed(&self, event: &PhaseChangedEvent) {
        eprintln!("tenet: {}", event.phase);
    }

    fn on_rules_loaded(&self, event: &RulesLoadedEvent) {
        eprintln!(
            "tenet: {} rules loaded for {} ({} active)",
            event.rule_count, event.ecosystem, event.active_rule_count
        );
    }

    fn on_scan_progress(&self, event: &ScanProgressEvent) {
        eprintln!("tenet: {}/{} files", event.processed, event.total);
    }
}

/// Render a report as plain text.
pub fn render_console(report: &ScoreReport) -> String {
    let mut out = String::new();

    let frameworks = if report.frameworks.is_empty() {
        String::from("none")
    } else {
        report.frameworks.join(", ")
    };
    let _ = writeln!(
        out,
        "ecosystem: {} (frameworks: {frameworks})",
        report.ecosystem
    );
    let _ = writeln!(
        out,
        "mode: {} | files: {}/{} evaluated | {} ms",
        report.stats.mode,
        report.stats.files_evaluated,
        report.stats.files_considered,
        report.stats.duration_ms
    );
    let _ = writeln!(out, "\nscore: {}/100", report.overall_score);
    for (category, score) in &report.category_scores {
        let _ = writeln!(out, "  {category:<16} {score}");
    }

    if report.violations.is_empty() {
        let _ = writeln!(out, "\nno violations");
    } else {
        let _ = writeln!(
            out,
            "\nviolations ({}): {} errors, {} warnings, {} infos",
            report.violations.len(),
            report.count_by_severity(Severity::Error),
            report.count_by_severity(Severity::Warning),
            report.count_by_severity(Severity::Info),
        );
        for v in &report.violations {
            let line = v.line.map(|l| l.to_string()).unwrap_or_default();
            let _ = writeln!(
                out,
                "  {:<7} {:<16} {:<12} {}:{line}  {}",
                v.severity.to_string(),
                v.category,
                v.rule_id,
                v.file,
                v.message
            );
        }
    }

    if !report.skipped_files.is_empty() {
        let _ = writeln!(out, "\nskipped ({}):", report.skipped_files.len());
        for s in &report.skipped_files {
            let _ = writeln!(out, "  {} ({})", s.file, s.reason);
        }
    }

    if report.stats.timed_out {
        let _ = writeln!(out, "\nrun deadline fired; report is partial");
    }

    out
}

/// Render fix suggestions as plain text.
pub fn render_fixes(suggestions: &[FixSuggestion]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\nsuggested fixes ({}):", suggestions.len());
    for s in suggestions {
        let _ = writeln!(
            out,
            "  {} {}:{}",
            s.violation.rule_id,
            s.violation.file,
            s.violation.line.unwrap_or(0)
        );
        let _ = writeln!(out, "    {}", s.suggested_text);
    }
    out
}
