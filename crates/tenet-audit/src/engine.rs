//! The audit engine — single entry point orchestrating detection, rule
//! loading, filtering, enumeration, evaluation, aggregation, and report
//! building.
//!
//! One run walks the state machine `Idle → Detecting → RulesLoaded →
//! Filtering → Scanning → Aggregating → Reported`. Fatal errors
//! (configuration, rule validation, unsupported project) short-circuit
//! before any scanning begins; a fired deadline still yields a best-effort
//! report marked via `stats.timed_out` and `skipped_files`.

use std::path::Path;
use std::time::{Duration, Instant};

use tenet_core::config::{AuditConfig, AuditMode, DetectConfig, EngineMode, Strictness};
use tenet_core::errors::{EngineError, TenetErrorCode};
use tenet_core::events::{
    AuditEventHandler, AuditPhase, DetectCompletedEvent, ErrorEvent, NoopEventHandler,
    PhaseChangedEvent, ReportReadyEvent, RulesLoadedEvent, ViolationDetectedEvent,
};

use crate::detect;
use crate::evaluate::Evaluator;
use crate::fixes::{self, FixSuggestion};
use crate::report::{self, AuditStats, ScoreReport};
use crate::rules::{filter, RuleRegistry};
use crate::scanner::{RunDeadline, Scanner};
use crate::score;

/// Per-run options consumed by `AuditEngine::audit`.
#[derive(Debug, Clone, Default)]
pub struct AuditOptions {
    pub mode: AuditMode,
    /// Ecosystems the detector may report. Empty = all built-ins.
    pub enabled_ecosystems: Vec<String>,
    /// Skip manifest matching and force this ecosystem.
    pub ecosystem_override: Option<String>,
    /// Run-level deadline.
    pub deadline: Option<Duration>,
}

impl AuditOptions {
    /// Derive run options from a resolved configuration.
    pub fn from_config(config: &AuditConfig) -> Self {
        Self {
            mode: AuditMode::default(),
            enabled_ecosystems: config.detect.enabled_ecosystems.clone(),
            ecosystem_override: config.detect.ecosystem_override.clone(),
            deadline: config.scan.deadline_ms.map(Duration::from_millis),
        }
    }
}

/// The standards-audit engine. Holds the resolved configuration and the
/// rule registry; everything else is per-run state.
pub struct AuditEngine {
    config: AuditConfig,
    registry: RuleRegistry,
}

impl AuditEngine {
    /// Build an engine for the given root and resolved configuration.
    ///
    /// In project mode the registry serves documents from the project rule
    /// directory (default `.tenet/rules`) before built-ins; in global mode
    /// only built-ins apply.
    pub fn new(root: &Path, config: AuditConfig) -> Self {
        let registry = match config.engine.effective_mode() {
            EngineMode::Project => {
                let dir = config
                    .rules
                    .custom_dir
                    .clone()
                    .unwrap_or_else(|| root.join(".tenet").join("rules"));
                RuleRegistry::with_custom_dir(dir)
            }
            EngineMode::Global => RuleRegistry::with_builtins(),
        };
        Self { config, registry }
    }

    /// Run a full audit, reporting nothing but the result.
    pub fn audit(&self, root: &Path, options: &AuditOptions) -> Result<ScoreReport, EngineError> {
        self.audit_with_events(root, options, &NoopEventHandler)
    }

    /// Run a full audit, reporting progress through `handler`.
    pub fn audit_with_events(
        &self,
        root: &Path,
        options: &AuditOptions,
        handler: &dyn AuditEventHandler,
    ) -> Result<ScoreReport, EngineError> {
        let started = Instant::now();
        let deadline = RunDeadline::starting_now(options.deadline);

        match self.run(root, options, handler, deadline, started) {
            Ok(report) => Ok(report),
            Err(e) => {
                handler.on_error(&ErrorEvent {
                    code: e.error_code().to_string(),
                    message: e.to_string(),
                });
                Err(e)
            }
        }
    }

    fn run(
        &self,
        root: &Path,
        options: &AuditOptions,
        handler: &dyn AuditEventHandler,
        deadline: RunDeadline,
        started: Instant,
    ) -> Result<ScoreReport, EngineError> {
        set_phase(AuditPhase::Detecting, handler);
        let detect_config = DetectConfig {
            enabled_ecosystems: options.enabled_ecosystems.clone(),
            precedence: self.config.detect.precedence.clone(),
            ecosystem_override: options.ecosystem_override.clone(),
        };
        let ctx = detect::detect(root, &detect_config)?;
        handler.on_detect_completed(&DetectCompletedEvent {
            ecosystem: ctx.ecosystem().to_string(),
            frameworks: ctx.frameworks().iter().cloned().collect(),
        });

        set_phase(AuditPhase::RulesLoaded, handler);
        let doc = self.registry.load(ctx.ecosystem())?;

        set_phase(AuditPhase::Filtering, handler);
        let active = filter::filter(&doc, &ctx);
        handler.on_rules_loaded(&RulesLoadedEvent {
            ecosystem: doc.ecosystem.clone(),
            category_count: doc.categories.len(),
            rule_count: doc.rule_count(),
            active_rule_count: active.rule_count(),
        });

        set_phase(AuditPhase::Scanning, handler);
        let scanner = Scanner::new(self.config.scan.clone());
        let enumeration = scanner.enumerate(root, options.mode, &active)?;
        let files_considered = enumeration.files.len();

        let strictness = self.config.rules.effective_strictness();
        let evaluator = Evaluator::new(&active, strictness, deadline);
        let evaluation = evaluator.evaluate(root, &enumeration.files, handler);
        for v in &evaluation.violations {
            handler.on_violation_detected(&ViolationDetectedEvent {
                rule_id: v.rule_id.clone(),
                file: v.file.clone(),
                line: v.line,
                severity: v.severity.to_string(),
            });
        }

        set_phase(AuditPhase::Aggregating, handler);
        let scores = score::aggregate(&evaluation.violations, &active);

        let stats = AuditStats {
            files_considered,
            files_evaluated: evaluation.evaluated,
            duration_ms: started.elapsed().as_millis() as u64,
            mode: options.mode,
            timed_out: evaluation.timed_out(),
        };
        let report = report::build(&ctx, evaluation, scores, stats);

        set_phase(AuditPhase::Reported, handler);
        handler.on_report_ready(&ReportReadyEvent {
            overall_score: report.overall_score,
            violation_count: report.violation_count(),
            skipped_count: report.skipped_files.len(),
            timed_out: report.stats.timed_out,
        });
        Ok(report)
    }

    /// Suggest fixes for a finished report.
    ///
    /// Re-filters the (cached) rule document for the report's context; the
    /// engine never writes files.
    pub fn suggest_fixes(&self, report: &ScoreReport) -> Result<Vec<FixSuggestion>, EngineError> {
        let doc = self.registry.load(&report.ecosystem)?;
        let ctx = crate::detect::ProjectContext::new(
            report.ecosystem.clone(),
            report.frameworks.iter().cloned().collect(),
            Default::default(),
        );
        let active = filter::filter(&doc, &ctx);
        Ok(fixes::suggest(&report.violations, &active))
    }

    /// Effective strictness, for callers rendering the report.
    pub fn strictness(&self) -> Strictness {
        self.config.rules.effective_strictness()
    }
}

fn set_phase(phase: AuditPhase, handler: &dyn AuditEventHandler) {
    tracing::info!(%phase, "audit phase");
    handler.on_phase_changed(&PhaseChangedEvent { phase });
}
