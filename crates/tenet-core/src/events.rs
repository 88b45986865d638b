//! Audit lifecycle events.
//!
//! The engine reports progress through `AuditEventHandler`; all methods have
//! no-op defaults so handlers only override the events they care about.

/// The engine-wide run state machine. Terminal on `Reported` or a fatal
/// error; there are no retries between phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditPhase {
    Idle,
    Detecting,
    RulesLoaded,
    Filtering,
    Scanning,
    Aggregating,
    Reported,
}

impl std::fmt::Display for AuditPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Detecting => "detecting",
            Self::RulesLoaded => "rules_loaded",
            Self::Filtering => "filtering",
            Self::Scanning => "scanning",
            Self::Aggregating => "aggregating",
            Self::Reported => "reported",
        };
        write!(f, "{name}")
    }
}

#[derive(Debug, Clone)]
pub struct PhaseChangedEvent {
    pub phase: AuditPhase,
}

#[derive(Debug, Clone)]
pub struct DetectCompletedEvent {
    pub ecosystem: String,
    pub frameworks: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct RulesLoadedEvent {
    pub ecosystem: String,
    pub category_count: usize,
    pub rule_count: usize,
    pub active_rule_count: usize,
}

#[derive(Debug, Clone)]
pub struct ScanProgressEvent {
    pub processed: usize,
    pub total: usize,
}

#[derive(Debug, Clone)]
pub struct ViolationDetectedEvent {
    pub rule_id: String,
    pub file: String,
    pub line: Option<u32>,
    pub severity: String,
}

#[derive(Debug, Clone)]
pub struct ReportReadyEvent {
    pub overall_score: u32,
    pub violation_count: usize,
    pub skipped_count: usize,
    pub timed_out: bool,
}

#[derive(Debug, Clone)]
pub struct ErrorEvent {
    pub code: String,
    pub message: String,
}

/// Trait for observing audit runs.
///
/// Requires `Send + Sync` so progress can be reported from worker threads.
pub trait AuditEventHandler: Send + Sync {
    fn on_phase_changed(&self, _event: &PhaseChangedEvent) {}
    fn on_detect_completed(&self, _event: &DetectCompletedEvent) {}
    fn on_rules_loaded(&self, _event: &RulesLoadedEvent) {}
    fn on_scan_progress(&self, _event: &ScanProgressEvent) {}
    fn on_violation_detected(&self, _event: &ViolationDetectedEvent) {}
    fn on_report_ready(&self, _event: &ReportReadyEvent) {}
    fn on_error(&self, _event: &ErrorEvent) {}
}

/// Handler that ignores every event.
#[derive(Debug, Default)]
pub struct NoopEventHandler;

impl AuditEventHandler for NoopEventHandler {}
