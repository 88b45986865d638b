//! End-to-end audit tests: the full detect → load → filter → scan →
//! evaluate → aggregate → report pipeline.

use std::path::Path;
use std::sync::Mutex;
use std::time::Duration;

use tenet_audit::evaluate::SkipReason;
use tenet_audit::rules::Severity;
use tenet_audit::{AuditEngine, AuditOptions};
use tenet_core::config::{AuditConfig, AuditMode, Strictness};
use tenet_core::errors::EngineError;
use tenet_core::events::{AuditEventHandler, AuditPhase, PhaseChangedEvent};

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("mkdir");
    }
    std::fs::write(path, content).expect("write fixture");
}

/// A python project with one camelCase function on a known line.
fn python_fixture(root: &Path) {
    write(root, "requirements.txt", "fastapi>=0.100\n");
    write(
        root,
        "src/app.py",
        "import os\n\n\ndef handle_request(req):\n    return req\n\n\ndef getUserName(user):\n    return user.name\n",
    );
}

fn engine_for(root: &Path) -> AuditEngine {
    AuditEngine::new(root, AuditConfig::default())
}

#[test]
fn camelcase_function_yields_exactly_one_naming_violation() {
    let dir = tempfile::tempdir().expect("tempdir");
    python_fixture(dir.path());

    let engine = engine_for(dir.path());
    let report = engine
        .audit(dir.path(), &AuditOptions::default())
        .expect("audit succeeds");

    assert_eq!(report.ecosystem, "python");
    let naming: Vec<_> = report
        .violations
        .iter()
        .filter(|v| v.rule_id == "PY-NAME-001")
        .collect();
    assert_eq!(naming.len(), 1, "exactly one camelCase definition");
    assert_eq!(naming[0].file, "src/app.py");
    assert_eq!(naming[0].line, Some(8));
    assert_eq!(naming[0].severity, Severity::Warning);
}

#[test]
fn framework_scoped_rule_does_not_fire_for_other_framework() {
    let dir = tempfile::tempdir().expect("tempdir");
    // FastAPI project whose content would match the django-only DEBUG rule.
    write(dir.path(), "requirements.txt", "fastapi>=0.100\n");
    write(dir.path(), "src/settings.py", "DEBUG = True\n");

    let engine = engine_for(dir.path());
    let report = engine
        .audit(dir.path(), &AuditOptions::default())
        .expect("audit succeeds");

    assert!(
        !report.violations.iter().any(|v| v.rule_id == "PY-SEC-010"),
        "django-only rule must not fire for a fastapi project"
    );
}

#[test]
fn framework_scoped_rule_fires_for_its_framework() {
    let dir = tempfile::tempdir().expect("tempdir");
    write(dir.path(), "requirements.txt", "django>=5.0\n");
    write(dir.path(), "src/settings.py", "DEBUG = True\n");

    let engine = engine_for(dir.path());
    let report = engine
        .audit(dir.path(), &AuditOptions::default())
        .expect("audit succeeds");

    assert!(
        report.violations.iter().any(|v| v.rule_id == "PY-SEC-010"),
        "django rule fires for a django project"
    );
}

#[test]
fn audit_is_idempotent_over_an_unchanged_tree() {
    let dir = tempfile::tempdir().expect("tempdir");
    python_fixture(dir.path());
    for i in 0..50 {
        write(
            dir.path(),
            &format!("src/module_{i:02}.py"),
            "def ok():\n    pass\nprint('dbg')\n",
        );
    }

    let engine = engine_for(dir.path());
    let options = AuditOptions::default();
    let first = engine.audit(dir.path(), &options).expect("audit");
    let second = engine.audit(dir.path(), &options).expect("audit");

    // Equal in every field except elapsed wall-clock.
    assert_eq!(first.ecosystem, second.ecosystem);
    assert_eq!(first.frameworks, second.frameworks);
    assert_eq!(first.overall_score, second.overall_score);
    assert_eq!(first.category_scores, second.category_scores);
    assert_eq!(first.violations, second.violations);
    assert_eq!(first.skipped_files, second.skipped_files);

    let a = serde_json::to_string(&first.violations).expect("serialize");
    let b = serde_json::to_string(&second.violations).expect("serialize");
    assert_eq!(a, b, "violation ordering must be byte-identical");
}

#[test]
fn report_violations_follow_the_total_order() {
    let dir = tempfile::tempdir().expect("tempdir");
    write(dir.path(), "requirements.txt", "requests\n");
    write(
        dir.path(),
        "src/a.py",
        "print('x')\n\n\ndef badName():\n    pass\neval(data)\n",
    );
    write(dir.path(), "src/b.py", "eval(other)\nprint('y')\n");

    let engine = engine_for(dir.path());
    let report = engine
        .audit(dir.path(), &AuditOptions::default())
        .expect("audit");

    let keys: Vec<_> = report
        .violations
        .iter()
        .map(|v| {
            (
                v.severity,
                v.category.clone(),
                v.file.clone(),
                v.line.unwrap_or(0),
            )
        })
        .collect();
    let mut sorted = keys.clone();
    sorted.sort();
    assert_eq!(keys, sorted, "severity, category, file, line ordering");
    assert_eq!(report.violations[0].severity, Severity::Error);
}

#[test]
fn unreadable_file_is_skipped_not_fatal() {
    let dir = tempfile::tempdir().expect("tempdir");
    write(dir.path(), "requirements.txt", "requests\n");
    write(dir.path(), "src/ok.py", "print('x')\n");
    // Invalid UTF-8 with a .py extension: read_to_string fails.
    std::fs::create_dir_all(dir.path().join("src")).expect("mkdir");
    std::fs::write(dir.path().join("src/bad.py"), [0xff, 0xfe, 0x00, 0x41]).expect("write");

    let engine = engine_for(dir.path());
    let report = engine
        .audit(dir.path(), &AuditOptions::default())
        .expect("audit still succeeds");

    assert!(report
        .violations
        .iter()
        .any(|v| v.rule_id == "PY-STR-002" && v.file == "src/ok.py"));
    assert_eq!(report.skipped_files.len(), 1);
    assert_eq!(report.skipped_files[0].file, "src/bad.py");
    assert!(matches!(report.skipped_files[0].reason, SkipReason::Io(_)));
    assert!(!report.stats.timed_out);
}

#[test]
fn expired_deadline_yields_partial_report_with_timeout_skips() {
    let dir = tempfile::tempdir().expect("tempdir");
    write(dir.path(), "requirements.txt", "requests\n");
    for i in 0..50 {
        write(dir.path(), &format!("src/m{i:02}.py"), "print('x')\n");
    }

    let engine = engine_for(dir.path());
    let options = AuditOptions {
        deadline: Some(Duration::ZERO),
        ..Default::default()
    };
    let report = engine.audit(dir.path(), &options).expect("partial report");

    assert!(report.stats.timed_out);
    assert!(!report.skipped_files.is_empty());
    assert!(report
        .skipped_files
        .iter()
        .all(|s| s.reason == SkipReason::Timeout));
    assert!(report.violations.is_empty());
    assert!(report.overall_score <= 100);
}

#[test]
fn unsupported_tree_aborts_before_scanning() {
    let dir = tempfile::tempdir().expect("tempdir");
    write(dir.path(), "notes.txt", "no manifest here\n");

    let engine = engine_for(dir.path());
    let err = engine
        .audit(dir.path(), &AuditOptions::default())
        .unwrap_err();
    assert!(matches!(err, EngineError::Detect(_)));
    assert_eq!(err.exit_code(), 2);
}

#[test]
fn broken_project_rules_abort_the_run() {
    let dir = tempfile::tempdir().expect("tempdir");
    python_fixture(dir.path());
    write(
        dir.path(),
        ".tenet/rules/python.toml",
        "[document]\necosystem = \"python\"\nschema_version = \"1\"\n[categories.a]\nweight = 40\n",
    );

    let engine = engine_for(dir.path());
    let err = engine
        .audit(dir.path(), &AuditOptions::default())
        .unwrap_err();
    assert!(matches!(err, EngineError::Rules(_)));
    assert_eq!(err.exit_code(), 1);
}

#[test]
fn advisory_strictness_downgrades_errors() {
    let dir = tempfile::tempdir().expect("tempdir");
    write(dir.path(), "requirements.txt", "requests\n");
    write(dir.path(), "src/app.py", "eval(data)\n");

    let strict = engine_for(dir.path())
        .audit(dir.path(), &AuditOptions::default())
        .expect("audit");
    let strict_v = strict
        .violations
        .iter()
        .find(|v| v.rule_id == "PY-SEC-001")
        .expect("eval violation");
    assert_eq!(strict_v.severity, Severity::Error);

    let mut config = AuditConfig::default();
    config.rules.strictness = Some(Strictness::Advisory);
    let advisory_engine = AuditEngine::new(dir.path(), config);
    let advisory = advisory_engine
        .audit(dir.path(), &AuditOptions::default())
        .expect("audit");
    let advisory_v = advisory
        .violations
        .iter()
        .find(|v| v.rule_id == "PY-SEC-001")
        .expect("eval violation");
    assert_eq!(advisory_v.severity, Severity::Warning);
    assert!(advisory.overall_score >= strict.overall_score);
}

#[test]
fn quick_mode_bounds_enumeration() {
    let dir = tempfile::tempdir().expect("tempdir");
    write(dir.path(), "requirements.txt", "requests\n");
    for i in 0..40 {
        write(dir.path(), &format!("src/m{i:02}.py"), "print('x')\n");
    }

    let engine = engine_for(dir.path());
    let quick = AuditOptions {
        mode: AuditMode::Quick,
        ..Default::default()
    };
    let report = engine.audit(dir.path(), &quick).expect("audit");
    assert!(report.stats.files_considered < 40);
    assert_eq!(report.stats.mode, AuditMode::Quick);
}

#[test]
fn suggest_fixes_cites_doc_refs_and_writes_nothing() {
    let dir = tempfile::tempdir().expect("tempdir");
    python_fixture(dir.path());

    let engine = engine_for(dir.path());
    let report = engine
        .audit(dir.path(), &AuditOptions::default())
        .expect("audit");
    let suggestions = engine.suggest_fixes(&report).expect("suggestions");

    assert!(!suggestions.is_empty());
    let naming = suggestions
        .iter()
        .find(|s| s.violation.rule_id == "PY-NAME-001")
        .expect("naming suggestion");
    assert!(naming.suggested_text.contains("src/app.py:8"));
    assert!(naming.suggested_text.contains("peps.python.org"));
}

/// Event handler that records phase transitions.
#[derive(Default)]
struct PhaseRecorder {
    phases: Mutex<Vec<AuditPhase>>,
}

impl AuditEventHandler for PhaseRecorder {
    fn on_phase_changed(&self, event: &PhaseChangedEvent) {
        self.phases.lock().expect("lock").push(event.phase);
    }
}

#[test]
fn phases_progress_in_order_and_terminate_on_reported() {
    let dir = tempfile::tempdir().expect("tempdir");
    python_fixture(dir.path());

    let recorder = PhaseRecorder::default();
    let engine = engine_for(dir.path());
    engine
        .audit_with_events(dir.path(), &AuditOptions::default(), &recorder)
        .expect("audit");

    let phases = recorder.phases.lock().expect("lock").clone();
    assert_eq!(
        phases,
        vec![
            AuditPhase::Detecting,
            AuditPhase::RulesLoaded,
            AuditPhase::Filtering,
            AuditPhase::Scanning,
            AuditPhase::Aggregating,
            AuditPhase::Reported,
        ]
    );
}
