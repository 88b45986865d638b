//! CLI exit codes and output formats.

use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;

fn tenet() -> Command {
    Command::cargo_bin("tenet").expect("binary builds")
}

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("mkdir");
    }
    std::fs::write(path, content).expect("write fixture");
}

fn python_fixture(root: &Path) {
    write(root, "requirements.txt", "fastapi>=0.100\n");
    write(
        root,
        "src/app.py",
        "def getUserName(user):\n    return user.name\n",
    );
}

#[test]
fn audit_emits_a_report_and_exits_zero() {
    let dir = tempfile::tempdir().expect("tempdir");
    python_fixture(dir.path());

    tenet()
        .arg("audit")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("ecosystem: python"))
        .stdout(predicate::str::contains("score:"));
}

#[test]
fn json_report_parses_and_carries_scores() {
    let dir = tempfile::tempdir().expect("tempdir");
    python_fixture(dir.path());

    let output = tenet()
        .arg("audit")
        .arg(dir.path())
        .args(["--format", "json"])
        .output()
        .expect("run");
    assert!(output.status.success());

    let report: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout is JSON");
    assert_eq!(report["ecosystem"], "python");
    let score = report["overall_score"].as_u64().expect("overall_score");
    assert!(score <= 100);
    assert!(report["violations"].is_array());
}

#[test]
fn unsupported_tree_exits_two() {
    let dir = tempfile::tempdir().expect("tempdir");
    write(dir.path(), "notes.txt", "no manifest\n");

    tenet()
        .arg("audit")
        .arg(dir.path())
        .assert()
        .code(2)
        .stderr(predicate::str::contains("UNSUPPORTED_PROJECT"));
}

#[test]
fn invalid_project_rules_exit_one() {
    let dir = tempfile::tempdir().expect("tempdir");
    python_fixture(dir.path());
    write(
        dir.path(),
        ".tenet/rules/python.toml",
        "[document]\necosystem = \"python\"\nschema_version = \"1\"\n[categories.a]\nweight = 40\n",
    );

    tenet()
        .arg("audit")
        .arg(dir.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("RULE_VALIDATION"));
}

#[test]
fn invalid_config_exits_one() {
    let dir = tempfile::tempdir().expect("tempdir");
    python_fixture(dir.path());
    write(dir.path(), "tenet.toml", "[scan]\nquick_sample_per_dir = 0\n");

    tenet()
        .arg("audit")
        .arg(dir.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("CONFIG_ERROR"));
}

#[test]
fn expired_deadline_exits_three_with_partial_report() {
    let dir = tempfile::tempdir().expect("tempdir");
    write(dir.path(), "requirements.txt", "requests\n");
    for i in 0..200 {
        write(dir.path(), &format!("src/m{i:03}.py"), "print('x')\n");
    }

    tenet()
        .arg("audit")
        .arg(dir.path())
        .args(["--deadline-ms", "1"])
        .assert()
        .code(3)
        .stdout(predicate::str::contains("report is partial"));
}

#[test]
fn ecosystem_override_is_honored() {
    let dir = tempfile::tempdir().expect("tempdir");
    write(dir.path(), "package.json", r#"{"dependencies": {"express": "1"}}"#);
    write(dir.path(), "src/app.py", "print('x')\n");

    tenet()
        .arg("audit")
        .arg(dir.path())
        .args(["--ecosystem", "python"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ecosystem: python"));
}

#[test]
fn verbose_reports_phases_on_stderr() {
    let dir = tempfile::tempdir().expect("tempdir");
    python_fixture(dir.path());

    tenet()
        .arg("audit")
        .arg(dir.path())
        .arg("--verbose")
        .assert()
        .success()
        .stderr(predicate::str::contains("detecting"))
        .stderr(predicate::str::contains("reported"));
}

#[test]
fn schema_prints_the_rule_document_schema() {
    tenet()
        .arg("schema")
        .assert()
        .success()
        .stdout(predicate::str::contains("RuleDocument"))
        .stdout(predicate::str::contains("applicable_to"));
}

#[test]
fn fixes_flag_appends_suggestions() {
    let dir = tempfile::tempdir().expect("tempdir");
    python_fixture(dir.path());

    tenet()
        .arg("audit")
        .arg(dir.path())
        .arg("--fixes")
        .assert()
        .success()
        .stdout(predicate::str::contains("suggested fixes"));
}
