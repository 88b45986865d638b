//! File enumeration tests: determinism, sampling, ignores, include globs.

use std::collections::BTreeSet;
use std::path::Path;

use tenet_audit::detect::ProjectContext;
use tenet_audit::rules::{filter, loader, ActiveRuleSet};
use tenet_audit::scanner::Scanner;
use tenet_core::config::{AuditMode, ScanConfig};

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("mkdir");
    }
    std::fs::write(path, content).expect("write fixture");
}

/// Active set with one unscoped rule, so every text file is a candidate.
fn unscoped_rules() -> ActiveRuleSet {
    let doc = loader::load_from_str(
        "test",
        "[document]\necosystem = \"python\"\nschema_version = \"1\"\n\
         [categories.a]\nweight = 100\n\
         [[categories.a.rules]]\nid = \"R-1\"\npattern = 'x'\nseverity = \"info\"\nmessage = \"m\"\n",
    )
    .expect("valid doc");
    let ctx = ProjectContext::new("python".to_string(), BTreeSet::new(), BTreeSet::new());
    filter::filter(&doc, &ctx)
}

/// Active set where every rule is scoped to *.py files.
fn py_scoped_rules() -> ActiveRuleSet {
    let doc = loader::load_from_str(
        "test",
        "[document]\necosystem = \"python\"\nschema_version = \"1\"\n\
         [categories.a]\nweight = 100\n\
         [[categories.a.rules]]\nid = \"R-1\"\npattern = 'x'\nseverity = \"info\"\nmessage = \"m\"\n\
         file_pattern = \"**/*.py\"\n",
    )
    .expect("valid doc");
    let ctx = ProjectContext::new("python".to_string(), BTreeSet::new(), BTreeSet::new());
    filter::filter(&doc, &ctx)
}

#[test]
fn enumeration_is_sorted_and_deterministic() {
    let dir = tempfile::tempdir().expect("tempdir");
    for name in ["b.py", "a.py", "z.py", "m/inner.py"] {
        write(dir.path(), name, "pass\n");
    }

    let scanner = Scanner::new(ScanConfig::default());
    let first = scanner
        .enumerate(dir.path(), AuditMode::Full, &unscoped_rules())
        .expect("enumerate");
    let mut sorted = first.files.clone();
    sorted.sort();
    assert_eq!(first.files, sorted, "output must be path-sorted");

    for _ in 0..5 {
        let again = scanner
            .enumerate(dir.path(), AuditMode::Full, &unscoped_rules())
            .expect("enumerate");
        assert_eq!(first.files, again.files);
    }
}

#[test]
fn quick_mode_samples_first_n_per_directory() {
    let dir = tempfile::tempdir().expect("tempdir");
    for i in 0..10 {
        write(dir.path(), &format!("src/f{i:02}.py"), "pass\n");
        write(dir.path(), &format!("lib/g{i:02}.py"), "pass\n");
    }

    let config = ScanConfig {
        quick_sample_per_dir: Some(3),
        ..Default::default()
    };
    let scanner = Scanner::new(config);
    let result = scanner
        .enumerate(dir.path(), AuditMode::Quick, &unscoped_rules())
        .expect("enumerate");

    assert_eq!(result.files.len(), 6, "3 per directory, 2 directories");
    assert_eq!(result.discovered, 20);
    let names: Vec<String> = result
        .files
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert!(names.contains(&"f00.py".to_string()));
    assert!(!names.contains(&"f03.py".to_string()));
}

#[test]
fn quick_sample_is_identical_across_runs() {
    let dir = tempfile::tempdir().expect("tempdir");
    for i in 0..30 {
        write(dir.path(), &format!("src/f{i:02}.py"), "pass\n");
    }

    let config = ScanConfig {
        quick_sample_per_dir: Some(5),
        ..Default::default()
    };
    let scanner = Scanner::new(config);
    let first = scanner
        .enumerate(dir.path(), AuditMode::Quick, &unscoped_rules())
        .expect("enumerate");
    for _ in 0..5 {
        let again = scanner
            .enumerate(dir.path(), AuditMode::Quick, &unscoped_rules())
            .expect("enumerate");
        assert_eq!(first.files, again.files);
    }
}

#[test]
fn scoped_rules_restrict_enumeration_to_matching_files() {
    let dir = tempfile::tempdir().expect("tempdir");
    write(dir.path(), "src/app.py", "pass\n");
    write(dir.path(), "src/notes.md", "# notes\n");
    write(dir.path(), "README.txt", "readme\n");

    let scanner = Scanner::new(ScanConfig::default());
    let result = scanner
        .enumerate(dir.path(), AuditMode::Full, &py_scoped_rules())
        .expect("enumerate");

    assert_eq!(result.files.len(), 1);
    assert!(result.files[0].ends_with("src/app.py"));
}

#[test]
fn default_ignore_directories_are_skipped() {
    let dir = tempfile::tempdir().expect("tempdir");
    write(dir.path(), "src/app.py", "pass\n");
    write(dir.path(), "node_modules/pkg/index.js", "x\n");
    write(dir.path(), "__pycache__/app.cpython.py", "x\n");

    let scanner = Scanner::new(ScanConfig::default());
    let result = scanner
        .enumerate(dir.path(), AuditMode::Full, &unscoped_rules())
        .expect("enumerate");

    assert_eq!(result.files.len(), 1);
    assert!(result.files[0].ends_with("src/app.py"));
}

#[test]
fn tenetignore_is_honored() {
    let dir = tempfile::tempdir().expect("tempdir");
    write(dir.path(), ".tenetignore", "generated/\n");
    write(dir.path(), "src/app.py", "pass\n");
    write(dir.path(), "generated/schema.py", "pass\n");

    let scanner = Scanner::new(ScanConfig::default());
    let result = scanner
        .enumerate(dir.path(), AuditMode::Full, &unscoped_rules())
        .expect("enumerate");

    let rels: Vec<String> = result
        .files
        .iter()
        .map(|p| {
            p.strip_prefix(dir.path())
                .unwrap()
                .to_string_lossy()
                .into_owned()
        })
        .collect();
    assert!(rels.iter().any(|r| r.ends_with("app.py")));
    assert!(!rels.iter().any(|r| r.contains("generated")));
}

#[test]
fn extra_ignore_patterns_apply() {
    let dir = tempfile::tempdir().expect("tempdir");
    write(dir.path(), "src/app.py", "pass\n");
    write(dir.path(), "src/app_test.py", "pass\n");

    let config = ScanConfig {
        extra_ignore: vec!["*_test.py".to_string()],
        ..Default::default()
    };
    let scanner = Scanner::new(config);
    let result = scanner
        .enumerate(dir.path(), AuditMode::Full, &unscoped_rules())
        .expect("enumerate");

    assert_eq!(result.files.len(), 1);
    assert!(result.files[0].ends_with("app.py"));
}

#[test]
fn cancelled_scan_surfaces_as_an_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    write(dir.path(), "src/app.py", "pass\n");

    let scanner = Scanner::new(ScanConfig::default());
    scanner.cancellation().cancel();
    let err = scanner
        .enumerate(dir.path(), AuditMode::Full, &unscoped_rules())
        .unwrap_err();
    assert!(matches!(err, tenet_core::errors::ScanError::Cancelled));
}

#[test]
fn missing_root_is_a_walk_error() {
    let scanner = Scanner::new(ScanConfig::default());
    let err = scanner
        .enumerate(
            Path::new("/definitely/not/here"),
            AuditMode::Full,
            &unscoped_rules(),
        )
        .unwrap_err();
    assert!(matches!(
        err,
        tenet_core::errors::ScanError::WalkFailed { .. }
    ));
}
