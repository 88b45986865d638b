//! Parallel file walker using the `ignore` crate's `WalkParallel`.
//!
//! Supports `.tenetignore` (gitignore syntax, hierarchical) and the default
//! ignore patterns below. Output is sorted by path so enumeration is
//! deterministic regardless of walk scheduling.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crossbeam_channel as channel;
use tenet_core::config::ScanConfig;
use tenet_core::errors::ScanError;

/// Directories excluded from every scan.
pub const DEFAULT_IGNORES: &[&str] = &[
    "node_modules",
    ".git",
    "dist",
    "build",
    "target",
    ".next",
    "__pycache__",
    ".pytest_cache",
    "coverage",
    "vendor",
    ".venv",
    "venv",
    ".tox",
    ".mypy_cache",
];

/// Extensions that are never text candidates.
const BINARY_EXTENSIONS: &[&str] = &[
    "png", "jpg", "jpeg", "gif", "webp", "ico", "pdf", "zip", "gz", "tar", "jar",
    "class", "pyc", "so", "dylib", "dll", "exe", "wasm", "woff", "woff2", "ttf",
    "mp3", "mp4", "sqlite", "db", "lock",
];

/// Walk a directory tree in parallel, collecting candidate file paths.
///
/// Respects `.gitignore`, `.tenetignore`, the default ignore patterns, and
/// `config.extra_ignore`. When `include` globs are given they act as a
/// whitelist: only matching files are returned. Returns paths sorted for
/// deterministic output.
pub fn walk_directory(
    root: &Path,
    config: &ScanConfig,
    include: Option<&[String]>,
    cancelled: &AtomicBool,
) -> Result<Vec<PathBuf>, ScanError> {
    if !root.is_dir() {
        return Err(ScanError::WalkFailed {
            root: root.to_path_buf(),
            message: "not a directory".to_string(),
        });
    }

    let (tx, rx) = channel::unbounded();

    let mut builder = ignore::WalkBuilder::new(root);
    builder
        .hidden(false)
        .git_ignore(true)
        .git_global(true)
        .git_exclude(true)
        .add_custom_ignore_filename(".tenetignore")
        .max_filesize(Some(config.effective_max_file_size()))
        .follow_links(config.follow_symlinks.unwrap_or(false));

    let threads = config.effective_threads();
    if threads > 0 {
        builder.threads(threads);
    }

    // Overrides use gitignore syntax: positive patterns whitelist, negated
    // patterns blacklist. Include globs (from active rule file_patterns)
    // come first; the default and user ignores are added negated.
    let mut overrides = ignore::overrides::OverrideBuilder::new(root);
    if let Some(globs) = include {
        for pattern in globs {
            let _ = overrides.add(pattern);
        }
    }
    for pattern in DEFAULT_IGNORES {
        let _ = overrides.add(&format!("!{pattern}/**"));
        let _ = overrides.add(&format!("!{pattern}"));
    }
    for pattern in &config.extra_ignore {
        let _ = overrides.add(&format!("!{pattern}"));
    }
    if let Ok(built) = overrides.build() {
        builder.overrides(built);
    }

    let walker = builder.build_parallel();
    let cancelled = Arc::new(AtomicBool::new(cancelled.load(Ordering::Relaxed)));

    walker.run(|| {
        let tx = tx.clone();
        let cancelled = Arc::clone(&cancelled);
        Box::new(move |entry| {
            if cancelled.load(Ordering::Relaxed) {
                return ignore::WalkState::Quit;
            }

            let entry = match entry {
                Ok(e) => e,
                Err(_) => return ignore::WalkState::Continue,
            };

            if !entry.file_type().is_some_and(|ft| ft.is_file()) {
                return ignore::WalkState::Continue;
            }

            let path = entry.path();
            if is_binary_extension(path) {
                return ignore::WalkState::Continue;
            }

            let _ = tx.send(path.to_path_buf());
            ignore::WalkState::Continue
        })
    });

    drop(tx);
    let mut files: Vec<PathBuf> = rx.into_iter().collect();
    // Sort for deterministic output.
    files.sort();
    Ok(files)
}

fn is_binary_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| {
            let ext = ext.to_ascii_lowercase();
            BINARY_EXTENSIONS.contains(&ext.as_str())
        })
}
