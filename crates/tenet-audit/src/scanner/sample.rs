//! Deterministic quick-scan sampling.

use std::path::PathBuf;

use rustc_hash::FxHashMap;

/// Take the first `per_dir` files of each directory from an already-sorted
/// file list.
///
/// Sampling is a pure function of the sorted input, never randomized, so
/// two runs over an unchanged tree produce an identical sample.
pub fn sample_per_directory(files: Vec<PathBuf>, per_dir: usize) -> Vec<PathBuf> {
    let mut taken: FxHashMap<PathBuf, usize> = FxHashMap::default();

    files
        .into_iter()
        .filter(|file| {
            let parent = file.parent().map(PathBuf::from).unwrap_or_default();
            let count = taken.entry(parent).or_insert(0);
            *count += 1;
            *count <= per_dir
        })
        .collect()
}
