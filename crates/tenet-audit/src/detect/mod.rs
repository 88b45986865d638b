//! Project & framework detection.
//!
//! A closed set of `EcosystemDetector` implementations is registered in a
//! static, explicitly ordered list. Detection walks that list in precedence
//! order and stops at the first detector whose manifest test passes. The
//! result is an immutable `ProjectContext` threaded through the rest of the
//! run; nothing downstream re-detects or reads ambient state.

pub mod context;
pub mod manifest;
pub mod matchers;

use std::collections::BTreeSet;
use std::path::Path;

use tenet_core::config::DetectConfig;
use tenet_core::errors::DetectError;

pub use context::ProjectContext;

/// A single ecosystem detector: a manifest-file test plus a framework
/// sub-detector over the same manifest(s).
pub trait EcosystemDetector: Send + Sync {
    /// Stable ecosystem identifier (e.g., "python").
    fn ecosystem(&self) -> &'static str;

    /// Whether the directory carries this ecosystem's manifest marker.
    fn matches(&self, root: &Path) -> bool;

    /// Frameworks inferred from the manifest(s). Only called after
    /// `matches` returned true (or under an ecosystem override).
    fn frameworks(&self, root: &Path) -> BTreeSet<String>;
}

/// Compiled-in detection precedence: most-specific manifest first, so a
/// Laravel application carrying a `package.json` still resolves to laravel.
pub const DEFAULT_PRECEDENCE: &[&str] = &["laravel", "rust", "go", "python", "node"];

/// The closed set of built-in detectors, in default precedence order.
fn detectors() -> Vec<Box<dyn EcosystemDetector>> {
    vec![
        Box::new(matchers::LaravelDetector),
        Box::new(matchers::RustDetector),
        Box::new(matchers::GoDetector),
        Box::new(matchers::PythonDetector),
        Box::new(matchers::NodeDetector),
    ]
}

/// Detect the ecosystem and frameworks of `root`.
///
/// Only detectors whose ecosystem appears in `config.enabled_ecosystems`
/// are consulted (empty = all built-ins). `config.precedence` reorders the
/// list: named ecosystems first, in order, then the remaining enabled ones
/// in default order. Unknown names are ignored.
///
/// Detection is read-only and deterministic: the same tree and config
/// always produce the same `ProjectContext`.
pub fn detect(root: &Path, config: &DetectConfig) -> Result<ProjectContext, DetectError> {
    let all = detectors();
    let enabled = enabled_set(config);

    if let Some(ref forced) = config.ecosystem_override {
        // Override short-circuits matching; the named detector still
        // supplies frameworks when its manifest test passes.
        let frameworks = all
            .iter()
            .find(|d| d.ecosystem() == forced.as_str() && d.matches(root))
            .map(|d| d.frameworks(root))
            .unwrap_or_default();
        return Ok(ProjectContext::new(forced.clone(), frameworks, enabled));
    }

    for detector in ordered(&all, config) {
        if !enabled.contains(detector.ecosystem()) {
            continue;
        }
        if detector.matches(root) {
            let frameworks = detector.frameworks(root);
            tracing::debug!(
                ecosystem = detector.ecosystem(),
                frameworks = ?frameworks,
                "ecosystem detected"
            );
            return Ok(ProjectContext::new(
                detector.ecosystem().to_string(),
                frameworks,
                enabled,
            ));
        }
    }

    Err(DetectError::UnsupportedProject {
        root: root.to_path_buf(),
        enabled: enabled.into_iter().collect(),
    })
}

fn enabled_set(config: &DetectConfig) -> BTreeSet<String> {
    if config.enabled_ecosystems.is_empty() {
        DEFAULT_PRECEDENCE.iter().map(|s| s.to_string()).collect()
    } else {
        config.enabled_ecosystems.iter().cloned().collect()
    }
}

/// Order detectors per the configured precedence list, falling back to the
/// compiled-in default order for anything unlisted.
fn ordered<'a>(
    all: &'a [Box<dyn EcosystemDetector>],
    config: &DetectConfig,
) -> Vec<&'a dyn EcosystemDetector> {
    let mut result: Vec<&dyn EcosystemDetector> = Vec::with_capacity(all.len());
    for name in &config.precedence {
        if let Some(d) = all.iter().find(|d| d.ecosystem() == name.as_str()) {
            if !result.iter().any(|r| r.ecosystem() == d.ecosystem()) {
                result.push(d.as_ref());
            }
        }
    }
    for d in all {
        if !result.iter().any(|r| r.ecosystem() == d.ecosystem()) {
            result.push(d.as_ref());
        }
    }
    result
}
