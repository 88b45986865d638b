//! Top-level Tenet configuration with layered resolution.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{DetectConfig, EngineConfig, EngineMode, RulesConfig, ScanConfig, Strictness};
use crate::errors::ConfigError;

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. CLI flags (applied via `apply_cli_overrides`)
/// 2. Environment variables (`TENET_*`)
/// 3. Project config (`tenet.toml` in the audited root), skipped when the
///    effective engine mode is `global`
/// 4. User config (`~/.tenet/config.toml`)
/// 5. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AuditConfig {
    pub detect: DetectConfig,
    pub scan: ScanConfig,
    pub rules: RulesConfig,
    pub engine: EngineConfig,
}

/// CLI override arguments that can be applied to a config.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub enabled_ecosystems: Vec<String>,
    pub ecosystem_override: Option<String>,
    pub strictness: Option<Strictness>,
    pub deadline_ms: Option<u64>,
    pub threads: Option<usize>,
}

impl AuditConfig {
    /// Load configuration with layered resolution.
    ///
    /// The `engine.mode` option decides whether the project layer applies,
    /// so the user/env/CLI layers are consulted for it before `tenet.toml`
    /// is read.
    pub fn load(root: &Path, cli: Option<&CliOverrides>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Lowest priority: user config.
        if let Some(user_path) = Self::user_config_path() {
            if user_path.exists() {
                Self::merge_toml_file(&mut config, &user_path)?;
            }
        }

        // Project layer, unless global mode was already selected by the
        // user layer or the environment.
        let mut probe = config.clone();
        Self::apply_env_overrides(&mut probe);
        if probe.engine.effective_mode() == EngineMode::Project {
            let project_path = root.join("tenet.toml");
            if project_path.exists() {
                Self::merge_toml_file(&mut config, &project_path)?;
            }
        }

        Self::apply_env_overrides(&mut config);

        if let Some(cli) = cli {
            Self::apply_cli_overrides(&mut config, cli);
        }

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate the resolved configuration values.
    pub fn validate(config: &AuditConfig) -> Result<(), ConfigError> {
        if let Some(n) = config.scan.quick_sample_per_dir {
            if n == 0 {
                return Err(ConfigError::ValidationFailed {
                    field: "scan.quick_sample_per_dir".to_string(),
                    message: "must be greater than 0".to_string(),
                });
            }
        }
        if let Some(size) = config.scan.max_file_size {
            if size == 0 {
                return Err(ConfigError::ValidationFailed {
                    field: "scan.max_file_size".to_string(),
                    message: "must be greater than 0".to_string(),
                });
            }
        }
        if let Some(ms) = config.scan.deadline_ms {
            if ms == 0 {
                return Err(ConfigError::ValidationFailed {
                    field: "scan.deadline_ms".to_string(),
                    message: "must be greater than 0".to_string(),
                });
            }
        }
        Ok(())
    }

    /// Returns the user config path: `~/.tenet/config.toml`.
    fn user_config_path() -> Option<std::path::PathBuf> {
        home_dir().map(|h| h.join(".tenet").join("config.toml"))
    }

    /// Merge a TOML file into the existing config.
    /// Unknown keys are silently ignored (forward-compatible).
    fn merge_toml_file(config: &mut AuditConfig, path: &Path) -> Result<(), ConfigError> {
        let content =
            std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
                path: path.display().to_string(),
            })?;

        let file_config: AuditConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        tracing::debug!(path = %path.display(), "merged config layer");
        Ok(())
    }

    /// Merge `other` into `base`, where `other` values override `base`
    /// values only when `other` has a value.
    fn merge(base: &mut AuditConfig, other: &AuditConfig) {
        // Detect
        if !other.detect.enabled_ecosystems.is_empty() {
            base.detect.enabled_ecosystems = other.detect.enabled_ecosystems.clone();
        }
        if !other.detect.precedence.is_empty() {
            base.detect.precedence = other.detect.precedence.clone();
        }
        if other.detect.ecosystem_override.is_some() {
            base.detect.ecosystem_override = other.detect.ecosystem_override.clone();
        }

        // Scan
        if other.scan.quick_sample_per_dir.is_some() {
            base.scan.quick_sample_per_dir = other.scan.quick_sample_per_dir;
        }
        if other.scan.max_file_size.is_some() {
            base.scan.max_file_size = other.scan.max_file_size;
        }
        if other.scan.threads.is_some() {
            base.scan.threads = other.scan.threads;
        }
        if !other.scan.extra_ignore.is_empty() {
            base.scan.extra_ignore = other.scan.extra_ignore.clone();
        }
        if other.scan.follow_symlinks.is_some() {
            base.scan.follow_symlinks = other.scan.follow_symlinks;
        }
        if other.scan.deadline_ms.is_some() {
            base.scan.deadline_ms = other.scan.deadline_ms;
        }

        // Rules
        if other.rules.strictness.is_some() {
            base.rules.strictness = other.rules.strictness;
        }
        if other.rules.custom_dir.is_some() {
            base.rules.custom_dir = other.rules.custom_dir.clone();
        }

        // Engine
        if other.engine.mode.is_some() {
            base.engine.mode = other.engine.mode;
        }
        if other.engine.auto_audit_on_start.is_some() {
            base.engine.auto_audit_on_start = other.engine.auto_audit_on_start;
        }
    }

    /// Apply environment variable overrides.
    /// Pattern: `TENET_SCAN_THREADS`, `TENET_RULES_STRICTNESS`, etc.
    fn apply_env_overrides(config: &mut AuditConfig) {
        if let Ok(val) = std::env::var("TENET_SCAN_MAX_FILE_SIZE") {
            if let Ok(v) = val.parse::<u64>() {
                config.scan.max_file_size = Some(v);
            }
        }
        if let Ok(val) = std::env::var("TENET_SCAN_THREADS") {
            if let Ok(v) = val.parse::<usize>() {
                config.scan.threads = Some(v);
            }
        }
        if let Ok(val) = std::env::var("TENET_SCAN_DEADLINE_MS") {
            if let Ok(v) = val.parse::<u64>() {
                config.scan.deadline_ms = Some(v);
            }
        }
        if let Ok(val) = std::env::var("TENET_RULES_STRICTNESS") {
            match val.as_str() {
                "strict" => config.rules.strictness = Some(Strictness::Strict),
                "advisory" => config.rules.strictness = Some(Strictness::Advisory),
                _ => {}
            }
        }
        if let Ok(val) = std::env::var("TENET_ENGINE_MODE") {
            match val.as_str() {
                "project" => config.engine.mode = Some(EngineMode::Project),
                "global" => config.engine.mode = Some(EngineMode::Global),
                _ => {}
            }
        }
        if let Ok(val) = std::env::var("TENET_DETECT_ECOSYSTEMS") {
            let ecosystems: Vec<String> = val
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
            if !ecosystems.is_empty() {
                config.detect.enabled_ecosystems = ecosystems;
            }
        }
    }

    /// Apply CLI overrides (highest priority).
    fn apply_cli_overrides(config: &mut AuditConfig, cli: &CliOverrides) {
        if !cli.enabled_ecosystems.is_empty() {
            config.detect.enabled_ecosystems = cli.enabled_ecosystems.clone();
        }
        if let Some(ref v) = cli.ecosystem_override {
            config.detect.ecosystem_override = Some(v.clone());
        }
        if let Some(v) = cli.strictness {
            config.rules.strictness = Some(v);
        }
        if let Some(v) = cli.deadline_ms {
            config.scan.deadline_ms = Some(v);
        }
        if let Some(v) = cli.threads {
            config.scan.threads = Some(v);
        }
    }

}

/// Cross-platform home directory resolution.
fn home_dir() -> Option<std::path::PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(std::path::PathBuf::from)
}
