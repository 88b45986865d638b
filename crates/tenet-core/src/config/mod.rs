//! Configuration system for Tenet.
//! TOML-based, layered resolution: CLI > env > project > user > defaults.

pub mod audit_config;
pub mod detect_config;
pub mod engine_config;
pub mod rules_config;
pub mod scan_config;

pub use audit_config::{AuditConfig, CliOverrides};
pub use detect_config::DetectConfig;
pub use engine_config::{EngineConfig, EngineMode};
pub use rules_config::{RulesConfig, Strictness};
pub use scan_config::{AuditMode, ScanConfig};
