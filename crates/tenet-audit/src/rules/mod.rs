//! Rule documents: typed schema, strict loading, registry, filtering.
//!
//! Architecture:
//! - `types.rs` — RuleDocument / Category / Rule / Severity serde types
//! - `loader.rs` — TOML parsing + strict validation → CompiledRuleDocument
//! - `registry.rs` — built-in packs (`include_str!`) + `.tenet/rules/`,
//!   `Arc`-cached and shared read-only across parallel evaluation
//! - `filter.rs` — narrows a document to the rules applicable to a
//!   detected ecosystem/framework set

pub mod filter;
pub mod loader;
pub mod registry;
pub mod types;

pub use filter::{ActiveCategory, ActiveRuleSet};
pub use loader::{CompiledCategory, CompiledRule, CompiledRuleDocument};
pub use registry::RuleRegistry;
pub use types::{Category, Rule, RuleDocument, Severity};
