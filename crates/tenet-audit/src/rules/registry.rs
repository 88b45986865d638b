//! Rule document registry — built-in packs + project documents.
//!
//! Built-in packs are embedded at compile time via `include_str!`. A
//! project may add or override documents under `.tenet/rules/<eco>.toml`.
//! Loaded documents are cached and shared read-only; nothing else about
//! the engine persists between runs.

use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use rustc_hash::FxHashMap;

use tenet_core::errors::RuleError;

use super::loader::{self, CompiledRuleDocument};

/// Registry of rule documents, keyed by ecosystem.
pub struct RuleRegistry {
    /// Project rule directory; documents here override built-ins.
    custom_dir: Option<PathBuf>,
    cache: RwLock<FxHashMap<String, Arc<CompiledRuleDocument>>>,
}

impl RuleRegistry {
    /// Registry serving only the built-in packs.
    pub fn with_builtins() -> Self {
        Self {
            custom_dir: None,
            cache: RwLock::new(FxHashMap::default()),
        }
    }

    /// Registry serving built-in packs plus documents from a project rule
    /// directory. A document named `<ecosystem>.toml` there overrides the
    /// built-in of the same name.
    pub fn with_custom_dir(custom_dir: PathBuf) -> Self {
        Self {
            custom_dir: Some(custom_dir),
            cache: RwLock::new(FxHashMap::default()),
        }
    }

    /// Load the rule document for an ecosystem.
    ///
    /// Strict: a malformed document (built-in or project) fails the run.
    /// There is no fallback from a broken project document to the built-in.
    pub fn load(&self, ecosystem: &str) -> Result<Arc<CompiledRuleDocument>, RuleError> {
        if let Some(doc) = self.cache.read().expect("rule cache poisoned").get(ecosystem) {
            return Ok(Arc::clone(doc));
        }

        let doc = Arc::new(self.load_uncached(ecosystem)?);
        self.cache
            .write()
            .expect("rule cache poisoned")
            .insert(ecosystem.to_string(), Arc::clone(&doc));
        Ok(doc)
    }

    fn load_uncached(&self, ecosystem: &str) -> Result<CompiledRuleDocument, RuleError> {
        if let Some(ref dir) = self.custom_dir {
            let path = dir.join(format!("{ecosystem}.toml"));
            if path.is_file() {
                tracing::debug!(path = %path.display(), "loading project rule document");
                return loader::load_from_file(&path);
            }
        }

        match builtin_documents()
            .iter()
            .find(|(name, _)| *name == ecosystem)
        {
            Some(&(name, toml_str)) => loader::load_from_str(name, toml_str),
            None => Err(RuleError::UnknownEcosystem {
                ecosystem: ecosystem.to_string(),
            }),
        }
    }

    /// Ecosystems with a built-in rule document.
    pub fn builtin_ecosystems() -> Vec<&'static str> {
        builtin_documents().iter().map(|(name, _)| *name).collect()
    }
}

/// Built-in rule packs embedded at compile time.
fn builtin_documents() -> &'static [(&'static str, &'static str)] {
    &[
        ("laravel", include_str!("packs/laravel.toml")),
        ("node", include_str!("packs/node.toml")),
        ("python", include_str!("packs/python.toml")),
        ("rust", include_str!("packs/rust.toml")),
        ("go", include_str!("packs/go.toml")),
    ]
}
