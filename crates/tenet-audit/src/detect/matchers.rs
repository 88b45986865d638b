//! The built-in ecosystem detectors.
//!
//! Each detector declares a manifest test and a framework sub-detector over
//! the same manifest(s). Framework tags feed rule applicability filtering,
//! so the marker tables below use the same tag names rule authors use in
//! `applicable_to`.

use std::collections::BTreeSet;
use std::path::Path;

use super::manifest;
use super::EcosystemDetector;

const JSON_DEP_TABLES: &[&str] = &["dependencies", "devDependencies"];
const COMPOSER_DEP_TABLES: &[&str] = &["require", "require-dev"];
const CARGO_DEP_TABLES: &[&str] = &[
    "dependencies",
    "dev-dependencies",
    "workspace.dependencies",
];

/// Laravel: a composer.json requiring `laravel/framework`.
pub struct LaravelDetector;

impl EcosystemDetector for LaravelDetector {
    fn ecosystem(&self) -> &'static str {
        "laravel"
    }

    fn matches(&self, root: &Path) -> bool {
        let deps =
            manifest::json_dependencies(&root.join("composer.json"), COMPOSER_DEP_TABLES);
        manifest::has_dependency(&deps, "laravel/framework")
    }

    fn frameworks(&self, root: &Path) -> BTreeSet<String> {
        let deps =
            manifest::json_dependencies(&root.join("composer.json"), COMPOSER_DEP_TABLES);
        manifest::match_markers(
            &deps,
            &[
                ("livewire/livewire", "livewire"),
                ("inertiajs/inertia-laravel", "inertia"),
            ],
        )
    }
}

/// Python: pyproject.toml, requirements.txt, or Pipfile.
pub struct PythonDetector;

impl PythonDetector {
    fn dependencies(root: &Path) -> Vec<String> {
        let mut deps = manifest::pyproject_dependencies(&root.join("pyproject.toml"));
        deps.extend(manifest::requirements_dependencies(
            &root.join("requirements.txt"),
        ));
        deps.sort();
        deps.dedup();
        deps
    }
}

impl EcosystemDetector for PythonDetector {
    fn ecosystem(&self) -> &'static str {
        "python"
    }

    fn matches(&self, root: &Path) -> bool {
        root.join("pyproject.toml").is_file()
            || root.join("requirements.txt").is_file()
            || root.join("Pipfile").is_file()
    }

    fn frameworks(&self, root: &Path) -> BTreeSet<String> {
        manifest::match_markers(
            &Self::dependencies(root),
            &[
                ("django", "django"),
                ("fastapi", "fastapi"),
                ("flask", "flask"),
                ("numpy", "datascience"),
                ("pandas", "datascience"),
                ("scipy", "datascience"),
            ],
        )
    }
}

/// Node: any package.json (Laravel wins earlier in precedence when both
/// manifests are present).
pub struct NodeDetector;

impl EcosystemDetector for NodeDetector {
    fn ecosystem(&self) -> &'static str {
        "node"
    }

    fn matches(&self, root: &Path) -> bool {
        root.join("package.json").is_file()
    }

    fn frameworks(&self, root: &Path) -> BTreeSet<String> {
        let deps = manifest::json_dependencies(&root.join("package.json"), JSON_DEP_TABLES);
        manifest::match_markers(
            &deps,
            &[
                ("express", "express"),
                ("@nestjs", "nestjs"),
                ("next", "nextjs"),
                ("react", "react"),
            ],
        )
    }
}

/// Rust: a Cargo.toml at the root.
pub struct RustDetector;

impl EcosystemDetector for RustDetector {
    fn ecosystem(&self) -> &'static str {
        "rust"
    }

    fn matches(&self, root: &Path) -> bool {
        root.join("Cargo.toml").is_file()
    }

    fn frameworks(&self, root: &Path) -> BTreeSet<String> {
        let deps = manifest::toml_table_dependencies(&root.join("Cargo.toml"), CARGO_DEP_TABLES);
        manifest::match_markers(
            &deps,
            &[
                ("actix-web", "actix"),
                ("axum", "axum"),
                ("tokio", "tokio"),
            ],
        )
    }
}

/// Go: a go.mod at the root.
pub struct GoDetector;

impl EcosystemDetector for GoDetector {
    fn ecosystem(&self) -> &'static str {
        "go"
    }

    fn matches(&self, root: &Path) -> bool {
        root.join("go.mod").is_file()
    }

    fn frameworks(&self, root: &Path) -> BTreeSet<String> {
        let deps = manifest::gomod_dependencies(&root.join("go.mod"));
        manifest::match_markers(
            &deps,
            &[
                ("github.com/gin-gonic/gin", "gin"),
                ("github.com/labstack/echo", "echo"),
            ],
        )
    }
}
