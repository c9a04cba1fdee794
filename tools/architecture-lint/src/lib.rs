//! Layering lint for the analogy backend.
//!
//! The backend keeps its hexagon at the module level: `domain` holds services
//! and ports, `inbound` holds the HTTP and session adapters, and `outbound`
//! holds the Gemini, PostgreSQL, argon2 and in-memory adapters. This crate
//! parses every source file under those roots with `syn`, collects the paths
//! each file mentions, and checks them against that layer's rule.
//!
//! Test-support files (`test_utils.rs`, `tests.rs`, `*_tests.rs`) wire
//! adapters together on purpose and are skipped.
//!
//! Run it with `cargo run -p architecture-lint [BACKEND_DIR]`.

use std::collections::BTreeSet;
use std::fmt::Write as _;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use syn::visit::Visit;

/// Library name of the backend crate, as used by integration tests and the
/// server binary.
const CRATE_NAME: &str = "analogy_backend";

const LAYER_ROOTS: [&str; 3] = ["domain", "inbound", "outbound"];

/// A single boundary violation discovered by the linter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// File path relative to `backend/src`.
    pub file: PathBuf,
    /// Human-readable description of the violated rule.
    pub message: String,
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.file.display(), self.message)
    }
}

/// Failure modes returned by the lint.
#[derive(Debug, thiserror::Error)]
pub enum ArchitectureLintError {
    /// Filesystem traversal or reading failed.
    #[error("I/O error while linting architecture: {0}")]
    Io(#[from] io::Error),
    /// A file could not be parsed or placed in a layer.
    #[error("cannot lint {}: {message}", .file.display())]
    Parse {
        /// Offending file, relative to `backend/src`.
        file: PathBuf,
        /// Parser or classification message.
        message: String,
    },
    /// One or more boundary violations were found.
    #[error("Architecture boundary violations:\n{}", render_violations(.0))]
    Violations(Vec<Violation>),
}

fn render_violations(violations: &[Violation]) -> String {
    violations.iter().fold(String::new(), |mut out, violation| {
        let _ = writeln!(out, "- {violation}");
        out
    })
}

/// A Rust source file to be linted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LintSource {
    /// Path relative to `backend/src`.
    pub file: PathBuf,
    /// File contents.
    pub contents: String,
}

/// What a layer may not reach for.
struct LayerRule {
    name: &'static str,
    modules: &'static [&'static str],
    crates: &'static [&'static str],
    reads_environment: bool,
}

const DOMAIN: LayerRule = LayerRule {
    name: "domain",
    modules: &["inbound", "outbound"],
    crates: &[
        "actix",
        "actix_session",
        "actix_web",
        "argon2",
        "diesel",
        "diesel_async",
        "diesel_migrations",
        "reqwest",
        "utoipa",
        "utoipa_swagger_ui",
    ],
    reads_environment: false,
};

const INBOUND: LayerRule = LayerRule {
    name: "inbound",
    modules: &["outbound"],
    crates: &[
        "argon2",
        "diesel",
        "diesel_async",
        "diesel_migrations",
        "reqwest",
    ],
    reads_environment: true,
};

const OUTBOUND: LayerRule = LayerRule {
    name: "outbound",
    modules: &["inbound"],
    crates: &["actix", "actix_session", "actix_web", "utoipa"],
    reads_environment: false,
};

impl LayerRule {
    fn for_path(relative: &Path) -> Option<&'static Self> {
        let first = relative.components().next()?.as_os_str().to_str()?;
        match first {
            "domain" => Some(&DOMAIN),
            "inbound" => Some(&INBOUND),
            "outbound" => Some(&OUTBOUND),
            _ => None,
        }
    }

    fn check(&self, path: &[String]) -> Option<String> {
        if let Some(module) = internal_root(path).filter(|root| self.modules.contains(root)) {
            return Some(format!("{} module must not depend on crate::{module}", self.name));
        }
        let root = external_root(path)?;
        if self.crates.contains(&root) {
            return Some(format!(
                "{} module must not depend on external crate `{root}`",
                self.name
            ));
        }
        let touches_env = root == "std" && path.get(1).is_some_and(|segment| segment == "env");
        (touches_env && !self.reads_environment).then(|| {
            format!(
                "{} module must not read the process environment; take settings as arguments",
                self.name
            )
        })
    }
}

/// Lint the backend crate sources on disk.
///
/// `backend_dir` is the backend crate directory (the one holding `src/`).
///
/// # Errors
///
/// Returns [`ArchitectureLintError`] when reading or parsing fails, or when
/// any file breaks its layer's rule.
pub fn lint_backend_sources(backend_dir: &Path) -> Result<(), ArchitectureLintError> {
    let src_dir = backend_dir.join("src");
    let mut sources = Vec::new();
    for root in LAYER_ROOTS {
        let dir = src_dir.join(root);
        if dir.is_dir() {
            collect_sources(&src_dir, &dir, &mut sources)?;
        }
    }
    lint_sources(&sources)
}

/// Lint in-memory sources.
///
/// # Errors
///
/// See [`lint_backend_sources`].
pub fn lint_sources(sources: &[LintSource]) -> Result<(), ArchitectureLintError> {
    let mut violations = Vec::new();
    for source in sources {
        let parse_error = |message: String| ArchitectureLintError::Parse {
            file: source.file.clone(),
            message,
        };
        let rule = LayerRule::for_path(&source.file)
            .ok_or_else(|| parse_error("file is outside every layer root".to_owned()))?;
        let parsed =
            syn::parse_file(&source.contents).map_err(|err| parse_error(err.to_string()))?;

        let mut collector = PathCollector::default();
        collector.visit_file(&parsed);
        let messages: BTreeSet<String> = collector
            .paths
            .iter()
            .filter_map(|path| rule.check(path))
            .collect();
        violations.extend(messages.into_iter().map(|message| Violation {
            file: source.file.clone(),
            message,
        }));
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(ArchitectureLintError::Violations(violations))
    }
}

fn is_relative(segment: &str) -> bool {
    matches!(segment, "crate" | "self" | "super")
}

/// First backend module a path reaches, if it stays inside the crate.
fn internal_root(path: &[String]) -> Option<&str> {
    let first = path.first()?.as_str();
    if LAYER_ROOTS.contains(&first) {
        return Some(first);
    }
    if first == CRATE_NAME {
        return path.get(1).map(String::as_str);
    }
    if is_relative(first) {
        return path
            .iter()
            .map(String::as_str)
            .find(|segment| !is_relative(segment));
    }
    None
}

fn external_root(path: &[String]) -> Option<&str> {
    path.first()
        .map(String::as_str)
        .filter(|root| !is_relative(root) && *root != CRATE_NAME)
}

/// Collects every path mentioned in a file, expanding `use` trees.
#[derive(Default)]
struct PathCollector {
    paths: BTreeSet<Vec<String>>,
}

impl PathCollector {
    fn walk_use(&mut self, tree: &syn::UseTree, prefix: &mut Vec<String>) {
        match tree {
            syn::UseTree::Path(path) => {
                prefix.push(path.ident.to_string());
                self.walk_use(&path.tree, prefix);
                prefix.pop();
            }
            syn::UseTree::Name(name) => self.insert_with(prefix, name.ident.to_string()),
            syn::UseTree::Rename(rename) => self.insert_with(prefix, rename.ident.to_string()),
            syn::UseTree::Glob(_) => self.insert_with(prefix, "*".to_owned()),
            syn::UseTree::Group(group) => {
                for item in &group.items {
                    self.walk_use(item, prefix);
                }
            }
        }
    }

    fn insert_with(&mut self, prefix: &[String], last: String) {
        let mut path = prefix.to_vec();
        path.push(last);
        self.paths.insert(path);
    }
}

impl<'ast> Visit<'ast> for PathCollector {
    fn visit_path(&mut self, node: &'ast syn::Path) {
        let segments: Vec<String> = node
            .segments
            .iter()
            .map(|segment| segment.ident.to_string())
            .collect();
        if !segments.is_empty() {
            self.paths.insert(segments);
        }
        syn::visit::visit_path(self, node);
    }

    fn visit_item_use(&mut self, node: &'ast syn::ItemUse) {
        self.walk_use(&node.tree, &mut Vec::new());
    }
}

fn collect_sources(
    src_root: &Path,
    dir: &Path,
    sources: &mut Vec<LintSource>,
) -> Result<(), ArchitectureLintError> {
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            collect_sources(src_root, &path, sources)?;
            continue;
        }
        if path.extension().is_none_or(|ext| ext != "rs") || is_test_support(&path) {
            continue;
        }
        let file = path
            .strip_prefix(src_root)
            .map_err(|err| ArchitectureLintError::Parse {
                file: path.clone(),
                message: err.to_string(),
            })?
            .to_path_buf();
        let contents = fs::read_to_string(&path)?;
        sources.push(LintSource { file, contents });
    }
    Ok(())
}

fn is_test_support(path: &Path) -> bool {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .is_some_and(|stem| matches!(stem, "tests" | "test_utils") || stem.ends_with("_tests"))
}
