//! CLI entry point for the backend layering lint.
//!
//! Usage: `architecture-lint [BACKEND_DIR]`. Without an argument the backend
//! crate is found next to the enclosing Cargo workspace manifest.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

const MISSING_WORKSPACE: &str =
    "architecture-lint: no workspace Cargo.toml found; pass the backend directory explicitly";

fn main() -> ExitCode {
    let Some(backend_dir) = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .or_else(default_backend_dir)
    else {
        report(MISSING_WORKSPACE);
        return ExitCode::FAILURE;
    };

    match architecture_lint::lint_backend_sources(&backend_dir) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report(&err.to_string());
            ExitCode::FAILURE
        }
    }
}

fn report(message: &str) {
    let _ = writeln!(io::stderr().lock(), "{message}");
}

fn default_backend_dir() -> Option<PathBuf> {
    let starts = [
        std::env::current_dir().ok(),
        Some(PathBuf::from(env!("CARGO_MANIFEST_DIR"))),
    ];
    starts
        .iter()
        .flatten()
        .find_map(|start| start.ancestors().find(|dir| declares_workspace(dir)))
        .map(|root| root.join("backend"))
}

fn declares_workspace(dir: &Path) -> bool {
    fs::read_to_string(dir.join("Cargo.toml"))
        .is_ok_and(|manifest| manifest.lines().any(|line| line.trim() == "[workspace]"))
}
