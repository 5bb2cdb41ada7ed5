#![forbid(unsafe_code)]

//! Showcase pages: titled SDUI typewriter blocks.
//!
//! A page is the JSON accepted by [`typewriter_core::sdui::parse_page`]. Each
//! block may carry an extra `title` string used for the row label.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use typewriter_core::sdui::{SpecError, TypewriterSpec, parse_page};
use typewriter_core::{CursorSpec, TypewriterOptions};

/// Built-in page rendered when no `--spec` is given.
pub const BUILTIN_SHOWCASE: &str = include_str!("../specs/showcase.json");

/// One block on a page.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub title: String,
    pub spec: TypewriterSpec,
}

impl Entry {
    #[must_use]
    pub fn options(&self) -> TypewriterOptions {
        self.spec.options()
    }

    #[must_use]
    pub fn cursor(&self) -> CursorSpec {
        self.spec.cursor()
    }
}

/// Errors loading a page.
#[derive(Debug)]
pub enum LoadError {
    Io { path: PathBuf, source: io::Error },
    Spec(SpecError),
    Empty,
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "cannot read {}: {source}", path.display()),
            Self::Spec(e) => write!(f, "{e}"),
            Self::Empty => f.write_str("spec page contains no blocks"),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Spec(e) => Some(e),
            Self::Empty => None,
        }
    }
}

impl From<SpecError> for LoadError {
    fn from(e: SpecError) -> Self {
        Self::Spec(e)
    }
}

impl From<serde_json::Error> for LoadError {
    fn from(e: serde_json::Error) -> Self {
        Self::Spec(SpecError::Json(e))
    }
}

/// Parse a page and attach titles.
pub fn parse(json: &str) -> Result<Vec<Entry>, LoadError> {
    let specs = parse_page(json)?;
    if specs.is_empty() {
        return Err(LoadError::Empty);
    }

    let value: serde_json::Value = serde_json::from_str(json)?;
    let titles: Vec<Option<String>> = match &value {
        serde_json::Value::Array(items) => items.iter().map(title_of).collect(),
        other => vec![title_of(other)],
    };

    Ok(specs
        .into_iter()
        .zip(titles)
        .enumerate()
        .map(|(i, (spec, title))| Entry {
            title: title.unwrap_or_else(|| format!("{} #{}", spec.variant(), i + 1)),
            spec,
        })
        .collect())
}

fn title_of(value: &serde_json::Value) -> Option<String> {
    value
        .get("title")
        .and_then(serde_json::Value::as_str)
        .map(str::to_string)
}

/// Load a page from a file.
pub fn load(path: &Path) -> Result<Vec<Entry>, LoadError> {
    let json = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let entries = parse(&json)?;
    tracing::debug!(path = %path.display(), blocks = entries.len(), "spec page loaded");
    Ok(entries)
}

/// The built-in showcase page.
pub fn builtin() -> Result<Vec<Entry>, LoadError> {
    parse(BUILTIN_SHOWCASE)
}
