//! Shared library for the bibliography-type catalog tools.
//!
//! The crate exposes the catalog types, the filter predicate, and the text
//! rendering used by the `biblio` binaries. Public functions here form the
//! contract the binaries depend on: repository discovery, default catalog
//! paths, and the record-stream parsing that `biblio-listen` consumes.

use anyhow::{Context, Result, bail};
use serde_json::Value;
use std::{
    env, fs,
    path::{Path, PathBuf},
};

pub mod catalog;
pub mod filter;
pub mod render_support;
mod schema_loader;

pub use catalog::{
    BibliographyCatalog, BibliographyEntry, CatalogIndex, CatalogKey, CatalogMetadata, Category,
    CategoryFilter, EntryId, Scope, load_catalog_from_path,
};
pub use filter::{FilterState, filter_entries};
pub use render_support::{FilterStats, render_entries, render_not_found, summarize_entries};

const CATALOG_FILE: &str = "schema/bibliography_types.json";
const CATALOG_SCHEMA_FILE: &str = "schema/bibliography_catalog.schema.json";

/// Returns true when `candidate` looks like the repository root.
///
/// Root detection is intentionally strict: both the catalog and its schema
/// contract must be present so binaries never run against half a data set.
fn is_repo_root(candidate: &Path) -> bool {
    candidate.join(CATALOG_FILE).is_file() && candidate.join(CATALOG_SCHEMA_FILE).is_file()
}

/// Verifies that an explicit `BIBLIO_ROOT` hint points at a valid repo.
fn repo_root_from_hint(hint: &str) -> Option<PathBuf> {
    if hint.is_empty() {
        return None;
    }
    let hint_path = PathBuf::from(hint);
    if !hint_path.exists() || !is_repo_root(&hint_path) {
        return None;
    }
    fs::canonicalize(hint_path).ok()
}

fn search_upwards(start: &Path) -> Option<PathBuf> {
    let mut dir = fs::canonicalize(start).ok()?;
    loop {
        if is_repo_root(&dir) {
            return Some(dir);
        }
        if !dir.pop() {
            break;
        }
    }
    None
}

/// Locate the repository root holding the catalog and its schema.
///
/// Search order: honor `BIBLIO_ROOT` if it points at a real repo, fall back
/// to climbing up from the current executable, then use the build-time hint.
/// Callers can treat failure as fatal because the binaries cannot run
/// without the catalog files.
pub fn find_repo_root() -> Result<PathBuf> {
    if let Ok(env_root) = env::var("BIBLIO_ROOT") {
        if let Some(root) = repo_root_from_hint(&env_root) {
            return Ok(root);
        }
    }

    if let Ok(exe_path) = env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            if let Some(root) = search_upwards(exe_dir) {
                return Ok(root);
            }
        }
    }

    if let Some(hint) = option_env!("BIBLIO_ROOT_HINT") {
        if let Some(root) = repo_root_from_hint(hint) {
            return Ok(root);
        }
    }

    bail!(
        "Unable to locate the bibliotypes repository root. Set BIBLIO_ROOT to the cloned repository."
    );
}

/// Path of the shipped catalog within a repository root.
pub fn default_catalog_path(repo_root: &Path) -> PathBuf {
    repo_root.join(CATALOG_FILE)
}

/// Path of the catalog schema contract within a repository root.
pub fn default_schema_path(repo_root: &Path) -> PathBuf {
    repo_root.join(CATALOG_SCHEMA_FILE)
}

/// Parse a catalog-entry stream, accepting NDJSON, a JSON array, or a single
/// object.
///
/// The parser mirrors the listener contract: arrays and single entries are
/// accepted, and NDJSON streams are parsed line-by-line so partial writes do
/// not break the whole run. Empty input yields an empty vector — an empty
/// filter result is a designed outcome, and the listener renders the
/// not-found view for it.
pub fn parse_record_stream(input: &str) -> Result<Vec<BibliographyEntry>> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }

    if let Ok(value) = serde_json::from_str::<Value>(trimmed) {
        return match value {
            Value::Array(items) => items
                .into_iter()
                .map(serde_json::from_value)
                .collect::<Result<Vec<_>, _>>()
                .context("Unable to parse JSON array of catalog entries"),
            Value::Object(_) => serde_json::from_value(value)
                .map(|entry| vec![entry])
                .context("Unable to parse catalog entry"),
            _ => bail!("Unsupported JSON input; expected object or array"),
        };
    }

    let mut records = Vec::new();
    for (idx, line) in trimmed.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let entry: BibliographyEntry = serde_json::from_str(line)
            .with_context(|| format!("Unable to parse catalog entry from line {}", idx + 1))?;
        records.push(entry);
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ENTRY_JSON: &str = r#"{"id":4,"title":"Текущая библиография","category":"Временная","description":"Регистрация новых публикаций.","features":["Оперативность"],"examples":["Сигнальная информация"]}"#;

    #[test]
    fn stream_accepts_single_object() {
        let records = parse_record_stream(ENTRY_JSON).expect("parse object");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, EntryId(4));
    }

    #[test]
    fn stream_accepts_array_and_ndjson() {
        let array = format!("[{ENTRY_JSON},{ENTRY_JSON}]");
        assert_eq!(parse_record_stream(&array).expect("parse array").len(), 2);

        let ndjson = format!("{ENTRY_JSON}\n\n{ENTRY_JSON}\n");
        assert_eq!(parse_record_stream(&ndjson).expect("parse ndjson").len(), 2);
    }

    #[test]
    fn stream_accepts_empty_input_as_empty_result() {
        assert!(parse_record_stream("").expect("empty ok").is_empty());
        assert!(parse_record_stream("  \n ").expect("blank ok").is_empty());
    }

    #[test]
    fn stream_rejects_non_entry_json() {
        assert!(parse_record_stream("42").is_err());
        assert!(parse_record_stream("\"библиография\"").is_err());
    }
}
