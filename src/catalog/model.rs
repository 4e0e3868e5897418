//! Deserializable representation of `schema/bibliography_types.json`.
//!
//! The types mirror the catalog schema so the CLIs and tests can reason about
//! bibliography-type metadata without ad-hoc JSON handling. Use `CatalogIndex`
//! for validation and id lookup; use these structs when the full catalog
//! surface is required (title, scope, category descriptions).

use crate::catalog::identity::{Category, CatalogKey, EntryId};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

#[derive(Clone, Debug, Deserialize)]
/// Full bibliography-type catalog as stored on disk.
pub struct BibliographyCatalog {
    pub schema_version: String,
    pub catalog: CatalogMetadata,
    pub scope: Scope,
    pub entries: Vec<BibliographyEntry>,
}

#[derive(Clone, Debug, Deserialize)]
/// Identifying metadata for a catalog snapshot.
pub struct CatalogMetadata {
    pub key: CatalogKey,
    pub title: String,
    #[serde(default)]
    pub labels: Vec<String>,
}

#[derive(Clone, Debug, Deserialize)]
/// Top-level catalog scope: which classification axes this snapshot covers.
pub struct Scope {
    pub description: String,
    pub categories: BTreeMap<String, String>,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
/// One bibliography classification type.
///
/// `features` and `examples` keep their file order; the display order is part
/// of the data. `icon` names the pictogram the card view tags the entry with.
pub struct BibliographyEntry {
    pub id: EntryId,
    pub title: String,
    pub category: Category,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    pub description: String,
    pub features: Vec<String>,
    pub examples: Vec<String>,
}

/// Read and parse a catalog from disk without additional validation.
pub fn load_catalog_from_path(path: &Path) -> Result<BibliographyCatalog> {
    let data = fs::read_to_string(path)?;
    let catalog: BibliographyCatalog = serde_json::from_str(&data)?;
    Ok(catalog)
}
