//! Indexed view of a bibliography catalog instance.
//!
//! The index enforces the expected catalog schema version and provides fast
//! lookup by entry id. It is intentionally strict about duplicates and
//! unknown categories so the CLIs cannot silently consume a malformed
//! catalog.

use crate::catalog::load_catalog_from_path;
use crate::catalog::{BibliographyCatalog, BibliographyEntry, CatalogKey, CatalogMetadata, EntryId};
use crate::schema_loader::{SchemaLoadOptions, load_json_schema};
use anyhow::{Context, Result, bail};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::path::PathBuf;

// The repo currently ships a single catalog; reject unexpected versions
// rather than risk filtering records against mismatched metadata.
const DEFAULT_SCHEMA_VERSION: &str = "bibliography_catalog_v1";

#[derive(Debug)]
/// Bibliography catalog plus a derived index keyed by entry id.
pub struct CatalogIndex {
    catalog_key: CatalogKey,
    catalog: BibliographyCatalog,
    by_id: BTreeMap<EntryId, BibliographyEntry>,
}

impl CatalogIndex {
    /// Load and validate a catalog from disk.
    ///
    /// Validates the file against the schema contract, checks the schema
    /// version and metadata, and builds a deterministic BTreeMap for lookups.
    pub fn load(path: &Path) -> Result<Self> {
        validate_against_schema(path)?;

        let catalog =
            load_catalog_from_path(path).with_context(|| format!("loading {}", path.display()))?;
        validate_schema_version(&catalog.schema_version)?;
        validate_catalog_metadata(&catalog.catalog)?;
        let by_id = build_index(&catalog)?;
        Ok(Self {
            catalog_key: catalog.catalog.key.clone(),
            catalog,
            by_id,
        })
    }

    /// The catalog key declared in the loaded file.
    pub fn key(&self) -> &CatalogKey {
        &self.catalog_key
    }

    /// Resolve an entry by id.
    ///
    /// Returns `None` instead of erroring; callers surface errors with the
    /// context that referenced the missing id.
    pub fn entry(&self, id: &EntryId) -> Option<&BibliographyEntry> {
        self.by_id.get(id)
    }

    /// Iterates entry ids in stable order.
    pub fn ids(&self) -> impl Iterator<Item = &EntryId> {
        self.by_id.keys()
    }

    /// Catalog entries in file order.
    ///
    /// This is the filter input: result ordering follows this slice, never
    /// the id-sorted index.
    pub fn entries(&self) -> &[BibliographyEntry] {
        &self.catalog.entries
    }

    /// Access the underlying catalog (title, scope, category descriptions).
    pub fn catalog(&self) -> &BibliographyCatalog {
        &self.catalog
    }
}

fn validate_schema_version(schema_version: &str) -> Result<()> {
    if schema_version.is_empty() {
        bail!("schema_version must not be empty");
    }

    if !schema_version
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
    {
        bail!(
            "schema_version must match ^[A-Za-z0-9_.-]+$, got {}",
            schema_version
        );
    }

    let allowed = allowed_schema_versions();
    if !allowed.contains(schema_version) {
        bail!(
            "schema_version '{}' not in allowed set {:?}",
            schema_version,
            allowed
        );
    }

    Ok(())
}

fn allowed_schema_versions() -> BTreeSet<String> {
    BTreeSet::from_iter([default_catalog_schema_version()])
}

fn default_catalog_schema_version() -> String {
    catalog_schema_version_from_disk().unwrap_or_else(|| DEFAULT_SCHEMA_VERSION.to_string())
}

fn catalog_schema_version_from_disk() -> Option<String> {
    let path = canonical_catalog_schema_path();
    let file = File::open(path).ok()?;
    let value: Value = serde_json::from_reader(BufReader::new(file)).ok()?;
    value
        .pointer("/properties/schema_version/const")
        .and_then(Value::as_str)
        .map(str::to_string)
}

fn canonical_catalog_schema_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("schema/bibliography_catalog.schema.json")
}

fn validate_catalog_metadata(meta: &CatalogMetadata) -> Result<()> {
    validate_catalog_key(&meta.key)?;
    if meta.title.trim().is_empty() {
        bail!("catalog.title must not be empty");
    }
    if meta.labels.iter().any(|label| label.trim().is_empty()) {
        bail!("catalog.labels must not contain empty entries");
    }
    Ok(())
}

fn validate_catalog_key(key: &CatalogKey) -> Result<()> {
    if key.0.is_empty() {
        bail!("catalog.key must not be empty");
    }

    if !key
        .0
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
    {
        bail!("catalog.key must match ^[A-Za-z0-9_.-]+$, got {}", key.0);
    }

    Ok(())
}

fn build_index(catalog: &BibliographyCatalog) -> Result<BTreeMap<EntryId, BibliographyEntry>> {
    if catalog.entries.is_empty() {
        bail!("catalog contains no entries");
    }

    let category_labels: BTreeSet<String> = catalog.scope.categories.keys().cloned().collect();
    if category_labels.is_empty() {
        bail!("catalog scope must define at least one category");
    }

    let mut map = BTreeMap::new();
    for entry in &catalog.entries {
        if entry.title.trim().is_empty() {
            bail!("entry {} has an empty title", entry.id);
        }
        if entry.description.trim().is_empty() {
            bail!("entry {} ({}) has an empty description", entry.id, entry.title);
        }
        if map.contains_key(&entry.id) {
            bail!("duplicate entry id {}", entry.id);
        }
        if !category_labels.contains(entry.category.as_str()) {
            bail!(
                "entry {} references unknown category {}",
                entry.id,
                entry.category.as_str()
            );
        }
        if entry.features.iter().any(|item| item.trim().is_empty()) {
            bail!("entry {} has an empty feature item", entry.id);
        }
        if entry.examples.iter().any(|item| item.trim().is_empty()) {
            bail!("entry {} has an empty example item", entry.id);
        }
        map.insert(entry.id, entry.clone());
    }
    Ok(map)
}

fn validate_against_schema(catalog_path: &Path) -> Result<()> {
    let catalog_file = File::open(catalog_path)
        .with_context(|| format!("opening catalog {}", catalog_path.display()))?;
    let catalog_value: Value = serde_json::from_reader(BufReader::new(catalog_file))
        .with_context(|| format!("parsing catalog {}", catalog_path.display()))?;

    let catalog_version = catalog_value
        .get("schema_version")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    let schema_path = resolve_catalog_schema_path(catalog_path);
    let allowed = allowed_schema_versions();
    let schema = load_json_schema(
        &schema_path,
        SchemaLoadOptions {
            allowed_versions: Some(&allowed),
            expected_version: Some(&catalog_version),
            patch_schema_version_const: true,
            ..Default::default()
        },
    )
    .with_context(|| format!("loading catalog schema {}", schema_path.display()))?;

    if let Err(errors) = schema.compiled.validate(&catalog_value) {
        let details = errors
            .map(|err| err.to_string())
            .collect::<Vec<_>>()
            .join("\n");
        bail!(
            "bibliography catalog {} failed schema validation:\n{}",
            catalog_path.display(),
            details
        );
    }
    Ok(())
}

fn resolve_catalog_schema_path(catalog_path: &Path) -> PathBuf {
    if let Some(base) = catalog_path.parent().and_then(|p| p.parent()) {
        let candidate = base.join("schema/bibliography_catalog.schema.json");
        if candidate.exists() {
            return candidate;
        }
    }

    canonical_catalog_schema_path()
}
