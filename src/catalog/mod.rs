//! Bibliography catalog wiring.
//!
//! This module wraps the JSON catalog under `schema/bibliography_types.json`
//! so the CLIs can load a validated snapshot and expose consistent
//! identifiers. Types here mirror the schema fields; callers use
//! `CatalogIndex` for lookups and the ordered entry slice the filter runs
//! over.

pub mod identity;
pub mod index;
pub mod model;

pub use identity::{Category, CategoryFilter, CatalogKey, EntryId};
pub use index::CatalogIndex;
pub use model::{BibliographyCatalog, BibliographyEntry, CatalogMetadata, Scope};

pub use model::load_catalog_from_path;
