use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Versioned key for a bibliography catalog (e.g., `bibliography_types_ru_v1`).
///
/// Stored in the catalog file so consumers can tell which snapshot a record
/// stream was produced from.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CatalogKey(pub String);

/// Stable identifier for an individual catalog entry.
///
/// Ids are unique within a catalog and never reused; the index rejects
/// duplicates at load time.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(pub u32);

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Classification axis assigned to each catalog entry.
///
/// The string form is the domain label carried by the catalog data
/// (`Организационная`, `Функциональная`, `Временная`, `Видовая`). Known
/// variants keep serialization consistent; `Other` preserves forward
/// compatibility with catalogs that introduce new axes.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Category {
    Organizational,
    Functional,
    Temporal,
    Typological,
    Other(String),
}

impl Serialize for Category {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Ok(Self::from_label(&value))
    }
}

impl Category {
    pub fn as_str(&self) -> &str {
        match self {
            Category::Organizational => "Организационная",
            Category::Functional => "Функциональная",
            Category::Temporal => "Временная",
            Category::Typological => "Видовая",
            Category::Other(value) => value.as_str(),
        }
    }

    pub fn from_label(value: &str) -> Self {
        match value {
            "Организационная" => Category::Organizational,
            "Функциональная" => Category::Functional,
            "Временная" => Category::Temporal,
            "Видовая" => Category::Typological,
            other => Category::Other(other.to_string()),
        }
    }
}

/// Category criterion supplied by the caller alongside the search term.
///
/// The token form matches the selector values the input layer forwards:
/// `all` or one of the category labels.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    pub const ALL_TOKEN: &'static str = "all";

    pub fn from_token(token: &str) -> Self {
        if token == Self::ALL_TOKEN {
            CategoryFilter::All
        } else {
            CategoryFilter::Only(Category::from_label(token))
        }
    }

    pub fn as_token(&self) -> &str {
        match self {
            CategoryFilter::All => Self::ALL_TOKEN,
            CategoryFilter::Only(category) => category.as_str(),
        }
    }

    /// Whether an entry with the given category passes this criterion.
    pub fn admits(&self, category: &Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(selected) => selected == category,
        }
    }
}
