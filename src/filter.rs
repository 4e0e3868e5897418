//! Catalog filtering: free-text search combined with a category criterion.
//!
//! The predicate is pure and total: it never fails, never mutates the
//! catalog, and runs to completion on every call. Both criteria must match
//! (logical AND) and the result keeps the catalog's file order. An empty
//! result is a valid outcome, not an error; callers use it to trigger the
//! not-found view.

use crate::catalog::{BibliographyEntry, CategoryFilter};

/// Filter criteria owned by the input layer, handed in anew on each
/// recomputation.
///
/// `search_term` is the raw text-field content; `category` is the selector
/// token. Defaults select the whole catalog.
#[derive(Clone, Debug, Default)]
pub struct FilterState {
    pub search_term: String,
    pub category: CategoryFilter,
}

impl FilterState {
    pub fn new(search_term: impl Into<String>, category: CategoryFilter) -> Self {
        Self {
            search_term: search_term.into(),
            category,
        }
    }
}

/// Select the catalog entries matching the current filter state.
///
/// An entry matches when the lower-cased search term is a substring of its
/// lower-cased title or description (the empty term matches everything) and
/// its category passes the selector. Lower-casing is Unicode-aware; the
/// shipped catalog is Cyrillic.
pub fn filter_entries<'a>(
    entries: &'a [BibliographyEntry],
    state: &FilterState,
) -> Vec<&'a BibliographyEntry> {
    let needle = state.search_term.to_lowercase();
    entries
        .iter()
        .filter(|entry| matches_search(entry, &needle) && state.category.admits(&entry.category))
        .collect()
}

fn matches_search(entry: &BibliographyEntry, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    entry.title.to_lowercase().contains(needle)
        || entry.description.to_lowercase().contains(needle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Category, EntryId};

    fn entry(id: u32, title: &str, category: Category, description: &str) -> BibliographyEntry {
        BibliographyEntry {
            id: EntryId(id),
            title: title.to_string(),
            category,
            icon: None,
            description: description.to_string(),
            features: vec!["Признак".to_string()],
            examples: vec!["Пример".to_string()],
        }
    }

    fn sample_entries() -> Vec<BibliographyEntry> {
        vec![
            entry(
                1,
                "Государственная библиография",
                Category::Organizational,
                "Система пособий государственных центров.",
            ),
            entry(
                3,
                "Рекомендательная библиография",
                Category::Functional,
                "Пособия, рекомендующие литературу читателям.",
            ),
            entry(
                4,
                "Текущая библиография",
                Category::Temporal,
                "Регистрация новых публикаций.",
            ),
            entry(
                5,
                "Ретроспективная библиография",
                Category::Temporal,
                "Информация о документах прошлых лет.",
            ),
        ]
    }

    fn ids(result: &[&BibliographyEntry]) -> Vec<u32> {
        result.iter().map(|entry| entry.id.0).collect()
    }

    #[test]
    fn default_state_returns_everything_in_order() {
        let entries = sample_entries();
        let result = filter_entries(&entries, &FilterState::default());
        assert_eq!(ids(&result), vec![1, 3, 4, 5]);
    }

    #[test]
    fn search_is_case_insensitive_for_cyrillic() {
        let entries = sample_entries();
        let upper = filter_entries(
            &entries,
            &FilterState::new("БИБЛИО", CategoryFilter::All),
        );
        let lower = filter_entries(
            &entries,
            &FilterState::new("библио", CategoryFilter::All),
        );
        assert_eq!(ids(&upper), ids(&lower));
        assert!(!upper.is_empty());
    }

    #[test]
    fn search_matches_description_too() {
        let entries = sample_entries();
        let result = filter_entries(
            &entries,
            &FilterState::new("прошлых лет", CategoryFilter::All),
        );
        assert_eq!(ids(&result), vec![5]);
    }

    #[test]
    fn category_selection_admits_only_that_category() {
        let entries = sample_entries();
        let state = FilterState::new("", CategoryFilter::from_token("Временная"));
        let result = filter_entries(&entries, &state);
        assert_eq!(ids(&result), vec![4, 5]);
        assert!(
            result
                .iter()
                .all(|entry| entry.category == Category::Temporal)
        );
    }

    #[test]
    fn criteria_combine_with_logical_and() {
        let entries = sample_entries();
        let state = FilterState::new(
            "рекомендательная",
            CategoryFilter::from_token("Временная"),
        );
        // Matches the search in one category and the selector in another;
        // both together select nothing.
        assert!(filter_entries(&entries, &state).is_empty());
    }

    #[test]
    fn repeated_application_is_idempotent() {
        let entries = sample_entries();
        let state = FilterState::new("библиография", CategoryFilter::from_token("Временная"));
        let first = ids(&filter_entries(&entries, &state));
        let second = ids(&filter_entries(&entries, &state));
        assert_eq!(first, second);
    }

    #[test]
    fn unmatched_search_yields_the_empty_fallback_condition() {
        let entries = sample_entries();
        let result = filter_entries(
            &entries,
            &FilterState::new("zzz-no-match", CategoryFilter::All),
        );
        assert!(result.is_empty());
    }

    #[test]
    fn unknown_category_token_selects_nothing() {
        let entries = sample_entries();
        let state = FilterState::new("", CategoryFilter::from_token("Жанровая"));
        assert!(filter_entries(&entries, &state).is_empty());
    }
}
