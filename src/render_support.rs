//! Plain-text rendering of filtered catalog entries.
//!
//! Shared by `biblio --format text` and `biblio-listen` so both surfaces show
//! the same card view: a count summary, one card per entry with its feature
//! and example lists, and a not-found block when the result set is empty.
//! Rendering targets `fmt::Write` so callers can buffer the whole view and
//! print it once.

use crate::catalog::BibliographyEntry;
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Default)]
/// Aggregate counts over a filter result.
pub struct FilterStats {
    pub total: usize,
    pub categories: BTreeMap<String, usize>,
}

/// Count entries per category label.
pub fn summarize_entries(entries: &[&BibliographyEntry]) -> FilterStats {
    let mut stats = FilterStats {
        total: entries.len(),
        ..FilterStats::default()
    };

    for entry in entries {
        *stats
            .categories
            .entry(entry.category.as_str().to_string())
            .or_insert(0) += 1;
    }

    stats
}

/// Render the card view for a filter result.
///
/// An empty result renders the not-found block instead; that condition is
/// part of the filter contract, so both text surfaces honor it here.
pub fn render_entries(
    entries: &[&BibliographyEntry],
    writer: &mut impl fmt::Write,
) -> fmt::Result {
    if entries.is_empty() {
        return render_not_found(writer);
    }

    let stats = summarize_entries(entries);
    render_summary(&stats, writer)?;
    writeln!(writer)?;
    for (idx, entry) in entries.iter().enumerate() {
        render_entry(idx + 1, entry, writer)?;
    }
    Ok(())
}

fn render_summary(stats: &FilterStats, writer: &mut impl fmt::Write) -> fmt::Result {
    writeln!(writer, "biblio filter summary")?;
    writeln!(writer, "=====================")?;
    writeln!(writer, "total entries : {}", stats.total)?;
    writeln!(
        writer,
        "categories    : {}",
        format_counts(&stats.categories, "none")
    )?;
    Ok(())
}

fn render_entry(
    idx: usize,
    entry: &BibliographyEntry,
    writer: &mut impl fmt::Write,
) -> fmt::Result {
    writeln!(writer, "[{idx}] {} (id {})", entry.title, entry.id)?;
    match &entry.icon {
        Some(icon) => writeln!(writer, "    категория: {} [{icon}]", entry.category.as_str())?,
        None => writeln!(writer, "    категория: {}", entry.category.as_str())?,
    }
    writeln!(writer, "    {}", entry.description)?;
    if !entry.features.is_empty() {
        writeln!(writer, "    Характеристики:")?;
        for feature in &entry.features {
            writeln!(writer, "      • {feature}")?;
        }
    }
    if !entry.examples.is_empty() {
        writeln!(writer, "    Примеры:")?;
        for example in &entry.examples {
            writeln!(writer, "      • {example}")?;
        }
    }
    writeln!(writer)?;
    Ok(())
}

/// The empty-result view: shown whenever the filter selects nothing.
pub fn render_not_found(writer: &mut impl fmt::Write) -> fmt::Result {
    writeln!(writer, "Ничего не найдено")?;
    writeln!(writer, "Попробуйте изменить поисковый запрос или фильтр")?;
    Ok(())
}

fn format_counts(counts: &BTreeMap<String, usize>, empty_label: &str) -> String {
    if counts.is_empty() {
        return empty_label.to_string();
    }
    counts
        .iter()
        .map(|(label, count)| format!("{label}×{count}"))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Category, EntryId};

    fn entry(id: u32, title: &str, category: Category) -> BibliographyEntry {
        BibliographyEntry {
            id: EntryId(id),
            title: title.to_string(),
            category,
            icon: Some("BookOpen".to_string()),
            description: "Описание.".to_string(),
            features: vec!["Признак".to_string()],
            examples: vec!["Пример".to_string()],
        }
    }

    #[test]
    fn summary_counts_categories() {
        let a = entry(1, "Первый", Category::Temporal);
        let b = entry(2, "Второй", Category::Temporal);
        let c = entry(3, "Третий", Category::Typological);
        let stats = summarize_entries(&[&a, &b, &c]);
        assert_eq!(stats.total, 3);
        assert_eq!(stats.categories.get("Временная"), Some(&2));
        assert_eq!(stats.categories.get("Видовая"), Some(&1));
    }

    #[test]
    fn render_includes_cards_and_counts() {
        let a = entry(4, "Текущая библиография", Category::Temporal);
        let mut output = String::new();
        render_entries(&[&a], &mut output).expect("render");
        assert!(output.contains("total entries : 1"));
        assert!(output.contains("Временная×1"));
        assert!(output.contains("[1] Текущая библиография (id 4)"));
        assert!(output.contains("Характеристики:"));
        assert!(output.contains("• Пример"));
        assert!(!output.contains("Ничего не найдено"));
    }

    #[test]
    fn empty_result_renders_not_found_block() {
        let mut output = String::new();
        render_entries(&[], &mut output).expect("render");
        assert!(output.contains("Ничего не найдено"));
        assert!(output.contains("Попробуйте изменить поисковый запрос или фильтр"));
        assert!(!output.contains("total entries"));
    }
}
