//! Notes statistics command.
//!
//! Aggregates counts, tag usage, and word statistics across the whole
//! notes collection.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use numen_core::{Config, NoteStore};
use std::collections::HashMap;

/// Aggregated statistics over the notes collection.
#[derive(Debug, Default)]
pub struct NoteStats {
    pub total_notes: usize,
    pub oldest: Option<DateTime<Utc>>,
    pub newest: Option<DateTime<Utc>>,
    /// (year, month) to note count.
    pub notes_per_month: HashMap<(i32, u32), usize>,
    pub tag_counts: HashMap<String, usize>,
    pub word_counts: Vec<usize>,
}

pub async fn handle_stats(config: &Config) -> anyhow::Result<()> {
    let store = NoteStore::new(config.notes_dir()?).await?;
    let stats = aggregate_note_stats(&store).await?;

    if stats.total_notes == 0 {
        println!("No notes found.");
        return Ok(());
    }

    display_stats(&stats);
    Ok(())
}

/// Walk all notes and aggregate statistics.
pub async fn aggregate_note_stats(store: &NoteStore) -> anyhow::Result<NoteStats> {
    let mut stats = NoteStats::default();

    for path in store.list(None).await? {
        let doc = match store.load(&path).await {
            Ok(doc) => doc,
            Err(e) => {
                eprintln!("Error processing {}: {e}", path.display());
                continue;
            }
        };
        stats.total_notes += 1;

        if let Some(date) = doc.meta.date {
            stats.oldest = Some(stats.oldest.map_or(date, |d| d.min(date)));
            stats.newest = Some(stats.newest.map_or(date, |d| d.max(date)));
            *stats
                .notes_per_month
                .entry((date.year(), date.month()))
                .or_insert(0) += 1;
        }

        for tag in &doc.meta.tags {
            *stats.tag_counts.entry(tag.clone()).or_insert(0) += 1;
        }

        stats.word_counts.push(doc.body.split_whitespace().count());
    }

    Ok(stats)
}

/// Print aggregated statistics.
pub fn display_stats(stats: &NoteStats) {
    println!("Note Statistics");
    println!("Total notes: {}", stats.total_notes);

    if let (Some(oldest), Some(newest)) = (stats.oldest, stats.newest) {
        println!(
            "Date range: {} to {}",
            oldest.format("%Y-%m-%d"),
            newest.format("%Y-%m-%d")
        );

        println!();
        println!("Notes per month:");
        let mut months: Vec<_> = stats.notes_per_month.iter().collect();
        months.sort_by(|a, b| b.0.cmp(a.0));
        for (&(year, month), count) in months.into_iter().take(12) {
            let label = NaiveDate::from_ymd_opt(year, month, 1)
                .map(|d| d.format("%B %Y").to_string())
                .unwrap_or_else(|| format!("{year}-{month:02}"));
            println!("  {label:<16} {count:>5}");
        }
    }

    if !stats.tag_counts.is_empty() {
        println!();
        println!("Top tags:");
        let mut tags: Vec<_> = stats.tag_counts.iter().collect();
        tags.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
        for (tag, count) in tags.into_iter().take(10) {
            let percentage = (*count as f64 / stats.total_notes as f64) * 100.0;
            println!("  {tag:<20} {count:>5}  {percentage:>5.1}%");
        }
    }

    if !stats.word_counts.is_empty() {
        let mut sorted = stats.word_counts.clone();
        sorted.sort_unstable();
        let total: usize = sorted.iter().sum();
        let mean = total as f64 / sorted.len() as f64;
        let median = if sorted.len() % 2 == 0 {
            (sorted[sorted.len() / 2 - 1] + sorted[sorted.len() / 2]) as f64 / 2.0
        } else {
            sorted[sorted.len() / 2] as f64
        };

        println!();
        println!("Word count statistics:");
        println!("  Average: {mean:.0} words");
        println!("  Median: {median:.0} words");
        println!(
            "  Range: {} to {} words",
            sorted.first().copied().unwrap_or(0),
            sorted.last().copied().unwrap_or(0)
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_aggregate_counts_tags_and_words() {
        let dir = TempDir::new().unwrap();
        let store = NoteStore::new(dir.path().join("notes")).await.unwrap();

        store.create("One", Some("alpha beta gamma")).await.unwrap();
        store.create("Two", Some("alpha")).await.unwrap();
        store
            .update_tags("one", &["work".to_string()], &[])
            .await
            .unwrap();

        let stats = aggregate_note_stats(&store).await.unwrap();
        assert_eq!(stats.total_notes, 2);
        assert_eq!(stats.tag_counts.get("work"), Some(&1));
        assert_eq!(stats.word_counts.iter().sum::<usize>(), 4);
        assert!(stats.oldest.is_some());
        assert_eq!(stats.notes_per_month.values().sum::<usize>(), 2);
    }

    #[tokio::test]
    async fn test_aggregate_empty_collection() {
        let dir = TempDir::new().unwrap();
        let store = NoteStore::new(dir.path().join("notes")).await.unwrap();
        let stats = aggregate_note_stats(&store).await.unwrap();
        assert_eq!(stats.total_notes, 0);
        assert!(stats.oldest.is_none());
    }
}
