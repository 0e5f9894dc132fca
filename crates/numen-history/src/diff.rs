//! Unified diffs between stored versions.

use crate::store::HistoryStore;
use crate::version::{VersionId, VersionRef};
use similar::TextDiff;
use tracing::error;

const COMPARE_ERROR: &str = "Error: One or both versions not found";

impl HistoryStore {
    /// Compare two versions of a note as unified-diff lines.
    ///
    /// Both references are resolved against the note's collection, then
    /// the stored contents are diffed with three lines of context and
    /// `Version <id>` headers. Identical versions produce an empty
    /// result. Any failure to resolve a reference or read a version's
    /// content is normalized to a single `Error:` line so callers can
    /// print the result either way.
    pub async fn compare(
        &self,
        note_name: &str,
        from: &VersionRef,
        to: &VersionRef,
    ) -> Vec<String> {
        let (Some(from_id), Some(to_id)) = (
            self.resolve_by_name(note_name, from).await,
            self.resolve_by_name(note_name, to).await,
        ) else {
            error!(note = note_name, %from, %to, "cannot compare: unresolved version reference");
            return vec![COMPARE_ERROR.to_string()];
        };

        let (Some(old), Some(new)) = (
            self.get_content(note_name, &from_id).await,
            self.get_content(note_name, &to_id).await,
        ) else {
            error!(note = note_name, %from_id, %to_id, "cannot compare: version content missing");
            return vec![COMPARE_ERROR.to_string()];
        };

        unified_lines(&old, &new, &from_id, &to_id)
    }
}

fn unified_lines(old: &str, new: &str, from_id: &VersionId, to_id: &VersionId) -> Vec<String> {
    let diff = TextDiff::from_lines(old, new);
    diff.unified_diff()
        .context_radius(3)
        .header(
            &format!("Version {from_id}"),
            &format!("Version {to_id}"),
        )
        .to_string()
        .lines()
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    async fn store_with_versions(pairs: &[(&str, &str)]) -> (TempDir, HistoryStore) {
        let dir = TempDir::new().unwrap();
        let store = HistoryStore::new(dir.path().join("history")).await.unwrap();
        for (id, content) in pairs {
            store
                .write_version(
                    "demo",
                    &VersionId::from(*id),
                    content,
                    crate::version::DEFAULT_MESSAGE,
                    &PathBuf::from("/notes/demo.md"),
                )
                .await
                .unwrap();
        }
        (dir, store)
    }

    #[tokio::test]
    async fn test_compare_produces_unified_diff() {
        let (_dir, store) = store_with_versions(&[
            ("20250301100000", "a\nb\n"),
            ("20250301100001", "a\nc\n"),
        ])
        .await;

        let lines = store
            .compare("demo", &VersionRef::ByIndex(0), &VersionRef::ByIndex(1))
            .await;

        assert!(lines[0].contains("Version 20250301100000"));
        assert!(lines[1].contains("Version 20250301100001"));
        assert!(lines.iter().any(|l| l == "-b"));
        assert!(lines.iter().any(|l| l == "+c"));
    }

    #[tokio::test]
    async fn test_compare_identical_versions() {
        let (_dir, store) = store_with_versions(&[
            ("20250301100000", "same\n"),
            ("20250301100001", "same\n"),
        ])
        .await;

        let lines = store
            .compare("demo", &VersionRef::ByIndex(0), &VersionRef::ByIndex(1))
            .await;

        assert!(!lines
            .iter()
            .any(|l| l.starts_with('-') && !l.starts_with("---")));
        assert!(!lines
            .iter()
            .any(|l| l.starts_with('+') && !l.starts_with("+++")));
    }

    #[tokio::test]
    async fn test_compare_unresolved_reference() {
        let (_dir, store) = store_with_versions(&[("20250301100000", "a\n")]).await;

        let lines = store
            .compare("demo", &VersionRef::ByIndex(0), &VersionRef::ByIndex(5))
            .await;
        assert_eq!(lines, vec![COMPARE_ERROR.to_string()]);
    }

    #[tokio::test]
    async fn test_compare_missing_content() {
        let (_dir, store) = store_with_versions(&[("20250301100000", "a\n")]).await;

        // ById resolution is unchecked, so a ghost ID fails at the read.
        let ghost = VersionRef::ById("20990101000000".to_string());
        let lines = store
            .compare("demo", &VersionRef::ByIndex(0), &ghost)
            .await;
        assert_eq!(lines, vec![COMPARE_ERROR.to_string()]);
    }
}
