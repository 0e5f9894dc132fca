//! Version data structures.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Message recorded when a save carries no annotation.
pub const DEFAULT_MESSAGE: &str = "Version saved";

/// Message recorded on the automatic snapshot taken before a restore.
pub const BACKUP_MESSAGE: &str = "Automatic backup before restore";

/// Prefix marking versions created by the restore engine's backup step.
const BACKUP_PREFIX: &str = "backup_";

/// Identifier for a version within one note's collection.
///
/// Regular versions use the creation timestamp at second resolution
/// (`YYYYMMDDHHMMSS`), so IDs sort lexicographically in creation order.
/// Automatic pre-restore backups carry a `backup_` prefix.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct VersionId(String);

impl VersionId {
    /// Create an ID from the current time.
    ///
    /// Two saves within the same clock second for the same note produce
    /// the same ID and the later one overwrites the earlier silently.
    pub fn now() -> Self {
        Self(Utc::now().format("%Y%m%d%H%M%S").to_string())
    }

    /// Create a backup ID from the current time.
    pub fn backup_now() -> Self {
        Self(format!(
            "{BACKUP_PREFIX}{}",
            Utc::now().format("%Y%m%d%H%M%S")
        ))
    }

    /// Whether this version was created by the restore engine.
    pub fn is_backup(&self) -> bool {
        self.0.starts_with(BACKUP_PREFIX)
    }

    /// Get the ID as a string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for VersionId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for VersionId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl std::fmt::Display for VersionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Metadata stored next to each version's content artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VersionMeta {
    /// The version's identifier.
    pub version_id: VersionId,

    /// Creation instant; source of truth for display, decoupled from the
    /// ID's string format.
    pub timestamp: DateTime<Utc>,

    /// Free-text annotation.
    pub message: String,

    /// The live note file this version was taken from.
    pub note_path: PathBuf,
}

/// A reference to a version: an exact ID or a positional index.
///
/// Index 0 is the oldest surviving version; negative indices address the
/// newest-first listing from its end (-1 is the most recently stored).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionRef {
    ById(String),
    ByIndex(i64),
}

impl VersionRef {
    /// Parse a user-supplied reference: integer text becomes an index,
    /// anything else is taken as a version ID. A 14-digit string is
    /// always an ID, since that is the timestamp ID format.
    pub fn parse(s: &str) -> Self {
        if s.len() == 14 && s.chars().all(|c| c.is_ascii_digit()) {
            return Self::ById(s.to_string());
        }
        match s.parse::<i64>() {
            Ok(index) => Self::ByIndex(index),
            Err(_) => Self::ById(s.to_string()),
        }
    }
}

impl From<i64> for VersionRef {
    fn from(index: i64) -> Self {
        Self::ByIndex(index)
    }
}

impl From<&str> for VersionRef {
    fn from(id: &str) -> Self {
        Self::ById(id.to_string())
    }
}

impl std::fmt::Display for VersionRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ById(id) => write!(f, "{id}"),
            Self::ByIndex(index) => write!(f, "{index}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_formats() {
        let id = VersionId::now();
        assert_eq!(id.as_str().len(), 14);
        assert!(id.as_str().chars().all(|c| c.is_ascii_digit()));
        assert!(!id.is_backup());

        let backup = VersionId::backup_now();
        assert!(backup.is_backup());
        assert!(backup.as_str().starts_with("backup_"));
    }

    #[test]
    fn test_ids_sort_in_creation_order() {
        let older = VersionId::from("20250301100000");
        let newer = VersionId::from("20250301100001");
        assert!(older < newer);
    }

    #[test]
    fn test_ref_parse() {
        assert_eq!(VersionRef::parse("3"), VersionRef::ByIndex(3));
        assert_eq!(VersionRef::parse("-1"), VersionRef::ByIndex(-1));
        assert_eq!(
            VersionRef::parse("20250301100000"),
            VersionRef::ById("20250301100000".to_string())
        );
        assert_eq!(
            VersionRef::parse("backup_20250301100000"),
            VersionRef::ById("backup_20250301100000".to_string())
        );
    }

    #[test]
    fn test_meta_json_shape() {
        let meta = VersionMeta {
            version_id: VersionId::from("20250301100000"),
            timestamp: "2025-03-01T10:00:00Z".parse().unwrap(),
            message: DEFAULT_MESSAGE.to_string(),
            note_path: PathBuf::from("/notes/demo.md"),
        };
        let json = serde_json::to_value(&meta).unwrap();
        assert_eq!(json["version_id"], "20250301100000");
        assert_eq!(json["message"], "Version saved");
        assert_eq!(json["note_path"], "/notes/demo.md");
        assert!(json["timestamp"].as_str().unwrap().starts_with("2025-03-01T10:00:00"));
    }
}
