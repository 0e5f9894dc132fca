//! Version storage, reference resolution, and restore.

use crate::error::{HistoryError, HistoryResult};
use crate::version::{VersionId, VersionMeta, VersionRef, BACKUP_MESSAGE, DEFAULT_MESSAGE};
use chrono::Utc;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, error, info, warn};

/// Storage for note versions.
///
/// Versions are stored as file pairs in a per-note subdirectory keyed by
/// the note's file stem:
///
/// ```text
/// history_root/
///   <note_name>/
///     <version_id>.md      # raw content at snapshot time
///     <version_id>.json    # {version_id, timestamp, message, note_path}
/// ```
///
/// Failure discipline per operation: [`save`](Self::save) is the only
/// operation that returns an error; resolution and content reads return
/// `Option`; [`restore`](Self::restore) and
/// [`remove_all`](Self::remove_all) report success as a boolean and log
/// the cause.
pub struct HistoryStore {
    /// Root directory holding all notes' version subdirectories.
    history_root: PathBuf,
}

impl HistoryStore {
    /// Create a history store rooted at `history_root`, creating the
    /// directory if needed.
    pub async fn new(history_root: PathBuf) -> HistoryResult<Self> {
        fs::create_dir_all(&history_root).await?;
        Ok(Self { history_root })
    }

    /// Save the current state of a note as a new version.
    ///
    /// Returns [`HistoryError::NoteNotFound`] when the live note file
    /// does not exist. The version ID is derived from the current time at
    /// second resolution; a second save within the same second for the
    /// same note overwrites the first.
    pub async fn save(&self, note_path: &Path, message: Option<&str>) -> HistoryResult<VersionId> {
        if !note_path.exists() {
            return Err(HistoryError::note_not_found(note_path));
        }

        let content = fs::read_to_string(note_path).await?;
        let version_id = VersionId::now();
        let note_name = note_name_of(note_path);

        self.write_version(
            &note_name,
            &version_id,
            &content,
            message.unwrap_or(DEFAULT_MESSAGE),
            note_path,
        )
        .await?;

        info!(note = %note_name, version = %version_id, "saved version");
        Ok(version_id)
    }

    /// List all versions of a note, newest first (version_id descending).
    ///
    /// Absence of history is not an error: the result is simply empty.
    /// Unreadable metadata entries are logged and skipped.
    pub async fn list(&self, note_path: &Path) -> Vec<VersionMeta> {
        self.list_by_name(&note_name_of(note_path)).await
    }

    pub(crate) async fn list_by_name(&self, note_name: &str) -> Vec<VersionMeta> {
        let note_dir = self.note_dir(note_name);
        let mut entries = match fs::read_dir(&note_dir).await {
            Ok(entries) => entries,
            Err(_) => return Vec::new(),
        };

        let mut versions = Vec::new();
        loop {
            let entry = match entries.next_entry().await {
                Ok(Some(entry)) => entry,
                Ok(None) => break,
                Err(e) => {
                    warn!(note = note_name, error = %e, "failed to enumerate history");
                    break;
                }
            };
            let path = entry.path();
            if !path.extension().is_some_and(|e| e == "json") {
                continue;
            }
            match read_meta(&path).await {
                Ok(meta) => versions.push(meta),
                Err(e) => warn!(path = %path.display(), error = %e, "skipping unreadable version metadata"),
            }
        }

        versions.sort_by(|a, b| b.version_id.cmp(&a.version_id));
        versions
    }

    /// Read the stored content of an exact version. `None` when the
    /// content artifact is missing.
    pub async fn get_content(&self, note_name: &str, version_id: &VersionId) -> Option<String> {
        let path = self.content_path(note_name, version_id);
        match fs::read_to_string(&path).await {
            Ok(content) => Some(content),
            Err(_) => {
                debug!(note = note_name, version = %version_id, "version content not found");
                None
            }
        }
    }

    /// Resolve a version reference against a note's collection.
    ///
    /// String references are trusted and returned unchanged with no
    /// existence check. For indices, 0 addresses the oldest version and
    /// counts up; negative indices address the newest-first list from its
    /// end, so with backup versions present (which sort before timestamp
    /// IDs) `-1` names the last version in storage order, not necessarily
    /// the newest by timestamp. Out-of-range indices resolve to `None`.
    pub async fn resolve(&self, note_path: &Path, version_ref: &VersionRef) -> Option<VersionId> {
        self.resolve_by_name(&note_name_of(note_path), version_ref)
            .await
    }

    pub(crate) async fn resolve_by_name(
        &self,
        note_name: &str,
        version_ref: &VersionRef,
    ) -> Option<VersionId> {
        let index = match version_ref {
            VersionRef::ById(id) => return Some(VersionId::from(id.as_str())),
            VersionRef::ByIndex(index) => *index,
        };

        // Newest-first; positive indices go through the reversed view.
        let versions = self.list_by_name(note_name).await;
        let n = versions.len() as i64;
        if n == 0 {
            return None;
        }

        let position = if index >= 0 {
            if index >= n {
                return None;
            }
            n - 1 - index
        } else {
            // Bound check without negating index, which overflows for
            // i64::MIN.
            if index < -n {
                return None;
            }
            n + index
        };

        Some(versions[position as usize].version_id.clone())
    }

    /// Restore a note to a previous version.
    ///
    /// The pre-restore live content is first snapshotted as a
    /// `backup_`-prefixed version, then the stored content is copied over
    /// the live file byte for byte. Returns `false` without touching the
    /// live note when the reference does not resolve or the content
    /// artifact is missing; IO failures abort and are logged.
    pub async fn restore(&self, note_path: &Path, version_ref: &VersionRef) -> bool {
        let note_name = note_name_of(note_path);

        let Some(version_id) = self.resolve_by_name(&note_name, version_ref).await else {
            error!(note = %note_name, version = %version_ref, "version not found");
            return false;
        };

        let version_path = self.content_path(&note_name, &version_id);
        if !version_path.exists() {
            error!(note = %note_name, version = %version_id, "version not found");
            return false;
        }

        if let Err(e) = self.save_backup(note_path, &note_name).await {
            error!(note = %note_name, error = %e, "failed to back up before restore");
            return false;
        }

        if let Err(e) = fs::copy(&version_path, note_path).await {
            error!(note = %note_name, version = %version_id, error = %e, "failed to restore version");
            return false;
        }

        info!(note = %note_name, version = %version_id, "restored version");
        true
    }

    /// Remove all version history for a note.
    ///
    /// Succeeds as a no-op when no history exists; returns `false` only
    /// when deletion itself fails.
    pub async fn remove_all(&self, note_path: &Path) -> bool {
        let note_name = note_name_of(note_path);
        let note_dir = self.note_dir(&note_name);

        if !note_dir.exists() {
            debug!(note = %note_name, "no history to remove");
            return true;
        }

        match fs::remove_dir_all(&note_dir).await {
            Ok(()) => {
                info!(note = %note_name, "removed history");
                true
            }
            Err(e) => {
                error!(note = %note_name, error = %e, "failed to remove history");
                false
            }
        }
    }

    /// Snapshot the live content under a `backup_` ID.
    ///
    /// Bypasses [`save`](Self::save) to avoid recursive history
    /// semantics; a missing live file makes this a no-op.
    async fn save_backup(&self, note_path: &Path, note_name: &str) -> HistoryResult<()> {
        if !note_path.exists() {
            return Ok(());
        }

        let content = fs::read_to_string(note_path).await?;
        let backup_id = VersionId::backup_now();
        self.write_version(note_name, &backup_id, &content, BACKUP_MESSAGE, note_path)
            .await?;

        debug!(note = note_name, version = %backup_id, "saved pre-restore backup");
        Ok(())
    }

    /// Write the content/metadata artifact pair for one version.
    pub(crate) async fn write_version(
        &self,
        note_name: &str,
        version_id: &VersionId,
        content: &str,
        message: &str,
        note_path: &Path,
    ) -> HistoryResult<()> {
        let note_dir = self.note_dir(note_name);
        fs::create_dir_all(&note_dir).await?;

        fs::write(self.content_path(note_name, version_id), content).await?;

        let meta = VersionMeta {
            version_id: version_id.clone(),
            timestamp: Utc::now(),
            message: message.to_string(),
            note_path: note_path.to_path_buf(),
        };
        let json = serde_json::to_string_pretty(&meta)?;
        fs::write(self.meta_path(note_name, version_id), json).await?;

        Ok(())
    }

    fn note_dir(&self, note_name: &str) -> PathBuf {
        self.history_root.join(note_name)
    }

    fn content_path(&self, note_name: &str, version_id: &VersionId) -> PathBuf {
        self.note_dir(note_name).join(format!("{version_id}.md"))
    }

    fn meta_path(&self, note_name: &str, version_id: &VersionId) -> PathBuf {
        self.note_dir(note_name).join(format!("{version_id}.json"))
    }
}

/// Stable per-note history key: the note's file stem.
fn note_name_of(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default()
}

async fn read_meta(path: &Path) -> HistoryResult<VersionMeta> {
    let json = fs::read_to_string(path).await?;
    Ok(serde_json::from_str(&json)?)
}
