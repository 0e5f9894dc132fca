//! Version history for numen notes.
//!
//! This crate provides per-note snapshot storage that enables:
//! - Saving immutable versions of a note's full content
//! - Restoring a note to any previous version, with an automatic backup
//!   of the pre-restore state
//! - Diffing two versions as unified-diff lines
//!
//! Versions are addressed either by ID or by position: index 0 is the
//! oldest version, negative indices count back from the newest-first
//! listing.
//!
//! # Example
//!
//! ```no_run
//! use numen_history::{HistoryStore, VersionRef};
//! use std::path::{Path, PathBuf};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = HistoryStore::new(PathBuf::from("/data/numen/history")).await?;
//! let note = Path::new("/data/numen/notes/2025-03-01-ideas.md");
//!
//! // Save a version before editing
//! let id = store.save(note, Some("before rewrite")).await?;
//!
//! // ... edit the note ...
//!
//! // Restore if needed (takes an automatic backup first)
//! store.restore(note, &VersionRef::ById(id.to_string())).await;
//! # Ok(())
//! # }
//! ```

mod diff;
mod error;
mod store;
mod version;

pub use error::{HistoryError, HistoryResult};
pub use store::HistoryStore;
pub use version::{VersionId, VersionMeta, VersionRef, BACKUP_MESSAGE, DEFAULT_MESSAGE};
