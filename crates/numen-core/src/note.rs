//! Note storage.
//!
//! Notes are Markdown files with YAML frontmatter living flat in a single
//! directory. A note's stable identity for version history is its file
//! stem (`note_name`). Identifiers supplied by the user are resolved
//! loosely: absolute path, exact filename, name without extension, or a
//! substring match ranked by modification time.

use crate::error::{CoreError, CoreResult};
use crate::frontmatter::{Document, NoteMeta};
use chrono::Utc;
use numen_util::text;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info, warn};

/// Heading appended above AI output when the original text is preserved.
const AI_SECTION_HEADING: &str = "## AI-Generated Content";
const AI_SUBSECTION_HEADING: &str = "### AI-Generated Content";

/// Derive the stable note name (file stem) from a note path.
pub fn note_name_of(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default()
}

/// Storage for notes.
pub struct NoteStore {
    /// Directory holding the `.md` note files.
    notes_dir: PathBuf,
}

impl NoteStore {
    /// Create a note store over the given directory.
    pub async fn new(notes_dir: PathBuf) -> CoreResult<Self> {
        fs::create_dir_all(&notes_dir).await?;
        Ok(Self { notes_dir })
    }

    /// The directory holding the notes.
    pub fn notes_dir(&self) -> &Path {
        &self.notes_dir
    }

    /// Create a new note with the given title and optional initial body.
    ///
    /// The filename is `<YYYY-MM-DD>-<slug>.md`; the frontmatter records
    /// title, creation date, and an empty tag list.
    pub async fn create(&self, title: &str, body: Option<&str>) -> CoreResult<PathBuf> {
        let now = Utc::now();
        let filename = format!("{}-{}.md", now.format("%Y-%m-%d"), slugify(title));
        let note_path = self.notes_dir.join(filename);

        let meta = NoteMeta {
            title: Some(title.to_string()),
            date: Some(now),
            tags: Vec::new(),
            ..Default::default()
        };
        let doc = Document::new(meta, body.unwrap_or_default());
        fs::write(&note_path, doc.render()).await?;

        info!(path = %note_path.display(), "created note");
        Ok(note_path)
    }

    /// List all notes, optionally filtered by tag.
    pub async fn list(&self, tag: Option<&str>) -> CoreResult<Vec<PathBuf>> {
        let mut notes = self.all_note_paths().await?;
        notes.sort();

        let Some(tag) = tag else {
            return Ok(notes);
        };

        let mut filtered = Vec::new();
        for path in notes {
            let doc = self.load(&path).await?;
            if doc.meta.tags.iter().any(|t| t == tag) {
                filtered.push(path);
            }
        }
        Ok(filtered)
    }

    /// Search for notes whose content contains the query, case-insensitive.
    pub async fn search(&self, query: &str) -> CoreResult<Vec<PathBuf>> {
        let query = query.to_lowercase();
        let mut matching = Vec::new();
        for path in self.all_note_paths().await? {
            let content = fs::read_to_string(&path).await?;
            if content.to_lowercase().contains(&query) {
                matching.push(path);
            }
        }
        matching.sort();
        Ok(matching)
    }

    /// Resolve a note identifier to a file path.
    ///
    /// Tried in order: absolute path, exact filename in the notes dir,
    /// name with `.md` appended, then substring match over filenames with
    /// the most recently modified candidate winning.
    pub async fn resolve(&self, identifier: &str) -> Option<PathBuf> {
        let as_path = Path::new(identifier);
        if as_path.is_absolute() {
            return as_path.exists().then(|| as_path.to_path_buf());
        }

        let direct = self.notes_dir.join(identifier);
        if direct.exists() {
            return Some(direct);
        }

        if !identifier.ends_with(".md") {
            let with_ext = self.notes_dir.join(format!("{identifier}.md"));
            if with_ext.exists() {
                return Some(with_ext);
            }
        }

        let mut candidates = Vec::new();
        for path in self.all_note_paths().await.ok()? {
            let name = path.file_name()?.to_string_lossy().to_string();
            if name.contains(identifier) {
                let mtime = path
                    .metadata()
                    .and_then(|m| m.modified())
                    .unwrap_or(std::time::SystemTime::UNIX_EPOCH);
                candidates.push((mtime, path));
            }
        }
        candidates.sort_by(|a, b| b.0.cmp(&a.0));

        let found = candidates.into_iter().next().map(|(_, p)| p);
        if found.is_none() {
            debug!(identifier, "no note matched identifier");
        }
        found
    }

    /// Load and parse a note.
    pub async fn load(&self, path: &Path) -> CoreResult<Document> {
        let content = fs::read_to_string(path).await?;
        Ok(Document::parse(&content))
    }

    /// Add and remove tags on a note. The tag list is kept sorted and
    /// duplicate-free.
    pub async fn update_tags(
        &self,
        identifier: &str,
        add: &[String],
        remove: &[String],
    ) -> CoreResult<PathBuf> {
        let path = self
            .resolve(identifier)
            .await
            .ok_or_else(|| CoreError::note_not_found(identifier))?;

        let mut doc = self.load(&path).await?;
        let mut tags: Vec<String> = doc.meta.tags;
        for tag in add {
            if !tags.contains(tag) {
                tags.push(tag.clone());
            }
        }
        tags.retain(|t| !remove.contains(t));
        tags.sort();
        doc.meta.tags = tags;

        fs::write(&path, doc.render()).await?;
        Ok(path)
    }

    /// Get the body of a note, or one 0-indexed `#`-heading section of it.
    pub async fn section_content(
        &self,
        identifier: &str,
        section: Option<usize>,
    ) -> CoreResult<String> {
        let path = self
            .resolve(identifier)
            .await
            .ok_or_else(|| CoreError::note_not_found(identifier))?;
        let doc = self.load(&path).await?;

        let Some(index) = section else {
            return Ok(doc.body);
        };

        let sections = text::split_sections(&doc.body);
        if sections.is_empty() {
            return Err(CoreError::invalid_input("note is empty, nothing to process"));
        }
        sections
            .get(index)
            .cloned()
            .ok_or(CoreError::SectionNotFound {
                index,
                count: sections.len(),
            })
    }

    /// Replace or append content on a note, whole-body or per-section.
    ///
    /// With `preserve_original` the new content is appended under an
    /// "AI-Generated Content" heading instead of replacing the text.
    pub async fn update_content(
        &self,
        identifier: &str,
        new_content: &str,
        section: Option<usize>,
        preserve_original: bool,
    ) -> CoreResult<()> {
        let path = self
            .resolve(identifier)
            .await
            .ok_or_else(|| CoreError::note_not_found(identifier))?;
        let mut doc = self.load(&path).await?;

        match section {
            None => {
                doc.body = if preserve_original {
                    format!("{}\n\n{AI_SECTION_HEADING}\n\n{new_content}", doc.body)
                } else {
                    new_content.to_string()
                };
            }
            Some(index) => {
                let mut sections = text::split_sections(&doc.body);
                if sections.is_empty() {
                    return Err(CoreError::invalid_input("note is empty, cannot update"));
                }
                if index >= sections.len() {
                    return Err(CoreError::SectionNotFound {
                        index,
                        count: sections.len(),
                    });
                }
                sections[index] = if preserve_original {
                    format!(
                        "{}\n\n{AI_SUBSECTION_HEADING}\n\n{new_content}",
                        sections[index]
                    )
                } else {
                    new_content.to_string()
                };
                doc.body = sections.join("\n\n");
            }
        }

        fs::write(&path, doc.render()).await?;
        Ok(())
    }

    /// Delete a note.
    pub async fn remove(&self, path: &Path) -> CoreResult<()> {
        fs::remove_file(path).await?;
        info!(path = %path.display(), "deleted note");
        Ok(())
    }

    /// All `.md` files in the notes directory.
    async fn all_note_paths(&self) -> CoreResult<Vec<PathBuf>> {
        fs::create_dir_all(&self.notes_dir).await?;
        let mut notes = Vec::new();
        let mut entries = fs::read_dir(&self.notes_dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().is_some_and(|e| e == "md") {
                notes.push(path);
            } else if path.is_file() {
                warn!(path = %path.display(), "ignoring non-Markdown file in notes dir");
            }
        }
        Ok(notes)
    }
}

/// Turn a title into a filename-safe slug.
fn slugify(title: &str) -> String {
    title
        .to_lowercase()
        .replace(' ', "-")
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '-'
            }
        })
        .collect()
}
