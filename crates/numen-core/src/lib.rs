//! Core note management for numen.
//!
//! This crate provides:
//! - Configuration loading and saving
//! - Note storage: create, resolve, list, search, tag, and edit Markdown
//!   notes with YAML frontmatter headers
//! - Note templates with variable substitution

pub mod config;
pub mod error;
pub mod frontmatter;
pub mod note;
pub mod template;

pub use config::{AiConfig, Config, EditorConfig, PathsConfig};
pub use error::{CoreError, CoreResult};
pub use frontmatter::{Document, NoteMeta};
pub use note::{note_name_of, NoteStore};
pub use template::{Template, TemplateStore};
