//! YAML frontmatter parsing and rendering.
//!
//! Notes are Markdown files with a metadata header delimited by `---`
//! lines. Parsing is tolerant: a missing or unparseable header yields a
//! default-metadata document with the full text as body.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Metadata header of a note or template.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct NoteMeta {
    /// Note title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Creation timestamp.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<DateTime<Utc>>,

    /// Tags for filtering.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    /// Template description (templates only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Marks a file as a template.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<bool>,
}

/// A parsed note: metadata header plus Markdown body.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    pub meta: NoteMeta,
    pub body: String,
}

impl Document {
    /// Create a document with the given metadata and body.
    pub fn new(meta: NoteMeta, body: impl Into<String>) -> Self {
        Self {
            meta,
            body: body.into(),
        }
    }

    /// Parse text into metadata and body.
    pub fn parse(text: &str) -> Self {
        let Some(rest) = text.strip_prefix("---\n").or_else(|| {
            text.strip_prefix("---\r\n")
        }) else {
            return Self {
                meta: NoteMeta::default(),
                body: text.to_string(),
            };
        };

        let Some((header, body)) = split_closing_delimiter(rest) else {
            return Self {
                meta: NoteMeta::default(),
                body: text.to_string(),
            };
        };

        match serde_yaml::from_str::<NoteMeta>(header) {
            Ok(meta) => Self {
                meta,
                body: body.to_string(),
            },
            Err(e) => {
                warn!(error = %e, "unparseable frontmatter, treating file as plain Markdown");
                Self {
                    meta: NoteMeta::default(),
                    body: text.to_string(),
                }
            }
        }
    }

    /// Render the document back to text with a frontmatter header.
    pub fn render(&self) -> String {
        let yaml = serde_yaml::to_string(&self.meta).unwrap_or_default();
        format!("---\n{yaml}---\n\n{}", self.body)
    }
}

/// Split `rest` (text after the opening `---` line) at the closing `---`.
fn split_closing_delimiter(rest: &str) -> Option<(&str, &str)> {
    if let Some(idx) = rest.find("\n---\n") {
        let body = &rest[idx + 5..];
        return Some((&rest[..idx + 1], body.strip_prefix('\n').unwrap_or(body)));
    }
    if let Some(stripped) = rest.strip_suffix("\n---") {
        return Some((stripped, ""));
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_with_frontmatter() {
        let text = "---\ntitle: Test Note\ntags:\n- a\n- b\n---\n\n# Body\n";
        let doc = Document::parse(text);
        assert_eq!(doc.meta.title.as_deref(), Some("Test Note"));
        assert_eq!(doc.meta.tags, vec!["a", "b"]);
        assert_eq!(doc.body, "# Body\n");
    }

    #[test]
    fn test_parse_without_frontmatter() {
        let text = "# Just Markdown\n\nno header here\n";
        let doc = Document::parse(text);
        assert_eq!(doc.meta, NoteMeta::default());
        assert_eq!(doc.body, text);
    }

    #[test]
    fn test_parse_invalid_yaml_falls_back() {
        let text = "---\n: [ not yaml\n---\n\nbody\n";
        let doc = Document::parse(text);
        assert_eq!(doc.meta, NoteMeta::default());
        assert_eq!(doc.body, text);
    }

    #[test]
    fn test_render_roundtrip() {
        let meta = NoteMeta {
            title: Some("Round Trip".to_string()),
            date: Some("2025-03-01T10:00:00Z".parse().unwrap()),
            tags: vec!["x".to_string()],
            ..Default::default()
        };
        let doc = Document::new(meta, "content line\n");
        let parsed = Document::parse(&doc.render());
        assert_eq!(parsed.meta, doc.meta);
        assert_eq!(parsed.body, doc.body);
    }

    #[test]
    fn test_empty_tags_not_serialized() {
        let doc = Document::new(NoteMeta::default(), "x");
        assert!(!doc.render().contains("tags"));
    }
}
