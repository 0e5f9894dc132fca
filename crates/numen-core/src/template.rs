//! Note templates.
//!
//! Templates are Markdown files with frontmatter (`template: true`) stored
//! in their own directory. Five built-in templates are materialized on
//! first use; user templates live alongside them. `apply` substitutes
//! `{{title}}`, `{{date}}`, `{{time}}`, and `{{datetime}}`.

use crate::error::{CoreError, CoreResult};
use crate::frontmatter::{Document, NoteMeta};
use chrono::Local;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{info, warn};

/// A loaded template.
#[derive(Debug, Clone)]
pub struct Template {
    pub name: String,
    pub title: String,
    pub description: String,
    pub content: String,
}

/// (name, title, description, content) of the built-in templates.
const DEFAULT_TEMPLATES: &[(&str, &str, &str, &str)] = &[
    (
        "meeting",
        "Meeting Notes",
        "Template for recording meeting notes with agenda and action items.",
        "# {{title}}\n\n## Meeting Details\n- **Date:** {{date}}\n- **Time:** \n- **Location:** \n- **Attendees:** \n\n## Agenda\n1. \n2. \n3. \n\n## Notes\n\n## Action Items\n- [ ] \n- [ ] \n- [ ] \n\n## Next Steps\n\n",
    ),
    (
        "journal",
        "Daily Journal",
        "Template for daily journaling with prompts.",
        "# {{title}} - {{date}}\n\n## How I'm feeling today\n\n## Achievements\n- \n\n## Challenges\n- \n\n## Gratitude\n- \n\n## Tomorrow's Focus\n- \n\n",
    ),
    (
        "code_snippet",
        "Code Snippet",
        "Template for saving and documenting code snippets.",
        "# {{title}}\n\n## Purpose\n<!-- What does this code do? -->\n\n## Language\n<!-- Programming language -->\n\n## Dependencies\n<!-- Any required libraries or frameworks -->\n\n## Code\n```\n// Your code here\n```\n\n## Usage Example\n```\n// Example of how to use the code\n```\n\n## Notes\n<!-- Any additional information or context -->\n\n",
    ),
    (
        "calendar",
        "Event Planning",
        "Template for planning and organizing events.",
        "# {{title}}\n\n## Event Details\n- **Date:** {{date}}\n- **Time:** \n- **Location:** \n\n## Description\n\n## Agenda/Schedule\n- \n\n## Participants\n- \n\n## Resources Needed\n- \n\n## Notes\n\n",
    ),
    (
        "project",
        "Project Outline",
        "Template for outlining and tracking projects.",
        "# {{title}}\n\n## Project Overview\n\n## Objectives\n- \n\n## Timeline\n- Start Date: {{date}}\n- End Date: \n\n## Milestones\n- [ ] \n- [ ] \n- [ ] \n\n## Resources\n- \n\n## Notes\n\n",
    ),
];

/// Storage for templates.
pub struct TemplateStore {
    templates_dir: PathBuf,
}

impl TemplateStore {
    /// Create a template store, materializing missing built-ins.
    pub async fn new(templates_dir: PathBuf) -> CoreResult<Self> {
        fs::create_dir_all(&templates_dir).await?;
        let store = Self { templates_dir };
        store.ensure_defaults().await?;
        Ok(store)
    }

    /// Whether `name` is one of the built-in templates.
    pub fn is_builtin(name: &str) -> bool {
        DEFAULT_TEMPLATES.iter().any(|(n, ..)| *n == name)
    }

    /// Write any built-in template that does not exist yet.
    async fn ensure_defaults(&self) -> CoreResult<()> {
        for (name, title, description, content) in DEFAULT_TEMPLATES {
            let path = self.template_path(name);
            if !path.exists() {
                self.write_template(name, title, description, content)
                    .await?;
                info!(name, "created default template");
            }
        }
        Ok(())
    }

    /// List all templates, sorted by name.
    pub async fn list(&self) -> CoreResult<Vec<Template>> {
        let mut templates = Vec::new();
        let mut entries = fs::read_dir(&self.templates_dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if !path.extension().is_some_and(|e| e == "md") {
                continue;
            }
            let name = path
                .file_stem()
                .map(|s| s.to_string_lossy().to_string())
                .unwrap_or_default();
            match self.load(&name).await {
                Some(t) => templates.push(t),
                None => warn!(path = %path.display(), "skipping unreadable template"),
            }
        }
        templates.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(templates)
    }

    /// Load a template by name.
    pub async fn load(&self, name: &str) -> Option<Template> {
        let path = self.template_path(name);
        let text = fs::read_to_string(&path).await.ok()?;
        let doc = Document::parse(&text);
        Some(Template {
            name: name.to_string(),
            title: doc.meta.title.unwrap_or_else(|| name.to_string()),
            description: doc.meta.description.unwrap_or_default(),
            content: doc.body,
        })
    }

    /// Create (or overwrite) a user template.
    pub async fn create(
        &self,
        name: &str,
        title: &str,
        description: &str,
        content: &str,
    ) -> CoreResult<PathBuf> {
        let name: String = name
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
            .collect();
        self.write_template(&name, title, description, content)
            .await?;
        Ok(self.template_path(&name))
    }

    /// Delete a template. Built-ins require `force`.
    pub async fn delete(&self, name: &str, force: bool) -> CoreResult<()> {
        let path = self.template_path(name);
        if !path.exists() {
            return Err(CoreError::TemplateNotFound(name.to_string()));
        }
        if Self::is_builtin(name) && !force {
            return Err(CoreError::invalid_input(format!(
                "'{name}' is a default template, use --force to delete it"
            )));
        }
        fs::remove_file(&path).await?;
        info!(name, "deleted template");
        Ok(())
    }

    /// Reset a built-in template to its shipped content.
    pub async fn reset(&self, name: &str) -> CoreResult<()> {
        let Some((_, title, description, content)) =
            DEFAULT_TEMPLATES.iter().find(|(n, ..)| *n == name)
        else {
            return Err(CoreError::TemplateNotFound(name.to_string()));
        };
        self.write_template(name, title, description, content)
            .await?;
        info!(name, "reset template to default");
        Ok(())
    }

    /// Apply a template: substitute variables and return the content.
    pub async fn apply(&self, name: &str, title: &str) -> CoreResult<String> {
        let template = self
            .load(name)
            .await
            .ok_or_else(|| CoreError::TemplateNotFound(name.to_string()))?;

        let now = Local::now();
        Ok(template
            .content
            .replace("{{title}}", title)
            .replace("{{date}}", &now.format("%Y-%m-%d").to_string())
            .replace("{{time}}", &now.format("%H:%M").to_string())
            .replace("{{datetime}}", &now.format("%Y-%m-%d %H:%M").to_string()))
    }

    /// Path of the template file for `name`.
    pub fn template_path(&self, name: &str) -> PathBuf {
        self.templates_dir.join(format!("{name}.md"))
    }

    async fn write_template(
        &self,
        name: &str,
        title: &str,
        description: &str,
        content: &str,
    ) -> CoreResult<()> {
        let meta = NoteMeta {
            title: Some(title.to_string()),
            description: Some(description.to_string()),
            template: Some(true),
            ..Default::default()
        };
        let doc = Document::new(meta, content);
        fs::write(self.template_path(name), doc.render()).await?;
        Ok(())
    }
}

impl AsRef<Path> for TemplateStore {
    fn as_ref(&self) -> &Path {
        &self.templates_dir
    }
}
