//! Note commands: new, list, edit, view, search, tag, remove.

use numen_core::{note_name_of, Config, NoteStore, TemplateStore};
use std::path::{Path, PathBuf};

pub async fn handle_new(
    config: &Config,
    title: &str,
    template: Option<&str>,
    no_edit: bool,
) -> anyhow::Result<()> {
    let store = NoteStore::new(config.notes_dir()?).await?;

    let body = match template {
        Some(name) => {
            let templates = TemplateStore::new(config.templates_dir()?).await?;
            Some(templates.apply(name, title).await?)
        }
        None => None,
    };

    let note_path = store.create(title, body.as_deref()).await?;
    println!("Created note at: {}", note_path.display());

    if !no_edit {
        super::open_editor(config, &note_path)?;
    }
    Ok(())
}

pub async fn handle_list(config: &Config, tag: Option<&str>) -> anyhow::Result<()> {
    let store = NoteStore::new(config.notes_dir()?).await?;
    let notes = store.list(tag).await?;

    if notes.is_empty() {
        match tag {
            Some(tag) => println!("No notes found with tag: {tag}"),
            None => println!("No notes found."),
        }
        return Ok(());
    }

    display_notes(&store, &notes).await;
    Ok(())
}

pub async fn handle_edit(config: &Config, note: &str) -> anyhow::Result<()> {
    let store = NoteStore::new(config.notes_dir()?).await?;
    let Some(path) = store.resolve(note).await else {
        eprintln!("Note not found: {note}");
        return Ok(());
    };
    super::open_editor(config, &path)
}

pub async fn handle_view(config: &Config, note: &str, raw: bool) -> anyhow::Result<()> {
    let store = NoteStore::new(config.notes_dir()?).await?;
    let Some(path) = store.resolve(note).await else {
        eprintln!("Note not found: {note}");
        return Ok(());
    };

    let doc = store.load(&path).await?;

    if raw {
        println!("File: {}", path.display());
        println!("{}", doc.render());
        return Ok(());
    }

    let title = doc
        .meta
        .title
        .clone()
        .unwrap_or_else(|| note_name_of(&path));
    println!("{title}");
    if let Some(date) = doc.meta.date {
        println!("Date: {}", date.format("%Y-%m-%d %H:%M"));
    }
    if !doc.meta.tags.is_empty() {
        let tags: Vec<String> = doc.meta.tags.iter().map(|t| format!("#{t}")).collect();
        println!("Tags: {}", tags.join(", "));
    }
    println!("---");
    if doc.body.trim().is_empty() {
        println!("(no content)");
    } else {
        println!("{}", doc.body);
    }
    Ok(())
}

pub async fn handle_search(config: &Config, query: &str) -> anyhow::Result<()> {
    let store = NoteStore::new(config.notes_dir()?).await?;
    let notes = store.search(query).await?;

    if notes.is_empty() {
        println!("No notes found containing: {query}");
        return Ok(());
    }

    println!("Found {} notes containing '{query}':", notes.len());
    display_notes(&store, &notes).await;
    Ok(())
}

pub async fn handle_tag(config: &Config, note: &str, tags: &[String]) -> anyhow::Result<()> {
    let mut add = Vec::new();
    let mut remove = Vec::new();
    for tag in tags {
        match tag.strip_prefix('+') {
            Some(name) => add.push(name.to_string()),
            None => remove.push(tag.clone()),
        }
    }

    let store = NoteStore::new(config.notes_dir()?).await?;
    match store.update_tags(note, &add, &remove).await {
        Ok(_) => {
            if !add.is_empty() {
                println!("Added tags: {}", add.join(", "));
            }
            if !remove.is_empty() {
                println!("Removed tags: {}", remove.join(", "));
            }
            Ok(())
        }
        Err(e) => {
            eprintln!("Failed to update tags for note: {note} ({e})");
            Ok(())
        }
    }
}

pub async fn handle_remove(config: &Config, note: &str, force: bool) -> anyhow::Result<()> {
    let store = NoteStore::new(config.notes_dir()?).await?;
    let Some(path) = store.resolve(note).await else {
        eprintln!("Note not found: {note}");
        return Ok(());
    };

    let title = store
        .load(&path)
        .await
        .ok()
        .and_then(|d| d.meta.title)
        .unwrap_or_else(|| note_name_of(&path));

    if !force && !super::confirm(&format!("Are you sure you want to delete '{title}'?"))? {
        println!("Deletion aborted.");
        return Ok(());
    }

    store.remove(&path).await?;
    println!("Successfully deleted note: {title}");
    Ok(())
}

/// Print notes as a date/title/tags table.
async fn display_notes(store: &NoteStore, notes: &[PathBuf]) {
    println!("{:<12} {:<40} {}", "DATE", "TITLE", "TAGS");
    println!("{}", "-".repeat(72));

    for path in notes {
        let (date, title, tags) = note_row(store, path).await;
        println!("{date:<12} {title:<40} {tags}");
    }
}

async fn note_row(store: &NoteStore, path: &Path) -> (String, String, String) {
    let fallback = note_name_of(path);
    match store.load(path).await {
        Ok(doc) => {
            let date = doc
                .meta
                .date
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default();
            let title = doc.meta.title.unwrap_or(fallback);
            let tags: Vec<String> = doc.meta.tags.iter().map(|t| format!("#{t}")).collect();
            (date, title, tags.join(" "))
        }
        Err(_) => (String::new(), fallback, String::new()),
    }
}
