//! Version history commands.

use crate::HistoryCommands;
use numen_core::{note_name_of, Config, NoteStore};
use numen_history::{HistoryStore, VersionRef};
use std::path::PathBuf;

pub async fn handle(config: &Config, command: HistoryCommands) -> anyhow::Result<()> {
    match command {
        HistoryCommands::Save { note, message } => {
            handle_save(config, &note, message.as_deref()).await
        }
        HistoryCommands::List { note } => handle_list(config, &note).await,
        HistoryCommands::Restore { note, version } => {
            handle_restore(config, &note, &version).await
        }
        HistoryCommands::Diff { note, from, to } => handle_diff(config, &note, &from, &to).await,
        HistoryCommands::Clear { note, force } => handle_clear(config, &note, force).await,
    }
}

async fn handle_save(config: &Config, note: &str, message: Option<&str>) -> anyhow::Result<()> {
    let Some(note_path) = resolve(config, note).await? else {
        eprintln!("Note not found: {note}");
        return Ok(());
    };

    let store = HistoryStore::new(config.history_dir()?).await?;
    let version_id = store.save(&note_path, message).await?;
    println!("Saved version: {version_id}");
    Ok(())
}

async fn handle_list(config: &Config, note: &str) -> anyhow::Result<()> {
    let Some(note_path) = resolve(config, note).await? else {
        eprintln!("Note not found: {note}");
        return Ok(());
    };

    let store = HistoryStore::new(config.history_dir()?).await?;
    let versions = store.list(&note_path).await;

    if versions.is_empty() {
        println!("No versions found for note: {}", note_name_of(&note_path));
        return Ok(());
    }

    println!(
        "{:<6} {:<22} {:<11} {:<9} {}",
        "INDEX", "VERSION", "DATE", "TIME", "MESSAGE"
    );
    println!("{}", "-".repeat(72));

    // Newest first; the index counts up from the oldest version so it can
    // be passed back to restore/diff.
    let count = versions.len();
    for (i, version) in versions.iter().enumerate() {
        println!(
            "{:<6} {:<22} {:<11} {:<9} {}",
            count - i - 1,
            version.version_id,
            version.timestamp.format("%Y-%m-%d"),
            version.timestamp.format("%H:%M:%S"),
            version.message,
        );
    }
    Ok(())
}

async fn handle_restore(config: &Config, note: &str, version: &str) -> anyhow::Result<()> {
    let Some(note_path) = resolve(config, note).await? else {
        eprintln!("Note not found: {note}");
        return Ok(());
    };

    let store = HistoryStore::new(config.history_dir()?).await?;
    let version_ref = VersionRef::parse(version);

    if store.restore(&note_path, &version_ref).await {
        println!(
            "Restored {} to version: {version_ref}",
            note_name_of(&note_path)
        );
    } else {
        eprintln!(
            "Version {version_ref} not found for note: {}",
            note_name_of(&note_path)
        );
    }
    Ok(())
}

async fn handle_diff(config: &Config, note: &str, from: &str, to: &str) -> anyhow::Result<()> {
    let Some(note_path) = resolve(config, note).await? else {
        eprintln!("Note not found: {note}");
        return Ok(());
    };

    let store = HistoryStore::new(config.history_dir()?).await?;
    let lines = store
        .compare(
            &note_name_of(&note_path),
            &VersionRef::parse(from),
            &VersionRef::parse(to),
        )
        .await;

    if lines.is_empty() {
        println!("No differences.");
        return Ok(());
    }
    for line in lines {
        println!("{line}");
    }
    Ok(())
}

async fn handle_clear(config: &Config, note: &str, force: bool) -> anyhow::Result<()> {
    let Some(note_path) = resolve(config, note).await? else {
        eprintln!("Note not found: {note}");
        return Ok(());
    };
    let note_name = note_name_of(&note_path);

    if !force
        && !super::confirm(&format!(
            "Remove all version history for '{note_name}'?"
        ))?
    {
        println!("Aborted.");
        return Ok(());
    }

    let store = HistoryStore::new(config.history_dir()?).await?;
    if store.remove_all(&note_path).await {
        println!("History removed for note: {note_name}");
    } else {
        eprintln!("Error removing history for note: {note_name}");
    }
    Ok(())
}

/// Resolve a note identifier against the notes directory.
async fn resolve(config: &Config, note: &str) -> anyhow::Result<Option<PathBuf>> {
    let store = NoteStore::new(config.notes_dir()?).await?;
    Ok(store.resolve(note).await)
}
