//! Backup and import commands.

use chrono::Local;
use numen_core::Config;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

pub async fn handle_backup(config: &Config, output: Option<PathBuf>) -> anyhow::Result<()> {
    let notes_dir = config.notes_dir()?;

    let mut output = output.unwrap_or_else(|| {
        PathBuf::from(format!(
            "numen_backup_{}.zip",
            Local::now().format("%Y-%m-%d")
        ))
    });
    if !output
        .extension()
        .is_some_and(|e| e.eq_ignore_ascii_case("zip"))
    {
        output.set_extension("zip");
    }

    let notes = note_files(&notes_dir)?;
    if notes.is_empty() {
        println!("No notes found to back up.");
        return Ok(());
    }

    println!("Backing up {} notes to {}...", notes.len(), output.display());

    let file = std::fs::File::create(&output)?;
    let mut zipf = ZipWriter::new(file);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    for path in &notes {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        zipf.start_file(name, options)?;
        zipf.write_all(&std::fs::read(path)?)?;
    }
    zipf.finish()?;

    info!(path = %output.display(), count = notes.len(), "created backup");
    println!("Successfully created backup at: {}", output.display());
    println!("Backed up {} notes.", notes.len());
    Ok(())
}

pub async fn handle_import(config: &Config, input: &Path, overwrite: bool) -> anyhow::Result<()> {
    let notes_dir = config.notes_dir()?;
    std::fs::create_dir_all(&notes_dir)?;

    if !input.exists() {
        eprintln!("Import file not found: {}", input.display());
        return Ok(());
    }
    if !input
        .extension()
        .is_some_and(|e| e.eq_ignore_ascii_case("zip"))
    {
        eprintln!("Import file must be a .zip file: {}", input.display());
        return Ok(());
    }

    let file = std::fs::File::open(input)?;
    let mut archive = ZipArchive::new(file)?;

    let md_names: Vec<String> = archive
        .file_names()
        .filter(|n| n.ends_with(".md"))
        .map(str::to_string)
        .collect();

    if md_names.is_empty() {
        println!("No notes found in the import file.");
        return Ok(());
    }

    println!("Importing {} notes from {}...", md_names.len(), input.display());

    let mut imported = 0;
    let mut skipped = 0;

    for name in &md_names {
        // Flatten any archive paths; notes live flat in the notes dir.
        let basename = Path::new(name)
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        let target = notes_dir.join(&basename);

        if target.exists() && !overwrite {
            println!("Skipping existing note: {basename}");
            skipped += 1;
            continue;
        }

        let mut entry = archive.by_name(name)?;
        let mut out = std::fs::File::create(&target)?;
        std::io::copy(&mut entry, &mut out)?;
        imported += 1;
    }

    info!(imported, skipped, "imported notes");
    println!("Successfully imported {imported} notes.");
    if skipped > 0 {
        println!("Skipped {skipped} existing notes. Use --overwrite to replace them.");
    }
    Ok(())
}

fn note_files(notes_dir: &Path) -> anyhow::Result<Vec<PathBuf>> {
    let mut notes = Vec::new();
    if !notes_dir.exists() {
        return Ok(notes);
    }
    for entry in std::fs::read_dir(notes_dir)? {
        let path = entry?.path();
        if path.extension().is_some_and(|e| e == "md") {
            notes.push(path);
        }
    }
    notes.sort();
    Ok(notes)
}
