//! CLI command handlers.

pub mod ai;
pub mod archive;
pub mod config;
pub mod history;
pub mod note;
pub mod template;

use numen_core::Config;
use std::path::Path;

/// Open a file in the configured editor and wait for it to exit.
pub fn open_editor(config: &Config, path: &Path) -> anyhow::Result<()> {
    let editor = config.editor();
    let status = std::process::Command::new(&editor).arg(path).status();
    match status {
        Ok(status) if status.success() => Ok(()),
        Ok(status) => {
            eprintln!("Editor '{editor}' exited with status: {status}");
            Ok(())
        }
        Err(e) => {
            eprintln!("Failed to launch editor '{editor}': {e}");
            Ok(())
        }
    }
}

/// Ask for y/n confirmation on stdin.
pub fn confirm(prompt: &str) -> anyhow::Result<bool> {
    use std::io::{self, BufRead, Write};

    print!("{prompt} (y/n): ");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim().eq_ignore_ascii_case("y"))
}
