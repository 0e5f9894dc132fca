//! Logging setup using tracing.
//!
//! This module provides consistent logging configuration across numen.
//! Logs go to a file in the platform log directory by default; verbose
//! mode switches to stderr so CLI output stays clean on stdout.

use std::path::PathBuf;

/// Initialize logging based on verbosity.
///
/// In verbose mode, logs are written to stderr. Otherwise they go to a
/// file in the standard log directory. Returns the log file path when
/// logging to file. Should be called once at application startup.
pub fn init(verbose: bool) -> Option<PathBuf> {
    let filter = if verbose {
        "numen=debug,numen_core=debug,numen_history=debug,numen_provider=debug"
    } else {
        "numen=info,numen_core=info,numen_history=info,numen_provider=info"
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter));

    if verbose {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
        return None;
    }

    let log_dir = crate::path::logs_dir()?;
    if let Err(e) = std::fs::create_dir_all(&log_dir) {
        eprintln!("Warning: Could not create log directory: {e}");
        return None;
    }

    let log_file = log_dir.join("numen.log");
    let file = match std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_file)
    {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Warning: Could not open log file: {e}");
            return None;
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(file)
        .init();

    Some(log_file)
}
