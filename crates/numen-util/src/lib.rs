//! Shared utilities for numen.
//!
//! This crate provides common utilities used across the numen workspace:
//! - Logging setup with tracing
//! - Path utilities (XDG directories, tilde expansion)
//! - Markdown text helpers (section extraction, content condensing)

pub mod log;
pub mod path;
pub mod text;
