//! Numen - AI-augmented terminal notepad.
//!
//! This is the main entry point for the numen CLI.

mod commands;
mod stats;

use clap::{Parser, Subcommand};
use numen_core::Config;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "numen")]
#[command(author, version, about = "AI-augmented terminal notepad", long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Subcommand
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new note
    New {
        /// Title of the new note
        title: String,
        /// Template to apply (see `numen template list`)
        #[arg(short, long)]
        template: Option<String>,
        /// Do not open the editor after creating
        #[arg(long)]
        no_edit: bool,
    },
    /// List all notes, optionally filtered by tag
    List {
        /// Only show notes carrying this tag
        #[arg(short, long)]
        tag: Option<String>,
    },
    /// Open a note in the configured editor
    Edit {
        /// Note to edit (filename or partial name)
        note: String,
    },
    /// Display a note in the terminal
    View {
        /// Note to view (filename or partial name)
        note: String,
        /// Show raw content including frontmatter
        #[arg(short, long)]
        raw: bool,
    },
    /// Search for notes containing text
    Search {
        /// Search term (case-insensitive)
        query: String,
    },
    /// Add or remove tags on a note
    Tag {
        /// Note to tag (filename or partial name)
        note: String,
        /// Tags to add (+tag) or remove (no prefix)
        #[arg(num_args = 1..)]
        tags: Vec<String>,
    },
    /// Delete a note
    Remove {
        /// Note to delete (filename or partial name)
        note: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
    /// Open the configuration file in the editor
    Config,
    /// Create a zip backup of all notes
    Backup {
        /// Output path (default: numen_backup_YYYY-MM-DD.zip)
        output: Option<PathBuf>,
    },
    /// Import notes from a backup zip file
    Import {
        /// Path to the zip file to import
        input: PathBuf,
        /// Overwrite existing notes with the same name
        #[arg(short, long)]
        overwrite: bool,
    },
    /// Show statistics about the notes collection
    Stats,
    /// Manage note templates
    Template {
        #[command(subcommand)]
        command: TemplateCommands,
    },
    /// Transform notes with AI
    Ai {
        #[command(subcommand)]
        command: AiCommands,
    },
    /// Manage note version history
    History {
        #[command(subcommand)]
        command: HistoryCommands,
    },
}

#[derive(Subcommand)]
pub(crate) enum TemplateCommands {
    /// List available templates
    List,
    /// Create a new template and open it in the editor
    New {
        /// Template name
        name: String,
        /// Display title
        #[arg(long)]
        title: Option<String>,
        /// Short description
        #[arg(long)]
        description: Option<String>,
    },
    /// Edit a template in the editor
    Edit {
        /// Template name
        name: String,
    },
    /// Delete a template
    Delete {
        /// Template name
        name: String,
        /// Required to delete a built-in template
        #[arg(short, long)]
        force: bool,
    },
    /// Reset a built-in template to its shipped content
    Reset {
        /// Template name
        name: String,
    },
}

#[derive(Subcommand)]
pub(crate) enum AiCommands {
    /// Expand a note or section into fuller prose
    Expand {
        /// Note to expand (filename or partial name)
        note: String,
        #[command(flatten)]
        opts: AiOpts,
    },
    /// Summarize a note or section into bullet points
    Summarize {
        /// Note to summarize (filename or partial name)
        note: String,
        #[command(flatten)]
        opts: AiOpts,
    },
    /// Rewrite a note or section as a poem
    Poetic {
        /// Note to transform (filename or partial name)
        note: String,
        #[command(flatten)]
        opts: AiOpts,
    },
    /// Process a note with a free-form instruction
    Custom {
        /// Note to process (filename or partial name)
        note: String,
        /// Instruction for the AI
        instruction: String,
        #[command(flatten)]
        opts: AiOpts,
    },
}

/// Options shared by all AI subcommands.
#[derive(clap::Args)]
pub(crate) struct AiOpts {
    /// Section to process (0-indexed); whole note if omitted
    #[arg(short, long)]
    pub(crate) section: Option<usize>,
    /// Replace the original text instead of preserving it
    #[arg(short, long)]
    pub(crate) replace: bool,
    /// Print the result without updating the note
    #[arg(short, long)]
    pub(crate) preview: bool,
}

#[derive(Subcommand)]
pub(crate) enum HistoryCommands {
    /// Save the current state of a note as a version
    Save {
        /// Note to snapshot (filename or partial name)
        note: String,
        /// Message describing the version
        #[arg(short, long)]
        message: Option<String>,
    },
    /// List saved versions of a note
    List {
        /// Note to inspect (filename or partial name)
        note: String,
    },
    /// Restore a note to a previous version
    Restore {
        /// Note to restore (filename or partial name)
        note: String,
        /// Version to restore: index (0 = oldest, -1 = latest) or version ID
        #[arg(allow_hyphen_values = true)]
        version: String,
    },
    /// Show a unified diff between two versions
    Diff {
        /// Note to compare (filename or partial name)
        note: String,
        /// First version (index or ID)
        #[arg(allow_hyphen_values = true)]
        from: String,
        /// Second version (index or ID)
        #[arg(allow_hyphen_values = true)]
        to: String,
    },
    /// Remove all version history for a note
    Clear {
        /// Note whose history to remove (filename or partial name)
        note: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    numen_util::log::init(cli.verbose);

    let config = Config::load().await?;

    match cli.command {
        Commands::New {
            title,
            template,
            no_edit,
        } => commands::note::handle_new(&config, &title, template.as_deref(), no_edit).await,
        Commands::List { tag } => commands::note::handle_list(&config, tag.as_deref()).await,
        Commands::Edit { note } => commands::note::handle_edit(&config, &note).await,
        Commands::View { note, raw } => commands::note::handle_view(&config, &note, raw).await,
        Commands::Search { query } => commands::note::handle_search(&config, &query).await,
        Commands::Tag { note, tags } => commands::note::handle_tag(&config, &note, &tags).await,
        Commands::Remove { note, force } => {
            commands::note::handle_remove(&config, &note, force).await
        }
        Commands::Config => commands::config::handle_config(&config).await,
        Commands::Backup { output } => commands::archive::handle_backup(&config, output).await,
        Commands::Import { input, overwrite } => {
            commands::archive::handle_import(&config, &input, overwrite).await
        }
        Commands::Stats => stats::handle_stats(&config).await,
        Commands::Template { command } => commands::template::handle(&config, command).await,
        Commands::Ai { command } => commands::ai::handle(&config, command).await,
        Commands::History { command } => commands::history::handle(&config, command).await,
    }
}
