//! Command-line surface.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "notepad")]
#[command(about = "Keep up to five short notes in a local database", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Database file (default: $NOTEPAD_DB_PATH or <temp>/notes.db)
    #[arg(long, global = true, value_name = "PATH")]
    pub db: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Absolute directory for rolling log files (default: stderr)
    #[arg(long, global = true, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List notes in storage order
    List,

    /// Print the number of notes
    Count,

    /// Create a note
    Add { title: String, description: String },

    /// Replace the title and description of a note
    Update {
        id: i64,
        title: String,
        description: String,
    },

    /// Delete a note
    Delete { id: i64 },

    /// Interactive screen reading commands from stdin
    Screen,
}
