use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "notas")]
#[command(version, about = "Quick notes that live in a local storage slot")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to config file (default: ./notas.yaml or $XDG_CONFIG_HOME/notas/config.yaml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory holding the notes slot (overrides the config file)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a new note
    New {
        /// Note title (defaults to "Sin título")
        #[arg(long, short = 't')]
        title: Option<String>,

        /// Note content
        #[arg(long, short = 'c', conflicts_with = "stdin")]
        content: Option<String>,

        /// Read content from stdin
        #[arg(long)]
        stdin: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Change the title or content of a note
    Edit {
        /// Note ID
        id: String,

        /// New title
        #[arg(long, short = 't')]
        title: Option<String>,

        /// New content
        #[arg(long, short = 'c', conflicts_with = "stdin")]
        content: Option<String>,

        /// Read new content from stdin
        #[arg(long)]
        stdin: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Delete a note
    Delete {
        /// Note ID
        id: String,
    },

    /// Show a single note
    Show {
        /// Note ID
        id: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List notes, newest first
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Export or check the PWA configuration
    Pwa(PwaCommand),
}

#[derive(Args, Debug)]
pub struct PwaCommand {
    #[command(subcommand)]
    pub action: PwaAction,
}

#[derive(Subcommand, Debug)]
pub enum PwaAction {
    /// Print the web app manifest
    Manifest {
        /// Write to this file instead of stdout
        #[arg(long, short = 'o')]
        out: Option<PathBuf>,
    },

    /// Print the Workbox generateSW options
    Workbox {
        /// Write to this file instead of stdout
        #[arg(long, short = 'o')]
        out: Option<PathBuf>,
    },

    /// Validate manifest and cache rules
    Check,
}
