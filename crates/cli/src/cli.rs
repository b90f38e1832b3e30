use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::commands::{CompleteOptions, complete_command, keywords_command};

#[derive(Parser, Debug)]
#[command(name = "scopehint")]
#[command(version, about, long_about = None)]
#[command(after_help = "ENVIRONMENT:\n    RUST_LOG=debug    Enable debug logging")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Rank completions at a cursor position in a JavaScript file
    #[command(visible_alias = "c")]
    Complete {
        /// Path to the file with optional position (e.g., src/app.js:10:5); defaults to end of file
        filepath: String,

        /// Byte offset of the cursor, overrides any position in the path
        #[arg(short, long)]
        offset: Option<usize>,

        /// Runtime snapshot (JSON) whose values are inspected for properties
        #[arg(short, long)]
        runtime: Option<PathBuf>,

        /// Configuration file (defaults to the nearest .scopehint.json)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Show at most this many candidates
        #[arg(short, long)]
        limit: Option<usize>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// List the keyword vocabulary and its weights
    #[command(visible_alias = "k")]
    Keywords {
        /// Only keywords starting with this prefix
        prefix: Option<String>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Complete {
                filepath,
                offset,
                runtime,
                config,
                limit,
                json,
            } => complete_command(CompleteOptions {
                filepath,
                offset,
                runtime,
                config,
                limit,
                json,
            }),
            Commands::Keywords { prefix, json } => keywords_command(prefix.as_deref(), json),
        }
    }
}
