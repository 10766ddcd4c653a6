//! CLI argument definitions using clap

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::plan::DocumentFormat;

/// careplan - Draft, review, and export clinic care plans
#[derive(Parser, Debug)]
#[command(name = "careplan")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the HTTP server
    Serve {
        /// Address to bind (overrides server.bind)
        #[arg(short, long)]
        bind: Option<String>,

        /// Port to listen on (overrides server.port)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Check a password against the configured access password
    CheckAccess {
        /// Password to check
        secret: String,
    },

    /// Print the generation prompt for a patient without calling the API
    Prompt {
        /// Patient intake JSON file
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Generate a draft care plan for a patient
    Generate {
        /// Patient intake JSON file
        #[arg(short, long)]
        input: PathBuf,

        /// Write the plan JSON here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Render an approved care plan as a document
    Render {
        /// Patient intake JSON file
        #[arg(long)]
        patient: PathBuf,

        /// Plan JSON file (generated plan or reviewed draft)
        #[arg(long)]
        plan: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = DocumentFormat::Txt)]
        format: DocumentFormat,

        /// Output file path (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Check configuration and report problems
    Doctor {
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Configuration management
    #[command(subcommand)]
    Config(ConfigCommand),

    /// Generate shell completion scripts
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,

    /// Initialize default configuration
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}
