use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "mdoutline")]
#[command(about = "Markdown outline navigation and section extraction with MCP server support")]
#[command(version)]
pub struct Cli {
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Give every heading its own body instead of sharing it across duplicate paths
    #[arg(long, global = true)]
    pub by_index: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run as MCP server (primary mode)
    Mcp,

    /// Print the heading outline of a Markdown document
    #[command(alias = "toc")]
    Outline {
        /// Markdown file to inspect
        path: PathBuf,

        /// Print the outline as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print a section and its direct subsections as one document
    Section {
        /// Markdown file to read
        path: PathBuf,

        /// Section title (exact or partial, case insensitive)
        title: String,

        /// Print the resolved section as JSON
        #[arg(long)]
        json: bool,

        /// Also save the section to the output directory
        #[arg(short, long)]
        save: bool,

        /// Output directory (overrides configuration)
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
    },

    /// Summarize a section with the configured summarizer command
    Summarize {
        /// Markdown file to read
        path: PathBuf,

        /// Section title (exact or partial, case insensitive)
        title: String,

        /// Summarizer command (overrides configuration)
        #[arg(short, long)]
        command: Option<String>,

        /// Output directory (overrides configuration)
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
    },

    /// Convert a document (PDF or Markdown) to a Markdown file
    Convert {
        /// Document to convert
        path: PathBuf,

        /// Output directory (overrides configuration)
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
    },
}
