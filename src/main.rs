mod cache;
mod cli;
mod commands;
mod config;
mod convert;
mod error;
mod export;
mod markdown;
mod mcp;
mod summarize;
mod telemetry;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use crate::config::Settings;
use markdown::ContentKeying;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    telemetry::init(cli.verbose);

    let mut settings = Settings::load().context("Failed to load configuration")?;
    if cli.by_index {
        settings.content_keying = ContentKeying::ByIndex;
    }
    let keying = settings.content_keying;

    match cli.command {
        Commands::Mcp => {
            mcp::run_server(settings).await?;
        }
        Commands::Outline { path, json } => {
            commands::outline::run(&path, keying, json)?;
        }
        Commands::Section {
            path,
            title,
            json,
            save,
            output_dir,
        } => {
            let output_dir = output_dir.unwrap_or(settings.output_dir);
            let options = commands::section::SectionOptions {
                keying,
                json,
                save_to: save.then_some(output_dir.as_path()),
            };
            commands::section::run(&path, &title, &options)?;
        }
        Commands::Summarize {
            path,
            title,
            command,
            output_dir,
        } => {
            let command = command.or(settings.summarizer_command).context(
                "No summarizer configured; pass --command or set summarizer_command",
            )?;
            let summarizer = summarize::CommandSummarizer::new(command);
            let output_dir = output_dir.unwrap_or(settings.output_dir);
            commands::summarize::run(&path, &title, keying, &summarizer, &output_dir)?;
        }
        Commands::Convert { path, output_dir } => {
            let output_dir = output_dir.unwrap_or(settings.output_dir);
            commands::convert::run(&path, &convert::LocalConverter, keying, &output_dir)?;
        }
    }

    Ok(())
}
