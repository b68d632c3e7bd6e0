//! Summarization collaborator.
//!
//! Summaries come from an external program: it receives the rendered
//! section on stdin and prints a JSON [`Summary`] on stdout.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::export::file_stem;

/// Two renditions of one section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    /// Plain-language version for non-experts.
    pub vulgar_summary: String,
    /// Version that keeps the technical vocabulary.
    pub technical_summary: String,
}

pub trait Summarizer {
    fn summarize(&self, section_text: &str) -> Result<Summary>;
}

/// Runs a shell command as the summarizer.
#[derive(Debug, Clone)]
pub struct CommandSummarizer {
    command: String,
}

impl CommandSummarizer {
    pub fn new(command: impl Into<String>) -> Self {
        CommandSummarizer {
            command: command.into(),
        }
    }

    fn shell(&self) -> Command {
        if cfg!(windows) {
            let mut cmd = Command::new("cmd");
            cmd.arg("/C").arg(&self.command);
            cmd
        } else {
            let mut cmd = Command::new("sh");
            cmd.arg("-c").arg(&self.command);
            cmd
        }
    }
}

impl Summarizer for CommandSummarizer {
    fn summarize(&self, section_text: &str) -> Result<Summary> {
        tracing::debug!(command = %self.command, bytes = section_text.len(), "Running summarizer");

        let mut child = self
            .shell()
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .with_context(|| format!("Failed to start summarizer: {}", self.command))?;

        // Feed stdin from a separate thread so a chatty child cannot deadlock us
        let mut stdin = child.stdin.take().context("Summarizer stdin unavailable")?;
        let input = section_text.to_string();
        let writer = std::thread::spawn(move || match stdin.write_all(input.as_bytes()) {
            Err(e) if e.kind() == ErrorKind::BrokenPipe => Ok(()),
            other => other,
        });

        let output = child
            .wait_with_output()
            .with_context(|| format!("Failed to wait for summarizer: {}", self.command))?;

        match writer.join() {
            Ok(result) => result.context("Failed to send section to summarizer")?,
            Err(_) => bail!("Summarizer input thread panicked"),
        }

        if !output.status.success() {
            bail!("Summarizer exited with {}", output.status);
        }

        serde_json::from_slice(&output.stdout).context("Summarizer returned invalid JSON")
    }
}

/// Write both summaries, returning the plain-language and technical file paths.
pub fn write_summaries<P: AsRef<Path>>(
    output_dir: P,
    title: &str,
    summary: &Summary,
) -> Result<(PathBuf, PathBuf)> {
    let output_dir = output_dir.as_ref();
    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create directory: {}", output_dir.display()))?;

    let stem = file_stem(title);
    let vulgar = output_dir.join(format!("{}_vulgar_summary.md", stem));
    let technical = output_dir.join(format!("{}_technical_summary.md", stem));

    for (path, text) in [
        (&vulgar, &summary.vulgar_summary),
        (&technical, &summary.technical_summary),
    ] {
        std::fs::write(path, text)
            .with_context(|| format!("Failed to write summary: {}", path.display()))?;
        tracing::info!(path = %path.display(), "Saved summary");
    }

    Ok((vulgar, technical))
}
