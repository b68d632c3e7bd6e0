use crate::markdown::{ContentKeying, MarkdownDocument};
use crate::summarize::{write_summaries, Summarizer};
use anyhow::Result;
use std::path::Path;

pub fn run<P: AsRef<Path>, Q: AsRef<Path>>(
    path: P,
    title: &str,
    keying: ContentKeying,
    summarizer: &dyn Summarizer,
    output_dir: Q,
) -> Result<()> {
    let doc = MarkdownDocument::open(&path, keying)?;

    let Some(section_text) = doc.render_section(title) else {
        tracing::warn!(title, "Section not found, nothing to summarize");
        println!("Section not found: {}", title);
        return Ok(());
    };

    let summary = summarizer.summarize(&section_text)?;
    let (vulgar, technical) = write_summaries(&output_dir, title, &summary)?;

    println!("Plain-language summary: {}", vulgar.display());
    println!("Technical summary: {}", technical.display());

    Ok(())
}
