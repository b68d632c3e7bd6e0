use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::markdown::{render_section, SectionResult};

/// Title as used in output file names: spaces and path separators become
/// underscores, so every file lands directly in the output directory.
pub fn file_stem(title: &str) -> String {
    title
        .chars()
        .map(|c| match c {
            ' ' | '/' | '\\' => '_',
            c => c,
        })
        .collect()
}

pub fn section_file_name(title: &str) -> String {
    format!("{}.md", file_stem(title))
}

/// Render a section and write it to `output_dir`, returning the file written.
pub fn save_section<P: AsRef<Path>>(
    title: &str,
    result: &SectionResult,
    output_dir: P,
) -> Result<PathBuf> {
    let output_dir = output_dir.as_ref();
    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create directory: {}", output_dir.display()))?;

    let output_path = output_dir.join(section_file_name(title));
    std::fs::write(&output_path, render_section(title, result))
        .with_context(|| format!("Failed to write section: {}", output_path.display()))?;

    tracing::info!(path = %output_path.display(), "Saved section");
    Ok(output_path)
}
