use crate::export::save_section;
use crate::markdown::{render_section, ContentKeying, MarkdownDocument, SectionResult};
use anyhow::Result;
use std::path::{Path, PathBuf};

pub struct SectionOptions<'a> {
    pub keying: ContentKeying,
    pub json: bool,
    /// Directory to save the rendered section into, if any.
    pub save_to: Option<&'a Path>,
}

/// Returns the file the section was saved to, if it was saved.
pub fn run<P: AsRef<Path>>(
    path: P,
    title: &str,
    options: &SectionOptions<'_>,
) -> Result<Option<PathBuf>> {
    let doc = MarkdownDocument::open(&path, options.keying)?;
    let result = doc.section(title);

    println!("{}", format_section(title, &result, options.json)?);

    if !result.found {
        tracing::warn!(title, "Section not found");
        return Ok(None);
    }

    match options.save_to {
        Some(output_dir) => {
            let output_path = save_section(title, &result, output_dir)?;
            eprintln!("Saved section to {}", output_path.display());
            Ok(Some(output_path))
        }
        None => Ok(None),
    }
}

/// What the command prints for a resolved (or unresolved) section.
pub fn format_section(title: &str, result: &SectionResult, json: bool) -> Result<String> {
    if json {
        return Ok(serde_json::to_string_pretty(result)?);
    }

    if result.found {
        Ok(render_section(title, result))
    } else {
        Ok(format!("Section not found: {}", title))
    }
}
