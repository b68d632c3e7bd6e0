//! Turning source documents into Markdown text.
//!
//! Real OCR is an external service; the local converter only passes
//! Markdown through and pulls the text layer out of PDFs.

use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};

pub trait DocumentConverter {
    fn to_markdown(&self, path: &Path) -> Result<String>;
}

/// Converter that needs no external service.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalConverter;

impl DocumentConverter for LocalConverter {
    fn to_markdown(&self, path: &Path) -> Result<String> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        match extension.as_deref() {
            Some("md" | "markdown" | "txt") => std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read document: {}", path.display())),
            Some("pdf") => {
                let bytes = std::fs::read(path)
                    .with_context(|| format!("Failed to read PDF: {}", path.display()))?;
                let text = pdf_extract::extract_text_from_mem(&bytes).with_context(|| {
                    format!("Failed to extract text from PDF: {}", path.display())
                })?;
                Ok(join_pages(&text))
            }
            _ => bail!("Unsupported document type: {}", path.display()),
        }
    }
}

/// Join form-feed separated pages with a blank line, dropping empty pages.
fn join_pages(text: &str) -> String {
    text.split('\x0C')
        .map(str::trim)
        .filter(|page| !page.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Write converted Markdown next to other outputs as `{stem}.md`.
pub fn save_markdown<P: AsRef<Path>, Q: AsRef<Path>>(
    source: P,
    markdown: &str,
    output_dir: Q,
) -> Result<PathBuf> {
    let source = source.as_ref();
    let output_dir = output_dir.as_ref();

    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create directory: {}", output_dir.display()))?;

    let stem = source
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("document");
    let output_path = output_dir.join(format!("{}.md", stem));

    std::fs::write(&output_path, markdown)
        .with_context(|| format!("Failed to write Markdown: {}", output_path.display()))?;

    tracing::info!(path = %output_path.display(), "Saved Markdown");
    Ok(output_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_pages() {
        assert_eq!(
            join_pages("page one\n\x0C\n\x0Cpage three\n"),
            "page one\n\npage three"
        );
    }

    #[test]
    fn test_markdown_passes_through() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("paper.MD");
        std::fs::write(&path, "# Title\n\nbody\n").unwrap();
        assert_eq!(
            LocalConverter.to_markdown(&path).unwrap(),
            "# Title\n\nbody\n"
        );
    }

    #[test]
    fn test_unsupported_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("slides.pptx");
        std::fs::write(&path, "x").unwrap();
        assert!(LocalConverter.to_markdown(&path).is_err());
    }

    #[test]
    fn test_save_markdown_uses_stem() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("output");
        let path = save_markdown("scans/s12859-025-06165-6.pdf", "# T\n", &out).unwrap();
        assert_eq!(path, out.join("s12859-025-06165-6.md"));
        assert_eq!(std::fs::read_to_string(path).unwrap(), "# T\n");
    }
}
