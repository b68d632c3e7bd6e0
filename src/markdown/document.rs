use std::path::Path;

use super::outline::{build_outline_with, ContentKeying, HeadingNode};
use super::section::{render_section, resolve_section, SectionResult};
use crate::error::OutlineError;

/// A Markdown document together with its parsed outline.
pub struct MarkdownDocument {
    pub source: String,
    pub text: String,
    outline: Vec<HeadingNode>,
}

impl MarkdownDocument {
    pub fn open<P: AsRef<Path>>(path: P, keying: ContentKeying) -> Result<Self, OutlineError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|source| OutlineError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_bytes(path.display().to_string(), bytes, keying)
    }

    /// Build from raw bytes, rejecting anything that is not UTF-8 text.
    pub fn from_bytes(
        source: impl Into<String>,
        bytes: Vec<u8>,
        keying: ContentKeying,
    ) -> Result<Self, OutlineError> {
        let source = source.into();
        let text = String::from_utf8(bytes).map_err(|e| {
            OutlineError::invalid_input(format!("{} is not UTF-8 text: {}", source, e))
        })?;
        Ok(Self::from_text(source, text, keying))
    }

    pub fn from_text(
        source: impl Into<String>,
        text: impl Into<String>,
        keying: ContentKeying,
    ) -> Self {
        let text = text.into();
        let outline = build_outline_with(&text, keying);
        MarkdownDocument {
            source: source.into(),
            text,
            outline,
        }
    }

    pub fn outline(&self) -> &[HeadingNode] {
        &self.outline
    }

    pub fn into_outline(self) -> Vec<HeadingNode> {
        self.outline
    }

    pub fn section(&self, title: &str) -> SectionResult {
        resolve_section(&self.outline, title)
    }

    /// Render a section, or `None` when no heading matches `title`.
    pub fn render_section(&self, title: &str) -> Option<String> {
        let result = self.section(title);
        result.found.then(|| render_section(title, &result))
    }
}
