use crate::convert::{save_markdown, DocumentConverter};
use crate::markdown::{ContentKeying, MarkdownDocument};
use anyhow::Result;
use std::path::{Path, PathBuf};

pub fn run<P: AsRef<Path>, Q: AsRef<Path>>(
    path: P,
    converter: &dyn DocumentConverter,
    keying: ContentKeying,
    output_dir: Q,
) -> Result<PathBuf> {
    let path = path.as_ref();
    let markdown = converter.to_markdown(path)?;
    let doc = MarkdownDocument::from_text(path.display().to_string(), markdown, keying);
    let output_path = save_markdown(path, &doc.text, output_dir)?;

    let headings = doc.outline().len();
    if headings == 0 {
        tracing::warn!(path = %path.display(), "Converted document has no headings");
    }

    println!(
        "Converted {} to {} ({} heading(s))",
        doc.source,
        output_path.display(),
        headings
    );

    Ok(output_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(&'static str);

    impl DocumentConverter for Fixed {
        fn to_markdown(&self, _path: &Path) -> Result<String> {
            Ok(self.0.to_string())
        }
    }

    #[test]
    fn test_writes_converted_markdown() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("output");
        let converter = Fixed("# Abstract\n\nshort\n");

        let written = run("scans/paper.pdf", &converter, ContentKeying::ByPath, &out).unwrap();

        assert_eq!(written, out.join("paper.md"));
        assert_eq!(std::fs::read_to_string(written).unwrap(), "# Abstract\n\nshort\n");
    }

    #[test]
    fn test_converter_failure_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("output");
        let source = dir.path().join("slides.pptx");
        std::fs::write(&source, "x").unwrap();

        let converter = crate::convert::LocalConverter;
        assert!(run(&source, &converter, ContentKeying::ByPath, &out).is_err());
        assert!(!out.exists());
    }
}
