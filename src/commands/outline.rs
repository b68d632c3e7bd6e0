use crate::markdown::{ContentKeying, HeadingNode, MarkdownDocument};
use anyhow::Result;
use std::path::Path;

pub fn run<P: AsRef<Path>>(path: P, keying: ContentKeying, json: bool) -> Result<()> {
    let doc = MarkdownDocument::open(&path, keying)?;
    let outline = doc.outline();
    tracing::debug!(source = %doc.source, headings = outline.len(), "Built outline");

    if json {
        println!("{}", serde_json::to_string_pretty(outline)?);
        return Ok(());
    }

    if outline.is_empty() {
        println!("No headings found.");
        return Ok(());
    }

    for line in format_outline(outline) {
        println!("{}", line);
    }

    Ok(())
}

/// One line per heading, indented two spaces per level below the top.
pub fn format_outline(outline: &[HeadingNode]) -> Vec<String> {
    outline
        .iter()
        .map(|node| {
            let indent = "  ".repeat(node.level.saturating_sub(1) as usize);
            format!("{}{}", indent, node.title)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markdown::build_outline;

    #[test]
    fn test_format_outline() {
        let outline = build_outline("# Paper\n## Methods\n### Data\n## Results\n");
        assert_eq!(
            format_outline(&outline),
            vec!["Paper", "  Methods", "    Data", "  Results"]
        );
    }
}
