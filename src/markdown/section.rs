use serde::{Deserialize, Serialize};

use super::outline::HeadingNode;

/// A direct child of a resolved section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subsection {
    pub title: String,
    pub content: String,
}

/// The outcome of looking up a section by title.
///
/// An unresolved title is a normal result with `found == false`; callers
/// must check the flag before using the content.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionResult {
    pub main_content: String,
    pub subsections: Vec<Subsection>,
    pub found: bool,
}

/// Find the index of the heading best matching `target_title`.
///
/// An exact case-insensitive match anywhere in the outline beats a
/// substring match; within each pass the first heading in document order wins.
pub fn find_heading(outline: &[HeadingNode], target_title: &str) -> Option<usize> {
    let target = target_title.to_lowercase();

    outline
        .iter()
        .position(|node| node.title.to_lowercase() == target)
        .or_else(|| {
            outline
                .iter()
                .position(|node| node.title.to_lowercase().contains(&target))
        })
}

/// Resolve a section and collect its direct children.
///
/// Children are the headings exactly one level deeper, up to the first
/// heading at the same level or shallower. Deeper descendants are skipped.
pub fn resolve_section(outline: &[HeadingNode], target_title: &str) -> SectionResult {
    let Some(index) = find_heading(outline, target_title) else {
        return SectionResult::default();
    };

    let node = &outline[index];
    let subsections = outline[index + 1..]
        .iter()
        .take_while(|next| next.level > node.level)
        .filter(|next| next.level == node.level + 1)
        .map(|child| Subsection {
            title: child.title.clone(),
            content: child.content.clone(),
        })
        .collect();

    SectionResult {
        main_content: node.content.clone(),
        subsections,
        found: true,
    }
}

/// Flatten a section into one document: the section under a level-1
/// heading, every subsection under a level-2 heading.
pub fn render_section(target_title: &str, result: &SectionResult) -> String {
    let mut doc = format!("# {}\n\n{}", target_title, result.main_content);

    if !result.subsections.is_empty() {
        doc.push_str("\n\n");
        for sub in &result.subsections {
            doc.push_str(&format!("## {}\n\n{}\n\n", sub.title, sub.content));
        }
    }

    doc
}
