use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

static HEADING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(#{1,6})\s+(.+)$").expect("heading pattern is valid"));

/// One ATX heading of a document, with the body text directly beneath it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadingNode {
    pub level: u32,
    pub title: String,
    /// Titles from the document root down to and including this heading.
    pub path: Vec<String>,
    pub content: String,
}

/// How body text is attached to headings that share an identical path.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentKeying {
    /// Content is looked up by path; the last non-empty body for a path wins
    /// and every heading with that path carries it.
    #[default]
    ByPath,
    /// Every heading keeps its own body.
    ByIndex,
}

/// Build the outline of a Markdown document using path-keyed content.
pub fn build_outline(markdown: &str) -> Vec<HeadingNode> {
    build_outline_with(markdown, ContentKeying::ByPath)
}

/// Build the outline of a Markdown document.
///
/// Headings are emitted in document order. Hierarchy is implicit in each
/// node's `level` and `path`; nesting is never validated, so a level jump
/// simply yields a path shorter than the level. Text before the first
/// heading is discarded.
pub fn build_outline_with(markdown: &str, keying: ContentKeying) -> Vec<HeadingNode> {
    let mut nodes = Vec::new();
    let mut bodies: Vec<Vec<&str>> = Vec::new();
    let mut stack: Vec<String> = Vec::new();

    for line in markdown.lines() {
        match parse_heading(line) {
            Some((level, title)) => {
                while stack.len() >= level as usize {
                    stack.pop();
                }
                stack.push(title.to_string());

                nodes.push(HeadingNode {
                    level,
                    title: title.to_string(),
                    path: stack.clone(),
                    content: String::new(),
                });
                bodies.push(Vec::new());
            }
            None => {
                // Preamble lines have no heading to attach to
                if let Some(body) = bodies.last_mut() {
                    body.push(line);
                }
            }
        }
    }

    let bodies: Vec<String> = bodies
        .into_iter()
        .map(|lines| lines.join("\n").trim().to_string())
        .collect();

    match keying {
        ContentKeying::ByIndex => {
            for (node, body) in nodes.iter_mut().zip(bodies) {
                node.content = body;
            }
        }
        ContentKeying::ByPath => {
            let mut by_path: HashMap<Vec<String>, String> = HashMap::new();
            for (node, body) in nodes.iter().zip(bodies) {
                if !body.is_empty() {
                    by_path.insert(node.path.clone(), body);
                }
            }
            for node in &mut nodes {
                node.content = by_path.get(&node.path).cloned().unwrap_or_default();
            }
        }
    }

    nodes
}

/// Match a heading line, returning its level and trimmed title.
fn parse_heading(line: &str) -> Option<(u32, &str)> {
    let caps = HEADING.captures(line.trim_start())?;
    let level = caps.get(1)?.as_str().len() as u32;
    let title = caps.get(2)?.as_str().trim();
    Some((level, title))
}
