use anyhow::Result;
use rmcp::{
    ServerHandler, ServiceExt,
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{ServerCapabilities, ServerInfo},
    schemars, tool, tool_handler, tool_router,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::cache::OutlineCache;
use crate::config::Settings;
use crate::error::OutlineError;
use crate::export::save_section;
use crate::markdown::{build_outline_with, render_section, resolve_section, HeadingNode};

// Request structs for tools

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct DocumentRequest {
    #[schemars(description = "Path to the Markdown file")]
    #[serde(default)]
    pub path: Option<String>,
    #[schemars(description = "Inline Markdown text, used instead of path")]
    #[serde(default)]
    pub markdown: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SectionRequest {
    #[schemars(description = "Path to the Markdown file")]
    #[serde(default)]
    pub path: Option<String>,
    #[schemars(description = "Inline Markdown text, used instead of path")]
    #[serde(default)]
    pub markdown: Option<String>,
    #[schemars(description = "Section title (exact or partial, case insensitive)")]
    pub title: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ExportSectionRequest {
    #[schemars(description = "Path to the Markdown file")]
    #[serde(default)]
    pub path: Option<String>,
    #[schemars(description = "Inline Markdown text, used instead of path")]
    #[serde(default)]
    pub markdown: Option<String>,
    #[schemars(description = "Section title (exact or partial, case insensitive)")]
    pub title: String,
    #[schemars(description = "Directory to write the section file into (default: configured output_dir)")]
    #[serde(default)]
    pub output_dir: Option<String>,
}

#[derive(Debug, Clone)]
pub struct OutlineServer {
    tool_router: ToolRouter<Self>,
    cache: Arc<OutlineCache>,
    settings: Arc<Settings>,
}

impl OutlineServer {
    pub fn new(settings: Settings) -> Self {
        Self {
            tool_router: Self::tool_router(),
            cache: Arc::new(OutlineCache::new()),
            settings: Arc::new(settings),
        }
    }

    /// Outline of an inline document, or of a file through the cache.
    fn load_outline(
        &self,
        path: Option<&str>,
        markdown: Option<&str>,
    ) -> Result<Arc<[HeadingNode]>, OutlineError> {
        let keying = self.settings.content_keying;
        match (markdown, path) {
            (Some(text), _) => Ok(build_outline_with(text, keying).into()),
            (None, Some(path)) => self.cache.get_or_load(Path::new(path), keying),
            (None, None) => Err(OutlineError::invalid_input(
                "either `path` or `markdown` must be provided",
            )),
        }
    }
}

impl Default for OutlineServer {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}

#[tool_router]
impl OutlineServer {
    #[tool(description = "Get the heading outline of a Markdown document: level, title, ancestor path and body of every heading")]
    fn md_outline(&self, Parameters(req): Parameters<DocumentRequest>) -> String {
        match self.load_outline(req.path.as_deref(), req.markdown.as_deref()) {
            Ok(outline) => {
                serde_json::to_string_pretty(&*outline).unwrap_or_else(|e| format!("Error: {}", e))
            }
            Err(e) => format!("Error: {}", e),
        }
    }

    #[tool(description = "Find a section by title (exact match preferred, then substring, case insensitive) and return its content and direct subsections")]
    fn md_section(&self, Parameters(req): Parameters<SectionRequest>) -> String {
        match self.load_outline(req.path.as_deref(), req.markdown.as_deref()) {
            Ok(outline) => {
                let result = resolve_section(&outline, &req.title);
                serde_json::to_string_pretty(&result).unwrap_or_else(|e| format!("Error: {}", e))
            }
            Err(e) => format!("Error: {}", e),
        }
    }

    #[tool(description = "Render a section and its direct subsections as one self-contained Markdown document")]
    fn md_render_section(&self, Parameters(req): Parameters<SectionRequest>) -> String {
        match self.load_outline(req.path.as_deref(), req.markdown.as_deref()) {
            Ok(outline) => {
                let result = resolve_section(&outline, &req.title);
                if result.found {
                    render_section(&req.title, &result)
                } else {
                    format!("Section not found: {}", req.title)
                }
            }
            Err(e) => format!("Error: {}", e),
        }
    }

    #[tool(description = "Render a section and save it as a Markdown file named after its title")]
    fn md_export_section(&self, Parameters(req): Parameters<ExportSectionRequest>) -> String {
        let outline = match self.load_outline(req.path.as_deref(), req.markdown.as_deref()) {
            Ok(o) => o,
            Err(e) => return format!("Error: {}", e),
        };

        let result = resolve_section(&outline, &req.title);
        if !result.found {
            return format!("Section not found: {}", req.title);
        }

        let output_dir = req
            .output_dir
            .map(PathBuf::from)
            .unwrap_or_else(|| self.settings.output_dir.clone());

        match save_section(&req.title, &result, &output_dir) {
            Ok(path) => {
                let result = ExportResult {
                    output_path: path.display().to_string(),
                    subsection_count: result.subsections.len() as u32,
                };
                serde_json::to_string_pretty(&result).unwrap_or_else(|e| format!("Error: {}", e))
            }
            Err(e) => format!("Error: {}", e),
        }
    }
}

// Result types for MCP tools

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct ExportResult {
    pub output_path: String,
    pub subsection_count: u32,
}

#[tool_handler]
impl ServerHandler for OutlineServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Markdown outline tools. Use md_outline to list a document's headings, \
                 md_section to fetch a section with its direct subsections as structured data, \
                 md_render_section to get it as one Markdown document, and md_export_section \
                 to save it to a file. Every tool takes either a file path or inline markdown."
                    .to_string(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

pub async fn run_server(settings: Settings) -> Result<()> {
    let server = OutlineServer::new(settings);
    tracing::info!("Serving MCP over stdio");

    // Serve using stdin/stdout as a tuple
    let service = server.serve((tokio::io::stdin(), tokio::io::stdout())).await?;

    service.waiting().await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markdown::SectionResult;

    const PAPER: &str = "# Background\nintro text\n## A\na-text\n### A.1\ndeep\n## B\nb-text\n";

    fn section_request(title: &str) -> SectionRequest {
        SectionRequest {
            path: None,
            markdown: Some(PAPER.to_string()),
            title: title.to_string(),
        }
    }

    #[test]
    fn test_outline_from_inline_markdown() {
        let server = OutlineServer::default();
        let json = server.md_outline(Parameters(DocumentRequest {
            path: None,
            markdown: Some(PAPER.to_string()),
        }));
        let outline: Vec<HeadingNode> = serde_json::from_str(&json).unwrap();
        assert_eq!(outline.len(), 4);
        assert_eq!(outline[2].path, vec!["Background", "A", "A.1"]);
    }

    #[test]
    fn test_missing_document_is_invalid_input() {
        let server = OutlineServer::default();
        let reply = server.md_outline(Parameters(DocumentRequest {
            path: None,
            markdown: None,
        }));
        assert!(reply.starts_with("Error: invalid input"));
    }

    #[test]
    fn test_section_as_json() {
        let server = OutlineServer::default();
        let json = server.md_section(Parameters(section_request("background")));
        let result: SectionResult = serde_json::from_str(&json).unwrap();
        assert!(result.found);
        let titles: Vec<_> = result.subsections.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["A", "B"]);
    }

    #[test]
    fn test_render_section_not_found() {
        let server = OutlineServer::default();
        let reply = server.md_render_section(Parameters(section_request("Conclusion")));
        assert_eq!(reply, "Section not found: Conclusion");
    }

    #[test]
    fn test_section_from_path_follows_file_edits() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("paper.md");
        std::fs::write(&path, PAPER).unwrap();

        let server = OutlineServer::default();
        let request = || SectionRequest {
            path: Some(path.display().to_string()),
            markdown: None,
            title: "A".to_string(),
        };
        let first = server.md_render_section(Parameters(request()));
        let second = server.md_render_section(Parameters(request()));
        assert_eq!(first, "# A\n\na-text\n\n## A.1\n\ndeep\n\n");
        assert_eq!(first, second);

        std::fs::write(&path, "# A\nrewritten\n").unwrap();
        std::fs::File::options()
            .write(true)
            .open(&path)
            .unwrap()
            .set_modified(std::time::SystemTime::now() + std::time::Duration::from_secs(60))
            .unwrap();
        let third = server.md_render_section(Parameters(request()));
        assert_eq!(third, "# A\n\nrewritten");
    }

    #[test]
    fn test_export_section() {
        let dir = tempfile::tempdir().unwrap();
        let server = OutlineServer::default();
        let json = server.md_export_section(Parameters(ExportSectionRequest {
            path: None,
            markdown: Some(PAPER.to_string()),
            title: "Background".to_string(),
            output_dir: Some(dir.path().display().to_string()),
        }));
        let result: ExportResult = serde_json::from_str(&json).unwrap();
        assert_eq!(result.subsection_count, 2);
        assert_eq!(
            std::fs::read_to_string(dir.path().join("Background.md")).unwrap(),
            "# Background\n\nintro text\n\n## A\n\na-text\n\n## B\n\nb-text\n\n"
        );
    }
}
