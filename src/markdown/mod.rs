pub mod document;
pub mod outline;
pub mod section;

pub use document::MarkdownDocument;
pub use outline::{build_outline, build_outline_with, ContentKeying, HeadingNode};
pub use section::{render_section, resolve_section, SectionResult};
