use std::path::PathBuf;

/// Failures the outline core can raise.
///
/// Headerless input and unresolved titles are not errors; they produce an
/// empty outline and an unfound [`SectionResult`](crate::markdown::SectionResult).
#[derive(Debug, thiserror::Error)]
pub enum OutlineError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl OutlineError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        OutlineError::InvalidInput(msg.into())
    }
}
