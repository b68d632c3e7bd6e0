use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::markdown::ContentKeying;

/// Settings read from `mdoutline.toml` and `MDOUTLINE_*` environment variables.
#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    #[serde(default)]
    pub content_keying: ContentKeying,
    /// Shell command acting as the summarization collaborator.
    #[serde(default)]
    pub summarizer_command: Option<String>,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("output")
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            output_dir: default_output_dir(),
            content_keying: ContentKeying::default(),
            summarizer_command: None,
        }
    }
}

impl Settings {
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from(Path::new("mdoutline"))
    }

    /// Load from an optional config file (extension may be omitted), then the environment.
    pub fn load_from(file: &Path) -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::File::from(file).required(false))
            .add_source(config::Environment::with_prefix("MDOUTLINE"))
            .build()?
            .try_deserialize()
    }
}
