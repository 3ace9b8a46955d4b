//! Wiki configuration.
//!
//! Loaded from an optional `wiki.toml` in the working directory; every key
//! is optional and CLI flags override whatever the file says. Keys use
//! kebab-case:
//!
//! ```toml
//! source-dir = "wiki"
//! output-dir = "_html"
//! template-dir = "templates"     # omit to use the built-in templates
//! document-extensions = ["md"]
//! ```

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const CONFIG_FILE: &str = "wiki.toml";

pub const DEFAULT_SOURCE_DIR: &str = "wiki";
pub const DEFAULT_OUTPUT_DIR: &str = "_html";
pub const DEFAULT_EXTENSION: &str = "md";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read {CONFIG_FILE}: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse {CONFIG_FILE}: {0}")]
    Toml(#[from] toml::de::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct WikiConfig {
    /// Directory holding the wiki's source documents.
    pub source_dir: PathBuf,
    /// Directory the rendered site is written into.
    pub output_dir: PathBuf,
    /// Template directory; `None` means the built-in templates.
    pub template_dir: Option<PathBuf>,
    /// Recognized document extensions (suffix-matched against file names).
    pub document_extensions: Vec<String>,
}

impl Default for WikiConfig {
    fn default() -> Self {
        WikiConfig {
            source_dir: PathBuf::from(DEFAULT_SOURCE_DIR),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            template_dir: None,
            document_extensions: vec![DEFAULT_EXTENSION.to_string()],
        }
    }
}

impl WikiConfig {
    /// Load `wiki.toml` from `dir`, falling back to defaults when the file
    /// does not exist. A present-but-malformed file is an error, not a
    /// silent fallback.
    pub fn load(dir: &Path) -> Result<Self, ConfigError> {
        let path = dir.join(CONFIG_FILE);
        if !path.exists() {
            return Ok(WikiConfig::default());
        }
        let text = fs::read_to_string(&path)?;
        Ok(toml::from_str(&text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn defaults_match_conventions() {
        let config = WikiConfig::default();
        assert_eq!(config.source_dir, PathBuf::from("wiki"));
        assert_eq!(config.output_dir, PathBuf::from("_html"));
        assert_eq!(config.template_dir, None);
        assert_eq!(config.document_extensions, vec!["md".to_string()]);
    }

    #[test]
    fn missing_file_yields_defaults() {
        let tmp = TempDir::new().unwrap();
        let config = WikiConfig::load(tmp.path()).unwrap();
        assert_eq!(config, WikiConfig::default());
    }

    #[test]
    fn partial_file_overrides_only_named_keys() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(
            tmp.path().join(CONFIG_FILE),
            "source-dir = \"docs\"\ndocument-extensions = [\"md\", \"markdown\"]\n",
        )
        .unwrap();

        let config = WikiConfig::load(tmp.path()).unwrap();
        assert_eq!(config.source_dir, PathBuf::from("docs"));
        assert_eq!(config.output_dir, PathBuf::from("_html"));
        assert_eq!(
            config.document_extensions,
            vec!["md".to_string(), "markdown".to_string()]
        );
    }

    #[test]
    fn malformed_file_is_an_error() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join(CONFIG_FILE), "source-dir = [not toml").unwrap();
        assert!(matches!(
            WikiConfig::load(tmp.path()),
            Err(ConfigError::Toml(_))
        ));
    }
}
