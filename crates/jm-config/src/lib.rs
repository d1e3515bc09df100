//! Configuration system for jm.
//!
//! jm reads TOML files named `.jm.toml`. Configuration is resolved by walking up the directory
//! tree from the current working directory, collecting every `.jm.toml` found, then loading
//! `~/.jm.toml` as the global config with lowest precedence.

#![warn(missing_docs)]

mod discovery;
mod error;
mod merge;
mod parse;
mod resolve;
mod templates;
#[cfg(test)]
mod test_support;
mod validate;

use std::path::{Path, PathBuf};

pub use discovery::{CONFIG_FILENAME, discover_config_files, global_config_path, is_global_config};
pub use error::ConfigError;
pub use merge::{ParsedConfig, merge_configs};
pub use parse::{
    RawConfig, RawDataset, RawEmbedding, RawSettings, parse_config_file, parse_config_str,
};
pub use resolve::{anchor_path, resolve_dataset_path};
use serde::{Deserialize, Serialize};
pub use templates::{global_template, local_template};
pub use validate::ConfigWarning;
use validate::validate_config;

/// Default résumé size limit: 20 MiB.
pub const DEFAULT_MAX_DOCUMENT_BYTES: u64 = 20 * 1024 * 1024;

/// Top-level merged configuration for jm.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// General matching settings.
    pub settings: Settings,
    /// Job posting dataset.
    pub dataset: DatasetSettings,
    /// Embedding model settings.
    pub embedding: EmbeddingSettings,
    /// Directory containing the most specific config file.
    pub config_root: Option<PathBuf>,
}

impl Config {
    /// Loads configuration by discovering and merging all relevant `.jm.toml` files.
    ///
    /// Returns `Ok(Config::default())` if no configuration files are found.
    pub fn load(cwd: &Path) -> Result<Self, ConfigError> {
        let config_files = discover_config_files(cwd);
        Self::load_from_files(&config_files)
    }

    /// Loads configuration from config file paths given highest precedence first.
    pub fn load_from_files(files: &[PathBuf]) -> Result<Self, ConfigError> {
        if files.is_empty() {
            return Ok(Self::default());
        }

        let parsed: Vec<ParsedConfig> = files
            .iter()
            .map(|path| {
                let config = parse_config_file(path)?;
                Ok(ParsedConfig {
                    path: path.clone(),
                    config,
                })
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;

        merge_configs(&parsed)
    }

    /// Validates the configuration and returns any warnings.
    pub fn validate(&self) -> Vec<ConfigWarning> {
        validate_config(self)
    }

    /// Serializes the effective settings in `.jm.toml` form.
    pub fn settings_to_toml(&self) -> Result<String, ConfigError> {
        let serializable = SerializableSettings {
            settings: &self.settings,
            dataset: &self.dataset,
            embedding: &self.embedding,
        };
        Ok(toml::to_string_pretty(&serializable)?)
    }
}

/// General matching settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    /// Number of postings returned per match.
    pub top_k: usize,
    /// Number of keywords kept from a résumé.
    pub keyword_limit: usize,
    /// Similarity strategy name (`tfidf` or `embedding`).
    pub strategy: String,
    /// Largest résumé file accepted, in bytes.
    pub max_document_bytes: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            top_k: 5,
            keyword_limit: 30,
            strategy: String::from("tfidf"),
            max_document_bytes: DEFAULT_MAX_DOCUMENT_BYTES,
        }
    }
}

/// Where the postings live and how their columns are named.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DatasetSettings {
    /// Resolved path to the postings CSV.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    /// Candidate description columns, first present wins.
    pub description_column: Vec<String>,
    /// Job title column.
    pub title_column: String,
    /// Company name column.
    pub company_column: String,
    /// Columns joined with ", " to form the location.
    pub location_columns: Vec<String>,
    /// Link column.
    pub link_column: String,
    /// Skills column.
    pub skills_column: String,
}

impl Default for DatasetSettings {
    fn default() -> Self {
        Self {
            path: None,
            description_column: vec![String::from("job_text")],
            title_column: String::from("job_title"),
            company_column: String::from("company_name"),
            location_columns: vec![
                String::from("company_address_locality"),
                String::from("company_address_region"),
            ],
            link_column: String::from("company_website"),
            skills_column: String::from("skills"),
        }
    }
}

/// Embedding model settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct EmbeddingSettings {
    /// Hugging Face model identifier.
    pub model: String,
    /// Number of postings encoded per forward pass.
    pub batch_size: usize,
    /// Use the lexical strategy when the model cannot be loaded.
    pub fallback_to_lexical: bool,
    /// Directory for downloaded model files; the hub default when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache_dir: Option<PathBuf>,
}

impl Default for EmbeddingSettings {
    fn default() -> Self {
        Self {
            model: String::from("sentence-transformers/all-MiniLM-L6-v2"),
            batch_size: 32,
            fallback_to_lexical: true,
            cache_dir: None,
        }
    }
}

/// Borrowed view of the settings sections for TOML output.
#[derive(Serialize)]
struct SerializableSettings<'a> {
    /// General settings.
    settings: &'a Settings,
    /// Dataset settings.
    dataset: &'a DatasetSettings,
    /// Embedding settings.
    embedding: &'a EmbeddingSettings,
}
