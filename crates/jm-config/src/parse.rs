//! Configuration file parsing.
//!
//! Parses individual `.jm.toml` files into `RawConfig` structures whose fields are all optional,
//! so partial files can be layered during merging.

use std::{fs, path::Path};

use serde::Deserialize;
use serde_with::{OneOrMany, serde_as};
#[cfg(test)]
use toml::de::Error as TomlError;

use crate::ConfigError;

/// Raw configuration as parsed directly from a TOML file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// When true, stop discovery here - ignore parent and global configs.
    pub root: Option<bool>,
    /// General matching settings.
    pub settings: Option<RawSettings>,
    /// Job posting dataset section.
    pub dataset: Option<RawDataset>,
    /// Embedding model section.
    pub embedding: Option<RawEmbedding>,
}

/// Raw general settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawSettings {
    /// Number of postings returned per match.
    #[serde(alias = "limit")]
    pub top_k: Option<usize>,
    /// Number of keywords kept from a résumé.
    pub keyword_limit: Option<usize>,
    /// Similarity strategy name.
    pub strategy: Option<String>,
    /// Largest résumé file accepted, in bytes.
    pub max_document_bytes: Option<u64>,
}

/// Raw dataset definition.
#[serde_as]
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawDataset {
    /// Path to the postings CSV file.
    pub path: Option<String>,
    /// Candidate column names for the posting description, tried in order.
    #[serde_as(as = "Option<OneOrMany<_>>")]
    pub description_column: Option<Vec<String>>,
    /// Column holding the job title.
    pub title_column: Option<String>,
    /// Column holding the company name.
    pub company_column: Option<String>,
    /// Columns joined with ", " to form the location.
    #[serde_as(as = "Option<OneOrMany<_>>")]
    pub location_columns: Option<Vec<String>>,
    /// Column holding a link to the posting or company.
    pub link_column: Option<String>,
    /// Column holding the posting's skills list.
    pub skills_column: Option<String>,
}

/// Raw embedding settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawEmbedding {
    /// Hugging Face model identifier.
    pub model: Option<String>,
    /// Number of postings encoded per forward pass.
    pub batch_size: Option<usize>,
    /// Use the lexical strategy when the model cannot be loaded.
    pub fallback_to_lexical: Option<bool>,
    /// Directory for downloaded model files.
    pub cache_dir: Option<String>,
}

/// Parses a configuration file from disk.
pub fn parse_config_file(path: &Path) -> Result<RawConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;

    parse_config_str(&contents, path)
}

/// Parses configuration from a TOML string.
///
/// The `path` parameter is used for error reporting.
pub fn parse_config_str(contents: &str, path: &Path) -> Result<RawConfig, ConfigError> {
    toml::from_str(contents).map_err(|source| ConfigError::ParseToml {
        path: path.to_path_buf(),
        source,
    })
}

/// Parses configuration from a TOML string without path context.
#[cfg(test)]
pub fn parse_config(contents: &str) -> Result<RawConfig, TomlError> {
    toml::from_str(contents)
}

/// Checks if a config file has `root = true` set.
///
/// Returns false if the file cannot be read or parsed.
pub fn is_root_config(path: &Path) -> bool {
    let Ok(contents) = fs::read_to_string(path) else {
        return false;
    };
    let Ok(config) = toml::from_str::<RawConfig>(&contents) else {
        return false;
    };
    config.root == Some(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_has_no_sections() {
        let config = parse_config_str("", Path::new("test.toml")).unwrap();
        assert!(config.root.is_none());
        assert!(config.settings.is_none());
        assert!(config.dataset.is_none());
        assert!(config.embedding.is_none());
    }

    #[test]
    fn partial_settings_leave_other_fields_unset() {
        let toml = r#"
[settings]
top_k = 3
strategy = "embedding"
"#;
        let config = parse_config_str(toml, Path::new("test.toml")).unwrap();
        let settings = config.settings.unwrap();
        assert_eq!(settings.top_k, Some(3));
        assert_eq!(settings.strategy.as_deref(), Some("embedding"));
        assert!(settings.keyword_limit.is_none());
        assert!(settings.max_document_bytes.is_none());
    }

    #[test]
    fn limit_is_an_alias_for_top_k() {
        let config = parse_config_str("[settings]\nlimit = 8\n", Path::new("t")).unwrap();
        assert_eq!(config.settings.unwrap().top_k, Some(8));
    }

    #[test]
    fn description_column_accepts_string_or_list() {
        let single = parse_config_str(
            "[dataset]\ndescription_column = \"description\"\n",
            Path::new("t"),
        )
        .unwrap();
        assert_eq!(
            single.dataset.unwrap().description_column,
            Some(vec!["description".to_string()])
        );

        let many = parse_config_str(
            "[dataset]\ndescription_column = [\"job_text\", \"description\"]\n",
            Path::new("t"),
        )
        .unwrap();
        assert_eq!(
            many.dataset.unwrap().description_column,
            Some(vec!["job_text".to_string(), "description".to_string()])
        );
    }

    #[test]
    fn dataset_section_without_columns() {
        let config = parse_config_str("[dataset]\npath = \"jobs.csv\"\n", Path::new("t")).unwrap();
        let dataset = config.dataset.unwrap();
        assert_eq!(dataset.path.as_deref(), Some("jobs.csv"));
        assert!(dataset.description_column.is_none());
        assert!(dataset.location_columns.is_none());
    }

    #[test]
    fn embedding_section() {
        let toml = r#"
[embedding]
model = "thenlper/gte-small"
batch_size = 8
fallback_to_lexical = false
"#;
        let config = parse_config_str(toml, Path::new("test.toml")).unwrap();
        let embedding = config.embedding.unwrap();
        assert_eq!(embedding.model.as_deref(), Some("thenlper/gte-small"));
        assert_eq!(embedding.batch_size, Some(8));
        assert_eq!(embedding.fallback_to_lexical, Some(false));
        assert!(embedding.cache_dir.is_none());
    }

    #[test]
    fn malformed_toml_reports_path() {
        let err = parse_config_str("[settings\n", Path::new("/tmp/bad.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::ParseToml { .. }));
        assert!(err.to_string().contains("/tmp/bad.toml"));
    }

    #[test]
    fn root_flag_is_detected() {
        let test_dir = crate::test_support::TestDir::new();
        let root = test_dir.create_root_config("a");
        let plain = test_dir.create_config("b");
        assert!(is_root_config(&root));
        assert!(!is_root_config(&plain));
    }
}
