//! Configuration merging.
//!
//! Layers parsed `.jm.toml` files into one resolved `Config`. Scalars follow "closest file
//! wins"; paths resolve against the directory of the file that set them.

use std::path::{Path, PathBuf};

use crate::{
    Config, ConfigError, DatasetSettings, EmbeddingSettings, Settings,
    parse::{RawConfig, RawDataset, RawEmbedding, RawSettings},
    resolve::{anchor_path, resolve_dataset_path},
};

/// A parsed config file with its source path.
pub struct ParsedConfig {
    /// Path to the config file.
    pub path: PathBuf,
    /// Parsed raw configuration.
    pub config: RawConfig,
}

impl ParsedConfig {
    /// Directory containing this config file.
    fn dir(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new("."))
    }
}

/// Merges configuration files into a single resolved `Config`.
///
/// Configs are given highest precedence first (closest to CWD) and global last.
pub fn merge_configs(configs: &[ParsedConfig]) -> Result<Config, ConfigError> {
    if configs.is_empty() {
        return Ok(Config::default());
    }

    let settings = merge_settings(configs);
    let dataset = merge_dataset(configs)?;
    let embedding = merge_embedding(configs)?;
    let config_root = configs.first().map(|c| c.dir().to_path_buf());

    Ok(Config {
        settings,
        dataset,
        embedding,
        config_root,
    })
}

/// Merges general settings, taking the highest-precedence value for each field.
fn merge_settings(configs: &[ParsedConfig]) -> Settings {
    let mut result = Settings::default();

    // Lowest precedence first so closer files overwrite.
    for parsed in configs.iter().rev() {
        if let Some(ref settings) = parsed.config.settings {
            apply_raw_settings(&mut result, settings);
        }
    }

    result
}

/// Applies raw settings to result, overwriting any present values.
fn apply_raw_settings(result: &mut Settings, raw: &RawSettings) {
    if let Some(v) = raw.top_k {
        result.top_k = v;
    }
    if let Some(v) = raw.keyword_limit {
        result.keyword_limit = v;
    }
    if let Some(ref v) = raw.strategy {
        result.strategy = v.trim().to_ascii_lowercase();
    }
    if let Some(v) = raw.max_document_bytes {
        result.max_document_bytes = v;
    }
}

/// Merges dataset settings and resolves the dataset path.
fn merge_dataset(configs: &[ParsedConfig]) -> Result<DatasetSettings, ConfigError> {
    let mut result = DatasetSettings::default();
    let mut path_source: Option<(&str, &Path)> = None;

    for parsed in configs.iter().rev() {
        if let Some(ref dataset) = parsed.config.dataset {
            apply_raw_dataset(&mut result, dataset);
            if let Some(ref path) = dataset.path {
                path_source = Some((path.as_str(), parsed.dir()));
            }
        }
    }

    // Only the winning path is resolved; shadowed ones may legitimately be stale.
    if let Some((path, dir)) = path_source {
        result.path = Some(resolve_dataset_path(path, dir)?);
    }

    Ok(result)
}

/// Applies raw dataset column settings to result.
fn apply_raw_dataset(result: &mut DatasetSettings, raw: &RawDataset) {
    if let Some(ref v) = raw.description_column {
        result.description_column = v.clone();
    }
    if let Some(ref v) = raw.title_column {
        result.title_column = v.clone();
    }
    if let Some(ref v) = raw.company_column {
        result.company_column = v.clone();
    }
    if let Some(ref v) = raw.location_columns {
        result.location_columns = v.clone();
    }
    if let Some(ref v) = raw.link_column {
        result.link_column = v.clone();
    }
    if let Some(ref v) = raw.skills_column {
        result.skills_column = v.clone();
    }
}

/// Merges embedding settings.
fn merge_embedding(configs: &[ParsedConfig]) -> Result<EmbeddingSettings, ConfigError> {
    let mut result = EmbeddingSettings::default();

    for parsed in configs.iter().rev() {
        if let Some(ref embedding) = parsed.config.embedding {
            apply_raw_embedding(&mut result, embedding, parsed)?;
        }
    }

    Ok(result)
}

/// Applies raw embedding settings to result, rejecting a zero batch size.
fn apply_raw_embedding(
    result: &mut EmbeddingSettings,
    raw: &RawEmbedding,
    parsed: &ParsedConfig,
) -> Result<(), ConfigError> {
    if let Some(ref v) = raw.model {
        result.model = v.clone();
    }
    if let Some(v) = raw.batch_size {
        if v == 0 {
            return Err(ConfigError::Invalid {
                path: parsed.path.clone(),
                key: "embedding.batch_size".into(),
                message: "must be at least 1".into(),
            });
        }
        result.batch_size = v;
    }
    if let Some(v) = raw.fallback_to_lexical {
        result.fallback_to_lexical = v;
    }
    if let Some(ref v) = raw.cache_dir {
        result.cache_dir = Some(anchor_path(v, parsed.dir())?);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{parse::parse_config_str, test_support::TestDir};

    /// Parses `toml` as if it lived at `path`.
    fn parsed(path: PathBuf, toml: &str) -> ParsedConfig {
        ParsedConfig {
            config: parse_config_str(toml, &path).unwrap(),
            path,
        }
    }

    #[test]
    fn empty_merge_is_default() {
        let result = merge_configs(&[]).unwrap();
        assert_eq!(result.settings.top_k, 5);
        assert!(result.dataset.path.is_none());
        assert!(result.config_root.is_none());
    }

    #[test]
    fn closest_scalar_wins() {
        let test_dir = TestDir::new();
        let high = parsed(
            test_dir.path().join("project/.jm.toml"),
            "[settings]\ntop_k = 10\n",
        );
        let low = parsed(
            test_dir.path().join(".jm.toml"),
            "[settings]\ntop_k = 3\nkeyword_limit = 12\nstrategy = \" Embedding \"\n",
        );

        let result = merge_configs(&[high, low]).unwrap();

        assert_eq!(result.settings.top_k, 10);
        assert_eq!(result.settings.keyword_limit, 12);
        assert_eq!(result.settings.strategy, "embedding");
        assert_eq!(
            result.config_root,
            Some(test_dir.path().join("project"))
        );
    }

    #[test]
    fn dataset_path_resolves_relative_to_its_own_file() {
        let test_dir = TestDir::new();
        let csv = test_dir.create_csv("jobs.csv");
        let high = parsed(
            test_dir.path().join("project/.jm.toml"),
            "[dataset]\ntitle_column = \"title\"\n",
        );
        let low = parsed(
            test_dir.path().join(".jm.toml"),
            "[dataset]\npath = \"jobs.csv\"\ntitle_column = \"position\"\n",
        );

        let result = merge_configs(&[high, low]).unwrap();

        assert_eq!(result.dataset.path, Some(csv.canonicalize().unwrap()));
        assert_eq!(result.dataset.title_column, "title");
        assert_eq!(result.dataset.description_column, vec!["job_text"]);
    }

    #[test]
    fn shadowed_dataset_path_is_not_resolved() {
        let test_dir = TestDir::new();
        let csv = test_dir.create_csv("project/local.csv");
        let high = parsed(
            test_dir.path().join("project/.jm.toml"),
            "[dataset]\npath = \"local.csv\"\n",
        );
        let low = parsed(
            test_dir.path().join(".jm.toml"),
            "[dataset]\npath = \"gone.csv\"\n",
        );

        let result = merge_configs(&[high, low]).unwrap();

        assert_eq!(result.dataset.path, Some(csv.canonicalize().unwrap()));
    }

    #[test]
    fn missing_dataset_fails_merge() {
        let test_dir = TestDir::new();
        let config = parsed(
            test_dir.path().join(".jm.toml"),
            "[dataset]\npath = \"nope.csv\"\n",
        );
        assert!(matches!(
            merge_configs(&[config]),
            Err(ConfigError::PathResolution { .. })
        ));
    }

    #[test]
    fn embedding_cache_dir_is_anchored() {
        let test_dir = TestDir::new();
        let config = parsed(
            test_dir.path().join(".jm.toml"),
            "[embedding]\ncache_dir = \"models\"\nbatch_size = 4\n",
        );

        let result = merge_configs(&[config]).unwrap();

        assert_eq!(result.embedding.cache_dir, Some(test_dir.path().join("models")));
        assert_eq!(result.embedding.batch_size, 4);
        assert!(result.embedding.fallback_to_lexical);
    }

    #[test]
    fn zero_batch_size_is_rejected() {
        let test_dir = TestDir::new();
        let config = parsed(
            test_dir.path().join(".jm.toml"),
            "[embedding]\nbatch_size = 0\n",
        );
        let err = merge_configs(&[config]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { ref key, .. } if key == "embedding.batch_size"));
    }
}
