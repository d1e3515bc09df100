//! Configuration validation.
//!
//! Reports non-fatal problems with a loaded configuration.

use std::fmt;

use crate::Config;

/// Strategy names the matcher understands.
const KNOWN_STRATEGIES: &[&str] = &["tfidf", "lexical", "embedding", "dense"];

/// A non-fatal warning about the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigWarning {
    /// No dataset path is configured.
    NoDatasetConfigured,
    /// `top_k` is zero, so every match returns nothing.
    ZeroTopK,
    /// `keyword_limit` is zero, so the lexical query is always empty.
    ZeroKeywordLimit,
    /// The strategy name is not recognised.
    UnknownStrategy {
        /// The configured name.
        name: String,
    },
    /// The dataset has no description column candidates.
    NoDescriptionColumn,
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoDatasetConfigured => write!(f, "no [dataset] path is configured"),
            Self::ZeroTopK => write!(f, "settings.top_k is 0; matches will be empty"),
            Self::ZeroKeywordLimit => {
                write!(f, "settings.keyword_limit is 0; no keywords will be kept")
            }
            Self::UnknownStrategy { name } => write!(
                f,
                "unknown strategy '{name}' (expected one of: {})",
                KNOWN_STRATEGIES.join(", ")
            ),
            Self::NoDescriptionColumn => {
                write!(f, "dataset.description_column lists no columns")
            }
        }
    }
}

/// Validates the configuration and returns any warnings.
pub fn validate_config(config: &Config) -> Vec<ConfigWarning> {
    let mut warnings = Vec::new();

    if config.dataset.path.is_none() {
        warnings.push(ConfigWarning::NoDatasetConfigured);
    }
    if config.dataset.description_column.is_empty() {
        warnings.push(ConfigWarning::NoDescriptionColumn);
    }
    if config.settings.top_k == 0 {
        warnings.push(ConfigWarning::ZeroTopK);
    }
    if config.settings.keyword_limit == 0 {
        warnings.push(ConfigWarning::ZeroKeywordLimit);
    }
    if !KNOWN_STRATEGIES.contains(&config.settings.strategy.as_str()) {
        warnings.push(ConfigWarning::UnknownStrategy {
            name: config.settings.strategy.clone(),
        });
    }

    warnings
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn default_config_only_lacks_a_dataset() {
        let warnings = validate_config(&Config::default());
        assert_eq!(warnings, vec![ConfigWarning::NoDatasetConfigured]);
    }

    #[test]
    fn degenerate_values_are_reported() {
        let mut config = Config::default();
        config.dataset.path = Some(PathBuf::from("/data/jobs.csv"));
        config.dataset.description_column.clear();
        config.settings.top_k = 0;
        config.settings.keyword_limit = 0;
        config.settings.strategy = "bm25".into();

        let warnings = validate_config(&config);

        assert_eq!(
            warnings,
            vec![
                ConfigWarning::NoDescriptionColumn,
                ConfigWarning::ZeroTopK,
                ConfigWarning::ZeroKeywordLimit,
                ConfigWarning::UnknownStrategy {
                    name: "bm25".into()
                },
            ]
        );
    }

    #[test]
    fn unknown_strategy_message_lists_choices() {
        let warning = ConfigWarning::UnknownStrategy { name: "x".into() };
        assert_eq!(
            warning.to_string(),
            "unknown strategy 'x' (expected one of: tfidf, lexical, embedding, dense)"
        );
    }
}
