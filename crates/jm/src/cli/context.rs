//! Shared context for running CLI commands.

use std::{
    env,
    path::{Path, PathBuf},
    process::ExitCode,
};

use jm_config::Config;
use jm_match::Corpus;

use crate::dataset::load_corpus;

/// Command execution context built once per CLI invocation.
pub struct CommandContext {
    /// Current working directory.
    pub cwd: PathBuf,
    /// Loaded configuration (may be default if no config files found).
    pub config: Config,
    /// Postings loaded for this invocation.
    corpus: Option<Corpus>,
}

impl CommandContext {
    /// Loads the current directory and configuration.
    pub fn load() -> Result<Self, ExitCode> {
        let cwd = current_dir_or_failure()?;
        let config = load_config_or_failure(&cwd)?;
        Ok(Self {
            cwd,
            config,
            corpus: None,
        })
    }

    /// Loads only the current directory, skipping configuration parsing.
    ///
    /// Used by `init`, which must work even when an existing config file is invalid.
    pub fn load_cwd_only() -> Result<Self, ExitCode> {
        let cwd = current_dir_or_failure()?;
        Ok(Self {
            cwd,
            config: Config::default(),
            corpus: None,
        })
    }

    /// Returns the dataset path: `override_path` relative to the cwd, else the configured path.
    pub fn dataset_path(&self, override_path: Option<&Path>) -> Result<PathBuf, ExitCode> {
        if let Some(path) = override_path {
            return Ok(self.cwd.join(path));
        }
        self.config.dataset.path.clone().ok_or_else(|| {
            eprintln!("error: no dataset configured");
            eprintln!("Set [dataset] path in .jm.toml (see 'jm init') or pass --dataset.");
            ExitCode::FAILURE
        })
    }

    /// Returns the postings, loading the dataset on first use.
    pub fn corpus(&mut self, override_path: Option<&Path>) -> Result<&Corpus, ExitCode> {
        let corpus = match self.corpus.take() {
            Some(corpus) => corpus,
            None => {
                let path = self.dataset_path(override_path)?;
                load_corpus(&path, &self.config.dataset).map_err(|e| {
                    eprintln!("error: {e}");
                    ExitCode::FAILURE
                })?
            }
        };
        Ok(self.corpus.insert(corpus))
    }
}

/// Returns the current working directory or exits with a consistent error.
fn current_dir_or_failure() -> Result<PathBuf, ExitCode> {
    env::current_dir().map_err(|e| {
        eprintln!("error: could not determine current directory: {e}");
        ExitCode::FAILURE
    })
}

/// Loads configuration from the provided directory or exits with an error.
fn load_config_or_failure(cwd: &Path) -> Result<Config, ExitCode> {
    Config::load(cwd).map_err(|e| {
        eprintln!("error: failed to load configuration: {e}");
        ExitCode::FAILURE
    })
}
