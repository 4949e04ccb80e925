//! Configuration management for the suggestion helper.
//!
//! Model names come from environment variables with built-in defaults.
//! Everything else is read from an optional `~/.config/zsh-llm-suggestions/config.toml`.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Environment variable overriding the `generate` model.
pub const GENERATE_MODEL_ENV: &str = "ZSH_OLLAMA_GENERATE_MODEL";
/// Environment variable overriding the `explain` model.
pub const EXPLAIN_MODEL_ENV: &str = "ZSH_OLLAMA_EXPLAIN_MODEL";

/// Profile name created by `setup` and used by `generate` by default.
// Spelling must match profiles created by earlier releases.
pub const GENERATE_PROFILE: &str = "zsh-llm-suggesions-generate";
/// Profile name created by `setup` and used by `explain` by default.
pub const EXPLAIN_PROFILE: &str = "zsh-llm-suggesions-explain";

/// A named ollama profile and the modelfile it is built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub name: &'static str,
    pub modelfile: &'static str,
}

/// Profiles created by `setup`, in creation order.
pub const PROFILES: [Profile; 2] = [
    Profile {
        name: GENERATE_PROFILE,
        modelfile: "zsh-llm-suggestions-ollama.generate.modelfile",
    },
    Profile {
        name: EXPLAIN_PROFILE,
        modelfile: "zsh-llm-suggestions-ollama.explain.modelfile",
    },
];

impl Profile {
    /// Path of the modelfile, relative to `dir` when one is given.
    pub fn modelfile_path(&self, dir: Option<&Path>) -> PathBuf {
        match dir {
            Some(dir) => dir.join(self.modelfile),
            None => PathBuf::from(self.modelfile),
        }
    }
}

/// Resolve a value from the environment, falling back to `default` when the
/// variable is unset or empty.
pub fn resolve<F>(lookup: F, key: &str, default: &str) -> String
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(value) if !value.is_empty() => {
            debug!("Using {}={}", key, value);
            value
        }
        _ => {
            debug!("{} not set, using default {}", key, default);
            default.to_string()
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// External runner settings.
    pub runner: RunnerConfig,
    /// Profile setup settings.
    pub setup: SetupConfig,
    /// Explanation highlighting settings.
    pub highlight: HighlightConfig,
}

/// Which executable to invoke for profile creation and inference.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    /// Runner program (default: ollama).
    pub program: String,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            program: "ollama".to_string(),
        }
    }
}

/// Where `setup` looks for modelfiles.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct SetupConfig {
    /// Directory containing the modelfiles. Relative to the working directory when unset.
    pub modelfile_dir: Option<PathBuf>,
}

/// Terminal highlighting of `explain` output.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    /// Highlight explanations when the highlighter is available.
    pub enabled: bool,
    /// syntect theme name.
    pub theme: String,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            theme: "base16-ocean.dark".to_string(),
        }
    }
}

impl Config {
    /// Get the config directory path.
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|p| p.join("zsh-llm-suggestions"))
            .context("Could not determine config directory")
    }

    /// Get the config file path.
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Load configuration from file, using defaults if not found.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        Self::load_from(&path)
    }

    /// Load configuration from a specific path, using defaults if it does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }
}
