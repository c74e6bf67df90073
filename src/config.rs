use crate::checker::tokenizer::WordPolicy;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const LOCAL_CONFIG_FILE: &str = ".spelltag.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Which characters form a word.
    pub word_policy: WordPolicy,

    /// Compiled fst dictionary or plain word list.
    pub dictionary: Option<PathBuf>,

    /// Words ignored from the start of every session.
    pub ignore_words: Vec<String>,

    /// Regexes; a word fully matching one is never flagged.
    pub ignore_patterns: Vec<String>,
}

/// Command line values that override file configuration.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub word_policy: Option<WordPolicy>,
    pub dictionary: Option<PathBuf>,
    pub ignore_words: Vec<String>,
}

impl Config {
    /// Load configuration with priority: CLI args > local config > global config > defaults
    pub fn load(overrides: Overrides) -> Result<Self> {
        let mut config = Self::default();

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                config = config.merge(Self::from_file(&global_path)?);
            }
        }

        let local_path = PathBuf::from(LOCAL_CONFIG_FILE);
        if local_path.exists() {
            config = config.merge(Self::from_file(&local_path)?);
        }

        Ok(config.apply(overrides))
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    fn merge(mut self, other: Self) -> Self {
        if other.word_policy != WordPolicy::default() {
            self.word_policy = other.word_policy;
        }
        if other.dictionary.is_some() {
            self.dictionary = other.dictionary;
        }
        // Ignore lists accumulate across layers.
        self.ignore_words.extend(other.ignore_words);
        self.ignore_patterns.extend(other.ignore_patterns);
        self
    }

    fn apply(mut self, overrides: Overrides) -> Self {
        if let Some(policy) = overrides.word_policy {
            self.word_policy = policy;
        }
        if let Some(dictionary) = overrides.dictionary {
            self.dictionary = Some(dictionary);
        }
        self.ignore_words.extend(overrides.ignore_words);
        self
    }

    pub fn global_config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "spelltag").map(|dirs| dirs.config_dir().join("config.toml"))
    }
}
