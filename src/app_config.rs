use anyhow::{Context, Result};
use log::warn;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::dispatcher::MAX_RETRIES;
use crate::language_utils;

/// Application configuration module
/// This module handles loading, validating and saving the configuration.
/// Settings live in a JSON file (`conf.json` by default) which is created
/// with defaults on first run; CLI flags override individual fields.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Source language code (ISO 639-1) or "auto"
    #[serde(default = "default_source_language")]
    pub source_language: String,

    /// Target language code (ISO 639-1)
    #[serde(default = "default_target_language")]
    pub target_language: String,

    /// Strip closed-caption marker lines from translated output
    #[serde(default = "default_true")]
    pub remove_closed_captions: bool,

    /// Retry attempts per failed batch, clamped to [0, 10]
    #[serde(default)]
    pub retries: u32,

    /// Keep the original file next to the translation
    #[serde(default = "default_true")]
    pub keep_source_file: bool,

    /// Give the translated file the original's name, renaming or removing
    /// the original according to `keep_source_file`
    #[serde(default)]
    pub save_output_as_main: bool,

    /// Directory for translated files; defaults to the source's directory
    #[serde(default)]
    pub output_dir: Option<PathBuf>,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,

    /// Optional log file appended to alongside stderr
    #[serde(default)]
    pub log_file: Option<PathBuf>,
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

fn default_source_language() -> String {
    "auto".to_string()
}

fn default_target_language() -> String {
    "en".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Config {
            source_language: default_source_language(),
            target_language: default_target_language(),
            remove_closed_captions: true,
            retries: 0,
            keep_source_file: true,
            save_output_as_main: false,
            output_dir: None,
            log_level: LogLevel::default(),
            log_file: None,
        }
    }
}

impl Config {
    /// Load configuration from a JSON file, creating the file with
    /// defaults when it does not exist yet
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            let config = Config::default();
            config.save(path)?;
            warn!("created default configuration at {:?}", path);
            return Ok(config);
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        let config: Config = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;
        Ok(config)
    }

    /// Persist the configuration as pretty-printed JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_json::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path.as_ref(), content)
            .with_context(|| format!("Failed to write config file: {:?}", path.as_ref()))
    }

    /// Validate and normalize the configuration in place.
    ///
    /// Language identifiers are normalized to ISO 639-1; an invalid
    /// target falls back to "en" (matching the tool's historic behavior)
    /// and retry counts above the ceiling are clamped with a warning.
    pub fn validate(&mut self) -> Result<()> {
        self.source_language = match language_utils::normalize_language(&self.source_language) {
            Ok(code) => code,
            Err(e) => {
                warn!("invalid source language ({}), using 'auto'", e);
                "auto".to_string()
            }
        };

        self.target_language = match language_utils::normalize_language(&self.target_language) {
            Ok(code) if code != "auto" => code,
            _ => {
                warn!("invalid target language '{}', using 'en'", self.target_language);
                "en".to_string()
            }
        };

        if self.retries > MAX_RETRIES {
            warn!("limited to {} retries, {} were requested", MAX_RETRIES, self.retries);
            self.retries = MAX_RETRIES;
        }

        Ok(())
    }
}
