// file: src/config.rs
// description: application configuration management with toml support
// reference: https://docs.rs/config

use crate::engine::chunker::{DEFAULT_CHUNK_SIZE, DEFAULT_OVERLAP_SIZE};
use crate::error::{Result, RetrievalError};
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";
pub const ENV_PREFIX: &str = "PASSAGE_SEARCH";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub corpus: CorpusConfig,
    #[serde(default)]
    pub index: IndexConfig,
    #[serde(default)]
    pub query: QueryConfig,
}

/// Where documents come from and which files qualify.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CorpusConfig {
    pub path: PathBuf,
    pub extensions: Vec<String>,
    pub skip_patterns: Vec<String>,
    pub max_file_size_mb: usize,
    pub parse_markdown: bool,
}

/// Chunking parameters, in characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct IndexConfig {
    pub chunk_size: usize,
    pub overlap_size: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct QueryConfig {
    pub top_k: usize,
    pub min_score: f64,
    pub preview_chars: usize,
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("./documents"),
            extensions: vec!["md".to_string(), "markdown".to_string(), "txt".to_string()],
            skip_patterns: vec![".git/".to_string(), "*.lock".to_string()],
            max_file_size_mb: 10,
            parse_markdown: true,
        }
    }
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            overlap_size: DEFAULT_OVERLAP_SIZE,
        }
    }
}

impl IndexConfig {
    /// Rejects pairs that would stop the chunk cursor from advancing.
    pub fn validate(&self) -> Result<()> {
        if self.chunk_size == 0 || self.overlap_size >= self.chunk_size {
            return Err(RetrievalError::InvalidChunking {
                chunk_size: self.chunk_size,
                overlap_size: self.overlap_size,
            });
        }
        Ok(())
    }
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            top_k: 4,
            min_score: 0.0,
            preview_chars: 300,
        }
    }
}

impl Config {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        dotenv().ok();

        let mut builder = config::Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path));
        } else {
            builder = builder
                .add_source(config::File::from(Path::new(DEFAULT_CONFIG_PATH)).required(false));
        }

        builder = builder.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .map_err(|e| RetrievalError::Config(e.to_string()))?;

        let config: Config = settings
            .try_deserialize()
            .map_err(|e| RetrievalError::Config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    pub fn default_config() -> Self {
        Self::default()
    }

    pub fn validate(&self) -> Result<()> {
        self.index.validate()?;

        if self.query.top_k == 0 {
            return Err(RetrievalError::Config(
                "top_k must be greater than 0".to_string(),
            ));
        }

        if !self.query.min_score.is_finite() || self.query.min_score < 0.0 {
            return Err(RetrievalError::Config(format!(
                "min_score must be a non-negative number, got {}",
                self.query.min_score
            )));
        }

        if self.corpus.extensions.is_empty() {
            return Err(RetrievalError::Config(
                "at least one corpus extension is required".to_string(),
            ));
        }

        Ok(())
    }
}
