//! Client configuration from environment variables.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::protocol::GenerateRequest;
use crate::source::{FilePuzzleSource, HttpPuzzleSource, PuzzleSource};
use crate::types::{DEFAULT_GRID_SIZE, DEFAULT_WORD_COUNT};

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8080/api/new_crossword";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Where puzzles come from and what to ask for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_url: String,
    pub theme: String,
    pub size: u32,
    pub word_count: u32,
    pub timeout: Duration,
    /// Play puzzles from this file instead of the service.
    pub puzzle_file: Option<PathBuf>,
    /// Write tracing output here.
    pub log_path: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            theme: String::new(),
            size: DEFAULT_GRID_SIZE,
            word_count: DEFAULT_WORD_COUNT,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            puzzle_file: None,
            log_path: None,
        }
    }
}

impl ClientConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup. Unparseable numbers fall back
    /// to their defaults; blank strings count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let text = |key: &str| {
            lookup(key)
                .map(|s| s.trim().to_string())
                .and_then(|s| if s.is_empty() { None } else { Some(s) })
        };
        let defaults = Self::default();

        let api_url = text("CROSSWORD_API_URL").unwrap_or(defaults.api_url);
        let theme = text("CROSSWORD_THEME").unwrap_or_default();
        let size = text("CROSSWORD_SIZE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.size);
        let word_count = text("CROSSWORD_WORD_COUNT")
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.word_count);
        let timeout = text("CROSSWORD_TIMEOUT_SECS")
            .and_then(|s| s.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(defaults.timeout);
        let puzzle_file = text("CROSSWORD_PUZZLE_FILE").map(PathBuf::from);
        let log_path = text("CROSSWORD_LOG_PATH");

        Self {
            api_url,
            theme,
            size,
            word_count,
            timeout,
            puzzle_file,
            log_path,
        }
    }

    /// The generation request for the configured settings.
    pub fn request(&self) -> GenerateRequest {
        GenerateRequest::new(self.theme.clone(), self.size, self.word_count).normalized()
    }

    /// Build the configured puzzle source.
    pub fn source(&self) -> anyhow::Result<Arc<dyn PuzzleSource>> {
        Ok(match &self.puzzle_file {
            Some(path) => Arc::new(FilePuzzleSource::new(path.clone())),
            None => Arc::new(HttpPuzzleSource::new(self.api_url.clone(), self.timeout)?),
        })
    }
}
