// path: src/config.rs
use std::path::{Path, PathBuf};

use anchorgram_text::{BigramSet, Normalizer, StopwordSet};
use anyhow::Context;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct PipelineConfig {
    #[serde(default = "default_stopwords_path")]
    pub stopwords_path: PathBuf,
    #[serde(default = "default_bindex_path")]
    pub bindex_path: PathBuf,
    /// Last column of every result line.
    #[serde(default = "default_run_tag")]
    pub run_tag: String,
    /// Hits requested per query from the search backend.
    #[serde(default = "default_top_k")]
    pub top_k: usize,
}

fn default_stopwords_path() -> PathBuf {
    "stopwords/stopwords.txt".into()
}
fn default_bindex_path() -> PathBuf {
    "bindex/BINDEX.txt".into()
}
fn default_run_tag() -> String {
    "STANDARD".into()
}
fn default_top_k() -> usize {
    100
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            stopwords_path: default_stopwords_path(),
            bindex_path: default_bindex_path(),
            run_tag: default_run_tag(),
            top_k: default_top_k(),
        }
    }
}

impl PipelineConfig {
    pub fn from_env() -> Self {
        let stopwords_path = std::env::var("AG_STOPWORDS")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_stopwords_path());
        let bindex_path = std::env::var("AG_BINDEX")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_bindex_path());
        let run_tag = std::env::var("AG_RUN_TAG").unwrap_or_else(|_| default_run_tag());
        let top_k = std::env::var("AG_TOP_K")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(default_top_k());

        Self {
            stopwords_path,
            bindex_path,
            run_tag,
            top_k,
        }
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("read config {}", path.display()))?;
        serde_json::from_str(&raw).with_context(|| format!("parse config {}", path.display()))
    }
}

/// Read-only lookup sets for one process, loaded once and shared by
/// reference with every normalization call.
#[derive(Debug, Clone, Default)]
pub struct Resources {
    pub stopwords: StopwordSet,
    pub bigrams: BigramSet,
}

impl Resources {
    pub fn new(stopwords: StopwordSet, bigrams: BigramSet) -> Self {
        Self { stopwords, bigrams }
    }

    /// Missing artifacts degrade to empty sets (see the loaders).
    pub fn load(cfg: &PipelineConfig) -> Self {
        Self {
            stopwords: StopwordSet::load_or_empty(&cfg.stopwords_path),
            bigrams: BigramSet::load_or_empty(&cfg.bindex_path),
        }
    }

    /// Extraction runs before any BINDEX exists; only stopwords are needed.
    pub fn load_stopwords(cfg: &PipelineConfig) -> Self {
        Self {
            stopwords: StopwordSet::load_or_empty(&cfg.stopwords_path),
            bigrams: BigramSet::default(),
        }
    }

    pub fn normalizer(&self) -> Normalizer<'_> {
        Normalizer::new(&self.stopwords)
    }
}
