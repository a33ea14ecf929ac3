use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::keywords::selection::DEFAULT_TOP_FRACTION;
use crate::keywords::stopwords::{StopWordSource, StopWords};
use crate::replies::quote::DEFAULT_QUOTE_MARKERS;

/// Central configuration loaded from environment variables.
///
/// Every setting has a default, so an empty environment is a valid
/// configuration. The .env file is loaded automatically at startup via
/// dotenvy.
#[derive(Debug, Clone)]
pub struct Config {
    /// Where keyword files and per-keyword-file result directories go
    pub output_dir: PathBuf,
    /// Literal markers that introduce an embedded quote
    pub quote_markers: Vec<String>,
    pub stop_words: StopWordSource,
    /// Words of this many characters or fewer are not scored
    pub min_word_len: usize,
    /// Share of the keyword ranking used for keyword density
    pub keyword_fraction: f64,
    /// Whether the naive resolver also links on verbatim text overlap
    pub naive_text_overlap: bool,
    /// Whether thread files start with a header row
    pub input_header: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            quote_markers: DEFAULT_QUOTE_MARKERS.iter().map(|m| m.to_string()).collect(),
            stop_words: StopWordSource::Builtin,
            min_word_len: 0,
            keyword_fraction: DEFAULT_TOP_FRACTION,
            naive_text_overlap: true,
            input_header: false,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self> {
        let defaults = Self::default();

        let quote_markers = match env::var("FORUMGRAPH_QUOTE_MARKERS") {
            Ok(raw) => {
                let markers: Vec<String> = raw
                    .split('|')
                    .map(|m| m.trim().to_string())
                    .filter(|m| !m.is_empty())
                    .collect();
                if markers.is_empty() {
                    anyhow::bail!("FORUMGRAPH_QUOTE_MARKERS is set but names no marker");
                }
                markers
            }
            Err(_) => defaults.quote_markers,
        };

        let stop_words = match env::var("FORUMGRAPH_STOP_WORDS").as_deref() {
            Ok("builtin") | Err(_) => StopWordSource::Builtin,
            Ok("iso") => StopWordSource::Iso,
            Ok(path) => StopWordSource::File(PathBuf::from(path)),
        };

        let keyword_fraction: f64 = parse_var("FORUMGRAPH_KEYWORD_FRACTION")?
            .unwrap_or(defaults.keyword_fraction);
        if !(0.0..=1.0).contains(&keyword_fraction) {
            anyhow::bail!(
                "FORUMGRAPH_KEYWORD_FRACTION must be between 0 and 1, got {keyword_fraction}"
            );
        }

        Ok(Self {
            output_dir: env::var("FORUMGRAPH_OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.output_dir),
            quote_markers,
            stop_words,
            min_word_len: parse_var("FORUMGRAPH_MIN_WORD_LEN")?.unwrap_or(defaults.min_word_len),
            keyword_fraction,
            naive_text_overlap: parse_var("FORUMGRAPH_NAIVE_TEXT_OVERLAP")?
                .unwrap_or(defaults.naive_text_overlap),
            input_header: parse_var("FORUMGRAPH_INPUT_HEADER")?.unwrap_or(defaults.input_header),
        })
    }

    /// Build the immutable analysis settings (compiles the stop-word
    /// pattern, reads the stop-word file if one is configured).
    pub fn analysis(&self) -> Result<AnalysisConfig> {
        let stop_words = StopWords::load(&self.stop_words)?;
        Ok(AnalysisConfig {
            stop_words,
            quote_markers: self.quote_markers.clone(),
            min_word_len: self.min_word_len,
            keyword_fraction: self.keyword_fraction,
            naive_text_overlap: self.naive_text_overlap,
            input_header: self.input_header,
        })
    }
}

/// Settings shared by every stage of one run. Built once, then only read.
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    pub stop_words: StopWords,
    pub quote_markers: Vec<String>,
    pub min_word_len: usize,
    pub keyword_fraction: f64,
    pub naive_text_overlap: bool,
    pub input_header: bool,
}

impl AnalysisConfig {
    /// Defaults with the built-in stop-word list.
    pub fn builtin() -> Result<Self> {
        Config::default().analysis()
    }
}

fn parse_var<T>(name: &str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .with_context(|| format!("{name} has an invalid value: {raw:?}")),
        Err(_) => Ok(None),
    }
}
