//! Analysis configuration.
//!
//! Every heuristic threshold used by the analysis passes lives here. The
//! defaults are the tuned values; configuration files only need to name the
//! fields they override.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Thresholds and weights for outline inference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutlineConfig {
    /// Fragments longer than this (in characters) are never headings
    pub max_text_len: usize,
    /// `size > avg * large_ratio` marks a large fragment
    pub large_ratio: f64,
    /// Lines shorter than this count as short
    pub short_line_len: usize,
    /// All-caps text must be longer than this
    pub all_caps_min_len: usize,
    /// All-caps text earns its bonus only below this length
    pub all_caps_bonus_max_len: usize,

    pub bold_weight: u32,
    pub large_weight: u32,
    pub numbered_weight: u32,
    pub all_caps_weight: u32,
    pub colon_weight: u32,
    pub form_field_weight: u32,
    pub short_line_weight: u32,

    /// Score that qualifies a fragment on its own
    pub min_score: u32,
    /// Lower score that qualifies a bold or large fragment
    pub styled_min_score: u32,

    /// `size >= max * h1_max_ratio` marks an H1
    pub h1_max_ratio: f64,
    /// `size >= avg * h2_avg_ratio` marks an H2
    pub h2_avg_ratio: f64,
    /// The title must be shorter than this
    pub title_max_len: usize,
    /// Maximum number of outline entries (title excluded)
    pub max_entries: usize,

    /// Fallback pass accepts lengths strictly above this
    pub fallback_min_len: usize,
    /// Fallback pass accepts lengths strictly below this
    pub fallback_max_len: usize,
}

impl Default for OutlineConfig {
    fn default() -> Self {
        Self {
            max_text_len: 120,
            large_ratio: 1.1,
            short_line_len: 80,
            all_caps_min_len: 3,
            all_caps_bonus_max_len: 50,
            bold_weight: 3,
            large_weight: 2,
            numbered_weight: 2,
            all_caps_weight: 2,
            colon_weight: 1,
            form_field_weight: 1,
            short_line_weight: 1,
            min_score: 3,
            styled_min_score: 2,
            h1_max_ratio: 0.9,
            h2_avg_ratio: 1.3,
            title_max_len: 100,
            max_entries: 50,
            fallback_min_len: 5,
            fallback_max_len: 100,
        }
    }
}

impl OutlineConfig {
    /// Create a configuration with default thresholds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum number of outline entries.
    pub fn with_max_entries(mut self, max_entries: usize) -> Self {
        self.max_entries = max_entries;
        self
    }

    /// Set the ratio over the average size that marks a large fragment.
    pub fn with_large_ratio(mut self, ratio: f64) -> Self {
        self.large_ratio = ratio;
        self
    }

    /// Reject configurations that cannot produce a sensible outline.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("large_ratio", self.large_ratio),
            ("h1_max_ratio", self.h1_max_ratio),
            ("h2_avg_ratio", self.h2_avg_ratio),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(Error::Config(format!("{} must be positive, got {}", name, value)));
            }
        }
        if self.fallback_min_len >= self.fallback_max_len {
            return Err(Error::Config(
                "fallback_min_len must be below fallback_max_len".to_string(),
            ));
        }
        Ok(())
    }
}

/// Keyword extraction limits for relevance scoring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RelevanceConfig {
    /// Maximum number of keywords taken from the query
    pub max_keywords: usize,
    /// Shortest token (in characters) kept as a keyword
    pub min_keyword_len: usize,
}

impl Default for RelevanceConfig {
    fn default() -> Self {
        Self {
            max_keywords: 10,
            min_keyword_len: 3,
        }
    }
}

impl RelevanceConfig {
    /// Create a configuration with default limits.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the keyword cap.
    pub fn with_max_keywords(mut self, max_keywords: usize) -> Self {
        self.max_keywords = max_keywords;
        self
    }
}

/// Combined analysis configuration, as read from a JSON file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub outline: OutlineConfig,
    pub relevance: RelevanceConfig,
}

impl AnalysisConfig {
    /// Parse a configuration from JSON text.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| Error::Config(e.to_string()))?;
        config.outline.validate()?;
        Ok(config)
    }

    /// Read a configuration file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}
