//! Heuristic outline inference.
//!
//! Scores every fragment on a handful of typographic signals (size relative to
//! the document, boldness, casing, numbering, punctuation, line length) and
//! keeps the ones that look like headings. The first dominant heading becomes
//! the document title.

use std::collections::HashSet;

use regex::Regex;

use super::options::OutlineConfig;
use crate::model::{DocumentOutline, HeadingLevel, OutlineEntry, PageFragments, TextFragment};
use crate::parser::collect_fragments;

/// Size statistics over the whole fragment stream.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontStatistics {
    /// Mean fragment size
    pub avg_size: f64,
    /// Largest fragment size
    pub max_size: f64,
    /// Number of fragments observed
    pub count: usize,
}

impl FontStatistics {
    /// Compute statistics, or `None` for an empty stream.
    pub fn from_fragments(fragments: &[TextFragment]) -> Option<Self> {
        if fragments.is_empty() {
            return None;
        }

        let total: f64 = fragments.iter().map(|f| f.size).sum();
        let max_size = fragments
            .iter()
            .map(|f| f.size)
            .fold(f64::NEG_INFINITY, f64::max);

        Some(Self {
            avg_size: total / fragments.len() as f64,
            max_size,
            count: fragments.len(),
        })
    }
}

/// Typographic signals observed on one fragment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeadingSignals {
    pub large: bool,
    pub bold: bool,
    pub short_line: bool,
    pub numbered: bool,
    pub all_caps: bool,
    pub colon: bool,
    pub form_field: bool,
    /// Text length in characters
    pub len: usize,
}

impl HeadingSignals {
    /// Weighted heading score.
    pub fn score(&self, config: &OutlineConfig) -> u32 {
        let mut score = 0;
        if self.bold {
            score += config.bold_weight;
        }
        if self.large {
            score += config.large_weight;
        }
        if self.numbered {
            score += config.numbered_weight;
        }
        if self.all_caps && self.len < config.all_caps_bonus_max_len {
            score += config.all_caps_weight;
        }
        if self.colon {
            score += config.colon_weight;
        }
        if self.form_field {
            score += config.form_field_weight;
        }
        if self.short_line {
            score += config.short_line_weight;
        }
        score
    }

    /// Whether the fragment scores as a heading.
    pub fn qualifies(&self, config: &OutlineConfig) -> bool {
        let score = self.score(config);
        score >= config.min_score || (score >= config.styled_min_score && (self.bold || self.large))
    }
}

/// Outline inference with configurable thresholds.
#[derive(Debug, Clone)]
pub struct OutlineInferrer {
    config: OutlineConfig,
    numbered: Regex,
    numbered_prefix: Regex,
    form_field: Regex,
}

impl Default for OutlineInferrer {
    fn default() -> Self {
        Self::new()
    }
}

impl OutlineInferrer {
    /// Create an inferrer with the default thresholds.
    pub fn new() -> Self {
        Self::with_config(OutlineConfig::default())
    }

    /// Create an inferrer with custom thresholds.
    pub fn with_config(config: OutlineConfig) -> Self {
        Self {
            config,
            numbered: Regex::new(r"^[0-9]+\.?\s").unwrap(),
            numbered_prefix: Regex::new(r"^[0-9]+\.").unwrap(),
            form_field: Regex::new(r"^[A-Z][a-z]+.*:").unwrap(),
        }
    }

    /// Get the active configuration.
    pub fn config(&self) -> &OutlineConfig {
        &self.config
    }

    /// Infer an outline from extracted pages.
    pub fn infer_pages(&self, pages: &[PageFragments], parallel: bool) -> DocumentOutline {
        self.infer(&collect_fragments(pages, parallel))
    }

    /// Infer an outline from a document-ordered fragment stream.
    pub fn infer(&self, fragments: &[TextFragment]) -> DocumentOutline {
        let Some(stats) = FontStatistics::from_fragments(fragments) else {
            return DocumentOutline::default();
        };

        log::debug!(
            "Outline inference over {} fragments (avg size {:.2}, max size {:.1})",
            stats.count,
            stats.avg_size,
            stats.max_size
        );

        let config = &self.config;
        let mut title = String::new();
        let mut entries = Vec::new();
        let mut seen = HashSet::new();

        for fragment in fragments {
            let lower = fragment.text.to_lowercase();
            if seen.contains(&lower) || fragment.char_len() > config.max_text_len {
                continue;
            }
            seen.insert(lower);

            let signals = self.signals(fragment, &stats);
            if !signals.qualifies(config) {
                continue;
            }

            let level = if fragment.size >= stats.max_size * config.h1_max_ratio
                || (signals.bold && signals.large)
            {
                if title.is_empty() && signals.len < config.title_max_len {
                    title = fragment.text.clone();
                    continue;
                }
                HeadingLevel::H1
            } else if fragment.size >= stats.avg_size * config.h2_avg_ratio
                || (signals.bold && signals.numbered)
            {
                HeadingLevel::H2
            } else {
                HeadingLevel::H3
            };

            entries.push(OutlineEntry::new(level, fragment.text.clone(), fragment.page));
            if entries.len() >= config.max_entries {
                break;
            }
        }

        if entries.is_empty() {
            entries = self.fallback(fragments, &stats, &title);
            if !entries.is_empty() {
                log::debug!("Fallback pass produced {} entries", entries.len());
            }
        }

        entries.truncate(config.max_entries);
        DocumentOutline::new(title, entries)
    }

    /// Observe the heading signals of one fragment.
    pub fn signals(&self, fragment: &TextFragment, stats: &FontStatistics) -> HeadingSignals {
        let text = fragment.text.as_str();
        let len = fragment.char_len();

        HeadingSignals {
            large: fragment.size > stats.avg_size * self.config.large_ratio,
            bold: fragment.bold,
            short_line: len < self.config.short_line_len,
            numbered: self.numbered.is_match(text),
            all_caps: text == text.to_uppercase() && len > self.config.all_caps_min_len,
            colon: text.ends_with(':'),
            form_field: self.form_field.is_match(text),
            len,
        }
    }

    /// Permissive second pass used when nothing scored as a heading.
    fn fallback(
        &self,
        fragments: &[TextFragment],
        stats: &FontStatistics,
        title: &str,
    ) -> Vec<OutlineEntry> {
        let config = &self.config;
        let title = title.to_lowercase();
        let mut entries = Vec::new();

        for fragment in fragments {
            let text = fragment.text.as_str();
            let len = fragment.char_len();
            if len <= config.fallback_min_len || len >= config.fallback_max_len {
                continue;
            }
            if !title.is_empty() && text.to_lowercase() == title {
                continue;
            }

            if fragment.bold
                || fragment.size > stats.avg_size
                || self.numbered_prefix.is_match(text)
                || text.ends_with(':')
            {
                entries.push(OutlineEntry::new(HeadingLevel::H2, text, fragment.page));
                if entries.len() >= config.max_entries {
                    break;
                }
            }
        }

        entries
    }
}

/// Infer an outline from extracted pages with the default thresholds.
pub fn infer_outline(pages: &[PageFragments]) -> DocumentOutline {
    OutlineInferrer::new().infer_pages(pages, false)
}
