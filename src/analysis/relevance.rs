//! Keyword relevance scoring of outline sections.

use std::collections::HashSet;

use super::options::RelevanceConfig;
use crate::model::{DocumentOutline, ScoredSection};

/// Job descriptions containing one of these ask for a summary instead of a ranking.
const SUMMARY_TRIGGERS: [&str; 2] = ["summarize", "summary"];

/// Whether a job description requests summary mode.
pub fn is_summary_request(job: &str) -> bool {
    let job = job.to_lowercase();
    SUMMARY_TRIGGERS.iter().any(|t| job.contains(t))
}

/// Scores outline entries by keyword overlap with a persona and job.
#[derive(Debug, Clone, Default)]
pub struct RelevanceScorer {
    config: RelevanceConfig,
}

impl RelevanceScorer {
    /// Create a scorer with the default keyword limits.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a scorer with custom keyword limits.
    pub fn with_config(config: RelevanceConfig) -> Self {
        Self { config }
    }

    /// Get the active configuration.
    pub fn config(&self) -> &RelevanceConfig {
        &self.config
    }

    /// Query keywords: lowercase whitespace tokens of `persona job`.
    ///
    /// Tokens shorter than the configured minimum are dropped and only the
    /// first `max_keywords` survive. Duplicates are kept.
    pub fn keywords(&self, persona: &str, job: &str) -> Vec<String> {
        format!("{} {}", persona, job)
            .to_lowercase()
            .split_whitespace()
            .filter(|w| w.chars().count() >= self.config.min_keyword_len)
            .take(self.config.max_keywords)
            .map(str::to_string)
            .collect()
    }

    /// Rank outline entries against precomputed keywords.
    ///
    /// An entry scores one point per distinct keyword it contains; a keyword
    /// repeated in the query still counts once. Entries matching no keyword
    /// are dropped. The sort is stable, so equal scores keep document order.
    pub fn rank(&self, outline: &DocumentOutline, keywords: &[String]) -> Vec<ScoredSection> {
        let mut sections: Vec<ScoredSection> = outline
            .entries()
            .filter(|entry| !entry.text.is_empty())
            .filter_map(|entry| {
                let text = entry.text.to_lowercase();
                let matched: HashSet<&str> = keywords
                    .iter()
                    .map(String::as_str)
                    .filter(|k| text.contains(k))
                    .collect();
                let score = matched.len() as u32;
                (score > 0).then(|| ScoredSection {
                    entry: entry.clone(),
                    score,
                })
            })
            .collect();

        sections.sort_by(|a, b| b.score.cmp(&a.score));
        sections
    }

    /// Extract keywords and rank the outline in one step.
    pub fn score(&self, outline: &DocumentOutline, persona: &str, job: &str) -> Vec<ScoredSection> {
        let keywords = self.keywords(persona, job);
        self.rank(outline, &keywords)
    }
}

/// Query keywords with the default limits.
pub fn extract_keywords(persona: &str, job: &str) -> Vec<String> {
    RelevanceScorer::new().keywords(persona, job)
}

/// Rank outline entries with the default limits.
pub fn score_relevance(outline: &DocumentOutline, persona: &str, job: &str) -> Vec<ScoredSection> {
    RelevanceScorer::new().score(outline, persona, job)
}
