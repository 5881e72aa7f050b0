//! Rates segments for how well they would serve as quiz material.
//!
//! Scoring short-circuits on the first disqualification:
//!
//! 1. blocked title topic (introduction, summary, ...) → 0
//! 2. cleaned prose shorter than the minimum → 0
//! 3. otherwise cleaned length plus a fixed bonus per distinct keyword.

use aho_corasick::BuildError;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use super::config::ScoringConfig;
use super::keywords::KeywordMatcher;
use super::section::Segment;
use crate::util::text::collapse_whitespace;

static FENCED_CODE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)```.*?```").expect("valid fenced code pattern"));
static IMAGE_REF: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"!\[[^\]\n]*\]\([^)\n]*\)").expect("valid image pattern"));
static LINK_REF: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[[^\]\n]*\]\([^)\n]*\)").expect("valid link pattern"));

static DEFAULT_SCORER: Lazy<SegmentScorer> = Lazy::new(|| {
    SegmentScorer::new(&ScoringConfig::default()).expect("default vocabularies build")
});

/// A segment with its quiz-worthiness score. A score of 0 means disqualified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoredSegment {
    #[serde(flatten)]
    pub segment: Segment,
    pub score: usize,
    /// How the score was derived. Diagnostic only.
    pub reasons: Vec<String>,
}

impl ScoredSegment {
    #[must_use]
    pub fn is_disqualified(&self) -> bool {
        self.score == 0
    }
}

/// Strips fenced code, images and inline links, then collapses whitespace.
#[must_use]
pub fn clean_text(content: &str) -> String {
    let without_code = FENCED_CODE.replace_all(content, " ");
    let without_images = IMAGE_REF.replace_all(&without_code, " ");
    let without_links = LINK_REF.replace_all(&without_images, " ");
    collapse_whitespace(&without_links)
}

/// Scores a segment with the default vocabularies and constants.
#[must_use]
pub fn score_segment(segment: &Segment) -> ScoredSegment {
    DEFAULT_SCORER.score(segment)
}

/// Scorer with its vocabularies compiled once.
#[derive(Debug, Clone)]
pub struct SegmentScorer {
    blocked_titles: KeywordMatcher,
    bonus_keywords: KeywordMatcher,
    min_clean_chars: usize,
    keyword_bonus: usize,
}

impl SegmentScorer {
    /// # Errors
    /// Returns [`BuildError`] if either vocabulary cannot be compiled.
    pub fn new(config: &ScoringConfig) -> Result<Self, BuildError> {
        Ok(Self {
            blocked_titles: KeywordMatcher::new(&config.blocked_title_terms)?,
            bonus_keywords: KeywordMatcher::new(&config.bonus_keywords)?,
            min_clean_chars: config.min_clean_chars,
            keyword_bonus: config.keyword_bonus,
        })
    }

    #[must_use]
    pub fn score(&self, segment: &Segment) -> ScoredSegment {
        let mut reasons = Vec::new();
        let score = self.rate(segment, &mut reasons);
        if score == 0 {
            tracing::debug!(segment = %segment.id, reasons = ?reasons, "segment disqualified");
        }
        ScoredSegment {
            segment: segment.clone(),
            score,
            reasons,
        }
    }

    /// Scores every segment, preserving order.
    #[must_use]
    pub fn score_all(&self, segments: &[Segment]) -> Vec<ScoredSegment> {
        segments.iter().map(|segment| self.score(segment)).collect()
    }

    fn rate(&self, segment: &Segment, reasons: &mut Vec<String>) -> usize {
        let lowered_title = segment.title.to_lowercase();
        if let Some(term) = self.blocked_titles.first_match(&lowered_title) {
            reasons.push(format!("title contains blocked topic \"{term}\""));
            return 0;
        }

        let cleaned = clean_text(&segment.content);
        let length = cleaned.chars().count();
        if length < self.min_clean_chars {
            reasons.push(format!(
                "cleaned text too short ({length} < {} chars)",
                self.min_clean_chars
            ));
            return 0;
        }
        reasons.push(format!("base score from cleaned length: {length}"));

        let lowered = cleaned.to_lowercase();
        let mut score = length;
        for keyword in self.bonus_keywords.distinct_matches(&lowered) {
            score = score.saturating_add(self.keyword_bonus);
            reasons.push(format!("keyword \"{keyword}\": +{}", self.keyword_bonus));
        }
        score
    }
}
