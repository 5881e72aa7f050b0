//! Tunables for the scoring and selection stages.
//!
//! Defaults reproduce the documented behaviour exactly; `crate::config`
//! layers environment overrides on top.

use std::num::NonZeroUsize;

use super::keywords::{BLOCKED_TITLE_TERMS, BONUS_KEYWORDS};

/// Segments whose cleaned text is shorter than this are disqualified.
pub const MIN_CLEAN_CHARS: usize = 150;
/// Score added once per distinct bonus keyword.
pub const KEYWORD_BONUS: usize = 50;
/// Minimum score for a segment to enter the random selection pool.
pub const QUALITY_THRESHOLD: usize = 150;
/// Default upper bound on lesson size accepted by the orchestrator.
pub const MAX_DOCUMENT_BYTES: usize = 4 * 1024 * 1024;

/// Configuration for the segment scorer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoringConfig {
    pub blocked_title_terms: Vec<String>,
    pub bonus_keywords: Vec<String>,
    pub min_clean_chars: usize,
    pub keyword_bonus: usize,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            blocked_title_terms: BLOCKED_TITLE_TERMS.iter().map(ToString::to_string).collect(),
            bonus_keywords: BONUS_KEYWORDS.iter().map(ToString::to_string).collect(),
            min_clean_chars: MIN_CLEAN_CHARS,
            keyword_bonus: KEYWORD_BONUS,
        }
    }
}

/// Configuration for the section selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionConfig {
    pub quality_threshold: usize,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            quality_threshold: QUALITY_THRESHOLD,
        }
    }
}

/// Everything the orchestrator needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorConfig {
    pub scoring: ScoringConfig,
    pub selection: SelectionConfig,
    pub max_document_bytes: NonZeroUsize,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            scoring: ScoringConfig::default(),
            selection: SelectionConfig::default(),
            max_document_bytes: NonZeroUsize::new(MAX_DOCUMENT_BYTES)
                .unwrap_or(NonZeroUsize::MIN),
        }
    }
}
