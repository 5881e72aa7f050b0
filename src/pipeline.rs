//! Progress-aware quiz content selection.
//!
//! Four pure stages, composed by [`QuizContentSelector`]:
//!
//! 1. [`section::parse_sections`] splits lesson markdown into segments.
//! 2. [`scope::scope_to_position`] drops everything past the reader's position.
//! 3. [`score::SegmentScorer`] rates each remaining segment.
//! 4. [`select::select_section`] draws one segment from the good pool.
//!
//! The chosen segment is handed to question generation as a [`QuizSource`].

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::observability::metrics::Metrics;

pub mod config;
pub mod keywords;
pub mod scope;
pub mod score;
pub mod section;
pub mod select;

use config::SelectorConfig;
use scope::{ScopeMode, apply_scope, resolve_scope};
use score::{ScoredSegment, SegmentScorer};
use section::parse_sections;
use select::{RandomSource, SelectionStrategy, select_section};

#[derive(Debug, Error)]
pub enum SelectError {
    #[error("lesson is {size} bytes, above the {limit} byte limit")]
    DocumentTooLarge { size: usize, limit: usize },
    #[error("failed to compile scoring vocabulary")]
    Vocabulary(#[from] aho_corasick::BuildError),
}

/// The part of a segment that question generation receives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizSource {
    pub id: String,
    pub title: String,
    pub content: String,
}

impl From<&ScoredSegment> for QuizSource {
    fn from(scored: &ScoredSegment) -> Self {
        Self {
            id: scored.segment.id.clone(),
            title: scored.segment.title.clone(),
            content: scored.segment.content.clone(),
        }
    }
}

/// Result of one selection call, including what the stages saw.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectionOutcome {
    pub scope: ScopeMode,
    /// Segments produced by the parser.
    pub parsed: usize,
    /// Every in-scope segment with its score, in document order.
    pub scored: Vec<ScoredSegment>,
    pub strategy: Option<SelectionStrategy>,
    pub selected: Option<ScoredSegment>,
}

impl SelectionOutcome {
    /// `None` means the lesson has nothing quizzable yet.
    #[must_use]
    pub fn quiz_source(&self) -> Option<QuizSource> {
        self.selected.as_ref().map(QuizSource::from)
    }
}

/// Runs the whole pipeline for one lesson and reading position.
#[derive(Debug, Clone)]
pub struct QuizContentSelector {
    config: SelectorConfig,
    scorer: SegmentScorer,
    metrics: Option<Arc<Metrics>>,
}

impl QuizContentSelector {
    /// # Errors
    /// Returns [`SelectError::Vocabulary`] if the configured vocabularies
    /// cannot be compiled.
    pub fn new(config: SelectorConfig) -> Result<Self, SelectError> {
        let scorer = SegmentScorer::new(&config.scoring)?;
        Ok(Self {
            config,
            scorer,
            metrics: None,
        })
    }

    #[must_use]
    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    #[must_use]
    pub fn config(&self) -> &SelectorConfig {
        &self.config
    }

    /// Selects quiz material from `markdown` for a reader at `current_id`.
    ///
    /// # Errors
    /// Returns [`SelectError::DocumentTooLarge`] when the lesson exceeds the
    /// configured byte limit. Thin or empty lessons are not errors; they
    /// produce an outcome with no selection.
    pub fn select<R>(
        &self,
        markdown: &str,
        current_id: Option<&str>,
        rng: &mut R,
    ) -> Result<SelectionOutcome, SelectError>
    where
        R: RandomSource + ?Sized,
    {
        let limit = self.config.max_document_bytes.get();
        if markdown.len() > limit {
            return Err(SelectError::DocumentTooLarge {
                size: markdown.len(),
                limit,
            });
        }

        let segments = parse_sections(markdown);
        let scope = resolve_scope(&segments, current_id);
        let in_scope = apply_scope(&segments, scope);
        let scored = self.scorer.score_all(in_scope);
        let pick = select_section(&scored, self.config.selection.quality_threshold, rng);
        let strategy = pick.map(|p| p.strategy);
        let selected = pick.map(|p| p.segment.clone());

        tracing::debug!(
            parsed = segments.len(),
            in_scope = in_scope.len(),
            scope = ?scope,
            strategy = ?strategy,
            selected = selected.as_ref().map_or("", |s| s.segment.id.as_str()),
            "quiz content selection finished"
        );
        if let Some(metrics) = &self.metrics {
            metrics.record_selection(segments.len(), scope, strategy);
        }

        Ok(SelectionOutcome {
            scope,
            parsed: segments.len(),
            scored,
            strategy,
            selected,
        })
    }
}
