//! Picks the segment a quiz question will be generated from.
//!
//! ## Selection
//!
//! Every segment at or above the quality threshold is an equally valid pick,
//! so the choice is uniform over that pool. Repeated requests for the same
//! lesson and position therefore spread across the good material instead of
//! always landing on the single best segment.
//!
//! ## Fallback
//!
//! When nothing clears the threshold the highest-scoring segment overall is
//! returned (first one on ties), even if its score is 0. Only an empty input
//! yields `None`.

use rand::rngs::{StdRng, ThreadRng};
use rand::{Rng, SeedableRng};
use serde::Serialize;

use super::score::ScoredSegment;

/// Source of uniform indices for the selector.
pub trait RandomSource {
    /// Returns an index in `0..len`. `len` is never zero.
    fn next_index(&mut self, len: usize) -> usize;
}

/// [`RandomSource`] backed by any `rand` generator.
#[derive(Debug, Clone)]
pub struct RngSource<R>(R);

impl<R: Rng> RngSource<R> {
    #[must_use]
    pub fn new(rng: R) -> Self {
        Self(rng)
    }
}

impl RngSource<ThreadRng> {
    #[must_use]
    pub fn thread() -> Self {
        Self(rand::rng())
    }
}

impl RngSource<StdRng> {
    /// Reproducible source, used for replays.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn next_index(&mut self, len: usize) -> usize {
        self.0.random_range(0..len)
    }
}

/// Always answers with the same index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedIndex(pub usize);

impl RandomSource for FixedIndex {
    fn next_index(&mut self, _len: usize) -> usize {
        self.0
    }
}

/// Which path produced the pick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionStrategy {
    /// Uniform draw from the above-threshold pool.
    Random { pool: usize },
    /// Nothing cleared the threshold; best overall score was used.
    BestEffort,
}

/// A chosen segment and how it was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pick<'a> {
    pub segment: &'a ScoredSegment,
    pub strategy: SelectionStrategy,
}

/// Selects one segment from `scored`.
pub fn select_section<'a, R>(
    scored: &'a [ScoredSegment],
    threshold: usize,
    rng: &mut R,
) -> Option<Pick<'a>>
where
    R: RandomSource + ?Sized,
{
    if scored.is_empty() {
        return None;
    }

    let pool: Vec<&ScoredSegment> = scored.iter().filter(|s| s.score >= threshold).collect();
    if !pool.is_empty() {
        let index = rng.next_index(pool.len()).min(pool.len() - 1);
        return Some(Pick {
            segment: pool[index],
            strategy: SelectionStrategy::Random { pool: pool.len() },
        });
    }

    let best = best_effort(scored)?;
    tracing::info!(
        segment = %best.segment.id,
        score = best.score,
        threshold,
        "no segment cleared the quality threshold; using best-effort fallback"
    );
    Some(Pick {
        segment: best,
        strategy: SelectionStrategy::BestEffort,
    })
}

/// Highest score, earliest position on ties.
fn best_effort(scored: &[ScoredSegment]) -> Option<&ScoredSegment> {
    scored.iter().reduce(|best, candidate| {
        if candidate.score > best.score {
            candidate
        } else {
            best
        }
    })
}
