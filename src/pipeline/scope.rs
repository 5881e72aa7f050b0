//! Restricts segments to what the reader has already reached.
//!
//! The scoper never hands out a segment that sits after the reader's current
//! heading. When the position cannot be resolved it falls back to the first
//! segment only.

use serde::Serialize;

use super::section::Segment;
use crate::util::text::fuzzy_key;

/// How a reading position was interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ScopeMode {
    /// No position supplied; every segment is in scope.
    Review,
    /// The position matched the segment at this array position.
    UpTo { position: usize },
    /// The position matched nothing; only the first segment is in scope.
    Unmatched,
}

/// Resolves `current_id` against the segment list.
///
/// Only `None` means review mode. Otherwise the first segment whose id or
/// title has the same fuzzy key as `current_id` wins; an id with an empty key
/// (blank or punctuation only) matches nothing.
#[must_use]
pub fn resolve_scope(segments: &[Segment], current_id: Option<&str>) -> ScopeMode {
    let Some(current_id) = current_id else {
        return ScopeMode::Review;
    };

    let target = fuzzy_key(current_id);
    if target.is_empty() {
        return ScopeMode::Unmatched;
    }

    segments
        .iter()
        .position(|segment| {
            fuzzy_key(&segment.id) == target || fuzzy_key(&segment.title) == target
        })
        .map_or(ScopeMode::Unmatched, |position| ScopeMode::UpTo { position })
}

/// Returns the prefix of `segments` the reader is allowed to be quizzed on.
#[must_use]
pub fn scope_to_position<'a>(segments: &'a [Segment], current_id: Option<&str>) -> &'a [Segment] {
    let mode = resolve_scope(segments, current_id);
    apply_scope(segments, mode)
}

pub(crate) fn apply_scope(segments: &[Segment], mode: ScopeMode) -> &[Segment] {
    match mode {
        ScopeMode::Review => segments,
        ScopeMode::UpTo { position } => &segments[..=position],
        ScopeMode::Unmatched => {
            tracing::warn!(
                segments = segments.len(),
                "reading position matched no segment; limiting scope to the first segment"
            );
            &segments[..segments.len().min(1)]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::section::parse_sections;
    use rstest::rstest;

    fn lesson() -> Vec<Segment> {
        parse_sections(
            "## Intro\nwelcome\n## Ohm's Law\nV = IR\n## Series Circuits\nsum\n## Summary\nrecap",
        )
    }

    #[test]
    fn none_returns_everything() {
        let segments = lesson();
        assert_eq!(scope_to_position(&segments, None), segments.as_slice());
        assert_eq!(resolve_scope(&segments, None), ScopeMode::Review);
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("\t\n")]
    fn blank_id_only_exposes_first_segment(#[case] current: &str) {
        let segments =
            parse_sections("## Intro\na\n## Ohm's Law\nb\n## Final Exam Answers\nc");
        let scoped = scope_to_position(&segments, Some(current));

        assert_eq!(resolve_scope(&segments, Some(current)), ScopeMode::Unmatched);
        assert_eq!(scoped, &segments[..1]);
        assert_eq!(scoped[0].title, "Intro");
    }

    #[rstest]
    #[case("ohms-law", 1)]
    #[case("Ohm's Law", 1)]
    #[case("OHMS_LAW", 1)]
    #[case("series-circuits", 2)]
    #[case("intro", 0)]
    #[case("summary", 3)]
    fn matched_id_scopes_inclusive_prefix(#[case] current: &str, #[case] position: usize) {
        let segments = lesson();
        let scoped = scope_to_position(&segments, Some(current));

        assert_eq!(scoped.len(), position + 1);
        assert_eq!(scoped, &segments[..=position]);
    }

    #[test]
    fn unmatched_id_returns_first_segment_only() {
        let segments = lesson();
        let scoped = scope_to_position(&segments, Some("totally-unmatched-id"));

        assert_eq!(scoped, &segments[..1]);
        assert_eq!(
            resolve_scope(&segments, Some("totally-unmatched-id")),
            ScopeMode::Unmatched
        );
    }

    #[test]
    fn punctuation_only_id_is_unmatched() {
        let segments = lesson();
        assert_eq!(resolve_scope(&segments, Some("???")), ScopeMode::Unmatched);
    }

    #[test]
    fn unmatched_on_empty_input_is_empty() {
        assert!(scope_to_position(&[], Some("anything")).is_empty());
        assert!(scope_to_position(&[], None).is_empty());
    }

    #[test]
    fn first_match_wins_for_duplicate_titles() {
        let segments = parse_sections("## Recap\none\n## Other\ntwo\n## Recap\nthree");
        assert_eq!(
            resolve_scope(&segments, Some("recap")),
            ScopeMode::UpTo { position: 0 }
        );
    }

    #[test]
    fn cjk_positions_resolve() {
        let segments = parse_sections("## 欧姆定律\n内容\n## 串联电路\n内容");
        assert_eq!(
            resolve_scope(&segments, Some("串联电路")),
            ScopeMode::UpTo { position: 1 }
        );
    }
}
