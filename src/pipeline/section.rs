//! Splits lesson markdown into titled segments.
//!
//! Only `##` and `###` headings open a segment. `#` and `####`+ headings are
//! ordinary content of whatever segment encloses them. The markers must be
//! followed by a space; `##\tTitle` is content.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::util::text::slugify;

static SEGMENT_HEADING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#{2,3} [ \t]*(\S.*)$").expect("valid segment heading pattern"));

/// One titled slice of a lesson, in document order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub id: String,
    pub title: String,
    pub content: String,
    /// Position of the heading among all opened segments. Strictly increasing
    /// but not necessarily dense, because empty segments are dropped.
    pub index: usize,
}

struct OpenSegment {
    title: String,
    index: usize,
    buffer: String,
}

impl OpenSegment {
    fn close(self) -> Option<Segment> {
        let content = self.buffer.trim();
        if content.is_empty() {
            return None;
        }
        Some(Segment {
            id: slugify(&self.title),
            title: self.title,
            content: content.to_string(),
            index: self.index,
        })
    }
}

/// Returns the trimmed title if `line` opens a segment.
fn heading_title(line: &str) -> Option<&str> {
    SEGMENT_HEADING
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|title| title.as_str().trim())
}

/// Parses markdown into segments.
///
/// Lines before the first segment heading are discarded. A heading whose body
/// is blank produces no segment but still consumes an index.
#[must_use]
pub fn parse_sections(markdown: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut current: Option<OpenSegment> = None;
    let mut next_index = 0usize;

    for line in markdown.lines() {
        if let Some(title) = heading_title(line) {
            if let Some(segment) = current.take().and_then(OpenSegment::close) {
                segments.push(segment);
            }
            current = Some(OpenSegment {
                title: title.to_string(),
                index: next_index,
                buffer: String::new(),
            });
            next_index += 1;
        } else if let Some(open) = current.as_mut() {
            open.buffer.push_str(line);
            open.buffer.push('\n');
        }
    }

    if let Some(segment) = current.and_then(OpenSegment::close) {
        segments.push(segment);
    }

    tracing::debug!(
        headings = next_index,
        segments = segments.len(),
        "lesson parsed into segments"
    );
    segments
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn parses_level_two_and_three_headings() {
        let markdown = "# Lesson\nlead text\n## First\nalpha\n### Second\nbeta\n";
        let segments = parse_sections(markdown);

        assert_eq!(
            segments,
            vec![
                Segment {
                    id: "first".to_string(),
                    title: "First".to_string(),
                    content: "alpha".to_string(),
                    index: 0,
                },
                Segment {
                    id: "second".to_string(),
                    title: "Second".to_string(),
                    content: "beta".to_string(),
                    index: 1,
                },
            ]
        );
    }

    #[test]
    fn deeper_headings_stay_in_enclosing_segment() {
        let markdown = "## Outer\nintro line\n#### Detail\nnested body\n# Top\nmore";
        let segments = parse_sections(markdown);

        assert_eq!(segments.len(), 1);
        assert_eq!(
            segments[0].content,
            "intro line\n#### Detail\nnested body\n# Top\nmore"
        );
    }

    #[test]
    fn empty_segment_is_dropped_but_consumes_index() {
        let markdown = "## Empty\n\n   \n## Filled\nbody";
        let segments = parse_sections(markdown);

        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].title, "Filled");
        assert_eq!(segments[0].index, 1);
    }

    #[test]
    fn content_keeps_inner_blank_lines_and_trims_edges() {
        let markdown = "## Title\n\n\nfirst\n\nsecond\n\n\n";
        let segments = parse_sections(markdown);

        assert_eq!(segments[0].content, "first\n\nsecond");
    }

    #[test]
    fn crlf_input_is_handled() {
        let segments = parse_sections("## Title  \r\nbody\r\n");
        assert_eq!(segments[0].title, "Title");
        assert_eq!(segments[0].content, "body");
    }

    #[rstest]
    #[case("##NoSpace")]
    #[case("#### Too deep")]
    #[case("# Too shallow")]
    #[case(" ## Indented")]
    #[case("##   ")]
    #[case("##\tTabbed")]
    fn non_segment_headings_are_content(#[case] line: &str) {
        assert!(heading_title(line).is_none());
    }

    #[test]
    fn tab_after_markers_is_content() {
        let segments = parse_sections("## Real\nbody\n##\tNot a heading\nmore");

        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].content, "body\n##\tNot a heading\nmore");
    }

    #[test]
    fn no_headings_yields_nothing() {
        assert!(parse_sections("plain text\nwithout headings").is_empty());
        assert!(parse_sections("").is_empty());
    }

    #[test]
    fn indices_strictly_increase() {
        let markdown = "## A\na\n## B\n## C\nc\n### D\nd";
        let indices: Vec<usize> = parse_sections(markdown).iter().map(|s| s.index).collect();
        assert_eq!(indices, vec![0, 2, 3]);
    }
}
