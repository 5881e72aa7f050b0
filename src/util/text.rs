//! Text helpers shared by the pipeline stages.
//!
//! Identifier normalization lives here so that the parser (which mints ids)
//! and the scoper (which compares client-reported ids) agree on one rule set.
use unicode_normalization::UnicodeNormalization;

/// Returns `true` for CJK unified ideographs (basic block, extension A/B and
/// the compatibility block).
#[must_use]
pub fn is_cjk_ideograph(ch: char) -> bool {
    matches!(
        u32::from(ch),
        0x3400..=0x4DBF | 0x4E00..=0x9FFF | 0xF900..=0xFAFF | 0x2_0000..=0x2_A6DF
    )
}

fn is_id_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || is_cjk_ideograph(ch)
}

/// Derives a URL-safe segment id from a heading title.
///
/// Whitespace, underscores and hyphens become word separators, collapsed into a
/// single `-`. Any other character that is neither ASCII alphanumeric nor a CJK
/// ideograph is dropped without splitting the word, so `Ohm's Law` and
/// `Ohm’s  Law` both become `ohms-law`.
#[must_use]
pub fn slugify(title: &str) -> String {
    let normalized = title.nfkc().collect::<String>().to_lowercase();
    let mut slug = String::with_capacity(normalized.len());
    let mut pending_separator = false;

    for ch in normalized.chars() {
        if ch.is_whitespace() || ch == '_' || ch == '-' {
            pending_separator = true;
        } else if is_id_char(ch) {
            if pending_separator && !slug.is_empty() {
                slug.push('-');
            }
            pending_separator = false;
            slug.push(ch);
        }
    }

    slug
}

/// Comparison key used to match a client-reported position against segment
/// ids and titles.
///
/// Keeps only lowercase ASCII letters, digits and CJK ideographs, so hyphens,
/// spaces and punctuation never affect equality.
#[must_use]
pub fn fuzzy_key(value: &str) -> String {
    value
        .nfkc()
        .collect::<String>()
        .to_lowercase()
        .chars()
        .filter(|ch| is_id_char(*ch))
        .collect()
}

/// Collapses every whitespace run into a single space and trims both ends.
#[must_use]
pub fn collapse_whitespace(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut last_was_space = false;
    for ch in input.chars() {
        if ch.is_whitespace() {
            if !last_was_space {
                out.push(' ');
                last_was_space = true;
            }
        } else {
            out.push(ch);
            last_was_space = false;
        }
    }
    out.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Ohm's Law", "ohms-law")]
    #[case("Ohm’s Law", "ohms-law")]
    #[case("  OHM'S   LAW  ", "ohms-law")]
    #[case("snake_case_names", "snake-case-names")]
    #[case("A & B", "a-b")]
    #[case("--Leading and trailing--", "leading-and-trailing")]
    #[case("欧姆定律 Ohm", "欧姆定律-ohm")]
    #[case("Ｆｕｌｌｗｉｄｔｈ １２３", "fullwidth-123")]
    #[case("!!!", "")]
    fn slugify_normalizes_titles(#[case] title: &str, #[case] expected: &str) {
        assert_eq!(slugify(title), expected);
    }

    #[test]
    fn slugify_is_case_and_spacing_insensitive() {
        assert_eq!(slugify("Current  Divider"), slugify("current divider"));
        assert_eq!(slugify("Current\tDivider"), slugify("CURRENT DIVIDER"));
    }

    #[rstest]
    #[case("ohms-law", "ohmslaw")]
    #[case("Ohm's Law", "ohmslaw")]
    #[case("OHMS_LAW!", "ohmslaw")]
    #[case("第2章：欧姆定律", "第2章欧姆定律")]
    #[case("---", "")]
    fn fuzzy_key_strips_separators(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(fuzzy_key(input), expected);
    }

    #[test]
    fn slug_and_title_share_a_fuzzy_key() {
        let title = "Kirchhoff's Voltage Law";
        assert_eq!(fuzzy_key(&slugify(title)), fuzzy_key(title));
    }

    #[test]
    fn collapse_whitespace_joins_lines() {
        assert_eq!(collapse_whitespace("  a \n\n b\t\tc  "), "a b c");
        assert_eq!(collapse_whitespace(" \n "), "");
    }

    #[test]
    fn cjk_detection() {
        assert!(is_cjk_ideograph('欧'));
        assert!(!is_cjk_ideograph('a'));
        assert!(!is_cjk_ideograph('。'));
    }
}
