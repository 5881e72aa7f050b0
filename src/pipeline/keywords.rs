//! Bilingual (English / Chinese) vocabularies used by the scorer and an
//! Aho-Corasick matcher over them.
//!
//! Both lists are stored lowercase; callers lowercase the haystack before
//! matching so the comparison is case-insensitive for any script.
use aho_corasick::{AhoCorasick, AhoCorasickBuilder, BuildError, MatchKind};
use std::collections::BTreeSet;

/// Heading topics that are never worth a comprehension question.
pub const BLOCKED_TITLE_TERMS: &[&str] = &[
    // English
    "introduction",
    "summary",
    "reference",
    "conclusion",
    "setup",
    "installation",
    // 中文
    "前言",
    "简介",
    "介绍",
    "总结",
    "小结",
    "参考",
    "结论",
    "安装",
    "环境配置",
];

/// Markers of explanatory or causal prose.
pub const BONUS_KEYWORDS: &[&str] = &[
    // English
    "because",
    "therefore",
    "example",
    "means",
    // 中文
    "因为",
    "所以",
    "因此",
    "例如",
    "意味着",
];

/// Substring matcher over a fixed vocabulary.
#[derive(Debug, Clone)]
pub struct KeywordMatcher {
    ac: AhoCorasick,
    terms: Vec<String>,
}

impl KeywordMatcher {
    /// Builds a matcher. Terms are lowercased and blank terms are skipped.
    ///
    /// # Errors
    /// Returns [`BuildError`] when the automaton exceeds its size limits.
    pub fn new<I, S>(terms: I) -> Result<Self, BuildError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = BTreeSet::new();
        let terms: Vec<String> = terms
            .into_iter()
            .map(|term| term.as_ref().trim().to_lowercase())
            .filter(|term| !term.is_empty() && seen.insert(term.clone()))
            .collect();
        let ac = AhoCorasickBuilder::new()
            .match_kind(MatchKind::Standard)
            .build(&terms)?;
        Ok(Self { ac, terms })
    }

    /// Returns the first vocabulary term found in `lowered`.
    #[must_use]
    pub fn first_match(&self, lowered: &str) -> Option<&str> {
        self.ac
            .find(lowered)
            .map(|m| self.terms[m.pattern().as_usize()].as_str())
    }

    /// Returns every distinct term that occurs in `lowered`, in vocabulary order.
    ///
    /// Overlapping occurrences are honoured, so both `example` and
    /// `for example` would be reported if both were in the vocabulary.
    #[must_use]
    pub fn distinct_matches(&self, lowered: &str) -> Vec<&str> {
        let hits: BTreeSet<usize> = self
            .ac
            .find_overlapping_iter(lowered)
            .map(|m| m.pattern().as_usize())
            .collect();
        hits.into_iter().map(|idx| self.terms[idx].as_str()).collect()
    }

    #[must_use]
    pub fn terms(&self) -> &[String] {
        &self.terms
    }
}
