use std::{env, num::NonZeroUsize};

use thiserror::Error;

use crate::observability::LogFormat;
use crate::pipeline::config::{
    KEYWORD_BONUS, MAX_DOCUMENT_BYTES, MIN_CLEAN_CHARS, QUALITY_THRESHOLD, ScoringConfig,
    SelectionConfig, SelectorConfig,
};

#[cfg(test)]
use once_cell::sync::Lazy;
#[cfg(test)]
pub(crate) static ENV_MUTEX: Lazy<std::sync::Mutex<()>> = Lazy::new(|| std::sync::Mutex::new(()));

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    selector: SelectorConfig,
    log_format: LogFormat,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {name}: {source}")]
    Invalid {
        name: &'static str,
        #[source]
        source: anyhow::Error,
    },
}

impl Config {
    /// 環境変数からクイズ選択の設定値を読み込み、検証する。
    ///
    /// 未設定の値は既定値を使う。語彙の追加分は既定の語彙の後ろに連結する。
    ///
    /// # Errors
    /// 数値や列挙値のパースに失敗した場合は [`ConfigError`] を返す。
    pub fn from_env() -> Result<Self, ConfigError> {
        // Scoring settings
        let min_clean_chars = parse_usize("QUIZ_MIN_CLEAN_CHARS", MIN_CLEAN_CHARS)?;
        let keyword_bonus = parse_usize("QUIZ_KEYWORD_BONUS", KEYWORD_BONUS)?;
        let mut scoring = ScoringConfig {
            min_clean_chars,
            keyword_bonus,
            ..ScoringConfig::default()
        };
        scoring
            .blocked_title_terms
            .extend(parse_csv("QUIZ_EXTRA_BLOCKED_TITLES", ""));
        scoring
            .bonus_keywords
            .extend(parse_csv("QUIZ_EXTRA_BONUS_KEYWORDS", ""));

        // Selection settings
        let quality_threshold = parse_usize("QUIZ_QUALITY_THRESHOLD", QUALITY_THRESHOLD)?;
        let max_document_bytes =
            parse_non_zero_usize("QUIZ_MAX_DOCUMENT_BYTES", MAX_DOCUMENT_BYTES)?;

        let log_format = parse_log_format("QUIZ_LOG_FORMAT", LogFormat::Json)?;

        Ok(Self {
            selector: SelectorConfig {
                scoring,
                selection: SelectionConfig { quality_threshold },
                max_document_bytes,
            },
            log_format,
        })
    }

    #[must_use]
    pub fn selector(&self) -> &SelectorConfig {
        &self.selector
    }

    #[must_use]
    pub fn log_format(&self) -> LogFormat {
        self.log_format
    }

    #[must_use]
    pub fn min_clean_chars(&self) -> usize {
        self.selector.scoring.min_clean_chars
    }

    #[must_use]
    pub fn keyword_bonus(&self) -> usize {
        self.selector.scoring.keyword_bonus
    }

    #[must_use]
    pub fn quality_threshold(&self) -> usize {
        self.selector.selection.quality_threshold
    }

    #[must_use]
    pub fn max_document_bytes(&self) -> NonZeroUsize {
        self.selector.max_document_bytes
    }

    #[must_use]
    pub fn blocked_title_terms(&self) -> &[String] {
        &self.selector.scoring.blocked_title_terms
    }

    #[must_use]
    pub fn bonus_keywords(&self) -> &[String] {
        &self.selector.scoring.bonus_keywords
    }
}

fn parse_usize(name: &'static str, default: usize) -> Result<usize, ConfigError> {
    let raw = env::var(name).unwrap_or_else(|_| default.to_string());
    raw.trim().parse::<usize>().map_err(|error| ConfigError::Invalid {
        name,
        source: anyhow::Error::new(error),
    })
}

fn parse_non_zero_usize(name: &'static str, default: usize) -> Result<NonZeroUsize, ConfigError> {
    let value = parse_usize(name, default)?;
    NonZeroUsize::new(value).ok_or_else(|| ConfigError::Invalid {
        name,
        source: anyhow::anyhow!("must be greater than zero"),
    })
}

fn parse_log_format(name: &'static str, default: LogFormat) -> Result<LogFormat, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw
            .parse::<LogFormat>()
            .map_err(|source| ConfigError::Invalid { name, source }),
        Err(_) => Ok(default),
    }
}

fn parse_csv(name: &'static str, default: &str) -> Vec<String> {
    let raw = env::var(name).unwrap_or_else(|_| default.to_string());
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
