use std::str::FromStr;

use anyhow::{Error, Result, anyhow};
use once_cell::sync::OnceCell;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use super::structured_log::StructuredLogLayer;

static TRACING_INIT: OnceCell<()> = OnceCell::new();

/// ログ出力形式。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// tracing-subscriber 標準のJSONフォーマッタ。
    #[default]
    Json,
    /// [`StructuredLogLayer`] による1行1JSON（INFO以上）。
    Structured,
}

impl FromStr for LogFormat {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "structured" => Ok(Self::Structured),
            other => Err(anyhow!("unknown log format: {other}")),
        }
    }
}

/// Tracing サブスクライバを一度だけ初期化する。
///
/// 出力先は常に標準エラー出力。標準出力は CLI の JSON 結果専用とする。
/// フィルタは `RUST_LOG` で指定し、未設定時は `info`。
///
/// # Errors
/// サブスクライバの初期化に失敗した場合はエラーを返す。
pub fn init(format: LogFormat) -> Result<()> {
    TRACING_INIT.get_or_try_init(|| {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        let registry = tracing_subscriber::registry().with(env_filter);

        match format {
            LogFormat::Json => {
                let fmt_layer = tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr)
                    .json();
                registry
                    .with(fmt_layer)
                    .try_init()
                    .map_err(|e: tracing_subscriber::util::TryInitError| {
                        Error::msg(e.to_string())
                    })?;
            }
            LogFormat::Structured => {
                registry
                    .with(StructuredLogLayer::stderr())
                    .try_init()
                    .map_err(|e: tracing_subscriber::util::TryInitError| {
                        Error::msg(e.to_string())
                    })?;
            }
        }
        info!(format = ?format, "tracing initialized");

        Ok::<(), Error>(())
    })?;
    Ok(())
}
