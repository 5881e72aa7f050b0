//! ログとメトリクス。
pub mod metrics;
pub mod structured_log;
pub mod tracing;

pub use self::tracing::{LogFormat, init};
