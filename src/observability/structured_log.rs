/// 構造化JSON形式ログ。
use std::io::{self, Write};

use serde_json::json;
use tracing::{Event, Subscriber};
use tracing_subscriber::Layer;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::Context;

/// INFO以上のイベントを1行1JSONで書き出すレイヤー。
pub struct StructuredLogLayer<W = fn() -> io::Stderr> {
    make_writer: W,
}

impl StructuredLogLayer {
    #[must_use]
    pub fn stderr() -> Self {
        Self {
            make_writer: io::stderr,
        }
    }
}

impl<W> StructuredLogLayer<W> {
    #[must_use]
    pub fn with_writer(make_writer: W) -> Self {
        Self { make_writer }
    }
}

impl<S, W> Layer<S> for StructuredLogLayer<W>
where
    S: Subscriber,
    W: for<'a> MakeWriter<'a> + 'static,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        use tracing::field::Visit;

        struct JsonVisitor {
            message: Option<String>,
            values: serde_json::Map<String, serde_json::Value>,
        }

        impl Visit for JsonVisitor {
            fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
                if field.name() == "message" {
                    self.message = Some(format!("{value:?}"));
                } else {
                    self.values
                        .insert(field.name().to_string(), json!(format!("{value:?}")));
                }
            }

            fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
                if field.name() == "message" {
                    self.message = Some(value.to_string());
                } else {
                    self.values.insert(field.name().to_string(), json!(value));
                }
            }

            fn record_i64(&mut self, field: &tracing::field::Field, value: i64) {
                self.values.insert(field.name().to_string(), json!(value));
            }

            fn record_u64(&mut self, field: &tracing::field::Field, value: u64) {
                self.values.insert(field.name().to_string(), json!(value));
            }

            fn record_bool(&mut self, field: &tracing::field::Field, value: bool) {
                self.values.insert(field.name().to_string(), json!(value));
            }
        }

        // 重要イベントのみ出力
        if !matches!(
            event.metadata().level(),
            &tracing::Level::ERROR | &tracing::Level::WARN | &tracing::Level::INFO
        ) {
            return;
        }

        let mut visitor = JsonVisitor {
            message: None,
            values: serde_json::Map::new(),
        };
        event.record(&mut visitor);

        let log_entry = json!({
            "timestamp": chrono::Utc::now().to_rfc3339(),
            "level": event.metadata().level().as_str(),
            "target": event.metadata().target(),
            "message": visitor.message.unwrap_or_default(),
            "fields": visitor.values,
        });

        let mut writer = self.make_writer.make_writer();
        let _ = writeln!(
            writer,
            "{}",
            serde_json::to_string(&log_entry).unwrap_or_default()
        );
    }
}
