/// Prometheusメトリクス定義。
use prometheus::{
    Encoder, Histogram, HistogramOpts, IntCounter, Registry, TextEncoder,
    register_histogram_with_registry, register_int_counter_with_registry,
};
use std::sync::Arc;

use crate::pipeline::scope::ScopeMode;
use crate::pipeline::select::SelectionStrategy;

/// メトリクスコレクター。
#[derive(Clone)]
pub struct Metrics {
    registry: Arc<Registry>,

    // カウンター
    pub selections_total: IntCounter,
    pub segments_parsed_total: IntCounter,
    pub scope_review_total: IntCounter,
    pub scope_unmatched_total: IntCounter,
    pub random_pick_total: IntCounter,
    pub best_effort_total: IntCounter,
    pub empty_selection_total: IntCounter,

    // ヒストグラム
    pub candidate_pool_size: Histogram,
}

impl std::fmt::Debug for Metrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Metrics")
            .field("selections_total", &self.selections_total.get())
            .field("best_effort_total", &self.best_effort_total.get())
            .finish_non_exhaustive()
    }
}

impl Metrics {
    /// 新しいメトリクスコレクターを作成する。
    ///
    /// # Errors
    /// 同名のメトリクスが既に登録されている場合はエラーを返す。
    pub fn new(registry: Arc<Registry>) -> Result<Self, prometheus::Error> {
        Ok(Self {
            selections_total: register_int_counter_with_registry!(
                "quiz_selections_total",
                "Total number of quiz content selections",
                registry
            )?,
            segments_parsed_total: register_int_counter_with_registry!(
                "quiz_segments_parsed_total",
                "Total number of lesson segments produced by the parser",
                registry
            )?,
            scope_review_total: register_int_counter_with_registry!(
                "quiz_scope_review_total",
                "Selections made without a reading position",
                registry
            )?,
            scope_unmatched_total: register_int_counter_with_registry!(
                "quiz_scope_unmatched_total",
                "Selections whose reading position matched no segment",
                registry
            )?,
            random_pick_total: register_int_counter_with_registry!(
                "quiz_random_pick_total",
                "Selections drawn from the above-threshold pool",
                registry
            )?,
            best_effort_total: register_int_counter_with_registry!(
                "quiz_best_effort_total",
                "Selections that fell back to the best-scoring segment",
                registry
            )?,
            empty_selection_total: register_int_counter_with_registry!(
                "quiz_empty_selection_total",
                "Selections that found no segment at all",
                registry
            )?,
            candidate_pool_size: register_histogram_with_registry!(
                HistogramOpts::new(
                    "quiz_candidate_pool_size",
                    "Number of segments above the quality threshold per selection"
                )
                .buckets(vec![0.0, 1.0, 2.0, 3.0, 5.0, 8.0, 13.0, 21.0]),
                registry
            )?,
            registry,
        })
    }

    /// 1回の選択結果を記録する。
    #[allow(clippy::cast_precision_loss)]
    pub fn record_selection(
        &self,
        parsed: usize,
        scope: ScopeMode,
        strategy: Option<SelectionStrategy>,
    ) {
        self.selections_total.inc();
        self.segments_parsed_total
            .inc_by(u64::try_from(parsed).unwrap_or(u64::MAX));
        match scope {
            ScopeMode::Review => self.scope_review_total.inc(),
            ScopeMode::Unmatched => self.scope_unmatched_total.inc(),
            ScopeMode::UpTo { .. } => {}
        }
        match strategy {
            Some(SelectionStrategy::Random { pool }) => {
                self.random_pick_total.inc();
                self.candidate_pool_size.observe(pool as f64);
            }
            Some(SelectionStrategy::BestEffort) => {
                self.best_effort_total.inc();
                self.candidate_pool_size.observe(0.0);
            }
            None => self.empty_selection_total.inc(),
        }
    }

    /// Prometheusテキスト形式でレンダリングする。
    ///
    /// # Errors
    /// エンコード失敗時、または出力がUTF-8でない場合はエラーを返す。
    pub fn render(&self) -> Result<String, prometheus::Error> {
        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();
        encoder.encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|error| prometheus::Error::Msg(error.to_string()))
    }
}
