use super::emotion::EmotionView;
use super::series::ProgressSeries;
use crate::analysis::AnalysisResult;
use tracing::info;

/// Folds each resolved session's result into the current-session view and
/// the cumulative progress series.
///
/// Called exactly once per resolved session (the coordinator enforces this);
/// each call starts a fresh current view, so fields from a previous session
/// never bleed into the next.
#[derive(Debug, Default)]
pub struct ResultAggregator {
    current: AnalysisResult,
    emotion_view: Option<EmotionView>,
    series: ProgressSeries,
}

impl ResultAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply_result(&mut self, result: &AnalysisResult) {
        // New session: all fields cleared, then populated from this result.
        self.current = result.clone();

        self.emotion_view = result
            .emotion_info
            .as_ref()
            .and_then(|info| info.probability.as_vector())
            .and_then(EmotionView::from_probabilities);

        self.series.push(result);

        info!(
            "Aggregated session {} (fields present: transcription={}, pauses={}, fillers={}, wpm={}, emotion={})",
            self.series.len(),
            result.transcription.is_some(),
            result.pause_info.is_some(),
            result.filler_info.is_some(),
            result.wpm_info.is_some(),
            result.emotion_info.is_some()
        );
    }

    /// The most recently resolved session's fields, sparse as received.
    pub fn current(&self) -> &AnalysisResult {
        &self.current
    }

    /// Derived emotion mapping for the current session, when the backend
    /// sent a well-formed probability vector.
    pub fn emotion_view(&self) -> Option<&EmotionView> {
        self.emotion_view.as_ref()
    }

    pub fn series(&self) -> &ProgressSeries {
        &self.series
    }
}
