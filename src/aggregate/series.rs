use crate::analysis::AnalysisResult;
use serde::Serialize;

/// Cumulative per-metric series for progress charts.
///
/// Four parallel vectors, one element per resolved session. Absent numeric
/// fields contribute 0 so the series never desynchronize; the current-session
/// view is where absence stays visible as absence.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProgressSeries {
    pub filler_counts: Vec<u32>,
    pub pause_counts: Vec<u32>,
    pub wpm: Vec<f64>,
    pub labels: Vec<String>,
}

impl ProgressSeries {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one point per series for a newly resolved session.
    pub fn push(&mut self, result: &AnalysisResult) {
        self.filler_counts
            .push(result.filler_info.as_ref().map_or(0, |f| f.filler_count));
        self.pause_counts
            .push(result.pause_info.as_ref().map_or(0, |p| p.num_pauses));
        self.wpm.push(result.wpm_info.as_ref().map_or(0.0, |w| w.wpm));
        self.labels.push(format!("Recording {}", self.labels.len() + 1));

        debug_assert!(self.is_aligned());
    }

    /// Number of resolved sessions recorded so far.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// All four vectors share the same length.
    pub fn is_aligned(&self) -> bool {
        let n = self.labels.len();
        self.filler_counts.len() == n && self.pause_counts.len() == n && self.wpm.len() == n
    }
}
