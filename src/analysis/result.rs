use serde::{Deserialize, Serialize};

/// One analysis response from the backend.
///
/// Every field is independently optional: the backend computes whatever it
/// can and omits the rest. A missing key means "not computed", never zero,
/// so each field maps to `None` rather than a default value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Full transcription text
    pub transcription: Option<String>,

    /// Pause statistics
    pub pause_info: Option<PauseInfo>,

    /// Filler-word statistics
    pub filler_info: Option<FillerInfo>,

    /// Speaking-rate statistics
    pub wpm_info: Option<WpmInfo>,

    /// Emotion classification output
    pub emotion_info: Option<EmotionInfo>,

    /// Topic summary text
    pub topic_analysis: Option<String>,

    /// Raw pitch analysis output (shape is backend-defined)
    pub pitch_info: Option<serde_json::Value>,

    /// Chroma/pitch-change series for charts
    pub graph_data: Option<GraphData>,

    /// Behavioral-category insights
    pub categories: Option<Categories>,
}

impl AnalysisResult {
    /// True when no analytic field was populated (e.g. a session that
    /// resolved after a failed submission).
    pub fn is_empty(&self) -> bool {
        self.transcription.is_none()
            && self.pause_info.is_none()
            && self.filler_info.is_none()
            && self.wpm_info.is_none()
            && self.emotion_info.is_none()
            && self.topic_analysis.is_none()
            && self.pitch_info.is_none()
            && self.graph_data.is_none()
            && self.categories.is_none()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PauseInfo {
    /// Number of detected pauses
    pub num_pauses: u32,

    /// Length of each pause in seconds
    #[serde(default)]
    pub pause_lengths: Vec<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FillerInfo {
    /// Total filler-word occurrences
    pub filler_count: u32,

    /// The filler words that were detected
    #[serde(default)]
    pub filler_words: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WpmInfo {
    /// Words per minute
    pub wpm: f64,

    /// Total words spoken
    pub total_words: u32,

    /// Spoken duration in seconds
    pub duration_seconds: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmotionInfo {
    /// Backend's own label for the detected emotion, if it sent one
    #[serde(default)]
    pub emotion: Option<String>,

    /// Either a per-label probability vector or a single confidence value
    pub probability: Probability,
}

/// The backend sends `probability` as either a vector (one entry per label)
/// or a bare number (confidence in the `emotion` field alone).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Probability {
    Vector(Vec<f64>),
    Scalar(f64),
}

impl Probability {
    pub fn as_vector(&self) -> Option<&[f64]> {
        match self {
            Probability::Vector(v) => Some(v),
            Probability::Scalar(_) => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphData {
    /// Mean chroma energy per pitch class
    #[serde(default)]
    pub chroma_mean: Vec<f64>,

    /// Sample indices where pitch changed
    #[serde(default)]
    pub pitch_changes: Vec<i64>,
}

/// Per-category insight text. The backend's key set is fixed; each key is
/// still independently optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Categories {
    #[serde(rename = "Inattention", default)]
    pub inattention: Option<CategoryInsight>,

    #[serde(rename = "Hyperactivity", default)]
    pub hyperactivity: Option<CategoryInsight>,

    #[serde(rename = "Impulsivity", default)]
    pub impulsivity: Option<CategoryInsight>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryInsight {
    pub insights: String,
    pub recommendations: String,
}

/// One entry from the history endpoint (`GET /recordings`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Backend-formatted timestamp, stored verbatim
    pub date: String,

    /// Short summary line
    #[serde(default)]
    pub summary: Option<String>,

    /// Full analysis fields for this recording
    #[serde(default)]
    pub details: Option<AnalysisResult>,

    /// Pre-extracted values for trend charts
    #[serde(default)]
    pub chart_data: Option<ChartData>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartData {
    #[serde(default)]
    pub filler_count: u32,

    #[serde(default)]
    pub num_pauses: u32,
}
