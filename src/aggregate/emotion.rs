use serde::Serialize;
use tracing::warn;

/// Fixed label order the backend's probability vector aligns with. This is
/// an external contract: a vector of any other length is rejected rather
/// than zipped by prefix.
pub const EMOTION_LABELS: [&str; 4] = ["happy", "sad", "angry", "neutral"];

const EMOTION_GLYPHS: [&str; 4] = ["\u{1F60A}", "\u{1F622}", "\u{1F620}", "\u{1F610}"];

/// One label's slice of the emotion vector.
#[derive(Debug, Clone, Serialize)]
pub struct EmotionScore {
    pub label: &'static str,
    pub glyph: &'static str,
    pub probability: f64,
}

/// Per-label probabilities plus the dominant label.
///
/// Probabilities are shown as received; they are not required to sum to 1.
#[derive(Debug, Clone, Serialize)]
pub struct EmotionView {
    pub scores: Vec<EmotionScore>,
    pub dominant: &'static str,
}

impl EmotionView {
    /// Build the view from a backend probability vector.
    ///
    /// Returns `None` (with a warning) unless the vector length matches the
    /// fixed label set. Dominant is the argmax; ties go to the earlier label
    /// in `EMOTION_LABELS` order.
    pub fn from_probabilities(probabilities: &[f64]) -> Option<Self> {
        if probabilities.len() != EMOTION_LABELS.len() {
            warn!(
                "Emotion vector length {} does not match the {} known labels, ignoring",
                probabilities.len(),
                EMOTION_LABELS.len()
            );
            return None;
        }

        let scores: Vec<EmotionScore> = EMOTION_LABELS
            .iter()
            .zip(EMOTION_GLYPHS.iter())
            .zip(probabilities.iter())
            .map(|((&label, &glyph), &probability)| EmotionScore {
                label,
                glyph,
                probability,
            })
            .collect();

        let mut dominant = 0;
        for (i, score) in scores.iter().enumerate() {
            if score.probability > scores[dominant].probability {
                dominant = i;
            }
        }

        Some(Self {
            dominant: scores[dominant].label,
            scores,
        })
    }
}
