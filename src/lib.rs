pub mod aggregate;
pub mod analysis;
pub mod capture;
pub mod config;
pub mod history;
pub mod session;

pub use aggregate::{EmotionView, ProgressSeries, ResultAggregator, EMOTION_LABELS};
pub use analysis::{AnalysisBackend, AnalysisClient, AnalysisError, AnalysisResult, HistoryEntry};
pub use capture::{AudioArtifact, CaptureController, CaptureError, CaptureState, MicRecorder};
pub use config::Config;
pub use history::HistoryStore;
pub use session::{RecordingSession, SessionDriver};
