pub mod controller;
pub mod recorder;

pub use controller::{AudioArtifact, CaptureController, CaptureState, RecorderBackend};
pub use recorder::MicRecorder;

/// Failures while acquiring or driving the microphone.
#[derive(Debug, thiserror::Error)]
pub enum CaptureError {
    /// Permission denied, no input device, or no usable device config.
    /// Recording never starts; the controller stays Idle.
    #[error("microphone unavailable: {0}")]
    AccessDenied(String),

    #[error("audio stream failed: {0}")]
    StreamFailed(String),

    #[error("failed to write recording: {0}")]
    WriteFailed(String),
}
