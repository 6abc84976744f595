use super::CaptureError;
use chrono::{DateTime, Utc};
use std::path::PathBuf;
use std::time::Instant;
use tracing::{info, warn};

/// A finished recording, ready for submission.
#[derive(Debug, Clone)]
pub struct AudioArtifact {
    /// WAV file on disk
    pub path: PathBuf,

    /// Wall-clock time between start() and stop()
    pub duration_seconds: f64,

    pub started_at: DateTime<Utc>,
    pub stopped_at: DateTime<Utc>,
}

/// Capture lifecycle. `Finalizing` is only observable from inside `stop()`;
/// callers see the controller as Idle or Recording.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureState {
    Idle,
    Recording,
    Finalizing,
}

/// Device-facing half of the capture path.
///
/// `begin` acquires the device and starts buffering; `finish` flushes the
/// buffer into a WAV file and releases the device; `abort` releases without
/// producing an artifact (teardown path). An implementation must tolerate
/// `abort` in any state.
pub trait RecorderBackend {
    fn begin(&mut self) -> Result<(), CaptureError>;
    fn finish(&mut self) -> Result<PathBuf, CaptureError>;
    fn abort(&mut self);
}

/// Owns the microphone and the recording on/off state machine.
///
/// Transitions are guarded: `start()` while Recording and `stop()` while
/// Idle are warn-and-return no-ops, so a misbehaving caller cannot corrupt
/// the lifecycle. Exactly one artifact is emitted per start/stop pair.
pub struct CaptureController {
    backend: Box<dyn RecorderBackend>,
    state: CaptureState,
    started_instant: Option<Instant>,
    started_at: Option<DateTime<Utc>>,
}

impl CaptureController {
    pub fn new(backend: Box<dyn RecorderBackend>) -> Self {
        Self {
            backend,
            state: CaptureState::Idle,
            started_instant: None,
            started_at: None,
        }
    }

    pub fn state(&self) -> CaptureState {
        self.state
    }

    pub fn is_recording(&self) -> bool {
        self.state == CaptureState::Recording
    }

    /// Begin a new recording. Valid only from Idle.
    ///
    /// On device failure the controller stays Idle and the error is returned
    /// for the caller to report; the application remains usable.
    pub fn start(&mut self) -> Result<(), CaptureError> {
        if self.state != CaptureState::Idle {
            warn!("start() ignored: capture state is {:?}", self.state);
            return Ok(());
        }

        self.backend.begin()?;

        self.started_instant = Some(Instant::now());
        self.started_at = Some(Utc::now());
        self.state = CaptureState::Recording;
        info!("Recording started");

        Ok(())
    }

    /// Finish the current recording and hand back the artifact.
    ///
    /// Valid only from Recording; from Idle this is a no-op returning
    /// `Ok(None)`. The device is released on both the success and error
    /// paths.
    pub fn stop(&mut self) -> Result<Option<AudioArtifact>, CaptureError> {
        if self.state != CaptureState::Recording {
            warn!("stop() ignored: capture state is {:?}", self.state);
            return Ok(None);
        }

        self.state = CaptureState::Finalizing;

        let result = self.backend.finish();

        // Back to Idle regardless of how finalization went.
        self.state = CaptureState::Idle;
        let started_instant = self.started_instant.take();
        let started_at = self.started_at.take();

        let path = result?;

        let stopped_at = Utc::now();
        let duration_seconds = started_instant
            .map(|t| t.elapsed().as_secs_f64())
            .unwrap_or(0.0);

        info!(
            "Recording stopped: {} ({:.1}s)",
            path.display(),
            duration_seconds
        );

        Ok(Some(AudioArtifact {
            path,
            duration_seconds,
            started_at: started_at.unwrap_or(stopped_at),
            stopped_at,
        }))
    }
}

impl Drop for CaptureController {
    fn drop(&mut self) {
        if self.state != CaptureState::Idle {
            warn!("Capture controller dropped mid-recording, releasing device");
            self.backend.abort();
        }
    }
}
