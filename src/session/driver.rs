use crate::aggregate::ResultAggregator;
use crate::analysis::{AnalysisBackend, AnalysisResult};
use crate::capture::{CaptureController, CaptureError};
use crate::history::HistoryStore;
use anyhow::Result;
use chrono::{DateTime, Utc};
use tracing::{info, warn};

/// One resolved record-then-analyze cycle.
///
/// Identity is the position in the local session list. `result` is `None`
/// when the submission failed; the session is still resolved (the empty
/// result was applied to the view and series), never left pending.
#[derive(Debug, Clone)]
pub struct RecordingSession {
    pub index: usize,
    pub submitted_at: DateTime<Utc>,
    pub result: Option<AnalysisResult>,
}

/// Drives the full cycle: capture → submit → aggregate → history refresh.
///
/// Everything runs as sequential awaits on one task, which is what gives the
/// ordering guarantees (stop before submit, submit resolution before both the
/// aggregation and the refresh) and makes locking unnecessary. Concurrent
/// recordings are impossible by construction: the capture controller rejects
/// `start` while not Idle.
pub struct SessionDriver {
    controller: CaptureController,
    backend: Box<dyn AnalysisBackend>,
    aggregator: ResultAggregator,
    history: HistoryStore,
    sessions: Vec<RecordingSession>,
}

impl SessionDriver {
    pub fn new(controller: CaptureController, backend: Box<dyn AnalysisBackend>) -> Self {
        Self {
            controller,
            backend,
            aggregator: ResultAggregator::new(),
            history: HistoryStore::new(),
            sessions: Vec::new(),
        }
    }

    pub fn is_recording(&self) -> bool {
        self.controller.is_recording()
    }

    /// Begin capturing. Device failure is returned for the caller to report;
    /// the driver stays usable and Idle.
    pub fn start_recording(&mut self) -> Result<(), CaptureError> {
        self.controller.start()
    }

    /// Stop capturing, submit the artifact, and fold the outcome into the
    /// view, series, and history.
    ///
    /// Returns the resolved session, or `None` when there was no recording
    /// in progress (guarded no-op). A failed submission resolves the session
    /// empty and skips the history refresh; a failed refresh keeps the
    /// just-aggregated result and the stale history.
    pub async fn stop_and_analyze(&mut self) -> Result<Option<&RecordingSession>> {
        let Some(artifact) = self.controller.stop()? else {
            return Ok(None);
        };

        let index = self.sessions.len();
        let submitted_at = Utc::now();

        let result = match self.backend.submit(&artifact).await {
            Ok(result) => {
                self.aggregator.apply_result(&result);

                // Make the backend's newly stored record visible. Failure
                // here is independent of the submission outcome.
                if let Err(e) = self.history.refresh(self.backend.as_ref()).await {
                    warn!("{}", e);
                }

                Some(result)
            }
            Err(e) => {
                warn!("Session {} resolved without a result: {}", index + 1, e);
                self.aggregator.apply_result(&AnalysisResult::default());
                None
            }
        };

        // The artifact has served its purpose either way.
        if let Err(e) = tokio::fs::remove_file(&artifact.path).await {
            warn!(
                "Failed to remove artifact {}: {}",
                artifact.path.display(),
                e
            );
        }

        self.sessions.push(RecordingSession {
            index,
            submitted_at,
            result,
        });

        info!(
            "Session {} resolved ({} local, {} in backend history)",
            index + 1,
            self.sessions.len(),
            self.history.len()
        );

        Ok(self.sessions.last())
    }

    pub fn aggregator(&self) -> &ResultAggregator {
        &self.aggregator
    }

    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    pub fn history_mut(&mut self) -> &mut HistoryStore {
        &mut self.history
    }

    pub fn sessions(&self) -> &[RecordingSession] {
        &self.sessions
    }
}
