// End-to-end cycle tests for the session coordinator, with the device and
// the analysis service both stubbed out.

use anyhow::Result;
use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use talklens::analysis::{
    AnalysisBackend, AnalysisError, AnalysisResult, HistoryEntry, PauseInfo,
};
use talklens::capture::{AudioArtifact, CaptureController, CaptureError, RecorderBackend};
use talklens::SessionDriver;

/// Recorder that produces a real scratch WAV file so the driver's artifact
/// cleanup has something to delete.
struct ScratchRecorder {
    dir: PathBuf,
    counter: usize,
}

impl RecorderBackend for ScratchRecorder {
    fn begin(&mut self) -> Result<(), CaptureError> {
        Ok(())
    }

    fn finish(&mut self) -> Result<PathBuf, CaptureError> {
        self.counter += 1;
        let path = self.dir.join(format!("recording-{}.wav", self.counter));
        std::fs::write(&path, b"stub").map_err(|e| CaptureError::WriteFailed(e.to_string()))?;
        Ok(path)
    }

    fn abort(&mut self) {}
}

/// Canned analysis service: a fixed submit outcome plus a fixed history.
struct CannedBackend {
    submit_response: Result<AnalysisResult, String>,
    history: Result<Vec<HistoryEntry>, String>,
    history_calls: Arc<AtomicUsize>,
}

#[async_trait]
impl AnalysisBackend for CannedBackend {
    async fn submit(&self, _artifact: &AudioArtifact) -> Result<AnalysisResult, AnalysisError> {
        self.submit_response
            .clone()
            .map_err(AnalysisError::SubmissionFailed)
    }

    async fn fetch_history(&self) -> Result<Vec<HistoryEntry>, AnalysisError> {
        self.history_calls.fetch_add(1, Ordering::SeqCst);
        self.history.clone().map_err(AnalysisError::RefreshFailed)
    }
}

fn history_entry(date: &str) -> HistoryEntry {
    HistoryEntry {
        date: date.to_string(),
        summary: None,
        details: None,
        chart_data: None,
    }
}

fn driver_with(
    dir: &std::path::Path,
    backend: CannedBackend,
) -> SessionDriver {
    let recorder = ScratchRecorder {
        dir: dir.to_path_buf(),
        counter: 0,
    };
    let controller = CaptureController::new(Box::new(recorder));
    SessionDriver::new(controller, Box::new(backend))
}

#[tokio::test]
async fn resolved_session_updates_view_series_and_history() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let history_calls = Arc::new(AtomicUsize::new(0));

    let result = AnalysisResult {
        transcription: Some("good morning".into()),
        pause_info: Some(PauseInfo {
            num_pauses: 3,
            pause_lengths: vec![0.5, 1.2, 0.8],
        }),
        ..Default::default()
    };

    let mut driver = driver_with(
        dir.path(),
        CannedBackend {
            submit_response: Ok(result),
            // Backend already holds two recordings; local series length is
            // an independent ledger and need not match.
            history: Ok(vec![history_entry("d1"), history_entry("d2")]),
            history_calls: Arc::clone(&history_calls),
        },
    );

    driver.start_recording()?;
    let session = driver.stop_and_analyze().await?.cloned().expect("resolved");

    assert_eq!(session.index, 0);
    assert!(session.result.is_some());
    assert_eq!(
        driver.aggregator().current().transcription.as_deref(),
        Some("good morning")
    );

    // Only pause_info was present: pauses=[3], everything else zero.
    let series = driver.aggregator().series();
    assert_eq!(series.pause_counts, vec![3]);
    assert_eq!(series.filler_counts, vec![0]);
    assert_eq!(series.wpm, vec![0.0]);
    assert_eq!(series.labels, vec!["Recording 1"]);

    assert_eq!(history_calls.load(Ordering::SeqCst), 1);
    assert_eq!(driver.history().len(), 2);
    assert_ne!(driver.history().len(), driver.sessions().len());

    // Artifact was cleaned up after resolution.
    assert!(std::fs::read_dir(dir.path())?.next().is_none());
    Ok(())
}

#[tokio::test]
async fn failed_submission_resolves_empty_and_skips_refresh() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let history_calls = Arc::new(AtomicUsize::new(0));

    let mut driver = driver_with(
        dir.path(),
        CannedBackend {
            submit_response: Err("connection refused".into()),
            history: Ok(vec![history_entry("d1")]),
            history_calls: Arc::clone(&history_calls),
        },
    );

    driver.start_recording()?;
    let session = driver.stop_and_analyze().await?.cloned().expect("resolved");

    // Resolved with no result, not left pending.
    assert!(session.result.is_none());
    assert!(driver.aggregator().current().is_empty());

    // Series still gained its zero point; history was never touched.
    assert_eq!(driver.aggregator().series().len(), 1);
    assert_eq!(driver.aggregator().series().pause_counts, vec![0]);
    assert_eq!(history_calls.load(Ordering::SeqCst), 0);
    assert!(driver.history().is_empty());

    // Back to a usable Idle state.
    assert!(!driver.is_recording());
    driver.start_recording()?;
    assert!(driver.is_recording());
    Ok(())
}

#[tokio::test]
async fn refresh_failure_keeps_the_result_and_stale_history() -> Result<()> {
    let dir = tempfile::tempdir()?;

    let mut driver = driver_with(
        dir.path(),
        CannedBackend {
            submit_response: Ok(AnalysisResult {
                transcription: Some("still shown".into()),
                ..Default::default()
            }),
            history: Err("service restarting".into()),
            history_calls: Arc::new(AtomicUsize::new(0)),
        },
    );

    driver.start_recording()?;
    driver.stop_and_analyze().await?;

    // The just-displayed result survives the refresh failure.
    assert_eq!(
        driver.aggregator().current().transcription.as_deref(),
        Some("still shown")
    );
    assert!(driver.history().is_empty());
    Ok(())
}

#[tokio::test]
async fn stop_without_start_resolves_nothing() -> Result<()> {
    let dir = tempfile::tempdir()?;

    let mut driver = driver_with(
        dir.path(),
        CannedBackend {
            submit_response: Ok(AnalysisResult::default()),
            history: Ok(vec![]),
            history_calls: Arc::new(AtomicUsize::new(0)),
        },
    );

    assert!(driver.stop_and_analyze().await?.is_none());
    assert!(driver.sessions().is_empty());
    assert_eq!(driver.aggregator().series().len(), 0);
    Ok(())
}

#[tokio::test]
async fn each_cycle_appends_exactly_one_point() -> Result<()> {
    let dir = tempfile::tempdir()?;

    let mut driver = driver_with(
        dir.path(),
        CannedBackend {
            submit_response: Ok(AnalysisResult::default()),
            history: Ok(vec![]),
            history_calls: Arc::new(AtomicUsize::new(0)),
        },
    );

    for expected in 1..=3 {
        driver.start_recording()?;
        driver.stop_and_analyze().await?;
        let series = driver.aggregator().series();
        assert_eq!(series.len(), expected);
        assert!(series.is_aligned());
        assert_eq!(series.labels[expected - 1], format!("Recording {}", expected));
    }
    assert_eq!(driver.sessions().len(), 3);
    Ok(())
}
