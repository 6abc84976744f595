use super::controller::RecorderBackend;
use super::CaptureError;
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{Device, Sample, SampleFormat, Stream, StreamConfig};
use hound::{WavSpec, WavWriter};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing::{error, info, warn};
use uuid::Uuid;

type SharedWriter = Arc<Mutex<Option<WavWriter<std::io::BufWriter<std::fs::File>>>>>;

struct ActiveRecording {
    // Held so the stream keeps running; dropped to stop capture.
    _stream: Stream,
    writer: SharedWriter,
    path: PathBuf,
}

/// Microphone backend: captures from the default input device and writes
/// 16-bit WAV. The cpal callback runs on the audio thread and feeds the
/// writer through a mutex; everything else happens on the caller's thread.
pub struct MicRecorder {
    device: Device,
    config: StreamConfig,
    sample_format: SampleFormat,
    recordings_dir: PathBuf,
    active: Option<ActiveRecording>,
}

impl MicRecorder {
    /// Bind to the default input device. Fails with `AccessDenied` when no
    /// device or no usable configuration is available.
    pub fn new(recordings_dir: impl AsRef<Path>) -> Result<Self, CaptureError> {
        let host = cpal::default_host();

        let device = host
            .default_input_device()
            .ok_or_else(|| CaptureError::AccessDenied("no input device found".into()))?;

        let supported = device
            .default_input_config()
            .map_err(|e| CaptureError::AccessDenied(format!("no supported config: {}", e)))?;

        info!(
            "Using input device {:?}: {} Hz, {} channels, {:?}",
            device.name(),
            supported.sample_rate().0,
            supported.channels(),
            supported.sample_format()
        );

        let sample_format = supported.sample_format();
        let config: StreamConfig = supported.into();

        Ok(Self {
            device,
            config,
            sample_format,
            recordings_dir: recordings_dir.as_ref().to_path_buf(),
            active: None,
        })
    }

    fn build_stream(&self, writer: SharedWriter) -> Result<Stream, CaptureError> {
        match self.sample_format {
            SampleFormat::I16 => self.build_stream_typed::<i16>(writer),
            SampleFormat::U16 => self.build_stream_typed::<u16>(writer),
            SampleFormat::F32 => self.build_stream_typed::<f32>(writer),
            other => Err(CaptureError::AccessDenied(format!(
                "unsupported sample format {:?}",
                other
            ))),
        }
    }

    fn build_stream_typed<T>(&self, writer: SharedWriter) -> Result<Stream, CaptureError>
    where
        T: cpal::SizedSample + Send + 'static,
        f32: cpal::FromSample<T>,
    {
        let err_fn = |err| error!("Audio stream error: {}", err);

        let stream = self
            .device
            .build_input_stream(
                &self.config,
                move |data: &[T], _: &cpal::InputCallbackInfo| {
                    let mut guard = writer.lock().unwrap();
                    if let Some(ref mut w) = *guard {
                        for &sample in data {
                            if w.write_sample(sample_to_i16(sample)).is_err() {
                                error!("Failed to write audio sample");
                                break;
                            }
                        }
                    }
                },
                err_fn,
                None,
            )
            .map_err(|e| CaptureError::StreamFailed(e.to_string()))?;

        Ok(stream)
    }
}

impl RecorderBackend for MicRecorder {
    fn begin(&mut self) -> Result<(), CaptureError> {
        std::fs::create_dir_all(&self.recordings_dir)
            .map_err(|e| CaptureError::WriteFailed(e.to_string()))?;

        let path = self
            .recordings_dir
            .join(format!("recording-{}.wav", Uuid::new_v4()));

        let spec = WavSpec {
            channels: self.config.channels,
            sample_rate: self.config.sample_rate.0,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };

        let writer = WavWriter::create(&path, spec)
            .map_err(|e| CaptureError::WriteFailed(e.to_string()))?;
        let writer: SharedWriter = Arc::new(Mutex::new(Some(writer)));

        let stream = self.build_stream(Arc::clone(&writer))?;
        stream
            .play()
            .map_err(|e| CaptureError::StreamFailed(e.to_string()))?;

        info!("Capturing to {}", path.display());

        self.active = Some(ActiveRecording {
            _stream: stream,
            writer,
            path,
        });

        Ok(())
    }

    fn finish(&mut self) -> Result<PathBuf, CaptureError> {
        let active = self
            .active
            .take()
            .ok_or_else(|| CaptureError::StreamFailed("no active recording".into()))?;

        // Dropping the stream releases the device before the file is sealed.
        drop(active._stream);

        let writer = active.writer.lock().unwrap().take();
        if let Some(writer) = writer {
            writer
                .finalize()
                .map_err(|e| CaptureError::WriteFailed(e.to_string()))?;
        }

        Ok(active.path)
    }

    fn abort(&mut self) {
        if let Some(active) = self.active.take() {
            drop(active._stream);
            active.writer.lock().unwrap().take();
            if let Err(e) = std::fs::remove_file(&active.path) {
                warn!(
                    "Failed to remove aborted recording {}: {}",
                    active.path.display(),
                    e
                );
            }
        }
    }
}

/// Convert any input sample to i16 for WAV writing, clamped to full scale.
fn sample_to_i16<T>(sample: T) -> i16
where
    T: cpal::SizedSample,
    f32: cpal::FromSample<T>,
{
    let value = f32::from_sample(sample).clamp(-1.0, 1.0);
    (value * i16::MAX as f32) as i16
}
