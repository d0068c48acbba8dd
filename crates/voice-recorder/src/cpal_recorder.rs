//! Microphone recorder backed by CPAL.

use std::{
    panic::Location,
    sync::{
        Arc,
        atomic::{AtomicBool, AtomicU64, Ordering},
    },
};

use cpal::{
    Device, Stream, StreamConfig,
    traits::{DeviceTrait, HostTrait, StreamTrait},
};
use error_location::ErrorLocation;
use tracing::{debug, error, info, instrument};
use voice_recorder_core::{CoreResult, LevelProbe, Recorder, SessionError};

#[track_caller]
fn unavailable(reason: String) -> SessionError {
    SessionError::ResourceUnavailable {
        reason,
        location: ErrorLocation::from(Location::caller()),
    }
}

/// Captures from the configured input device and feeds its level probe.
///
/// The device is acquired on `start`, not on construction, so a missing
/// microphone surfaces as a session failure rather than a startup crash.
pub struct CpalRecorder {
    selected_device: Option<String>,
    stream: Option<Stream>,
    /// Signals the audio callback to discard data. Set while paused and
    /// before the stream is dropped.
    paused: Arc<AtomicBool>,
    frames_captured: Arc<AtomicU64>,
    probe: LevelProbe,
}

impl CpalRecorder {
    /// Creates a recorder for the named device, or the default input.
    pub fn new(selected_device: Option<String>) -> Self {
        Self {
            selected_device,
            stream: None,
            paused: Arc::new(AtomicBool::new(false)),
            frames_captured: Arc::new(AtomicU64::new(0)),
            probe: LevelProbe::default(),
        }
    }

    #[track_caller]
    #[allow(deprecated)]
    fn open_device(&self) -> CoreResult<(Device, StreamConfig)> {
        let host = cpal::default_host();

        let device = match &self.selected_device {
            Some(wanted) => host
                .input_devices()
                .map_err(|e| unavailable(format!("Failed to list input devices: {}", e)))?
                .find(|device| device.name().is_ok_and(|name| &name == wanted))
                .ok_or_else(|| unavailable(format!("Input device not found: {}", wanted)))?,
            None => host
                .default_input_device()
                .ok_or_else(|| unavailable("No microphone found".to_string()))?,
        };

        let config = device
            .default_input_config()
            .map_err(|e| unavailable(format!("Failed to get config: {}", e)))?;

        info!(
            device_id = ?device.id(),
            sample_rate = config.sample_rate(),
            channels = config.channels(),
            "Input device acquired"
        );

        Ok((device, config.into()))
    }
}

impl Recorder for CpalRecorder {
    #[track_caller]
    #[instrument(skip(self))]
    fn start(&mut self) -> CoreResult<()> {
        if self.stream.is_some() {
            debug!("Capture already running");
            return Ok(());
        }

        let (device, config) = self.open_device()?;
        let channels = u64::from(config.channels.max(1));

        self.paused.store(false, Ordering::Release);
        self.frames_captured.store(0, Ordering::Release);

        let paused = Arc::clone(&self.paused);
        let frames = Arc::clone(&self.frames_captured);
        let probe = self.probe.clone();

        let stream = device
            .build_input_stream(
                &config,
                move |data: &[f32], _: &cpal::InputCallbackInfo| {
                    // Checked before touching shared state so a callback that
                    // fires after pause or finish records nothing.
                    if paused.load(Ordering::Acquire) {
                        return;
                    }
                    let peak = data.iter().fold(0.0f32, |peak, s| peak.max(s.abs()));
                    probe.record_peak(peak);
                    frames.fetch_add(data.len() as u64 / channels, Ordering::Relaxed);
                },
                |err| {
                    error!("Audio stream error: {}", err);
                },
                None,
            )
            .map_err(|e| unavailable(format!("Failed to build stream: {}", e)))?;

        stream
            .play()
            .map_err(|e| unavailable(format!("Failed to start stream: {}", e)))?;

        self.stream = Some(stream);
        info!("Audio capture started");

        Ok(())
    }

    #[track_caller]
    #[instrument(skip(self))]
    fn pause(&mut self) -> CoreResult<()> {
        self.paused.store(true, Ordering::Release);

        if let Some(stream) = &self.stream {
            stream
                .pause()
                .map_err(|e| unavailable(format!("Failed to pause stream: {}", e)))?;
        }

        debug!("Audio capture paused");
        Ok(())
    }

    #[track_caller]
    #[instrument(skip(self))]
    fn resume(&mut self) -> CoreResult<()> {
        let Some(stream) = &self.stream else {
            return Err(unavailable("Cannot resume, no capture stream".to_string()));
        };

        stream
            .play()
            .map_err(|e| unavailable(format!("Failed to resume stream: {}", e)))?;
        self.paused.store(false, Ordering::Release);

        debug!("Audio capture resumed");
        Ok(())
    }

    #[instrument(skip(self))]
    fn finish(&mut self) -> CoreResult<()> {
        self.paused.store(true, Ordering::Release);

        if let Some(stream) = self.stream.take() {
            drop(stream);
            info!(
                frames = self.frames_captured.load(Ordering::Acquire),
                "Audio capture stopped"
            );
        }

        Ok(())
    }

    fn is_recording(&self) -> bool {
        self.stream.is_some()
    }

    fn is_paused(&self) -> bool {
        self.stream.is_some() && self.paused.load(Ordering::Acquire)
    }

    fn level_probe(&self) -> LevelProbe {
        self.probe.clone()
    }
}
