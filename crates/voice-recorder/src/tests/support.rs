//! Minimal session collaborators for exercising the binary's routing.

use voice_recorder_core::{
    CoreResult, DeliveryRouter, LevelProbe, PeakLevelSampler, Recorder, RecordingSession,
    SessionConfig, StatusPayload, StatusPresenter,
};

use std::sync::Arc;

/// Recorder that succeeds at everything and captures nothing.
#[derive(Default)]
pub(crate) struct StubRecorder {
    recording: bool,
    paused: bool,
    probe: LevelProbe,
}

impl Recorder for StubRecorder {
    fn start(&mut self) -> CoreResult<()> {
        self.recording = true;
        Ok(())
    }

    fn pause(&mut self) -> CoreResult<()> {
        self.paused = true;
        Ok(())
    }

    fn resume(&mut self) -> CoreResult<()> {
        self.paused = false;
        Ok(())
    }

    fn finish(&mut self) -> CoreResult<()> {
        self.recording = false;
        self.paused = false;
        Ok(())
    }

    fn is_recording(&self) -> bool {
        self.recording
    }

    fn is_paused(&self) -> bool {
        self.paused
    }

    fn level_probe(&self) -> LevelProbe {
        self.probe.clone()
    }
}

pub(crate) struct SilentPresenter;

impl StatusPresenter for SilentPresenter {
    fn render(&self, _payload: &StatusPayload) {}
}

/// Router over a stub-backed session. Must be called inside a tokio runtime.
#[allow(clippy::unwrap_used)]
pub(crate) fn stub_router() -> Arc<DeliveryRouter> {
    let session = RecordingSession::new(
        Box::new(StubRecorder::default()),
        Box::new(PeakLevelSampler::default()),
        Arc::new(SilentPresenter),
        SessionConfig::default(),
    )
    .unwrap();

    Arc::new(DeliveryRouter::new(session))
}
