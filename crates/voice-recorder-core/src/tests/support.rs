//! Counting fakes for the session's collaborators.

use crate::{
    CoreResult, ElapsedTime, LevelProbe, LevelSampler, Recorder, RecordingSession, SessionConfig,
    SessionError, StatusPayload, StatusPresenter,
};

use std::{
    panic::Location,
    sync::{
        Arc, Mutex,
        atomic::{AtomicBool, AtomicUsize, Ordering},
    },
};

use error_location::ErrorLocation;
use tokio::runtime::Handle;

/// Calls observed by [`FakeRecorder`] and [`FakeSampler`].
#[derive(Default)]
pub(crate) struct Calls {
    pub recorder_start: AtomicUsize,
    pub recorder_pause: AtomicUsize,
    pub recorder_resume: AtomicUsize,
    pub recorder_finish: AtomicUsize,
    pub sampler_start: AtomicUsize,
    pub sampler_stop: AtomicUsize,
    /// Order of lifecycle calls, e.g. `["recorder.start", "sampler.start"]`.
    pub sequence: Mutex<Vec<&'static str>>,
}

impl Calls {
    pub(crate) fn count(counter: &AtomicUsize) -> usize {
        counter.load(Ordering::SeqCst)
    }

    fn record(&self, counter: &AtomicUsize, name: &'static str) {
        counter.fetch_add(1, Ordering::SeqCst);
        self.sequence
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(name);
    }

    pub(crate) fn sequence(&self) -> Vec<&'static str> {
        self.sequence
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

pub(crate) struct FakeRecorder {
    calls: Arc<Calls>,
    recording: bool,
    paused: bool,
    fail_start: bool,
    fail_pause: Arc<AtomicBool>,
    fail_resume: Arc<AtomicBool>,
    probe: LevelProbe,
}

impl FakeRecorder {
    pub(crate) fn new(calls: Arc<Calls>) -> Self {
        Self {
            calls,
            recording: false,
            paused: false,
            fail_start: false,
            fail_pause: Arc::new(AtomicBool::new(false)),
            fail_resume: Arc::new(AtomicBool::new(false)),
            probe: LevelProbe::default(),
        }
    }

    pub(crate) fn failing_start(calls: Arc<Calls>) -> Self {
        Self {
            fail_start: true,
            ..Self::new(calls)
        }
    }

    pub(crate) fn with_pause_failure(mut self, fail_pause: Arc<AtomicBool>) -> Self {
        self.fail_pause = fail_pause;
        self
    }

    pub(crate) fn with_resume_failure(mut self, fail_resume: Arc<AtomicBool>) -> Self {
        self.fail_resume = fail_resume;
        self
    }

    pub(crate) fn with_probe(mut self, probe: LevelProbe) -> Self {
        self.probe = probe;
        self
    }

    #[track_caller]
    fn unavailable(reason: &str) -> SessionError {
        SessionError::ResourceUnavailable {
            reason: reason.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl Recorder for FakeRecorder {
    fn start(&mut self) -> CoreResult<()> {
        self.calls.record(&self.calls.recorder_start, "recorder.start");
        if self.fail_start {
            return Err(Self::unavailable("microphone busy"));
        }
        self.recording = true;
        Ok(())
    }

    fn pause(&mut self) -> CoreResult<()> {
        self.calls.record(&self.calls.recorder_pause, "recorder.pause");
        if self.fail_pause.load(Ordering::SeqCst) {
            return Err(Self::unavailable("device unplugged"));
        }
        self.paused = true;
        Ok(())
    }

    fn resume(&mut self) -> CoreResult<()> {
        self.calls.record(&self.calls.recorder_resume, "recorder.resume");
        if self.fail_resume.load(Ordering::SeqCst) {
            return Err(Self::unavailable("device unplugged"));
        }
        self.paused = false;
        Ok(())
    }

    fn finish(&mut self) -> CoreResult<()> {
        self.calls.record(&self.calls.recorder_finish, "recorder.finish");
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

pub(crate) struct FakeSampler {
    calls: Arc<Calls>,
}

impl FakeSampler {
    pub(crate) fn new(calls: Arc<Calls>) -> Self {
        Self { calls }
    }
}

impl LevelSampler for FakeSampler {
    fn start(&mut self, _recorder: &dyn Recorder, _runtime: &Handle) {
        self.calls.record(&self.calls.sampler_start, "sampler.start");
    }

    fn stop(&mut self) {
        self.calls.record(&self.calls.sampler_stop, "sampler.stop");
    }
}

/// Presenter that remembers everything it was shown.
#[derive(Default)]
pub(crate) struct CapturingPresenter {
    pub rendered: Mutex<Vec<StatusPayload>>,
    pub finished: Mutex<Vec<ElapsedTime>>,
    pub failures: Mutex<Vec<String>>,
}

impl CapturingPresenter {
    pub(crate) fn rendered(&self) -> Vec<StatusPayload> {
        self.rendered
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    pub(crate) fn last(&self) -> Option<StatusPayload> {
        self.rendered().last().copied()
    }

    pub(crate) fn finished(&self) -> Vec<ElapsedTime> {
        self.finished
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    pub(crate) fn failures(&self) -> Vec<String> {
        self.failures
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

impl StatusPresenter for CapturingPresenter {
    fn render(&self, payload: &StatusPayload) {
        self.rendered
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(*payload);
    }

    fn finished(&self, elapsed: ElapsedTime) {
        self.finished
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(elapsed);
    }

    fn failed(&self, error: &SessionError) {
        self.failures
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(error.to_string());
    }
}

/// A session wired to fakes, plus handles to inspect them.
pub(crate) struct Harness {
    pub session: RecordingSession,
    pub calls: Arc<Calls>,
    pub presenter: Arc<CapturingPresenter>,
}

impl Harness {
    /// Must be called inside a tokio runtime.
    #[allow(clippy::unwrap_used)]
    pub(crate) fn new() -> Self {
        let calls = Arc::new(Calls::default());
        Self::with_recorder(FakeRecorder::new(Arc::clone(&calls)), calls)
    }

    #[allow(clippy::unwrap_used)]
    pub(crate) fn with_recorder(recorder: FakeRecorder, calls: Arc<Calls>) -> Self {
        let presenter = Arc::new(CapturingPresenter::default());
        let session = RecordingSession::new(
            Box::new(recorder),
            Box::new(FakeSampler::new(Arc::clone(&calls))),
            presenter.clone(),
            SessionConfig::default(),
        )
        .unwrap();

        Self {
            session,
            calls,
            presenter,
        }
    }
}

/// Millisecond totals of a payload sequence.
pub(crate) fn millis(payloads: &[StatusPayload]) -> Vec<u64> {
    payloads.iter().map(|p| p.elapsed().total_millis()).collect()
}
