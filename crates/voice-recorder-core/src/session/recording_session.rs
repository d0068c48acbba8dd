use crate::{
    Command, CommandOutcome, CoreResult, ElapsedTime, IgnoreReason, LevelSampler, Recorder,
    RecordingState, SessionConfig, SessionError, SessionSnapshot, SessionStatus, StatusPayload,
    StatusPresenter, StatusSubscription, SubscriptionId,
    session::{status_fanout::StatusFanout, tick_clock::TickClock, ticker::Ticker},
};

use std::{
    fmt,
    panic::Location,
    sync::{Arc, Mutex, MutexGuard, Weak},
};

use error_location::ErrorLocation;
use tokio::{runtime::Handle, time::Instant};
use tracing::{debug, error, info, instrument, trace, warn};
use uuid::Uuid;

/// The recording state machine.
///
/// Owns the recorder and level sampler, produces elapsed-time ticks while
/// recording, and pushes a [`StatusPayload`] to the presenter and every
/// subscriber on each tick and on each pause/resume.
///
/// # Concurrency
///
/// Cloning yields another handle to the same session. All state sits behind
/// one mutex: commands and ticks are serialised, so payloads are delivered in
/// order and a tick can never land after the pause or stop that cancelled it.
/// The tick task only holds a weak reference and ends with the session.
#[derive(Clone)]
pub struct RecordingSession {
    inner: Arc<Mutex<SessionInner>>,
    config: SessionConfig,
    runtime: Handle,
}

struct SessionInner {
    session_id: Uuid,
    state: RecordingState,
    clock: TickClock,
    last_emitted: ElapsedTime,
    recorder: Box<dyn Recorder>,
    sampler: Box<dyn LevelSampler>,
    fanout: StatusFanout,
    ticker: Option<Ticker>,
    generation: u64,
}

impl RecordingSession {
    /// Creates an Idle session on the current tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns `RuntimeUnavailable` when called outside a tokio runtime.
    #[track_caller]
    pub fn new(
        recorder: Box<dyn Recorder>,
        sampler: Box<dyn LevelSampler>,
        presenter: Arc<dyn StatusPresenter>,
        config: SessionConfig,
    ) -> CoreResult<Self> {
        let runtime = Handle::try_current().map_err(|e| SessionError::RuntimeUnavailable {
            reason: e.to_string(),
            location: ErrorLocation::from(Location::caller()),
        })?;

        Ok(Self::with_runtime(recorder, sampler, presenter, config, runtime))
    }

    /// Creates an Idle session whose timer task runs on `runtime`.
    pub fn with_runtime(
        recorder: Box<dyn Recorder>,
        sampler: Box<dyn LevelSampler>,
        presenter: Arc<dyn StatusPresenter>,
        config: SessionConfig,
        runtime: Handle,
    ) -> Self {
        let session_id = Uuid::new_v4();
        debug!(session_id = %session_id, tick_ms = config.tick_interval().as_millis(), "Session created");

        Self {
            inner: Arc::new(Mutex::new(SessionInner {
                session_id,
                state: RecordingState::Idle,
                clock: TickClock::default(),
                last_emitted: ElapsedTime::ZERO,
                recorder,
                sampler,
                fanout: StatusFanout::new(presenter),
                ticker: None,
                generation: 0,
            })),
            config,
            runtime,
        }
    }

    /// Starts recording from Idle.
    ///
    /// Starts the recorder, then the level sampler, emits a 00:00:00 payload
    /// and begins ticking.
    ///
    /// # Errors
    ///
    /// - `AlreadyActive` if the session is not Idle.
    /// - `ResourceUnavailable` if the recorder cannot start. The session is
    ///   then Stopped and the presenter has been told.
    #[track_caller]
    #[instrument(skip(self))]
    pub fn start(&self) -> CoreResult<Uuid> {
        let _rt = self.runtime.enter();
        let mut inner = self.lock();

        if inner.state != RecordingState::Idle {
            return Err(SessionError::AlreadyActive {
                state: inner.state,
                location: ErrorLocation::from(Location::caller()),
            });
        }

        if let Err(e) = inner.recorder.start() {
            error!(session_id = %inner.session_id, error = %e, "Recorder failed to start");
            inner.state = RecordingState::Stopped;
            inner.fanout.failed(&e);
            return Err(e);
        }

        let SessionInner {
            recorder, sampler, ..
        } = &mut *inner;
        sampler.start(recorder.as_ref(), &self.runtime);

        inner.clock.run(Instant::now());
        inner.state = RecordingState::Recording;
        inner.emit(ElapsedTime::ZERO);
        self.launch_ticker(&mut inner);

        info!(session_id = %inner.session_id, "Recording started");

        Ok(inner.session_id)
    }

    /// Pauses a running recording.
    ///
    /// Emits a paused payload immediately. A session that is already paused
    /// ignores the command, as does an Idle or Stopped one.
    ///
    /// # Errors
    ///
    /// Returns `ResourceUnavailable` if the recorder fails; the session is
    /// then Stopped.
    #[instrument(skip(self))]
    pub fn pause(&self) -> CoreResult<CommandOutcome> {
        let _rt = self.runtime.enter();
        let mut inner = self.lock();
        let result = self.try_pause(&mut inner);
        inner.absorb(result)
    }

    /// Resumes a paused recording.
    ///
    /// Elapsed time continues from the total reached at pause.
    ///
    /// # Errors
    ///
    /// Returns `ResourceUnavailable` if the recorder fails; the session is
    /// then Stopped.
    #[instrument(skip(self))]
    pub fn resume(&self) -> CoreResult<CommandOutcome> {
        let _rt = self.runtime.enter();
        let mut inner = self.lock();
        let result = self.try_resume(&mut inner);
        inner.absorb(result)
    }

    /// Stops the session, releasing the recorder and sampler.
    ///
    /// Idempotent: later calls are ignored and never finish the recorder
    /// twice.
    ///
    /// # Errors
    ///
    /// Never fails in practice; the signature matches the other commands.
    #[instrument(skip(self))]
    pub fn stop(&self) -> CoreResult<CommandOutcome> {
        let _rt = self.runtime.enter();
        let mut inner = self.lock();
        let result = inner.try_stop();
        inner.absorb(result)
    }

    /// Applies a command directly, bypassing any attached client.
    ///
    /// # Errors
    ///
    /// See [`pause`](Self::pause), [`resume`](Self::resume) and
    /// [`stop`](Self::stop).
    pub fn apply(&self, command: Command) -> CoreResult<CommandOutcome> {
        match command {
            Command::Pause => self.pause(),
            Command::Resume => self.resume(),
            Command::Stop => self.stop(),
        }
    }

    /// Turns a Stopped session back into a fresh Idle one.
    ///
    /// The new session gets a new id and zero elapsed time; subscribers and
    /// the presenter carry over. Idle sessions are returned as-is.
    ///
    /// # Errors
    ///
    /// Returns `AlreadyActive` while Recording or Paused.
    #[track_caller]
    #[instrument(skip(self))]
    pub fn renew(&self) -> CoreResult<Uuid> {
        let mut inner = self.lock();

        match inner.state {
            RecordingState::Idle => Ok(inner.session_id),
            RecordingState::Recording | RecordingState::Paused => {
                Err(SessionError::AlreadyActive {
                    state: inner.state,
                    location: ErrorLocation::from(Location::caller()),
                })
            }
            RecordingState::Stopped => {
                let previous = inner.session_id;
                inner.session_id = Uuid::new_v4();
                inner.state = RecordingState::Idle;
                inner.clock = TickClock::default();
                inner.last_emitted = ElapsedTime::ZERO;

                debug!(previous = %previous, session_id = %inner.session_id, "Session renewed");

                Ok(inner.session_id)
            }
        }
    }

    /// Current session identifier.
    pub fn session_id(&self) -> Uuid {
        self.lock().session_id
    }

    /// Current lifecycle state.
    pub fn state(&self) -> RecordingState {
        self.lock().state
    }

    /// State and last emitted elapsed time.
    pub fn snapshot(&self) -> SessionSnapshot {
        self.lock().snapshot()
    }

    /// Recording/paused flags and elapsed milliseconds.
    pub fn query(&self) -> SessionStatus {
        let inner = self.lock();
        SessionStatus {
            is_recording: inner.state.is_active(),
            is_paused: inner.state == RecordingState::Paused,
            elapsed_millis: inner.last_emitted.total_millis(),
        }
    }

    /// Registers a consumer for every payload emitted from now on.
    pub fn subscribe(&self) -> StatusSubscription {
        self.lock().fanout.subscribe()
    }

    /// Cancels a subscription. Returns `false` if it was already gone.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.lock().fanout.unsubscribe(id)
    }

    /// Subscribes and snapshots atomically, so no payload falls in between.
    pub(crate) fn subscribe_with_snapshot(&self) -> (StatusSubscription, SessionSnapshot) {
        let mut inner = self.lock();
        let subscription = inner.fanout.subscribe();
        trace!(subscribers = inner.fanout.subscriber_count(), "Subscriber added");
        (subscription, inner.snapshot())
    }

    fn try_pause(&self, inner: &mut SessionInner) -> CoreResult<CommandOutcome> {
        match inner.state {
            RecordingState::Recording => {}
            RecordingState::Paused => return Ok(inner.ignored(IgnoreReason::AlreadyInState)),
            RecordingState::Idle | RecordingState::Stopped => return Err(inner.not_active()),
        }

        if let Err(e) = inner.recorder.pause() {
            return Err(inner.fail(e));
        }

        inner.halt_ticker();
        let elapsed = inner.clock.halt(Instant::now());
        inner.state = RecordingState::Paused;
        inner.emit(elapsed);

        info!(session_id = %inner.session_id, elapsed = %inner.last_emitted, "Recording paused");

        Ok(CommandOutcome::Applied {
            state: RecordingState::Paused,
        })
    }

    fn try_resume(&self, inner: &mut SessionInner) -> CoreResult<CommandOutcome> {
        match inner.state {
            RecordingState::Paused => {}
            RecordingState::Recording => return Ok(inner.ignored(IgnoreReason::AlreadyInState)),
            RecordingState::Idle | RecordingState::Stopped => return Err(inner.not_active()),
        }

        if let Err(e) = inner.recorder.resume() {
            return Err(inner.fail(e));
        }

        inner.clock.run(Instant::now());
        inner.state = RecordingState::Recording;
        let elapsed = inner.last_emitted;
        inner.emit(elapsed);
        self.launch_ticker(inner);

        info!(session_id = %inner.session_id, elapsed = %inner.last_emitted, "Recording resumed");

        Ok(CommandOutcome::Applied {
            state: RecordingState::Recording,
        })
    }

    fn launch_ticker(&self, inner: &mut SessionInner) {
        inner.halt_ticker();
        inner.generation += 1;
        let generation = inner.generation;

        let weak: Weak<Mutex<SessionInner>> = Arc::downgrade(&self.inner);
        let ticker = Ticker::spawn(
            &self.runtime,
            generation,
            self.config.tick_interval(),
            move || match weak.upgrade() {
                Some(inner) => {
                    let mut guard = lock_inner(&inner);
                    guard.on_tick(generation)
                }
                None => false,
            },
        );

        inner.ticker = Some(ticker);
    }

    fn lock(&self) -> MutexGuard<'_, SessionInner> {
        lock_inner(&self.inner)
    }
}

impl fmt::Debug for RecordingSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordingSession")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

fn lock_inner(inner: &Mutex<SessionInner>) -> MutexGuard<'_, SessionInner> {
    // A panicking presenter must not wedge the session; the state itself
    // is still consistent.
    inner.lock().unwrap_or_else(|e| {
        error!("Session lock poisoned, recovering: {}", e);
        e.into_inner()
    })
}

impl SessionInner {
    /// Runs one tick. Returns `false` once this ticker is stale.
    fn on_tick(&mut self, generation: u64) -> bool {
        let current = self.ticker.as_ref().map(Ticker::generation);
        if self.state != RecordingState::Recording || current != Some(generation) {
            trace!(generation, "Stale tick dropped");
            return false;
        }

        let elapsed = self.clock.elapsed_at(Instant::now());
        self.emit(elapsed);
        trace!(session_id = %self.session_id, elapsed_ms = self.last_emitted.total_millis(), "Tick");

        true
    }

    /// Records `elapsed` and publishes the matching payload.
    fn emit(&mut self, elapsed: ElapsedTime) {
        // Never let the display run backwards.
        self.last_emitted = elapsed.max(self.last_emitted);
        let payload = StatusPayload::new(self.last_emitted, self.state == RecordingState::Paused);
        self.fanout.publish(&payload);
    }

    fn halt_ticker(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            ticker.cancel();
        }
    }

    fn try_stop(&mut self) -> CoreResult<CommandOutcome> {
        if !self.state.is_active() {
            return Err(self.not_active());
        }

        self.release();
        self.state = RecordingState::Stopped;
        self.fanout.finished(self.last_emitted);

        info!(session_id = %self.session_id, elapsed = %self.last_emitted, "Recording stopped");

        Ok(CommandOutcome::Applied {
            state: RecordingState::Stopped,
        })
    }

    /// Halts the clock and ticker, then releases the recorder and sampler
    /// in that order.
    fn release(&mut self) {
        self.halt_ticker();
        if self.clock.is_running() {
            let elapsed = self.clock.halt(Instant::now());
            self.last_emitted = elapsed.max(self.last_emitted);
        }

        if let Err(e) = self.recorder.finish() {
            warn!(session_id = %self.session_id, error = %e, "Recorder did not finish cleanly");
        }
        self.sampler.stop();
    }

    /// Tears the session down after a recorder failure.
    fn fail(&mut self, error: SessionError) -> SessionError {
        error!(session_id = %self.session_id, error = %error, "Recorder failed, stopping session");
        self.release();
        self.state = RecordingState::Stopped;
        self.fanout.failed(&error);
        error
    }

    fn absorb(&self, result: CoreResult<CommandOutcome>) -> CoreResult<CommandOutcome> {
        match result {
            Err(SessionError::NotActive { state, location }) => {
                debug!(state = %state, location = %location, "Command ignored, session not active");
                Ok(self.ignored(IgnoreReason::NotActive))
            }
            Ok(outcome @ CommandOutcome::Ignored { .. }) => {
                debug!(?outcome, "Command ignored");
                Ok(outcome)
            }
            other => other,
        }
    }

    #[track_caller]
    fn not_active(&self) -> SessionError {
        SessionError::NotActive {
            state: self.state,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    fn ignored(&self, reason: IgnoreReason) -> CommandOutcome {
        CommandOutcome::Ignored {
            state: self.state,
            reason,
        }
    }

    fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            session_id: self.session_id,
            state: self.state,
            elapsed: self.last_emitted,
        }
    }
}

impl Drop for SessionInner {
    fn drop(&mut self) {
        self.halt_ticker();
        if self.state.is_active() || self.recorder.is_recording() {
            warn!(session_id = %self.session_id, "Session dropped while recording, releasing recorder");
            self.release();
            self.state = RecordingState::Stopped;
        }
    }
}
