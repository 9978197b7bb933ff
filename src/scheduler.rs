//! Frame scheduler for sequence playback.

use std::sync::Arc;

use crate::clock::{FrameClock, FrameRequest, IntervalClock, ManualClock};
use crate::config::{PlaybackConfig, DEFAULT_INTERVAL_MS};
use crate::telemetry::{Telemetry, TelemetrySnapshot};
use crate::{Frame, Sequence, SequenceStore};

static PLACEHOLDER: Frame = Frame::EMPTY;

/// Current state of the scheduler.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PlaybackState {
    /// No callback outstanding; frame and telemetry are frozen
    #[default]
    Stopped,
    /// A frame callback is outstanding
    Running,
}

/// Drives a [`Sequence`] forward on a fixed interval.
///
/// The scheduler keeps exactly one frame callback outstanding on its
/// [`FrameClock`] while running. The host delivers each callback through
/// [`on_frame`](Self::on_frame); the frame advances once the configured
/// interval has elapsed, and every callback feeds the telemetry.
///
/// None of the operations fail: unknown sequences fall back, and invalid
/// arguments are ignored.
///
/// ## Example
///
/// ```rust
/// use shapes_morph::{ManualClock, PlaybackState, Scheduler};
///
/// let mut scheduler = Scheduler::new(ManualClock::new());
/// scheduler.start("loading", 100);
/// assert_eq!(scheduler.state(), PlaybackState::Running);
///
/// // Seven 50ms paints: frames advance at 100, 200 and 300ms
/// for _ in 0..7 {
///     scheduler.advance_clock(50.0);
/// }
/// assert_eq!(scheduler.current_frame(), 3);
/// assert_eq!(scheduler.telemetry().total_frames, 3);
///
/// scheduler.stop();
/// assert_eq!(scheduler.state(), PlaybackState::Stopped);
/// ```
#[derive(Debug)]
pub struct Scheduler<C: FrameClock> {
    store: Arc<SequenceStore>,
    clock: C,
    /// Resolved active sequence
    sequence: Option<Arc<Sequence>>,
    /// Name passed to the last `start`, replayed by `toggle`
    requested: Option<String>,
    current_frame: usize,
    /// Interval applied from the next advance onwards
    interval_ms: u32,
    /// Interval the in-flight advance is measured against
    active_interval_ms: u32,
    default_interval_ms: u32,
    /// Baseline for the interval check
    last_advance: f64,
    pending: Option<FrameRequest>,
    state: PlaybackState,
    telemetry: Telemetry,
}

impl<C: FrameClock> Scheduler<C> {
    /// Create a scheduler over the builtin sequences.
    pub fn new(clock: C) -> Self {
        Self::with_store(SequenceStore::builtin(), clock)
    }

    /// Create a scheduler over a custom store.
    pub fn with_store(store: Arc<SequenceStore>, clock: C) -> Self {
        Self {
            store,
            clock,
            sequence: None,
            requested: None,
            current_frame: 0,
            interval_ms: DEFAULT_INTERVAL_MS,
            active_interval_ms: DEFAULT_INTERVAL_MS,
            default_interval_ms: DEFAULT_INTERVAL_MS,
            last_advance: 0.0,
            pending: None,
            state: PlaybackState::Stopped,
            telemetry: Telemetry::new(),
        }
    }

    /// Apply the default interval and dropped-frame threshold from `config`.
    ///
    /// A running session keeps its frame, interval and telemetry counters;
    /// the new threshold applies to gaps recorded from now on.
    pub fn with_config(mut self, config: &PlaybackConfig) -> Self {
        self.default_interval_ms = config.interval_ms();
        self.telemetry.set_threshold(config.dropped_frame_threshold_ms());
        if self.sequence.is_none() {
            self.interval_ms = self.default_interval_ms;
            self.active_interval_ms = self.default_interval_ms;
        }
        self
    }

    /// Start (or restart) playback of `name` every `interval_ms`.
    ///
    /// Unknown or empty names fall back to the store's fallback sequence.
    /// A zero interval uses the configured default. Playback always
    /// restarts at frame 0 with fresh telemetry, even when already running.
    /// If the resolved sequence has no frames, or the clock cannot schedule
    /// a callback, the scheduler stays stopped.
    pub fn start(&mut self, name: &str, interval_ms: u32) {
        self.cancel_pending();

        let interval_ms = if interval_ms == 0 {
            self.default_interval_ms
        } else {
            interval_ms
        };
        let sequence = Arc::clone(self.store.resolve(name));

        self.requested = Some(name.to_string());
        self.interval_ms = interval_ms;
        self.active_interval_ms = interval_ms;
        self.current_frame = 0;

        let now = self.clock.now();
        self.last_advance = now;
        self.telemetry.reset(Some(now));

        if sequence.is_empty() {
            tracing::warn!(sequence = sequence.name(), "sequence has no frames, not starting");
            self.sequence = Some(sequence);
            self.state = PlaybackState::Stopped;
            return;
        }

        tracing::debug!(
            requested = name,
            sequence = sequence.name(),
            frames = sequence.len(),
            interval_ms,
            "starting playback"
        );
        self.sequence = Some(sequence);
        self.schedule_next();
    }

    /// Stop playback, freezing the current frame and telemetry.
    ///
    /// Cancels the outstanding callback; calling it again is a no-op.
    pub fn stop(&mut self) {
        self.cancel_pending();
        if self.state == PlaybackState::Running {
            tracing::debug!(
                sequence = self.sequence_name(),
                frame = self.current_frame,
                "stopping playback"
            );
        }
        self.state = PlaybackState::Stopped;
    }

    /// Toggle playback.
    ///
    /// A running scheduler stops. A stopped one restarts the last started
    /// sequence at the current interval, from frame 0. Without a previous
    /// `start` nothing happens.
    pub fn toggle(&mut self) {
        match self.state {
            PlaybackState::Running => self.stop(),
            PlaybackState::Stopped => {
                if let Some(name) = self.requested.clone() {
                    let interval_ms = self.interval_ms;
                    self.start(&name, interval_ms);
                }
            }
        }
    }

    /// Set the interval used from the next frame advance on.
    ///
    /// The advance already in flight still completes on the old interval.
    /// A zero interval is ignored.
    pub fn change_speed(&mut self, interval_ms: u32) {
        if interval_ms == 0 {
            return;
        }
        tracing::debug!(from = self.interval_ms, to = interval_ms, "changing speed");
        self.interval_ms = interval_ms;
    }

    /// Jump directly to `index`; out-of-range indices are ignored.
    pub fn jump_to_frame(&mut self, index: usize) {
        if index < self.frame_count() {
            self.current_frame = index;
        }
    }

    /// Deliver a frame callback fired by the clock at `now` (ms).
    ///
    /// Callbacks that are not the one currently outstanding (cancelled by
    /// `stop` or superseded by a restart) are ignored. Returns true if the
    /// frame advanced.
    pub fn on_frame(&mut self, request: FrameRequest, now: f64) -> bool {
        if self.state != PlaybackState::Running || self.pending != Some(request) {
            tracing::trace!(request = request.id(), "ignoring stale frame callback");
            return false;
        }
        self.pending = None;

        let count = self.frame_count();
        let elapsed = now - self.last_advance;
        let advanced = count > 0 && elapsed >= f64::from(self.active_interval_ms);
        if advanced {
            self.current_frame = (self.current_frame + 1) % count;
            self.telemetry.record_advance();
            self.last_advance = now;
            self.active_interval_ms = self.interval_ms;
        }

        self.telemetry.record_callback(now);
        tracing::trace!(frame = self.current_frame, elapsed, advanced, "tick");

        self.schedule_next();
        advanced
    }

    /// Stop playback and release the outstanding callback.
    pub fn dispose(mut self) {
        self.stop();
    }

    fn schedule_next(&mut self) {
        match self.clock.request_frame() {
            Some(request) => {
                self.pending = Some(request);
                self.state = PlaybackState::Running;
            }
            None => {
                tracing::warn!("clock cannot schedule frame callbacks, playback stopped");
                self.pending = None;
                self.state = PlaybackState::Stopped;
            }
        }
    }

    fn cancel_pending(&mut self) {
        if let Some(request) = self.pending.take() {
            self.clock.cancel_frame(request);
        }
    }

    /// Frame at the current index, or an empty placeholder.
    pub fn current_frame_content(&self) -> &Frame {
        self.sequence
            .as_ref()
            .and_then(|s| s.get(self.current_frame))
            .unwrap_or(&PLACEHOLDER)
    }

    /// Latest telemetry snapshot.
    #[inline]
    pub fn telemetry(&self) -> TelemetrySnapshot {
        self.telemetry.snapshot()
    }

    /// Names of every sequence the scheduler can play.
    pub fn available_sequence_names(&self) -> Vec<&str> {
        self.store.list_sequence_names()
    }

    #[inline]
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.state == PlaybackState::Running
    }

    /// Current frame index.
    #[inline]
    pub fn current_frame(&self) -> usize {
        self.current_frame
    }

    /// Number of frames in the active sequence (0 if none).
    pub fn frame_count(&self) -> usize {
        self.sequence.as_ref().map_or(0, |s| s.len())
    }

    /// Configured interval in milliseconds.
    #[inline]
    pub fn interval_ms(&self) -> u32 {
        self.interval_ms
    }

    /// Name of the resolved active sequence.
    pub fn sequence_name(&self) -> Option<&str> {
        self.sequence.as_deref().map(Sequence::name)
    }

    #[inline]
    pub fn store(&self) -> &SequenceStore {
        &self.store
    }

    #[inline]
    pub fn clock(&self) -> &C {
        &self.clock
    }
}

impl<C: FrameClock> Drop for Scheduler<C> {
    fn drop(&mut self) {
        self.cancel_pending();
    }
}

impl Scheduler<ManualClock> {
    /// Move the manual clock forward and deliver whatever fired.
    ///
    /// Returns the number of frame advances.
    pub fn advance_clock(&mut self, ms: f64) -> usize {
        let fired = self.clock.advance(ms);
        fired
            .into_iter()
            .filter(|&(request, now)| self.on_frame(request, now))
            .count()
    }
}

impl Scheduler<IntervalClock> {
    /// Deliver the outstanding callback if it is due. Returns true if the frame advanced.
    pub fn poll(&mut self) -> bool {
        match self.clock.poll() {
            Some((request, now)) => self.on_frame(request, now),
            None => false,
        }
    }

    /// Block until the outstanding callback is due and deliver it.
    ///
    /// Returns `None` when stopped (nothing outstanding), otherwise whether
    /// the frame advanced.
    pub fn wait(&mut self) -> Option<bool> {
        let (request, now) = self.clock.wait()?;
        Some(self.on_frame(request, now))
    }
}
