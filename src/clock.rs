//! Frame clocks: the host's "call me on the next paint" primitive.
//!
//! The scheduler never sleeps or spawns anything itself. It asks a
//! [`FrameClock`] for one callback at a time and the host delivers it back
//! through [`Scheduler::on_frame`](crate::Scheduler::on_frame).
//!
//! Two clocks ship with the crate:
//! - [`ManualClock`]: deterministic, time only moves when told to (tests)
//! - [`IntervalClock`]: fixed-delay timer on the monotonic system clock

use std::time::{Duration, Instant};

/// Handle for one outstanding frame callback.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameRequest(u64);

impl FrameRequest {
    /// Raw handle id.
    #[inline]
    pub fn id(self) -> u64 {
        self.0
    }
}

/// Source of time and frame callbacks.
pub trait FrameClock {
    /// Current time in milliseconds from an arbitrary, monotonic origin.
    fn now(&self) -> f64;

    /// Ask for a callback at the next paint opportunity.
    ///
    /// Returns `None` when the host has no way to schedule one.
    fn request_frame(&mut self) -> Option<FrameRequest>;

    /// Withdraw an outstanding request. Unknown handles are ignored.
    fn cancel_frame(&mut self, request: FrameRequest);
}

/// Deterministic clock for tests and offline stepping.
///
/// ## Example
///
/// ```rust
/// use shapes_morph::{FrameClock, ManualClock};
///
/// let mut clock = ManualClock::new();
/// let req = clock.request_frame().unwrap();
/// let fired = clock.advance(16.0);
/// assert_eq!(fired, vec![(req, 16.0)]);
/// assert!(clock.advance(16.0).is_empty());
/// ```
#[derive(Clone, Debug, Default)]
pub struct ManualClock {
    now: f64,
    next_id: u64,
    pending: Vec<FrameRequest>,
    unavailable: bool,
}

impl ManualClock {
    /// Create a clock at time zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a clock at the given time.
    pub fn starting_at(now: f64) -> Self {
        Self {
            now,
            ..Self::default()
        }
    }

    /// A host with no scheduling primitive: every request is refused.
    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::default()
        }
    }

    /// Move time forward by `ms` and deliver every pending request.
    ///
    /// Returns the fired handles with their timestamp, in request order.
    pub fn advance(&mut self, ms: f64) -> Vec<(FrameRequest, f64)> {
        self.now += ms.max(0.0);
        let now = self.now;
        self.pending.drain(..).map(|req| (req, now)).collect()
    }

    /// Number of requests waiting to fire.
    #[inline]
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }
}

impl FrameClock for ManualClock {
    fn now(&self) -> f64 {
        self.now
    }

    fn request_frame(&mut self) -> Option<FrameRequest> {
        if self.unavailable {
            return None;
        }
        let req = FrameRequest(self.next_id);
        self.next_id += 1;
        self.pending.push(req);
        Some(req)
    }

    fn cancel_frame(&mut self, request: FrameRequest) {
        self.pending.retain(|r| *r != request);
    }
}

/// Fixed-delay timer for hosts without a paint callback.
///
/// Each request becomes due `delay` after it was made. The host drives it
/// with [`poll`](Self::poll) or the blocking [`wait`](Self::wait).
#[derive(Clone, Debug)]
pub struct IntervalClock {
    origin: Instant,
    delay: Duration,
    next_id: u64,
    pending: Option<(FrameRequest, Instant)>,
}

impl IntervalClock {
    /// Default delay: one frame at 60 FPS.
    pub const DEFAULT_DELAY: Duration = Duration::from_micros(16_667);

    /// Create a clock firing one frame (at 60 FPS) after each request.
    pub fn new() -> Self {
        Self::with_delay(Self::DEFAULT_DELAY)
    }

    /// Create a clock whose requests fire `delay` after being made.
    pub fn with_delay(delay: Duration) -> Self {
        Self {
            origin: Instant::now(),
            delay: delay.max(Duration::from_millis(1)),
            next_id: 0,
            pending: None,
        }
    }

    #[inline]
    pub fn delay(&self) -> Duration {
        self.delay
    }

    fn millis_at(&self, at: Instant) -> f64 {
        at.duration_since(self.origin).as_secs_f64() * 1000.0
    }

    /// Take the pending request if it is due, without blocking.
    pub fn poll(&mut self) -> Option<(FrameRequest, f64)> {
        let (req, deadline) = self.pending?;
        let now = Instant::now();
        if now < deadline {
            return None;
        }
        self.pending = None;
        Some((req, self.millis_at(now)))
    }

    /// Sleep until the pending request is due and take it.
    ///
    /// Returns `None` immediately when nothing is pending.
    pub fn wait(&mut self) -> Option<(FrameRequest, f64)> {
        let (req, deadline) = self.pending.take()?;
        let now = Instant::now();
        if now < deadline {
            std::thread::sleep(deadline - now);
        }
        Some((req, self.millis_at(Instant::now())))
    }
}

impl Default for IntervalClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock for IntervalClock {
    fn now(&self) -> f64 {
        self.millis_at(Instant::now())
    }

    fn request_frame(&mut self) -> Option<FrameRequest> {
        let req = FrameRequest(self.next_id);
        self.next_id += 1;
        // One outstanding callback at a time; a new request supersedes.
        self.pending = Some((req, Instant::now() + self.delay));
        Some(req)
    }

    fn cancel_frame(&mut self, request: FrameRequest) {
        if matches!(self.pending, Some((req, _)) if req == request) {
            self.pending = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_fires_once() {
        let mut clock = ManualClock::starting_at(100.0);
        let a = clock.request_frame().unwrap();
        let b = clock.request_frame().unwrap();
        assert_ne!(a, b);
        assert_eq!(clock.pending_count(), 2);

        let fired = clock.advance(10.0);
        assert_eq!(fired, vec![(a, 110.0), (b, 110.0)]);
        assert_eq!(clock.pending_count(), 0);
        assert_eq!(clock.now(), 110.0);
    }

    #[test]
    fn test_manual_clock_cancel() {
        let mut clock = ManualClock::new();
        let a = clock.request_frame().unwrap();
        clock.cancel_frame(a);
        clock.cancel_frame(a);
        assert!(clock.advance(50.0).is_empty());
    }

    #[test]
    fn test_manual_clock_unavailable() {
        let mut clock = ManualClock::unavailable();
        assert_eq!(clock.request_frame(), None);
    }

    #[test]
    fn test_interval_clock_cancel_and_wait() {
        let mut clock = IntervalClock::with_delay(Duration::from_millis(1));
        assert!(clock.wait().is_none());

        let a = clock.request_frame().unwrap();
        clock.cancel_frame(a);
        assert!(clock.wait().is_none());

        let b = clock.request_frame().unwrap();
        let (fired, ts) = clock.wait().unwrap();
        assert_eq!(fired, b);
        assert!(ts >= 1.0);
        assert!(clock.poll().is_none());
    }
}
