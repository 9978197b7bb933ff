//! Frame-rate telemetry over a rolling window of callback gaps.

/// Number of callback gaps kept in the rolling window.
pub const TELEMETRY_WINDOW: usize = 60;

/// Gap (ms) above which a callback counts as a dropped frame.
pub const DEFAULT_DROPPED_FRAME_THRESHOLD_MS: f64 = 20.0;

/// Latest computed playback health metrics.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TelemetrySnapshot {
    /// Observed callbacks per second, rounded
    pub fps: u32,
    /// Mean gap between callbacks in milliseconds, rounded
    pub frame_time: u32,
    /// Gaps above the dropped-frame threshold since the last start
    pub dropped_frames: u64,
    /// Frame advances since the last start
    pub total_frames: u64,
}

/// Rolling callback-rate statistics.
///
/// Gaps live in a fixed ring buffer, so recording never allocates.
/// Counters accumulate until [`reset`](Self::reset).
///
/// ## Example
///
/// ```rust
/// use shapes_morph::Telemetry;
///
/// let mut telemetry = Telemetry::new();
/// for gap in [10.0, 10.0, 25.0, 10.0] {
///     telemetry.record_gap(gap);
/// }
/// let snapshot = telemetry.snapshot();
/// assert_eq!(snapshot.dropped_frames, 1);
/// assert_eq!(snapshot.frame_time, 14); // 55 / 4 = 13.75
/// ```
#[derive(Clone, Debug)]
pub struct Telemetry {
    gaps: [f64; TELEMETRY_WINDOW],
    /// Next write position
    head: usize,
    /// Filled slots
    len: usize,
    last_callback: Option<f64>,
    dropped_frames: u64,
    total_frames: u64,
    threshold_ms: f64,
}

impl Default for Telemetry {
    fn default() -> Self {
        Self::new()
    }
}

impl Telemetry {
    pub fn new() -> Self {
        Self::with_threshold(DEFAULT_DROPPED_FRAME_THRESHOLD_MS)
    }

    /// Create telemetry with a custom dropped-frame threshold.
    pub fn with_threshold(threshold_ms: f64) -> Self {
        let mut telemetry = Self {
            gaps: [0.0; TELEMETRY_WINDOW],
            head: 0,
            len: 0,
            last_callback: None,
            dropped_frames: 0,
            total_frames: 0,
            threshold_ms: DEFAULT_DROPPED_FRAME_THRESHOLD_MS,
        };
        telemetry.set_threshold(threshold_ms);
        telemetry
    }

    /// Change the dropped-frame threshold without touching the window or counters.
    ///
    /// Non-positive or non-finite values fall back to the default.
    pub fn set_threshold(&mut self, threshold_ms: f64) {
        self.threshold_ms = if threshold_ms.is_finite() && threshold_ms > 0.0 {
            threshold_ms
        } else {
            DEFAULT_DROPPED_FRAME_THRESHOLD_MS
        };
    }

    #[inline]
    pub fn threshold_ms(&self) -> f64 {
        self.threshold_ms
    }

    /// Clear the window and counters; `origin` becomes the previous callback.
    pub fn reset(&mut self, origin: Option<f64>) {
        self.gaps = [0.0; TELEMETRY_WINDOW];
        self.head = 0;
        self.len = 0;
        self.last_callback = origin;
        self.dropped_frames = 0;
        self.total_frames = 0;
    }

    /// Record a callback at `timestamp` (ms), measuring the gap to the previous one.
    pub fn record_callback(&mut self, timestamp: f64) {
        if let Some(prev) = self.last_callback {
            self.record_gap((timestamp - prev).max(0.0));
        }
        self.last_callback = Some(timestamp);
    }

    /// Push one inter-callback gap into the window.
    pub fn record_gap(&mut self, gap_ms: f64) {
        if self.len < TELEMETRY_WINDOW {
            self.len += 1;
        }
        self.gaps[self.head] = gap_ms;
        self.head = (self.head + 1) % TELEMETRY_WINDOW;

        if gap_ms > self.threshold_ms {
            self.dropped_frames += 1;
        }
    }

    /// Count one frame advance.
    #[inline]
    pub fn record_advance(&mut self) {
        self.total_frames += 1;
    }

    /// Mean gap over the window, or 0 when empty.
    pub fn average_frame_time(&self) -> f64 {
        if self.len == 0 {
            0.0
        } else {
            self.window().sum::<f64>() / self.len as f64
        }
    }

    /// Gaps currently in the window, oldest first.
    pub fn window(&self) -> impl Iterator<Item = f64> + '_ {
        let start = (self.head + TELEMETRY_WINDOW - self.len) % TELEMETRY_WINDOW;
        (0..self.len).map(move |i| self.gaps[(start + i) % TELEMETRY_WINDOW])
    }

    /// Compute the current snapshot.
    pub fn snapshot(&self) -> TelemetrySnapshot {
        let avg = self.average_frame_time();
        let fps = if avg > 0.0 { 1000.0 / avg } else { 0.0 };
        TelemetrySnapshot {
            fps: fps.round() as u32,
            frame_time: avg.round() as u32,
            dropped_frames: self.dropped_frames,
            total_frames: self.total_frames,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_window() {
        let telemetry = Telemetry::new();
        assert_eq!(telemetry.snapshot(), TelemetrySnapshot::default());
    }

    #[test]
    fn test_dropped_frames_counted_once() {
        let mut telemetry = Telemetry::new();
        for gap in [10.0, 10.0, 25.0, 10.0] {
            telemetry.record_gap(gap);
        }
        assert_eq!(telemetry.snapshot().dropped_frames, 1);
    }

    #[test]
    fn test_exact_threshold_is_not_dropped() {
        let mut telemetry = Telemetry::new();
        telemetry.record_gap(20.0);
        assert_eq!(telemetry.snapshot().dropped_frames, 0);
    }

    #[test]
    fn test_fps_from_callbacks() {
        let mut telemetry = Telemetry::new();
        telemetry.reset(Some(0.0));
        for i in 1..=10 {
            telemetry.record_callback(i as f64 * 16.0);
        }
        let snapshot = telemetry.snapshot();
        assert_eq!(snapshot.frame_time, 16);
        assert_eq!(snapshot.fps, 63); // 1000 / 16 = 62.5
        assert_eq!(snapshot.dropped_frames, 0);
    }

    #[test]
    fn test_first_callback_without_origin_has_no_gap() {
        let mut telemetry = Telemetry::new();
        telemetry.record_callback(500.0);
        assert_eq!(telemetry.window().count(), 0);
        telemetry.record_callback(510.0);
        assert_eq!(telemetry.window().collect::<Vec<_>>(), vec![10.0]);
    }

    #[test]
    fn test_window_keeps_last_sixty() {
        let mut telemetry = Telemetry::new();
        for _ in 0..TELEMETRY_WINDOW {
            telemetry.record_gap(50.0);
        }
        for _ in 0..TELEMETRY_WINDOW {
            telemetry.record_gap(10.0);
        }
        assert_eq!(telemetry.window().count(), TELEMETRY_WINDOW);
        let snapshot = telemetry.snapshot();
        assert_eq!(snapshot.frame_time, 10);
        assert_eq!(snapshot.fps, 100);
        // Dropped count outlives the window
        assert_eq!(snapshot.dropped_frames, TELEMETRY_WINDOW as u64);
    }

    #[test]
    fn test_reset_clears_counters() {
        let mut telemetry = Telemetry::new();
        telemetry.record_gap(40.0);
        telemetry.record_advance();
        telemetry.reset(None);
        assert_eq!(telemetry.snapshot(), TelemetrySnapshot::default());
    }

    #[test]
    fn test_set_threshold_keeps_counters() {
        let mut telemetry = Telemetry::new();
        telemetry.record_gap(25.0);
        telemetry.record_advance();
        telemetry.set_threshold(30.0);
        assert_eq!(telemetry.threshold_ms(), 30.0);
        telemetry.record_gap(25.0);
        let snapshot = telemetry.snapshot();
        assert_eq!(snapshot.dropped_frames, 1);
        assert_eq!(snapshot.total_frames, 1);
        assert_eq!(telemetry.window().count(), 2);

        telemetry.set_threshold(-1.0);
        assert_eq!(telemetry.threshold_ms(), 20.0);
    }

    #[test]
    fn test_invalid_threshold_uses_default() {
        assert_eq!(Telemetry::with_threshold(0.0).threshold_ms(), 20.0);
        assert_eq!(Telemetry::with_threshold(f64::NAN).threshold_ms(), 20.0);
        assert_eq!(Telemetry::with_threshold(33.0).threshold_ms(), 33.0);
    }
}
