use std::time::Instant;

/// Seconds since some fixed origin. Must be monotonic.
pub trait TimeSource {
    fn now(&self) -> f32;
}

/// Wall-clock time since construction.
#[derive(Debug, Clone, Copy)]
pub struct MonotonicTime {
    start: Instant,
}

impl MonotonicTime {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for MonotonicTime {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for MonotonicTime {
    fn now(&self) -> f32 {
        self.start.elapsed().as_secs_f32()
    }
}

/// Last frame timestamp and the delta derived from it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameClock {
    last: f32,
    delta: f32,
}

impl FrameClock {
    pub fn new(start: f32) -> Self {
        Self {
            last: start,
            delta: 0.0,
        }
    }

    /// Advance to `now` and return the elapsed seconds. A timestamp earlier
    /// than the previous one yields zero rather than a negative step.
    pub fn tick(&mut self, now: f32) -> f32 {
        self.delta = (now - self.last).max(0.0);
        self.last = now;
        self.delta
    }

    pub fn last(&self) -> f32 {
        self.last
    }

    pub fn delta(&self) -> f32 {
        self.delta
    }
}

/// Rolling window of frame deltas for instrumentation.
#[derive(Debug, Clone)]
pub struct FrameStats {
    samples: Vec<f32>,
    next: usize,
    len: usize,
}

impl FrameStats {
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "FrameStats capacity must be positive");
        Self {
            samples: vec![0.0; capacity],
            next: 0,
            len: 0,
        }
    }

    pub fn record(&mut self, dt: f32) {
        self.samples[self.next] = dt;
        self.next = (self.next + 1) % self.samples.len();
        self.len = (self.len + 1).min(self.samples.len());
    }

    fn window(&self) -> &[f32] {
        &self.samples[..self.len]
    }

    pub fn count(&self) -> usize {
        self.len
    }

    pub fn is_full(&self) -> bool {
        self.len == self.samples.len()
    }

    pub fn average(&self) -> f32 {
        if self.len == 0 {
            return 0.0;
        }
        self.window().iter().sum::<f32>() / self.len as f32
    }

    pub fn min(&self) -> f32 {
        self.window().iter().copied().reduce(f32::min).unwrap_or(0.0)
    }

    pub fn max(&self) -> f32 {
        self.window().iter().copied().reduce(f32::max).unwrap_or(0.0)
    }

    /// Frames per second implied by the average delta.
    pub fn fps(&self) -> f32 {
        let avg = self.average();
        if avg > 0.0 { 1.0 / avg } else { 0.0 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_reports_delta_between_ticks() {
        let mut clock = FrameClock::new(1.0);
        assert_eq!(clock.tick(1.25), 0.25);
        assert_eq!(clock.tick(1.5), 0.25);
        assert_eq!(clock.last(), 1.5);
        assert_eq!(clock.delta(), 0.25);
    }

    #[test]
    fn clock_never_goes_backwards() {
        let mut clock = FrameClock::new(2.0);
        assert_eq!(clock.tick(1.0), 0.0);
        assert_eq!(clock.tick(1.5), 0.5);
    }

    #[test]
    fn monotonic_time_advances() {
        let time = MonotonicTime::new();
        let a = time.now();
        let b = time.now();
        assert!(b >= a);
    }

    #[test]
    fn stats_track_window() {
        let mut stats = FrameStats::new(3);
        assert_eq!(stats.average(), 0.0);
        stats.record(0.010);
        stats.record(0.020);
        stats.record(0.030);

        assert!(stats.is_full());
        assert!((stats.average() - 0.020).abs() < 1e-6);
        assert_eq!(stats.min(), 0.010);
        assert_eq!(stats.max(), 0.030);
        assert!((stats.fps() - 50.0).abs() < 1e-2);
    }

    #[test]
    fn stats_overwrite_oldest() {
        let mut stats = FrameStats::new(2);
        stats.record(0.010);
        stats.record(0.020);
        stats.record(0.030);

        assert_eq!(stats.count(), 2);
        assert!((stats.average() - 0.025).abs() < 1e-6);
        assert_eq!(stats.min(), 0.020);
    }
}
