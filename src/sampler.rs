//! Pointer sampling: elapsed time and speed between consecutive ticks.

use crate::geometry::Point;
use std::time::Instant;

/// Smallest elapsed time, in seconds, used for a speed computation.
///
/// Two samples taken within the clock's resolution (or with a clock that
/// stepped backwards) are treated as this far apart.
pub const MIN_ELAPSED_SECS: f64 = 0.001;

/// Source of the current time.
pub trait Clock {
    /// The current instant.
    fn now(&self) -> Instant;
}

/// [`Clock`] reading the monotonic system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// One pointer reading together with the speed measured since the last one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CursorSample {
    /// Pointer position.
    pub position: Point,
    /// When the position was read.
    pub timestamp: Instant,
    /// Seconds since the previous sample, after clamping.
    pub elapsed: f64,
    /// Distance travelled since the previous sample, in pixels.
    pub distance: f64,
    /// Pointer speed in pixels per second.
    pub speed: f64,
}

/// Tracks the previous pointer reading.
#[derive(Debug, Clone)]
pub struct Sampler {
    last_position: Point,
    last_time: Instant,
}

impl Sampler {
    /// Seed the sampler with the pointer position at startup.
    pub fn new(position: Point, now: Instant) -> Self {
        Self {
            last_position: position,
            last_time: now,
        }
    }

    /// Record a new reading and return it with its speed.
    pub fn sample(&mut self, position: Point, now: Instant) -> CursorSample {
        let elapsed = now
            .saturating_duration_since(self.last_time)
            .as_secs_f64()
            .max(MIN_ELAPSED_SECS);
        let distance = self.last_position.distance_to(position);
        let speed = distance / elapsed;

        self.last_position = position;
        self.last_time = now;

        CursorSample {
            position,
            timestamp: now,
            elapsed,
            distance,
            speed,
        }
    }

    /// Position recorded by the most recent sample.
    pub fn last_position(&self) -> Point {
        self.last_position
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_speed_over_elapsed_time() {
        let t0 = Instant::now();
        let mut sampler = Sampler::new(Point::new(0, 0), t0);

        let s = sampler.sample(Point::new(30, 40), t0 + Duration::from_millis(100));
        assert!((s.distance - 50.0).abs() < 1e-9);
        assert!((s.elapsed - 0.1).abs() < 1e-9);
        assert!((s.speed - 500.0).abs() < 1e-6);
        assert_eq!(sampler.last_position(), Point::new(30, 40));
    }

    #[test]
    fn test_zero_elapsed_is_clamped() {
        let t0 = Instant::now();
        let mut sampler = Sampler::new(Point::new(100, 100), t0);

        let s = sampler.sample(Point::new(103, 104), t0);
        assert_eq!(s.elapsed, MIN_ELAPSED_SECS);
        assert!((s.speed - 5000.0).abs() < 1e-6);
    }

    #[test]
    fn test_backwards_clock_is_clamped() {
        let t0 = Instant::now() + Duration::from_secs(1);
        let mut sampler = Sampler::new(Point::new(0, 0), t0);

        let s = sampler.sample(Point::new(1, 0), t0 - Duration::from_millis(500));
        assert_eq!(s.elapsed, MIN_ELAPSED_SECS);
        assert!(s.speed.is_finite());
    }

    #[test]
    fn test_stationary_pointer_has_zero_speed() {
        let t0 = Instant::now();
        let mut sampler = Sampler::new(Point::new(5, 5), t0);
        let s = sampler.sample(Point::new(5, 5), t0 + Duration::from_millis(16));
        assert_eq!(s.speed, 0.0);
    }

    #[test]
    fn test_each_sample_measures_from_previous() {
        let t0 = Instant::now();
        let mut sampler = Sampler::new(Point::new(0, 0), t0);
        sampler.sample(Point::new(100, 0), t0 + Duration::from_millis(50));
        let s = sampler.sample(Point::new(100, 10), t0 + Duration::from_millis(60));
        assert!((s.distance - 10.0).abs() < 1e-9);
        assert!((s.speed - 1000.0).abs() < 1e-6);
    }
}
