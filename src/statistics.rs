//! Tick statistics for the navigator.
//!
//! Useful for tuning the edge zone and speed threshold:
//! - how often the pointer actually leaves the primary display
//! - how fast flicks toward other monitors are
//! - whether the configured tick rate is being met
//!
//! # Example
//!
//! ```no_run
//! # #[cfg(feature = "statistics")]
//! # {
//! use mousenav::{Navigator, SharedSettings, SystemClock, SystemDesktop};
//!
//! let navigator =
//!     Navigator::from_desktop(&SystemDesktop, &SystemClock, SharedSettings::default()).unwrap();
//! // ... run some ticks ...
//! println!("{}", navigator.statistics().summary());
//! # }
//! ```

use crate::edge::{EdgeState, Region};
use crate::sampler::CursorSample;
use std::time::{Duration, Instant};

/// Counters gathered across ticks.
#[derive(Debug, Clone, Default)]
pub struct NavigatorStatistics {
    // Tick counts
    /// Ticks processed.
    pub tick_count: u64,
    /// Ticks that produced a frame.
    pub frames_rendered: u64,
    /// Hidden-to-visible transitions.
    pub appearances: u64,
    /// Ticks with the pointer outside the primary display.
    pub offscreen_ticks: u64,
    /// Ticks with the pointer inside an edge zone.
    pub near_edge_ticks: u64,

    // Pointer statistics
    /// Highest measured pointer speed (px/s).
    pub peak_speed: f64,
    /// Total pointer travel (px).
    pub total_distance: f64,

    // Timing
    /// Timestamp of the first tick.
    pub first_tick: Option<Instant>,
    /// Timestamp of the latest tick.
    pub last_tick: Option<Instant>,

    was_active: bool,
}

impl NavigatorStatistics {
    /// Create empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one tick into the counters.
    pub fn record_tick(&mut self, sample: &CursorSample, edge: &EdgeState, rendered: bool) {
        self.tick_count += 1;
        if rendered {
            self.frames_rendered += 1;
        }

        match edge.region {
            Region::Offscreen => self.offscreen_ticks += 1,
            Region::NearEdge(_) => self.near_edge_ticks += 1,
            Region::Interior => {}
        }
        if edge.active && !self.was_active {
            self.appearances += 1;
        }
        self.was_active = edge.active;

        self.peak_speed = self.peak_speed.max(sample.speed);
        self.total_distance += sample.distance;

        if self.first_tick.is_none() {
            self.first_tick = Some(sample.timestamp);
        }
        self.last_tick = Some(sample.timestamp);
    }

    /// Time between the first and latest tick.
    pub fn duration(&self) -> Duration {
        match (self.first_tick, self.last_tick) {
            (Some(first), Some(last)) => last.saturating_duration_since(first),
            _ => Duration::ZERO,
        }
    }

    /// Measured tick rate.
    pub fn ticks_per_second(&self) -> f64 {
        let secs = self.duration().as_secs_f64();
        if secs <= 0.0 || self.tick_count < 2 {
            return 0.0;
        }
        (self.tick_count - 1) as f64 / secs
    }

    /// Fraction of ticks during which the overlay was requested.
    pub fn active_ratio(&self) -> f64 {
        if self.tick_count == 0 {
            return 0.0;
        }
        (self.offscreen_ticks + self.near_edge_ticks) as f64 / self.tick_count as f64
    }

    /// Generate a human-readable summary.
    pub fn summary(&self) -> String {
        let duration = self.duration();
        format!(
            "=== Navigator Statistics ===\n\
             Duration: {:02}:{:02}\n\
             Ticks: {} ({:.1}/s)\n\
             Frames: {}\n\
             Appearances: {}\n\
             Off-screen ticks: {}\n\
             Near-edge ticks: {}\n\
             Peak speed: {:.0} px/s\n\
             Distance: {:.0} pixels\n",
            duration.as_secs() / 60,
            duration.as_secs() % 60,
            self.tick_count,
            self.ticks_per_second(),
            self.frames_rendered,
            self.appearances,
            self.offscreen_ticks,
            self.near_edge_ticks,
            self.peak_speed,
            self.total_distance
        )
    }
}
