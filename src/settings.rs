//! Overlay settings and the shared snapshot cell they are published through.
//!
//! The settings dialog owns a mutable [`Settings`] value. When the user
//! presses "apply", the whole value is handed to [`SharedSettings::store`],
//! which swaps in a new `Arc` snapshot. The engine loads exactly one snapshot
//! at the start of every tick, so it never observes a half-applied change.

use crate::error::{Error, Result};
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

#[cfg(feature = "recorder")]
use serde::{Deserialize, Serialize};

/// Lowest tick rate the engine runs at, whatever the configured fps.
pub const MIN_FPS: u32 = 30;

/// An RGBA color with 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "recorder", derive(Serialize, Deserialize))]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    /// Create a color from its four channels.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Same color with a different alpha.
    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }
}

/// How the pulse phase modulates the drawn arrow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "recorder", derive(Serialize, Deserialize))]
pub enum AnimationStyle {
    /// No periodic modulation.
    None,
    /// Scale breathes with the pulse.
    #[default]
    Pulse,
    /// Fill opacity breathes with the pulse.
    Glow,
    /// The arrow moves back and forth along its direction.
    Bounce,
}

/// Configuration snapshot for the navigator.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "recorder", derive(Serialize, Deserialize))]
pub struct Settings {
    /// Base arrow scale (1.0 = 40 px arrow).
    pub arrow_scale: f64,
    /// Distance from a primary-display edge within which the arrow appears.
    pub edge_zone_px: u32,
    /// Extra scale, in percent, applied while the pointer moves fast.
    pub speed_boost_percent: u32,
    /// Pointer speed (px/s) at or above which the boost applies.
    pub speed_threshold: f64,
    /// Requested tick rate. Values below [`MIN_FPS`] are raised to it.
    pub animation_fps: u32,
    /// Pulse frequency in Hz; 0 disables pulsing.
    pub pulse_frequency_hz: u32,
    /// Overlay opacity in percent.
    pub opacity_percent: u8,
    /// When false the scale snaps to its target and the pulse stops.
    pub animations_enabled: bool,
    /// Arrow fill color.
    pub arrow_color: Rgba,
    /// Periodic modulation style.
    pub animation_style: AnimationStyle,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            arrow_scale: 1.0,
            edge_zone_px: 10,
            speed_boost_percent: 40,
            speed_threshold: 1400.0,
            animation_fps: 60,
            pulse_frequency_hz: 0,
            opacity_percent: 85,
            animations_enabled: true,
            arrow_color: Rgba::rgb(90, 160, 255),
            animation_style: AnimationStyle::Pulse,
        }
    }
}

impl Settings {
    /// Set the base arrow scale.
    pub fn with_arrow_scale(mut self, scale: f64) -> Self {
        self.arrow_scale = scale;
        self
    }

    /// Set the edge zone in pixels.
    pub fn with_edge_zone(mut self, px: u32) -> Self {
        self.edge_zone_px = px;
        self
    }

    /// Set the speed boost percentage and the threshold that triggers it.
    pub fn with_speed_boost(mut self, percent: u32, threshold: f64) -> Self {
        self.speed_boost_percent = percent;
        self.speed_threshold = threshold;
        self
    }

    /// Set the requested tick rate.
    pub fn with_fps(mut self, fps: u32) -> Self {
        self.animation_fps = fps;
        self
    }

    /// Set the pulse frequency in Hz.
    pub fn with_pulse(mut self, hz: u32) -> Self {
        self.pulse_frequency_hz = hz;
        self
    }

    /// Set the overlay opacity in percent.
    pub fn with_opacity(mut self, percent: u8) -> Self {
        self.opacity_percent = percent;
        self
    }

    /// Enable or disable animations.
    pub fn with_animations(mut self, enabled: bool) -> Self {
        self.animations_enabled = enabled;
        self
    }

    /// Set the arrow color.
    pub fn with_color(mut self, color: Rgba) -> Self {
        self.arrow_color = color;
        self
    }

    /// Set the animation style.
    pub fn with_style(mut self, style: AnimationStyle) -> Self {
        self.animation_style = style;
        self
    }

    /// Tick rate actually used, never below [`MIN_FPS`].
    pub fn effective_fps(&self) -> u32 {
        self.animation_fps.max(MIN_FPS)
    }

    /// Time between ticks, in whole milliseconds.
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(u64::from(1000 / self.effective_fps()))
    }

    /// Opacity as a multiplier in `0.0..=1.0`.
    pub fn opacity(&self) -> f64 {
        f64::from(self.opacity_percent.min(100)) / 100.0
    }

    /// Scale multiplier for the given pointer speed.
    pub fn speed_boost(&self, speed: f64) -> f64 {
        if speed >= self.speed_threshold {
            1.0 + f64::from(self.speed_boost_percent) / 100.0
        } else {
            1.0
        }
    }

    /// Check values against the ranges the settings dialog offers.
    ///
    /// The engine itself accepts any non-negative finite values; this is for
    /// front ends that want to reject input before calling apply.
    pub fn validate(&self) -> Result<()> {
        check_range("arrow_scale", self.arrow_scale, 0.5, 3.0)?;
        check_range("edge_zone_px", f64::from(self.edge_zone_px), 1.0, 50.0)?;
        check_range(
            "speed_boost_percent",
            f64::from(self.speed_boost_percent),
            0.0,
            200.0,
        )?;
        check_range("speed_threshold", self.speed_threshold, 100.0, 5000.0)?;
        check_range("animation_fps", f64::from(self.animation_fps), 15.0, 120.0)?;
        check_range(
            "pulse_frequency_hz",
            f64::from(self.pulse_frequency_hz),
            0.0,
            10.0,
        )?;
        check_range(
            "opacity_percent",
            f64::from(self.opacity_percent),
            20.0,
            100.0,
        )?;
        Ok(())
    }
}

fn check_range(name: &'static str, value: f64, min: f64, max: f64) -> Result<()> {
    if !value.is_finite() || value < min || value > max {
        return Err(Error::InvalidSetting {
            name,
            reason: format!("{value} is outside {min}..={max}"),
        });
    }
    Ok(())
}

/// Shared, atomically swapped settings snapshot.
///
/// Clones share the same cell, so the settings dialog can keep one handle
/// while the engine holds another.
#[derive(Debug, Clone, Default)]
pub struct SharedSettings {
    inner: Arc<RwLock<Arc<Settings>>>,
}

impl SharedSettings {
    /// Create a cell holding the given settings.
    pub fn new(settings: Settings) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Arc::new(settings))),
        }
    }

    /// The current snapshot.
    pub fn load(&self) -> Arc<Settings> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Replace the snapshot as a whole.
    pub fn store(&self, settings: Settings) {
        let snapshot = Arc::new(settings);
        *self.inner.write().unwrap_or_else(PoisonError::into_inner) = snapshot;
    }
}
