//! Overlay animation state.
//!
//! [`OverlayRenderer`] keeps the arrow's continuous state (scale, angle,
//! pulse phase) between ticks. Hiding the overlay only flips visibility; the
//! animation state keeps evolving so that the arrow reappears where it left
//! off instead of snapping back to its initial size.

use crate::arrow::{self, ArrowPose, BASE_ARROW_SIZE, Frame};
use crate::geometry::Point;
use crate::settings::{AnimationStyle, Settings};
use std::f64::consts::TAU;

/// Fraction of the remaining distance to the target scale covered per tick.
pub const EASING_FACTOR: f64 = 0.15;

/// Peak relative amplitude of the pulse modulation.
pub const PULSE_AMPLITUDE: f64 = 0.1;

/// Externally visible overlay state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Hidden,
    Visible,
}

/// Continuous animation state of the arrow.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisualState {
    pub current_scale: f64,
    pub target_scale: f64,
    pub angle_deg: f64,
    /// Radians; grows without bound and is only ever read through `sin`.
    pub pulse_phase: f64,
    pub anchor: Point,
}

impl Default for VisualState {
    fn default() -> Self {
        Self {
            current_scale: 1.0,
            target_scale: 1.0,
            angle_deg: 0.0,
            pulse_phase: 0.0,
            anchor: Point::default(),
        }
    }
}

/// Animated arrow overlay.
#[derive(Debug, Clone)]
pub struct OverlayRenderer {
    state: VisualState,
    visibility: Visibility,
}

impl Default for OverlayRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl OverlayRenderer {
    /// Create a hidden overlay at scale 1.0.
    pub fn new() -> Self {
        Self {
            state: VisualState::default(),
            visibility: Visibility::Hidden,
        }
    }

    /// Point the arrow at `anchor` in `direction_deg` and make it visible.
    ///
    /// The angle is applied immediately; only the scale is eased. Returns
    /// `true` if the overlay was hidden before the call.
    pub fn show(
        &mut self,
        anchor: Point,
        direction_deg: f64,
        speed: f64,
        settings: &Settings,
    ) -> bool {
        self.state.anchor = anchor;
        self.state.angle_deg = direction_deg;
        self.state.target_scale = settings.arrow_scale * settings.speed_boost(speed);

        let appeared = self.visibility == Visibility::Hidden;
        self.visibility = Visibility::Visible;
        appeared
    }

    /// Hide the overlay. Returns `true` if it was visible.
    pub fn hide(&mut self) -> bool {
        let was_visible = self.visibility == Visibility::Visible;
        self.visibility = Visibility::Hidden;
        was_visible
    }

    /// Advance the animation by one tick. Runs whether or not the overlay is
    /// visible.
    pub fn animate(&mut self, settings: &Settings) {
        let state = &mut self.state;
        if settings.animations_enabled {
            state.current_scale += (state.target_scale - state.current_scale) * EASING_FACTOR;
            if settings.pulse_frequency_hz > 0 {
                let fps = f64::from(settings.effective_fps());
                state.pulse_phase += f64::from(settings.pulse_frequency_hz) * TAU / fps;
            }
        } else {
            state.current_scale = state.target_scale;
        }
    }

    /// Current pulse modulation in `[-PULSE_AMPLITUDE, PULSE_AMPLITUDE]`.
    pub fn pulse(&self, settings: &Settings) -> f64 {
        if settings.pulse_frequency_hz > 0 {
            PULSE_AMPLITUDE * self.state.pulse_phase.sin()
        } else {
            0.0
        }
    }

    /// Build the frame for the current state, or `None` while hidden.
    pub fn render(&self, settings: &Settings) -> Option<Frame> {
        if self.visibility == Visibility::Hidden {
            return None;
        }

        let pulse = self.pulse(settings);
        let base_size = BASE_ARROW_SIZE * self.state.current_scale;

        let mut pose = ArrowPose {
            anchor: self.state.anchor,
            angle_deg: self.state.angle_deg,
            size: base_size,
            offset: 0.0,
            alpha_gain: 1.0,
        };
        match settings.animation_style {
            AnimationStyle::None => {}
            AnimationStyle::Pulse => pose.size = base_size * (1.0 + pulse),
            AnimationStyle::Glow => pose.alpha_gain = 1.0 + pulse,
            AnimationStyle::Bounce => pose.offset = base_size * pulse,
        }

        Some(arrow::compose(&pose, settings.arrow_color))
    }

    /// Whether the overlay is visible.
    pub fn is_visible(&self) -> bool {
        self.visibility == Visibility::Visible
    }

    /// Current visibility.
    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    /// Snapshot of the animation state.
    pub fn state(&self) -> VisualState {
        self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn renderer_at(current: f64, target: f64) -> OverlayRenderer {
        let mut r = OverlayRenderer::new();
        r.state.current_scale = current;
        r.state.target_scale = target;
        r
    }

    #[test]
    fn test_starts_hidden_and_renders_nothing() {
        let r = OverlayRenderer::new();
        assert_eq!(r.visibility(), Visibility::Hidden);
        assert!(r.render(&Settings::default()).is_none());
    }

    #[test]
    fn test_show_sets_angle_and_boosted_target() {
        let settings = Settings::default()
            .with_arrow_scale(1.0)
            .with_speed_boost(40, 1400.0);
        let mut r = OverlayRenderer::new();

        assert!(r.show(Point::new(0, 540), 180.0, 1600.0, &settings));
        assert!(r.is_visible());
        assert_eq!(r.state().angle_deg, 180.0);
        assert!((r.state().target_scale - 1.4).abs() < 1e-12);

        // Already visible: no new appearance, slow pointer drops the boost.
        assert!(!r.show(Point::new(0, 541), 180.0, 10.0, &settings));
        assert_eq!(r.state().target_scale, 1.0);
    }

    #[test]
    fn test_easing_steps() {
        let settings = Settings::default();
        let mut r = renderer_at(1.0, 2.0);

        r.animate(&settings);
        assert!((r.state().current_scale - 1.15).abs() < 1e-12);
        r.animate(&settings);
        assert!((r.state().current_scale - 1.2775).abs() < 1e-12);
    }

    #[test]
    fn test_easing_converges_monotonically() {
        let settings = Settings::default();
        for (start, target) in [(1.0, 1.4), (1.4, 1.0), (0.5, 3.0), (3.0, 0.5)] {
            let mut r = renderer_at(start, target);
            let mut previous = start;
            let mut ticks = 0;
            while (r.state().current_scale - target).abs() >= 1e-3 {
                r.animate(&settings);
                let current = r.state().current_scale;
                assert!((current - previous) * (target - start) > 0.0);
                previous = current;
                ticks += 1;
                assert!(ticks <= 60, "did not converge from {start} to {target}");
            }
        }
    }

    #[test]
    fn test_disabled_animation_snaps_in_one_tick() {
        let settings = Settings::default().with_animations(false).with_pulse(3);
        let mut r = renderer_at(1.0, 2.0);
        r.state.pulse_phase = 0.5;

        r.animate(&settings);
        assert_eq!(r.state().current_scale, 2.0);
        assert_eq!(r.state().pulse_phase, 0.5);
    }

    #[test]
    fn test_pulse_phase_increment() {
        let settings = Settings::default().with_pulse(2).with_fps(60);
        let mut r = OverlayRenderer::new();
        r.animate(&settings);
        assert!((r.state().pulse_phase - 2.0 * TAU / 60.0).abs() < 1e-12);
        assert!((r.state().pulse_phase - 0.2094).abs() < 1e-4);
    }

    #[test]
    fn test_pulse_phase_uses_effective_fps() {
        let settings = Settings::default().with_pulse(1).with_fps(10);
        let mut r = OverlayRenderer::new();
        r.animate(&settings);
        assert!((r.state().pulse_phase - TAU / 30.0).abs() < 1e-12);
    }

    #[test]
    fn test_no_pulse_leaves_phase() {
        let mut r = OverlayRenderer::new();
        r.animate(&Settings::default());
        assert_eq!(r.state().pulse_phase, 0.0);
    }

    #[test]
    fn test_hide_keeps_animation_state() {
        let settings = Settings::default().with_pulse(2);
        let mut r = OverlayRenderer::new();
        r.show(Point::new(1919, 540), 0.0, 5000.0, &settings);
        for _ in 0..5 {
            r.animate(&settings);
        }
        let before = r.state();

        assert!(r.hide());
        assert!(!r.hide());
        assert!(r.render(&settings).is_none());
        assert_eq!(r.state(), before);

        r.show(before.anchor, before.angle_deg, 5000.0, &settings);
        assert_eq!(r.state(), before);
    }

    #[test]
    fn test_render_size_follows_scale_and_pulse() {
        let settings = Settings::default().with_pulse(1);
        let mut r = renderer_at(1.5, 1.5);
        let scaled = settings.clone().with_arrow_scale(1.5);
        r.show(Point::new(10, 10), 0.0, 0.0, &scaled);
        r.state.pulse_phase = std::f64::consts::FRAC_PI_2;

        let frame = r.render(&settings).unwrap();
        assert!((frame.size - 40.0 * 1.5 * 1.1).abs() < 1e-9);
    }

    #[test]
    fn test_render_without_pulse_frequency_is_unmodulated() {
        let settings = Settings::default();
        let mut r = OverlayRenderer::new();
        r.show(Point::new(10, 10), 0.0, 0.0, &settings);
        r.state.pulse_phase = 1.0;
        assert_eq!(r.render(&settings).unwrap().size, 40.0);
    }

    #[test]
    fn test_styles_route_the_pulse() {
        let base = Settings::default().with_pulse(1);
        let mut r = OverlayRenderer::new();
        r.show(Point::new(500, 500), 0.0, 0.0, &base);
        r.state.pulse_phase = std::f64::consts::FRAC_PI_2;

        let none = r
            .render(&base.clone().with_style(AnimationStyle::None))
            .unwrap();
        assert_eq!(none.size, 40.0);

        let glow = r
            .render(&base.clone().with_style(AnimationStyle::Glow))
            .unwrap();
        assert_eq!(glow.size, 40.0);
        match glow.body().unwrap().fill {
            arrow::Fill::VerticalGradient { bottom, .. } => assert_eq!(bottom.a, 198),
            other => panic!("unexpected fill {other:?}"),
        }

        let bounce = r
            .render(&base.clone().with_style(AnimationStyle::Bounce))
            .unwrap();
        assert_eq!(bounce.size, 40.0);
        let tip = bounce.body().unwrap().path[1];
        assert!((tip.x - (500.0 + 20.0 + 4.0)).abs() < 1e-9);
    }
}
