//! Window-compositing capability the overlay draws through.
//!
//! A windowing backend provides an always-on-top, click-through surface that
//! never shows up in the taskbar or task switcher. The engine only ever sets
//! its bounds, visibility and opacity, and submits frames.

use crate::arrow::Frame;
use crate::display::Rect;
use crate::error::Result;

/// Window traits an overlay surface must be created with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceOptions {
    /// Stays above normal windows.
    pub always_on_top: bool,
    /// Excluded from mouse and keyboard hit-testing.
    pub click_through: bool,
    /// Listed in the taskbar / task switcher.
    pub show_in_taskbar: bool,
    /// Composited with per-pixel alpha.
    pub layered: bool,
}

impl SurfaceOptions {
    /// Options every edge-arrow overlay uses.
    pub const OVERLAY: Self = Self {
        always_on_top: true,
        click_through: true,
        show_in_taskbar: false,
        layered: true,
    };
}

impl Default for SurfaceOptions {
    fn default() -> Self {
        Self::OVERLAY
    }
}

/// A platform overlay window.
pub trait OverlaySurface {
    /// Move/resize the surface.
    fn set_bounds(&mut self, bounds: Rect) -> Result<()>;

    /// Show or hide the surface.
    fn set_visible(&mut self, visible: bool) -> Result<()>;

    /// Uniform opacity multiplier in `0.0..=1.0`.
    fn set_opacity(&mut self, opacity: f64) -> Result<()>;

    /// Replace the surface contents with `frame`.
    fn submit(&mut self, frame: &Frame) -> Result<()>;
}

/// Backends that can create their own surface.
pub trait SurfaceFactory {
    type Surface: OverlaySurface;

    /// Create a hidden surface covering `bounds`.
    fn create(&self, bounds: Rect, options: SurfaceOptions) -> Result<Self::Surface>;
}

impl<S: OverlaySurface + ?Sized> OverlaySurface for Box<S> {
    fn set_bounds(&mut self, bounds: Rect) -> Result<()> {
        (**self).set_bounds(bounds)
    }

    fn set_visible(&mut self, visible: bool) -> Result<()> {
        (**self).set_visible(visible)
    }

    fn set_opacity(&mut self, opacity: f64) -> Result<()> {
        (**self).set_opacity(opacity)
    }

    fn submit(&mut self, frame: &Frame) -> Result<()> {
        (**self).submit(frame)
    }
}
