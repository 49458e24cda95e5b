//! Display and pointer queries.

use crate::error::{Error, Result};
use crate::geometry::{Point, PointF};

#[cfg(feature = "recorder")]
use serde::{Deserialize, Serialize};

/// An integer rectangle in screen coordinates.
///
/// The left and top edges are inclusive, the right and bottom edges are
/// exclusive, so the last addressable column is `right() - 1`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "recorder", derive(Serialize, Deserialize))]
pub struct Rect {
    /// Left coordinate.
    pub x: i32,
    /// Top coordinate.
    pub y: i32,
    /// Width in pixels.
    pub width: i32,
    /// Height in pixels.
    pub height: i32,
}

impl Rect {
    /// Create a rectangle from origin and size.
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Inclusive left edge.
    pub const fn left(&self) -> i32 {
        self.x
    }

    /// Inclusive top edge.
    pub const fn top(&self) -> i32 {
        self.y
    }

    /// Exclusive right edge.
    pub const fn right(&self) -> i32 {
        self.x + self.width
    }

    /// Exclusive bottom edge.
    pub const fn bottom(&self) -> i32 {
        self.y + self.height
    }

    /// Real-valued center of the rectangle.
    pub fn center(&self) -> PointF {
        PointF::new(
            f64::from(self.x) + f64::from(self.width) / 2.0,
            f64::from(self.y) + f64::from(self.height) / 2.0,
        )
    }

    /// Check whether a point is inside this rectangle.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.left() && p.y >= self.top() && p.x < self.right() && p.y < self.bottom()
    }
}

/// Information about a display/monitor.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayInfo {
    /// Platform-specific identifier (best-effort).
    pub id: u32,
    /// Display bounds in screen coordinates.
    pub bounds: Rect,
    /// Scale factor relative to 1.0 (96 DPI on Windows, 1x on macOS).
    pub scale_factor: f64,
    /// Whether this is the primary display.
    pub is_primary: bool,
}

/// Read access to the pointer and the primary display.
///
/// [`SystemDesktop`] talks to the operating system; tests and headless
/// drivers can supply their own implementation.
pub trait Desktop {
    /// Current pointer position in screen coordinates.
    fn pointer_position(&self) -> Result<Point>;

    /// Bounds of the primary display.
    fn primary_bounds(&self) -> Result<Rect>;
}

/// [`Desktop`] backed by the platform layer of the current OS.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemDesktop;

impl Desktop for SystemDesktop {
    fn pointer_position(&self) -> Result<Point> {
        pointer_position()
    }

    fn primary_bounds(&self) -> Result<Rect> {
        let display = primary_display()?;
        if display.bounds.width <= 0 || display.bounds.height <= 0 {
            return Err(Error::NoPrimaryDisplay);
        }
        Ok(display.bounds)
    }
}

/// Get the primary display.
pub fn primary_display() -> Result<DisplayInfo> {
    crate::platform::primary_display()
}

/// Get the current pointer position.
pub fn pointer_position() -> Result<Point> {
    crate::platform::pointer_position()
}
