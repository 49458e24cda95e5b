//! macOS display queries.

use crate::display::{DisplayInfo, Rect};
use crate::error::{Error, Result};
use objc2_core_graphics::{CGDisplayBounds, CGDisplayPixelsWide, CGMainDisplayID};

/// The main display, whose origin is the global coordinate origin.
pub fn primary_display() -> Result<DisplayInfo> {
    let display_id = CGMainDisplayID();
    let bounds = CGDisplayBounds(display_id);
    let width_points = bounds.size.width as f64;
    let height_points = bounds.size.height as f64;
    if width_points <= 0.0 || height_points <= 0.0 {
        return Err(Error::NoPrimaryDisplay);
    }

    let width_pixels = CGDisplayPixelsWide(display_id) as f64;

    Ok(DisplayInfo {
        id: 1,
        bounds: Rect::new(
            bounds.origin.x as i32,
            bounds.origin.y as i32,
            width_points as i32,
            height_points as i32,
        ),
        scale_factor: width_pixels / width_points,
        is_primary: true,
    })
}
