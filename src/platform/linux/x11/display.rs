//! X11 display queries.

use super::with_display;
use crate::display::{DisplayInfo, Rect};
use crate::error::{Error, Result};
use x11::xlib;

/// The default screen of the default display, which X11 treats as primary.
pub fn primary_display() -> Result<DisplayInfo> {
    with_display(|display| unsafe {
        let screen = xlib::XDefaultScreen(display);
        let width = xlib::XDisplayWidth(display, screen);
        let height = xlib::XDisplayHeight(display, screen);

        if width <= 0 || height <= 0 {
            return Err(Error::Platform(
                "X11 display information unavailable".into(),
            ));
        }

        Ok(DisplayInfo {
            id: 1,
            bounds: Rect::new(0, 0, width, height),
            scale_factor: 1.0,
            is_primary: true,
        })
    })
}
