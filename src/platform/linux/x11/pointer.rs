//! X11 pointer position via `XQueryPointer`.

use super::with_display;
use crate::error::{Error, Result};
use crate::geometry::Point;
use std::os::raw::c_int;
use x11::xlib;

const FALSE: c_int = 0;

/// Get the current pointer position relative to the root window.
pub fn pointer_position() -> Result<Point> {
    with_display(|display| {
        let screen = unsafe { xlib::XDefaultScreen(display) };
        let root = unsafe { xlib::XRootWindow(display, screen) };

        let mut root_return = 0u64;
        let mut child_return = 0u64;
        let mut root_x: c_int = 0;
        let mut root_y: c_int = 0;
        let mut win_x: c_int = 0;
        let mut win_y: c_int = 0;
        let mut mask: u32 = 0;

        let result = unsafe {
            xlib::XQueryPointer(
                display,
                root,
                &mut root_return,
                &mut child_return,
                &mut root_x,
                &mut root_y,
                &mut win_x,
                &mut win_y,
                &mut mask,
            )
        };

        if result == FALSE {
            Err(Error::Platform("XQueryPointer failed".into()))
        } else {
            Ok(Point::new(root_x, root_y))
        }
    })
}
