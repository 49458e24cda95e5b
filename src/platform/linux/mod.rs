//! Linux platform implementation.
//!
//! Pointer and display queries go through X11 (`x11` feature, default).
//! Under Wayland this works for XWayland sessions only.

#[cfg(feature = "x11")]
mod x11;

#[cfg(feature = "x11")]
pub use x11::*;

// Without a backend every query reports that it is unsupported.
#[cfg(not(feature = "x11"))]
mod stub {
    use crate::display::DisplayInfo;
    use crate::error::{Error, Result};
    use crate::geometry::Point;

    pub fn primary_display() -> Result<DisplayInfo> {
        Err(Error::NotSupported(
            "No Linux backend enabled. Enable the 'x11' feature.".into(),
        ))
    }

    pub fn pointer_position() -> Result<Point> {
        Err(Error::NotSupported(
            "No Linux backend enabled. Enable the 'x11' feature.".into(),
        ))
    }
}

#[cfg(not(feature = "x11"))]
pub use stub::*;
