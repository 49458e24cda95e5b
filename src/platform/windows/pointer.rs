//! Windows pointer position via `GetCursorPos`.

use crate::error::{Error, Result};
use crate::geometry::Point;
use windows::Win32::Foundation::POINT;
use windows::Win32::UI::WindowsAndMessaging::GetCursorPos;

/// Get the current cursor position in virtual-screen coordinates.
pub fn pointer_position() -> Result<Point> {
    let mut point = POINT::default();
    unsafe { GetCursorPos(&mut point) }
        .map_err(|e| Error::Platform(format!("GetCursorPos failed: {e}")))?;
    Ok(Point::new(point.x, point.y))
}
