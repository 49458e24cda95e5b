//! macOS pointer position from a synthetic `CGEvent`.

#![allow(unused_unsafe)]

use crate::error::{Error, Result};
use crate::geometry::Point;
use objc2_core_graphics::{CGEvent, CGEventSource, CGEventSourceStateID};

/// Get the current pointer position in global display coordinates.
pub fn pointer_position() -> Result<Point> {
    let location = unsafe {
        let source = CGEventSource::new(CGEventSourceStateID::HIDSystemState)
            .ok_or_else(|| Error::Platform("Failed to create event source".into()))?;
        let event = CGEvent::new(Some(&source))
            .ok_or_else(|| Error::Platform("Failed to create event".into()))?;
        CGEvent::location(Some(&event))
    };
    Ok(Point::new(
        location.x.floor() as i32,
        location.y.floor() as i32,
    ))
}
