//! macOS implementation using CoreGraphics.

mod display;
mod pointer;

pub use display::primary_display;
pub use pointer::pointer_position;
