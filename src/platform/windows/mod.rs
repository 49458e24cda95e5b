//! Windows implementation using Win32 monitor and cursor queries.

mod display;
mod pointer;

pub use display::primary_display;
pub use pointer::pointer_position;
