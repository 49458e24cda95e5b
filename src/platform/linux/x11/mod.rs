//! X11 implementation using Xlib queries.
//!
//! Xlib connections are not shared between threads, so each thread that
//! queries the desktop opens one connection on first use and keeps it until
//! the thread exits. A runner thread therefore connects once, not per tick.

mod display;
mod pointer;

pub use display::primary_display;
pub use pointer::pointer_position;

use crate::error::{Error, Result};
use std::cell::RefCell;
use std::ptr::null;
use x11::xlib;

/// An open display connection, closed on drop.
struct Connection {
    display: *mut xlib::Display,
}

impl Connection {
    fn open() -> Result<Self> {
        let display = unsafe { xlib::XOpenDisplay(null()) };
        if display.is_null() {
            return Err(Error::Platform("XOpenDisplay failed".into()));
        }
        log::debug!("opened X11 display connection");
        Ok(Self { display })
    }
}

impl Drop for Connection {
    fn drop(&mut self) {
        unsafe {
            xlib::XCloseDisplay(self.display);
        }
    }
}

thread_local! {
    static CONNECTION: RefCell<Option<Connection>> = const { RefCell::new(None) };
}

/// Run `f` with this thread's display connection, opening it if needed.
///
/// A failed open is not cached; the next call tries again.
fn with_display<T>(f: impl FnOnce(*mut xlib::Display) -> Result<T>) -> Result<T> {
    CONNECTION.with(|slot| {
        let mut slot = slot.borrow_mut();
        let display = match slot.as_ref() {
            Some(connection) => connection.display,
            None => {
                let connection = Connection::open()?;
                let display = connection.display;
                *slot = Some(connection);
                display
            }
        };
        f(display)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn connected_display() -> Option<*mut xlib::Display> {
        CONNECTION.with(|slot| slot.borrow().as_ref().map(|c| c.display))
    }

    #[test]
    fn test_connection_is_reused() {
        if std::env::var_os("DISPLAY").is_none() {
            return;
        }

        pointer_position().unwrap();
        let first = connected_display();
        assert!(first.is_some());

        pointer_position().unwrap();
        primary_display().unwrap();
        assert_eq!(connected_display(), first);
    }

    #[test]
    fn test_connection_is_per_thread() {
        if std::env::var_os("DISPLAY").is_none() {
            return;
        }

        pointer_position().unwrap();
        let here = connected_display();
        let there = std::thread::spawn(|| {
            pointer_position().unwrap();
            connected_display().map(|d| d as usize)
        })
        .join()
        .unwrap();

        assert!(there.is_some());
        assert_ne!(here.map(|d| d as usize), there);
    }
}
