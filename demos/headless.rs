//! Runs the navigator against the real pointer and prints overlay changes.
//!
//! Run with: cargo run --example headless
//!
//! Move the pointer to another monitor or toward a screen edge. Press Ctrl+C
//! to exit.

use mousenav::{
    Frame, Navigator, OverlaySurface, Rect, Runner, SharedSettings, SystemClock, SystemDesktop,
};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

/// Surface that prints instead of drawing.
struct PrintSurface {
    frames: u64,
}

impl OverlaySurface for PrintSurface {
    fn set_bounds(&mut self, bounds: Rect) -> mousenav::Result<()> {
        println!("bounds: {bounds:?}");
        Ok(())
    }

    fn set_visible(&mut self, visible: bool) -> mousenav::Result<()> {
        let state = if visible { "shown" } else { "hidden" };
        println!("overlay {state}");
        Ok(())
    }

    fn set_opacity(&mut self, opacity: f64) -> mousenav::Result<()> {
        println!("opacity: {opacity:.2}");
        Ok(())
    }

    fn submit(&mut self, frame: &Frame) -> mousenav::Result<()> {
        self.frames += 1;
        // Roughly twice a second at 60 fps.
        if self.frames % 30 == 1 {
            println!(
                "arrow at ({}, {}) angle {:.1} size {:.1}",
                frame.anchor.x, frame.anchor.y, frame.angle_deg, frame.size
            );
        }
        Ok(())
    }
}

fn main() -> mousenav::Result<()> {
    println!("mousenav headless example");
    println!("Press Ctrl+C to exit\n");

    let quit = Arc::new(AtomicBool::new(false));
    let quit_flag = quit.clone();
    ctrlc::set_handler(move || quit_flag.store(true, Ordering::SeqCst))
        .map_err(|e| mousenav::Error::Other(e.to_string()))?;

    let navigator =
        Navigator::from_desktop(&SystemDesktop, &SystemClock, SharedSettings::default())?;
    let mut surface = PrintSurface { frames: 0 };
    surface.set_bounds(navigator.bounds())?;

    let runner = Runner::new();
    runner.run_async(navigator, SystemDesktop, surface)?;

    while !quit.load(Ordering::SeqCst) {
        std::thread::sleep(Duration::from_millis(50));
    }

    runner.stop()
}
