//! Drives the navigator from a tokio timer and cycles animation styles.
//!
//! Run with: cargo run --example async_headless --features tokio
//!
//! Press Ctrl+C to exit.

use mousenav::{
    AnimationStyle, Frame, Navigator, OverlaySurface, Rect, Runner, Settings, SharedSettings,
    SystemClock, SystemDesktop,
};
use std::sync::Arc;
use std::time::Duration;

struct PrintSurface;

impl OverlaySurface for PrintSurface {
    fn set_bounds(&mut self, _bounds: Rect) -> mousenav::Result<()> {
        Ok(())
    }

    fn set_visible(&mut self, visible: bool) -> mousenav::Result<()> {
        println!("visible: {visible}");
        Ok(())
    }

    fn set_opacity(&mut self, opacity: f64) -> mousenav::Result<()> {
        println!("opacity: {opacity:.2}");
        Ok(())
    }

    fn submit(&mut self, frame: &Frame) -> mousenav::Result<()> {
        if let Some(body) = frame.body() {
            println!("tip at ({:.0}, {:.0})", body.path[1].x, body.path[1].y);
        }
        Ok(())
    }
}

#[tokio::main]
async fn main() -> mousenav::Result<()> {
    let settings = SharedSettings::new(Settings::default().with_pulse(2));
    let mut navigator = Navigator::from_desktop(&SystemDesktop, &SystemClock, settings.clone())?;

    let runner = Arc::new(Runner::new());

    let stopper = runner.clone();
    ctrlc::set_handler(move || {
        let _ = stopper.stop();
    })
    .map_err(|e| mousenav::Error::Other(e.to_string()))?;

    // Simulated settings dialog: switch style every few seconds.
    tokio::spawn(async move {
        let styles = [
            AnimationStyle::Pulse,
            AnimationStyle::Glow,
            AnimationStyle::Bounce,
            AnimationStyle::None,
        ];
        for style in styles.iter().cycle() {
            tokio::time::sleep(Duration::from_secs(5)).await;
            println!("applying style {style:?}");
            settings.store(Settings::default().with_pulse(2).with_style(*style));
        }
    });

    runner
        .run_tokio(&mut navigator, &SystemDesktop, &mut PrintSurface)
        .await
}
