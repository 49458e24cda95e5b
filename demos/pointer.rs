//! Prints the pointer position and where it is relative to the primary display.
//!
//! Run with: cargo run --example pointer

use mousenav::{EdgeDetector, Settings, pointer_position, primary_display};

fn main() -> mousenav::Result<()> {
    let primary = primary_display()?;
    println!("Primary display: {primary:?}");

    let position = pointer_position()?;
    println!("Current pointer position: ({}, {})", position.x, position.y);

    let settings = Settings::default();
    let state = EdgeDetector::new(primary.bounds).detect(position, settings.edge_zone_px, 0.0);
    println!("Region: {:?}", state.region);
    if state.active {
        println!(
            "Arrow would point {:.1} deg from ({}, {})",
            state.direction_deg, state.anchor.x, state.anchor.y
        );
    }

    Ok(())
}
