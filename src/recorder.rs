//! Frame recording for headless runs, regression fixtures and debugging.
//!
//! [`FrameRecorder`] is an [`OverlaySurface`] that draws nothing and instead
//! keeps every call it receives, stamped with the time since recording
//! started. The resulting [`Recording`] can be saved as JSON.
//!
//! # Example
//!
//! ```no_run
//! use mousenav::recorder::{FrameRecorder, Recording};
//! use mousenav::{Navigator, Rect, SharedSettings, Point};
//! use std::time::Instant;
//!
//! let mut nav = Navigator::new(
//!     Rect::new(0, 0, 1920, 1080),
//!     SharedSettings::default(),
//!     Point::new(960, 540),
//!     Instant::now(),
//! );
//! let mut recorder = FrameRecorder::new();
//! nav.tick(Point::new(3000, 540), Instant::now(), &mut recorder).unwrap();
//!
//! let recording = recorder.finish();
//! recording.save("frames.json").unwrap();
//!
//! let recording = Recording::load("frames.json").unwrap();
//! println!("{} frames", recording.frame_count());
//! ```

use crate::arrow::Frame;
use crate::display::Rect;
use crate::error::{Error, Result};
use crate::surface::{OverlaySurface, SurfaceFactory, SurfaceOptions};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::path::Path;
use std::time::{Duration, Instant, SystemTime};

/// One surface call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SurfaceEvent {
    Bounds(Rect),
    Visible(bool),
    Opacity(f64),
    Frame(Frame),
}

/// A surface call with its time relative to recording start.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordedEvent {
    /// Time elapsed since recording start.
    pub elapsed: Duration,
    /// The call that was made.
    pub event: SurfaceEvent,
}

/// A complete recording of surface calls.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recording {
    /// Recorded calls in order.
    pub events: Vec<RecordedEvent>,
    /// When the recording was created.
    pub created_at: SystemTime,
    /// Optional description.
    pub description: Option<String>,
}

impl Recording {
    /// Start an empty recording stamped with the current time.
    pub fn new() -> Self {
        Self {
            events: Vec::new(),
            created_at: SystemTime::now(),
            description: None,
        }
    }

    /// Attach a note, e.g. the gesture that was recorded.
    pub fn with_description(self, description: impl Into<String>) -> Self {
        Self {
            description: Some(description.into()),
            ..self
        }
    }

    /// Offset of the last recorded call.
    pub fn duration(&self) -> Duration {
        self.events.last().map_or(Duration::ZERO, |e| e.elapsed)
    }

    /// Recorded frames in order.
    pub fn frames(&self) -> impl Iterator<Item = &Frame> {
        self.events.iter().filter_map(|e| match &e.event {
            SurfaceEvent::Frame(frame) => Some(frame),
            _ => None,
        })
    }

    /// Number of frames submitted.
    pub fn frame_count(&self) -> usize {
        self.frames().count()
    }

    /// Write the surface calls to `path` as pretty-printed JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| recording_error("encode", path, e))?;
        std::fs::write(path, json)
            .map_err(|e| recording_error("write", path, e))
    }

    /// Read surface calls written by [`Recording::save`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| recording_error("read", path, e))?;
        serde_json::from_str(&json)
            .map_err(|e| recording_error("decode", path, e))
    }
}

fn recording_error(action: &str, path: &Path, cause: impl Display) -> Error {
    Error::Other(format!(
        "cannot {action} surface recording {}: {cause}",
        path.display()
    ))
}

impl Default for Recording {
    fn default() -> Self {
        Self::new()
    }
}

/// Surface that records instead of drawing.
#[derive(Debug)]
pub struct FrameRecorder {
    recording: Recording,
    start_time: Instant,
}

impl FrameRecorder {
    /// Start recording now.
    pub fn new() -> Self {
        Self {
            recording: Recording::new(),
            start_time: Instant::now(),
        }
    }

    /// Recording so far.
    pub fn recording(&self) -> &Recording {
        &self.recording
    }

    /// Stop and return the recording.
    pub fn finish(self) -> Recording {
        self.recording
    }

    fn push(&mut self, event: SurfaceEvent) {
        self.recording.events.push(RecordedEvent {
            elapsed: self.start_time.elapsed(),
            event,
        });
    }
}

impl Default for FrameRecorder {
    fn default() -> Self {
        Self::new()
    }
}

impl OverlaySurface for FrameRecorder {
    fn set_bounds(&mut self, bounds: Rect) -> Result<()> {
        self.push(SurfaceEvent::Bounds(bounds));
        Ok(())
    }

    fn set_visible(&mut self, visible: bool) -> Result<()> {
        self.push(SurfaceEvent::Visible(visible));
        Ok(())
    }

    fn set_opacity(&mut self, opacity: f64) -> Result<()> {
        self.push(SurfaceEvent::Opacity(opacity));
        Ok(())
    }

    fn submit(&mut self, frame: &Frame) -> Result<()> {
        self.push(SurfaceEvent::Frame(frame.clone()));
        Ok(())
    }
}

/// [`SurfaceFactory`] producing [`FrameRecorder`]s.
#[derive(Debug, Clone, Copy, Default)]
pub struct RecorderFactory;

impl SurfaceFactory for RecorderFactory {
    type Surface = FrameRecorder;

    fn create(&self, bounds: Rect, _options: SurfaceOptions) -> Result<FrameRecorder> {
        let mut recorder = FrameRecorder::new();
        recorder.set_bounds(bounds)?;
        Ok(recorder)
    }
}
