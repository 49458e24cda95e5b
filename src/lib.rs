//! # mousenav
//!
//! Points the way back to your mouse pointer. Whenever the pointer leaves the
//! primary display, or gets close to one of its edges, an animated arrow is
//! drawn on the edge of the primary display pointing toward it.
//!
//! ## Features
//!
//! - Ray/rectangle edge geometry with an explicit treatment of axis-parallel rays
//! - Speed boost: fast flicks toward another monitor make the arrow bigger
//! - Eased scale, pulse/glow/bounce modulation that survives hide and show
//! - Settings published as whole snapshots, picked up at the next tick
//! - Pointer and primary display queries for macOS, Windows and Linux/X11
//!
//! ## Quick Start
//!
//! ```no_run
//! use mousenav::{Navigator, Runner, SharedSettings, SystemClock, SystemDesktop};
//! # use mousenav::{Frame, OverlaySurface, Rect, Result};
//! # struct MySurface;
//! # impl OverlaySurface for MySurface {
//! #     fn set_bounds(&mut self, _: Rect) -> Result<()> { Ok(()) }
//! #     fn set_visible(&mut self, _: bool) -> Result<()> { Ok(()) }
//! #     fn set_opacity(&mut self, _: f64) -> Result<()> { Ok(()) }
//! #     fn submit(&mut self, _: &Frame) -> Result<()> { Ok(()) }
//! # }
//!
//! let settings = SharedSettings::default();
//! let navigator = Navigator::from_desktop(&SystemDesktop, &SystemClock, settings.clone())
//!     .expect("no primary display");
//!
//! let runner = Runner::new();
//! runner.run_async(navigator, SystemDesktop, MySurface).unwrap();
//!
//! // Later, from the settings dialog:
//! settings.store(mousenav::Settings::default().with_arrow_scale(1.5));
//! ```
//!
//! ## Architecture
//!
//! Each tick runs sample → detect → show/hide → animate → render on a single
//! thread (see [`navigator`]). Drawing goes through the [`OverlaySurface`]
//! trait; a windowing backend supplies an always-on-top, click-through
//! surface and rasterizes the [`Frame`]s it is handed.

pub mod arrow;
pub mod display;
pub mod edge;
pub mod error;
pub mod geometry;
pub mod navigator;
pub mod overlay;
#[cfg(feature = "recorder")]
pub mod recorder;
pub mod runner;
pub mod sampler;
pub mod settings;
#[cfg(feature = "statistics")]
pub mod statistics;
pub mod surface;

mod platform;

// Re-exports
pub use arrow::{ArrowPose, BASE_ARROW_SIZE, Fill, Frame, Layer, LayerKind, Stroke};
pub use display::{Desktop, DisplayInfo, Rect, SystemDesktop, pointer_position, primary_display};
pub use edge::{Edge, EdgeDetector, EdgeState, Region};
pub use error::{Error, Result};
pub use geometry::{Point, PointF, RectF, Transform};
pub use navigator::{Navigator, TickOutcome};
pub use overlay::{OverlayRenderer, Visibility, VisualState};
#[cfg(feature = "recorder")]
pub use recorder::{FrameRecorder, RecorderFactory, Recording};
pub use runner::Runner;
pub use sampler::{Clock, CursorSample, Sampler, SystemClock};
pub use settings::{AnimationStyle, Rgba, Settings, SharedSettings};
#[cfg(feature = "statistics")]
pub use statistics::NavigatorStatistics;
pub use surface::{OverlaySurface, SurfaceFactory, SurfaceOptions};
