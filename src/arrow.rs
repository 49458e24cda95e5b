//! Arrow shape and frame composition.
//!
//! A [`Frame`] is everything a surface needs to draw one overlay update: the
//! transformed shadow and body polygons with their paint. Surfaces only
//! rasterize; all geometry is decided here.

use crate::geometry::{Point, PointF, RectF, Transform};
use crate::settings::Rgba;

#[cfg(feature = "recorder")]
use serde::{Deserialize, Serialize};

/// Arrow length, tip to tail flare, at scale 1.0.
pub const BASE_ARROW_SIZE: f64 = 40.0;

/// Screen-space offset of the drop shadow.
pub const SHADOW_OFFSET: PointF = PointF::new(3.0, 3.0);

/// Drop shadow paint.
pub const SHADOW_COLOR: Rgba = Rgba::new(0, 0, 0, 80);

/// Outline paint.
pub const OUTLINE_COLOR: Rgba = Rgba::new(30, 60, 160, 200);

/// Outline width in pixels.
pub const OUTLINE_WIDTH: f64 = 2.0;

/// Gradient alpha at the top of the body.
const GRADIENT_TOP_ALPHA: f64 = 255.0;

/// Gradient alpha at the bottom of the body.
const GRADIENT_BOTTOM_ALPHA: f64 = 180.0;

/// How a polygon is filled.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "recorder", derive(Serialize, Deserialize))]
pub enum Fill {
    /// Uniform color.
    Solid(Rgba),
    /// Linear gradient from `top` to `bottom` across `bounds`.
    VerticalGradient {
        top: Rgba,
        bottom: Rgba,
        bounds: RectF,
    },
}

/// Polygon outline.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "recorder", derive(Serialize, Deserialize))]
pub struct Stroke {
    pub color: Rgba,
    pub width: f64,
}

/// What a layer depicts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "recorder", derive(Serialize, Deserialize))]
pub enum LayerKind {
    Shadow,
    Body,
}

/// One filled (and optionally stroked) polygon in screen coordinates.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "recorder", derive(Serialize, Deserialize))]
pub struct Layer {
    pub kind: LayerKind,
    pub path: Vec<PointF>,
    pub fill: Fill,
    pub stroke: Option<Stroke>,
}

/// A complete overlay drawing, layers ordered back to front.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "recorder", derive(Serialize, Deserialize))]
pub struct Frame {
    /// Point the arrow is anchored at.
    pub anchor: Point,
    /// Arrow rotation in degrees.
    pub angle_deg: f64,
    /// Arrow length after scaling and pulsing.
    pub size: f64,
    /// Local-to-screen transform of the body.
    pub transform: Transform,
    /// Shadow first, body last.
    pub layers: Vec<Layer>,
}

impl Frame {
    /// The body layer.
    pub fn body(&self) -> Option<&Layer> {
        self.layers.iter().find(|l| l.kind == LayerKind::Body)
    }

    /// The shadow layer.
    pub fn shadow(&self) -> Option<&Layer> {
        self.layers.iter().find(|l| l.kind == LayerKind::Shadow)
    }

    /// Screen area covered by all layers, for damage tracking.
    pub fn bounds(&self) -> Option<RectF> {
        let points: Vec<PointF> = self
            .layers
            .iter()
            .flat_map(|l| l.path.iter().copied())
            .collect();
        RectF::bounding(&points)
    }
}

/// Placement and modulation of one arrow drawing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArrowPose {
    pub anchor: Point,
    pub angle_deg: f64,
    /// Arrow length in pixels.
    pub size: f64,
    /// Shift along the arrow direction, in pixels.
    pub offset: f64,
    /// Multiplier on the body gradient's alpha.
    pub alpha_gain: f64,
}

/// Dart-shaped arrow pointing along +x with its tip at `(size, 0)`.
pub fn arrow_polygon(size: f64) -> [PointF; 7] {
    [
        PointF::new(0.0, -size / 4.0),
        PointF::new(size, 0.0),
        PointF::new(0.0, size / 4.0),
        PointF::new(size / 5.0, size / 8.0),
        PointF::new(-size * 0.6, size / 8.0),
        PointF::new(-size * 0.6, -size / 8.0),
        PointF::new(size / 5.0, -size / 8.0),
    ]
}

/// Local-to-screen transform: center the tip, rotate, move to the anchor.
pub fn arrow_transform(pose: &ArrowPose) -> Transform {
    Transform::translation(-pose.size / 2.0 + pose.offset, 0.0)
        .then(&Transform::rotation_deg(pose.angle_deg))
        .then(&Transform::translation(
            f64::from(pose.anchor.x),
            f64::from(pose.anchor.y),
        ))
}

/// Build the shadow and body layers for `pose`.
pub fn compose(pose: &ArrowPose, color: Rgba) -> Frame {
    let local = arrow_polygon(pose.size);
    let transform = arrow_transform(pose);
    let shadow_transform =
        transform.then(&Transform::translation(SHADOW_OFFSET.x, SHADOW_OFFSET.y));

    let size = pose.size;
    let gradient_bounds = RectF {
        x: f64::from(pose.anchor.x) - size,
        y: f64::from(pose.anchor.y) - size / 2.0,
        width: size * 2.0,
        height: size,
    };

    let shadow = Layer {
        kind: LayerKind::Shadow,
        path: shadow_transform.apply_all(&local),
        fill: Fill::Solid(SHADOW_COLOR),
        stroke: None,
    };
    let body = Layer {
        kind: LayerKind::Body,
        path: transform.apply_all(&local),
        fill: Fill::VerticalGradient {
            top: color.with_alpha(scaled_alpha(GRADIENT_TOP_ALPHA, pose.alpha_gain)),
            bottom: color.with_alpha(scaled_alpha(GRADIENT_BOTTOM_ALPHA, pose.alpha_gain)),
            bounds: gradient_bounds,
        },
        stroke: Some(Stroke {
            color: OUTLINE_COLOR,
            width: OUTLINE_WIDTH,
        }),
    };

    Frame {
        anchor: pose.anchor,
        angle_deg: pose.angle_deg,
        size,
        transform,
        layers: vec![shadow, body],
    }
}

fn scaled_alpha(alpha: f64, gain: f64) -> u8 {
    (alpha * gain).round().clamp(0.0, 255.0) as u8
}
