//! Edge detection against the primary display.
//!
//! Given the primary display's bounds and the pointer position this decides
//! whether the pointer is off the primary display, close to one of its
//! edges, or neither, and where on the display the arrow should be anchored.
//! Everything here is pure.

use crate::display::Rect;
use crate::geometry::{Point, PointF};

/// Ray components smaller than this are treated as parallel to the axis.
const PARALLEL_EPSILON: f64 = 1e-12;

/// One side of the primary display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Edge {
    Left,
    Right,
    Top,
    Bottom,
}

impl Edge {
    /// Tie-break order when the pointer is equally close to several edges.
    pub const PRIORITY: [Edge; 4] = [Edge::Left, Edge::Right, Edge::Top, Edge::Bottom];

    /// Arrow direction for this edge, in degrees (y grows downward).
    pub const fn direction_deg(self) -> f64 {
        match self {
            Edge::Left => 180.0,
            Edge::Right => 0.0,
            Edge::Top => -90.0,
            Edge::Bottom => 90.0,
        }
    }

    /// Distance from `pos` to this edge's outermost pixel row/column.
    fn distance(self, bounds: &Rect, pos: Point) -> i64 {
        let (pos_x, pos_y) = (i64::from(pos.x), i64::from(pos.y));
        match self {
            Edge::Left => pos_x - i64::from(bounds.left()),
            Edge::Right => i64::from(bounds.right()) - 1 - pos_x,
            Edge::Top => pos_y - i64::from(bounds.top()),
            Edge::Bottom => i64::from(bounds.bottom()) - 1 - pos_y,
        }
    }

    /// Point on this edge level with `pos`.
    fn anchor(self, bounds: &Rect, pos: Point) -> Point {
        match self {
            Edge::Left => Point::new(bounds.left(), pos.y),
            Edge::Right => Point::new(bounds.right() - 1, pos.y),
            Edge::Top => Point::new(pos.x, bounds.top()),
            Edge::Bottom => Point::new(pos.x, bounds.bottom() - 1),
        }
    }
}

/// Where the pointer is relative to the primary display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    /// Outside the primary display.
    Offscreen,
    /// Inside, within the edge zone of the given edge.
    NearEdge(Edge),
    /// Inside and away from every edge.
    Interior,
}

/// Result of one detection pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeState {
    /// Arrow direction in degrees, y grows downward.
    pub direction_deg: f64,
    /// Where the arrow should be drawn.
    pub anchor: Point,
    /// Pointer speed in px/s, passed through from the sampler.
    pub speed: f64,
    /// Whether the overlay should be shown.
    pub active: bool,
    /// Which case produced this state.
    pub region: Region,
}

impl EdgeState {
    fn inactive(speed: f64) -> Self {
        Self {
            direction_deg: 0.0,
            anchor: Point::default(),
            speed,
            active: false,
            region: Region::Interior,
        }
    }
}

/// Classifies pointer positions against a fixed display rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeDetector {
    bounds: Rect,
}

impl EdgeDetector {
    /// Create a detector for the given primary-display bounds.
    pub fn new(bounds: Rect) -> Self {
        Self { bounds }
    }

    /// Primary-display bounds this detector measures against.
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Classify `pos` and compute the arrow direction and anchor.
    pub fn detect(&self, pos: Point, edge_zone_px: u32, speed: f64) -> EdgeState {
        if !self.bounds.contains(pos) {
            let direction_deg = direction_from_center(&self.bounds, pos);
            return EdgeState {
                direction_deg,
                anchor: edge_anchor(&self.bounds, direction_deg),
                speed,
                active: true,
                region: Region::Offscreen,
            };
        }

        match near_edge(&self.bounds, pos, edge_zone_px) {
            Some(edge) => EdgeState {
                direction_deg: edge.direction_deg(),
                anchor: edge.anchor(&self.bounds, pos),
                speed,
                active: true,
                region: Region::NearEdge(edge),
            },
            None => EdgeState::inactive(speed),
        }
    }
}

/// Angle in degrees from the center of `bounds` toward `pos`.
pub fn direction_from_center(bounds: &Rect, pos: Point) -> f64 {
    let center = bounds.center();
    let dx = f64::from(pos.x) - center.x;
    let dy = f64::from(pos.y) - center.y;
    dy.atan2(dx).to_degrees()
}

/// Exact point where a ray from the center of `bounds` at `angle_deg` meets
/// the outermost pixel rows/columns of `bounds`.
pub fn ray_exit(bounds: &Rect, angle_deg: f64) -> PointF {
    let center = bounds.center();
    let (dyn_, dxn) = angle_deg.to_radians().sin_cos();

    let t_x = (dxn.abs() >= PARALLEL_EPSILON).then(|| {
        let edge = if dxn > 0.0 {
            bounds.right() - 1
        } else {
            bounds.left()
        };
        ((f64::from(edge) - center.x) / dxn).abs()
    });
    let t_y = (dyn_.abs() >= PARALLEL_EPSILON).then(|| {
        let edge = if dyn_ > 0.0 {
            bounds.bottom() - 1
        } else {
            bounds.top()
        };
        ((f64::from(edge) - center.y) / dyn_).abs()
    });

    // A unit direction always has at least one non-parallel component.
    let t = match (t_x, t_y) {
        (Some(tx), Some(ty)) => tx.min(ty),
        (Some(tx), None) => tx,
        (None, Some(ty)) => ty,
        (None, None) => 0.0,
    };

    PointF::new(center.x + dxn * t, center.y + dyn_ * t)
}

/// [`ray_exit`] truncated to a screen pixel.
pub fn edge_anchor(bounds: &Rect, angle_deg: f64) -> Point {
    ray_exit(bounds, angle_deg).truncate()
}

/// The edge within `edge_zone_px` of `pos`, if any. `pos` must be inside
/// `bounds`. Ties go to the edge listed first in [`Edge::PRIORITY`].
pub fn near_edge(bounds: &Rect, pos: Point, edge_zone_px: u32) -> Option<Edge> {
    let distances = Edge::PRIORITY.map(|edge| (edge, edge.distance(bounds, pos)));
    let min_distance = distances.iter().map(|(_, d)| *d).min()?;

    if min_distance > i64::from(edge_zone_px) {
        return None;
    }

    distances
        .iter()
        .find(|(_, d)| *d == min_distance)
        .map(|(edge, _)| *edge)
}
