//! Plane types and curve flattening for the mandala renderer
//!
//! Generators hand out `Point`/`Circle` values relative to an implicit origin;
//! the renderer maps them into pixel space. The rasterizer only fills polygons,
//! so canvas-style quadratic curves are flattened here.

/// A point in the mandala's model plane
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Distance from the origin
    pub fn radius(&self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// Point at polar coordinates (angle in radians)
    pub fn polar(angle: f32, radius: f32) -> Self {
        Self {
            x: angle.cos() * radius,
            y: angle.sin() * radius,
        }
    }
}

/// A circle in the model plane
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
}

impl Circle {
    pub fn new(x: f32, y: f32, radius: f32) -> Self {
        Self { x, y, radius }
    }
}

/// Segments used when flattening one quadratic curve. Petals are small enough
/// on screen that 16 chords per lobe are visually indistinguishable from the
/// true curve.
pub const QUAD_SEGMENTS: usize = 16;

/// Evaluate a quadratic Bezier at parameter t
#[inline]
fn quad_at(p0: Point, ctrl: Point, p1: Point, t: f32) -> Point {
    let u = 1.0 - t;
    Point {
        x: u * u * p0.x + 2.0 * u * t * ctrl.x + t * t * p1.x,
        y: u * u * p0.y + 2.0 * u * t * ctrl.y + t * t * p1.y,
    }
}

/// Flatten a quadratic curve from `p0` to `p1` with control point `ctrl`,
/// appending the interior and end points to `out` (the start point is assumed
/// to already be in the path).
pub fn flatten_quad_into(out: &mut Vec<Point>, p0: Point, ctrl: Point, p1: Point) {
    for i in 1..=QUAD_SEGMENTS {
        let t = i as f32 / QUAD_SEGMENTS as f32;
        out.push(quad_at(p0, ctrl, p1, t));
    }
}
