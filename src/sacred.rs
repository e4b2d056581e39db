//! Sacred-geometry generators
//!
//! Pure numeric generators: everything here is a total function of its inputs,
//! produces fresh data, and touches no shared state. The renderer decides how
//! (and whether) the results get drawn.

use crate::geometry::{Circle, Point};
use std::f32::consts::TAU;

/// Fibonacci values petal counts are snapped to
pub const FIBONACCI: [u32; 8] = [3, 5, 8, 13, 21, 34, 55, 89];

/// Snap `n` to the nearest value in [`FIBONACCI`].
///
/// The scan keeps the incumbent on ties (strict `<`), so equidistant inputs
/// resolve to the smaller value: `nearest_fibonacci(4) == 3`. Downstream
/// callers rely on that exact behavior.
pub fn nearest_fibonacci(n: i64) -> u32 {
    let mut best = FIBONACCI[0];
    for &candidate in &FIBONACCI[1..] {
        if (candidate as i64).abs_diff(n) < (best as i64).abs_diff(n) {
            best = candidate;
        }
    }
    best
}

/// Centers for a Flower-of-Life circle packing.
///
/// Ring `l` walks the six edges of a regular hexagon with circumradius
/// `l * circle_radius`; each edge contributes `l` points (start vertex
/// included, end vertex left to the next edge). Totals 1, 7, 19, 37, ...
/// = `1 + 3L(L+1)` points.
pub fn flower_of_life_centers(circle_radius: f32, layers: u32) -> Vec<Point> {
    let mut centers = vec![Point::new(0.0, 0.0)];

    for ring in 1..=layers {
        let ring_radius = ring as f32 * circle_radius;
        for edge in 0..6 {
            let start = Point::polar(edge as f32 * TAU / 6.0, ring_radius);
            let end = Point::polar((edge + 1) as f32 * TAU / 6.0, ring_radius);
            for step in 0..ring {
                let t = step as f32 / ring as f32;
                centers.push(Point::new(
                    start.x + (end.x - start.x) * t,
                    start.y + (end.y - start.y) * t,
                ));
            }
        }
    }

    centers
}

/// Golden ratio
const PHI: f32 = 1.618_034;

/// Points along a golden (logarithmic) spiral around `(cx, cy)`.
///
/// Growth rate `b = 2 ln(phi) / pi` makes the radius multiply by phi every
/// quarter turn; `a` is solved so the final sample lands on `max_radius`.
/// Sampled at 100 points per turn, both endpoints included, so the radius is
/// monotonically non-decreasing across the returned sequence.
pub fn golden_spiral(cx: f32, cy: f32, max_radius: f32, turns: u32) -> Vec<Point> {
    let theta_max = turns as f32 * TAU;
    let b = 2.0 * PHI.ln() / std::f32::consts::PI;
    let a = max_radius / (b * theta_max).exp();

    let samples = turns as usize * 100;
    let mut points = Vec::with_capacity(samples + 1);
    for i in 0..=samples {
        let theta = theta_max * i as f32 / samples.max(1) as f32;
        let r = a * (b * theta).exp();
        points.push(Point::new(cx + theta.cos() * r, cy + theta.sin() * r));
    }
    points
}

/// Hard cap on fractal recursion depth
const MAX_FRACTAL_DEPTH: u32 = 4;
/// Hard cap on fractal branching factor
const MAX_FRACTAL_BRANCHES: u32 = 8;

/// Recursively packed circles: each circle is surrounded by `branches`
/// half-radius children at equal angular spacing, touching the parent.
///
/// `depth` is clamped to 4 and `branches` to 8 before recursing.
/// Total count for depth `d`, branches `b` is `sum(b^i, i = 0..=d)`.
pub fn fractal_circles(cx: f32, cy: f32, radius: f32, depth: u32, branches: u32) -> Vec<Circle> {
    let depth = depth.min(MAX_FRACTAL_DEPTH);
    let branches = branches.min(MAX_FRACTAL_BRANCHES);

    let mut circles = Vec::new();
    collect_fractal(&mut circles, cx, cy, radius, depth, branches);
    circles
}

fn collect_fractal(
    out: &mut Vec<Circle>,
    cx: f32,
    cy: f32,
    radius: f32,
    depth: u32,
    branches: u32,
) {
    out.push(Circle::new(cx, cy, radius));
    if depth == 0 || branches == 0 {
        return;
    }

    let child_radius = radius * 0.5;
    let distance = radius + child_radius;
    for i in 0..branches {
        let angle = i as f32 * TAU / branches as f32;
        collect_fractal(
            out,
            cx + angle.cos() * distance,
            cy + angle.sin() * distance,
            child_radius,
            depth - 1,
            branches,
        );
    }
}

/// Hexagonal tiling centers covering `[0, width] x [0, height]` with a
/// two-radius buffer on every side, so edge hexagons are represented even when
/// partially outside the nominal area. Odd rows are offset by half the
/// horizontal spacing. Returns nothing for a degenerate radius.
pub fn hexagon_grid(width: f32, height: f32, hex_radius: f32) -> Vec<Point> {
    if hex_radius <= 0.0 {
        return Vec::new();
    }

    let dx = 3.0_f32.sqrt() * hex_radius;
    let dy = 1.5 * hex_radius;
    let margin = 2.0 * hex_radius;

    let mut points = Vec::new();
    let mut row = 0u32;
    let mut y = -margin;
    while y <= height + margin {
        let offset = if row % 2 == 1 { dx / 2.0 } else { 0.0 };
        let mut x = -margin + offset;
        while x <= width + margin {
            points.push(Point::new(x, y));
            x += dx;
        }
        y += dy;
        row += 1;
    }
    points
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fibonacci_members_snap_to_themselves() {
        for &f in &FIBONACCI {
            assert_eq!(nearest_fibonacci(f as i64), f);
        }
    }

    #[test]
    fn fibonacci_tie_favors_smaller() {
        // 4 is equidistant between 3 and 5; the incumbent wins
        assert_eq!(nearest_fibonacci(4), 3);
    }

    #[test]
    fn fibonacci_nearest_values() {
        assert_eq!(nearest_fibonacci(6), 5);
        assert_eq!(nearest_fibonacci(7), 8);
        assert_eq!(nearest_fibonacci(10), 8);
        assert_eq!(nearest_fibonacci(11), 13);
        assert_eq!(nearest_fibonacci(12), 13);
    }

    #[test]
    fn fibonacci_clamps_to_bounds() {
        assert_eq!(nearest_fibonacci(1), 3);
        assert_eq!(nearest_fibonacci(100), 89);
        assert_eq!(nearest_fibonacci(-50), 3);
    }

    #[test]
    fn fibonacci_snaps_extreme_inputs_without_overflow() {
        assert_eq!(nearest_fibonacci(i64::MIN), 3);
        assert_eq!(nearest_fibonacci(i64::MAX), 89);
    }

    #[test]
    fn flower_of_life_zero_layers_is_origin() {
        let centers = flower_of_life_centers(50.0, 0);
        assert_eq!(centers.len(), 1);
        assert_eq!(centers[0], Point::new(0.0, 0.0));
    }

    #[test]
    fn flower_of_life_one_layer_has_seven_centers() {
        let centers = flower_of_life_centers(50.0, 1);
        assert_eq!(centers.len(), 7);
        // The first ring starts at (radius, 0)
        assert!(centers
            .iter()
            .any(|p| (p.x - 50.0).abs() < 1e-3 && p.y.abs() < 1e-3));
    }

    #[test]
    fn flower_of_life_counts_follow_hex_rings() {
        // 1 + 3L(L+1)
        assert_eq!(flower_of_life_centers(50.0, 2).len(), 19);
        assert_eq!(flower_of_life_centers(50.0, 3).len(), 37);
    }

    #[test]
    fn flower_of_life_rings_sit_on_their_hexagon() {
        // Every ring-2 point lies within circumradius 2r of the origin and at
        // least inradius (sqrt(3)/2 * 2r) away
        let r = 10.0;
        let centers = flower_of_life_centers(r, 2);
        for p in &centers[7..] {
            let d = p.radius();
            assert!(d <= 2.0 * r + 1e-3);
            assert!(d >= 3.0_f32.sqrt() * r - 1e-3);
        }
    }

    #[test]
    fn golden_spiral_is_dense_enough() {
        let points = golden_spiral(0.0, 0.0, 100.0, 2);
        assert!(points.len() > 10);
        assert_eq!(points.len(), 201);
    }

    #[test]
    fn golden_spiral_radius_never_decreases() {
        let points = golden_spiral(0.0, 0.0, 100.0, 2);
        let mut prev = 0.0;
        for p in &points {
            let d = p.radius();
            assert!(d >= prev - 1e-4, "radius decreased: {} -> {}", prev, d);
            prev = d;
        }
    }

    #[test]
    fn golden_spiral_ends_at_max_radius() {
        let points = golden_spiral(0.0, 0.0, 100.0, 4);
        let last = points.last().unwrap();
        assert!((last.radius() - 100.0).abs() < 0.1);
    }

    #[test]
    fn fractal_depth_zero_is_input_circle() {
        let circles = fractal_circles(0.0, 0.0, 100.0, 0, 6);
        assert_eq!(circles.len(), 1);
        assert_eq!(circles[0], Circle::new(0.0, 0.0, 100.0));
    }

    #[test]
    fn fractal_depth_one_adds_branch_children() {
        let circles = fractal_circles(0.0, 0.0, 100.0, 1, 6);
        assert_eq!(circles.len(), 7);
        assert_eq!(circles[1].radius, 50.0);
        // Children touch the parent: center distance = r + r/2
        let d = (circles[1].x * circles[1].x + circles[1].y * circles[1].y).sqrt();
        assert!((d - 150.0).abs() < 1e-3);
    }

    #[test]
    fn fractal_depth_two_count() {
        // 1 + 4 + 16
        let circles = fractal_circles(0.0, 0.0, 100.0, 2, 4);
        assert_eq!(circles.len(), 21);
    }

    #[test]
    fn fractal_depth_is_capped() {
        // depth clamps to 4: 1 + 2 + 4 + 8 + 16 = 31 circles for branches=2
        let circles = fractal_circles(0.0, 0.0, 100.0, 99, 2);
        assert_eq!(circles.len(), 31);
    }

    #[test]
    fn hexagon_grid_rejects_degenerate_radius() {
        assert!(hexagon_grid(100.0, 100.0, 0.0).is_empty());
        assert!(hexagon_grid(100.0, 100.0, -5.0).is_empty());
    }

    #[test]
    fn hexagon_grid_covers_padded_bounds() {
        let (w, h, r) = (100.0, 100.0, 10.0);
        let points = hexagon_grid(w, h, r);
        assert!(points.len() > 20);
        for p in &points {
            assert!(p.x >= -3.0 * r && p.x <= w + 3.0 * r);
            assert!(p.y >= -3.0 * r && p.y <= h + 3.0 * r);
        }
    }
}
