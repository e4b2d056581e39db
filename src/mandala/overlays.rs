//! Sacred-geometry overlays
//!
//! Each overlay renders one generator's output as translucent strokes on top
//! of the finished layer composition. Overlays never clear pixels; stacking
//! them only adds detail.

use super::Frame;
use crate::display::PixelBuffer;
use crate::geometry::Point;
use crate::sacred;
use crate::util::alpha_u8;
use std::f32::consts::TAU;

/// Gold used by the Flower-of-Life and golden-spiral overlays
const GOLD: (u8, u8, u8) = (255, 215, 0);
/// Cyan-blue used by the fractal overlay
const FRACTAL_BLUE: (u8, u8, u8) = (100, 200, 255);

/// Hex-packed circle overlay, three rings
pub(crate) fn draw_flower_of_life(frame: &mut Frame, base_size: f32) {
    let circle_radius = base_size / 3.0;
    for center in sacred::flower_of_life_centers(circle_radius, 3) {
        frame.stroke_circle(center, circle_radius, 2.0, GOLD, alpha_u8(0.5));
    }
}

/// One logarithmic spiral polyline with a soft glow.
/// The glow is a wide low-alpha underdraw beneath the main stroke; cheaper
/// than a blur pass and indistinguishable at these stroke widths.
pub(crate) fn draw_golden_spiral(frame: &mut Frame, base_size: f32) {
    let points = sacred::golden_spiral(0.0, 0.0, base_size, 4);

    for pair in points.windows(2) {
        frame.line(pair[0], pair[1], 9, GOLD, alpha_u8(0.12));
    }
    for pair in points.windows(2) {
        frame.line(pair[0], pair[1], 3, GOLD, alpha_u8(0.8));
    }
}

/// Recursive circle outlines; depth follows complexity
pub(crate) fn draw_fractal_circles(frame: &mut Frame, base_size: f32, complexity: f32) {
    let depth = if complexity > 2.0 { 3 } else { 2 };
    let circles = sacred::fractal_circles(0.0, 0.0, base_size * 0.25, depth, 6);

    for circle in circles {
        let center = Point::new(circle.x, circle.y);
        frame.fill_circle(center, circle.radius, FRACTAL_BLUE, alpha_u8(0.1));
        frame.stroke_circle(center, circle.radius, 1.5, FRACTAL_BLUE, alpha_u8(0.7));
    }
}

/// Faint hexagonal lattice drawn in screen space beneath the mandala.
/// Host-side backdrop; not part of the composite pass, so it takes the buffer
/// directly instead of a frame.
pub fn draw_hex_lattice(buffer: &mut PixelBuffer, hex_radius: f32) {
    let width = buffer.width() as f32;
    let height = buffer.height() as f32;
    let alpha = alpha_u8(0.22);

    for center in sacred::hexagon_grid(width, height, hex_radius) {
        // Pointy-top hexagon outline matching the sqrt(3)*r column spacing
        let mut prev = hex_vertex(center, hex_radius, 0);
        for i in 1..=6 {
            let next = hex_vertex(center, hex_radius, i);
            buffer.line_blend(prev.x, prev.y, next.x, next.y, 60, 70, 110, alpha);
            prev = next;
        }
    }
}

fn hex_vertex(center: Point, radius: f32, i: u32) -> Point {
    let angle = TAU / 12.0 + i as f32 * TAU / 6.0;
    Point::new(
        center.x + angle.cos() * radius,
        center.y + angle.sin() * radius,
    )
}
