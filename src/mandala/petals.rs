//! Petal rings and detail-pattern motifs
//!
//! One "layer" of the mandala is a ring of lens-shaped petals around the
//! origin. Each petal is two quadratic lobes sharing a control point out past
//! the tip; the lobes are flattened into one polygon and filled with a radial
//! gradient running from the inner hue at the origin to the outer hue at the
//! rim.

use super::Frame;
use crate::geometry::{flatten_quad_into, Point};
use crate::util::{alpha_u8, hsl_to_rgb};
use std::f32::consts::TAU;

/// Petals taller than this (in pixels) get dots and connecting strokes
const DECORATION_MIN_RADIUS: f32 = 50.0;

/// Draw one ring of petals at `outer_radius`
pub(crate) fn draw_petal_ring(
    frame: &mut Frame,
    petal_count: u32,
    outer_radius: f32,
    hue_inner: f32,
    hue_outer: f32,
    complexity: f32,
) {
    if petal_count == 0 || outer_radius <= 0.0 {
        return;
    }

    let increment = TAU / petal_count as f32;
    let inner_color = hsl_to_rgb(hue_inner, 0.7, 0.5);
    let outer_color = hsl_to_rgb(hue_outer, 0.7, 0.5);
    // Gradient start radius; matches the canvas gradient's inner stop at
    // 20% of the (0.8 * R) inner radius
    let gradient_start = outer_radius * 0.8 * 0.2;

    // Higher complexity pushes the control point further out, sharpening the
    // lens into a pointed leaf
    let shape = 1.0 + (complexity - 1.0) * 0.4;

    for i in 0..petal_count {
        let angle = i as f32 * increment;

        let origin = Point::new(0.0, 0.0);
        let tip_a = Point::polar(angle - increment / 4.0, outer_radius);
        let tip_b = Point::polar(angle + increment / 4.0, outer_radius);
        let ctrl = Point::polar(angle, outer_radius * shape);

        // Two lobes out of the origin, closed back through it
        let mut path = vec![origin];
        flatten_quad_into(&mut path, origin, ctrl, tip_a);
        path.push(origin);
        flatten_quad_into(&mut path, origin, ctrl, tip_b);
        path.push(origin);

        let gradient: Vec<(Point, (u8, u8, u8), u8)> = path
            .iter()
            .map(|&p| {
                let t = ((p.radius() - gradient_start) / (outer_radius - gradient_start))
                    .clamp(0.0, 1.0);
                (p, lerp_color(inner_color, outer_color, t), 255)
            })
            .collect();
        frame.fill_polygon_gradient(&gradient);
        frame.stroke_path(&path, (255, 255, 255), alpha_u8(0.5));

        if outer_radius > DECORATION_MIN_RADIUS {
            draw_petal_decorations(frame, angle, increment, outer_radius, hue_inner, complexity);
        }
    }
}

/// Dot near the petal tip plus short connecting strokes at higher complexity
fn draw_petal_decorations(
    frame: &mut Frame,
    angle: f32,
    increment: f32,
    outer_radius: f32,
    hue_inner: f32,
    complexity: f32,
) {
    frame.fill_circle(
        Point::polar(angle, outer_radius * 0.7),
        outer_radius * 0.05,
        (255, 255, 255),
        alpha_u8(0.8),
    );

    if complexity > 1.2 {
        let stroke_color = hsl_to_rgb((hue_inner + 30.0) % 360.0, 0.8, 0.6);
        let strokes = complexity.floor() as u32;
        for j in 1..=strokes {
            let stroke_radius = outer_radius * (0.3 + j as f32 * 0.2);
            if stroke_radius < outer_radius {
                frame.line(
                    Point::polar(angle, stroke_radius * 0.7),
                    Point::polar(angle + increment * 0.3, stroke_radius * 0.8),
                    1,
                    stroke_color,
                    alpha_u8(0.4),
                );
            }
        }
    }
}

/// Ring of alternating dot / diamond / radiating-line motifs, keyed by index
pub(crate) fn draw_detail_ring(frame: &mut Frame, elements: u32, radius: f32, hue: f32) {
    if elements == 0 || radius <= 0.0 {
        return;
    }
    let increment = TAU / elements as f32;

    for i in 0..elements {
        let angle = i as f32 * increment;
        let p = Point::polar(angle, radius);

        match i % 3 {
            0 => {
                frame.fill_circle(
                    p,
                    radius * 0.05,
                    hsl_to_rgb((hue + 120.0) % 360.0, 0.7, 0.6),
                    alpha_u8(0.6),
                );
            },
            1 => {
                let d = radius * 0.06;
                let diamond = [
                    Point::new(p.x, p.y - d),
                    Point::new(p.x + d, p.y),
                    Point::new(p.x, p.y + d),
                    Point::new(p.x - d, p.y),
                ];
                frame.fill_polygon(
                    &diamond,
                    hsl_to_rgb((hue + 60.0) % 360.0, 0.7, 0.6),
                    alpha_u8(0.6),
                );
            },
            _ => {
                frame.line(
                    Point::new(p.x * 0.8, p.y * 0.8),
                    Point::new(p.x * 1.1, p.y * 1.1),
                    2,
                    hsl_to_rgb((hue + 180.0) % 360.0, 0.7, 0.6),
                    alpha_u8(0.6),
                );
            },
        }
    }
}

/// Linear interpolation between two colors
#[inline]
fn lerp_color(c1: (u8, u8, u8), c2: (u8, u8, u8), t: f32) -> (u8, u8, u8) {
    let t = t.clamp(0.0, 1.0);
    (
        (c1.0 as f32 + (c2.0 as f32 - c1.0 as f32) * t) as u8,
        (c1.1 as f32 + (c2.1 as f32 - c1.1 as f32) * t) as u8,
        (c1.2 as f32 + (c2.2 as f32 - c1.2 as f32) * t) as u8,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lerp_color_endpoints() {
        let a = (0, 100, 200);
        let b = (200, 0, 100);
        assert_eq!(lerp_color(a, b, 0.0), a);
        assert_eq!(lerp_color(a, b, 1.0), b);
        assert_eq!(lerp_color(a, b, 0.5), (100, 50, 150));
    }
}
