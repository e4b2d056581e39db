//! Layered mandala renderer
//!
//! `draw_mandala` is the whole render pass: clear, one centered+rotated frame,
//! the layer loop (petal rings, inner discs, detail patterns), the central
//! decorations, then the optional sacred-geometry overlays in a fixed order.
//! The pass is a pure function of the config: no state survives between calls,
//! so identical configs produce byte-identical buffers.

mod overlays;
mod petals;

pub use overlays::draw_hex_lattice;

use crate::config::MandalaConfig;
use crate::display::PixelBuffer;
use crate::geometry::Point;
use crate::util::{alpha_u8, hsl_to_rgb};
use std::f32::consts::TAU;

/// Clear color behind every composition (near-black blue)
pub const BACKGROUND: (u8, u8, u8) = (10, 10, 18);

/// Drawing frame for one render pass: the pixel buffer plus the centered,
/// rotated coordinate mapping every layer and overlay draws through.
pub(crate) struct Frame<'a> {
    buf: &'a mut PixelBuffer,
    cx: f32,
    cy: f32,
    sin: f32,
    cos: f32,
}

impl<'a> Frame<'a> {
    fn new(buf: &'a mut PixelBuffer, rotation_deg: f32) -> Self {
        let cx = buf.width() as f32 / 2.0;
        let cy = buf.height() as f32 / 2.0;
        let radians = rotation_deg.to_radians();
        Self {
            buf,
            cx,
            cy,
            sin: radians.sin(),
            cos: radians.cos(),
        }
    }

    /// Map a model-plane point into pixel space (rotate, then translate)
    #[inline]
    pub fn map(&self, p: Point) -> (f32, f32) {
        (
            p.x * self.cos - p.y * self.sin + self.cx,
            p.x * self.sin + p.y * self.cos + self.cy,
        )
    }

    /// Filled circle; rotation moves only the center, the radius is invariant
    pub fn fill_circle(&mut self, center: Point, radius: f32, color: (u8, u8, u8), alpha: u8) {
        let (x, y) = self.map(center);
        self.buf.fill_circle_blend(
            x.round() as i32,
            y.round() as i32,
            radius.round() as i32,
            color.0,
            color.1,
            color.2,
            alpha,
        );
    }

    /// Circle outline with stroke width
    pub fn stroke_circle(
        &mut self,
        center: Point,
        radius: f32,
        line_width: f32,
        color: (u8, u8, u8),
        alpha: u8,
    ) {
        let (x, y) = self.map(center);
        self.buf
            .draw_ring_blend(x, y, radius, line_width, color.0, color.1, color.2, alpha);
    }

    /// Straight stroke between two model points
    pub fn line(&mut self, from: Point, to: Point, width: i32, color: (u8, u8, u8), alpha: u8) {
        let (x0, y0) = self.map(from);
        let (x1, y1) = self.map(to);
        if width <= 1 {
            self.buf
                .line_blend(x0, y0, x1, y1, color.0, color.1, color.2, alpha);
        } else {
            self.buf
                .line_thick_blend(x0, y0, x1, y1, width, color.0, color.1, color.2, alpha);
        }
    }

    /// Flat-colored polygon from model points
    pub fn fill_polygon(&mut self, points: &[Point], color: (u8, u8, u8), alpha: u8) {
        let mapped: Vec<(f32, f32)> = points.iter().map(|&p| self.map(p)).collect();
        self.buf
            .fill_polygon_blend(&mapped, color.0, color.1, color.2, alpha);
    }

    /// Polygon with per-vertex color (the radial petal gradients)
    pub fn fill_polygon_gradient(&mut self, points: &[(Point, (u8, u8, u8), u8)]) {
        let mapped: Vec<(f32, f32, u8, u8, u8, u8)> = points
            .iter()
            .map(|&(p, (r, g, b), a)| {
                let (x, y) = self.map(p);
                (x, y, r, g, b, a)
            })
            .collect();
        self.buf.fill_polygon_gradient_blend(&mapped);
    }

    /// Outline a model-space path with 1px blended strokes
    pub fn stroke_path(&mut self, points: &[Point], color: (u8, u8, u8), alpha: u8) {
        for pair in points.windows(2) {
            self.line(pair[0], pair[1], 1, color, alpha);
        }
    }
}

/// Render one complete mandala into the buffer.
///
/// The buffer is cleared first, so repeated calls with the same config are
/// idempotent. Degenerate configs (zero petals or layers) clear and return.
pub fn draw_mandala(buffer: &mut PixelBuffer, config: &MandalaConfig) {
    buffer.clear(BACKGROUND.0, BACKGROUND.1, BACKGROUND.2);
    draw_mandala_over(buffer, config);
}

/// Render the composition without clearing first. For hosts that clear and
/// draw a backdrop themselves; the mandala then lands on top of it.
/// Degenerate configs draw nothing and leave the buffer untouched.
pub fn draw_mandala_over(buffer: &mut PixelBuffer, config: &MandalaConfig) {
    if !config.is_drawable() {
        return;
    }
    let cfg = config.sanitized();

    let min_side = buffer.width().min(buffer.height()) as f32;
    let base_size = min_side * 0.9 / 2.0 * cfg.pulse_scale;
    if base_size <= 0.0 {
        return;
    }

    let mut frame = Frame::new(buffer, cfg.rotation);

    let layers = cfg.layers as f32;
    for layer in 1..=cfg.layers {
        let layer_radius = base_size / layers * layer as f32;
        let hue = (cfg.base_hue + layer as f32 * 360.0 / layers) % 360.0;

        // Inner layers get denser as complexity rises; the factor fades to
        // zero at the outermost layer
        let petals_this_layer = (cfg.petals as f32
            * (1.0 + (cfg.complexity - 1.0) * (1.0 - layer as f32 / layers) * 0.5))
            .floor() as u32;

        petals::draw_petal_ring(
            &mut frame,
            petals_this_layer,
            layer_radius,
            hue,
            (hue + 30.0) % 360.0,
            cfg.complexity,
        );

        // Translucent inner disc with a white rim
        let disc_hue = (hue + 60.0) % 360.0;
        let origin = Point::new(0.0, 0.0);
        frame.fill_circle(
            origin,
            layer_radius * 0.4,
            hsl_to_rgb(disc_hue, 0.7, 0.5),
            alpha_u8(0.5),
        );
        frame.stroke_circle(
            origin,
            layer_radius * 0.4,
            2.0,
            (255, 255, 255),
            alpha_u8(0.5),
        );

        if cfg.complexity > 1.5 && layer % 2 == 0 {
            petals::draw_detail_ring(&mut frame, petals_this_layer * 2, layer_radius * 0.6, hue);
        }
    }

    draw_central_circles(&mut frame, &cfg, base_size);

    // Overlays are additive and ordered; none of them clears anything
    if cfg.flower_of_life {
        overlays::draw_flower_of_life(&mut frame, base_size);
    }
    if cfg.golden_spiral {
        overlays::draw_golden_spiral(&mut frame, base_size);
    }
    if cfg.fractal_mode {
        overlays::draw_fractal_circles(&mut frame, base_size, cfg.complexity);
    }
}

/// Concentric decorative rings, center dot, and (at high complexity) a burst
/// of short radiating strokes
fn draw_central_circles(frame: &mut Frame, cfg: &MandalaConfig, base_size: f32) {
    let origin = Point::new(0.0, 0.0);
    let ring_count = (cfg.layers as f32 * cfg.complexity).floor() as u32;

    for i in 0..ring_count {
        let radius = base_size * (0.1 - i as f32 * 0.015 / cfg.complexity.sqrt());
        if radius <= 0.0 {
            break;
        }

        let (color, alpha) = if cfg.complexity > 2.0 && i % 3 == 0 {
            (
                hsl_to_rgb((cfg.base_hue + i as f32 * 30.0) % 360.0, 0.7, 0.5),
                alpha_u8(0.4),
            )
        } else if i % 2 == 0 {
            ((255, 255, 255), alpha_u8(0.7))
        } else {
            ((0, 0, 0), alpha_u8(0.1))
        };

        frame.fill_circle(origin, radius, color, alpha);
        frame.stroke_circle(origin, radius, 1.0, (255, 255, 255), alpha_u8(0.3));
    }

    frame.fill_circle(origin, 5.0, (255, 255, 255), 255);

    if cfg.complexity > 1.7 {
        let ray_count = (cfg.petals as f32 * 1.5).floor() as u32;
        if ray_count == 0 {
            return;
        }
        let inner_radius = base_size * 0.15;
        for i in 0..ray_count {
            let angle = i as f32 * TAU / ray_count as f32;
            let color = hsl_to_rgb((cfg.base_hue + i as f32 * 10.0) % 360.0, 0.8, 0.6);
            frame.line(
                Point::polar(angle, inner_radius * 0.5),
                Point::polar(angle, inner_radius),
                1,
                color,
                alpha_u8(0.6),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> MandalaConfig {
        MandalaConfig {
            petals: 12,
            layers: 5,
            base_hue: 180.0,
            complexity: 1.0,
            rotation: 0.0,
            width: 64,
            height: 64,
            flower_of_life: false,
            golden_spiral: false,
            fractal_mode: false,
            pulse_scale: 1.0,
        }
    }

    fn cleared(w: u32, h: u32) -> PixelBuffer {
        let mut buf = PixelBuffer::with_size(w, h);
        buf.clear(BACKGROUND.0, BACKGROUND.1, BACKGROUND.2);
        buf
    }

    #[test]
    fn identical_configs_render_identical_bytes() {
        let cfg = MandalaConfig {
            flower_of_life: true,
            golden_spiral: true,
            fractal_mode: true,
            complexity: 2.5,
            ..test_config()
        };

        let mut a = PixelBuffer::with_size(64, 64);
        let mut b = PixelBuffer::with_size(64, 64);
        draw_mandala(&mut a, &cfg);
        draw_mandala(&mut b, &cfg);
        assert_eq!(a.as_bytes(), b.as_bytes());
    }

    #[test]
    fn repeated_passes_on_one_surface_are_idempotent() {
        let cfg = test_config();
        let mut once = PixelBuffer::with_size(64, 64);
        draw_mandala(&mut once, &cfg);
        let first: Vec<u8> = once.as_bytes().to_vec();
        draw_mandala(&mut once, &cfg);
        assert_eq!(once.as_bytes(), &first[..]);
    }

    #[test]
    fn render_actually_draws_something() {
        let mut buf = PixelBuffer::with_size(64, 64);
        draw_mandala(&mut buf, &test_config());
        assert_ne!(buf.as_bytes(), cleared(64, 64).as_bytes());
    }

    #[test]
    fn zero_layers_draws_nothing() {
        let cfg = MandalaConfig {
            layers: 0,
            ..test_config()
        };
        let mut buf = PixelBuffer::with_size(64, 64);
        draw_mandala(&mut buf, &cfg);
        assert_eq!(buf.as_bytes(), cleared(64, 64).as_bytes());
    }

    #[test]
    fn zero_petals_draws_nothing() {
        let cfg = MandalaConfig {
            petals: 0,
            ..test_config()
        };
        let mut buf = PixelBuffer::with_size(64, 64);
        draw_mandala(&mut buf, &cfg);
        assert_eq!(buf.as_bytes(), cleared(64, 64).as_bytes());
    }

    #[test]
    fn pulse_scale_changes_the_image() {
        let mut rest = PixelBuffer::with_size(64, 64);
        let mut swollen = PixelBuffer::with_size(64, 64);
        draw_mandala(&mut rest, &test_config());
        draw_mandala(
            &mut swollen,
            &MandalaConfig {
                pulse_scale: 1.05,
                ..test_config()
            },
        );
        assert_ne!(rest.as_bytes(), swollen.as_bytes());
    }

    #[test]
    fn rotation_changes_the_image() {
        let mut a = PixelBuffer::with_size(64, 64);
        let mut b = PixelBuffer::with_size(64, 64);
        draw_mandala(&mut a, &test_config());
        draw_mandala(
            &mut b,
            &MandalaConfig {
                rotation: 17.0,
                ..test_config()
            },
        );
        assert_ne!(a.as_bytes(), b.as_bytes());
    }

    #[test]
    fn draw_over_leaves_the_backdrop_where_nothing_is_drawn() {
        let mut backed = PixelBuffer::with_size(64, 64);
        backed.clear(90, 20, 60);
        draw_mandala_over(&mut backed, &test_config());
        // Corners sit outside the composition, so the backdrop survives there
        assert_eq!(backed.get_pixel(0, 0), Some((90, 20, 60)));
        assert_eq!(backed.get_pixel(63, 63), Some((90, 20, 60)));
    }

    #[test]
    fn hex_lattice_backdrop_sits_beneath_the_composition() {
        let cfg = test_config();
        let mut plain = PixelBuffer::with_size(64, 64);
        draw_mandala(&mut plain, &cfg);

        let mut backed = cleared(64, 64);
        draw_hex_lattice(&mut backed, 24.0);
        draw_mandala_over(&mut backed, &cfg);

        // The opaque center dot must never be repainted by lattice lines
        assert_eq!(backed.get_pixel(32, 32), Some((255, 255, 255)));
        assert_eq!(backed.get_pixel(32, 32), plain.get_pixel(32, 32));
        // Away from lattice lines the two renders are identical; only pixels
        // the lattice actually touched may differ (background showing through
        // or translucent strokes blending over it)
        let mut lattice_only = cleared(64, 64);
        draw_hex_lattice(&mut lattice_only, 24.0);
        let bg = cleared(64, 64);
        for y in 0..64 {
            for x in 0..64 {
                if lattice_only.get_pixel(x, y) == bg.get_pixel(x, y) {
                    assert_eq!(backed.get_pixel(x, y), plain.get_pixel(x, y));
                }
            }
        }
        // And the lattice still shows through somewhere
        assert_ne!(backed.as_bytes(), plain.as_bytes());
    }

    #[test]
    fn overlays_add_rather_than_erase() {
        // With an overlay enabled the pass must still contain drawing; a
        // quick sanity check that enabling each flag changes the output
        for flag in 0..3 {
            let mut plain = PixelBuffer::with_size(64, 64);
            let mut overlaid = PixelBuffer::with_size(64, 64);
            let mut cfg = test_config();
            draw_mandala(&mut plain, &cfg);
            match flag {
                0 => cfg.flower_of_life = true,
                1 => cfg.golden_spiral = true,
                _ => cfg.fractal_mode = true,
            }
            draw_mandala(&mut overlaid, &cfg);
            assert_ne!(plain.as_bytes(), overlaid.as_bytes());
        }
    }
}
