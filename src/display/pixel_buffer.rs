//! RGBA8888 software canvas
//!
//! All mandala drawing lands here. The composition is built from translucent
//! strokes and fills layered over each other, so every primitive blends with
//! an explicit alpha; there is no opaque fast path beyond `clear`.

/// Alpha blend a single color channel
/// Uses fast approximation: (x + 1 + (x >> 8)) >> 8 instead of x / 255
#[inline]
fn blend_channel(src: u8, dst: u8, alpha: u16) -> u8 {
    let result = src as u16 * alpha + dst as u16 * (255 - alpha);
    ((result + 1 + (result >> 8)) >> 8) as u8
}

/// Write ABGR pixel to slice (RGBA8888 little-endian byte order)
#[inline]
fn write_pixel(dest: &mut [u8], r: u8, g: u8, b: u8) {
    dest[0] = 255; // A
    dest[1] = b; // B
    dest[2] = g; // G
    dest[3] = r; // R
}

/// RGBA8888 pixel buffer the whole render pass draws into.
/// One per window, plus a fresh one per export so interactive and export
/// rendering never share a surface.
pub struct PixelBuffer {
    pixels: Vec<u8>,
    width: u32,
    height: u32,
}

impl PixelBuffer {
    /// Create a new pixel buffer with custom resolution
    pub fn with_size(width: u32, height: u32) -> Self {
        Self {
            pixels: vec![0; (width * height * 4) as usize],
            width,
            height,
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Check if coordinates are within bounds
    #[inline]
    fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32
    }

    /// Calculate byte offset for pixel at (x, y)
    #[inline]
    fn pixel_index(&self, x: u32, y: u32) -> usize {
        ((y * self.width + x) * 4) as usize
    }

    /// Clear to a solid opaque color
    pub fn clear(&mut self, r: u8, g: u8, b: u8) {
        for chunk in self.pixels.chunks_exact_mut(4) {
            write_pixel(chunk, r, g, b);
        }
    }

    /// Set a single pixel (bounds checked)
    #[inline]
    pub fn set_pixel(&mut self, x: i32, y: i32, r: u8, g: u8, b: u8) {
        if self.in_bounds(x, y) {
            let idx = self.pixel_index(x as u32, y as u32);
            write_pixel(&mut self.pixels[idx..idx + 4], r, g, b);
        }
    }

    /// Set pixel with alpha blending
    #[inline]
    pub fn blend_pixel(&mut self, x: i32, y: i32, r: u8, g: u8, b: u8, a: u8) {
        if self.in_bounds(x, y) {
            let idx = self.pixel_index(x as u32, y as u32);
            let alpha = a as u16;
            self.pixels[idx] = 255; // A - always opaque
            self.pixels[idx + 1] = blend_channel(b, self.pixels[idx + 1], alpha);
            self.pixels[idx + 2] = blend_channel(g, self.pixels[idx + 2], alpha);
            self.pixels[idx + 3] = blend_channel(r, self.pixels[idx + 3], alpha);
        }
    }

    /// Read a pixel from the buffer (bounds checked)
    /// Returns None if coordinates are out of bounds
    #[inline]
    pub fn get_pixel(&self, x: i32, y: i32) -> Option<(u8, u8, u8)> {
        if self.in_bounds(x, y) {
            let idx = self.pixel_index(x as u32, y as u32);
            Some((
                self.pixels[idx + 3], // R
                self.pixels[idx + 2], // G
                self.pixels[idx + 1], // B
            ))
        } else {
            None
        }
    }

    /// Draw a horizontal span with alpha blending
    pub fn hline_blend(&mut self, x1: i32, x2: i32, y: i32, r: u8, g: u8, b: u8, a: u8) {
        if y < 0 || y >= self.height as i32 {
            return;
        }
        let (x1, x2) = if x1 <= x2 { (x1, x2) } else { (x2, x1) };
        let start = x1.max(0);
        let end = x2.min(self.width as i32 - 1);
        if start > end {
            return;
        }

        let alpha = a as u16;
        let mut idx = self.pixel_index(start as u32, y as u32);
        for _ in start..=end {
            self.pixels[idx] = 255;
            self.pixels[idx + 1] = blend_channel(b, self.pixels[idx + 1], alpha);
            self.pixels[idx + 2] = blend_channel(g, self.pixels[idx + 2], alpha);
            self.pixels[idx + 3] = blend_channel(r, self.pixels[idx + 3], alpha);
            idx += 4;
        }
    }

    /// Draw a line using Bresenham's algorithm, alpha-blended per pixel.
    /// Bounds checking happens in `blend_pixel`; mandala strokes are short
    /// enough that clip-first buys nothing.
    pub fn line_blend(&mut self, x0: f32, y0: f32, x1: f32, y1: f32, r: u8, g: u8, b: u8, a: u8) {
        if !(x0.is_finite() && y0.is_finite() && x1.is_finite() && y1.is_finite()) {
            return;
        }
        let (mut x, mut y) = (x0.round() as i32, y0.round() as i32);
        let (ex, ey) = (x1.round() as i32, y1.round() as i32);

        let dx = (ex - x).abs();
        let dy = -((ey - y).abs());
        let sx = if x < ex { 1i32 } else { -1i32 };
        let sy = if y < ey { 1i32 } else { -1i32 };
        let mut err = dx + dy;

        loop {
            self.blend_pixel(x, y, r, g, b, a);
            if x == ex && y == ey {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    /// Draw a blended line with thickness and rounded ends, built from
    /// parallel offset lines plus cap discs
    pub fn line_thick_blend(
        &mut self,
        x0: f32,
        y0: f32,
        x1: f32,
        y1: f32,
        thickness: i32,
        r: u8,
        g: u8,
        b: u8,
        a: u8,
    ) {
        if thickness <= 1 {
            self.line_blend(x0, y0, x1, y1, r, g, b, a);
            return;
        }

        let dx = x1 - x0;
        let dy = y1 - y0;
        let len = (dx * dx + dy * dy).sqrt();
        if len < 0.001 {
            self.fill_circle_blend(x0.round() as i32, y0.round() as i32, thickness / 2, r, g, b, a);
            return;
        }

        // Perpendicular unit vector
        let px = -dy / len;
        let py = dx / len;

        let half = (thickness - 1) as f32 / 2.0;
        for i in 0..thickness {
            let offset = i as f32 - half;
            let ox = px * offset;
            let oy = py * offset;
            self.line_blend(x0 + ox, y0 + oy, x1 + ox, y1 + oy, r, g, b, a);
        }

        let cap = thickness / 2;
        self.fill_circle_blend(x0.round() as i32, y0.round() as i32, cap, r, g, b, a);
        self.fill_circle_blend(x1.round() as i32, y1.round() as i32, cap, r, g, b, a);
    }

    /// Fill a circle with alpha blending using midpoint spans
    pub fn fill_circle_blend(&mut self, cx: i32, cy: i32, radius: i32, r: u8, g: u8, b: u8, a: u8) {
        if radius <= 0 {
            if radius == 0 {
                self.blend_pixel(cx, cy, r, g, b, a);
            }
            return;
        }

        let mut xi = radius;
        let mut y = 0;
        let mut err = 1 - radius;

        while xi >= y {
            self.hline_blend(cx - xi, cx + xi, cy + y, r, g, b, a);
            if y != 0 {
                self.hline_blend(cx - xi, cx + xi, cy - y, r, g, b, a);
            }
            if xi != y {
                self.hline_blend(cx - y, cx + y, cy + xi, r, g, b, a);
                if y != 0 {
                    self.hline_blend(cx - y, cx + y, cy - xi, r, g, b, a);
                }
            }

            y += 1;
            if err < 0 {
                err += 2 * y + 1;
            } else {
                xi -= 1;
                err += 2 * (y - xi) + 1;
            }
        }
    }

    /// Stroke a circle outline of a given line width, alpha-blended.
    /// Rasterized as an annulus test over the bounding box so fractional
    /// stroke widths and radii come out even instead of leaving moire gaps.
    pub fn draw_ring_blend(
        &mut self,
        cx: f32,
        cy: f32,
        radius: f32,
        line_width: f32,
        r: u8,
        g: u8,
        b: u8,
        a: u8,
    ) {
        if radius <= 0.0 || line_width <= 0.0 {
            return;
        }
        let half = line_width / 2.0;
        let inner = (radius - half).max(0.0);
        let outer = radius + half;
        let inner_sq = inner * inner;
        let outer_sq = outer * outer;

        let y_start = ((cy - outer).floor() as i32).max(0);
        let y_end = ((cy + outer).ceil() as i32).min(self.height as i32 - 1);
        let x_start = ((cx - outer).floor() as i32).max(0);
        let x_end = ((cx + outer).ceil() as i32).min(self.width as i32 - 1);

        for y in y_start..=y_end {
            let dy = y as f32 - cy;
            let dy_sq = dy * dy;
            for x in x_start..=x_end {
                let dx = x as f32 - cx;
                let dist_sq = dx * dx + dy_sq;
                if dist_sq >= inner_sq && dist_sq <= outer_sq {
                    self.blend_pixel(x, y, r, g, b, a);
                }
            }
        }
    }

    /// Fill a polygon with alpha blending using scanline spans
    pub fn fill_polygon_blend(&mut self, vertices: &[(f32, f32)], r: u8, g: u8, b: u8, a: u8) {
        if vertices.len() < 3 {
            return;
        }

        let mut min_y = f32::MAX;
        let mut max_y = f32::MIN;
        for (_, y) in vertices {
            min_y = min_y.min(*y);
            max_y = max_y.max(*y);
        }

        let min_y = (min_y as i32).max(0);
        let max_y = (max_y as i32).min(self.height as i32 - 1);

        // Preallocate intersection buffer (reused per scanline)
        let mut intersections = Vec::with_capacity(vertices.len());
        let n = vertices.len();

        for y in min_y..=max_y {
            intersections.clear();
            let yf = y as f32 + 0.5;

            for i in 0..n {
                let (x1, y1) = vertices[i];
                let (x2, y2) = vertices[(i + 1) % n];

                if (y1 <= yf && y2 > yf) || (y2 <= yf && y1 > yf) {
                    let x = x1 + (yf - y1) / (y2 - y1) * (x2 - x1);
                    intersections.push(x as i32);
                }
            }

            intersections.sort_unstable();
            for pair in intersections.chunks_exact(2) {
                self.hline_blend(pair[0], pair[1], y, r, g, b, a);
            }
        }
    }

    /// Horizontal span with per-pixel color+alpha interpolation, blended.
    /// Colors stay f32 until write-out for interpolation precision.
    fn hline_gradient_blend(
        &mut self,
        x1: i32,
        x2: i32,
        y: i32,
        c1: (f32, f32, f32, f32),
        c2: (f32, f32, f32, f32),
    ) {
        if y < 0 || y >= self.height as i32 {
            return;
        }
        let (x1, x2, c1, c2) = if x1 <= x2 {
            (x1, x2, c1, c2)
        } else {
            (x2, x1, c2, c1)
        };

        let start = x1.max(0);
        let end = x2.min(self.width as i32 - 1);
        if start > end {
            return;
        }

        let span = (x2 - x1) as f32;
        if span < 1.0 {
            self.blend_pixel(
                start,
                y,
                c1.0.clamp(0.0, 255.0) as u8,
                c1.1.clamp(0.0, 255.0) as u8,
                c1.2.clamp(0.0, 255.0) as u8,
                c1.3.clamp(0.0, 255.0) as u8,
            );
            return;
        }

        let inv_span = 1.0 / span;
        let dr = (c2.0 - c1.0) * inv_span;
        let dg = (c2.1 - c1.1) * inv_span;
        let db = (c2.2 - c1.2) * inv_span;
        let da = (c2.3 - c1.3) * inv_span;

        let offset = (start - x1) as f32;
        let mut cr = c1.0 + dr * offset;
        let mut cg = c1.1 + dg * offset;
        let mut cb = c1.2 + db * offset;
        let mut ca = c1.3 + da * offset;

        let mut idx = self.pixel_index(start as u32, y as u32);
        for _ in start..=end {
            let alpha = ca.clamp(0.0, 255.0) as u16;
            if alpha > 0 {
                self.pixels[idx] = 255;
                self.pixels[idx + 1] =
                    blend_channel(cb.clamp(0.0, 255.0) as u8, self.pixels[idx + 1], alpha);
                self.pixels[idx + 2] =
                    blend_channel(cg.clamp(0.0, 255.0) as u8, self.pixels[idx + 2], alpha);
                self.pixels[idx + 3] =
                    blend_channel(cr.clamp(0.0, 255.0) as u8, self.pixels[idx + 3], alpha);
            }
            cr += dr;
            cg += dg;
            cb += db;
            ca += da;
            idx += 4;
        }
    }

    /// Polygon fill with per-vertex color and alpha, interpolated across each
    /// scanline. The petal gradients assign vertex colors by radial distance,
    /// which this turns into a smooth radial-looking fill.
    /// Each vertex is (screen_x, screen_y, r, g, b, a).
    pub fn fill_polygon_gradient_blend(&mut self, vertices: &[(f32, f32, u8, u8, u8, u8)]) {
        if vertices.len() < 3 {
            return;
        }

        let mut min_y = f32::MAX;
        let mut max_y = f32::MIN;
        for &(_, y, _, _, _, _) in vertices {
            min_y = min_y.min(y);
            max_y = max_y.max(y);
        }

        let min_y = (min_y as i32).max(0);
        let max_y = (max_y as i32).min(self.height as i32 - 1);

        // Intersections carry (x, r, g, b, a) as f32
        let mut intersections: Vec<(f32, f32, f32, f32, f32)> = Vec::with_capacity(vertices.len());
        let n = vertices.len();

        for y in min_y..=max_y {
            intersections.clear();
            let yf = y as f32 + 0.5;

            for i in 0..n {
                let (x1, y1, r1, g1, b1, a1) = vertices[i];
                let (x2, y2, r2, g2, b2, a2) = vertices[(i + 1) % n];

                if (y1 <= yf && y2 > yf) || (y2 <= yf && y1 > yf) {
                    let t = (yf - y1) / (y2 - y1);
                    let x = x1 + t * (x2 - x1);
                    let r = r1 as f32 + t * (r2 as f32 - r1 as f32);
                    let g = g1 as f32 + t * (g2 as f32 - g1 as f32);
                    let b = b1 as f32 + t * (b2 as f32 - b1 as f32);
                    let a = a1 as f32 + t * (a2 as f32 - a1 as f32);
                    intersections.push((x, r, g, b, a));
                }
            }

            intersections.sort_by(|a, b| a.0.total_cmp(&b.0));

            for pair in intersections.chunks_exact(2) {
                let (x1, r1, g1, b1, a1) = pair[0];
                let (x2, r2, g2, b2, a2) = pair[1];
                self.hline_gradient_blend(
                    x1 as i32,
                    x2 as i32,
                    y,
                    (r1, g1, b1, a1),
                    (r2, g2, b2, a2),
                );
            }
        }
    }

    /// Raw bytes for SDL texture upload, PNG export, and determinism checks
    pub fn as_bytes(&self) -> &[u8] {
        &self.pixels
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clear_fills_every_pixel() {
        let mut buf = PixelBuffer::with_size(4, 4);
        buf.clear(10, 20, 30);
        for x in 0..4 {
            for y in 0..4 {
                assert_eq!(buf.get_pixel(x, y), Some((10, 20, 30)));
            }
        }
    }

    #[test]
    fn out_of_bounds_access_is_harmless() {
        let mut buf = PixelBuffer::with_size(4, 4);
        buf.set_pixel(-1, 0, 255, 255, 255);
        buf.set_pixel(0, 99, 255, 255, 255);
        buf.blend_pixel(99, -5, 255, 255, 255, 128);
        assert_eq!(buf.get_pixel(-1, 0), None);
        assert_eq!(buf.get_pixel(4, 0), None);
    }

    #[test]
    fn full_alpha_blend_replaces_color() {
        let mut buf = PixelBuffer::with_size(2, 2);
        buf.clear(0, 0, 0);
        buf.blend_pixel(0, 0, 200, 100, 50, 255);
        assert_eq!(buf.get_pixel(0, 0), Some((200, 100, 50)));
    }

    #[test]
    fn zero_alpha_blend_changes_nothing() {
        let mut buf = PixelBuffer::with_size(2, 2);
        buf.clear(7, 8, 9);
        buf.blend_pixel(1, 1, 255, 255, 255, 0);
        assert_eq!(buf.get_pixel(1, 1), Some((7, 8, 9)));
    }

    #[test]
    fn ring_stroke_hits_radius_not_center() {
        let mut buf = PixelBuffer::with_size(41, 41);
        buf.clear(0, 0, 0);
        buf.draw_ring_blend(20.0, 20.0, 10.0, 2.0, 255, 255, 255, 255);
        assert_eq!(buf.get_pixel(20, 20), Some((0, 0, 0)));
        assert_eq!(buf.get_pixel(30, 20), Some((255, 255, 255)));
    }

    #[test]
    fn polygon_fill_covers_interior() {
        let mut buf = PixelBuffer::with_size(20, 20);
        buf.clear(0, 0, 0);
        let square = [(2.0, 2.0), (17.0, 2.0), (17.0, 17.0), (2.0, 17.0)];
        buf.fill_polygon_blend(&square, 255, 0, 0, 255);
        assert_eq!(buf.get_pixel(10, 10), Some((255, 0, 0)));
        assert_eq!(buf.get_pixel(0, 0), Some((0, 0, 0)));
    }

    #[test]
    fn gradient_polygon_interpolates_across_span() {
        let mut buf = PixelBuffer::with_size(34, 12);
        buf.clear(0, 0, 0);
        // Left edge black, right edge bright red, fully opaque
        let quad = [
            (1.0, 1.0, 0, 0, 0, 255),
            (32.0, 1.0, 255, 0, 0, 255),
            (32.0, 10.0, 255, 0, 0, 255),
            (1.0, 10.0, 0, 0, 0, 255),
        ];
        buf.fill_polygon_gradient_blend(&quad);
        let (r_left, _, _) = buf.get_pixel(3, 5).unwrap();
        let (r_mid, _, _) = buf.get_pixel(16, 5).unwrap();
        let (r_right, _, _) = buf.get_pixel(30, 5).unwrap();
        assert!(r_left < r_mid && r_mid < r_right);
    }
}
