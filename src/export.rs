//! High-resolution PNG export
//!
//! Export always renders into a fresh off-screen buffer at the requested
//! size; the interactive window buffer is never shared with an export pass,
//! and the caller's config is never mutated.

use crate::config::MandalaConfig;
use crate::display::PixelBuffer;
use crate::mandala::draw_mandala;
use image::RgbaImage;
use std::path::Path;

/// Render the mandala at an arbitrary resolution into an RGBA image.
/// `width`/`height` override the config's dimensions for this pass only.
pub fn render_to_image(config: &MandalaConfig, width: u32, height: u32) -> RgbaImage {
    let export_config = MandalaConfig {
        width,
        height,
        ..config.clone()
    };

    let mut buffer = PixelBuffer::with_size(width, height);
    draw_mandala(&mut buffer, &export_config);

    let mut img = RgbaImage::new(width, height);
    // Buffer layout is ABGR per pixel (RGBA8888 little-endian)
    for (chunk, pixel) in buffer.as_bytes().chunks_exact(4).zip(img.pixels_mut()) {
        *pixel = image::Rgba([chunk[3], chunk[2], chunk[1], chunk[0]]);
    }
    img
}

/// Render and write a PNG to disk
pub fn export_png(
    config: &MandalaConfig,
    width: u32,
    height: u32,
    path: impl AsRef<Path>,
) -> Result<(), String> {
    let img = render_to_image(config, width, height);
    img.save(path.as_ref())
        .map_err(|e| format!("Failed to write {}: {}", path.as_ref().display(), e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mandala::BACKGROUND;

    #[test]
    fn export_uses_requested_dimensions() {
        let cfg = MandalaConfig::default();
        let img = render_to_image(&cfg, 96, 64);
        assert_eq!(img.width(), 96);
        assert_eq!(img.height(), 64);
    }

    #[test]
    fn export_does_not_mutate_caller_config() {
        let cfg = MandalaConfig {
            width: 800,
            height: 600,
            ..Default::default()
        };
        let before = cfg.clone();
        let _ = render_to_image(&cfg, 2048, 2048);
        assert_eq!(cfg, before);
    }

    #[test]
    fn export_pixels_match_a_direct_render() {
        let cfg = MandalaConfig {
            petals: 8,
            layers: 3,
            ..Default::default()
        };
        let img = render_to_image(&cfg, 64, 64);

        let mut buffer = PixelBuffer::with_size(64, 64);
        draw_mandala(
            &mut buffer,
            &MandalaConfig {
                width: 64,
                height: 64,
                ..cfg
            },
        );

        for (x, y, pixel) in img.enumerate_pixels() {
            let (r, g, b) = buffer.get_pixel(x as i32, y as i32).unwrap();
            assert_eq!((pixel[0], pixel[1], pixel[2]), (r, g, b));
        }
    }

    #[test]
    fn degenerate_config_exports_background_only() {
        let cfg = MandalaConfig {
            layers: 0,
            ..Default::default()
        };
        let img = render_to_image(&cfg, 32, 32);
        for pixel in img.pixels() {
            assert_eq!((pixel[0], pixel[1], pixel[2]), BACKGROUND);
        }
    }
}
