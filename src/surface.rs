// src/surface.rs

use crate::vector::Vec2;
use image::{Rgba, RgbaImage};
use rayon::prelude::*;

pub type Color = Rgba<u8>;

pub const TRANSPARENT: Color = Rgba([0, 0, 0, 0]);
pub const BLACK: Color = Rgba([0, 0, 0, 255]);

pub fn rgba(r: u8, g: u8, b: u8, a: u8) -> Color {
    Rgba([r, g, b, a])
}

/// Same color with its alpha replaced.
pub fn with_alpha(color: Color, alpha: u8) -> Color {
    Rgba([color.0[0], color.0[1], color.0[2], alpha])
}

/// Rotation followed by translation, mapping body-local coordinates to
/// surface coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub origin: Vec2,
    pub rotation: f64,
}

impl Transform {
    pub fn new(origin: Vec2, rotation: f64) -> Self {
        Self { origin, rotation }
    }

    pub fn apply(&self, local: Vec2) -> Vec2 {
        let (sin, cos) = self.rotation.sin_cos();
        Vec2::new(
            cos * local.x - sin * local.y,
            sin * local.x + cos * local.y,
        ) + self.origin
    }
}

/// Source-over blend of one RGBA pixel `src` onto `dst`.
#[inline]
fn blend(dst: &mut [u8], src: &[u8]) {
    let sa = src[3] as f32 / 255.0;
    if sa <= 0.0 {
        return;
    }
    let da = dst[3] as f32 / 255.0;
    let out_a = sa + da * (1.0 - sa);
    for c in 0..3 {
        let mixed = (src[c] as f32 * sa + dst[c] as f32 * da * (1.0 - sa)) / out_a;
        dst[c] = mixed.round().clamp(0.0, 255.0) as u8;
    }
    dst[3] = (out_a * 255.0).round().clamp(0.0, 255.0) as u8;
}

#[inline]
fn edge(a: Vec2, b: Vec2, p: Vec2) -> f64 {
    (b.x - a.x) * (p.y - a.y) - (b.y - a.y) * (p.x - a.x)
}

/// RGBA drawing target with straight alpha. Shapes are sampled at pixel
/// centers.
#[derive(Debug, Clone)]
pub struct Surface {
    image: RgbaImage,
}

impl Surface {
    /// A fully transparent surface.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbaImage::new(width, height),
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn pixel(&self, x: u32, y: u32) -> Color {
        *self.image.get_pixel(x, y)
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width() as f64 / 2.0, self.height() as f64 / 2.0)
    }

    pub fn clear(&mut self) {
        self.fill(TRANSPARENT);
    }

    /// Overwrite every pixel, ignoring what was there.
    pub fn fill(&mut self, color: Color) {
        for p in self.image.pixels_mut() {
            *p = color;
        }
    }

    /// Blend `color` into a pixel. Out-of-bounds coordinates are ignored.
    pub fn blend_pixel(&mut self, x: i64, y: i64, color: Color) {
        if x < 0 || y < 0 || x >= self.width() as i64 || y >= self.height() as i64 {
            return;
        }
        let p = self.image.get_pixel_mut(x as u32, y as u32);
        blend(&mut p.0, &color.0);
    }

    pub fn point(&mut self, at: Vec2, color: Color) {
        self.blend_pixel(at.x.floor() as i64, at.y.floor() as i64, color);
    }

    /// Inclusive pixel bounds of the square of half-size `extent` around
    /// `center`, clipped to the surface. `None` when fully outside.
    fn clipped_box(&self, center: Vec2, extent: f64) -> Option<(i64, i64, i64, i64)> {
        let x0 = ((center.x - extent).floor() as i64).max(0);
        let y0 = ((center.y - extent).floor() as i64).max(0);
        let x1 = ((center.x + extent).ceil() as i64).min(self.width() as i64 - 1);
        let y1 = ((center.y + extent).ceil() as i64).min(self.height() as i64 - 1);
        if x0 > x1 || y0 > y1 {
            None
        } else {
            Some((x0, y0, x1, y1))
        }
    }

    /// Filled disc. Radii below one pixel collapse to a single point so that
    /// tiny discs stay visible.
    pub fn fill_circle(&mut self, center: Vec2, radius: f64, color: Color) {
        if !(radius > 0.0) {
            return;
        }
        if radius < 1.0 {
            self.point(center, color);
            return;
        }
        let Some((x0, y0, x1, y1)) = self.clipped_box(center, radius) else {
            return;
        };
        let r2 = radius * radius;
        for y in y0..=y1 {
            let dy = y as f64 + 0.5 - center.y;
            for x in x0..=x1 {
                let dx = x as f64 + 0.5 - center.x;
                if dx * dx + dy * dy <= r2 {
                    self.blend_pixel(x, y, color);
                }
            }
        }
    }

    /// Circle outline of the given stroke `weight`, centered on `radius`.
    pub fn stroke_circle(&mut self, center: Vec2, radius: f64, weight: f64, color: Color) {
        if !(radius >= 0.0) || !(weight > 0.0) {
            return;
        }
        let half = weight / 2.0;
        let Some((x0, y0, x1, y1)) = self.clipped_box(center, radius + half) else {
            return;
        };
        for y in y0..=y1 {
            let dy = y as f64 + 0.5 - center.y;
            for x in x0..=x1 {
                let dx = x as f64 + 0.5 - center.x;
                let d = (dx * dx + dy * dy).sqrt();
                if (d - radius).abs() <= half {
                    self.blend_pixel(x, y, color);
                }
            }
        }
    }

    pub fn fill_triangle(&mut self, corners: [Vec2; 3], color: Color) {
        let [a, b, c] = corners;
        let area = edge(a, b, c);
        if area == 0.0 {
            return;
        }
        let lo = Vec2::new(a.x.min(b.x).min(c.x), a.y.min(b.y).min(c.y));
        let hi = Vec2::new(a.x.max(b.x).max(c.x), a.y.max(b.y).max(c.y));
        let mid = (lo + hi) / 2.0;
        let extent = (hi.x - lo.x).max(hi.y - lo.y) / 2.0;
        let Some((x0, y0, x1, y1)) = self.clipped_box(mid, extent) else {
            return;
        };
        for y in y0..=y1 {
            for x in x0..=x1 {
                let p = Vec2::new(x as f64 + 0.5, y as f64 + 0.5);
                let w0 = edge(b, c, p);
                let w1 = edge(c, a, p);
                let w2 = edge(a, b, p);
                let inside = if area > 0.0 {
                    w0 >= 0.0 && w1 >= 0.0 && w2 >= 0.0
                } else {
                    w0 <= 0.0 && w1 <= 0.0 && w2 <= 0.0
                };
                if inside {
                    self.blend_pixel(x, y, color);
                }
            }
        }
    }

    /// One-pixel line; each covered pixel is blended once.
    pub fn stroke_line(&mut self, from: Vec2, to: Vec2, color: Color) {
        let delta = to - from;
        let steps = (delta.x.abs().max(delta.y.abs()) * 2.0).ceil().max(1.0) as usize;
        let mut last = None;
        for i in 0..=steps {
            let p = from + delta * (i as f64 / steps as f64);
            let cell = (p.x.floor() as i64, p.y.floor() as i64);
            if last != Some(cell) {
                self.blend_pixel(cell.0, cell.1, color);
                last = Some(cell);
            }
        }
    }

    pub fn stroke_triangle(&mut self, corners: [Vec2; 3], color: Color) {
        let [a, b, c] = corners;
        self.stroke_line(a, b, color);
        self.stroke_line(b, c, color);
        self.stroke_line(c, a, color);
    }

    /// Composite `src` over this surface (source-over). Both surfaces must
    /// have the same size; a mismatched `src` is ignored.
    pub fn draw_over(&mut self, src: &Surface) {
        if src.width() != self.width() || src.height() != self.height() || self.width() == 0 {
            log::warn!(
                "skipping composite of {}x{} layer onto {}x{} surface",
                src.width(),
                src.height(),
                self.width(),
                self.height()
            );
            return;
        }
        let stride = self.width() as usize * 4;
        let dst: &mut [u8] = &mut self.image;
        let src: &[u8] = &src.image;
        dst.par_chunks_mut(stride)
            .zip(src.par_chunks(stride))
            .for_each(|(dst_row, src_row)| {
                for (d, s) in dst_row.chunks_exact_mut(4).zip(src_row.chunks_exact(4)) {
                    blend(d, s);
                }
            });
    }

    /// Number of pixels with non-zero alpha.
    pub fn painted_pixels(&self) -> usize {
        self.image.pixels().filter(|p| p.0[3] > 0).count()
    }

    pub fn is_blank(&self) -> bool {
        self.image.pixels().all(|p| p.0[3] == 0)
    }
}
