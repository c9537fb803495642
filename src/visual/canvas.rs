//! Minimal raster drawing on top of `image::RgbImage`

use super::geometry::Point;
use super::palette::BACKGROUND;
use anyhow::{Context, Result};
use image::{ImageFormat, Rgb, RgbImage};
use std::fs;
use std::path::Path;

pub struct Canvas {
    image: RgbImage,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbImage::from_pixel(width, height, BACKGROUND),
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn pixel(&self, x: u32, y: u32) -> Rgb<u8> {
        *self.image.get_pixel(x, y)
    }

    /// Alpha-blend one pixel, ignoring anything off canvas
    pub fn blend(&mut self, x: i64, y: i64, color: Rgb<u8>, alpha: f32) {
        if x < 0 || y < 0 || x >= self.width() as i64 || y >= self.height() as i64 {
            return;
        }
        let a = alpha.clamp(0.0, 1.0);
        let dst = self.image.get_pixel_mut(x as u32, y as u32);
        for c in 0..3 {
            let mixed = color[c] as f32 * a + dst[c] as f32 * (1.0 - a);
            dst[c] = mixed.round() as u8;
        }
    }

    pub fn fill_rect(&mut self, x0: f32, y0: f32, x1: f32, y1: f32, color: Rgb<u8>, alpha: f32) {
        let (xa, xb) = (x0.min(x1).floor() as i64, x0.max(x1).ceil() as i64);
        let (ya, yb) = (y0.min(y1).floor() as i64, y0.max(y1).ceil() as i64);
        for y in ya..yb {
            for x in xa..xb {
                self.blend(x, y, color, alpha);
            }
        }
    }

    /// Line of the given width, stamped along its length
    pub fn line(&mut self, from: Point, to: Point, color: Rgb<u8>, alpha: f32, width: f32) {
        let (dx, dy) = (to.0 - from.0, to.1 - from.1);
        let steps = dx.abs().max(dy.abs()).ceil().max(1.0) as usize;
        let half = (width / 2.0).max(0.5);
        let mut last = None;
        for i in 0..=steps {
            let t = i as f32 / steps as f32;
            let (cx, cy) = (from.0 + dx * t, from.1 + dy * t);
            let key = (cx.round() as i64, cy.round() as i64);
            if last == Some(key) {
                continue;
            }
            last = Some(key);
            self.stamp(cx, cy, half, color, alpha);
        }
    }

    pub fn dashed_line(&mut self, from: Point, to: Point, color: Rgb<u8>, alpha: f32, dash: f32) {
        let (dx, dy) = (to.0 - from.0, to.1 - from.1);
        let length = (dx * dx + dy * dy).sqrt();
        if length == 0.0 || dash <= 0.0 {
            return;
        }
        let mut pos = 0.0;
        while pos < length {
            let end = (pos + dash).min(length);
            let a = (from.0 + dx * pos / length, from.1 + dy * pos / length);
            let b = (from.0 + dx * end / length, from.1 + dy * end / length);
            self.line(a, b, color, alpha, 1.0);
            pos += dash * 2.0;
        }
    }

    pub fn polyline(&mut self, points: &[Point], closed: bool, color: Rgb<u8>, alpha: f32, width: f32) {
        for pair in points.windows(2) {
            self.line(pair[0], pair[1], color, alpha, width);
        }
        if closed && points.len() > 2 {
            self.line(points[points.len() - 1], points[0], color, alpha, width);
        }
    }

    /// Even-odd scanline fill sampled at pixel centres
    pub fn fill_polygon(&mut self, points: &[Point], color: Rgb<u8>, alpha: f32) {
        if points.len() < 3 {
            return;
        }
        let ys = points.iter().map(|p| p.1);
        let top = ys.clone().fold(f32::INFINITY, f32::min).floor().max(0.0) as i64;
        let bottom = ys.fold(f32::NEG_INFINITY, f32::max).ceil().min(self.height() as f32) as i64;

        let mut crossings = Vec::new();
        for y in top..bottom {
            let sy = y as f32 + 0.5;
            crossings.clear();
            for i in 0..points.len() {
                let (a, b) = (points[i], points[(i + 1) % points.len()]);
                if (a.1 <= sy && b.1 > sy) || (b.1 <= sy && a.1 > sy) {
                    crossings.push(a.0 + (sy - a.1) / (b.1 - a.1) * (b.0 - a.0));
                }
            }
            crossings.sort_by(f32::total_cmp);
            for span in crossings.chunks_exact(2) {
                let start = (span[0] - 0.5).ceil() as i64;
                let end = (span[1] - 0.5).floor() as i64;
                for x in start..=end {
                    self.blend(x, y, color, alpha);
                }
            }
        }
    }

    pub fn fill_circle(&mut self, center: Point, radius: f32, color: Rgb<u8>, alpha: f32) {
        self.stamp(center.0, center.1, radius, color, alpha);
    }

    fn stamp(&mut self, cx: f32, cy: f32, radius: f32, color: Rgb<u8>, alpha: f32) {
        if radius <= 1.0 {
            self.blend(cx.floor() as i64, cy.floor() as i64, color, alpha);
            return;
        }
        let r2 = radius * radius;
        let (xa, xb) = ((cx - radius).floor() as i64, (cx + radius).ceil() as i64);
        let (ya, yb) = ((cy - radius).floor() as i64, (cy + radius).ceil() as i64);
        for y in ya..=yb {
            for x in xa..=xb {
                let (px, py) = (x as f32 + 0.5 - cx, y as f32 + 0.5 - cy);
                if px * px + py * py <= r2 {
                    self.blend(x, y, color, alpha);
                }
            }
        }
    }

    /// Write as PNG, creating the parent directory
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {:?}", parent))?;
        }
        self.image
            .save_with_format(path, ImageFormat::Png)
            .with_context(|| format!("Failed to write image: {:?}", path))?;
        log::debug!("Saved {}x{} image to {:?}", self.width(), self.height(), path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::visual::palette::{GOLD, WHITE};

    #[test]
    fn test_blend_half() {
        let mut canvas = Canvas::new(2, 2);
        canvas.blend(0, 0, WHITE, 0.5);
        assert_eq!(canvas.pixel(0, 0), Rgb([128, 128, 136]));
        // off canvas is ignored
        canvas.blend(-1, 5, WHITE, 1.0);
        assert_eq!(canvas.pixel(1, 1), BACKGROUND);
    }

    #[test]
    fn test_fill_polygon_square() {
        let mut canvas = Canvas::new(10, 10);
        canvas.fill_polygon(&[(2.0, 2.0), (6.0, 2.0), (6.0, 6.0), (2.0, 6.0)], GOLD, 1.0);
        assert_eq!(canvas.pixel(3, 3), GOLD);
        assert_eq!(canvas.pixel(5, 5), GOLD);
        assert_eq!(canvas.pixel(6, 6), BACKGROUND);
        assert_eq!(canvas.pixel(1, 3), BACKGROUND);
    }

    #[test]
    fn test_line_and_save() {
        let mut canvas = Canvas::new(20, 20);
        canvas.line((0.0, 10.0), (19.0, 10.0), WHITE, 1.0, 1.0);
        assert_eq!(canvas.pixel(10, 10), WHITE);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/line.png");
        canvas.save(&path).unwrap();
        let reloaded = image::open(&path).unwrap().to_rgb8();
        assert_eq!(reloaded.get_pixel(10, 10), &WHITE);
    }
}
