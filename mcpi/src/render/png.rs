//! PNG scatter-plot renderer

use std::io::Cursor;

use base64::Engine;
use image::{ImageFormat, Rgb, RgbImage};
use tracing::debug;

use super::{RenderConfig, RenderError, SnapshotRenderer};
use crate::domain::{Frame, Sample, Snapshot};

const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);
const GRID: Rgb<u8> = Rgb([220, 220, 220]);
const AXIS: Rgb<u8> = Rgb([0, 0, 0]);
const INNER: Rgb<u8> = Rgb([255, 0, 0]);
const OUTER: Rgb<u8> = Rgb([0, 0, 255]);

/// Grid lines per axis over [0, 1]
const GRID_DIVISIONS: u32 = 10;

/// Smallest plot area that still shows a grid
const MIN_PLOT_PX: u32 = 16;

/// Renders both classes as a scatter plot over the unit square
pub struct PngRenderer {
    config: RenderConfig,
}

impl PngRenderer {
    pub fn new(config: RenderConfig) -> Self {
        debug!(?config, "PngRenderer::new: called");
        Self { config }
    }

    /// Side length of the plot area in pixels
    fn plot_px(&self) -> Result<u32, RenderError> {
        // Margins come from the config file and may be arbitrarily large
        let margins = self.config.margin_px.checked_mul(2);
        let min = margins.and_then(|m| m.checked_add(MIN_PLOT_PX));
        match (margins, min) {
            (Some(margins), Some(min)) if self.config.size_px >= min => Ok(self.config.size_px - margins),
            _ => Err(RenderError::InvalidSize {
                size: self.config.size_px,
                min: min.unwrap_or(u32::MAX),
            }),
        }
    }

    fn draw_frame(&self, img: &mut RgbImage, plot: u32) {
        let m = self.config.margin_px;
        for i in 0..=GRID_DIVISIONS {
            let offset = m + i * (plot - 1) / GRID_DIVISIONS;
            let color = if i == 0 || i == GRID_DIVISIONS { AXIS } else { GRID };
            for t in m..m + plot {
                img.put_pixel(offset, t, color);
                img.put_pixel(t, offset, color);
            }
        }
    }

    fn draw_points(&self, img: &mut RgbImage, plot: u32, points: &[Sample], color: Rgb<u8>) {
        let m = self.config.margin_px as i64;
        let r = self.config.point_radius_px.min(plot) as i64;
        let span = (plot - 1) as f64;
        let size = self.config.size_px as i64;

        for p in points {
            // Clip to [0, 1]; NaN fails both comparisons and is skipped too
            if !(0.0..=1.0).contains(&p.x) || !(0.0..=1.0).contains(&p.y) {
                continue;
            }
            let cx = m + (p.x * span).round() as i64;
            // Image rows grow downwards, y grows upwards
            let cy = m + ((1.0 - p.y) * span).round() as i64;

            for dy in -r..=r {
                for dx in -r..=r {
                    if dx * dx + dy * dy > r * r {
                        continue;
                    }
                    let (x, y) = (cx + dx, cy + dy);
                    if (0..size).contains(&x) && (0..size).contains(&y) {
                        img.put_pixel(x as u32, y as u32, color);
                    }
                }
            }
        }
    }

    /// Render the frame to raw PNG bytes
    pub fn render_png(&self, frame: &Frame<'_>) -> Result<Vec<u8>, RenderError> {
        let plot = self.plot_px()?;
        let size = self.config.size_px;

        let mut img = RgbImage::from_pixel(size, size, BACKGROUND);
        self.draw_frame(&mut img, plot);
        self.draw_points(&mut img, plot, frame.drawn_outer(), OUTER);
        self.draw_points(&mut img, plot, frame.drawn_inner(), INNER);

        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
        debug!(n = frame.n, bytes = bytes.len(), "PngRenderer::render_png: encoded");
        Ok(bytes)
    }
}

impl Default for PngRenderer {
    fn default() -> Self {
        Self::new(RenderConfig::default())
    }
}

impl SnapshotRenderer for PngRenderer {
    fn render(&self, frame: &Frame<'_>) -> Result<Snapshot, RenderError> {
        let bytes = self.render_png(frame)?;
        let plot = base64::engine::general_purpose::STANDARD.encode(bytes);
        Ok(frame.snapshot(plot))
    }
}
