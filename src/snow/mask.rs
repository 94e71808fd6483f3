//! Title collision mask
//!
//! Snow settles where the hero title is drawn. The mask is a per-pixel
//! boolean grid over the snow field, built from an RGBA raster of the title
//! (a pixel counts when its alpha exceeds [`ALPHA_THRESHOLD`]) or, when no
//! raster is available, from the title's glyph boxes.

use crate::error::{PullcordError, Result};
use image::imageops::FilterType;
use std::path::Path;
use tracing::debug;

/// Minimum alpha for a raster pixel to count as title
pub const ALPHA_THRESHOLD: u8 = 100;

/// Rectangle in field pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaskRect {
    /// Left edge
    pub x: f64,
    /// Top edge
    pub y: f64,
    /// Width
    pub width: f64,
    /// Height
    pub height: f64,
}

/// Boolean pixel grid marking the title
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextMask {
    width: usize,
    height: usize,
    pixels: Vec<bool>,
}

impl TextMask {
    /// Build from RGBA8 pixel data (`width * height * 4` bytes)
    pub fn from_rgba(width: usize, height: usize, data: &[u8]) -> Result<Self> {
        if data.len() != width * height * 4 {
            return Err(PullcordError::MaskError(format!(
                "expected {} bytes for a {width}x{height} raster, got {}",
                width * height * 4,
                data.len()
            )));
        }

        let pixels = data
            .chunks_exact(4)
            .map(|px| px[3] > ALPHA_THRESHOLD)
            .collect();
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Load a title raster from disk, stretched to the field size
    pub fn from_image_path(path: &Path, width: usize, height: usize) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(PullcordError::MaskError("zero-sized field".to_string()));
        }

        let raster = image::open(path)?.to_rgba8();
        let resized = image::imageops::resize(
            &raster,
            width as u32,
            height as u32,
            FilterType::Triangle,
        );
        debug!(
            "Loaded title mask {} ({}x{})",
            path.display(),
            width,
            height
        );
        Self::from_rgba(width, height, resized.as_raw())
    }

    /// Build from filled rectangles (e.g. glyph boxes of the title)
    pub fn from_rects(width: usize, height: usize, rects: &[MaskRect]) -> Self {
        let mut pixels = vec![false; width * height];
        for rect in rects {
            let x0 = rect.x.floor().max(0.0) as usize;
            let y0 = rect.y.floor().max(0.0) as usize;
            let x1 = ((rect.x + rect.width).ceil().max(0.0) as usize).min(width);
            let y1 = ((rect.y + rect.height).ceil().max(0.0) as usize).min(height);
            for y in y0..y1 {
                for x in x0..x1 {
                    pixels[y * width + x] = true;
                }
            }
        }
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Whether the pixel under `(x, y)` belongs to the title
    ///
    /// Coordinates outside the field are never title.
    pub fn is_text_pixel(&self, x: f64, y: f64) -> bool {
        let (ix, iy) = (x.floor(), y.floor());
        if ix < 0.0 || iy < 0.0 {
            return false;
        }
        let (ix, iy) = (ix as usize, iy as usize);
        if ix >= self.width || iy >= self.height {
            return false;
        }
        self.pixels[iy * self.width + ix]
    }

    /// Mask width in pixels
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Mask height in pixels
    pub const fn height(&self) -> usize {
        self.height
    }
}
