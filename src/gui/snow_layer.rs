//! Snow overlay for the hero area
//!
//! Owns the particle field and the pixel buffer it is painted into. The
//! field is rebuilt once the hero area stops changing size.

use crate::MainWindow;
use pullcord::config::HeroConfig;
use pullcord::snow::{MaskRect, SnowField, TextMask};
use slint::{Image, Rgba8Pixel, SharedPixelBuffer};
use tracing::{debug, info, warn};

/// Snow field plus its render target
pub struct SnowLayer {
    hero: HeroConfig,
    field: Option<SnowField>,
    buffer: SharedPixelBuffer<Rgba8Pixel>,
    size: (u32, u32),
}

impl SnowLayer {
    /// Inactive until the first [`SnowLayer::rebuild`]
    pub fn new(hero: HeroConfig) -> Self {
        Self {
            hero,
            field: None,
            buffer: SharedPixelBuffer::new(0, 0),
            size: (0, 0),
        }
    }

    /// Current hero size in whole pixels
    pub fn hero_size(window: &MainWindow) -> (u32, u32) {
        (
            window.get_hero_width().max(0.0) as u32,
            window.get_hero_height().max(0.0) as u32,
        )
    }

    /// Size the field was last built for
    pub const fn size(&self) -> (u32, u32) {
        self.size
    }

    /// Rebuild the field for the window's current hero size
    pub fn rebuild(&mut self, window: &MainWindow) {
        let (width, height) = Self::hero_size(window);
        self.size = (width, height);
        if width == 0 || height == 0 {
            self.field = None;
            return;
        }

        let mask = self.build_mask(window, width as usize, height as usize);
        match self.field.as_mut() {
            Some(field) => field.resize(width as usize, height as usize, Some(mask)),
            None => {
                self.field = Some(SnowField::new(
                    width as usize,
                    height as usize,
                    Some(mask),
                    self.hero.snow,
                ));
            }
        }
        self.buffer = SharedPixelBuffer::new(width, height);
        info!("Snow layer sized to {}x{}", width, height);
    }

    fn build_mask(&self, window: &MainWindow, width: usize, height: usize) -> TextMask {
        if let Some(path) = &self.hero.title_mask {
            match TextMask::from_image_path(path, width, height) {
                Ok(mask) => return mask,
                Err(e) => warn!("Title mask unavailable, using title bounds: {}", e),
            }
        }

        debug!("Building snow mask from title bounds");
        TextMask::from_rects(
            width,
            height,
            &[MaskRect {
                x: f64::from(window.get_title_x()),
                y: f64::from(window.get_title_y()),
                width: f64::from(window.get_title_width()),
                height: f64::from(window.get_title_height()),
            }],
        )
    }

    /// Advance one frame and publish the new image
    pub fn tick(&mut self, window: &MainWindow) {
        let Some(field) = self.field.as_mut() else {
            return;
        };
        field.step();
        field.render_rgba(self.buffer.make_mut_bytes(), self.size.0 as usize);
        window.set_snow_layer(Image::from_rgba8(self.buffer.clone()));
    }
}
