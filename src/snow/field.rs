//! Snow particle field
//!
//! Particles fall at a constant per-frame speed with a little sideways drift.
//! A falling particle over a title pixel has a chance to land and then stays
//! put for good, so the title slowly collects snow. Falling snow is topped up
//! to keep a steady density, and the oldest particles are dropped once the
//! total passes the cap.

use super::mask::TextMask;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use tracing::debug;

/// Snow tunables
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnowSettings {
    /// Initial particles per pixel of field width
    pub initial_density: f64,
    /// Falling particles per pixel of width to maintain
    pub falling_density: f64,
    /// Hard cap on particles, landed included
    pub max_particles: usize,
    /// Chance per frame that a particle over the title lands
    pub land_probability: f64,
    /// Y coordinate new and recycled particles start from
    pub spawn_y: f64,
}

impl Default for SnowSettings {
    fn default() -> Self {
        Self {
            initial_density: 1.0,
            falling_density: 0.6,
            max_particles: 3000,
            land_probability: 0.2,
            spawn_y: -10.0,
        }
    }
}

/// A single snowflake
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnowParticle {
    /// Horizontal position
    pub x: f64,
    /// Vertical position
    pub y: f64,
    /// Side of the drawn square
    pub size: f64,
    /// Horizontal drift per frame
    pub speed_x: f64,
    /// Fall distance per frame
    pub speed_y: f64,
    /// Settled on the title
    pub landed: bool,
}

/// All particles over one hero area
#[derive(Debug)]
pub struct SnowField<R = StdRng> {
    width: f64,
    height: f64,
    settings: SnowSettings,
    mask: Option<TextMask>,
    particles: VecDeque<SnowParticle>,
    rng: R,
}

impl SnowField<StdRng> {
    /// Field seeded from the thread RNG
    pub fn new(width: usize, height: usize, mask: Option<TextMask>, settings: SnowSettings) -> Self {
        Self::with_rng(
            width,
            height,
            mask,
            settings,
            StdRng::from_rng(&mut rand::rng()),
        )
    }
}

impl<R: Rng> SnowField<R> {
    /// Field with an explicit RNG (deterministic in tests)
    pub fn with_rng(
        width: usize,
        height: usize,
        mask: Option<TextMask>,
        settings: SnowSettings,
        rng: R,
    ) -> Self {
        let mut field = Self {
            width: width as f64,
            height: height as f64,
            settings,
            mask,
            particles: VecDeque::new(),
            rng,
        };
        field.populate();
        field
    }

    /// Start over at a new size, e.g. after the hero area was resized
    pub fn resize(&mut self, width: usize, height: usize, mask: Option<TextMask>) {
        self.width = width as f64;
        self.height = height as f64;
        self.mask = mask;
        self.populate();
    }

    fn populate(&mut self) {
        self.particles.clear();
        let count = ((self.width * self.settings.initial_density) as usize)
            .min(self.settings.max_particles);
        for _ in 0..count {
            let particle = self.spawn(true);
            self.particles.push_back(particle);
        }
        debug!(
            "Snow field {}x{} populated with {} particles",
            self.width, self.height, count
        );
    }

    fn spawn(&mut self, anywhere: bool) -> SnowParticle {
        SnowParticle {
            x: self.rng.random::<f64>() * self.width,
            y: if anywhere {
                self.rng.random::<f64>() * self.height
            } else {
                self.settings.spawn_y
            },
            size: self.rng.random::<f64>() * 2.0 + 1.0,
            speed_y: self.rng.random::<f64>() * 3.0 + 2.0,
            speed_x: (self.rng.random::<f64>() - 0.5) * 1.5,
            landed: false,
        }
    }

    /// Advance one frame
    pub fn step(&mut self) {
        if (self.falling_count() as f64) < self.width * self.settings.falling_density {
            let particle = self.spawn(false);
            self.particles.push_back(particle);
        }
        while self.particles.len() > self.settings.max_particles {
            self.particles.pop_front();
        }

        let (width, height) = (self.width, self.height);
        let spawn_y = self.settings.spawn_y;
        let land_probability = self.settings.land_probability;

        for p in self.particles.iter_mut().filter(|p| !p.landed) {
            p.y += p.speed_y;
            p.x += p.speed_x;

            let over_title = self
                .mask
                .as_ref()
                .is_some_and(|mask| mask.is_text_pixel(p.x, p.y));
            if over_title && self.rng.random::<f64>() < land_probability {
                p.landed = true;
            }

            if p.y > height {
                p.y = spawn_y;
                p.x = self.rng.random::<f64>() * width;
            }
            if p.x > width {
                p.x = 0.0;
            }
            if p.x < 0.0 {
                p.x = width;
            }
        }
    }

    /// Paint every particle as a white square into an RGBA8 buffer
    ///
    /// The buffer is cleared to transparent first. `stride` is the buffer
    /// width in pixels; pixels outside the buffer are skipped.
    pub fn render_rgba(&self, buffer: &mut [u8], stride: usize) {
        buffer.fill(0);
        if stride == 0 {
            return;
        }
        let rows = buffer.len() / 4 / stride;

        for p in &self.particles {
            let x0 = p.x.floor().max(0.0) as usize;
            let y0 = p.y.floor().max(0.0) as usize;
            let x1 = ((p.x + p.size).ceil().max(0.0) as usize).min(stride);
            let y1 = ((p.y + p.size).ceil().max(0.0) as usize).min(rows);
            for y in y0..y1 {
                for x in x0..x1 {
                    let i = (y * stride + x) * 4;
                    buffer[i..i + 4].copy_from_slice(&[255, 255, 255, 255]);
                }
            }
        }
    }

    /// Particles still falling
    pub fn falling_count(&self) -> usize {
        self.particles.iter().filter(|p| !p.landed).count()
    }

    /// Particles settled on the title
    pub fn landed_count(&self) -> usize {
        self.particles.len() - self.falling_count()
    }

    /// All particles, oldest first
    pub fn particles(&self) -> impl Iterator<Item = &SnowParticle> {
        self.particles.iter()
    }

    /// Total particle count
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    /// Whether the field holds no particles
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}
