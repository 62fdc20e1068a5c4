//! Decorative background stars.
//!
//! In `Shuffle` mode the field is regenerated from a running generator on
//! every redraw, so it twinkles whenever the map repaints. `Frozen` seeds a
//! fresh generator from the viewport size instead, giving the same field for
//! the same canvas size.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::config::StarmapConfig;
use crate::renderer::projection::Viewport;
use crate::renderer::traits::{Color, DrawSurface};
use crate::systems::rng::Rng;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StarfieldMode {
    #[default]
    Shuffle,
    Frozen,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BackgroundStar {
    pub pos: Vec2,
    pub radius: f32,
    pub alpha: f32,
}

pub struct Starfield {
    mode: StarfieldMode,
    rng: Rng,
}

impl Starfield {
    pub fn new(mode: StarfieldMode, seed: u64) -> Self {
        Self {
            mode,
            rng: Rng::new(seed),
        }
    }

    pub fn from_config(config: &StarmapConfig) -> Self {
        Self::new(config.starfield_mode, config.starfield_seed)
    }

    pub fn mode(&self) -> StarfieldMode {
        self.mode
    }

    /// Produce one field's worth of background stars for `viewport`.
    pub fn generate(&mut self, viewport: &Viewport, config: &StarmapConfig) -> Vec<BackgroundStar> {
        let mut frozen;
        let rng = match self.mode {
            StarfieldMode::Shuffle => &mut self.rng,
            StarfieldMode::Frozen => {
                frozen = Rng::new(viewport_seed(viewport));
                &mut frozen
            }
        };

        (0..config.starfield_count)
            .map(|_| {
                let x = rng.next_f32() * viewport.width;
                let y = rng.next_f32() * viewport.height;
                let radius = rng.next_f32() * config.starfield_max_radius;
                let alpha = rng.range(config.starfield_min_alpha, config.starfield_max_alpha);
                BackgroundStar {
                    pos: Vec2::new(x, y),
                    radius,
                    alpha,
                }
            })
            .collect()
    }

    /// Generate and paint a field in white.
    pub fn draw<S: DrawSurface + ?Sized>(
        &mut self,
        surface: &mut S,
        viewport: &Viewport,
        config: &StarmapConfig,
    ) {
        for star in self.generate(viewport, config) {
            surface.fill_circle(star.pos, star.radius, Color::WHITE.with_alpha(star.alpha));
        }
    }
}

/// FNV-1a over the viewport's width and height bits.
pub fn viewport_seed(viewport: &Viewport) -> u64 {
    let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
    for word in [viewport.width.to_bits(), viewport.height.to_bits()] {
        for byte in word.to_le_bytes() {
            hash ^= byte as u64;
            hash = hash.wrapping_mul(0x0000_0100_0000_01b3);
        }
    }
    hash
}
