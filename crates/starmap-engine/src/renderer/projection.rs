//! Equirectangular sky projection.
//!
//! A flat star chart, not a horizon view: right ascension sweeps the full
//! width left to right, declination runs +90° at the top to -90° at the
//! bottom. No distortion correction and no wraparound; `ra` is expected in
//! [0, 360) already. Out-of-range input lands off-screen.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Drawing surface geometry in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    /// Device pixel ratio; the backing store is `width * dpr` wide.
    pub dpr: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            dpr: 1.0,
        }
    }

    pub fn with_dpr(mut self, dpr: f32) -> Self {
        self.dpr = if dpr > 0.0 { dpr } else { 1.0 };
        self
    }

    /// Backing store size in physical pixels.
    pub fn backing_size(&self) -> (u32, u32) {
        (
            (self.width * self.dpr).round().max(0.0) as u32,
            (self.height * self.dpr).round().max(0.0) as u32,
        )
    }

    /// Project celestial coordinates (degrees) into this viewport.
    pub fn project(&self, ra: f32, dec: f32) -> Vec2 {
        project(ra, dec, self.width, self.height)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(800.0, 600.0)
    }
}

/// `x = ra / 360 * width`, `y = (90 - dec) / 180 * height`.
pub fn project(ra: f32, dec: f32, width: f32, height: f32) -> Vec2 {
    Vec2::new((ra / 360.0) * width, ((90.0 - dec) / 180.0) * height)
}
