//! Draw surface contract.
//!
//! The sky renderer never touches a canvas directly. It issues a small set of
//! 2D primitives against a [`DrawSurface`], and each host picks a backend:
//! the web crate draws straight onto a `CanvasRenderingContext2d`,
//! [`CommandList`](super::command::CommandList) records calls for tests and
//! JSON replay, and `VectorSurface` tessellates into a GPU vertex buffer.
//!
//! All coordinates are CSS pixels with the origin at the top-left corner.

use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::StarmapError;

/// RGBA color, each channel in 0.0 - 1.0.
///
/// Serialized as a hex string (`#RRGGBBAA`) so config files stay readable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    /// Create a color from RGBA components (0.0 - 1.0).
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Create a color from RGB u8 values (0-255) with full opacity.
    pub fn rgb8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a: 1.0,
        }
    }

    /// Create a color with the given alpha value.
    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// Parse `#RRGGBB` or `#RRGGBBAA`.
    pub fn from_hex(s: &str) -> Result<Self, StarmapError> {
        let invalid = || StarmapError::InvalidColor(s.to_string());
        let hex = s.strip_prefix('#').ok_or_else(invalid)?;
        if !(hex.len() == 6 || hex.len() == 8) || !hex.is_ascii() {
            return Err(invalid());
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());

        let mut color = Self::rgb8(channel(0)?, channel(2)?, channel(4)?);
        if hex.len() == 8 {
            color.a = channel(6)? as f32 / 255.0;
        }
        Ok(color)
    }

    /// Hex form with alpha, e.g. `#FFD700FF`.
    pub fn to_hex(&self) -> String {
        format!(
            "#{:02X}{:02X}{:02X}{:02X}",
            to_u8(self.r),
            to_u8(self.g),
            to_u8(self.b),
            to_u8(self.a)
        )
    }

    /// CSS `rgba()` form accepted by `fillStyle` / `strokeStyle`.
    pub fn to_css(&self) -> String {
        format!(
            "rgba({}, {}, {}, {})",
            to_u8(self.r),
            to_u8(self.g),
            to_u8(self.b),
            self.a.clamp(0.0, 1.0)
        )
    }

    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0, 1.0);
}

fn to_u8(channel: f32) -> u8 {
    (channel.clamp(0.0, 1.0) * 255.0).round() as u8
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

impl TryFrom<String> for Color {
    type Error = StarmapError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Color::from_hex(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}

/// Horizontal anchor for text, matching the canvas `textAlign` values we use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

impl TextAlign {
    pub fn as_css(&self) -> &'static str {
        match self {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
            TextAlign::Right => "right",
        }
    }
}

/// Font used for labels and readouts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontSpec {
    /// Size in CSS pixels.
    pub size_px: f32,
    /// CSS font family.
    pub family: String,
}

impl FontSpec {
    pub fn new(size_px: f32, family: impl Into<String>) -> Self {
        Self {
            size_px,
            family: family.into(),
        }
    }
}

impl fmt::Display for FontSpec {
    /// CSS shorthand, e.g. `12px Orbitron`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}px {}", self.size_px, self.family)
    }
}

/// 2D drawing backend the sky renderer paints onto.
///
/// Implementations draw in call order; later calls occlude earlier ones.
pub trait DrawSurface {
    /// Fill the whole `width` x `height` area with `color`.
    fn clear(&mut self, width: f32, height: f32, color: Color);

    /// Fill a circle. A zero radius may draw nothing.
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color);

    /// Stroke a straight segment.
    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Color);

    /// Draw text with its baseline at `pos.y`, anchored horizontally by `align`.
    fn fill_text(&mut self, text: &str, pos: Vec2, font: &FontSpec, align: TextAlign, color: Color);
}
