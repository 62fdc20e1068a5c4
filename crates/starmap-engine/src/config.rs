use serde::{Deserialize, Serialize};

use crate::core::location::ObserverLocation;
use crate::error::{Result, StarmapError};
use crate::renderer::traits::{Color, FontSpec};
use crate::systems::starfield::StarfieldMode;

/// Look-and-feel and interaction constants for the sky map.
///
/// Every field has a default, so a config JSON only needs the values it
/// overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StarmapConfig {
    /// Canvas background.
    pub background: Color,

    /// Number of decorative background stars per redraw (default: 200).
    pub starfield_count: usize,
    /// Largest decorative star radius in px (default: 1.5).
    pub starfield_max_radius: f32,
    /// Alpha range of decorative stars (default: 0.2 - 1.0).
    pub starfield_min_alpha: f32,
    pub starfield_max_alpha: f32,
    /// Reshuffle every redraw, or freeze per viewport size.
    pub starfield_mode: StarfieldMode,
    /// Initial seed for the shuffling starfield.
    pub starfield_seed: u64,

    /// Constellation edge stroke.
    pub edge_color: Color,
    pub edge_width: f32,

    /// Star body color.
    pub star_color: Color,
    /// Star body color while hovered.
    pub hover_color: Color,
    /// Glow drawn at twice the star radius.
    pub halo_color: Color,
    /// Stars brighter than this (strictly lower magnitude) get a halo (default: 2.0).
    pub halo_below_magnitude: f32,

    /// Label font, color, and the magnitude below which labels always show (default: 1.5).
    pub label_font: FontSpec,
    pub label_color: Color,
    pub label_below_magnitude: f32,
    /// Gap between the top of a star and its label baseline in px (default: 5).
    pub label_offset: f32,

    /// Location readout font and color.
    pub readout_font: FontSpec,
    pub readout_color: Color,
    /// Readout anchor: `right_inset` px from the right edge, `top` px down.
    pub readout_right_inset: f32,
    pub readout_top: f32,

    /// Pointer must be strictly closer than this to a star, in px (default: 15).
    pub hit_radius: f32,

    /// Used when geolocation fails or is unavailable.
    pub default_location: ObserverLocation,

    /// Console log level for the web bridge ("error" .. "trace").
    pub log_level: String,
}

impl Default for StarmapConfig {
    fn default() -> Self {
        Self {
            background: Color::rgb8(0x0F, 0x0F, 0x1F),
            starfield_count: 200,
            starfield_max_radius: 1.5,
            starfield_min_alpha: 0.2,
            starfield_max_alpha: 1.0,
            starfield_mode: StarfieldMode::Shuffle,
            starfield_seed: 42,
            edge_color: Color::rgb8(0x6B, 0x5B, 0x95),
            edge_width: 1.0,
            star_color: Color::rgb8(0xFF, 0xD7, 0x00),
            hover_color: Color::rgb8(0x00, 0xB7, 0xEB),
            halo_color: Color::rgb8(255, 215, 0).with_alpha(0.3),
            halo_below_magnitude: 2.0,
            label_font: FontSpec::new(12.0, "Orbitron"),
            label_color: Color::WHITE,
            label_below_magnitude: 1.5,
            label_offset: 5.0,
            readout_font: FontSpec::new(10.0, "Orbitron"),
            readout_color: Color::rgb8(0x00, 0xB7, 0xEB),
            readout_right_inset: 60.0,
            readout_top: 30.0,
            hit_radius: 15.0,
            default_location: ObserverLocation::DEFAULT,
            log_level: "info".to_string(),
        }
    }
}

impl StarmapConfig {
    /// Parse a config from JSON, filling unspecified fields with defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(StarmapError::ConfigJson)
    }

    /// `log_level` as a `log::Level`, falling back to Info.
    pub fn log_level(&self) -> log::Level {
        self.log_level.parse().unwrap_or(log::Level::Info)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_json_is_the_default() {
        let config = StarmapConfig::from_json("{}").unwrap();
        assert_eq!(config, StarmapConfig::default());
        assert_eq!(config.starfield_count, 200);
        assert_eq!(config.hit_radius, 15.0);
    }

    #[test]
    fn partial_override() {
        let json = r##"{
            "hit_radius": 20.0,
            "star_color": "#FFFFFF",
            "starfield_mode": "frozen",
            "default_location": { "lat": 51.5, "lng": -0.12 }
        }"##;
        let config = StarmapConfig::from_json(json).unwrap();
        assert_eq!(config.hit_radius, 20.0);
        assert_eq!(config.star_color, Color::WHITE);
        assert_eq!(config.starfield_mode, StarfieldMode::Frozen);
        assert_eq!(config.default_location.lat, 51.5);
        assert_eq!(config.edge_width, 1.0);
    }

    #[test]
    fn bad_color_is_a_config_error() {
        let err = StarmapConfig::from_json(r#"{ "background": "navy" }"#).unwrap_err();
        assert!(matches!(err, StarmapError::ConfigJson(_)));
    }

    #[test]
    fn log_level_parsing() {
        let mut config = StarmapConfig::default();
        assert_eq!(config.log_level(), log::Level::Info);
        config.log_level = "debug".into();
        assert_eq!(config.log_level(), log::Level::Debug);
        config.log_level = "loud".into();
        assert_eq!(config.log_level(), log::Level::Info);
    }
}
