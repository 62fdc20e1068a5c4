use serde::{Deserialize, Serialize};

/// Observer position on Earth, degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObserverLocation {
    pub lat: f64,
    pub lng: f64,
}

impl ObserverLocation {
    /// New York City, used when the browser cannot tell us where we are.
    pub const DEFAULT: Self = Self {
        lat: 40.7128,
        lng: -74.0060,
    };

    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Corner readout text, one decimal each: `40.7°, -74.0°`. Ties round
    /// away from zero.
    pub fn readout(&self) -> String {
        format!("{:.1}°, {:.1}°", tenths(self.lat), tenths(self.lng))
    }
}

fn tenths(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

impl Default for ObserverLocation {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// What the host's geolocation call came back with.
#[derive(Debug, Clone, PartialEq)]
pub enum LocationOutcome {
    Resolved { lat: f64, lng: f64 },
    Failed(String),
    Unsupported,
}

/// Location to use plus an optional advisory for the user.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedLocation {
    pub location: ObserverLocation,
    pub advisory: Option<String>,
}

/// Turn a geolocation outcome into a usable location, falling back to
/// `fallback` with a non-blocking advisory message.
pub fn resolve_location(outcome: &LocationOutcome, fallback: ObserverLocation) -> ResolvedLocation {
    match outcome {
        LocationOutcome::Resolved { lat, lng } if lat.is_finite() && lng.is_finite() => {
            ResolvedLocation {
                location: ObserverLocation::new(*lat, *lng),
                advisory: None,
            }
        }
        LocationOutcome::Resolved { .. } | LocationOutcome::Failed(_) => {
            if let LocationOutcome::Failed(reason) = outcome {
                log::warn!("geolocation failed: {}", reason);
            }
            ResolvedLocation {
                location: fallback,
                advisory: Some("Unable to get location. Using default view.".to_string()),
            }
        }
        LocationOutcome::Unsupported => ResolvedLocation {
            location: fallback,
            advisory: Some("Geolocation not supported".to_string()),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn readout_rounds_to_one_decimal() {
        assert_eq!(ObserverLocation::DEFAULT.readout(), "40.7°, -74.0°");
        assert_eq!(ObserverLocation::new(-33.8688, 151.2093).readout(), "-33.9°, 151.2°");
    }

    #[test]
    fn readout_ties_round_away_from_zero() {
        assert_eq!(ObserverLocation::new(12.25, -0.25).readout(), "12.3°, -0.3°");
        assert_eq!(ObserverLocation::new(0.05, -10.75).readout(), "0.1°, -10.8°");
    }

    #[test]
    fn resolved_location_has_no_advisory() {
        let r = resolve_location(
            &LocationOutcome::Resolved { lat: 48.85, lng: 2.35 },
            ObserverLocation::DEFAULT,
        );
        assert_eq!(r.location, ObserverLocation::new(48.85, 2.35));
        assert!(r.advisory.is_none());
    }

    #[test]
    fn failure_falls_back_with_advisory() {
        let r = resolve_location(
            &LocationOutcome::Failed("permission denied".into()),
            ObserverLocation::DEFAULT,
        );
        assert_eq!(r.location, ObserverLocation::DEFAULT);
        assert_eq!(r.advisory.as_deref(), Some("Unable to get location. Using default view."));
    }

    #[test]
    fn unsupported_falls_back_with_advisory() {
        let r = resolve_location(&LocationOutcome::Unsupported, ObserverLocation::DEFAULT);
        assert_eq!(r.location, ObserverLocation::DEFAULT);
        assert_eq!(r.advisory.as_deref(), Some("Geolocation not supported"));
    }

    #[test]
    fn non_finite_coordinates_are_treated_as_failure() {
        let r = resolve_location(
            &LocationOutcome::Resolved { lat: f64::NAN, lng: 0.0 },
            ObserverLocation::DEFAULT,
        );
        assert_eq!(r.location, ObserverLocation::DEFAULT);
        assert!(r.advisory.is_some());
    }
}
