use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{Result, StarmapError};

/// A celestial point source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Star {
    /// Display name. Unique within a catalog; constellation edges refer to it.
    pub name: String,
    /// Right ascension in degrees, [0, 360).
    pub ra: f32,
    /// Declination in degrees, [-90, 90].
    pub dec: f32,
    /// Apparent magnitude. Lower is brighter.
    pub magnitude: f32,
    /// Light-years. Informational only.
    #[serde(default)]
    pub distance: f32,
    #[serde(default)]
    pub description: String,
}

impl Star {
    pub fn new(name: impl Into<String>, ra: f32, dec: f32, magnitude: f32) -> Self {
        Self {
            name: name.into(),
            ra,
            dec,
            magnitude,
            distance: 0.0,
            description: String::new(),
        }
    }

    pub fn with_distance(mut self, distance: f32) -> Self {
        self.distance = distance;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// A line between two stars, by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub from: String,
    pub to: String,
}

impl Edge {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

/// A named set of edges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Constellation {
    pub name: String,
    #[serde(alias = "lines")]
    pub edges: Vec<Edge>,
}

impl Constellation {
    pub fn new(name: impl Into<String>, edges: Vec<Edge>) -> Self {
        Self {
            name: name.into(),
            edges,
        }
    }
}

/// Stars and constellations loaded together.
///
/// Edge endpoints are not checked here: an edge whose star is missing is
/// simply not drawn.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    pub stars: Vec<Star>,
    #[serde(default)]
    pub constellations: Vec<Constellation>,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate star names.
    pub fn new(stars: Vec<Star>, constellations: Vec<Constellation>) -> Result<Self> {
        let catalog = Self {
            stars,
            constellations,
        };
        catalog.validate()?;
        Ok(catalog)
    }

    /// Parse a catalog from JSON. Accepts `lines` as an alias for `edges`.
    pub fn from_json(json: &str) -> Result<Self> {
        let catalog: Catalog = serde_json::from_str(json).map_err(StarmapError::CatalogJson)?;
        catalog.validate()?;
        Ok(catalog)
    }

    fn validate(&self) -> Result<()> {
        let mut seen = HashSet::with_capacity(self.stars.len());
        for star in &self.stars {
            if !seen.insert(star.name.as_str()) {
                return Err(StarmapError::DuplicateStar(star.name.clone()));
            }
        }
        Ok(())
    }

    /// First star with this exact name.
    pub fn star(&self, name: &str) -> Option<&Star> {
        find_star(&self.stars, name)
    }

    pub fn len(&self) -> usize {
        self.stars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stars.is_empty()
    }
}

/// First star in `stars` with this exact name.
pub fn find_star<'a>(stars: &'a [Star], name: &str) -> Option<&'a Star> {
    stars.iter().find(|s| s.name == name)
}
