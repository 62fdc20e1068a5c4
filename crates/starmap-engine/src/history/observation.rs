use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::assets::catalog::Star;
use crate::error::{Result, StarmapError};

/// Kind of observed object. Only stars exist in the catalog today.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectKind {
    #[default]
    Star,
}

/// What gets persisted when a star is picked. The host adds the user id and
/// timestamp when it writes the row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ObjectKind,
    pub magnitude: f32,
    pub distance: f32,
    pub ra: f32,
    pub dec: f32,
    pub description: String,
}

impl From<&Star> for Observation {
    fn from(star: &Star) -> Self {
        Self {
            name: star.name.clone(),
            kind: ObjectKind::Star,
            magnitude: star.magnitude,
            distance: star.distance,
            ra: star.ra,
            dec: star.dec,
            description: star.description.clone(),
        }
    }
}

/// A stored observation, as listed on the history page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObservationRecord {
    pub id: u64,
    pub user_id: String,
    #[serde(flatten)]
    pub observation: Observation,
    pub observed_at: DateTime<Utc>,
}

impl ObservationRecord {
    pub fn name(&self) -> &str {
        &self.observation.name
    }
}

/// Parse a JSON array of records, e.g. rows fetched by the host.
pub fn records_from_json(json: &str) -> Result<Vec<ObservationRecord>> {
    serde_json::from_str(json).map_err(StarmapError::ObservationJson)
}

pub fn records_to_json(records: &[ObservationRecord]) -> Result<String> {
    serde_json::to_string(records).map_err(StarmapError::ObservationJson)
}
