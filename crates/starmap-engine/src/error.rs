//! Error type shared by the fallible parts of the engine.
//!
//! Rendering and hit-testing never fail. Errors only come from loading
//! external data: catalog JSON, config JSON, observation history records
//! and color strings.

use thiserror::Error;

/// Errors produced while loading or querying star map data.
#[derive(Debug, Error)]
pub enum StarmapError {
    /// Catalog JSON could not be parsed.
    #[error("invalid catalog json: {0}")]
    CatalogJson(#[source] serde_json::Error),

    /// Two stars in one catalog share a name; names are the join key for edges.
    #[error("duplicate star name in catalog: {0}")]
    DuplicateStar(String),

    /// Config JSON could not be parsed.
    #[error("invalid config json: {0}")]
    ConfigJson(#[source] serde_json::Error),

    /// A color string was not `#RRGGBB` or `#RRGGBBAA`.
    #[error("invalid color {0:?}: expected #RRGGBB or #RRGGBBAA")]
    InvalidColor(String),

    /// Observation or history JSON could not be parsed or produced.
    #[error("invalid observation json: {0}")]
    ObservationJson(#[source] serde_json::Error),

    /// A history date filter was not `YYYY-MM-DD`.
    #[error("invalid history date {0:?}: expected YYYY-MM-DD")]
    InvalidDate(String),

    /// The history store rejected an operation.
    #[error("history store: {0}")]
    History(String),
}

/// Convenience alias used across the engine.
pub type Result<T> = std::result::Result<T, StarmapError>;
