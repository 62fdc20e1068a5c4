pub mod api;
pub mod assets;
pub mod config;
pub mod core;
pub mod error;
pub mod history;
pub mod input;
pub mod renderer;
pub mod systems;

// Re-export key types at crate root for convenience
pub use api::app::StarMapApp;
pub use api::types::{CursorHint, Notice, NoticeKind, SkyEvent};
pub use assets::builtin::builtin_catalog;
pub use assets::catalog::{Catalog, Constellation, Edge, Star};
pub use config::StarmapConfig;
pub use crate::core::context::SkyContext;
pub use crate::core::location::{LocationOutcome, ObserverLocation};
pub use crate::core::mode::DisplayMode;
pub use error::{Result, StarmapError};
pub use history::observation::{Observation, ObservationRecord};
pub use history::query::HistoryQuery;
pub use history::store::{HistoryStore, InMemoryHistory};
pub use input::hit_test::hit_test;
pub use input::queue::{InputEvent, InputQueue};
pub use renderer::command::{CommandList, DrawCommand};
pub use renderer::projection::{project, Viewport};
pub use renderer::traits::{Color, DrawSurface, FontSpec, TextAlign};
pub use systems::filter::{filter_stars, SearchResult};
pub use systems::starfield::{Starfield, StarfieldMode};

#[cfg(feature = "vectors")]
pub use renderer::vector::{VectorSurface, VectorVertex};
