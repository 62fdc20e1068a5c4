pub mod command;
pub mod projection;
pub mod sky;
pub mod traits;
#[cfg(feature = "vectors")]
pub mod vector;

// Re-export key types for convenient access
pub use command::{CommandList, DrawCommand};
pub use projection::Viewport;
pub use traits::{Color, DrawSurface, FontSpec, TextAlign};
