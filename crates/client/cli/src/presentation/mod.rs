//! Terminal presentation components used by the CLI client.
pub mod surface;
pub mod terminal;
pub mod ui;

pub use surface::MapSurface;
