//! Cross-frontend primitives for presenting the minimap.
//!
//! Houses the world-to-screen projection, the change filter that turns
//! field-level entity notifications into marker property notifications, and
//! the view-model types that terminal and graphical clients bind to.
pub mod config;
pub mod error;
pub mod projection;
pub mod services;
pub mod view_model;

pub use config::MinimapConfig;
pub use error::ViewModelError;
pub use services::{ChangeSource, MapProperties, MapProperty};
pub use view_model::{CreatureMapViewModel, MarkerSnapshot, MinimapView};
