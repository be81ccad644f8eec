//! Service layer translating domain changes into view-model notifications.

pub mod propagation;

pub use propagation::{ChangeSource, MapProperties, MapProperty, Republisher};
