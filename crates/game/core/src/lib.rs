//! Observable game entities shared across client views.
//!
//! `game-core` defines the entities the client mirrors from the server
//! (creatures, the hero, their transforms and vital stats) together with the
//! field-level change notification every view subscribes to. Views never
//! mutate these objects; they observe them through [`observe::Observable`].
pub mod error;
pub mod observe;
pub mod state;

pub use error::{ErrorSeverity, GameError};
pub use observe::{ChangeNotifier, Detach, ListenerId, Observable};
pub use state::{
    Creature, CreatureField, CreatureKind, EntityId, Hero, HeroField, PositionField, Transform,
    TransformField, VitalStats, VitalStatsField, WorldPosition,
};

pub use glam::Vec3;
