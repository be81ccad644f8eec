//! Observable domain model of the entities shown on the minimap.
//!
//! Objects are shared as `Rc<T>` between every view that displays them and
//! are mutated in place by the network layer through `&self` setters. Each
//! setter is guarded by an equality check, so reassigning the current value
//! publishes nothing.
pub mod fields;
pub mod types;

pub use fields::{CreatureField, HeroField, PositionField, TransformField, VitalStatsField};
pub use types::{
    Creature, CreatureKind, EntityId, Hero, Transform, VitalStats, WorldPosition,
};
