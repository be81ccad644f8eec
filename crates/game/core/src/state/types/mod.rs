pub mod common;
pub mod creature;
pub mod hero;
pub mod transform;
pub mod vitals;

pub use common::{CreatureKind, EntityId};
pub use creature::Creature;
pub use hero::Hero;
pub use transform::{Transform, WorldPosition};
pub use vitals::VitalStats;
