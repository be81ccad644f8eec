//! View-models of the hero-centred minimap.
//!
//! - [`CreatureMapViewModel`]: one creature marker, derived on demand from the
//!   bound creature and hero, re-announcing only visible changes
//! - [`MinimapView`]: the set of markers currently in observation range
pub mod creature;
pub mod minimap;
pub mod subscriptions;

pub use creature::{CreatureMapViewModel, CreatureMapViewModelBuilder, MarkerSnapshot};
pub use minimap::MinimapView;
pub use subscriptions::{Registration, SubscriptionSet};
