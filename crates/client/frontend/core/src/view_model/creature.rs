//! Minimap marker for a single creature.

use std::rc::Rc;

use game_core::{
    ChangeNotifier, Creature, CreatureKind, EntityId, Hero, Observable, Vec3, VitalStats,
};

use super::subscriptions::SubscriptionSet;
use crate::config::MinimapConfig;
use crate::error::{Result, ViewModelError};
use crate::projection::{
    is_valid_scale, marker_radius, screen_aggro_radius, screen_direction, screen_position,
};
use crate::services::propagation::{ChangeSource, MapProperties, MapProperty, Republisher};

/// View-model of one creature drawn on the hero-centred minimap.
///
/// Every derived property is computed from the bound entities on each read;
/// nothing is cached. Consumers subscribe through [`Observable`] and re-read
/// the announced [`MapProperty`] when notified.
///
/// # Lifecycle
///
/// - Construction attaches one listener to each of six sources (creature,
///   its transform, position and vital stats; hero position; hero).
/// - [`dispose`](Self::dispose) detaches all of them and silences the marker.
///   Dropping the view-model disposes it.
#[derive(Debug)]
pub struct CreatureMapViewModel {
    creature: Rc<Creature>,
    hero: Rc<Hero>,
    scale: f32,
    viewport_size: Vec3,
    republisher: Rc<Republisher>,
    subscriptions: SubscriptionSet,
}

impl CreatureMapViewModel {
    /// Creates a marker at scale 1 with an empty viewport.
    pub fn new(creature: Rc<Creature>, hero: Rc<Hero>) -> Self {
        Self::wired(creature, hero, 1.0, Vec3::ZERO)
    }

    pub fn builder() -> CreatureMapViewModelBuilder {
        CreatureMapViewModelBuilder::new()
    }

    fn wired(creature: Rc<Creature>, hero: Rc<Hero>, scale: f32, viewport_size: Vec3) -> Self {
        let republisher = Rc::new(Republisher::new(creature.id()));
        let subscriptions = SubscriptionSet::wire(&creature, &hero, &republisher);

        Self {
            creature,
            hero,
            scale,
            viewport_size,
            republisher,
            subscriptions,
        }
    }

    pub fn creature(&self) -> &Rc<Creature> {
        &self.creature
    }

    pub fn hero(&self) -> &Rc<Hero> {
        &self.hero
    }

    pub fn id(&self) -> EntityId {
        self.creature.id()
    }

    pub fn name(&self) -> String {
        self.creature.name()
    }

    pub fn kind(&self) -> CreatureKind {
        self.creature.kind()
    }

    /// Marker centre in screen coordinates.
    pub fn position(&self) -> Vec3 {
        screen_position(
            self.creature.transform().position().get(),
            self.hero.transform().position().get(),
            self.scale,
            self.viewport_size,
        )
    }

    /// Heading indicator relative to the marker centre.
    pub fn direction(&self) -> Vec3 {
        screen_direction(self.creature.transform().direction(), self.radius())
    }

    pub fn vital_stats(&self) -> &VitalStats {
        self.creature.vital_stats()
    }

    pub fn radius(&self) -> f32 {
        marker_radius(self.scale)
    }

    pub fn aggro_radius(&self) -> f32 {
        screen_aggro_radius(self.creature.aggro_radius(), self.scale)
    }

    pub fn is_aggressive(&self) -> bool {
        self.creature.aggro_radius() > 0.0
    }

    /// True when the hero currently targets this creature.
    pub fn is_target(&self) -> bool {
        self.hero.target_id() == Some(self.id())
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Changes the zoom scale.
    ///
    /// Returns `Ok(false)` without publishing when the value is unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`ViewModelError::InvalidScale`] for zero, negative or
    /// non-finite values; the current scale is kept.
    pub fn set_scale(&mut self, scale: f32) -> Result<bool> {
        if !is_valid_scale(scale) {
            tracing::warn!(creature = %self.id(), scale, "Rejected map scale");
            return Err(ViewModelError::InvalidScale { scale });
        }
        if self.scale == scale {
            return Ok(false);
        }

        self.scale = scale;
        self.republish(MapProperties::ZOOM);
        Ok(true)
    }

    pub fn viewport_size(&self) -> Vec3 {
        self.viewport_size
    }

    /// Changes the viewport size. Returns false when the value is unchanged.
    pub fn set_viewport_size(&mut self, viewport_size: Vec3) -> bool {
        if self.viewport_size == viewport_size {
            return false;
        }

        self.viewport_size = viewport_size;
        self.republish(MapProperties::MOTION);
        true
    }

    /// Applies `config` as a whole, publishing only what changed.
    pub fn apply_config(&mut self, config: &MinimapConfig) -> Result<()> {
        self.set_scale(config.scale)?;
        self.set_viewport_size(config.viewport_size);
        Ok(())
    }

    /// Copies every derived value for renderers that poll instead of binding.
    pub fn snapshot(&self) -> MarkerSnapshot {
        let vital_stats = self.vital_stats();
        MarkerSnapshot {
            id: self.id(),
            name: self.name(),
            kind: self.kind(),
            position: self.position(),
            direction: self.direction(),
            radius: self.radius(),
            aggro_radius: self.aggro_radius(),
            is_aggressive: self.is_aggressive(),
            is_target: self.is_target(),
            hp: vital_stats.hp(),
            max_hp: vital_stats.max_hp(),
        }
    }

    /// Detaches from every source. Safe to call more than once.
    pub fn dispose(&mut self) {
        if self.is_disposed() {
            return;
        }

        self.republisher.deactivate();
        let released = self.subscriptions.detach_all();
        tracing::debug!(creature = %self.id(), released, "Disposed creature marker");
    }

    pub fn is_disposed(&self) -> bool {
        !self.republisher.is_active()
    }

    fn republish(&self, properties: MapProperties) {
        self.republisher.publish(ChangeSource::ViewSettings, properties);
    }
}

impl Observable for CreatureMapViewModel {
    type Field = MapProperty;

    fn changes(&self) -> &ChangeNotifier<MapProperty> {
        self.republisher.notifier()
    }
}

impl Drop for CreatureMapViewModel {
    fn drop(&mut self) {
        self.dispose();
    }
}

/// Plain copy of a marker's derived values at one point in time.
#[derive(Clone, Debug, PartialEq)]
pub struct MarkerSnapshot {
    pub id: EntityId,
    pub name: String,
    pub kind: CreatureKind,
    pub position: Vec3,
    pub direction: Vec3,
    pub radius: f32,
    pub aggro_radius: f32,
    pub is_aggressive: bool,
    pub is_target: bool,
    pub hp: u32,
    pub max_hp: u32,
}

/// Builder for [`CreatureMapViewModel`] with fail-fast validation.
///
/// Creature and hero are required; scale and viewport fall back to
/// [`MinimapConfig::default`].
#[derive(Debug, Default)]
pub struct CreatureMapViewModelBuilder {
    creature: Option<Rc<Creature>>,
    hero: Option<Rc<Hero>>,
    config: MinimapConfig,
}

impl CreatureMapViewModelBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the creature to display (required).
    pub fn creature(mut self, creature: Rc<Creature>) -> Self {
        self.creature = Some(creature);
        self
    }

    /// Set the hero the map is centred on (required).
    pub fn hero(mut self, hero: Rc<Hero>) -> Self {
        self.hero = Some(hero);
        self
    }

    pub fn scale(mut self, scale: f32) -> Self {
        self.config.scale = scale;
        self
    }

    pub fn viewport_size(mut self, viewport_size: Vec3) -> Self {
        self.config.viewport_size = viewport_size;
        self
    }

    pub fn config(mut self, config: MinimapConfig) -> Self {
        self.config = config;
        self
    }

    /// Build the view-model and attach its listeners.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - creature or hero is not set
    /// - the scale is not finite and positive
    pub fn build(self) -> Result<CreatureMapViewModel> {
        let creature = self
            .creature
            .ok_or(ViewModelError::MissingCollaborator { role: "creature" })?;
        let hero = self
            .hero
            .ok_or(ViewModelError::MissingCollaborator { role: "hero" })?;

        if !is_valid_scale(self.config.scale) {
            return Err(ViewModelError::InvalidScale {
                scale: self.config.scale,
            });
        }

        Ok(CreatureMapViewModel::wired(
            creature,
            hero,
            self.config.scale,
            self.config.viewport_size,
        ))
    }
}
