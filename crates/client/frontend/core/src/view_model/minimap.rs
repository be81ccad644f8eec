//! Collection of creature markers sharing one hero and one zoom setting.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::rc::Rc;

use game_core::{Creature, EntityId, Hero, Vec3};

use super::creature::{CreatureMapViewModel, MarkerSnapshot};
use crate::config::MinimapConfig;
use crate::error::{Result, ViewModelError};
use crate::projection::is_valid_scale;

/// The minimap widget state: one marker per creature in observation range.
///
/// Markers are created when a creature enters range ([`track`](Self::track))
/// and disposed when it leaves ([`untrack`](Self::untrack)). Zoom and
/// viewport changes are validated once and pushed to every marker.
#[derive(Debug)]
pub struct MinimapView {
    hero: Rc<Hero>,
    config: MinimapConfig,
    markers: BTreeMap<EntityId, CreatureMapViewModel>,
}

impl MinimapView {
    /// # Errors
    ///
    /// Returns [`ViewModelError::InvalidScale`] if `config.scale` is not
    /// finite and positive.
    pub fn new(hero: Rc<Hero>, config: MinimapConfig) -> Result<Self> {
        if !is_valid_scale(config.scale) {
            return Err(ViewModelError::InvalidScale {
                scale: config.scale,
            });
        }

        Ok(Self {
            hero,
            config,
            markers: BTreeMap::new(),
        })
    }

    pub fn hero(&self) -> &Rc<Hero> {
        &self.hero
    }

    pub fn config(&self) -> &MinimapConfig {
        &self.config
    }

    /// Starts displaying `creature`. Tracking the same id twice keeps the
    /// existing marker unless it has been disposed, in which case it is
    /// replaced by a freshly wired one.
    pub fn track(&mut self, creature: Rc<Creature>) -> Result<&mut CreatureMapViewModel> {
        let id = creature.id();
        let marker = match self.markers.entry(id) {
            Entry::Occupied(entry) if !entry.get().is_disposed() => entry.into_mut(),
            Entry::Occupied(mut entry) => {
                entry.insert(build_marker(creature, &self.hero, &self.config)?);
                tracing::debug!(creature = %id, "Rewired disposed marker");
                entry.into_mut()
            }
            Entry::Vacant(entry) => {
                let marker = build_marker(creature, &self.hero, &self.config)?;
                tracing::debug!(creature = %id, "Tracking creature on minimap");
                entry.insert(marker)
            }
        };
        Ok(marker)
    }

    /// Stops displaying the creature and disposes its marker.
    pub fn untrack(&mut self, id: EntityId) -> bool {
        match self.markers.remove(&id) {
            Some(mut marker) => {
                marker.dispose();
                tracing::debug!(creature = %id, "Untracked creature");
                true
            }
            None => false,
        }
    }

    /// Disposes every marker.
    pub fn clear(&mut self) {
        for (_, mut marker) in std::mem::take(&mut self.markers) {
            marker.dispose();
        }
    }

    /// Changes the zoom of every marker.
    ///
    /// Markers re-zoomed individually through [`get_mut`](Self::get_mut) are
    /// brought back in line. Returns true when the view or any marker changed.
    ///
    /// # Errors
    ///
    /// Returns [`ViewModelError::InvalidScale`] before touching any marker.
    pub fn set_scale(&mut self, scale: f32) -> Result<bool> {
        if !is_valid_scale(scale) {
            tracing::warn!(scale, "Rejected minimap scale");
            return Err(ViewModelError::InvalidScale { scale });
        }

        let mut changed = self.config.scale != scale;
        self.config.scale = scale;
        for marker in self.markers.values_mut() {
            changed |= marker.set_scale(scale)?;
        }
        Ok(changed)
    }

    /// Resizes every marker's viewport. Returns true when anything changed.
    pub fn set_viewport_size(&mut self, viewport_size: Vec3) -> bool {
        let mut changed = self.config.viewport_size != viewport_size;
        self.config.viewport_size = viewport_size;
        for marker in self.markers.values_mut() {
            changed |= marker.set_viewport_size(viewport_size);
        }
        changed
    }

    pub fn get(&self, id: EntityId) -> Option<&CreatureMapViewModel> {
        self.markers.get(&id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut CreatureMapViewModel> {
        self.markers.get_mut(&id)
    }

    /// Markers ordered by creature id.
    pub fn iter(&self) -> impl Iterator<Item = &CreatureMapViewModel> {
        self.markers.values()
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    /// Marker of the creature the hero currently targets, if it is tracked.
    pub fn target(&self) -> Option<&CreatureMapViewModel> {
        self.hero.target_id().and_then(|id| self.markers.get(&id))
    }

    pub fn snapshots(&self) -> Vec<MarkerSnapshot> {
        self.iter().map(CreatureMapViewModel::snapshot).collect()
    }
}

fn build_marker(
    creature: Rc<Creature>,
    hero: &Rc<Hero>,
    config: &MinimapConfig,
) -> Result<CreatureMapViewModel> {
    CreatureMapViewModel::builder()
        .creature(creature)
        .hero(Rc::clone(hero))
        .config(config.clone())
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::{CreatureKind, Observable};

    fn creature(id: u32, x: f32) -> Rc<Creature> {
        Rc::new(
            Creature::new(EntityId(id), CreatureKind::Npc, format!("Rat {id}"))
                .with_position(Vec3::new(x, 0.0, 0.0)),
        )
    }

    fn view() -> MinimapView {
        let hero = Rc::new(Hero::new(EntityId(1), "Aria"));
        MinimapView::new(hero, MinimapConfig::new(1.0, Vec3::new(100.0, 100.0, 0.0)))
            .expect("valid config")
    }

    #[test]
    fn new_rejects_invalid_scale() {
        let hero = Rc::new(Hero::new(EntityId(1), "Aria"));
        let result = MinimapView::new(hero, MinimapConfig::new(-1.0, Vec3::ZERO));
        assert!(matches!(result, Err(ViewModelError::InvalidScale { .. })));
    }

    #[test]
    fn track_uses_current_view_settings() {
        let mut view = view();
        view.set_scale(2.0).expect("valid scale");

        let marker = view.track(creature(5, 20.0)).expect("tracked");

        assert_eq!(marker.scale(), 2.0);
        assert_eq!(marker.position(), Vec3::new(60.0, 50.0, 0.0));
    }

    #[test]
    fn tracking_twice_keeps_one_marker() {
        let mut view = view();
        let rat = creature(5, 0.0);

        view.track(Rc::clone(&rat)).expect("tracked");
        view.track(Rc::clone(&rat)).expect("tracked");

        assert_eq!(view.len(), 1);
        assert_eq!(rat.changes().listener_count(), 1);
    }

    #[test]
    fn tracking_again_rewires_a_disposed_marker() {
        let mut view = view();
        let rat = creature(5, 0.0);
        view.track(Rc::clone(&rat)).expect("tracked");
        view.get_mut(EntityId(5)).expect("tracked").dispose();
        assert_eq!(rat.changes().listener_count(), 0);

        let marker = view.track(Rc::clone(&rat)).expect("tracked");

        assert!(!marker.is_disposed());
        assert_eq!(view.len(), 1);
        assert_eq!(rat.changes().listener_count(), 1);
        assert_eq!(view.hero().changes().listener_count(), 1);

        let seen = Rc::new(std::cell::RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        view.get(EntityId(5))
            .expect("tracked")
            .subscribe(move |property| sink.borrow_mut().push(property));
        rat.set_name("Giant Rat");
        assert_eq!(*seen.borrow(), vec![crate::MapProperty::Name]);
    }

    #[test]
    fn untrack_disposes_marker() {
        let mut view = view();
        let rat = creature(5, 0.0);
        view.track(Rc::clone(&rat)).expect("tracked");

        assert!(view.untrack(EntityId(5)));
        assert!(!view.untrack(EntityId(5)));
        assert!(view.is_empty());
        assert_eq!(rat.changes().listener_count(), 0);
        assert_eq!(view.hero().changes().listener_count(), 0);
    }

    #[test]
    fn scale_and_viewport_propagate_to_all_markers() {
        let mut view = view();
        view.track(creature(5, 10.0)).expect("tracked");
        view.track(creature(6, -10.0)).expect("tracked");

        assert_eq!(view.set_scale(2.0), Ok(true));
        assert_eq!(view.set_scale(2.0), Ok(false));
        assert!(view.set_viewport_size(Vec3::new(50.0, 50.0, 0.0)));

        let positions: Vec<_> = view.iter().map(CreatureMapViewModel::position).collect();
        assert_eq!(
            positions,
            vec![Vec3::new(30.0, 25.0, 0.0), Vec3::new(20.0, 25.0, 0.0)]
        );
        assert!(view.iter().all(|marker| marker.radius() == 5.0));
    }

    #[test]
    fn view_scale_realigns_individually_zoomed_markers() {
        let mut view = view();
        view.track(creature(5, 30.0)).expect("tracked");
        view.track(creature(6, 30.0)).expect("tracked");
        view.get_mut(EntityId(5))
            .expect("tracked")
            .set_scale(3.0)
            .expect("valid scale");

        assert_eq!(view.set_scale(3.0), Ok(true));
        assert!(view.iter().all(|marker| marker.scale() == 3.0));
        assert_eq!(view.set_scale(3.0), Ok(false));

        view.get_mut(EntityId(6))
            .expect("tracked")
            .set_viewport_size(Vec3::ZERO);
        assert!(view.set_viewport_size(Vec3::new(100.0, 100.0, 0.0)));
        assert_eq!(
            view.get(EntityId(6)).map(CreatureMapViewModel::position),
            Some(Vec3::new(60.0, 50.0, 0.0))
        );
    }

    #[test]
    fn rejected_scale_leaves_markers_untouched() {
        let mut view = view();
        view.track(creature(5, 10.0)).expect("tracked");

        assert!(view.set_scale(0.0).is_err());
        assert_eq!(view.config().scale, 1.0);
        assert_eq!(view.get(EntityId(5)).map(|marker| marker.scale()), Some(1.0));
    }

    #[test]
    fn target_follows_hero_selection() {
        let mut view = view();
        view.track(creature(5, 10.0)).expect("tracked");
        assert!(view.target().is_none());

        view.hero().set_target_id(Some(EntityId(5)));
        assert_eq!(view.target().map(CreatureMapViewModel::id), Some(EntityId(5)));

        view.hero().set_target_id(Some(EntityId(77)));
        assert!(view.target().is_none());
    }

    #[test]
    fn clear_disposes_everything() {
        let mut view = view();
        let rat = creature(5, 10.0);
        view.track(Rc::clone(&rat)).expect("tracked");
        view.track(creature(6, 10.0)).expect("tracked");

        view.clear();

        assert!(view.is_empty());
        assert_eq!(rat.transform().position().changes().listener_count(), 0);
        assert_eq!(view.hero().transform().position().changes().listener_count(), 0);
    }

    #[test]
    fn snapshots_are_ordered_by_id() {
        let mut view = view();
        view.track(creature(9, 10.0)).expect("tracked");
        view.track(creature(3, 10.0)).expect("tracked");

        let ids: Vec<_> = view.snapshots().into_iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![EntityId(3), EntityId(9)]);
    }
}
