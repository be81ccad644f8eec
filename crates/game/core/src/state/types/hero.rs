//! The player-controlled character the minimap is centred on.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use glam::Vec3;

use super::creature::replace_text;
use super::{EntityId, Transform, VitalStats};
use crate::observe::{ChangeNotifier, Observable, replace_if_changed};
use crate::state::fields::HeroField;

/// The hero: reference point of the map and owner of the current target.
#[derive(Debug)]
pub struct Hero {
    id: EntityId,
    name: RefCell<String>,
    target_id: Cell<Option<EntityId>>,
    transform: Rc<Transform>,
    vital_stats: Rc<VitalStats>,
    changes: ChangeNotifier<HeroField>,
}

impl Hero {
    pub fn new(id: EntityId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: RefCell::new(name.into()),
            target_id: Cell::new(None),
            transform: Rc::new(Transform::default()),
            vital_stats: Rc::new(VitalStats::default()),
            changes: ChangeNotifier::new(),
        }
    }

    pub fn with_position(mut self, position: Vec3) -> Self {
        let direction = self.transform.direction();
        self.transform = Rc::new(Transform::new(position, direction));
        self
    }

    pub fn with_vital_stats(mut self, vital_stats: VitalStats) -> Self {
        self.vital_stats = Rc::new(vital_stats);
        self
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn name(&self) -> String {
        self.name.borrow().clone()
    }

    /// Entity currently selected by the hero, if any.
    pub fn target_id(&self) -> Option<EntityId> {
        self.target_id.get()
    }

    pub fn transform(&self) -> &Rc<Transform> {
        &self.transform
    }

    pub fn vital_stats(&self) -> &Rc<VitalStats> {
        &self.vital_stats
    }

    pub fn set_name(&self, name: impl Into<String>) {
        if replace_text(&self.name, name.into()) {
            self.changes.notify(HeroField::Name);
        }
    }

    pub fn set_target_id(&self, target_id: Option<EntityId>) {
        if replace_if_changed(&self.target_id, target_id) {
            self.changes.notify(HeroField::TargetId);
        }
    }
}

impl Observable for Hero {
    type Field = HeroField;

    fn changes(&self) -> &ChangeNotifier<HeroField> {
        &self.changes
    }
}
