//! Creatures observed around the hero (NPCs and other players).

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use glam::Vec3;

use super::{CreatureKind, EntityId, Transform, VitalStats};
use crate::observe::{ChangeNotifier, Observable, replace_if_changed};
use crate::state::fields::CreatureField;

/// A creature known to the client.
///
/// The nested [`Transform`] and [`VitalStats`] are owned by the creature for
/// its whole lifetime and publish their own notifications; the creature
/// itself only reports identity-level fields ([`CreatureField`]).
#[derive(Debug)]
pub struct Creature {
    id: EntityId,
    kind: Cell<CreatureKind>,
    name: RefCell<String>,
    title: RefCell<String>,
    /// World-space radius within which a hostile creature engages.
    aggro_radius: Cell<f32>,
    transform: Rc<Transform>,
    vital_stats: Rc<VitalStats>,
    changes: ChangeNotifier<CreatureField>,
}

impl Creature {
    pub fn new(id: EntityId, kind: CreatureKind, name: impl Into<String>) -> Self {
        Self {
            id,
            kind: Cell::new(kind),
            name: RefCell::new(name.into()),
            title: RefCell::new(String::new()),
            aggro_radius: Cell::new(0.0),
            transform: Rc::new(Transform::default()),
            vital_stats: Rc::new(VitalStats::default()),
            changes: ChangeNotifier::new(),
        }
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = Rc::new(transform);
        self
    }

    pub fn with_position(self, position: Vec3) -> Self {
        let direction = self.transform.direction();
        self.with_transform(Transform::new(position, direction))
    }

    pub fn with_vital_stats(mut self, vital_stats: VitalStats) -> Self {
        self.vital_stats = Rc::new(vital_stats);
        self
    }

    pub fn with_aggro_radius(self, aggro_radius: f32) -> Self {
        self.aggro_radius.set(aggro_radius);
        self
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn kind(&self) -> CreatureKind {
        self.kind.get()
    }

    pub fn name(&self) -> String {
        self.name.borrow().clone()
    }

    pub fn title(&self) -> String {
        self.title.borrow().clone()
    }

    pub fn aggro_radius(&self) -> f32 {
        self.aggro_radius.get()
    }

    pub fn transform(&self) -> &Rc<Transform> {
        &self.transform
    }

    pub fn vital_stats(&self) -> &Rc<VitalStats> {
        &self.vital_stats
    }

    pub fn set_kind(&self, kind: CreatureKind) {
        if replace_if_changed(&self.kind, kind) {
            self.changes.notify(CreatureField::Kind);
        }
    }

    pub fn set_name(&self, name: impl Into<String>) {
        if replace_text(&self.name, name.into()) {
            self.changes.notify(CreatureField::Name);
        }
    }

    pub fn set_title(&self, title: impl Into<String>) {
        if replace_text(&self.title, title.into()) {
            self.changes.notify(CreatureField::Title);
        }
    }

    pub fn set_aggro_radius(&self, aggro_radius: f32) {
        if replace_if_changed(&self.aggro_radius, aggro_radius) {
            self.changes.notify(CreatureField::AggroRadius);
        }
    }
}

impl Observable for Creature {
    type Field = CreatureField;

    fn changes(&self) -> &ChangeNotifier<CreatureField> {
        &self.changes
    }
}

/// Replaces the text in `slot`, releasing the borrow before the caller notifies.
pub(crate) fn replace_text(slot: &RefCell<String>, value: String) -> bool {
    let mut current = slot.borrow_mut();
    if *current == value {
        return false;
    }
    *current = value;
    true
}
