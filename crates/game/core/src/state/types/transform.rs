//! Spatial state shared by every entity on the map.

use std::cell::Cell;
use std::rc::Rc;

use glam::Vec3;

use crate::observe::{ChangeNotifier, Observable, replace_if_changed};
use crate::state::fields::{PositionField, TransformField};

/// Absolute world coordinates of an entity.
///
/// Each component is observable on its own; [`WorldPosition::set`] reports
/// one notification per component that actually moved.
#[derive(Debug, Default)]
pub struct WorldPosition {
    x: Cell<f32>,
    y: Cell<f32>,
    z: Cell<f32>,
    changes: ChangeNotifier<PositionField>,
}

impl WorldPosition {
    pub fn new(position: Vec3) -> Self {
        Self {
            x: Cell::new(position.x),
            y: Cell::new(position.y),
            z: Cell::new(position.z),
            changes: ChangeNotifier::new(),
        }
    }

    pub fn x(&self) -> f32 {
        self.x.get()
    }

    pub fn y(&self) -> f32 {
        self.y.get()
    }

    pub fn z(&self) -> f32 {
        self.z.get()
    }

    pub fn get(&self) -> Vec3 {
        Vec3::new(self.x(), self.y(), self.z())
    }

    pub fn set_x(&self, x: f32) {
        if replace_if_changed(&self.x, x) {
            self.changes.notify(PositionField::X);
        }
    }

    pub fn set_y(&self, y: f32) {
        if replace_if_changed(&self.y, y) {
            self.changes.notify(PositionField::Y);
        }
    }

    pub fn set_z(&self, z: f32) {
        if replace_if_changed(&self.z, z) {
            self.changes.notify(PositionField::Z);
        }
    }

    /// Moves to `position`, component by component.
    pub fn set(&self, position: Vec3) {
        self.set_x(position.x);
        self.set_y(position.y);
        self.set_z(position.z);
    }
}

impl Observable for WorldPosition {
    type Field = PositionField;

    fn changes(&self) -> &ChangeNotifier<PositionField> {
        &self.changes
    }
}

/// Position plus heading of an entity.
///
/// The nested [`WorldPosition`] is fixed for the lifetime of the transform;
/// only its contents change.
#[derive(Debug)]
pub struct Transform {
    position: Rc<WorldPosition>,
    direction: Cell<Vec3>,
    velocity: Cell<Vec3>,
    changes: ChangeNotifier<TransformField>,
}

impl Transform {
    pub fn new(position: Vec3, direction: Vec3) -> Self {
        Self {
            position: Rc::new(WorldPosition::new(position)),
            direction: Cell::new(direction),
            velocity: Cell::new(Vec3::ZERO),
            changes: ChangeNotifier::new(),
        }
    }

    pub fn position(&self) -> &Rc<WorldPosition> {
        &self.position
    }

    /// Unit vector the entity is facing.
    pub fn direction(&self) -> Vec3 {
        self.direction.get()
    }

    pub fn velocity(&self) -> Vec3 {
        self.velocity.get()
    }

    pub fn set_direction(&self, direction: Vec3) {
        if replace_if_changed(&self.direction, direction) {
            self.changes.notify(TransformField::Direction);
        }
    }

    pub fn set_velocity(&self, velocity: Vec3) {
        if replace_if_changed(&self.velocity, velocity) {
            self.changes.notify(TransformField::Velocity);
        }
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::new(Vec3::ZERO, Vec3::X)
    }
}

impl Observable for Transform {
    type Field = TransformField;

    fn changes(&self) -> &ChangeNotifier<TransformField> {
        &self.changes
    }
}
