use std::cell::Cell;

use crate::observe::{ChangeNotifier, Observable, replace_if_changed};
use crate::state::fields::VitalStatsField;

/// Health and mana meters of a living entity.
#[derive(Debug, Default)]
pub struct VitalStats {
    hp: Cell<u32>,
    max_hp: Cell<u32>,
    mp: Cell<u32>,
    max_mp: Cell<u32>,
    changes: ChangeNotifier<VitalStatsField>,
}

impl VitalStats {
    pub fn new(hp: u32, max_hp: u32, mp: u32, max_mp: u32) -> Self {
        Self {
            hp: Cell::new(hp),
            max_hp: Cell::new(max_hp),
            mp: Cell::new(mp),
            max_mp: Cell::new(max_mp),
            changes: ChangeNotifier::new(),
        }
    }

    pub fn hp(&self) -> u32 {
        self.hp.get()
    }

    pub fn max_hp(&self) -> u32 {
        self.max_hp.get()
    }

    pub fn mp(&self) -> u32 {
        self.mp.get()
    }

    pub fn max_mp(&self) -> u32 {
        self.max_mp.get()
    }

    /// Remaining health as a fraction in `0.0..=1.0`; zero when `max_hp` is zero.
    pub fn hp_ratio(&self) -> f32 {
        match self.max_hp() {
            0 => 0.0,
            max => (self.hp() as f32 / max as f32).min(1.0),
        }
    }

    pub fn is_dead(&self) -> bool {
        self.max_hp() > 0 && self.hp() == 0
    }

    pub fn set_hp(&self, hp: u32) {
        self.update(&self.hp, hp, VitalStatsField::Hp);
    }

    pub fn set_max_hp(&self, max_hp: u32) {
        self.update(&self.max_hp, max_hp, VitalStatsField::MaxHp);
    }

    pub fn set_mp(&self, mp: u32) {
        self.update(&self.mp, mp, VitalStatsField::Mp);
    }

    pub fn set_max_mp(&self, max_mp: u32) {
        self.update(&self.max_mp, max_mp, VitalStatsField::MaxMp);
    }

    fn update(&self, cell: &Cell<u32>, value: u32, field: VitalStatsField) {
        if replace_if_changed(cell, value) {
            self.changes.notify(field);
        }
    }
}

impl Observable for VitalStats {
    type Field = VitalStatsField;

    fn changes(&self) -> &ChangeNotifier<VitalStatsField> {
        &self.changes
    }
}
