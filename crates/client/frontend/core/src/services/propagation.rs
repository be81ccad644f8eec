//! Change filter and re-publisher for minimap markers.
//!
//! Domain objects report fine-grained field changes. A marker only cares
//! about the few fields that alter what is drawn, so each source gets a pure
//! filter that maps its field to the set of derived properties that must be
//! re-read. An empty set means the change is invisible on the map and nothing
//! is published.
//!
//! # Architecture
//!
//! - `MapProperty`: closed enumeration of the derived properties consumers bind to
//! - `MapProperties`: bitflags over `MapProperty`, returned by the filters
//! - `ChangeSource`: which of the subscribed objects produced the change
//! - `Republisher`: emits one coarse notification per affected property

use std::cell::Cell;

use bitflags::bitflags;
use game_core::{
    ChangeNotifier, CreatureField, EntityId, HeroField, PositionField, TransformField,
    VitalStatsField,
};
use strum::IntoEnumIterator;

/// Derived property of a creature marker that consumers re-read on change.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::AsRefStr,
    strum::EnumIter,
)]
pub enum MapProperty {
    Name,
    Position,
    Direction,
    VitalStats,
    Radius,
    AggroRadius,
    IsTarget,
}

impl MapProperty {
    /// The single-bit set holding this property.
    pub const fn flag(self) -> MapProperties {
        match self {
            Self::Name => MapProperties::NAME,
            Self::Position => MapProperties::POSITION,
            Self::Direction => MapProperties::DIRECTION,
            Self::VitalStats => MapProperties::VITAL_STATS,
            Self::Radius => MapProperties::RADIUS,
            Self::AggroRadius => MapProperties::AGGRO_RADIUS,
            Self::IsTarget => MapProperties::IS_TARGET,
        }
    }
}

bitflags! {
    /// Set of derived properties affected by one source change.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct MapProperties: u8 {
        const NAME         = 1 << 0;
        const POSITION     = 1 << 1;
        const DIRECTION    = 1 << 2;
        const VITAL_STATS  = 1 << 3;
        const RADIUS       = 1 << 4;
        const AGGRO_RADIUS = 1 << 5;
        const IS_TARGET    = 1 << 6;

        /// Anything that moves the marker or its heading indicator.
        const MOTION = Self::POSITION.bits() | Self::DIRECTION.bits();

        /// Everything that depends on the zoom scale.
        const ZOOM = Self::MOTION.bits() | Self::RADIUS.bits() | Self::AGGRO_RADIUS.bits();
    }
}

impl MapProperties {
    /// Members of the set in canonical publication order.
    pub fn properties(self) -> impl Iterator<Item = MapProperty> {
        MapProperty::iter().filter(move |property| self.contains(property.flag()))
    }
}

/// Origin of a change relayed by a marker: one of the six objects it listens
/// to, or its own zoom and viewport settings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum ChangeSource {
    CreatureIdentity,
    CreatureTransform,
    CreaturePosition,
    CreatureVitalStats,
    HeroPosition,
    HeroIdentity,
    /// Local scale or viewport mutation on the marker itself.
    ViewSettings,
}

pub fn creature_changed(field: CreatureField) -> MapProperties {
    match field {
        CreatureField::Name => MapProperties::NAME,
        CreatureField::Title | CreatureField::Kind | CreatureField::AggroRadius => {
            MapProperties::empty()
        }
    }
}

pub fn creature_transform_changed(field: TransformField) -> MapProperties {
    match field {
        TransformField::Direction => MapProperties::DIRECTION,
        TransformField::Velocity => MapProperties::empty(),
    }
}

/// Every component moves the marker, and the heading indicator is anchored to it.
pub fn creature_position_changed(field: PositionField) -> MapProperties {
    match field {
        PositionField::X | PositionField::Y | PositionField::Z => MapProperties::MOTION,
    }
}

pub fn creature_vital_stats_changed(field: VitalStatsField) -> MapProperties {
    match field {
        VitalStatsField::Hp | VitalStatsField::MaxHp => MapProperties::VITAL_STATS,
        VitalStatsField::Mp | VitalStatsField::MaxMp => MapProperties::empty(),
    }
}

/// The hero is the map origin, so any movement shifts every marker.
pub fn hero_position_changed(field: PositionField) -> MapProperties {
    match field {
        PositionField::X | PositionField::Y | PositionField::Z => MapProperties::MOTION,
    }
}

pub fn hero_changed(field: HeroField) -> MapProperties {
    match field {
        HeroField::TargetId => MapProperties::IS_TARGET,
        HeroField::Name => MapProperties::empty(),
    }
}

/// Outgoing side of a marker: relays filtered changes to consumers.
///
/// Once deactivated it drops every change, which keeps a disposed marker
/// silent even if a source delivers to a listener snapshot taken before the
/// listener was removed.
#[derive(Debug)]
pub struct Republisher {
    creature_id: EntityId,
    notifier: ChangeNotifier<MapProperty>,
    active: Cell<bool>,
}

impl Republisher {
    pub fn new(creature_id: EntityId) -> Self {
        Self {
            creature_id,
            notifier: ChangeNotifier::new(),
            active: Cell::new(true),
        }
    }

    pub fn notifier(&self) -> &ChangeNotifier<MapProperty> {
        &self.notifier
    }

    pub fn is_active(&self) -> bool {
        self.active.get()
    }

    pub fn deactivate(&self) {
        self.active.set(false);
    }

    /// Publishes one notification per member of `properties`.
    pub fn publish(&self, source: ChangeSource, properties: MapProperties) {
        if !self.is_active() {
            tracing::trace!(
                creature = %self.creature_id,
                %source,
                "Dropping change for disposed marker"
            );
            return;
        }

        if properties.is_empty() {
            tracing::trace!(
                creature = %self.creature_id,
                %source,
                "Change not visible on map"
            );
            return;
        }

        for property in properties.properties() {
            // A consumer may dispose the marker while handling an earlier member.
            if !self.is_active() {
                return;
            }
            tracing::trace!(creature = %self.creature_id, %source, %property, "Republishing");
            self.notifier.notify(property);
        }
    }
}
