//! Listener registrations owned by a creature marker.
//!
//! Each registration pairs the source it was attached to with the listener
//! handle, so disposal can detach exactly what was attached. Records hold the
//! source weakly: a marker never keeps an entity alive.

use std::rc::{Rc, Weak};

use game_core::{Creature, Detach, Hero, ListenerId, Observable};

use crate::services::propagation::{
    ChangeSource, MapProperties, Republisher, creature_changed, creature_position_changed,
    creature_transform_changed, creature_vital_stats_changed, hero_changed,
    hero_position_changed,
};

/// One attached listener.
pub struct Registration {
    source: ChangeSource,
    listener: ListenerId,
    handle: Weak<dyn Detach>,
}

impl Registration {
    pub fn source(&self) -> ChangeSource {
        self.source
    }

    pub fn listener(&self) -> ListenerId {
        self.listener
    }

    /// Removes the listener from its source.
    ///
    /// A source that has already been dropped took its listeners with it, so
    /// that case counts as released.
    fn release(self) -> bool {
        match self.handle.upgrade() {
            Some(source) => {
                let removed = source.detach(self.listener);
                if !removed {
                    tracing::warn!(
                        source = %self.source,
                        listener = %self.listener,
                        "Listener was already detached from source"
                    );
                }
                removed
            }
            None => {
                tracing::debug!(
                    source = %self.source,
                    listener = %self.listener,
                    "Source dropped before marker disposal"
                );
                true
            }
        }
    }
}

impl std::fmt::Debug for Registration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registration")
            .field("source", &self.source)
            .field("listener", &self.listener)
            .field("alive", &(self.handle.strong_count() > 0))
            .finish()
    }
}

/// All registrations of one marker.
#[derive(Debug, Default)]
pub struct SubscriptionSet {
    registrations: Vec<Registration>,
}

impl SubscriptionSet {
    /// Attaches the six listeners a creature marker depends on.
    pub fn wire(creature: &Rc<Creature>, hero: &Rc<Hero>, republisher: &Rc<Republisher>) -> Self {
        let mut set = Self::default();

        set.attach(
            ChangeSource::CreatureIdentity,
            creature,
            republisher,
            creature_changed,
        );
        set.attach(
            ChangeSource::CreatureTransform,
            creature.transform(),
            republisher,
            creature_transform_changed,
        );
        set.attach(
            ChangeSource::CreaturePosition,
            creature.transform().position(),
            republisher,
            creature_position_changed,
        );
        set.attach(
            ChangeSource::CreatureVitalStats,
            creature.vital_stats(),
            republisher,
            creature_vital_stats_changed,
        );
        set.attach(
            ChangeSource::HeroPosition,
            hero.transform().position(),
            republisher,
            hero_position_changed,
        );
        set.attach(
            ChangeSource::HeroIdentity,
            hero,
            republisher,
            hero_changed,
        );

        tracing::debug!(
            creature = %creature.id(),
            hero = %hero.id(),
            listeners = set.len(),
            "Wired creature marker"
        );

        set
    }

    fn attach<S>(
        &mut self,
        source: ChangeSource,
        target: &Rc<S>,
        republisher: &Rc<Republisher>,
        filter: fn(S::Field) -> MapProperties,
    ) where
        S: Observable + 'static,
    {
        let weak = Rc::downgrade(republisher);
        let listener = target.subscribe(move |field| {
            if let Some(republisher) = weak.upgrade() {
                republisher.publish(source, filter(field));
            }
        });

        let handle: Weak<S> = Rc::downgrade(target);
        let handle: Weak<dyn Detach> = handle;
        self.registrations.push(Registration {
            source,
            listener,
            handle,
        });
    }

    /// Detaches every listener. Returns how many were released.
    pub fn detach_all(&mut self) -> usize {
        self.registrations
            .drain(..)
            .map(Registration::release)
            .filter(|released| *released)
            .count()
    }

    pub fn len(&self) -> usize {
        self.registrations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Registration> {
        self.registrations.iter()
    }
}
