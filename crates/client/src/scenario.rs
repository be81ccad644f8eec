//! Scripted minimap session.
//!
//! Stands in for the network layer: spawns a hero and a few creatures, tracks
//! them on a [`MinimapView`] and replays a short sequence of server updates.
//! Every coarse notification a marker publishes is logged together with the
//! re-read value, which is what a renderer would do.

use std::rc::{Rc, Weak};

use anyhow::{Context, Result};
use client_frontend_core::{CreatureMapViewModel, MapProperty, MinimapConfig, MinimapView};
use game_core::{Creature, CreatureKind, EntityId, Hero, Observable, Vec3, VitalStats};

pub struct Scenario {
    hero: Rc<Hero>,
    creatures: Vec<Rc<Creature>>,
    minimap: MinimapView,
}

impl Scenario {
    pub fn new(config: MinimapConfig) -> Result<Self> {
        let hero = Rc::new(
            Hero::new(EntityId(1), "Aria")
                .with_position(Vec3::new(5.0, 5.0, 0.0))
                .with_vital_stats(VitalStats::new(120, 120, 40, 40)),
        );

        let creatures = vec![
            Rc::new(
                Creature::new(EntityId(100), CreatureKind::Npc, "Goblin")
                    .with_position(Vec3::new(10.0, 10.0, 0.0))
                    .with_vital_stats(VitalStats::new(50, 50, 0, 0))
                    .with_aggro_radius(20.0),
            ),
            Rc::new(
                Creature::new(EntityId(101), CreatureKind::Npc, "Merchant")
                    .with_position(Vec3::new(-12.0, 3.0, 0.0))
                    .with_vital_stats(VitalStats::new(80, 80, 0, 0)),
            ),
            Rc::new(
                Creature::new(EntityId(200), CreatureKind::Player, "Borin")
                    .with_position(Vec3::new(0.0, -20.0, 0.0))
                    .with_vital_stats(VitalStats::new(90, 110, 30, 30)),
            ),
        ];

        let minimap =
            MinimapView::new(Rc::clone(&hero), config).context("invalid minimap configuration")?;

        Ok(Self {
            hero,
            creatures,
            minimap,
        })
    }

    pub fn run(mut self) -> Result<()> {
        for creature in &self.creatures {
            let marker = self
                .minimap
                .track(Rc::clone(creature))
                .with_context(|| format!("failed to track creature {}", creature.id()))?;
            log_notifications(marker);
        }
        log_snapshots(&self.minimap, "initial");

        let goblin = &self.creatures[0];
        let merchant = &self.creatures[1];

        tracing::info!("Goblin takes damage");
        goblin.vital_stats().set_hp(35);

        tracing::info!("Goblin changes its title (not drawn)");
        goblin.set_title("the Sneaky");

        tracing::info!("Goblin turns and steps towards the hero");
        goblin.transform().set_direction(Vec3::new(-1.0, 0.0, 0.0));
        goblin.transform().position().set(Vec3::new(8.0, 10.0, 0.0));

        tracing::info!("Hero targets the goblin");
        self.hero.set_target_id(Some(goblin.id()));

        tracing::info!("Hero walks north");
        self.hero.transform().position().set_y(9.0);

        tracing::info!("Zooming out");
        self.minimap.set_scale(2.0)?;

        if let Err(error) = self.minimap.set_scale(0.0) {
            tracing::warn!("Zoom rejected: {}", error);
        }

        log_snapshots(&self.minimap, "after updates");

        tracing::info!("Merchant leaves observation range");
        self.minimap.untrack(merchant.id());
        merchant.set_name("Wandering Merchant");

        if let Some(target) = self.minimap.target() {
            tracing::info!(creature = %target.id(), "Current target: {}", target.name());
        }

        self.minimap.clear();
        tracing::info!("Minimap cleared");
        Ok(())
    }
}

/// Subscribes a logger that re-reads each announced property.
fn log_notifications(marker: &CreatureMapViewModel) {
    let id = marker.id();
    let reader = MarkerReader::new(marker);
    marker.subscribe(move |property| {
        tracing::info!(creature = %id, %property, "{}", reader.describe(property));
    });
}

/// Re-reads derived values from inside a notification.
///
/// The listener cannot hold the marker itself, so it reads the same sources
/// the marker projects from.
struct MarkerReader {
    creature: Weak<Creature>,
    hero: Weak<Hero>,
}

impl MarkerReader {
    fn new(marker: &CreatureMapViewModel) -> Self {
        Self {
            creature: Rc::downgrade(marker.creature()),
            hero: Rc::downgrade(marker.hero()),
        }
    }

    fn describe(&self, property: MapProperty) -> String {
        let (Some(creature), Some(hero)) = (self.creature.upgrade(), self.hero.upgrade()) else {
            return String::from("source dropped");
        };

        match property {
            MapProperty::Name => format!("name = {}", creature.name()),
            MapProperty::VitalStats => {
                let stats = creature.vital_stats();
                format!("hp = {}/{}", stats.hp(), stats.max_hp())
            }
            MapProperty::IsTarget => {
                format!("targeted = {}", hero.target_id() == Some(creature.id()))
            }
            MapProperty::Position
            | MapProperty::Direction
            | MapProperty::Radius
            | MapProperty::AggroRadius => String::from("geometry changed"),
        }
    }
}

fn log_snapshots(minimap: &MinimapView, stage: &str) {
    for snapshot in minimap.snapshots() {
        tracing::info!(
            stage,
            creature = %snapshot.id,
            kind = %snapshot.kind,
            "{} at ({:.1}, {:.1}) r={:.1} aggro={:.1} hp={}/{} target={}",
            snapshot.name,
            snapshot.position.x,
            snapshot.position.y,
            snapshot.radius,
            snapshot.aggro_radius,
            snapshot.hp,
            snapshot.max_hp,
            snapshot.is_target,
        );
    }
}
