use std::cell::RefCell;
use std::rc::Rc;

use client_frontend_core::{
    CreatureMapViewModel, MapProperty, MinimapConfig, MinimapView,
    projection::{MIN_MARKER_RADIUS, marker_radius},
};
use game_core::{Creature, CreatureKind, EntityId, Hero, Observable, Vec3, VitalStats};

type Recorded = Rc<RefCell<Vec<MapProperty>>>;

fn record(view_model: &CreatureMapViewModel) -> Recorded {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    view_model.subscribe(move |property| sink.borrow_mut().push(property));
    seen
}

fn count(seen: &Recorded, property: MapProperty) -> usize {
    seen.borrow().iter().filter(|p| **p == property).count()
}

fn goblin(position: Vec3) -> Rc<Creature> {
    Rc::new(
        Creature::new(EntityId(100), CreatureKind::Npc, "Goblin")
            .with_position(position)
            .with_vital_stats(VitalStats::new(50, 50, 10, 10)),
    )
}

/// Zoom scenario: a creature 5 units up-right of the hero on a 100x100 map.
///
/// 1. At scale 1 the marker sits 5 pixels from the centre
/// 2. Zooming out to scale 2 halves the offset and announces Position
/// 3. Panning the hero moves the marker without touching the radius
#[test]
fn zooming_and_panning_move_the_marker() {
    let creature = goblin(Vec3::new(10.0, 10.0, 0.0));
    let hero = Rc::new(Hero::new(EntityId(1), "Aria").with_position(Vec3::new(5.0, 5.0, 0.0)));
    let mut marker = CreatureMapViewModel::builder()
        .creature(Rc::clone(&creature))
        .hero(Rc::clone(&hero))
        .viewport_size(Vec3::new(100.0, 100.0, 0.0))
        .build()
        .expect("marker should build");
    let seen = record(&marker);

    // Phase 1
    assert_eq!(marker.position(), Vec3::new(55.0, 55.0, 0.0));

    // Phase 2
    marker.set_scale(2.0).expect("scale 2 is valid");
    assert_eq!(marker.position(), Vec3::new(52.5, 52.5, 0.0));
    assert_eq!(count(&seen, MapProperty::Position), 1);
    assert_eq!(count(&seen, MapProperty::Radius), 1);

    // Phase 3
    seen.borrow_mut().clear();
    hero.transform().position().set(Vec3::new(9.0, 5.0, 0.0));
    assert_eq!(marker.position(), Vec3::new(50.5, 52.5, 0.0));
    assert_eq!(
        *seen.borrow(),
        vec![MapProperty::Position, MapProperty::Direction]
    );
}

#[test]
fn only_visible_changes_reach_consumers() {
    let creature = goblin(Vec3::ZERO);
    let hero = Rc::new(Hero::new(EntityId(1), "Aria"));
    let marker = CreatureMapViewModel::new(Rc::clone(&creature), Rc::clone(&hero));
    let seen = record(&marker);

    creature.vital_stats().set_hp(20);
    assert_eq!(*seen.borrow(), vec![MapProperty::VitalStats]);

    creature.set_kind(CreatureKind::Player);
    creature.set_title("Scout");
    creature.set_aggro_radius(15.0);
    creature.vital_stats().set_mp(0);
    creature.transform().set_velocity(Vec3::new(2.0, 0.0, 0.0));
    hero.set_name("Aria the Swift");

    assert_eq!(seen.borrow().len(), 1);
    assert!(marker.is_aggressive());
}

#[test]
fn target_selection_is_announced_once_per_change() {
    let creature = goblin(Vec3::ZERO);
    let hero = Rc::new(Hero::new(EntityId(1), "Aria"));
    let marker = CreatureMapViewModel::new(Rc::clone(&creature), Rc::clone(&hero));
    let seen = record(&marker);

    hero.set_target_id(Some(creature.id()));
    assert!(marker.is_target());
    assert_eq!(count(&seen, MapProperty::IsTarget), 1);

    hero.set_target_id(Some(creature.id()));
    assert_eq!(count(&seen, MapProperty::IsTarget), 1);

    hero.set_target_id(None);
    assert!(!marker.is_target());
    assert_eq!(count(&seen, MapProperty::IsTarget), 2);
}

#[test]
fn aggro_radius_is_projected_by_scale() {
    let creature = goblin(Vec3::ZERO);
    creature.set_aggro_radius(20.0);
    let hero = Rc::new(Hero::new(EntityId(1), "Aria"));

    let marker = CreatureMapViewModel::builder()
        .creature(creature)
        .hero(hero)
        .scale(4.0)
        .build()
        .expect("marker should build");

    assert_eq!(marker.aggro_radius(), 5.0);
    assert!(marker.is_aggressive());
}

#[test]
fn radius_formula_holds_across_scales() {
    for scale in [0.1_f32, 0.5, 1.0, 2.0, 2.5, 3.0, 10.0, 1e6] {
        let radius = marker_radius(scale);
        assert_eq!(radius, (10.0 / scale).max(4.0));
        assert!(radius >= MIN_MARKER_RADIUS);
    }
}

#[test]
fn screen_position_matches_formula_for_many_offsets() {
    let hero = Rc::new(Hero::new(EntityId(1), "Aria"));
    let viewport = Vec3::new(320.0, 240.0, 0.0);

    for (cx, cy, hx, hy, scale) in [
        (0.0, 0.0, 0.0, 0.0, 1.0),
        (100.0, -40.0, 20.0, 10.0, 2.0),
        (-64.0, 32.0, 16.0, -16.0, 8.0),
        (1000.0, 1000.0, 999.0, 998.0, 0.5),
    ] {
        let creature = goblin(Vec3::new(cx, cy, 12.0));
        hero.transform().position().set(Vec3::new(hx, hy, 0.0));
        let marker = CreatureMapViewModel::builder()
            .creature(creature)
            .hero(Rc::clone(&hero))
            .scale(scale)
            .viewport_size(viewport)
            .build()
            .expect("marker should build");

        let position = marker.position();
        assert_eq!(position.x, (cx - hx) / scale + viewport.x / 2.0);
        assert_eq!(position.y, (cy - hy) / scale + viewport.y / 2.0);
        assert_eq!(position.z, 0.0);
    }
}

/// Lifecycle scenario: creatures enter and leave observation range.
#[test]
fn minimap_lifecycle_releases_every_listener() {
    let hero = Rc::new(Hero::new(EntityId(1), "Aria"));
    let mut minimap = MinimapView::new(
        Rc::clone(&hero),
        MinimapConfig::new(1.0, Vec3::new(100.0, 100.0, 0.0)),
    )
    .expect("valid config");

    let near = goblin(Vec3::new(10.0, 0.0, 0.0));
    let seen = record(minimap.track(Rc::clone(&near)).expect("tracked"));

    near.transform().position().set_x(12.0);
    assert_eq!(count(&seen, MapProperty::Position), 1);

    assert!(minimap.untrack(near.id()));
    near.transform().position().set_x(14.0);
    hero.set_target_id(Some(near.id()));

    assert_eq!(count(&seen, MapProperty::Position), 1);
    assert_eq!(count(&seen, MapProperty::IsTarget), 0);
    assert_eq!(hero.changes().listener_count(), 0);
    assert_eq!(hero.transform().position().changes().listener_count(), 0);
    assert_eq!(near.transform().position().changes().listener_count(), 0);
}

#[test]
fn marker_disposed_mid_delivery_stays_silent() {
    let creature = goblin(Vec3::ZERO);
    let hero = Rc::new(Hero::new(EntityId(1), "Aria"));

    // `earlier` is wired first, so its listener on the creature runs before
    // `later`'s within the same delivery.
    let earlier = CreatureMapViewModel::new(Rc::clone(&creature), Rc::clone(&hero));
    let later = Rc::new(RefCell::new(CreatureMapViewModel::new(
        Rc::clone(&creature),
        Rc::clone(&hero),
    )));

    let weak = Rc::downgrade(&later);
    earlier.subscribe(move |_| {
        if let Some(later) = weak.upgrade() {
            later.borrow_mut().dispose();
        }
    });
    let seen = record(&later.borrow());

    // The creature's listener snapshot still holds `later` when it is disposed.
    creature.set_name("Hobgoblin");

    assert!(later.borrow().is_disposed());
    assert!(seen.borrow().is_empty());
    assert_eq!(creature.changes().listener_count(), 1);

    creature.set_name("Goblin King");
    assert!(seen.borrow().is_empty());
}
