//! World-to-minimap coordinate transform.
//!
//! The minimap is a 2D plane centred on the hero: world offsets from the hero
//! are divided by the zoom `scale` and shifted to the middle of the viewport.
//! The Z component of every screen-space result is always zero.
//!
//! All functions are pure and never panic for a positive `scale`.

use game_core::Vec3;

/// Marker radius in pixels at scale 1.
pub const MAX_MARKER_RADIUS: f32 = 10.0;

/// Smallest marker radius, reached when zoomed far out.
pub const MIN_MARKER_RADIUS: f32 = 4.0;

/// Screen position of an entity at `world` relative to the hero at `hero`.
pub fn screen_position(world: Vec3, hero: Vec3, scale: f32, viewport_size: Vec3) -> Vec3 {
    let screen = (world - hero) / scale + viewport_size / 2.0;
    Vec3::new(screen.x, screen.y, 0.0)
}

/// Heading indicator: the facing unit vector stretched to twice the marker radius.
pub fn screen_direction(direction: Vec3, radius: f32) -> Vec3 {
    Vec3::new(direction.x * radius * 2.0, direction.y * radius * 2.0, 0.0)
}

/// Marker radius for `scale`, clamped so markers stay visible when zoomed out.
pub fn marker_radius(scale: f32) -> f32 {
    (MAX_MARKER_RADIUS / scale).max(MIN_MARKER_RADIUS)
}

/// Aggro radius converted from world units to screen units.
pub fn screen_aggro_radius(world_radius: f32, scale: f32) -> f32 {
    world_radius / scale
}

/// Returns true when `scale` can be used as a zoom divisor.
pub fn is_valid_scale(scale: f32) -> bool {
    scale.is_finite() && scale > 0.0
}
