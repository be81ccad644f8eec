//! Minimap configuration structures and loaders.

use std::env;

use game_core::Vec3;

use crate::projection::is_valid_scale;

/// Initial view settings applied to every marker on the minimap.
#[derive(Clone, Debug, PartialEq)]
pub struct MinimapConfig {
    /// Zoom divisor; world units per screen pixel.
    pub scale: f32,
    /// Size of the map widget; markers are centred at half of it.
    pub viewport_size: Vec3,
}

impl Default for MinimapConfig {
    fn default() -> Self {
        Self {
            scale: 1.0,
            viewport_size: Vec3::ZERO,
        }
    }
}

impl MinimapConfig {
    pub const fn new(scale: f32, viewport_size: Vec3) -> Self {
        Self {
            scale,
            viewport_size,
        }
    }

    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `MINIMAP_SCALE` - Zoom divisor (default: 1, must be > 0)
    /// - `MINIMAP_VIEWPORT_WIDTH` - Widget width (default: 0)
    /// - `MINIMAP_VIEWPORT_HEIGHT` - Widget height (default: 0)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(scale) = read_env::<f32>("MINIMAP_SCALE") {
            if is_valid_scale(scale) {
                config.scale = scale;
            } else {
                tracing::warn!("Ignoring MINIMAP_SCALE={}: must be greater than zero", scale);
            }
        }

        if let Some(width) = read_env::<f32>("MINIMAP_VIEWPORT_WIDTH") {
            config.viewport_size.x = width.max(0.0);
        }
        if let Some(height) = read_env::<f32>("MINIMAP_VIEWPORT_HEIGHT") {
            config.viewport_size.y = height.max(0.0);
        }

        config
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    parse_value(&env::var(key).ok()?)
}

fn parse_value<T>(raw: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    raw.trim().parse().ok()
}
