//! Minimap client binary.
//!
//! Composition root for the minimap view-models: loads `.env`, configures
//! logging, reads [`MinimapConfig`] from the environment and replays a
//! scripted session against it.
//!
//! # Environment
//!
//! - `RUST_LOG` - tracing filter (default: `info`)
//! - `MINIMAP_LOG_DIR` - also write logs to `minimap.log` in this directory
//! - `MINIMAP_SCALE`, `MINIMAP_VIEWPORT_WIDTH`, `MINIMAP_VIEWPORT_HEIGHT`
//!
//! ```bash
//! RUST_LOG=client_frontend_core=trace cargo run -p minimap-client
//! ```

mod logging;
mod scenario;

use anyhow::Result;
use client_frontend_core::MinimapConfig;

use crate::scenario::Scenario;

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let _guard = logging::setup_logging()?;

    let config = MinimapConfig::from_env();
    tracing::info!(
        scale = config.scale,
        width = config.viewport_size.x,
        height = config.viewport_size.y,
        "Starting minimap client"
    );

    Scenario::new(config)?.run()?;

    tracing::info!("Minimap session complete");
    Ok(())
}
