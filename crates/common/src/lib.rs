//! Shared configuration for the terrain viewer.
//!
//! # Invariants
//! - A single grid width is threaded through loading, vertex generation and
//!   triangulation.
//! - Every field has a default, so a partial JSON file is a valid config.

pub mod config;

pub use config::{
    AppConfig, CameraConfig, ConfigError, ControlConfig, TerrainConfig, WindowConfig,
};

pub fn crate_info() -> &'static str {
    "terrainview-common v0.1.0"
}
