use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Errors from loading or validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("grid width must be at least 2, got {0}")]
    WidthTooSmall(u32),
    #[error("{field} must be positive, got {value}")]
    NotPositive { field: &'static str, value: f32 },
    #[error("near plane ({near}) must be closer than far plane ({far})")]
    DepthRange { near: f32, far: f32 },
}

/// Heightmap source and grid geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainConfig {
    /// Raw heightmap file, width * width bytes.
    pub heightmap: PathBuf,
    /// Grid width in samples. Used for loading and meshing alike.
    pub width: u32,
    /// Height of a 255 sample is just under this value.
    pub height_scale: f32,
    /// World units between neighbouring grid samples.
    pub step: f32,
    /// Offset added to every vertex Z so the terrain starts in view.
    pub z_offset: f32,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            heightmap: PathBuf::from("heightmap.raw"),
            width: 65,
            height_scale: 10.0,
            step: 0.1,
            z_offset: -99.0,
        }
    }
}

/// Initial camera placement and projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub position: Vec3,
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 4.0),
            fov_degrees: 50.0,
            near: 0.01,
            far: 100.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
    pub title: String,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 768,
            title: "Terrain Viewer".into(),
        }
    }
}

impl WindowConfig {
    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }
}

/// Movement, look and zoom tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlConfig {
    /// Units per second.
    pub move_speed: f32,
    /// Degrees per pixel of mouse motion.
    pub mouse_sensitivity: f32,
    /// Degrees of field of view per scroll line. Negative zooms in on scroll up.
    pub zoom_sensitivity: f32,
    /// Scroll wheel zoom is off unless enabled here.
    pub scroll_zoom: bool,
    /// Drive the model rotation from the accumulated angle.
    pub spin: bool,
    pub degrees_per_second: f32,
}

impl Default for ControlConfig {
    fn default() -> Self {
        Self {
            move_speed: 2.0,
            mouse_sensitivity: 0.1,
            zoom_sensitivity: -0.2,
            scroll_zoom: false,
            spin: false,
            degrees_per_second: 180.0,
        }
    }
}

/// Top-level viewer configuration, loadable from JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub terrain: TerrainConfig,
    pub camera: CameraConfig,
    pub window: WindowConfig,
    pub controls: ControlConfig,
}

impl AppConfig {
    /// Load a config file. Missing fields take their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let file = std::fs::File::open(path.as_ref())?;
        let config: Self = serde_json::from_reader(std::io::BufReader::new(file))?;
        tracing::debug!("loaded config from {}", path.as_ref().display());
        Ok(config)
    }

    /// Write the config as pretty JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.terrain.width < 2 {
            return Err(ConfigError::WidthTooSmall(self.terrain.width));
        }
        for (field, value) in [
            ("terrain.height_scale", self.terrain.height_scale),
            ("terrain.step", self.terrain.step),
            ("camera.fov_degrees", self.camera.fov_degrees),
            ("camera.near", self.camera.near),
            ("controls.move_speed", self.controls.move_speed),
        ] {
            if value.is_nan() || value <= 0.0 {
                return Err(ConfigError::NotPositive { field, value });
            }
        }
        if self.camera.near >= self.camera.far {
            return Err(ConfigError::DepthRange {
                near: self.camera.near,
                far: self.camera.far,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_viewer_constants() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.terrain.width, 65);
        assert_eq!(cfg.terrain.height_scale, 10.0);
        assert_eq!(cfg.window.width, 1024);
        assert_eq!(cfg.window.height, 768);
        assert_eq!(cfg.controls.move_speed, 2.0);
        assert!(!cfg.controls.scroll_zoom);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn partial_json_fills_defaults() {
        let cfg: AppConfig =
            serde_json::from_str(r#"{ "terrain": { "width": 129 } }"#).unwrap();
        assert_eq!(cfg.terrain.width, 129);
        assert_eq!(cfg.terrain.step, 0.1);
        assert_eq!(cfg.camera.fov_degrees, 50.0);
    }

    #[test]
    fn rejects_degenerate_width() {
        let mut cfg = AppConfig::default();
        cfg.terrain.width = 1;
        assert!(matches!(cfg.validate(), Err(ConfigError::WidthTooSmall(1))));
    }

    #[test]
    fn rejects_non_positive_step() {
        let mut cfg = AppConfig::default();
        cfg.terrain.step = 0.0;
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::NotPositive {
                field: "terrain.step",
                ..
            })
        ));
    }

    #[test]
    fn rejects_inverted_depth_range() {
        let mut cfg = AppConfig::default();
        cfg.camera.near = 200.0;
        assert!(matches!(cfg.validate(), Err(ConfigError::DepthRange { .. })));
    }

    #[test]
    fn save_and_load() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        let mut cfg = AppConfig::default();
        cfg.controls.spin = true;
        cfg.camera.position = Vec3::new(1.0, 2.0, 3.0);
        cfg.save(tmp.path()).unwrap();

        let loaded = AppConfig::load(tmp.path()).unwrap();
        assert_eq!(loaded, cfg);
    }

    #[test]
    fn aspect_ratio() {
        let w = WindowConfig::default();
        assert!((w.aspect_ratio() - 4.0 / 3.0).abs() < 1e-6);
    }
}
