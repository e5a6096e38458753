//! Session configuration.
//!
//! Loaded from an INI file at startup. Anything missing from the file keeps
//! its default, so an absent or partial file is never fatal to the host.
//!
//! # Configuration File Format
//!
//! ```ini
//! [time]
//! time_scale = 1.0
//! max_frame_ms = 250
//!
//! [physics]
//! ground_y = 300
//! bounds_left = -400
//! bounds_right = 400
//! bounds_top = -1000
//! bounds_bottom = 1000
//!
//! [camera]
//! zoom = 1.0
//!
//! [player]
//! spawn_x = 0
//! spawn_y = 200
//!
//! [session]
//! level = test_level
//! ```

use configparser::ini::Ini;
use log::info;
use std::path::PathBuf;

use crate::error::{CoreError, Result};

const DEFAULT_TIME_SCALE: f32 = 1.0;
const DEFAULT_MAX_FRAME_MS: f64 = 250.0;
const DEFAULT_GROUND_Y: f32 = 300.0;
const DEFAULT_BOUNDS: WorldBounds = WorldBounds {
    left: -400.0,
    right: 400.0,
    top: -1000.0,
    bottom: 1000.0,
};
const DEFAULT_ZOOM: f32 = 1.0;
const DEFAULT_SPAWN: (f32, f32) = (0.0, 200.0);
const DEFAULT_LEVEL: &str = "test_level";
const DEFAULT_CONFIG_PATH: &str = "./config.ini";

/// Rectangular world boundary in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldBounds {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl Default for WorldBounds {
    fn default() -> Self {
        DEFAULT_BOUNDS
    }
}

/// Session configuration values.
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Global simulation speed multiplier.
    pub time_scale: f32,
    /// Per-frame delta clamp in milliseconds.
    pub max_frame_ms: f64,
    /// World Y of the placeholder ground plane.
    pub ground_y: f32,
    pub world_bounds: WorldBounds,
    pub camera_zoom: f32,
    pub spawn_x: f32,
    pub spawn_y: f32,
    pub level: String,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

fn get_f32(config: &Ini, section: &str, key: &str) -> Option<f32> {
    config.getfloat(section, key).ok().flatten().map(|v| v as f32)
}

impl GameConfig {
    /// Create a configuration with default values.
    pub fn new() -> Self {
        Self {
            time_scale: DEFAULT_TIME_SCALE,
            max_frame_ms: DEFAULT_MAX_FRAME_MS,
            ground_y: DEFAULT_GROUND_Y,
            world_bounds: DEFAULT_BOUNDS,
            camera_zoom: DEFAULT_ZOOM,
            spawn_x: DEFAULT_SPAWN.0,
            spawn_y: DEFAULT_SPAWN.1,
            level: DEFAULT_LEVEL.to_string(),
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a default configuration bound to a custom file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load values from the INI file. Missing keys keep their current values.
    pub fn load_from_file(&mut self) -> Result<()> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| CoreError::Config(format!("Failed to load config file: {}", e)))?;

        // [time]
        if let Some(scale) = get_f32(&config, "time", "time_scale") {
            self.time_scale = scale;
        }
        if let Some(max) = config.getfloat("time", "max_frame_ms").ok().flatten() {
            self.max_frame_ms = max;
        }

        // [physics]
        if let Some(ground) = get_f32(&config, "physics", "ground_y") {
            self.ground_y = ground;
        }
        if let Some(left) = get_f32(&config, "physics", "bounds_left") {
            self.world_bounds.left = left;
        }
        if let Some(right) = get_f32(&config, "physics", "bounds_right") {
            self.world_bounds.right = right;
        }
        if let Some(top) = get_f32(&config, "physics", "bounds_top") {
            self.world_bounds.top = top;
        }
        if let Some(bottom) = get_f32(&config, "physics", "bounds_bottom") {
            self.world_bounds.bottom = bottom;
        }

        // [camera]
        if let Some(zoom) = get_f32(&config, "camera", "zoom") {
            self.camera_zoom = zoom;
        }

        // [player]
        if let Some(x) = get_f32(&config, "player", "spawn_x") {
            self.spawn_x = x;
        }
        if let Some(y) = get_f32(&config, "player", "spawn_y") {
            self.spawn_y = y;
        }

        // [session]
        if let Some(level) = config.get("session", "level") {
            self.level = level;
        }

        info!(
            "Loaded config: time_scale={}, ground_y={}, bounds=({}, {}, {}, {}), level={}",
            self.time_scale,
            self.ground_y,
            self.world_bounds.left,
            self.world_bounds.right,
            self.world_bounds.top,
            self.world_bounds.bottom,
            self.level
        );

        Ok(())
    }

    /// Save the configuration to the INI file, creating it if needed.
    pub fn save_to_file(&self) -> Result<()> {
        let mut config = Ini::new();

        config.set("time", "time_scale", Some(self.time_scale.to_string()));
        config.set("time", "max_frame_ms", Some(self.max_frame_ms.to_string()));

        config.set("physics", "ground_y", Some(self.ground_y.to_string()));
        config.set(
            "physics",
            "bounds_left",
            Some(self.world_bounds.left.to_string()),
        );
        config.set(
            "physics",
            "bounds_right",
            Some(self.world_bounds.right.to_string()),
        );
        config.set(
            "physics",
            "bounds_top",
            Some(self.world_bounds.top.to_string()),
        );
        config.set(
            "physics",
            "bounds_bottom",
            Some(self.world_bounds.bottom.to_string()),
        );

        config.set("camera", "zoom", Some(self.camera_zoom.to_string()));

        config.set("player", "spawn_x", Some(self.spawn_x.to_string()));
        config.set("player", "spawn_y", Some(self.spawn_y.to_string()));

        config.set("session", "level", Some(self.level.clone()));

        config
            .write(&self.config_path)
            .map_err(|e| CoreError::Config(format!("Failed to save config file: {}", e)))?;

        info!("Saved config to {:?}", self.config_path);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GameConfig::new();
        assert_eq!(config.time_scale, 1.0);
        assert_eq!(config.max_frame_ms, 250.0);
        assert_eq!(config.ground_y, 300.0);
        assert_eq!(config.world_bounds, WorldBounds::default());
        assert_eq!(config.level, "test_level");
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let mut config = GameConfig::with_path("/nonexistent/dir/config.ini");
        let err = config.load_from_file().unwrap_err();
        assert!(matches!(err, CoreError::Config(_)));
        assert_eq!(config.ground_y, 300.0);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.ini");
        std::fs::write(&path, "[physics]\nground_y = 500\n\n[session]\nlevel = cave\n").unwrap();

        let mut config = GameConfig::with_path(&path);
        config.load_from_file().unwrap();
        assert_eq!(config.ground_y, 500.0);
        assert_eq!(config.level, "cave");
        assert_eq!(config.time_scale, 1.0);
        assert_eq!(config.world_bounds.right, 400.0);
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.ini");

        let mut config = GameConfig::with_path(&path);
        config.time_scale = 0.5;
        config.world_bounds.left = -800.0;
        config.spawn_y = 120.0;
        config.save_to_file().unwrap();

        let mut loaded = GameConfig::with_path(&path);
        loaded.load_from_file().unwrap();
        assert_eq!(loaded.time_scale, 0.5);
        assert_eq!(loaded.world_bounds.left, -800.0);
        assert_eq!(loaded.spawn_y, 120.0);
    }
}
