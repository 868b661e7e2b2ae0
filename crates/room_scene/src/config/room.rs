//! Room scene configuration
//!
//! Every tunable of the interactive room lives here. Defaults reproduce the
//! stock scene, so an empty or partial config file is valid.

use super::{Config, ConfigError};
use crate::foundation::math::Vec3;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Names of the nodes the controller resolves after the scene loads
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeNames {
    /// Movable chair
    pub chair: String,
    /// Plant that restores the chair
    pub plant: String,
    /// Speaker that toggles the music
    pub speaker: String,
    /// Desktop screen that receives the screen texture
    pub screen: String,
}

impl Default for NodeNames {
    fn default() -> Self {
        Self {
            chair: "chair".to_string(),
            plant: "plant".to_string(),
            speaker: "speaker".to_string(),
            screen: "desktop-plane-1".to_string(),
        }
    }
}

/// Chair motion tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChairSettings {
    /// Offset added to the chair's X coordinate when it is selected
    pub move_offset: f32,
    /// Fraction of the remaining gap closed each frame
    pub smoothing: f32,
    /// Distance under which the chair counts as arrived
    pub arrival_epsilon: f32,
}

impl Default for ChairSettings {
    fn default() -> Self {
        Self {
            move_offset: 1.5,
            smoothing: 0.1,
            arrival_epsilon: 0.01,
        }
    }
}

/// Floating note tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoteSettings {
    /// Milliseconds between spawns while music plays
    pub spawn_interval_ms: u64,
    /// Height above the speaker where notes appear
    pub spawn_height: f32,
    /// Upward drift per frame
    pub rise_per_tick: f32,
    /// Opacity lost per frame
    pub fade_per_tick: f32,
    /// Opacity of a freshly spawned note
    pub initial_opacity: f32,
    /// Uniform sprite scale
    pub scale: f32,
    /// Seed for the texture picker; entropy-seeded when absent
    pub seed: Option<u64>,
}

impl NoteSettings {
    /// Spawn period as a duration
    pub fn spawn_interval(&self) -> Duration {
        Duration::from_millis(self.spawn_interval_ms)
    }
}

impl Default for NoteSettings {
    fn default() -> Self {
        Self {
            spawn_interval_ms: 500,
            spawn_height: 0.2,
            rise_per_tick: 0.02,
            fade_per_tick: 0.005,
            initial_opacity: 1.0,
            scale: 0.3,
            seed: None,
        }
    }
}

/// Standalone spinning shape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShapeSettings {
    /// Node name of the shape
    pub name: String,
    /// World position
    pub position: Vec3,
    /// Radians added to the X and Y rotation every frame
    pub rotation_step: f32,
    /// Cone base radius
    pub radius: f32,
    /// Cone height
    pub height: f32,
    /// Number of sides around the cone
    pub radial_segments: u32,
}

impl Default for ShapeSettings {
    fn default() -> Self {
        Self {
            name: "cubo".to_string(),
            position: Vec3::new(3.0, 2.0, 2.0),
            rotation_step: 0.01,
            radius: 1.0,
            height: 2.0,
            radial_segments: 4,
        }
    }
}

/// Asset locations handed to the resource loader and the audio backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetPaths {
    /// Scene model
    pub model: PathBuf,
    /// Baked lighting texture for the room
    pub baked_texture: PathBuf,
    /// Image shown on the desktop screen
    pub screen_texture: PathBuf,
    /// Sprite textures picked at random for notes
    pub note_textures: Vec<PathBuf>,
    /// Looping background track
    pub ambient_track: PathBuf,
    /// One-shot cue played when the chair moves
    pub chair_cue: PathBuf,
}

impl Default for AssetPaths {
    fn default() -> Self {
        Self {
            model: PathBuf::from("assets/model.glb"),
            baked_texture: PathBuf::from("assets/baked.jpg"),
            screen_texture: PathBuf::from("assets/publicidad.jpg"),
            note_textures: vec![
                PathBuf::from("assets/note1.png"),
                PathBuf::from("assets/note2.png"),
                PathBuf::from("assets/note3.png"),
            ],
            ambient_track: PathBuf::from("assets/ambiente.mp3"),
            chair_cue: PathBuf::from("assets/chair-move.mp3"),
        }
    }
}

/// Complete room configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoomConfig {
    /// Log filter used when `RUST_LOG` is unset
    pub log_level: String,
    /// Named nodes
    pub nodes: NodeNames,
    /// Chair motion
    pub chair: ChairSettings,
    /// Floating notes
    pub notes: NoteSettings,
    /// Spinning shape
    pub shape: ShapeSettings,
    /// Asset paths
    pub assets: AssetPaths,
}

impl Default for RoomConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            nodes: NodeNames::default(),
            chair: ChairSettings::default(),
            notes: NoteSettings::default(),
            shape: ShapeSettings::default(),
            assets: AssetPaths::default(),
        }
    }
}

impl Config for RoomConfig {}

impl RoomConfig {
    /// Load from `path` and validate
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let config = Self::load_from_file(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would stall or break the animations
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.notes.spawn_interval_ms == 0 {
            return Err(ConfigError::Invalid("notes.spawn_interval_ms must be positive".into()));
        }
        if self.notes.fade_per_tick <= 0.0 {
            return Err(ConfigError::Invalid("notes.fade_per_tick must be positive".into()));
        }
        if !(self.chair.smoothing > 0.0 && self.chair.smoothing <= 1.0) {
            return Err(ConfigError::Invalid("chair.smoothing must be in (0, 1]".into()));
        }
        if self.chair.arrival_epsilon <= 0.0 {
            return Err(ConfigError::Invalid("chair.arrival_epsilon must be positive".into()));
        }
        if self.assets.note_textures.is_empty() {
            return Err(ConfigError::Invalid("assets.note_textures cannot be empty".into()));
        }
        if self.shape.radial_segments < 3 {
            return Err(ConfigError::Invalid("shape.radial_segments must be at least 3".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_stock_scene() {
        let config = RoomConfig::default();
        assert_eq!(config.nodes.screen, "desktop-plane-1");
        assert_eq!(config.notes.spawn_interval(), Duration::from_millis(500));
        assert_eq!(config.assets.note_textures.len(), 3);
        assert_eq!(config.shape.radial_segments, 4);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: RoomConfig = toml::from_str(
            r#"
            log_level = "debug"

            [chair]
            move_offset = 2.0

            [notes]
            seed = 7
            "#,
        )
        .unwrap();

        assert_eq!(config.log_level, "debug");
        assert_eq!(config.chair.move_offset, 2.0);
        assert_eq!(config.chair.smoothing, 0.1);
        assert_eq!(config.notes.seed, Some(7));
        assert_eq!(config.nodes, NodeNames::default());
    }

    #[test]
    fn test_ron_round_trip_through_file() {
        let path = std::env::temp_dir().join(format!("room_config_{}.ron", std::process::id()));

        let mut config = RoomConfig::default();
        config.notes.scale = 0.5;
        config.save_to_file(&path).unwrap();

        let loaded = RoomConfig::load(&path).unwrap();
        assert_eq!(loaded, config);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_unknown_extension_rejected() {
        let result = RoomConfig::default().save_to_file("room.json");
        assert!(matches!(result, Err(ConfigError::UnsupportedFormat(_))));

        // Checked before the file is opened
        let result = RoomConfig::load("does/not/exist.yaml");
        assert!(matches!(result, Err(ConfigError::UnsupportedFormat(_))));
        let result = RoomConfig::load("does/not/exist.toml");
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_validation_failures() {
        let mut config = RoomConfig::default();
        config.notes.fade_per_tick = 0.0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = RoomConfig::default();
        config.chair.smoothing = 1.5;
        assert!(config.validate().is_err());

        let mut config = RoomConfig::default();
        config.assets.note_textures.clear();
        assert!(config.validate().is_err());
    }
}
