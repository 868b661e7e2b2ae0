//! # Room Scene
//!
//! Interaction logic for a small interactive 3D room: a loaded scene with a
//! chair, a plant, a speaker and a desktop screen, plus one procedurally
//! built shape.
//!
//! ## Features
//!
//! - **Chair motion**: selecting the chair slides it along X, selecting the
//!   plant sends it home, both with per-frame exponential smoothing
//! - **Music and notes**: the speaker toggles a looping track and a stream
//!   of fading note sprites
//! - **Spinner**: a cone that rotates every frame and flips color on click
//! - **Headless**: the scene graph, texture cache and audio backend are
//!   traits or lightweight stand-ins, so the logic runs without a renderer
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use room_scene::prelude::*;
//! use std::time::Duration;
//!
//! let config = RoomConfig::default();
//! let backend = create_backend(&AudioBackendConfig::default());
//! let mut textures = TextureCache::new();
//! let mut graph = NodeArena::new();
//!
//! let mut room = RoomController::from_config(config, backend, &mut textures);
//! room.on_scene_loaded(&mut graph);
//! room.select(&mut graph, "speaker");
//! room.tick(&mut graph, Duration::from_millis(16));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod foundation;
pub mod config;
pub mod scene;
pub mod assets;
pub mod audio;
pub mod events;
pub mod input;
pub mod interaction;

/// Common imports for room users
pub mod prelude {
    pub use crate::{
        foundation::{
            math::{Transform, Vec3},
            time::{FrameClock, IntervalTimer},
        },
        config::{Config, ConfigError, RoomConfig},
        scene::{Color, Material, NodeArena, NodeId, NodeKind, SceneGraph, SceneNode, AABB},
        assets::{TextureCache, TextureHandle},
        audio::{
            backend::create_backend, AudioBackend, AudioBackendConfig, AudioError, PlaybackState,
        },
        events::{Event, EventHandler, EventQueue, EventType},
        input::{pick, MouseState, PickCamera, PickHit, Ray},
        interaction::{Interaction, RoomController, ShapeColor},
    };
}
