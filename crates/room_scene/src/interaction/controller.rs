//! Frame-driven controller tying the room interactions together

use super::{ChairMover, Interaction, NamedNodes, Note, NoteLifecycle, ShapeColor, ShapeSpinner};
use crate::assets::{TextureCache, TextureHandle};
use crate::audio::{AudioBackend, AudioController, PlaybackState};
use crate::config::RoomConfig;
use crate::events::{Event, EventHandler, EventType};
use crate::foundation::math::Vec3;
use crate::scene::{NodeId, SceneGraph};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use std::time::Duration;

/// Interactive room state machine
///
/// Holds only handles into the scene graph. Every operation tolerates
/// missing nodes and swallows audio failures, so nothing here returns an
/// error.
pub struct RoomController {
    config: RoomConfig,
    nodes: NamedNodes,
    mover: ChairMover,
    notes: NoteLifecycle,
    audio: AudioController,
    spinner: ShapeSpinner,
    screen_texture: TextureHandle,
}

impl RoomController {
    /// Create a controller; textures named in `config` are registered in `textures`
    pub fn new(
        config: RoomConfig,
        backend: Box<dyn AudioBackend>,
        rng: Box<dyn RngCore>,
        textures: &mut TextureCache,
    ) -> Self {
        let note_textures = config
            .assets
            .note_textures
            .iter()
            .map(|path| textures.load(path))
            .collect();
        let screen_texture = textures.load(&config.assets.screen_texture);

        Self {
            nodes: NamedNodes::default(),
            mover: ChairMover::new(&config.chair),
            notes: NoteLifecycle::new(config.notes.clone(), note_textures, rng),
            audio: AudioController::new(backend, &config.assets),
            spinner: ShapeSpinner::new(&config.shape),
            screen_texture,
            config,
        }
    }

    /// Create a controller whose note picker is seeded from `config.notes.seed`
    /// or from OS entropy when no seed is set
    pub fn from_config(config: RoomConfig, backend: Box<dyn AudioBackend>, textures: &mut TextureCache) -> Self {
        let rng = match config.notes.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::new(config, backend, Box::new(rng), textures)
    }

    /// Resolve the named nodes and dress the screen
    ///
    /// Safe to call again after a reload; the chair's rest position keeps
    /// the value captured the first time a chair was found.
    pub fn on_scene_loaded(&mut self, graph: &mut dyn SceneGraph) {
        self.nodes.resolve(graph, &self.config.nodes);
        self.nodes.bind_screen_texture(graph, self.screen_texture);
        log::info!(
            "Scene ready: chair={} plant={} speaker={} screen={}",
            self.nodes.chair.is_some(),
            self.nodes.plant.is_some(),
            self.nodes.speaker.is_some(),
            self.nodes.screen.is_some()
        );
    }

    /// Swap the screen image and reapply it
    pub fn rebind_screen_texture(&mut self, graph: &mut dyn SceneGraph, texture: TextureHandle) {
        self.screen_texture = texture;
        self.nodes.resolve(graph, &self.config.nodes);
        self.nodes.bind_screen_texture(graph, texture);
    }

    /// Build the configured shape in `graph` and start spinning it
    pub fn spawn_shape(&mut self, graph: &mut dyn SceneGraph) -> Option<NodeId> {
        self.spinner.spawn(graph, &self.config.shape)
    }

    /// Spin an existing node
    pub fn attach_shape(&mut self, node: NodeId) {
        self.spinner.attach(node);
    }

    /// Advance every animation by one frame
    ///
    /// `elapsed` is the wall-clock time since the previous tick and only
    /// drives the note spawn timer; animation steps are per tick.
    pub fn tick(&mut self, graph: &mut dyn SceneGraph, elapsed: Duration) {
        self.mover.update(graph, self.nodes.chair);
        self.spinner.tick(graph);
        self.audio.update();
        self.notes.age(graph);
        self.notes.advance_timer(graph, self.nodes.speaker, elapsed);
    }

    /// Handle selection of the node called `name`
    ///
    /// Returns `false` when the name has no interaction bound to it.
    pub fn select(&mut self, graph: &mut dyn SceneGraph, name: &str) -> bool {
        let Some(interaction) = Interaction::from_node_name(name, &self.config.nodes) else {
            log::trace!("No interaction for '{}'", name);
            return false;
        };

        match interaction {
            Interaction::MoveChair => self.move_chair(graph),
            Interaction::ToggleMusic => self.toggle_music(),
            Interaction::RestoreChair => self.restore_chair(),
        }
        true
    }

    /// Handle a click on the standalone shape
    pub fn click_shape(&mut self, graph: &mut dyn SceneGraph) -> ShapeColor {
        let color = self.spinner.toggle_color(graph);
        log::debug!("Shape color now {:?}", color);
        color
    }

    fn move_chair(&mut self, graph: &dyn SceneGraph) {
        let Some(current) = self.nodes.chair.and_then(|chair| graph.position(chair)) else {
            log::debug!("Chair selected but not loaded");
            return;
        };
        let target = current + Vec3::new(self.config.chair.move_offset, 0.0, 0.0);
        log::info!("Moving chair to {:?}", target);
        self.mover.set_target(target);
        self.audio.trigger_cue();
    }

    fn toggle_music(&mut self) {
        match self.audio.toggle_ambient() {
            PlaybackState::Playing => self.notes.start(),
            PlaybackState::Paused => self.notes.stop(),
        }
    }

    fn restore_chair(&mut self) {
        let (Some(_), Some(rest)) = (self.nodes.chair, self.nodes.chair_rest()) else {
            log::debug!("Plant selected before the chair loaded");
            return;
        };
        log::info!("Restoring chair to {:?}", rest);
        self.mover.set_target(rest);
    }

    /// Chair goal, `None` while idle
    pub fn chair_target(&self) -> Option<Vec3> {
        self.mover.target()
    }

    /// Ambient channel state
    pub fn music_state(&self) -> PlaybackState {
        self.audio.ambient_state()
    }

    /// Notes currently floating
    pub fn live_notes(&self) -> &[Note] {
        self.notes.live_notes()
    }

    /// Current shape color
    pub fn shape_color(&self) -> ShapeColor {
        self.spinner.color()
    }

    /// Whether notes are being spawned
    pub fn is_spawning(&self) -> bool {
        self.notes.is_spawning()
    }

    /// Handles resolved at load
    pub fn named_nodes(&self) -> &NamedNodes {
        &self.nodes
    }

    /// Stop spawning and release the audio device
    pub fn shutdown(&mut self) {
        self.notes.stop();
        self.audio.shutdown();
    }
}

impl EventHandler for RoomController {
    fn on_event(&mut self, graph: &mut dyn SceneGraph, event: &Event) -> bool {
        let Some(name) = event.get_node_name() else {
            return false;
        };
        if let Some((x, y)) = event.get_position() {
            log::trace!("{:?} on '{}' at ({:.0}, {:.0})", event.event_type, name, x, y);
        }
        match event.event_type {
            EventType::PointerDown => self.select(graph, name),
            EventType::Click if name == self.config.shape.name => {
                self.click_shape(graph);
                true
            }
            EventType::Click => false,
        }
    }
}
