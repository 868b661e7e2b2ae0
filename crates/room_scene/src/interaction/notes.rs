//! Floating notes emitted above the speaker while music plays
//!
//! Spawning and aging are two producers over one collection. Both run on the
//! frame thread: [`NoteLifecycle::advance_timer`] turns elapsed wall-clock
//! time into spawns and [`NoteLifecycle::age`] moves and fades every live
//! note once per tick.

use crate::assets::TextureHandle;
use crate::config::NoteSettings;
use crate::foundation::math::{Transform, Vec3};
use crate::foundation::time::IntervalTimer;
use crate::scene::{Material, MaterialId, NodeId, NodeKind, SceneGraph, SceneNode};
use rand::seq::SliceRandom;
use rand::RngCore;
use std::time::Duration;

/// Opacity at or below which a note is retired
const RETIRE_OPACITY: f32 = 1e-6;

/// One live note
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Note {
    /// Sprite node attached under the scene root
    pub node: NodeId,
    /// Material owned by this note alone
    pub material: MaterialId,
    /// Current opacity
    pub opacity: f32,
    /// Ticks aged so far
    pub age: u32,
}

/// Spawns, ages and retires notes
pub struct NoteLifecycle {
    settings: NoteSettings,
    textures: Vec<TextureHandle>,
    timer: IntervalTimer,
    live: Vec<Note>,
    rng: Box<dyn RngCore>,
}

impl NoteLifecycle {
    /// Create a stopped lifecycle picking from `textures`
    pub fn new(settings: NoteSettings, textures: Vec<TextureHandle>, rng: Box<dyn RngCore>) -> Self {
        let timer = IntervalTimer::new(settings.spawn_interval());
        Self {
            settings,
            textures,
            timer,
            live: Vec::new(),
            rng,
        }
    }

    /// Begin spawning; an already running schedule is cancelled first
    pub fn start(&mut self) {
        self.timer.start();
        log::debug!("Note spawning every {:?}", self.timer.period());
    }

    /// Stop future spawns; live notes keep aging out
    pub fn stop(&mut self) {
        if self.timer.is_armed() {
            log::debug!("Note spawning stopped with {} live", self.live.len());
        }
        self.timer.cancel();
    }

    /// Whether the spawn timer is armed
    pub fn is_spawning(&self) -> bool {
        self.timer.is_armed()
    }

    /// Notes currently in the scene, oldest first
    pub fn live_notes(&self) -> &[Note] {
        &self.live
    }

    /// Feed elapsed wall-clock time to the spawn timer
    ///
    /// Spawns at most one note per call, however long the frame was. A
    /// period that completes while the speaker is absent is skipped and the
    /// timer keeps running.
    pub fn advance_timer(
        &mut self,
        graph: &mut dyn SceneGraph,
        speaker: Option<NodeId>,
        elapsed: Duration,
    ) -> Option<NodeId> {
        if !self.timer.advance(elapsed) {
            return None;
        }
        let Some(origin) = speaker.and_then(|speaker| graph.position(speaker)) else {
            log::trace!("Speaker unavailable; note spawn skipped");
            return None;
        };
        self.spawn(graph, origin)
    }

    /// Spawn a single note above `origin`
    pub fn spawn(&mut self, graph: &mut dyn SceneGraph, origin: Vec3) -> Option<NodeId> {
        let texture = self.textures.choose(&mut self.rng).copied()?;

        let material = graph.add_material(Material::sprite(texture, self.settings.initial_opacity));
        let position = origin + Vec3::new(0.0, self.settings.spawn_height, 0.0);
        let transform = Transform::from_position(position).with_uniform_scale(self.settings.scale);
        let sprite = SceneNode::new("note", NodeKind::Sprite)
            .with_transform(transform)
            .with_material(material);

        let root = graph.root();
        let Some(node) = graph.add_child(root, sprite) else {
            graph.remove_material(material);
            return None;
        };

        self.live.push(Note {
            node,
            material,
            opacity: self.settings.initial_opacity,
            age: 0,
        });
        log::trace!("Spawned note {:?} with texture {}", node, texture.id());
        Some(node)
    }

    /// Rise and fade every live note by one tick, retiring faded ones
    ///
    /// Opacity is derived from the note's age rather than decremented, so a
    /// note spawned at full opacity retires on exactly the
    /// `initial_opacity / fade_per_tick`-th tick. A note whose node or
    /// material has gone missing still ages and retires on schedule.
    pub fn age(&mut self, graph: &mut dyn SceneGraph) {
        let NoteSettings {
            rise_per_tick,
            fade_per_tick,
            initial_opacity,
            ..
        } = self.settings;

        self.live.retain_mut(|note| {
            note.age += 1;
            note.opacity = initial_opacity - fade_per_tick * note.age as f32;

            if let Some(transform) = graph.transform_mut(note.node) {
                transform.position.y += rise_per_tick;
            }
            if let Some(material) = graph.material_mut(note.node) {
                material.opacity = note.opacity.max(0.0);
                material.needs_update = true;
            }

            if note.opacity <= RETIRE_OPACITY {
                graph.detach(note.node);
                graph.remove_material(note.material);
                log::trace!("Retired note {:?} after {} ticks", note.node, note.age);
                return false;
            }
            true
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::TextureCache;
    use crate::scene::NodeArena;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const INTERVAL: Duration = Duration::from_millis(500);

    fn lifecycle(seed: u64) -> NoteLifecycle {
        let mut cache = TextureCache::new();
        let textures = ["note1.png", "note2.png", "note3.png"]
            .iter()
            .map(|path| cache.load(path))
            .collect();
        NoteLifecycle::new(NoteSettings::default(), textures, Box::new(StdRng::seed_from_u64(seed)))
    }

    fn room() -> (NodeArena, NodeId) {
        let mut graph = NodeArena::new();
        let root = graph.root();
        let speaker = graph
            .add_child(root, SceneNode::new("speaker", NodeKind::Mesh).with_position(Vec3::new(2.0, 1.0, 0.0)))
            .unwrap();
        (graph, speaker)
    }

    #[test]
    fn test_spawn_places_sprite_above_speaker() {
        let (mut graph, speaker) = room();
        let mut notes = lifecycle(1);
        notes.start();

        assert!(notes.advance_timer(&mut graph, Some(speaker), INTERVAL).is_some());

        let note = notes.live_notes()[0];
        let transform = graph.transform(note.node).unwrap();
        assert_relative_eq!(transform.position, Vec3::new(2.0, 1.2, 0.0), epsilon = 1e-6);
        assert_relative_eq!(transform.scale, Vec3::repeat(0.3));

        let material = graph.material(note.node).unwrap();
        assert!(material.transparent);
        assert!(material.map.is_some());
        assert_eq!(material.opacity, 1.0);
        assert_eq!(graph.node(note.node).unwrap().parent(), Some(graph.root()));
    }

    #[test]
    fn test_restart_does_not_overlap_schedules() {
        let (mut graph, speaker) = room();
        let mut notes = lifecycle(2);

        notes.start();
        notes.advance_timer(&mut graph, Some(speaker), Duration::from_millis(400));
        notes.start();
        assert!(notes.advance_timer(&mut graph, Some(speaker), Duration::from_millis(400)).is_none());
        assert!(notes.advance_timer(&mut graph, Some(speaker), Duration::from_millis(100)).is_some());
        assert_eq!(notes.live_notes().len(), 1);
    }

    #[test]
    fn test_long_stall_spawns_a_single_note() {
        let (mut graph, speaker) = room();
        let mut notes = lifecycle(8);
        notes.start();

        assert!(notes.advance_timer(&mut graph, Some(speaker), Duration::from_secs(600)).is_some());
        assert!(notes.advance_timer(&mut graph, Some(speaker), Duration::from_millis(16)).is_none());
        assert_eq!(notes.live_notes().len(), 1);
    }

    #[test]
    fn test_stop_keeps_live_notes_aging() {
        let (mut graph, speaker) = room();
        let mut notes = lifecycle(3);
        notes.start();
        notes.advance_timer(&mut graph, Some(speaker), INTERVAL);

        notes.stop();
        notes.stop();
        assert!(!notes.is_spawning());
        assert!(notes.advance_timer(&mut graph, Some(speaker), INTERVAL * 4).is_none());
        assert_eq!(notes.live_notes().len(), 1);

        notes.age(&mut graph);
        assert_eq!(notes.live_notes()[0].age, 1);
    }

    #[test]
    fn test_note_retires_on_tick_two_hundred() {
        let (mut graph, speaker) = room();
        let mut notes = lifecycle(4);
        let origin = graph.position(speaker).unwrap();
        let node = notes.spawn(&mut graph, origin).unwrap();
        let materials = graph.material_count();

        for _ in 0..199 {
            notes.age(&mut graph);
        }
        assert_eq!(notes.live_notes().len(), 1);
        assert!(graph.contains(node));
        assert_relative_eq!(graph.material(node).unwrap().opacity, 0.005, epsilon = 1e-5);

        notes.age(&mut graph);
        assert!(notes.live_notes().is_empty());
        assert!(!graph.contains(node));
        assert_eq!(graph.material_count(), materials - 1);
    }

    #[test]
    fn test_retiring_mid_collection_skips_nothing() {
        let (mut graph, _) = room();
        let mut notes = lifecycle(5);

        notes.spawn(&mut graph, Vec3::zeros());
        for _ in 0..100 {
            notes.age(&mut graph);
        }
        notes.spawn(&mut graph, Vec3::zeros());
        for _ in 0..100 {
            notes.age(&mut graph);
        }

        assert_eq!(notes.live_notes().len(), 1);
        assert_eq!(notes.live_notes()[0].age, 100);
    }

    #[test]
    fn test_missing_speaker_skips_spawn_but_keeps_timer() {
        let (mut graph, _) = room();
        let mut notes = lifecycle(6);
        notes.start();

        assert!(notes.advance_timer(&mut graph, None, INTERVAL).is_none());
        assert!(notes.advance_timer(&mut graph, None, INTERVAL).is_none());
        assert!(notes.is_spawning());
        assert!(notes.live_notes().is_empty());
    }

    #[test]
    fn test_detached_note_still_ages_out() {
        let (mut graph, _) = room();
        let mut notes = lifecycle(7);
        let node = notes.spawn(&mut graph, Vec3::zeros()).unwrap();
        graph.detach(node);

        for _ in 0..200 {
            notes.age(&mut graph);
        }
        assert!(notes.live_notes().is_empty());
    }

    #[test]
    fn test_seeded_picks_are_reproducible() {
        let pick = |seed| {
            let (mut graph, _) = room();
            let mut notes = lifecycle(seed);
            (0..8)
                .map(|_| {
                    let node = notes.spawn(&mut graph, Vec3::zeros()).unwrap();
                    graph.material(node).unwrap().map
                })
                .collect::<Vec<_>>()
        };
        assert_eq!(pick(42), pick(42));
    }
}
