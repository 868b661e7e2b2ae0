//! Headless room demo
//!
//! Builds the room in memory, plays a scripted series of clicks through the
//! picking and event layers, and drives the frame tick for a few seconds.

use room_scene::foundation::logging;
use room_scene::prelude::*;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

const FRAME_BUDGET: Duration = Duration::from_millis(16);
const RUN_TIME: f64 = 8.0;
const DEFAULT_CONFIG: &str = "room.toml";

#[derive(Error, Debug)]
enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Could not place '{0}' in the scene")]
    Scene(String),
}

/// Clicks replayed by the demo: (time in seconds, node, click kind)
const SCRIPT: &[(f64, &str, EventType)] = &[
    (0.5, "chair", EventType::PointerDown),
    (2.0, "speaker", EventType::PointerDown),
    (3.5, "cubo", EventType::Click),
    (4.0, "plant", EventType::PointerDown),
    (4.5, "cubo", EventType::Click),
    (6.0, "speaker", EventType::PointerDown),
];

fn load_config() -> Result<RoomConfig, AppError> {
    match std::env::args().nth(1) {
        Some(path) => Ok(RoomConfig::load(&path)?),
        None if Path::new(DEFAULT_CONFIG).exists() => Ok(RoomConfig::load(DEFAULT_CONFIG)?),
        None => Ok(RoomConfig::default()),
    }
}

fn place(graph: &mut NodeArena, parent: NodeId, node: SceneNode) -> Result<NodeId, AppError> {
    let name = node.name.clone();
    graph.add_child(parent, node).ok_or(AppError::Scene(name))
}

/// Stand-in for the loaded model: every mesh shares the baked material
fn build_room(graph: &mut NodeArena, config: &RoomConfig, textures: &mut TextureCache) -> Result<(), AppError> {
    log::info!("Building stand-in room for {:?}", config.assets.model);
    let baked = textures.load(&config.assets.baked_texture);
    let shared = graph.add_material(Material {
        map: Some(baked),
        ..Material::default()
    });
    let half = Vec3::new(0.5, 0.5, 0.5);

    let root = graph.root();
    let room = place(graph, root, SceneNode::new("room", NodeKind::Group))?;
    let furniture = [
        (config.nodes.chair.as_str(), Vec3::new(0.0, 0.0, 0.0)),
        (config.nodes.plant.as_str(), Vec3::new(-2.0, 0.0, 1.0)),
        (config.nodes.speaker.as_str(), Vec3::new(1.5, 1.0, -1.5)),
        (config.nodes.screen.as_str(), Vec3::new(0.0, 1.2, -2.0)),
    ];
    for (name, position) in furniture {
        place(
            graph,
            room,
            SceneNode::new(name, NodeKind::Mesh)
                .with_position(position)
                .with_material(shared)
                .with_bounds(AABB::from_center_extents(Vec3::zeros(), half)),
        )?;
    }

    log::info!("Room built with {} nodes", graph.node_count());
    Ok(())
}

/// Aim the camera at `name` and click the middle of the window
fn click_on(graph: &NodeArena, name: &str, kind: EventType, timestamp: f64) -> Option<Event> {
    let node = graph.find_by_name(name)?;
    let target = graph.world_bounds(node)?.center();

    let mut mouse = MouseState::default();
    mouse.update_position(f64::from(mouse.window_width) / 2.0, f64::from(mouse.window_height) / 2.0);
    let camera = PickCamera {
        eye: Vec3::new(-4.0, 4.0, 8.0),
        target,
        up: Vec3::y(),
        fov_y: 45f32.to_radians(),
        aspect: mouse.aspect(),
    };

    let (ndc_x, ndc_y) = mouse.screen_to_ndc();
    let hit = pick(graph, &camera.ray_through(ndc_x, ndc_y))?;
    log::debug!("Picked '{}' at distance {:.2}", hit.name, hit.distance);
    Some(hit.to_event(kind, &mouse, timestamp))
}

fn run() -> Result<(), AppError> {
    let config = load_config()?;
    logging::init_with_level(&config.log_level);
    log::info!("Starting room demo...");

    let mut textures = TextureCache::new();
    let mut graph = NodeArena::new();
    build_room(&mut graph, &config, &mut textures)?;

    let backend = create_backend(&AudioBackendConfig::default());
    let mut room = RoomController::from_config(config, backend, &mut textures);
    room.on_scene_loaded(&mut graph);
    if room.spawn_shape(&mut graph).is_none() {
        log::warn!("Could not place the spinning shape");
    }

    let mut events = EventQueue::new();
    for &(time, name, kind) in SCRIPT {
        match click_on(&graph, name, kind, time) {
            Some(event) => events.post(time, event),
            None => log::warn!("Nothing under the cursor for '{}'", name),
        }
    }

    let mut clock = FrameClock::new();
    let mut next_report = 1.0;
    loop {
        let elapsed = clock.update();
        let now = clock.total().as_secs_f64();
        if now >= RUN_TIME {
            break;
        }

        events.update_time(now);
        events.dispatch(&mut room, &mut graph);
        room.tick(&mut graph, elapsed);

        if now >= next_report {
            log::info!(
                "t={:.1}s music={:?} notes={} chair_target={:?} shape={:?}",
                now,
                room.music_state(),
                room.live_notes().len(),
                room.chair_target(),
                room.shape_color()
            );
            next_report += 1.0;
        }

        std::thread::sleep(FRAME_BUDGET);
    }

    room.shutdown();
    log::info!("Room demo finished after {} frames", clock.frame_count());
    Ok(())
}

fn main() {
    if let Err(e) = run() {
        // Logging may not be up yet when the config fails to load
        eprintln!("room_demo: {e}");
        std::process::exit(1);
    }
}
