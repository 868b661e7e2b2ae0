//! Ray picking against scene node bounds
//!
//! Screen coordinates go through Normalized Device Coordinates into a world
//! ray, which is tested against every node with bounds. Nearest hit wins.

use crate::events::{Event, EventArg, EventType};
use crate::foundation::math::Vec3;
use crate::scene::{NodeId, SceneGraph};

/// Mouse state for picking operations
#[derive(Debug, Clone)]
pub struct MouseState {
    /// Current screen-space X position (pixels)
    pub screen_x: f64,
    /// Current screen-space Y position (pixels)
    pub screen_y: f64,
    /// Window width in pixels
    pub window_width: u32,
    /// Window height in pixels
    pub window_height: u32,
}

impl MouseState {
    /// Create a new mouse state with default values
    pub fn new(window_width: u32, window_height: u32) -> Self {
        Self {
            screen_x: 0.0,
            screen_y: 0.0,
            window_width,
            window_height,
        }
    }

    /// Convert screen coordinates to Normalized Device Coordinates (NDC)
    ///
    /// NDC range: [-1, 1] where:
    /// - X: -1 = left, +1 = right
    /// - Y: -1 = top, +1 = bottom
    pub fn screen_to_ndc(&self) -> (f32, f32) {
        let ndc_x = (self.screen_x / f64::from(self.window_width)) as f32 * 2.0 - 1.0;
        let ndc_y = (self.screen_y / f64::from(self.window_height)) as f32 * 2.0 - 1.0;
        (ndc_x, ndc_y)
    }

    /// Update mouse position from window events
    pub fn update_position(&mut self, x: f64, y: f64) {
        self.screen_x = x;
        self.screen_y = y;
    }

    /// Aspect ratio of the window
    pub fn aspect(&self) -> f32 {
        self.window_width as f32 / self.window_height.max(1) as f32
    }
}

impl Default for MouseState {
    fn default() -> Self {
        Self::new(1920, 1080)
    }
}

/// World-space ray
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// Start point
    pub origin: Vec3,
    /// Unit direction
    pub direction: Vec3,
}

impl Ray {
    /// Create a ray; the direction is normalized
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
        }
    }
}

/// Perspective camera description used to build picking rays
#[derive(Debug, Clone)]
pub struct PickCamera {
    /// Eye position
    pub eye: Vec3,
    /// Point the camera looks at
    pub target: Vec3,
    /// Up hint
    pub up: Vec3,
    /// Vertical field of view in radians
    pub fov_y: f32,
    /// Width over height
    pub aspect: f32,
}

impl PickCamera {
    /// Ray from the eye through an NDC position (Y down)
    pub fn ray_through(&self, ndc_x: f32, ndc_y: f32) -> Ray {
        let forward = (self.target - self.eye).normalize();
        let right = forward.cross(&self.up).normalize();
        let camera_up = right.cross(&forward);

        let half_height = (self.fov_y * 0.5).tan();
        let half_width = half_height * self.aspect;
        let direction = forward + right * (ndc_x * half_width) - camera_up * (ndc_y * half_height);
        Ray::new(self.eye, direction)
    }
}

/// Result of a successful pick
#[derive(Debug, Clone, PartialEq)]
pub struct PickHit {
    /// Node that was hit
    pub node: NodeId,
    /// Its name
    pub name: String,
    /// Distance along the ray
    pub distance: f32,
}

impl PickHit {
    /// Event naming the hit node, stamped with the pointer's screen position
    pub fn to_event(&self, event_type: EventType, mouse: &MouseState, timestamp: f64) -> Event {
        Event::new(event_type, timestamp)
            .with_arg("node", EventArg::NodeName(self.name.clone()))
            .with_arg("position", EventArg::Position(mouse.screen_x as f32, mouse.screen_y as f32))
    }
}

/// Nearest node whose world bounds the ray enters
pub fn pick(graph: &dyn SceneGraph, ray: &Ray) -> Option<PickHit> {
    graph
        .descendants()
        .into_iter()
        .filter_map(|node| {
            let distance = graph.world_bounds(node)?.intersect_ray(ray.origin, ray.direction)?;
            Some((node, distance))
        })
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .and_then(|(node, distance)| {
            Some(PickHit {
                node,
                name: graph.name(node)?.to_string(),
                distance,
            })
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{NodeArena, NodeKind, SceneNode, AABB};

    fn unit_box() -> AABB {
        AABB::from_center_extents(Vec3::zeros(), Vec3::new(0.5, 0.5, 0.5))
    }

    #[test]
    fn test_screen_to_ndc_center() {
        let mut mouse = MouseState::new(1920, 1080);
        mouse.update_position(960.0, 540.0);

        let (ndc_x, ndc_y) = mouse.screen_to_ndc();
        assert!((ndc_x - 0.0).abs() < 0.001);
        assert!((ndc_y - 0.0).abs() < 0.001);
    }

    #[test]
    fn test_screen_to_ndc_corners() {
        let mouse = MouseState::new(1920, 1080);

        let (ndc_x, ndc_y) = mouse.screen_to_ndc();
        assert!((ndc_x - (-1.0)).abs() < 0.001); // Left edge
        assert!((ndc_y - (-1.0)).abs() < 0.001); // Top edge
    }

    #[test]
    fn test_center_ray_looks_at_target() {
        let camera = PickCamera {
            eye: Vec3::new(0.0, 0.0, 10.0),
            target: Vec3::zeros(),
            up: Vec3::y(),
            fov_y: std::f32::consts::FRAC_PI_4,
            aspect: 16.0 / 9.0,
        };
        let ray = camera.ray_through(0.0, 0.0);
        assert!((ray.direction - Vec3::new(0.0, 0.0, -1.0)).magnitude() < 1e-5);

        // Top of the screen points upward
        assert!(camera.ray_through(0.0, -1.0).direction.y > 0.0);
    }

    #[test]
    fn test_pick_returns_nearest() {
        let mut graph = NodeArena::new();
        let root = graph.root();
        graph.add_child(root, SceneNode::new("far", NodeKind::Mesh).with_bounds(unit_box()));
        let near = graph
            .add_child(
                root,
                SceneNode::new("near", NodeKind::Mesh)
                    .with_position(Vec3::new(0.0, 0.0, 3.0))
                    .with_bounds(unit_box()),
            )
            .unwrap();
        graph.add_child(root, SceneNode::new("group", NodeKind::Group));

        let ray = Ray::new(Vec3::new(0.0, 0.0, 10.0), Vec3::new(0.0, 0.0, -1.0));
        let hit = pick(&graph, &ray).unwrap();
        assert_eq!(hit.node, near);
        assert_eq!(hit.name, "near");
        assert!((hit.distance - 6.5).abs() < 1e-5);

        let mut mouse = MouseState::new(800, 600);
        mouse.update_position(400.0, 300.0);
        let event = hit.to_event(EventType::PointerDown, &mouse, 1.0);
        assert_eq!(event.event_type, EventType::PointerDown);
        assert_eq!(event.get_node_name(), Some("near"));
        assert_eq!(event.get_position(), Some((400.0, 300.0)));
    }

    #[test]
    fn test_pick_miss() {
        let mut graph = NodeArena::new();
        let root = graph.root();
        graph.add_child(root, SceneNode::new("box", NodeKind::Mesh).with_bounds(unit_box()));

        let ray = Ray::new(Vec3::new(5.0, 0.0, 10.0), Vec3::new(0.0, 0.0, -1.0));
        assert!(pick(&graph, &ray).is_none());
    }
}
