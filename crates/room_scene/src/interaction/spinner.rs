//! Continuously rotating standalone shape

use crate::config::ShapeSettings;
use crate::foundation::math::{Transform, Vec3};
use crate::scene::shapes;
use crate::scene::{Color, Material, NodeId, NodeKind, SceneGraph, SceneNode};

/// Two-valued surface color of the shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShapeColor {
    /// Initial color
    #[default]
    Blue,
    /// Color after one selection
    Red,
}

impl ShapeColor {
    /// The other value
    pub fn toggled(self) -> Self {
        match self {
            Self::Blue => Self::Red,
            Self::Red => Self::Blue,
        }
    }

    /// Surface color to render
    pub fn color(self) -> Color {
        match self {
            Self::Blue => Color::BLUE,
            Self::Red => Color::RED,
        }
    }
}

/// Spins the shape every tick and flips its color on selection
#[derive(Debug, Clone)]
pub struct ShapeSpinner {
    node: Option<NodeId>,
    step: f32,
    color: ShapeColor,
}

impl ShapeSpinner {
    /// Create a spinner with no shape attached
    pub fn new(settings: &ShapeSettings) -> Self {
        Self {
            node: None,
            step: settings.rotation_step,
            color: ShapeColor::default(),
        }
    }

    /// Build the cone described by `settings` under the root of `graph`
    ///
    /// The node gets its own blue material and the mesh bounds, so it is
    /// pickable. The spinner is attached to the new node.
    pub fn spawn(&mut self, graph: &mut dyn SceneGraph, settings: &ShapeSettings) -> Option<NodeId> {
        let mesh = shapes::cone(settings.radius, settings.height, settings.radial_segments);
        let material = graph.add_material(Material::colored(self.color.color()));

        let mut node = SceneNode::new(settings.name.clone(), NodeKind::Mesh)
            .with_transform(Transform::from_position(settings.position))
            .with_material(material);
        if let Some(bounds) = mesh.bounds() {
            node = node.with_bounds(bounds);
        }

        let root = graph.root();
        let id = graph.add_child(root, node)?;
        log::debug!(
            "Spawned '{}' with {} triangles at {:?}",
            settings.name,
            mesh.triangle_count(),
            settings.position
        );
        self.attach(id);
        Some(id)
    }

    /// Drive an existing node instead of a spawned one
    pub fn attach(&mut self, node: NodeId) {
        self.node = Some(node);
    }

    /// Node being spun, if any
    pub fn node(&self) -> Option<NodeId> {
        self.node
    }

    /// Current color state
    pub fn color(&self) -> ShapeColor {
        self.color
    }

    /// Add one step to the X and Y rotation
    pub fn tick(&self, graph: &mut dyn SceneGraph) {
        let Some(node) = self.node else { return };
        if let Some(rotation) = graph.rotation(node) {
            graph.set_rotation(node, rotation + Vec3::new(self.step, self.step, 0.0));
        }
    }

    /// Flip the color and apply it to the shape's material
    pub fn toggle_color(&mut self, graph: &mut dyn SceneGraph) -> ShapeColor {
        self.color = self.color.toggled();
        if let Some(material) = self.node.and_then(|node| graph.material_mut(node)) {
            material.color = self.color.color();
            material.needs_update = true;
        }
        self.color
    }
}
