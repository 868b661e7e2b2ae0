//! Scene nodes and their materials

use crate::assets::TextureHandle;
use crate::foundation::math::{Transform, Vec3};
use super::AABB;

slotmap::new_key_type! {
    /// Stable handle to a node inside a scene graph
    pub struct NodeId;

    /// Stable handle to a material; several nodes may share one
    pub struct MaterialId;
}

/// Linear RGB color
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    /// Red channel
    pub r: f32,
    /// Green channel
    pub g: f32,
    /// Blue channel
    pub b: f32,
}

impl Color {
    /// Pure white
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0);
    /// Pure red
    pub const RED: Self = Self::new(1.0, 0.0, 0.0);
    /// Pure blue
    pub const BLUE: Self = Self::new(0.0, 0.0, 1.0);

    /// Create a color from channels
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

/// Surface description shared by meshes and sprites
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    /// Base color
    pub color: Color,
    /// Diffuse texture map
    pub map: Option<TextureHandle>,
    /// Opacity in `[0, 1]`; only honoured when `transparent` is set
    pub opacity: f32,
    /// Whether the renderer should blend this material
    pub transparent: bool,
    /// Set whenever a field changes so the renderer re-uploads it
    pub needs_update: bool,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            color: Color::WHITE,
            map: None,
            opacity: 1.0,
            transparent: false,
            needs_update: false,
        }
    }
}

impl Material {
    /// Opaque material with a flat color
    pub fn colored(color: Color) -> Self {
        Self {
            color,
            ..Default::default()
        }
    }

    /// Blended sprite material showing `map` at `opacity`
    pub fn sprite(map: TextureHandle, opacity: f32) -> Self {
        Self {
            map: Some(map),
            opacity,
            transparent: true,
            ..Default::default()
        }
    }
}

/// What a node draws
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// Pure transform node with no geometry
    Group,
    /// Mesh geometry
    Mesh,
    /// Camera-facing billboard
    Sprite,
}

/// Node stored in a scene graph
#[derive(Debug, Clone)]
pub struct SceneNode {
    /// Name used for lookup; not required to be unique
    pub name: String,
    /// What the node draws
    pub kind: NodeKind,
    /// Transform relative to the parent
    pub transform: Transform,
    /// Material, if the node is drawable
    pub material: Option<MaterialId>,
    /// Local-space bounds used for picking
    pub bounds: Option<AABB>,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
}

impl SceneNode {
    /// Create a node of `kind` at the origin
    pub fn new(name: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            transform: Transform::identity(),
            material: None,
            bounds: None,
            parent: None,
            children: Vec::new(),
        }
    }

    /// Builder pattern: Set position
    pub fn with_position(mut self, position: Vec3) -> Self {
        self.transform.position = position;
        self
    }

    /// Builder pattern: Set the full transform
    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    /// Builder pattern: Set material
    pub fn with_material(mut self, material: MaterialId) -> Self {
        self.material = Some(material);
        self
    }

    /// Builder pattern: Set local bounds
    pub fn with_bounds(mut self, bounds: AABB) -> Self {
        self.bounds = Some(bounds);
        self
    }

    /// Parent node, if attached
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Child nodes in insertion order
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}
