//! Scene graph trait and implementations
//!
//! The controller never owns the scene. It receives a `&mut dyn SceneGraph`
//! on every call and keeps only [`NodeId`] handles, which may go stale; every
//! accessor therefore returns `Option`.

use super::node::{Material, MaterialId, NodeId, NodeKind, SceneNode};
use crate::foundation::math::{Transform, Vec3};
use slotmap::SlotMap;

/// Axis-Aligned Bounding Box for spatial queries
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AABB {
    /// Minimum corner of the bounding box
    pub min: Vec3,
    /// Maximum corner of the bounding box
    pub max: Vec3,
}

impl AABB {
    /// Create a new AABB from min and max points
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Create an AABB centered at a point with given extents
    pub fn from_center_extents(center: Vec3, extents: Vec3) -> Self {
        Self {
            min: center - extents,
            max: center + extents,
        }
    }

    /// Smallest box enclosing every point
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Vec3>) -> Option<Self> {
        let mut points = points.into_iter();
        let first = *points.next()?;
        Some(points.fold(Self::new(first, first), |acc, p| Self {
            min: acc.min.inf(p),
            max: acc.max.sup(p),
        }))
    }

    /// Get the center of the AABB
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Check if this AABB contains a point
    pub fn contains_point(&self, point: Vec3) -> bool {
        point.x >= self.min.x && point.x <= self.max.x &&
        point.y >= self.min.y && point.y <= self.max.y &&
        point.z >= self.min.z && point.z <= self.max.z
    }

    /// Move and scale a local-space box into its parent's space
    pub fn transformed(&self, offset: Vec3, scale: Vec3) -> Self {
        let a = self.min.component_mul(&scale) + offset;
        let b = self.max.component_mul(&scale) + offset;
        Self::new(a.inf(&b), a.sup(&b))
    }

    /// Test ray intersection with this AABB using slab method
    /// Returns the distance to the entry point if the ray intersects, None otherwise
    pub fn intersect_ray(&self, ray_origin: Vec3, ray_dir: Vec3) -> Option<f32> {
        let inv_dir = Vec3::new(
            if ray_dir.x != 0.0 { 1.0 / ray_dir.x } else { f32::INFINITY },
            if ray_dir.y != 0.0 { 1.0 / ray_dir.y } else { f32::INFINITY },
            if ray_dir.z != 0.0 { 1.0 / ray_dir.z } else { f32::INFINITY },
        );

        let t1 = (self.min.x - ray_origin.x) * inv_dir.x;
        let t2 = (self.max.x - ray_origin.x) * inv_dir.x;
        let t3 = (self.min.y - ray_origin.y) * inv_dir.y;
        let t4 = (self.max.y - ray_origin.y) * inv_dir.y;
        let t5 = (self.min.z - ray_origin.z) * inv_dir.z;
        let t6 = (self.max.z - ray_origin.z) * inv_dir.z;

        let tmin = t1.min(t2).max(t3.min(t4)).max(t5.min(t6));
        let tmax = t1.max(t2).min(t3.max(t4)).min(t5.max(t6));

        // Ray intersects if tmax >= tmin and tmax >= 0
        if tmax >= tmin && tmax >= 0.0 {
            // Return entry point distance (or 0 if we're inside the box)
            Some(tmin.max(0.0))
        } else {
            None
        }
    }
}

/// Hierarchical scene storage as seen by the interaction layer
pub trait SceneGraph {
    /// Root node every loaded object descends from
    fn root(&self) -> NodeId;

    /// Whether `node` is still part of the graph
    fn contains(&self, node: NodeId) -> bool;

    /// First node named `name` in depth-first order from the root
    fn find_by_name(&self, name: &str) -> Option<NodeId>;

    /// Node name
    fn name(&self, node: NodeId) -> Option<&str>;

    /// Transform relative to the parent
    fn transform(&self, node: NodeId) -> Option<&Transform>;

    /// Mutable transform relative to the parent
    fn transform_mut(&mut self, node: NodeId) -> Option<&mut Transform>;

    /// Attach a new node under `parent`
    fn add_child(&mut self, parent: NodeId, node: SceneNode) -> Option<NodeId>;

    /// Detach `node` and its subtree; returns `false` when it was not present
    fn detach(&mut self, node: NodeId) -> bool;

    /// Material bound to `node`
    fn material(&self, node: NodeId) -> Option<&Material>;

    /// Mutable material bound to `node`; edits are seen by every node sharing it
    fn material_mut(&mut self, node: NodeId) -> Option<&mut Material>;

    /// Id of the material bound to `node`
    fn material_id(&self, node: NodeId) -> Option<MaterialId>;

    /// Give `node` a private copy of its material and return the new id
    fn clone_material(&mut self, node: NodeId) -> Option<MaterialId>;

    /// Register a material that nodes can reference
    fn add_material(&mut self, material: Material) -> MaterialId;

    /// Drop a material; nodes still pointing at it render without one
    fn remove_material(&mut self, material: MaterialId) -> bool;

    /// Bounds in root space, if the node has local bounds
    fn world_bounds(&self, node: NodeId) -> Option<AABB>;

    /// Every node below the root in depth-first order
    fn descendants(&self) -> Vec<NodeId>;

    /// Position relative to the parent
    fn position(&self, node: NodeId) -> Option<Vec3> {
        self.transform(node).map(|t| t.position)
    }

    /// Overwrite the position relative to the parent
    fn set_position(&mut self, node: NodeId, position: Vec3) -> bool {
        match self.transform_mut(node) {
            Some(transform) => {
                transform.position = position;
                true
            }
            None => false,
        }
    }

    /// Euler rotation in radians
    fn rotation(&self, node: NodeId) -> Option<Vec3> {
        self.transform(node).map(|t| t.rotation)
    }

    /// Overwrite the Euler rotation
    fn set_rotation(&mut self, node: NodeId, rotation: Vec3) -> bool {
        match self.transform_mut(node) {
            Some(transform) => {
                transform.rotation = rotation;
                true
            }
            None => false,
        }
    }
}

/// Slot-map backed scene graph
///
/// Nodes and materials live in separate arenas so several nodes can share a
/// material the way loaded models usually do.
#[derive(Debug)]
pub struct NodeArena {
    nodes: SlotMap<NodeId, SceneNode>,
    materials: SlotMap<MaterialId, Material>,
    root: NodeId,
}

impl NodeArena {
    /// Create a graph holding only a root group
    pub fn new() -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(SceneNode::new("Scene", NodeKind::Group));
        Self {
            nodes,
            materials: SlotMap::with_key(),
            root,
        }
    }

    /// Material by id
    pub fn material_by_id(&self, id: MaterialId) -> Option<&Material> {
        self.materials.get(id)
    }

    /// Full node record
    pub fn node(&self, node: NodeId) -> Option<&SceneNode> {
        self.nodes.get(node)
    }

    /// Number of nodes, root included
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of registered materials
    pub fn material_count(&self) -> usize {
        self.materials.len()
    }

    /// Root-space position and scale of `node`, composing every ancestor
    ///
    /// Parent rotation is not applied; bounds stay axis-aligned.
    fn world_placement(&self, node: NodeId) -> Option<(Vec3, Vec3)> {
        let entry = self.nodes.get(node)?;
        let mut position = entry.transform.position;
        let mut scale = entry.transform.scale;
        let mut cursor = entry.parent;
        while let Some(parent) = cursor.and_then(|id| self.nodes.get(id)) {
            position = parent.transform.position + parent.transform.scale.component_mul(&position);
            scale = parent.transform.scale.component_mul(&scale);
            cursor = parent.parent;
        }
        Some((position, scale))
    }

    fn collect_subtree(&self, node: NodeId, out: &mut Vec<NodeId>) {
        if let Some(entry) = self.nodes.get(node) {
            for &child in &entry.children {
                out.push(child);
                self.collect_subtree(child, out);
            }
        }
    }
}

impl Default for NodeArena {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneGraph for NodeArena {
    fn root(&self) -> NodeId {
        self.root
    }

    fn contains(&self, node: NodeId) -> bool {
        self.nodes.contains_key(node)
    }

    fn find_by_name(&self, name: &str) -> Option<NodeId> {
        self.descendants()
            .into_iter()
            .find(|&id| self.nodes[id].name == name)
    }

    fn name(&self, node: NodeId) -> Option<&str> {
        self.nodes.get(node).map(|n| n.name.as_str())
    }

    fn transform(&self, node: NodeId) -> Option<&Transform> {
        self.nodes.get(node).map(|n| &n.transform)
    }

    fn transform_mut(&mut self, node: NodeId) -> Option<&mut Transform> {
        self.nodes.get_mut(node).map(|n| &mut n.transform)
    }

    fn add_child(&mut self, parent: NodeId, mut node: SceneNode) -> Option<NodeId> {
        if !self.nodes.contains_key(parent) {
            return None;
        }
        node.parent = Some(parent);
        node.children.clear();
        let id = self.nodes.insert(node);
        self.nodes[parent].children.push(id);
        Some(id)
    }

    fn detach(&mut self, node: NodeId) -> bool {
        if node == self.root {
            return false;
        }
        let Some(parent) = self.nodes.get(node).map(|n| n.parent) else {
            return false;
        };
        if let Some(parent) = parent.and_then(|p| self.nodes.get_mut(p)) {
            parent.children.retain(|&c| c != node);
        }

        let mut doomed = vec![node];
        self.collect_subtree(node, &mut doomed);
        for id in doomed {
            self.nodes.remove(id);
        }
        true
    }

    fn material(&self, node: NodeId) -> Option<&Material> {
        let id = self.nodes.get(node)?.material?;
        self.materials.get(id)
    }

    fn material_mut(&mut self, node: NodeId) -> Option<&mut Material> {
        let id = self.nodes.get(node)?.material?;
        self.materials.get_mut(id)
    }

    fn material_id(&self, node: NodeId) -> Option<MaterialId> {
        self.nodes.get(node)?.material
    }

    fn clone_material(&mut self, node: NodeId) -> Option<MaterialId> {
        let copy = self.material(node)?.clone();
        let id = self.materials.insert(copy);
        self.nodes[node].material = Some(id);
        Some(id)
    }

    fn add_material(&mut self, material: Material) -> MaterialId {
        self.materials.insert(material)
    }

    fn remove_material(&mut self, material: MaterialId) -> bool {
        self.materials.remove(material).is_some()
    }

    fn world_bounds(&self, node: NodeId) -> Option<AABB> {
        let local = self.nodes.get(node)?.bounds?;
        let (position, scale) = self.world_placement(node)?;
        Some(local.transformed(position, scale))
    }

    fn descendants(&self) -> Vec<NodeId> {
        let mut out = Vec::with_capacity(self.nodes.len());
        self.collect_subtree(self.root, &mut out);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::node::Color;

    fn unit_box() -> AABB {
        AABB::new(Vec3::new(-0.5, -0.5, -0.5), Vec3::new(0.5, 0.5, 0.5))
    }

    #[test]
    fn test_aabb_contains_point() {
        let aabb = AABB::new(
            Vec3::new(-1.0, -1.0, -1.0),
            Vec3::new(1.0, 1.0, 1.0),
        );

        assert!(aabb.contains_point(Vec3::zeros()));
        assert!(aabb.contains_point(Vec3::new(0.5, 0.5, 0.5)));
        assert!(!aabb.contains_point(Vec3::new(2.0, 0.0, 0.0)));
    }

    #[test]
    fn test_aabb_ray_hit_and_miss() {
        let aabb = unit_box();
        let hit = aabb.intersect_ray(Vec3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 0.0, -1.0));
        assert_eq!(hit, Some(4.5));

        let miss = aabb.intersect_ray(Vec3::new(3.0, 0.0, 5.0), Vec3::new(0.0, 0.0, -1.0));
        assert_eq!(miss, None);
    }

    #[test]
    fn test_find_by_name_searches_nested_nodes() {
        let mut graph = NodeArena::new();
        let room = graph.add_child(graph.root(), SceneNode::new("room", NodeKind::Group)).unwrap();
        let chair = graph.add_child(room, SceneNode::new("chair", NodeKind::Mesh)).unwrap();

        assert_eq!(graph.find_by_name("chair"), Some(chair));
        assert_eq!(graph.find_by_name("sofa"), None);
        assert_eq!(graph.name(chair), Some("chair"));
    }

    #[test]
    fn test_detach_removes_subtree() {
        let mut graph = NodeArena::new();
        let room = graph.add_child(graph.root(), SceneNode::new("room", NodeKind::Group)).unwrap();
        let lamp = graph.add_child(room, SceneNode::new("lamp", NodeKind::Mesh)).unwrap();

        assert!(graph.detach(room));
        assert!(!graph.contains(room));
        assert!(!graph.contains(lamp));
        assert_eq!(graph.node_count(), 1);
        assert!(graph.descendants().is_empty());

        // Second detach is a no-op
        assert!(!graph.detach(room));
        // Root cannot be detached
        assert!(!graph.detach(graph.root()));
    }

    #[test]
    fn test_clone_material_isolates_node() {
        let mut graph = NodeArena::new();
        let shared = graph.add_material(Material::colored(Color::WHITE));
        let a = graph
            .add_child(graph.root(), SceneNode::new("a", NodeKind::Mesh).with_material(shared))
            .unwrap();
        let b = graph
            .add_child(graph.root(), SceneNode::new("b", NodeKind::Mesh).with_material(shared))
            .unwrap();

        let private = graph.clone_material(a).unwrap();
        assert_ne!(private, shared);
        graph.material_mut(a).unwrap().color = Color::RED;

        assert_eq!(graph.material(a).unwrap().color, Color::RED);
        assert_eq!(graph.material(b).unwrap().color, Color::WHITE);
        assert_eq!(graph.material_by_id(shared).unwrap().color, Color::WHITE);
    }

    #[test]
    fn test_clone_material_without_material_is_none() {
        let mut graph = NodeArena::new();
        let bare = graph.add_child(graph.root(), SceneNode::new("bare", NodeKind::Group)).unwrap();
        assert_eq!(graph.clone_material(bare), None);
        assert_eq!(graph.material_count(), 0);
    }

    #[test]
    fn test_world_bounds_follow_parent_offset() {
        let mut graph = NodeArena::new();
        let room = graph
            .add_child(
                graph.root(),
                SceneNode::new("room", NodeKind::Group).with_position(Vec3::new(0.0, -1.0, 0.0)),
            )
            .unwrap();
        let chair = graph
            .add_child(
                room,
                SceneNode::new("chair", NodeKind::Mesh)
                    .with_position(Vec3::new(2.0, 0.0, 0.0))
                    .with_bounds(unit_box()),
            )
            .unwrap();

        let bounds = graph.world_bounds(chair).unwrap();
        assert_eq!(bounds.center(), Vec3::new(2.0, -1.0, 0.0));
    }

    #[test]
    fn test_world_bounds_follow_parent_scale() {
        let mut graph = NodeArena::new();
        let model = graph
            .add_child(
                graph.root(),
                SceneNode::new("model", NodeKind::Group)
                    .with_transform(Transform::from_position(Vec3::new(1.0, 0.0, 0.0)).with_uniform_scale(2.0)),
            )
            .unwrap();
        let chair = graph
            .add_child(
                model,
                SceneNode::new("chair", NodeKind::Mesh)
                    .with_position(Vec3::new(1.5, 0.0, 0.0))
                    .with_bounds(unit_box()),
            )
            .unwrap();

        let bounds = graph.world_bounds(chair).unwrap();
        assert_eq!(bounds.center(), Vec3::new(4.0, 0.0, 0.0));
        assert_eq!(bounds.max - bounds.min, Vec3::new(2.0, 2.0, 2.0));
    }

    #[test]
    fn test_set_position_on_stale_node() {
        let mut graph = NodeArena::new();
        let chair = graph.add_child(graph.root(), SceneNode::new("chair", NodeKind::Mesh)).unwrap();
        graph.detach(chair);
        assert!(!graph.set_position(chair, Vec3::new(1.0, 0.0, 0.0)));
        assert_eq!(graph.position(chair), None);
    }
}
