//! Named-node lookup performed once the scene has loaded

use crate::assets::TextureHandle;
use crate::config::NodeNames;
use crate::foundation::math::Vec3;
use crate::scene::{MaterialId, NodeId, SceneGraph};

/// Handles to the nodes the interactions act on
///
/// Any of them may be absent: a model without a plant simply has no
/// restore interaction. The chair's rest position is captured on the first
/// resolve that finds a chair and never changes afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NamedNodes {
    /// Movable chair
    pub chair: Option<NodeId>,
    /// Plant that restores the chair
    pub plant: Option<NodeId>,
    /// Speaker that toggles music and emits notes
    pub speaker: Option<NodeId>,
    /// Desktop screen
    pub screen: Option<NodeId>,
    chair_rest: Option<Vec3>,
    screen_material: Option<MaterialId>,
}

impl NamedNodes {
    /// Look up every configured name in `graph`
    pub fn resolve(&mut self, graph: &dyn SceneGraph, names: &NodeNames) {
        self.chair = lookup(graph, &names.chair);
        self.plant = lookup(graph, &names.plant);
        self.speaker = lookup(graph, &names.speaker);
        self.screen = lookup(graph, &names.screen);

        if self.chair_rest.is_none() {
            self.chair_rest = self.chair.and_then(|chair| graph.position(chair));
            if let Some(rest) = self.chair_rest {
                log::debug!("Chair rest position captured at {:?}", rest);
            }
        }
    }

    /// Where the chair stood when the scene loaded
    pub fn chair_rest(&self) -> Option<Vec3> {
        self.chair_rest
    }

    /// Give the screen a private material showing `texture`
    ///
    /// The first bind clones the screen's material so other meshes sharing
    /// the model's default material keep their look. Later binds reuse that
    /// private copy as long as the screen still points at it. Returns
    /// `false` when there is no screen or it has no material.
    pub fn bind_screen_texture(&mut self, graph: &mut dyn SceneGraph, texture: TextureHandle) -> bool {
        let Some(screen) = self.screen else {
            return false;
        };
        let current = graph.material_id(screen);
        if current.is_none() {
            log::warn!("Screen node has no material; texture not applied");
            return false;
        }
        if current != self.screen_material {
            self.screen_material = graph.clone_material(screen);
        }
        match graph.material_mut(screen) {
            Some(material) => {
                material.map = Some(texture);
                material.needs_update = true;
                true
            }
            None => false,
        }
    }
}

fn lookup(graph: &dyn SceneGraph, name: &str) -> Option<NodeId> {
    let found = graph.find_by_name(name);
    match found {
        Some(_) => log::debug!("Resolved node '{}'", name),
        None => log::warn!("Node '{}' not found in loaded scene", name),
    }
    found
}
