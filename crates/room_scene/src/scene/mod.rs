//! Scene graph abstraction
//!
//! The renderer owns the loaded scene. This module describes the small
//! surface the interaction layer needs from it (lookup by name, transforms,
//! materials, attach/detach) and ships [`NodeArena`], an in-memory graph used
//! by the demo app and the tests.

mod node;
mod scene_graph;
pub mod shapes;

pub use node::{Color, Material, MaterialId, NodeId, NodeKind, SceneNode};
pub use scene_graph::{NodeArena, SceneGraph, AABB};
