//! Exponential-smoothing chair motion
//!
//! Idle (no target) -> Moving (target set) -> Idle (arrived). Each frame the
//! node closes a fixed fraction of the remaining gap; the step is not scaled
//! by frame time. A new target replaces an in-flight one immediately.

use crate::config::ChairSettings;
use crate::foundation::math::{utils, Vec3};
use crate::scene::{NodeId, SceneGraph};

/// Moves one node toward an optional target
#[derive(Debug, Clone)]
pub struct ChairMover {
    target: Option<Vec3>,
    smoothing: f32,
    arrival_epsilon: f32,
}

impl ChairMover {
    /// Create an idle mover
    pub fn new(settings: &ChairSettings) -> Self {
        Self {
            target: None,
            smoothing: settings.smoothing,
            arrival_epsilon: settings.arrival_epsilon,
        }
    }

    /// Current goal, `None` while idle
    pub fn target(&self) -> Option<Vec3> {
        self.target
    }

    /// Whether a target is active
    pub fn is_moving(&self) -> bool {
        self.target.is_some()
    }

    /// Replace the goal (last write wins)
    pub fn set_target(&mut self, target: Vec3) {
        if let Some(previous) = self.target.replace(target) {
            log::debug!("Chair target {:?} superseded by {:?}", previous, target);
        }
    }

    /// One smoothing step from `current`; clears the target on arrival
    pub fn step(&mut self, current: Vec3) -> Vec3 {
        let Some(target) = self.target else {
            return current;
        };
        let next = utils::lerp_vec3(&current, &target, self.smoothing);
        if utils::distance(&next, &target) < self.arrival_epsilon {
            self.target = None;
        }
        next
    }

    /// Apply one step to `node` inside `graph`
    ///
    /// A missing or stale node leaves the target untouched.
    pub fn update(&mut self, graph: &mut dyn SceneGraph, node: Option<NodeId>) {
        if self.target.is_none() {
            return;
        }
        let Some(node) = node else { return };
        let Some(current) = graph.position(node) else { return };
        let next = self.step(current);
        graph.set_position(node, next);
    }
}
