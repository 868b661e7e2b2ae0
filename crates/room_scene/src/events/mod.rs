//! Pointer events delivered by the renderer
//! Key principles:
//! - Key-value arguments (no order dependency)
//! - Handler returns bool (true = consumed)
//! - Queuing support (immediate + deferred delivery)

use crate::scene::SceneGraph;
use std::collections::HashMap;

/// Event type identification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventType {
    /// Pointer pressed over a node of the loaded scene
    PointerDown,
    /// Pointer clicked on a standalone object
    Click,
}

/// Variant for type-safe event arguments
#[derive(Debug, Clone, PartialEq)]
pub enum EventArg {
    /// Name of the picked node
    NodeName(String),
    /// Screen position in pixels
    Position(f32, f32),
}

/// Event with type ID and key-value arguments
#[derive(Debug, Clone)]
pub struct Event {
    /// Type of event
    pub event_type: EventType,
    /// Timestamp when event was created (seconds)
    pub timestamp: f64,
    args: HashMap<&'static str, EventArg>,
}

impl Event {
    /// Create a new event with the given type and timestamp
    pub fn new(event_type: EventType, timestamp: f64) -> Self {
        Self {
            event_type,
            timestamp,
            args: HashMap::new(),
        }
    }

    /// Pointer-down on the node called `name`
    pub fn pointer_down(name: impl Into<String>, timestamp: f64) -> Self {
        Self::new(EventType::PointerDown, timestamp)
            .with_arg("node", EventArg::NodeName(name.into()))
    }

    /// Click on the node called `name`
    pub fn click(name: impl Into<String>, timestamp: f64) -> Self {
        Self::new(EventType::Click, timestamp)
            .with_arg("node", EventArg::NodeName(name.into()))
    }

    /// Add an argument to the event (builder pattern)
    pub fn with_arg(mut self, key: &'static str, value: EventArg) -> Self {
        self.args.insert(key, value);
        self
    }

    /// Get an argument by key
    pub fn get_arg(&self, key: &str) -> Option<&EventArg> {
        self.args.get(key)
    }

    /// Get node name argument if present
    pub fn get_node_name(&self) -> Option<&str> {
        if let Some(EventArg::NodeName(name)) = self.get_arg("node") {
            Some(name)
        } else {
            None
        }
    }

    /// Get position argument if present
    pub fn get_position(&self) -> Option<(f32, f32)> {
        if let Some(EventArg::Position(x, y)) = self.get_arg("position") {
            Some((*x, *y))
        } else {
            None
        }
    }
}

/// Event handler trait
/// Returns true if event was consumed
pub trait EventHandler {
    /// Handle an event against the scene it refers to
    fn on_event(&mut self, graph: &mut dyn SceneGraph, event: &Event) -> bool;
}

/// Event queue with immediate and deferred delivery
#[derive(Debug, Default)]
pub struct EventQueue {
    immediate_queue: Vec<Event>,
    deferred_queue: Vec<(f64, Event)>,
    current_time: f64,
}

impl EventQueue {
    /// Create a new empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Update current time (seconds since start)
    pub fn update_time(&mut self, time: f64) {
        self.current_time = time;
    }

    /// Send event for handling on the next dispatch
    pub fn send(&mut self, event: Event) {
        self.immediate_queue.push(event);
    }

    /// Post event for deferred delivery at specified time
    pub fn post(&mut self, delivery_time: f64, event: Event) {
        self.deferred_queue.push((delivery_time, event));
    }

    /// Number of events not yet delivered
    pub fn pending(&self) -> usize {
        self.immediate_queue.len() + self.deferred_queue.len()
    }

    /// Deliver immediate events, then due deferred events, in posting order
    ///
    /// Returns how many events the handler consumed.
    pub fn dispatch(&mut self, handler: &mut dyn EventHandler, graph: &mut dyn SceneGraph) -> usize {
        let mut consumed = 0;

        let immediate = std::mem::take(&mut self.immediate_queue);
        for event in &immediate {
            if handler.on_event(graph, event) {
                consumed += 1;
            }
        }

        let now = self.current_time;
        let (due, later): (Vec<_>, Vec<_>) = std::mem::take(&mut self.deferred_queue)
            .into_iter()
            .partition(|(time, _)| *time <= now);
        self.deferred_queue = later;
        for (_, event) in &due {
            if handler.on_event(graph, event) {
                consumed += 1;
            }
        }

        consumed
    }

    /// Clear all queued events
    pub fn clear(&mut self) {
        self.immediate_queue.clear();
        self.deferred_queue.clear();
    }
}
