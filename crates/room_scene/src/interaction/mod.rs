//! Per-frame interactive room logic
//!
//! [`RoomController`] owns every piece of interaction state and is driven
//! from outside: the renderer calls [`RoomController::tick`] once per frame
//! and forwards selection events. The scene itself is never stored; it is
//! passed in on each call.

mod controller;
mod dispatcher;
mod mover;
mod notes;
mod registry;
mod spinner;

pub use controller::RoomController;
pub use dispatcher::Interaction;
pub use mover::ChairMover;
pub use notes::{Note, NoteLifecycle};
pub use registry::NamedNodes;
pub use spinner::{ShapeColor, ShapeSpinner};
