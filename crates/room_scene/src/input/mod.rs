//! Pointer input
//!
//! Converts a pointer position into the node-name selection events the
//! interaction layer consumes.

pub mod picking;

pub use picking::{pick, MouseState, PickCamera, PickHit, Ray};
