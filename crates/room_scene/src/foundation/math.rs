//! Math utilities and types
//!
//! Thin aliases over `nalgebra` plus the handful of helpers the scene
//! animations need (component-wise interpolation and distance).

pub use nalgebra::Vector3;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// Transform representing position, rotation, and scale
///
/// Rotation is kept as accumulated Euler angles (radians, XYZ order) rather
/// than a quaternion: continuous spinners add a fixed step every frame and
/// the angles are allowed to grow without wrapping.
#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    /// Position in 3D space
    pub position: Vec3,

    /// Euler rotation in radians
    pub rotation: Vec3,

    /// Scale factors
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            rotation: Vec3::zeros(),
            scale: Vec3::new(1.0, 1.0, 1.0),
        }
    }
}

impl Transform {
    /// Create a new identity transform
    pub fn identity() -> Self {
        Self::default()
    }

    /// Create a transform with only position
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Builder pattern: Set scale (uniform)
    pub fn with_uniform_scale(mut self, scale: f32) -> Self {
        self.scale = Vec3::new(scale, scale, scale);
        self
    }
}

/// Math utility functions
pub mod utils {
    use super::Vec3;

    /// Linear interpolation
    pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
        a + (b - a) * t
    }

    /// Component-wise linear interpolation between two points
    pub fn lerp_vec3(from: &Vec3, to: &Vec3, t: f32) -> Vec3 {
        from.lerp(to, t)
    }

    /// Euclidean distance between two points
    pub fn distance(a: &Vec3, b: &Vec3) -> f32 {
        (b - a).magnitude()
    }
}
