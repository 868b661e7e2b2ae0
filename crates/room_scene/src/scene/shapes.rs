//! Procedural geometry for standalone shapes

use super::AABB;
use crate::foundation::math::Vec3;
use std::f32::consts::TAU;

/// Indexed triangle mesh
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    /// Vertex positions
    pub positions: Vec<Vec3>,
    /// Triangle list, three indices per face
    pub indices: Vec<u32>,
}

impl Mesh {
    /// Number of triangles
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Bounds of every vertex
    pub fn bounds(&self) -> Option<AABB> {
        AABB::from_points(&self.positions)
    }
}

/// Cone centred on the origin, apex up
///
/// `radial_segments` below 3 is clamped to 3. With 4 segments the result is
/// a square pyramid.
pub fn cone(radius: f32, height: f32, radial_segments: u32) -> Mesh {
    let segments = radial_segments.max(3);
    let half = height * 0.5;

    let mut positions = Vec::with_capacity(segments as usize + 2);
    positions.push(Vec3::new(0.0, half, 0.0));
    positions.push(Vec3::new(0.0, -half, 0.0));
    for i in 0..segments {
        let theta = TAU * i as f32 / segments as f32;
        positions.push(Vec3::new(radius * theta.sin(), -half, radius * theta.cos()));
    }

    let apex = 0;
    let base_center = 1;
    let ring = |i: u32| 2 + i % segments;

    let mut indices = Vec::with_capacity(segments as usize * 6);
    for i in 0..segments {
        indices.extend_from_slice(&[apex, ring(i), ring(i + 1)]);
        indices.extend_from_slice(&[base_center, ring(i + 1), ring(i)]);
    }

    Mesh { positions, indices }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_square_pyramid_topology() {
        let mesh = cone(1.0, 2.0, 4);
        assert_eq!(mesh.positions.len(), 6);
        assert_eq!(mesh.triangle_count(), 8);
        assert!(mesh.indices.iter().all(|&i| (i as usize) < mesh.positions.len()));
    }

    #[test]
    fn test_cone_bounds() {
        let bounds = cone(1.0, 2.0, 4).bounds().unwrap();
        assert_relative_eq!(bounds.min, Vec3::new(-1.0, -1.0, -1.0), epsilon = 1e-6);
        assert_relative_eq!(bounds.max, Vec3::new(1.0, 1.0, 1.0), epsilon = 1e-6);
    }

    #[test]
    fn test_segments_clamped() {
        let mesh = cone(1.0, 1.0, 1);
        assert_eq!(mesh.triangle_count(), 6);
    }
}
