use std::f32::consts::TAU;

use super::mesh::{MeshData, MeshVertex};

/// Flat annulus in the XY plane facing +Z.
///
/// `phi_segments` concentric bands of `theta_segments + 1` vertices each
/// (the seam vertex is repeated). Counts are raised to at least 3 around
/// and 1 across.
#[must_use]
pub fn ring(
    inner: f32,
    outer: f32,
    theta_segments: u32,
    phi_segments: u32,
) -> MeshData {
    let theta = theta_segments.max(3);
    let phi = phi_segments.max(1);
    let row = theta + 1;
    let step = (outer - inner) / phi as f32;

    let mut vertices = Vec::with_capacity((row * (phi + 1)) as usize);
    for j in 0..=phi {
        let radius = inner + step * j as f32;
        for i in 0..=theta {
            let (sin, cos) = (i as f32 / theta as f32 * TAU).sin_cos();
            vertices.push(MeshVertex {
                position: [radius * cos, radius * sin, 0.0],
                normal: [0.0, 0.0, 1.0],
            });
        }
    }

    let mut indices = Vec::with_capacity((6 * theta * phi) as usize);
    for j in 0..phi {
        for i in 0..theta {
            let a = j * row + i;
            let b = a + row;
            let c = a + row + 1;
            let d = a + 1;
            indices.extend_from_slice(&[a, b, d, b, c, d]);
        }
    }

    MeshData { vertices, indices }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;

    #[test]
    fn orbit_ring_counts_and_radii() {
        let mesh = ring(14.95, 15.05, 100, 1);
        assert_eq!(mesh.vertices.len(), 2 * 101);
        assert_eq!(mesh.indices.len(), 600);
        for (k, v) in mesh.vertices.iter().enumerate() {
            let r = Vec3::from_array(v.position).length();
            let expected = if k < 101 { 14.95 } else { 15.05 };
            assert!((r - expected).abs() < 1e-4);
            assert_eq!(v.position[2], 0.0);
        }
    }

    #[test]
    fn triangles_face_positive_z() {
        let mesh = ring(1.0, 2.0, 12, 2);
        for tri in mesh.indices.chunks_exact(3) {
            let [a, b, c] = [tri[0], tri[1], tri[2]].map(|i| {
                Vec3::from_array(mesh.vertices[i as usize].position)
            });
            assert!((b - a).cross(c - a).z > 0.0);
        }
    }
}
