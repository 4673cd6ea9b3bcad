use std::f32::consts::{PI, TAU};

use super::mesh::{MeshData, MeshVertex};

/// Latitude/longitude sphere.
///
/// Rows run from the +Y pole (`iy = 0`) to the -Y pole; each row repeats
/// its first vertex at the seam so `(width + 1) * (height + 1)` vertices
/// are emitted. The degenerate triangles touching each pole are skipped.
/// Segment counts are raised to at least 3 around and 2 from pole to pole.
#[must_use]
pub fn uv_sphere(
    radius: f32,
    width_segments: u32,
    height_segments: u32,
) -> MeshData {
    let width = width_segments.max(3);
    let height = height_segments.max(2);
    let row = width + 1;

    let mut vertices = Vec::with_capacity((row * (height + 1)) as usize);
    for iy in 0..=height {
        let v = iy as f32 / height as f32;
        let (sin_theta, cos_theta) = (v * PI).sin_cos();
        for ix in 0..=width {
            let u = ix as f32 / width as f32;
            let (sin_phi, cos_phi) = (u * TAU).sin_cos();
            let normal =
                [-cos_phi * sin_theta, cos_theta, sin_phi * sin_theta];
            vertices.push(MeshVertex {
                position: normal.map(|c| c * radius),
                normal,
            });
        }
    }

    let mut indices = Vec::with_capacity((6 * width * (height - 1)) as usize);
    for iy in 0..height {
        for ix in 0..width {
            let a = iy * row + ix + 1;
            let b = iy * row + ix;
            let c = (iy + 1) * row + ix;
            let d = (iy + 1) * row + ix + 1;
            if iy != 0 {
                indices.extend_from_slice(&[a, b, d]);
            }
            if iy != height - 1 {
                indices.extend_from_slice(&[b, c, d]);
            }
        }
    }

    MeshData { vertices, indices }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;

    #[test]
    fn counts_for_demo_resolution() {
        let mesh = uv_sphere(3.0, 32, 32);
        assert_eq!(mesh.vertices.len(), 33 * 33);
        assert_eq!(mesh.indices.len(), 6 * 32 * 31);
        assert!(mesh
            .indices
            .iter()
            .all(|&i| (i as usize) < mesh.vertices.len()));
    }

    #[test]
    fn vertices_lie_on_the_sphere() {
        let mesh = uv_sphere(0.25, 24, 24);
        for v in &mesh.vertices {
            let p = Vec3::from_array(v.position);
            assert!((p.length() - 0.25).abs() < 1e-5);
            assert!((Vec3::from_array(v.normal) - p / 0.25).length() < 1e-5);
        }
    }

    #[test]
    fn faces_point_outward() {
        let mesh = uv_sphere(1.0, 8, 6);
        for tri in mesh.indices.chunks_exact(3) {
            let [a, b, c] = [tri[0], tri[1], tri[2]].map(|i| {
                Vec3::from_array(mesh.vertices[i as usize].position)
            });
            let normal = (b - a).cross(c - a);
            let centroid = (a + b + c) / 3.0;
            assert!(normal.dot(centroid) > 0.0);
        }
    }

    #[test]
    fn segment_counts_are_clamped() {
        let mesh = uv_sphere(1.0, 0, 0);
        assert_eq!(mesh.vertices.len(), 4 * 3);
        assert_eq!(mesh.indices.len(), 6 * 3);
    }
}
