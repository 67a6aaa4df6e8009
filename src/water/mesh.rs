//! Flat water plane mesh.

use bytemuck::{Pod, Zeroable};

/// Vertex data for the water mesh (rest position + UV coordinates)
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub uv: [f32; 2],
}

/// Densest grid accepted. Keeps the index buffer (`n² · 6 · 4` bytes) well
/// under the default wgpu `max_buffer_size` of 256 MiB.
pub const MAX_SUBDIVISIONS: u32 = 2048;

/// Flat XZ grid centred on the origin. Topology never changes after creation;
/// displacement happens in the vertex shader.
pub struct WaterMesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
    subdivisions: u32,
}

impl WaterMesh {
    /// Create a plane of `size` x `size` world units split into
    /// `subdivisions` x `subdivisions` quads, clamped to `1..=MAX_SUBDIVISIONS`
    pub fn new(size: f32, subdivisions: u32) -> Self {
        let subdivisions = subdivisions.clamp(1, MAX_SUBDIVISIONS);
        let n = subdivisions as usize;
        let spacing = size / subdivisions as f32;
        let half_size = size / 2.0;

        let mut vertices = Vec::with_capacity((n + 1) * (n + 1));
        let mut indices = Vec::with_capacity(n * n * 6);

        // Generate flat XZ plane grid
        for z in 0..=n {
            for x in 0..=n {
                let x_pos = x as f32 * spacing - half_size;
                let z_pos = z as f32 * spacing - half_size;

                vertices.push(Vertex {
                    position: [x_pos, 0.0, z_pos],
                    uv: [x as f32 / n as f32, z as f32 / n as f32],
                });
            }
        }

        // Triangle indices, counter-clockwise seen from +Y
        for z in 0..n {
            for x in 0..n {
                let top_left = (z * (n + 1) + x) as u32;
                let top_right = top_left + 1;
                let bottom_left = ((z + 1) * (n + 1) + x) as u32;
                let bottom_right = bottom_left + 1;

                indices.extend_from_slice(&[
                    top_left,
                    bottom_left,
                    top_right,
                    top_right,
                    bottom_left,
                    bottom_right,
                ]);
            }
        }

        Self {
            vertices,
            indices,
            subdivisions,
        }
    }

    pub fn subdivisions(&self) -> u32 {
        self.subdivisions
    }

    pub fn index_count(&self) -> u32 {
        self.indices.len() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn test_grid_counts() {
        let mesh = WaterMesh::new(2.0, 16);

        // Check vertex count: (subdivisions + 1)^2
        assert_eq!(mesh.vertices.len(), 17 * 17);

        // Check triangle count: subdivisions^2 * 2 triangles * 3 indices
        assert_eq!(mesh.indices.len(), 16 * 16 * 6);
        assert_eq!(mesh.index_count(), 16 * 16 * 6);
    }

    #[test]
    fn test_grid_spans_plane() {
        let mesh = WaterMesh::new(2.0, 4);

        let first = mesh.vertices[0].position;
        let last = mesh.vertices[mesh.vertices.len() - 1].position;
        assert_eq!(first, [-1.0, 0.0, -1.0]);
        assert_eq!(last, [1.0, 0.0, 1.0]);

        assert!(mesh.vertices.iter().all(|v| v.position[1] == 0.0));
        assert!(mesh
            .vertices
            .iter()
            .all(|v| (0.0..=1.0).contains(&v.uv[0]) && (0.0..=1.0).contains(&v.uv[1])));
    }

    #[test]
    fn test_triangles_face_up() {
        let mesh = WaterMesh::new(2.0, 3);

        for tri in mesh.indices.chunks(3) {
            let [a, b, c] = [tri[0], tri[1], tri[2]]
                .map(|i| Vec3::from_array(mesh.vertices[i as usize].position));
            let normal = (b - a).cross(c - a);
            assert!(normal.y > 0.0, "triangle {tri:?} faces down");
        }
    }

    #[test]
    fn test_indices_in_bounds() {
        let mesh = WaterMesh::new(2.0, 5);
        let count = mesh.vertices.len() as u32;
        assert!(mesh.indices.iter().all(|&i| i < count));
    }

    #[test]
    fn test_zero_subdivisions_still_builds_a_quad() {
        let mesh = WaterMesh::new(2.0, 0);
        assert_eq!(mesh.subdivisions(), 1);
        assert_eq!(mesh.vertices.len(), 4);
        assert_eq!(mesh.indices.len(), 6);
    }

    #[test]
    fn test_densest_grid_fits_default_buffer_limit() {
        let n = MAX_SUBDIVISIONS as u64;
        let index_bytes = n * n * 6 * std::mem::size_of::<u32>() as u64;
        let vertex_bytes = (n + 1) * (n + 1) * std::mem::size_of::<Vertex>() as u64;
        let limit = wgpu::Limits::default().max_buffer_size;

        assert!(index_bytes <= limit, "index buffer {index_bytes} > {limit}");
        assert!(vertex_bytes <= limit, "vertex buffer {vertex_bytes} > {limit}");
        // Vertex indices never wrap
        assert!((n + 1) * (n + 1) <= u32::MAX as u64);
    }
}
