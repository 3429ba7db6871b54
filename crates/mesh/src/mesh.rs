use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use serde::Serialize;

/// A single lattice point. Position only: the grid carries no normals or UVs.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
}

impl Vertex {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self {
            position: [x, y, z],
        }
    }

    pub fn to_vec3(self) -> Vec3 {
        Vec3::from_array(self.position)
    }
}

/// Immutable indexed triangle list produced by [`crate::GridMeshBuilder`].
#[derive(Debug, Clone)]
pub struct Mesh {
    vertices: Vec<Vertex>,
    indices: Vec<u32>,
}

/// Summary of a built mesh, used by tooling output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MeshStats {
    pub vertex_count: usize,
    pub index_count: usize,
    pub triangle_count: usize,
    /// Triangles folded over by jitter; always zero up to `FOLD_FREE_JITTER`.
    pub clockwise_triangles: usize,
    pub min: [f32; 3],
    pub max: [f32; 3],
    pub vertex_bytes: usize,
    pub index_bytes: usize,
}

impl Mesh {
    pub(crate) fn from_parts(vertices: Vec<Vertex>, indices: Vec<u32>) -> Self {
        Self { vertices, indices }
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() || self.indices.is_empty()
    }

    /// Iterate triangles as resolved corner positions.
    pub fn triangles(&self) -> impl Iterator<Item = [Vec3; 3]> + '_ {
        self.indices.chunks_exact(3).map(|tri| {
            [
                self.vertices[tri[0] as usize].to_vec3(),
                self.vertices[tri[1] as usize].to_vec3(),
                self.vertices[tri[2] as usize].to_vec3(),
            ]
        })
    }

    /// Axis-aligned bounds of all vertex positions.
    pub fn bounds(&self) -> (Vec3, Vec3) {
        self.vertices.iter().fold(
            (Vec3::splat(f32::INFINITY), Vec3::splat(f32::NEG_INFINITY)),
            |(min, max), v| (min.min(v.to_vec3()), max.max(v.to_vec3())),
        )
    }

    /// Index of the first index that points past the vertex list, if any.
    pub fn first_out_of_range_index(&self) -> Option<usize> {
        let len = self.vertices.len();
        self.indices.iter().position(|&i| i as usize >= len)
    }

    /// Number of triangles that wind clockwise when seen from +Y.
    ///
    /// A jittered cell can in principle fold over itself, so this is a
    /// measurement rather than an assertion.
    pub fn clockwise_triangle_count(&self) -> usize {
        self.triangles()
            .filter(|[a, b, c]| (*b - *a).cross(*c - *a).y <= 0.0)
            .count()
    }

    pub fn stats(&self) -> MeshStats {
        let (min, max) = self.bounds();
        MeshStats {
            vertex_count: self.vertex_count(),
            index_count: self.index_count(),
            triangle_count: self.triangle_count(),
            clockwise_triangles: self.clockwise_triangle_count(),
            min: min.to_array(),
            max: max.to_array(),
            vertex_bytes: std::mem::size_of_val(self.vertices.as_slice()),
            index_bytes: std::mem::size_of_val(self.indices.as_slice()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single_quad() -> Mesh {
        Mesh::from_parts(
            vec![
                Vertex::new(0.0, 0.0, 0.0),
                Vertex::new(1.0, 0.0, 0.0),
                Vertex::new(0.0, 0.0, 1.0),
                Vertex::new(1.0, 0.0, 1.0),
            ],
            vec![0, 2, 1, 2, 3, 1],
        )
    }

    #[test]
    fn vertex_is_tightly_packed() {
        assert_eq!(std::mem::size_of::<Vertex>(), 12);
        let quad = single_quad();
        let bytes: &[u8] = bytemuck::cast_slice(quad.vertices());
        assert_eq!(bytes.len(), 48);
    }

    #[test]
    fn stats_reports_counts_and_bounds() {
        let stats = single_quad().stats();
        assert_eq!(stats.vertex_count, 4);
        assert_eq!(stats.index_count, 6);
        assert_eq!(stats.triangle_count, 2);
        assert_eq!(stats.clockwise_triangles, 0);
        assert_eq!(stats.min, [0.0, 0.0, 0.0]);
        assert_eq!(stats.max, [1.0, 0.0, 1.0]);
        assert_eq!(stats.index_bytes, 24);
    }

    #[test]
    fn detects_out_of_range_index() {
        let mesh = Mesh::from_parts(vec![Vertex::new(0.0, 0.0, 0.0)], vec![0, 0, 3]);
        assert_eq!(mesh.first_out_of_range_index(), Some(2));
        assert_eq!(single_quad().first_out_of_range_index(), None);
    }

    #[test]
    fn winding_measured_from_above() {
        assert_eq!(single_quad().clockwise_triangle_count(), 0);

        let flipped = Mesh::from_parts(single_quad().vertices().to_vec(), vec![0, 1, 2]);
        assert_eq!(flipped.clockwise_triangle_count(), 1);
    }
}
