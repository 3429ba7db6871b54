use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::mesh::{Mesh, Vertex};

/// Jitter amplitude as a fraction of one segment, per axis.
pub const DEFAULT_JITTER_SCALE: f32 = 0.5;

/// Largest jitter scale that can never fold a triangle over. Above it two
/// neighbours can cross, so a few triangles may wind clockwise.
pub const FOLD_FREE_JITTER: f32 = 0.25;

/// Errors from grid construction. The builder never clamps its inputs.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MeshError {
    #[error("segment count along {axis} must be at least 1, got {value}")]
    InvalidSegments { axis: char, value: u32 },
    #[error("grid extent along {axis} must be positive and finite, got {value}")]
    InvalidExtent { axis: char, value: f32 },
    #[error("jitter scale must be non-negative and finite, got {0}")]
    InvalidJitter(f32),
    #[error("grid of {segments_x}x{segments_z} segments has {vertices} vertices, exceeding the u32 index range")]
    TooLarge {
        segments_x: u32,
        segments_z: u32,
        vertices: u64,
    },
}

/// Builds a `(segments_x + 1) x (segments_z + 1)` lattice covering
/// `[0, width] x [0, depth]` at `y = 0`, jitters X/Z per vertex, and
/// triangulates each cell into two counter-clockwise triangles.
#[derive(Debug, Clone)]
pub struct GridMeshBuilder {
    width: f32,
    depth: f32,
    segments_x: u32,
    segments_z: u32,
    jitter_scale: f32,
    seed: Option<u64>,
}

impl GridMeshBuilder {
    pub fn new(width: f32, depth: f32, segments_x: u32, segments_z: u32) -> Self {
        Self {
            width,
            depth,
            segments_x,
            segments_z,
            jitter_scale: DEFAULT_JITTER_SCALE,
            seed: None,
        }
    }

    /// Fix the jitter RNG seed. Without one, each build draws from entropy.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the jitter amplitude as a fraction of a segment. Zero disables jitter.
    pub fn with_jitter_scale(mut self, scale: f32) -> Self {
        self.jitter_scale = scale;
        self
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    fn validate(&self) -> Result<(), MeshError> {
        for (axis, value) in [('x', self.segments_x), ('z', self.segments_z)] {
            if value == 0 {
                return Err(MeshError::InvalidSegments { axis, value });
            }
        }
        for (axis, value) in [('x', self.width), ('z', self.depth)] {
            if !(value.is_finite() && value > 0.0) {
                return Err(MeshError::InvalidExtent { axis, value });
            }
        }
        if !(self.jitter_scale.is_finite() && self.jitter_scale >= 0.0) {
            return Err(MeshError::InvalidJitter(self.jitter_scale));
        }
        let vertices = (self.segments_x as u64 + 1) * (self.segments_z as u64 + 1);
        if vertices > u32::MAX as u64 {
            return Err(MeshError::TooLarge {
                segments_x: self.segments_x,
                segments_z: self.segments_z,
                vertices,
            });
        }
        Ok(())
    }

    pub fn build(&self) -> Result<Mesh, MeshError> {
        let _span = tracing::info_span!(
            "grid_build",
            segments_x = self.segments_x,
            segments_z = self.segments_z
        )
        .entered();

        if let Err(e) = self.validate() {
            tracing::error!("rejected grid parameters: {e}");
            return Err(e);
        }

        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let segment_width = self.width / self.segments_x as f32;
        let segment_depth = self.depth / self.segments_z as f32;
        let jitter_x = segment_width * self.jitter_scale;
        let jitter_z = segment_depth * self.jitter_scale;

        let columns = self.segments_x as usize + 1;
        let rows = self.segments_z as usize + 1;

        let mut vertices = Vec::with_capacity(columns * rows);
        for z in 0..rows {
            for x in 0..columns {
                let offset_x = rng.gen_range(-1.0f32..=1.0) * jitter_x;
                let offset_z = rng.gen_range(-1.0f32..=1.0) * jitter_z;
                vertices.push(Vertex::new(
                    x as f32 * segment_width + offset_x,
                    0.0,
                    z as f32 * segment_depth + offset_z,
                ));
            }
        }

        let stride = columns as u32;
        let mut indices =
            Vec::with_capacity(6 * self.segments_x as usize * self.segments_z as usize);
        for z in 0..self.segments_z {
            for x in 0..self.segments_x {
                let bottom_left = z * stride + x;
                let bottom_right = bottom_left + 1;
                let top_left = (z + 1) * stride + x;
                let top_right = top_left + 1;

                indices.extend_from_slice(&[bottom_left, top_left, bottom_right]);
                indices.extend_from_slice(&[top_left, top_right, bottom_right]);
            }
        }

        tracing::debug!(
            vertices = vertices.len(),
            indices = indices.len(),
            seed = ?self.seed,
            "grid mesh built"
        );

        Ok(Mesh::from_parts(vertices, indices))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn counts_match_segment_formula() {
        for (sx, sz) in [(1, 1), (1, 7), (3, 2), (16, 9), (40, 40)] {
            let mesh = GridMeshBuilder::new(12.0, 8.0, sx, sz)
                .with_seed(1)
                .build()
                .unwrap();
            assert_eq!(mesh.vertex_count(), ((sx + 1) * (sz + 1)) as usize);
            assert_eq!(mesh.index_count(), (6 * sx * sz) as usize);
            assert_eq!(mesh.first_out_of_range_index(), None);
        }
    }

    #[test]
    fn unjittered_two_by_two_grid() {
        let mesh = GridMeshBuilder::new(10.0, 10.0, 2, 2)
            .with_jitter_scale(0.0)
            .build()
            .unwrap();

        let expected = [
            [0.0, 0.0, 0.0],
            [5.0, 0.0, 0.0],
            [10.0, 0.0, 0.0],
            [0.0, 0.0, 5.0],
            [5.0, 0.0, 5.0],
            [10.0, 0.0, 5.0],
            [0.0, 0.0, 10.0],
            [5.0, 0.0, 10.0],
            [10.0, 0.0, 10.0],
        ];
        let positions: Vec<[f32; 3]> = mesh.vertices().iter().map(|v| v.position).collect();
        assert_eq!(positions, expected);

        assert_eq!(mesh.index_count(), 24);
        assert_eq!(mesh.triangle_count(), 8);
        // First cell: (bl, tl, br), (tl, tr, br)
        assert_eq!(&mesh.indices()[..6], &[0, 3, 1, 3, 4, 1]);
        // Last cell starts at row 1, column 1
        assert_eq!(&mesh.indices()[18..], &[4, 7, 5, 7, 8, 5]);
    }

    #[test]
    fn seeded_builds_are_deterministic() {
        let builder = GridMeshBuilder::new(50.0, 30.0, 20, 10).with_seed(42);
        let a = builder.build().unwrap();
        let b = builder.build().unwrap();
        assert_eq!(a.vertices(), b.vertices());
        assert_eq!(a.indices(), b.indices());

        let c = GridMeshBuilder::new(50.0, 30.0, 20, 10)
            .with_seed(43)
            .build()
            .unwrap();
        assert_ne!(a.vertices(), c.vertices());
    }

    #[test]
    fn jitter_stays_within_half_segment_and_off_y() {
        let (width, depth, sx, sz) = (20.0, 10.0, 10, 5);
        let mesh = GridMeshBuilder::new(width, depth, sx, sz)
            .with_seed(7)
            .build()
            .unwrap();
        let seg_w = width / sx as f32;
        let seg_d = depth / sz as f32;

        let mut moved = false;
        for (i, v) in mesh.vertices().iter().enumerate() {
            let col = (i % (sx as usize + 1)) as f32;
            let row = (i / (sx as usize + 1)) as f32;
            let [x, y, z] = v.position;
            assert_eq!(y, 0.0);
            assert!((x - col * seg_w).abs() <= seg_w * DEFAULT_JITTER_SCALE + 1e-5);
            assert!((z - row * seg_d).abs() <= seg_d * DEFAULT_JITTER_SCALE + 1e-5);
            moved |= x != col * seg_w;
        }
        assert!(moved, "default builder should jitter vertices");
    }

    #[test]
    fn triangles_wind_counter_clockwise_from_above() {
        let mesh = GridMeshBuilder::new(10.0, 10.0, 12, 12)
            .with_jitter_scale(0.2)
            .with_seed(3)
            .build()
            .unwrap();
        for [a, b, c] in mesh.triangles() {
            let normal = (b - a).cross(c - a);
            assert!(normal.y > 0.0, "triangle {a} {b} {c} is not CCW");
        }
        assert_eq!(mesh.clockwise_triangle_count(), 0);
    }

    #[test]
    fn default_jitter_can_fold_but_fold_free_bound_cannot() {
        let folded = GridMeshBuilder::new(100.0, 100.0, 100, 100)
            .with_seed(42)
            .build()
            .unwrap();
        assert!(folded.clockwise_triangle_count() > 0);
        assert_eq!(folded.first_out_of_range_index(), None);

        for seed in [1, 7, 42] {
            let mesh = GridMeshBuilder::new(100.0, 100.0, 100, 100)
                .with_jitter_scale(FOLD_FREE_JITTER)
                .with_seed(seed)
                .build()
                .unwrap();
            assert_eq!(mesh.clockwise_triangle_count(), 0, "seed {seed}");
        }
    }

    #[test]
    fn unjittered_grid_covers_full_extent() {
        let mesh = GridMeshBuilder::new(7.5, 3.0, 3, 4)
            .with_jitter_scale(0.0)
            .build()
            .unwrap();
        let (min, max) = mesh.bounds();
        assert_eq!(min, Vec3::ZERO);
        assert!((max - Vec3::new(7.5, 0.0, 3.0)).length() < 1e-5);
    }

    #[test]
    fn zero_segments_rejected() {
        let err = GridMeshBuilder::new(10.0, 10.0, 0, 4).build().unwrap_err();
        assert_eq!(err, MeshError::InvalidSegments { axis: 'x', value: 0 });

        let err = GridMeshBuilder::new(10.0, 10.0, 4, 0).build().unwrap_err();
        assert_eq!(err, MeshError::InvalidSegments { axis: 'z', value: 0 });
    }

    #[test]
    fn non_positive_extent_rejected() {
        assert!(matches!(
            GridMeshBuilder::new(0.0, 10.0, 1, 1).build(),
            Err(MeshError::InvalidExtent { axis: 'x', .. })
        ));
        assert!(matches!(
            GridMeshBuilder::new(10.0, -1.0, 1, 1).build(),
            Err(MeshError::InvalidExtent { axis: 'z', .. })
        ));
        assert!(matches!(
            GridMeshBuilder::new(f32::NAN, 1.0, 1, 1).build(),
            Err(MeshError::InvalidExtent { .. })
        ));
    }

    #[test]
    fn negative_jitter_rejected() {
        let err = GridMeshBuilder::new(1.0, 1.0, 1, 1)
            .with_jitter_scale(-0.1)
            .build()
            .unwrap_err();
        assert_eq!(err, MeshError::InvalidJitter(-0.1));
    }

    #[test]
    fn oversized_lattice_rejected_before_allocation() {
        let err = GridMeshBuilder::new(1.0, 1.0, u32::MAX, 2).build().unwrap_err();
        assert!(matches!(err, MeshError::TooLarge { .. }));
    }
}
