//! Latitude/longitude sphere tessellation
//!
//! A sphere with `X` longitude and `Y` latitude segments has `(X+1)(Y+1)`
//! vertices laid out row by row from the north pole (`v = 0`) to the south
//! pole (`v = 1`). The seam column is duplicated so texture coordinates can
//! run the full `0..=1` range.
//!
//! Indices form a single serpentine triangle strip: even rows walk left to
//! right, odd rows walk right to left, so consecutive rows share an edge and
//! no degenerate restart is needed.

use std::f32::consts::PI;

/// Segment count of the shared high-detail mesh (sun, planets, Earth's moon)
pub const HIGH_DETAIL_SEGMENTS: u32 = 64;

/// Segment count of the shared low-detail mesh (small moons)
pub const LOW_DETAIL_SEGMENTS: u32 = 32;

/// Which of the two shared sphere meshes a body is drawn with
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SphereDetail {
    High,
    Low,
}

impl SphereDetail {
    /// Both detail levels, in upload order
    pub const ALL: [SphereDetail; 2] = [SphereDetail::High, SphereDetail::Low];

    /// Segment count used when nothing else is configured
    pub fn default_segments(self) -> u32 {
        match self {
            SphereDetail::High => HIGH_DETAIL_SEGMENTS,
            SphereDetail::Low => LOW_DETAIL_SEGMENTS,
        }
    }
}

/// A sphere vertex: position, normal and texture coordinate
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SphereVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

/// Tessellated unit sphere
#[derive(Clone, Debug)]
pub struct SphereMesh {
    vertices: Vec<SphereVertex>,
    indices: Vec<u32>,
    x_segments: u32,
    y_segments: u32,
}

impl SphereMesh {
    /// Tessellate a unit sphere centred at the origin
    pub fn new(x_segments: u32, y_segments: u32) -> Self {
        Self::with_offset(x_segments, y_segments, [0.0; 3])
    }

    /// Tessellate a unit sphere whose centre is moved by `offset`
    ///
    /// Each normal is the vertex position, offset included.
    pub fn with_offset(x_segments: u32, y_segments: u32, offset: [f32; 3]) -> Self {
        let x_segments = clamp_segments(x_segments, "longitude");
        let y_segments = clamp_segments(y_segments, "latitude");

        let row = x_segments + 1;
        let mut vertices = Vec::with_capacity((row * (y_segments + 1)) as usize);

        for y in 0..=y_segments {
            let v = y as f32 / y_segments as f32;
            let (sin_theta, cos_theta) = (v * PI).sin_cos();

            for x in 0..=x_segments {
                let u = x as f32 / x_segments as f32;
                let (sin_phi, cos_phi) = (u * 2.0 * PI).sin_cos();

                let position = [
                    cos_phi * sin_theta + offset[0],
                    cos_theta + offset[1],
                    sin_phi * sin_theta + offset[2],
                ];
                vertices.push(SphereVertex {
                    position,
                    normal: position,
                    uv: [u, v],
                });
            }
        }

        let mut indices = Vec::with_capacity((2 * y_segments * row) as usize);
        for y in 0..y_segments {
            let top = y * row;
            let bottom = (y + 1) * row;
            if y % 2 == 0 {
                for x in 0..=x_segments {
                    indices.push(top + x);
                    indices.push(bottom + x);
                }
            } else {
                for x in (0..=x_segments).rev() {
                    indices.push(bottom + x);
                    indices.push(top + x);
                }
            }
        }

        log::debug!(
            "Tessellated sphere {}x{}: {} vertices, {} strip indices",
            x_segments,
            y_segments,
            vertices.len(),
            indices.len()
        );

        Self {
            vertices,
            indices,
            x_segments,
            y_segments,
        }
    }

    /// Tessellate the shared mesh for a detail level
    ///
    /// `None` uses the level's [`default_segments`](SphereDetail::default_segments).
    pub fn for_detail(detail: SphereDetail, segments: Option<u32>) -> Self {
        let segments = segments.unwrap_or_else(|| detail.default_segments());
        log::debug!("Building {:?} detail sphere with {} segments", detail, segments);
        Self::new(segments, segments)
    }

    pub fn vertices(&self) -> &[SphereVertex] {
        &self.vertices
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    /// Segment counts as `(longitude, latitude)`
    pub fn segments(&self) -> (u32, u32) {
        (self.x_segments, self.y_segments)
    }
}

fn clamp_segments(segments: u32, axis: &str) -> u32 {
    if segments == 0 {
        log::warn!("Sphere {} segment count of 0 clamped to 1", axis);
        1
    } else {
        segments
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-5;

    #[test]
    fn test_high_detail_counts() {
        let n = HIGH_DETAIL_SEGMENTS as usize;
        let mesh = SphereMesh::new(HIGH_DETAIL_SEGMENTS, HIGH_DETAIL_SEGMENTS);
        assert_eq!(mesh.vertex_count(), (n + 1) * (n + 1));
        assert_eq!(mesh.index_count(), 2 * n * (n + 1));
        assert_eq!(mesh.vertex_count(), 4225);
        assert_eq!(mesh.index_count(), 8320);
    }

    #[test]
    fn test_low_detail_counts() {
        let n = LOW_DETAIL_SEGMENTS as usize;
        let mesh = SphereMesh::new(LOW_DETAIL_SEGMENTS, LOW_DETAIL_SEGMENTS);
        assert_eq!(mesh.vertex_count(), (n + 1) * (n + 1));
        assert_eq!(mesh.index_count(), 2 * n * (n + 1));
    }

    #[test]
    fn test_non_square_counts() {
        let mesh = SphereMesh::new(8, 5);
        assert_eq!(mesh.vertex_count(), 9 * 6);
        assert_eq!(mesh.index_count(), 2 * 5 * 9);
        assert_eq!(mesh.segments(), (8, 5));
    }

    #[test]
    fn test_indices_in_range() {
        let mesh = SphereMesh::new(16, 16);
        let count = mesh.vertex_count() as u32;
        assert!(mesh.indices().iter().all(|&i| i < count));
    }

    #[test]
    fn test_vertices_on_unit_sphere() {
        let mesh = SphereMesh::new(12, 12);
        for v in mesh.vertices() {
            let [x, y, z] = v.position;
            let len = (x * x + y * y + z * z).sqrt();
            assert!((len - 1.0).abs() < EPSILON, "vertex {:?} off sphere", v);
            assert_eq!(v.position, v.normal);
        }
    }

    #[test]
    fn test_uv_range_and_poles() {
        let mesh = SphereMesh::new(10, 10);
        for v in mesh.vertices() {
            assert!((0.0..=1.0).contains(&v.uv[0]));
            assert!((0.0..=1.0).contains(&v.uv[1]));
        }
        let first = mesh.vertices()[0];
        let last = mesh.vertices()[mesh.vertex_count() - 1];
        assert!((first.position[1] - 1.0).abs() < EPSILON);
        assert!((last.position[1] + 1.0).abs() < EPSILON);
        assert_eq!(first.uv, [0.0, 0.0]);
        assert_eq!(last.uv, [1.0, 1.0]);
    }

    #[test]
    fn test_strip_snakes_between_rows() {
        let mesh = SphereMesh::new(4, 3);
        let idx = mesh.indices();
        // Row 0 walks right: (0,5), (1,6), ...
        assert_eq!(&idx[0..4], &[0, 5, 1, 6]);
        // Row 0 ends at column 4, row 1 starts back at column 4
        let row_len = 2 * 5;
        assert_eq!(idx[row_len - 1], 9);
        assert_eq!(idx[row_len], 14);
        assert_eq!(idx[row_len + 1], 9);
    }

    #[test]
    fn test_offset_shifts_positions_and_normals() {
        let offset = [2.0, -1.0, 0.5];
        let centred = SphereMesh::new(6, 6);
        let moved = SphereMesh::with_offset(6, 6, offset);
        for (a, b) in centred.vertices().iter().zip(moved.vertices()) {
            for axis in 0..3 {
                assert!((b.position[axis] - a.position[axis] - offset[axis]).abs() < EPSILON);
            }
            assert_eq!(b.normal, b.position);
        }
    }

    #[test]
    fn test_offset_normal_matches_position() {
        let mesh = SphereMesh::with_offset(4, 4, [2.0, 0.0, 0.0]);
        let v = mesh.vertices()[7];
        assert_eq!(v.position, v.normal);
        assert!((v.position[0] - (2.0 - std::f32::consts::FRAC_1_SQRT_2)).abs() < EPSILON);
    }

    #[test]
    fn test_zero_segments_clamped() {
        let mesh = SphereMesh::new(0, 0);
        assert_eq!(mesh.segments(), (1, 1));
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.index_count(), 4);
    }

    #[test]
    fn test_detail_default_segments() {
        assert_eq!(SphereDetail::High.default_segments(), 64);
        assert_eq!(SphereDetail::Low.default_segments(), 32);
        let mesh = SphereMesh::for_detail(SphereDetail::Low, Some(32));
        assert_eq!(mesh.vertex_count(), 33 * 33);
    }

    #[test]
    fn test_for_detail_defaults_to_level_segments() {
        let low = SphereMesh::for_detail(SphereDetail::Low, None);
        assert_eq!(low.segments(), (LOW_DETAIL_SEGMENTS, LOW_DETAIL_SEGMENTS));
        let high = SphereMesh::for_detail(SphereDetail::High, None);
        assert_eq!(high.segments(), (HIGH_DETAIL_SEGMENTS, HIGH_DETAIL_SEGMENTS));
    }
}
