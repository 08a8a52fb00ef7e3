//! Flat-shaded polyhedra described by static face tables.
//!
//! Each face carries its own color, so corners are never shared between faces:
//! a solid with `F` triangular faces always produces `3F` vertices and the
//! indices `0..3F` in order.

use glam::Vec3;

use crate::mesh::{Mesh, Vertex, palette};

/// One triangular face: three corner indices into [`FlatPolyhedron::corners`]
/// (counter-clockwise seen from outside) and a face color.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FlatFace {
    pub corners: [usize; 3],
    pub color: [f32; 3],
}

/// A convex solid with unit-scale corners and a canonical face order.
#[derive(Clone, Copy, Debug)]
pub struct FlatPolyhedron {
    pub corners: &'static [Vec3],
    pub faces: &'static [FlatFace],
}

const A: usize = 0; // -X
const B: usize = 1; // +Z
const C: usize = 2; // +X
const D: usize = 3; // -Z
const E: usize = 4; // +Y
const F: usize = 5; // -Y

/// Regular octahedron with corners on the unit axes.
///
/// The upper four faces share the `+Y` apex, the lower four the `-Y` apex.
pub const OCTAHEDRON: FlatPolyhedron = FlatPolyhedron {
    corners: &[
        Vec3::new(-1.0, 0.0, 0.0),
        Vec3::new(0.0, 0.0, 1.0),
        Vec3::new(1.0, 0.0, 0.0),
        Vec3::new(0.0, 0.0, -1.0),
        Vec3::new(0.0, 1.0, 0.0),
        Vec3::new(0.0, -1.0, 0.0),
    ],
    faces: &[
        FlatFace { corners: [A, B, E], color: palette::RED },
        FlatFace { corners: [B, C, E], color: palette::GREEN },
        FlatFace { corners: [C, D, E], color: palette::BLUE },
        FlatFace { corners: [D, A, E], color: palette::GREY },
        FlatFace { corners: [B, A, F], color: palette::FUCHSIA },
        FlatFace { corners: [C, B, F], color: palette::YELLOW },
        FlatFace { corners: [D, C, F], color: palette::AQUA },
        FlatFace { corners: [A, D, F], color: palette::WHITE },
    ],
};

/// Expand a face table into an unshared, flat-colored triangle list.
///
/// Corners are multiplied by `scale`. Faces are emitted in table order.
pub fn generate_flat_polyhedron(solid: &FlatPolyhedron, scale: f32) -> Mesh {
    let count = solid.faces.len() * 3;
    let mut mesh = Mesh::with_capacity(count, count);

    for face in solid.faces {
        for &corner in &face.corners {
            let index = mesh.vertices.len() as u32;
            mesh.vertices
                .push(Vertex::new(solid.corners[corner] * scale, face.color));
            mesh.indices.push(index);
        }
    }

    mesh
}

/// Octahedron whose corners sit `size / 2` from the center along each axis.
pub fn generate_octahedron(size: f32) -> Mesh {
    generate_flat_polyhedron(&OCTAHEDRON, size * 0.5)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_octahedron_has_24_vertices_and_sequential_indices() {
        for size in [0.5, 1.0, 6.0, 18.0] {
            let mesh = generate_octahedron(size);
            assert_eq!(mesh.vertex_count(), 24);
            assert_eq!(mesh.indices, (0..24).collect::<Vec<u32>>());
            assert!(mesh.is_well_formed());
        }
    }

    #[test]
    fn test_octahedron_corners_at_half_size() {
        let mesh = generate_octahedron(10.0);
        for v in &mesh.vertices {
            assert!((v.position().length() - 5.0).abs() < 1e-6, "{:?}", v.position);
        }
    }

    #[test]
    fn test_octahedron_winding_faces_outward() {
        let mesh = generate_octahedron(2.0);
        for [a, b, c] in mesh.triangles() {
            let normal = (b - a).cross(c - a);
            let centroid = (a + b + c) / 3.0;
            assert!(normal.dot(centroid) > 0.0, "inward face {a} {b} {c}");
        }
    }

    #[test]
    fn test_octahedron_faces_are_flat_colored_and_distinct() {
        let mesh = generate_octahedron(1.0);
        let face_colors: Vec<[f32; 3]> = mesh
            .vertices
            .chunks_exact(3)
            .map(|face| {
                assert!(face.iter().all(|v| v.color == face[0].color));
                face[0].color
            })
            .collect();

        for (i, a) in face_colors.iter().enumerate() {
            for b in &face_colors[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_octahedron_canonical_order() {
        let mesh = generate_octahedron(2.0);
        // First face is ABE: -X, +Z, +Y.
        assert_eq!(mesh.vertices[0].position, [-1.0, 0.0, 0.0]);
        assert_eq!(mesh.vertices[1].position, [0.0, 0.0, 1.0]);
        assert_eq!(mesh.vertices[2].position, [0.0, 1.0, 0.0]);
        assert_eq!(mesh.vertices[0].color, palette::RED);
        // Last face is ADF, white.
        assert_eq!(mesh.vertices[23].position, [0.0, -1.0, 0.0]);
        assert_eq!(mesh.vertices[23].color, palette::WHITE);
    }

    #[test]
    fn test_each_apex_used_by_four_faces() {
        let up = OCTAHEDRON
            .faces
            .iter()
            .filter(|f| f.corners.contains(&E))
            .count();
        let down = OCTAHEDRON
            .faces
            .iter()
            .filter(|f| f.corners.contains(&F))
            .count();
        assert_eq!((up, down), (4, 4));
    }

    #[test]
    fn test_custom_table() {
        const TRI: FlatPolyhedron = FlatPolyhedron {
            corners: &[Vec3::X, Vec3::Y, Vec3::Z],
            faces: &[FlatFace {
                corners: [0, 1, 2],
                color: palette::GREEN,
            }],
        };
        let mesh = generate_flat_polyhedron(&TRI, 3.0);
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.vertices[1].position, [0.0, 3.0, 0.0]);
    }
}
