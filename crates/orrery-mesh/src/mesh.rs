//! Core mesh types shared by every generator.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

/// A single vertex: object-space position and linear RGB color.
///
/// Laid out as `#[repr(C)]` so a `&[Vertex]` can be handed straight to
/// `bytemuck::cast_slice` for GPU upload (24-byte stride).
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub color: [f32; 3],
}

impl Vertex {
    /// Create a vertex from a glam position and an RGB triple.
    pub fn new(position: Vec3, color: [f32; 3]) -> Self {
        Self {
            position: position.to_array(),
            color,
        }
    }

    /// The position as a glam vector.
    pub fn position(&self) -> Vec3 {
        Vec3::from_array(self.position)
    }
}

/// An indexed triangle list.
///
/// Every three consecutive indices form one triangle, wound counter-clockwise
/// when viewed from the front.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl Mesh {
    /// Create a mesh with room for the given number of vertices and indices.
    pub fn with_capacity(vertices: usize, indices: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertices),
            indices: Vec::with_capacity(indices),
        }
    }

    /// Number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of indices.
    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    /// Number of whole triangles described by the index list.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// `true` when the index count is a multiple of three and every index
    /// refers to an existing vertex.
    pub fn is_well_formed(&self) -> bool {
        let vertex_count = self.vertices.len();
        self.indices.len() % 3 == 0
            && self
                .indices
                .iter()
                .all(|&index| (index as usize) < vertex_count)
    }

    /// Iterate over triangles as position triples.
    pub fn triangles(&self) -> impl Iterator<Item = [Vec3; 3]> + '_ {
        self.indices.chunks_exact(3).map(|tri| {
            [
                self.vertices[tri[0] as usize].position(),
                self.vertices[tri[1] as usize].position(),
                self.vertices[tri[2] as usize].position(),
            ]
        })
    }

    /// Raw vertex bytes for buffer upload.
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }
}

/// Named face colors used by the flat polyhedra.
pub mod palette {
    pub const RED: [f32; 3] = [1.0, 0.0, 0.0];
    pub const GREEN: [f32; 3] = [0.0, 1.0, 0.0];
    pub const BLUE: [f32; 3] = [0.0, 0.0, 1.0];
    pub const GREY: [f32; 3] = [0.5, 0.5, 0.5];
    pub const FUCHSIA: [f32; 3] = [1.0, 0.0, 1.0];
    pub const YELLOW: [f32; 3] = [1.0, 1.0, 0.0];
    pub const AQUA: [f32; 3] = [0.0, 1.0, 1.0];
    pub const WHITE: [f32; 3] = [1.0, 1.0, 1.0];
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> Mesh {
        Mesh {
            vertices: vec![
                Vertex::new(Vec3::ZERO, palette::RED),
                Vertex::new(Vec3::X, palette::RED),
                Vertex::new(Vec3::Y, palette::RED),
            ],
            indices: vec![0, 1, 2],
        }
    }

    #[test]
    fn test_vertex_stride_is_24_bytes() {
        assert_eq!(std::mem::size_of::<Vertex>(), 24);
    }

    #[test]
    fn test_well_formed_triangle() {
        let mesh = triangle();
        assert!(mesh.is_well_formed());
        assert_eq!(mesh.triangle_count(), 1);
    }

    #[test]
    fn test_out_of_range_index_is_rejected() {
        let mut mesh = triangle();
        mesh.indices[2] = 3;
        assert!(!mesh.is_well_formed());
    }

    #[test]
    fn test_partial_triangle_is_rejected() {
        let mut mesh = triangle();
        mesh.indices.push(0);
        assert!(!mesh.is_well_formed());
    }

    #[test]
    fn test_empty_mesh_is_well_formed() {
        assert!(Mesh::default().is_well_formed());
    }

    #[test]
    fn test_vertex_bytes_length() {
        let mesh = triangle();
        assert_eq!(mesh.vertex_bytes().len(), 3 * 24);
    }

    #[test]
    fn test_triangles_iterates_positions() {
        let mesh = triangle();
        let tris: Vec<_> = mesh.triangles().collect();
        assert_eq!(tris, vec![[Vec3::ZERO, Vec3::X, Vec3::Y]]);
    }
}
