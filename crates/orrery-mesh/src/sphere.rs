//! Latitude/longitude ("UV") sphere.
//!
//! Rings run from the north pole (`+Z`) to the south pole (`-Z`). Each ring
//! holds `sectors + 1` vertices so the seam column is duplicated, and the pole
//! rings keep all their (coincident) vertices instead of collapsing to a single
//! apex. The pole quads emit only their non-degenerate triangle.

use std::f32::consts::{FRAC_PI_2, PI, TAU};

use glam::Vec3;

use crate::mesh::{Mesh, Vertex, palette};

/// Color of every sphere vertex.
pub const MARKER_COLOR: [f32; 3] = palette::YELLOW;

/// Number of vertices [`generate_sphere`] produces.
pub fn sphere_vertex_count(sector_count: u32, stack_count: u32) -> usize {
    (stack_count as usize + 1) * (sector_count as usize + 1)
}

/// Number of indices [`generate_sphere`] produces: two triangles per quad,
/// one for each quad touching a pole.
pub fn sphere_index_count(sector_count: u32, stack_count: u32) -> usize {
    6 * sector_count as usize * (stack_count as usize).saturating_sub(1)
}

/// Generate a sphere of `radius` with `sector_count` longitude divisions and
/// `stack_count` latitude divisions.
///
/// Callers supply `sector_count >= 3` and `stack_count >= 2`; other values
/// produce a degenerate mesh rather than an error.
pub fn generate_sphere(radius: f32, sector_count: u32, stack_count: u32) -> Mesh {
    let mut mesh = Mesh::with_capacity(
        sphere_vertex_count(sector_count, stack_count),
        sphere_index_count(sector_count, stack_count),
    );

    let sector_step = TAU / sector_count as f32;
    let stack_step = PI / stack_count as f32;

    for i in 0..=stack_count {
        let stack_angle = FRAC_PI_2 - i as f32 * stack_step;
        let ring_radius = radius * stack_angle.cos();
        let z = radius * stack_angle.sin();

        for j in 0..=sector_count {
            let sector_angle = j as f32 * sector_step;
            let position = Vec3::new(
                ring_radius * sector_angle.cos(),
                ring_radius * sector_angle.sin(),
                z,
            );
            mesh.vertices.push(Vertex::new(position, MARKER_COLOR));
        }
    }

    let ring = sector_count + 1;
    for i in 0..stack_count {
        let mut k1 = i * ring;
        let mut k2 = k1 + ring;

        for _ in 0..sector_count {
            if i != 0 {
                mesh.indices.extend_from_slice(&[k1, k2, k1 + 1]);
            }
            if i != stack_count - 1 {
                mesh.indices.extend_from_slice(&[k1 + 1, k2, k2 + 1]);
            }
            k1 += 1;
            k2 += 1;
        }
    }

    mesh
}
