//! Procedural mesh generation for the orrery: flat-shaded polyhedra and a
//! latitude/longitude sphere, emitted as indexed triangle lists with
//! per-vertex color.

pub mod mesh;
pub mod polyhedron;
pub mod sphere;

pub use mesh::{Mesh, Vertex, palette};
pub use polyhedron::{FlatFace, FlatPolyhedron, OCTAHEDRON, generate_flat_polyhedron, generate_octahedron};
pub use sphere::{MARKER_COLOR, generate_sphere, sphere_index_count, sphere_vertex_count};
