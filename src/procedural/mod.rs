//! Procedural generation of the static augmentation shapes.

pub use self::cuboid::unit_cuboid;
pub use self::quad::{unit_square, unit_square_outline};
pub use self::render_mesh::RenderMesh;

mod cuboid;
mod quad;
mod render_mesh;
