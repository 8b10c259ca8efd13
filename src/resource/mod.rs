//! GPU resources owned by the renderer.

pub use crate::resource::gpu_buffer::{
    FixedBuffer, BACKGROUND_INDEX_COUNT, BACKGROUND_INDICES_BYTES,
    BACKGROUND_TEXTURE_COORDINATES_BYTES, BACKGROUND_VERTEX_COUNT, BACKGROUND_VERTICES_BYTES,
    COLOR_BYTES, MATRIX_BYTES,
};
pub use crate::resource::guide_view::{
    GuideView, GuideViewCache, GuideViewImage, PixelImage, GUIDE_VIEW_FORMAT,
};
pub use crate::resource::model::Model;
pub use crate::resource::sampler::{SamplerKind, Samplers};
pub use crate::resource::static_mesh::StaticMesh;
pub use crate::resource::texture::{Texture, TextureOrigin};
pub use crate::resource::uniform::UniformBinding;

mod gpu_buffer;
mod guide_view;
mod model;
mod sampler;
mod static_mesh;
pub mod texture;
mod uniform;
