//! Pipelines, shaders and the draw calls of the AR augmentations.

pub use self::ar_renderer::{ArRenderer, BackgroundMesh};
pub use self::pipelines::{BindGroupLayouts, PipelineKind, Pipelines};
pub use self::shader_library::{ShaderFunction, ShaderLibrary};

mod ar_renderer;
pub mod pipelines;
pub mod shader_library;
pub mod transforms;
