/*!
# ar-overlay

GPU resources and draw calls for an augmented-reality sample.

The AR engine tracks targets and hands out poses, a video background mesh and
guide-view pixels. This crate turns those into wgpu draw calls:

* the camera video as a full-screen background,
* a translucent square with an outline on image targets,
* a translucent bounding cube on model targets,
* a grey marker cube at the world origin,
* a textured 3D model on each target type,
* the guide view of a model target before it is detected.

Everything is allocated once in [`ArRenderer::new`](renderer::ArRenderer::new).
Per-frame calls only copy matrices and vertices into pre-sized buffers and
record draws into a render pass owned by the host.

```no_run
use ar_overlay::prelude::*;

# fn frame(video: &wgpu::TextureView, pass: &mut wgpu::RenderPass<'_>) -> ar_overlay::Result<()> {
let ctxt = Context::headless(wgpu::TextureFormat::Bgra8Unorm)?;
let library = ShaderLibrary::builtin(&ctxt)?;
let config = RendererConfig::default().with_asset_dir("assets");
let renderer = ArRenderer::new(&ctxt, &library, config)?;

let mesh = BackgroundMesh {
    vertices: &[-1.0, -1.0, 0.0, 1.0, -1.0, 0.0, 1.0, 1.0, 0.0, -1.0, 1.0, 0.0],
    texture_coordinates: &[0.0, 1.0, 1.0, 1.0, 1.0, 0.0, 0.0, 0.0],
    indices: &[0, 1, 2, 0, 2, 3],
};
renderer.render_video_background(pass, &Mat4::IDENTITY, &mesh, video);
# Ok(())
# }
```
*/
#![allow(clippy::module_inception)]
#![allow(clippy::too_many_arguments)]

pub use glamx;

pub mod color;
pub mod config;
pub mod context;
pub mod error;
pub mod loader;
pub mod procedural;
pub mod renderer;
pub mod resource;

pub use crate::error::{Error, Result};

pub mod prelude {
    pub use crate::color::*;
    pub use crate::config::*;
    pub use crate::context::*;
    pub use crate::error::{Error, Result};
    pub use crate::renderer::*;
    pub use crate::resource::*;
    pub use glamx::{Mat4, Vec3};
}
