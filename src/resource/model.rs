//! Textured models drawn on top of the tracked targets.

use std::ops::Range;
use std::path::Path;

use image::DynamicImage;

use crate::config::ModelAsset;
use crate::context::Context;
use crate::error::Result;
use crate::loader::obj::{self, ModelData};
use crate::resource::gpu_buffer::FixedBuffer;
use crate::resource::texture::{self, Texture, TextureOrigin};

struct ModelGpu {
    vertices: FixedBuffer,
    texture_coordinates: FixedBuffer,
    vertex_count: u32,
    texture: Texture,
    bind_group: wgpu::BindGroup,
}

/// A non-indexed textured triangle list.
///
/// A model that failed to load is kept around empty: its vertex count is zero
/// and drawing it does nothing.
pub struct Model {
    name: String,
    gpu: Option<ModelGpu>,
}

impl Model {
    /// A model with nothing to draw.
    pub fn empty(name: &str) -> Model {
        Model {
            name: name.to_string(),
            gpu: None,
        }
    }

    /// Loads `asset` from `asset_dir`, logging and returning an empty model on failure.
    pub fn load(
        ctxt: &Context,
        asset: &ModelAsset,
        asset_dir: &Path,
        texture_layout: &wgpu::BindGroupLayout,
        sampler: &wgpu::Sampler,
    ) -> Model {
        match Model::try_load(ctxt, asset, asset_dir, texture_layout, sampler) {
            Ok(model) => {
                log::debug!(
                    "loaded {} model: {} vertices",
                    asset.name,
                    model.vertex_count()
                );
                model
            }
            Err(e) => {
                log::error!("Failed to load {} model: {}", asset.name, e);
                Model::empty(&asset.name)
            }
        }
    }

    /// Loads `asset` from `asset_dir`.
    ///
    /// Both files are read before anything is allocated on the GPU.
    pub fn try_load(
        ctxt: &Context,
        asset: &ModelAsset,
        asset_dir: &Path,
        texture_layout: &wgpu::BindGroupLayout,
        sampler: &wgpu::Sampler,
    ) -> Result<Model> {
        let data = obj::parse_file(&asset.mesh_path(asset_dir))?;
        let image = texture::load_image(&asset.texture_path(asset_dir))?;

        Model::upload(ctxt, &asset.name, &data, &image, texture_layout, sampler)
    }

    /// Uploads already decoded geometry and texture.
    ///
    /// The texture is flipped because model texture coordinates start at the
    /// bottom-left corner. A texture the device cannot hold is an error.
    pub fn upload(
        ctxt: &Context,
        name: &str,
        data: &ModelData,
        image: &DynamicImage,
        texture_layout: &wgpu::BindGroupLayout,
        sampler: &wgpu::Sampler,
    ) -> Result<Model> {
        if data.vertex_count() == 0 {
            log::warn!("{} model has no vertices", name);
            return Ok(Model::empty(name));
        }

        let label = format!("{}_texture", name);
        let texture = Texture::from_image(ctxt, &label, image, TextureOrigin::BottomLeft)?;
        log::debug!(
            "{} texture is {:?}",
            name,
            texture::image_size(image)
        );

        let vertices = FixedBuffer::with_contents(
            ctxt,
            &format!("{}_vertices", name),
            &data.vertices,
            wgpu::BufferUsages::VERTEX,
        );
        let texture_coordinates = FixedBuffer::with_contents(
            ctxt,
            &format!("{}_texture_coordinates", name),
            &data.texture_coordinates,
            wgpu::BufferUsages::VERTEX,
        );

        let bind_group =
            texture::texture_bind_group(ctxt, &label, texture_layout, &texture.view, sampler);

        Ok(Model {
            name: name.to_string(),
            gpu: Some(ModelGpu {
                vertices,
                texture_coordinates,
                vertex_count: data.vertex_count() as u32,
                texture,
                bind_group,
            }),
        })
    }

    /// Name used in log messages.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether mesh and texture were uploaded.
    #[inline]
    pub fn is_loaded(&self) -> bool {
        self.gpu.is_some()
    }

    /// Number of vertices drawn; zero when loading failed.
    #[inline]
    pub fn vertex_count(&self) -> u32 {
        self.gpu.as_ref().map_or(0, |gpu| gpu.vertex_count)
    }

    /// Byte lengths of the position and texture coordinate buffers.
    pub fn buffer_byte_lens(&self) -> Option<(u64, u64)> {
        self.gpu
            .as_ref()
            .map(|gpu| (gpu.vertices.byte_len(), gpu.texture_coordinates.byte_len()))
    }

    /// The model texture, if loaded.
    pub fn texture(&self) -> Option<&Texture> {
        self.gpu.as_ref().map(|gpu| &gpu.texture)
    }

    /// Vertex range of the draw call, `None` when there is nothing to draw.
    #[inline]
    pub fn draw_range(&self) -> Option<Range<u32>> {
        match self.vertex_count() {
            0 => None,
            n => Some(0..n),
        }
    }

    /// Records the draw with `transform` bound at group 0.
    ///
    /// The textured pipeline must already be set. Returns `false` if the
    /// model is empty and nothing was recorded.
    pub fn draw(&self, pass: &mut wgpu::RenderPass<'_>, transform: &wgpu::BindGroup) -> bool {
        let (Some(gpu), Some(range)) = (self.gpu.as_ref(), self.draw_range()) else {
            log::trace!("skipping draw of empty {} model", self.name);
            return false;
        };

        pass.set_bind_group(0, transform, &[]);
        pass.set_bind_group(1, &gpu.bind_group, &[]);
        pass.set_vertex_buffer(0, gpu.vertices.buffer().slice(..));
        pass.set_vertex_buffer(1, gpu.texture_coordinates.buffer().slice(..));
        pass.draw(range, 0..1);

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_model_draws_nothing() {
        let model = Model::empty("astronaut");

        assert!(!model.is_loaded());
        assert_eq!(model.vertex_count(), 0);
        assert_eq!(model.draw_range(), None);
        assert!(model.buffer_byte_lens().is_none());
        assert!(model.texture().is_none());
        assert_eq!(model.name(), "astronaut");
    }
}
