//! Draw calls for the video background and the AR augmentations.

use glamx::{Mat4, Vec3};

use crate::color::{self, MARKER_GREY, RED, TRANSLUCENT_ALPHA};
use crate::config::RendererConfig;
use crate::context::Context;
use crate::error::Result;
use crate::procedural;
use crate::renderer::pipelines::{BindGroupLayouts, PipelineKind, Pipelines};
use crate::renderer::shader_library::ShaderLibrary;
use crate::renderer::transforms::{
    model_view_projection, scaled_model_view_projection, WORLD_ORIGIN_SCALE,
};
use crate::resource::texture;
use crate::resource::{
    FixedBuffer, GuideView, GuideViewCache, GuideViewImage, Model, Samplers, StaticMesh,
    UniformBinding, BACKGROUND_INDICES_BYTES, BACKGROUND_TEXTURE_COORDINATES_BYTES,
    BACKGROUND_VERTICES_BYTES,
};

/// Width of the image target outline, relative to the target size.
const OUTLINE_THICKNESS: f32 = 0.03;

/// The video background mesh of the current frame, as handed out by the AR engine.
#[derive(Copy, Clone, Debug)]
pub struct BackgroundMesh<'a> {
    /// Packed xyz positions.
    pub vertices: &'a [f32],
    /// Packed uv texture coordinates, one pair per vertex.
    pub texture_coordinates: &'a [f32],
    /// Triangle list indices.
    pub indices: &'a [u16],
}

impl BackgroundMesh<'_> {
    /// Number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / 3
    }
}

struct VideoBackground {
    vertices: FixedBuffer,
    texture_coordinates: FixedBuffer,
    indices: FixedBuffer,
    projection: UniformBinding,
}

/// Transforms of one target: the model's MVP and the target-sized box MVP.
struct TargetTransforms {
    mvp: UniformBinding,
    scaled_mvp: UniformBinding,
}

impl TargetTransforms {
    fn new(ctxt: &Context, label: &str, layout: &wgpu::BindGroupLayout) -> TargetTransforms {
        TargetTransforms {
            mvp: UniformBinding::matrix(ctxt, &format!("{}_mvp", label), layout),
            scaled_mvp: UniformBinding::matrix(ctxt, &format!("{}_scaled_mvp", label), layout),
        }
    }

    fn write(
        &self,
        ctxt: &Context,
        projection: &Mat4,
        model_view: &Mat4,
        scaled_model_view: &Mat4,
    ) -> Result<()> {
        self.mvp
            .write_matrix(ctxt, &model_view_projection(projection, model_view))?;
        self.scaled_mvp
            .write_matrix(ctxt, &model_view_projection(projection, scaled_model_view))
    }
}

struct Colors {
    marker: UniformBinding,
    translucent: UniformBinding,
    solid: UniformBinding,
}

struct Shapes {
    square: StaticMesh,
    square_outline: StaticMesh,
    cube: StaticMesh,
    guide_view_quad: StaticMesh,
}

/// Renders the video background and the augmentations of the AR sample.
///
/// Everything is allocated by [`ArRenderer::new`]. The `render_*` methods
/// only write matrices and vertices into pre-sized buffers and record draws
/// into the caller's render pass; the writes reach the GPU when the host
/// submits its command buffer. The pass must target the color and depth
/// formats the renderer was configured with.
pub struct ArRenderer {
    ctxt: Context,
    color_format: wgpu::TextureFormat,
    layouts: BindGroupLayouts,
    pipelines: Pipelines,
    samplers: Samplers,
    background: VideoBackground,
    world_origin: UniformBinding,
    image_target: TargetTransforms,
    model_target: TargetTransforms,
    guide_view_transform: UniformBinding,
    colors: Colors,
    shapes: Shapes,
    image_target_model: Model,
    model_target_model: Model,
    guide_view: GuideViewCache<GuideView>,
}

impl ArRenderer {
    /// Creates the pipelines, samplers and buffers, and loads the models.
    ///
    /// Fails only if a pipeline cannot be built. A model that fails to load
    /// is logged and left empty; drawing it does nothing.
    pub fn new(ctxt: &Context, library: &ShaderLibrary, config: RendererConfig) -> Result<ArRenderer> {
        let ctxt = ctxt.clone();
        let color_format = config.color_format.unwrap_or(ctxt.surface_format);

        let layouts = BindGroupLayouts::new(&ctxt);
        let pipelines = Pipelines::new(
            &ctxt,
            library,
            &layouts,
            color_format,
            config.depth_format,
        )
        .inspect_err(|e| log::error!("Failed to create render pipelines: {}", e))?;

        let samplers = Samplers::new(&ctxt);

        let background = VideoBackground {
            vertices: FixedBuffer::new(
                &ctxt,
                "video_background_vertices",
                BACKGROUND_VERTICES_BYTES,
                wgpu::BufferUsages::VERTEX,
            ),
            texture_coordinates: FixedBuffer::new(
                &ctxt,
                "video_background_texture_coordinates",
                BACKGROUND_TEXTURE_COORDINATES_BYTES,
                wgpu::BufferUsages::VERTEX,
            ),
            indices: FixedBuffer::new(
                &ctxt,
                "video_background_indices",
                BACKGROUND_INDICES_BYTES,
                wgpu::BufferUsages::INDEX,
            ),
            projection: UniformBinding::matrix(
                &ctxt,
                "video_background_projection",
                &layouts.transform,
            ),
        };

        let world_origin = UniformBinding::matrix(&ctxt, "world_origin_mvp", &layouts.transform);
        let image_target = TargetTransforms::new(&ctxt, "image_target", &layouts.transform);
        let model_target = TargetTransforms::new(&ctxt, "model_target", &layouts.transform);
        let guide_view_transform =
            UniformBinding::matrix(&ctxt, "guide_view_mvp", &layouts.transform);

        let colors = Colors {
            marker: UniformBinding::with_contents(
                &ctxt,
                "marker_color",
                &layouts.color,
                &color::to_uniform(MARKER_GREY),
            ),
            translucent: UniformBinding::with_contents(
                &ctxt,
                "translucent_color",
                &layouts.color,
                &color::to_uniform(color::with_alpha(RED, TRANSLUCENT_ALPHA)),
            ),
            solid: UniformBinding::with_contents(
                &ctxt,
                "solid_color",
                &layouts.color,
                &color::to_uniform(RED),
            ),
        };

        let shapes = Shapes {
            square: StaticMesh::new(&ctxt, "square", &procedural::unit_square()),
            square_outline: StaticMesh::new(
                &ctxt,
                "square_outline",
                &procedural::unit_square_outline(OUTLINE_THICKNESS),
            ),
            cube: StaticMesh::new(&ctxt, "cube", &procedural::unit_cuboid()),
            guide_view_quad: StaticMesh::new(&ctxt, "guide_view_quad", &procedural::unit_square()),
        };

        let image_target_model = Model::load(
            &ctxt,
            &config.image_target_model,
            &config.asset_dir,
            &layouts.texture,
            &samplers.wrapping,
        );
        let model_target_model = Model::load(
            &ctxt,
            &config.model_target_model,
            &config.asset_dir,
            &layouts.texture,
            &samplers.wrapping,
        );

        Ok(ArRenderer {
            ctxt,
            color_format,
            layouts,
            pipelines,
            samplers,
            background,
            world_origin,
            image_target,
            model_target,
            guide_view_transform,
            colors,
            shapes,
            image_target_model,
            model_target_model,
            guide_view: GuideViewCache::new(),
        })
    }

    /// Draws the camera image.
    ///
    /// `mesh` is copied into the fixed background buffers; a mesh that does
    /// not fit is logged and nothing is drawn. Returns whether a draw was
    /// recorded.
    pub fn render_video_background(
        &self,
        pass: &mut wgpu::RenderPass<'_>,
        projection: &Mat4,
        mesh: &BackgroundMesh<'_>,
        video_texture: &wgpu::TextureView,
    ) -> bool {
        if mesh.indices.is_empty() {
            return false;
        }

        if let Err(e) = self.write_background(projection, mesh) {
            log::error!("Skipping video background: {}", e);
            return false;
        }

        let bind_group = texture::texture_bind_group(
            &self.ctxt,
            "video_background_texture",
            &self.layouts.texture,
            video_texture,
            &self.samplers.clamped,
        );

        pass.set_pipeline(&self.pipelines.video_background);
        pass.set_bind_group(0, self.background.projection.bind_group(), &[]);
        pass.set_bind_group(1, &bind_group, &[]);
        pass.set_vertex_buffer(0, self.background.vertices.buffer().slice(..));
        pass.set_vertex_buffer(1, self.background.texture_coordinates.buffer().slice(..));
        pass.set_index_buffer(
            self.background.indices.buffer().slice(..),
            wgpu::IndexFormat::Uint16,
        );
        pass.draw_indexed(0..mesh.indices.len() as u32, 0, 0..1);

        true
    }

    fn write_background(&self, projection: &Mat4, mesh: &BackgroundMesh<'_>) -> Result<()> {
        let background = &self.background;

        background.vertices.write(&self.ctxt, mesh.vertices)?;
        background
            .texture_coordinates
            .write(&self.ctxt, mesh.texture_coordinates)?;
        background.indices.write(&self.ctxt, mesh.indices)?;
        background.projection.write_matrix(&self.ctxt, projection)
    }

    /// Draws a small grey cube at the world origin.
    pub fn render_world_origin(
        &self,
        pass: &mut wgpu::RenderPass<'_>,
        projection: &Mat4,
        model_view: &Mat4,
    ) {
        let mvp = scaled_model_view_projection(
            projection,
            model_view,
            Vec3::splat(WORLD_ORIGIN_SCALE),
        );

        if let Err(e) = self.world_origin.write_matrix(&self.ctxt, &mvp) {
            log::error!("Skipping world origin: {}", e);
            return;
        }

        pass.set_pipeline(&self.pipelines.uniform_color);
        draw_flat(pass, &self.shapes.cube, &self.world_origin, &self.colors.marker);
    }

    /// Draws the image target model and a translucent box with an outline
    /// covering the target.
    ///
    /// `scaled_model_view` maps the unit square onto the target.
    pub fn render_image_target(
        &self,
        pass: &mut wgpu::RenderPass<'_>,
        projection: &Mat4,
        model_view: &Mat4,
        scaled_model_view: &Mat4,
    ) {
        let transforms = &self.image_target;

        if let Err(e) = transforms.write(&self.ctxt, projection, model_view, scaled_model_view) {
            log::error!("Skipping image target: {}", e);
            return;
        }

        pass.set_pipeline(&self.pipelines.textured);
        let _ = self
            .image_target_model
            .draw(pass, transforms.mvp.bind_group());

        pass.set_pipeline(&self.pipelines.uniform_color);
        draw_flat(
            pass,
            &self.shapes.square,
            &transforms.scaled_mvp,
            &self.colors.translucent,
        );
        draw_flat(
            pass,
            &self.shapes.square_outline,
            &transforms.scaled_mvp,
            &self.colors.solid,
        );
    }

    /// Draws the model target model inside a translucent bounding cube.
    ///
    /// `scaled_model_view` maps the unit cube onto the target bounds.
    pub fn render_model_target(
        &self,
        pass: &mut wgpu::RenderPass<'_>,
        projection: &Mat4,
        model_view: &Mat4,
        scaled_model_view: &Mat4,
    ) {
        let transforms = &self.model_target;

        if let Err(e) = transforms.write(&self.ctxt, projection, model_view, scaled_model_view) {
            log::error!("Skipping model target: {}", e);
            return;
        }

        pass.set_pipeline(&self.pipelines.textured);
        let _ = self
            .model_target_model
            .draw(pass, transforms.mvp.bind_group());

        pass.set_pipeline(&self.pipelines.uniform_color);
        draw_flat(
            pass,
            &self.shapes.cube,
            &transforms.scaled_mvp,
            &self.colors.translucent,
        );
    }

    /// Draws the guide view of a model target on a unit quad.
    ///
    /// The texture is created from `image` on the first call and reused for
    /// every later call, even if `image` changes.
    pub fn render_model_target_guide_view(
        &mut self,
        pass: &mut wgpu::RenderPass<'_>,
        model_view_projection: &Mat4,
        image: &dyn GuideViewImage,
    ) {
        if !self.prepare_guide_view(image) {
            return;
        }

        let Some(guide_view) = self.guide_view.get() else {
            return;
        };

        if let Err(e) = self
            .guide_view_transform
            .write_matrix(&self.ctxt, model_view_projection)
        {
            log::error!("Skipping guide view: {}", e);
            return;
        }

        pass.set_pipeline(&self.pipelines.textured);
        pass.set_bind_group(0, self.guide_view_transform.bind_group(), &[]);
        pass.set_bind_group(1, guide_view.bind_group(), &[]);
        self.shapes.guide_view_quad.draw(pass);
    }

    /// Creates the guide view texture if it does not exist yet.
    ///
    /// Returns whether a guide view texture is available.
    pub fn prepare_guide_view(&mut self, image: &dyn GuideViewImage) -> bool {
        let ctxt = &self.ctxt;
        let layout = &self.layouts.texture;
        let sampler = &self.samplers.clamped;

        self.guide_view
            .get_or_try_init((image.width(), image.height()), || {
                GuideView::create(ctxt, image, layout, sampler)
            })
            .is_some()
    }

    /// The context the renderer was created with.
    #[inline]
    pub fn context(&self) -> &Context {
        &self.ctxt
    }

    /// Color format the pipelines render to.
    #[inline]
    pub fn color_format(&self) -> wgpu::TextureFormat {
        self.color_format
    }

    /// The pipeline of the given kind.
    #[inline]
    pub fn pipeline(&self, kind: PipelineKind) -> &wgpu::RenderPipeline {
        self.pipelines.get(kind)
    }

    /// Model drawn on image targets.
    #[inline]
    pub fn image_target_model(&self) -> &Model {
        &self.image_target_model
    }

    /// Model drawn on model targets.
    #[inline]
    pub fn model_target_model(&self) -> &Model {
        &self.model_target_model
    }

    /// The cached guide view, if one was created.
    #[inline]
    pub fn guide_view(&self) -> Option<&GuideView> {
        self.guide_view.get()
    }

    /// How many times the guide view texture was created.
    #[inline]
    pub fn guide_view_creations(&self) -> usize {
        self.guide_view.creations()
    }

    /// Byte lengths of the background position, texture coordinate and index buffers.
    pub fn video_background_byte_lens(&self) -> [u64; 3] {
        [
            self.background.vertices.byte_len(),
            self.background.texture_coordinates.byte_len(),
            self.background.indices.byte_len(),
        ]
    }

    /// Byte lengths of every transform buffer.
    pub fn transform_byte_lens(&self) -> Vec<u64> {
        [
            &self.background.projection,
            &self.world_origin,
            &self.image_target.mvp,
            &self.image_target.scaled_mvp,
            &self.model_target.mvp,
            &self.model_target.scaled_mvp,
            &self.guide_view_transform,
        ]
        .iter()
        .map(|binding| binding.buffer().byte_len())
        .collect()
    }
}

/// Binds a transform and a color, then draws `mesh` with the flat color pipeline.
fn draw_flat(
    pass: &mut wgpu::RenderPass<'_>,
    mesh: &StaticMesh,
    transform: &UniformBinding,
    color: &UniformBinding,
) {
    pass.set_bind_group(0, transform.bind_group(), &[]);
    pass.set_bind_group(1, color.bind_group(), &[]);
    mesh.draw(pass);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn background_mesh_counts_xyz_triples() {
        let vertices = [0.0f32; 12];
        let mesh = BackgroundMesh {
            vertices: &vertices,
            texture_coordinates: &[0.0; 8],
            indices: &[0, 1, 2, 0, 2, 3],
        };

        assert_eq!(mesh.vertex_count(), 4);
    }
}
