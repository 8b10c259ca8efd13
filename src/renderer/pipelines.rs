//! The three render pipelines and their bind group layouts.

use crate::context::Context;
use crate::error::Result;
use crate::renderer::shader_library::{
    ShaderLibrary, TEXTURED_FRAGMENT, TEXTURED_VERTEX, UNIFORM_COLOR_FRAGMENT,
    UNIFORM_COLOR_VERTEX,
};

/// Source-alpha blending on both color and alpha channels.
pub const OVERLAY_BLEND: wgpu::BlendState = wgpu::BlendState {
    color: wgpu::BlendComponent {
        src_factor: wgpu::BlendFactor::SrcAlpha,
        dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
        operation: wgpu::BlendOperation::Add,
    },
    alpha: wgpu::BlendComponent {
        src_factor: wgpu::BlendFactor::SrcAlpha,
        dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
        operation: wgpu::BlendOperation::Add,
    },
};

const POSITION_ATTRIBUTES: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x3];
const TEX_COORD_ATTRIBUTES: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![1 => Float32x2];

/// Positions at slot 0, tightly packed xyz.
const POSITION_LAYOUT: wgpu::VertexBufferLayout<'static> = wgpu::VertexBufferLayout {
    array_stride: (std::mem::size_of::<f32>() * 3) as wgpu::BufferAddress,
    step_mode: wgpu::VertexStepMode::Vertex,
    attributes: &POSITION_ATTRIBUTES,
};

/// Texture coordinates at slot 1, tightly packed uv.
const TEX_COORD_LAYOUT: wgpu::VertexBufferLayout<'static> = wgpu::VertexBufferLayout {
    array_stride: (std::mem::size_of::<f32>() * 2) as wgpu::BufferAddress,
    step_mode: wgpu::VertexStepMode::Vertex,
    attributes: &TEX_COORD_ATTRIBUTES,
};

const TEXTURED_BUFFERS: [wgpu::VertexBufferLayout<'static>; 2] = [POSITION_LAYOUT, TEX_COORD_LAYOUT];
const COLOR_BUFFERS: [wgpu::VertexBufferLayout<'static>; 1] = [POSITION_LAYOUT];

/// The visual styles the renderer draws with.
#[derive(Copy, Clone, Debug, Hash, PartialEq, Eq)]
pub enum PipelineKind {
    /// Camera image behind everything.
    VideoBackground,
    /// Flat, possibly translucent, color.
    UniformColor,
    /// Textured, blended geometry.
    Textured,
}

impl PipelineKind {
    /// All kinds, in creation order.
    pub const ALL: [PipelineKind; 3] = [
        PipelineKind::VideoBackground,
        PipelineKind::UniformColor,
        PipelineKind::Textured,
    ];

    /// Debug label of the pipeline.
    pub fn label(self) -> &'static str {
        match self {
            PipelineKind::VideoBackground => "video_background_pipeline",
            PipelineKind::UniformColor => "uniform_color_pipeline",
            PipelineKind::Textured => "textured_pipeline",
        }
    }

    /// Vertex and fragment function names.
    pub fn shader_functions(self) -> (&'static str, &'static str) {
        match self {
            PipelineKind::VideoBackground | PipelineKind::Textured => {
                (TEXTURED_VERTEX, TEXTURED_FRAGMENT)
            }
            PipelineKind::UniformColor => (UNIFORM_COLOR_VERTEX, UNIFORM_COLOR_FRAGMENT),
        }
    }

    /// Blending of the color attachment.
    pub fn blend(self) -> Option<wgpu::BlendState> {
        match self {
            PipelineKind::VideoBackground => None,
            PipelineKind::UniformColor | PipelineKind::Textured => Some(OVERLAY_BLEND),
        }
    }

    /// Depth test against the scene.
    pub fn depth_compare(self) -> wgpu::CompareFunction {
        match self {
            PipelineKind::VideoBackground => wgpu::CompareFunction::Always,
            PipelineKind::UniformColor => wgpu::CompareFunction::LessEqual,
            PipelineKind::Textured => wgpu::CompareFunction::Less,
        }
    }

    /// Only opaque-ish models write depth.
    pub fn depth_write(self) -> bool {
        self == PipelineKind::Textured
    }

    /// Whether the vertex stage reads texture coordinates at slot 1.
    pub fn is_textured(self) -> bool {
        self != PipelineKind::UniformColor
    }
}

/// Layouts of the bind groups shared by all pipelines.
///
/// Group 0 is always the transform; group 1 is either a color or a
/// texture with its sampler.
pub struct BindGroupLayouts {
    /// A 4x4 matrix read by the vertex stage.
    pub transform: wgpu::BindGroupLayout,
    /// An RGBA color read by the fragment stage.
    pub color: wgpu::BindGroupLayout,
    /// A 2D texture at binding 0 and its sampler at binding 1.
    pub texture: wgpu::BindGroupLayout,
}

impl BindGroupLayouts {
    /// Creates the three layouts.
    pub fn new(ctxt: &Context) -> BindGroupLayouts {
        let uniform_entry = |visibility| wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        };

        let transform = ctxt.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("transform_bind_group_layout"),
            entries: &[uniform_entry(wgpu::ShaderStages::VERTEX)],
        });

        let color = ctxt.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("color_bind_group_layout"),
            entries: &[uniform_entry(wgpu::ShaderStages::FRAGMENT)],
        });

        let texture = ctxt.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("texture_bind_group_layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        multisampled: false,
                        view_dimension: wgpu::TextureViewDimension::D2,
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        BindGroupLayouts {
            transform,
            color,
            texture,
        }
    }
}

/// One pipeline per [`PipelineKind`], created once.
pub struct Pipelines {
    /// Video background.
    pub video_background: wgpu::RenderPipeline,
    /// Flat color augmentations.
    pub uniform_color: wgpu::RenderPipeline,
    /// Textured augmentations.
    pub textured: wgpu::RenderPipeline,
}

impl Pipelines {
    /// Builds all pipelines for the given attachment formats.
    ///
    /// Stops at the first pipeline that cannot be created.
    pub fn new(
        ctxt: &Context,
        library: &ShaderLibrary,
        layouts: &BindGroupLayouts,
        color_format: wgpu::TextureFormat,
        depth_format: wgpu::TextureFormat,
    ) -> Result<Pipelines> {
        let create = |kind| {
            create_pipeline(ctxt, library, layouts, kind, color_format, depth_format)
        };

        Ok(Pipelines {
            video_background: create(PipelineKind::VideoBackground)?,
            uniform_color: create(PipelineKind::UniformColor)?,
            textured: create(PipelineKind::Textured)?,
        })
    }

    /// The pipeline of the given kind.
    #[inline]
    pub fn get(&self, kind: PipelineKind) -> &wgpu::RenderPipeline {
        match kind {
            PipelineKind::VideoBackground => &self.video_background,
            PipelineKind::UniformColor => &self.uniform_color,
            PipelineKind::Textured => &self.textured,
        }
    }
}

fn create_pipeline(
    ctxt: &Context,
    library: &ShaderLibrary,
    layouts: &BindGroupLayouts,
    kind: PipelineKind,
    color_format: wgpu::TextureFormat,
    depth_format: wgpu::TextureFormat,
) -> Result<wgpu::RenderPipeline> {
    let (vertex_name, fragment_name) = kind.shader_functions();
    let vertex = library.function(vertex_name)?;
    let fragment = library.function(fragment_name)?;

    let (group1, buffers): (&wgpu::BindGroupLayout, &[wgpu::VertexBufferLayout]) =
        if kind.is_textured() {
            (&layouts.texture, &TEXTURED_BUFFERS)
        } else {
            (&layouts.color, &COLOR_BUFFERS)
        };

    ctxt.validated(kind.label(), |device| {
        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some(kind.label()),
            bind_group_layouts: &[&layouts.transform, group1],
            push_constant_ranges: &[],
        });

        device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(kind.label()),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &vertex.module,
                entry_point: Some(vertex.entry_point.as_str()),
                buffers,
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &fragment.module,
                entry_point: Some(fragment.entry_point.as_str()),
                targets: &[Some(wgpu::ColorTargetState {
                    format: color_format,
                    blend: kind.blend(),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: depth_format,
                depth_write_enabled: kind.depth_write(),
                depth_compare: kind.depth_compare(),
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState {
                count: 1,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            multiview: None,
            cache: None,
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn background_is_opaque_and_ignores_depth() {
        let kind = PipelineKind::VideoBackground;
        assert_eq!(kind.blend(), None);
        assert_eq!(kind.depth_compare(), wgpu::CompareFunction::Always);
        assert!(!kind.depth_write());
        assert!(kind.is_textured());
    }

    #[test]
    fn augmentations_blend_with_source_alpha() {
        for kind in [PipelineKind::UniformColor, PipelineKind::Textured] {
            let blend = kind.blend().unwrap();
            assert_eq!(blend.color.src_factor, wgpu::BlendFactor::SrcAlpha);
            assert_eq!(blend.alpha.src_factor, wgpu::BlendFactor::SrcAlpha);
            assert_eq!(blend.alpha.dst_factor, wgpu::BlendFactor::OneMinusSrcAlpha);
        }
    }

    #[test]
    fn background_and_models_share_the_textured_shader() {
        assert_eq!(
            PipelineKind::VideoBackground.shader_functions(),
            PipelineKind::Textured.shader_functions()
        );
        assert_eq!(
            PipelineKind::UniformColor.shader_functions(),
            (UNIFORM_COLOR_VERTEX, UNIFORM_COLOR_FRAGMENT)
        );
    }

    #[test]
    fn vertex_layouts_are_tightly_packed() {
        assert_eq!(POSITION_LAYOUT.array_stride, 12);
        assert_eq!(TEX_COORD_LAYOUT.array_stride, 8);
        assert_eq!(TEX_COORD_ATTRIBUTES[0].shader_location, 1);
    }
}
