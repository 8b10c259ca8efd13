//! Textures for the model overlays and the guide view.

use std::path::Path;

use image::{DynamicImage, GenericImageView, RgbaImage};

use crate::context::Context;
use crate::error::{Error, Result};

/// Where texture coordinate (0, 0) is on the image.
#[derive(Copy, Clone, Debug, Hash, PartialEq, Eq)]
pub enum TextureOrigin {
    /// First image row at v = 0 (image and wgpu convention).
    TopLeft,
    /// Last image row at v = 0 (OpenGL convention, used by the OBJ models).
    BottomLeft,
}

/// A 2D GPU texture with its default view.
pub struct Texture {
    /// The underlying wgpu texture.
    pub texture: wgpu::Texture,
    /// The texture view for binding.
    pub view: wgpu::TextureView,
    /// Texture dimensions (width, height).
    pub size: (u32, u32),
}

impl Texture {
    /// Allocates an uninitialized texture that can be written from the queue.
    ///
    /// Sizes past the device limits come back as [`Error::Validation`].
    pub fn new_empty(
        ctxt: &Context,
        label: &str,
        width: u32,
        height: u32,
        format: wgpu::TextureFormat,
    ) -> Result<Texture> {
        let texture = ctxt.validated(label, |device| {
            device.create_texture(&wgpu::TextureDescriptor {
                label: Some(label),
                size: wgpu::Extent3d {
                    width,
                    height,
                    depth_or_array_layers: 1,
                },
                mip_level_count: 1,
                sample_count: 1,
                dimension: wgpu::TextureDimension::D2,
                format,
                usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
                view_formats: &[],
            })
        })?;

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        Ok(Texture {
            texture,
            view,
            size: (width, height),
        })
    }

    /// Replaces the whole texture with `data`, whose rows are `bytes_per_row` apart.
    ///
    /// `bytes_per_row` may exceed the packed row size (padded rows).
    pub fn upload(&self, ctxt: &Context, data: &[u8], bytes_per_row: u32) -> Result<()> {
        let (width, height) = self.size;

        ctxt.validated("texture upload", |_| {
            ctxt.write_texture(
                wgpu::TexelCopyTextureInfo {
                    texture: &self.texture,
                    mip_level: 0,
                    origin: wgpu::Origin3d::ZERO,
                    aspect: wgpu::TextureAspect::All,
                },
                data,
                wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(bytes_per_row),
                    rows_per_image: Some(height),
                },
                wgpu::Extent3d {
                    width,
                    height,
                    depth_or_array_layers: 1,
                },
            )
        })
    }

    /// Creates an sRGB texture from a decoded image.
    pub fn from_image(
        ctxt: &Context,
        label: &str,
        image: &DynamicImage,
        origin: TextureOrigin,
    ) -> Result<Texture> {
        let rgba = oriented_rgba(image, origin);
        let (width, height) = rgba.dimensions();

        let texture = Texture::new_empty(
            ctxt,
            label,
            width,
            height,
            wgpu::TextureFormat::Rgba8UnormSrgb,
        )?;
        texture.upload(ctxt, rgba.as_raw(), width * 4)?;

        Ok(texture)
    }
}

/// Binds a texture view at binding 0 and a sampler at binding 1.
pub fn texture_bind_group(
    ctxt: &Context,
    label: &str,
    layout: &wgpu::BindGroupLayout,
    view: &wgpu::TextureView,
    sampler: &wgpu::Sampler,
) -> wgpu::BindGroup {
    ctxt.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some(label),
        layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::TextureView(view),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::Sampler(sampler),
            },
        ],
    })
}

/// Decodes an image file.
pub fn load_image(path: &Path) -> Result<DynamicImage> {
    image::open(path).map_err(|source| match source {
        image::ImageError::IoError(source) => Error::Io {
            path: path.to_path_buf(),
            source,
        },
        source => Error::Image {
            path: path.to_path_buf(),
            source,
        },
    })
}

/// Converts to RGBA8 with rows ordered so that row 0 sits at v = 0.
pub fn oriented_rgba(image: &DynamicImage, origin: TextureOrigin) -> RgbaImage {
    let rgba = image.to_rgba8();

    match origin {
        TextureOrigin::TopLeft => rgba,
        TextureOrigin::BottomLeft => image::imageops::flip_vertical(&rgba),
    }
}

/// Width and height of an image, for log messages.
pub(crate) fn image_size(image: &DynamicImage) -> (u32, u32) {
    image.dimensions()
}
