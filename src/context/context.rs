//! wgpu rendering context.
//!
//! The host owns the device and queue (they come from its window setup); the
//! renderer only borrows them through a [`Context`].

use std::sync::Arc;

use crate::error::{Error, Result};

/// The wgpu device and queue plus the format of the surface being drawn to.
///
/// Cloning is cheap: device and queue are shared behind `Arc`.
#[derive(Clone)]
pub struct Context {
    /// The wgpu device used for creating GPU resources.
    pub device: Arc<wgpu::Device>,
    /// The wgpu queue used for buffer and texture uploads.
    pub queue: Arc<wgpu::Queue>,
    /// The color format of the surface the render passes target.
    pub surface_format: wgpu::TextureFormat,
}

impl Context {
    /// Wraps a device and queue created by the host.
    pub fn new(
        device: wgpu::Device,
        queue: wgpu::Queue,
        surface_format: wgpu::TextureFormat,
    ) -> Context {
        Context {
            device: Arc::new(device),
            queue: Arc::new(queue),
            surface_format,
        }
    }

    /// Creates a context on the default adapter, without any surface.
    ///
    /// Blocks until the adapter and device are ready.
    pub fn headless(surface_format: wgpu::TextureFormat) -> Result<Context> {
        let instance = wgpu::Instance::default();

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::default(),
            force_fallback_adapter: false,
            compatible_surface: None,
        }))?;

        let (device, queue) = pollster::block_on(adapter.request_device(&wgpu::DeviceDescriptor {
            label: Some("ar_overlay_device"),
            ..Default::default()
        }))?;

        log::debug!("headless context on {:?}", adapter.get_info().name);

        Ok(Context::new(device, queue, surface_format))
    }

    /// Runs `create` inside a validation error scope.
    ///
    /// wgpu reports invalid descriptors asynchronously; this waits for the
    /// scope to close so a bad pipeline or shader shows up as an [`Error`]
    /// instead of an uncaptured device error.
    pub fn validated<T>(&self, label: &str, create: impl FnOnce(&wgpu::Device) -> T) -> Result<T> {
        self.device.push_error_scope(wgpu::ErrorFilter::Validation);
        let value = create(&self.device);

        match pollster::block_on(self.device.pop_error_scope()) {
            Some(err) => Err(Error::Validation {
                label: label.to_string(),
                message: err.to_string(),
            }),
            None => Ok(value),
        }
    }

    /// Creates a new buffer on the GPU with specified parameters.
    ///
    /// # Arguments
    /// * `label` - Debug label for the buffer
    /// * `size` - Size of the buffer in bytes
    /// * `usage` - Buffer usage flags
    pub fn create_buffer_simple(
        &self,
        label: Option<&str>,
        size: u64,
        usage: wgpu::BufferUsages,
    ) -> wgpu::Buffer {
        self.device.create_buffer(&wgpu::BufferDescriptor {
            label,
            size,
            usage,
            mapped_at_creation: false,
        })
    }

    /// Creates a new buffer initialized with data.
    ///
    /// # Arguments
    /// * `label` - Debug label for the buffer
    /// * `contents` - The data to initialize the buffer with
    /// * `usage` - Buffer usage flags
    pub fn create_buffer_init(
        &self,
        label: Option<&str>,
        contents: &[u8],
        usage: wgpu::BufferUsages,
    ) -> wgpu::Buffer {
        use wgpu::util::DeviceExt;
        self.device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label,
                contents,
                usage,
            })
    }

    /// Writes data to a buffer.
    pub fn write_buffer(&self, buffer: &wgpu::Buffer, offset: u64, data: &[u8]) {
        self.queue.write_buffer(buffer, offset, data);
    }

    /// Creates a new texture on the GPU.
    pub fn create_texture(&self, desc: &wgpu::TextureDescriptor) -> wgpu::Texture {
        self.device.create_texture(desc)
    }

    /// Writes texture data to the GPU.
    ///
    /// # Arguments
    /// * `texture` - The texture to write to
    /// * `data` - The pixel data
    /// * `data_layout` - Layout of the pixel data
    /// * `size` - Size of the region to write
    pub fn write_texture(
        &self,
        texture: wgpu::TexelCopyTextureInfo,
        data: &[u8],
        data_layout: wgpu::TexelCopyBufferLayout,
        size: wgpu::Extent3d,
    ) {
        self.queue.write_texture(texture, data, data_layout, size);
    }

    /// Creates a new sampler.
    pub fn create_sampler(&self, desc: &wgpu::SamplerDescriptor) -> wgpu::Sampler {
        self.device.create_sampler(desc)
    }

    /// Creates a new bind group layout.
    pub fn create_bind_group_layout(
        &self,
        desc: &wgpu::BindGroupLayoutDescriptor,
    ) -> wgpu::BindGroupLayout {
        self.device.create_bind_group_layout(desc)
    }

    /// Creates a new bind group.
    pub fn create_bind_group(&self, desc: &wgpu::BindGroupDescriptor) -> wgpu::BindGroup {
        self.device.create_bind_group(desc)
    }

    /// Creates a new shader module from WGSL source.
    ///
    /// # Arguments
    /// * `label` - Debug label for the shader
    /// * `source` - WGSL shader source code
    pub fn create_shader_module(&self, label: Option<&str>, source: &str) -> wgpu::ShaderModule {
        self.device
            .create_shader_module(wgpu::ShaderModuleDescriptor {
                label,
                source: wgpu::ShaderSource::Wgsl(source.into()),
            })
    }
}
