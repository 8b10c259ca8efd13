//! Uniform buffers paired with their bind group.

use bytemuck::Pod;
use glamx::Mat4;

use crate::context::Context;
use crate::error::Result;
use crate::resource::gpu_buffer::{FixedBuffer, MATRIX_BYTES};

/// A fixed-size uniform buffer bound at binding 0 of its own bind group.
pub struct UniformBinding {
    buffer: FixedBuffer,
    bind_group: wgpu::BindGroup,
}

impl UniformBinding {
    /// Allocates a zeroed uniform of `byte_len` bytes.
    pub fn new(
        ctxt: &Context,
        label: &str,
        layout: &wgpu::BindGroupLayout,
        byte_len: u64,
    ) -> UniformBinding {
        let buffer = FixedBuffer::new(ctxt, label, byte_len, wgpu::BufferUsages::UNIFORM);
        UniformBinding::from_buffer(ctxt, label, layout, buffer)
    }

    /// Allocates a uniform holding `data`.
    pub fn with_contents<T: Pod>(
        ctxt: &Context,
        label: &str,
        layout: &wgpu::BindGroupLayout,
        data: &[T],
    ) -> UniformBinding {
        let buffer = FixedBuffer::with_contents(ctxt, label, data, wgpu::BufferUsages::UNIFORM);
        UniformBinding::from_buffer(ctxt, label, layout, buffer)
    }

    /// Allocates a zeroed 4x4 matrix uniform.
    pub fn matrix(ctxt: &Context, label: &str, layout: &wgpu::BindGroupLayout) -> UniformBinding {
        UniformBinding::new(ctxt, label, layout, MATRIX_BYTES)
    }

    fn from_buffer(
        ctxt: &Context,
        label: &str,
        layout: &wgpu::BindGroupLayout,
        buffer: FixedBuffer,
    ) -> UniformBinding {
        let bind_group = ctxt.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(label),
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.buffer().as_entire_binding(),
            }],
        });

        UniformBinding { buffer, bind_group }
    }

    /// The backing buffer.
    #[inline]
    pub fn buffer(&self) -> &FixedBuffer {
        &self.buffer
    }

    /// The bind group exposing the buffer.
    #[inline]
    pub fn bind_group(&self) -> &wgpu::BindGroup {
        &self.bind_group
    }

    /// Overwrites the uniform with a column-major matrix.
    pub fn write_matrix(&self, ctxt: &Context, matrix: &Mat4) -> Result<()> {
        self.buffer.write(ctxt, &matrix.to_cols_array())
    }
}
