//! Indexed meshes uploaded once and never rewritten.

use crate::context::Context;
use crate::procedural::RenderMesh;
use crate::resource::gpu_buffer::FixedBuffer;

/// GPU copy of a [`RenderMesh`].
pub struct StaticMesh {
    coords: FixedBuffer,
    uvs: Option<FixedBuffer>,
    indices: FixedBuffer,
    index_count: u32,
}

impl StaticMesh {
    /// Uploads `mesh`.
    pub fn new(ctxt: &Context, label: &str, mesh: &RenderMesh) -> StaticMesh {
        let coords = FixedBuffer::with_contents(
            ctxt,
            &format!("{}_coords", label),
            &mesh.coords,
            wgpu::BufferUsages::VERTEX,
        );
        let uvs = mesh.uvs.as_ref().map(|uvs| {
            FixedBuffer::with_contents(
                ctxt,
                &format!("{}_uvs", label),
                uvs,
                wgpu::BufferUsages::VERTEX,
            )
        });
        let indices = FixedBuffer::with_contents(
            ctxt,
            &format!("{}_indices", label),
            &mesh.indices,
            wgpu::BufferUsages::INDEX,
        );

        StaticMesh {
            coords,
            uvs,
            indices,
            index_count: mesh.indices.len() as u32,
        }
    }

    /// Number of indices drawn.
    #[inline]
    pub fn index_count(&self) -> u32 {
        self.index_count
    }

    /// Binds positions (slot 0), texture coordinates if any (slot 1) and
    /// indices, then draws.
    pub fn draw(&self, pass: &mut wgpu::RenderPass<'_>) {
        if self.index_count == 0 {
            return;
        }

        pass.set_vertex_buffer(0, self.coords.buffer().slice(..));
        if let Some(ref uvs) = self.uvs {
            pass.set_vertex_buffer(1, uvs.buffer().slice(..));
        }
        pass.set_index_buffer(self.indices.buffer().slice(..), wgpu::IndexFormat::Uint16);
        pass.draw_indexed(0..self.index_count, 0, 0..1);
    }
}
