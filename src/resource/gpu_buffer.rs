//! Fixed-size GPU buffers overwritten in place.

use std::borrow::Cow;
use std::mem;

use bytemuck::Pod;

use crate::context::Context;
use crate::error::{Error, Result};

/// Vertices of the video background mesh.
pub const BACKGROUND_VERTEX_COUNT: usize = 4;
/// Indices of the video background mesh.
pub const BACKGROUND_INDEX_COUNT: usize = 6;

/// Byte length of the background position buffer (xyz per vertex).
pub const BACKGROUND_VERTICES_BYTES: u64 = (mem::size_of::<f32>() * 3 * BACKGROUND_VERTEX_COUNT) as u64;
/// Byte length of the background texture coordinate buffer (uv per vertex).
pub const BACKGROUND_TEXTURE_COORDINATES_BYTES: u64 =
    (mem::size_of::<f32>() * 2 * BACKGROUND_VERTEX_COUNT) as u64;
/// Byte length of the background index buffer.
pub const BACKGROUND_INDICES_BYTES: u64 = (mem::size_of::<u16>() * BACKGROUND_INDEX_COUNT) as u64;
/// Byte length of a 4x4 float matrix.
pub const MATRIX_BYTES: u64 = (mem::size_of::<f32>() * 16) as u64;
/// Byte length of an RGBA float color.
pub const COLOR_BYTES: u64 = (mem::size_of::<f32>() * 4) as u64;

/// A GPU buffer with a byte length fixed at allocation.
///
/// Every write starts at offset zero and replaces the previous content; the
/// buffer never grows. Writes that do not fit are refused.
pub struct FixedBuffer {
    buffer: wgpu::Buffer,
    byte_len: u64,
    label: String,
}

impl FixedBuffer {
    /// Allocates a zeroed buffer of `byte_len` bytes.
    ///
    /// `COPY_DST` is added to `usage` so the buffer can be written from the queue.
    pub fn new(ctxt: &Context, label: &str, byte_len: u64, usage: wgpu::BufferUsages) -> FixedBuffer {
        let buffer = ctxt.create_buffer_simple(
            Some(label),
            aligned_len(byte_len),
            usage | wgpu::BufferUsages::COPY_DST,
        );

        FixedBuffer {
            buffer,
            byte_len,
            label: label.to_string(),
        }
    }

    /// Allocates a buffer sized to, and filled with, `data`.
    pub fn with_contents<T: Pod>(
        ctxt: &Context,
        label: &str,
        data: &[T],
        usage: wgpu::BufferUsages,
    ) -> FixedBuffer {
        let bytes: &[u8] = bytemuck::cast_slice(data);
        let buffer = ctxt.create_buffer_init(
            Some(label),
            bytes,
            usage | wgpu::BufferUsages::COPY_DST,
        );

        FixedBuffer {
            buffer,
            byte_len: bytes.len() as u64,
            label: label.to_string(),
        }
    }

    /// The byte length requested at allocation.
    #[inline]
    pub fn byte_len(&self) -> u64 {
        self.byte_len
    }

    /// The debug label of this buffer.
    #[inline]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The underlying wgpu buffer.
    #[inline]
    pub fn buffer(&self) -> &wgpu::Buffer {
        &self.buffer
    }

    /// Overwrites the start of the buffer with `data`.
    pub fn write<T: Pod>(&self, ctxt: &Context, data: &[T]) -> Result<()> {
        let bytes: &[u8] = bytemuck::cast_slice(data);
        let staged = staged_bytes(&self.label, self.byte_len, bytes)?;

        if !staged.is_empty() {
            ctxt.write_buffer(&self.buffer, 0, &staged);
        }

        Ok(())
    }
}

/// Buffer sizes and queue writes must be multiples of `COPY_BUFFER_ALIGNMENT`.
#[inline]
fn aligned_len(len: u64) -> u64 {
    len.div_ceil(wgpu::COPY_BUFFER_ALIGNMENT) * wgpu::COPY_BUFFER_ALIGNMENT
}

/// Checks `bytes` against the buffer capacity and pads it to the copy alignment.
pub(crate) fn staged_bytes<'a>(label: &str, capacity: u64, bytes: &'a [u8]) -> Result<Cow<'a, [u8]>> {
    let len = bytes.len() as u64;

    if len > capacity {
        return Err(Error::BufferOverflow {
            label: label.to_string(),
            len,
            capacity,
        });
    }

    let padded = aligned_len(len);
    if padded == len {
        Ok(Cow::Borrowed(bytes))
    } else {
        let mut owned = bytes.to_vec();
        owned.resize(padded as usize, 0);
        Ok(Cow::Owned(owned))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn background_sizes_match_the_quad() {
        assert_eq!(BACKGROUND_VERTICES_BYTES, 48);
        assert_eq!(BACKGROUND_TEXTURE_COORDINATES_BYTES, 32);
        assert_eq!(BACKGROUND_INDICES_BYTES, 12);
        assert_eq!(MATRIX_BYTES, 64);
        assert_eq!(COLOR_BYTES, 16);
    }

    #[test]
    fn aligned_writes_are_borrowed() {
        let data = [1u8, 2, 3, 4, 5, 6, 7, 8];
        let staged = staged_bytes("b", 8, &data).unwrap();
        assert!(matches!(staged, Cow::Borrowed(_)));
        assert_eq!(&*staged, &data);
    }

    #[test]
    fn odd_index_counts_are_padded() {
        let indices: [u16; 3] = [0, 1, 2];
        let bytes: &[u8] = bytemuck::cast_slice(&indices);
        let staged = staged_bytes("indices", BACKGROUND_INDICES_BYTES, bytes).unwrap();

        assert_eq!(staged.len(), 8);
        assert_eq!(&staged[..6], bytes);
        assert_eq!(&staged[6..], &[0, 0]);
    }

    #[test]
    fn oversized_writes_are_refused() {
        let vertices = [0.0f32; 3 * 5];
        let bytes: &[u8] = bytemuck::cast_slice(&vertices);

        match staged_bytes("vertices", BACKGROUND_VERTICES_BYTES, bytes) {
            Err(Error::BufferOverflow { len, capacity, .. }) => {
                assert_eq!(len, 60);
                assert_eq!(capacity, 48);
            }
            other => panic!("unexpected result: {:?}", other.map(|b| b.len())),
        }
    }

    #[test]
    fn empty_writes_are_fine() {
        assert!(staged_bytes("b", 4, &[]).unwrap().is_empty());
    }
}
