//! Error types.
//!
//! Loading and GPU setup report failures through [`Error`]. The renderer logs
//! most of them and carries on with the affected resource left empty; see
//! [`ArRenderer`](crate::renderer::ArRenderer) for which ones reach the caller.

use std::path::PathBuf;
use thiserror::Error;

/// Every failure this crate can report.
#[derive(Error, Debug)]
pub enum Error {
    /// No adapter matched the request.
    #[error("no compatible GPU adapter: {0}")]
    AdapterRequest(#[from] wgpu::RequestAdapterError),

    /// The adapter refused to create a device.
    #[error("failed to create GPU device: {0}")]
    DeviceRequest(#[from] wgpu::RequestDeviceError),

    /// The shader library has no function with this name.
    #[error("shader function `{0}` not found in library")]
    MissingShaderFunction(String),

    /// wgpu reported a validation error while creating a GPU object.
    #[error("failed to create {label}: {message}")]
    Validation {
        /// Debug label of the object being created.
        label: String,
        /// The message wgpu reported.
        message: String,
    },

    /// A file could not be read.
    #[error("failed to read {path:?}: {source}")]
    Io {
        /// The file being read.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// An image file could not be decoded.
    #[error("failed to decode image {path:?}: {source}")]
    Image {
        /// The image file.
        path: PathBuf,
        /// Underlying decoder error.
        source: image::ImageError,
    },

    /// Malformed OBJ content.
    #[error("OBJ parse error at line {line}: {message}")]
    ObjParse {
        /// 1-based line number.
        line: usize,
        /// What was wrong with the line.
        message: String,
    },

    /// The mesh parsed fine but has nothing to draw.
    #[error("mesh `{0}` has no triangles")]
    EmptyMesh(String),

    /// A write would run past the end of a fixed-size buffer.
    #[error("writing {len} bytes into `{label}` exceeds its capacity of {capacity} bytes")]
    BufferOverflow {
        /// Debug label of the buffer.
        label: String,
        /// Bytes that were to be written.
        len: u64,
        /// Allocated size of the buffer.
        capacity: u64,
    },

    /// The AR engine could not provide guide-view pixels.
    #[error("failed to read guide view pixels: {0}")]
    PixelRead(String),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
