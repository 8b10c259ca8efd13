//! Guide view texture, created on first use and kept for good.

use crate::context::Context;
use crate::error::{Error, Result};
use crate::resource::texture::{self, Texture};

/// Pixel format of guide view images.
pub const GUIDE_VIEW_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Bgra8Unorm;

/// Bytes per guide view pixel.
const GUIDE_VIEW_BYTES_PER_PIXEL: u32 = 4;

/// Access to a guide view image owned by the AR engine.
pub trait GuideViewImage {
    /// Width in pixels.
    fn width(&self) -> u32;
    /// Height in pixels.
    fn height(&self) -> u32;
    /// Bytes between the starts of two rows.
    fn stride(&self) -> u32;
    /// Copies `height * stride` bytes of BGRA pixels into `dst`.
    fn read_pixels(&self, dst: &mut [u8]) -> Result<()>;

    /// Size of the pixel data in bytes, `None` if it does not fit in memory.
    fn byte_len(&self) -> Option<usize> {
        (self.height() as usize).checked_mul(self.stride() as usize)
    }
}

/// An owned BGRA image.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Bytes between the starts of two rows.
    pub stride: u32,
    /// Row-major pixel data.
    pub pixels: Vec<u8>,
}

impl PixelImage {
    /// Creates a tightly packed image filled with one BGRA color.
    ///
    /// # Panics
    /// Panics if a row is longer than `u32::MAX` bytes.
    pub fn filled(width: u32, height: u32, bgra: [u8; 4]) -> PixelImage {
        let stride = width
            .checked_mul(GUIDE_VIEW_BYTES_PER_PIXEL)
            .unwrap_or_else(|| panic!("guide view row of {} pixels is too long", width));
        let pixels = bgra
            .iter()
            .copied()
            .cycle()
            .take(height as usize * stride as usize)
            .collect();

        PixelImage {
            width,
            height,
            stride,
            pixels,
        }
    }
}

impl GuideViewImage for PixelImage {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn stride(&self) -> u32 {
        self.stride
    }

    fn read_pixels(&self, dst: &mut [u8]) -> Result<()> {
        let src = self.pixels.get(..dst.len()).ok_or_else(|| {
            Error::PixelRead(format!(
                "image holds {} bytes, {} requested",
                self.pixels.len(),
                dst.len()
            ))
        })?;

        dst.copy_from_slice(src);
        Ok(())
    }
}

/// Memoizes one value created on first request.
///
/// There is a single guide view per application, so the cached value is
/// returned for every later request, whatever size it asks for. A failed
/// creation caches nothing and the next request tries again.
pub struct GuideViewCache<T> {
    entry: Option<(T, (u32, u32))>,
    creations: usize,
    mismatch_reported: bool,
}

impl<T> Default for GuideViewCache<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> GuideViewCache<T> {
    /// An empty cache.
    pub fn new() -> GuideViewCache<T> {
        GuideViewCache {
            entry: None,
            creations: 0,
            mismatch_reported: false,
        }
    }

    /// The cached value, if any.
    #[inline]
    pub fn get(&self) -> Option<&T> {
        self.entry.as_ref().map(|(value, _)| value)
    }

    /// How many times a value was successfully created.
    #[inline]
    pub fn creations(&self) -> usize {
        self.creations
    }

    /// Returns the cached value, creating it with `create` if the cache is empty.
    ///
    /// `size` is only used to warn, once, that a later request differs from
    /// the cached one.
    pub fn get_or_try_init(
        &mut self,
        size: (u32, u32),
        create: impl FnOnce() -> Result<T>,
    ) -> Option<&T> {
        if self.entry.is_none() {
            match create() {
                Ok(value) => {
                    self.entry = Some((value, size));
                    self.creations += 1;
                }
                Err(e) => {
                    log::error!("Failed to create guide view: {}", e);
                    return None;
                }
            }
        }

        let (value, cached_size) = self.entry.as_ref()?;

        if *cached_size != size && !self.mismatch_reported {
            log::warn!(
                "guide view of size {:?} requested, keeping the cached {:?} one",
                size,
                cached_size
            );
            self.mismatch_reported = true;
        }

        Some(value)
    }
}

/// The uploaded guide view.
pub struct GuideView {
    texture: Texture,
    staging_len: usize,
    bind_group: wgpu::BindGroup,
}

impl GuideView {
    /// Reads the pixels of `image` and uploads them to a new texture.
    pub fn create(
        ctxt: &Context,
        image: &dyn GuideViewImage,
        texture_layout: &wgpu::BindGroupLayout,
        sampler: &wgpu::Sampler,
    ) -> Result<GuideView> {
        let mut staging = vec![0u8; staging_len(image)?];
        image.read_pixels(&mut staging)?;

        let texture = Texture::new_empty(
            ctxt,
            "guide_view_texture",
            image.width(),
            image.height(),
            GUIDE_VIEW_FORMAT,
        )?;
        texture.upload(ctxt, &staging, image.stride())?;

        let bind_group = texture::texture_bind_group(
            ctxt,
            "guide_view_bind_group",
            texture_layout,
            &texture.view,
            sampler,
        );

        Ok(GuideView {
            texture,
            staging_len: staging.len(),
            bind_group,
        })
    }

    /// The guide view texture.
    #[inline]
    pub fn texture(&self) -> &Texture {
        &self.texture
    }

    /// Size of the pixel buffer read from the AR engine.
    #[inline]
    pub fn staging_len(&self) -> usize {
        self.staging_len
    }

    /// Texture and sampler bind group.
    #[inline]
    pub fn bind_group(&self) -> &wgpu::BindGroup {
        &self.bind_group
    }
}

/// Checks the image layout and returns the number of bytes to read.
fn staging_len(image: &dyn GuideViewImage) -> Result<usize> {
    let (width, height, stride) = (image.width(), image.height(), image.stride());
    let invalid = || {
        Error::PixelRead(format!(
            "invalid guide view layout {}x{} with stride {}",
            width, height, stride
        ))
    };

    let row_len = width
        .checked_mul(GUIDE_VIEW_BYTES_PER_PIXEL)
        .ok_or_else(invalid)?;

    if width == 0 || height == 0 || stride < row_len {
        return Err(invalid());
    }

    image.byte_len().ok_or_else(invalid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    struct Unreadable;

    impl GuideViewImage for Unreadable {
        fn width(&self) -> u32 {
            4
        }
        fn height(&self) -> u32 {
            4
        }
        fn stride(&self) -> u32 {
            16
        }
        fn read_pixels(&self, _dst: &mut [u8]) -> Result<()> {
            Err(Error::PixelRead("target database closed".to_string()))
        }
    }

    #[test]
    fn created_once_for_repeated_requests() {
        let mut cache = GuideViewCache::new();
        let calls = Cell::new(0);

        for _ in 0..5 {
            let value = cache.get_or_try_init((64, 48), || {
                calls.set(calls.get() + 1);
                Ok(7)
            });
            assert_eq!(value, Some(&7));
        }

        assert_eq!(calls.get(), 1);
        assert_eq!(cache.creations(), 1);
    }

    #[test]
    fn different_size_keeps_first_value() {
        let mut cache = GuideViewCache::new();
        let _ = cache.get_or_try_init((64, 48), || Ok("first"));

        let value = cache.get_or_try_init((128, 96), || Ok("second"));

        assert_eq!(value, Some(&"first"));
        assert_eq!(cache.creations(), 1);
        assert!(cache.mismatch_reported);
    }

    #[test]
    fn failed_creation_is_retried() {
        let mut cache: GuideViewCache<u32> = GuideViewCache::new();

        let first = cache.get_or_try_init((8, 8), || Err(Error::PixelRead("busy".to_string())));
        assert!(first.is_none());
        assert!(cache.get().is_none());

        let second = cache.get_or_try_init((8, 8), || Ok(3));
        assert_eq!(second, Some(&3));
        assert_eq!(cache.creations(), 1);
    }

    #[test]
    fn pixel_image_reads_height_times_stride() {
        let image = PixelImage::filled(3, 2, [1, 2, 3, 4]);
        assert_eq!(image.byte_len(), Some(2 * 12));
        assert_eq!(staging_len(&image).unwrap(), 24);

        let mut dst = vec![0u8; 24];
        image.read_pixels(&mut dst).unwrap();
        assert_eq!(&dst[..8], &[1, 2, 3, 4, 1, 2, 3, 4]);
    }

    #[test]
    fn short_pixel_image_fails_to_read() {
        let mut image = PixelImage::filled(2, 2, [0; 4]);
        image.pixels.truncate(10);

        let mut dst = vec![0u8; 16];
        assert!(matches!(image.read_pixels(&mut dst), Err(Error::PixelRead(_))));
    }

    #[test]
    fn unreadable_image_reports_pixel_error() {
        let mut dst = vec![0u8; staging_len(&Unreadable).unwrap()];
        assert_eq!(dst.len(), 64);
        assert!(Unreadable.read_pixels(&mut dst).is_err());
    }

    struct Layout(u32, u32, u32);

    impl GuideViewImage for Layout {
        fn width(&self) -> u32 {
            self.0
        }
        fn height(&self) -> u32 {
            self.1
        }
        fn stride(&self) -> u32 {
            self.2
        }
        fn read_pixels(&self, _dst: &mut [u8]) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn overflowing_row_length_is_rejected() {
        let image = Layout(1 << 30, 2, u32::MAX);
        assert!(matches!(staging_len(&image), Err(Error::PixelRead(_))));
    }

    #[test]
    fn degenerate_layouts_are_rejected() {
        assert!(staging_len(&Layout(0, 4, 16)).is_err());
        assert!(staging_len(&Layout(4, 0, 16)).is_err());
        assert!(staging_len(&Layout(4, 4, 15)).is_err());
        assert_eq!(staging_len(&Layout(4, 4, 20)).unwrap(), 80);
    }
}
