//! The two sampler configurations used by the textured draws.

use crate::context::Context;

/// Filtering and addressing of a sampler.
#[derive(Copy, Clone, Debug, Hash, PartialEq, Eq)]
pub enum SamplerKind {
    /// Linear filtering, clamped to the edge. Video background and guide view.
    Clamped,
    /// Nearest filtering, repeating. Model textures.
    Wrapping,
}

impl SamplerKind {
    /// Address mode used on all three axes.
    #[inline]
    pub fn address_mode(self) -> wgpu::AddressMode {
        match self {
            SamplerKind::Clamped => wgpu::AddressMode::ClampToEdge,
            SamplerKind::Wrapping => wgpu::AddressMode::Repeat,
        }
    }

    /// Filter used for minification, magnification and mipmaps.
    #[inline]
    pub fn filter(self) -> wgpu::FilterMode {
        match self {
            SamplerKind::Clamped => wgpu::FilterMode::Linear,
            SamplerKind::Wrapping => wgpu::FilterMode::Nearest,
        }
    }

    /// The sampler descriptor for this configuration.
    pub fn descriptor(self) -> wgpu::SamplerDescriptor<'static> {
        let address_mode = self.address_mode();
        let filter = self.filter();

        wgpu::SamplerDescriptor {
            label: Some(match self {
                SamplerKind::Clamped => "clamped_sampler",
                SamplerKind::Wrapping => "wrapping_sampler",
            }),
            address_mode_u: address_mode,
            address_mode_v: address_mode,
            address_mode_w: address_mode,
            mag_filter: filter,
            min_filter: filter,
            mipmap_filter: filter,
            ..Default::default()
        }
    }
}

/// Both samplers, created once.
pub struct Samplers {
    /// Linear, clamp-to-edge.
    pub clamped: wgpu::Sampler,
    /// Nearest, repeat.
    pub wrapping: wgpu::Sampler,
}

impl Samplers {
    /// Creates both samplers.
    pub fn new(ctxt: &Context) -> Samplers {
        Samplers {
            clamped: ctxt.create_sampler(&SamplerKind::Clamped.descriptor()),
            wrapping: ctxt.create_sampler(&SamplerKind::Wrapping.descriptor()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamped_is_linear_and_clamped() {
        let desc = SamplerKind::Clamped.descriptor();
        assert_eq!(desc.address_mode_u, wgpu::AddressMode::ClampToEdge);
        assert_eq!(desc.address_mode_w, wgpu::AddressMode::ClampToEdge);
        assert_eq!(desc.min_filter, wgpu::FilterMode::Linear);
        assert_eq!(desc.mipmap_filter, wgpu::FilterMode::Linear);
        assert_eq!(desc.anisotropy_clamp, 1);
    }

    #[test]
    fn wrapping_is_nearest_and_repeats() {
        let desc = SamplerKind::Wrapping.descriptor();
        assert_eq!(desc.address_mode_v, wgpu::AddressMode::Repeat);
        assert_eq!(desc.mag_filter, wgpu::FilterMode::Nearest);
        assert_eq!(desc.mipmap_filter, wgpu::FilterMode::Nearest);
    }
}
