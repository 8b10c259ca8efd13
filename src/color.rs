//! Colors used by the flat-color augmentations.
//!
//! RGBA components are in the range [0.0, 1.0].

pub use rgb::Rgba;

/// The color type used throughout the crate. RGBA with f32 components in [0.0, 1.0].
pub type Color = Rgba<f32>;

/// Red (255, 0, 0)
pub const RED: Color = Color::new(1.0, 0.0, 0.0, 1.0);

/// Light grey (204, 204, 204), the world origin marker.
pub const MARKER_GREY: Color = Color::new(0.8, 0.8, 0.8, 1.0);

/// Opacity of the filled target boxes.
pub const TRANSLUCENT_ALPHA: f32 = 0.2;

/// Returns `color` with its alpha replaced.
#[inline]
pub const fn with_alpha(color: Color, alpha: f32) -> Color {
    Color::new(color.r, color.g, color.b, alpha)
}

/// Layout of a color as the shaders read it.
#[inline]
pub fn to_uniform(color: Color) -> [f32; 4] {
    [color.r, color.g, color.b, color.a]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_alpha_keeps_rgb() {
        let c = with_alpha(RED, TRANSLUCENT_ALPHA);
        assert_eq!(to_uniform(c), [1.0, 0.0, 0.0, 0.2]);
        assert_eq!(to_uniform(RED), [1.0, 0.0, 0.0, 1.0]);
    }
}
