//! Matrix composition for the augmentations.

use glamx::{Mat4, Vec3};

/// Edge length of the world origin marker cube, in scene units.
pub const WORLD_ORIGIN_SCALE: f32 = 0.1;

/// `projection * model_view`.
#[inline]
pub fn model_view_projection(projection: &Mat4, model_view: &Mat4) -> Mat4 {
    *projection * *model_view
}

/// `projection * model_view * scale`, scaling the model before the view.
#[inline]
pub fn scaled_model_view_projection(projection: &Mat4, model_view: &Mat4, scale: Vec3) -> Mat4 {
    *projection * (*model_view * Mat4::from_scale(scale))
}
