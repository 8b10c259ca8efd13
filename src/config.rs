//! Renderer configuration.

use std::path::{Path, PathBuf};

/// File names of a model's mesh and texture inside the asset directory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModelAsset {
    /// Name used in log messages.
    pub name: String,
    /// Wavefront OBJ file.
    pub mesh: String,
    /// PNG or JPEG texture, with OpenGL texture coordinate convention.
    pub texture: String,
}

impl ModelAsset {
    /// Creates a model asset description.
    pub fn new(name: &str, mesh: &str, texture: &str) -> ModelAsset {
        ModelAsset {
            name: name.to_string(),
            mesh: mesh.to_string(),
            texture: texture.to_string(),
        }
    }

    /// The astronaut drawn on image targets.
    pub fn astronaut() -> ModelAsset {
        ModelAsset::new("astronaut", "PUSHILIN_star.obj", "PUSHILIN_star.png")
    }

    /// The lander drawn on model targets.
    pub fn lander() -> ModelAsset {
        ModelAsset::new("lander", "VikingLander.obj", "VikingLander.jpg")
    }

    /// Full path of the mesh file.
    pub fn mesh_path(&self, asset_dir: &Path) -> PathBuf {
        asset_dir.join(&self.mesh)
    }

    /// Full path of the texture file.
    pub fn texture_path(&self, asset_dir: &Path) -> PathBuf {
        asset_dir.join(&self.texture)
    }
}

/// Settings read once by [`ArRenderer::new`](crate::renderer::ArRenderer::new).
///
/// ```
/// use ar_overlay::config::RendererConfig;
///
/// let config = RendererConfig::default()
///     .with_asset_dir("/opt/ar/assets")
///     .with_depth_format(wgpu::TextureFormat::Depth24Plus);
/// assert_eq!(config.depth_format, wgpu::TextureFormat::Depth24Plus);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct RendererConfig {
    /// Directory holding the bundled model files.
    pub asset_dir: PathBuf,
    /// Color attachment format of the render pass the draws go into.
    /// `None` uses the context's surface format.
    pub color_format: Option<wgpu::TextureFormat>,
    /// Depth attachment format of the render pass the draws go into.
    pub depth_format: wgpu::TextureFormat,
    /// Model drawn on image targets.
    pub image_target_model: ModelAsset,
    /// Model drawn on model targets.
    pub model_target_model: ModelAsset,
}

impl Default for RendererConfig {
    fn default() -> Self {
        RendererConfig {
            asset_dir: PathBuf::from("assets"),
            color_format: None,
            depth_format: wgpu::TextureFormat::Depth32Float,
            image_target_model: ModelAsset::astronaut(),
            model_target_model: ModelAsset::lander(),
        }
    }
}

impl RendererConfig {
    /// Sets the directory the model files are read from.
    pub fn with_asset_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.asset_dir = dir.into();
        self
    }

    /// Overrides the color attachment format.
    pub fn with_color_format(mut self, format: wgpu::TextureFormat) -> Self {
        self.color_format = Some(format);
        self
    }

    /// Sets the depth attachment format.
    pub fn with_depth_format(mut self, format: wgpu::TextureFormat) -> Self {
        self.depth_format = format;
        self
    }

    /// Replaces the model drawn on image targets.
    pub fn with_image_target_model(mut self, model: ModelAsset) -> Self {
        self.image_target_model = model;
        self
    }

    /// Replaces the model drawn on model targets.
    pub fn with_model_target_model(mut self, model: ModelAsset) -> Self {
        self.model_target_model = model;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_models_use_bundled_file_names() {
        let config = RendererConfig::default();
        let dir = Path::new("bundle");

        assert_eq!(
            config.image_target_model.mesh_path(dir),
            dir.join("PUSHILIN_star.obj")
        );
        assert_eq!(
            config.image_target_model.texture_path(dir),
            dir.join("PUSHILIN_star.png")
        );
        assert_eq!(
            config.model_target_model.mesh_path(dir),
            dir.join("VikingLander.obj")
        );
        assert_eq!(
            config.model_target_model.texture_path(dir),
            dir.join("VikingLander.jpg")
        );
    }

    #[test]
    fn builders_override_fields() {
        let config = RendererConfig::default()
            .with_asset_dir("elsewhere")
            .with_color_format(wgpu::TextureFormat::Rgba8Unorm)
            .with_model_target_model(ModelAsset::new("rover", "rover.obj", "rover.png"));

        assert_eq!(config.asset_dir, PathBuf::from("elsewhere"));
        assert_eq!(config.color_format, Some(wgpu::TextureFormat::Rgba8Unorm));
        assert_eq!(config.model_target_model.name, "rover");
        assert_eq!(config.image_target_model, ModelAsset::astronaut());
    }
}
