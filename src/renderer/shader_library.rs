//! Named shader entry points.

use std::collections::HashMap;
use std::sync::Arc;

use crate::context::Context;
use crate::error::{Error, Result};

/// Vertex stage shared by the background, model and guide view pipelines.
pub const TEXTURED_VERTEX: &str = "textured_vertex";
/// Fragment stage sampling a texture.
pub const TEXTURED_FRAGMENT: &str = "textured_fragment";
/// Vertex stage of the flat color pipeline.
pub const UNIFORM_COLOR_VERTEX: &str = "uniform_color_vertex";
/// Fragment stage writing a uniform color.
pub const UNIFORM_COLOR_FRAGMENT: &str = "uniform_color_fragment";

/// Bundled WGSL for the textured pipelines.
pub static TEXTURED_SRC: &str = include_str!("../builtin/textured.wgsl");
/// Bundled WGSL for the flat color pipeline.
pub static UNIFORM_COLOR_SRC: &str = include_str!("../builtin/uniform_color.wgsl");

/// A shader module and one of its entry points.
#[derive(Clone)]
pub struct ShaderFunction {
    /// The compiled module.
    pub module: Arc<wgpu::ShaderModule>,
    /// Entry point name inside the module.
    pub entry_point: String,
}

/// Shader functions looked up by name when pipelines are built.
#[derive(Clone, Default)]
pub struct ShaderLibrary {
    functions: HashMap<String, ShaderFunction>,
}

impl ShaderLibrary {
    /// An empty library.
    pub fn new() -> ShaderLibrary {
        ShaderLibrary::default()
    }

    /// Compiles the bundled shaders.
    pub fn builtin(ctxt: &Context) -> Result<ShaderLibrary> {
        let mut library = ShaderLibrary::new();

        library.add_wgsl(
            ctxt,
            "textured_shader",
            TEXTURED_SRC,
            &[TEXTURED_VERTEX, TEXTURED_FRAGMENT],
        )?;
        library.add_wgsl(
            ctxt,
            "uniform_color_shader",
            UNIFORM_COLOR_SRC,
            &[UNIFORM_COLOR_VERTEX, UNIFORM_COLOR_FRAGMENT],
        )?;

        Ok(library)
    }

    /// Compiles `source` and registers `entry_points` under their own names.
    pub fn add_wgsl(
        &mut self,
        ctxt: &Context,
        label: &str,
        source: &str,
        entry_points: &[&str],
    ) -> Result<()> {
        let module = ctxt.validated(label, |_| ctxt.create_shader_module(Some(label), source))?;
        self.add_module(module, entry_points);
        Ok(())
    }

    /// Registers entry points of an already compiled module.
    ///
    /// A name registered twice refers to the latest module.
    pub fn add_module(&mut self, module: wgpu::ShaderModule, entry_points: &[&str]) {
        let module = Arc::new(module);

        for entry_point in entry_points {
            let _ = self.functions.insert(
                entry_point.to_string(),
                ShaderFunction {
                    module: module.clone(),
                    entry_point: entry_point.to_string(),
                },
            );
        }
    }

    /// Looks up a function by name.
    pub fn function(&self, name: &str) -> Result<&ShaderFunction> {
        self.functions
            .get(name)
            .ok_or_else(|| Error::MissingShaderFunction(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_function_is_an_error() {
        let library = ShaderLibrary::new();

        assert!(matches!(
            library.function(TEXTURED_VERTEX),
            Err(Error::MissingShaderFunction(name)) if name == TEXTURED_VERTEX
        ));
    }

    #[test]
    fn bundled_sources_define_their_entry_points() {
        for name in [TEXTURED_VERTEX, TEXTURED_FRAGMENT] {
            assert!(TEXTURED_SRC.contains(&format!("fn {}(", name)));
        }
        for name in [UNIFORM_COLOR_VERTEX, UNIFORM_COLOR_FRAGMENT] {
            assert!(UNIFORM_COLOR_SRC.contains(&format!("fn {}(", name)));
        }
    }
}
