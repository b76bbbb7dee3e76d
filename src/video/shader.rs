//! GLSL programs assembled from vertex and fragment stages.
//!
//! ```rust,ignore
//! let mut shader = Shader::new(&video)
//!     .vertex_shader_file("assets/shaders/cube.vs")
//!     .fragment_shader_file("assets/shaders/cube.fs");
//! shader.link()?;
//!
//! shader.set_uniform_floats("time", &[window.time() as f32])?;
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use smallvec::SmallVec;

use crate::errors::*;
use crate::math::Matrix4;

use super::{ShaderHandle, ShaderSource, ShaderStage, UniformVariable, VideoContext};

/// Where the text of a stage comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum StageSource {
    Inline(String),
    File(PathBuf),
}

impl StageSource {
    fn load(&self) -> Result<String> {
        match *self {
            StageSource::Inline(ref src) => Ok(src.clone()),
            StageSource::File(ref path) => {
                fs::read_to_string(path).map_err(|cause| Error::ShaderSource {
                    path: path.clone(),
                    cause,
                })
            }
        }
    }
}

pub struct Shader {
    video: VideoContext,
    stages: SmallVec<[(ShaderStage, StageSource); 2]>,
    program: Option<ShaderHandle>,
}

impl Shader {
    /// Creates an empty shader, nothing is validated until `link`.
    pub fn new(video: &VideoContext) -> Self {
        Shader {
            video: video.clone(),
            stages: SmallVec::new(),
            program: None,
        }
    }

    /// Appends a stage.
    pub fn stage(mut self, stage: ShaderStage, source: StageSource) -> Self {
        self.stages.push((stage, source));
        self
    }

    pub fn vertex_shader<T: Into<String>>(self, src: T) -> Self {
        self.stage(ShaderStage::Vertex, StageSource::Inline(src.into()))
    }

    pub fn fragment_shader<T: Into<String>>(self, src: T) -> Self {
        self.stage(ShaderStage::Fragment, StageSource::Inline(src.into()))
    }

    pub fn vertex_shader_file<T: AsRef<Path>>(self, path: T) -> Self {
        self.stage(
            ShaderStage::Vertex,
            StageSource::File(path.as_ref().to_owned()),
        )
    }

    pub fn fragment_shader_file<T: AsRef<Path>>(self, path: T) -> Self {
        self.stage(
            ShaderStage::Fragment,
            StageSource::File(path.as_ref().to_owned()),
        )
    }

    /// Compiles every stage and links them into a program.
    ///
    /// At least one vertex and one fragment stage are required. On failure no
    /// program is retained and the error carries the driver diagnostics.
    /// Linking again replaces the previous program.
    pub fn link(&mut self) -> Result<()> {
        if self.stages.is_empty() {
            return Err(Error::ShaderInvalid("no stages to link.".to_owned()));
        }

        for &required in &[ShaderStage::Vertex, ShaderStage::Fragment] {
            if !self.stages.iter().any(|&(stage, _)| stage == required) {
                return Err(Error::ShaderInvalid(format!(
                    "a {:?} stage is required.",
                    required
                )));
            }
        }

        let mut sources = Vec::with_capacity(self.stages.len());
        for &(stage, ref src) in &self.stages {
            sources.push(ShaderSource {
                stage,
                source: src.load()?,
            });
        }

        self.release();

        let program = self.video.create_shader(&sources)?;
        info!("Shader linked as {}.", program);
        self.program = Some(program);
        Ok(())
    }

    #[inline]
    pub fn is_linked(&self) -> bool {
        self.program.is_some()
    }

    /// Binds the program for subsequent draws.
    ///
    /// # Panics
    ///
    /// Panics if the shader has not been linked.
    pub fn use_program(&self) -> Result<()> {
        match self.program {
            Some(program) => self.video.bind_shader(program),
            None => panic!("shader program not linked; call Shader::link() first"),
        }
    }

    /// Sets an `int`, `ivec2`, `ivec3` or `ivec4` uniform depending on the
    /// number of values.
    pub fn set_uniform_ints(&self, name: &str, v: &[i32]) -> Result<()> {
        let program = self.program.ok_or(Error::ShaderNotLinked)?;
        let variable = match *v {
            [x] => UniformVariable::I32(x),
            [x, y] => UniformVariable::Vector2i([x, y]),
            [x, y, z] => UniformVariable::Vector3i([x, y, z]),
            [x, y, z, w] => UniformVariable::Vector4i([x, y, z, w]),
            _ => return Err(Error::UniformArity(v.len())),
        };

        self.video.update_uniform(program, name, variable)
    }

    /// Sets a `float`, `vec2`, `vec3` or `vec4` uniform depending on the
    /// number of values.
    pub fn set_uniform_floats(&self, name: &str, v: &[f32]) -> Result<()> {
        let program = self.program.ok_or(Error::ShaderNotLinked)?;
        let variable = match *v {
            [x] => UniformVariable::F32(x),
            [x, y] => UniformVariable::Vector2f([x, y]),
            [x, y, z] => UniformVariable::Vector3f([x, y, z]),
            [x, y, z, w] => UniformVariable::Vector4f([x, y, z, w]),
            _ => return Err(Error::UniformArity(v.len())),
        };

        self.video.update_uniform(program, name, variable)
    }

    pub fn set_uniform_matrix(&self, name: &str, m: &Matrix4<f32>) -> Result<()> {
        let program = self.program.ok_or(Error::ShaderNotLinked)?;
        self.video.update_uniform(program, name, (*m).into())
    }

    fn release(&mut self) {
        if let Some(program) = self.program.take() {
            if let Err(err) = self.video.delete_shader(program) {
                warn!("Failed to release {}: {}", program, err);
            }
        }
    }
}

impl Drop for Shader {
    fn drop(&mut self) {
        self.release();
    }
}
