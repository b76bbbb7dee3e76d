//! A backend without any GPU behind it.
//!
//! It keeps track of the objects it was asked to create so misuse shows up as
//! the same errors a real driver would report, runs a crude syntax check in
//! place of a GLSL compiler, and optionally reports every call to a `Recorder`.

use std::cell::RefCell;
use std::rc::Rc;

use crate::errors::*;
use crate::math::{Color, Vector2};

use super::super::{
    DrawCall, MeshHandle, MeshIndex, ShaderHandle, ShaderSource, TextureHandle, TextureParams,
    UniformVariable, VertexLayout,
};
use super::utils::DataVec;
use super::Visitor;

/// One call received by the headless backend.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    CreateShader(ShaderHandle),
    DeleteShader(ShaderHandle),
    BindShader(ShaderHandle),
    UpdateUniform(ShaderHandle, String, UniformVariable),
    CreateTexture(TextureHandle, TextureParams),
    DeleteTexture(TextureHandle),
    CreateMesh(MeshHandle),
    /// The layout and the number of floats uploaded.
    UpdateVertexBuffer(MeshHandle, VertexLayout, usize),
    /// The number of indices uploaded.
    UpdateIndexBuffer(MeshHandle, usize),
    DeleteMesh(MeshHandle),
    Clear(Option<Color>, bool),
    SetViewport(Vector2<u32>),
    Draw(MeshHandle, DrawCall),
}

/// A shared log of the calls made to a headless backend.
#[derive(Debug, Clone, Default)]
pub struct Recorder {
    calls: Rc<RefCell<Vec<Call>>>,
}

impl Recorder {
    pub fn new() -> Self {
        Recorder::default()
    }

    /// Returns a snapshot of every call received so far, oldest first.
    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    /// Returns the draw calls received so far.
    pub fn draws(&self) -> Vec<DrawCall> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|call| match *call {
                Call::Draw(_, dc) => Some(dc),
                _ => None,
            })
            .collect()
    }

    pub fn clear(&self) {
        self.calls.borrow_mut().clear();
    }

    fn push(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }
}

#[derive(Debug, Copy, Clone)]
struct HeadlessMesh {
    vertices: usize,
    indices: usize,
}

pub struct HeadlessVisitor {
    recorder: Option<Recorder>,
    shaders: DataVec<()>,
    meshes: DataVec<HeadlessMesh>,
    textures: DataVec<TextureParams>,
}

impl HeadlessVisitor {
    pub fn new() -> Self {
        HeadlessVisitor {
            recorder: None,
            shaders: DataVec::new(),
            meshes: DataVec::new(),
            textures: DataVec::new(),
        }
    }

    pub fn with_recorder(recorder: Recorder) -> Self {
        HeadlessVisitor {
            recorder: Some(recorder),
            ..HeadlessVisitor::new()
        }
    }

    fn record(&self, call: Call) {
        if let Some(ref recorder) = self.recorder {
            recorder.push(call);
        }
    }

    /// Rejects sources without an entry point or with unbalanced brackets.
    fn compile(src: &ShaderSource) -> Result<()> {
        let mut braces = 0i32;
        let mut parens = 0i32;

        for (line, text) in src.source.lines().enumerate() {
            for c in text.chars() {
                match c {
                    '{' => braces += 1,
                    '}' => braces -= 1,
                    '(' => parens += 1,
                    ')' => parens -= 1,
                    _ => {}
                }

                if braces < 0 || parens < 0 {
                    bail_compile(src, line + 1, &format!("syntax error, unexpected '{}'", c))?;
                }
            }
        }

        if braces != 0 || parens != 0 {
            let lines = src.source.lines().count().max(1);
            bail_compile(src, lines, "syntax error, unexpected end of file")?;
        }

        if !src.source.contains("main") {
            bail_compile(src, 1, "missing entry point 'main'")?;
        }

        Ok(())
    }
}

fn bail_compile(src: &ShaderSource, line: usize, msg: &str) -> Result<()> {
    Err(Error::ShaderCompile(format!(
        "{:?} stage: ERROR: 0:{}: {}",
        src.stage, line, msg
    )))
}

impl Visitor for HeadlessVisitor {
    unsafe fn version(&self) -> String {
        "Headless".to_owned()
    }

    unsafe fn create_shader(
        &mut self,
        handle: ShaderHandle,
        sources: &[ShaderSource],
    ) -> Result<()> {
        for src in sources {
            Self::compile(src)?;
        }

        self.shaders.create(handle, ());
        self.record(Call::CreateShader(handle));
        Ok(())
    }

    unsafe fn delete_shader(&mut self, handle: ShaderHandle) -> Result<()> {
        self.shaders
            .free(handle)
            .ok_or_else(|| Error::ShaderHandleInvalid(handle))?;

        self.record(Call::DeleteShader(handle));
        Ok(())
    }

    unsafe fn bind_shader(&mut self, handle: ShaderHandle) -> Result<()> {
        self.shaders
            .get(handle)
            .ok_or_else(|| Error::ShaderHandleInvalid(handle))?;

        self.record(Call::BindShader(handle));
        Ok(())
    }

    unsafe fn update_uniform(
        &mut self,
        handle: ShaderHandle,
        name: &str,
        variable: UniformVariable,
    ) -> Result<()> {
        self.shaders
            .get(handle)
            .ok_or_else(|| Error::ShaderHandleInvalid(handle))?;

        self.record(Call::UpdateUniform(handle, name.to_owned(), variable));
        Ok(())
    }

    unsafe fn create_texture(
        &mut self,
        handle: TextureHandle,
        params: TextureParams,
        pixels: &[u8],
    ) -> Result<()> {
        let expected = params.dimensions.x as usize * params.dimensions.y as usize * 4;
        if pixels.len() != expected {
            return Err(Error::UnsupportedStride);
        }

        self.textures.create(handle, params);
        self.record(Call::CreateTexture(handle, params));
        Ok(())
    }

    unsafe fn delete_texture(&mut self, handle: TextureHandle) -> Result<()> {
        self.textures
            .free(handle)
            .ok_or_else(|| Error::TextureHandleInvalid(handle))?;

        self.record(Call::DeleteTexture(handle));
        Ok(())
    }

    unsafe fn create_mesh(&mut self, handle: MeshHandle) -> Result<()> {
        let mesh = HeadlessMesh {
            vertices: 0,
            indices: 0,
        };

        self.meshes.create(handle, mesh);
        self.record(Call::CreateMesh(handle));
        Ok(())
    }

    unsafe fn update_vertex_buffer(
        &mut self,
        handle: MeshHandle,
        layout: VertexLayout,
        vertices: &[f32],
    ) -> Result<()> {
        let mesh = self
            .meshes
            .get_mut(handle)
            .ok_or_else(|| Error::MeshHandleInvalid(handle))?;

        mesh.vertices = vertices.len() / layout.stride();
        self.record(Call::UpdateVertexBuffer(handle, layout, vertices.len()));
        Ok(())
    }

    unsafe fn update_index_buffer(&mut self, handle: MeshHandle, indices: &[u32]) -> Result<()> {
        let mesh = self
            .meshes
            .get_mut(handle)
            .ok_or_else(|| Error::MeshHandleInvalid(handle))?;

        mesh.indices = indices.len();
        self.record(Call::UpdateIndexBuffer(handle, indices.len()));
        Ok(())
    }

    unsafe fn delete_mesh(&mut self, handle: MeshHandle) -> Result<()> {
        self.meshes
            .free(handle)
            .ok_or_else(|| Error::MeshHandleInvalid(handle))?;

        self.record(Call::DeleteMesh(handle));
        Ok(())
    }

    unsafe fn clear(&mut self, color: Option<Color>, depth: bool) -> Result<()> {
        self.record(Call::Clear(color, depth));
        Ok(())
    }

    unsafe fn set_viewport(&mut self, dimensions: Vector2<u32>) -> Result<()> {
        self.record(Call::SetViewport(dimensions));
        Ok(())
    }

    unsafe fn draw(&mut self, handle: MeshHandle, dc: DrawCall) -> Result<u32> {
        let mesh = *self
            .meshes
            .get(handle)
            .ok_or_else(|| Error::MeshHandleInvalid(handle))?;

        if let Some(texture) = dc.texture {
            self.textures
                .get(texture)
                .ok_or_else(|| Error::TextureHandleInvalid(texture))?;
        }

        let len = match dc.index {
            MeshIndex::Arrays(n) if n as usize <= mesh.vertices => n,
            MeshIndex::Elements(n) if n as usize <= mesh.indices => n,
            _ => {
                return Err(Error::Backend(format!(
                    "{:?} is out of the bounds of {}.",
                    dc.index, handle
                )));
            }
        };

        self.record(Call::Draw(handle, dc));
        Ok(len)
    }
}
