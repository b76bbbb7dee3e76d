use std::cell::RefCell;
use std::collections::HashMap;
use std::ffi::{CStr, CString};
use std::os::raw::c_void;
use std::ptr;

use gl::types::*;

use crate::errors::*;
use crate::math::{Color, Vector2};

use super::super::super::{
    DrawCall, MeshHandle, MeshIndex, ShaderHandle, ShaderSource, ShaderStage, TextureFilter,
    TextureHandle, TextureParams, TextureWrap, UniformVariable, VertexLayout,
};
use super::super::utils::DataVec;
use super::super::Visitor;

/// The highest attribute location any `VertexLayout` uses, plus one.
const MAX_VERTEX_ATTRIBUTES: GLuint = 3;

#[derive(Debug, Clone)]
struct GLShaderData {
    id: GLuint,
    uniforms: RefCell<HashMap<String, GLint>>,
}

impl GLShaderData {
    unsafe fn uniform_location(&self, name: &str) -> Result<GLint> {
        let mut uniforms = self.uniforms.borrow_mut();
        match uniforms.get(name).cloned() {
            Some(location) => Ok(location),
            None => {
                let c_name = CString::new(name.as_bytes())
                    .map_err(|_| Error::Backend(format!("Uniform name {:?} is malformed.", name)))?;
                let location = gl::GetUniformLocation(self.id, c_name.as_ptr());
                check()?;

                if location == -1 {
                    debug!("Uniform {:?} is not active in program {}.", name, self.id);
                }

                uniforms.insert(name.to_owned(), location);
                Ok(location)
            }
        }
    }
}

#[derive(Debug, Copy, Clone)]
struct GLMeshData {
    vao: GLuint,
    vbo: GLuint,
    ibo: GLuint,
}

#[derive(Debug, Copy, Clone)]
struct GLTextureData {
    id: GLuint,
}

struct GLMutableState {
    binded_shader: Option<ShaderHandle>,
    binded_texture: Option<TextureHandle>,
    wireframe: Option<bool>,
    depth_test: Option<bool>,
}

pub struct GLVisitor {
    state: GLMutableState,
    shaders: DataVec<GLShaderData>,
    meshes: DataVec<GLMeshData>,
    textures: DataVec<GLTextureData>,
}

impl GLVisitor {
    pub unsafe fn new() -> Result<Self> {
        let version = get_string(gl::VERSION)?;
        info!("GLVisitor OpenGL {}", version);

        let state = GLMutableState {
            binded_shader: None,
            binded_texture: None,
            wireframe: None,
            depth_test: None,
        };

        let visitor = GLVisitor {
            state,
            shaders: DataVec::new(),
            meshes: DataVec::new(),
            textures: DataVec::new(),
        };

        check()?;
        Ok(visitor)
    }
}

impl Visitor for GLVisitor {
    unsafe fn version(&self) -> String {
        get_string(gl::VERSION).unwrap_or_else(|err| format!("{}", err))
    }

    unsafe fn create_shader(
        &mut self,
        handle: ShaderHandle,
        sources: &[ShaderSource],
    ) -> Result<()> {
        let mut stages = Vec::with_capacity(sources.len());
        for src in sources {
            match Self::compile(src) {
                Ok(id) => stages.push(id),
                Err(err) => {
                    for id in stages {
                        gl::DeleteShader(id);
                    }

                    return Err(err);
                }
            }
        }

        let id = Self::link(&stages);

        for &stage in &stages {
            if let Ok(program) = id {
                gl::DetachShader(program, stage);
            }

            gl::DeleteShader(stage);
        }

        let id = id?;
        check()?;

        info!("Shader program {} linked properly.", id);
        let shader = GLShaderData {
            id,
            uniforms: RefCell::new(HashMap::new()),
        };

        self.shaders.create(handle, shader);
        Ok(())
    }

    unsafe fn delete_shader(&mut self, handle: ShaderHandle) -> Result<()> {
        let shader = self
            .shaders
            .free(handle)
            .ok_or_else(|| Error::ShaderHandleInvalid(handle))?;

        if self.state.binded_shader == Some(handle) {
            gl::UseProgram(0);
            self.state.binded_shader = None;
        }

        gl::DeleteProgram(shader.id);
        check()
    }

    unsafe fn bind_shader(&mut self, handle: ShaderHandle) -> Result<()> {
        let shader = self
            .shaders
            .get(handle)
            .ok_or_else(|| Error::ShaderHandleInvalid(handle))?;

        Self::bind_program(&mut self.state, handle, shader)
    }

    unsafe fn update_uniform(
        &mut self,
        handle: ShaderHandle,
        name: &str,
        variable: UniformVariable,
    ) -> Result<()> {
        let shader = self
            .shaders
            .get(handle)
            .ok_or_else(|| Error::ShaderHandleInvalid(handle))?;

        Self::bind_program(&mut self.state, handle, shader)?;
        let location = shader.uniform_location(name)?;
        Self::bind_uniform_variable(location, &variable)
    }

    unsafe fn create_texture(
        &mut self,
        handle: TextureHandle,
        params: TextureParams,
        pixels: &[u8],
    ) -> Result<()> {
        let expected = params.dimensions.x as usize * params.dimensions.y as usize * 4;
        if pixels.len() != expected || pixels.is_empty() {
            return Err(Error::UnsupportedStride);
        }

        let mut id = 0;
        gl::GenTextures(1, &mut id);
        if id == 0 {
            return Err(Error::Backend("[GL] Failed to generate texture.".to_owned()));
        }

        gl::ActiveTexture(gl::TEXTURE0);
        gl::BindTexture(gl::TEXTURE_2D, id);
        self.state.binded_texture = Some(handle);

        Self::bind_texture_params(params.wrap, params.filter);

        gl::TexImage2D(
            gl::TEXTURE_2D,
            0,
            gl::RGBA as GLint,
            params.dimensions.x as GLsizei,
            params.dimensions.y as GLsizei,
            0,
            gl::RGBA,
            gl::UNSIGNED_BYTE,
            pixels.as_ptr() as *const c_void,
        );

        if params.mipmap {
            gl::GenerateMipmap(gl::TEXTURE_2D);
        }

        if let Err(err) = check() {
            gl::DeleteTextures(1, &id);
            self.state.binded_texture = None;
            return Err(err);
        }

        self.textures.create(handle, GLTextureData { id });
        Ok(())
    }

    unsafe fn delete_texture(&mut self, handle: TextureHandle) -> Result<()> {
        let texture = self
            .textures
            .free(handle)
            .ok_or_else(|| Error::TextureHandleInvalid(handle))?;

        if self.state.binded_texture == Some(handle) {
            self.state.binded_texture = None;
        }

        gl::DeleteTextures(1, &texture.id);
        check()
    }

    unsafe fn create_mesh(&mut self, handle: MeshHandle) -> Result<()> {
        let mut mesh = GLMeshData {
            vao: 0,
            vbo: 0,
            ibo: 0,
        };

        gl::GenVertexArrays(1, &mut mesh.vao);
        gl::GenBuffers(1, &mut mesh.vbo);
        gl::GenBuffers(1, &mut mesh.ibo);
        check()?;

        self.meshes.create(handle, mesh);
        Ok(())
    }

    unsafe fn update_vertex_buffer(
        &mut self,
        handle: MeshHandle,
        layout: VertexLayout,
        vertices: &[f32],
    ) -> Result<()> {
        let mesh = *self
            .meshes
            .get(handle)
            .ok_or_else(|| Error::MeshHandleInvalid(handle))?;

        gl::BindVertexArray(mesh.vao);
        gl::BindBuffer(gl::ARRAY_BUFFER, mesh.vbo);
        Self::upload(gl::ARRAY_BUFFER, vertices);

        let size_of_float = ::std::mem::size_of::<f32>();
        let stride = (layout.stride() * size_of_float) as GLsizei;

        for location in 0..MAX_VERTEX_ATTRIBUTES {
            gl::DisableVertexAttribArray(location);
        }

        for attribute in layout.attributes() {
            let offset = usize::from(attribute.offset) * size_of_float;
            gl::VertexAttribPointer(
                attribute.location,
                GLint::from(attribute.size),
                gl::FLOAT,
                gl::FALSE,
                stride,
                offset as *const c_void,
            );
            gl::EnableVertexAttribArray(attribute.location);
        }

        gl::BindVertexArray(0);
        check()
    }

    unsafe fn update_index_buffer(&mut self, handle: MeshHandle, indices: &[u32]) -> Result<()> {
        let mesh = *self
            .meshes
            .get(handle)
            .ok_or_else(|| Error::MeshHandleInvalid(handle))?;

        gl::BindVertexArray(mesh.vao);
        gl::BindBuffer(gl::ELEMENT_ARRAY_BUFFER, mesh.ibo);
        Self::upload(gl::ELEMENT_ARRAY_BUFFER, indices);
        gl::BindVertexArray(0);
        check()
    }

    unsafe fn delete_mesh(&mut self, handle: MeshHandle) -> Result<()> {
        let mesh = self
            .meshes
            .free(handle)
            .ok_or_else(|| Error::MeshHandleInvalid(handle))?;

        gl::DeleteVertexArrays(1, &mesh.vao);
        gl::DeleteBuffers(1, &mesh.vbo);
        gl::DeleteBuffers(1, &mesh.ibo);
        check()
    }

    unsafe fn clear(&mut self, color: Option<Color>, depth: bool) -> Result<()> {
        if self.state.depth_test != Some(depth) {
            if depth {
                gl::Enable(gl::DEPTH_TEST);
            } else {
                gl::Disable(gl::DEPTH_TEST);
            }

            self.state.depth_test = Some(depth);
        }

        let mut bits = 0;
        if let Some(v) = color {
            bits |= gl::COLOR_BUFFER_BIT;
            gl::ClearColor(v.r, v.g, v.b, v.a);
        }

        if depth {
            bits |= gl::DEPTH_BUFFER_BIT;
            gl::ClearDepth(1.0);
        }

        if bits != 0 {
            gl::Clear(bits);
        }

        check()
    }

    unsafe fn set_viewport(&mut self, dimensions: Vector2<u32>) -> Result<()> {
        gl::Viewport(0, 0, dimensions.x as GLsizei, dimensions.y as GLsizei);
        check()
    }

    unsafe fn draw(&mut self, handle: MeshHandle, dc: DrawCall) -> Result<u32> {
        let mesh = *self
            .meshes
            .get(handle)
            .ok_or_else(|| Error::MeshHandleInvalid(handle))?;

        let texture = match dc.texture {
            Some(texture) => {
                let data = self
                    .textures
                    .get(texture)
                    .ok_or_else(|| Error::TextureHandleInvalid(texture))?;
                Some((texture, data.id))
            }
            None => None,
        };

        Self::bind_texture(&mut self.state, texture)?;
        Self::set_wireframe(&mut self.state, dc.wireframe)?;

        gl::BindVertexArray(mesh.vao);
        let len = match dc.index {
            MeshIndex::Arrays(n) => {
                gl::DrawArrays(gl::TRIANGLES, 0, n as GLsizei);
                n
            }
            MeshIndex::Elements(n) => {
                gl::DrawElements(gl::TRIANGLES, n as GLsizei, gl::UNSIGNED_INT, ptr::null());
                n
            }
        };
        gl::BindVertexArray(0);

        check()?;
        Ok(len)
    }
}

impl GLVisitor {
    unsafe fn bind_program(
        state: &mut GLMutableState,
        handle: ShaderHandle,
        shader: &GLShaderData,
    ) -> Result<()> {
        if state.binded_shader == Some(handle) {
            return Ok(());
        }

        gl::UseProgram(shader.id);
        check()?;

        state.binded_shader = Some(handle);
        Ok(())
    }

    unsafe fn bind_uniform_variable(location: GLint, variable: &UniformVariable) -> Result<()> {
        match *variable {
            UniformVariable::I32(v) => gl::Uniform1i(location, v),
            UniformVariable::Vector2i(v) => gl::Uniform2i(location, v[0], v[1]),
            UniformVariable::Vector3i(v) => gl::Uniform3i(location, v[0], v[1], v[2]),
            UniformVariable::Vector4i(v) => gl::Uniform4i(location, v[0], v[1], v[2], v[3]),
            UniformVariable::F32(v) => gl::Uniform1f(location, v),
            UniformVariable::Vector2f(v) => gl::Uniform2f(location, v[0], v[1]),
            UniformVariable::Vector3f(v) => gl::Uniform3f(location, v[0], v[1], v[2]),
            UniformVariable::Vector4f(v) => gl::Uniform4f(location, v[0], v[1], v[2], v[3]),
            UniformVariable::Matrix4f(v) => {
                gl::UniformMatrix4fv(location, 1, gl::FALSE, v[0].as_ptr())
            }
        }

        check()
    }

    unsafe fn bind_texture(
        state: &mut GLMutableState,
        texture: Option<(TextureHandle, GLuint)>,
    ) -> Result<()> {
        let handle = texture.map(|(handle, _)| handle);
        if state.binded_texture == handle {
            return Ok(());
        }

        gl::ActiveTexture(gl::TEXTURE0);
        gl::BindTexture(gl::TEXTURE_2D, texture.map(|(_, id)| id).unwrap_or(0));
        state.binded_texture = handle;
        check()
    }

    unsafe fn set_wireframe(state: &mut GLMutableState, wireframe: bool) -> Result<()> {
        if state.wireframe == Some(wireframe) {
            return Ok(());
        }

        let mode = if wireframe { gl::LINE } else { gl::FILL };
        gl::PolygonMode(gl::FRONT_AND_BACK, mode);
        state.wireframe = Some(wireframe);
        check()
    }

    unsafe fn upload<T>(tp: GLenum, data: &[T]) {
        let size = (data.len() * ::std::mem::size_of::<T>()) as GLsizeiptr;
        let value = if data.is_empty() {
            ptr::null()
        } else {
            data.as_ptr() as *const c_void
        };

        gl::BufferData(tp, size, value, gl::STATIC_DRAW);
    }

    unsafe fn compile(src: &ShaderSource) -> Result<GLuint> {
        let kind = match src.stage {
            ShaderStage::Vertex => gl::VERTEX_SHADER,
            ShaderStage::Fragment => gl::FRAGMENT_SHADER,
        };

        let c_str = CString::new(src.source.as_bytes()).map_err(|_| {
            Error::ShaderCompile(format!("{:?} stage: source contains a nul byte.", src.stage))
        })?;

        debug!("Compiling {:?} shader:\n{}", src.stage, src.source);
        let shader = gl::CreateShader(kind);
        gl::ShaderSource(shader, 1, &c_str.as_ptr(), ptr::null());
        gl::CompileShader(shader);

        let mut status = GLint::from(gl::FALSE);
        gl::GetShaderiv(shader, gl::COMPILE_STATUS, &mut status);

        if status != GLint::from(gl::TRUE) {
            let mut len = 0;
            gl::GetShaderiv(shader, gl::INFO_LOG_LENGTH, &mut len);
            let mut buf = vec![0u8; len.max(1) as usize];
            let mut written = 0;
            gl::GetShaderInfoLog(
                shader,
                len,
                &mut written,
                buf.as_mut_ptr() as *mut GLchar,
            );
            buf.truncate(written.max(0) as usize);
            gl::DeleteShader(shader);

            Err(Error::ShaderCompile(format!(
                "{:?} stage: {}",
                src.stage,
                String::from_utf8_lossy(&buf)
            )))
        } else {
            Ok(shader)
        }
    }

    unsafe fn link(shaders: &[GLuint]) -> Result<GLuint> {
        let program = gl::CreateProgram();
        for &shader in shaders {
            gl::AttachShader(program, shader);
        }

        gl::LinkProgram(program);

        let mut status = GLint::from(gl::FALSE);
        gl::GetProgramiv(program, gl::LINK_STATUS, &mut status);

        if status != GLint::from(gl::TRUE) {
            let mut len: GLint = 0;
            gl::GetProgramiv(program, gl::INFO_LOG_LENGTH, &mut len);
            let mut buf = vec![0u8; len.max(1) as usize];
            let mut written = 0;
            gl::GetProgramInfoLog(
                program,
                len,
                &mut written,
                buf.as_mut_ptr() as *mut GLchar,
            );
            buf.truncate(written.max(0) as usize);
            gl::DeleteProgram(program);

            Err(Error::ShaderLink(String::from_utf8_lossy(&buf).into_owned()))
        } else {
            Ok(program)
        }
    }

    unsafe fn bind_texture_params(wrap: TextureWrap, filter: TextureFilter) {
        let wrap = match wrap {
            TextureWrap::Repeat => gl::REPEAT,
            TextureWrap::Clamp => gl::CLAMP_TO_EDGE,
        };

        let filter = match filter {
            TextureFilter::Nearest => gl::NEAREST,
            TextureFilter::Linear => gl::LINEAR,
        };

        gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_WRAP_S, wrap as GLint);
        gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_WRAP_T, wrap as GLint);
        gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_MIN_FILTER, filter as GLint);
        gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_MAG_FILTER, filter as GLint);
    }
}

unsafe fn get_string(name: GLenum) -> Result<String> {
    let desc = gl::GetString(name);
    if desc.is_null() {
        return Err(Error::Backend("[GL] String is unavailable.".to_owned()));
    }

    Ok(CStr::from_ptr(desc as *const _)
        .to_string_lossy()
        .into_owned())
}

unsafe fn check() -> Result<()> {
    let msg = match gl::GetError() {
        gl::NO_ERROR => return Ok(()),
        gl::INVALID_ENUM => "[GL] An unacceptable value is specified for an enumerated argument.",
        gl::INVALID_VALUE => "[GL] A numeric argument is out of range.",
        gl::INVALID_OPERATION => {
            "[GL] The specified operation is not allowed in the current state."
        }
        gl::INVALID_FRAMEBUFFER_OPERATION => {
            "[GL] The command is trying to render to or read from the framebuffer while the \
             currently bound framebuffer is not framebuffer complete."
        }
        gl::OUT_OF_MEMORY => "[GL] There is not enough memory left to execute the command.",
        _ => "[GL] Oops, Unknown OpenGL error.",
    };

    Err(Error::Backend(msg.to_owned()))
}
