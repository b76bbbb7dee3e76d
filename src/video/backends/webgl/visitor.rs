use std::cell::RefCell;
use std::collections::HashMap;

use web_sys::WebGl2RenderingContext as WebGL;
use web_sys::{WebGlBuffer, WebGlProgram, WebGlShader, WebGlTexture, WebGlUniformLocation, WebGlVertexArrayObject};

use crate::errors::*;
use crate::math::{Color, Vector2};

use super::super::super::{
    DrawCall, MeshHandle, MeshIndex, ShaderHandle, ShaderSource, ShaderStage, TextureFilter,
    TextureHandle, TextureParams, TextureWrap, UniformVariable, VertexLayout,
};
use super::super::utils::DataVec;
use super::super::Visitor;

const MAX_VERTEX_ATTRIBUTES: u32 = 3;

#[derive(Debug, Clone)]
struct GLShaderData {
    id: WebGlProgram,
    uniforms: RefCell<HashMap<String, Option<WebGlUniformLocation>>>,
}

impl GLShaderData {
    unsafe fn uniform_location(
        &self,
        ctx: &WebGL,
        name: &str,
    ) -> Result<Option<WebGlUniformLocation>> {
        let mut uniforms = self.uniforms.borrow_mut();
        match uniforms.get(name).cloned() {
            Some(location) => Ok(location),
            None => {
                let location = ctx.get_uniform_location(&self.id, name);
                check(ctx)?;

                if location.is_none() {
                    debug!("Uniform {:?} is not active in the program.", name);
                }

                uniforms.insert(name.to_owned(), location.clone());
                Ok(location)
            }
        }
    }
}

#[derive(Debug, Clone)]
struct GLMeshData {
    vao: WebGlVertexArrayObject,
    vbo: WebGlBuffer,
    ibo: WebGlBuffer,
}

#[derive(Debug, Clone)]
struct GLTextureData {
    id: WebGlTexture,
}

struct WebGLState {
    binded_shader: Option<ShaderHandle>,
    binded_texture: Option<TextureHandle>,
    depth_test: Option<bool>,
    wireframe_warned: bool,
}

pub struct WebGLVisitor {
    ctx: WebGL,
    state: WebGLState,
    shaders: DataVec<GLShaderData>,
    meshes: DataVec<GLMeshData>,
    textures: DataVec<GLTextureData>,
}

impl WebGLVisitor {
    pub unsafe fn new(ctx: WebGL) -> Result<Self> {
        let visitor = WebGLVisitor {
            ctx,
            state: WebGLState {
                binded_shader: None,
                binded_texture: None,
                depth_test: None,
                wireframe_warned: false,
            },
            shaders: DataVec::new(),
            meshes: DataVec::new(),
            textures: DataVec::new(),
        };

        info!("WebGLVisitor {}", visitor.version());
        check(&visitor.ctx)?;
        Ok(visitor)
    }

    fn parameter(&self, name: u32) -> String {
        self.ctx
            .get_parameter(name)
            .ok()
            .and_then(|v| v.as_string())
            .unwrap_or_else(|| "Unknown".to_owned())
    }
}

impl Visitor for WebGLVisitor {
    unsafe fn version(&self) -> String {
        format!(
            "{}; Shading Language: {}; Vendor: {}; Renderer: {}",
            self.parameter(WebGL::VERSION),
            self.parameter(WebGL::SHADING_LANGUAGE_VERSION),
            self.parameter(WebGL::VENDOR),
            self.parameter(WebGL::RENDERER)
        )
    }

    unsafe fn create_shader(
        &mut self,
        handle: ShaderHandle,
        sources: &[ShaderSource],
    ) -> Result<()> {
        let mut stages = Vec::with_capacity(sources.len());
        for src in sources {
            match Self::compile(&self.ctx, src) {
                Ok(shader) => stages.push(shader),
                Err(err) => {
                    for shader in &stages {
                        self.ctx.delete_shader(Some(shader));
                    }

                    return Err(err);
                }
            }
        }

        let id = Self::link(&self.ctx, &stages);

        for shader in &stages {
            if let Ok(ref program) = id {
                self.ctx.detach_shader(program, shader);
            }

            self.ctx.delete_shader(Some(shader));
        }

        let id = id?;
        check(&self.ctx)?;

        info!("Shader program linked properly.");
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
            self.ctx.use_program(None);
            self.state.binded_shader = None;
        }

        self.ctx.delete_program(Some(&shader.id));
        check(&self.ctx)
    }

    unsafe fn bind_shader(&mut self, handle: ShaderHandle) -> Result<()> {
        let shader = self
            .shaders
            .get(handle)
            .ok_or_else(|| Error::ShaderHandleInvalid(handle))?;

        Self::bind_program(&self.ctx, &mut self.state, handle, shader)
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

        Self::bind_program(&self.ctx, &mut self.state, handle, shader)?;
        let location = shader.uniform_location(&self.ctx, name)?;
        Self::bind_uniform_variable(&self.ctx, location.as_ref(), &variable)
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

        let id = self
            .ctx
            .create_texture()
            .ok_or_else(|| Error::Backend("[WebGL] Failed to create texture.".to_owned()))?;

        self.ctx.active_texture(WebGL::TEXTURE0);
        self.ctx.bind_texture(WebGL::TEXTURE_2D, Some(&id));
        self.state.binded_texture = Some(handle);

        Self::bind_texture_params(&self.ctx, params.wrap, params.filter);

        self.ctx
            .tex_image_2d_with_i32_and_i32_and_i32_and_format_and_type_and_opt_u8_array(
                WebGL::TEXTURE_2D,
                0,
                WebGL::RGBA as i32,
                params.dimensions.x as i32,
                params.dimensions.y as i32,
                0,
                WebGL::RGBA,
                WebGL::UNSIGNED_BYTE,
                Some(pixels),
            )
            .map_err(|err| Error::Backend(format!("[WebGL] {:?}", err)))?;

        if params.mipmap {
            self.ctx.generate_mipmap(WebGL::TEXTURE_2D);
        }

        if let Err(err) = check(&self.ctx) {
            self.ctx.delete_texture(Some(&id));
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

        self.ctx.delete_texture(Some(&texture.id));
        check(&self.ctx)
    }

    unsafe fn create_mesh(&mut self, handle: MeshHandle) -> Result<()> {
        let failure = || Error::Backend("[WebGL] Failed to allocate mesh buffers.".to_owned());

        let mesh = GLMeshData {
            vao: self.ctx.create_vertex_array().ok_or_else(failure)?,
            vbo: self.ctx.create_buffer().ok_or_else(failure)?,
            ibo: self.ctx.create_buffer().ok_or_else(failure)?,
        };

        check(&self.ctx)?;
        self.meshes.create(handle, mesh);
        Ok(())
    }

    unsafe fn update_vertex_buffer(
        &mut self,
        handle: MeshHandle,
        layout: VertexLayout,
        vertices: &[f32],
    ) -> Result<()> {
        let ctx = &self.ctx;
        let mesh = self
            .meshes
            .get(handle)
            .ok_or_else(|| Error::MeshHandleInvalid(handle))?;

        ctx.bind_vertex_array(Some(&mesh.vao));
        ctx.bind_buffer(WebGL::ARRAY_BUFFER, Some(&mesh.vbo));
        ctx.buffer_data_with_u8_array(WebGL::ARRAY_BUFFER, as_bytes(vertices), WebGL::STATIC_DRAW);

        let size_of_float = ::std::mem::size_of::<f32>() as i32;
        let stride = layout.stride() as i32 * size_of_float;

        for location in 0..MAX_VERTEX_ATTRIBUTES {
            ctx.disable_vertex_attrib_array(location);
        }

        for attribute in layout.attributes() {
            ctx.vertex_attrib_pointer_with_i32(
                attribute.location,
                i32::from(attribute.size),
                WebGL::FLOAT,
                false,
                stride,
                i32::from(attribute.offset) * size_of_float,
            );
            ctx.enable_vertex_attrib_array(attribute.location);
        }

        ctx.bind_vertex_array(None);
        check(ctx)
    }

    unsafe fn update_index_buffer(&mut self, handle: MeshHandle, indices: &[u32]) -> Result<()> {
        let ctx = &self.ctx;
        let mesh = self
            .meshes
            .get(handle)
            .ok_or_else(|| Error::MeshHandleInvalid(handle))?;

        ctx.bind_vertex_array(Some(&mesh.vao));
        ctx.bind_buffer(WebGL::ELEMENT_ARRAY_BUFFER, Some(&mesh.ibo));
        ctx.buffer_data_with_u8_array(
            WebGL::ELEMENT_ARRAY_BUFFER,
            as_bytes(indices),
            WebGL::STATIC_DRAW,
        );
        ctx.bind_vertex_array(None);
        check(ctx)
    }

    unsafe fn delete_mesh(&mut self, handle: MeshHandle) -> Result<()> {
        let mesh = self
            .meshes
            .free(handle)
            .ok_or_else(|| Error::MeshHandleInvalid(handle))?;

        self.ctx.delete_vertex_array(Some(&mesh.vao));
        self.ctx.delete_buffer(Some(&mesh.vbo));
        self.ctx.delete_buffer(Some(&mesh.ibo));
        check(&self.ctx)
    }

    unsafe fn clear(&mut self, color: Option<Color>, depth: bool) -> Result<()> {
        if self.state.depth_test != Some(depth) {
            if depth {
                self.ctx.enable(WebGL::DEPTH_TEST);
            } else {
                self.ctx.disable(WebGL::DEPTH_TEST);
            }

            self.state.depth_test = Some(depth);
        }

        let mut bits = 0;
        if let Some(v) = color {
            bits |= WebGL::COLOR_BUFFER_BIT;
            self.ctx.clear_color(v.r, v.g, v.b, v.a);
        }

        if depth {
            bits |= WebGL::DEPTH_BUFFER_BIT;
            self.ctx.clear_depth(1.0);
        }

        if bits != 0 {
            self.ctx.clear(bits);
        }

        check(&self.ctx)
    }

    unsafe fn set_viewport(&mut self, dimensions: Vector2<u32>) -> Result<()> {
        self.ctx
            .viewport(0, 0, dimensions.x as i32, dimensions.y as i32);
        check(&self.ctx)
    }

    unsafe fn draw(&mut self, handle: MeshHandle, dc: DrawCall) -> Result<u32> {
        // WebGL2 has no polygon mode, so wireframes are drawn filled.
        if dc.wireframe && !self.state.wireframe_warned {
            warn!("Wireframe rendering is not supported by WebGL, drawing filled polygons.");
            self.state.wireframe_warned = true;
        }

        let ctx = &self.ctx;
        let mesh = self
            .meshes
            .get(handle)
            .ok_or_else(|| Error::MeshHandleInvalid(handle))?;

        let texture = match dc.texture {
            Some(texture) => {
                let data = self
                    .textures
                    .get(texture)
                    .ok_or_else(|| Error::TextureHandleInvalid(texture))?;
                Some((texture, &data.id))
            }
            None => None,
        };

        let binded = texture.map(|(handle, _)| handle);
        if self.state.binded_texture != binded {
            ctx.active_texture(WebGL::TEXTURE0);
            ctx.bind_texture(WebGL::TEXTURE_2D, texture.map(|(_, id)| id));
            self.state.binded_texture = binded;
        }

        ctx.bind_vertex_array(Some(&mesh.vao));
        let len = match dc.index {
            MeshIndex::Arrays(n) => {
                ctx.draw_arrays(WebGL::TRIANGLES, 0, n as i32);
                n
            }
            MeshIndex::Elements(n) => {
                ctx.draw_elements_with_i32(WebGL::TRIANGLES, n as i32, WebGL::UNSIGNED_INT, 0);
                n
            }
        };
        ctx.bind_vertex_array(None);

        check(ctx)?;
        Ok(len)
    }
}

impl WebGLVisitor {
    unsafe fn bind_program(
        ctx: &WebGL,
        state: &mut WebGLState,
        handle: ShaderHandle,
        shader: &GLShaderData,
    ) -> Result<()> {
        if state.binded_shader == Some(handle) {
            return Ok(());
        }

        ctx.use_program(Some(&shader.id));
        check(ctx)?;

        state.binded_shader = Some(handle);
        Ok(())
    }

    unsafe fn bind_uniform_variable(
        ctx: &WebGL,
        location: Option<&WebGlUniformLocation>,
        variable: &UniformVariable,
    ) -> Result<()> {
        match *variable {
            UniformVariable::I32(v) => ctx.uniform1i(location, v),
            UniformVariable::Vector2i(v) => ctx.uniform2i(location, v[0], v[1]),
            UniformVariable::Vector3i(v) => ctx.uniform3i(location, v[0], v[1], v[2]),
            UniformVariable::Vector4i(v) => ctx.uniform4i(location, v[0], v[1], v[2], v[3]),
            UniformVariable::F32(v) => ctx.uniform1f(location, v),
            UniformVariable::Vector2f(v) => ctx.uniform2f(location, v[0], v[1]),
            UniformVariable::Vector3f(v) => ctx.uniform3f(location, v[0], v[1], v[2]),
            UniformVariable::Vector4f(v) => ctx.uniform4f(location, v[0], v[1], v[2], v[3]),
            UniformVariable::Matrix4f(v) => {
                let mut columns = [0.0; 16];
                for (i, column) in v.iter().enumerate() {
                    columns[i * 4..(i + 1) * 4].copy_from_slice(column);
                }

                ctx.uniform_matrix4fv_with_f32_array(location, false, &columns)
            }
        }

        check(ctx)
    }

    unsafe fn compile(ctx: &WebGL, src: &ShaderSource) -> Result<WebGlShader> {
        let kind = match src.stage {
            ShaderStage::Vertex => WebGL::VERTEX_SHADER,
            ShaderStage::Fragment => WebGL::FRAGMENT_SHADER,
        };

        let shader = ctx.create_shader(kind).ok_or_else(|| {
            Error::ShaderCompile(format!("{:?} stage: unable to create shader object.", src.stage))
        })?;

        debug!("Compiling {:?} shader:\n{}", src.stage, src.source);
        ctx.shader_source(&shader, &src.source);
        ctx.compile_shader(&shader);

        let compiled = ctx
            .get_shader_parameter(&shader, WebGL::COMPILE_STATUS)
            .as_bool()
            .unwrap_or(false);

        if compiled {
            Ok(shader)
        } else {
            let err = ctx
                .get_shader_info_log(&shader)
                .unwrap_or_else(|| "Unknown error creating shader".into());
            ctx.delete_shader(Some(&shader));

            Err(Error::ShaderCompile(format!("{:?} stage: {}", src.stage, err)))
        }
    }

    unsafe fn link(ctx: &WebGL, shaders: &[WebGlShader]) -> Result<WebGlProgram> {
        let program = ctx
            .create_program()
            .ok_or_else(|| Error::ShaderLink("Unable to create program object".to_owned()))?;

        for shader in shaders {
            ctx.attach_shader(&program, shader);
        }

        ctx.link_program(&program);

        let linked = ctx
            .get_program_parameter(&program, WebGL::LINK_STATUS)
            .as_bool()
            .unwrap_or(false);

        if linked {
            Ok(program)
        } else {
            let err = ctx
                .get_program_info_log(&program)
                .unwrap_or_else(|| "Unknown error creating program".into());
            ctx.delete_program(Some(&program));

            Err(Error::ShaderLink(err))
        }
    }

    unsafe fn bind_texture_params(ctx: &WebGL, wrap: TextureWrap, filter: TextureFilter) {
        let wrap = match wrap {
            TextureWrap::Repeat => WebGL::REPEAT,
            TextureWrap::Clamp => WebGL::CLAMP_TO_EDGE,
        };

        let filter = match filter {
            TextureFilter::Nearest => WebGL::NEAREST,
            TextureFilter::Linear => WebGL::LINEAR,
        };

        ctx.tex_parameteri(WebGL::TEXTURE_2D, WebGL::TEXTURE_WRAP_S, wrap as i32);
        ctx.tex_parameteri(WebGL::TEXTURE_2D, WebGL::TEXTURE_WRAP_T, wrap as i32);
        ctx.tex_parameteri(WebGL::TEXTURE_2D, WebGL::TEXTURE_MIN_FILTER, filter as i32);
        ctx.tex_parameteri(WebGL::TEXTURE_2D, WebGL::TEXTURE_MAG_FILTER, filter as i32);
    }
}

unsafe fn as_bytes<T: Copy>(data: &[T]) -> &[u8] {
    ::std::slice::from_raw_parts(
        data.as_ptr() as *const u8,
        data.len() * ::std::mem::size_of::<T>(),
    )
}

unsafe fn check(ctx: &WebGL) -> Result<()> {
    let msg = match ctx.get_error() {
        WebGL::NO_ERROR => return Ok(()),
        WebGL::INVALID_ENUM => {
            "[WebGL] An unacceptable value is specified for an enumerated argument."
        }
        WebGL::INVALID_VALUE => "[WebGL] A numeric argument is out of range.",
        WebGL::INVALID_OPERATION => {
            "[WebGL] The specified operation is not allowed in the current state."
        }
        WebGL::INVALID_FRAMEBUFFER_OPERATION => {
            "[WebGL] The command is trying to render to or read from the framebuffer while the \
             currently bound framebuffer is not framebuffer complete."
        }
        WebGL::OUT_OF_MEMORY => "[WebGL] There is not enough memory left to execute the command.",
        _ => "[WebGL] Oops, Unknown OpenGL error.",
    };

    Err(Error::Backend(msg.to_owned()))
}
