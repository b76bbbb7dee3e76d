//! A thin rendering layer: shader programs, textures and a single-mesh scene,
//! all drawn through one backend `Visitor`.
//!
//! Every GPU object is created through a `VideoContext`, which is handed to
//! the `Shader`, `Texture` and `Scene` constructors explicitly. The context
//! is reference counted and not `Send`, so all rendering stays on the thread
//! that owns the window.

pub mod backends;
pub mod camera;
pub mod scene;
pub mod shader;
pub mod texture;

pub use self::camera::Camera;
pub use self::scene::Scene;
pub use self::shader::Shader;
pub use self::texture::{Texture, TextureData};

use std::cell::RefCell;
use std::rc::Rc;

use crate::errors::*;
use crate::math::{Color, Matrix4, Vector2};
use crate::utils::HandlePool;

use self::backends::headless::{HeadlessVisitor, Recorder};
use self::backends::Visitor;

impl_handle!(ShaderHandle);
impl_handle!(MeshHandle);
impl_handle!(TextureHandle);

/// The GLSL header matching the active backend: desktop GL 3.3 core, or
/// WebGL2 (GLSL ES 3.0) in the browser.
#[cfg(not(target_arch = "wasm32"))]
pub const GLSL_VERSION: &str = "#version 330 core\n";

#[cfg(target_arch = "wasm32")]
pub const GLSL_VERSION: &str = "#version 300 es\nprecision mediump float;\n";

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

/// The text of one shader stage, ready to be compiled.
#[derive(Debug, Clone, PartialEq)]
pub struct ShaderSource {
    pub stage: ShaderStage,
    pub source: String,
}

/// A value that can be uploaded to a named uniform of a linked program.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum UniformVariable {
    I32(i32),
    Vector2i([i32; 2]),
    Vector3i([i32; 3]),
    Vector4i([i32; 4]),
    F32(f32),
    Vector2f([f32; 2]),
    Vector3f([f32; 3]),
    Vector4f([f32; 4]),
    /// Column-major 4x4 matrix.
    Matrix4f([[f32; 4]; 4]),
}

impl From<Matrix4<f32>> for UniformVariable {
    fn from(m: Matrix4<f32>) -> Self {
        UniformVariable::Matrix4f(m.into())
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct VertexAttribute {
    pub location: u32,
    /// Number of floats.
    pub size: u8,
    /// Offset in floats from the start of the vertex.
    pub offset: u8,
}

/// The fixed interpretation of a flat float buffer into vertex attributes.
///
/// Attribute locations are `0` for the position, then the colour (if any),
/// then the texture coordinate.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum VertexLayout {
    /// `x, y, z`
    Position,
    /// `x, y, z, u, v`
    PositionTexcoord,
    /// `x, y, z, r, g, b, u, v`
    PositionColorTexcoord,
}

const POSITION: [VertexAttribute; 1] = [VertexAttribute {
    location: 0,
    size: 3,
    offset: 0,
}];

const POSITION_TEXCOORD: [VertexAttribute; 2] = [
    VertexAttribute {
        location: 0,
        size: 3,
        offset: 0,
    },
    VertexAttribute {
        location: 1,
        size: 2,
        offset: 3,
    },
];

const POSITION_COLOR_TEXCOORD: [VertexAttribute; 3] = [
    VertexAttribute {
        location: 0,
        size: 3,
        offset: 0,
    },
    VertexAttribute {
        location: 1,
        size: 3,
        offset: 3,
    },
    VertexAttribute {
        location: 2,
        size: 2,
        offset: 6,
    },
];

impl VertexLayout {
    /// Number of floats per vertex.
    pub fn stride(self) -> usize {
        match self {
            VertexLayout::Position => 3,
            VertexLayout::PositionTexcoord => 5,
            VertexLayout::PositionColorTexcoord => 8,
        }
    }

    pub fn attributes(self) -> &'static [VertexAttribute] {
        match self {
            VertexLayout::Position => &POSITION,
            VertexLayout::PositionTexcoord => &POSITION_TEXCOORD,
            VertexLayout::PositionColorTexcoord => &POSITION_COLOR_TEXCOORD,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TextureWrap {
    Repeat,
    Clamp,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TextureFilter {
    Nearest,
    Linear,
}

/// How a RGBA8 texture is sampled once uploaded.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TextureParams {
    pub dimensions: Vector2<u32>,
    pub wrap: TextureWrap,
    pub filter: TextureFilter,
    pub mipmap: bool,
}

impl Default for TextureParams {
    fn default() -> Self {
        TextureParams {
            dimensions: Vector2::new(0, 0),
            wrap: TextureWrap::Repeat,
            filter: TextureFilter::Nearest,
            mipmap: true,
        }
    }
}

/// Which part of a mesh a draw call consumes.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum MeshIndex {
    /// Non-indexed triangles, with the number of vertices.
    Arrays(u32),
    /// Indexed triangles, with the number of indices.
    Elements(u32),
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DrawCall {
    /// Bound to texture unit 0, or unbinds the unit when `None`.
    pub texture: Option<TextureHandle>,
    pub wireframe: bool,
    pub index: MeshIndex,
}

struct VideoState {
    visitor: Option<Box<dyn Visitor>>,
    shaders: HandlePool,
    meshes: HandlePool,
    textures: HandlePool,
}

/// The shared entry point to the video backend.
#[derive(Clone)]
pub struct VideoContext {
    state: Rc<RefCell<VideoState>>,
}

impl VideoContext {
    pub fn new(visitor: Box<dyn Visitor>) -> Self {
        let state = VideoState {
            visitor: Some(visitor),
            shaders: HandlePool::new(),
            meshes: HandlePool::new(),
            textures: HandlePool::new(),
        };

        VideoContext {
            state: Rc::new(RefCell::new(state)),
        }
    }

    /// Creates a context over the headless backend, which compiles nothing
    /// and draws nothing.
    pub fn headless() -> Self {
        Self::new(Box::new(HeadlessVisitor::new()))
    }

    /// Creates a headless context that reports every backend call to `recorder`.
    pub fn headless_with(recorder: Recorder) -> Self {
        Self::new(Box::new(HeadlessVisitor::with_recorder(recorder)))
    }

    /// Detaches the backend. Resources released afterwards are silently
    /// dropped, every other operation fails.
    pub(crate) fn discard(&self) {
        self.state.borrow_mut().visitor = None;
    }

    pub fn is_discarded(&self) -> bool {
        self.state.borrow().visitor.is_none()
    }

    fn visit<T, F>(&self, func: F) -> Result<T>
    where
        F: FnOnce(&mut dyn Visitor) -> Result<T>,
    {
        let mut state = self.state.borrow_mut();
        match state.visitor.as_mut() {
            Some(visitor) => func(visitor.as_mut()),
            None => Err(Error::Window(
                "the video context has been discarded.".to_owned(),
            )),
        }
    }

    /// Returns the version string reported by the driver.
    pub fn version(&self) -> Result<String> {
        self.visit(|v| unsafe { Ok(v.version()) })
    }

    pub fn clear(&self, color: Option<Color>, depth: bool) -> Result<()> {
        self.visit(|v| unsafe { v.clear(color, depth) })
    }

    pub fn set_viewport(&self, dimensions: Vector2<u32>) -> Result<()> {
        self.visit(|v| unsafe { v.set_viewport(dimensions) })
    }

    pub(crate) fn create_shader(&self, sources: &[ShaderSource]) -> Result<ShaderHandle> {
        let handle = self.state.borrow_mut().shaders.create();
        match self.visit(|v| unsafe { v.create_shader(handle, sources) }) {
            Ok(()) => Ok(handle),
            Err(err) => {
                self.state.borrow_mut().shaders.free(handle);
                Err(err)
            }
        }
    }

    pub(crate) fn delete_shader(&self, handle: ShaderHandle) -> Result<()> {
        let mut state = self.state.borrow_mut();
        if !state.shaders.free(handle) {
            return Err(Error::ShaderHandleInvalid(handle));
        }

        match state.visitor.as_mut() {
            Some(visitor) => unsafe { visitor.delete_shader(handle) },
            None => Ok(()),
        }
    }

    pub(crate) fn bind_shader(&self, handle: ShaderHandle) -> Result<()> {
        self.visit(|v| unsafe { v.bind_shader(handle) })
    }

    pub(crate) fn update_uniform(
        &self,
        handle: ShaderHandle,
        name: &str,
        variable: UniformVariable,
    ) -> Result<()> {
        self.visit(|v| unsafe { v.update_uniform(handle, name, variable) })
    }

    pub(crate) fn create_texture(
        &self,
        params: TextureParams,
        pixels: &[u8],
    ) -> Result<TextureHandle> {
        let handle = self.state.borrow_mut().textures.create();
        match self.visit(|v| unsafe { v.create_texture(handle, params, pixels) }) {
            Ok(()) => Ok(handle),
            Err(err) => {
                self.state.borrow_mut().textures.free(handle);
                Err(err)
            }
        }
    }

    pub(crate) fn delete_texture(&self, handle: TextureHandle) -> Result<()> {
        let mut state = self.state.borrow_mut();
        if !state.textures.free(handle) {
            return Err(Error::TextureHandleInvalid(handle));
        }

        match state.visitor.as_mut() {
            Some(visitor) => unsafe { visitor.delete_texture(handle) },
            None => Ok(()),
        }
    }

    pub(crate) fn create_mesh(&self) -> Result<MeshHandle> {
        let handle = self.state.borrow_mut().meshes.create();
        match self.visit(|v| unsafe { v.create_mesh(handle) }) {
            Ok(()) => Ok(handle),
            Err(err) => {
                self.state.borrow_mut().meshes.free(handle);
                Err(err)
            }
        }
    }

    pub(crate) fn update_vertex_buffer(
        &self,
        handle: MeshHandle,
        layout: VertexLayout,
        vertices: &[f32],
    ) -> Result<()> {
        self.visit(|v| unsafe { v.update_vertex_buffer(handle, layout, vertices) })
    }

    pub(crate) fn update_index_buffer(&self, handle: MeshHandle, indices: &[u32]) -> Result<()> {
        self.visit(|v| unsafe { v.update_index_buffer(handle, indices) })
    }

    pub(crate) fn delete_mesh(&self, handle: MeshHandle) -> Result<()> {
        let mut state = self.state.borrow_mut();
        if !state.meshes.free(handle) {
            return Err(Error::MeshHandleInvalid(handle));
        }

        match state.visitor.as_mut() {
            Some(visitor) => unsafe { visitor.delete_mesh(handle) },
            None => Ok(()),
        }
    }

    pub(crate) fn draw(&self, mesh: MeshHandle, dc: DrawCall) -> Result<u32> {
        self.visit(|v| unsafe { v.draw(mesh, dc) })
    }
}
