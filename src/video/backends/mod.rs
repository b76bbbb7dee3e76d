//! The backend of renderer, which should be responsible for only one thing:
//! submitting draw-calls using low-level OpenGL video APIs.

pub mod headless;
mod utils;

use crate::errors::*;
use crate::math::{Color, Vector2};

use super::{
    DrawCall, MeshHandle, ShaderHandle, ShaderSource, TextureHandle, TextureParams,
    UniformVariable, VertexLayout,
};

pub trait Visitor {
    /// Returns a human readable description of the driver.
    unsafe fn version(&self) -> String;

    /// Compiles every stage of `sources`, links them into one program and
    /// releases the intermediate stage objects. Nothing is retained on failure.
    unsafe fn create_shader(&mut self, handle: ShaderHandle, sources: &[ShaderSource])
        -> Result<()>;

    unsafe fn delete_shader(&mut self, handle: ShaderHandle) -> Result<()>;

    unsafe fn bind_shader(&mut self, handle: ShaderHandle) -> Result<()>;

    /// Uploads a uniform to the program, binding it first if necessary.
    unsafe fn update_uniform(
        &mut self,
        handle: ShaderHandle,
        name: &str,
        variable: UniformVariable,
    ) -> Result<()>;

    unsafe fn create_texture(
        &mut self,
        handle: TextureHandle,
        params: TextureParams,
        pixels: &[u8],
    ) -> Result<()>;

    unsafe fn delete_texture(&mut self, handle: TextureHandle) -> Result<()>;

    unsafe fn create_mesh(&mut self, handle: MeshHandle) -> Result<()>;

    /// Replaces the vertex buffer and configures its attributes.
    unsafe fn update_vertex_buffer(
        &mut self,
        handle: MeshHandle,
        layout: VertexLayout,
        vertices: &[f32],
    ) -> Result<()>;

    /// Replaces the index buffer.
    unsafe fn update_index_buffer(&mut self, handle: MeshHandle, indices: &[u32]) -> Result<()>;

    unsafe fn delete_mesh(&mut self, handle: MeshHandle) -> Result<()>;

    /// Clears the color buffer if `color` is given. With `depth`, depth testing
    /// is enabled and the depth buffer is cleared too; without, depth testing
    /// is disabled.
    unsafe fn clear(&mut self, color: Option<Color>, depth: bool) -> Result<()>;

    unsafe fn set_viewport(&mut self, dimensions: Vector2<u32>) -> Result<()>;

    /// Draws triangles with the currently bound program, returns the number
    /// of vertices submitted.
    unsafe fn draw(&mut self, mesh: MeshHandle, dc: DrawCall) -> Result<u32>;
}

#[cfg(not(target_arch = "wasm32"))]
pub mod gl;

#[cfg(target_arch = "wasm32")]
pub mod webgl;
