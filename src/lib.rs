//! # OpenVoxel
//!
//! A small voxel engine prototype which draws through OpenGL 3.3 on desktop
//! platforms and WebGL2 in the browser, with a headless backend for tests.
//!
//! ```rust,ignore
//! use openvoxel::prelude::*;
//!
//! fn main() -> Result<()> {
//!     openvoxel::sys::init();
//!
//!     let mut window = Window::new(800, 600, "Hello")?;
//!     let mut shader = Shader::new(window.video())
//!         .vertex_shader_file("assets/shaders/triangle.vs")
//!         .fragment_shader_file("assets/shaders/triangle.fs");
//!     shader.link()?;
//!
//!     window
//!         .scene_mut()
//!         .add_vertices(&[-0.5, -0.5, 0.0, 0.5, -0.5, 0.0, 0.0, 0.5, 0.0], VertexLayout::Position)?;
//!
//!     window::run(window, move |w| {
//!         w.scene().clear()?;
//!         w.scene().draw(Some(&shader))
//!     })
//! }
//! ```

#[macro_use]
extern crate log;
#[macro_use]
extern crate failure;
#[macro_use]
extern crate serde;

#[macro_use]
pub mod utils;

pub mod errors;
pub mod input;
pub mod math;
pub mod settings;
pub mod sys;
pub mod video;
pub mod window;

pub mod prelude {
    pub use crate::errors::{Error, Result};
    pub use crate::input::Key;
    pub use crate::math::transform;
    pub use crate::math::{Color, Matrix4, Vector2, Vector3};
    pub use crate::settings::Settings;
    pub use crate::video::{
        Camera, Scene, Shader, Texture, VertexLayout, VideoContext, GLSL_VERSION,
    };
    pub use crate::window::{self, Window, WindowParams};
}
