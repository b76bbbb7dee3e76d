pub mod headless;

use crate::errors::*;
use crate::math::Vector2;
use crate::video::backends::Visitor as VideoVisitor;

use super::events::Event;

/// The capabilities a platform window must provide.
pub trait Visitor {
    /// Returns the size in *points* of the client area of the window.
    fn dimensions(&self) -> Vector2<u32>;
    /// Returns the ratio between the backing framebuffer resolution and the
    /// window size in screen pixels.
    fn device_pixel_ratio(&self) -> f32;
    /// Resizes the framebuffer, in pixels.
    fn resize(&self, dimensions: Vector2<u32>);
    fn poll_events(&mut self, events: &mut Vec<Event>);
    fn make_current(&self) -> Result<()>;
    fn swap_buffers(&self) -> Result<()>;
    /// Creates the video backend drawing into this window.
    fn create_video(&self) -> Result<Box<dyn VideoVisitor>>;
}

#[cfg(not(target_arch = "wasm32"))]
mod glutin;
#[cfg(not(target_arch = "wasm32"))]
pub use self::glutin::new;

#[cfg(target_arch = "wasm32")]
mod web;
#[cfg(target_arch = "wasm32")]
pub use self::web::new;
