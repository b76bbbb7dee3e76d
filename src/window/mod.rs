//! Represents an OpenGL context and the window or environment around it.
//!
//! A `Window` owns the platform window, the `VideoContext` drawing into it
//! and exactly one `Scene`. Input is routed synchronously in `poll_events`:
//! Escape requests close, F10 toggles wireframe, and the remaining keys and
//! cursor movement drive the free-look camera.

pub mod backends;
pub mod controller;
pub mod events;

pub use self::backends::headless::EventQueue;
pub use self::controller::FreeLook;
pub use self::events::{Event, WindowEvent};

use crate::errors::*;
use crate::input::{InputEvent, Key};
use crate::math::Vector2;
use crate::sys;
use crate::utils::Timestamp;
use crate::video::backends::headless::Recorder;
use crate::video::{Scene, VideoContext};

use self::backends::headless::HeadlessVisitor;
use self::backends::Visitor;

/// Movement and mouse-look parameters of the free-look camera.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraParams {
    /// Distance travelled per frame while a movement key is held.
    pub speed: f32,
    /// Degrees turned per pixel of cursor movement. Adjustable at runtime
    /// within (0, 1], this is the value it resets to.
    pub sensitivity: f32,
    /// Initial yaw in degrees, -90 looks down the negative z axis.
    pub yaw: f32,
    /// Initial pitch in degrees.
    pub pitch: f32,
    /// Captures and hides the cursor on native platforms.
    pub grab_cursor: bool,
}

impl Default for CameraParams {
    fn default() -> Self {
        CameraParams {
            speed: 0.05,
            sensitivity: 0.1,
            yaw: -90.0,
            pitch: 0.0,
            grab_cursor: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowParams {
    /// Sets the title of window.
    pub title: String,
    /// Sets the size in *points* of the client area of the window.
    pub size: Vector2<u32>,
    /// Sets the multisampling level to request. A value of 0 indicates that
    /// multisampling must not be enabled.
    pub multisample: u16,
    /// Specifies whether should we have vsync.
    pub vsync: bool,
    pub camera: CameraParams,
}

impl Default for WindowParams {
    fn default() -> Self {
        WindowParams {
            title: "OpenVoxel".to_owned(),
            size: Vector2::new(800, 600),
            multisample: 2,
            vsync: true,
            camera: CameraParams::default(),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum WindowState {
    Open,
    /// The close button or Escape has been pressed. The frame in flight may
    /// still be presented.
    CloseRequested,
}

pub struct Window {
    visitor: Box<dyn Visitor>,
    video: VideoContext,
    scene: Scene,
    controller: FreeLook,
    dimensions: Vector2<u32>,
    state: WindowState,
    events: Vec<Event>,
    created: Timestamp,
    closed: bool,
}

impl Window {
    /// Opens a window with default parameters besides its size and title.
    pub fn new<T: Into<String>>(width: u32, height: u32, title: T) -> Result<Self> {
        let params = WindowParams {
            title: title.into(),
            size: Vector2::new(width, height),
            ..WindowParams::default()
        };

        Self::from_params(params)
    }

    /// Opens a window with a current GL 3.3 core context, or a WebGL2
    /// canvas in the browser.
    pub fn from_params(params: WindowParams) -> Result<Self> {
        let visitor = backends::new(&params).map_err(into_window_error)?;
        Self::with_visitor(params, visitor)
    }

    /// Creates a window without a screen, see `headless_with`.
    pub fn headless(params: WindowParams) -> Result<Self> {
        Self::headless_with(params, EventQueue::new(), Recorder::new())
    }

    /// Creates a window without a screen, which receives the events pushed to
    /// `events` and reports its video calls to `recorder`.
    pub fn headless_with(
        params: WindowParams,
        events: EventQueue,
        recorder: Recorder,
    ) -> Result<Self> {
        let visitor = Box::new(HeadlessVisitor::new(&params, events, recorder));
        Self::with_visitor(params, visitor)
    }

    fn with_visitor(params: WindowParams, visitor: Box<dyn Visitor>) -> Result<Self> {
        let video = Self::create_video(visitor.as_ref()).map_err(into_window_error)?;
        let dimensions = visitor.dimensions();

        info!(
            "Window \"{}\" ({}x{}) is running on {}.",
            params.title,
            dimensions.x,
            dimensions.y,
            video.version().unwrap_or_else(|_| "unknown".to_owned())
        );

        Ok(Window {
            scene: Scene::new(&video),
            controller: FreeLook::new(params.camera),
            visitor,
            video,
            dimensions,
            state: WindowState::Open,
            events: Vec::new(),
            created: Timestamp::now(),
            closed: false,
        })
    }

    fn create_video(visitor: &dyn Visitor) -> Result<VideoContext> {
        visitor.make_current()?;
        let video = VideoContext::new(visitor.create_video()?);
        video.set_viewport(physical(visitor.dimensions(), visitor.device_pixel_ratio()))?;
        Ok(video)
    }

    /// Pumps the platform event queue once and handles every event, then
    /// moves the camera by the held keys.
    pub fn poll_events(&mut self) -> Result<()> {
        let mut events = std::mem::replace(&mut self.events, Vec::new());
        self.visitor.poll_events(&mut events);

        for v in events.drain(..) {
            self.handle(v)?;
        }

        self.events = events;
        self.controller.update(self.scene.camera_mut());
        Ok(())
    }

    fn handle(&mut self, event: Event) -> Result<()> {
        match event {
            Event::Window(WindowEvent::Closed) => self.request_close(),

            Event::Window(WindowEvent::Resized(width, height)) => {
                self.dimensions = Vector2::new(width, height);
                let dims = physical(self.dimensions, self.visitor.device_pixel_ratio());
                self.visitor.resize(dims);
                self.video.set_viewport(dims)?;
                debug!("Window resized to {}x{}.", width, height);
            }

            Event::InputDevice(InputEvent::KeyboardPressed { key }) => {
                if !self.controller.key_pressed(key) {
                    return Ok(());
                }

                match key {
                    Key::Escape => {
                        info!("ESC key pressed. Exiting...");
                        self.request_close();
                    }
                    Key::F10 => {
                        let wireframe = self.scene.toggle_wireframe();
                        info!("F10 key pressed. Wireframe mode {}.", wireframe);
                    }
                    _ => {}
                }
            }

            Event::InputDevice(InputEvent::KeyboardReleased { key }) => {
                self.controller.key_released(key);
            }

            Event::InputDevice(InputEvent::MouseMoved { position }) => {
                let position = Vector2::new(position.0, position.1);
                self.controller
                    .cursor_moved(position, self.scene.camera_mut());
            }
        }

        Ok(())
    }

    pub fn request_close(&mut self) {
        self.state = WindowState::CloseRequested;
    }

    #[inline]
    pub fn should_close(&self) -> bool {
        self.state == WindowState::CloseRequested
    }

    #[inline]
    pub fn state(&self) -> WindowState {
        self.state
    }

    /// Presents the back buffer.
    pub fn swap_buffers(&self) -> Result<()> {
        self.visitor.swap_buffers()
    }

    /// Tears down the window. Shaders, textures and scenes that outlive it
    /// release nothing when dropped.
    pub fn close(mut self) {
        self.teardown();
    }

    fn teardown(&mut self) {
        if self.closed {
            return;
        }

        self.video.discard();
        self.closed = true;
        info!("Window closed after {:.2}s.", self.time());
    }

    #[inline]
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    #[inline]
    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    #[inline]
    pub fn video(&self) -> &VideoContext {
        &self.video
    }

    #[inline]
    pub fn controller(&self) -> &FreeLook {
        &self.controller
    }

    /// Returns the size in *points* of the client area of the window.
    #[inline]
    pub fn dimensions(&self) -> Vector2<u32> {
        self.dimensions
    }

    /// Seconds elapsed since the window was created.
    pub fn time(&self) -> f64 {
        self.created.elapsed().as_secs_f64()
    }

    /// Returns the version string reported by the video backend.
    pub fn version(&self) -> Result<String> {
        self.video.version()
    }
}

impl Drop for Window {
    fn drop(&mut self) {
        if !self.closed {
            warn!("Window dropped without being closed.");
            self.teardown();
        }
    }
}

fn physical(dimensions: Vector2<u32>, dpr: f32) -> Vector2<u32> {
    Vector2::new(
        (dimensions.x as f32 * dpr) as u32,
        (dimensions.y as f32 * dpr) as u32,
    )
}

fn into_window_error(err: Error) -> Error {
    match err {
        Error::Window(_) => err,
        _ => Error::Window(err.to_string()),
    }
}

/// Drives `frame` once per displayed frame until the window is asked to
/// close, then closes it.
///
/// Every iteration polls events, checks for close, calls `frame` and
/// presents. Natively this blocks until the loop ends. In the browser it
/// schedules the loop with `requestAnimationFrame` and returns immediately.
pub fn run<F>(window: Window, mut frame: F) -> Result<()>
where
    F: FnMut(&mut Window) -> Result<()> + 'static,
{
    let mut window = Some(window);
    sys::run_forever(move || {
        let result = match window.as_mut() {
            Some(w) => advance(w, &mut frame),
            None => return Ok(false),
        };

        match result {
            Ok(true) => Ok(true),
            done => {
                if let Some(w) = window.take() {
                    w.close();
                }

                done
            }
        }
    })
}

fn advance<F>(window: &mut Window, frame: &mut F) -> Result<bool>
where
    F: FnMut(&mut Window) -> Result<()>,
{
    window.poll_events()?;
    if window.should_close() {
        return Ok(false);
    }

    frame(window)?;
    window.swap_buffers()?;
    Ok(true)
}
