use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::convert::FromWasmAbi;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    self, Element, EventTarget, HtmlCanvasElement, KeyboardEvent, MouseEvent, Node,
    WebGl2RenderingContext, Window,
};

use crate::errors::*;
use crate::input::InputEvent;
use crate::math::Vector2;
use crate::video::backends::webgl::visitor::WebGLVisitor;
use crate::video::backends::Visitor as VideoVisitor;
use crate::window::events::Event;
use crate::window::WindowParams;

use super::super::Visitor;
use super::types;

type EventBuffer = Rc<RefCell<Vec<Event>>>;

fn dom(what: &str) -> Error {
    Error::Window(format!("failed to {}.", what))
}

fn listen<E>(
    target: &EventTarget,
    name: &str,
    closure: Box<dyn FnMut(E)>,
) -> Result<Closure<dyn FnMut(E)>>
where
    E: FromWasmAbi + 'static,
{
    let closure = Closure::wrap(closure);
    target
        .add_event_listener_with_callback(name, closure.as_ref().unchecked_ref())
        .map_err(|_| dom("add an event listener"))?;
    Ok(closure)
}

#[allow(dead_code)]
pub struct WebVisitor {
    window: Window,
    canvas: HtmlCanvasElement,
    ctx: WebGl2RenderingContext,
    events: EventBuffer,
    on_mouse_move: Closure<dyn FnMut(MouseEvent)>,
    on_key_down: Closure<dyn FnMut(KeyboardEvent)>,
    on_key_up: Closure<dyn FnMut(KeyboardEvent)>,
}

impl WebVisitor {
    /// Appends a titled canvas to the document body and creates a WebGL2
    /// context on it.
    pub fn new(params: &WindowParams) -> Result<Self> {
        let window = web_sys::window().ok_or_else(|| dom("find the global `window`"))?;
        let document = window
            .document()
            .ok_or_else(|| dom("find the document"))?;
        let body = document.body().ok_or_else(|| dom("find the body"))?;

        let header = document
            .create_element("p")
            .map_err(|_| dom("create the title"))?;
        header.set_inner_html(&params.title);
        AsRef::<Node>::as_ref(&body)
            .append_child(header.as_ref())
            .map_err(|_| dom("append the title"))?;

        let canvas = document
            .create_element("canvas")
            .map_err(|_| dom("create the canvas"))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| dom("create the canvas"))?;

        {
            let element = canvas.unchecked_ref::<Element>();
            element
                .set_attribute("id", "canvas")
                .map_err(|_| dom("set the canvas id"))?;
            // Keyboard events are only delivered to focusable elements.
            element
                .set_attribute("tabindex", "0")
                .map_err(|_| dom("make the canvas focusable"))?;
        }

        AsRef::<Node>::as_ref(&body)
            .append_child(canvas.as_ref())
            .map_err(|_| dom("append the canvas"))?;

        let ctx = canvas
            .get_context("webgl2")
            .map_err(|_| dom("query a webgl2 context"))?
            .ok_or_else(|| Error::Window("WebGL2 is not supported.".to_owned()))?
            .dyn_into::<WebGl2RenderingContext>()
            .map_err(|_| dom("query a webgl2 context"))?;

        let events: EventBuffer = Rc::new(RefCell::new(Vec::new()));
        let target = canvas.unchecked_ref::<EventTarget>();

        let on_mouse_move = {
            let clone = events.clone();
            let window = window.clone();
            let canvas = canvas.clone();
            listen(
                target,
                "mousemove",
                Box::new(move |v: MouseEvent| {
                    let dpr = window.device_pixel_ratio() as f32;
                    let height = canvas.height() as f32 / dpr;
                    let position = (v.offset_x() as f32, height - v.offset_y() as f32);

                    let evt = Event::InputDevice(InputEvent::MouseMoved { position });
                    clone.borrow_mut().push(evt);
                }),
            )?
        };

        let on_key_down = {
            let clone = events.clone();
            listen(
                target,
                "keydown",
                Box::new(move |v: KeyboardEvent| {
                    if let Some(key) = types::from_virtual_key_code(&v.key()) {
                        let evt = Event::InputDevice(InputEvent::KeyboardPressed { key });
                        clone.borrow_mut().push(evt);
                    }
                }),
            )?
        };

        let on_key_up = {
            let clone = events.clone();
            listen(
                target,
                "keyup",
                Box::new(move |v: KeyboardEvent| {
                    if let Some(key) = types::from_virtual_key_code(&v.key()) {
                        let evt = Event::InputDevice(InputEvent::KeyboardReleased { key });
                        clone.borrow_mut().push(evt);
                    }
                }),
            )?
        };

        let visitor = WebVisitor {
            window,
            canvas,
            ctx,
            events,
            on_mouse_move,
            on_key_down,
            on_key_up,
        };

        let dpr = visitor.device_pixel_ratio();
        let dims = Vector2::new(
            (params.size.x as f32 * dpr) as u32,
            (params.size.y as f32 * dpr) as u32,
        );

        visitor.resize(dims);
        Ok(visitor)
    }
}

impl Visitor for WebVisitor {
    #[inline]
    fn dimensions(&self) -> Vector2<u32> {
        let dpr = self.device_pixel_ratio();
        Vector2::new(
            (self.canvas.width() as f32 / dpr) as u32,
            (self.canvas.height() as f32 / dpr) as u32,
        )
    }

    #[inline]
    fn device_pixel_ratio(&self) -> f32 {
        self.window.device_pixel_ratio() as f32
    }

    fn resize(&self, dims: Vector2<u32>) {
        self.canvas.set_width(dims.x);
        self.canvas.set_height(dims.y);

        let dpr = self.device_pixel_ratio();
        let style = format!(
            "width: {}px; height: {}px;",
            (dims.x as f32 / dpr) as u32,
            (dims.y as f32 / dpr) as u32
        );

        if self
            .canvas
            .unchecked_ref::<Element>()
            .set_attribute("style", &style)
            .is_err()
        {
            warn!("Failed to resize the canvas to {:?}.", dims);
        }
    }

    #[inline]
    fn poll_events(&mut self, v: &mut Vec<Event>) {
        v.extend(self.events.borrow_mut().drain(..));
    }

    #[inline]
    fn make_current(&self) -> Result<()> {
        Ok(())
    }

    #[inline]
    fn swap_buffers(&self) -> Result<()> {
        Ok(())
    }

    fn create_video(&self) -> Result<Box<dyn VideoVisitor>> {
        let visitor = unsafe { WebGLVisitor::new(self.ctx.clone())? };
        Ok(Box::new(visitor))
    }
}
