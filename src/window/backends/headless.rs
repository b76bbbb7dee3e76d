//! A window without a screen. Events are fed through an `EventQueue` and
//! rendering goes to the headless video backend.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::errors::*;
use crate::input::{InputEvent, Key};
use crate::math::Vector2;
use crate::video::backends::headless::{HeadlessVisitor as HeadlessVideo, Recorder};
use crate::video::backends::Visitor as VideoVisitor;

use super::super::events::{Event, WindowEvent};
use super::super::WindowParams;
use super::Visitor;

/// A shared queue of events, delivered on the next `poll_events`.
#[derive(Debug, Clone, Default)]
pub struct EventQueue {
    events: Rc<RefCell<Vec<Event>>>,
}

impl EventQueue {
    pub fn new() -> Self {
        EventQueue::default()
    }

    pub fn push(&self, event: Event) {
        self.events.borrow_mut().push(event);
    }

    pub fn press(&self, key: Key) {
        self.push(Event::InputDevice(InputEvent::KeyboardPressed { key }));
    }

    pub fn release(&self, key: Key) {
        self.push(Event::InputDevice(InputEvent::KeyboardReleased { key }));
    }

    /// Presses and releases `key`.
    pub fn tap(&self, key: Key) {
        self.press(key);
        self.release(key);
    }

    pub fn move_cursor(&self, x: f32, y: f32) {
        self.push(Event::InputDevice(InputEvent::MouseMoved { position: (x, y) }));
    }

    pub fn resize(&self, width: u32, height: u32) {
        self.push(Event::Window(WindowEvent::Resized(width, height)));
    }

    pub fn close(&self) {
        self.push(Event::Window(WindowEvent::Closed));
    }

    pub fn len(&self) -> usize {
        self.events.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }

    fn drain_into(&self, events: &mut Vec<Event>) {
        events.extend(self.events.borrow_mut().drain(..));
    }
}

pub struct HeadlessVisitor {
    dimensions: Cell<Vector2<u32>>,
    events: EventQueue,
    recorder: Recorder,
}

impl HeadlessVisitor {
    pub fn new(params: &WindowParams, events: EventQueue, recorder: Recorder) -> Self {
        HeadlessVisitor {
            dimensions: Cell::new(params.size),
            events,
            recorder,
        }
    }
}

impl Visitor for HeadlessVisitor {
    #[inline]
    fn dimensions(&self) -> Vector2<u32> {
        self.dimensions.get()
    }

    #[inline]
    fn device_pixel_ratio(&self) -> f32 {
        1.0
    }

    #[inline]
    fn resize(&self, dimensions: Vector2<u32>) {
        self.dimensions.set(dimensions);
    }

    #[inline]
    fn poll_events(&mut self, events: &mut Vec<Event>) {
        self.events.drain_into(events);
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
        Ok(Box::new(HeadlessVideo::with_recorder(self.recorder.clone())))
    }
}
