use crate::input::InputEvent;

/// The status of the window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WindowEvent {
    /// The close button has been pressed.
    Closed,
    /// The size of window has changed, in points.
    Resized(u32, u32),
}

/// The enumerations of all events that come from the platform window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Event {
    Window(WindowEvent),
    InputDevice(InputEvent),
}
