use super::keyboard::Key;

/// Input device event, supports cursor movement and keyboard only.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// The cursor has moved on the window.
    /// The parameter are the (x, y) coords in pixels relative to the bottom-left
    /// corner of the window.
    MouseMoved { position: (f32, f32) },
    /// Pressed event on keyboard has been received. Held keys may repeat it.
    KeyboardPressed { key: Key },
    /// Released event from keyboard has been received.
    KeyboardReleased { key: Key },
}
