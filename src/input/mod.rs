//! Keyboard and cursor input as delivered by the window backends.

pub mod events;
pub mod keyboard;

pub use self::events::InputEvent;
pub use self::keyboard::Key;
