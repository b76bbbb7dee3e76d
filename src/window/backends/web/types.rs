use crate::input::Key;

/// Maps the `KeyboardEvent.key` value to a `Key`.
pub fn from_virtual_key_code(key: &str) -> Option<Key> {
    match key {
        "1" => Some(Key::Key1),
        "2" => Some(Key::Key2),
        "3" => Some(Key::Key3),
        "4" => Some(Key::Key4),
        "5" => Some(Key::Key5),
        "6" => Some(Key::Key6),
        "7" => Some(Key::Key7),
        "8" => Some(Key::Key8),
        "9" => Some(Key::Key9),
        "0" => Some(Key::Key0),
        "A" | "a" => Some(Key::A),
        "B" | "b" => Some(Key::B),
        "C" | "c" => Some(Key::C),
        "D" | "d" => Some(Key::D),
        "E" | "e" => Some(Key::E),
        "F" | "f" => Some(Key::F),
        "G" | "g" => Some(Key::G),
        "H" | "h" => Some(Key::H),
        "I" | "i" => Some(Key::I),
        "J" | "j" => Some(Key::J),
        "K" | "k" => Some(Key::K),
        "L" | "l" => Some(Key::L),
        "M" | "m" => Some(Key::M),
        "N" | "n" => Some(Key::N),
        "O" | "o" => Some(Key::O),
        "P" | "p" => Some(Key::P),
        "Q" | "q" => Some(Key::Q),
        "R" | "r" => Some(Key::R),
        "S" | "s" => Some(Key::S),
        "T" | "t" => Some(Key::T),
        "U" | "u" => Some(Key::U),
        "V" | "v" => Some(Key::V),
        "W" | "w" => Some(Key::W),
        "X" | "x" => Some(Key::X),
        "Y" | "y" => Some(Key::Y),
        "Z" | "z" => Some(Key::Z),
        "Escape" => Some(Key::Escape),
        "F1" => Some(Key::F1),
        "F2" => Some(Key::F2),
        "F3" => Some(Key::F3),
        "F4" => Some(Key::F4),
        "F5" => Some(Key::F5),
        "F6" => Some(Key::F6),
        "F7" => Some(Key::F7),
        "F8" => Some(Key::F8),
        "F9" => Some(Key::F9),
        "F10" => Some(Key::F10),
        "F11" => Some(Key::F11),
        "F12" => Some(Key::F12),
        "ArrowLeft" => Some(Key::Left),
        "ArrowUp" => Some(Key::Up),
        "ArrowRight" => Some(Key::Right),
        "ArrowDown" => Some(Key::Down),
        "Backspace" => Some(Key::Back),
        "Enter" => Some(Key::Return),
        " " => Some(Key::Space),
        "Tab" => Some(Key::Tab),
        "Shift" => Some(Key::LShift),
        "Control" => Some(Key::LControl),
        "=" => Some(Key::Equals),
        "+" => Some(Key::Add),
        "-" => Some(Key::Minus),
        _ => None,
    }
}
