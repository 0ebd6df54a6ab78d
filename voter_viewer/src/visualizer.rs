//! The `minifb` window: shows the rasterized frame and turns key presses
//! into the characters the rest of the viewer understands.

use std::time::Duration;

use minifb::{Key, KeyRepeat, Window, WindowOptions};

use crate::error::ViewerError;
use crate::raster::Rasterizer;

// ════════════════════════════════════════════════════════════════════════════
// Window constants
// ════════════════════════════════════════════════════════════════════════════

pub const WIN_W: usize = 600;
pub const WIN_H: usize = 600;
pub const TITLE: &str  = "Voter - Ruling Party and Opposition Party :)";

// ════════════════════════════════════════════════════════════════════════════
// Visualizer
// ════════════════════════════════════════════════════════════════════════════

pub struct Visualizer {
    window: Window,
}

impl Visualizer {
    pub fn new() -> Result<Self, ViewerError> {
        let mut window = Window::new(
            TITLE,
            WIN_W, WIN_H,
            WindowOptions {
                resize: false,
                ..WindowOptions::default()
            },
        )?;

        window.limit_update_rate(Some(Duration::from_millis(16))); // ~60fps

        Ok(Visualizer { window })
    }

    pub fn is_open(&self) -> bool { self.window.is_open() }

    /// Characters for every key pressed since the last call, auto-repeat
    /// included, in the order the window reports them.
    pub fn poll_keys(&self) -> Vec<char> {
        self.window
            .get_keys_pressed(KeyRepeat::Yes)
            .into_iter()
            .filter_map(key_char)
            .collect()
    }

    /// Push the finished frame to the screen.
    pub fn present(&mut self, frame: &Rasterizer) -> Result<(), ViewerError> {
        self.window.update_with_buffer(frame.pixels(), frame.width(), frame.height())?;
        Ok(())
    }
}

/// Window keys that stand for a character.  Every one of them reaches the
/// app, meaningful or not, since any key press re-picks the music.
const CHAR_KEYS: [(Key, char); 38] = [
    (Key::A, 'a'), (Key::B, 'b'), (Key::C, 'c'), (Key::D, 'd'), (Key::E, 'e'),
    (Key::F, 'f'), (Key::G, 'g'), (Key::H, 'h'), (Key::I, 'i'), (Key::J, 'j'),
    (Key::K, 'k'), (Key::L, 'l'), (Key::M, 'm'), (Key::N, 'n'), (Key::O, 'o'),
    (Key::P, 'p'), (Key::Q, 'q'), (Key::R, 'r'), (Key::S, 's'), (Key::T, 't'),
    (Key::U, 'u'), (Key::V, 'v'), (Key::W, 'w'), (Key::X, 'x'), (Key::Y, 'y'),
    (Key::Z, 'z'),
    (Key::Key0, '0'), (Key::Key1, '1'), (Key::Key2, '2'), (Key::Key3, '3'),
    (Key::Key4, '4'), (Key::Key5, '5'), (Key::Key6, '6'), (Key::Key7, '7'),
    (Key::Key8, '8'), (Key::Key9, '9'),
    (Key::Space, ' '),
    (Key::Escape, '\u{1b}'),
];

/// The character a window key stands for; `None` for keys without one
/// (function keys, modifiers, arrows).
fn key_char(key: Key) -> Option<char> {
    CHAR_KEYS.iter().find(|(k, _)| *k == key).map(|&(_, c)| c)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controls::Command;

    #[test]
    fn command_keys_are_forwarded() {
        for key in [Key::A, Key::D, Key::W, Key::S, Key::J, Key::Q, Key::Escape] {
            let c = key_char(key).unwrap();
            assert!(Command::from_key(c).is_some(), "{:?}", key);
        }
    }

    #[test]
    fn other_character_keys_are_forwarded_too() {
        assert_eq!(key_char(Key::X), Some('x'));
        assert_eq!(key_char(Key::Key7), Some('7'));
        assert_eq!(key_char(Key::Space), Some(' '));
        assert_eq!(Command::from_key('x'), None);
    }

    #[test]
    fn keys_without_a_character_are_dropped() {
        assert_eq!(key_char(Key::F1), None);
        assert_eq!(key_char(Key::LeftShift), None);
        assert_eq!(key_char(Key::Up), None);
    }

    #[test]
    fn character_table_has_no_duplicates() {
        for (i, (key, c)) in CHAR_KEYS.iter().enumerate() {
            for (other_key, other_c) in &CHAR_KEYS[i + 1..] {
                assert!(key != other_key && c != other_c, "{:?}", key);
            }
        }
    }
}
