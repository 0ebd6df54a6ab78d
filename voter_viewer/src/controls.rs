//! Keyboard commands.
//!
//! The host delivers single characters; this module decides what each one
//! means.  Consumers never see raw window keys.

/// Camera orbit per key press, degrees.
pub const VIEW_STEP_DEG: f32 = 2.0;
/// Shoulder swing per key press, degrees.
pub const ARM_STEP_DEG: f32 = 5.0;

const ESCAPE: char = '\u{1b}';

/// A high-level action requested from the keyboard.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Command {
    /// Orbit the camera about the vertical axis by this many degrees.
    /// Accumulates without bound.
    RotateView(f32),

    /// Left arm by `+delta`, right arm by `-delta`, degrees.
    TiltArms(f32),

    /// Take off, unless already in the air.
    Jump,

    Quit,
}

impl Command {
    /// Map a key character to a command.  Case-insensitive.
    pub fn from_key(key: char) -> Option<Command> {
        match key.to_ascii_lowercase() {
            'a'          => Some(Command::RotateView(-VIEW_STEP_DEG)),
            'd'          => Some(Command::RotateView(VIEW_STEP_DEG)),
            'w'          => Some(Command::TiltArms(ARM_STEP_DEG)),
            's'          => Some(Command::TiltArms(-ARM_STEP_DEG)),
            'j'          => Some(Command::Jump),
            'q' | ESCAPE => Some(Command::Quit),
            _            => None,
        }
    }
}

/// One-line key legend for the status log.
pub const KEY_LEGEND: &str = "A/D=orbit  W/S=wave flags  J=jump  Q/Esc=quit";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arm_keys_are_opposites() {
        assert_eq!(Command::from_key('w'), Some(Command::TiltArms(5.0)));
        assert_eq!(Command::from_key('s'), Some(Command::TiltArms(-5.0)));
    }

    #[test]
    fn view_keys_rotate_two_degrees() {
        assert_eq!(Command::from_key('a'), Some(Command::RotateView(-2.0)));
        assert_eq!(Command::from_key('D'), Some(Command::RotateView(2.0)));
    }

    #[test]
    fn quit_and_jump() {
        assert_eq!(Command::from_key('j'), Some(Command::Jump));
        assert_eq!(Command::from_key('q'), Some(Command::Quit));
        assert_eq!(Command::from_key('\u{1b}'), Some(Command::Quit));
    }

    #[test]
    fn unknown_keys_are_ignored() {
        for k in ['x', ' ', '1', 'é'] {
            assert_eq!(Command::from_key(k), None);
        }
    }
}
