//! Error types for the viewer.

use std::path::PathBuf;

use thiserror::Error;

/// Failures of the audio subsystem.  None of these are fatal to the viewer.
#[derive(Error, Debug)]
pub enum AudioError {
    /// No output device could be opened.
    #[error("audio device unavailable: {0}")]
    Device(String),

    /// The track file is missing or could not be decoded.
    #[error("cannot load track {}: {reason}", .path.display())]
    Load { path: PathBuf, reason: String },

    /// The mixer refused to start the staged track.
    #[error("cannot start playback: {0}")]
    Play(String),
}

/// Errors that end the viewer.
#[derive(Error, Debug)]
pub enum ViewerError {
    #[error("window error: {0}")]
    Window(#[from] minifb::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_error_names_the_file() {
        let err = AudioError::Load {
            path:   PathBuf::from("music/missing.mp3"),
            reason: "not found".to_string(),
        };
        assert_eq!(err.to_string(), "cannot load track music/missing.mp3: not found");
    }
}
