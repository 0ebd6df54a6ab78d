//! Party music.
//!
//! The arm pose picks one of two tracks.  Actual decoding and mixing happen
//! on kira's own audio thread; this side only issues start/stop commands and
//! polls whether something is still playing.

use std::path::{Path, PathBuf};

use kira::manager::backend::DefaultBackend;
use kira::manager::{AudioManager, AudioManagerSettings};
use kira::sound::streaming::{StreamingSoundData, StreamingSoundHandle};
use kira::sound::{FromFileError, PlaybackState};
use kira::tween::Tween;
use log::{debug, info, warn};

use crate::error::AudioError;

// ════════════════════════════════════════════════════════════════════════════
// Track selection
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Track {
    /// Right (red flag) arm above the left.
    A,
    /// Left (blue flag) arm above the right.
    B,
}

/// Pick the track for the current shoulder angles; `None` when level.
pub fn select_track(left_angle: f32, right_angle: f32) -> Option<Track> {
    if right_angle > left_angle {
        Some(Track::A)
    } else if left_angle > right_angle {
        Some(Track::B)
    } else {
        None
    }
}

/// File locations for the two tracks.
#[derive(Clone, Debug, PartialEq)]
pub struct Playlist {
    pub track_a: PathBuf,
    pub track_b: PathBuf,
}

impl Playlist {
    pub fn path(&self, track: Track) -> &Path {
        match track {
            Track::A => &self.track_a,
            Track::B => &self.track_b,
        }
    }
}

impl Default for Playlist {
    fn default() -> Self {
        Playlist {
            track_a: PathBuf::from("music/music_1.mp3"),
            track_b: PathBuf::from("music/music_2.mp3"),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// AudioOutput: kira, or silence
// ════════════════════════════════════════════════════════════════════════════

/// The audio subsystem as seen from the viewer.
pub trait AudioOutput {
    /// Open and stage a track.  Whatever is currently playing is untouched.
    fn load(&mut self, path: &Path) -> Result<(), AudioError>;
    /// Start the staged track.
    fn play(&mut self) -> Result<(), AudioError>;
    fn stop(&mut self);
    fn is_playing(&self) -> bool;
}

impl<O: AudioOutput + ?Sized> AudioOutput for Box<O> {
    fn load(&mut self, path: &Path) -> Result<(), AudioError> { (**self).load(path) }
    fn play(&mut self) -> Result<(), AudioError> { (**self).play() }
    fn stop(&mut self) { (**self).stop() }
    fn is_playing(&self) -> bool { (**self).is_playing() }
}

// ── kira backend ──────────────────────────────────────────────────────────

pub struct KiraOutput {
    manager: AudioManager<DefaultBackend>,
    staged:  Option<StreamingSoundData<FromFileError>>,
    handle:  Option<StreamingSoundHandle<FromFileError>>,
}

impl KiraOutput {
    pub fn new() -> Result<Self, AudioError> {
        let manager = AudioManager::<DefaultBackend>::new(AudioManagerSettings::default())
            .map_err(|e| AudioError::Device(format!("{:?}", e)))?;
        Ok(KiraOutput { manager, staged: None, handle: None })
    }
}

impl AudioOutput for KiraOutput {
    fn load(&mut self, path: &Path) -> Result<(), AudioError> {
        let data = StreamingSoundData::from_file(path).map_err(|e| AudioError::Load {
            path:   path.to_path_buf(),
            reason: e.to_string(),
        })?;
        self.staged = Some(data);
        Ok(())
    }

    fn play(&mut self) -> Result<(), AudioError> {
        let Some(data) = self.staged.take() else {
            return Err(AudioError::Play("no track loaded".to_string()));
        };
        let handle = self.manager.play(data).map_err(|e| AudioError::Play(format!("{:?}", e)))?;
        self.handle = Some(handle);
        Ok(())
    }

    fn stop(&mut self) {
        if let Some(mut handle) = self.handle.take() {
            handle.stop(Tween::default());
        }
    }

    fn is_playing(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| h.state() == PlaybackState::Playing)
    }
}

// ── null backend (used when no audio device is available) ─────────────────

/// Silent output that still honours the load/play/stop bookkeeping.
#[derive(Debug, Default)]
pub struct NullOutput {
    staged:  bool,
    playing: bool,
}

impl AudioOutput for NullOutput {
    fn load(&mut self, _path: &Path) -> Result<(), AudioError> {
        self.staged = true;
        Ok(())
    }

    fn play(&mut self) -> Result<(), AudioError> {
        self.playing = std::mem::take(&mut self.staged);
        Ok(())
    }

    fn stop(&mut self) { self.playing = false; }

    fn is_playing(&self) -> bool { self.playing }
}

/// Open the default audio device, falling back to [`NullOutput`] with a
/// warning when there is none or `mute` is set.
pub fn open_audio_output(mute: bool) -> Box<dyn AudioOutput> {
    if mute {
        info!("audio muted");
        return Box::new(NullOutput::default());
    }
    match KiraOutput::new() {
        Ok(out) => Box::new(out),
        Err(e) => {
            warn!("{}, continuing without sound", e);
            Box::new(NullOutput::default())
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Jukebox: playback rules on top of an AudioOutput
// ════════════════════════════════════════════════════════════════════════════

/// Remembers which file is loaded and keeps repeated requests from
/// restarting it.
pub struct Jukebox<O> {
    output:  O,
    current: Option<PathBuf>,
}

impl<O: AudioOutput> Jukebox<O> {
    pub fn new(output: O) -> Self {
        Jukebox { output, current: None }
    }

    /// Make `path` the playing track.
    ///
    /// Already loaded and still playing: nothing happens.  Otherwise the new
    /// file is loaded first; only once that succeeds is the old track stopped
    /// and the new one started.  On a load error the previous playback is
    /// left exactly as it was.
    pub fn play(&mut self, path: &Path) -> Result<(), AudioError> {
        if self.current.as_deref() == Some(path) && self.output.is_playing() {
            return Ok(());
        }

        self.output.load(path)?;
        self.output.stop();
        self.current = None;
        self.output.play()?;
        self.current = Some(path.to_path_buf());
        debug!("music: now playing {}", path.display());
        Ok(())
    }

    pub fn stop(&mut self) {
        if self.current.take().is_some() {
            debug!("music: stopped");
        }
        self.output.stop();
    }

    pub fn current(&self) -> Option<&Path> { self.current.as_deref() }

    pub fn is_playing(&self) -> bool { self.output.is_playing() }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
