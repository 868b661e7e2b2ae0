//! Logical playback channel on top of a backend

use super::{AudioBackend, AudioError, SoundHandle};
use std::path::{Path, PathBuf};

/// Binary playback state of a channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    /// Sound is (meant to be) audible
    Playing,
    /// Sound is silent
    Paused,
}

/// One named source with its current backend handle
#[derive(Debug)]
pub struct AudioChannel {
    name: &'static str,
    source: PathBuf,
    looping: bool,
    handle: Option<SoundHandle>,
    state: PlaybackState,
}

impl AudioChannel {
    /// Channel that loops its source until paused
    pub fn looping(name: &'static str, source: impl Into<PathBuf>) -> Self {
        Self::new(name, source.into(), true)
    }

    /// Channel that plays its source once per trigger
    pub fn one_shot(name: &'static str, source: impl Into<PathBuf>) -> Self {
        Self::new(name, source.into(), false)
    }

    fn new(name: &'static str, source: PathBuf, looping: bool) -> Self {
        Self {
            name,
            source,
            looping,
            handle: None,
            state: PlaybackState::Paused,
        }
    }

    /// Channel name used in logs
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Source file
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Current state
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Whether the channel is in the playing state
    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    /// Play, resuming a paused looping sound where it stopped
    ///
    /// The channel enters `Playing` even when the backend rejects the
    /// request; the error is returned for the caller to log.
    pub fn play(&mut self, backend: &mut dyn AudioBackend) -> Result<(), AudioError> {
        self.state = PlaybackState::Playing;
        if let Some(handle) = self.handle.filter(|_| self.looping) {
            match backend.resume(handle) {
                Ok(()) => return Ok(()),
                // Backend lost the sound; fall through and start over
                Err(AudioError::InvalidHandle) => self.handle = None,
                Err(e) => return Err(e),
            }
        }
        self.start_fresh(backend)
    }

    /// Stop whatever is playing and start the source from the beginning
    pub fn restart(&mut self, backend: &mut dyn AudioBackend) -> Result<(), AudioError> {
        self.state = PlaybackState::Playing;
        self.start_fresh(backend)
    }

    /// Pause; a channel that never started is simply marked paused
    pub fn pause(&mut self, backend: &mut dyn AudioBackend) -> Result<(), AudioError> {
        self.state = PlaybackState::Paused;
        match self.handle {
            Some(handle) => backend.pause(handle),
            None => Ok(()),
        }
    }

    /// Mark a finished one-shot as paused
    pub fn sync(&mut self, backend: &dyn AudioBackend) {
        if self.looping || self.state == PlaybackState::Paused {
            return;
        }
        if !self.handle.is_some_and(|handle| backend.is_playing(handle)) {
            self.state = PlaybackState::Paused;
            self.handle = None;
        }
    }

    fn start_fresh(&mut self, backend: &mut dyn AudioBackend) -> Result<(), AudioError> {
        if let Some(old) = self.handle.take() {
            backend.stop(old)?;
        }
        self.handle = Some(backend.play_from_path(&self.source, self.looping)?);
        Ok(())
    }
}
