//! Scriptable backend for tests

use super::{AudioBackend, AudioBackendConfig, AudioError, SoundHandle};
use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::rc::Rc;

/// One backend call as seen by the recorder
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Play(PathBuf, bool),
    Pause(SoundHandle),
    Resume(SoundHandle),
    Stop(SoundHandle),
}

#[derive(Debug, Default)]
pub struct Recording {
    pub calls: Vec<Call>,
    pub reject_play: bool,
    pub playing: HashMap<SoundHandle, bool>,
}

impl Recording {
    pub fn plays(&self) -> usize {
        self.calls.iter().filter(|c| matches!(c, Call::Play(..))).count()
    }
}

/// Backend that records every call into shared state the test keeps
#[derive(Debug, Default)]
pub struct RecordingBackend {
    pub state: Rc<RefCell<Recording>>,
    next_id: u32,
}

impl RecordingBackend {
    pub fn new() -> (Self, Rc<RefCell<Recording>>) {
        let backend = Self::default();
        let state = Rc::clone(&backend.state);
        (backend, state)
    }
}

impl AudioBackend for RecordingBackend {
    fn initialize(&mut self, _config: &AudioBackendConfig) -> Result<(), AudioError> {
        Ok(())
    }

    fn shutdown(&mut self) {}

    fn is_initialized(&self) -> bool {
        true
    }

    fn update(&mut self) {}

    fn stop_all(&mut self) {
        self.state.borrow_mut().playing.clear();
    }

    fn play_from_path(&mut self, path: &Path, looping: bool) -> Result<SoundHandle, AudioError> {
        let mut state = self.state.borrow_mut();
        state.calls.push(Call::Play(path.to_path_buf(), looping));
        if state.reject_play {
            return Err(AudioError::PlaybackFailed("autoplay blocked".into()));
        }
        let handle = SoundHandle::new(self.next_id, 0);
        self.next_id += 1;
        state.playing.insert(handle, true);
        Ok(handle)
    }

    fn pause(&mut self, handle: SoundHandle) -> Result<(), AudioError> {
        let mut state = self.state.borrow_mut();
        state.calls.push(Call::Pause(handle));
        let playing = state.playing.get_mut(&handle).ok_or(AudioError::InvalidHandle)?;
        *playing = false;
        Ok(())
    }

    fn resume(&mut self, handle: SoundHandle) -> Result<(), AudioError> {
        let mut state = self.state.borrow_mut();
        state.calls.push(Call::Resume(handle));
        let playing = state.playing.get_mut(&handle).ok_or(AudioError::InvalidHandle)?;
        *playing = true;
        Ok(())
    }

    fn stop(&mut self, handle: SoundHandle) -> Result<(), AudioError> {
        let mut state = self.state.borrow_mut();
        state.calls.push(Call::Stop(handle));
        state.playing.remove(&handle);
        Ok(())
    }

    fn is_playing(&self, handle: SoundHandle) -> bool {
        self.state.borrow().playing.get(&handle).copied().unwrap_or(false)
    }
}
