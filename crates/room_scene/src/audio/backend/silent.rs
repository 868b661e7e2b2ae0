//! Backend that tracks playback state without producing sound

use super::{AudioBackend, AudioBackendConfig, SoundHandle};
use crate::audio::AudioError;
use std::collections::HashMap;
use std::path::Path;

#[derive(Debug, Clone, Copy)]
struct SilentSound {
    looping: bool,
    paused: bool,
}

/// Audio backend for headless runs
///
/// Sounds have no duration: one-shots are reaped on the next `update`,
/// looping sounds live until stopped.
#[derive(Debug, Default)]
pub struct SilentBackend {
    sounds: HashMap<SoundHandle, SilentSound>,
    next_id: u32,
    initialized: bool,
}

impl SilentBackend {
    /// Create a new silent backend
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of sounds currently tracked
    pub fn active_count(&self) -> usize {
        self.sounds.len()
    }
}

impl AudioBackend for SilentBackend {
    fn initialize(&mut self, _config: &AudioBackendConfig) -> Result<(), AudioError> {
        self.initialized = true;
        Ok(())
    }

    fn shutdown(&mut self) {
        self.sounds.clear();
        self.initialized = false;
    }

    fn is_initialized(&self) -> bool {
        self.initialized
    }

    fn update(&mut self) {
        self.sounds.retain(|_, sound| sound.looping || sound.paused);
    }

    fn stop_all(&mut self) {
        self.sounds.clear();
    }

    fn play_from_path(&mut self, path: &Path, looping: bool) -> Result<SoundHandle, AudioError> {
        if !self.initialized {
            return Err(AudioError::BackendNotInitialized);
        }
        let handle = SoundHandle::new(self.next_id, 0);
        self.next_id = self.next_id.wrapping_add(1);
        log::trace!("Silent playback of {:?} (looping: {})", path, looping);
        self.sounds.insert(handle, SilentSound { looping, paused: false });
        Ok(handle)
    }

    fn pause(&mut self, handle: SoundHandle) -> Result<(), AudioError> {
        let sound = self.sounds.get_mut(&handle).ok_or(AudioError::InvalidHandle)?;
        sound.paused = true;
        Ok(())
    }

    fn resume(&mut self, handle: SoundHandle) -> Result<(), AudioError> {
        let sound = self.sounds.get_mut(&handle).ok_or(AudioError::InvalidHandle)?;
        sound.paused = false;
        Ok(())
    }

    fn stop(&mut self, handle: SoundHandle) -> Result<(), AudioError> {
        self.sounds.remove(&handle);
        Ok(())
    }

    fn is_playing(&self, handle: SoundHandle) -> bool {
        self.sounds.get(&handle).is_some_and(|sound| !sound.paused)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ready() -> SilentBackend {
        let mut backend = SilentBackend::new();
        backend.initialize(&AudioBackendConfig::default()).unwrap();
        backend
    }

    #[test]
    fn test_playback_without_initialization() {
        let mut backend = SilentBackend::new();
        let result = backend.play_from_path(Path::new("a.mp3"), false);
        assert_eq!(result, Err(AudioError::BackendNotInitialized));
    }

    #[test]
    fn test_pause_resume() {
        let mut backend = ready();
        let handle = backend.play_from_path(Path::new("loop.mp3"), true).unwrap();
        assert!(backend.is_playing(handle));

        backend.pause(handle).unwrap();
        assert!(!backend.is_playing(handle));
        backend.resume(handle).unwrap();
        assert!(backend.is_playing(handle));
    }

    #[test]
    fn test_update_reaps_one_shots_only() {
        let mut backend = ready();
        let cue = backend.play_from_path(Path::new("cue.mp3"), false).unwrap();
        let music = backend.play_from_path(Path::new("loop.mp3"), true).unwrap();

        backend.update();
        assert!(!backend.is_playing(cue));
        assert!(backend.is_playing(music));
        assert_eq!(backend.active_count(), 1);
    }

    #[test]
    fn test_invalid_handle_operations() {
        let mut backend = ready();
        let invalid = SoundHandle::new(999, 0);
        assert_eq!(backend.pause(invalid), Err(AudioError::InvalidHandle));
        assert_eq!(backend.resume(invalid), Err(AudioError::InvalidHandle));
        assert_eq!(backend.stop(invalid), Ok(()));
    }
}
