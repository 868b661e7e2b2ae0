//! Audio backend implementations
//!
//! Platform-independent abstraction over audio playback libraries.

#[cfg(feature = "rodio")]
pub mod rodio_backend;
mod silent;

pub use silent::SilentBackend;

use crate::audio::AudioError;
use std::path::Path;

/// Sound handle for tracking active sounds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SoundHandle {
    /// Unique identifier for the sound
    pub id: u32,
    /// Generation counter for handle validation
    pub generation: u32,
}

impl SoundHandle {
    /// Create a new sound handle
    pub fn new(id: u32, generation: u32) -> Self {
        Self { id, generation }
    }
}

/// Audio backend trait for platform abstraction
///
/// Not `Send + Sync`: playback is driven from the frame thread only.
pub trait AudioBackend {
    /// Initialize the audio backend
    fn initialize(&mut self, config: &AudioBackendConfig) -> Result<(), AudioError>;

    /// Shutdown the audio backend
    fn shutdown(&mut self);

    /// Check if backend is initialized
    fn is_initialized(&self) -> bool;

    /// Update the backend (cleanup finished sounds, etc.)
    fn update(&mut self);

    /// Stop all playing sounds
    fn stop_all(&mut self);

    /// Start playing a file, optionally looping forever
    fn play_from_path(&mut self, path: &Path, looping: bool) -> Result<SoundHandle, AudioError>;

    /// Pause a playing sound
    fn pause(&mut self, handle: SoundHandle) -> Result<(), AudioError>;

    /// Resume a paused sound
    fn resume(&mut self, handle: SoundHandle) -> Result<(), AudioError>;

    /// Stop a sound; stopping an unknown handle is not an error
    fn stop(&mut self, handle: SoundHandle) -> Result<(), AudioError>;

    /// Check if a sound is playing
    fn is_playing(&self, handle: SoundHandle) -> bool;
}

/// Configuration for audio backend
#[derive(Debug, Clone)]
pub struct AudioBackendConfig {
    /// Master volume applied to every new sound
    pub volume: f32,
}

impl Default for AudioBackendConfig {
    fn default() -> Self {
        Self { volume: 1.0 }
    }
}

/// Create the default audio backend for the platform
///
/// Falls back to [`SilentBackend`] when no output device can be opened, so
/// headless machines still run the scene.
pub fn create_backend(config: &AudioBackendConfig) -> Box<dyn AudioBackend> {
    #[cfg(feature = "rodio")]
    {
        let mut backend = rodio_backend::RodioBackend::new();
        match backend.initialize(config) {
            Ok(()) => return Box::new(backend),
            Err(e) => log::warn!("Falling back to silent audio: {}", e),
        }
    }

    let mut silent = SilentBackend::new();
    // Silent initialisation cannot fail
    let _ = silent.initialize(config);
    Box::new(silent)
}
