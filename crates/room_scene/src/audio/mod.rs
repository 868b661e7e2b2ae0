//! Audio playback
//!
//! Two layers:
//! - [`backend`]: device-level playback behind the [`AudioBackend`] trait
//!   (rodio, or a silent fallback when no output device exists)
//! - [`AudioController`]: the room's two logical channels, looping ambient
//!   music and the one-shot chair cue

pub mod backend;
mod channel;
mod controller;

pub use backend::{AudioBackend, AudioBackendConfig, SilentBackend, SoundHandle};
pub use channel::{AudioChannel, PlaybackState};
pub use controller::AudioController;

use thiserror::Error;

/// Audio errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AudioError {
    /// Playback requested before `initialize`
    #[error("Audio backend not initialized")]
    BackendNotInitialized,

    /// No usable output device
    #[error("Audio device unavailable: {0}")]
    DeviceUnavailable(String),

    /// The backend refused or failed to start a sound
    #[error("Playback failed: {0}")]
    PlaybackFailed(String),

    /// Handle does not refer to a live sound
    #[error("Invalid sound handle")]
    InvalidHandle,
}

#[cfg(test)]
pub(crate) mod testing;
