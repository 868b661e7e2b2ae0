//! The room's ambient-music and chair-cue channels

use super::{AudioBackend, AudioChannel, PlaybackState};
use crate::config::AssetPaths;

/// Owns the backend and the two logical channels
///
/// Playback failures never escape: they are logged and the channel state
/// still follows the user's request.
pub struct AudioController {
    backend: Box<dyn AudioBackend>,
    ambient: AudioChannel,
    cue: AudioChannel,
}

impl AudioController {
    /// Create the controller for the configured tracks
    pub fn new(backend: Box<dyn AudioBackend>, assets: &AssetPaths) -> Self {
        Self {
            backend,
            ambient: AudioChannel::looping("ambient", &assets.ambient_track),
            cue: AudioChannel::one_shot("chair-cue", &assets.chair_cue),
        }
    }

    /// Flip the ambient channel and return its new state
    pub fn toggle_ambient(&mut self) -> PlaybackState {
        match self.ambient.state() {
            PlaybackState::Paused => {
                if let Err(e) = self.ambient.play(self.backend.as_mut()) {
                    log::error!("Could not start {:?}: {}", self.ambient.source(), e);
                }
                log::info!("Music on");
            }
            PlaybackState::Playing => {
                if let Err(e) = self.ambient.pause(self.backend.as_mut()) {
                    log::warn!("Could not pause {:?}: {}", self.ambient.source(), e);
                }
                log::info!("Music paused");
            }
        }
        self.ambient.state()
    }

    /// Play the chair cue from the start, fire-and-forget
    pub fn trigger_cue(&mut self) {
        if let Err(e) = self.cue.restart(self.backend.as_mut()) {
            log::error!("Could not play {:?}: {}", self.cue.source(), e);
        }
    }

    /// Reap finished sounds; call once per frame
    pub fn update(&mut self) {
        self.backend.update();
        self.cue.sync(self.backend.as_ref());
    }

    /// Ambient channel state
    pub fn ambient_state(&self) -> PlaybackState {
        self.ambient.state()
    }

    /// Chair cue channel state
    pub fn cue_state(&self) -> PlaybackState {
        self.cue.state()
    }

    /// Stop everything and release the device
    pub fn shutdown(&mut self) {
        self.backend.stop_all();
        self.backend.shutdown();
    }
}
