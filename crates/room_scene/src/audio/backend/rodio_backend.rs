//! Rodio audio backend implementation
//!
//! Uses the Rodio library for cross-platform audio playback.
//! Rodio is pure Rust and supports WAV, OGG Vorbis, MP3, and FLAC formats.
//!
//! # Example
//!
//! ```no_run
//! use room_scene::audio::backend::{AudioBackend, AudioBackendConfig};
//! use room_scene::audio::backend::rodio_backend::RodioBackend;
//! use std::path::Path;
//!
//! let mut backend = RodioBackend::new();
//! backend.initialize(&AudioBackendConfig::default()).unwrap();
//!
//! let handle = backend.play_from_path(Path::new("assets/ambiente.mp3"), true).unwrap();
//! backend.pause(handle).unwrap();
//! backend.resume(handle).unwrap();
//!
//! backend.update(); // Removes finished sounds
//! backend.shutdown();
//! ```

use super::{AudioBackend, AudioBackendConfig, SoundHandle};
use crate::audio::AudioError;
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink};
use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Rodio-based audio backend
pub struct RodioBackend {
    /// Audio output stream (must be kept alive)
    _output_stream: Option<OutputStream>,
    /// Output stream handle for creating sinks
    stream_handle: Option<OutputStreamHandle>,
    /// Active sound sinks
    active_sounds: HashMap<SoundHandle, Sink>,
    /// Volume applied to new sinks
    volume: f32,
    /// Next sound ID for handle generation
    next_id: u32,
    /// Initialization state
    initialized: bool,
}

impl RodioBackend {
    /// Create a new Rodio backend
    pub fn new() -> Self {
        Self {
            _output_stream: None,
            stream_handle: None,
            active_sounds: HashMap::new(),
            volume: 1.0,
            next_id: 0,
            initialized: false,
        }
    }

    /// Generate a new sound handle
    fn next_handle(&mut self) -> SoundHandle {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        SoundHandle::new(id, 0)
    }

    fn open(path: &Path) -> Result<BufReader<File>, AudioError> {
        let file = File::open(path)
            .map_err(|e| AudioError::PlaybackFailed(format!("Failed to open audio file {:?}: {}", path, e)))?;
        Ok(BufReader::new(file))
    }
}

impl AudioBackend for RodioBackend {
    fn initialize(&mut self, config: &AudioBackendConfig) -> Result<(), AudioError> {
        if self.initialized {
            return Ok(());
        }

        // Create output stream
        let (stream, stream_handle) = OutputStream::try_default()
            .map_err(|e| AudioError::DeviceUnavailable(format!("Failed to create audio output: {}", e)))?;

        self._output_stream = Some(stream);
        self.stream_handle = Some(stream_handle);
        self.volume = config.volume;
        self.initialized = true;

        log::info!("Rodio audio backend initialized");
        Ok(())
    }

    fn shutdown(&mut self) {
        if !self.initialized {
            return;
        }

        self.stop_all();

        // Drop stream handle and output
        self.stream_handle = None;
        self._output_stream = None;
        self.initialized = false;

        log::info!("Rodio audio backend shutdown");
    }

    fn is_initialized(&self) -> bool {
        self.initialized
    }

    fn update(&mut self) {
        // Remove finished sounds
        self.active_sounds.retain(|_handle, sink| !sink.empty());
    }

    fn stop_all(&mut self) {
        for (_handle, sink) in self.active_sounds.drain() {
            sink.stop();
        }
    }

    fn play_from_path(&mut self, path: &Path, looping: bool) -> Result<SoundHandle, AudioError> {
        let stream_handle = self.stream_handle.as_ref()
            .ok_or(AudioError::BackendNotInitialized)?;

        let sink = Sink::try_new(stream_handle)
            .map_err(|e| AudioError::PlaybackFailed(format!("Failed to create sink: {}", e)))?;
        sink.set_volume(self.volume);

        let reader = Self::open(path)?;
        if looping {
            let source = Decoder::new_looped(reader)
                .map_err(|e| AudioError::PlaybackFailed(format!("Failed to decode audio: {}", e)))?;
            sink.append(source);
        } else {
            let source = Decoder::new(reader)
                .map_err(|e| AudioError::PlaybackFailed(format!("Failed to decode audio: {}", e)))?;
            sink.append(source);
        }

        let handle = self.next_handle();
        self.active_sounds.insert(handle, sink);
        Ok(handle)
    }

    fn pause(&mut self, handle: SoundHandle) -> Result<(), AudioError> {
        let sink = self.active_sounds.get(&handle)
            .ok_or(AudioError::InvalidHandle)?;
        sink.pause();
        Ok(())
    }

    fn resume(&mut self, handle: SoundHandle) -> Result<(), AudioError> {
        let sink = self.active_sounds.get(&handle)
            .ok_or(AudioError::InvalidHandle)?;
        sink.play();
        Ok(())
    }

    fn stop(&mut self, handle: SoundHandle) -> Result<(), AudioError> {
        if let Some(sink) = self.active_sounds.remove(&handle) {
            sink.stop();
        }
        Ok(())
    }

    fn is_playing(&self, handle: SoundHandle) -> bool {
        self.active_sounds.get(&handle)
            .is_some_and(|sink| !sink.is_paused() && !sink.empty())
    }
}

impl Default for RodioBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for RodioBackend {
    fn drop(&mut self) {
        self.shutdown();
    }
}
