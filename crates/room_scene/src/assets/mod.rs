//! Texture resource handles
//!
//! Decoding image files belongs to the renderer. The interaction layer only
//! needs a stable handle per path so materials can point at the same texture.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Opaque handle to a texture known to the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(u32);

impl TextureHandle {
    /// Raw id, for renderer-side lookup tables
    pub fn id(self) -> u32 {
        self.0
    }
}

/// Path-keyed texture registry that hands out one handle per path
#[derive(Debug, Default)]
pub struct TextureCache {
    by_path: HashMap<PathBuf, TextureHandle>,
    paths: Vec<PathBuf>,
}

impl TextureCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle for `path`, registering it on first use
    pub fn load(&mut self, path: impl AsRef<Path>) -> TextureHandle {
        let path = path.as_ref();
        if let Some(&handle) = self.by_path.get(path) {
            return handle;
        }

        let handle = TextureHandle(self.paths.len() as u32);
        log::debug!("Registered texture {:?} as #{}", path, handle.0);
        self.paths.push(path.to_path_buf());
        self.by_path.insert(path.to_path_buf(), handle);
        handle
    }

    /// Path a handle was registered with
    pub fn path(&self, handle: TextureHandle) -> Option<&Path> {
        self.paths.get(handle.0 as usize).map(PathBuf::as_path)
    }

    /// Number of registered textures
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Whether nothing has been registered yet
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}
