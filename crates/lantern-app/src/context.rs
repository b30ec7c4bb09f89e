//! Service context: the window registry plus the backend that owns the
//! windows. One instance per server; nothing here is global.

use std::sync::Arc;

use lantern_handles::HandleRegistry;
use lantern_window::{WindowBackend, WindowError};
use tracing::{debug, info, warn};

pub struct WindowService<B: WindowBackend> {
    backend: B,
    windows: HandleRegistry<Arc<B::Window>>,
}

impl<B: WindowBackend> WindowService<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            windows: HandleRegistry::new(),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn windows(&self) -> &HandleRegistry<Arc<B::Window>> {
        &self.windows
    }

    /// Build a window and register it. Nothing is registered on failure.
    pub fn create_window(&self) -> Result<String, WindowError> {
        let window = self.backend.create_window()?;
        let key = self.windows.insert(Arc::new(window));
        info!(key = %key, "window registered");
        Ok(key)
    }

    /// Tear down the window behind `key`. Returns `false` if the key is not
    /// live, including when another request is already deleting it.
    ///
    /// The entry is claimed first so no other request can resolve it, the
    /// window is destroyed with the registry unlocked, and only then is the
    /// key released.
    pub fn delete_window(&self, key: &str) -> bool {
        let Some(window) = self.windows.retire(key) else {
            debug!(key, "delete of unknown window");
            return false;
        };

        self.backend.destroy_window(&window);
        self.windows.remove(key);
        info!(key, "window deleted");
        true
    }

    pub fn window_keys(&self) -> Vec<String> {
        self.windows.all_keys()
    }

    /// Destroy every window still registered.
    pub fn shutdown(&self) {
        let remaining = self.windows.drain();
        if !remaining.is_empty() {
            warn!(count = remaining.len(), "destroying windows left open");
        }
        for (key, window) in remaining {
            self.backend.destroy_window(&window);
            debug!(key = %key, "window destroyed at shutdown");
        }
    }
}
