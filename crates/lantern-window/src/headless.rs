use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

use tracing::{debug, warn};

use crate::backend::{WindowBackend, WindowError};
use crate::events::WindowEvent;
use crate::types::WindowTemplate;

/// A window that exists only as bookkeeping.
#[derive(Debug)]
pub struct HeadlessWindow {
    id: u64,
    title: String,
    width: u32,
    height: u32,
    url: String,
}

impl HeadlessWindow {
    /// Backend-internal id; unrelated to the registry key.
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

/// Backend that builds windows from a template without touching a display.
pub struct HeadlessBackend {
    template: WindowTemplate,
    max_windows: Option<usize>,
    live: AtomicUsize,
    next_id: AtomicU64,
    events: Mutex<Vec<WindowEvent>>,
}

impl HeadlessBackend {
    pub fn new(template: WindowTemplate) -> Self {
        Self {
            template,
            max_windows: None,
            live: AtomicUsize::new(0),
            next_id: AtomicU64::new(1),
            events: Mutex::new(Vec::new()),
        }
    }

    /// Refuse to build more than `limit` live windows.
    pub fn with_max_windows(mut self, limit: usize) -> Self {
        self.max_windows = Some(limit);
        self
    }

    pub fn template(&self) -> &WindowTemplate {
        &self.template
    }

    /// How many windows are currently alive.
    pub fn live_count(&self) -> usize {
        self.live.load(Ordering::SeqCst)
    }

    /// Drain all pending lifecycle events.
    pub fn drain_events(&self) -> Vec<WindowEvent> {
        let mut events = self.events.lock().unwrap_or_else(PoisonError::into_inner);
        std::mem::take(&mut *events)
    }

    fn push_event(&self, event: WindowEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
    }
}

impl WindowBackend for HeadlessBackend {
    type Window = HeadlessWindow;

    fn create_window(&self) -> Result<HeadlessWindow, WindowError> {
        let limit = self.max_windows;
        self.live
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| match limit {
                Some(limit) if n >= limit => None,
                _ => Some(n + 1),
            })
            .map_err(|_| {
                let limit = limit.unwrap_or_default();
                warn!(limit, "window construction refused: limit reached");
                WindowError::Exhausted { limit }
            })?;

        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let window = HeadlessWindow {
            id,
            title: self.template.title.clone(),
            width: self.template.width,
            height: self.template.height,
            url: self.template.url.clone(),
        };

        debug!(
            window_id = id,
            title = %window.title,
            width = window.width,
            height = window.height,
            url = %window.url,
            "window created"
        );
        self.push_event(WindowEvent::Created { window_id: id });
        Ok(window)
    }

    fn destroy_window(&self, window: &HeadlessWindow) {
        self.live.fetch_sub(1, Ordering::SeqCst);
        debug!(window_id = window.id, "window destroyed");
        self.push_event(WindowEvent::Destroyed {
            window_id: window.id,
        });
    }
}
