//! Application settings with change notification.
//!
//! The render driver subscribes to settings changes to invalidate cached
//! font measurements; other components may subscribe the same way. Each
//! subscriber gets a bounded single-slot channel, so notifications coalesce:
//! a subscriber that has not consumed the previous notification is not sent
//! another.

use crossbeam::channel::{Receiver, Sender, TrySendError, bounded};
use log::debug;
use parking_lot::Mutex;

/// Shared, thread-safe application settings.
pub struct Settings {
    scale_factor: Mutex<f32>,
    listeners: Mutex<Vec<Sender<()>>>,
}

impl Settings {
    /// Create settings with a 1.0 scale factor.
    #[must_use]
    pub fn new() -> Self {
        Self {
            scale_factor: Mutex::new(1.0),
            listeners: Mutex::new(Vec::new()),
        }
    }

    /// The current display scale factor.
    #[must_use]
    pub fn scale_factor(&self) -> f32 {
        *self.scale_factor.lock()
    }

    /// Set the display scale factor and notify all subscribers.
    pub fn set_scale_factor(&self, factor: f32) {
        *self.scale_factor.lock() = factor;
        self.notify();
    }

    /// Register for change notifications.
    ///
    /// The returned receiver holds at most one pending notification at a
    /// time; consume it and re-check the settings values.
    #[must_use]
    pub fn subscribe(&self) -> Receiver<()> {
        let (sender, receiver) = bounded(1);
        self.listeners.lock().push(sender);
        receiver
    }

    fn notify(&self) {
        let mut listeners = self.listeners.lock();
        let before = listeners.len();
        // A full slot means the subscriber already has a pending
        // notification; only a disconnected subscriber is dropped.
        listeners.retain(|listener| {
            !matches!(listener.try_send(()), Err(TrySendError::Disconnected(())))
        });
        if listeners.len() < before {
            debug!("dropped {} disconnected settings listeners", before - listeners.len());
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::new()
    }
}
