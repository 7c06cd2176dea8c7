//! Appearance module - Light/dark preference tracking
//!
//! The preference itself and its change notifications come from the host
//! (see `crate::platform`); this module owns the cached mode and the rules for
//! reacting to notifications.

mod watcher;

pub use watcher::AppearanceWatcher;

use std::fmt;

/// System-wide light/dark preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AppearanceMode {
    Light,
    Dark,
}

impl AppearanceMode {
    /// Map the "uses light theme" flag stored by the host
    pub fn from_uses_light_theme(uses_light: bool) -> Self {
        if uses_light {
            AppearanceMode::Light
        } else {
            AppearanceMode::Dark
        }
    }

    pub fn is_dark(self) -> bool {
        self == AppearanceMode::Dark
    }
}

impl fmt::Display for AppearanceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppearanceMode::Light => f.write_str("light"),
            AppearanceMode::Dark => f.write_str("dark"),
        }
    }
}

/// Reading the preference failed
#[derive(Debug, Clone, thiserror::Error)]
pub enum PreferenceError {
    /// The preference location does not exist
    #[error("appearance preference not found: {0}")]
    NotFound(String),
    /// The preference exists but could not be read or understood
    #[error("failed to read appearance preference: {0}")]
    Read(String),
}

/// The change-notification channel failed
#[derive(Debug, Clone, thiserror::Error)]
pub enum WatchError {
    /// Subscribing to the preference location failed
    #[error("failed to subscribe to appearance changes: {0}")]
    Subscribe(String),
    /// The notification primitive reported an error while listening
    #[error("appearance change notifications failed: {0}")]
    Channel(String),
}

/// Message delivered by a change notifier
#[derive(Debug, Clone)]
pub enum WatchSignal {
    /// Something changed at the preference location
    Changed,
    /// The notification channel broke and will deliver nothing more
    Failed(WatchError),
}

/// Callback used by a notifier to hand signals to the UI thread
pub type SignalSink = Box<dyn Fn(WatchSignal) + Send + 'static>;

/// A readable appearance preference
pub trait PreferenceSource {
    /// Read the current mode from the host
    fn read_mode(&self) -> Result<AppearanceMode, PreferenceError>;
}

/// A live change subscription; cancelling must be safe to repeat
pub trait Subscription {
    fn cancel(&mut self);
}

/// Level-triggered "something changed at this location" notification primitive
pub trait ChangeNotifier {
    /// Start delivering signals to `sink` until the returned subscription is cancelled
    fn subscribe(&self, sink: SignalSink) -> Result<Box<dyn Subscription>, WatchError>;
}
