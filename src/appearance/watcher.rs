//! Cached appearance mode driven by change notifications

use super::{
    AppearanceMode, ChangeNotifier, PreferenceError, PreferenceSource, SignalSink, Subscription,
    WatchError, WatchSignal,
};
use tracing::{debug, error, info, warn};

/// Holds the last successfully read appearance mode.
///
/// The mode is read once on construction and afterwards only when the host
/// notifies a change. Signals must be fed in through [`handle`](Self::handle)
/// on the thread that owns the watcher.
pub struct AppearanceWatcher<S> {
    source: S,
    mode: AppearanceMode,
    subscription: Option<Box<dyn Subscription>>,
    /// Set once the channel failed or the watcher was disposed
    stopped: bool,
}

impl<S: PreferenceSource> AppearanceWatcher<S> {
    /// Read the initial mode; a failing read is returned to the caller
    pub fn new(source: S) -> Result<Self, PreferenceError> {
        let mode = source.read_mode()?;
        info!("Initial appearance mode: {}", mode);

        Ok(Self {
            source,
            mode,
            subscription: None,
            stopped: false,
        })
    }

    /// Cached mode
    pub fn current(&self) -> AppearanceMode {
        self.mode
    }

    /// Subscribe to change notifications.
    ///
    /// A failed subscription is treated like a broken channel: the watcher
    /// stays on the initial mode for good.
    pub fn listen<N: ChangeNotifier>(&mut self, notifier: &N, sink: SignalSink) {
        if self.stopped || self.subscription.is_some() {
            return;
        }

        match notifier.subscribe(sink) {
            Ok(subscription) => {
                self.subscription = Some(subscription);
                info!("Listening for appearance changes");
            }
            Err(e) => self.on_channel_error(&e),
        }
    }

    /// Dispatch a signal delivered by the notifier
    pub fn handle(&mut self, signal: WatchSignal) {
        match signal {
            WatchSignal::Changed => self.on_changed(),
            WatchSignal::Failed(e) => self.on_channel_error(&e),
        }
    }

    /// Re-read the preference after a change notification
    pub fn on_changed(&mut self) {
        if self.stopped {
            debug!("Ignoring appearance change after watcher stopped");
            return;
        }

        match self.source.read_mode() {
            Ok(mode) if mode != self.mode => {
                info!("Appearance mode changed: {} -> {}", self.mode, mode);
                self.mode = mode;
            }
            Ok(_) => {}
            Err(e) => {
                // No retry; the next notification re-reads
                warn!("Keeping {} appearance mode: {}", self.mode, e);
            }
        }
    }

    /// Stop listening for good after the channel failed
    pub fn on_channel_error(&mut self, err: &WatchError) {
        if self.stopped {
            return;
        }
        error!("Appearance watcher stopped, mode frozen at {}: {}", self.mode, err);
        self.dispose();
    }

    /// Whether change notifications are still being received
    pub fn is_listening(&self) -> bool {
        !self.stopped && self.subscription.is_some()
    }

    /// Release the subscription; safe to call more than once
    pub fn dispose(&mut self) {
        self.stopped = true;
        if let Some(mut subscription) = self.subscription.take() {
            subscription.cancel();
            debug!("Appearance subscription released");
        }
    }
}

impl<S> Drop for AppearanceWatcher<S> {
    fn drop(&mut self) {
        if let Some(mut subscription) = self.subscription.take() {
            subscription.cancel();
        }
    }
}
