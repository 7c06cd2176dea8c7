//! Application event definitions

use crate::appearance::WatchSignal;
use crate::tray::TrayAction;
use tokio::sync::mpsc;
use winit::event_loop::EventLoopProxy;

/// Wrapper around `mpsc::UnboundedSender<AppEvent>` that also wakes the winit
/// event loop via `EventLoopProxy` after every send, so helper threads (menu
/// handler, appearance notifier) are serviced while the loop waits for the
/// next poll deadline.
#[derive(Clone)]
pub struct EventSender {
    tx: mpsc::UnboundedSender<AppEvent>,
    proxy: EventLoopProxy<()>,
}

impl EventSender {
    pub fn new(tx: mpsc::UnboundedSender<AppEvent>, proxy: EventLoopProxy<()>) -> Self {
        Self { tx, proxy }
    }

    pub fn send(&self, event: AppEvent) -> Result<(), mpsc::error::SendError<AppEvent>> {
        let result = self.tx.send(event);
        let _ = self.proxy.send_event(());
        result
    }
}

/// Events delivered to the UI thread
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// Tray menu action triggered
    TrayAction(TrayAction),

    /// Appearance notifier signal
    Appearance(WatchSignal),
}
