//! Tray menu management

use super::icon::{icon_from_glyph, tooltip};
use crate::core::events::{AppEvent, EventSender};
use crate::desktop::DesktopIndex;
use crate::glyph::Glyph;
use anyhow::{Context, Result};
use tray_icon::{
    menu::{CheckMenuItem, Menu, MenuEvent, MenuId, MenuItem, PredefinedMenuItem},
    TrayIcon as TrayIconHandle, TrayIconBuilder,
};
use tracing::{debug, error, info, warn};

/// Tray menu actions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrayAction {
    /// Toggle starting the indicator at login
    ToggleAutorun,
    /// Quit application
    Exit,
}

/// Tray manager: hosts the desktop glyph and the context menu
pub struct TrayManager {
    /// Tray icon handle
    tray: TrayIconHandle,
    /// Autorun check item, kept to resync its check mark
    autorun_item: CheckMenuItem,
}

impl TrayManager {
    /// Create the tray icon with an empty image; the first render fills it
    pub fn new(event_tx: EventSender, autorun_enabled: bool) -> Result<Self> {
        // GTK must be initialized on this thread before any tray widget exists
        #[cfg(target_os = "linux")]
        {
            debug!("Initializing GTK for the tray");
            gtk::init().context("Failed to initialize GTK")?;
        }

        let menu = Menu::new();

        let autorun_item =
            CheckMenuItem::new("Start application at login", true, autorun_enabled, None);
        let autorun_id = autorun_item.id().clone();

        let exit_item = MenuItem::new("Exit", true, None);
        let exit_id = exit_item.id().clone();

        menu.append(&autorun_item)?;
        menu.append(&PredefinedMenuItem::separator())?;
        menu.append(&exit_item)?;

        let tray = TrayIconBuilder::new()
            .with_menu(Box::new(menu))
            .with_tooltip(tooltip(DesktopIndex::UNKNOWN))
            .build()
            .context("Failed to create tray icon")?;

        info!("Tray icon created");

        start_menu_handler(event_tx, autorun_id, exit_id);

        Ok(Self { tray, autorun_item })
    }

    /// Replace the displayed glyph.
    ///
    /// A glyph the host rejects leaves the tray blank until the next render.
    pub fn show_glyph(&mut self, glyph: Glyph, index: DesktopIndex) {
        let icon = match icon_from_glyph(glyph) {
            Ok(icon) => Some(icon),
            Err(e) => {
                warn!("Failed to convert glyph for desktop {}: {}", index, e);
                None
            }
        };

        if let Err(e) = self.tray.set_icon(icon) {
            error!("Failed to set tray icon: {}", e);
        }

        if let Err(e) = self.tray.set_tooltip(Some(tooltip(index))) {
            error!("Failed to set tray tooltip: {}", e);
        }
    }

    /// Sync the autorun check mark with the real registration state
    pub fn set_autorun_checked(&mut self, enabled: bool) {
        self.autorun_item.set_checked(enabled);
    }
}

/// Run pending GTK events; the Linux tray only updates and reacts while they are pumped
#[cfg(target_os = "linux")]
pub fn pump_events() {
    if !gtk::is_initialized_main_thread() {
        return;
    }
    while gtk::events_pending() {
        gtk::main_iteration_do(false);
    }
}

#[cfg(not(target_os = "linux"))]
pub fn pump_events() {}

/// Forward menu clicks to the application event loop
fn start_menu_handler(event_tx: EventSender, autorun_id: MenuId, exit_id: MenuId) {
    std::thread::spawn(move || {
        let receiver = MenuEvent::receiver();

        while let Ok(event) = receiver.recv() {
            debug!("Menu event: {:?}", event);

            let action = if event.id == autorun_id {
                Some(TrayAction::ToggleAutorun)
            } else if event.id == exit_id {
                Some(TrayAction::Exit)
            } else {
                None
            };

            if let Some(action) = action {
                if let Err(e) = event_tx.send(AppEvent::TrayAction(action)) {
                    error!("Failed to send tray action: {}", e);
                    break;
                }
            }
        }
    });
}
