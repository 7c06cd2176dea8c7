// Hide console window on Windows release builds
#![cfg_attr(
    all(target_os = "windows", not(debug_assertions)),
    windows_subsystem = "windows"
)]

//! Virtual Desktop Indicator - Entry Point
//!
//! Runs the winit event loop that drives the desktop poll timer, the tray
//! icon and the appearance watcher on a single thread.

use anyhow::{Context, Result};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use virtual_desktop_indicator::{
    core::{
        config::Config,
        events::{AppEvent, EventSender},
    },
    glyph::{FontRasterizer, GlyphRenderer, IconSize},
    platform::{self, DesktopProviderFactory, ThemeChangeNotifier, ThemePreference},
    tray::{self, TrayAction, TrayManager},
    AppearanceWatcher, DesktopPoller,
};
use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::WindowId,
};

/// Name used for the autorun registration
const APP_NAME: &str = "VirtualDesktopIndicator";

/// GTK does not wake the winit loop, so the Linux tray is pumped at least this often
#[cfg(target_os = "linux")]
const TRAY_PUMP_INTERVAL: Duration = Duration::from_millis(50);

/// Main application handler for winit event loop
struct App {
    /// Event sender handed to helper threads (wakes event loop)
    event_tx: EventSender,
    /// Event receiver drained on the UI thread
    event_rx: mpsc::UnboundedReceiver<AppEvent>,
    /// Tray icon and menu, created once the loop is running
    tray_manager: Option<TrayManager>,
    poller: DesktopPoller<DesktopProviderFactory>,
    watcher: AppearanceWatcher<ThemePreference>,
    renderer: GlyphRenderer<FontRasterizer>,
    icon_size: IconSize,
    /// Fixed poll interval
    interval: Duration,
    /// When the next poll is due; `None` until the tray exists
    next_tick: Option<Instant>,
}

impl App {
    fn new(
        event_tx: EventSender,
        event_rx: mpsc::UnboundedReceiver<AppEvent>,
        config: &Config,
        watcher: AppearanceWatcher<ThemePreference>,
        renderer: GlyphRenderer<FontRasterizer>,
    ) -> Self {
        let icon_size = tray::glyph_size(config.icon.min_size());
        info!("Glyph size {}x{}", icon_size.width, icon_size.height);

        Self {
            event_tx,
            event_rx,
            tray_manager: None,
            poller: DesktopPoller::new(DesktopProviderFactory::detect()),
            watcher,
            renderer,
            icon_size,
            interval: config.poller.interval(),
            next_tick: None,
        }
    }

    /// Poll the desktop and redraw the glyph if the poller asks for it
    fn tick(&mut self) {
        let Some(index) = self.poller.tick() else {
            return;
        };

        let glyph = self
            .renderer
            .render(index, self.watcher.current(), self.icon_size);
        if let Some(ref mut tray) = self.tray_manager {
            tray.show_glyph(glyph, index);
        }
    }

    fn handle_event(&mut self, event: AppEvent, event_loop: &ActiveEventLoop) {
        match event {
            AppEvent::Appearance(signal) => {
                // Only the cached mode changes; the glyph follows on the next desktop change
                self.watcher.handle(signal);
            }
            AppEvent::TrayAction(action) => {
                info!("Tray action: {:?}", action);
                match action {
                    TrayAction::ToggleAutorun => self.toggle_autorun(),
                    TrayAction::Exit => event_loop.exit(),
                }
            }
        }
    }

    fn toggle_autorun(&mut self) {
        let exe = match current_exe() {
            Ok(exe) => exe,
            Err(e) => {
                error!("Cannot toggle autorun: {:#}", e);
                return;
            }
        };

        let result = if platform::autorun::is_enabled(APP_NAME, &exe) {
            platform::autorun::disable(APP_NAME)
        } else {
            platform::autorun::enable(APP_NAME, &exe)
        };
        if let Err(e) = result {
            warn!("Failed to toggle autorun: {:#}", e);
        }

        let enabled = platform::autorun::is_enabled(APP_NAME, &exe);
        info!("Autorun {}", if enabled { "enabled" } else { "disabled" });
        if let Some(ref mut tray) = self.tray_manager {
            tray.set_autorun_checked(enabled);
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.tray_manager.is_some() {
            return;
        }

        let autorun_enabled = current_exe()
            .map(|exe| platform::autorun::is_enabled(APP_NAME, &exe))
            .unwrap_or(false);

        match TrayManager::new(self.event_tx.clone(), autorun_enabled) {
            Ok(tray) => {
                self.tray_manager = Some(tray);
                info!("Tray manager initialized");
            }
            Err(e) => {
                error!("Failed to initialize tray manager: {:#}", e);
                event_loop.exit();
                return;
            }
        }

        let event_tx = self.event_tx.clone();
        self.watcher.listen(
            &ThemeChangeNotifier,
            Box::new(move |signal| {
                if let Err(e) = event_tx.send(AppEvent::Appearance(signal)) {
                    error!("Failed to forward appearance signal: {}", e);
                }
            }),
        );

        // First poll right away so the icon is never left empty
        let now = Instant::now();
        self.next_tick = Some(now);
        event_loop.set_control_flow(ControlFlow::WaitUntil(now));
    }

    fn window_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        _event: WindowEvent,
    ) {
        // No windows; the tray is the only surface
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        tray::pump_events();

        while let Ok(event) = self.event_rx.try_recv() {
            self.handle_event(event, event_loop);
        }
        if event_loop.exiting() {
            return;
        }

        let Some(deadline) = self.next_tick else {
            return;
        };

        let now = Instant::now();
        let next = if now >= deadline {
            self.tick();
            // Skip missed ticks rather than bursting to catch up
            (deadline + self.interval).max(now)
        } else {
            deadline
        };

        self.next_tick = Some(next);

        #[cfg(target_os = "linux")]
        let next = next.min(now + TRAY_PUMP_INTERVAL);
        event_loop.set_control_flow(ControlFlow::WaitUntil(next));
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        info!("Application exiting");
        self.watcher.dispose();
        self.tray_manager = None;
    }
}

fn current_exe() -> Result<PathBuf> {
    std::env::current_exe().context("Failed to determine executable path")
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Virtual Desktop Indicator");

    // Load configuration
    let config = Config::load()?;
    info!("Configuration loaded");

    let font = FontRasterizer::system_default().context("Failed to load the default font")?;
    let renderer = GlyphRenderer::new(font);

    // No sane default mode exists, so this read must succeed
    let watcher = AppearanceWatcher::new(ThemePreference)
        .context("Failed to read the system appearance preference")?;

    // Create event channel
    let (event_tx, event_rx) = mpsc::unbounded_channel();

    // Create event loop
    let event_loop = EventLoop::new()?;

    // Create EventSender that wraps the channel + event loop proxy for wake-up
    let proxy = event_loop.create_proxy();
    let event_sender = EventSender::new(event_tx, proxy);

    let mut app = App::new(event_sender, event_rx, &config, watcher, renderer);

    // Run event loop
    event_loop.run_app(&mut app)?;

    Ok(())
}
