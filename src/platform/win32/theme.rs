//! Theme preference from the Personalize registry key

use super::registry::{is_not_found, RegKey, HKEY_CURRENT_USER, KEY_NOTIFY, KEY_QUERY_VALUE};
use crate::appearance::{
    AppearanceMode, ChangeNotifier, PreferenceError, PreferenceSource, SignalSink, Subscription,
    WatchError, WatchSignal,
};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use tracing::{debug, info};
use windows::core::PCWSTR;
use windows::Win32::Foundation::{CloseHandle, HANDLE, WAIT_OBJECT_0, WAIT_TIMEOUT};
use windows::Win32::System::Threading::{CreateEventW, WaitForSingleObject};

const PERSONALIZE_KEY: &str = r"Software\Microsoft\Windows\CurrentVersion\Themes\Personalize";
const LIGHT_THEME_VALUE: &str = "SystemUsesLightTheme";

/// How long the notifier thread waits before re-checking its stop flag
const STOP_POLL_MS: u32 = 250;

/// `SystemUsesLightTheme` under HKCU; a missing value means dark
pub struct ThemePreference;

impl PreferenceSource for ThemePreference {
    fn read_mode(&self) -> Result<AppearanceMode, PreferenceError> {
        let key = RegKey::open(HKEY_CURRENT_USER, PERSONALIZE_KEY, KEY_QUERY_VALUE).map_err(|e| {
            if is_not_found(&e) {
                PreferenceError::NotFound(PERSONALIZE_KEY.to_string())
            } else {
                PreferenceError::Read(e.to_string())
            }
        })?;
        let value = key
            .read_dword(LIGHT_THEME_VALUE)
            .map_err(|e| PreferenceError::Read(e.to_string()))?
            .unwrap_or(0);
        Ok(AppearanceMode::from_uses_light_theme(value == 1))
    }
}

/// Registry change notifications on the Personalize key
pub struct ThemeChangeNotifier;

impl ChangeNotifier for ThemeChangeNotifier {
    fn subscribe(&self, sink: SignalSink) -> Result<Box<dyn Subscription>, WatchError> {
        // Fail fast if the key cannot be watched at all
        RegKey::open(HKEY_CURRENT_USER, PERSONALIZE_KEY, KEY_NOTIFY)
            .map_err(|e| WatchError::Subscribe(e.to_string()))?;

        let stop = Arc::new(AtomicBool::new(false));
        let stop_clone = Arc::clone(&stop);
        let thread_handle = thread::Builder::new()
            .name("theme-watch".to_string())
            .spawn(move || {
                if let Err(e) = watch_key(&stop_clone, &sink) {
                    if !stop_clone.load(Ordering::SeqCst) {
                        sink(WatchSignal::Failed(WatchError::Channel(e.to_string())));
                    }
                }
                debug!("Theme watcher thread exiting");
            })
            .map_err(|e| WatchError::Subscribe(e.to_string()))?;

        info!("Watching {} for theme changes", PERSONALIZE_KEY);
        Ok(Box::new(RegistryWatch {
            stop,
            thread_handle: Some(thread_handle),
        }))
    }
}

/// Re-arm the notification after every change until asked to stop
fn watch_key(stop: &AtomicBool, sink: &SignalSink) -> windows::core::Result<()> {
    let key = RegKey::open(HKEY_CURRENT_USER, PERSONALIZE_KEY, KEY_NOTIFY)?;
    let event = Event::new()?;

    while !stop.load(Ordering::SeqCst) {
        key.notify_change(event.0)?;

        loop {
            let status = unsafe { WaitForSingleObject(event.0, STOP_POLL_MS) };
            if status == WAIT_OBJECT_0 {
                break;
            }
            if status != WAIT_TIMEOUT {
                return Err(windows::core::Error::from_win32());
            }
            if stop.load(Ordering::SeqCst) {
                return Ok(());
            }
        }

        sink(WatchSignal::Changed);
    }
    Ok(())
}

/// Auto-reset Win32 event, closed on drop
struct Event(HANDLE);

impl Event {
    fn new() -> windows::core::Result<Self> {
        let handle = unsafe { CreateEventW(None, false, false, PCWSTR::null())? };
        Ok(Self(handle))
    }
}

impl Drop for Event {
    fn drop(&mut self) {
        unsafe {
            let _ = CloseHandle(self.0);
        }
    }
}

/// Running registry watch; cancel stops and joins the thread
struct RegistryWatch {
    stop: Arc<AtomicBool>,
    thread_handle: Option<thread::JoinHandle<()>>,
}

impl Subscription for RegistryWatch {
    fn cancel(&mut self) {
        self.stop.store(true, Ordering::SeqCst);
        if let Some(handle) = self.thread_handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for RegistryWatch {
    fn drop(&mut self) {
        self.cancel();
    }
}
