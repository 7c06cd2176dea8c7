//! Theme preference from the freedesktop `color-scheme` setting

use crate::appearance::{
    AppearanceMode, ChangeNotifier, PreferenceError, PreferenceSource, SignalSink, Subscription,
    WatchError, WatchSignal,
};
use std::io::{BufRead, BufReader};
use std::process::{Child, Command, Stdio};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use tracing::{debug, info};

const SCHEMA: &str = "org.gnome.desktop.interface";
const KEY: &str = "color-scheme";

/// Map a `color-scheme` value (`'prefer-dark'`, `'default'`, ...) to a mode
pub fn parse_color_scheme(raw: &str) -> Option<AppearanceMode> {
    let value = raw.trim().trim_matches('\'');
    match value {
        "" => None,
        "prefer-dark" => Some(AppearanceMode::Dark),
        _ => Some(AppearanceMode::Light),
    }
}

/// `gsettings get org.gnome.desktop.interface color-scheme`
pub struct ThemePreference;

impl PreferenceSource for ThemePreference {
    fn read_mode(&self) -> Result<AppearanceMode, PreferenceError> {
        let output = Command::new("gsettings")
            .args(["get", SCHEMA, KEY])
            .stderr(Stdio::null())
            .output()
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => PreferenceError::NotFound("gsettings".to_string()),
                _ => PreferenceError::Read(e.to_string()),
            })?;

        if !output.status.success() {
            return Err(PreferenceError::NotFound(format!("{} {}", SCHEMA, KEY)));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        parse_color_scheme(&stdout)
            .ok_or_else(|| PreferenceError::Read(format!("unexpected {} value {:?}", KEY, stdout.trim())))
    }
}

/// `gsettings monitor` child process; one output line per change
pub struct ThemeChangeNotifier;

impl ChangeNotifier for ThemeChangeNotifier {
    fn subscribe(&self, sink: SignalSink) -> Result<Box<dyn Subscription>, WatchError> {
        let mut child = Command::new("gsettings")
            .args(["monitor", SCHEMA, KEY])
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| WatchError::Subscribe(e.to_string()))?;
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| WatchError::Subscribe("monitor has no stdout".to_string()))?;

        let stop = Arc::new(AtomicBool::new(false));
        let stop_clone = Arc::clone(&stop);
        let thread_handle = thread::Builder::new()
            .name("theme-watch".to_string())
            .spawn(move || {
                for line in BufReader::new(stdout).lines() {
                    match line {
                        Ok(_) => sink(WatchSignal::Changed),
                        Err(e) => {
                            if !stop_clone.load(Ordering::SeqCst) {
                                sink(WatchSignal::Failed(WatchError::Channel(e.to_string())));
                            }
                            return;
                        }
                    }
                }
                if !stop_clone.load(Ordering::SeqCst) {
                    sink(WatchSignal::Failed(WatchError::Channel(
                        "gsettings monitor exited".to_string(),
                    )));
                }
                debug!("Theme watcher thread exiting");
            })
            .map_err(|e| WatchError::Subscribe(e.to_string()))?;

        info!("Watching {} {} for theme changes", SCHEMA, KEY);
        Ok(Box::new(MonitorProcess {
            stop,
            child: Some(child),
            thread_handle: Some(thread_handle),
        }))
    }
}

/// Running monitor; cancel kills the child and joins the reader
struct MonitorProcess {
    stop: Arc<AtomicBool>,
    child: Option<Child>,
    thread_handle: Option<thread::JoinHandle<()>>,
}

impl Subscription for MonitorProcess {
    fn cancel(&mut self) {
        self.stop.store(true, Ordering::SeqCst);
        if let Some(mut child) = self.child.take() {
            let _ = child.kill();
            let _ = child.wait();
        }
        if let Some(handle) = self.thread_handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for MonitorProcess {
    fn drop(&mut self) {
        self.cancel();
    }
}
