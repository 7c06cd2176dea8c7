//! Windows host integration: registry-backed theme, desktops and autorun

pub mod autorun;
mod desktops;
mod registry;
mod theme;

pub use desktops::{DesktopProviderFactory, RegistryDesktops};
pub use theme::{ThemeChangeNotifier, ThemePreference};

use windows::Win32::UI::WindowsAndMessaging::{GetSystemMetrics, SM_CXICON, SM_CYICON};

/// System large-icon size in pixels
pub fn icon_metric() -> (i32, i32) {
    unsafe { (GetSystemMetrics(SM_CXICON), GetSystemMetrics(SM_CYICON)) }
}
