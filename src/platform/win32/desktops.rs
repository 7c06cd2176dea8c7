//! Current virtual desktop from the shell's registry state

use super::registry::{RegKey, HKEY_CURRENT_USER, HKEY_LOCAL_MACHINE, KEY_READ};
use crate::desktop::{DesktopIndex, DesktopIndexProvider, ProviderError, ProviderFactory};
use crate::platform::shell_state::{desktop_position, DesktopApi};
use tracing::{info, warn};
use windows::Win32::System::RemoteDesktop::ProcessIdToSessionId;
use windows::Win32::System::Threading::GetCurrentProcessId;

const DESKTOPS_KEY: &str = r"Software\Microsoft\Windows\CurrentVersion\Explorer\VirtualDesktops";
const SESSION_INFO_KEY: &str = r"Software\Microsoft\Windows\CurrentVersion\Explorer\SessionInfo";
const VERSION_KEY: &str = r"SOFTWARE\Microsoft\Windows NT\CurrentVersion";

const IDS_VALUE: &str = "VirtualDesktopIDs";
const CURRENT_VALUE: &str = "CurrentVirtualDesktop";

fn unavailable(e: windows::core::Error) -> ProviderError {
    ProviderError::Unavailable(e.to_string())
}

/// Picks the registry layout once, then opens fresh handles on demand
pub struct DesktopProviderFactory {
    api: DesktopApi,
}

impl DesktopProviderFactory {
    /// Select the layout for the running Windows build
    pub fn detect() -> Self {
        let build = os_build().unwrap_or_else(|| {
            warn!("Could not read the Windows build number, assuming a current build");
            u32::MAX
        });
        let api = DesktopApi::for_build(build);
        info!("Windows build {}: using {:?} virtual desktop layout", build, api);
        Self { api }
    }
}

impl ProviderFactory for DesktopProviderFactory {
    type Provider = RegistryDesktops;

    fn acquire(&mut self) -> Result<RegistryDesktops, ProviderError> {
        let desktops = RegKey::open(HKEY_CURRENT_USER, DESKTOPS_KEY, KEY_READ).map_err(unavailable)?;

        let current = match self.api {
            DesktopApi::Latest => None,
            DesktopApi::Previous => {
                let mut session_id = 0u32;
                unsafe { ProcessIdToSessionId(GetCurrentProcessId(), &mut session_id) }
                    .map_err(unavailable)?;
                let subkey = format!(r"{}\{}\VirtualDesktops", SESSION_INFO_KEY, session_id);
                Some(RegKey::open(HKEY_CURRENT_USER, &subkey, KEY_READ).map_err(unavailable)?)
            }
        };

        Ok(RegistryDesktops { desktops, current })
    }
}

/// Open handles to the desktop list and the current-desktop location
pub struct RegistryDesktops {
    desktops: RegKey,
    /// Separate session key on older builds
    current: Option<RegKey>,
}

impl DesktopIndexProvider for RegistryDesktops {
    fn current(&mut self) -> Result<DesktopIndex, ProviderError> {
        let ids = self.desktops.read_binary(IDS_VALUE).map_err(unavailable)?;
        let current = self
            .current
            .as_ref()
            .unwrap_or(&self.desktops)
            .read_binary(CURRENT_VALUE)
            .map_err(unavailable)?
            .ok_or_else(|| ProviderError::Unavailable(format!("{} is not set", CURRENT_VALUE)))?;

        desktop_position(ids.as_deref(), &current)
    }
}

/// `CurrentBuildNumber` from the NT version key
fn os_build() -> Option<u32> {
    let key = RegKey::open(HKEY_LOCAL_MACHINE, VERSION_KEY, KEY_READ).ok()?;
    key.read_string("CurrentBuildNumber")
        .ok()
        .flatten()
        .and_then(|build| build.trim().parse().ok())
}
