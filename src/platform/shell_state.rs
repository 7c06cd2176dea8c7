//! Interpretation of the Windows shell's virtual desktop state
//!
//! Kept free of Win32 calls so the rules can be tested on any host.
#![cfg_attr(not(target_os = "windows"), allow(dead_code))]

use crate::desktop::{DesktopIndex, ProviderError};

/// First Windows build with the reworked virtual desktop layout
pub const LATEST_LAYOUT_BUILD: u32 = 22000;

/// Size of one desktop GUID in the registry blobs
const GUID_LEN: usize = 16;

/// Where the shell records the current desktop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DesktopApi {
    /// Build 22000 and later: next to the desktop list
    Latest,
    /// Older builds: under the per-session key
    Previous,
}

impl DesktopApi {
    pub fn for_build(build: u32) -> Self {
        if build >= LATEST_LAYOUT_BUILD {
            DesktopApi::Latest
        } else {
            DesktopApi::Previous
        }
    }
}

/// 1-based position of `current` among the concatenated GUIDs in `ids`.
///
/// A missing list means the shell has only ever had one desktop.
pub fn desktop_position(ids: Option<&[u8]>, current: &[u8]) -> Result<DesktopIndex, ProviderError> {
    if current.len() != GUID_LEN {
        return Err(ProviderError::Malformed(format!(
            "current desktop id is {} bytes",
            current.len()
        )));
    }

    let Some(ids) = ids else {
        return Ok(DesktopIndex::new(1));
    };
    if ids.len() % GUID_LEN != 0 {
        return Err(ProviderError::Malformed(format!(
            "desktop id list is {} bytes",
            ids.len()
        )));
    }

    ids.chunks_exact(GUID_LEN)
        .position(|id| id == current)
        .map(DesktopIndex::from_position)
        .ok_or(ProviderError::CurrentNotListed)
}
