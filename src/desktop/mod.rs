//! Desktop module - Current virtual desktop tracking
//!
//! The host provides the index through a [`DesktopIndexProvider`]; the
//! [`DesktopPoller`] owns one and turns its answers into render requests.

mod poller;

pub use poller::DesktopPoller;

use std::fmt;

/// 1-based position of the active virtual desktop; `0` means unknown
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DesktopIndex(u32);

impl DesktopIndex {
    /// Sentinel for "unknown / error state"
    pub const UNKNOWN: DesktopIndex = DesktopIndex(0);

    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    /// Build from a 0-based position as reported by enumeration APIs
    pub fn from_position(position: usize) -> Self {
        Self(u32::try_from(position).map_or(u32::MAX, |p| p.saturating_add(1)))
    }

    pub fn get(self) -> u32 {
        self.0
    }

    pub fn is_unknown(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for DesktopIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_unknown() {
            f.write_str("unknown")
        } else {
            write!(f, "{}", self.0)
        }
    }
}

/// The desktop provider could not answer
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// The enumeration subsystem is missing or not responding
    #[error("desktop enumeration unavailable: {0}")]
    Unavailable(String),
    /// The provider answered with data it could not interpret
    #[error("malformed desktop data: {0}")]
    Malformed(String),
    /// The active desktop is not among the enumerated desktops
    #[error("current desktop is not in the desktop list")]
    CurrentNotListed,
    #[error("desktop query failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Reports the current desktop index or fails
pub trait DesktopIndexProvider {
    fn current(&mut self) -> Result<DesktopIndex, ProviderError>;
}

/// Builds a fresh provider handle; called again after every failure
pub trait ProviderFactory {
    type Provider: DesktopIndexProvider;

    fn acquire(&mut self) -> Result<Self::Provider, ProviderError>;
}
