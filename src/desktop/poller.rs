//! Fixed-interval desktop index poller

use super::{DesktopIndex, DesktopIndexProvider, ProviderError, ProviderFactory};
use tracing::{debug, info, warn};

/// Tracks the current desktop and decides when the glyph must be redrawn.
///
/// The poller is *bound* while it holds a provider handle. Any failure drops
/// the handle, so the next tick acquires a new one (the shell may have been
/// restarted in between).
pub struct DesktopPoller<F: ProviderFactory> {
    factory: F,
    provider: Option<F::Provider>,
    last: DesktopIndex,
}

impl<F: ProviderFactory> DesktopPoller<F> {
    /// Create an unbound poller; nothing is acquired until the first tick
    pub fn new(factory: F) -> Self {
        Self {
            factory,
            provider: None,
            last: DesktopIndex::UNKNOWN,
        }
    }

    /// Run one poll.
    ///
    /// Returns the index to render, or `None` when the glyph is up to date.
    /// Failures always ask for the alert glyph, even if it is already shown.
    pub fn tick(&mut self) -> Option<DesktopIndex> {
        match self.query() {
            Ok(index) if index == self.last => None,
            Ok(index) => {
                info!("Desktop changed: {} -> {}", self.last, index);
                self.last = index;
                Some(index)
            }
            Err(e) => {
                if self.provider.take().is_some() {
                    debug!("Discarded desktop provider");
                }
                warn!("Desktop query failed: {}", e);
                self.last = DesktopIndex::UNKNOWN;
                Some(DesktopIndex::UNKNOWN)
            }
        }
    }

    fn query(&mut self) -> Result<DesktopIndex, ProviderError> {
        let mut provider = match self.provider.take() {
            Some(provider) => provider,
            None => {
                let provider = self.factory.acquire()?;
                debug!("Acquired desktop provider");
                provider
            }
        };
        let result = provider.current();
        self.provider = Some(provider);
        result
    }

    /// Whether a provider handle is currently held
    pub fn is_bound(&self) -> bool {
        self.provider.is_some()
    }

    /// Last recorded index
    pub fn last_index(&self) -> DesktopIndex {
        self.last
    }

    pub fn factory(&self) -> &F {
        &self.factory
    }
}
