//! Page scroll lock shared by modal panels.
//!
//! The page is locked iff at least one modal panel holds the lock. Every
//! change re-writes the coalesced flag, so a release can never leave the page
//! locked behind a panel that already closed.

#[cfg(test)]
#[path = "scroll_lock_test.rs"]
mod scroll_lock_test;

use std::collections::BTreeSet;

use crate::panel::PanelId;
use crate::surface::Surface;

#[derive(Debug, Clone, Default)]
pub struct ScrollLock {
    holders: BTreeSet<PanelId>,
}

impl ScrollLock {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn acquire<S: Surface + ?Sized>(&mut self, holder: &PanelId, surface: &S) {
        self.holders.insert(holder.clone());
        self.sync(surface);
    }

    pub fn release<S: Surface + ?Sized>(&mut self, holder: &PanelId, surface: &S) {
        self.holders.remove(holder);
        self.sync(surface);
    }

    #[must_use]
    pub fn is_locked(&self) -> bool {
        !self.holders.is_empty()
    }

    fn sync<S: Surface + ?Sized>(&self, surface: &S) {
        surface.set_scroll_locked(self.is_locked());
    }
}
