//! Compact/wide viewport classification with change notification.
//!
//! A viewport is *compact* when its width is strictly below a threshold. The
//! browser fires resize events continuously while the user drags a window
//! edge; observers compare each new classification against the last known
//! one and notify listeners only on an actual crossing.

#[cfg(test)]
#[path = "breakpoint_test.rs"]
mod breakpoint_test;

use std::collections::BTreeMap;
use std::fmt;

/// Listener invoked with the new `is_compact` value.
pub type BreakpointCallback = Box<dyn FnMut(bool)>;

/// Whether `width_px` falls below `threshold_px`.
#[must_use]
pub fn currently_compact(width_px: f64, threshold_px: u32) -> bool {
    width_px < f64::from(threshold_px)
}

/// Tracks one threshold and notifies listeners when the classification flips.
pub struct BreakpointObserver {
    threshold: u32,
    compact: bool,
    listeners: Vec<(String, BreakpointCallback)>,
}

impl BreakpointObserver {
    #[must_use]
    pub fn new(threshold: u32, width_px: f64) -> Self {
        Self { threshold, compact: currently_compact(width_px, threshold), listeners: Vec::new() }
    }

    #[must_use]
    pub fn threshold(&self) -> u32 {
        self.threshold
    }

    /// Last-known classification.
    #[must_use]
    pub fn is_compact(&self) -> bool {
        self.compact
    }

    /// Register `callback` under `key`.
    ///
    /// Registering an already-known key replaces its callback, so repeated
    /// wiring of the same component never produces duplicate notifications.
    pub fn on_change(&mut self, key: impl Into<String>, callback: BreakpointCallback) {
        let key = key.into();
        if let Some(slot) = self.listeners.iter_mut().find(|(k, _)| *k == key) {
            slot.1 = callback;
        } else {
            self.listeners.push((key, callback));
        }
    }

    /// Reclassify against `width_px`. Returns `true` when the classification flipped.
    pub fn observe(&mut self, width_px: f64) -> bool {
        let compact = currently_compact(width_px, self.threshold);
        if compact == self.compact {
            return false;
        }
        self.compact = compact;
        log::debug!("breakpoint {}px: compact={compact}", self.threshold);
        for (_, callback) in &mut self.listeners {
            callback(compact);
        }
        true
    }
}

impl fmt::Debug for BreakpointObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BreakpointObserver")
            .field("threshold", &self.threshold)
            .field("compact", &self.compact)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

/// All observers on a page, keyed by threshold, driven by one resize listener.
#[derive(Debug)]
pub struct Breakpoints {
    width: f64,
    observers: BTreeMap<u32, BreakpointObserver>,
}

impl Breakpoints {
    #[must_use]
    pub fn new(width_px: f64) -> Self {
        Self { width: width_px, observers: BTreeMap::new() }
    }

    /// Classification for `threshold` against the last known width.
    #[must_use]
    pub fn is_compact(&self, threshold: u32) -> bool {
        self.observers
            .get(&threshold)
            .map_or_else(|| currently_compact(self.width, threshold), BreakpointObserver::is_compact)
    }

    /// Register `callback` for flips across `threshold`. See [`BreakpointObserver::on_change`].
    pub fn on_breakpoint_change(&mut self, threshold: u32, key: impl Into<String>, callback: BreakpointCallback) {
        let width = self.width;
        self.observers
            .entry(threshold)
            .or_insert_with(|| BreakpointObserver::new(threshold, width))
            .on_change(key, callback);
    }

    /// Feed a new viewport width to every observer. Returns the thresholds that flipped.
    pub fn resize(&mut self, width_px: f64) -> Vec<u32> {
        self.width = width_px;
        self.observers
            .values_mut()
            .filter_map(|observer| observer.observe(width_px).then_some(observer.threshold()))
            .collect()
    }

    #[must_use]
    pub fn thresholds(&self) -> Vec<u32> {
        self.observers.keys().copied().collect()
    }
}
