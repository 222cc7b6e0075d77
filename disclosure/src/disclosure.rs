//! Open/close state machine for every panel on a page.
//!
//! Each registered panel is either CLOSED or OPEN. `open`, `close` and
//! `toggle` are the only transitions; every external event (clicks, the
//! Escape key, breakpoint crossings, hover) resolves to one of them.
//!
//! INVARIANTS
//! ==========
//! - At most one member of an exclusive group is open. Opening a panel closes
//!   its siblings first, inside the same call.
//! - The page is scroll-locked iff a modal panel is open.
//! - Operations on a panel whose element no longer resolves are no-ops.

#[cfg(test)]
#[path = "disclosure_test.rs"]
mod disclosure_test;

use crate::breakpoint::currently_compact;
use crate::panel::{BreakpointPolicy, OVERLAY_OPEN_CLASS, PanelConfig, PanelId, PanelState};
use crate::scroll_lock::ScrollLock;
use crate::surface::{PointerTarget, Surface};

/// Key name the browser reports for the Escape key.
pub const ESCAPE_KEY: &str = "Escape";

#[derive(Debug, Clone)]
struct Entry {
    config: PanelConfig,
    state: PanelState,
    compact: bool,
}

impl Entry {
    /// Whether trigger and outside clicks act right now.
    fn interactive(&self) -> bool {
        !self.config.compact_interactive || self.compact
    }
}

#[derive(Debug, Clone, Default)]
pub struct DisclosureController {
    entries: Vec<Entry>,
    lock: ScrollLock,
}

impl DisclosureController {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a panel. Returns `false` when its element is absent from the
    /// page or the id is already taken.
    ///
    /// The initial state is read from the markup, unless the panel is
    /// configured to start closed. A panel marked open whose exclusive group
    /// already has an open member starts closed instead. Either way the
    /// presentation for the initial state is written back.
    pub fn register<S: Surface + ?Sized>(&mut self, config: PanelConfig, surface: &S, viewport_width: f64) -> bool {
        if !surface.exists(&config.panel) {
            log::debug!("panel {}: {} not on this page", config.id, config.panel);
            return false;
        }
        if self.index_of(&config.id).is_some() {
            log::warn!("panel {}: already registered", config.id);
            return false;
        }

        let compact = config.breakpoint.is_some_and(|b| currently_compact(viewport_width, b.threshold));
        let marked = if config.start_closed {
            PanelState::Closed
        } else {
            config.presentation.read_state(surface, &config.panel)
        };
        let sibling_open = config
            .group
            .as_ref()
            .is_some_and(|g| self.entries.iter().any(|e| e.state.is_open() && e.config.group.as_ref() == Some(g)));
        let state = if marked.is_open() && !sibling_open { PanelState::Open } else { PanelState::Closed };

        self.entries.push(Entry { config, state: PanelState::Closed, compact });
        let idx = self.entries.len() - 1;
        self.set_state(idx, state, surface);
        true
    }

    // --- Transitions ---

    /// Open `id`, closing the other members of its exclusive group first.
    /// Returns `true` when the state changed.
    pub fn open<S: Surface + ?Sized>(&mut self, id: &PanelId, surface: &S) -> bool {
        let Some(idx) = self.live_index(id, surface) else {
            return false;
        };
        if self.entries[idx].state.is_open() {
            return false;
        }
        if let Some(group) = self.entries[idx].config.group.clone() {
            let siblings: Vec<usize> = self
                .entries
                .iter()
                .enumerate()
                .filter(|(i, e)| *i != idx && e.state.is_open() && e.config.group.as_ref() == Some(&group))
                .map(|(i, _)| i)
                .collect();
            for sibling in siblings {
                self.set_state(sibling, PanelState::Closed, surface);
            }
        }
        self.set_state(idx, PanelState::Open, surface);
        true
    }

    /// Close `id`. Returns `true` when the state changed.
    pub fn close<S: Surface + ?Sized>(&mut self, id: &PanelId, surface: &S) -> bool {
        let Some(idx) = self.live_index(id, surface) else {
            return false;
        };
        if !self.entries[idx].state.is_open() {
            return false;
        }
        self.set_state(idx, PanelState::Closed, surface);
        true
    }

    /// Flip `id`. Returns the resulting state, or `None` for unknown or absent panels.
    pub fn toggle<S: Surface + ?Sized>(&mut self, id: &PanelId, surface: &S) -> Option<PanelState> {
        let idx = self.live_index(id, surface)?;
        if self.entries[idx].state.is_open() {
            self.close(id, surface);
        } else {
            self.open(id, surface);
        }
        Some(self.entries[idx].state)
    }

    /// Close every open panel.
    pub fn close_all<S: Surface + ?Sized>(&mut self, surface: &S) {
        for id in self.open_panels() {
            self.close(&id, surface);
        }
    }

    // --- External dismissal ---

    /// Route a document click.
    ///
    /// A click inside a panel's trigger toggles that panel. A click inside a
    /// dismiss handle, or directly on a backdrop panel, closes it. Every other
    /// open panel that contains neither the target nor its trigger closes.
    /// Returns the id of the panel that actually toggled, if any.
    pub fn on_click<S, T>(&mut self, target: &T, surface: &S) -> Option<PanelId>
    where
        S: Surface + ?Sized,
        T: PointerTarget + ?Sized,
    {
        let toggled = self.entries.iter().position(|e| {
            e.interactive() && e.config.trigger.as_ref().is_some_and(|t| target.is_within(t))
        });

        let mut to_close = Vec::new();
        for (idx, entry) in self.entries.iter().enumerate() {
            if Some(idx) == toggled || !entry.state.is_open() {
                continue;
            }
            let config = &entry.config;
            let dismissed =
                config.dismiss.iter().any(|d| target.is_within(d)) || (config.backdrop && target.is(&config.panel));
            let outside = entry.interactive()
                && !target.is_within(&config.panel)
                && !config.trigger.as_ref().is_some_and(|t| target.is_within(t));
            if dismissed || outside {
                to_close.push(config.id.clone());
            }
        }
        for id in &to_close {
            self.close(id, surface);
        }

        let id = self.entries[toggled?].config.id.clone();
        self.toggle(&id, surface).map(|_| id)
    }

    /// Route a key press. `Escape` closes every open panel that allows it.
    /// Returns `true` when anything closed.
    pub fn on_key<S: Surface + ?Sized>(&mut self, key: &str, surface: &S) -> bool {
        if key != ESCAPE_KEY {
            return false;
        }
        let targets: Vec<PanelId> = self
            .entries
            .iter()
            .filter(|e| e.state.is_open() && e.config.dismiss_on_escape)
            .map(|e| e.config.id.clone())
            .collect();
        let mut closed = false;
        for id in &targets {
            closed |= self.close(id, surface);
        }
        closed
    }

    /// Apply breakpoint policies after the viewport crossed `threshold`.
    pub fn on_breakpoint_change<S: Surface + ?Sized>(&mut self, threshold: u32, compact: bool, surface: &S) {
        let mut to_close = Vec::new();
        let mut to_open = Vec::new();
        for entry in &mut self.entries {
            let Some(binding) = entry.config.breakpoint else {
                continue;
            };
            if binding.threshold != threshold {
                continue;
            }
            entry.compact = compact;
            match binding.policy {
                BreakpointPolicy::Ignore => {}
                BreakpointPolicy::CloseOnWide if !compact => to_close.push(entry.config.id.clone()),
                BreakpointPolicy::CloseOnFlip => to_close.push(entry.config.id.clone()),
                BreakpointPolicy::RevealOnWide if !compact => to_open.push(entry.config.id.clone()),
                BreakpointPolicy::CloseOnWide | BreakpointPolicy::RevealOnWide => {}
            }
        }
        for id in &to_close {
            self.close(id, surface);
        }
        for id in &to_open {
            self.open(id, surface);
        }
    }

    /// Pointer entered a hover panel. Opens it on wide viewports.
    pub fn on_hover_enter<S: Surface + ?Sized>(&mut self, id: &PanelId, surface: &S) -> bool {
        if !self.hover_active(id) {
            return false;
        }
        self.open(id, surface)
    }

    /// Pointer left a hover panel (after the host's delay). Closes it on wide viewports.
    pub fn on_hover_leave<S: Surface + ?Sized>(&mut self, id: &PanelId, surface: &S) -> bool {
        if !self.hover_active(id) {
            return false;
        }
        self.close(id, surface)
    }

    // --- Queries ---

    #[must_use]
    pub fn state(&self, id: &PanelId) -> Option<PanelState> {
        self.index_of(id).map(|idx| self.entries[idx].state)
    }

    #[must_use]
    pub fn is_open(&self, id: &PanelId) -> bool {
        self.state(id).is_some_and(PanelState::is_open)
    }

    /// Open panels in registration order.
    #[must_use]
    pub fn open_panels(&self) -> Vec<PanelId> {
        self.entries.iter().filter(|e| e.state.is_open()).map(|e| e.config.id.clone()).collect()
    }

    #[must_use]
    pub fn panel_ids(&self) -> Vec<PanelId> {
        self.entries.iter().map(|e| e.config.id.clone()).collect()
    }

    #[must_use]
    pub fn config(&self, id: &PanelId) -> Option<&PanelConfig> {
        self.index_of(id).map(|idx| &self.entries[idx].config)
    }

    /// Thresholds referenced by registered panels, deduplicated and sorted.
    #[must_use]
    pub fn thresholds(&self) -> Vec<u32> {
        let mut out: Vec<u32> = self.entries.iter().filter_map(|e| e.config.breakpoint.map(|b| b.threshold)).collect();
        out.sort_unstable();
        out.dedup();
        out
    }

    // --- Internals ---

    fn index_of(&self, id: &PanelId) -> Option<usize> {
        self.entries.iter().position(|e| &e.config.id == id)
    }

    fn live_index<S: Surface + ?Sized>(&self, id: &PanelId, surface: &S) -> Option<usize> {
        let idx = self.index_of(id)?;
        if surface.exists(&self.entries[idx].config.panel) {
            Some(idx)
        } else {
            log::debug!("panel {id}: element gone, ignoring");
            None
        }
    }

    fn hover_active(&self, id: &PanelId) -> bool {
        self.index_of(id).is_some_and(|idx| {
            let entry = &self.entries[idx];
            entry.config.hover && !entry.compact
        })
    }

    fn set_state<S: Surface + ?Sized>(&mut self, idx: usize, state: PanelState, surface: &S) {
        let entry = &mut self.entries[idx];
        entry.state = state;
        let config = &entry.config;
        let open = state.is_open();

        config.presentation.apply(surface, &config.panel, config.trigger.as_ref(), state);
        if let Some(trigger) = &config.trigger {
            surface.set_attribute(trigger, "aria-expanded", if open { "true" } else { "false" });
        }
        if let Some(overlay) = &config.overlay {
            if open {
                surface.add_class(overlay, OVERLAY_OPEN_CLASS);
            } else {
                surface.remove_class(overlay, OVERLAY_OPEN_CLASS);
            }
        }
        if config.modal {
            if open {
                self.lock.acquire(&config.id, surface);
            } else {
                self.lock.release(&config.id, surface);
            }
        }
        log::debug!("panel {}: {state:?}", config.id);
    }
}
