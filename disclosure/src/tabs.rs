//! Single-selection tab set.
//!
//! Markup contract: every trigger is a `button[data-tab="<id>"]` (a desktop
//! `.tab-btn` and a mobile `.tab-menu-item` may share an id) and each tab's
//! content lives in `#tab-<id>`. The selected trigger and content panel carry
//! the `active` class.
//!
//! A tab set may be paired with a compact-mode menu registered in the
//! [`DisclosureController`]; selecting a tab closes that menu.

#[cfg(test)]
#[path = "tabs_test.rs"]
mod tabs_test;

use crate::disclosure::DisclosureController;
use crate::panel::PanelId;
use crate::selector::Selector;
use crate::surface::{PointerTarget, Surface};

/// Class marking the selected trigger and visible content panel.
pub const SELECTED_CLASS: &str = "active";

/// A tab as discovered in the markup, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabEntry {
    pub id: String,
    pub initially_selected: bool,
}

impl TabEntry {
    #[must_use]
    pub fn new(id: impl Into<String>, initially_selected: bool) -> Self {
        Self { id: id.into(), initially_selected }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Tab {
    id: String,
    trigger: Selector,
    content: Selector,
}

impl Tab {
    fn new(id: &str) -> Self {
        Self {
            id: id.to_owned(),
            trigger: Selector::new(format!("button{}", Selector::attribute("data-tab", id))),
            content: Selector::id(&format!("tab-{id}")),
        }
    }
}

#[derive(Debug, Clone)]
pub struct TabSwitchController {
    tabs: Vec<Tab>,
    selected: usize,
    menu: Option<PanelId>,
}

impl TabSwitchController {
    /// Build the tab set and apply the initial selection.
    ///
    /// The first entry marked selected wins; with none marked, the first tab
    /// in document order is selected. Repeated ids collapse onto their first
    /// occurrence. Returns `None` when there are no tabs.
    pub fn new<S: Surface + ?Sized>(entries: Vec<TabEntry>, menu: Option<PanelId>, surface: &S) -> Option<Self> {
        let mut tabs: Vec<Tab> = Vec::new();
        let mut marked: Option<usize> = None;
        for entry in entries {
            let idx = if let Some(idx) = tabs.iter().position(|t| t.id == entry.id) {
                idx
            } else {
                tabs.push(Tab::new(&entry.id));
                tabs.len() - 1
            };
            if entry.initially_selected && marked.is_none() {
                marked = Some(idx);
            }
        }
        if tabs.is_empty() {
            return None;
        }

        let controller = Self { tabs, selected: marked.unwrap_or(0), menu };
        controller.apply(surface);
        log::debug!("tabs: {} tabs, selected {}", controller.tabs.len(), controller.selected_tab());
        Some(controller)
    }

    /// Select `tab_id`. Unknown ids are ignored and return `false`.
    ///
    /// Closes the companion menu when it is open.
    pub fn select<S: Surface + ?Sized>(
        &mut self,
        tab_id: &str,
        surface: &S,
        disclosure: &mut DisclosureController,
    ) -> bool {
        let Some(idx) = self.tabs.iter().position(|t| t.id == tab_id) else {
            log::debug!("tabs: unknown tab {tab_id}");
            return false;
        };
        self.selected = idx;
        self.apply(surface);
        if let Some(menu) = &self.menu {
            if disclosure.is_open(menu) {
                disclosure.close(menu, surface);
            }
        }
        true
    }

    /// Route a document click landing on a tab trigger. Returns `true` when a tab was selected.
    pub fn on_click<S, T>(&mut self, target: &T, surface: &S, disclosure: &mut DisclosureController) -> bool
    where
        S: Surface + ?Sized,
        T: PointerTarget + ?Sized,
    {
        let Some(id) = self.tabs.iter().find(|t| target.is_within(&t.trigger)).map(|t| t.id.clone()) else {
            return false;
        };
        self.select(&id, surface, disclosure)
    }

    #[must_use]
    pub fn selected_tab(&self) -> &str {
        &self.tabs[self.selected].id
    }

    #[must_use]
    pub fn tab_ids(&self) -> Vec<&str> {
        self.tabs.iter().map(|t| t.id.as_str()).collect()
    }

    fn apply<S: Surface + ?Sized>(&self, surface: &S) {
        for (idx, tab) in self.tabs.iter().enumerate() {
            if idx == self.selected {
                continue;
            }
            surface.remove_class(&tab.content, SELECTED_CLASS);
            surface.remove_class(&tab.trigger, SELECTED_CLASS);
            surface.set_attribute(&tab.trigger, "aria-selected", "false");
        }
        let tab = &self.tabs[self.selected];
        surface.add_class(&tab.content, SELECTED_CLASS);
        surface.add_class(&tab.trigger, SELECTED_CLASS);
        surface.set_attribute(&tab.trigger, "aria-selected", "true");
    }
}
