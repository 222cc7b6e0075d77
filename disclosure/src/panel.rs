//! Panel configuration: what a panel is, how it looks open, and how it is dismissed.
//!
//! DESIGN
//! ======
//! The mobile drawer, dropdown menus, the tab menu, the dashboard sidebar and
//! the filter drawers differ only in configuration: which classes express
//! "open", whether the panel holds the scroll lock, which breakpoint it reacts
//! to and how. One [`PanelConfig`] per panel feeds a single
//! [`crate::disclosure::DisclosureController`].

#[cfg(test)]
#[path = "panel_test.rs"]
mod panel_test;

use std::fmt;

use crate::selector::Selector;
use crate::surface::Surface;

/// Class applied to a panel's overlay while the panel is open.
pub const OVERLAY_OPEN_CLASS: &str = "show";

/// Stable identifier for a registered panel.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PanelId(String);

impl PanelId {
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PanelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PanelId {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for PanelId {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

/// Identifier of an exclusive group: at most one member open at a time.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GroupId(String);

impl GroupId {
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }
}

impl From<&str> for GroupId {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

/// Observable visibility state of a panel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PanelState {
    #[default]
    Closed,
    Open,
}

impl PanelState {
    #[must_use]
    pub fn is_open(self) -> bool {
        matches!(self, Self::Open)
    }

    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Open => Self::Closed,
            Self::Closed => Self::Open,
        }
    }
}

/// What a panel does when the viewport crosses its breakpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BreakpointPolicy {
    /// Resizes never change the panel.
    #[default]
    Ignore,
    /// Close when the viewport becomes wide (compact-only panels).
    CloseOnWide,
    /// Close on any crossing, in either direction.
    CloseOnFlip,
    /// Force open when the viewport becomes wide.
    RevealOnWide,
}

/// A breakpoint threshold and the panel's reaction to crossing it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BreakpointBinding {
    pub threshold: u32,
    pub policy: BreakpointPolicy,
}

/// An inline style that differs between the open and closed states.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleRule {
    pub selector: Selector,
    pub property: String,
    pub open: String,
    pub closed: String,
}

/// How a panel's state shows up in the markup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Presentation {
    /// Added to the panel while open, removed while closed.
    pub open_classes: Vec<String>,
    /// Added to the panel while closed, removed while open.
    pub closed_classes: Vec<String>,
    /// Added to the trigger while open.
    pub trigger_classes: Vec<String>,
    /// Inline styles on related elements (chevrons, hamburger lines).
    pub styles: Vec<StyleRule>,
}

impl Presentation {
    /// Panels hidden with a `hidden` utility class.
    #[must_use]
    pub fn hidden_when_closed() -> Self {
        Self { closed_classes: vec!["hidden".to_owned()], ..Self::default() }
    }

    /// Panels revealed with an `active` class.
    #[must_use]
    pub fn active_when_open() -> Self {
        Self { open_classes: vec!["active".to_owned()], ..Self::default() }
    }

    /// Off-canvas drawers: `show` while open, translated off screen while closed.
    #[must_use]
    pub fn off_canvas() -> Self {
        Self {
            open_classes: vec!["show".to_owned()],
            closed_classes: vec!["-translate-x-full".to_owned()],
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_trigger_class(mut self, class: &str) -> Self {
        self.trigger_classes.push(class.to_owned());
        self
    }

    #[must_use]
    pub fn with_style(mut self, selector: Selector, property: &str, open: &str, closed: &str) -> Self {
        self.styles.push(StyleRule {
            selector,
            property: property.to_owned(),
            open: open.to_owned(),
            closed: closed.to_owned(),
        });
        self
    }

    /// Read the state currently expressed by the markup.
    ///
    /// The first open class decides when present; otherwise the panel is open
    /// unless it carries its first closed class.
    pub fn read_state<S: Surface + ?Sized>(&self, surface: &S, panel: &Selector) -> PanelState {
        let open = if let Some(class) = self.open_classes.first() {
            surface.has_class(panel, class)
        } else if let Some(class) = self.closed_classes.first() {
            !surface.has_class(panel, class)
        } else {
            false
        };
        if open { PanelState::Open } else { PanelState::Closed }
    }

    /// Write `state` to the panel, its trigger and the related style targets.
    pub fn apply<S: Surface + ?Sized>(&self, surface: &S, panel: &Selector, trigger: Option<&Selector>, state: PanelState) {
        let open = state.is_open();
        for class in &self.open_classes {
            if open {
                surface.add_class(panel, class);
            } else {
                surface.remove_class(panel, class);
            }
        }
        for class in &self.closed_classes {
            if open {
                surface.remove_class(panel, class);
            } else {
                surface.add_class(panel, class);
            }
        }
        if let Some(trigger) = trigger {
            for class in &self.trigger_classes {
                if open {
                    surface.add_class(trigger, class);
                } else {
                    surface.remove_class(trigger, class);
                }
            }
        }
        for rule in &self.styles {
            let value = if open { &rule.open } else { &rule.closed };
            surface.set_style(&rule.selector, &rule.property, value);
        }
    }
}

/// Everything the disclosure controller needs to know about one panel.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelConfig {
    pub id: PanelId,
    pub panel: Selector,
    /// Element whose click toggles the panel; receives `aria-expanded`.
    pub trigger: Option<Selector>,
    /// Clicks inside any of these close the panel.
    pub dismiss: Vec<Selector>,
    /// A click whose target is the panel element itself closes it.
    pub backdrop: bool,
    /// Shown alongside the panel with [`OVERLAY_OPEN_CLASS`].
    pub overlay: Option<Selector>,
    pub group: Option<GroupId>,
    /// Holds the page scroll lock while open.
    pub modal: bool,
    pub dismiss_on_escape: bool,
    pub breakpoint: Option<BreakpointBinding>,
    /// Trigger and outside clicks only act while the viewport is compact.
    pub compact_interactive: bool,
    /// Pointer hover opens the panel on wide viewports.
    pub hover: bool,
    /// Registered closed whatever the markup says.
    pub start_closed: bool,
    pub presentation: Presentation,
}

impl PanelConfig {
    #[must_use]
    pub fn new(id: impl Into<PanelId>, panel: Selector) -> Self {
        Self {
            id: id.into(),
            panel,
            trigger: None,
            dismiss: Vec::new(),
            backdrop: false,
            overlay: None,
            group: None,
            modal: false,
            dismiss_on_escape: true,
            breakpoint: None,
            compact_interactive: false,
            hover: false,
            start_closed: false,
            presentation: Presentation::hidden_when_closed(),
        }
    }

    #[must_use]
    pub fn trigger(mut self, trigger: Selector) -> Self {
        self.trigger = Some(trigger);
        self
    }

    #[must_use]
    pub fn dismiss(mut self, handle: Selector) -> Self {
        self.dismiss.push(handle);
        self
    }

    #[must_use]
    pub fn backdrop(mut self) -> Self {
        self.backdrop = true;
        self
    }

    #[must_use]
    pub fn overlay(mut self, overlay: Selector) -> Self {
        self.overlay = Some(overlay);
        self
    }

    #[must_use]
    pub fn group(mut self, group: impl Into<GroupId>) -> Self {
        self.group = Some(group.into());
        self
    }

    #[must_use]
    pub fn modal(mut self) -> Self {
        self.modal = true;
        self
    }

    #[must_use]
    pub fn keep_on_escape(mut self) -> Self {
        self.dismiss_on_escape = false;
        self
    }

    #[must_use]
    pub fn breakpoint(mut self, threshold: u32, policy: BreakpointPolicy) -> Self {
        self.breakpoint = Some(BreakpointBinding { threshold, policy });
        self
    }

    /// Shorthand for a panel that only exists in compact mode and closes when
    /// the viewport becomes wide.
    #[must_use]
    pub fn compact_only(self, threshold: u32) -> Self {
        self.breakpoint(threshold, BreakpointPolicy::CloseOnWide)
    }

    #[must_use]
    pub fn compact_interactive(mut self) -> Self {
        self.compact_interactive = true;
        self
    }

    #[must_use]
    pub fn hover(mut self) -> Self {
        self.hover = true;
        self
    }

    #[must_use]
    pub fn start_closed(mut self) -> Self {
        self.start_closed = true;
        self
    }

    #[must_use]
    pub fn presentation(mut self, presentation: Presentation) -> Self {
        self.presentation = presentation;
        self
    }
}
