//! Visibility state management for page chrome: menus, drawers, dropdowns and tabs.
//!
//! This crate holds the browser-independent half of the site UI. Controllers
//! own every piece of mutable state (open panels, selected tab, last-known
//! breakpoint classification, current theme) and talk to the page only through
//! the capability traits in [`surface`]. The `site-ui` WASM crate implements
//! those traits on top of `web-sys` and wires DOM events to the controllers.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`selector`] | CSS selector handles for page elements |
//! | [`surface`] | Capability traits: element mutation, pointer targets, key-value store |
//! | [`breakpoint`] | Compact/wide viewport classification and change notification |
//! | [`panel`] | Panel configuration, state and presentation |
//! | [`scroll_lock`] | Page scroll lock shared by modal panels |
//! | [`disclosure`] | Open/close state machine with exclusive groups and dismissal rules |
//! | [`tabs`] | Single-selection tab set with an optional companion menu |
//! | [`theme`] | Persisted light/dark theme switch |
//! | [`nav`] | Current-page link matching for navigation highlighting |

pub mod breakpoint;
pub mod disclosure;
pub mod nav;
pub mod panel;
pub mod scroll_lock;
pub mod selector;
pub mod surface;
pub mod tabs;
pub mod theme;

#[cfg(test)]
mod testkit;
