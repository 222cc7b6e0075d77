//! Capability traits through which controllers observe and mutate the page.
//!
//! SYSTEM CONTEXT
//! ==============
//! Controllers never hold DOM handles. Every element is addressed by a
//! [`Selector`] and resolved at the moment of use, so markup that differs
//! between pages (or elements removed after start-up) degrades to no-ops
//! instead of errors.

use crate::selector::Selector;

/// Element lookup and style mutation.
///
/// Implementations apply each mutation to every element matching the
/// selector and silently skip selectors with no matches.
pub trait Surface {
    /// Whether at least one element matches `selector`.
    fn exists(&self, selector: &Selector) -> bool;

    /// Whether the first match carries `class`.
    fn has_class(&self, selector: &Selector, class: &str) -> bool;

    fn add_class(&self, selector: &Selector, class: &str);

    fn remove_class(&self, selector: &Selector, class: &str);

    fn set_attribute(&self, selector: &Selector, name: &str, value: &str);

    /// Set an inline style property.
    fn set_style(&self, selector: &Selector, property: &str, value: &str);

    fn set_text(&self, selector: &Selector, text: &str);

    /// Set an attribute on both the root `<html>` element and `<body>`.
    fn set_document_attribute(&self, name: &str, value: &str);

    /// Suspend (`true`) or restore (`false`) page scrolling.
    fn set_scroll_locked(&self, locked: bool);
}

/// The element a pointer event landed on.
pub trait PointerTarget {
    /// Whether the target or one of its ancestors matches `selector`.
    fn is_within(&self, selector: &Selector) -> bool;

    /// Whether the target itself matches `selector`.
    fn is(&self, selector: &Selector) -> bool;
}

/// Origin-scoped persistent string store.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&self, key: &str, value: &str);
}
