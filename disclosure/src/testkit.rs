//! In-memory implementations of the capability traits for unit tests.
//!
//! Selectors are opaque keys here: an element "matches" a selector only when
//! it was inserted under exactly that text.

use std::cell::{Cell, RefCell};
use std::collections::{BTreeSet, HashMap};

use crate::selector::Selector;
use crate::surface::{KeyValueStore, PointerTarget, Surface};

#[derive(Debug, Default, Clone)]
pub struct FakeElement {
    pub classes: BTreeSet<String>,
    pub attributes: HashMap<String, String>,
    pub styles: HashMap<String, String>,
    pub text: String,
}

#[derive(Debug, Default)]
pub struct MemorySurface {
    elements: RefCell<HashMap<String, FakeElement>>,
    document_attributes: RefCell<HashMap<String, String>>,
    scroll_locked: Cell<bool>,
    scroll_writes: Cell<usize>,
}

impl MemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: add an element with the given classes.
    pub fn with(self, selector: &str, classes: &[&str]) -> Self {
        self.insert(selector, classes);
        self
    }

    pub fn insert(&self, selector: &str, classes: &[&str]) {
        let element = FakeElement {
            classes: classes.iter().map(|c| (*c).to_owned()).collect(),
            ..FakeElement::default()
        };
        self.elements.borrow_mut().insert(selector.to_owned(), element);
    }

    pub fn remove(&self, selector: &str) {
        self.elements.borrow_mut().remove(selector);
    }

    pub fn classes(&self, selector: &str) -> Vec<String> {
        self.elements
            .borrow()
            .get(selector)
            .map(|e| e.classes.iter().cloned().collect())
            .unwrap_or_default()
    }

    pub fn has(&self, selector: &str, class: &str) -> bool {
        self.elements.borrow().get(selector).is_some_and(|e| e.classes.contains(class))
    }

    pub fn attr(&self, selector: &str, name: &str) -> Option<String> {
        self.elements.borrow().get(selector).and_then(|e| e.attributes.get(name).cloned())
    }

    pub fn style(&self, selector: &str, property: &str) -> Option<String> {
        self.elements.borrow().get(selector).and_then(|e| e.styles.get(property).cloned())
    }

    pub fn text(&self, selector: &str) -> Option<String> {
        self.elements.borrow().get(selector).map(|e| e.text.clone())
    }

    pub fn document_attr(&self, name: &str) -> Option<String> {
        self.document_attributes.borrow().get(name).cloned()
    }

    pub fn scroll_locked(&self) -> bool {
        self.scroll_locked.get()
    }

    pub fn scroll_writes(&self) -> usize {
        self.scroll_writes.get()
    }

    fn with_element(&self, selector: &Selector, f: impl FnOnce(&mut FakeElement)) {
        if let Some(element) = self.elements.borrow_mut().get_mut(selector.as_str()) {
            f(element);
        }
    }
}

impl Surface for MemorySurface {
    fn exists(&self, selector: &Selector) -> bool {
        self.elements.borrow().contains_key(selector.as_str())
    }

    fn has_class(&self, selector: &Selector, class: &str) -> bool {
        self.has(selector.as_str(), class)
    }

    fn add_class(&self, selector: &Selector, class: &str) {
        self.with_element(selector, |e| {
            e.classes.insert(class.to_owned());
        });
    }

    fn remove_class(&self, selector: &Selector, class: &str) {
        self.with_element(selector, |e| {
            e.classes.remove(class);
        });
    }

    fn set_attribute(&self, selector: &Selector, name: &str, value: &str) {
        self.with_element(selector, |e| {
            e.attributes.insert(name.to_owned(), value.to_owned());
        });
    }

    fn set_style(&self, selector: &Selector, property: &str, value: &str) {
        self.with_element(selector, |e| {
            e.styles.insert(property.to_owned(), value.to_owned());
        });
    }

    fn set_text(&self, selector: &Selector, text: &str) {
        self.with_element(selector, |e| text.clone_into(&mut e.text));
    }

    fn set_document_attribute(&self, name: &str, value: &str) {
        self.document_attributes.borrow_mut().insert(name.to_owned(), value.to_owned());
    }

    fn set_scroll_locked(&self, locked: bool) {
        self.scroll_locked.set(locked);
        self.scroll_writes.set(self.scroll_writes.get() + 1);
    }
}

/// A click target described by its ancestor chain, innermost first.
#[derive(Debug, Clone)]
pub struct Click {
    path: Vec<Selector>,
}

impl Click {
    pub fn on(path: &[&str]) -> Self {
        Self { path: path.iter().map(|s| Selector::from(*s)).collect() }
    }

    /// A click on an element none of the controllers know about.
    pub fn elsewhere() -> Self {
        Self::on(&["#page-content"])
    }
}

impl PointerTarget for Click {
    fn is_within(&self, selector: &Selector) -> bool {
        self.path.contains(selector)
    }

    fn is(&self, selector: &Selector) -> bool {
        self.path.first() == Some(selector)
    }
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(self, key: &str, value: &str) -> Self {
        self.set(key, value);
        self
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.values.borrow_mut().insert(key.to_owned(), value.to_owned());
    }
}
