#[cfg(test)]
#[path = "selector_test.rs"]
mod selector_test;

use std::fmt;

/// A CSS selector addressing zero or more page elements.
///
/// Mutations through a [`crate::surface::Surface`] apply to every match. A
/// selector with no matches is treated as "absent" and mutations become no-ops.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Selector(String);

impl Selector {
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Selector for the element with the given `id` attribute. Any id is
    /// accepted; characters CSS would misread are escaped.
    #[must_use]
    pub fn id(id: &str) -> Self {
        Self(format!("#{}", escape_identifier(id)))
    }

    /// Selector for elements carrying `name="value"`, with `value` escaped
    /// as a CSS string.
    #[must_use]
    pub fn attribute(name: &str, value: &str) -> Self {
        Self(format!("[{}=\"{}\"]", escape_identifier(name), escape_string(value)))
    }

    /// Descendants of this selector matching `inner`.
    #[must_use]
    pub fn descendant(&self, inner: &str) -> Self {
        Self(format!("{} {inner}", self.0))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Selector {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for Selector {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

/// Serialize `raw` as a CSS identifier, following `CSS.escape`.
fn escape_identifier(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut prev: Option<char> = None;
    for (i, c) in raw.chars().enumerate() {
        match c {
            '\0' => out.push('\u{FFFD}'),
            '\u{1}'..='\u{1f}' | '\u{7f}' => push_code_point(&mut out, c),
            '0'..='9' if i == 0 || (i == 1 && prev == Some('-')) => push_code_point(&mut out, c),
            '-' if i == 0 && raw.len() == 1 => out.push_str("\\-"),
            c if c.is_ascii_alphanumeric() || c == '-' || c == '_' || !c.is_ascii() => out.push(c),
            c => {
                out.push('\\');
                out.push(c);
            }
        }
        prev = Some(c);
    }
    out
}

/// Serialize `raw` for use inside a double-quoted CSS string.
fn escape_string(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '\0' => out.push('\u{FFFD}'),
            '\u{1}'..='\u{1f}' | '\u{7f}' => push_code_point(&mut out, c),
            '"' | '\\' => {
                out.push('\\');
                out.push(c);
            }
            c => out.push(c),
        }
    }
    out
}

/// `\<hex> `: the trailing space ends the escape.
fn push_code_point(out: &mut String, c: char) {
    out.push_str(&format!("\\{:x} ", u32::from(c)));
}
