//! Current-page link matching for navigation highlighting.

#[cfg(test)]
#[path = "nav_test.rs"]
mod nav_test;

/// Page assumed when the path ends in `/`.
pub const INDEX_PAGE: &str = "index.html";

/// File name of the current page: the last path segment, or [`INDEX_PAGE`].
#[must_use]
pub fn current_page(pathname: &str) -> &str {
    match pathname.rsplit('/').next() {
        Some(segment) if !segment.is_empty() => segment,
        _ => INDEX_PAGE,
    }
}

/// Whether a navigation link's `href` points at `current`.
#[must_use]
pub fn link_matches(href: &str, current: &str) -> bool {
    !href.is_empty() && href == current
}
