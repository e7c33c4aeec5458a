//! DOM helpers shared by every widget
//!
//! Class manipulation works on whitespace-separated tokens, so removing
//! `show` never touches `show-toast`.

use std::sync::LazyLock;

use astn_host::{Host, HostError};
use regex::Regex;

/// Opacity used when the requested value is not a number
pub const FALLBACK_OPACITY: f64 = 0.8;

/// A complete script element, body included
static SCRIPT_ELEMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<script[^>]*>.*?</script>").expect("script element regex should compile")
});

/// A stray opening or closing script tag
static SCRIPT_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<script[^>]+>|<script>|</script>").expect("script tag regex should compile")
});

// =============================================================================
// Class tokens
// =============================================================================

/// Add (`present = true`) or remove a class token
pub fn set_class<H: Host>(host: &mut H, node: &H::Node, name: &str, present: bool) {
    let current = host.attribute(node, "class").unwrap_or_default();
    let mut tokens: Vec<&str> = current.split_whitespace().collect();
    let has = tokens.contains(&name);

    if present == has {
        return;
    }
    if present {
        tokens.push(name);
    } else {
        tokens.retain(|token| *token != name);
    }
    host.set_attribute(node, "class", &tokens.join(" "));
}

/// Exact class token membership
pub fn has_class<H: Host>(host: &H, node: &H::Node, name: &str) -> bool {
    host.attribute(node, "class")
        .map(|classes| classes.split_whitespace().any(|token| token == name))
        .unwrap_or(false)
}

/// `node` itself if it matches, else the nearest matching ancestor
pub fn closest<H: Host>(host: &H, node: &H::Node, selector: &str) -> Option<H::Node> {
    let mut current = Some(node.clone());
    while let Some(candidate) = current {
        if host.matches(&candidate, selector) {
            return Some(candidate);
        }
        current = host.parent(&candidate);
    }
    None
}

// =============================================================================
// Element construction
// =============================================================================

/// Create an element carrying an id
pub(crate) fn element_with_id<H: Host>(host: &mut H, tag: &str, id: &str) -> Result<H::Node, HostError> {
    let node = host.create_element(tag)?;
    host.set_attribute(&node, "id", id);
    Ok(node)
}

/// Create an element carrying a class
pub(crate) fn element_with_class<H: Host>(
    host: &mut H,
    tag: &str,
    class: &str,
) -> Result<H::Node, HostError> {
    let node = host.create_element(tag)?;
    host.set_attribute(&node, "class", class);
    Ok(node)
}

/// Create an element with an id and append it to `parent`
pub(crate) fn child_with_id<H: Host>(
    host: &mut H,
    parent: &H::Node,
    tag: &str,
    id: &str,
) -> Result<H::Node, HostError> {
    let node = element_with_id(host, tag, id)?;
    host.append_child(parent, &node)?;
    Ok(node)
}

/// Create an element with a class and append it to `parent`
pub(crate) fn child_with_class<H: Host>(
    host: &mut H,
    parent: &H::Node,
    tag: &str,
    class: &str,
) -> Result<H::Node, HostError> {
    let node = element_with_class(host, tag, class)?;
    host.append_child(parent, &node)?;
    Ok(node)
}

/// Format a pixel length
pub(crate) fn px(value: f64) -> String {
    format!("{}px", value)
}

// =============================================================================
// Input validation
// =============================================================================

/// Strip script elements and script tags from caller text
///
/// Complete `<script ...>...</script>` elements go with their body, then
/// stray tags are removed until nothing changes, so the result never
/// contains a script tag and sanitizing twice is the same as once.
pub fn sanitize(text: &str) -> String {
    let mut current = text.to_string();
    loop {
        let without_elements = SCRIPT_ELEMENT.replace_all(&current, "");
        let next = SCRIPT_TAG.replace_all(&without_elements, "").into_owned();
        if next == current {
            return current;
        }
        current = next;
    }
}

/// Clamp an opacity into `[0, 1]`; NaN becomes [`FALLBACK_OPACITY`]
pub fn clamp_opacity(value: f64) -> f64 {
    if value.is_nan() {
        FALLBACK_OPACITY
    } else {
        value.clamp(0.0, 1.0)
    }
}
