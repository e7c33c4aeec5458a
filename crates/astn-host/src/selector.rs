//! Compound CSS selector subset
//!
//! Widgets only ever look elements up by `tag`, `#id`, `.class` or a
//! compound of those (`div.ast-notify-el`). Combinators, attribute
//! selectors and pseudo-classes are rejected.

/// Parsed compound selector
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Selector {
    /// Lowercase tag name
    pub tag: Option<String>,
    /// Required id
    pub id: Option<String>,
    /// Required class tokens
    pub classes: Vec<String>,
}

impl Selector {
    /// Parse a compound selector, `None` if it uses anything outside the subset
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        if input.is_empty() {
            return None;
        }

        let mut selector = Selector::default();

        let end = input.find(is_marker).unwrap_or(input.len());
        let tag = &input[..end];
        if !tag.is_empty() {
            if !is_name(tag) {
                return None;
            }
            selector.tag = Some(tag.to_ascii_lowercase());
        }

        let mut rest = &input[end..];
        while let Some(marker) = rest.chars().next() {
            let body = &rest[1..];
            let end = body.find(is_marker).unwrap_or(body.len());
            let name = &body[..end];
            if !is_name(name) {
                return None;
            }
            match marker {
                '#' => {
                    if selector.id.is_some() {
                        return None;
                    }
                    selector.id = Some(name.to_string());
                }
                _ => selector.classes.push(name.to_string()),
            }
            rest = &body[end..];
        }

        Some(selector)
    }

    /// Check an element described by its tag, id and class attribute
    pub fn matches(&self, tag: &str, id: Option<&str>, class_attr: Option<&str>) -> bool {
        if let Some(want) = &self.tag {
            if !want.eq_ignore_ascii_case(tag) {
                return false;
            }
        }
        if let Some(want) = &self.id {
            if id != Some(want.as_str()) {
                return false;
            }
        }
        let tokens: Vec<&str> = class_attr.unwrap_or("").split_whitespace().collect();
        self.classes.iter().all(|c| tokens.contains(&c.as_str()))
    }
}

fn is_marker(c: char) -> bool {
    c == '#' || c == '.'
}

fn is_name(s: &str) -> bool {
    !s.is_empty()
        && s
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}
