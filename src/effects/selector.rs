use crate::foundation::error::{FlipbookError, FlipbookResult};

/// Opaque identity of a page element.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub u64);

/// The parts of a page element that selectors match against.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Element {
    /// Identity.
    pub id: ElementId,
    /// Lower-case tag name, e.g. `button`.
    pub tag: String,
    /// Class list.
    pub classes: Vec<String>,
}

impl Element {
    /// Element with no classes.
    pub fn new(id: u64, tag: impl Into<String>) -> Self {
        Self {
            id: ElementId(id),
            tag: tag.into().to_ascii_lowercase(),
            classes: Vec::new(),
        }
    }

    /// Add a class.
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    /// Whether the class list contains `class`.
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }
}

/// Simple selector: a tag name or a single `.class`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Selector {
    /// Matches elements with this tag name.
    Tag(String),
    /// Matches elements carrying this class.
    Class(String),
}

impl Selector {
    /// Parse `tag` or `.class`.
    pub fn parse(s: &str) -> FlipbookResult<Self> {
        let s = s.trim();
        let valid = |name: &str| {
            !name.is_empty()
                && name
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        };

        match s.strip_prefix('.') {
            Some(class) if valid(class) => Ok(Self::Class(class.to_string())),
            None if valid(s) => Ok(Self::Tag(s.to_ascii_lowercase())),
            _ => Err(FlipbookError::validation(format!(
                "unsupported selector '{s}' (expected `tag` or `.class`)"
            ))),
        }
    }

    /// Whether `el` matches.
    pub fn matches(&self, el: &Element) -> bool {
        match self {
            Self::Tag(tag) => el.tag == *tag,
            Self::Class(class) => el.has_class(class),
        }
    }
}

impl std::fmt::Display for Selector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Tag(tag) => f.write_str(tag),
            Self::Class(class) => write!(f, ".{class}"),
        }
    }
}

/// Parse a comma-separated selector list such as `a, button, .btn`.
pub fn parse_selector_list(list: &str) -> FlipbookResult<Vec<Selector>> {
    list.split(',').map(Selector::parse).collect()
}

/// Whether any selector in `selectors` matches `el`.
pub fn matches_any(selectors: &[Selector], el: &Element) -> bool {
    selectors.iter().any(|s| s.matches(el))
}

#[cfg(test)]
#[path = "../../tests/unit/effects/selector.rs"]
mod tests;
