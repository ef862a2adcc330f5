use crate::{
    effects::selector::{Element, Selector, matches_any, parse_selector_list},
    foundation::{core::Point, error::FlipbookResult},
};

/// Page-level class present while the pointer is over an interactive element.
pub const HOVER_CLASS: &str = "hover-active";

/// Selectors that count as interactive unless configured otherwise.
pub const DEFAULT_INTERACTIVE: &str = "a, button, .btn, .feature-card, .testimonial-card";

/// Where the two cursor decorations sit after a pointer move.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CursorPlacement {
    /// The star glyph, pinned to the pointer.
    pub star: Point,
    /// The sparkle trail, which follows the pointer exactly.
    pub sparkle: Point,
}

/// Cursor follower plus hover indicator.
#[derive(Clone, Debug)]
pub struct CursorDecorator {
    interactive: Vec<Selector>,
    placement: Option<CursorPlacement>,
    hover: bool,
}

impl Default for CursorDecorator {
    fn default() -> Self {
        Self {
            interactive: default_interactive(),
            placement: None,
            hover: false,
        }
    }
}

impl CursorDecorator {
    /// Decorator treating elements matching `selectors` as interactive.
    pub fn new(selectors: &str) -> FlipbookResult<Self> {
        Ok(Self {
            interactive: parse_selector_list(selectors)?,
            ..Self::default()
        })
    }

    /// Pointer moved to client coordinates `(x, y)`.
    pub fn pointer_moved(&mut self, x: f64, y: f64) -> CursorPlacement {
        let p = Point::new(x, y);
        let placement = CursorPlacement {
            star: p,
            sparkle: p,
        };
        self.placement = Some(placement);
        placement
    }

    /// Pointer entered `el`. Returns whether the hover indicator is now on.
    pub fn pointer_entered(&mut self, el: &Element) -> bool {
        if matches_any(&self.interactive, el) {
            self.hover = true;
        }
        self.hover
    }

    /// Pointer left `el`. Returns whether the hover indicator is still on.
    pub fn pointer_left(&mut self, el: &Element) -> bool {
        if matches_any(&self.interactive, el) {
            self.hover = false;
        }
        self.hover
    }

    /// Whether [`HOVER_CLASS`] should be on the page body.
    pub fn is_hovering(&self) -> bool {
        self.hover
    }

    /// Placement from the last pointer move, if any.
    pub fn placement(&self) -> Option<CursorPlacement> {
        self.placement
    }

    /// The interactive selector set.
    pub fn interactive(&self) -> &[Selector] {
        &self.interactive
    }
}

fn default_interactive() -> Vec<Selector> {
    DEFAULT_INTERACTIVE
        .split(',')
        .filter_map(|s| Selector::parse(s).ok())
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/effects/cursor.rs"]
mod tests;
