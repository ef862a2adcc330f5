use std::collections::BTreeSet;

use crate::{
    effects::selector::{Element, ElementId, Selector, matches_any, parse_selector_list},
    foundation::{
        core::Rect,
        error::{FlipbookError, FlipbookResult},
    },
};

/// Class added to an element once it has been revealed.
pub const VISIBLE_CLASS: &str = "visible";

/// Elements revealed on scroll unless configured otherwise.
pub const DEFAULT_TARGETS: &str = ".feature-card, .testimonial-card, .hero-content";

/// Intersection settings.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RevealOptions {
    /// Fraction of the element that must be in view, in `[0, 1]`.
    pub threshold: f64,
    /// Margin added on every side of the viewport before measuring intersections, in
    /// pixels. Negative values shrink it.
    pub root_margin_px: f64,
}

impl Default for RevealOptions {
    fn default() -> Self {
        Self {
            threshold: 0.1,
            root_margin_px: 0.0,
        }
    }
}

/// One intersection report for an observed element.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IntersectionEntry {
    /// Element the report is about.
    pub target: ElementId,
    /// Whether the element overlaps the (margin-adjusted) viewport.
    pub is_intersecting: bool,
    /// Visible fraction of the element.
    pub intersection_ratio: f64,
}

/// One-way reveal of elements on first viewport entry.
#[derive(Clone, Debug)]
pub struct ScrollRevealer {
    options: RevealOptions,
    targets: Vec<Selector>,
    observed: BTreeSet<ElementId>,
    visible: BTreeSet<ElementId>,
}

impl ScrollRevealer {
    /// Revealer for elements matching `targets`.
    pub fn new(targets: &str, options: RevealOptions) -> FlipbookResult<Self> {
        if !(0.0..=1.0).contains(&options.threshold) {
            return Err(FlipbookError::validation(format!(
                "reveal threshold must be within [0, 1], got {}",
                options.threshold
            )));
        }
        if !options.root_margin_px.is_finite() {
            return Err(FlipbookError::validation(format!(
                "reveal root margin must be finite, got {}",
                options.root_margin_px
            )));
        }
        Ok(Self {
            options,
            targets: parse_selector_list(targets)?,
            observed: BTreeSet::new(),
            visible: BTreeSet::new(),
        })
    }

    /// Revealer with the stock targets and options.
    pub fn with_defaults() -> FlipbookResult<Self> {
        Self::new(DEFAULT_TARGETS, RevealOptions::default())
    }

    /// Observe every element in `page` matching a target selector. Returns how many were added.
    pub fn observe_page<'a>(&mut self, page: impl IntoIterator<Item = &'a Element>) -> usize {
        let mut added = 0;
        for el in page {
            if matches_any(&self.targets, el) && self.observed.insert(el.id) {
                added += 1;
            }
        }
        added
    }

    /// Measure `bounds` against `viewport` grown by the root margin.
    ///
    /// A zero-area element counts as fully visible when its origin lies inside the grown
    /// viewport.
    pub fn entry_for(
        &self,
        target: ElementId,
        bounds: Rect,
        viewport: Rect,
    ) -> IntersectionEntry {
        let m = self.options.root_margin_px;
        let root = viewport.abs().inflate(m, m);
        let bounds = bounds.abs();
        let overlap = bounds.intersect(root);

        let (is_intersecting, intersection_ratio) = if bounds.area() > 0.0 {
            let visible = overlap.width().max(0.0) * overlap.height().max(0.0);
            (visible > 0.0, visible / bounds.area())
        } else {
            let inside = root.width() >= 0.0
                && root.height() >= 0.0
                && root.contains(bounds.origin());
            (inside, if inside { 1.0 } else { 0.0 })
        };

        IntersectionEntry {
            target,
            is_intersecting,
            intersection_ratio,
        }
    }

    /// Apply a batch of intersection reports. Returns elements revealed by this batch.
    pub fn on_intersections(&mut self, entries: &[IntersectionEntry]) -> Vec<ElementId> {
        let mut revealed = Vec::new();
        for entry in entries {
            if !self.observed.contains(&entry.target) {
                continue;
            }
            if !entry.is_intersecting || entry.intersection_ratio < self.options.threshold {
                continue;
            }
            if self.visible.insert(entry.target) {
                revealed.push(entry.target);
            }
        }
        revealed
    }

    /// Whether `id` has been revealed.
    pub fn is_visible(&self, id: ElementId) -> bool {
        self.visible.contains(&id)
    }

    /// Number of observed elements.
    pub fn observed(&self) -> usize {
        self.observed.len()
    }

    /// Intersection settings.
    pub fn options(&self) -> RevealOptions {
        self.options
    }

    /// Stylesheet hiding targets until they carry [`VISIBLE_CLASS`].
    pub fn stylesheet(&self) -> String {
        let targets = self
            .targets
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        format!(
            "{targets} {{\n    opacity: 0;\n    transform: translateY(20px);\n    \
             transition: opacity 0.8s ease-out, transform 0.8s ease-out;\n}}\n\
             .{VISIBLE_CLASS} {{\n    opacity: 1 !important;\n    \
             transform: translateY(0) !important;\n}}\n"
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/reveal.rs"]
mod tests;
