use super::*;

fn entry(id: u64, is_intersecting: bool, ratio: f64) -> IntersectionEntry {
    IntersectionEntry {
        target: ElementId(id),
        is_intersecting,
        intersection_ratio: ratio,
    }
}

fn page() -> Vec<Element> {
    vec![
        Element::new(1, "div").with_class("feature-card"),
        Element::new(2, "div").with_class("testimonial-card"),
        Element::new(3, "section").with_class("hero-content"),
        Element::new(4, "footer"),
    ]
}

#[test]
fn defaults() {
    let r = ScrollRevealer::with_defaults().unwrap();
    assert_eq!(r.options().threshold, 0.1);
    assert_eq!(r.options().root_margin_px, 0.0);
}

#[test]
fn observes_only_targets_once() {
    let mut r = ScrollRevealer::with_defaults().unwrap();
    let page = page();
    assert_eq!(r.observe_page(&page), 3);
    assert_eq!(r.observe_page(&page), 0);
    assert_eq!(r.observed(), 3);
}

#[test]
fn reveal_is_one_way() {
    let mut r = ScrollRevealer::with_defaults().unwrap();
    r.observe_page(&page());

    assert!(r.on_intersections(&[entry(1, false, 0.0)]).is_empty());
    assert_eq!(r.on_intersections(&[entry(1, true, 0.5)]), vec![ElementId(1)]);
    assert!(r.is_visible(ElementId(1)));

    // Scrolling back out never hides it, and re-entry reveals nothing new.
    assert!(r.on_intersections(&[entry(1, false, 0.0)]).is_empty());
    assert!(r.is_visible(ElementId(1)));
    assert!(r.on_intersections(&[entry(1, true, 1.0)]).is_empty());
}

#[test]
fn threshold_and_observation_gate_reveals() {
    let mut r = ScrollRevealer::with_defaults().unwrap();
    r.observe_page(&page());

    let revealed = r.on_intersections(&[
        entry(2, true, 0.05),
        entry(3, true, 0.1),
        entry(4, true, 1.0),
    ]);
    assert_eq!(revealed, vec![ElementId(3)]);
    assert!(!r.is_visible(ElementId(2)));
    assert!(!r.is_visible(ElementId(4)));
}

#[test]
fn invalid_threshold_is_rejected() {
    let opts = RevealOptions {
        threshold: 1.5,
        ..RevealOptions::default()
    };
    assert!(ScrollRevealer::new(DEFAULT_TARGETS, opts).is_err());
}

#[test]
fn stylesheet_hides_targets_until_visible() {
    let r = ScrollRevealer::with_defaults().unwrap();
    let css = r.stylesheet();
    assert!(css.starts_with(".feature-card, .testimonial-card, .hero-content {"));
    assert!(css.contains("transform: translateY(20px);"));
    assert!(css.contains(".visible {"));
    assert!(css.contains("opacity: 1 !important;"));
}

fn with_margin(margin: f64) -> ScrollRevealer {
    let opts = RevealOptions {
        root_margin_px: margin,
        ..RevealOptions::default()
    };
    ScrollRevealer::new(DEFAULT_TARGETS, opts).unwrap()
}

#[test]
fn entry_measures_visible_fraction() {
    let r = ScrollRevealer::with_defaults().unwrap();
    let viewport = Rect::new(0.0, 0.0, 100.0, 100.0);

    let e = r.entry_for(ElementId(1), Rect::new(0.0, 90.0, 100.0, 190.0), viewport);
    assert!(e.is_intersecting);
    assert_eq!(e.intersection_ratio, 0.1);

    let below = r.entry_for(ElementId(1), Rect::new(0.0, 100.0, 100.0, 200.0), viewport);
    assert!(!below.is_intersecting);
    assert_eq!(below.intersection_ratio, 0.0);
}

#[test]
fn root_margin_grows_the_viewport() {
    let mut r = with_margin(50.0);
    r.observe_page(&page());
    let viewport = Rect::new(0.0, 0.0, 100.0, 100.0);

    let e = r.entry_for(ElementId(1), Rect::new(0.0, 100.0, 100.0, 200.0), viewport);
    assert!(e.is_intersecting);
    assert_eq!(e.intersection_ratio, 0.5);
    assert_eq!(r.on_intersections(&[e]), vec![ElementId(1)]);
}

#[test]
fn negative_root_margin_shrinks_the_viewport() {
    let r = with_margin(-20.0);
    let viewport = Rect::new(0.0, 0.0, 100.0, 100.0);

    let e = r.entry_for(ElementId(1), Rect::new(0.0, 90.0, 100.0, 190.0), viewport);
    assert!(!e.is_intersecting);

    let dot = r.entry_for(ElementId(2), Rect::new(50.0, 50.0, 50.0, 50.0), viewport);
    assert!(dot.is_intersecting);
    assert_eq!(dot.intersection_ratio, 1.0);
}

#[test]
fn non_finite_root_margin_is_rejected() {
    let opts = RevealOptions {
        root_margin_px: f64::NAN,
        ..RevealOptions::default()
    };
    assert!(ScrollRevealer::new(DEFAULT_TARGETS, opts).is_err());
}
