use super::*;

#[test]
fn default_selector_set() {
    let c = CursorDecorator::default();
    let shown: Vec<String> = c.interactive().iter().map(ToString::to_string).collect();
    assert_eq!(
        shown,
        vec!["a", "button", ".btn", ".feature-card", ".testimonial-card"]
    );
}

#[test]
fn pointer_move_places_both_decorations() {
    let mut c = CursorDecorator::default();
    assert!(c.placement().is_none());

    let p = c.pointer_moved(120.5, 48.0);
    assert_eq!(p.star, Point::new(120.5, 48.0));
    assert_eq!(p.sparkle, p.star);
    assert_eq!(c.placement(), Some(p));
}

#[test]
fn hover_toggles_only_for_interactive_elements() {
    let mut c = CursorDecorator::default();
    let button = Element::new(1, "button");
    let text = Element::new(2, "p");

    assert!(!c.pointer_entered(&text));
    assert!(c.pointer_entered(&button));
    assert!(c.is_hovering());

    // Leaving a non-interactive element leaves the indicator alone.
    assert!(c.pointer_left(&text));
    assert!(!c.pointer_left(&button));
    assert!(!c.is_hovering());
}

#[test]
fn custom_selectors() {
    let mut c = CursorDecorator::new(".cta").unwrap();
    assert!(!c.pointer_entered(&Element::new(1, "a")));
    assert!(c.pointer_entered(&Element::new(2, "div").with_class("cta")));

    assert!(CursorDecorator::new("a b").is_err());
}
