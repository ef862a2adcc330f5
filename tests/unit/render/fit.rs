use super::*;
use crate::foundation::core::Point;

#[test]
fn exact_aspect_fills_without_offset() {
    let fit = cover_fit(SurfaceSize::new(400, 300), SurfaceSize::new(800, 600)).unwrap();
    assert_eq!(fit.ratio, 2.0);
    assert_eq!(fit.size, Size::new(800.0, 600.0));
    assert_eq!(fit.offset, Vec2::ZERO);
}

#[test]
fn wide_surface_crops_vertically() {
    let fit = cover_fit(SurfaceSize::new(400, 300), SurfaceSize::new(800, 400)).unwrap();
    assert_eq!(fit.ratio, 2.0);
    assert_eq!(fit.size, Size::new(800.0, 600.0));
    assert_eq!(fit.offset, Vec2::new(0.0, -100.0));
}

#[test]
fn tall_surface_crops_horizontally() {
    let fit = cover_fit(SurfaceSize::new(400, 300), SurfaceSize::new(300, 600)).unwrap();
    assert_eq!(fit.ratio, 2.0);
    assert_eq!(fit.size, Size::new(800.0, 600.0));
    assert_eq!(fit.offset, Vec2::new(-250.0, 0.0));
}

#[test]
fn downscale_still_covers() {
    let fit = cover_fit(SurfaceSize::new(1920, 1080), SurfaceSize::new(480, 480)).unwrap();
    assert!((fit.ratio - 480.0 / 1080.0).abs() < 1e-12);
    assert!(fit.size.width >= 480.0);
    assert!((fit.size.height - 480.0).abs() < 1e-9);
    assert!(fit.offset.x < 0.0);
    assert!(fit.offset.y.abs() < 1e-9);
}

#[test]
fn affine_maps_image_corners_to_drawn_rect() {
    let fit = cover_fit(SurfaceSize::new(400, 300), SurfaceSize::new(800, 400)).unwrap();
    let a = fit.to_affine();
    assert_eq!(a * Point::new(0.0, 0.0), Point::new(0.0, -100.0));
    assert_eq!(a * Point::new(400.0, 300.0), Point::new(800.0, 500.0));
}

#[test]
fn degenerate_sizes_have_no_fit() {
    assert!(cover_fit(SurfaceSize::new(0, 300), SurfaceSize::new(800, 600)).is_none());
    assert!(cover_fit(SurfaceSize::new(400, 300), SurfaceSize::new(800, 0)).is_none());
}
