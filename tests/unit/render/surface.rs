use std::sync::Arc;

use super::*;

#[derive(Default)]
struct Recording {
    size: SurfaceSize,
    ops: Vec<String>,
}

impl DisplaySurface for Recording {
    fn size(&self) -> SurfaceSize {
        self.size
    }

    fn resize(&mut self, size: SurfaceSize) -> FlipbookResult<()> {
        self.size = size;
        Ok(())
    }

    fn clear(&mut self) -> FlipbookResult<()> {
        self.ops.push("clear".to_string());
        Ok(())
    }

    fn draw_image(&mut self, frame: &DecodedFrame, transform: Affine) -> FlipbookResult<()> {
        let c = transform.as_coeffs();
        self.ops.push(format!(
            "draw {}x{} scale={} at=({}, {})",
            frame.width, frame.height, c[0], c[4], c[5]
        ));
        Ok(())
    }
}

fn frame(w: u32, h: u32) -> DecodedFrame {
    DecodedFrame {
        width: w,
        height: h,
        rgba8_premul: Arc::new(vec![255; (w * h * 4) as usize]),
    }
}

#[test]
fn render_cover_clears_then_draws() {
    let mut surface = Recording {
        size: SurfaceSize::new(800, 400),
        ..Recording::default()
    };
    let fit = render_cover(&mut surface, &frame(400, 300)).unwrap().unwrap();
    assert_eq!(fit.ratio, 2.0);
    assert_eq!(
        surface.ops,
        vec!["clear", "draw 400x300 scale=2 at=(0, -100)"]
    );
}

#[test]
fn render_cover_on_empty_surface_only_clears() {
    let mut surface = Recording::default();
    assert!(render_cover(&mut surface, &frame(4, 4)).unwrap().is_none());
    assert_eq!(surface.ops, vec!["clear"]);
}

#[test]
fn size_is_its_own_container() {
    let s = SurfaceSize::new(3, 7);
    assert_eq!(s.client_size(), s);
}
