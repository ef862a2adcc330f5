use crate::foundation::core::{Affine, Size, SurfaceSize, Vec2};

/// Placement of an image that fills a surface while preserving aspect ratio.
///
/// Overflow on the longer axis is cropped equally on both sides, so `offset` is zero or
/// negative on each axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CoverFit {
    /// Uniform scale applied to the image.
    pub ratio: f64,
    /// Top-left corner of the scaled image in surface coordinates.
    pub offset: Vec2,
    /// Size of the scaled image.
    pub size: Size,
}

impl CoverFit {
    /// Image-space to surface-space transform.
    pub fn to_affine(self) -> Affine {
        Affine::translate(self.offset) * Affine::scale(self.ratio)
    }
}

/// Compute the cover fit of `image` onto `surface`.
///
/// Returns `None` when either size has a zero dimension; there is nothing to draw.
pub fn cover_fit(image: SurfaceSize, surface: SurfaceSize) -> Option<CoverFit> {
    if image.is_empty() || surface.is_empty() {
        return None;
    }

    let (iw, ih) = (f64::from(image.width), f64::from(image.height));
    let (cw, ch) = (f64::from(surface.width), f64::from(surface.height));

    let h_ratio = cw / iw;
    let v_ratio = ch / ih;
    let ratio = h_ratio.max(v_ratio);

    let size = Size::new(iw * ratio, ih * ratio);
    let offset = Vec2::new((cw - size.width) / 2.0, (ch - size.height) / 2.0);

    Some(CoverFit {
        ratio,
        offset,
        size,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/render/fit.rs"]
mod tests;
