use crate::{
    assets::decode::DecodedFrame,
    foundation::{
        core::{Affine, SurfaceSize},
        error::FlipbookResult,
    },
    render::fit::{CoverFit, cover_fit},
};

/// A resizable drawing target.
pub trait DisplaySurface {
    /// Current pixel dimensions.
    fn size(&self) -> SurfaceSize;

    /// Change pixel dimensions. Contents after a resize are unspecified until the next clear.
    fn resize(&mut self, size: SurfaceSize) -> FlipbookResult<()>;

    /// Clear the whole surface to its background.
    fn clear(&mut self) -> FlipbookResult<()>;

    /// Draw `frame` mapped into surface space by `transform`.
    fn draw_image(&mut self, frame: &DecodedFrame, transform: Affine) -> FlipbookResult<()>;
}

/// Layout element the player sizes its surface against.
pub trait Container {
    /// Current client size in device pixels.
    fn client_size(&self) -> SurfaceSize;
}

impl Container for SurfaceSize {
    fn client_size(&self) -> SurfaceSize {
        *self
    }
}

/// Clear `surface` and draw `frame` cover-fitted onto it.
///
/// Returns the fit that was used, or `None` if the geometry was degenerate and only the
/// clear happened.
pub fn render_cover<S: DisplaySurface + ?Sized>(
    surface: &mut S,
    frame: &DecodedFrame,
) -> FlipbookResult<Option<CoverFit>> {
    surface.clear()?;
    let Some(fit) = cover_fit(frame.size(), surface.size()) else {
        return Ok(None);
    };
    surface.draw_image(frame, fit.to_affine())?;
    Ok(Some(fit))
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
