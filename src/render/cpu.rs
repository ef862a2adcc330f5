use std::{collections::HashMap, sync::Arc};

use crate::{
    assets::decode::DecodedFrame,
    foundation::{
        core::{Affine, SurfaceSize},
        error::{FlipbookError, FlipbookResult},
    },
    render::surface::DisplaySurface,
};

/// Off-screen CPU surface backed by a `vello_cpu` premultiplied RGBA8 pixmap.
///
/// The surface holds one layer: every `draw_image` re-lays the background before the image,
/// which matches how the player uses it (clear, then one cover-fitted frame).
///
/// Converted frame images are cached by the identity of their pixel buffer and dropped once
/// the surface holds the last reference to that buffer.
pub struct PixmapSurface {
    width: u16,
    height: u16,
    clear_rgba: [u8; 4],
    pixmap: vello_cpu::Pixmap,
    image_cache: HashMap<ImageKey, CachedImage>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
struct ImageKey {
    addr: usize,
    width: u32,
    height: u32,
}

impl ImageKey {
    fn of(frame: &DecodedFrame) -> Self {
        Self {
            addr: Arc::as_ptr(&frame.rgba8_premul).addr(),
            width: frame.width,
            height: frame.height,
        }
    }
}

struct CachedImage {
    // Keeps the buffer alive so its address is not reused while the entry exists.
    bytes: Arc<Vec<u8>>,
    paint: vello_cpu::Image,
}

impl std::fmt::Debug for PixmapSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PixmapSurface")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("clear_rgba", &self.clear_rgba)
            .field("cached_images", &self.image_cache.len())
            .finish()
    }
}

impl PixmapSurface {
    /// New surface of `size`, cleared to straight RGBA8 `clear_rgba`.
    pub fn new(size: SurfaceSize, clear_rgba: [u8; 4]) -> FlipbookResult<Self> {
        let (width, height) = dims_u16(size)?;
        let mut out = Self {
            width,
            height,
            clear_rgba,
            pixmap: vello_cpu::Pixmap::new(width, height),
            image_cache: HashMap::new(),
        };
        out.clear()?;
        Ok(out)
    }

    /// Premultiplied RGBA8 bytes, row-major.
    pub fn data_premul(&self) -> &[u8] {
        self.pixmap.data_as_u8_slice()
    }

    /// Copy the surface out as a straight-alpha image, ready to save as PNG.
    pub fn to_rgba_image(&self) -> FlipbookResult<image::RgbaImage> {
        let mut bytes = self.pixmap.data_as_u8_slice().to_vec();
        unpremultiply_rgba8_in_place(&mut bytes);
        image::RgbaImage::from_raw(u32::from(self.width), u32::from(self.height), bytes)
            .ok_or_else(|| FlipbookError::render("pixmap byte length mismatch"))
    }

    /// Number of converted frame images currently cached.
    pub fn cached_images(&self) -> usize {
        self.image_cache.len()
    }

    fn image_paint_for(&mut self, frame: &DecodedFrame) -> FlipbookResult<vello_cpu::Image> {
        self.image_cache.retain(|_, cached| Arc::strong_count(&cached.bytes) > 1);

        let key = ImageKey::of(frame);
        if let Some(cached) = self.image_cache.get(&key) {
            return Ok(cached.paint.clone());
        }

        let pixmap = image_premul_bytes_to_pixmap(
            frame.rgba8_premul.as_slice(),
            frame.width,
            frame.height,
        )?;
        let paint = vello_cpu::Image {
            image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
            sampler: vello_cpu::peniko::ImageSampler::default(),
        };

        self.image_cache.insert(
            key,
            CachedImage {
                bytes: Arc::clone(&frame.rgba8_premul),
                paint: paint.clone(),
            },
        );
        Ok(paint)
    }
}

impl DisplaySurface for PixmapSurface {
    fn size(&self) -> SurfaceSize {
        SurfaceSize::new(u32::from(self.width), u32::from(self.height))
    }

    fn resize(&mut self, size: SurfaceSize) -> FlipbookResult<()> {
        let (width, height) = dims_u16(size)?;
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.pixmap = vello_cpu::Pixmap::new(width, height);
        }
        self.clear()
    }

    fn clear(&mut self) -> FlipbookResult<()> {
        let [r, g, b, a] = self.clear_rgba;
        clear_pixmap(&mut self.pixmap, premul_rgba8(r, g, b, a));
        Ok(())
    }

    fn draw_image(&mut self, frame: &DecodedFrame, transform: Affine) -> FlipbookResult<()> {
        if self.width == 0 || self.height == 0 {
            return Ok(());
        }

        let paint = self.image_paint_for(frame)?;

        let mut ctx = vello_cpu::RenderContext::new(self.width, self.height);
        ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);

        let [r, g, b, a] = self.clear_rgba;
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(r, g, b, a));
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            f64::from(self.width),
            f64::from(self.height),
        ));

        ctx.set_transform(affine_to_cpu(transform));
        ctx.set_paint(paint);
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            f64::from(frame.width),
            f64::from(frame.height),
        ));

        ctx.flush();
        ctx.render_to_pixmap(&mut self.pixmap);
        Ok(())
    }
}

fn dims_u16(size: SurfaceSize) -> FlipbookResult<(u16, u16)> {
    let w: u16 = size
        .width
        .try_into()
        .map_err(|_| FlipbookError::render("surface width exceeds u16"))?;
    let h: u16 = size
        .height
        .try_into()
        .map_err(|_| FlipbookError::render("surface height exceeds u16"))?;
    Ok((w, h))
}

fn premul_rgba8(r: u8, g: u8, b: u8, a: u8) -> [u8; 4] {
    let af = (a as u16) + 1;
    let premul = |c: u8| -> u8 { (((c as u16) * af) >> 8) as u8 };
    [premul(r), premul(g), premul(b), a]
}

fn clear_pixmap(pixmap: &mut vello_cpu::Pixmap, rgba: [u8; 4]) {
    let data = pixmap.data_as_u8_slice_mut();
    for px in data.chunks_exact_mut(4) {
        px.copy_from_slice(&rgba);
    }
}

fn unpremultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = u16::from(px[3]);
        if a == 0 || a == 255 {
            continue;
        }
        for c in &mut px[..3] {
            *c = ((u16::from(*c) * 255 + a / 2) / a).min(255) as u8;
        }
    }
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn image_premul_bytes_to_pixmap(
    rgba8_premul: &[u8],
    width: u32,
    height: u32,
) -> FlipbookResult<vello_cpu::Pixmap> {
    let w: u16 = width
        .try_into()
        .map_err(|_| FlipbookError::render("image width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| FlipbookError::render("image height exceeds u16"))?;
    if rgba8_premul.len() != width as usize * height as usize * 4 {
        return Err(FlipbookError::render("decoded frame byte length mismatch"));
    }

    let mut may_have_opacities = false;
    let mut pixels = Vec::with_capacity(width as usize * height as usize);
    for px in rgba8_premul.chunks_exact(4) {
        let a = px[3];
        may_have_opacities |= a != 255;
        pixels.push(vello_cpu::peniko::color::PremulRgba8 {
            r: px[0],
            g: px[1],
            b: px[2],
            a,
        });
    }

    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels,
        w,
        h,
        may_have_opacities,
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
