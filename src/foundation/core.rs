use crate::foundation::error::{FlipbookError, FlipbookResult};

pub use kurbo::{Affine, Point, Rect, Size, Vec2};

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Rational frame rate used to derive the playback tick interval.
pub struct Fps {
    /// Numerator (frames).
    pub num: u32,
    /// Denominator (seconds); must be > 0.
    pub den: u32,
}

impl Fps {
    /// Construct a validated frame rate.
    pub fn new(num: u32, den: u32) -> FlipbookResult<Self> {
        if den == 0 {
            return Err(FlipbookError::validation("Fps den must be > 0"));
        }
        if num == 0 {
            return Err(FlipbookError::validation("Fps num must be > 0"));
        }
        Ok(Self { num, den })
    }

    /// Frame rate as floating-point frames per second.
    pub fn as_f64(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }

    /// Minimum interval between accepted ticks, in milliseconds.
    pub fn frame_interval_ms(self) -> f64 {
        1000.0 * f64::from(self.den) / f64::from(self.num)
    }
}

impl Default for Fps {
    fn default() -> Self {
        Self { num: 13, den: 1 }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
/// Pixel dimensions of a display surface or decoded frame.
pub struct SurfaceSize {
    /// Width in device pixels.
    pub width: u32,
    /// Height in device pixels.
    pub height: u32,
}

impl SurfaceSize {
    /// Build a size from width and height.
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// True when either dimension is zero.
    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Size as a `kurbo` floating-point size.
    pub fn to_kurbo(self) -> Size {
        Size::new(f64::from(self.width), f64::from(self.height))
    }

    /// Parse `WIDTHxHEIGHT`, e.g. `1920x1080`.
    pub fn parse(s: &str) -> FlipbookResult<Self> {
        let (w, h) = s
            .trim()
            .split_once(['x', 'X'])
            .ok_or_else(|| FlipbookError::validation(format!("expected WxH, got '{s}'")))?;
        let width = w
            .trim()
            .parse::<u32>()
            .map_err(|e| FlipbookError::validation(format!("invalid width '{w}': {e}")))?;
        let height = h
            .trim()
            .parse::<u32>()
            .map_err(|e| FlipbookError::validation(format!("invalid height '{h}': {e}")))?;
        Ok(Self { width, height })
    }
}

impl std::fmt::Display for SurfaceSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
