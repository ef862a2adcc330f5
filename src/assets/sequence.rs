use crate::foundation::config::FlipbookConfig;

/// Naming convention for a numbered frame sequence.
///
/// Frame numbers are 1-based; the player's playback index is 0-based, so frame number
/// `n` is drawn at playback index `n - 1`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameSequence {
    total_frames: u32,
    file_prefix: String,
    index_width: usize,
    extension: String,
}

impl FrameSequence {
    /// Build the naming convention described by `cfg`.
    pub fn from_config(cfg: &FlipbookConfig) -> Self {
        Self {
            total_frames: cfg.total_frames,
            file_prefix: cfg.file_prefix.clone(),
            index_width: cfg.index_width,
            extension: cfg.extension.clone(),
        }
    }

    /// Number of frames in the sequence.
    pub fn total_frames(&self) -> u32 {
        self.total_frames
    }

    /// Frame number used to probe a candidate base.
    pub fn probe_number(&self) -> u32 {
        1
    }

    /// All 1-based frame numbers, in order.
    pub fn numbers(&self) -> std::ops::RangeInclusive<u32> {
        1..=self.total_frames
    }

    /// File name for frame `number`, e.g. `ezgif-frame-007.jpg`.
    pub fn file_name(&self, number: u32) -> String {
        format!(
            "{}{:0width$}.{}",
            self.file_prefix,
            number,
            self.extension,
            width = self.index_width
        )
    }

    /// URL of frame `number` under `base`.
    pub fn url(&self, base: &str, number: u32) -> String {
        let base = base.trim_end_matches('/');
        format!("{base}/{}", self.file_name(number))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/sequence.rs"]
mod tests;
