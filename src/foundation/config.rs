use std::{fs::File, io::BufReader, path::Path};

use anyhow::Context;

use crate::foundation::{
    core::Fps,
    error::{FlipbookError, FlipbookResult},
};

/// Player configuration, loadable from JSON.
///
/// Every field has a default matching the stock hero sequence, so a config file only needs to
/// name the fields it overrides.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct FlipbookConfig {
    /// Number of frames in the sequence (`N`).
    pub total_frames: u32,
    /// Target playback rate.
    pub fps: Fps,
    /// Candidate base paths, probed in order.
    pub bases: Vec<String>,
    /// File name prefix before the zero-padded index.
    pub file_prefix: String,
    /// Zero-pad width of the 1-based frame index.
    pub index_width: usize,
    /// File extension without the leading dot.
    pub extension: String,
    /// Service preload requests on the rayon pool.
    pub parallel_preload: bool,
    /// Straight RGBA8 color used when clearing a surface.
    pub clear_rgba: [u8; 4],
}

impl Default for FlipbookConfig {
    fn default() -> Self {
        Self {
            total_frames: 122,
            fps: Fps::default(),
            bases: vec!["hero".to_string(), "public/hero".to_string()],
            file_prefix: "ezgif-frame-".to_string(),
            index_width: 3,
            extension: "jpg".to_string(),
            parallel_preload: true,
            clear_rgba: [0, 0, 0, 0],
        }
    }
}

impl FlipbookConfig {
    /// Read and validate a config from a JSON file.
    pub fn from_json_file(path: &Path) -> FlipbookResult<Self> {
        let f = File::open(path)
            .with_context(|| format!("open config '{}'", path.display()))?;
        let cfg: Self = serde_json::from_reader(BufReader::new(f))
            .with_context(|| format!("parse config JSON '{}'", path.display()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Check invariants that the player relies on.
    pub fn validate(&self) -> FlipbookResult<()> {
        if self.total_frames == 0 {
            return Err(FlipbookError::validation("total_frames must be > 0"));
        }
        Fps::new(self.fps.num, self.fps.den)?;
        if self.bases.is_empty() {
            return Err(FlipbookError::validation(
                "bases must name at least one candidate",
            ));
        }
        if self.bases.iter().any(|b| b.trim().is_empty()) {
            return Err(FlipbookError::validation("bases must be non-empty strings"));
        }
        if self.extension.is_empty() {
            return Err(FlipbookError::validation("extension must be non-empty"));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/config.rs"]
mod tests;
