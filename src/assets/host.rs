use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    sync::Mutex,
};

use anyhow::Context;

use crate::{
    assets::decode::{DecodedFrame, decode_image},
    foundation::error::{FlipbookError, FlipbookResult},
};

/// Source of frame images addressed by URL.
///
/// A failed load is reported as an error value. Hosts are `Sync` so preload may service
/// several requests at once.
pub trait AssetHost: Sync {
    /// Fetch and decode the image at `url`.
    fn load(&self, url: &str) -> FlipbookResult<DecodedFrame>;
}

impl<H: AssetHost + ?Sized> AssetHost for &H {
    fn load(&self, url: &str) -> FlipbookResult<DecodedFrame> {
        (**self).load(url)
    }
}

/// [`AssetHost`] serving relative URLs from a directory on disk.
#[derive(Clone, Debug)]
pub struct FsAssetHost {
    root: PathBuf,
}

impl FsAssetHost {
    /// Serve URLs relative to `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory used when resolving URLs.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn read_bytes(&self, norm_path: &str) -> FlipbookResult<Vec<u8>> {
        let path = self.root.join(Path::new(norm_path));
        std::fs::read(&path)
            .with_context(|| format!("read frame bytes from '{}'", path.display()))
            .map_err(FlipbookError::from)
    }
}

impl AssetHost for FsAssetHost {
    fn load(&self, url: &str) -> FlipbookResult<DecodedFrame> {
        let norm = normalize_rel_path(url)?;
        let bytes = self.read_bytes(&norm)?;
        decode_image(&bytes).map_err(|e| FlipbookError::asset(format!("decode '{norm}': {e}")))
    }
}

/// In-memory [`AssetHost`] keyed by exact URL, logging every request it receives.
#[derive(Debug, Default)]
pub struct MemoryAssetHost {
    frames: HashMap<String, DecodedFrame>,
    requests: Mutex<Vec<String>>,
}

impl MemoryAssetHost {
    /// Empty host; every load fails until frames are inserted.
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `frame` at `url`.
    pub fn insert(&mut self, url: impl Into<String>, frame: DecodedFrame) {
        self.frames.insert(url.into(), frame);
    }

    /// URLs requested so far, in request order.
    pub fn requests(&self) -> Vec<String> {
        self.requests
            .lock()
            .map(|r| r.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }
}

impl AssetHost for MemoryAssetHost {
    fn load(&self, url: &str) -> FlipbookResult<DecodedFrame> {
        match self.requests.lock() {
            Ok(mut r) => r.push(url.to_string()),
            Err(poisoned) => poisoned.into_inner().push(url.to_string()),
        }
        self.frames
            .get(url)
            .cloned()
            .ok_or_else(|| FlipbookError::asset(format!("no frame at '{url}'")))
    }
}

/// Normalize a relative URL path: forward slashes, no empty or `.` segments, no `..`.
pub fn normalize_rel_path(source: &str) -> FlipbookResult<String> {
    let s = source.replace('\\', "/");
    if s.starts_with('/') {
        return Err(FlipbookError::validation("asset paths must be relative"));
    }
    if s.is_empty() {
        return Err(FlipbookError::validation("asset path must be non-empty"));
    }

    let mut out = Vec::<&str>::new();
    for part in s.split('/') {
        if part.is_empty() || part == "." {
            continue;
        }
        if part == ".." {
            return Err(FlipbookError::validation(
                "asset paths must not contain '..'",
            ));
        }
        out.push(part);
    }

    if out.is_empty() {
        return Err(FlipbookError::validation(
            "asset path must contain a file name",
        ));
    }

    Ok(out.join("/"))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/host.rs"]
mod tests;
