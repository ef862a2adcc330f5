use std::sync::Arc;

use crate::assets::decode::DecodedFrame;

/// Fixed-size slot table of loaded frames, indexed by 0-based playback index.
///
/// A slot is filled at most once. Slots whose load failed stay empty for the lifetime of
/// the store.
#[derive(Clone, Debug, Default)]
pub struct FrameStore {
    slots: Vec<Option<Arc<DecodedFrame>>>,
    loaded: usize,
}

impl FrameStore {
    /// Empty store with `len` slots.
    pub fn with_len(len: usize) -> Self {
        Self {
            slots: vec![None; len],
            loaded: 0,
        }
    }

    /// Number of slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// True when the store has no slots.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Number of filled slots.
    pub fn loaded(&self) -> usize {
        self.loaded
    }

    /// Fill slot `index`. Returns `false` if out of range or already filled.
    pub fn insert(&mut self, index: usize, frame: DecodedFrame) -> bool {
        let Some(slot) = self.slots.get_mut(index) else {
            return false;
        };
        if slot.is_some() {
            return false;
        }
        *slot = Some(Arc::new(frame));
        self.loaded += 1;
        true
    }

    /// Frame at `index`, if it loaded.
    pub fn get(&self, index: usize) -> Option<&Arc<DecodedFrame>> {
        self.slots.get(index).and_then(Option::as_ref)
    }

    /// Drop every frame and all slots.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.loaded = 0;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/store.rs"]
mod tests;
