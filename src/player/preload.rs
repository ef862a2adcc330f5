use rayon::prelude::*;

use crate::{
    assets::{
        decode::DecodedFrame, host::AssetHost, sequence::FrameSequence, store::FrameStore,
    },
    foundation::error::FlipbookResult,
};

/// Outcome of a finished preload.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PreloadSummary {
    /// Number of frames requested.
    pub total: usize,
    /// Number of frames that loaded.
    pub loaded: usize,
    /// 1-based numbers of frames that failed, in completion order.
    pub failed: Vec<u32>,
}

/// Completion counter for one preload pass.
///
/// Every frame number in `1..=total` is expected to report exactly once, success or failure.
/// When the last one reports, `on_complete` runs. It runs at most once; duplicate or
/// out-of-range reports are ignored and do not count.
pub struct Preloader<F: FnOnce(&PreloadSummary)> {
    reported: Vec<bool>,
    completed: usize,
    store: FrameStore,
    failed: Vec<u32>,
    on_complete: Option<F>,
}

impl<F: FnOnce(&PreloadSummary)> Preloader<F> {
    /// Counter expecting `total` reports.
    pub fn new(total: usize, on_complete: F) -> Self {
        Self {
            reported: vec![false; total],
            completed: 0,
            store: FrameStore::with_len(total),
            failed: Vec::new(),
            on_complete: Some(on_complete),
        }
    }

    /// Number of frames reported so far.
    pub fn completed(&self) -> usize {
        self.completed
    }

    /// True once every frame has reported.
    pub fn is_complete(&self) -> bool {
        self.completed == self.reported.len()
    }

    /// Record the result for 1-based frame `number`.
    ///
    /// Returns `true` if this report completed the preload.
    pub fn record(&mut self, number: u32, result: FlipbookResult<DecodedFrame>) -> bool {
        let Some(index) = (number as usize).checked_sub(1) else {
            tracing::debug!(number, "ignoring report for frame 0");
            return false;
        };
        match self.reported.get(index).copied() {
            Some(false) => self.reported[index] = true,
            Some(true) => {
                tracing::debug!(number, "ignoring duplicate frame report");
                return false;
            }
            None => {
                tracing::debug!(number, "ignoring report for frame outside sequence");
                return false;
            }
        }

        match result {
            Ok(frame) => {
                self.store.insert(index, frame);
            }
            Err(err) => {
                tracing::warn!(number, error = %err, "failed to load frame {number}");
                self.failed.push(number);
            }
        }

        self.completed += 1;
        if !self.is_complete() {
            return false;
        }
        if let Some(on_complete) = self.on_complete.take() {
            let summary = self.summary();
            on_complete(&summary);
        }
        true
    }

    /// Snapshot of the counters.
    pub fn summary(&self) -> PreloadSummary {
        PreloadSummary {
            total: self.reported.len(),
            loaded: self.store.loaded(),
            failed: self.failed.clone(),
        }
    }

    /// Loaded frames plus the final summary.
    pub fn into_parts(self) -> (FrameStore, PreloadSummary) {
        let summary = self.summary();
        (self.store, summary)
    }
}

/// Request every frame of `sequence` from `base` and feed results into a [`Preloader`].
///
/// With `parallel`, requests are serviced on the rayon pool; results are recorded on the
/// calling thread.
#[tracing::instrument(skip(host, sequence, on_complete))]
pub fn preload_frames<H, F>(
    host: &H,
    sequence: &FrameSequence,
    base: &str,
    parallel: bool,
    on_complete: F,
) -> (FrameStore, PreloadSummary)
where
    H: AssetHost + ?Sized,
    F: FnOnce(&PreloadSummary),
{
    let mut preloader = Preloader::new(sequence.total_frames() as usize, on_complete);
    let requests: Vec<(u32, String)> = sequence
        .numbers()
        .map(|n| (n, sequence.url(base, n)))
        .collect();

    if parallel {
        let results: Vec<(u32, FlipbookResult<DecodedFrame>)> = requests
            .into_par_iter()
            .map(|(n, url)| (n, host.load(&url)))
            .collect();
        for (n, result) in results {
            preloader.record(n, result);
        }
    } else {
        for (n, url) in requests {
            let result = host.load(&url);
            preloader.record(n, result);
        }
    }

    let (store, summary) = preloader.into_parts();
    tracing::info!(
        loaded = summary.loaded,
        failed = summary.failed.len(),
        "preload finished"
    );
    (store, summary)
}

#[cfg(test)]
#[path = "../../tests/unit/player/preload.rs"]
mod tests;
