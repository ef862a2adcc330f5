use std::{cell::Cell, sync::Arc};

use super::*;
use crate::{
    assets::host::MemoryAssetHost,
    foundation::{config::FlipbookConfig, error::FlipbookError},
};

fn frame() -> DecodedFrame {
    DecodedFrame {
        width: 1,
        height: 1,
        rgba8_premul: Arc::new(vec![9, 9, 9, 255]),
    }
}

fn small_sequence(total: u32) -> FrameSequence {
    FrameSequence::from_config(&FlipbookConfig {
        total_frames: total,
        ..FlipbookConfig::default()
    })
}

#[test]
fn callback_fires_once_when_last_report_arrives() {
    let fired = Cell::new(0u32);
    let mut p = Preloader::new(3, |s: &PreloadSummary| {
        fired.set(fired.get() + 1);
        assert_eq!(s.loaded, 3);
    });

    assert!(!p.record(2, Ok(frame())));
    assert!(!p.record(3, Ok(frame())));
    assert_eq!(fired.get(), 0);
    assert!(p.record(1, Ok(frame())));
    assert_eq!(fired.get(), 1);

    assert!(!p.record(1, Ok(frame())));
    assert_eq!(fired.get(), 1);
}

#[test]
fn failures_count_toward_completion() {
    let fired = Cell::new(0u32);
    let mut p = Preloader::new(2, |_: &PreloadSummary| fired.set(fired.get() + 1));

    p.record(1, Err(FlipbookError::asset("404")));
    p.record(2, Ok(frame()));
    assert!(p.is_complete());
    assert_eq!(fired.get(), 1);

    let (store, summary) = p.into_parts();
    assert_eq!(summary.loaded, 1);
    assert_eq!(summary.failed, vec![1]);
    assert!(store.get(0).is_none());
    assert!(store.get(1).is_some());
}

#[test]
fn duplicate_and_out_of_range_reports_do_not_count() {
    let mut p = Preloader::new(2, |_: &PreloadSummary| {});
    assert!(!p.record(0, Ok(frame())));
    assert!(!p.record(3, Ok(frame())));
    p.record(1, Err(FlipbookError::asset("x")));
    p.record(1, Ok(frame()));
    assert_eq!(p.completed(), 1);
    assert!(!p.is_complete());
}

#[test]
fn preload_requests_every_frame_from_one_base() {
    let seq = small_sequence(4);
    let mut host = MemoryAssetHost::new();
    for n in [1, 2, 4] {
        host.insert(seq.url("public/hero", n), frame());
    }

    let fired = Cell::new(0u32);
    let (store, summary) = preload_frames(&host, &seq, "public/hero", false, |_| {
        fired.set(fired.get() + 1)
    });

    assert_eq!(fired.get(), 1);
    assert_eq!(summary.total, 4);
    assert_eq!(summary.loaded, 3);
    assert_eq!(summary.failed, vec![3]);
    assert_eq!(store.loaded(), 3);
    assert!(store.get(2).is_none());

    let requests = host.requests();
    assert_eq!(requests.len(), 4);
    assert!(requests.iter().all(|u| u.starts_with("public/hero/")));
}

#[test]
fn parallel_preload_matches_sequential() {
    let seq = small_sequence(16);
    let mut host = MemoryAssetHost::new();
    for n in seq.numbers().filter(|n| n % 5 != 0) {
        host.insert(seq.url("hero", n), frame());
    }

    let fired = Cell::new(0u32);
    let (store, mut summary) =
        preload_frames(&host, &seq, "hero", true, |_| fired.set(fired.get() + 1));
    summary.failed.sort_unstable();

    assert_eq!(fired.get(), 1);
    assert_eq!(summary.failed, vec![5, 10, 15]);
    assert_eq!(store.loaded(), 13);
    assert_eq!(host.requests().len(), 16);
}
