use super::*;

#[test]
fn default_urls_are_zero_padded_and_one_based() {
    let seq = FrameSequence::from_config(&FlipbookConfig::default());
    assert_eq!(seq.total_frames(), 122);
    assert_eq!(seq.url("hero", 1), "hero/ezgif-frame-001.jpg");
    assert_eq!(seq.url("public/hero", 122), "public/hero/ezgif-frame-122.jpg");
    assert_eq!(seq.url("hero/", 45), "hero/ezgif-frame-045.jpg");
}

#[test]
fn numbers_cover_whole_sequence() {
    let seq = FrameSequence::from_config(&FlipbookConfig::default());
    let numbers: Vec<u32> = seq.numbers().collect();
    assert_eq!(numbers.len(), 122);
    assert_eq!(numbers.first(), Some(&1));
    assert_eq!(numbers.last(), Some(&122));
    assert_eq!(seq.probe_number(), 1);
}

#[test]
fn wide_indices_are_not_truncated() {
    let cfg = FlipbookConfig {
        total_frames: 1200,
        file_prefix: "f".to_string(),
        index_width: 2,
        extension: "png".to_string(),
        ..FlipbookConfig::default()
    };
    let seq = FrameSequence::from_config(&cfg);
    assert_eq!(seq.file_name(7), "f07.png");
    assert_eq!(seq.file_name(1200), "f1200.png");
}
