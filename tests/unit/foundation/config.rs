use super::*;

#[test]
fn defaults_match_hero_sequence() {
    let cfg = FlipbookConfig::default();
    assert_eq!(cfg.total_frames, 122);
    assert_eq!(cfg.fps, Fps::new(13, 1).unwrap());
    assert_eq!(cfg.bases, vec!["hero", "public/hero"]);
    assert_eq!(cfg.file_prefix, "ezgif-frame-");
    assert_eq!(cfg.index_width, 3);
    assert_eq!(cfg.extension, "jpg");
    cfg.validate().unwrap();
}

#[test]
fn partial_json_fills_defaults() {
    let cfg: FlipbookConfig =
        serde_json::from_str(r#"{ "total_frames": 4, "fps": { "num": 24, "den": 1 } }"#).unwrap();
    assert_eq!(cfg.total_frames, 4);
    assert_eq!(cfg.fps.num, 24);
    assert_eq!(cfg.bases, FlipbookConfig::default().bases);
    assert!(cfg.parallel_preload);
}

#[test]
fn validate_rejects_broken_configs() {
    let zero = FlipbookConfig {
        total_frames: 0,
        ..FlipbookConfig::default()
    };
    assert!(zero.validate().is_err());

    let no_bases = FlipbookConfig {
        bases: vec![],
        ..FlipbookConfig::default()
    };
    assert!(no_bases.validate().is_err());

    let blank_base = FlipbookConfig {
        bases: vec!["hero".to_string(), "  ".to_string()],
        ..FlipbookConfig::default()
    };
    assert!(blank_base.validate().is_err());

    let bad_fps = FlipbookConfig {
        fps: Fps { num: 0, den: 1 },
        ..FlipbookConfig::default()
    };
    assert!(bad_fps.validate().is_err());
}

#[test]
fn from_json_file_reports_missing_file() {
    let err = FlipbookConfig::from_json_file(Path::new("definitely/not/here.json")).unwrap_err();
    assert!(err.to_string().contains("open config"));
}
