// Host-side tests for configuration, constants and the shutdown guard.

use app_core::{
    builtin_panoramas, narration_for, CubeFace, PanoramaConfig, ShutdownFlag, CUBE_FACE_COUNT,
    FADE_OPACITY_STEP, FADE_TICK,
};

#[test]
fn cube_faces_are_in_upload_order() {
    let layers: Vec<u32> = CubeFace::ALL.iter().map(|f| f.layer()).collect();
    assert_eq!(layers, vec![0, 1, 2, 3, 4, 5]);
    assert_eq!(CubeFace::ALL.len(), CUBE_FACE_COUNT);

    let names: Vec<&str> = CubeFace::ALL.iter().map(|f| f.file_name()).collect();
    assert_eq!(
        names,
        vec!["posx.jpg", "negx.jpg", "posy.jpg", "negy.jpg", "posz.jpg", "negz.jpg"]
    );
}

#[test]
fn from_dir_builds_the_conventional_face_paths() {
    let cfg = PanoramaConfig::from_dir("Quad", "/public/quad/");
    assert_eq!(cfg.name, "Quad");
    assert_eq!(cfg.images[0], "/public/quad/posx.jpg");
    assert_eq!(cfg.images[5], "/public/quad/negz.jpg");
    // No doubled separators from the trailing slash
    assert!(!cfg.images.iter().any(|p| p.contains("//posx")));
}

#[test]
fn builtin_panoramas_are_complete() {
    let configs = builtin_panoramas();
    assert_eq!(configs.len(), 2);
    for cfg in &configs {
        assert!(!cfg.name.is_empty());
        assert_eq!(cfg.images.len(), CUBE_FACE_COUNT);
        for url in &cfg.images {
            assert!(url.ends_with(".jpg"));
        }
    }
    // Each built-in scene has a narration script
    for cfg in &configs {
        assert!(narration_for(&cfg.name).is_some(), "no narration for {}", cfg.name);
    }
    assert!(narration_for("Nowhere Hall").is_none());
}

#[test]
fn fade_cadence_matches_the_intended_ramp() {
    // 0 -> 1 in 0.08 steps is 13 ticks of 30 ms, roughly 375 ms per ramp
    let steps = (1.0f32 / FADE_OPACITY_STEP).ceil() as u32;
    let ramp = FADE_TICK * steps;
    assert_eq!(steps, 13);
    assert!(ramp.as_millis() >= 360 && ramp.as_millis() <= 400);
}

#[test]
fn shutdown_flag_latches() {
    let flag = ShutdownFlag::new();
    assert!(!flag.is_shut_down());

    // Clones observe the same flag, the way an async load holds one
    let seen_by_load = flag.clone();
    flag.shut_down();
    assert!(seen_by_load.is_shut_down());

    // Idempotent
    flag.shut_down();
    assert!(flag.is_shut_down());
}
