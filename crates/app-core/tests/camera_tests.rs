// Host-side tests for the camera, orbit controller and fly-to animation.

use app_core::{
    ease_in_out, builtin_annotations, Camera, CameraPose, FlyTo, OrbitController,
    CAMERA_FOV_DEG, CAMERA_START_DISTANCE, FLY_TO_DURATION_SEC,
};
use glam::Vec3;

#[test]
fn ease_in_out_endpoints_and_midpoint() {
    assert_eq!(ease_in_out(0.0), 0.0);
    assert_eq!(ease_in_out(1.0), 1.0);
    assert!((ease_in_out(0.5) - 0.5).abs() < 1e-6);
    // Clamped outside [0, 1]
    assert_eq!(ease_in_out(-1.0), 0.0);
    assert_eq!(ease_in_out(2.0), 1.0);
}

#[test]
fn ease_in_out_is_monotonic() {
    let mut prev = 0.0;
    for i in 1..=100 {
        let v = ease_in_out(i as f32 / 100.0);
        assert!(v >= prev, "not monotonic at {i}: {v} < {prev}");
        prev = v;
    }
}

#[test]
fn fly_to_converges_to_the_recorded_viewpoint() {
    let annotations = builtin_annotations();
    let target_pose = annotations[0].camera_pose.expect("pose");

    let mut camera = Camera::new(1.6);
    let mut fly = FlyTo::new(camera.pose(), target_pose);

    // Advance in 16 ms frames past the nominal duration
    let frames = ((FLY_TO_DURATION_SEC / 0.016) as usize) + 10;
    for _ in 0..frames {
        let pose = fly.advance(0.016);
        camera.apply_pose(&pose);
    }
    assert!(fly.finished());
    assert!((camera.eye - target_pose.eye).length() < 1e-3);
    assert!((camera.target - target_pose.target).length() < 1e-3);
    assert!((camera.fovy_radians - target_pose.fovy_radians).abs() < 1e-4);
}

#[test]
fn fly_to_midpoint_is_between_endpoints() {
    let from = CameraPose {
        eye: Vec3::new(0.0, 0.0, 5.0),
        target: Vec3::ZERO,
        fovy_radians: CAMERA_FOV_DEG.to_radians(),
    };
    let to = CameraPose {
        eye: Vec3::ZERO,
        target: Vec3::new(0.0, 0.0, -400.0),
        fovy_radians: 50f32.to_radians(),
    };
    let mut fly = FlyTo::with_duration(from, to, 1.0);
    let mid = fly.advance(0.5);
    assert!(mid.eye.z < from.eye.z && mid.eye.z > to.eye.z);
    assert!(mid.fovy_radians < from.fovy_radians && mid.fovy_radians > to.fovy_radians);
    assert!(!fly.finished());
}

#[test]
fn fly_to_reverse_restores_the_overview() {
    let overview = Camera::new(1.0).pose();
    let focus = builtin_annotations()[2].camera_pose.unwrap();

    let mut fly = FlyTo::with_duration(overview, focus, 0.5);
    let mut pose = overview;
    while !fly.finished() {
        pose = fly.advance(0.05);
    }
    // Reverse from wherever the focus animation ended
    let mut back = FlyTo::with_duration(pose, overview, 0.5);
    while !back.finished() {
        pose = back.advance(0.05);
    }
    assert!((pose.eye - overview.eye).length() < 1e-3);
    assert!((pose.target - overview.target).length() < 1e-3);
    assert!((pose.fovy_radians - overview.fovy_radians).abs() < 1e-4);
}

#[test]
fn orbit_velocity_decays_after_release() {
    let mut orbit = OrbitController::new();
    orbit.rotate(100.0, 0.0);
    orbit.update(1.0 / 60.0);
    let yaw_after_first = orbit.yaw;
    assert!(yaw_after_first > 0.0);

    // No further input: damping should bring increments toward zero
    let mut last_delta = f32::MAX;
    for _ in 0..60 {
        let before = orbit.yaw;
        orbit.update(1.0 / 60.0);
        let delta = orbit.yaw - before;
        assert!(delta <= last_delta + 1e-6);
        last_delta = delta;
    }
    assert!(last_delta < 1e-3);
}

#[test]
fn orbit_pitch_is_clamped_at_the_poles() {
    let mut orbit = OrbitController::new();
    for _ in 0..100 {
        orbit.rotate(0.0, 1000.0);
        orbit.update(1.0 / 60.0);
    }
    assert!(orbit.pitch <= app_core::ORBIT_MAX_PITCH + 1e-6);
}

#[test]
fn orbit_pose_keeps_the_eye_at_distance() {
    let mut orbit = OrbitController::new();
    orbit.rotate(40.0, 15.0);
    for _ in 0..30 {
        orbit.update(1.0 / 60.0);
    }
    let mut camera = Camera::new(1.0);
    orbit.apply_to(&mut camera);
    assert!(((camera.eye - camera.target).length() - CAMERA_START_DISTANCE).abs() < 1e-3);
}

#[test]
fn zoom_respects_the_distance_clamp() {
    let mut orbit = OrbitController::new();
    orbit.zoom(-1e6);
    assert!(orbit.distance >= app_core::ORBIT_MIN_DISTANCE);
    orbit.zoom(1e6);
    assert!(orbit.distance <= app_core::ORBIT_MAX_DISTANCE);
}

#[test]
fn sky_view_ignores_eye_translation() {
    let mut a = Camera::new(1.5);
    let mut b = Camera::new(1.5);
    // Same orientation, different positions along the view axis
    a.eye = Vec3::new(0.0, 0.0, 5.0);
    a.target = Vec3::ZERO;
    b.eye = Vec3::new(0.0, 0.0, 2.0);
    b.target = Vec3::new(0.0, 0.0, -3.0);

    let ma = a.sky_view_proj().to_cols_array();
    let mb = b.sky_view_proj().to_cols_array();
    for (x, y) in ma.iter().zip(mb.iter()) {
        assert!((x - y).abs() < 1e-5);
    }
}
