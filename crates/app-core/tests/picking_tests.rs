// Host-side tests for pure picking functions.

use app_core::picking::{pick_annotation, ray_sphere, screen_to_world_ray, sky_target_point};
use app_core::{builtin_annotations, Camera, SKYBOX_RADIUS};

#[test]
fn ray_sphere_intersection_basic() {
    // Ray from origin pointing in +Z direction
    let ray_origin = glam::Vec3::ZERO;
    let ray_dir = glam::Vec3::new(0.0, 0.0, 1.0);

    // Sphere at (0, 0, 5) with radius 2
    let center = glam::Vec3::new(0.0, 0.0, 5.0);
    let radius = 2.0;

    let result = ray_sphere(ray_origin, ray_dir, center, radius);
    assert!(result.is_some());

    let t = result.unwrap();
    assert!((t - 3.0).abs() < 1e-4);
}

#[test]
fn ray_sphere_intersection_miss() {
    // Ray along +X, sphere off in +Z
    let ray_origin = glam::Vec3::ZERO;
    let ray_dir = glam::Vec3::new(1.0, 0.0, 0.0);

    let center = glam::Vec3::new(0.0, 0.0, 5.0);
    let radius = 2.0;

    assert!(ray_sphere(ray_origin, ray_dir, center, radius).is_none());
}

#[test]
fn ray_sphere_intersection_behind_origin() {
    // Sphere entirely behind the ray origin is not a hit
    let ray_origin = glam::Vec3::ZERO;
    let ray_dir = glam::Vec3::new(0.0, 0.0, 1.0);

    let center = glam::Vec3::new(0.0, 0.0, -5.0);
    assert!(ray_sphere(ray_origin, ray_dir, center, 2.0).is_none());
}

#[test]
fn ray_sphere_intersection_inside() {
    // Ray starting inside the sphere hits the far wall; this is the sky
    // sphere case, where the camera always sits inside.
    let ray_origin = glam::Vec3::new(0.0, 0.0, 5.0);
    let ray_dir = glam::Vec3::new(1.0, 0.0, 0.0);

    let center = glam::Vec3::new(0.0, 0.0, 5.0);
    let radius = 3.0;

    let t = ray_sphere(ray_origin, ray_dir, center, radius).expect("inside ray should hit");
    assert!((t - 3.0).abs() < 0.1);
}

#[test]
fn screen_center_ray_points_along_view() {
    let mut camera = Camera::new(800.0 / 600.0);
    camera.eye = glam::Vec3::new(0.0, 0.0, 5.0);
    camera.target = glam::Vec3::ZERO;

    let (ro, rd) = screen_to_world_ray(&camera, 400.0, 300.0, 800.0, 600.0);
    assert_eq!(ro, camera.eye);
    assert!(rd.z < 0.0);
    assert!(rd.x.abs() < 1e-3);
    assert!(rd.y.abs() < 1e-3);
    assert!((rd.length() - 1.0).abs() < 1e-4);
}

#[test]
fn pick_annotation_finds_the_marker_on_the_ray() {
    let annotations = builtin_annotations();
    let eye = glam::Vec3::new(0.0, 0.0, 5.0);

    // Aim straight at the +X marker (index 0, East View)
    let marker = annotations[0].marker_position();
    let rd = (marker - eye).normalize();
    let hit = pick_annotation(&annotations, eye, rd);
    assert_eq!(hit.map(|(i, _)| i), Some(0));

    // Aim between markers: no hit
    let rd = glam::Vec3::new(1.0, 1.0, 1.0).normalize();
    assert!(pick_annotation(&annotations, eye, rd).is_none());
}

#[test]
fn pick_annotation_prefers_the_nearest_hit() {
    let annotations = builtin_annotations();
    let eye = glam::Vec3::ZERO;

    // From the center every marker is equally far; shift the eye toward +X
    // so the East marker is strictly nearer along the shared axis.
    let eye_off = eye + glam::Vec3::new(10.0, 0.0, 0.0);
    let rd = glam::Vec3::X;
    let (idx, t) = pick_annotation(&annotations, eye_off, rd).expect("hit");
    assert_eq!(idx, 0);
    assert!(t < SKYBOX_RADIUS);
}

#[test]
fn sky_target_point_lands_on_the_sphere() {
    let eye = glam::Vec3::new(0.0, 0.0, 5.0);
    let rd = glam::Vec3::new(0.0, 0.0, -1.0);
    let p = sky_target_point(eye, rd);
    assert!((p.length() - SKYBOX_RADIUS).abs() < 1e-2);

    // Any direction from inside must land on the sphere
    let rd = glam::Vec3::new(0.3, -0.5, 0.8).normalize();
    let p = sky_target_point(eye, rd);
    assert!((p.length() - SKYBOX_RADIUS).abs() < 1e-2);
}
