//! Pointer picking: screen coordinates to world rays, ray-sphere tests
//! against markers and against the sky sphere itself.

use glam::{Vec3, Vec4};

use crate::annotation::Annotation;
use crate::camera::Camera;
use crate::constants::{MARKER_PICK_RADIUS, SKYBOX_RADIUS};

/// Nearest non-negative ray-sphere intersection distance. Handles rays that
/// start inside the sphere (the usual case when picking the sky) by falling
/// back to the far root.
#[inline]
pub fn ray_sphere(ray_origin: Vec3, ray_dir: Vec3, center: Vec3, radius: f32) -> Option<f32> {
    let oc = ray_origin - center;
    let b = oc.dot(ray_dir);
    let c = oc.dot(oc) - radius * radius;
    let disc = b * b - c;
    if disc < 0.0 {
        return None;
    }
    let root = disc.sqrt();
    let near = -b - root;
    if near >= 0.0 {
        return Some(near);
    }
    let far = -b + root;
    (far >= 0.0).then_some(far)
}

/// Compute a world-space ray from canvas pixel coordinates.
///
/// - `sx`, `sy`: pixel coordinates in the surface's backing store space
/// - `width`, `height`: backing store dimensions
///
/// Returns `(ray_origin, ray_direction)` in world space.
pub fn screen_to_world_ray(
    camera: &Camera,
    sx: f32,
    sy: f32,
    width: f32,
    height: f32,
) -> (Vec3, Vec3) {
    let ndc_x = (2.0 * sx / width.max(1.0)) - 1.0;
    let ndc_y = 1.0 - (2.0 * sy / height.max(1.0));
    let inv = camera.view_proj().inverse();
    let p_far = inv * Vec4::new(ndc_x, ndc_y, 1.0, 1.0);
    let p_far: Vec3 = p_far.truncate() / p_far.w;
    let ro = camera.eye;
    let rd = (p_far - ro).normalize();
    (ro, rd)
}

/// Test the ray against every annotation marker and return the nearest hit
/// as `(index, distance)`.
pub fn pick_annotation(
    annotations: &[Annotation],
    ray_origin: Vec3,
    ray_dir: Vec3,
) -> Option<(usize, f32)> {
    let mut best = None::<(usize, f32)>;
    for (i, a) in annotations.iter().enumerate() {
        if let Some(t) = ray_sphere(ray_origin, ray_dir, a.marker_position(), MARKER_PICK_RADIUS) {
            match best {
                Some((_, bt)) if t >= bt => {}
                _ => best = Some((i, t)),
            }
        }
    }
    best
}

/// Where the ray meets the sky sphere; used as a generic target point for
/// coordinate display. Falls back to projecting along the ray when the
/// intersection degenerates.
pub fn sky_target_point(ray_origin: Vec3, ray_dir: Vec3) -> Vec3 {
    match ray_sphere(ray_origin, ray_dir, Vec3::ZERO, SKYBOX_RADIUS) {
        Some(t) => ray_origin + ray_dir * t,
        None => ray_origin + ray_dir * SKYBOX_RADIUS,
    }
}
