//! Camera state shared by the frontends: a perspective camera, the damped
//! orbit controller bound to pointer input, and the ease-in-out fly-to
//! animation used when focusing an annotation.
//!
//! These types intentionally avoid referencing platform-specific APIs and
//! are suitable for use on both native and web targets.

use glam::{Mat4, Vec3};

use crate::constants::{
    CAMERA_FOV_DEG, CAMERA_START_DISTANCE, CAMERA_ZFAR, CAMERA_ZNEAR, FLY_TO_DURATION_SEC,
    ORBIT_DAMPING, ORBIT_MAX_DISTANCE, ORBIT_MAX_PITCH, ORBIT_MIN_DISTANCE, ORBIT_PAN_SPEED,
    ORBIT_ROTATE_SPEED, ORBIT_ZOOM_SPEED,
};

/// Simple right-handed camera description with perspective projection.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    pub fn new(aspect: f32) -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, CAMERA_START_DISTANCE),
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect,
            fovy_radians: CAMERA_FOV_DEG.to_radians(),
            znear: CAMERA_ZNEAR,
            zfar: CAMERA_ZFAR,
        }
    }

    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }

    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn view_proj(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// View-projection with the eye translation removed. The sky is drawn at
    /// infinite distance, so only the camera's rotation may affect it.
    pub fn sky_view_proj(&self) -> Mat4 {
        let forward = (self.target - self.eye).normalize_or_zero();
        let view = Mat4::look_at_rh(Vec3::ZERO, forward, self.up);
        self.projection_matrix() * view
    }

    pub fn pose(&self) -> CameraPose {
        CameraPose {
            eye: self.eye,
            target: self.target,
            fovy_radians: self.fovy_radians,
        }
    }

    pub fn apply_pose(&mut self, pose: &CameraPose) {
        self.eye = pose.eye;
        self.target = pose.target;
        self.fovy_radians = pose.fovy_radians;
    }
}

/// A recorded viewpoint: where the camera sits, what it looks at, and how
/// wide the view is.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraPose {
    pub eye: Vec3,
    pub target: Vec3,
    pub fovy_radians: f32,
}

impl CameraPose {
    fn lerp(&self, other: &CameraPose, t: f32) -> CameraPose {
        CameraPose {
            eye: self.eye.lerp(other.eye, t),
            target: self.target.lerp(other.target, t),
            fovy_radians: self.fovy_radians + (other.fovy_radians - self.fovy_radians) * t,
        }
    }
}

/// Damped orbit control around a fixed pivot, in the spirit of the usual
/// orbit-controls: drag rotates, wheel zooms, secondary drag pans.
#[derive(Clone, Debug)]
pub struct OrbitController {
    pub yaw: f32,
    pub pitch: f32,
    pub distance: f32,
    pub pivot: Vec3,
    yaw_velocity: f32,
    pitch_velocity: f32,
}

impl OrbitController {
    pub fn new() -> Self {
        Self {
            yaw: 0.0,
            pitch: 0.0,
            distance: CAMERA_START_DISTANCE,
            pivot: Vec3::ZERO,
            yaw_velocity: 0.0,
            pitch_velocity: 0.0,
        }
    }

    /// Feed a pointer drag delta, in pixels.
    pub fn rotate(&mut self, dx: f32, dy: f32) {
        self.yaw_velocity += dx * ORBIT_ROTATE_SPEED;
        self.pitch_velocity += dy * ORBIT_ROTATE_SPEED;
    }

    /// Feed a wheel/zoom delta; positive moves the eye outward.
    pub fn zoom(&mut self, delta: f32) {
        self.distance = (self.distance + delta * ORBIT_ZOOM_SPEED)
            .clamp(ORBIT_MIN_DISTANCE, ORBIT_MAX_DISTANCE);
    }

    /// Translate the pivot in the camera plane (right-drag pan).
    pub fn pan(&mut self, dx: f32, dy: f32) {
        let right = Vec3::new(self.yaw.cos(), 0.0, -self.yaw.sin());
        let up = Vec3::Y;
        self.pivot += right * (-dx * ORBIT_PAN_SPEED * self.distance)
            + up * (dy * ORBIT_PAN_SPEED * self.distance);
    }

    /// Integrate damped velocities. Damping is calibrated against a 60 Hz
    /// frame so variable deltas decay at the same wall-clock rate.
    pub fn update(&mut self, dt_sec: f32) {
        self.yaw += self.yaw_velocity;
        self.pitch = (self.pitch + self.pitch_velocity).clamp(-ORBIT_MAX_PITCH, ORBIT_MAX_PITCH);
        let retain = (1.0 - ORBIT_DAMPING).powf((dt_sec * 60.0).max(0.0));
        self.yaw_velocity *= retain;
        self.pitch_velocity *= retain;
    }

    /// Write the orbit pose into the camera.
    pub fn apply_to(&self, camera: &mut Camera) {
        let dir = Vec3::new(
            self.pitch.cos() * self.yaw.sin(),
            self.pitch.sin(),
            self.pitch.cos() * self.yaw.cos(),
        );
        camera.eye = self.pivot + dir * self.distance;
        camera.target = self.pivot;
    }
}

impl Default for OrbitController {
    fn default() -> Self {
        Self::new()
    }
}

/// Cubic ease-in-out, clamped to [0, 1].
pub fn ease_in_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

/// An in-flight camera animation between two poses.
#[derive(Clone, Debug)]
pub struct FlyTo {
    from: CameraPose,
    to: CameraPose,
    elapsed_sec: f32,
    duration_sec: f32,
}

impl FlyTo {
    pub fn new(from: CameraPose, to: CameraPose) -> Self {
        Self::with_duration(from, to, FLY_TO_DURATION_SEC)
    }

    pub fn with_duration(from: CameraPose, to: CameraPose, duration_sec: f32) -> Self {
        Self {
            from,
            to,
            elapsed_sec: 0.0,
            duration_sec: duration_sec.max(f32::EPSILON),
        }
    }

    /// Advance the animation and return the pose for this frame.
    pub fn advance(&mut self, dt_sec: f32) -> CameraPose {
        self.elapsed_sec = (self.elapsed_sec + dt_sec).min(self.duration_sec);
        self.current()
    }

    pub fn current(&self) -> CameraPose {
        let t = ease_in_out(self.elapsed_sec / self.duration_sec);
        self.from.lerp(&self.to, t)
    }

    pub fn finished(&self) -> bool {
        self.elapsed_sec >= self.duration_sec
    }

    pub fn destination(&self) -> &CameraPose {
        &self.to
    }
}
