use std::time::Duration;

// Shared scene tuning constants used by both web and native frontends.

// Sky sphere
pub const SKYBOX_RADIUS: f32 = 500.0;
pub const ANNOTATION_OFFSET: f32 = 2.0; // markers sit just inside the sphere to avoid z-fighting

// Camera
pub const CAMERA_FOV_DEG: f32 = 75.0;
pub const CAMERA_ZNEAR: f32 = 0.1;
pub const CAMERA_ZFAR: f32 = 1000.0;
pub const CAMERA_START_DISTANCE: f32 = 5.0; // orbit eye distance from the sphere center

// Orbit interaction
pub const ORBIT_DAMPING: f32 = 0.25; // velocity retained fraction removed per 60 Hz frame
pub const ORBIT_ROTATE_SPEED: f32 = 0.005; // radians per pixel of drag
pub const ORBIT_ZOOM_SPEED: f32 = 0.25;
pub const ORBIT_MIN_DISTANCE: f32 = 1.0;
pub const ORBIT_MAX_DISTANCE: f32 = 50.0;
pub const ORBIT_MAX_PITCH: f32 = 1.55; // just shy of the poles
pub const ORBIT_PAN_SPEED: f32 = 0.002;

// Fade transition (opacity ramps 0 -> 1 -> 0 in fixed steps)
pub const FADE_TICK: Duration = Duration::from_millis(30);
pub const FADE_OPACITY_STEP: f32 = 0.08;

// Camera fly-to animation
pub const FLY_TO_DURATION_SEC: f32 = 1.5;
pub const FLY_TO_FOV_DEG: f32 = 50.0; // narrowed view when focused on an annotation

// Annotation markers
pub const MARKER_BASE_SCALE: f32 = 2.5;
pub const MARKER_HOVER_SCALE: f32 = 3.5;
pub const MARKER_PICK_RADIUS: f32 = 2.0; // ray-sphere radius for picking, world units
pub const MARKER_HOVER_PULSE_HZ: f32 = 0.8;
pub const MARKER_HOVER_PULSE_AMPLITUDE: f32 = 0.5;
pub const MARKER_CLICK_BOUNCE_SEC: f32 = 0.5;
pub const MARKER_CLICK_BOUNCE_AMPLITUDE: f32 = 0.5;

// Flat sky color used when no cube texture could be loaded (#87CEEB)
pub const SKY_FALLBACK_COLOR: [f32; 3] = [0.529, 0.808, 0.922];
