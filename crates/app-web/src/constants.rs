// Web interaction tuning constants

// A pointer that moved less than this between down and up counts as a click
pub const DRAG_CLICK_THRESHOLD_PX: f32 = 4.0;

// Wheel lines to orbit zoom units
pub const WHEEL_ZOOM_SCALE: f32 = 0.01;
