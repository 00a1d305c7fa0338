//! The single mutable scene state shared by the event closures and the
//! frame loop. Hover, focus and transition are plain values here; the DOM
//! and GPU layers render whatever this says.

use app_core::{
    Camera, CameraPose, FlyTo, HoverTracker, OrbitController, PanoramaConfig, SceneController,
    MARKER_BASE_SCALE, MARKER_CLICK_BOUNCE_AMPLITUDE, MARKER_CLICK_BOUNCE_SEC,
    MARKER_HOVER_PULSE_AMPLITUDE, MARKER_HOVER_PULSE_HZ, MARKER_HOVER_SCALE,
};
use glam::Vec3;

use crate::render::MarkerInstance;

pub struct TourState {
    pub controller: SceneController,
    pub camera: Camera,
    pub orbit: OrbitController,
    pub fly_to: Option<FlyTo>,
    pub overview_pose: Option<CameraPose>,
    pub focused: Option<usize>,
    pub hover: HoverTracker,
    pub hover_elapsed: f32,
    pub click_bounce: Option<(usize, f32)>,
    pub last_target_point: Vec3,
}

impl TourState {
    pub fn new(configs: Vec<PanoramaConfig>) -> Self {
        Self {
            controller: SceneController::new(configs),
            camera: Camera::new(1.0),
            orbit: OrbitController::new(),
            fly_to: None,
            overview_pose: None,
            focused: None,
            hover: HoverTracker::new(),
            hover_elapsed: 0.0,
            click_bounce: None,
            last_target_point: Vec3::ZERO,
        }
    }

    /// Orbit input is suspended while an annotation viewpoint is active.
    pub fn camera_locked(&self) -> bool {
        self.fly_to.is_some() || self.focused.is_some()
    }

    /// Start the fly-to animation for `index`, remembering the overview
    /// pose so it can be restored later. Returns false when the annotation
    /// records no viewpoint.
    pub fn begin_focus(&mut self, index: usize) -> bool {
        let pose = match self
            .controller
            .annotations()
            .get(index)
            .and_then(|a| a.camera_pose)
        {
            Some(p) => p,
            None => return false,
        };
        if self.overview_pose.is_none() {
            self.overview_pose = Some(self.camera.pose());
        }
        self.fly_to = Some(FlyTo::new(self.camera.pose(), pose));
        self.focused = Some(index);
        true
    }

    /// Reverse the focus animation back to the stored overview pose.
    pub fn return_to_overview(&mut self) {
        if let Some(overview) = self.overview_pose.take() {
            self.fly_to = Some(FlyTo::new(self.camera.pose(), overview));
        }
        self.focused = None;
    }

    /// Advance camera and marker animations by one frame.
    pub fn step_animations(&mut self, dt_sec: f32) {
        if let Some(fly) = &mut self.fly_to {
            let pose = fly.advance(dt_sec);
            self.camera.apply_pose(&pose);
            if fly.finished() {
                self.fly_to = None;
            }
        } else if !self.camera_locked() {
            self.orbit.update(dt_sec);
            self.orbit.apply_to(&mut self.camera);
        }

        if self.hover.hovered().is_some() {
            self.hover_elapsed += dt_sec;
        } else {
            self.hover_elapsed = 0.0;
        }

        if let Some((_, elapsed)) = &mut self.click_bounce {
            *elapsed += dt_sec;
            if *elapsed >= MARKER_CLICK_BOUNCE_SEC {
                self.click_bounce = None;
            }
        }
    }

    /// Build the per-frame marker instance list: base scale, hover pulse,
    /// click bounce.
    pub fn marker_instances(&self) -> Vec<MarkerInstance> {
        let hovered = self.hover.hovered();
        self.controller
            .annotations()
            .iter()
            .enumerate()
            .map(|(i, a)| {
                let mut scale = MARKER_BASE_SCALE;
                if hovered == Some(i) {
                    scale = MARKER_HOVER_SCALE
                        + (self.hover_elapsed * std::f32::consts::TAU * MARKER_HOVER_PULSE_HZ)
                            .sin()
                            * MARKER_HOVER_PULSE_AMPLITUDE;
                }
                if let Some((bi, elapsed)) = self.click_bounce {
                    if bi == i {
                        let progress = (elapsed / MARKER_CLICK_BOUNCE_SEC).min(1.0);
                        scale += (progress * std::f32::consts::PI).sin()
                            * MARKER_CLICK_BOUNCE_AMPLITUDE;
                    }
                }
                let p = a.marker_position();
                MarkerInstance {
                    pos: p.to_array(),
                    scale,
                    color: [a.color[0], a.color[1], a.color[2], 1.0],
                }
            })
            .collect()
    }
}
