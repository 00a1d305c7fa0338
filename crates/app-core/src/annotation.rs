//! Interactive annotations anchored to directions on the sky sphere, plus
//! the hover bookkeeping that keeps at most one of them highlighted.

use glam::Vec3;

use crate::camera::CameraPose;
use crate::constants::{ANNOTATION_OFFSET, FLY_TO_FOV_DEG, SKYBOX_RADIUS};

/// A marker on the sphere. The direction is normalized once at construction
/// and never mutated; the world position is derived from it.
#[derive(Clone, Debug)]
pub struct Annotation {
    pub direction: Vec3,
    pub title: String,
    pub description: String,
    pub color: [f32; 3],
    pub camera_pose: Option<CameraPose>,
}

impl Annotation {
    pub fn new(
        raw_direction: Vec3,
        title: impl Into<String>,
        description: impl Into<String>,
        color: [f32; 3],
    ) -> Self {
        let direction = raw_direction.normalize();
        Self {
            direction,
            title: title.into(),
            description: description.into(),
            color,
            camera_pose: None,
        }
    }

    /// Record the viewpoint the camera flies to when this annotation is
    /// activated: centered on the sphere, looking at the marker, with a
    /// narrowed field of view.
    pub fn with_focus_pose(mut self) -> Self {
        self.camera_pose = Some(CameraPose {
            eye: Vec3::ZERO,
            target: self.marker_position(),
            fovy_radians: FLY_TO_FOV_DEG.to_radians(),
        });
        self
    }

    /// World position of the marker, just inside the sphere surface.
    pub fn marker_position(&self) -> Vec3 {
        self.direction * (SKYBOX_RADIUS - ANNOTATION_OFFSET)
    }
}

fn hex_rgb(hex: u32) -> [f32; 3] {
    [
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
    ]
}

/// The six cardinal-direction campus annotations shown in every scene.
pub fn builtin_annotations() -> Vec<Annotation> {
    vec![
        Annotation::new(
            Vec3::X,
            "East View",
            "Looking east across the Truman State University campus. Explore the \
             eastern side of campus with its beautiful architecture and green spaces.",
            hex_rgb(0x3b82f6),
        )
        .with_focus_pose(),
        Annotation::new(
            Vec3::NEG_X,
            "West View",
            "Looking west across the Truman State University campus. Discover the \
             western side of campus and its scenic views.",
            hex_rgb(0xef4444),
        )
        .with_focus_pose(),
        Annotation::new(
            Vec3::Y,
            "Sky View",
            "Looking up at the sky above Truman State University. Enjoy the \
             beautiful Missouri sky and campus atmosphere.",
            hex_rgb(0x10b981),
        )
        .with_focus_pose(),
        Annotation::new(
            Vec3::NEG_Y,
            "Ground View",
            "Looking down at the ground of Truman State University. Explore the \
             campus grounds and pathways.",
            hex_rgb(0xf59e0b),
        )
        .with_focus_pose(),
        Annotation::new(
            Vec3::Z,
            "North View",
            "Looking north across the Truman State University campus. Experience \
             the northern side of campus with its historic buildings.",
            hex_rgb(0x8b5cf6),
        )
        .with_focus_pose(),
        Annotation::new(
            Vec3::NEG_Z,
            "South View",
            "Looking south across the Truman State University campus. Discover the \
             southern side of campus and its modern facilities.",
            hex_rgb(0xec4899),
        )
        .with_focus_pose(),
    ]
}

/// What changed after a hover update, so the frontend can undo the old
/// highlight before applying the new one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HoverChange {
    pub unhovered: Option<usize>,
    pub hovered: Option<usize>,
}

impl HoverChange {
    pub fn is_noop(&self) -> bool {
        self.unhovered.is_none() && self.hovered.is_none()
    }
}

/// Tracks which annotation (if any) the pointer is over. Hovering a new
/// annotation always un-hovers the previous one first, so the hovered set
/// never exceeds one.
#[derive(Clone, Copy, Debug, Default)]
pub struct HoverTracker {
    hovered: Option<usize>,
}

impl HoverTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    /// Feed the latest pick result; returns the transition to apply.
    pub fn update(&mut self, hit: Option<usize>) -> HoverChange {
        if hit == self.hovered {
            return HoverChange::default();
        }
        let change = HoverChange {
            unhovered: self.hovered,
            hovered: hit,
        };
        self.hovered = hit;
        change
    }

    /// Drop any hover, e.g. on pointer leave or scene teardown.
    pub fn clear(&mut self) -> HoverChange {
        self.update(None)
    }
}
