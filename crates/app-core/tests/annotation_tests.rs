// Host-side tests for the annotation model and hover bookkeeping.

use app_core::{
    builtin_annotations, Annotation, HoverChange, HoverTracker, ANNOTATION_OFFSET,
    FLY_TO_FOV_DEG, SKYBOX_RADIUS,
};
use glam::Vec3;

#[test]
fn directions_are_normalized_at_construction() {
    let a = Annotation::new(Vec3::new(0.0, 0.0, 17.3), "t", "d", [1.0, 0.0, 0.0]);
    assert!((a.direction.length() - 1.0).abs() < 1e-6);
    assert_eq!(a.direction, Vec3::Z);
}

#[test]
fn marker_positions_sit_just_inside_the_sphere() {
    for a in builtin_annotations() {
        assert!((a.direction.length() - 1.0).abs() < 1e-6);
        let p = a.marker_position();
        assert!((p.length() - (SKYBOX_RADIUS - ANNOTATION_OFFSET)).abs() < 1e-3);
        // Position is the direction scaled, nothing else
        assert!((p.normalize() - a.direction).length() < 1e-6);
    }
}

#[test]
fn builtin_set_covers_the_six_cardinal_directions() {
    let annotations = builtin_annotations();
    assert_eq!(annotations.len(), 6);
    let expected = [
        Vec3::X,
        Vec3::NEG_X,
        Vec3::Y,
        Vec3::NEG_Y,
        Vec3::Z,
        Vec3::NEG_Z,
    ];
    for (a, want) in annotations.iter().zip(expected.iter()) {
        assert_eq!(a.direction, *want);
        assert!(!a.title.is_empty());
        assert!(!a.description.is_empty());
        for c in a.color {
            assert!((0.0..=1.0).contains(&c));
        }
    }
}

#[test]
fn builtin_annotations_record_focus_viewpoints() {
    for a in builtin_annotations() {
        let pose = a.camera_pose.expect("builtin annotations carry a pose");
        assert_eq!(pose.eye, Vec3::ZERO);
        assert!((pose.target - a.marker_position()).length() < 1e-4);
        assert!((pose.fovy_radians - FLY_TO_FOV_DEG.to_radians()).abs() < 1e-6);
    }
}

// ---------------- hover tracking ----------------

#[test]
fn hover_starts_empty() {
    let tracker = HoverTracker::new();
    assert_eq!(tracker.hovered(), None);
}

#[test]
fn hovering_a_new_marker_unhovers_the_previous_one() {
    let mut tracker = HoverTracker::new();

    let change = tracker.update(Some(0));
    assert_eq!(
        change,
        HoverChange {
            unhovered: None,
            hovered: Some(0)
        }
    );
    assert_eq!(tracker.hovered(), Some(0));

    // Switching targets reports both halves in one change, so at no point
    // can two markers be highlighted at once.
    let change = tracker.update(Some(3));
    assert_eq!(
        change,
        HoverChange {
            unhovered: Some(0),
            hovered: Some(3)
        }
    );
    assert_eq!(tracker.hovered(), Some(3));
}

#[test]
fn repeated_hits_are_noops() {
    let mut tracker = HoverTracker::new();
    tracker.update(Some(2));
    let change = tracker.update(Some(2));
    assert!(change.is_noop());
    assert_eq!(tracker.hovered(), Some(2));
}

#[test]
fn moving_away_clears_the_hover() {
    let mut tracker = HoverTracker::new();
    tracker.update(Some(1));
    let change = tracker.update(None);
    assert_eq!(
        change,
        HoverChange {
            unhovered: Some(1),
            hovered: None
        }
    );
    assert_eq!(tracker.hovered(), None);

    // Clearing an empty tracker does nothing
    assert!(tracker.clear().is_noop());
}

#[test]
fn pointer_over_marker_drives_hover_state() {
    // Scenario: a ray through an annotation's projected position hovers it,
    // a ray elsewhere clears it again.
    let annotations = builtin_annotations();
    let mut tracker = HoverTracker::new();
    let eye = Vec3::new(0.0, 0.0, 5.0);

    let toward = (annotations[4].marker_position() - eye).normalize();
    let hit = app_core::picking::pick_annotation(&annotations, eye, toward).map(|(i, _)| i);
    let change = tracker.update(hit);
    assert_eq!(change.hovered, Some(4));

    let away = Vec3::new(1.0, 1.0, 1.0).normalize();
    let hit = app_core::picking::pick_annotation(&annotations, eye, away).map(|(i, _)| i);
    let change = tracker.update(hit);
    assert_eq!(change.unhovered, Some(4));
    assert_eq!(tracker.hovered(), None);
}
