// Host-side tests for the panorama transition state machine and the scene
// controller facade built on top of it.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use app_core::{
    PanoramaConfig, SceneController, TransitionController, TransitionPhase, TransitionStep,
    FADE_TICK,
};

fn two_scenes() -> Vec<PanoramaConfig> {
    vec![
        PanoramaConfig::from_dir("P1", "/img/p1"),
        PanoramaConfig::from_dir("P2", "/img/p2"),
    ]
}

/// Drive `tick` in single fade steps until a non-None step comes out.
fn drive_until_step(c: &mut TransitionController, max_steps: usize) -> (TransitionStep, usize) {
    for n in 1..=max_steps {
        let step = c.tick(FADE_TICK);
        if step != TransitionStep::None {
            return (step, n);
        }
    }
    (TransitionStep::None, max_steps)
}

#[test]
fn request_from_idle_starts_fade_out() {
    let mut c = TransitionController::new();
    assert!(!c.is_transitioning());
    assert_eq!(c.overlay_opacity(), None);

    assert!(c.request(1));
    assert!(c.is_transitioning());
    assert_eq!(c.phase(), TransitionPhase::FadingOut);
    assert_eq!(c.overlay_opacity(), Some(0.0));
}

#[test]
fn fade_out_completes_after_fixed_steps() {
    let mut c = TransitionController::new();
    assert!(c.request(1));

    // 0.08 per 30 ms step; the 13th step crosses 1.0
    let (step, n) = drive_until_step(&mut c, 100);
    assert_eq!(step, TransitionStep::BeginLoading { target: 1 });
    assert_eq!(n, 13);
    assert_eq!(c.phase(), TransitionPhase::Loading);
    assert_eq!(c.overlay_opacity(), Some(1.0));
}

#[test]
fn request_while_transitioning_is_dropped() {
    let mut c = TransitionController::new();
    assert!(c.request(1));
    // Second request mid-flight must be a no-op
    assert!(!c.request(0));
    assert_eq!(c.phase(), TransitionPhase::FadingOut);

    let (step, _) = drive_until_step(&mut c, 100);
    assert_eq!(step, TransitionStep::BeginLoading { target: 1 });
    // Still rejected while loading and fading back in
    assert!(!c.request(0));
    c.texture_ready();
    assert!(!c.request(0));

    let (step, _) = drive_until_step(&mut c, 100);
    assert_eq!(step, TransitionStep::Completed { current: 1 });
    assert!(!c.is_transitioning());
}

#[test]
fn full_transition_completes_once() {
    let mut c = TransitionController::new();
    assert!(c.request(1));

    let mut completions = 0;
    let mut loads = 0;
    for _ in 0..200 {
        match c.tick(FADE_TICK) {
            TransitionStep::BeginLoading { .. } => {
                loads += 1;
                c.texture_ready();
            }
            TransitionStep::Completed { current } => {
                completions += 1;
                assert_eq!(current, 1);
            }
            TransitionStep::None => {}
        }
    }
    assert_eq!(loads, 1);
    assert_eq!(completions, 1);
    assert!(!c.is_transitioning());
    assert_eq!(c.overlay_opacity(), None);
}

#[test]
fn large_delta_crosses_one_boundary_only() {
    let mut c = TransitionController::new();
    assert!(c.request(1));

    // A huge frame delta finishes the fade-out but the leftover time is
    // dropped rather than leaking into the next phase.
    let step = c.tick(Duration::from_secs(10));
    assert_eq!(step, TransitionStep::BeginLoading { target: 1 });
    assert_eq!(c.phase(), TransitionPhase::Loading);
    assert_eq!(c.tick(Duration::from_secs(10)), TransitionStep::None);
}

#[test]
fn load_failure_aborts_to_idle() {
    let mut c = TransitionController::new();
    assert!(c.request(1));
    let (step, _) = drive_until_step(&mut c, 100);
    assert_eq!(step, TransitionStep::BeginLoading { target: 1 });

    c.texture_failed();
    assert!(!c.is_transitioning());
    assert_eq!(c.overlay_opacity(), None);
    assert_eq!(c.tick(FADE_TICK), TransitionStep::None);
    // The machine is usable again afterwards
    assert!(c.request(0));
}

#[test]
fn late_texture_signals_are_ignored_when_idle() {
    let mut c = TransitionController::new();
    c.texture_ready();
    assert!(!c.is_transitioning());
    c.texture_failed();
    assert!(!c.is_transitioning());
    assert_eq!(c.tick(FADE_TICK), TransitionStep::None);
}

#[test]
fn fade_in_opacity_ramps_down() {
    let mut c = TransitionController::new();
    assert!(c.request(1));
    drive_until_step(&mut c, 100);
    c.texture_ready();

    let before = c.overlay_opacity().unwrap();
    c.tick(FADE_TICK);
    let after = c.overlay_opacity().unwrap();
    assert!(after < before, "opacity should fall, got {before} -> {after}");
}

// ---------------- controller facade ----------------

#[test]
fn controller_scenario_switch_to_second_scene() {
    let mut sc = SceneController::new(two_scenes());
    let seen: Rc<RefCell<Vec<usize>>> = Rc::new(RefCell::new(Vec::new()));
    let seen_sub = seen.clone();
    sc.subscribe(move |idx| seen_sub.borrow_mut().push(idx));

    assert_eq!(sc.current_index(), 0);
    assert!(sc.transition_to(1));
    assert!(sc.is_transitioning());

    let mut loaded = false;
    for _ in 0..200 {
        match sc.tick(FADE_TICK) {
            TransitionStep::BeginLoading { target } => {
                assert_eq!(target, 1);
                loaded = true;
                sc.texture_ready();
            }
            TransitionStep::Completed { current } => assert_eq!(current, 1),
            TransitionStep::None => {}
        }
    }
    assert!(loaded);
    assert!(!sc.is_transitioning());
    assert_eq!(sc.current_index(), 1);
    assert_eq!(*seen.borrow(), vec![1]);
}

#[test]
fn controller_rapid_double_request_runs_once() {
    let mut sc = SceneController::new(two_scenes());
    let notifications = Rc::new(RefCell::new(0usize));
    let n = notifications.clone();
    sc.subscribe(move |_| *n.borrow_mut() += 1);

    assert!(sc.transition_to(1));
    assert!(!sc.transition_to(1)); // dropped: still fading out

    for _ in 0..200 {
        if let TransitionStep::BeginLoading { .. } = sc.tick(FADE_TICK) {
            sc.texture_ready();
        }
    }
    assert_eq!(sc.current_index(), 1);
    assert_eq!(*notifications.borrow(), 1);
}

#[test]
fn controller_failed_load_keeps_old_scene() {
    let mut sc = SceneController::new(two_scenes());
    assert!(sc.transition_to(1));

    for _ in 0..200 {
        if let TransitionStep::BeginLoading { .. } = sc.tick(FADE_TICK) {
            sc.texture_failed();
        }
    }
    assert!(!sc.is_transitioning());
    assert_eq!(sc.current_index(), 0);
    assert_eq!(sc.overlay_opacity(), None);
}

#[test]
fn controller_rejects_out_of_range_index() {
    let mut sc = SceneController::new(two_scenes());
    assert!(!sc.transition_to(5));
    assert!(!sc.is_transitioning());
}

#[test]
fn controller_step_wraps_around() {
    let mut sc = SceneController::new(two_scenes());
    // Backwards from 0 wraps to the last scene
    assert!(sc.transition_step(false));
    for _ in 0..200 {
        if let TransitionStep::BeginLoading { .. } = sc.tick(FADE_TICK) {
            sc.texture_ready();
        }
    }
    assert_eq!(sc.current_index(), 1);
}
