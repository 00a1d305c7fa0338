//! The panorama transition state machine: fade the view to black, load the
//! new cube texture, fade back in. Exactly one transition may be in flight;
//! requests made while busy are rejected.

use std::time::Duration;

use crate::constants::{FADE_OPACITY_STEP, FADE_TICK};

/// Where the fade currently is. `Idle` is the only state from which a new
/// transition may start.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransitionPhase {
    Idle,
    FadingOut,
    Loading,
    FadingIn,
}

/// Signal emitted by `tick` when the machine crosses a boundary the host
/// must act on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransitionStep {
    None,
    /// Fade-out finished; start loading the cube texture for `target`.
    BeginLoading { target: usize },
    /// Fade-in finished; `current` is now the settled panorama index.
    Completed { current: usize },
}

#[derive(Clone, Debug)]
pub struct TransitionController {
    phase: TransitionPhase,
    target: usize,
    opacity: f32,
    tick_accum: Duration,
}

impl TransitionController {
    pub fn new() -> Self {
        Self {
            phase: TransitionPhase::Idle,
            target: 0,
            opacity: 0.0,
            tick_accum: Duration::ZERO,
        }
    }

    pub fn phase(&self) -> TransitionPhase {
        self.phase
    }

    pub fn is_transitioning(&self) -> bool {
        self.phase != TransitionPhase::Idle
    }

    /// Overlay opacity to draw this frame, or `None` when no overlay exists.
    pub fn overlay_opacity(&self) -> Option<f32> {
        match self.phase {
            TransitionPhase::Idle => None,
            _ => Some(self.opacity),
        }
    }

    /// Ask to transition to `target`. A request arriving mid-transition is
    /// dropped and `false` is returned.
    pub fn request(&mut self, target: usize) -> bool {
        if self.is_transitioning() {
            log::info!("[transition] request for {} ignored, already in flight", target);
            return false;
        }
        self.phase = TransitionPhase::FadingOut;
        self.target = target;
        self.opacity = 0.0;
        self.tick_accum = Duration::ZERO;
        true
    }

    /// The host finished uploading the new texture; begin fading back in.
    /// Ignored unless a load is actually pending, so a late arrival after a
    /// failure or teardown cannot restart the machine.
    pub fn texture_ready(&mut self) {
        if self.phase == TransitionPhase::Loading {
            self.phase = TransitionPhase::FadingIn;
            self.tick_accum = Duration::ZERO;
        }
    }

    /// The load failed: discard the overlay and return to idle with the old
    /// panorama still visible.
    pub fn texture_failed(&mut self) {
        if self.phase == TransitionPhase::Loading {
            self.phase = TransitionPhase::Idle;
            self.opacity = 0.0;
            self.tick_accum = Duration::ZERO;
        }
    }

    /// Advance the fade by `dt`. Opacity moves in fixed steps so irregular
    /// frame deltas keep the same cadence; a large delta may cross a phase
    /// boundary, in which case leftover time is dropped.
    pub fn tick(&mut self, dt: Duration) -> TransitionStep {
        if matches!(self.phase, TransitionPhase::Idle | TransitionPhase::Loading) {
            return TransitionStep::None;
        }
        self.tick_accum += dt;
        while self.tick_accum >= FADE_TICK {
            self.tick_accum -= FADE_TICK;
            match self.phase {
                TransitionPhase::FadingOut => {
                    self.opacity += FADE_OPACITY_STEP;
                    if self.opacity >= 1.0 {
                        self.opacity = 1.0;
                        self.phase = TransitionPhase::Loading;
                        self.tick_accum = Duration::ZERO;
                        return TransitionStep::BeginLoading {
                            target: self.target,
                        };
                    }
                }
                TransitionPhase::FadingIn => {
                    self.opacity -= FADE_OPACITY_STEP;
                    if self.opacity <= 0.0 {
                        self.opacity = 0.0;
                        self.phase = TransitionPhase::Idle;
                        self.tick_accum = Duration::ZERO;
                        return TransitionStep::Completed {
                            current: self.target,
                        };
                    }
                }
                _ => unreachable!(),
            }
        }
        TransitionStep::None
    }
}

impl Default for TransitionController {
    fn default() -> Self {
        Self::new()
    }
}
