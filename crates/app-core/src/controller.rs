//! The scene controller facade: the single entry point navigation controls
//! use to switch panoramas, plus read accessors and change notification so
//! overlays (e.g. a map) stay in sync without reaching for ambient globals.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::annotation::{builtin_annotations, Annotation};
use crate::config::PanoramaConfig;
use crate::transition::{TransitionController, TransitionStep};

type IndexListener = Box<dyn FnMut(usize)>;

pub struct SceneController {
    configs: Vec<PanoramaConfig>,
    annotations: Vec<Annotation>,
    current: usize,
    transition: TransitionController,
    listeners: Vec<IndexListener>,
}

impl SceneController {
    pub fn new(configs: Vec<PanoramaConfig>) -> Self {
        Self {
            configs,
            annotations: builtin_annotations(),
            current: 0,
            transition: TransitionController::new(),
            listeners: Vec::new(),
        }
    }

    pub fn configs(&self) -> &[PanoramaConfig] {
        &self.configs
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_config(&self) -> &PanoramaConfig {
        &self.configs[self.current]
    }

    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    pub fn is_transitioning(&self) -> bool {
        self.transition.is_transitioning()
    }

    pub fn overlay_opacity(&self) -> Option<f32> {
        self.transition.overlay_opacity()
    }

    /// Register an observer for settled index changes.
    pub fn subscribe(&mut self, listener: impl FnMut(usize) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Request a switch to `index`. Returns `false` when the index is out of
    /// range or a transition is already in flight.
    pub fn transition_to(&mut self, index: usize) -> bool {
        if index >= self.configs.len() {
            log::warn!("[transition] index {} out of range", index);
            return false;
        }
        let accepted = self.transition.request(index);
        if accepted {
            log::info!(
                "[transition] -> {} ({})",
                index,
                self.configs[index].name
            );
        }
        accepted
    }

    /// Convenience for prev/next controls; wraps around the config list.
    pub fn transition_step(&mut self, forward: bool) -> bool {
        let n = self.configs.len();
        if n == 0 {
            return false;
        }
        let next = if forward {
            (self.current + 1) % n
        } else {
            (self.current + n - 1) % n
        };
        self.transition_to(next)
    }

    /// Advance the transition machine. The `Completed` step flips the
    /// current index and notifies subscribers; the host reacts to
    /// `BeginLoading` by starting the async texture load.
    pub fn tick(&mut self, dt: Duration) -> TransitionStep {
        let step = self.transition.tick(dt);
        if let TransitionStep::Completed { current } = step {
            self.current = current;
            log::info!(
                "[transition] completed -> {} ({})",
                current,
                self.configs[current].name
            );
            for l in &mut self.listeners {
                l(current);
            }
        }
        step
    }

    pub fn texture_ready(&mut self) {
        self.transition.texture_ready();
    }

    pub fn texture_failed(&mut self) {
        self.transition.texture_failed();
    }
}

/// Set once when the scene is torn down. Async loads completing afterwards
/// check it before touching any scene state, closing the unmount-mid-load
/// gap.
#[derive(Clone, Debug, Default)]
pub struct ShutdownFlag(Arc<AtomicBool>);

impl ShutdownFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shut_down(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_shut_down(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}
