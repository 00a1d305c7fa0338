//! The per-frame driver: advances animations and the transition machine,
//! dispatches async texture loads, and renders. Also owns teardown.

use std::cell::RefCell;
use std::rc::Rc;

use app_core::{ShutdownFlag, TransitionStep};
use instant::Instant;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

use crate::dom;
use crate::events::ListenerGuard;
use crate::render::GpuState;
use crate::state::TourState;
use crate::texture;
use crate::tts;

pub struct FrameContext<'a> {
    pub state: Rc<RefCell<TourState>>,
    pub canvas: web::HtmlCanvasElement,
    pub gpu: Option<GpuState<'a>>,
    pub listeners: Vec<ListenerGuard>,
    pub shutdown: ShutdownFlag,
    pub last_instant: Instant,
}

impl FrameContext<'static> {
    /// One animation frame. Returns the panorama index whose texture load
    /// should start now, if the fade-out just finished.
    pub fn frame(&mut self) -> Option<usize> {
        let now = Instant::now();
        let dt = now - self.last_instant;
        self.last_instant = now;
        let dt_sec = dt.as_secs_f32();

        let mut st = self.state.borrow_mut();
        st.step_animations(dt_sec);

        let mut pending_load = None;
        match st.controller.tick(dt) {
            TransitionStep::BeginLoading { target } => pending_load = Some(target),
            TransitionStep::Completed { .. } => {}
            TransitionStep::None => {}
        }

        let markers = st.marker_instances();
        let overlay = st.controller.overlay_opacity();

        if let Some(gpu) = &mut self.gpu {
            let w = self.canvas.width();
            let h = self.canvas.height();
            gpu.resize_if_needed(w, h);
            st.camera.aspect = gpu.aspect();
            if let Err(e) = gpu.render(&st.camera, &markers, overlay) {
                log::error!("render error: {:?}", e);
            }
        }

        pending_load
    }

    /// Tear the scene down: stop the loop, unhook listeners, drop DOM
    /// affordances, release GPU resources.
    pub fn dispose(&mut self) {
        self.shutdown.shut_down();
        self.listeners.clear();
        if let Some(document) = dom::window_document() {
            dom::hide_tooltip(&document);
            dom::close_dialog(&document);
        }
        tts::cancel();
        let mut st = self.state.borrow_mut();
        st.hover.clear();
        drop(st);
        if let Some(mut gpu) = self.gpu.take() {
            gpu.destroy();
        }
        self.canvas.remove();
        log::info!("[lifecycle] scene disposed");
    }
}

pub async fn init_gpu(canvas: &web::HtmlCanvasElement) -> Option<GpuState<'static>> {
    // leak a canvas clone to satisfy 'static lifetime for surface
    let leaked_canvas = Box::leak(Box::new(canvas.clone()));
    match GpuState::new(leaked_canvas).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("WebGPU init error: {}", e);
            None
        }
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext<'static>>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let frame_ctx_tick = frame_ctx.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        if frame_ctx_tick.borrow().shutdown.is_shut_down() {
            // Drop the self-reference so the closure can be collected.
            tick_clone.borrow_mut().take();
            return;
        }
        let pending = frame_ctx_tick.borrow_mut().frame();
        if let Some(target) = pending {
            spawn_texture_load(frame_ctx_tick.clone(), target);
        }
        if let Some(w) = web::window() {
            let _ = w.request_animation_frame(
                tick_clone
                    .borrow()
                    .as_ref()
                    .unwrap()
                    .as_ref()
                    .unchecked_ref(),
            );
        }
    }) as Box<dyn FnMut()>));
    if let Some(w) = web::window() {
        let _ = w.request_animation_frame(tick.borrow().as_ref().unwrap().as_ref().unchecked_ref());
    }
}

/// Load the cube faces for `target` and hand them to the renderer, stepping
/// the transition machine on success or failure. A load that lands after
/// teardown is discarded.
pub fn spawn_texture_load(ctx: Rc<RefCell<FrameContext<'static>>>, target: usize) {
    let (config, shutdown) = {
        let c = ctx.borrow();
        let st = c.state.borrow();
        (st.controller.configs()[target].clone(), c.shutdown.clone())
    };
    spawn_local(async move {
        let result = texture::fetch_cube_faces(&config).await;
        if shutdown.is_shut_down() {
            log::warn!("[texture] load for '{}' finished after teardown", config.name);
            return;
        }
        let mut c = ctx.borrow_mut();
        match result {
            Ok(faces) => {
                let applied = match &mut c.gpu {
                    Some(gpu) => gpu.set_cube_texture(&config.name, &faces),
                    None => return,
                };
                let st_rc = c.state.clone();
                let mut st = st_rc.borrow_mut();
                match applied {
                    Ok(()) => {
                        log::info!("[texture] loaded '{}'", config.name);
                        st.controller.texture_ready();
                    }
                    Err(e) => {
                        log::error!("[texture] {}", e);
                        st.controller.texture_failed();
                    }
                }
            }
            Err(e) => {
                log::error!("[texture] {}", e);
                c.state.borrow_mut().controller.texture_failed();
            }
        }
    });
}

/// Initial panorama load. Failure leaves the flat fallback sky and shows a
/// transient warning instead of aborting the scene.
pub fn spawn_initial_load(ctx: Rc<RefCell<FrameContext<'static>>>) {
    let (config, shutdown) = {
        let c = ctx.borrow();
        let st = c.state.borrow();
        (st.controller.current_config().clone(), c.shutdown.clone())
    };
    spawn_local(async move {
        let result = texture::fetch_cube_faces(&config).await;
        if shutdown.is_shut_down() {
            return;
        }
        let mut c = ctx.borrow_mut();
        let applied = match result {
            Ok(faces) => match &mut c.gpu {
                Some(gpu) => gpu.set_cube_texture(&config.name, &faces),
                None => return,
            },
            Err(e) => Err(e),
        };
        match applied {
            Ok(()) => log::info!("[texture] initial panorama '{}' ready", config.name),
            Err(e) => {
                log::error!("[texture] initial load failed: {}", e);
                if let Some(document) = dom::window_document() {
                    dom::show_transient_warning(
                        &document,
                        "Skybox images failed to load. Using fallback color.",
                    );
                }
            }
        }
    });
}
