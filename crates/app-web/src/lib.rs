#![cfg(target_arch = "wasm32")]

pub mod constants;
pub mod dom;
pub mod events;
pub mod frame;
pub mod input;
pub mod render;
pub mod state;
pub mod texture;
pub mod tts;

use std::cell::RefCell;
use std::rc::Rc;

use app_core::{builtin_panoramas, narration_for, ShutdownFlag};
use instant::Instant;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys as web;

use frame::FrameContext;
use input::MouseState;
use state::TourState;

thread_local! {
    static CONTEXT: RefCell<Option<Rc<RefCell<FrameContext<'static>>>>> = RefCell::new(None);
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("app-web starting");

    wasm_bindgen_futures::spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
            if let Some(document) = dom::window_document() {
                dom::show_error_panel(
                    &document,
                    "3D Scene Error",
                    "Failed to initialize the 3D environment. Please refresh the page.",
                );
            }
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas = acquire_canvas(&document)?;

    // Maintain canvas internal pixel size to match CSS size * devicePixelRatio
    dom::sync_canvas_backing_size(&canvas);

    // Scene state and controller
    let state = Rc::new(RefCell::new(TourState::new(builtin_panoramas())));
    let mouse = Rc::new(RefCell::new(MouseState::default()));

    // Map-style overlays stay in sync via the index subscription
    {
        let names: Vec<String> = state
            .borrow()
            .controller
            .configs()
            .iter()
            .map(|c| c.name.clone())
            .collect();
        let doc_sync = document.clone();
        state.borrow_mut().controller.subscribe(move |idx| {
            if let Some(el) = doc_sync.get_element_by_id("current-scene") {
                if let Some(name) = names.get(idx) {
                    el.set_text_content(Some(name));
                }
            }
        });
    }

    // WebGPU init. Unsupported platforms get a visible error panel and no
    // further setup.
    let gpu = match frame::init_gpu(&canvas).await {
        Some(g) => g,
        None => {
            dom::show_error_panel(
                &document,
                "WebGPU Not Supported",
                "Your browser does not support WebGPU. Please use a modern browser.",
            );
            return Ok(());
        }
    };

    dom::hide_loading_indicator(&document);

    let mut listeners = events::wire_input_handlers(events::InputWiring {
        canvas: canvas.clone(),
        document: document.clone(),
        state: state.clone(),
        mouse,
    });

    // Window resize keeps the canvas backing size in step with CSS size
    {
        let canvas_resize = canvas.clone();
        let closure = Closure::wrap(Box::new(move || {
            dom::sync_canvas_backing_size(&canvas_resize);
        }) as Box<dyn FnMut()>);
        let function: js_sys::Function = closure.as_ref().unchecked_ref::<js_sys::Function>().clone();
        listeners.push(events::ListenerGuard::attach(
            window.unchecked_ref(),
            "resize",
            function,
            Box::new(closure),
        ));
    }

    let frame_ctx = Rc::new(RefCell::new(FrameContext {
        state: state.clone(),
        canvas: canvas.clone(),
        gpu: Some(gpu),
        listeners,
        shutdown: ShutdownFlag::new(),
        last_instant: Instant::now(),
    }));

    // Optional page chrome: prev/next buttons and a scene narration control
    {
        let st = state.clone();
        dom::add_click_listener(&document, "next-skybox", move || {
            st.borrow_mut().controller.transition_step(true);
        });
        let st = state.clone();
        dom::add_click_listener(&document, "prev-skybox", move || {
            st.borrow_mut().controller.transition_step(false);
        });
        let st = state.clone();
        dom::add_click_listener(&document, "narrate-scene", move || {
            let name = st.borrow().controller.current_config().name.clone();
            match narration_for(&name) {
                Some(script) => tts::speak(script),
                None => log::warn!("[tts] no narration for '{}'", name),
            }
        });
    }

    frame::spawn_initial_load(frame_ctx.clone());
    frame::start_loop(frame_ctx.clone());

    CONTEXT.with(|c| *c.borrow_mut() = Some(frame_ctx));
    Ok(())
}

/// Create the rendering surface inside `#app-mount` (removed again on
/// teardown), or fall back to a page-provided `#app-canvas`.
fn acquire_canvas(document: &web::Document) -> anyhow::Result<web::HtmlCanvasElement> {
    if let Some(mount) = document.get_element_by_id("app-mount") {
        let canvas: web::HtmlCanvasElement = document
            .create_element("canvas")
            .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?
            .dyn_into()
            .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
        canvas.set_id("app-canvas");
        let _ = canvas.set_attribute(
            "style",
            "width:100%;height:100%;touch-action:none;outline:none",
        );
        mount
            .append_child(&canvas)
            .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
        return Ok(canvas);
    }
    document
        .get_element_by_id("app-canvas")
        .ok_or_else(|| anyhow::anyhow!("missing #app-mount and #app-canvas"))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))
}

// ---------------- page-facing controls ----------------

/// Request a panorama change; the single entry point for external
/// navigation (map clicks, custom buttons). Returns false when the request
/// is dropped (out of range or a transition is already running).
#[wasm_bindgen]
pub fn transition_to_skybox(index: usize) -> bool {
    CONTEXT.with(|c| {
        c.borrow()
            .as_ref()
            .map(|ctx| {
                ctx.borrow()
                    .state
                    .borrow_mut()
                    .controller
                    .transition_to(index)
            })
            .unwrap_or(false)
    })
}

#[wasm_bindgen]
pub fn current_skybox() -> usize {
    CONTEXT.with(|c| {
        c.borrow()
            .as_ref()
            .map(|ctx| ctx.borrow().state.borrow().controller.current_index())
            .unwrap_or(0)
    })
}

#[wasm_bindgen]
pub fn skybox_count() -> usize {
    CONTEXT.with(|c| {
        c.borrow()
            .as_ref()
            .map(|ctx| ctx.borrow().state.borrow().controller.configs().len())
            .unwrap_or(0)
    })
}

#[wasm_bindgen]
pub fn skybox_name(index: usize) -> Option<String> {
    CONTEXT.with(|c| {
        c.borrow().as_ref().and_then(|ctx| {
            ctx.borrow()
                .state
                .borrow()
                .controller
                .configs()
                .get(index)
                .map(|cfg| cfg.name.clone())
        })
    })
}

/// The most recent sky-sphere intersection under the pointer, as `[x, y, z]`;
/// a debug/coordinate-display affordance.
#[wasm_bindgen]
pub fn last_target_point() -> Vec<f32> {
    CONTEXT.with(|c| {
        c.borrow()
            .as_ref()
            .map(|ctx| {
                let p = ctx.borrow().state.borrow().last_target_point;
                vec![p.x, p.y, p.z]
            })
            .unwrap_or_default()
    })
}

/// Tear the scene down: stops the frame loop, removes listeners and
/// releases GPU resources. Safe to call more than once.
#[wasm_bindgen]
pub fn shutdown_scene() {
    CONTEXT.with(|c| {
        if let Some(ctx) = c.borrow_mut().take() {
            ctx.borrow_mut().dispose();
        }
    });
}
