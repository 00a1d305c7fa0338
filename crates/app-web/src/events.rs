//! Pointer and keyboard wiring. Unlike fire-and-forget closures, every
//! canvas/window listener is held in a guard so teardown can unhook it.

use std::cell::RefCell;
use std::rc::Rc;

use app_core::{picking, Annotation};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::constants::{DRAG_CLICK_THRESHOLD_PX, WHEEL_ZOOM_SCALE};
use crate::dom;
use crate::input::{self, MouseState};
use crate::state::TourState;
use crate::tts;

/// Owns a DOM listener registration; removing it on drop keeps the canvas
/// free of stale handlers after teardown.
pub struct ListenerGuard {
    target: web::EventTarget,
    event: String,
    function: js_sys::Function,
    _keep_alive: Box<dyn std::any::Any>,
}

impl ListenerGuard {
    pub fn attach(
        target: &web::EventTarget,
        event: &str,
        function: js_sys::Function,
        keep_alive: Box<dyn std::any::Any>,
    ) -> Self {
        let _ = target.add_event_listener_with_callback(event, &function);
        Self {
            target: target.clone(),
            event: event.into(),
            function,
            _keep_alive: keep_alive,
        }
    }
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(&self.event, &self.function);
    }
}

macro_rules! guard {
    ($target:expr, $event:expr, $ty:ty, $body:expr) => {{
        let closure = Closure::wrap(Box::new($body) as Box<dyn FnMut($ty)>);
        let function: js_sys::Function = closure.as_ref().unchecked_ref::<js_sys::Function>().clone();
        ListenerGuard::attach($target, $event, function, Box::new(closure))
    }};
}

pub struct InputWiring {
    pub canvas: web::HtmlCanvasElement,
    pub document: web::Document,
    pub state: Rc<RefCell<TourState>>,
    pub mouse: Rc<RefCell<MouseState>>,
}

pub fn wire_input_handlers(w: InputWiring) -> Vec<ListenerGuard> {
    let mut guards = Vec::new();
    let window = match web::window() {
        Some(win) => win,
        None => return guards,
    };
    let canvas_target: &web::EventTarget = w.canvas.unchecked_ref();
    let window_target: &web::EventTarget = window.unchecked_ref();

    // pointermove: drag-to-orbit, otherwise hover picking
    {
        let state_m = w.state.clone();
        let mouse_m = w.mouse.clone();
        let canvas_m = w.canvas.clone();
        let document_m = w.document.clone();
        guards.push(guard!(
            window_target,
            "pointermove",
            web::PointerEvent,
            move |ev: web::PointerEvent| {
                let pos = input::pointer_canvas_px(&ev, &canvas_m);
                let (dx, dy, down, button) = {
                    let mut ms = mouse_m.borrow_mut();
                    let dx = ev.client_x() as f32 - ms.client_x;
                    let dy = ev.client_y() as f32 - ms.client_y;
                    ms.client_x = ev.client_x() as f32;
                    ms.client_y = ev.client_y() as f32;
                    ms.x = pos.x;
                    ms.y = pos.y;
                    if ms.down {
                        ms.drag_dist += (dx * dx + dy * dy).sqrt();
                    }
                    (dx, dy, ms.down, ms.button)
                };

                let mut st = state_m.borrow_mut();
                if down && !st.camera_locked() {
                    if button == 2 {
                        st.orbit.pan(dx, dy);
                    } else {
                        st.orbit.rotate(dx, dy);
                    }
                    return;
                }

                let (ro, rd) = picking::screen_to_world_ray(
                    &st.camera,
                    pos.x,
                    pos.y,
                    canvas_m.width() as f32,
                    canvas_m.height() as f32,
                );
                let hit = picking::pick_annotation(st.controller.annotations(), ro, rd)
                    .map(|(i, _)| i);
                let change = st.hover.update(hit);
                st.last_target_point = picking::sky_target_point(ro, rd);
                if !change.is_noop() {
                    st.hover_elapsed = 0.0;
                    if change.unhovered.is_some() {
                        dom::hide_tooltip(&document_m);
                        dom::hide_annotation_message(&document_m);
                        dom::set_cursor_pointer(&canvas_m, false);
                    }
                    if let Some(i) = change.hovered {
                        let title = st.controller.annotations()[i].title.clone();
                        dom::show_tooltip(&document_m, &title);
                        dom::show_annotation_message(&document_m, &title);
                        dom::set_cursor_pointer(&canvas_m, true);
                    }
                }
                if st.hover.hovered().is_some() {
                    dom::move_tooltip(&document_m, ev.client_x() as f32, ev.client_y() as f32);
                }
            }
        ));
    }

    // pointerdown: begin a drag
    {
        let mouse_m = w.mouse.clone();
        let canvas_m = w.canvas.clone();
        guards.push(guard!(
            canvas_target,
            "pointerdown",
            web::PointerEvent,
            move |ev: web::PointerEvent| {
                let mut ms = mouse_m.borrow_mut();
                ms.down = true;
                ms.button = ev.button();
                ms.drag_dist = 0.0;
                ms.client_x = ev.client_x() as f32;
                ms.client_y = ev.client_y() as f32;
                let _ = canvas_m.set_pointer_capture(ev.pointer_id());
                ev.prevent_default();
            }
        ));
    }

    // pointerup: end drag, or click a hovered annotation
    {
        let state_m = w.state.clone();
        let mouse_m = w.mouse.clone();
        let document_m = w.document.clone();
        guards.push(guard!(
            window_target,
            "pointerup",
            web::PointerEvent,
            move |ev: web::PointerEvent| {
                let was_click = {
                    let mut ms = mouse_m.borrow_mut();
                    let was_down = ms.down;
                    ms.down = false;
                    was_down && ms.drag_dist < DRAG_CLICK_THRESHOLD_PX
                };
                if !was_click {
                    return;
                }
                let clicked = {
                    let mut st = state_m.borrow_mut();
                    match st.hover.hovered() {
                        Some(i) => {
                            st.click_bounce = Some((i, 0.0));
                            let annotation = st.controller.annotations()[i].clone();
                            if st.begin_focus(i) {
                                log::info!("[click] focus annotation '{}'", annotation.title);
                            } else {
                                log::info!("[click] annotation '{}'", annotation.title);
                            }
                            Some(annotation)
                        }
                        None => None,
                    }
                };
                if let Some(annotation) = clicked {
                    dom::show_dialog(&document_m, &annotation);
                    wire_dialog_buttons(&document_m, &state_m, &annotation);
                }
                ev.prevent_default();
            }
        ));
    }

    // wheel: zoom
    {
        let state_m = w.state.clone();
        guards.push(guard!(
            canvas_target,
            "wheel",
            web::WheelEvent,
            move |ev: web::WheelEvent| {
                let mut st = state_m.borrow_mut();
                if !st.camera_locked() {
                    st.orbit.zoom(ev.delta_y() as f32 * WHEEL_ZOOM_SCALE);
                }
                ev.prevent_default();
            }
        ));
    }

    // keyboard: panorama navigation, dialog escape, fullscreen
    {
        let state_m = w.state.clone();
        let document_m = w.document.clone();
        let canvas_m = w.canvas.clone();
        guards.push(guard!(
            window_target,
            "keydown",
            web::KeyboardEvent,
            move |ev: web::KeyboardEvent| {
                handle_global_keydown(&ev, &state_m, &document_m, &canvas_m);
            }
        ));
    }

    // dialog backdrop: clicking outside the content closes it
    if let Some(dialog) = w.document.get_element_by_id("dialogBox") {
        let state_m = w.state.clone();
        let document_m = w.document.clone();
        let dialog_target: &web::EventTarget = dialog.unchecked_ref();
        guards.push(guard!(
            dialog_target,
            "click",
            web::MouseEvent,
            move |ev: web::MouseEvent| {
                let on_backdrop = ev
                    .target()
                    .and_then(|t| t.dyn_into::<web::Element>().ok())
                    .map(|el| el.id() == "dialogBox")
                    .unwrap_or(false);
                if on_backdrop {
                    close_dialog_and_return(&document_m, &state_m);
                }
            }
        ));
    }

    guards
}

pub fn handle_global_keydown(
    ev: &web::KeyboardEvent,
    state: &Rc<RefCell<TourState>>,
    document: &web::Document,
    canvas: &web::HtmlCanvasElement,
) {
    match ev.key().as_str() {
        "ArrowRight" => {
            state.borrow_mut().controller.transition_step(true);
            ev.prevent_default();
        }
        "ArrowLeft" => {
            state.borrow_mut().controller.transition_step(false);
            ev.prevent_default();
        }
        "Escape" => {
            if dom::dialog_open(document) {
                close_dialog_and_return(document, state);
            } else if web::window()
                .and_then(|w| w.document())
                .and_then(|d| d.fullscreen_element())
                .is_some()
            {
                let _ = document.exit_fullscreen();
            }
        }
        "f" | "F" => {
            if document.fullscreen_element().is_some() {
                let _ = document.exit_fullscreen();
            } else {
                let _ = canvas.request_fullscreen();
            }
            ev.prevent_default();
        }
        _ => {}
    }
}

fn close_dialog_and_return(document: &web::Document, state: &Rc<RefCell<TourState>>) {
    tts::cancel();
    dom::close_dialog(document);
    state.borrow_mut().return_to_overview();
}

/// Hook up the freshly rendered dialog's listen/close buttons. The nodes are
/// replaced on every open, so the listeners go with them.
fn wire_dialog_buttons(
    document: &web::Document,
    state: &Rc<RefCell<TourState>>,
    annotation: &Annotation,
) {
    let narration = format!("{}. {}", annotation.title, annotation.description);
    dom::add_click_listener(document, "dialog-listen", move || {
        if tts::speaking() {
            tts::cancel();
        } else {
            tts::speak(&narration);
        }
    });
    let document_c = document.clone();
    let state_c = state.clone();
    dom::add_click_listener(document, "dialog-close", move || {
        close_dialog_and_return(&document_c, &state_c);
    });
}
