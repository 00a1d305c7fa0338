//! DOM plumbing for the optional UI affordances around the canvas. Every
//! helper degrades to a no-op when the element it targets is absent.

use app_core::Annotation;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

#[inline]
pub fn add_click_listener(
    document: &web::Document,
    element_id: &str,
    mut handler: impl FnMut() + 'static,
) {
    if let Some(el) = document.get_element_by_id(element_id) {
        let closure =
            wasm_bindgen::closure::Closure::wrap(Box::new(move || handler()) as Box<dyn FnMut()>);
        let _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) {
    if let Some(w) = web::window() {
        let dpr = w.device_pixel_ratio();
        let rect = canvas.get_bounding_client_rect();
        let w_px = (rect.width() * dpr) as u32;
        let h_px = (rect.height() * dpr) as u32;
        canvas.set_width(w_px.max(1));
        canvas.set_height(h_px.max(1));
    }
}

pub fn hide_loading_indicator(document: &web::Document) {
    if let Some(el) = document.get_element_by_id("loading") {
        let _ = el.set_attribute("style", "display:none");
    }
}

pub fn set_cursor_pointer(canvas: &web::HtmlCanvasElement, pointer: bool) {
    let cursor = if pointer { "pointer" } else { "default" };
    let _ = canvas.style().set_property("cursor", cursor);
}

/// Fatal-path panel, e.g. when the platform has no WebGPU support. Built
/// unconditionally since there is no scene left to degrade to.
pub fn show_error_panel(document: &web::Document, title: &str, body: &str) {
    if let Some(doc_body) = document.body() {
        if let Ok(div) = document.create_element("div") {
            div.set_inner_html(&format!("<h2>{title}</h2><p>{body}</p>"));
            let _ = div.set_attribute(
                "style",
                "position:fixed;top:50%;left:50%;transform:translate(-50%,-50%);\
                 background:rgba(200,0,0,0.9);color:white;padding:20px;\
                 border-radius:10px;text-align:center;z-index:10000",
            );
            let _ = doc_body.append_child(&div);
        }
    }
}

/// Transient warning banner (initial texture load failure). Removes itself
/// after a few seconds.
pub fn show_transient_warning(document: &web::Document, message: &str) {
    if let Some(doc_body) = document.body() {
        if let Ok(div) = document.create_element("div") {
            div.set_id("load-warning");
            div.set_text_content(Some(message));
            let _ = div.set_attribute(
                "style",
                "position:fixed;top:20px;left:50%;transform:translateX(-50%);\
                 background:rgba(200,0,0,0.9);color:white;padding:15px;\
                 border-radius:8px;z-index:10001;text-align:center",
            );
            let _ = doc_body.append_child(&div);
            if let Some(window) = web::window() {
                let el = div.clone();
                let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move || {
                    el.remove();
                }) as Box<dyn FnMut()>);
                let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
                    closure.as_ref().unchecked_ref(),
                    5000,
                );
                closure.forget();
            }
        }
    }
}

// ---------------- tooltip ----------------

pub fn show_tooltip(document: &web::Document, title: &str) {
    hide_tooltip(document);
    if let Some(doc_body) = document.body() {
        if let Ok(div) = document.create_element("div") {
            div.set_id("annotation-tooltip");
            div.set_text_content(Some(title));
            let _ = div.set_attribute(
                "style",
                "position:fixed;background:rgba(0,0,0,0.9);color:white;\
                 padding:8px 12px;border-radius:6px;font-size:14px;\
                 font-weight:bold;z-index:10000;pointer-events:none",
            );
            let _ = doc_body.append_child(&div);
        }
    }
}

/// Keep the tooltip next to the pointer; called on every pointer move while
/// an annotation is hovered.
pub fn move_tooltip(document: &web::Document, client_x: f32, client_y: f32) {
    if let Some(el) = document.get_element_by_id("annotation-tooltip") {
        let base = "position:fixed;background:rgba(0,0,0,0.9);color:white;\
                    padding:8px 12px;border-radius:6px;font-size:14px;\
                    font-weight:bold;z-index:10000;pointer-events:none";
        let _ = el.set_attribute(
            "style",
            &format!(
                "{base};left:{}px;top:{}px",
                client_x + 15.0,
                client_y - 30.0
            ),
        );
    }
}

pub fn hide_tooltip(document: &web::Document) {
    if let Some(el) = document.get_element_by_id("annotation-tooltip") {
        el.remove();
    }
}

// ---------------- bottom overlay label ----------------

pub fn show_annotation_message(document: &web::Document, title: &str) {
    if let Some(el) = document.get_element_by_id("annotationMessage") {
        el.set_text_content(Some(title));
        let _ = el.set_attribute("style", "display:block;opacity:1");
        let _ = el.class_list().add_1("show");
    }
}

pub fn hide_annotation_message(document: &web::Document) {
    if let Some(el) = document.get_element_by_id("annotationMessage") {
        let _ = el.set_attribute("style", "display:none;opacity:0");
        let _ = el.class_list().remove_1("show");
    }
}

// ---------------- dialog ----------------

/// Render the descriptive dialog for a clicked annotation into `#dialogBox`.
/// The listen button is wired separately by the caller.
pub fn show_dialog(document: &web::Document, annotation: &Annotation) {
    if let Some(el) = document.get_element_by_id("dialogBox") {
        let color = css_color(annotation.color);
        el.set_inner_html(&format!(
            "<div class=\"dialog-content\">\
               <button class=\"close-btn\" id=\"dialog-close\">&times;</button>\
               <h2 style=\"color:{color}\">{}</h2>\
               <p>{}</p>\
               <button class=\"audio-btn\" id=\"dialog-listen\">Listen</button>\
             </div>",
            annotation.title, annotation.description
        ));
        let _ = el.class_list().add_1("show");
    }
}

pub fn close_dialog(document: &web::Document) {
    if let Some(el) = document.get_element_by_id("dialogBox") {
        let _ = el.class_list().remove_1("show");
        el.set_inner_html("");
    }
}

pub fn dialog_open(document: &web::Document) -> bool {
    document
        .get_element_by_id("dialogBox")
        .map(|el| el.class_list().contains("show"))
        .unwrap_or(false)
}

fn css_color(rgb: [f32; 3]) -> String {
    format!(
        "rgb({},{},{})",
        (rgb[0] * 255.0) as u8,
        (rgb[1] * 255.0) as u8,
        (rgb[2] * 255.0) as u8
    )
}
