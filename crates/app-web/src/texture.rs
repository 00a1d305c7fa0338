//! Async cube face loading: fetch the six images and decode them to RGBA.
//! All failures surface through the returned error; nothing panics.

use app_core::{PanoramaConfig, SceneError};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

async fn fetch_bytes(url: &str) -> Result<Vec<u8>, String> {
    let window = web::window().ok_or("no window")?;
    let resp_value = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(|e| format!("fetch {url}: {e:?}"))?;
    let resp: web::Response = resp_value
        .dyn_into()
        .map_err(|_| format!("fetch {url}: not a Response"))?;
    if !resp.ok() {
        return Err(format!("fetch {url}: HTTP {}", resp.status()));
    }
    let buf = JsFuture::from(
        resp.array_buffer()
            .map_err(|e| format!("fetch {url}: {e:?}"))?,
    )
    .await
    .map_err(|e| format!("fetch {url}: {e:?}"))?;
    Ok(js_sys::Uint8Array::new(&buf).to_vec())
}

/// Fetch and decode all six faces of `config`, in the fixed face order.
pub async fn fetch_cube_faces(config: &PanoramaConfig) -> Result<Vec<image::RgbaImage>, SceneError> {
    let mut faces = Vec::with_capacity(config.images.len());
    for url in &config.images {
        let bytes = fetch_bytes(url).await.map_err(|reason| SceneError::TextureLoad {
            name: config.name.clone(),
            reason,
        })?;
        let decoded = image::load_from_memory(&bytes).map_err(|e| SceneError::TextureLoad {
            name: config.name.clone(),
            reason: format!("decode {url}: {e}"),
        })?;
        faces.push(decoded.to_rgba8());
    }
    Ok(faces)
}
