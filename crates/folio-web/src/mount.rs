//! Waiting for the page to render the elements the choreography needs.
//!
//! One check runs immediately, then after a microtask, then after the next
//! animation frame, then after a short timeout.

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

use crate::constants::MOUNT_RETRY_TIMEOUT_MS;

async fn microtask() -> anyhow::Result<()> {
    JsFuture::from(js_sys::Promise::resolve(&JsValue::NULL))
        .await
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    Ok(())
}

async fn next_frame(window: &web::Window) -> anyhow::Result<()> {
    let promise = js_sys::Promise::new(&mut |resolve, _reject| {
        let _ = window.request_animation_frame(&resolve);
    });
    JsFuture::from(promise)
        .await
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    Ok(())
}

async fn timeout(window: &web::Window, ms: i32) -> anyhow::Result<()> {
    let promise = js_sys::Promise::new(&mut |resolve, _reject| {
        let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, ms);
    });
    JsFuture::from(promise)
        .await
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    Ok(())
}

fn all_present(document: &web::Document, ids: &[&str]) -> bool {
    ids.iter().all(|id| document.get_element_by_id(id).is_some())
}

/// Resolves `true` once every id is in the document, `false` if they are
/// still missing after the last retry.
pub async fn wait_for(
    window: &web::Window,
    document: &web::Document,
    ids: &[&str],
) -> anyhow::Result<bool> {
    if all_present(document, ids) {
        return Ok(true);
    }
    microtask().await?;
    if all_present(document, ids) {
        return Ok(true);
    }
    next_frame(window).await?;
    if all_present(document, ids) {
        return Ok(true);
    }
    timeout(window, MOUNT_RETRY_TIMEOUT_MS).await?;
    Ok(all_present(document, ids))
}

/// Decode every frame of the morph sequence so scrubbing never flashes.
pub async fn preload_sequence(document: &web::Document, sources: &[String]) -> usize {
    let mut decoded = 0;
    for src in sources {
        let Ok(el) = document.create_element("img") else {
            continue;
        };
        let Ok(img) = el.dyn_into::<web::HtmlImageElement>() else {
            continue;
        };
        img.set_src(src);
        match JsFuture::from(img.decode()).await {
            Ok(_) => decoded += 1,
            Err(e) => log::warn!("[preload] {src}: {:?}", e),
        }
    }
    decoded
}
