use folio_core::{Rect, Viewport};
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::constants::NAVBAR_ID;

#[inline]
pub fn html_by_id(document: &web::Document, id: &str) -> Option<web::HtmlElement> {
    document
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<web::HtmlElement>().ok())
}

#[inline]
pub fn scroll_y(window: &web::Window) -> f32 {
    window.scroll_y().unwrap_or(0.0) as f32
}

#[inline]
fn number(v: Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>) -> f32 {
    v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0) as f32
}

/// Current viewport, with the navbar height when the bar has rendered.
pub fn viewport(window: &web::Window, document: &web::Document) -> Viewport {
    let width = number(window.inner_width());
    let height = number(window.inner_height());
    let vp = Viewport::new(width, height);
    match document.get_element_by_id(NAVBAR_ID) {
        Some(nav) => vp.with_navbar(nav.get_bounding_client_rect().height() as f32),
        None => vp,
    }
}

/// Bounding rect in document space.
#[inline]
pub fn doc_rect(el: &web::Element, scroll_y: f32) -> Rect {
    let r = el.get_bounding_client_rect();
    Rect::new(
        r.left() as f32,
        r.top() as f32 + scroll_y,
        r.width() as f32,
        r.height() as f32,
    )
}

/// Untransformed document top, summed up the offset-parent chain. Stage
/// writes move the bounding rect but not this.
pub fn layout_top(el: &web::HtmlElement) -> f32 {
    let mut top = 0.0;
    let mut node = Some(el.clone());
    while let Some(current) = node {
        top += current.offset_top() as f32;
        node = current
            .offset_parent()
            .and_then(|p| p.dyn_into::<web::HtmlElement>().ok());
    }
    top
}

/// Untransformed layout size; bounding rects include transforms.
#[inline]
pub fn layout_size(el: &web::HtmlElement) -> (f32, f32) {
    (el.offset_width() as f32, el.offset_height() as f32)
}

/// Number of consecutive `{prefix}{i}` ids present, starting at 0.
pub fn count_prefixed(document: &web::Document, prefix: &str, max: usize) -> usize {
    (0..max)
        .take_while(|i| document.get_element_by_id(&format!("{prefix}{i}")).is_some())
        .count()
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
