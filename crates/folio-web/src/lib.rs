#![cfg(target_arch = "wasm32")]
use folio_core::constants::TOTAL_FRAMES;
use folio_core::trigger::frame_source;
use folio_core::Choreographer;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod constants;
mod dom;
mod events;
mod frame;
mod measure;
mod mount;
mod stage;
mod starfield;
mod ui;

use constants::{ABOUT_ID, SKILLS_ID, STARFIELD_CANVAS_ID};

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("folio-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

fn random_seed() -> u64 {
    let mut bytes = [0u8; 8];
    match getrandom::getrandom(&mut bytes) {
        Ok(()) => u64::from_le_bytes(bytes),
        Err(_) => instant::now().to_bits(),
    }
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    if !mount::wait_for(&window, &document, &[ABOUT_ID, SKILLS_ID]).await? {
        log::warn!("sections not rendered at mount; relying on frame retries");
    }

    {
        let document = document.clone();
        spawn_local(async move {
            let sources: Vec<String> = (1..=TOTAL_FRAMES).map(frame_source).collect();
            let decoded = mount::preload_sequence(&document, &sources).await;
            log::info!("preloaded {decoded}/{} morph frames", sources.len());
        });
    }

    let vp = dom::viewport(&window, &document);
    let m = measure::measure(&window, &document, dom::scroll_y(&window));
    let choreo = Rc::new(RefCell::new(Choreographer::new(vp, m)));
    let pointer = Rc::new(RefCell::new(None::<glam::Vec2>));

    let stars = match document.get_element_by_id(STARFIELD_CANVAS_ID) {
        Some(el) => {
            let canvas = el
                .dyn_into::<web::HtmlCanvasElement>()
                .map_err(|e| anyhow::anyhow!("{:?}", e))?;
            Some(starfield::StarCanvas::new(canvas, random_seed())?)
        }
        None => None,
    };

    let window_listeners = events::wire_window(&window, &choreo, &pointer)?;
    let nav_listeners = events::wire_nav_links(&window, &document, &choreo)?;

    let mut ctx = frame::FrameContext {
        window: window.clone(),
        document: document.clone(),
        choreo,
        stage: stage::DomStage::new(document),
        stars,
        pointer,
        targets: events::ListenerSet::new(),
        last_scroll: None,
        shown_skill: None,
    };
    ctx.remeasure();
    log::info!(
        "folio-web ready: {} window, {} nav listeners",
        window_listeners.len(),
        nav_listeners.len()
    );

    // The page lives as long as the loop; the listener sets move into it.
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        let _keep = (&window_listeners, &nav_listeners);
        ctx.frame();
        if let Some(w) = web::window() {
            if let Some(cb) = tick_clone.borrow().as_ref() {
                let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
            }
        }
    }) as Box<dyn FnMut()>));
    if let Some(cb) = tick.borrow().as_ref() {
        window
            .request_animation_frame(cb.as_ref().unchecked_ref())
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    }
    Ok(())
}
