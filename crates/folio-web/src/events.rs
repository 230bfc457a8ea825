use folio_core::{Choreographer, ElementId, InteractionEvent, NavSection, Target};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::constants::NAVBAR_ID;
use crate::stage::dom_id;

struct Listener {
    target: web::EventTarget,
    kind: &'static str,
    closure: Closure<dyn FnMut(web::Event)>,
}

/// Event listeners that are removed from their targets when the set is
/// cleared or dropped, so re-wiring never stacks handlers.
#[derive(Default)]
pub struct ListenerSet {
    listeners: Vec<Listener>,
}

impl ListenerSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(
        &mut self,
        target: &web::EventTarget,
        kind: &'static str,
        handler: impl FnMut(web::Event) + 'static,
    ) -> anyhow::Result<()> {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(web::Event)>);
        target
            .add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;
        self.listeners.push(Listener {
            target: target.clone(),
            kind,
            closure,
        });
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    pub fn clear(&mut self) {
        for l in self.listeners.drain(..) {
            let _ = l
                .target
                .remove_event_listener_with_callback(l.kind, l.closure.as_ref().unchecked_ref());
        }
    }
}

impl Drop for ListenerSet {
    fn drop(&mut self) {
        self.clear();
    }
}

const POINTER_EVENTS: [(&str, InteractionEvent); 7] = [
    ("pointerenter", InteractionEvent::Enter),
    ("pointerleave", InteractionEvent::Leave),
    ("focus", InteractionEvent::Focus),
    ("blur", InteractionEvent::Blur),
    ("click", InteractionEvent::Click),
    ("pointerdown", InteractionEvent::Press),
    ("pointerup", InteractionEvent::Release),
];

fn element_for(target: Target) -> ElementId {
    match target {
        Target::Bubble(i) => ElementId::BubbleContainer(i),
        Target::Jelly(i) => ElementId::Jelly(i),
        Target::NavIcon(i) => ElementId::NavIcon(i),
    }
}

/// Attach hover, focus and click feedback to every interactive element.
/// Elements the page has not rendered are skipped.
pub fn wire_targets(
    document: &web::Document,
    choreo: &Rc<RefCell<Choreographer>>,
    targets: &[Target],
) -> anyhow::Result<ListenerSet> {
    let mut set = ListenerSet::new();
    for &target in targets {
        let Some(el) = document.get_element_by_id(&dom_id(element_for(target))) else {
            continue;
        };
        for (kind, event) in POINTER_EVENTS {
            let choreo = choreo.clone();
            set.add(&el, kind, move |_ev: web::Event| {
                choreo
                    .borrow_mut()
                    .interact(target, event, instant::now());
            })?;
        }
    }
    log::debug!("[events] {} target listeners", set.len());
    Ok(set)
}

/// Navbar anchor links scroll to the section's choreographed position
/// instead of its raw offset.
pub fn wire_nav_links(
    window: &web::Window,
    document: &web::Document,
    choreo: &Rc<RefCell<Choreographer>>,
) -> anyhow::Result<ListenerSet> {
    let mut set = ListenerSet::new();
    let links = document
        .query_selector_all(&format!("#{NAVBAR_ID} a[href^='#']"))
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    for i in 0..links.length() {
        let Some(link) = links.item(i).and_then(|n| n.dyn_into::<web::Element>().ok()) else {
            continue;
        };
        let Some(section) = link
            .get_attribute("href")
            .as_deref()
            .and_then(NavSection::from_anchor)
        else {
            continue;
        };
        let choreo = choreo.clone();
        let window = window.clone();
        set.add(&link, "click", move |ev: web::Event| {
            let Some(top) = choreo.borrow().scroll_target(section) else {
                return;
            };
            ev.prevent_default();
            let opts = web::ScrollToOptions::new();
            opts.set_top(top as f64);
            opts.set_behavior(web::ScrollBehavior::Smooth);
            window.scroll_to_with_scroll_to_options(&opts);
        })?;
    }
    Ok(set)
}

/// Window-level listeners: resize debouncing and pointer tracking for the
/// starfield.
pub fn wire_window(
    window: &web::Window,
    choreo: &Rc<RefCell<Choreographer>>,
    pointer: &Rc<RefCell<Option<glam::Vec2>>>,
) -> anyhow::Result<ListenerSet> {
    let mut set = ListenerSet::new();
    {
        let choreo = choreo.clone();
        set.add(window, "resize", move |_ev: web::Event| {
            choreo.borrow_mut().on_resize(instant::now());
        })?;
    }
    {
        let pointer = pointer.clone();
        set.add(window, "pointermove", move |ev: web::Event| {
            if let Some(ev) = ev.dyn_ref::<web::PointerEvent>() {
                *pointer.borrow_mut() =
                    Some(glam::Vec2::new(ev.client_x() as f32, ev.client_y() as f32));
            }
        })?;
    }
    Ok(set)
}
