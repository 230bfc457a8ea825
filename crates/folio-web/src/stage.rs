//! [`Stage`] backed by inline styles on real DOM elements.

use fnv::FnvHashMap;
use folio_core::{ElementId, Props, Stage};
use wasm_bindgen::JsCast;
use web_sys as web;

/// Page id of an animated element.
pub fn dom_id(id: ElementId) -> String {
    match id {
        ElementId::AboutBlob => "about-blob".into(),
        ElementId::Jelly(i) => format!("jelly-{i}"),
        ElementId::SkillsTitle => "skills-title".into(),
        ElementId::BubbleContainer(i) => format!("bubble-{i}"),
        ElementId::BubbleImage(i) => format!("bubble-img-{i}"),
        ElementId::BubbleIcon(i) => format!("bubble-icon-{i}"),
        ElementId::SkillInfo => "skill-info".into(),
        ElementId::SkillsBlob => "skills-blob".into(),
        ElementId::ProjectsContent => "projects-content".into(),
        ElementId::ProjectsBlob => "projects-blob".into(),
        ElementId::ContactForm => "contact-form".into(),
        ElementId::ContactBlob => "contact-blob".into(),
        ElementId::NavIcon(i) => format!("nav-icon-{i}"),
    }
}

#[inline]
fn transform(p: &Props) -> String {
    format!(
        "translate3d({}px, {}px, 0) rotate({}deg) scale({})",
        p.x.unwrap_or(0.0),
        p.y.unwrap_or(0.0),
        p.rotation.unwrap_or(0.0),
        p.scale.unwrap_or(1.0)
    )
}

pub struct DomStage {
    document: web::Document,
    elements: FnvHashMap<ElementId, web::HtmlElement>,
    state: FnvHashMap<ElementId, Props>,
}

impl DomStage {
    pub fn new(document: web::Document) -> Self {
        Self {
            document,
            elements: FnvHashMap::default(),
            state: FnvHashMap::default(),
        }
    }

    /// Forget cached handles after the page re-rendered. Accumulated style
    /// state is kept so partial writes still compose into a full transform.
    pub fn forget_elements(&mut self) {
        self.elements.clear();
    }

    fn element(&mut self, id: ElementId) -> Option<web::HtmlElement> {
        if let Some(el) = self.elements.get(&id) {
            if el.is_connected() {
                return Some(el.clone());
            }
        }
        let el = self
            .document
            .get_element_by_id(&dom_id(id))?
            .dyn_into::<web::HtmlElement>()
            .ok()?;
        self.elements.insert(id, el.clone());
        Some(el)
    }
}

impl Stage for DomStage {
    fn has(&self, id: ElementId) -> bool {
        self.elements.contains_key(&id) || self.document.get_element_by_id(&dom_id(id)).is_some()
    }

    fn apply(&mut self, id: ElementId, props: Props) {
        let Some(el) = self.element(id) else {
            return;
        };
        let state = self.state.entry(id).or_default();
        state.merge(&props);
        let style = el.style();
        if props.x.is_some() || props.y.is_some() || props.scale.is_some() || props.rotation.is_some()
        {
            let _ = style.set_property("transform", &transform(state));
        }
        if let Some(opacity) = props.opacity {
            let _ = style.set_property("opacity", &opacity.to_string());
            let visibility = if opacity <= 0.0 { "hidden" } else { "visible" };
            let _ = style.set_property("visibility", visibility);
        }
        if let Some(w) = props.width {
            let _ = style.set_property("width", &format!("{w}px"));
        }
        if let Some(h) = props.height {
            let _ = style.set_property("height", &format!("{h}px"));
        }
    }

    fn set_source(&mut self, id: ElementId, src: &str) {
        let Some(el) = self.element(id) else {
            return;
        };
        match el.dyn_ref::<web::HtmlImageElement>() {
            Some(img) => {
                if !img.src().ends_with(src) {
                    img.set_src(src);
                }
            }
            None => {
                let _ = el.set_attribute("src", src);
            }
        }
    }
}
