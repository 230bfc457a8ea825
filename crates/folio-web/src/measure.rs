//! Layout snapshot taken from the live page before each rebuild.

use folio_core::{ElementId, Measurements, Size};
use web_sys as web;

use crate::constants::{
    ABOUT_ID, CONTACT_CARD_ID, CONTACT_ID, MOBILE_JELLIES_ID, PROFILE_PHOTO_ID, PROJECTS_ID,
    PROJECTS_TITLE_ID, PROJECT_CARDS_ID, SKILLS_ID,
};
use crate::dom::{doc_rect, html_by_id, layout_size, layout_top};
use crate::stage::dom_id;

fn blob_size(document: &web::Document, id: ElementId) -> Option<Size> {
    let el = html_by_id(document, &dom_id(id))?;
    let (w, h) = layout_size(&el);
    let size = Size::new(w, h);
    size.is_valid().then_some(size)
}

fn px(value: &str) -> Option<f32> {
    value.trim().trim_end_matches("px").parse().ok()
}

fn margin_top(window: &web::Window, el: &web::Element) -> Option<f32> {
    let style = window.get_computed_style(el).ok()??;
    px(&style.get_property_value("margin-top").ok()?)
}

pub fn measure(window: &web::Window, document: &web::Document, scroll_y: f32) -> Measurements {
    let rect = |id: &str| {
        document
            .get_element_by_id(id)
            .map(|el| doc_rect(&el, scroll_y))
    };

    let about = rect(ABOUT_ID);
    let skills = rect(SKILLS_ID);
    let projects = rect(PROJECTS_ID);
    let contact = rect(CONTACT_ID);

    Measurements {
        scroll_y,
        about_top: about.map(|r| r.top),
        about_blob: blob_size(document, ElementId::AboutBlob),
        about_blob_top: html_by_id(document, &dom_id(ElementId::AboutBlob))
            .map(|el| layout_top(&el)),
        profile_photo: rect(PROFILE_PHOTO_ID),
        mobile_jellies: rect(MOBILE_JELLIES_ID),
        skills_top: skills.map(|r| r.top),
        skills_bottom: skills.map(|r| r.bottom()),
        skills_blob: blob_size(document, ElementId::SkillsBlob),
        projects_top: projects.map(|r| r.top),
        projects_blob: blob_size(document, ElementId::ProjectsBlob),
        project_cards: rect(PROJECT_CARDS_ID),
        projects_title_margin: document
            .get_element_by_id(PROJECTS_TITLE_ID)
            .and_then(|el| margin_top(window, &el)),
        contact_top: contact.map(|r| r.top),
        contact_bottom: contact.map(|r| r.bottom()),
        contact_card: rect(CONTACT_CARD_ID),
        contact_blob: blob_size(document, ElementId::ContactBlob),
    }
}
