use folio_core::bubbles::SkillData;
use web_sys as web;

use crate::constants::{SKILL_DESCRIPTION_ID, SKILL_NAME_ID};

/// Fill the skill info panel.
pub fn show_skill(document: &web::Document, skill: &SkillData) {
    if let Some(el) = document.get_element_by_id(SKILL_NAME_ID) {
        el.set_text_content(Some(skill.name));
    }
    if let Some(el) = document.get_element_by_id(SKILL_DESCRIPTION_ID) {
        el.set_text_content(Some(skill.description));
    }
}
