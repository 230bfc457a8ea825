use folio_core::bubbles::SkillData;
use folio_core::{Choreographer, Frame, Target};
use glam::Vec2;
use std::cell::RefCell;
use std::rc::Rc;
use web_sys as web;

use crate::constants::{JELLY_PREFIX, MAX_DECORATIONS, NAV_ICON_PREFIX};
use crate::dom::{count_prefixed, scroll_y, viewport};
use crate::events::{self, ListenerSet};
use crate::measure::measure;
use crate::stage::DomStage;
use crate::starfield::StarCanvas;
use crate::ui;

pub struct FrameContext {
    pub window: web::Window,
    pub document: web::Document,
    pub choreo: Rc<RefCell<Choreographer>>,
    pub stage: DomStage,
    pub stars: Option<StarCanvas>,
    pub pointer: Rc<RefCell<Option<Vec2>>>,

    pub targets: ListenerSet,
    pub last_scroll: Option<f32>,
    pub shown_skill: Option<SkillData>,
}

impl FrameContext {
    /// Re-read the page, rebuild on the next scroll pass and re-wire pointer
    /// feedback for the new set of elements.
    pub fn remeasure(&mut self) {
        let scroll = scroll_y(&self.window);
        let vp = viewport(&self.window, &self.document);
        let m = measure(&self.window, &self.document, scroll);
        let jellies = count_prefixed(&self.document, JELLY_PREFIX, MAX_DECORATIONS);
        let nav_icons = count_prefixed(&self.document, NAV_ICON_PREFIX, MAX_DECORATIONS);

        let targets = {
            let mut choreo = self.choreo.borrow_mut();
            choreo.invalidate(vp, m);
            choreo.set_decorations(jellies, nav_icons);
            let is_mobile = vp.is_mobile();
            let mut targets: Vec<Target> = choreo
                .bubbles()
                .iter()
                .enumerate()
                .filter(|(_, b)| b.skill(is_mobile).is_some())
                .map(|(i, _)| Target::Bubble(i))
                .collect();
            targets.extend((0..jellies).map(Target::Jelly));
            targets.extend((0..nav_icons).map(Target::NavIcon));
            targets
        };

        self.stage.forget_elements();
        // Drop the old handlers before attaching new ones.
        self.targets.clear();
        match events::wire_targets(&self.document, &self.choreo, &targets) {
            Ok(set) => self.targets = set,
            Err(e) => log::error!("wire targets error: {:?}", e),
        }
        if let Some(stars) = self.stars.as_mut() {
            stars.resize();
        }
        self.last_scroll = None;
    }

    pub fn frame(&mut self) {
        let now = instant::now();

        let resize_due = self.choreo.borrow_mut().resize_due(now);
        if resize_due {
            self.remeasure();
        } else if self.choreo.borrow().needs_remeasure() {
            let retry = self.choreo.borrow_mut().note_retry();
            match retry {
                Ok(()) => self.remeasure(),
                Err(e) => log::debug!("{e}"),
            }
        }

        let scroll = scroll_y(&self.window);
        {
            let mut choreo = self.choreo.borrow_mut();
            if self.last_scroll != Some(scroll) {
                self.last_scroll = Some(scroll);
                choreo.on_scroll(Frame::new(scroll, now), &mut self.stage);
            }
            choreo.tick(now, &mut self.stage);

            let selected = *choreo.selected_skill();
            if self.shown_skill.map_or(true, |s| s.name != selected.name) {
                ui::show_skill(&self.document, &selected);
                self.shown_skill = Some(selected);
            }
        }

        if let Some(stars) = self.stars.as_mut() {
            if let Some(p) = self.pointer.borrow_mut().take() {
                stars.pointer_moved(p);
            }
            stars.frame(scroll);
        }
    }
}
