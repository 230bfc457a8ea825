//! Projects: owns the blob after the Skills handoff and carries it on to the
//! Contact section.
//!
//! Three ranges drive the blob: the Skills monitor (Skills section on
//! screen), the projects transition (section top from viewport bottom to
//! center) and the contact leg (contact top at viewport bottom to contact
//! bottom at center).

use crate::constants::{
    CONTACT_DESKTOP_BREAKPOINT, CONTACT_FALLBACK_X_FRACTION, CONTACT_MOBILE_HIDE_PROGRESS,
    CONTACT_SCALE_DESKTOP, CONTACT_SCALE_MOBILE, FLOAT_START_PROGRESS, PROJECTS_CONTENT_END_OFFSET,
    PROJECTS_CONTENT_START_Y, PROJECTS_MOBILE_BREAKPOINT, PROJECTS_SCALE_DESKTOP,
    PROJECTS_SCALE_MOBILE, PROJECTS_SCALE_WIDE, PROJECTS_TITLE_OFFSET, PROJECTS_WIDE_BREAKPOINT,
    TITLE_MARGIN,
};
use crate::ease::{lerp, Ease};
use crate::error::{ChoreoError, Result};
use crate::float::IdleFloat;
use crate::geometry::{BlobGeometry, RotationPhase, Size};
use crate::handoff::{BlobHandoff, BlobSignal, SignalBus};
use crate::layout::Pose;
use crate::stage::{ElementId, Measurements, Props, SceneContext, Stage};
use crate::trigger::{ScrollTrigger, TriggerEvent, TriggerRange, Zone};
use crate::viewport::Viewport;
use glam::Vec2;

/// Where the blob should sit, by center and scale.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BlobTarget {
    pub center: Vec2,
    pub scale: f32,
}

impl BlobTarget {
    fn pose(&self, size: Size, rotation: f32) -> Pose {
        Pose::at(self.center - size.half())
            .with_scale(self.scale)
            .with_rotation(rotation)
    }
}

/// Blob as Skills leaves it.
pub fn skills_target(vp: &Viewport, geometry: &BlobGeometry) -> BlobTarget {
    BlobTarget {
        center: vp.adjusted_center(),
        scale: geometry.scale(vp),
    }
}

/// Resting place while the project cards are on screen.
pub fn projects_target(vp: &Viewport, geometry: &BlobGeometry, m: &Measurements) -> BlobTarget {
    let base = geometry.scale(vp);
    let factor = if m.project_cards.is_none() || vp.width >= PROJECTS_WIDE_BREAKPOINT {
        PROJECTS_SCALE_WIDE
    } else if vp.width < PROJECTS_MOBILE_BREAKPOINT {
        PROJECTS_SCALE_MOBILE
    } else {
        PROJECTS_SCALE_DESKTOP
    };
    BlobTarget {
        center: vp.adjusted_center(),
        scale: base * factor,
    }
}

/// Resting place for the contact leg: beside the card on desktop, over it on
/// narrow screens.
pub fn contact_target(vp: &Viewport, geometry: &BlobGeometry, m: &Measurements) -> BlobTarget {
    let base = geometry.scale(vp);
    if vp.width >= CONTACT_DESKTOP_BREAKPOINT {
        let x = m
            .contact_card
            .map(|card| (card.right() + vp.width) / 2.0)
            .unwrap_or(vp.width * CONTACT_FALLBACK_X_FRACTION);
        BlobTarget {
            center: Vec2::new(x, vp.height / 2.0),
            scale: base * CONTACT_SCALE_DESKTOP,
        }
    } else {
        // Card center on screen once the contact leg has run its course.
        let y = m
            .contact_card
            .zip(m.contact_bottom)
            .map(|(card, bottom)| card.center().y - vp.center_line(bottom))
            .unwrap_or_else(|| vp.adjusted_center_y())
            .clamp(vp.navbar_height(), vp.height.max(vp.navbar_height()));
        BlobTarget {
            center: Vec2::new(vp.center_x(), y),
            scale: base * CONTACT_SCALE_MOBILE,
        }
    }
}

pub struct ProjectsController {
    transition: ScrollTrigger,
    contact: Option<ScrollTrigger>,
    monitor: Option<ScrollTrigger>,
    content: ScrollTrigger,
    content_end_y: f32,
    blob_size: Size,
    rotation: f32,
    start: BlobTarget,
    projects: BlobTarget,
    contact_target: BlobTarget,
    /// Narrow screens hand the blob to the Contact section's own element.
    hides_for_contact: bool,
    enabled: bool,
    float: Option<IdleFloat>,
    primed: bool,
}

impl ProjectsController {
    /// `enabled` carries whether Projects currently owns the blob across a
    /// rebuild.
    pub fn build(ctx: &SceneContext, enabled: bool) -> Result<Self> {
        let vp = ctx.viewport;
        let m = ctx.measurements;
        let projects_top = m
            .projects_top
            .ok_or(ChoreoError::MissingSection("projects"))?;

        let mut transition = ScrollTrigger::new(TriggerRange::new(
            projects_top - vp.height,
            vp.center_line(projects_top),
        ));
        if !enabled {
            transition.disable();
        }

        let contact = match (m.contact_top, m.contact_bottom) {
            (Some(top), Some(bottom)) => Some(ScrollTrigger::new(TriggerRange::new(
                top - vp.height,
                vp.center_line(bottom),
            ))),
            _ => None,
        };
        let monitor = match (m.skills_top, m.skills_bottom) {
            (Some(top), Some(bottom)) => Some(ScrollTrigger::new(TriggerRange::new(
                vp.center_line(top),
                vp.center_line(bottom),
            ))),
            _ => None,
        };

        let content = ScrollTrigger::new(TriggerRange::new(
            projects_top - vp.height,
            projects_top - PROJECTS_CONTENT_END_OFFSET,
        ));
        let title_offset = PROJECTS_TITLE_OFFSET + m.projects_title_margin.unwrap_or(0.0);
        let content_end_y = vp.navbar_height() + TITLE_MARGIN - title_offset;

        let blob_size = m
            .projects_blob
            .filter(Size::is_valid)
            .unwrap_or_else(|| BlobGeometry::expected_dimensions(vp));

        Ok(Self {
            transition,
            contact,
            monitor,
            content,
            content_end_y,
            blob_size,
            rotation: BlobGeometry::rotation(vp.is_mobile(), RotationPhase::Final),
            start: skills_target(vp, ctx.geometry),
            projects: projects_target(vp, ctx.geometry, m),
            contact_target: contact_target(vp, ctx.geometry, m),
            hides_for_contact: vp.width < CONTACT_DESKTOP_BREAKPOINT,
            enabled,
            float: None,
            primed: false,
        })
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn is_floating(&self) -> bool {
        self.float.is_some()
    }

    pub fn has_contact_leg(&self) -> bool {
        self.contact.is_some()
    }

    pub fn has_monitor(&self) -> bool {
        self.monitor.is_some()
    }

    pub fn projects_target(&self) -> BlobTarget {
        self.projects
    }

    pub fn transition_range(&self) -> TriggerRange {
        self.transition.range()
    }

    /// Skills may reclaim the blob only while the scroll is still over
    /// Skills or short of the projects transition.
    pub fn accepts_takeover(&self, scroll: f32) -> bool {
        let start = self.transition.range().start;
        let limit = self
            .monitor
            .as_ref()
            .map_or(start, |m| m.range().end.max(start));
        scroll < limit
    }

    pub fn contact_range(&self) -> Option<TriggerRange> {
        self.contact.as_ref().map(ScrollTrigger::range)
    }

    pub fn update(&mut self, scroll: f32, now_ms: f64, stage: &mut dyn Stage, bus: &mut SignalBus) {
        if !self.primed {
            self.primed = true;
            let pose = self.start.pose(self.blob_size, self.rotation);
            let mut props = Props::pose(&pose).size(self.blob_size.as_vec2());
            if !self.enabled {
                props = props.opacity(0.0);
            }
            stage.apply(ElementId::ProjectsBlob, props);
            stage.apply(
                ElementId::ProjectsContent,
                Props::new().y(PROJECTS_CONTENT_START_Y).opacity(0.0),
            );
        }

        let content = self.content.update(scroll);
        if content.fire {
            let e = Ease::Power1Out.apply(content.progress);
            stage.apply(
                ElementId::ProjectsContent,
                Props::new()
                    .y(lerp(PROJECTS_CONTENT_START_Y, self.content_end_y, e))
                    .opacity(e),
            );
        }

        if let Some(monitor) = self.monitor.as_mut() {
            let update = monitor.update(scroll);
            // A fresh trigger reports Enter for a jump straight past Skills.
            let entered = update.has(TriggerEvent::Enter) || update.has(TriggerEvent::EnterBack);
            if entered && update.zone == Zone::Inside {
                self.stop_float(stage);
                stage.apply(ElementId::ProjectsBlob, Props::new().opacity(0.0));
                bus.publish(BlobSignal::Takeover);
            }
        }

        self.update_transition(scroll, stage, bus);
        self.update_contact(scroll, now_ms, stage);
    }

    fn update_transition(&mut self, scroll: f32, stage: &mut dyn Stage, bus: &mut SignalBus) {
        let update = self.transition.update(scroll);
        if !self.enabled {
            return;
        }
        if update.fire {
            let start = self.start.pose(self.blob_size, self.rotation);
            let end = self.projects.pose(self.blob_size, self.rotation);
            let pose = start.lerp(&end, update.progress);
            self.write_blob(&pose, stage);
        }
        for event in &update.events {
            match event {
                TriggerEvent::Enter | TriggerEvent::EnterBack => {
                    stage.apply(ElementId::ProjectsBlob, Props::new().opacity(1.0));
                }
                TriggerEvent::Leave => {
                    let pose = self.projects.pose(self.blob_size, self.rotation);
                    self.write_blob(&pose, stage);
                }
                TriggerEvent::LeaveBack => {
                    self.stop_float(stage);
                    stage.apply(ElementId::ProjectsBlob, Props::new().opacity(0.0));
                    bus.publish(BlobSignal::Takeover);
                }
            }
        }
    }

    fn update_contact(&mut self, scroll: f32, now_ms: f64, stage: &mut dyn Stage) {
        let Some(contact) = self.contact.as_mut() else {
            return;
        };
        let update = contact.update(scroll);
        if !self.enabled {
            return;
        }
        let projects = self.projects.pose(self.blob_size, self.rotation);

        if update.fire {
            let eased = Ease::Power2InOut.apply(update.progress);
            let settled = self.contact_target.pose(self.blob_size, self.rotation);
            if self.hides_for_contact {
                self.stop_float(stage);
                let pose = if update.progress >= CONTACT_MOBILE_HIDE_PROGRESS {
                    projects.with_opacity(0.0)
                } else {
                    projects.lerp(&settled, eased)
                };
                self.write_blob(&pose, stage);
            } else if eased > FLOAT_START_PROGRESS {
                // The float bobs around the scroll pose and keeps tracking it.
                let pose = projects.lerp(&settled, eased);
                let float = self.float.get_or_insert_with(|| {
                    log::debug!("[projects] idle float started at y={:.1}", pose.pos.y);
                    IdleFloat::start(pose.pos.y, now_ms)
                });
                float.base_y = pose.pos.y;
                let y = float.y(now_ms);
                stage.apply(ElementId::ProjectsBlob, Props::pose(&pose).y(y));
            } else {
                self.stop_float(stage);
                self.write_blob(&projects.lerp(&settled, eased), stage);
            }
        }

        if update.has(TriggerEvent::LeaveBack) {
            self.stop_float(stage);
            self.write_blob(&projects, stage);
        }
    }

    /// Advance the idle float between scroll frames.
    pub fn tick(&mut self, now_ms: f64, stage: &mut dyn Stage) {
        if let Some(float) = &self.float {
            stage.apply(ElementId::ProjectsBlob, Props::new().y(float.y(now_ms)));
        }
    }

    /// Skills finished: take the blob over at the payload's pose.
    pub fn on_handoff(&mut self, payload: &BlobHandoff, stage: &mut dyn Stage) {
        self.stop_float(stage);
        self.enabled = true;
        if payload.is_finite() {
            self.start = BlobTarget {
                center: payload.center(),
                scale: payload.scale,
            };
            self.rotation = payload.rotation;
        }
        let pose = self.start.pose(self.blob_size, self.rotation);
        self.write_blob(&pose, stage);
        self.transition.enable();
        self.transition.reset_history();
        if let Some(contact) = self.contact.as_mut() {
            contact.reset_history();
        }
    }

    /// Skills took the blob back.
    pub fn on_reset(&mut self, stage: &mut dyn Stage) {
        self.stop_float(stage);
        self.enabled = false;
        self.transition.disable();
        stage.apply(ElementId::ProjectsBlob, Props::new().opacity(0.0));
    }

    fn write_blob(&self, pose: &Pose, stage: &mut dyn Stage) {
        stage.apply(ElementId::ProjectsBlob, Props::pose(pose));
    }

    fn stop_float(&mut self, stage: &mut dyn Stage) {
        if let Some(float) = self.float.take() {
            stage.apply(ElementId::ProjectsBlob, Props::new().y(float.base_y));
        }
    }
}
