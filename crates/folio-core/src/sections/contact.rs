use crate::constants::{CONTACT_DESKTOP_BREAKPOINT, CONTACT_FORM_START_Y, CONTACT_MOBILE_BLOB_SCALE};
use crate::ease::Ease;
use crate::error::{ChoreoError, Result};
use crate::geometry::{BlobGeometry, RotationPhase, Size};
use crate::layout::Pose;
use crate::stage::{ElementId, Props, SceneContext, Stage};
use crate::trigger::{ScrollTrigger, TriggerEvent, TriggerRange};

/// Contact form reveal, plus the section's own blob on narrow screens.
pub struct ContactController {
    trigger: ScrollTrigger,
    mobile_blob: Option<Pose>,
    primed: bool,
}

impl ContactController {
    pub fn build(ctx: &SceneContext) -> Result<Self> {
        let vp = ctx.viewport;
        let m = ctx.measurements;
        let top = m.contact_top.ok_or(ChoreoError::MissingSection("contact"))?;
        let bottom = m.contact_bottom.unwrap_or(top + vp.height);

        let mobile_blob = (vp.width < CONTACT_DESKTOP_BREAKPOINT).then(|| {
            let size = m
                .contact_blob
                .filter(Size::is_valid)
                .unwrap_or_else(|| BlobGeometry::expected_dimensions(vp));
            Pose::at(BlobGeometry::centered_origin(vp, size))
                .with_scale(ctx.geometry.scale(vp) * CONTACT_MOBILE_BLOB_SCALE)
                .with_rotation(BlobGeometry::rotation(true, RotationPhase::Final))
                .with_opacity(0.0)
        });

        Ok(Self {
            trigger: ScrollTrigger::new(TriggerRange::new(
                top - vp.height,
                vp.center_line(bottom),
            )),
            mobile_blob,
            primed: false,
        })
    }

    pub fn range(&self) -> TriggerRange {
        self.trigger.range()
    }

    pub fn has_mobile_blob(&self) -> bool {
        self.mobile_blob.is_some()
    }

    pub fn update(&mut self, scroll: f32, stage: &mut dyn Stage) {
        if !self.primed {
            self.primed = true;
            stage.apply(
                ElementId::ContactForm,
                Props::new().y(CONTACT_FORM_START_Y).opacity(0.0),
            );
            if let Some(pose) = &self.mobile_blob {
                stage.apply(ElementId::ContactBlob, Props::pose(pose));
            }
        }

        let update = self.trigger.update(scroll);
        if update.fire {
            let e = Ease::Power2Out.apply(update.progress);
            stage.apply(
                ElementId::ContactForm,
                Props::new()
                    .y(CONTACT_FORM_START_Y * (1.0 - e))
                    .opacity(e),
            );
        }

        if self.mobile_blob.is_some() {
            for event in &update.events {
                let opacity = match event {
                    TriggerEvent::Enter | TriggerEvent::EnterBack => 1.0,
                    TriggerEvent::Leave | TriggerEvent::LeaveBack => 0.0,
                };
                stage.apply(ElementId::ContactBlob, Props::new().opacity(opacity));
            }
        }
    }
}
