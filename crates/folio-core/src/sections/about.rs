//! About: the blob leaves its spot next to the profile photo, centers itself
//! and plays the morph sequence, then fades out once Skills takes over.

use crate::constants::{
    ABOUT_JELLIES_GAP_Y, ABOUT_PHOTO_GAP_X, ABOUT_PHOTO_GAP_Y, CENTERING_DURATION,
    CENTERING_START_OFFSET_DESKTOP, CENTERING_START_OFFSET_MOBILE_SQUARE,
    CENTERING_START_OFFSET_MOBILE_TALL, MOBILE_TALL_ASPECT, SEQUENCE_DURATION, TOTAL_FRAMES,
};
use crate::error::{ChoreoError, Result};
use crate::geometry::{BlobGeometry, RotationPhase, Size};
use crate::layout::Pose;
use crate::stage::{ElementId, Props, SceneContext, Stage};
use crate::trigger::{
    frame_for_progress, frame_source, PhaseChain, PhaseSpec, ScrollTrigger, TriggerRange, Zone,
};
use crate::viewport::Viewport;
use glam::Vec2;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AboutPhase {
    Centering,
    Morph,
}

/// Scroll distance before the section anchor at which centering begins.
pub fn centering_start_offset(viewport: &Viewport) -> f32 {
    if !viewport.is_mobile() {
        CENTERING_START_OFFSET_DESKTOP
    } else if viewport.aspect_ratio() > MOBILE_TALL_ASPECT {
        CENTERING_START_OFFSET_MOBILE_TALL
    } else {
        CENTERING_START_OFFSET_MOBILE_SQUARE
    }
}

pub struct AboutController {
    chain: PhaseChain<AboutPhase>,
    fade: Option<ScrollTrigger>,
    initial: Pose,
    centered: Pose,
    blob_size: Size,
    frame: u32,
    primed: bool,
}

impl AboutController {
    pub fn build(ctx: &SceneContext) -> Result<Self> {
        let vp = ctx.viewport;
        let m = ctx.measurements;
        let is_mobile = vp.is_mobile();
        let blob_size = ctx.geometry.initial_dimensions(vp);
        let offset = centering_start_offset(vp);

        let (anchor, initial_pos) = if is_mobile {
            let blob_top = m
                .about_blob_top
                .ok_or(ChoreoError::MissingElement(ElementId::AboutBlob))?;
            let jellies = m
                .mobile_jellies
                .ok_or(ChoreoError::MissingSection("about jellies"))?;
            (
                blob_top - vp.height - offset,
                Vec2::new(
                    (vp.width - blob_size.width) / 2.0,
                    jellies.bottom() + ABOUT_JELLIES_GAP_Y,
                ),
            )
        } else {
            let about_top = m.about_top.ok_or(ChoreoError::MissingSection("about"))?;
            let photo = m
                .profile_photo
                .ok_or(ChoreoError::MissingSection("profile photo"))?;
            (
                about_top - offset,
                Vec2::new(
                    photo.right() + ABOUT_PHOTO_GAP_X - blob_size.width,
                    photo.bottom() + ABOUT_PHOTO_GAP_Y,
                ),
            )
        };

        let chain = PhaseChain::new(
            anchor,
            &[
                PhaseSpec::new(AboutPhase::Centering, CENTERING_DURATION),
                PhaseSpec::new(AboutPhase::Morph, SEQUENCE_DURATION),
            ],
        );

        // Hidden once the Skills section top reaches the viewport center.
        let fade = m
            .skills_top
            .map(|top| ScrollTrigger::new(TriggerRange::new(vp.center_line(top), vp.center_line(top))));

        let initial = Pose::at(initial_pos)
            .with_rotation(BlobGeometry::rotation(is_mobile, RotationPhase::Initial));
        let centered = Pose::at(BlobGeometry::centered_origin(vp, blob_size))
            .with_scale(ctx.geometry.scale(vp))
            .with_rotation(BlobGeometry::rotation(is_mobile, RotationPhase::Final));

        log::debug!(
            "[about] anchor={anchor:.1} offset={offset} scale={:.3}",
            centered.scale
        );

        Ok(Self {
            chain,
            fade,
            initial,
            centered,
            blob_size,
            frame: 0,
            primed: false,
        })
    }

    pub fn range_of(&self, phase: AboutPhase) -> Option<TriggerRange> {
        self.chain.range_of(phase)
    }

    pub fn has_fade(&self) -> bool {
        self.fade.is_some()
    }

    pub fn centered_pose(&self) -> Pose {
        self.centered
    }

    pub fn blob_size(&self) -> Size {
        self.blob_size
    }

    pub fn current_frame(&self) -> u32 {
        self.frame
    }

    pub fn update(&mut self, scroll: f32, stage: &mut dyn Stage) {
        if !self.primed {
            self.primed = true;
            stage.apply(ElementId::AboutBlob, transform(&self.initial));
            self.set_frame(1, stage);
            let hidden = self
                .fade
                .as_ref()
                .is_some_and(|f| f.range().zone(scroll) != Zone::Before);
            stage.apply(
                ElementId::AboutBlob,
                Props::new().opacity(if hidden { 0.0 } else { 1.0 }),
            );
        }

        for (phase, update) in self.chain.update(scroll) {
            match phase {
                AboutPhase::Centering => {
                    let pose = self.initial.lerp(&self.centered, update.progress);
                    stage.apply(ElementId::AboutBlob, transform(&pose));
                }
                AboutPhase::Morph => {
                    stage.apply(ElementId::AboutBlob, transform(&self.centered));
                    self.set_frame(frame_for_progress(update.progress, TOTAL_FRAMES), stage);
                }
            }
        }

        if let Some(fade) = self.fade.as_mut() {
            let update = fade.update(scroll);
            if update.is_active() {
                let opacity = if update.zone == Zone::Before { 1.0 } else { 0.0 };
                stage.apply(ElementId::AboutBlob, Props::new().opacity(opacity));
            }
        }
    }

    fn set_frame(&mut self, frame: u32, stage: &mut dyn Stage) {
        if frame != self.frame {
            self.frame = frame;
            stage.set_source(ElementId::AboutBlob, &frame_source(frame));
        }
    }
}

/// Position, scale and rotation only; opacity belongs to the fade.
fn transform(pose: &Pose) -> Props {
    Props::new()
        .pos(pose.pos)
        .scale(pose.scale)
        .rotation(pose.rotation)
}
