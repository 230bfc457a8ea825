//! Skills: five chained phases driven from the section top reaching the
//! viewport center.
//!
//! 1. Rise: title climbs under the navbar, skill bubbles recenter as a group,
//!    icons fade in staggered, bubbles without a skill sink and fade.
//! 2. Anchor: everything pinned; skill-less bubbles hide instantly.
//! 3. Redistribute: title exits, skill bubbles spread to preset slots, the
//!    info panel fades in.
//! 4. Recollect: the reverse of 3, ending in the original blob arrangement.
//! 5. Reverse morph: bubbles hide and a second blob plays the morph sequence
//!    backwards, then hands the blob to Projects.

use crate::bubbles::{skill_index_of, Bubble, BubbleSpec};
use crate::constants::{
    ICON_SIZE_FRACTION, ICON_STAGGER, NON_SKILL_DROP_VIEWPORTS, NON_SKILL_FADE_RATE,
    SKILLS_ANCHOR_DURATION, SKILLS_RECOLLECT_DURATION, SKILLS_REDISTRIBUTE_DURATION,
    SKILLS_REVERSE_MORPH_DURATION, SKILLS_RISE_DURATION, SKILL_INFO_FADE_IN_START,
    SKILL_INFO_FADE_OUT_END, TITLE_EXIT_EXTRA, TITLE_FADE_RATE, TOTAL_FRAMES,
};
use crate::error::{ChoreoError, Result};
use crate::geometry::{BlobGeometry, RotationPhase, Size};
use crate::handoff::{BlobHandoff, BlobSignal, SignalBus};
use crate::layout::{group_offset, interpolate, slot_position, Pose, SkillsLayout};
use crate::stage::{ElementId, Props, SceneContext, Stage};
use crate::trigger::{
    frame_source, reverse_frame_for_progress, PhaseChain, PhaseSpec, PhaseState, ScrollTrigger,
    TriggerEvent, TriggerRange, TriggerUpdate, Zone,
};
use crate::viewport::Viewport;
use glam::Vec2;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SkillsPhase {
    Rise,
    Anchor,
    Redistribute,
    Recollect,
    ReverseMorph,
}

#[inline]
fn pick((desktop, mobile): (f32, f32), is_mobile: bool) -> f32 {
    if is_mobile {
        mobile
    } else {
        desktop
    }
}

/// Phase list for the orientation, in scroll order.
pub fn phase_specs(is_mobile: bool) -> [PhaseSpec<SkillsPhase>; 5] {
    [
        PhaseSpec::new(SkillsPhase::Rise, pick(SKILLS_RISE_DURATION, is_mobile)),
        PhaseSpec::new(SkillsPhase::Anchor, pick(SKILLS_ANCHOR_DURATION, is_mobile)),
        PhaseSpec::new(
            SkillsPhase::Redistribute,
            pick(SKILLS_REDISTRIBUTE_DURATION, is_mobile),
        ),
        PhaseSpec::new(
            SkillsPhase::Recollect,
            pick(SKILLS_RECOLLECT_DURATION, is_mobile),
        ),
        PhaseSpec::new(
            SkillsPhase::ReverseMorph,
            pick(SKILLS_REVERSE_MORPH_DURATION, is_mobile),
        ),
    ]
}

/// Start and end poses of one interpolated phase.
#[derive(Clone, Debug, Default)]
struct Track {
    start: Vec<Pose>,
    end: Vec<Pose>,
}

impl Track {
    fn at(&self, progress: f32) -> Vec<Pose> {
        interpolate(&self.start, &self.end, progress)
    }
}

/// Precomputed per-bubble placement for one layout.
#[derive(Clone, Copy, Debug)]
struct BubblePlan {
    spec: &'static BubbleSpec,
    skill_index: Option<usize>,
    size: Vec2,
    base: Vec2,
    clustered: Vec2,
    dropped: Vec2,
    slot: Vec2,
    icon_size: f32,
    icon_offset: Vec2,
}

pub struct SkillsController {
    chain: PhaseChain<SkillsPhase>,
    visibility: ScrollTrigger,
    bubbles: Vec<BubblePlan>,
    rise: Track,
    anchor: Vec<Pose>,
    redistribute: Track,
    recollect: Track,
    title_rise: Track,
    title_exit: Track,
    blob: Pose,
    payload: BlobHandoff,
    is_mobile: bool,
    frame: u32,
    handed_off: bool,
    reclaimed_at: Option<f32>,
    primed: bool,
}

impl SkillsController {
    /// `bubbles` must already be laid out for `ctx.viewport`.
    pub fn build(ctx: &SceneContext, bubbles: &[Bubble]) -> Result<Self> {
        let vp = ctx.viewport;
        let skills_top = ctx
            .measurements
            .skills_top
            .ok_or(ChoreoError::MissingSection("skills"))?;
        let is_mobile = vp.is_mobile();
        let layout = SkillsLayout::compute(vp);
        let anchor = vp.center_line(skills_top);

        let plan = plan_bubbles(bubbles, vp, ctx.geometry, &layout);
        let (rise, anchor_poses, redistribute, recollect) = bubble_tracks(&plan);

        let title_start = Vec2::new(0.0, vp.height / 2.0);
        let title_final = Vec2::new(0.0, layout.title_final_y);
        let title_gone = Vec2::new(
            0.0,
            layout.title_final_y - (layout.title_height + TITLE_EXIT_EXTRA),
        );
        let title_rise = Track {
            start: vec![Pose::at(title_start).with_opacity(0.0)],
            end: vec![Pose::at(title_final).with_opacity(TITLE_FADE_RATE)],
        };
        let title_exit = Track {
            start: vec![Pose::at(title_final)],
            end: vec![Pose::at(title_gone)],
        };

        let blob_size = ctx
            .measurements
            .skills_blob
            .filter(Size::is_valid)
            .unwrap_or_else(|| ctx.geometry.initial_dimensions(vp));
        let scale = ctx.geometry.scale(vp);
        let rotation = BlobGeometry::rotation(is_mobile, RotationPhase::Final);
        let blob = Pose::at(BlobGeometry::centered_origin(vp, blob_size))
            .with_scale(scale)
            .with_rotation(rotation);
        let center = vp.adjusted_center();
        let payload = BlobHandoff {
            center_x: center.x,
            center_y: center.y,
            width: blob_size.width,
            height: blob_size.height,
            scale,
            rotation,
        };

        log::debug!(
            "[skills] anchor={anchor:.1} mobile={is_mobile} bubbles={} title_final_y={:.1}",
            plan.len(),
            layout.title_final_y
        );

        Ok(Self {
            chain: PhaseChain::new(anchor, &phase_specs(is_mobile)),
            visibility: ScrollTrigger::new(TriggerRange::new(anchor, anchor)),
            bubbles: plan,
            rise,
            anchor: anchor_poses,
            redistribute,
            recollect,
            title_rise,
            title_exit,
            blob,
            payload,
            is_mobile,
            frame: 0,
            handed_off: false,
            reclaimed_at: None,
            primed: false,
        })
    }

    pub fn range_of(&self, phase: SkillsPhase) -> Option<TriggerRange> {
        self.chain.range_of(phase)
    }

    pub fn state_of(&self, phase: SkillsPhase) -> PhaseState {
        self.chain.state_of(phase)
    }

    pub fn payload(&self) -> BlobHandoff {
        self.payload
    }

    pub fn blob_pose(&self) -> Pose {
        self.blob
    }

    pub fn current_frame(&self) -> u32 {
        self.frame
    }

    pub fn update(&mut self, scroll: f32, stage: &mut dyn Stage, bus: &mut SignalBus) {
        if !self.primed {
            self.primed = true;
            self.place(scroll, stage);
        }

        let vis = self.visibility.update(scroll);
        if vis.has(TriggerEvent::Enter) || vis.has(TriggerEvent::EnterBack) {
            self.set_visible(true, stage);
        }
        if vis.has(TriggerEvent::LeaveBack) {
            self.set_visible(false, stage);
        }

        for (phase, update) in self.chain.update(scroll) {
            match phase {
                SkillsPhase::Rise => self.rise(&update, stage),
                SkillsPhase::Anchor => self.anchor(stage),
                SkillsPhase::Redistribute => self.redistribute(&update, stage),
                SkillsPhase::Recollect => self.recollect(&update, stage),
                SkillsPhase::ReverseMorph => self.reverse_morph(&update, stage, bus),
            }
        }

        if let Some(at) = self.reclaimed_at {
            if self.chain.state_of(SkillsPhase::ReverseMorph) != PhaseState::Completed {
                self.reclaimed_at = None;
            } else if scroll > at {
                // Moving forward again past the morph: give the blob back.
                self.reclaimed_at = None;
                self.hand_off(stage, bus);
            }
        }
    }

    /// Projects released the blob. Only meaningful once the reverse morph has
    /// completed; the Skills blob then shows the final frame in place.
    pub fn on_takeover(&mut self, scroll: f32, stage: &mut dyn Stage) {
        if self.chain.state_of(SkillsPhase::ReverseMorph) != PhaseState::Completed {
            return;
        }
        log::debug!("[skills] takeover at scroll={scroll:.1}");
        self.handed_off = false;
        self.reclaimed_at = Some(scroll);
        stage.apply(ElementId::SkillsBlob, Props::pose(&self.blob));
        self.set_frame(1, stage);
    }

    /// Initial placement of every element for the current layout.
    fn place(&mut self, scroll: f32, stage: &mut dyn Stage) {
        let past_start = self.visibility.range().zone(scroll) != Zone::Before;
        let image_rotation = BlobGeometry::rotation(self.is_mobile, RotationPhase::Final);
        let icon_rotation = if self.is_mobile { 0.0 } else { image_rotation };
        let visible = if past_start { 1.0 } else { 0.0 };

        for (i, b) in self.bubbles.iter().enumerate() {
            stage.set_source(ElementId::BubbleImage(i), &b.spec.src());
            if let Some(skill) = b.spec.skill(self.is_mobile) {
                stage.set_source(ElementId::BubbleIcon(i), skill.icon);
            }
            stage.apply(
                ElementId::BubbleContainer(i),
                Props::new().pos(b.base).size(b.size).opacity(1.0),
            );
            stage.apply(
                ElementId::BubbleImage(i),
                Props::new().rotation(image_rotation).opacity(visible),
            );
            if b.skill_index.is_some() {
                let icon = Props::new()
                    .pos(b.icon_offset)
                    .size(Vec2::splat(b.icon_size))
                    .rotation(icon_rotation);
                let icon = if past_start { icon } else { icon.opacity(0.0) };
                stage.apply(ElementId::BubbleIcon(i), icon);
            }
        }
        stage.apply(
            ElementId::SkillsTitle,
            Props::new().y(self.title_rise.start[0].pos.y).opacity(visible),
        );
        stage.apply(ElementId::SkillInfo, Props::new().opacity(0.0));
        stage.apply(ElementId::SkillsBlob, Props::pose(&self.blob).opacity(0.0));
    }

    fn set_visible(&self, visible: bool, stage: &mut dyn Stage) {
        let opacity = if visible { 1.0 } else { 0.0 };
        stage.apply(ElementId::SkillsTitle, Props::new().opacity(opacity));
        for (i, b) in self.bubbles.iter().enumerate() {
            stage.apply(ElementId::BubbleImage(i), Props::new().opacity(opacity));
            if !visible && b.skill_index.is_some() {
                stage.apply(ElementId::BubbleIcon(i), Props::new().opacity(0.0));
            }
        }
    }

    fn rise(&self, update: &TriggerUpdate, stage: &mut dyn Stage) {
        let p = update.progress;
        write_title(&self.title_rise.at(p), stage);
        write_containers(&self.rise.at(p), stage);
        for (i, b) in self.bubbles.iter().enumerate() {
            if let Some(k) = b.skill_index {
                let delay = k as f32 * ICON_STAGGER;
                let icon = ((p - delay) / (1.0 - delay)).clamp(0.0, 1.0);
                stage.apply(ElementId::BubbleIcon(i), Props::new().opacity(icon));
            }
        }
        stage.apply(ElementId::SkillInfo, Props::new().opacity(0.0));
    }

    fn anchor(&self, stage: &mut dyn Stage) {
        write_title(&self.title_exit.start, stage);
        write_containers(&self.anchor, stage);
        self.write_icons(1.0, stage);
        stage.apply(ElementId::SkillInfo, Props::new().opacity(0.0));
    }

    fn redistribute(&self, update: &TriggerUpdate, stage: &mut dyn Stage) {
        let p = update.progress;
        write_title(&self.title_exit.at(p), stage);
        write_containers(&self.redistribute.at(p), stage);
        self.write_icons(1.0, stage);
        let info = ((p - SKILL_INFO_FADE_IN_START) / (1.0 - SKILL_INFO_FADE_IN_START)).max(0.0);
        stage.apply(ElementId::SkillInfo, Props::new().opacity(info.min(1.0)));
    }

    fn recollect(&self, update: &TriggerUpdate, stage: &mut dyn Stage) {
        let p = update.progress;
        write_title(&self.title_exit.end, stage);
        write_containers(&self.recollect.at(p), stage);
        self.write_icons(1.0 - p, stage);
        let info = 1.0 - (p / SKILL_INFO_FADE_OUT_END).clamp(0.0, 1.0);
        stage.apply(ElementId::SkillInfo, Props::new().opacity(info));
    }

    fn reverse_morph(&mut self, update: &TriggerUpdate, stage: &mut dyn Stage, bus: &mut SignalBus) {
        for i in 0..self.bubbles.len() {
            stage.apply(ElementId::BubbleContainer(i), Props::new().opacity(0.0));
        }
        stage.apply(ElementId::SkillInfo, Props::new().opacity(0.0));
        stage.apply(ElementId::SkillsBlob, Props::pose(&self.blob));
        self.set_frame(reverse_frame_for_progress(update.progress, TOTAL_FRAMES), stage);

        for event in &update.events {
            match event {
                TriggerEvent::Leave => self.hand_off(stage, bus),
                TriggerEvent::EnterBack => {
                    self.handed_off = false;
                    self.reclaimed_at = None;
                    bus.publish(BlobSignal::Reset);
                    stage.apply(ElementId::SkillsBlob, Props::new().opacity(1.0));
                }
                TriggerEvent::LeaveBack => {
                    stage.apply(ElementId::SkillsBlob, Props::new().opacity(0.0));
                    write_containers(&self.recollect.end, stage);
                }
                TriggerEvent::Enter => {}
            }
        }
    }

    fn hand_off(&mut self, stage: &mut dyn Stage, bus: &mut SignalBus) {
        stage.apply(ElementId::SkillsBlob, Props::new().opacity(0.0));
        if self.handed_off {
            return;
        }
        self.handed_off = true;
        log::debug!("[skills] handing blob off: {:?}", self.payload);
        bus.publish(BlobSignal::HandoffFinished(self.payload));
    }

    fn write_icons(&self, opacity: f32, stage: &mut dyn Stage) {
        for (i, b) in self.bubbles.iter().enumerate() {
            if b.skill_index.is_some() {
                stage.apply(ElementId::BubbleIcon(i), Props::new().opacity(opacity));
            }
        }
    }

    fn set_frame(&mut self, frame: u32, stage: &mut dyn Stage) {
        if frame != self.frame {
            self.frame = frame;
            stage.set_source(ElementId::SkillsBlob, &frame_source(frame));
        }
    }
}

fn plan_bubbles(
    bubbles: &[Bubble],
    vp: &Viewport,
    geometry: &BlobGeometry,
    layout: &SkillsLayout,
) -> Vec<BubblePlan> {
    let is_mobile = vp.is_mobile();
    let skill_indices = crate::bubbles::skill_indices(bubbles, is_mobile);
    let offset = group_offset(bubbles, &skill_indices, layout);
    let bubble_scale = geometry.bubble_scale(vp, is_mobile);

    bubbles
        .iter()
        .enumerate()
        .map(|(i, b)| {
            let skill_index = skill_index_of(bubbles, i, is_mobile);
            let skill = b.skill(is_mobile);
            BubblePlan {
                spec: b.spec,
                skill_index,
                size: b.size,
                base: b.pos,
                clustered: b.pos + Vec2::new(0.0, offset),
                dropped: b.pos + Vec2::new(0.0, vp.height * NON_SKILL_DROP_VIEWPORTS),
                slot: skill_index
                    .map(|k| slot_position(k, b.size, vp, layout))
                    .unwrap_or(b.pos),
                icon_size: skill
                    .map(|s| b.size.x * ICON_SIZE_FRACTION * s.icon_scale)
                    .unwrap_or(0.0),
                icon_offset: skill
                    .map(|s| s.icon_offset * bubble_scale)
                    .unwrap_or(Vec2::ZERO),
            }
        })
        .collect()
}

fn bubble_tracks(plan: &[BubblePlan]) -> (Track, Vec<Pose>, Track, Track) {
    let mut rise = Track::default();
    let mut anchor = Vec::with_capacity(plan.len());
    let mut redistribute = Track::default();
    let mut recollect = Track::default();

    for b in plan {
        let base = Pose::at(b.base);
        if b.skill_index.is_some() {
            let clustered = Pose::at(b.clustered);
            let slot = Pose::at(b.slot);
            rise.start.push(base);
            rise.end.push(clustered);
            anchor.push(clustered);
            redistribute.start.push(clustered);
            redistribute.end.push(slot);
            recollect.start.push(slot);
            recollect.end.push(base);
        } else {
            let dropped = Pose::at(b.dropped);
            let hidden = dropped.with_opacity(0.0);
            rise.start.push(base);
            // Overshoots below zero so the fade completes early; clamped on write.
            rise.end.push(dropped.with_opacity(1.0 - NON_SKILL_FADE_RATE));
            anchor.push(hidden);
            redistribute.start.push(hidden);
            redistribute.end.push(hidden);
            recollect.start.push(hidden);
            recollect.end.push(base);
        }
    }
    (rise, anchor, redistribute, recollect)
}

fn write_containers(poses: &[Pose], stage: &mut dyn Stage) {
    for (i, pose) in poses.iter().enumerate() {
        stage.apply(
            ElementId::BubbleContainer(i),
            Props::new()
                .pos(pose.pos)
                .opacity(pose.opacity.clamp(0.0, 1.0)),
        );
    }
}

fn write_title(poses: &[Pose], stage: &mut dyn Stage) {
    if let Some(pose) = poses.first() {
        stage.apply(
            ElementId::SkillsTitle,
            Props::new()
                .y(pose.pos.y)
                .opacity(pose.opacity.clamp(0.0, 1.0)),
        );
    }
}
