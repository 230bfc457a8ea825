//! Pointer micro-animations: hover growth, click pulse and navbar icon
//! feedback, all expressed as time-driven scale tweens.

use crate::bubbles::{Bubble, SkillData, DEFAULT_SKILL};
use crate::constants::{
    HOVER_DURATION_MS, HOVER_SCALE, NAV_HOVER_MS, NAV_HOVER_SCALE, NAV_LEAVE_MS, NAV_PRESS_MS,
    NAV_PRESS_SCALE, NAV_RELEASE_MS, NAV_RELEASE_SCALE, PULSE_BACK_OVERSHOOT, PULSE_PEAK_SCALE,
    PULSE_SETTLE_MS, PULSE_UP_MS,
};
use crate::ease::{lerp, Ease};
use crate::stage::{ElementId, Props, Stage};
use fnv::FnvHashMap;
use smallvec::{smallvec, SmallVec};

/// Something the pointer can interact with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Target {
    /// Skill bubble by catalogue index; animates its image and icon.
    Bubble(usize),
    Jelly(usize),
    NavIcon(usize),
}

impl Target {
    fn elements(&self) -> SmallVec<[ElementId; 2]> {
        match *self {
            Target::Bubble(i) => smallvec![ElementId::BubbleImage(i), ElementId::BubbleIcon(i)],
            Target::Jelly(i) => smallvec![ElementId::Jelly(i)],
            Target::NavIcon(i) => smallvec![ElementId::NavIcon(i)],
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InteractionEvent {
    Enter,
    Leave,
    Focus,
    Blur,
    Click,
    Press,
    Release,
}

/// Single scalar tween.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tween {
    pub from: f32,
    pub to: f32,
    pub start_ms: f64,
    pub duration_ms: f64,
    pub ease: Ease,
}

impl Tween {
    pub fn new(from: f32, to: f32, start_ms: f64, duration_ms: f64, ease: Ease) -> Self {
        Self {
            from,
            to,
            start_ms,
            duration_ms,
            ease,
        }
    }

    fn t(&self, now_ms: f64) -> f32 {
        if self.duration_ms <= 0.0 {
            return 1.0;
        }
        ((now_ms - self.start_ms) / self.duration_ms).clamp(0.0, 1.0) as f32
    }

    pub fn value(&self, now_ms: f64) -> f32 {
        lerp(self.from, self.to, self.ease.apply(self.t(now_ms)))
    }

    pub fn is_done(&self, now_ms: f64) -> bool {
        now_ms >= self.start_ms + self.duration_ms
    }
}

/// Paused hover timeline that plays forward on enter and backward on leave
/// from wherever its playhead is.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HoverTimeline {
    anchor_ms: f64,
    anchor_playhead: f64,
    reversed: bool,
}

impl Default for HoverTimeline {
    /// Parked at the start.
    fn default() -> Self {
        Self {
            anchor_ms: 0.0,
            anchor_playhead: 0.0,
            reversed: true,
        }
    }
}

impl HoverTimeline {
    pub fn playhead(&self, now_ms: f64) -> f64 {
        let dt = (now_ms - self.anchor_ms).max(0.0);
        if self.reversed {
            (self.anchor_playhead - dt).max(0.0)
        } else {
            (self.anchor_playhead + dt).min(HOVER_DURATION_MS)
        }
    }

    pub fn play(&mut self, now_ms: f64) {
        self.seek(now_ms, false);
    }

    pub fn reverse(&mut self, now_ms: f64) {
        self.seek(now_ms, true);
    }

    fn seek(&mut self, now_ms: f64, reversed: bool) {
        self.anchor_playhead = self.playhead(now_ms);
        self.anchor_ms = now_ms;
        self.reversed = reversed;
    }

    pub fn scale(&self, now_ms: f64) -> f32 {
        let t = (self.playhead(now_ms) / HOVER_DURATION_MS) as f32;
        lerp(1.0, HOVER_SCALE, Ease::Power2Out.apply(t))
    }

    pub fn is_settled(&self, now_ms: f64) -> bool {
        let p = self.playhead(now_ms);
        if self.reversed {
            p <= 0.0
        } else {
            p >= HOVER_DURATION_MS
        }
    }
}

/// Click pulse: up to the peak, then settle back to 1 with overshoot.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pulse {
    up: Tween,
    settle: Tween,
}

impl Pulse {
    pub fn start(from: f32, now_ms: f64) -> Self {
        Self {
            up: Tween::new(from, PULSE_PEAK_SCALE, now_ms, PULSE_UP_MS, Ease::Power2Out),
            settle: Tween::new(
                PULSE_PEAK_SCALE,
                1.0,
                now_ms + PULSE_UP_MS,
                PULSE_SETTLE_MS,
                Ease::BackOut(PULSE_BACK_OVERSHOOT),
            ),
        }
    }

    pub fn value(&self, now_ms: f64) -> f32 {
        if now_ms < self.settle.start_ms {
            self.up.value(now_ms)
        } else {
            self.settle.value(now_ms)
        }
    }

    pub fn is_done(&self, now_ms: f64) -> bool {
        self.settle.is_done(now_ms)
    }
}

/// Whichever animation started last owns the scale.
#[derive(Clone, Copy, Debug, PartialEq)]
enum Driver {
    Hover,
    Pulse(Pulse),
    Tween(Tween),
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct ScaleState {
    scale: f32,
    hover: HoverTimeline,
    driver: Option<Driver>,
}

impl Default for ScaleState {
    fn default() -> Self {
        Self {
            scale: 1.0,
            hover: HoverTimeline::default(),
            driver: None,
        }
    }
}

/// Registry of interactive targets and their running animations.
#[derive(Debug, Default)]
pub struct Interactions {
    states: FnvHashMap<Target, ScaleState>,
}

impl Interactions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, target: Target) {
        self.states.entry(target).or_default();
    }

    pub fn is_registered(&self, target: Target) -> bool {
        self.states.contains_key(&target)
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Drop every target; called before re-registering after a rebuild.
    pub fn clear(&mut self) {
        self.states.clear();
    }

    /// Feed a pointer event. Returns `false` for unregistered targets.
    pub fn handle(&mut self, target: Target, event: InteractionEvent, now_ms: f64) -> bool {
        let Some(state) = self.states.get_mut(&target) else {
            return false;
        };
        use InteractionEvent::*;
        match target {
            Target::NavIcon(_) => {
                let (to, duration, ease) = match event {
                    Enter | Focus => (NAV_HOVER_SCALE, NAV_HOVER_MS, Ease::Power2Out),
                    Leave | Blur => (1.0, NAV_LEAVE_MS, Ease::Power2InOut),
                    Press => (NAV_PRESS_SCALE, NAV_PRESS_MS, Ease::Power1Out),
                    Release => (NAV_RELEASE_SCALE, NAV_RELEASE_MS, Ease::Power1Out),
                    Click => return true,
                };
                state.driver = Some(Driver::Tween(Tween::new(
                    state.scale,
                    to,
                    now_ms,
                    duration,
                    ease,
                )));
            }
            Target::Bubble(_) | Target::Jelly(_) => match event {
                Enter | Focus => {
                    state.hover.play(now_ms);
                    state.driver = Some(Driver::Hover);
                }
                Leave | Blur => {
                    state.hover.reverse(now_ms);
                    state.driver = Some(Driver::Hover);
                }
                Click => {
                    state.driver = Some(Driver::Pulse(Pulse::start(state.scale, now_ms)));
                }
                Press | Release => {}
            },
        }
        true
    }

    /// Current scale of a target, `1.0` when unknown.
    pub fn scale_of(&self, target: Target) -> f32 {
        self.states.get(&target).map_or(1.0, |s| s.scale)
    }

    pub fn is_animating(&self) -> bool {
        self.states.values().any(|s| s.driver.is_some())
    }

    /// Advance every running animation and write its scale.
    pub fn tick(&mut self, now_ms: f64, stage: &mut dyn Stage) {
        for (target, state) in self.states.iter_mut() {
            let Some(driver) = state.driver else {
                continue;
            };
            let (scale, done) = match driver {
                Driver::Hover => (state.hover.scale(now_ms), state.hover.is_settled(now_ms)),
                Driver::Pulse(p) => (p.value(now_ms), p.is_done(now_ms)),
                Driver::Tween(t) => (t.value(now_ms), t.is_done(now_ms)),
            };
            state.scale = scale;
            if done {
                state.driver = None;
            }
            for id in target.elements() {
                stage.apply(id, Props::new().scale(scale));
            }
        }
    }
}

/// Skill shown in the info panel. Last click wins.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SkillSelection {
    selected: SkillData,
}

impl Default for SkillSelection {
    fn default() -> Self {
        Self {
            selected: DEFAULT_SKILL,
        }
    }
}

impl SkillSelection {
    pub fn selected(&self) -> &SkillData {
        &self.selected
    }

    /// Select the skill of `bubble` for the orientation; bubbles without one
    /// leave the selection unchanged.
    pub fn select(&mut self, bubble: &Bubble, is_mobile: bool) -> bool {
        match bubble.skill(is_mobile) {
            Some(skill) => {
                self.selected = *skill;
                true
            }
            None => false,
        }
    }
}
