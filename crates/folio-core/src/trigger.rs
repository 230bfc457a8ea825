//! Scroll-range triggers and phase chains.
//!
//! A [`ScrollTrigger`] turns a scroll offset into clamped progress plus the
//! boundary events crossed since the previous evaluation. A [`PhaseChain`]
//! lays several triggers end to end from an ordered duration list.

use crate::constants::{FRAME_PATH_EXT, FRAME_PATH_PREFIX};
use smallvec::SmallVec;

/// Document scroll interval `[start, end]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TriggerRange {
    pub start: f32,
    pub end: f32,
}

impl TriggerRange {
    pub fn new(start: f32, end: f32) -> Self {
        Self { start, end }
    }

    /// Range starting at `start` and spanning `duration` scroll pixels.
    pub fn span(start: f32, duration: f32) -> Self {
        Self::new(start, start + duration.max(0.0))
    }

    pub fn len(&self) -> f32 {
        (self.end - self.start).max(0.0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() <= 0.0
    }

    /// Clamped position of `scroll` in the range. An empty range is a step at
    /// `start`.
    pub fn progress(&self, scroll: f32) -> f32 {
        if scroll.is_nan() {
            return 0.0;
        }
        if self.is_empty() {
            return if scroll >= self.start { 1.0 } else { 0.0 };
        }
        ((scroll - self.start) / (self.end - self.start)).clamp(0.0, 1.0)
    }

    pub fn zone(&self, scroll: f32) -> Zone {
        if scroll.is_nan() || scroll < self.start {
            Zone::Before
        } else if scroll < self.end {
            Zone::Inside
        } else {
            Zone::After
        }
    }

    pub fn contains(&self, scroll: f32) -> bool {
        self.zone(scroll) == Zone::Inside
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Zone {
    Before,
    Inside,
    After,
}

/// Boundary crossings, named after the direction of travel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TriggerEvent {
    /// Start crossed scrolling down.
    Enter,
    /// End crossed scrolling down.
    Leave,
    /// End crossed scrolling up.
    EnterBack,
    /// Start crossed scrolling up.
    LeaveBack,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum PhaseState {
    #[default]
    NotEntered,
    Active,
    Completed,
    Reversed,
}

pub type TriggerEvents = SmallVec<[TriggerEvent; 2]>;

/// Result of one trigger evaluation.
#[derive(Clone, Debug, PartialEq)]
pub struct TriggerUpdate {
    pub progress: f32,
    pub zone: Zone,
    pub state: PhaseState,
    pub events: TriggerEvents,
    /// Progress changed, or this is the first evaluation past the start.
    pub fire: bool,
}

impl TriggerUpdate {
    pub fn has(&self, event: TriggerEvent) -> bool {
        self.events.contains(&event)
    }

    /// Something happened that a listener should react to.
    pub fn is_active(&self) -> bool {
        self.fire || !self.events.is_empty()
    }
}

/// Stateful range matcher.
#[derive(Clone, Debug)]
pub struct ScrollTrigger {
    range: TriggerRange,
    last: Option<(Zone, f32)>,
    state: PhaseState,
    enabled: bool,
}

impl ScrollTrigger {
    pub fn new(range: TriggerRange) -> Self {
        Self {
            range,
            last: None,
            state: PhaseState::NotEntered,
            enabled: true,
        }
    }

    pub fn range(&self) -> TriggerRange {
        self.range
    }

    pub fn state(&self) -> PhaseState {
        self.state
    }

    pub fn progress(&self) -> f32 {
        self.last.map(|(_, p)| p).unwrap_or(0.0)
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn enable(&mut self) {
        self.enabled = true;
    }

    pub fn disable(&mut self) {
        self.enabled = false;
    }

    /// Forget the previous evaluation so the next one behaves like the first.
    pub fn reset_history(&mut self) {
        self.last = None;
        self.state = PhaseState::NotEntered;
    }

    /// Evaluate at `scroll`. A disabled trigger reports its progress but
    /// fires nothing and keeps no history.
    pub fn update(&mut self, scroll: f32) -> TriggerUpdate {
        let progress = self.range.progress(scroll);
        let zone = self.range.zone(scroll);
        if !self.enabled {
            return TriggerUpdate {
                progress,
                zone,
                state: self.state,
                events: TriggerEvents::new(),
                fire: false,
            };
        }

        let (prev_zone, fire) = match self.last {
            None => (Zone::Before, zone != Zone::Before),
            Some((z, p)) => (z, p != progress),
        };
        let events = crossings(prev_zone, zone);

        self.state = match zone {
            Zone::Inside => PhaseState::Active,
            Zone::After => PhaseState::Completed,
            Zone::Before if self.state == PhaseState::NotEntered => PhaseState::NotEntered,
            Zone::Before => PhaseState::Reversed,
        };
        self.last = Some((zone, progress));

        TriggerUpdate {
            progress,
            zone,
            state: self.state,
            events,
            fire,
        }
    }
}

fn crossings(from: Zone, to: Zone) -> TriggerEvents {
    use TriggerEvent::*;
    let mut out = TriggerEvents::new();
    match (from, to) {
        (Zone::Before, Zone::Inside) => out.push(Enter),
        (Zone::Before, Zone::After) => {
            out.push(Enter);
            out.push(Leave);
        }
        (Zone::Inside, Zone::After) => out.push(Leave),
        (Zone::After, Zone::Inside) => out.push(EnterBack),
        (Zone::After, Zone::Before) => {
            out.push(EnterBack);
            out.push(LeaveBack);
        }
        (Zone::Inside, Zone::Before) => out.push(LeaveBack),
        _ => {}
    }
    out
}

/// Start offsets of consecutive phases relative to the first, followed by the
/// total length. `[a, b, c]` yields `[0, a, a+b, a+b+c]`.
pub fn cumulative_offsets(durations: &[f32]) -> Vec<f32> {
    let mut out = Vec::with_capacity(durations.len() + 1);
    let mut acc = 0.0;
    out.push(acc);
    for d in durations {
        acc += d.max(0.0);
        out.push(acc);
    }
    out
}

#[derive(Clone, Copy, Debug)]
pub struct PhaseSpec<K> {
    pub kind: K,
    pub duration: f32,
}

impl<K> PhaseSpec<K> {
    pub const fn new(kind: K, duration: f32) -> Self {
        Self { kind, duration }
    }
}

/// Back-to-back triggers sharing one anchor.
#[derive(Clone, Debug)]
pub struct PhaseChain<K> {
    phases: Vec<(K, ScrollTrigger)>,
}

impl<K: Copy + Eq> PhaseChain<K> {
    pub fn new(anchor: f32, specs: &[PhaseSpec<K>]) -> Self {
        let durations: Vec<f32> = specs.iter().map(|s| s.duration).collect();
        let offsets = cumulative_offsets(&durations);
        let phases = specs
            .iter()
            .enumerate()
            .map(|(i, s)| {
                let range = TriggerRange::new(anchor + offsets[i], anchor + offsets[i + 1]);
                (s.kind, ScrollTrigger::new(range))
            })
            .collect();
        Self { phases }
    }

    pub fn len(&self) -> usize {
        self.phases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phases.is_empty()
    }

    pub fn range_of(&self, kind: K) -> Option<TriggerRange> {
        self.phases
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, t)| t.range())
    }

    pub fn state_of(&self, kind: K) -> PhaseState {
        self.phases
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, t)| t.state())
            .unwrap_or_default()
    }

    /// Whole chain as one range.
    pub fn span(&self) -> Option<TriggerRange> {
        let first = self.phases.first()?.1.range();
        let last = self.phases.last()?.1.range();
        Some(TriggerRange::new(first.start, last.end))
    }

    pub fn reset_history(&mut self) {
        for (_, t) in &mut self.phases {
            t.reset_history();
        }
    }

    /// Evaluate every phase. Only phases with something to report are
    /// returned, and the phase owning `scroll` comes last so its writes win.
    pub fn update(&mut self, scroll: f32) -> SmallVec<[(K, TriggerUpdate); 5]> {
        let owner = self.owner_index(scroll);
        let mut out: SmallVec<[(K, TriggerUpdate); 5]> = SmallVec::new();
        let mut owned = None;
        for (i, (kind, trigger)) in self.phases.iter_mut().enumerate() {
            let update = trigger.update(scroll);
            if !update.is_active() {
                continue;
            }
            if Some(i) == owner {
                owned = Some((*kind, update));
            } else {
                out.push((*kind, update));
            }
        }
        out.extend(owned);
        out
    }

    fn owner_index(&self, scroll: f32) -> Option<usize> {
        if self.phases.is_empty() {
            return None;
        }
        if let Some(i) = self.phases.iter().position(|(_, t)| t.range().contains(scroll)) {
            return Some(i);
        }
        let first = self.phases[0].1.range();
        if scroll.is_nan() || scroll < first.start {
            Some(0)
        } else {
            Some(self.phases.len() - 1)
        }
    }
}

/// Image-sequence frame for `progress`, in `[1, total]`.
pub fn frame_for_progress(progress: f32, total: u32) -> u32 {
    let total = total.max(1);
    if !progress.is_finite() {
        return 1;
    }
    let raw = (progress * total as f32).floor() + 1.0;
    raw.clamp(1.0, total as f32) as u32
}

/// Frame for the same sequence played backwards.
pub fn reverse_frame_for_progress(progress: f32, total: u32) -> u32 {
    frame_for_progress(1.0 - progress, total)
}

pub fn frame_source(frame: u32) -> String {
    format!("{FRAME_PATH_PREFIX}{frame:02}{FRAME_PATH_EXT}")
}
