//! Owns the shared blob geometry, the section controllers and the signal bus,
//! and drives them from scroll, resize and pointer input.
//!
//! Order of operations on every rebuild: geometry is refreshed from the
//! measurements first, then every controller is rebuilt against it, so no
//! section ever reads a scale computed for a previous viewport.

use crate::bubbles::{Bubble, BubbleLayoutCache, SkillData};
use crate::constants::{MAX_SIGNAL_ROUNDS, RESIZE_DEBOUNCE_MS, SECTION_RETRY_ATTEMPTS};
use crate::error::ChoreoError;
use crate::geometry::BlobGeometry;
use crate::handoff::{BlobSignal, SignalBus};
use crate::interaction::{InteractionEvent, Interactions, SkillSelection, Target};
use crate::nav::{scroll_target, NavSection};
use crate::sections::{AboutController, ContactController, ProjectsController, SkillsController};
use crate::stage::{Frame, Measurements, SceneContext, Stage};
use crate::viewport::Viewport;

/// Trailing-edge debounce: only the last call in a burst fires.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Debouncer {
    delay_ms: f64,
    deadline: Option<f64>,
}

impl Debouncer {
    pub fn new(delay_ms: f64) -> Self {
        Self {
            delay_ms,
            deadline: None,
        }
    }

    /// Restart the wait from `now_ms`.
    pub fn schedule(&mut self, now_ms: f64) {
        self.deadline = Some(now_ms + self.delay_ms);
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// `true` once per burst, when the wait has elapsed.
    pub fn take_due(&mut self, now_ms: f64) -> bool {
        match self.deadline {
            Some(deadline) if now_ms >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

/// Which controllers exist after the last rebuild.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Mounted {
    pub about: bool,
    pub skills: bool,
    pub projects: bool,
    pub contact: bool,
}

impl Mounted {
    pub fn all(&self) -> bool {
        self.about && self.skills && self.projects && self.contact
    }

    fn first_missing(&self) -> Option<&'static str> {
        [
            (self.about, "about"),
            (self.skills, "skills"),
            (self.projects, "projects"),
            (self.contact, "contact"),
        ]
        .into_iter()
        .find(|(ok, _)| !ok)
        .map(|(_, name)| name)
    }
}

pub struct Choreographer {
    viewport: Viewport,
    measurements: Measurements,
    geometry: BlobGeometry,
    layout: BubbleLayoutCache,
    about: Option<AboutController>,
    skills: Option<SkillsController>,
    projects: Option<ProjectsController>,
    contact: Option<ContactController>,
    bus: SignalBus,
    interactions: Interactions,
    selection: SkillSelection,
    resize: Debouncer,
    retries_left: u32,
    jellies: usize,
    nav_icons: usize,
    projects_owns_blob: bool,
    dirty: bool,
}

impl Choreographer {
    pub fn new(viewport: Viewport, measurements: Measurements) -> Self {
        let mut choreo = Self {
            viewport,
            measurements: Measurements::default(),
            geometry: BlobGeometry::new(),
            layout: BubbleLayoutCache::new(),
            about: None,
            skills: None,
            projects: None,
            contact: None,
            bus: SignalBus::new(),
            interactions: Interactions::new(),
            selection: SkillSelection::default(),
            resize: Debouncer::new(RESIZE_DEBOUNCE_MS),
            retries_left: SECTION_RETRY_ATTEMPTS,
            jellies: 0,
            nav_icons: 0,
            projects_owns_blob: false,
            dirty: true,
        };
        choreo.invalidate(viewport, measurements);
        choreo
    }

    /// Number of jelly decorations and navbar icons to register for pointer
    /// feedback.
    pub fn set_decorations(&mut self, jellies: usize, nav_icons: usize) {
        self.jellies = jellies;
        self.nav_icons = nav_icons;
        self.dirty = true;
    }

    /// Take a new viewport and measurement snapshot. Geometry updates here;
    /// controllers rebuild on the next scroll frame.
    pub fn invalidate(&mut self, viewport: Viewport, measurements: Measurements) {
        match measurements.about_blob {
            Some(size) => self
                .geometry
                .set_initial_dimensions(&viewport, size.width, size.height),
            None => self.geometry.reset(),
        }
        self.viewport = viewport;
        self.measurements = measurements;
        self.layout.invalidate();
        self.dirty = true;
        log::debug!(
            "[choreo] invalidate {}x{} mobile={} scale={:.3}",
            viewport.width,
            viewport.height,
            viewport.is_mobile(),
            self.geometry.scale(&viewport)
        );
    }

    /// Record a resize event; see [`Choreographer::resize_due`].
    pub fn on_resize(&mut self, now_ms: f64) {
        self.resize.schedule(now_ms);
    }

    /// `true` once the resize burst has settled and the page should be
    /// re-measured.
    pub fn resize_due(&mut self, now_ms: f64) -> bool {
        self.resize.take_due(now_ms)
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn geometry(&self) -> &BlobGeometry {
        &self.geometry
    }

    pub fn measurements(&self) -> &Measurements {
        &self.measurements
    }

    pub fn about(&self) -> Option<&AboutController> {
        self.about.as_ref()
    }

    pub fn skills(&self) -> Option<&SkillsController> {
        self.skills.as_ref()
    }

    pub fn projects(&self) -> Option<&ProjectsController> {
        self.projects.as_ref()
    }

    pub fn contact(&self) -> Option<&ContactController> {
        self.contact.as_ref()
    }

    pub fn mounted(&self) -> Mounted {
        Mounted {
            about: self.about.is_some(),
            skills: self.skills.is_some(),
            projects: self.projects.is_some(),
            contact: self.contact.is_some(),
        }
    }

    /// Bubbles laid out for the current viewport.
    pub fn bubbles(&mut self) -> &[Bubble] {
        self.layout.get(&self.viewport, &self.geometry)
    }

    pub fn signals_published(&self) -> u64 {
        self.bus.published()
    }

    /// `true` while some section is still missing and retries remain. The
    /// front-end re-measures and calls [`Choreographer::invalidate`] when
    /// this holds.
    pub fn needs_remeasure(&self) -> bool {
        !self.dirty && !self.mounted().all() && self.retries_left > 0
    }

    pub fn retries_left(&self) -> u32 {
        self.retries_left
    }

    /// Spend one retry. Returns the error once the budget is gone.
    pub fn note_retry(&mut self) -> Result<(), ChoreoError> {
        let Some(section) = self.mounted().first_missing() else {
            return Ok(());
        };
        if self.retries_left == 0 {
            return Err(ChoreoError::RetriesExhausted {
                section,
                attempts: SECTION_RETRY_ATTEMPTS,
            });
        }
        self.retries_left -= 1;
        if self.retries_left == 0 {
            log::warn!("[choreo] `{section}` never rendered; continuing without it");
            return Err(ChoreoError::RetriesExhausted {
                section,
                attempts: SECTION_RETRY_ATTEMPTS,
            });
        }
        Ok(())
    }

    fn rebuild(&mut self) {
        self.dirty = false;
        let bubbles = self.layout.get(&self.viewport, &self.geometry).to_vec();
        let ctx = SceneContext {
            viewport: &self.viewport,
            geometry: &self.geometry,
            measurements: &self.measurements,
        };

        self.about = keep("about", AboutController::build(&ctx));
        self.skills = keep("skills", SkillsController::build(&ctx, &bubbles));
        self.projects = keep(
            "projects",
            ProjectsController::build(&ctx, self.projects_owns_blob),
        );
        self.contact = keep("contact", ContactController::build(&ctx));
        self.bus.clear();

        self.interactions.clear();
        let is_mobile = self.viewport.is_mobile();
        for (i, b) in bubbles.iter().enumerate() {
            if b.skill(is_mobile).is_some() {
                self.interactions.register(Target::Bubble(i));
            }
        }
        for i in 0..self.jellies {
            self.interactions.register(Target::Jelly(i));
        }
        for i in 0..self.nav_icons {
            self.interactions.register(Target::NavIcon(i));
        }

        let mounted = self.mounted();
        if mounted.all() {
            self.retries_left = SECTION_RETRY_ATTEMPTS;
        }
        log::info!(
            "[choreo] rebuilt {}x{} mounted={:?}",
            self.viewport.width,
            self.viewport.height,
            mounted
        );
    }

    /// Drive every section from one scroll frame.
    pub fn on_scroll(&mut self, frame: Frame, stage: &mut dyn Stage) {
        if self.dirty {
            self.rebuild();
        }
        let scroll = frame.scroll_y;
        if let Some(about) = self.about.as_mut() {
            about.update(scroll, stage);
        }
        if let Some(skills) = self.skills.as_mut() {
            skills.update(scroll, stage, &mut self.bus);
        }
        self.route_signals(scroll, stage);
        if let Some(projects) = self.projects.as_mut() {
            projects.update(scroll, frame.now_ms, stage, &mut self.bus);
        }
        self.route_signals(scroll, stage);
        if let Some(contact) = self.contact.as_mut() {
            contact.update(scroll, stage);
        }
    }

    fn route_signals(&mut self, scroll: f32, stage: &mut dyn Stage) {
        for _ in 0..MAX_SIGNAL_ROUNDS {
            let signals = self.bus.drain();
            if signals.is_empty() {
                return;
            }
            for signal in signals {
                log::debug!("[choreo] {:?} -> {:?}", signal, signal.recipient());
                match signal {
                    BlobSignal::HandoffFinished(payload) => {
                        self.projects_owns_blob = true;
                        if let Some(projects) = self.projects.as_mut() {
                            projects.on_handoff(&payload, stage);
                        }
                    }
                    BlobSignal::Reset => {
                        self.projects_owns_blob = false;
                        if let Some(projects) = self.projects.as_mut() {
                            projects.on_reset(stage);
                        }
                    }
                    BlobSignal::Takeover => {
                        let accepted = self
                            .projects
                            .as_ref()
                            .map_or(true, |p| p.accepts_takeover(scroll));
                        match self.skills.as_mut() {
                            Some(skills) if accepted => skills.on_takeover(scroll, stage),
                            _ => log::debug!("[choreo] takeover ignored at scroll={scroll:.1}"),
                        }
                    }
                }
            }
        }
        if !self.bus.is_empty() {
            log::warn!("[choreo] signals still queued after {MAX_SIGNAL_ROUNDS} rounds");
            self.bus.clear();
        }
    }

    /// Time-driven animations: pointer feedback and the idle float.
    pub fn tick(&mut self, now_ms: f64, stage: &mut dyn Stage) {
        self.interactions.tick(now_ms, stage);
        if let Some(projects) = self.projects.as_mut() {
            projects.tick(now_ms, stage);
        }
    }

    /// Feed a pointer event. Clicking a skill bubble also selects its skill.
    pub fn interact(&mut self, target: Target, event: InteractionEvent, now_ms: f64) -> bool {
        let handled = self.interactions.handle(target, event, now_ms);
        if handled && event == InteractionEvent::Click {
            if let Target::Bubble(i) = target {
                let is_mobile = self.viewport.is_mobile();
                let bubbles = self.layout.get(&self.viewport, &self.geometry);
                if let Some(bubble) = bubbles.get(i) {
                    self.selection.select(bubble, is_mobile);
                }
            }
        }
        handled
    }

    pub fn is_animating(&self) -> bool {
        self.interactions.is_animating() || self.projects.as_ref().is_some_and(|p| p.is_floating())
    }

    pub fn selected_skill(&self) -> &SkillData {
        self.selection.selected()
    }

    pub fn scroll_target(&self, section: NavSection) -> Option<f32> {
        scroll_target(section, &self.viewport, &self.measurements)
    }
}

fn keep<T>(section: &'static str, built: crate::error::Result<T>) -> Option<T> {
    match built {
        Ok(controller) => Some(controller),
        Err(e) => {
            log::debug!("[choreo] {section} not built: {e}");
            None
        }
    }
}
