//! The boundary between controllers and the page.
//!
//! Controllers never touch the DOM; they write [`Props`] to a [`Stage`]
//! keyed by [`ElementId`]. Reads go the other way through [`Measurements`],
//! a snapshot the front-end takes before a rebuild.

use crate::geometry::{BlobGeometry, Size};
use crate::layout::Pose;
use crate::viewport::Viewport;
use fnv::FnvHashMap;
use glam::Vec2;

/// Every element the choreography animates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ElementId {
    AboutBlob,
    /// About "jelly" decorations, by position.
    Jelly(usize),
    SkillsTitle,
    /// Positioned wrapper of bubble `i` (catalogue index).
    BubbleContainer(usize),
    BubbleImage(usize),
    BubbleIcon(usize),
    SkillInfo,
    SkillsBlob,
    ProjectsContent,
    ProjectsBlob,
    ContactForm,
    ContactBlob,
    NavIcon(usize),
}

/// Partial set of style properties; `None` leaves the current value.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Props {
    pub x: Option<f32>,
    pub y: Option<f32>,
    pub scale: Option<f32>,
    pub rotation: Option<f32>,
    pub opacity: Option<f32>,
    pub width: Option<f32>,
    pub height: Option<f32>,
}

impl Props {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pos(self, p: Vec2) -> Self {
        self.x(p.x).y(p.y)
    }

    pub fn x(mut self, v: f32) -> Self {
        self.x = Some(v);
        self
    }

    pub fn y(mut self, v: f32) -> Self {
        self.y = Some(v);
        self
    }

    pub fn scale(mut self, v: f32) -> Self {
        self.scale = Some(v);
        self
    }

    pub fn rotation(mut self, v: f32) -> Self {
        self.rotation = Some(v);
        self
    }

    pub fn opacity(mut self, v: f32) -> Self {
        self.opacity = Some(v);
        self
    }

    pub fn size(mut self, s: Vec2) -> Self {
        self.width = Some(s.x);
        self.height = Some(s.y);
        self
    }

    /// All four transform components of `pose`.
    pub fn pose(pose: &Pose) -> Self {
        Self::new()
            .pos(pose.pos)
            .scale(pose.scale)
            .rotation(pose.rotation)
            .opacity(pose.opacity)
    }

    /// Overlay `other` on top of `self`.
    pub fn merge(&mut self, other: &Props) {
        macro_rules! take {
            ($($f:ident),*) => {
                $(if other.$f.is_some() { self.$f = other.$f; })*
            };
        }
        take!(x, y, scale, rotation, opacity, width, height);
    }

    pub fn is_finite(&self) -> bool {
        [
            self.x,
            self.y,
            self.scale,
            self.rotation,
            self.opacity,
            self.width,
            self.height,
        ]
        .iter()
        .flatten()
        .all(|v| v.is_finite())
    }
}

/// Write side of the page.
///
/// Writes to elements the page does not have are silently dropped; the
/// controllers call [`Stage::has`] only when they need to know.
pub trait Stage {
    fn has(&self, id: ElementId) -> bool;
    fn apply(&mut self, id: ElementId, props: Props);
    /// Swap an image element's source.
    fn set_source(&mut self, id: ElementId, src: &str);
}

/// In-memory stage recording the accumulated state of every element.
#[derive(Clone, Debug, Default)]
pub struct RecordingStage {
    pub props: FnvHashMap<ElementId, Props>,
    pub sources: FnvHashMap<ElementId, String>,
    /// When set, only these elements exist.
    pub present: Option<Vec<ElementId>>,
    pub writes: usize,
}

impl RecordingStage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stage that only knows the listed elements.
    pub fn with_elements(ids: impl IntoIterator<Item = ElementId>) -> Self {
        Self {
            present: Some(ids.into_iter().collect()),
            ..Self::default()
        }
    }

    pub fn get(&self, id: ElementId) -> Props {
        self.props.get(&id).copied().unwrap_or_default()
    }

    pub fn opacity(&self, id: ElementId) -> Option<f32> {
        self.props.get(&id).and_then(|p| p.opacity)
    }

    pub fn source(&self, id: ElementId) -> Option<&str> {
        self.sources.get(&id).map(String::as_str)
    }

    pub fn all_finite(&self) -> bool {
        self.props.values().all(Props::is_finite)
    }
}

impl Stage for RecordingStage {
    fn has(&self, id: ElementId) -> bool {
        self.present.as_ref().map_or(true, |p| p.contains(&id))
    }

    fn apply(&mut self, id: ElementId, props: Props) {
        if !self.has(id) {
            return;
        }
        self.writes += 1;
        self.props.entry(id).or_default().merge(&props);
    }

    fn set_source(&mut self, id: ElementId, src: &str) {
        if !self.has(id) {
            return;
        }
        self.sources.insert(id, src.to_string());
    }
}

/// Axis-aligned box in document coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.left + self.width / 2.0, self.top + self.height / 2.0)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

/// Layout snapshot read from the page. Every field is optional; controllers
/// fall back when something has not rendered yet.
///
/// Rects are in document space (scroll already added).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Measurements {
    pub scroll_y: f32,
    pub about_top: Option<f32>,
    /// Untransformed layout size of the About blob.
    pub about_blob: Option<Size>,
    pub about_blob_top: Option<f32>,
    pub profile_photo: Option<Rect>,
    pub mobile_jellies: Option<Rect>,
    pub skills_top: Option<f32>,
    pub skills_bottom: Option<f32>,
    pub skills_blob: Option<Size>,
    pub projects_top: Option<f32>,
    pub projects_blob: Option<Size>,
    pub project_cards: Option<Rect>,
    pub projects_title_margin: Option<f32>,
    pub contact_top: Option<f32>,
    pub contact_bottom: Option<f32>,
    pub contact_card: Option<Rect>,
    pub contact_blob: Option<Size>,
}

/// Read-only inputs shared by every controller during a rebuild.
#[derive(Clone, Copy, Debug)]
pub struct SceneContext<'a> {
    pub viewport: &'a Viewport,
    pub geometry: &'a BlobGeometry,
    pub measurements: &'a Measurements,
}

impl<'a> SceneContext<'a> {
    pub fn is_mobile(&self) -> bool {
        self.viewport.is_mobile()
    }
}

/// Per-frame input.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Frame {
    pub scroll_y: f32,
    pub now_ms: f64,
}

impl Frame {
    pub fn new(scroll_y: f32, now_ms: f64) -> Self {
        Self { scroll_y, now_ms }
    }
}
