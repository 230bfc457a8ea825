//! Static bubble catalogue and the reference-image to viewport mapping.
//!
//! Bubble coordinates are authored in the 1536x1024 reference image. On
//! mobile the blob is rotated 90°, so every bubble is rotated about the blob
//! center as well.

use crate::constants::{REFERENCE_HEIGHT, REFERENCE_WIDTH};
use crate::geometry::BlobGeometry;
use crate::viewport::Viewport;
use glam::Vec2;
use smallvec::SmallVec;

/// Skill shown inside a bubble and in the info panel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SkillData {
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    /// Offset of the icon from the bubble center, in reference pixels.
    pub icon_offset: Vec2,
    pub icon_scale: f32,
}

impl SkillData {
    const fn new(
        name: &'static str,
        description: &'static str,
        icon: &'static str,
        icon_scale: f32,
    ) -> Self {
        Self {
            name,
            description,
            icon,
            icon_offset: Vec2::ZERO,
            icon_scale,
        }
    }
}

pub const ANGULAR: SkillData = SkillData::new(
    "Angular",
    "Dynamic web applications built from reusable components, with services, routing and efficient data binding.",
    "assets/skills/icons/angular.webp",
    1.3,
);
pub const REACT: SkillData = SkillData::new(
    "React",
    "Interactive user interfaces with function components, hook-based state and attention to render performance.",
    "assets/skills/icons/react.webp",
    1.25,
);
pub const THREE_JS: SkillData = SkillData::new(
    "Three.js",
    "Interactive 3D experiences in the browser: animation, lighting and scene rendering.",
    "assets/skills/icons/threejs.webp",
    1.3,
);
pub const DOTNET: SkillData = SkillData::new(
    ".NET",
    "Robust business applications: RESTful APIs, layered architecture and Entity Framework for data access.",
    "assets/skills/icons/dotnet.webp",
    1.3,
);
pub const DOCKER: SkillData = SkillData::new(
    "Docker",
    "Containerised applications for consistent environments, composed services and production deployment.",
    "assets/skills/icons/docker.webp",
    1.3,
);
pub const FIREBASE: SkillData = SkillData::new(
    "Firebase",
    "Web and mobile app platform: authentication, realtime database and cloud hosting.",
    "assets/skills/icons/firebase.webp",
    1.3,
);
pub const SQL_SERVER: SkillData = SkillData::new(
    "SQL Server",
    "Relational database design and administration, query tuning, stored procedures and transactions.",
    "assets/skills/icons/sqlserver.webp",
    1.4,
);
pub const GIT: SkillData = SkillData::new(
    "Git",
    "Version control and team collaboration: branching, merging and conflict resolution.",
    "assets/skills/icons/git.webp",
    1.3,
);

/// Selected before any click.
pub const DEFAULT_SKILL: SkillData = ANGULAR;

/// Immutable bubble description.
#[derive(Clone, Copy, Debug)]
pub struct BubbleSpec {
    pub id: &'static str,
    pub original_size: Vec2,
    pub original_pos: Vec2,
    pub skill_desktop: Option<SkillData>,
    pub skill_mobile: Option<SkillData>,
}

const fn spec(
    id: &'static str,
    size: (f32, f32),
    pos: (f32, f32),
    skill_desktop: Option<SkillData>,
    skill_mobile: Option<SkillData>,
) -> BubbleSpec {
    BubbleSpec {
        id,
        original_size: Vec2::new(size.0, size.1),
        original_pos: Vec2::new(pos.0, pos.1),
        skill_desktop,
        skill_mobile,
    }
}

pub const BUBBLES: [BubbleSpec; 13] = [
    spec("1_1", (210.0, 194.0), (218.0, 198.0), Some(ANGULAR), Some(THREE_JS)),
    spec("1_2", (187.0, 210.0), (550.0, 190.0), Some(REACT), Some(FIREBASE)),
    spec("1_3", (203.0, 151.0), (860.0, 187.0), Some(THREE_JS), None),
    spec("1_4", (205.0, 205.0), (1135.0, 187.0), Some(DOTNET), None),
    spec("2_1", (171.0, 125.0), (170.0, 447.0), Some(DOCKER), Some(REACT)),
    spec("2_2", (158.0, 196.0), (547.0, 440.0), Some(FIREBASE), Some(DOCKER)),
    spec("2_3", (154.0, 216.0), (870.0, 400.0), Some(SQL_SERVER), Some(GIT)),
    spec("2_4", (153.0, 122.0), (1202.0, 447.0), Some(GIT), None),
    spec("3_1", (172.0, 202.0), (206.0, 640.0), None, Some(ANGULAR)),
    spec("3_2", (167.0, 148.0), (424.0, 672.0), None, Some(DOTNET)),
    spec("3_3", (208.0, 201.0), (690.0, 650.0), None, Some(SQL_SERVER)),
    spec("3_4", (187.0, 157.0), (948.0, 668.0), None, None),
    spec("3_5", (170.0, 210.0), (1195.0, 637.0), None, None),
];

impl BubbleSpec {
    pub fn src(&self) -> String {
        format!("assets/skills/bubbles/{}.webp", self.id)
    }

    pub fn skill(&self, is_mobile: bool) -> Option<&SkillData> {
        if is_mobile {
            self.skill_mobile.as_ref()
        } else {
            self.skill_desktop.as_ref()
        }
    }
}

/// A bubble placed in viewport pixels. `pos` is the top-left corner.
#[derive(Clone, Copy, Debug)]
pub struct Bubble {
    pub spec: &'static BubbleSpec,
    pub pos: Vec2,
    pub size: Vec2,
}

impl Bubble {
    pub fn skill(&self, is_mobile: bool) -> Option<&SkillData> {
        self.spec.skill(is_mobile)
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }
}

/// Catalogue with runtime fields zeroed.
pub fn default_bubbles() -> Vec<Bubble> {
    BUBBLES
        .iter()
        .map(|spec| Bubble {
            spec,
            pos: Vec2::ZERO,
            size: Vec2::ZERO,
        })
        .collect()
}

/// Rotate `p` by `degrees` about the origin, snapping quarter turns so that
/// 90° is exactly `(x, y) -> (-y, x)`.
pub fn rotate_coordinates(p: Vec2, degrees: f32) -> Vec2 {
    let quarter = degrees.rem_euclid(360.0) / 90.0;
    if (quarter - quarter.round()).abs() < 1e-6 {
        return match quarter.round() as i32 % 4 {
            0 => p,
            1 => Vec2::new(-p.y, p.x),
            2 => -p,
            _ => Vec2::new(p.y, -p.x),
        };
    }
    Vec2::from_angle(degrees.to_radians()).rotate(p)
}

/// Overwrite every bubble's size and position for `viewport`.
///
/// Desktop positions are anchored on the blob's top-left corner; mobile
/// positions are rotated about the blob center and anchored on the bubble
/// center.
pub fn compute_positions(bubbles: &mut [Bubble], viewport: &Viewport, geometry: &BlobGeometry) {
    let is_mobile = viewport.is_mobile();
    let scale = geometry.bubble_scale(viewport, is_mobile);
    let final_width = geometry.final_width(viewport, is_mobile);
    let center = viewport.adjusted_center();
    let blob_origin = Vec2::new(
        center.x - final_width / 2.0,
        center.y - REFERENCE_HEIGHT * scale / 2.0,
    );
    let reference_half = Vec2::new(REFERENCE_WIDTH, REFERENCE_HEIGHT) / 2.0;

    for bubble in bubbles.iter_mut() {
        let spec = bubble.spec;
        bubble.size = (spec.original_size * scale).max(Vec2::ONE);
        bubble.pos = if is_mobile {
            let relative = spec.original_pos + spec.original_size / 2.0 - reference_half;
            let rotated = rotate_coordinates(relative, 90.0) * scale;
            center + rotated - bubble.size / 2.0
        } else {
            blob_origin + spec.original_pos * scale
        };
    }
}

/// Indices of bubbles carrying a skill for the orientation, in catalogue
/// order.
pub fn skill_indices(bubbles: &[Bubble], is_mobile: bool) -> SmallVec<[usize; 8]> {
    bubbles
        .iter()
        .enumerate()
        .filter(|(_, b)| b.skill(is_mobile).is_some())
        .map(|(i, _)| i)
        .collect()
}

/// Position of bubble `index` among the skill bubbles.
pub fn skill_index_of(bubbles: &[Bubble], index: usize, is_mobile: bool) -> Option<usize> {
    bubbles.get(index)?.skill(is_mobile)?;
    Some(
        bubbles[..index]
            .iter()
            .filter(|b| b.skill(is_mobile).is_some())
            .count(),
    )
}

/// Bubble layout memoized on the viewport and geometry generation it was
/// computed for.
#[derive(Clone, Debug, Default)]
pub struct BubbleLayoutCache {
    key: Option<(Viewport, u64)>,
    bubbles: Vec<Bubble>,
    computations: u64,
}

impl BubbleLayoutCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&mut self, viewport: &Viewport, geometry: &BlobGeometry) -> &[Bubble] {
        let key = (*viewport, geometry.generation());
        if self.key != Some(key) {
            if self.bubbles.is_empty() {
                self.bubbles = default_bubbles();
            }
            compute_positions(&mut self.bubbles, viewport, geometry);
            self.key = Some(key);
            self.computations += 1;
        }
        &self.bubbles
    }

    pub fn invalidate(&mut self) {
        self.key = None;
    }

    /// Number of full recomputations so far.
    pub fn computations(&self) -> u64 {
        self.computations
    }
}
