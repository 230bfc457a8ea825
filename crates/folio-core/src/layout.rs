//! Skills section layout and the pose interpolation shared by every phase.

use crate::bubbles::Bubble;
use crate::constants::{
    BUBBLES_AREA_DESKTOP, BUBBLES_AREA_MOBILE_FRACTION, DESKTOP_SLOT_MARGIN, MOBILE_BREAKPOINT,
    MOBILE_SLOT_MARGIN, NAVBAR_MD_BREAKPOINT, TITLE_BUBBLES_SPACING, TITLE_HEIGHT_LG,
    TITLE_HEIGHT_MD, TITLE_HEIGHT_SM, TITLE_HEIGHT_XS, TITLE_LG_BREAKPOINT, TITLE_MARGIN,
};
use crate::ease::lerp;
use crate::viewport::Viewport;
use glam::Vec2;

/// Redistribution targets on desktop, as fractions of the right half.
pub const DESKTOP_SLOTS: [Vec2; 8] = [
    Vec2::new(0.18, 0.2),
    Vec2::new(0.42, 0.08),
    Vec2::new(0.82, 0.18),
    Vec2::new(0.75, 0.4),
    Vec2::new(0.25, 0.45),
    Vec2::new(0.88, 0.74),
    Vec2::new(0.48, 0.62),
    Vec2::new(0.18, 0.75),
];

/// Redistribution targets on mobile, as fractions of the lower half.
pub const MOBILE_SLOTS: [Vec2; 8] = [
    Vec2::new(0.15, 0.12),
    Vec2::new(0.68, 0.08),
    Vec2::new(0.42, 0.28),
    Vec2::new(0.80, 0.35),
    Vec2::new(0.22, 0.52),
    Vec2::new(0.55, 0.58),
    Vec2::new(0.10, 0.78),
    Vec2::new(0.72, 0.75),
];

/// Vertical layout of the Skills title and bubble cluster.
///
/// `title_final_y` is relative to the viewport center, the rest are viewport
/// coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SkillsLayout {
    pub navbar_height: f32,
    pub title_height: f32,
    pub title_margin: f32,
    pub title_final_y: f32,
    pub available_height: f32,
    pub bubbles_area_height: f32,
    pub total_content_height: f32,
    pub vertical_offset: f32,
    pub bubbles_top_y: f32,
}

impl SkillsLayout {
    pub fn compute(viewport: &Viewport) -> Self {
        let navbar_height = viewport.navbar_height();
        let available_height = viewport.available_height();
        let title_height = title_height(viewport.width);
        let title_final_y =
            -viewport.height / 2.0 + navbar_height + TITLE_MARGIN + title_height / 2.0;
        let bubbles_area_height = if viewport.is_mobile() {
            available_height * BUBBLES_AREA_MOBILE_FRACTION
        } else {
            BUBBLES_AREA_DESKTOP
        };
        let total_content_height = title_height + bubbles_area_height + TITLE_BUBBLES_SPACING;
        let vertical_offset = ((available_height - total_content_height) / 2.0).max(0.0);
        let bubbles_top_y =
            navbar_height + TITLE_MARGIN + title_height + TITLE_BUBBLES_SPACING + vertical_offset;

        Self {
            navbar_height,
            title_height,
            title_margin: TITLE_MARGIN,
            title_final_y,
            available_height,
            bubbles_area_height,
            total_content_height,
            vertical_offset,
            bubbles_top_y,
        }
    }

    /// Where the cluster center lands after the rise phase.
    pub fn cluster_target_center_y(&self) -> f32 {
        self.bubbles_top_y + self.bubbles_area_height / 2.0
    }
}

fn title_height(width: f32) -> f32 {
    if width < MOBILE_BREAKPOINT {
        TITLE_HEIGHT_XS
    } else if width < NAVBAR_MD_BREAKPOINT {
        TITLE_HEIGHT_SM
    } else if width < TITLE_LG_BREAKPOINT {
        TITLE_HEIGHT_MD
    } else {
        TITLE_HEIGHT_LG
    }
}

/// Vertical shift that moves the skill bubbles' bounding box center onto the
/// layout's cluster target.
pub fn group_offset(bubbles: &[Bubble], skill_indices: &[usize], layout: &SkillsLayout) -> f32 {
    let mut min_y = f32::INFINITY;
    let mut max_y = f32::NEG_INFINITY;
    for &i in skill_indices {
        if let Some(b) = bubbles.get(i) {
            min_y = min_y.min(b.pos.y);
            max_y = max_y.max(b.pos.y + b.size.y);
        }
    }
    if !min_y.is_finite() || !max_y.is_finite() {
        return 0.0;
    }
    layout.cluster_target_center_y() - (min_y + max_y) / 2.0
}

/// Top-left target of the `skill_index`-th skill bubble after
/// redistribution. Indices beyond the slot table wrap.
pub fn slot_position(
    skill_index: usize,
    bubble_size: Vec2,
    viewport: &Viewport,
    layout: &SkillsLayout,
) -> Vec2 {
    let available = viewport.available_height();
    if viewport.is_mobile() {
        let slot = MOBILE_SLOTS[skill_index % MOBILE_SLOTS.len()];
        let m = MOBILE_SLOT_MARGIN;
        let half = available / 2.0;
        Vec2::new(
            m + slot.x * (viewport.width - m * 2.0 - bubble_size.x),
            layout.navbar_height + half + m + slot.y * (half - m * 2.0 - bubble_size.y),
        )
    } else {
        let slot = DESKTOP_SLOTS[skill_index % DESKTOP_SLOTS.len()];
        let m = DESKTOP_SLOT_MARGIN;
        let half_width = viewport.width / 2.0;
        Vec2::new(
            half_width + m + slot.x * (half_width - m * 2.0),
            layout.navbar_height + m + slot.y * (available - m * 2.0),
        )
    }
}

/// Transform written to one element.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pose {
    pub pos: Vec2,
    pub scale: f32,
    pub rotation: f32,
    pub opacity: f32,
}

impl Default for Pose {
    fn default() -> Self {
        Self {
            pos: Vec2::ZERO,
            scale: 1.0,
            rotation: 0.0,
            opacity: 1.0,
        }
    }
}

impl Pose {
    pub fn at(pos: Vec2) -> Self {
        Self {
            pos,
            ..Self::default()
        }
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_rotation(mut self, rotation: f32) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    pub fn lerp(&self, end: &Pose, t: f32) -> Pose {
        Pose {
            pos: self.pos.lerp(end.pos, t),
            scale: lerp(self.scale, end.scale, t),
            rotation: lerp(self.rotation, end.rotation, t),
            opacity: lerp(self.opacity, end.opacity, t),
        }
    }

    pub fn is_finite(&self) -> bool {
        self.pos.is_finite()
            && self.scale.is_finite()
            && self.rotation.is_finite()
            && self.opacity.is_finite()
    }
}

/// Element-wise interpolation of two pose lists at `progress` (clamped).
/// Extra entries in the longer list are ignored.
pub fn interpolate(start: &[Pose], end: &[Pose], progress: f32) -> Vec<Pose> {
    let t = if progress.is_nan() {
        0.0
    } else {
        progress.clamp(0.0, 1.0)
    };
    start.iter().zip(end).map(|(a, b)| a.lerp(b, t)).collect()
}
