//! Blob geometry: the one place that decides how big the blob is.
//!
//! Every controller receives a `&BlobGeometry` and asks it for scale, final
//! width and rotation; no controller computes its own scale.

use crate::constants::{
    BLOB_MARGIN, DESKTOP_BLOB_MAX_WIDTH, DESKTOP_BLOB_WIDTH_FRACTION, DESKTOP_FINAL_ROTATION,
    DESKTOP_INITIAL_ROTATION, FALLBACK_BLOB_SCALE, MIN_AVAILABLE_EXTENT, MIN_VIEWPORT_WIDTH,
    MOBILE_BLOB_MAX_WIDTH, MOBILE_BLOB_WIDTH_FRACTION, MOBILE_FINAL_ROTATION,
    MOBILE_INITIAL_ROTATION, MOBILE_BREAKPOINT, REFERENCE_HEIGHT, REFERENCE_WIDTH,
};
use crate::error::ChoreoError;
use crate::viewport::Viewport;
use glam::Vec2;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Both sides finite and strictly positive.
    pub fn is_valid(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    #[inline]
    pub fn as_vec2(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    #[inline]
    pub fn half(&self) -> Vec2 {
        self.as_vec2() / 2.0
    }
}

/// Which end of the centering animation a rotation belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RotationPhase {
    Initial,
    Final,
}

/// Shared blob sizing state.
///
/// `generation` increments on every write so derived layouts can tell when
/// they are stale.
#[derive(Clone, Debug, Default)]
pub struct BlobGeometry {
    initial: Option<Size>,
    generation: u64,
}

impl BlobGeometry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the rendered blob size. Non-positive sides fall back to the
    /// CSS-derived size for `viewport`.
    pub fn set_initial_dimensions(&mut self, viewport: &Viewport, width: f32, height: f32) {
        let measured = Size::new(width, height);
        if measured.is_valid() {
            log::debug!("[geometry] initial dimensions {width:.1}x{height:.1}");
            self.initial = Some(measured);
        } else {
            let expected = Self::expected_dimensions(viewport);
            let err = if width.is_finite() && width > 0.0 {
                ChoreoError::InvalidMeasurement { what: "blob height", value: height }
            } else {
                ChoreoError::InvalidMeasurement { what: "blob width", value: width }
            };
            log::warn!(
                "[geometry] {err}, using {:.1}x{:.1}",
                expected.width,
                expected.height
            );
            self.initial = Some(expected);
        }
        self.generation += 1;
    }

    /// Forget any measurement; subsequent reads use the CSS-derived size.
    pub fn reset(&mut self) {
        if self.initial.take().is_some() {
            self.generation += 1;
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn has_measurement(&self) -> bool {
        self.initial.is_some()
    }

    /// Measured size, or the CSS-derived size when nothing usable was stored.
    pub fn initial_dimensions(&self, viewport: &Viewport) -> Size {
        match self.initial {
            Some(size) if size.is_valid() => size,
            _ => Self::expected_dimensions(viewport),
        }
    }

    /// Size the blob would render at from the stylesheet rules alone.
    pub fn expected_dimensions(viewport: &Viewport) -> Size {
        let vw = viewport.width.max(MIN_VIEWPORT_WIDTH);
        let width = if vw < MOBILE_BREAKPOINT {
            (vw * MOBILE_BLOB_WIDTH_FRACTION).min(MOBILE_BLOB_MAX_WIDTH)
        } else {
            (vw * DESKTOP_BLOB_WIDTH_FRACTION).min(DESKTOP_BLOB_MAX_WIDTH)
        };
        Size::new(width, width / (REFERENCE_WIDTH / REFERENCE_HEIGHT))
    }

    /// Largest scale that fits the blob's visual box in the area below the
    /// navbar with [`BLOB_MARGIN`] on every side.
    pub fn scale(&self, viewport: &Viewport) -> f32 {
        self.scale_for(viewport, viewport.is_mobile())
    }

    /// [`Self::scale`] with the orientation chosen explicitly.
    pub fn scale_for(&self, viewport: &Viewport, is_mobile: bool) -> f32 {
        let initial = self.initial_dimensions(viewport);
        let available_width = (viewport.width - BLOB_MARGIN * 2.0).max(MIN_AVAILABLE_EXTENT);
        let available_height = (viewport.height - viewport.navbar_height() - BLOB_MARGIN * 2.0)
            .max(MIN_AVAILABLE_EXTENT);

        // Rotated 90° on mobile, so the visual box is transposed.
        let visual = if is_mobile {
            Size::new(initial.height, initial.width)
        } else {
            initial
        };
        if !visual.is_valid() {
            return FALLBACK_BLOB_SCALE;
        }

        let scale = (available_width / visual.width).min(available_height / visual.height);
        if scale.is_finite() && scale > 0.0 {
            scale
        } else {
            FALLBACK_BLOB_SCALE
        }
    }

    /// Horizontal on-screen extent of the centered blob.
    pub fn final_width(&self, viewport: &Viewport, is_mobile: bool) -> f32 {
        let initial = self.initial_dimensions(viewport);
        let side = if is_mobile {
            initial.height
        } else {
            initial.width
        };
        side * self.scale_for(viewport, is_mobile)
    }

    /// Factor mapping reference-image pixels onto the centered blob.
    pub fn bubble_scale(&self, viewport: &Viewport, is_mobile: bool) -> f32 {
        let reference = if is_mobile {
            REFERENCE_HEIGHT
        } else {
            REFERENCE_WIDTH
        };
        let scale = self.final_width(viewport, is_mobile) / reference;
        if scale.is_finite() && scale > 0.0 {
            scale
        } else {
            log::warn!("[geometry] invalid bubble scale {scale}, using 1.0");
            1.0
        }
    }

    pub fn rotation(is_mobile: bool, phase: RotationPhase) -> f32 {
        match (is_mobile, phase) {
            (true, RotationPhase::Initial) => MOBILE_INITIAL_ROTATION,
            (true, RotationPhase::Final) => MOBILE_FINAL_ROTATION,
            (false, RotationPhase::Initial) => DESKTOP_INITIAL_ROTATION,
            (false, RotationPhase::Final) => DESKTOP_FINAL_ROTATION,
        }
    }

    /// Top-left translation that centers an element of `size` on the
    /// adjusted viewport center.
    pub fn centered_origin(viewport: &Viewport, size: Size) -> Vec2 {
        viewport.adjusted_center() - size.half()
    }
}
