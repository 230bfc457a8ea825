//! Viewport snapshot and the layout queries every controller derives from it.
//!
//! A [`Viewport`] is built fresh from the window each time the front-end needs
//! one; nothing here caches between calls.

use crate::constants::{
    MOBILE_BREAKPOINT, NAVBAR_INNER_MD, NAVBAR_INNER_SM, NAVBAR_INNER_XS, NAVBAR_MD_BREAKPOINT,
    NAVBAR_PADDING_Y,
};
use glam::Vec2;

/// Window metrics at the moment of the query.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    /// Height of the rendered navigation bar, when it is in the document.
    pub measured_navbar: Option<f32>,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            measured_navbar: None,
        }
    }

    pub fn with_navbar(mut self, height: f32) -> Self {
        self.measured_navbar = (height.is_finite() && height > 0.0).then_some(height);
        self
    }

    #[inline]
    pub fn is_mobile(&self) -> bool {
        self.width < MOBILE_BREAKPOINT
    }

    pub fn navbar_height(&self) -> f32 {
        self.measured_navbar
            .unwrap_or_else(|| fallback_navbar_height(self.width))
    }

    #[inline]
    pub fn available_height(&self) -> f32 {
        self.height - self.navbar_height()
    }

    /// Vertical center of the visible area below the navbar.
    #[inline]
    pub fn adjusted_center_y(&self) -> f32 {
        self.navbar_height() + self.available_height() / 2.0
    }

    #[inline]
    pub fn center_x(&self) -> f32 {
        self.width / 2.0
    }

    /// Anchor for every "centered" placement.
    #[inline]
    pub fn adjusted_center(&self) -> Vec2 {
        Vec2::new(self.center_x(), self.adjusted_center_y())
    }

    /// Height over width; `0.0` for a degenerate window.
    pub fn aspect_ratio(&self) -> f32 {
        if self.width > 0.0 {
            self.height / self.width
        } else {
            0.0
        }
    }

    /// Scroll offset at which a document-space `y` sits at the viewport
    /// center.
    #[inline]
    pub fn center_line(&self, document_y: f32) -> f32 {
        document_y - self.height / 2.0
    }
}

/// Navbar height derived from the breakpoint rules when the bar is absent.
pub fn fallback_navbar_height(width: f32) -> f32 {
    let inner = if width >= NAVBAR_MD_BREAKPOINT {
        NAVBAR_INNER_MD
    } else if width >= MOBILE_BREAKPOINT {
        NAVBAR_INNER_SM
    } else {
        NAVBAR_INNER_XS
    };
    inner + NAVBAR_PADDING_Y * 2.0
}
