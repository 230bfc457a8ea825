use crate::constants::{PROJECTS_NAV_OFFSET, SKILLS_RISE_DURATION};
use crate::stage::Measurements;
use crate::viewport::Viewport;

/// Navbar destinations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavSection {
    About,
    Skills,
    Projects,
    Contact,
}

impl NavSection {
    /// Maps a page anchor id (`"skills"`, ...) to its section.
    pub fn from_anchor(anchor: &str) -> Option<Self> {
        match anchor.trim_start_matches('#') {
            "about" => Some(NavSection::About),
            "skills" => Some(NavSection::Skills),
            "projects" => Some(NavSection::Projects),
            "contact" => Some(NavSection::Contact),
            _ => None,
        }
    }
}

/// Scroll offset the navbar jumps to for `section`, or `None` when the
/// section has not rendered.
///
/// Skills lands on the start of its pinned anchor phase; Projects lands with
/// its section top just under the navbar.
pub fn scroll_target(section: NavSection, viewport: &Viewport, m: &Measurements) -> Option<f32> {
    let target = match section {
        NavSection::About => 0.0,
        NavSection::Skills => {
            let rise = if viewport.is_mobile() {
                SKILLS_RISE_DURATION.1
            } else {
                SKILLS_RISE_DURATION.0
            };
            viewport.center_line(m.skills_top?) + rise
        }
        NavSection::Projects => m.projects_top? - PROJECTS_NAV_OFFSET,
        NavSection::Contact => m.contact_top?,
    };
    Some(target.max(0.0))
}
