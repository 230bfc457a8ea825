// DOM ids and browser-side timing for the folio front-end

// Sections and anchors
pub const NAVBAR_ID: &str = "app-navbar";
pub const ABOUT_ID: &str = "about";
pub const SKILLS_ID: &str = "skills";
pub const PROJECTS_ID: &str = "projects";
pub const CONTACT_ID: &str = "contact";

// Measured layout elements
pub const PROFILE_PHOTO_ID: &str = "profile-photo";
pub const MOBILE_JELLIES_ID: &str = "mobile-jellies";
pub const PROJECT_CARDS_ID: &str = "project-cards";
pub const PROJECTS_TITLE_ID: &str = "projects-title";
pub const CONTACT_CARD_ID: &str = "contact-card";

// Skill info panel
pub const SKILL_NAME_ID: &str = "skill-name";
pub const SKILL_DESCRIPTION_ID: &str = "skill-description";

// Background canvas
pub const STARFIELD_CANVAS_ID: &str = "starfield";

// Decorations registered for pointer feedback (matched by id prefix)
pub const JELLY_PREFIX: &str = "jelly-";
pub const NAV_ICON_PREFIX: &str = "nav-icon-";
pub const MAX_DECORATIONS: usize = 16; // upper bound scanned for jellies and nav icons

// Mount retry fallback delay
pub const MOUNT_RETRY_TIMEOUT_MS: i32 = 100;

pub const STAR_COLOR: &str = "#ffffff";
