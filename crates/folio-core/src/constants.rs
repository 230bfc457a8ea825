// Shared layout and choreography tuning constants.
//
// All lengths are CSS pixels, durations are scroll pixels unless suffixed
// with `_MS` or `_SEC`.

// Breakpoints
pub const MOBILE_BREAKPOINT: f32 = 640.0; // below this the blob is rotated 90°
pub const NAVBAR_MD_BREAKPOINT: f32 = 768.0;
pub const TITLE_LG_BREAKPOINT: f32 = 1024.0;
pub const PROJECTS_MOBILE_BREAKPOINT: f32 = 768.0;
pub const PROJECTS_WIDE_BREAKPOINT: f32 = 1280.0;
pub const CONTACT_DESKTOP_BREAKPOINT: f32 = 1024.0;

// Navbar fallback (inner height per breakpoint + vertical padding on both sides)
pub const NAVBAR_INNER_MD: f32 = 76.0;
pub const NAVBAR_INNER_SM: f32 = 72.0;
pub const NAVBAR_INNER_XS: f32 = 68.0;
pub const NAVBAR_PADDING_Y: f32 = 12.0;

// Reference image the blob and every bubble offset is authored in
pub const REFERENCE_WIDTH: f32 = 1536.0;
pub const REFERENCE_HEIGHT: f32 = 1024.0;

// Blob sizing
pub const BLOB_MARGIN: f32 = 10.0;
pub const FALLBACK_BLOB_SCALE: f32 = 1.4;
pub const MIN_AVAILABLE_EXTENT: f32 = 100.0;
pub const MIN_VIEWPORT_WIDTH: f32 = 320.0;
pub const MOBILE_BLOB_WIDTH_FRACTION: f32 = 0.85;
pub const MOBILE_BLOB_MAX_WIDTH: f32 = 900.0;
pub const DESKTOP_BLOB_WIDTH_FRACTION: f32 = 0.65;
pub const DESKTOP_BLOB_MAX_WIDTH: f32 = 700.0;

// Blob rotation in degrees
pub const DESKTOP_INITIAL_ROTATION: f32 = 0.0;
pub const DESKTOP_FINAL_ROTATION: f32 = 0.0;
pub const MOBILE_INITIAL_ROTATION: f32 = 90.0 + 30.0;
pub const MOBILE_FINAL_ROTATION: f32 = 90.0;

// About: centering
pub const CENTERING_START_OFFSET_DESKTOP: f32 = 100.0;
pub const CENTERING_START_OFFSET_MOBILE_SQUARE: f32 = 80.0;
pub const CENTERING_START_OFFSET_MOBILE_TALL: f32 = 0.0;
pub const MOBILE_TALL_ASPECT: f32 = 1.8; // height / width above which a phone counts as "tall"
pub const CENTERING_DURATION: f32 = 800.0;
pub const ABOUT_PHOTO_GAP_X: f32 = 50.0;
pub const ABOUT_PHOTO_GAP_Y: f32 = 20.0;
pub const ABOUT_JELLIES_GAP_Y: f32 = 40.0;

// About: image sequence
pub const TOTAL_FRAMES: u32 = 25;
pub const PIXELS_PER_FRAME: f32 = 50.0;
pub const SEQUENCE_DURATION: f32 = TOTAL_FRAMES as f32 * PIXELS_PER_FRAME;
pub const FRAME_PATH_PREFIX: &str = "assets/3d_shape/";
pub const FRAME_PATH_EXT: &str = ".webp";

// Skills: phase durations (desktop, mobile)
pub const SKILLS_RISE_DURATION: (f32, f32) = (700.0, 500.0);
pub const SKILLS_ANCHOR_DURATION: (f32, f32) = (200.0, 200.0);
pub const SKILLS_REDISTRIBUTE_DURATION: (f32, f32) = (1000.0, 800.0);
pub const SKILLS_RECOLLECT_DURATION: (f32, f32) = (1000.0, 800.0);
pub const SKILLS_REVERSE_MORPH_DURATION: (f32, f32) = (SEQUENCE_DURATION, SEQUENCE_DURATION);

// Skills: layout
pub const TITLE_MARGIN: f32 = 10.0;
pub const TITLE_HEIGHT_XS: f32 = 80.0;
pub const TITLE_HEIGHT_SM: f32 = 130.0;
pub const TITLE_HEIGHT_MD: f32 = 140.0;
pub const TITLE_HEIGHT_LG: f32 = 150.0;
pub const TITLE_EXIT_EXTRA: f32 = 100.0;
pub const BUBBLES_AREA_DESKTOP: f32 = 300.0;
pub const BUBBLES_AREA_MOBILE_FRACTION: f32 = 0.6;
pub const TITLE_BUBBLES_SPACING: f32 = 40.0;
pub const DESKTOP_SLOT_MARGIN: f32 = 60.0;
pub const MOBILE_SLOT_MARGIN: f32 = 20.0;

// Skills: choreography
pub const ICON_STAGGER: f32 = 0.08;
pub const ICON_SIZE_FRACTION: f32 = 0.4;
pub const NON_SKILL_DROP_VIEWPORTS: f32 = 1.5;
pub const NON_SKILL_FADE_RATE: f32 = 1.2;
pub const TITLE_FADE_RATE: f32 = 2.0;
pub const SKILL_INFO_FADE_IN_START: f32 = 0.6;
pub const SKILL_INFO_FADE_OUT_END: f32 = 0.25;

// Projects
pub const PROJECTS_SCALE_MOBILE: f32 = 0.66;
pub const PROJECTS_SCALE_DESKTOP: f32 = 0.74;
pub const PROJECTS_SCALE_WIDE: f32 = 0.78;
pub const PROJECTS_CONTENT_START_Y: f32 = 100.0;
pub const PROJECTS_TITLE_OFFSET: f32 = 180.0;
pub const PROJECTS_CONTENT_END_OFFSET: f32 = 100.0; // section top at viewport top + this
pub const PROJECTS_NAV_OFFSET: f32 = 100.0;

// Contact
pub const CONTACT_SCALE_DESKTOP: f32 = 0.68;
pub const CONTACT_SCALE_MOBILE: f32 = 0.62;
pub const CONTACT_MOBILE_BLOB_SCALE: f32 = 0.66;
pub const CONTACT_FALLBACK_X_FRACTION: f32 = 0.75;
pub const CONTACT_MOBILE_HIDE_PROGRESS: f32 = 0.02;
pub const CONTACT_FORM_START_Y: f32 = 50.0;
pub const FLOAT_START_PROGRESS: f32 = 0.9;
pub const FLOAT_AMPLITUDE: f32 = 6.0;
pub const FLOAT_HALF_PERIOD_MS: f64 = 3000.0;

// Interaction
pub const HOVER_SCALE: f32 = 1.1;
pub const HOVER_DURATION_MS: f64 = 500.0;
pub const PULSE_PEAK_SCALE: f32 = 1.15;
pub const PULSE_UP_MS: f64 = 150.0;
pub const PULSE_SETTLE_MS: f64 = 350.0;
pub const PULSE_BACK_OVERSHOOT: f32 = 1.4;
pub const NAV_HOVER_SCALE: f32 = 1.08;
pub const NAV_HOVER_MS: f64 = 180.0;
pub const NAV_LEAVE_MS: f64 = 200.0;
pub const NAV_PRESS_SCALE: f32 = 0.95;
pub const NAV_PRESS_MS: f64 = 80.0;
pub const NAV_RELEASE_SCALE: f32 = 1.05;
pub const NAV_RELEASE_MS: f64 = 120.0;

// Starfield
pub const STAR_TILES: usize = 3;
pub const STAR_TILE_VIEWPORTS: f32 = 2.0; // tile height in viewport heights
pub const STAR_DENSITY: f32 = 0.000055; // stars per square pixel
pub const STAR_SIZE_MIN: f32 = 1.5;
pub const STAR_SIZE_RANGE: f32 = 7.0;
pub const STAR_OPACITY_MIN: f32 = 0.3;
pub const STAR_OPACITY_RANGE: f32 = 0.5;
pub const STAR_DRIFT_SPEED_RANGE: f32 = 0.8;
pub const STAR_DRIFT_AMOUNT: f32 = 40.0;
pub const STAR_TIME_STEP: f32 = 0.016; // seconds advanced per frame
pub const POINTER_SMOOTHING: f32 = 0.15;
pub const POINTER_INFLUENCE_RADIUS: f32 = 200.0;
pub const POINTER_VELOCITY_TRANSFER: f32 = 0.33;
pub const STAR_DAMPING: f32 = 0.98;
pub const STAR_MAX_OFFSET: f32 = 1000.0;
pub const STAR_RETURN_FORCE: f32 = 0.02;

// Scheduling
pub const RESIZE_DEBOUNCE_MS: f64 = 150.0;
pub const SECTION_RETRY_ATTEMPTS: u32 = 20;
pub const MAX_SIGNAL_ROUNDS: usize = 8;
