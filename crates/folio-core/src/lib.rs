//! Scroll choreography for the portfolio page: a single "blob" that morphs
//! through About, breaks into skill bubbles, reforms and travels on to
//! Projects and Contact.
//!
//! Everything here is platform-free. The web front-end measures the page,
//! feeds scroll, time and pointer input to a [`Choreographer`] and applies
//! what it writes to a [`Stage`].

pub mod bubbles;
pub mod choreographer;
pub mod constants;
pub mod ease;
pub mod error;
pub mod float;
pub mod geometry;
pub mod handoff;
pub mod interaction;
pub mod layout;
pub mod nav;
pub mod sections;
pub mod stage;
pub mod starfield;
pub mod trigger;
pub mod viewport;

pub use choreographer::Choreographer;
pub use error::{ChoreoError, Result};
pub use geometry::{BlobGeometry, Size};
pub use interaction::{InteractionEvent, Target};
pub use nav::NavSection;
pub use stage::{ElementId, Frame, Measurements, Props, RecordingStage, Rect, Stage};
pub use viewport::Viewport;
