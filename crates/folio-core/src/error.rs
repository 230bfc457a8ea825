use crate::stage::ElementId;
use thiserror::Error;

/// Setup-time failures. Hot-path geometry never produces these; it falls
/// back instead.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ChoreoError {
    #[error("element {0:?} is not mounted")]
    MissingElement(ElementId),
    #[error("section `{0}` has not rendered yet")]
    MissingSection(&'static str),
    #[error("invalid measurement for {what}: {value}")]
    InvalidMeasurement { what: &'static str, value: f32 },
    #[error("gave up waiting for `{section}` after {attempts} attempts")]
    RetriesExhausted {
        section: &'static str,
        attempts: u32,
    },
}

pub type Result<T> = std::result::Result<T, ChoreoError>;
