//! Crate-level error types.

use std::fmt;

use crate::scene::ObjectId;

/// Errors produced by the cube inspector.
#[derive(Debug)]
pub enum CubeError {
    /// The id does not exist in the current registry generation.
    NotFound(ObjectId),
    /// A caller handed in an id that is stale or unknown, or broke another
    /// documented precondition.
    PreconditionViolation(ObjectId),
    /// An animation or option parameter is out of range.
    InvalidParameter(String),
    /// A color string is not of the form `#RRGGBB`.
    InvalidColor(String),
    /// Generic I/O failure.
    Io(std::io::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
    /// GPU setup failure.
    Gpu(String),
    /// Window or event-loop failure.
    Window(String),
}

impl fmt::Display for CubeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound(id) => write!(f, "object {id} not found"),
            Self::PreconditionViolation(id) => {
                write!(f, "precondition violated for object {id}")
            }
            Self::InvalidParameter(msg) => {
                write!(f, "invalid parameter: {msg}")
            }
            Self::InvalidColor(text) => {
                write!(f, "invalid color {text:?}, expected #RRGGBB")
            }
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::Gpu(msg) => write!(f, "GPU error: {msg}"),
            Self::Window(msg) => write!(f, "window error: {msg}"),
        }
    }
}

impl std::error::Error for CubeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for CubeError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
