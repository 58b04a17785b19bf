//! Set-up errors
//!
//! The simulation itself cannot fail; only bringing up the host can.

use thiserror::Error;

/// Failures that prevent the effect from starting
#[derive(Error, Debug)]
pub enum SetupError {
    #[error("no global window")]
    NoWindow,
    #[error("window has no document")]
    NoDocument,
    #[error("no element with id '{0}'")]
    CanvasNotFound(String),
    #[error("element '{0}' is not a canvas")]
    NotACanvas(String),
    #[error("2d drawing context unavailable")]
    ContextUnavailable,
    #[error("invalid settings: {0}")]
    InvalidSettings(#[from] serde_json::Error),
    #[error("could not read settings: {0}")]
    SettingsIo(#[from] std::io::Error),
}
