//! Error types for capture and dump operations.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by a capture backend or one of its sessions.
#[derive(Debug, Error)]
pub enum CaptureError {
    /// No Wayland or X11 session could be found in the environment
    #[error("No display server detected (neither WAYLAND_DISPLAY nor DISPLAY is set)")]
    NoDisplayServer,

    /// The capture subsystem could not be opened
    #[error("Failed to open capture session: {0}")]
    Init(String),

    /// Displays could not be listed
    #[error("Failed to enumerate displays: {0}")]
    Enumeration(String),

    /// A single display could not be read
    #[error("Failed to capture display {index}: {message}")]
    Capture { index: u32, message: String },

    /// The synthetic union of all displays has no pixels of its own
    #[error("The combined virtual display cannot be captured directly")]
    CombinedDisplay,
}

/// Errors that abort a capture-and-dump run.
#[derive(Debug, Error)]
pub enum DumpError {
    #[error(transparent)]
    Capture(#[from] CaptureError),

    #[error("Failed to create temporary file for display {index}: {source}")]
    TempFile {
        index: u32,
        #[source]
        source: io::Error,
    },

    #[error("Failed to write PNG to {}: {source}", path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Failed to write paths to output: {0}")]
    Output(#[source] io::Error),
}

pub type Result<T> = std::result::Result<T, DumpError>;
