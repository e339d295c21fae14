//! Capture every connected display to a temporary PNG file and report the
//! file paths.
//!
//! [`dump::dump_displays`] drives a [`capture::CaptureBackend`]; the binary
//! prints the returned paths one per line. [`screenshots`] reads that output
//! back on the consuming side.

pub mod capture;
pub mod dump;
pub mod error;
pub mod screenshots;

pub use capture::{CaptureBackend, CaptureSession, DisplayInfo, DisplayKind, XcapBackend};
pub use dump::{dump_displays, write_paths, DumpOptions};
pub use error::{CaptureError, DumpError};
pub use screenshots::{load_screenshots, parse_paths, Screenshot};
