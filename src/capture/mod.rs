//! Capture module for display enumeration and capture
//!
//! The dump loop talks to the platform through [`CaptureBackend`] and
//! [`CaptureSession`], so tests can swap the xcap implementation for a fake.

pub mod desktop;
pub mod screen;

use image::RgbImage;

use crate::error::CaptureError;

pub use desktop::DisplayServer;
pub use screen::{XcapBackend, XcapSession};

/// Index reserved for the union of all physical displays.
pub const COMBINED_DISPLAY_INDEX: u32 = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayKind {
    /// Bounding rectangle of every physical display
    Combined,
    Physical,
}

/// Geometry of one entry returned by [`CaptureSession::displays`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayInfo {
    pub index: u32,
    pub kind: DisplayKind,
    pub name: String,
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl DisplayInfo {
    pub fn is_physical(&self) -> bool {
        self.kind == DisplayKind::Physical
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Build the combined entry covering every display in `physical`.
    ///
    /// An empty slice yields a zero-sized rectangle at the origin.
    pub fn combined(physical: &[DisplayInfo]) -> Self {
        let left = physical.iter().map(|d| d.x).min().unwrap_or(0);
        let top = physical.iter().map(|d| d.y).min().unwrap_or(0);
        let right = physical
            .iter()
            .map(|d| d.x as i64 + d.width as i64)
            .max()
            .unwrap_or(left as i64);
        let bottom = physical
            .iter()
            .map(|d| d.y as i64 + d.height as i64)
            .max()
            .unwrap_or(top as i64);

        Self {
            index: COMBINED_DISPLAY_INDEX,
            kind: DisplayKind::Combined,
            name: "combined".to_string(),
            x: left,
            y: top,
            width: (right - left as i64) as u32,
            height: (bottom - top as i64) as u32,
        }
    }
}

/// Opens capture sessions against a display subsystem.
pub trait CaptureBackend {
    type Session: CaptureSession;

    /// Open a session. Dropping the session releases it.
    fn open(&self) -> Result<Self::Session, CaptureError>;
}

/// An open handle to the display subsystem.
pub trait CaptureSession {
    /// List displays: the combined entry at index 0, then physical
    /// displays at indices 1..=N.
    fn displays(&self) -> Result<Vec<DisplayInfo>, CaptureError>;

    /// Grab the current contents of `display` as an RGB image.
    fn capture(&self, display: &DisplayInfo) -> Result<RgbImage, CaptureError>;
}
