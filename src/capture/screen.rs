//! Screen capture backend using the xcap library

use image::{DynamicImage, RgbImage};
use log::debug;
use xcap::Monitor;

use super::desktop::DisplayServer;
use super::{CaptureBackend, CaptureSession, DisplayInfo, DisplayKind};
use crate::error::CaptureError;

/// Captures the monitors of the local desktop session.
#[derive(Debug, Default, Clone, Copy)]
pub struct XcapBackend;

impl XcapBackend {
    pub fn new() -> Self {
        Self
    }
}

impl CaptureBackend for XcapBackend {
    type Session = XcapSession;

    fn open(&self) -> Result<XcapSession, CaptureError> {
        let server = DisplayServer::detect();
        debug!("Opening capture session on {}", server);

        let monitors = Monitor::all().map_err(|e| {
            if cfg!(target_os = "linux") && !server.is_known() {
                CaptureError::NoDisplayServer
            } else {
                CaptureError::Init(e.to_string())
            }
        })?;

        debug!("Capture session holds {} monitor(s)", monitors.len());
        Ok(XcapSession { monitors })
    }
}

/// Monitor handles enumerated when the session was opened.
pub struct XcapSession {
    monitors: Vec<Monitor>,
}

impl XcapSession {
    fn monitor_info(index: u32, monitor: &Monitor) -> Result<DisplayInfo, CaptureError> {
        let failed = |e: xcap::XCapError| CaptureError::Enumeration(e.to_string());

        let scale_factor = monitor.scale_factor().map_err(failed)?;
        let (width, height) = physical_size(
            monitor.width().map_err(failed)?,
            monitor.height().map_err(failed)?,
            scale_factor,
        );

        Ok(DisplayInfo {
            index,
            kind: DisplayKind::Physical,
            name: monitor.name().unwrap_or_else(|_| format!("monitor-{}", index)),
            x: monitor.x().map_err(failed)?,
            y: monitor.y().map_err(failed)?,
            width,
            height,
        })
    }
}

/// Convert the logical size xcap reports for a scaled monitor into the
/// pixel size of its captured frames.
///
/// Non-finite or non-positive scale factors are treated as 1.0.
pub fn physical_size(width: u32, height: u32, scale_factor: f32) -> (u32, u32) {
    let scale = if scale_factor.is_finite() && scale_factor > 0.0 {
        scale_factor as f64
    } else {
        1.0
    };
    let scaled = |v: u32| (v as f64 * scale).round() as u32;
    (scaled(width), scaled(height))
}

impl CaptureSession for XcapSession {
    fn displays(&self) -> Result<Vec<DisplayInfo>, CaptureError> {
        let physical = self
            .monitors
            .iter()
            .zip(1u32..)
            .map(|(monitor, index)| Self::monitor_info(index, monitor))
            .collect::<Result<Vec<_>, _>>()?;

        let mut displays = Vec::with_capacity(physical.len() + 1);
        displays.push(DisplayInfo::combined(&physical));
        displays.extend(physical);
        Ok(displays)
    }

    fn capture(&self, display: &DisplayInfo) -> Result<RgbImage, CaptureError> {
        if !display.is_physical() {
            return Err(CaptureError::CombinedDisplay);
        }

        let monitor = display
            .index
            .checked_sub(1)
            .and_then(|i| self.monitors.get(i as usize))
            .ok_or_else(|| CaptureError::Capture {
                index: display.index,
                message: "display is no longer part of this session".to_string(),
            })?;

        let image = monitor
            .capture_image()
            .map_err(|e| CaptureError::Capture {
                index: display.index,
                message: e.to_string(),
            })?;

        Ok(DynamicImage::ImageRgba8(image).into_rgb8())
    }
}

impl Drop for XcapSession {
    fn drop(&mut self) {
        debug!(
            "Releasing capture session ({} monitor handle(s))",
            self.monitors.len()
        );
    }
}
