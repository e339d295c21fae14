//! Capture every physical display into its own temporary PNG file.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use image::{ImageFormat, RgbImage};
use log::{debug, info, warn};

use crate::capture::{CaptureBackend, CaptureSession, DisplayInfo};
use crate::error::{DumpError, Result};

/// Where and how capture files are named
#[derive(Debug, Clone)]
pub struct DumpOptions {
    pub temp_dir: PathBuf,
    pub prefix: String,
    pub suffix: String,
}

impl Default for DumpOptions {
    fn default() -> Self {
        Self {
            temp_dir: std::env::temp_dir(),
            prefix: "monitor-".to_string(),
            suffix: ".png".to_string(),
        }
    }
}

impl DumpOptions {
    pub fn in_dir(temp_dir: impl Into<PathBuf>) -> Self {
        Self {
            temp_dir: temp_dir.into(),
            ..Self::default()
        }
    }
}

/// Capture each physical display and return the written paths in index
/// order.
///
/// The session is released before this returns, on success or failure.
/// When any step fails, files already written by this call are removed and
/// the error is returned instead of a partial list.
pub fn dump_displays<B: CaptureBackend>(backend: &B, options: &DumpOptions) -> Result<Vec<PathBuf>> {
    let session = backend.open()?;
    let mut paths = Vec::new();

    let outcome = capture_all(&session, options, &mut paths);
    drop(session);

    match outcome {
        Ok(()) => Ok(paths),
        Err(e) => {
            discard(&paths);
            Err(e)
        }
    }
}

fn capture_all<S: CaptureSession>(
    session: &S,
    options: &DumpOptions,
    paths: &mut Vec<PathBuf>,
) -> Result<()> {
    let mut displays: Vec<DisplayInfo> = session
        .displays()?
        .into_iter()
        .filter(DisplayInfo::is_physical)
        .collect();
    displays.sort_by_key(|d| d.index);

    if displays.is_empty() {
        warn!("No physical displays found, nothing to capture");
        return Ok(());
    }
    info!("Capturing {} display(s)", displays.len());

    for display in &displays {
        let path = allocate_temp_path(options, display.index)?;
        // Track before writing so a failed capture still cleans up the file.
        paths.push(path.clone());

        debug!(
            "Capturing display {} '{}' ({}x{}) at ({}, {})",
            display.index, display.name, display.width, display.height, display.x, display.y
        );
        let image = session.capture(display)?;
        note_size(display, &image);
        write_png(&image, &path)?;

        info!("Display {} saved to {}", display.index, path.display());
    }

    Ok(())
}

/// Create an empty, uniquely named file for `index` and return its
/// absolute path. The descriptor is closed before returning and the file
/// is kept on disk.
pub fn allocate_temp_path(options: &DumpOptions, index: u32) -> Result<PathBuf> {
    let temp_error = |source| DumpError::TempFile { index, source };

    let prefix = format!("{}{}-", options.prefix, index);
    let path = tempfile::Builder::new()
        .prefix(&prefix)
        .suffix(&options.suffix)
        .tempfile_in(&options.temp_dir)
        .map_err(temp_error)?
        .into_temp_path()
        .keep()
        .map_err(|e| temp_error(e.error))?;

    std::path::absolute(&path).map_err(temp_error)
}

// Scaled monitors can report a size a pixel or so off the frame; the frame wins.
fn note_size(display: &DisplayInfo, image: &RgbImage) {
    let (width, height) = image.dimensions();
    if (width, height) != display.size() {
        warn!(
            "Display {} reported {}x{} but captured {}x{}",
            display.index, display.width, display.height, width, height
        );
    }
}

/// Encode `image` as PNG, replacing whatever is at `path`.
pub fn write_png(image: &RgbImage, path: &Path) -> Result<()> {
    image
        .save_with_format(path, ImageFormat::Png)
        .map_err(|source| DumpError::Encode {
            path: path.to_path_buf(),
            source,
        })
}

/// Print one path per line in a single write and flush.
///
/// If the output cannot be written the files are removed, since no reader
/// can be relied on to own them.
pub fn write_paths<W: Write>(out: &mut W, paths: &[PathBuf]) -> Result<()> {
    let mut listing = String::new();
    for path in paths {
        listing.push_str(&path.display().to_string());
        listing.push('\n');
    }

    let written = out.write_all(listing.as_bytes()).and_then(|()| out.flush());
    if let Err(e) = written {
        discard(paths);
        return Err(DumpError::Output(e));
    }
    Ok(())
}

fn discard(paths: &[PathBuf]) {
    for path in paths {
        if let Err(e) = fs::remove_file(path) {
            warn!("Failed to remove {}: {}", path.display(), e);
        }
    }
}
