//! Reading back the files listed by a capture-and-dump run.

use std::fs;
use std::path::PathBuf;

use log::error;

/// A capture file loaded into memory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Screenshot {
    pub filename: String,
    pub data: Vec<u8>,
}

/// Split printed output into paths, tolerating `\r\n` line endings and
/// blank lines.
pub fn parse_paths(output: &str) -> Vec<PathBuf> {
    output
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .filter(|line| !line.trim().is_empty())
        .map(PathBuf::from)
        .collect()
}

/// Load every file named in `output`. Files that cannot be read are logged
/// and skipped.
pub fn load_screenshots(output: &str) -> Vec<Screenshot> {
    let mut screenshots = Vec::new();

    for path in parse_paths(output) {
        match fs::read(&path) {
            Ok(data) => {
                let filename = path
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_default();
                screenshots.push(Screenshot { filename, data });
            }
            Err(e) => error!("Error reading file {}: {}", path.display(), e),
        }
    }

    screenshots
}
