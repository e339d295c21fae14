//! End-to-end runs over a fake display subsystem: dump, print, read back.

use std::collections::HashSet;

use image::{Rgb, RgbImage};
use monitor_dump::{
    dump_displays, load_screenshots, parse_paths, write_paths, CaptureBackend, CaptureError,
    CaptureSession, DisplayInfo, DisplayKind, DumpError, DumpOptions,
};
use tempfile::TempDir;

struct Desk {
    monitors: Vec<(i32, u32, u32)>,
    broken: bool,
}

struct DeskSession<'a>(&'a Desk);

impl<'a> CaptureBackend for &'a Desk {
    type Session = DeskSession<'a>;

    fn open(&self) -> Result<DeskSession<'a>, CaptureError> {
        Ok(DeskSession(*self))
    }
}

impl CaptureSession for DeskSession<'_> {
    fn displays(&self) -> Result<Vec<DisplayInfo>, CaptureError> {
        if self.0.broken {
            return Err(CaptureError::Enumeration("permission denied".to_string()));
        }
        let physical: Vec<DisplayInfo> = self
            .0
            .monitors
            .iter()
            .zip(1u32..)
            .map(|(&(x, width, height), index)| DisplayInfo {
                index,
                kind: DisplayKind::Physical,
                name: format!("HDMI-{}", index),
                x,
                y: 0,
                width,
                height,
            })
            .collect();
        let mut all = vec![DisplayInfo::combined(&physical)];
        all.extend(physical);
        Ok(all)
    }

    fn capture(&self, display: &DisplayInfo) -> Result<RgbImage, CaptureError> {
        if !display.is_physical() {
            return Err(CaptureError::CombinedDisplay);
        }
        Ok(RgbImage::from_pixel(display.width, display.height, Rgb([20, 40, 60])))
    }
}

fn two_monitor_desk() -> Desk {
    Desk {
        monitors: vec![(0, 1920, 1080), (1920, 2560, 1440)],
        broken: false,
    }
}

#[test]
fn two_displays_print_two_paths() {
    let dir = TempDir::new().unwrap();
    let desk = two_monitor_desk();

    let paths = dump_displays(&&desk, &DumpOptions::in_dir(dir.path())).unwrap();
    let mut out = Vec::new();
    write_paths(&mut out, &paths).unwrap();
    let printed = String::from_utf8(out).unwrap();

    assert_eq!(printed.lines().count(), 2);
    assert!(printed.ends_with('\n'));

    let screenshots = load_screenshots(&printed);
    assert_eq!(screenshots.len(), 2);
    assert!(screenshots[0].filename.starts_with("monitor-1-"));
    assert!(screenshots[1].filename.starts_with("monitor-2-"));

    let first = image::load_from_memory(&screenshots[0].data).unwrap();
    let second = image::load_from_memory(&screenshots[1].data).unwrap();
    assert_eq!((first.width(), first.height()), (1920, 1080));
    assert_eq!((second.width(), second.height()), (2560, 1440));
}

#[test]
fn repeated_runs_never_collide() {
    let dir = TempDir::new().unwrap();
    let desk = two_monitor_desk();
    let options = DumpOptions::in_dir(dir.path());

    let first = dump_displays(&&desk, &options).unwrap();
    let second = dump_displays(&&desk, &options).unwrap();

    let first: HashSet<_> = first.into_iter().collect();
    let second: HashSet<_> = second.into_iter().collect();
    assert_eq!(first.len(), 2);
    assert_eq!(second.len(), 2);
    assert!(first.is_disjoint(&second));
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 4);
}

#[test]
fn failed_enumeration_prints_nothing() {
    let dir = TempDir::new().unwrap();
    let desk = Desk {
        monitors: vec![(0, 800, 600)],
        broken: true,
    };

    let result = dump_displays(&&desk, &DumpOptions::in_dir(dir.path()));

    assert!(matches!(
        result,
        Err(DumpError::Capture(CaptureError::Enumeration(_)))
    ));
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn printed_output_parses_back_in_order() {
    let dir = TempDir::new().unwrap();
    let desk = Desk {
        monitors: vec![(0, 16, 16), (16, 16, 16), (32, 16, 16)],
        broken: false,
    };

    let paths = dump_displays(&&desk, &DumpOptions::in_dir(dir.path())).unwrap();
    let mut out = Vec::new();
    write_paths(&mut out, &paths).unwrap();

    assert_eq!(parse_paths(&String::from_utf8(out).unwrap()), paths);
}
