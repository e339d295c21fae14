use std::io;
use std::process::ExitCode;

use log::error;
use monitor_dump::{dump_displays, write_paths, DumpOptions, XcapBackend};

fn main() -> ExitCode {
    // Diagnostics go to stderr; stdout carries only the capture paths.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let result = dump_displays(&XcapBackend::new(), &DumpOptions::default())
        .and_then(|paths| write_paths(&mut io::stdout().lock(), &paths));

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
