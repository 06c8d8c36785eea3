//! Poll-and-retranslate loop.

use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, SystemTime};

use chrono::{DateTime, Local, TimeZone};

use crate::error::Result;
use crate::run::RunSummary;

pub const POLL_INTERVAL: Duration = Duration::from_millis(200);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WatchStats {
    pub succeeded: usize,
    pub failed: usize,
}

/// Calls `run_once` whenever the modification time of `input` changes,
/// starting with the first poll. Failed runs are logged and polling goes on;
/// only `cancel` ends the loop.
pub fn watch<F>(input: &Path, interval: Duration, cancel: &AtomicBool, mut run_once: F) -> WatchStats
where
    F: FnMut() -> Result<RunSummary>,
{
    let mut seen: Option<SystemTime> = None;
    let mut stats = WatchStats::default();
    while !cancel.load(Ordering::SeqCst) {
        match fs::metadata(input).and_then(|m| m.modified()) {
            Ok(mtime) if seen != Some(mtime) => {
                seen = Some(mtime);
                match run_once() {
                    Ok(summary) => {
                        stats.succeeded += 1;
                        println!(
                            "[{}] Output \"{}\" updated.",
                            clock(&Local::now()),
                            summary.output.display()
                        );
                    }
                    Err(e) => {
                        stats.failed += 1;
                        tracing::error!(kind = ?e.kind(), "run failed: {e}");
                    }
                }
            }
            Ok(_) => {}
            Err(e) => tracing::warn!(input = %input.display(), "cannot stat input: {e}"),
        }
        if cancel.load(Ordering::SeqCst) {
            break;
        }
        thread::sleep(interval);
    }
    stats
}

/// `HH:MM:SS` of `t` in its own time zone.
pub fn clock<Tz: TimeZone>(t: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    t.format("%H:%M:%S").to_string()
}
