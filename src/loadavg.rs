//! System load reporting.
//!
//! `/proc/loadavg` only exists on Linux-style systems; a missing or
//! malformed file is tolerated and simply reports nothing.

use std::io;
use std::path::Path;

use crate::trace::{TraceLine, TraceSink};

const LOADAVG_PATH: &str = "/proc/loadavg";

/// The 1/5/15-minute load averages, kept as the kernel's own text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadAverages {
    pub average1: String,
    pub average5: String,
    pub average15: String,
}

/// Read the system load averages, if the platform exposes them.
pub fn read_load_averages() -> Option<LoadAverages> {
    read_load_averages_from(Path::new(LOADAVG_PATH))
}

fn read_load_averages_from(path: &Path) -> Option<LoadAverages> {
    let content = std::fs::read_to_string(path).ok()?;
    let mut fields = content.split_whitespace();
    Some(LoadAverages {
        average1: fields.next()?.to_string(),
        average5: fields.next()?.to_string(),
        average15: fields.next()?.to_string(),
    })
}

/// Emit the load averages on the `load-average` graph. A platform without
/// them emits nothing.
pub fn report(sink: &mut TraceSink) -> io::Result<()> {
    let averages = match read_load_averages() {
        Some(a) => a,
        None => return Ok(()),
    };
    sink.emit(TraceLine::new(
        "load-average",
        "average1",
        averages.average1,
        "processes",
    ))?;
    sink.emit(TraceLine::new(
        "load-average",
        "average5",
        averages.average5,
        "processes",
    ))?;
    sink.emit(TraceLine::new(
        "load-average",
        "average15",
        averages.average15,
        "processes",
    ))
}
