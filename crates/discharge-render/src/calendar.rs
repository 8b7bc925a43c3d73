//! Calendar export.
//!
//! The simplification response already carries the iCalendar text for the
//! follow-up schedule; exporting is only a matter of writing it to disk.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::RenderError;

pub const FILE_NAME: &str = "follow-up-appointments.ics";

/// Write `ics` into `dir` as [`FILE_NAME`], returning the written path.
///
/// The content is written as received, byte-order mark included.
pub fn write_ics(dir: &Path, ics: &str) -> Result<PathBuf, RenderError> {
    let body = ics.strip_prefix('\u{feff}').unwrap_or(ics);
    if !body.trim_start().starts_with("BEGIN:VCALENDAR") {
        return Err(RenderError::InvalidCalendar);
    }

    let path = dir.join(FILE_NAME);
    let write_err = |source| RenderError::Write {
        path: path.display().to_string(),
        source,
    };

    std::fs::create_dir_all(dir).map_err(write_err)?;
    std::fs::write(&path, ics.as_bytes()).map_err(write_err)?;

    info!(path = %path.display(), "calendar file written");
    Ok(path)
}
