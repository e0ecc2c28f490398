use crate::error::OutputError;
use chrono::NaiveDateTime;
use std::fs;
use std::path::{Path, PathBuf};

/// `user_stories_YYYY_MM_DD_HH_MM_SS.md` for the given local time.
pub fn report_filename(now: NaiveDateTime) -> String {
    now.format("user_stories_%Y_%m_%d_%H_%M_%S.md").to_string()
}

/// Write `document` into `dir` in one call. A file written in the same second
/// is overwritten.
pub fn write_report(dir: &Path, document: &str, now: NaiveDateTime) -> Result<PathBuf, OutputError> {
    fs::create_dir_all(dir).map_err(|source| OutputError::Write {
        path: dir.display().to_string(),
        source,
    })?;
    let path = dir.join(report_filename(now));
    fs::write(&path, document).map_err(|source| OutputError::Write {
        path: path.display().to_string(),
        source,
    })?;
    tracing::info!(path = %path.display(), bytes = document.len(), "report written");
    Ok(path)
}
