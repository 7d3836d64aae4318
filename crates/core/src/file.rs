// Load/save helpers for settings files on disk
//
// The codec in `format` only sees streams; these wrap it with file handling.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use crate::error::StoreError;
use crate::format::ReadReport;
use crate::settings::Settings;

/// Read a settings file into a fresh tree.
pub fn load(path: &Path) -> Result<(Settings, ReadReport), StoreError> {
    let mut settings = Settings::new();
    let report = load_into(&mut settings, path)?;
    Ok((settings, report))
}

/// Read a settings file on top of an existing tree.
pub fn load_into(settings: &mut Settings, path: &Path) -> Result<ReadReport, StoreError> {
    let file = File::open(path).map_err(|e| StoreError::from_io(path, e))?;
    let report = settings
        .read(BufReader::new(file))
        .map_err(|e| StoreError::from_io(path, e))?;

    let malformed = report.anomalies().count();
    if malformed > 0 {
        log::warn!("{}: {} malformed line(s) ignored", path.display(), malformed);
    }
    if report.is_lossy() {
        log::warn!(
            "{}: {} line(s) not valid UTF-8",
            path.display(),
            report.lossy_lines.len()
        );
    }
    Ok(report)
}

/// Write the tree to `path`, replacing its contents.
pub fn save(settings: &Settings, path: &Path) -> Result<(), StoreError> {
    // Ensure directory exists
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| StoreError::from_io(parent, e))?;
    }

    let file = File::create(path).map_err(|e| StoreError::from_io(path, e))?;
    let mut writer = BufWriter::new(file);
    settings
        .write(&mut writer)
        .and_then(|_| writer.flush())
        .map_err(|e| StoreError::from_io(path, e))?;

    log::debug!("saved {} boxes to {}", settings.len(), path.display());
    Ok(())
}
