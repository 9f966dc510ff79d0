//! CSV report of ranked icons.

use std::path::Path;

use crate::error::FaviconError;
use crate::icon::Icon;

/// Write icons to `path` as CSV, one record per icon in the given order.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written.
pub fn write_csv(icons: &[Icon], path: &Path) -> Result<(), FaviconError> {
    let io_error = |source| FaviconError::Io { path: path.to_path_buf(), source };

    let mut writer = csv::Writer::from_path(path).map_err(|e| io_error(e.into()))?;

    writer.write_record(["url", "width", "height", "format"]).map_err(|e| io_error(e.into()))?;

    for icon in icons {
        let (width, height) = (icon.width().to_string(), icon.height().to_string());
        writer
            .write_record([icon.url(), width.as_str(), height.as_str(), icon.format()])
            .map_err(|e| io_error(e.into()))?;
    }

    writer.flush().map_err(io_error)
}
