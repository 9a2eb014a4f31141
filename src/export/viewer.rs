//! Opens a written report with the desktop's default viewer.

use std::path::Path;
use tracing::debug;

/// Launches the default viewer without waiting for it.
///
/// Returns whether the launch succeeded; failures are logged and never raised.
pub fn open_report(path: &Path) -> bool {
    if !path.is_file() {
        debug!("Not opening {}: file does not exist", path.display());
        return false;
    }

    match open::that_detached(path) {
        Ok(()) => true,
        Err(e) => {
            debug!("Could not open {}: {}", path.display(), e);
            false
        }
    }
}
