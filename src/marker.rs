//! Marker file boundary.
//!
//! The marker file records the most recently resolved version as a single
//! line. Reading and writing live here so the resolver stays free of I/O.

use std::fs;
use std::io;
use std::path::Path;

use crate::version::Version;

/// Default marker file name, relative to the repository root
pub const DEFAULT_MARKER_FILE: &str = "VERSION";

/// Read the raw marker file contents.
///
/// # Returns
/// * `Ok(None)` - the file does not exist (a normal state for a repository
///   that has never released)
/// * `Ok(Some(contents))` - the raw file contents, uninterpreted
pub fn read(path: &Path) -> io::Result<Option<String>> {
    if !path.exists() {
        return Ok(None);
    }
    fs::read_to_string(path).map(Some)
}

/// Overwrite the marker file with the formatted version string.
pub fn write(path: &Path, version: Version) -> io::Result<()> {
    fs::write(path, version.to_string())
}
