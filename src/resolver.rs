//! Next-release resolution.
//!
//! Pure functions over tag lists and marker file contents; all I/O stays
//! with the callers so the resolution rules can be tested with plain
//! fixtures.

use crate::version::Version;

/// Lazily extract versions from a list of tag names.
///
/// Tags that are not version tags are silently skipped. Input order is
/// preserved; no deduplication is performed.
pub fn versions_in(tags: &[String]) -> impl Iterator<Item = Version> + '_ {
    tags.iter().filter_map(|tag| Version::parse(tag))
}

/// Parse the version recorded in marker file contents.
///
/// Only the first line is considered, with surrounding whitespace
/// stripped. Returns `None` when that line is not a version string.
pub fn parse_marker(contents: &str) -> Option<Version> {
    Version::parse(contents.lines().next().unwrap_or("").trim())
}

/// The version the next release is computed from.
///
/// `marker` is the raw contents of the marker file, or `None` when the
/// file does not exist. Absent or unparsable contents fall back to the
/// default 1.0.0.
pub fn current_version(marker: Option<&str>) -> Version {
    marker.and_then(parse_marker).unwrap_or_default()
}

/// Compute the next release version for the current major.minor line.
///
/// Considers only released versions whose major and minor components equal
/// the current version's. If none exist the line starts at patch 0 - the
/// patch recorded in the marker file is not itself a floor. Otherwise the
/// next patch is one past the highest released patch; duplicate tags only
/// contribute to the maximum.
pub fn next_version<I>(current: Version, released: I) -> Version
where
    I: IntoIterator<Item = Version>,
{
    let max_patch = released
        .into_iter()
        .filter(|v| v.major == current.major && v.minor == current.minor)
        .map(|v| v.patch)
        .max();

    match max_patch {
        Some(patch) => Version::new(current.major, current.minor, patch + 1),
        None => Version::new(current.major, current.minor, 0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_versions_in_skips_non_version_tags() {
        let tags = tags(&["v1.0.0", "latest", "nightly-2024", "v2.1.3", "v1.2"]);
        let versions: Vec<Version> = versions_in(&tags).collect();
        assert_eq!(versions, vec![Version::new(1, 0, 0), Version::new(2, 1, 3)]);
    }

    #[test]
    fn test_versions_in_preserves_input_order() {
        let tags = tags(&["v2.0.0", "v1.0.0"]);
        let versions: Vec<Version> = versions_in(&tags).collect();
        assert_eq!(versions, vec![Version::new(2, 0, 0), Version::new(1, 0, 0)]);
    }

    #[test]
    fn test_parse_marker_reads_first_line_only() {
        assert_eq!(
            parse_marker("v1.2.3\nv9.9.9\n"),
            Some(Version::new(1, 2, 3))
        );
    }

    #[test]
    fn test_parse_marker_strips_whitespace() {
        assert_eq!(parse_marker("  v1.2.3  \n"), Some(Version::new(1, 2, 3)));
    }

    #[test]
    fn test_parse_marker_malformed() {
        assert_eq!(parse_marker("not a version"), None);
        assert_eq!(parse_marker(""), None);
    }

    #[test]
    fn test_current_version_defaults_without_marker() {
        assert_eq!(current_version(None), Version::new(1, 0, 0));
    }

    #[test]
    fn test_current_version_defaults_on_malformed_marker() {
        assert_eq!(current_version(Some("garbage")), Version::new(1, 0, 0));
    }

    #[test]
    fn test_current_version_reads_marker() {
        assert_eq!(current_version(Some("v3.4.9\n")), Version::new(3, 4, 9));
    }

    #[test]
    fn test_next_version_increments_past_max_patch() {
        let released = tags(&["v1.2.0", "v1.2.1", "v1.2.3", "v2.0.0"]);
        let next = next_version(Version::new(1, 2, 0), versions_in(&released));
        assert_eq!(next, Version::new(1, 2, 4));
    }

    #[test]
    fn test_next_version_fresh_line_starts_at_zero() {
        let released = tags(&["v1.2.0", "v1.2.1"]);
        let next = next_version(Version::new(2, 0, 0), versions_in(&released));
        assert_eq!(next, Version::new(2, 0, 0));
    }

    #[test]
    fn test_next_version_marker_patch_is_not_a_floor() {
        // The stored current version carries patch 7, but no release on the
        // 3.1 line exists yet, so the line restarts at 0.
        let released = tags(&["v2.9.4"]);
        let next = next_version(Version::new(3, 1, 7), versions_in(&released));
        assert_eq!(next, Version::new(3, 1, 0));
    }

    #[test]
    fn test_next_version_duplicate_tags_are_idempotent() {
        let released = tags(&["v1.0.5", "v1.0.5", "v1.0.2"]);
        let next = next_version(Version::new(1, 0, 0), versions_in(&released));
        assert_eq!(next, Version::new(1, 0, 6));
    }

    #[test]
    fn test_next_version_no_releases_at_all() {
        let next = next_version(Version::default(), versions_in(&[]));
        assert_eq!(next, Version::new(1, 0, 0));
    }

    #[test]
    fn test_marker_and_tags_scenario() {
        // Marker records v3.4.9; releases v3.4.9, v3.4.10 and v3.5.0 exist.
        // Patches 9 and 10 match the 3.4 line, so the next release is v3.4.11.
        let released = tags(&["v3.4.9", "v3.4.10", "v3.5.0"]);
        let current = current_version(Some("v3.4.9"));
        let next = next_version(current, versions_in(&released));
        assert_eq!(next.to_string(), "v3.4.11");
    }
}
