use std::fmt;

/// Semantic version representation
///
/// Components compare lexicographically: major first, then minor, then patch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl Version {
    /// Create a new version
    pub fn new(major: u32, minor: u32, patch: u32) -> Self {
        Version {
            major,
            minor,
            patch,
        }
    }

    /// Parse a version from a tag string.
    ///
    /// Only tags matching `v<major>.<minor>.<patch>` in full denote a
    /// version; anything else (`"latest"`, `"v1.2"`, `"v1.2.3.4"`,
    /// `"V1.2.3"`) is not a version tag.
    ///
    /// # Returns
    /// * `Some(Version)` - the three captured components
    /// * `None` - the string is not a version tag; this is an expected
    ///   outcome, not an error
    pub fn parse(tag: &str) -> Option<Self> {
        let re = regex::Regex::new(r"^v(\d+)\.(\d+)\.(\d+)$").ok()?;
        let captures = re.captures(tag)?;

        let major = captures.get(1)?.as_str().parse::<u32>().ok()?;
        let minor = captures.get(2)?.as_str().parse::<u32>().ok()?;
        let patch = captures.get(3)?.as_str().parse::<u32>().ok()?;

        Some(Version {
            major,
            minor,
            patch,
        })
    }
}

impl Default for Version {
    /// The version assumed when no release has been recorded yet
    fn default() -> Self {
        Version::new(1, 0, 0)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}.{}.{}", self.major, self.minor, self.patch)
    }
}
