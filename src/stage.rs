//! Pipeline stage orchestration.
//!
//! The two stages share the same resolution steps; post-build additionally
//! publishes the result. The whole pipeline is generic over [GitClient] so
//! it can be exercised against a mock.

use std::path::Path;

use crate::error::Result;
use crate::git::GitClient;
use crate::marker;
use crate::remote::RemoteTarget;
use crate::resolver;
use crate::ui;
use crate::version::Version;

/// The pipeline stage being run
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Stage {
    /// Compute the next version and record it before artifacts are built
    PreBuild,
    /// Recompute, commit the marker file, tag, and push after the build
    PostBuild,
}

/// Run a release stage.
///
/// Both stages fetch tags, resolve the next version, and overwrite the
/// marker file. Post-build additionally stages the marker file, commits
/// it, creates the release tag, and pushes branch and tag to the remote.
///
/// With `dry_run` the next version is computed and returned but nothing is
/// written, committed, or pushed.
///
/// # Returns
/// The resolved next version; the caller is responsible for emitting the
/// `version=` line.
pub fn run<G: GitClient>(
    stage: Stage,
    git: &G,
    target: &RemoteTarget,
    marker_path: &Path,
    dry_run: bool,
) -> Result<Version> {
    if stage == Stage::PostBuild && !dry_run {
        // Fail before any side effect if the push cannot possibly succeed.
        target.require_credentials()?;
    }

    ui::display_status(&format!("Fetching tags from {}", target.url()));
    git.fetch_tags(target)?;
    let tags = git.list_tags()?;

    let marker_contents = marker::read(marker_path)?;
    if let Some(contents) = marker_contents.as_deref() {
        if resolver::parse_marker(contents).is_none() {
            ui::display_warning(&format!(
                "Marker file '{}' does not contain a version, assuming {}",
                marker_path.display(),
                Version::default()
            ));
        }
    }
    let current = resolver::current_version(marker_contents.as_deref());
    let next = resolver::next_version(current, resolver::versions_in(&tags));

    if dry_run {
        ui::display_status(&format!("Dry run: next version would be {}", next));
        return Ok(next);
    }

    marker::write(marker_path, next)?;

    if stage == Stage::PostBuild {
        git.stage_file(marker_path)?;
        git.commit(&format!("ci: release of version {}", next))?;
        git.create_tag(&next.to_string())?;
        git.push(target, &next.to_string())?;
        ui::display_success(&format!("Published {}", next));
    }

    Ok(next)
}
