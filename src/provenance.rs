//! Discovering where monitor and board definitions live.
//!
//! The provenance string is shown to humans in alert messages and board
//! descriptions so they know where to make changes.

use std::path::Path;
use std::process::Command;

use regex::Regex;
use tracing::debug;

use crate::Error;

/// Environment variables checked, in order, for a repository URL.
pub const REPO_URL_VARS: [&str; 2] = ["GIT_URL", "CIRCLE_REPOSITORY_URL"];

/// Resolve the provenance string from the process environment.
///
/// Returns the first of: `explicit`, a non-empty [`REPO_URL_VARS`] variable,
/// or the first remote URL of the git repository at `dir`.
pub fn resolve(explicit: Option<&str>, dir: &Path) -> Result<String, Error> {
    resolve_with(explicit, dir, |name| std::env::var(name).ok())
}

/// [`resolve`] with an injectable environment lookup.
pub fn resolve_with<F>(explicit: Option<&str>, dir: &Path, env: F) -> Result<String, Error>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(path) = explicit {
        return Ok(path.to_string());
    }
    for name in REPO_URL_VARS {
        if let Some(url) = env(name).filter(|url| !url.is_empty()) {
            debug!("using repo_path from {}: {}", name, url);
            return Ok(url);
        }
    }
    let url = git_remote_url(dir).ok_or(Error::Provenance)?;
    debug!("using repo_path: {}", url);
    Ok(url)
}

/// URL of the first remote of the git repository at `dir`, if any.
///
/// A missing `git` binary or a directory outside any repository yields
/// `None`.
pub fn git_remote_url(dir: &Path) -> Option<String> {
    debug!("trying to find git remote for: {}", dir.display());
    let output = Command::new("git")
        .args(["config", "--local", "-l"])
        .current_dir(dir)
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    parse_git_remote(&String::from_utf8_lossy(&output.stdout))
}

/// First `remote.<name>.url=` value in `git config -l` output.
pub fn parse_git_remote(config: &str) -> Option<String> {
    let remote = Regex::new(r"^remote\.[^.]+\.url=(.+)").ok()?;
    config
        .lines()
        .find_map(|line| remote.captures(line).map(|caps| caps[1].to_string()))
}
