//! Local git checkout inspection
//!
//! Used to derive a default repository from the `origin` remote when
//! `repository.use_git_remote` is enabled.

use std::path::Path;

use git2::{ErrorCode, Repository};
use tracing::debug;

use crate::domain::RepoSpec;
use crate::error::Result;

/// GitHub coordinates of the `origin` remote of the checkout containing `path`.
///
/// # Returns
/// * `Ok(Some(RepoSpec))` - `origin` exists and points at github.com
/// * `Ok(None)` - not inside a repository, no `origin`, or a non-GitHub URL
/// * `Err` - any other git error
pub fn origin_repo<P: AsRef<Path>>(path: P) -> Result<Option<RepoSpec>> {
    let repo = match Repository::discover(path) {
        Ok(repo) => repo,
        Err(e) if e.code() == ErrorCode::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };

    let remote = match repo.find_remote("origin") {
        Ok(remote) => remote,
        Err(e) if e.code() == ErrorCode::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };

    let spec = remote.url().and_then(RepoSpec::from_remote_url);
    debug!(url = ?remote.url(), ?spec, "inspected origin remote");
    Ok(spec)
}
