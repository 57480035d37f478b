use std::fmt;

/// GitHub repository coordinates (`owner/name`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoSpec {
    pub owner: String,
    pub name: String,
}

impl RepoSpec {
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        RepoSpec {
            owner: owner.into(),
            name: name.into(),
        }
    }

    /// Apply a `--repo` value: `OWNER/REPO` replaces both parts (split at the
    /// first `/`), a bare `REPO` keeps the current owner.
    pub fn with_override(&self, value: &str) -> Self {
        match value.split_once('/') {
            Some((owner, name)) => RepoSpec::new(owner, name),
            None => RepoSpec::new(self.owner.clone(), value),
        }
    }

    /// Parse a git remote URL pointing at github.com.
    ///
    /// Accepts `git@github.com:owner/repo.git`, `ssh://git@github.com/owner/repo`
    /// and `https://github.com/owner/repo(.git)`.
    pub fn from_remote_url(url: &str) -> Option<Self> {
        let path = url
            .strip_prefix("git@github.com:")
            .or_else(|| url.strip_prefix("ssh://git@github.com/"))
            .or_else(|| url.strip_prefix("https://github.com/"))
            .or_else(|| url.strip_prefix("http://github.com/"))?;

        let path = path.trim_end_matches('/');
        let path = path.strip_suffix(".git").unwrap_or(path);
        let (owner, name) = path.split_once('/')?;

        if owner.is_empty() || name.is_empty() || name.contains('/') {
            return None;
        }

        Some(RepoSpec::new(owner, name))
    }
}

impl fmt::Display for RepoSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}
