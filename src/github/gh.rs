use std::process::{Command, Stdio};

use tracing::debug;

use crate::config::Config;
use crate::domain::Page;
use crate::error::{QueryTagsError, Result};
use crate::github::{graphql, PageRequest, TagSource};

/// Runs queries through `gh api graphql`
///
/// `gh` owns authentication, transport and the response cache. Its stderr is
/// inherited so authentication and rate-limit messages reach the user.
#[derive(Debug, Clone)]
pub struct GhCli {
    program: String,
    cache: String,
}

impl GhCli {
    pub fn new(program: impl Into<String>, cache: impl Into<String>) -> Self {
        GhCli {
            program: program.into(),
            cache: cache.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        GhCli::new(config.tools.gh.clone(), config.query.cache.clone())
    }

    /// Arguments passed to `gh` for one page.
    pub fn args(&self, request: &PageRequest, cursor: Option<&str>) -> Vec<String> {
        let mut args = vec!["api".to_string(), "graphql".to_string()];
        if !self.cache.is_empty() {
            args.push("--cache".to_string());
            args.push(self.cache.clone());
        }
        args.push("-f".to_string());
        args.push(format!("query={}", request.document()));
        args.push("-f".to_string());
        args.push(format!("owner={}", request.repo.owner));
        args.push("-f".to_string());
        args.push(format!("name={}", request.repo.name));
        if let Some(cursor) = cursor {
            args.push("-f".to_string());
            args.push(format!("endCursor={}", cursor));
        }
        args
    }
}

impl TagSource for GhCli {
    fn fetch_page(&self, request: &PageRequest, cursor: Option<&str>) -> Result<Page> {
        debug!(repo = %request.repo, ?cursor, "querying page via {}", self.program);

        let output = Command::new(&self.program)
            .args(self.args(request, cursor))
            .stdin(Stdio::null())
            .stderr(Stdio::inherit())
            .output()
            .map_err(|e| {
                QueryTagsError::upstream(format!("failed to run {}: {}", self.program, e))
            })?;

        if !output.status.success() {
            return Err(QueryTagsError::upstream(format!(
                "{} exited with code {}",
                self.program,
                output.status.code().unwrap_or(-1)
            )));
        }

        let body = String::from_utf8_lossy(&output.stdout);
        graphql::decode_page(request.mode, &body)
    }
}
