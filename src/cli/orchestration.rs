//! Main workflow orchestration logic
//!
//! Turns parsed options into a page request and filter pipeline, then drives
//! pagination against a [TagSource]. `run` wires in the real `gh` and `jq`
//! executables; `execute` takes any source and writer so it can be tested.

use std::io::Write;

use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use crate::config::{self, Config};
use crate::domain::{QueryOptions, RepoSpec};
use crate::filter::FilterPipeline;
use crate::git;
use crate::github::{GhCli, PageRequest, TagSource};
use crate::jq::{JqCommand, MapStage};
use crate::pagination::{self, Outcome};

use super::Args;

/// Pick the repository to query.
///
/// The configured default is replaced by the detected `origin` remote (if
/// any), then `--repo` is applied on top.
pub fn resolve_repo(config: &Config, detected: Option<RepoSpec>, flag: Option<&str>) -> RepoSpec {
    let base = detected.unwrap_or_else(|| {
        RepoSpec::new(
            config.repository.owner.clone(),
            config.repository.name.clone(),
        )
    });

    match flag {
        Some(value) => base.with_override(value),
        None => base,
    }
}

/// Build the constant per-run inputs and paginate.
pub fn execute<S, W>(
    options: &QueryOptions,
    request: &PageRequest,
    map_stage: Option<Box<dyn MapStage>>,
    source: &S,
    out: &mut W,
) -> crate::Result<Outcome>
where
    S: TagSource,
    W: Write,
{
    let pipeline = FilterPipeline::new(options, map_stage)?;
    pagination::paginate(source, request, &pipeline, out)
}

/// Full workflow for the binary
///
/// # Arguments
///
/// * `args` - Parsed command line
/// * `piped` - Everything read from stdin, `None` when stdin is a terminal
///
/// # Returns
///
/// `Ok(true)` when at least one match was printed
pub fn run(args: Args, piped: Option<&str>) -> Result<bool> {
    let config_path = args.config.clone();
    let options = args.into_options(piped)?;
    let config = config::load_config(config_path.as_deref()).context("Error loading config")?;

    let detected = if config.repository.use_git_remote {
        let cwd = std::env::current_dir().context("Cannot determine current directory")?;
        git::origin_repo(cwd).context("Cannot inspect git remote")?
    } else {
        None
    };

    let repo = resolve_repo(&config, detected, options.repo.as_deref());
    let request = PageRequest::new(repo, options.mode(), config.query.effective_page_size());
    info!(repo = %request.repo, mode = ?request.mode, "querying");
    debug!(?options, "resolved options");

    let map_stage: Option<Box<dyn MapStage>> = options.jq.as_ref().map(|expr| {
        Box::new(JqCommand::new(config.tools.jq.clone(), expr.clone())) as Box<dyn MapStage>
    });

    let source = GhCli::from_config(&config);
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    let outcome = execute(&options, &request, map_stage, &source, &mut out)?;
    if let Some(e) = &outcome.error {
        warn!(pages = outcome.pages, "stopped early: {}", e);
    }
    debug!(pages = outcome.pages, found = outcome.found, "finished");

    Ok(outcome.found)
}
