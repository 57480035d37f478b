//! Command-line surface
//!
//! Argument parsing is kept separate from the query workflow in
//! [orchestration] so the workflow can run without clap.

pub mod orchestration;

use std::ffi::OsString;

use clap::error::{ContextKind, ContextValue, ErrorKind};
use clap::Parser;

use crate::domain::{scan_hashes, QueryOptions, ReleaseFlags, SearchTerms};
use crate::error::{QueryTagsError, Result};

#[derive(clap::Parser, Debug, Clone, PartialEq)]
#[command(
    name = "query-tags",
    version,
    about = "Find the GitHub tags or releases matching commit hashes or patterns",
    after_help = "Tokens of 7 or more lowercase hex digits are matched as commit hash prefixes; \
                  anything else is a regular expression tested against tag and release text. \
                  Hashes are also read from piped stdin."
)]
pub struct Args {
    #[arg(value_name = "HASH|PATTERN", help = "Commit hash prefixes or patterns to look for")]
    pub tokens: Vec<String>,

    #[arg(short = 'A', long, help = "Print every match, most recent first")]
    pub all: bool,

    #[arg(long, help = "Skip pre-releases (implies --use-release)")]
    pub exclude_pre_release: bool,

    #[arg(long, help = "Consider draft releases (implies --use-release)")]
    pub include_draft: bool,

    #[arg(
        long,
        value_name = "EXPRESSION",
        help = "Map each match through a jq expression (implies --json)"
    )]
    pub jq: Option<String>,

    #[arg(long, help = "Print matches as JSON objects")]
    pub json: bool,

    #[arg(
        short = 'R',
        long,
        value_name = "[OWNER/]REPO",
        help = "Repository to query"
    )]
    pub repo: Option<String>,

    #[arg(long, help = "Query releases instead of tag refs")]
    pub use_release: bool,

    #[arg(long, value_name = "PATH", help = "Custom configuration file path")]
    pub config: Option<String>,
}

/// Result of reading the command line
#[derive(Debug)]
pub enum Parsed {
    /// Proceed with the query
    Run(Args),
    /// `--help` or `--version`: print this text and exit successfully
    Info(String),
}

/// Parse argv (program name first).
///
/// Help and version requests short-circuit everything else. Unrecognized
/// flags, and positional tokens starting with `-`, become
/// [QueryTagsError::UnknownOption].
pub fn parse_from<I, T>(argv: I) -> Result<Parsed>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    match Args::try_parse_from(argv) {
        Ok(args) => match args.tokens.iter().find(|token| token.starts_with('-')) {
            // A lone `-` (or anything after `--`) still looks like a flag
            Some(flag) => Err(QueryTagsError::UnknownOption(flag.clone())),
            None => Ok(Parsed::Run(args)),
        },
        Err(err) => match err.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                Ok(Parsed::Info(err.render().to_string()))
            }
            ErrorKind::UnknownArgument => {
                let option = match err.get(ContextKind::InvalidArg) {
                    Some(ContextValue::String(arg)) => arg.clone(),
                    _ => "(unrecognized)".to_string(),
                };
                Err(QueryTagsError::UnknownOption(option))
            }
            _ => Err(QueryTagsError::Usage(err.render().to_string().trim().to_string())),
        },
    }
}

impl Args {
    /// Build the immutable run options, merging hashes found in piped stdin.
    ///
    /// `piped` is `None` when stdin is a terminal. Piped input that yields no
    /// hash, combined with no positional tokens, is a usage error.
    pub fn into_options(self, piped: Option<&str>) -> Result<QueryOptions> {
        let mut terms = SearchTerms::from_tokens(&self.tokens);
        if let Some(text) = piped {
            terms.add_hashes(scan_hashes(text));
            if terms.is_empty() {
                return Err(QueryTagsError::NoInput);
            }
        }

        Ok(QueryOptions {
            terms,
            use_release: self.use_release,
            release: ReleaseFlags {
                exclude_prerelease: self.exclude_pre_release,
                include_draft: self.include_draft,
            },
            json: self.json,
            jq: self.jq,
            all: self.all,
            repo: self.repo,
        })
    }
}
