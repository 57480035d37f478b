use std::collections::BTreeSet;

use super::token::{classify, Token};

/// Which GraphQL connection is queried
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryMode {
    TagRefs,
    Releases,
}

/// Refinements that only make sense against releases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReleaseFlags {
    pub exclude_prerelease: bool,
    pub include_draft: bool,
}

impl ReleaseFlags {
    pub fn any(&self) -> bool {
        self.exclude_prerelease || self.include_draft
    }
}

/// Hashes and patterns collected from argv and stdin
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchTerms {
    pub hashes: BTreeSet<String>,
    pub patterns: Vec<String>,
}

impl SearchTerms {
    /// Classify positional tokens into hashes and patterns.
    pub fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut terms = SearchTerms::default();
        for token in tokens {
            match classify(token.as_ref()) {
                Some(Token::Hash(hash)) => {
                    terms.hashes.insert(hash);
                }
                Some(Token::Pattern(pattern)) => terms.patterns.push(pattern),
                None => {}
            }
        }
        terms
    }

    /// Union in hashes found elsewhere (stdin).
    pub fn add_hashes<I: IntoIterator<Item = String>>(&mut self, hashes: I) {
        self.hashes.extend(hashes);
    }

    pub fn is_empty(&self) -> bool {
        self.hashes.is_empty() && self.patterns.is_empty()
    }
}

/// Everything one invocation needs to know, fixed before the first request
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QueryOptions {
    pub terms: SearchTerms,
    pub use_release: bool,
    pub release: ReleaseFlags,
    pub json: bool,
    pub jq: Option<String>,
    pub all: bool,
    pub repo: Option<String>,
}

impl QueryOptions {
    /// Release-refining flags imply Releases mode.
    pub fn mode(&self) -> QueryMode {
        if self.use_release || self.release.any() {
            QueryMode::Releases
        } else {
            QueryMode::TagRefs
        }
    }

    /// `--jq` implies JSON output.
    pub fn json_output(&self) -> bool {
        self.json || self.jq.is_some()
    }
}
