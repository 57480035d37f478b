//! GitHub query abstraction layer
//!
//! This module provides a trait-based abstraction over the GraphQL queries
//! query-tags issues, allowing for multiple implementations including the
//! real `gh` CLI and mock implementations for testing.
//!
//! # Overview
//!
//! The primary abstraction is the [TagSource] trait, which returns one
//! decoded [Page] per call. The concrete implementations include:
//!
//! - [gh::GhCli]: runs `gh api graphql` and decodes its JSON output
//! - [mock::MockTagSource]: serves canned pages and records requested cursors
//!
//! Query documents and response decoding live in [graphql].
//!
//! ```rust
//! # use query_tags::github::{PageRequest, TagSource};
//! # fn example<S: TagSource>(source: &S, request: &PageRequest) -> query_tags::Result<()> {
//! let first = source.fetch_page(request, None)?;
//! if first.has_next_page {
//!     let _second = source.fetch_page(request, first.end_cursor.as_deref())?;
//! }
//! # Ok(())
//! # }
//! ```

pub mod gh;
pub mod graphql;
pub mod mock;

pub use gh::GhCli;
pub use mock::MockTagSource;

use crate::domain::{Page, QueryMode, RepoSpec};
use crate::error::Result;

/// Parameters that stay constant across every page of one run
#[derive(Debug, Clone, PartialEq)]
pub struct PageRequest {
    pub repo: RepoSpec,
    pub mode: QueryMode,
    pub page_size: u32,
}

impl PageRequest {
    pub fn new(repo: RepoSpec, mode: QueryMode, page_size: u32) -> Self {
        PageRequest {
            repo,
            mode,
            page_size,
        }
    }

    /// The GraphQL document for this request's mode.
    pub fn document(&self) -> String {
        graphql::document(self.mode, self.page_size)
    }
}

/// Source of paginated tag records, most recent first
///
/// ## Error Handling
///
/// Implementations report transport, authentication and decoding failures as
/// [crate::error::QueryTagsError]; the pagination driver treats any error as
/// the end of the result stream.
pub trait TagSource {
    /// Fetch the page following `cursor` (`None` for the first page).
    fn fetch_page(&self, request: &PageRequest, cursor: Option<&str>) -> Result<Page>;
}
