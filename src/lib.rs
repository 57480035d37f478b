pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod filter;
pub mod git;
pub mod github;
pub mod jq;
pub mod pagination;
pub mod ui;

pub use error::{QueryTagsError, Result};
