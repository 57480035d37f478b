//! Domain logic - pure rules independent of GitHub and process I/O

pub mod query;
pub mod record;
pub mod repo;
pub mod token;

pub use query::{QueryMode, QueryOptions, ReleaseFlags, SearchTerms};
pub use record::{Page, Release, TagRecord};
pub use repo::RepoSpec;
pub use token::{classify, is_hash, scan_hashes, Token};
