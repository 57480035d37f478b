//! Page-by-page driver
//!
//! Pages arrive most recent first. In single mode the first page with a
//! match ends the run; with `--all` every page is visited. A failed fetch or
//! map stage ends the loop and leaves earlier output standing.

use std::io::Write;

use tracing::{debug, warn};

use crate::error::{QueryTagsError, Result};
use crate::filter::FilterPipeline;
use crate::github::{PageRequest, TagSource};
use crate::ui::formatter;

/// What happened during one run
#[derive(Debug, Default)]
pub struct Outcome {
    /// At least one page produced output
    pub found: bool,
    /// Number of fetch attempts, failed ones included
    pub pages: usize,
    /// The failure that ended the loop early, if any
    pub error: Option<QueryTagsError>,
}

/// Drive `source` until a match (single mode) or the last page (`--all`),
/// writing every non-empty page result to `out`.
///
/// Only errors writing to `out` are returned; upstream failures end the loop
/// and are reported in [Outcome::error].
pub fn paginate<S, W>(
    source: &S,
    request: &PageRequest,
    pipeline: &FilterPipeline,
    out: &mut W,
) -> Result<Outcome>
where
    S: TagSource,
    W: Write,
{
    let mut outcome = Outcome::default();
    let mut cursor: Option<String> = None;

    loop {
        outcome.pages += 1;

        let page = match source.fetch_page(request, cursor.as_deref()) {
            Ok(page) => page,
            Err(e) => {
                debug!(page = outcome.pages, "page fetch failed");
                outcome.error = Some(e);
                break;
            }
        };
        debug!(
            page = outcome.pages,
            records = page.records.len(),
            has_next_page = page.has_next_page,
            "fetched page"
        );

        let values = match pipeline.apply(&page.records) {
            Ok(values) => values,
            Err(e) => {
                debug!(page = outcome.pages, "filter stage failed");
                outcome.error = Some(e);
                break;
            }
        };

        if !values.is_empty() {
            formatter::write_values(out, &values)?;
            outcome.found = true;
            if !pipeline.is_all() {
                break;
            }
        }

        if !page.has_next_page {
            break;
        }

        match page.end_cursor {
            Some(next) => cursor = Some(next),
            None => {
                warn!("page claims more results but carries no cursor");
                break;
            }
        }
    }

    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Page, QueryMode, QueryOptions, RepoSpec, SearchTerms, TagRecord};
    use crate::github::MockTagSource;

    fn request() -> PageRequest {
        PageRequest::new(RepoSpec::new("o", "r"), QueryMode::TagRefs, 2)
    }

    fn pipeline(tokens: &[&str], all: bool) -> FilterPipeline {
        let options = QueryOptions {
            terms: SearchTerms::from_tokens(tokens.iter().copied()),
            all,
            ..Default::default()
        };
        FilterPipeline::new(&options, None).unwrap()
    }

    struct NoCursor;

    impl TagSource for NoCursor {
        fn fetch_page(&self, _request: &PageRequest, _cursor: Option<&str>) -> Result<Page> {
            Ok(Page {
                has_next_page: true,
                end_cursor: None,
                records: vec![],
            })
        }
    }

    #[test]
    fn test_stops_when_cursor_missing() {
        let mut out = Vec::new();
        let outcome = paginate(&NoCursor, &request(), &pipeline(&["x"], false), &mut out).unwrap();
        assert_eq!(outcome.pages, 1);
        assert!(!outcome.found);
        assert!(out.is_empty());
    }

    #[test]
    fn test_failure_keeps_found() {
        let mut source = MockTagSource::new();
        source.add_page(vec![TagRecord::new("v3", "ccccccc")]);
        source.add_page(vec![TagRecord::new("v2", "bbbbbbb")]);
        source.fail_at(1);

        let mut out = Vec::new();
        let outcome = paginate(&source, &request(), &pipeline(&[], true), &mut out).unwrap();
        assert!(outcome.found);
        assert!(outcome.error.is_some());
        assert_eq!(String::from_utf8(out).unwrap(), "v3\n");
    }
}
