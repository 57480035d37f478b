use std::cell::RefCell;

use crate::domain::{Page, TagRecord};
use crate::error::{QueryTagsError, Result};
use crate::github::{PageRequest, TagSource};

/// Mock tag source serving canned pages without running `gh`
///
/// Page `i` is returned for cursor `None` (i = 0) or `Some("page-i")`.
/// Every requested cursor is recorded so tests can assert what was fetched.
pub struct MockTagSource {
    pages: Vec<Page>,
    fail_at: Option<usize>,
    requested: RefCell<Vec<Option<String>>>,
}

impl MockTagSource {
    /// Create a new mock with no pages
    pub fn new() -> Self {
        MockTagSource {
            pages: Vec::new(),
            fail_at: None,
            requested: RefCell::new(Vec::new()),
        }
    }

    /// Append a page; cursors are chained automatically.
    pub fn add_page(&mut self, records: Vec<TagRecord>) {
        let index = self.pages.len();
        if let Some(previous) = self.pages.last_mut() {
            previous.has_next_page = true;
            previous.end_cursor = Some(format!("page-{}", index));
        }
        self.pages.push(Page {
            has_next_page: false,
            end_cursor: None,
            records,
        });
    }

    /// Make the fetch of page `index` fail like a non-zero `gh` exit.
    pub fn fail_at(&mut self, index: usize) {
        self.fail_at = Some(index);
    }

    /// Cursors passed to `fetch_page`, in call order.
    pub fn requested(&self) -> Vec<Option<String>> {
        self.requested.borrow().clone()
    }

    fn index_of(cursor: Option<&str>) -> Result<usize> {
        match cursor {
            None => Ok(0),
            Some(cursor) => cursor
                .strip_prefix("page-")
                .and_then(|n| n.parse().ok())
                .ok_or_else(|| QueryTagsError::upstream(format!("unknown cursor {}", cursor))),
        }
    }
}

impl Default for MockTagSource {
    fn default() -> Self {
        Self::new()
    }
}

impl TagSource for MockTagSource {
    fn fetch_page(&self, _request: &PageRequest, cursor: Option<&str>) -> Result<Page> {
        self.requested
            .borrow_mut()
            .push(cursor.map(str::to_string));

        let index = Self::index_of(cursor)?;
        if self.fail_at == Some(index) {
            return Err(QueryTagsError::upstream("mock failure"));
        }

        Ok(self.pages.get(index).cloned().unwrap_or_default())
    }
}
