//! Pagination strategy implementations
//!
//! Each strategy handles a specific pagination pattern. Both wrap around to
//! their initial position when the end of the stream is reached, so polling
//! continues indefinitely.

use super::types::{PageMetadata, PageToken, PaginationState, Paginator};
use tracing::{debug, info};

// ============================================================================
// Cursor Pagination
// ============================================================================

/// Cursor-based pagination
///
/// Sends `?cursor=<token>` once the API has handed out a `nextCursor`.
/// A missing cursor means the stream ended and the next request starts over.
#[derive(Debug, Clone)]
pub struct CursorPaginator {
    /// Query parameter name for cursor
    pub cursor_param: String,
    next_cursor: Option<String>,
}

impl CursorPaginator {
    /// Create a new cursor paginator
    pub fn new(cursor_param: impl Into<String>) -> Self {
        Self {
            cursor_param: cursor_param.into(),
            next_cursor: None,
        }
    }

    /// Cursor that will be sent with the next request
    pub fn cursor(&self) -> Option<&str> {
        self.next_cursor.as_deref()
    }
}

impl Paginator for CursorPaginator {
    fn query_params(&self) -> Vec<(String, String)> {
        match &self.next_cursor {
            Some(cursor) => vec![(self.cursor_param.clone(), cursor.clone())],
            None => Vec::new(),
        }
    }

    fn advance(&mut self, metadata: Option<&PageMetadata>) -> Option<PageToken> {
        match metadata.and_then(PageMetadata::cursor) {
            Some(cursor) => {
                debug!(cursor = %cursor, "Next cursor");
                self.next_cursor = Some(cursor.clone());
                Some(PageToken::Cursor(cursor))
            }
            None => {
                info!("No next cursor found, resetting to beginning");
                self.next_cursor = None;
                None
            }
        }
    }

    fn is_exhausted(&self) -> bool {
        self.next_cursor.is_none()
    }

    fn reset(&mut self) {
        self.next_cursor = None;
    }

    fn state(&self) -> PaginationState {
        PaginationState::Cursor {
            next_cursor: self.next_cursor.clone(),
        }
    }
}

// ============================================================================
// Page Number Pagination
// ============================================================================

/// Page number pagination
///
/// Sends `?page=<n>` and wraps to the start page once the response reports
/// that the current page is the last one.
#[derive(Debug, Clone)]
pub struct PageNumberPaginator {
    /// Query parameter name for page number
    pub page_param: String,
    /// First page number (usually 1)
    pub start_page: u32,
    current_page: u32,
    total_pages: Option<u32>,
    more_pages: bool,
}

impl PageNumberPaginator {
    /// Create a new page number paginator
    pub fn new(page_param: impl Into<String>, start_page: u32) -> Self {
        Self {
            page_param: page_param.into(),
            start_page,
            current_page: start_page,
            total_pages: None,
            more_pages: true,
        }
    }

    /// Start from an arbitrary page
    #[must_use]
    pub fn at_page(mut self, page: u32) -> Self {
        self.current_page = page;
        self
    }

    /// Page that will be requested next
    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    /// Whether the stream has pages left before wrapping
    pub fn more_pages(&self) -> bool {
        self.more_pages
    }

    fn wrap(&mut self) {
        self.current_page = self.start_page;
        self.more_pages = false;
    }
}

impl Paginator for PageNumberPaginator {
    fn query_params(&self) -> Vec<(String, String)> {
        vec![(self.page_param.clone(), self.current_page.to_string())]
    }

    fn advance(&mut self, metadata: Option<&PageMetadata>) -> Option<PageToken> {
        if let Some(total) = metadata.and_then(|m| m.total_pages) {
            self.total_pages = Some(total);
            if self.current_page >= total {
                info!(
                    page = self.current_page,
                    total_pages = total,
                    "Reached last page, wrapping to page {}",
                    self.start_page
                );
                self.wrap();
                return None;
            }
        }

        self.current_page = self.current_page.saturating_add(1);
        self.more_pages = true;
        debug!(page = self.current_page, "Next page");
        Some(PageToken::Page(self.current_page))
    }

    fn is_exhausted(&self) -> bool {
        !self.more_pages
    }

    fn reset(&mut self) {
        self.total_pages = None;
        self.wrap();
    }

    fn rearm(&mut self) {
        if !self.more_pages {
            debug!("Re-arming page pagination from page {}", self.current_page);
            self.more_pages = true;
        }
    }

    fn state(&self) -> PaginationState {
        PaginationState::PageNumber {
            current_page: self.current_page,
            total_pages: self.total_pages,
            more_pages: self.more_pages,
        }
    }
}
