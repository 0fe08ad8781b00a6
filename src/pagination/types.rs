//! Pagination types and traits
//!
//! Defines the core pagination abstraction used by both strategies.

use super::strategies::{CursorPaginator, PageNumberPaginator};
use crate::types::JsonValue;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which pagination strategy the upstream API is driven with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum PaginationMode {
    /// Opaque `nextCursor` tokens
    #[default]
    Cursor,
    /// Page numbers bounded by `totalPages`
    Page,
}

impl PaginationMode {
    /// Build a fresh paginator for this mode with the upstream's parameter names
    pub fn paginator(self) -> Box<dyn Paginator> {
        match self {
            Self::Cursor => Box::new(CursorPaginator::new("cursor")),
            Self::Page => Box::new(PageNumberPaginator::new("page", 1)),
        }
    }
}

impl fmt::Display for PaginationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cursor => write!(f, "cursor"),
            Self::Page => write!(f, "page"),
        }
    }
}

/// Position token sent upstream with the next request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageToken {
    /// Opaque cursor string
    Cursor(String),
    /// One-based page number
    Page(u32),
}

impl fmt::Display for PageToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cursor(cursor) => write!(f, "cursor={cursor}"),
            Self::Page(page) => write!(f, "page={page}"),
        }
    }
}

/// Snapshot of a paginator's position
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaginationState {
    /// Cursor mode; `None` means start of stream
    Cursor {
        /// Cursor for the next request
        next_cursor: Option<String>,
    },
    /// Page-number mode
    PageNumber {
        /// Page requested next
        current_page: u32,
        /// Total reported by the last response, if any
        total_pages: Option<u32>,
        /// Cleared when the last page was reached
        more_pages: bool,
    },
}

/// The `metadata` object of a listing response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMetadata {
    /// Cursor for the following page; string or number depending on the API
    #[serde(default)]
    pub next_cursor: Option<JsonValue>,
    /// Number of pages available for the current query
    #[serde(default)]
    pub total_pages: Option<u32>,
}

impl PageMetadata {
    /// Metadata carrying a string cursor
    pub fn with_cursor(cursor: impl Into<String>) -> Self {
        Self {
            next_cursor: Some(JsonValue::String(cursor.into())),
            total_pages: None,
        }
    }

    /// Metadata carrying a page total
    pub fn with_total_pages(total_pages: u32) -> Self {
        Self {
            next_cursor: None,
            total_pages: Some(total_pages),
        }
    }

    /// The next cursor as an opaque string, if present and non-empty
    pub fn cursor(&self) -> Option<String> {
        match self.next_cursor.as_ref()? {
            JsonValue::String(s) if !s.is_empty() => Some(s.clone()),
            JsonValue::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }
}

/// Core trait for pagination strategies
///
/// A paginator owns its position. The fetcher asks it for query parameters,
/// feeds it the metadata of each successful response, and resets it on soft
/// failures.
pub trait Paginator: Send + Sync + fmt::Debug {
    /// Query parameters for the current position
    fn query_params(&self) -> Vec<(String, String)>;

    /// Update the position from response metadata.
    ///
    /// Returns the token for the next request, or `None` once the end of the
    /// stream was reached and the position wrapped to the start.
    fn advance(&mut self, metadata: Option<&PageMetadata>) -> Option<PageToken>;

    /// Whether the last advance reached the end of the stream
    fn is_exhausted(&self) -> bool;

    /// Return to the initial position
    fn reset(&mut self);

    /// Prepare for a new cycle after the stream was exhausted
    fn rearm(&mut self) {}

    /// Snapshot of the current position
    fn state(&self) -> PaginationState;
}
