//! Pagination module
//!
//! Supports: Cursor, Page Number
//!
//! # Overview
//!
//! The listing API is paged either by an opaque cursor or by page number.
//! Both strategies implement [`Paginator`], so the fetcher never needs to
//! know which one is active.

mod strategies;
mod types;

pub use strategies::{CursorPaginator, PageNumberPaginator};
pub use types::{PageMetadata, PageToken, PaginationMode, PaginationState, Paginator};
