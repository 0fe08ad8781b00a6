//! State module
//!
//! In-memory relay state that lives for the process lifetime. Nothing here
//! is persisted; a restart begins with an empty set and a fresh paginator.
//!
//! # Overview
//!
//! - `SeenSet` - bounded set of URLs already forwarded downstream
//! - `EvictionPolicy` - clear-all or oldest-first eviction

mod seen;

pub use seen::{EvictionPolicy, SeenSet, DEFAULT_SEEN_THRESHOLD};
