//! Forward module
//!
//! Hands a selected image URL to the downstream receiver.

mod forwarder;

pub use forwarder::{Forwarder, DEFAULT_URL_PARAM};
