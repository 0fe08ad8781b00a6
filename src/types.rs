//! Common types used throughout image-relay
//!
//! Shared definitions used by more than one module.

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// A single image URL as returned by the upstream API
pub type ImageUrl = String;
