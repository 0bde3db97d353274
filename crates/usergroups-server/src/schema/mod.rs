//! API schema types for request/response definitions.
//!
//! Each sub-module defines the wire shapes for one resource. Request types
//! are lenient in the way the API has always been: missing or `null` fields
//! decode as empty values, and unknown fields are ignored.

pub mod groups;
pub mod users;

use serde::de::DeserializeOwned;

/// Decodes a JSON request body, treating a literal `null` as `T::default()`.
pub fn decode_body<T>(bytes: &[u8]) -> Result<T, serde_json::Error>
where
    T: DeserializeOwned + Default,
{
    let decoded: Option<T> = serde_json::from_slice(bytes)?;
    Ok(decoded.unwrap_or_default())
}
