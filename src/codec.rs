//! JSON encoding of request bodies and decoding of response bodies.

use log::warn;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{Error, Result};

/// Serializes a request body to JSON.
pub fn encode<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>> {
    serde_json::to_vec(value).map_err(Error::Encode)
}

/// Deserializes a successful response body.
///
/// `path` is the request path and only serves to tell the failing endpoint apart.
pub fn decode<T: DeserializeOwned>(bytes: &[u8], path: &str) -> Result<T> {
    serde_json::from_slice(bytes).map_err(|source| {
        warn!(
            "Failed to decode response from {} ({} bytes): {}",
            path,
            bytes.len(),
            source
        );
        Error::Decode {
            path: path.to_string(),
            source,
        }
    })
}
