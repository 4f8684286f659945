//! Deserialize caller documents that embed [`crate::SchemaNode`]s, with the
//! document path of any failure attached.
use serde::de::DeserializeOwned;

use crate::error::{Result, SchemaError};

/// Deserialize with JSON-path context in error messages.
pub fn from_str_with_path<T: DeserializeOwned>(src: &str) -> Result<T> {
    let mut de = serde_json::Deserializer::from_str(src);
    let value = serde_path_to_error::deserialize::<_, T>(&mut de).map_err(|err| {
        let path = err.path().to_string();
        SchemaError::Document { path, source: err.into_inner() }
    })?;
    de.end()?;
    Ok(value)
}

/// Same as [`from_str_with_path`], after a UTF-8 check on `bytes`.
pub fn from_slice_with_path<T: DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    let src = std::str::from_utf8(bytes)?;
    from_str_with_path(src)
}
