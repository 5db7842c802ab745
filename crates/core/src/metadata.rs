//! Object metadata model
//!
//! Metadata arrives on the command line as a single string of
//! semicolon-separated `key:value` pairs. Keys carrying the user-defined
//! prefix become user metadata; every other key must be a supported
//! protocol header.

use std::collections::BTreeMap;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Prefix marking a key as user-defined metadata
pub const USER_METADATA_PREFIX: &str = "x-xiaomi-meta-";

/// Protocol headers accepted as metadata keys
const PREDEFINED_HEADERS: &[&str] = &[
    "cache-control",
    "content-encoding",
    "content-md5",
    "content-type",
    "content-disposition",
    "content-language",
];

/// Metadata attached to an uploaded object
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObjectMetadata {
    headers: BTreeMap<String, String>,
    user: BTreeMap<String, String>,
}

impl ObjectMetadata {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a protocol header; the key must be one of the supported headers
    pub fn add_header(&mut self, key: &str, value: &str) -> Result<()> {
        let key = key.to_ascii_lowercase();
        if !PREDEFINED_HEADERS.contains(&key.as_str()) {
            return Err(Error::Metadata(format!("unsupported header key: {key}")));
        }
        self.headers.insert(key, value.to_string());
        Ok(())
    }

    /// Add a user-defined metadata entry; the key must carry the prefix
    pub fn add_user_metadata(&mut self, key: &str, value: &str) -> Result<()> {
        let key = key.to_ascii_lowercase();
        if !key.starts_with(USER_METADATA_PREFIX) {
            return Err(Error::Metadata(format!(
                "user metadata key must start with {USER_METADATA_PREFIX}: {key}"
            )));
        }
        self.user.insert(key, value.to_string());
        Ok(())
    }

    /// Protocol headers, keyed by lowercase header name
    pub fn headers(&self) -> impl Iterator<Item = (&str, &str)> {
        self.headers.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// User metadata entries, keys still carrying the prefix
    pub fn user_metadata(&self) -> impl Iterator<Item = (&str, &str)> {
        self.user.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn content_type(&self) -> Option<&str> {
        self.headers.get("content-type").map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.headers.is_empty() && self.user.is_empty()
    }
}

impl FromStr for ObjectMetadata {
    type Err = Error;

    /// Parse `"content-type:text/json;x-xiaomi-meta-foo:bar"`
    ///
    /// Empty segments and pairs with an empty key or value are skipped;
    /// a segment without a colon is rejected.
    fn from_str(s: &str) -> Result<Self> {
        let mut metadata = Self::new();
        for pair in s.split(';') {
            if pair.is_empty() {
                continue;
            }
            let (key, value) = pair
                .split_once(':')
                .ok_or_else(|| Error::Metadata(format!("expected key:value, got: {pair}")))?;
            if key.is_empty() || value.is_empty() {
                continue;
            }
            if key.to_ascii_lowercase().starts_with(USER_METADATA_PREFIX) {
                metadata.add_user_metadata(key, value)?;
            } else {
                metadata.add_header(key, value)?;
            }
        }
        Ok(metadata)
    }
}
