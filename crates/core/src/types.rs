//! Data types exchanged with the storage client
//!
//! These mirror the shapes the service SDK works in: listings with
//! truncation state, multipart upload handles, and ACL grants.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// A bucket as returned by a bucket listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BucketSummary {
    pub name: String,
}

impl BucketSummary {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// An object as returned by an object listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectSummary {
    pub name: String,
    pub size: i64,
}

impl ObjectSummary {
    pub fn new(name: impl Into<String>, size: i64) -> Self {
        Self {
            name: name.into(),
            size,
        }
    }
}

/// One page of an object listing
///
/// Carries enough request state (bucket, prefix, delimiter, token) for the
/// client to fetch the next page while the truncation flag is set.
#[derive(Debug, Clone, Default)]
pub struct ObjectListing {
    pub bucket: String,
    pub prefix: String,
    pub delimiter: Option<String>,
    pub objects: Vec<ObjectSummary>,
    pub common_prefixes: Vec<String>,
    pub truncated: bool,
    pub next_token: Option<String>,
}

/// Payload for an upload operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PutPayload {
    /// Stream the named file from disk
    File(PathBuf),
    /// Upload the given bytes
    Bytes(Vec<u8>),
}

/// Handle for an in-flight multipart upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultipartUpload {
    pub bucket: String,
    pub object: String,
    pub upload_id: String,
}

/// Result of uploading a single part
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadPartResult {
    pub part_number: i32,
    pub etag: String,
}

/// A single ACL grant on a bucket
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grant {
    pub grantee_id: String,
    pub grantee_type: String,
    pub permission: String,
}

/// Access control list of a bucket
#[derive(Debug, Clone, Default)]
pub struct AccessControlList {
    pub grants: Vec<Grant>,
}
