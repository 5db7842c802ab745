//! StorageClient trait definition
//!
//! The interface the CLI assumes of the service SDK. It decouples command
//! logic from the concrete S3 adapter and lets tests drive the listing and
//! upload loops against a mock.

use async_trait::async_trait;
use tokio::io::AsyncRead;

use crate::error::Result;
use crate::metadata::ObjectMetadata;
use crate::types::{
    AccessControlList, BucketSummary, MultipartUpload, ObjectListing, PutPayload, UploadPartResult,
};

/// Streaming body of a downloaded object
pub type ObjectBody = Box<dyn AsyncRead + Send + Unpin>;

/// Operations the storage service SDK provides
#[async_trait]
pub trait StorageClient: Send + Sync {
    /// List all buckets owned by the caller
    async fn list_buckets(&self) -> Result<Vec<BucketSummary>>;

    /// Create a bucket
    async fn create_bucket(&self, bucket: &str) -> Result<()>;

    /// Delete a bucket
    async fn delete_bucket(&self, bucket: &str) -> Result<()>;

    /// Check whether a bucket exists
    async fn bucket_exists(&self, bucket: &str) -> Result<bool>;

    /// Fetch the access control list of a bucket
    async fn get_bucket_acl(&self, bucket: &str) -> Result<AccessControlList>;

    /// Fetch one page of an object listing
    ///
    /// `start_after` skips names lexicographically at or before the mark.
    async fn list_objects(
        &self,
        bucket: &str,
        prefix: &str,
        delimiter: Option<&str>,
        start_after: Option<&str>,
    ) -> Result<ObjectListing>;

    /// Fetch the page following a truncated listing
    async fn list_next_batch(&self, listing: &ObjectListing) -> Result<ObjectListing>;

    /// Upload an object in one request
    async fn put_object(
        &self,
        bucket: &str,
        object: &str,
        payload: PutPayload,
        metadata: Option<&ObjectMetadata>,
    ) -> Result<()>;

    /// Upload an object under a generated name, returning the name
    async fn post_object(
        &self,
        bucket: &str,
        payload: PutPayload,
        metadata: Option<&ObjectMetadata>,
    ) -> Result<String>;

    /// Open an object for reading, starting at the given byte offset
    async fn get_object(&self, bucket: &str, object: &str, offset: u64) -> Result<ObjectBody>;

    /// Delete an object
    async fn delete_object(&self, bucket: &str, object: &str) -> Result<()>;

    /// Check whether an object exists
    async fn object_exists(&self, bucket: &str, object: &str) -> Result<bool>;

    /// Start a multipart upload
    async fn init_multipart_upload(
        &self,
        bucket: &str,
        object: &str,
        metadata: Option<&ObjectMetadata>,
    ) -> Result<MultipartUpload>;

    /// Upload one part; part numbers are sequential starting at 1
    async fn upload_part(
        &self,
        upload: &MultipartUpload,
        part_number: i32,
        data: Vec<u8>,
    ) -> Result<UploadPartResult>;

    /// Finish a multipart upload from the collected part results
    async fn complete_multipart_upload(
        &self,
        upload: &MultipartUpload,
        parts: Vec<UploadPartResult>,
    ) -> Result<()>;

    /// Abandon a multipart upload, discarding uploaded parts
    async fn abort_multipart_upload(&self, upload: &MultipartUpload) -> Result<()>;
}
