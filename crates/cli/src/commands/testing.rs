//! Shared StorageClient mock for command tests

use async_trait::async_trait;

use fds_core::{
    AccessControlList, BucketSummary, MultipartUpload, ObjectBody, ObjectListing, ObjectMetadata,
    PutPayload, Result, StorageClient, UploadPartResult,
};

mockall::mock! {
    pub Client {}

    #[async_trait]
    impl StorageClient for Client {
        async fn list_buckets(&self) -> Result<Vec<BucketSummary>>;
        async fn create_bucket(&self, bucket: &str) -> Result<()>;
        async fn delete_bucket(&self, bucket: &str) -> Result<()>;
        async fn bucket_exists(&self, bucket: &str) -> Result<bool>;
        async fn get_bucket_acl(&self, bucket: &str) -> Result<AccessControlList>;
        #[mockall::concretize]
        async fn list_objects(
            &self,
            bucket: &str,
            prefix: &str,
            delimiter: Option<&str>,
            start_after: Option<&str>,
        ) -> Result<ObjectListing>;
        async fn list_next_batch(&self, listing: &ObjectListing) -> Result<ObjectListing>;
        #[mockall::concretize]
        async fn put_object(
            &self,
            bucket: &str,
            object: &str,
            payload: PutPayload,
            metadata: Option<&ObjectMetadata>,
        ) -> Result<()>;
        #[mockall::concretize]
        async fn post_object(
            &self,
            bucket: &str,
            payload: PutPayload,
            metadata: Option<&ObjectMetadata>,
        ) -> Result<String>;
        async fn get_object(&self, bucket: &str, object: &str, offset: u64) -> Result<ObjectBody>;
        async fn delete_object(&self, bucket: &str, object: &str) -> Result<()>;
        async fn object_exists(&self, bucket: &str, object: &str) -> Result<bool>;
        #[mockall::concretize]
        async fn init_multipart_upload(
            &self,
            bucket: &str,
            object: &str,
            metadata: Option<&ObjectMetadata>,
        ) -> Result<MultipartUpload>;
        async fn upload_part(
            &self,
            upload: &MultipartUpload,
            part_number: i32,
            data: Vec<u8>,
        ) -> Result<UploadPartResult>;
        async fn complete_multipart_upload(
            &self,
            upload: &MultipartUpload,
            parts: Vec<UploadPartResult>,
        ) -> Result<()>;
        async fn abort_multipart_upload(&self, upload: &MultipartUpload) -> Result<()>;
    }
}

/// A multipart upload handle for tests
pub fn test_upload() -> MultipartUpload {
    MultipartUpload {
        bucket: "bucket-a".into(),
        object: "key".into(),
        upload_id: "upload-1".into(),
    }
}
