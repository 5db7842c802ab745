//! FDS client implementation
//!
//! Wraps aws-sdk-s3 and implements the StorageClient trait from fds-core.
//! FDS speaks the S3 protocol with path-style addressing.

use async_trait::async_trait;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::operation::create_multipart_upload::builders::CreateMultipartUploadFluentBuilder;
use aws_sdk_s3::operation::list_objects_v2::ListObjectsV2Output;
use aws_sdk_s3::operation::put_object::builders::PutObjectFluentBuilder;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::{CompletedMultipartUpload, CompletedPart};

use fds_core::{
    AccessControlList, BucketSummary, ClientConfig, Error, Grant, MultipartUpload, ObjectBody,
    ObjectListing, ObjectMetadata, ObjectSummary, PutPayload, Result, StorageClient,
    UploadPartResult, USER_METADATA_PREFIX,
};

/// Storage client backed by aws-sdk-s3
pub struct FdsClient {
    inner: aws_sdk_s3::Client,
}

impl FdsClient {
    /// Create a client from a resolved configuration
    ///
    /// Fails when credentials are missing; everything else is deferred to
    /// the first request.
    pub async fn new(config: &ClientConfig) -> Result<Self> {
        let access_key = config
            .access_key
            .clone()
            .ok_or_else(|| Error::Config("access key not set (use --ak or the config file)".into()))?;
        let secret_key = config
            .secret_key
            .clone()
            .ok_or_else(|| Error::Config("secret key not set (use --sk or the config file)".into()))?;
        let endpoint = config.endpoint_url()?;

        let credentials = aws_credential_types::Credentials::new(
            access_key, secret_key, None, // session token
            None, // expiry
            "fds-static-credentials",
        );

        let sdk_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .credentials_provider(credentials)
            .region(aws_config::Region::new(config.region.clone()))
            .endpoint_url(endpoint.as_str())
            .load()
            .await;

        // FDS buckets live in the URL path, not the host name
        let s3_config = aws_sdk_s3::config::Builder::from(&sdk_config)
            .force_path_style(true)
            .build();

        Ok(Self {
            inner: aws_sdk_s3::Client::from_conf(s3_config),
        })
    }
}

async fn payload_stream(payload: PutPayload) -> Result<ByteStream> {
    match payload {
        PutPayload::File(path) => ByteStream::from_path(&path)
            .await
            .map_err(|e| Error::Io(std::io::Error::other(e))),
        PutPayload::Bytes(bytes) => Ok(ByteStream::from(bytes)),
    }
}

fn service_error(op: &str, err: impl std::error::Error + Send + Sync + 'static) -> Error {
    Error::Service(format!("{op}: {}", DisplayErrorContext(err)))
}

fn apply_put_metadata(
    mut request: PutObjectFluentBuilder,
    metadata: Option<&ObjectMetadata>,
) -> PutObjectFluentBuilder {
    let Some(metadata) = metadata else {
        return request;
    };
    for (key, value) in metadata.headers() {
        request = match key {
            "cache-control" => request.cache_control(value),
            "content-disposition" => request.content_disposition(value),
            "content-encoding" => request.content_encoding(value),
            "content-language" => request.content_language(value),
            "content-md5" => request.content_md5(value),
            "content-type" => request.content_type(value),
            _ => request,
        };
    }
    for (key, value) in metadata.user_metadata() {
        let key = key.strip_prefix(USER_METADATA_PREFIX).unwrap_or(key);
        request = request.metadata(key, value);
    }
    request
}

fn apply_multipart_metadata(
    mut request: CreateMultipartUploadFluentBuilder,
    metadata: Option<&ObjectMetadata>,
) -> CreateMultipartUploadFluentBuilder {
    let Some(metadata) = metadata else {
        return request;
    };
    for (key, value) in metadata.headers() {
        request = match key {
            "cache-control" => request.cache_control(value),
            "content-disposition" => request.content_disposition(value),
            "content-encoding" => request.content_encoding(value),
            "content-language" => request.content_language(value),
            "content-type" => request.content_type(value),
            // content-md5 covers a single body; it has no meaning for a
            // multipart upload
            other => {
                tracing::debug!(header = other, "header not applicable to multipart upload");
                request
            }
        };
    }
    for (key, value) in metadata.user_metadata() {
        let key = key.strip_prefix(USER_METADATA_PREFIX).unwrap_or(key);
        request = request.metadata(key, value);
    }
    request
}

/// Convert a ListObjectsV2 response page into an ObjectListing
fn listing_from_output(
    bucket: &str,
    prefix: &str,
    delimiter: Option<&str>,
    output: ListObjectsV2Output,
) -> ObjectListing {
    let common_prefixes = output
        .common_prefixes()
        .iter()
        .filter_map(|p| p.prefix().map(str::to_string))
        .collect();

    let objects = output
        .contents()
        .iter()
        .map(|o| ObjectSummary::new(o.key().unwrap_or_default(), o.size().unwrap_or(0)))
        .collect();

    ObjectListing {
        bucket: bucket.to_string(),
        prefix: prefix.to_string(),
        delimiter: delimiter.map(str::to_string),
        objects,
        common_prefixes,
        truncated: output.is_truncated().unwrap_or(false),
        next_token: output.next_continuation_token().map(str::to_string),
    }
}

#[async_trait]
impl StorageClient for FdsClient {
    async fn list_buckets(&self) -> Result<Vec<BucketSummary>> {
        let response = self
            .inner
            .list_buckets()
            .send()
            .await
            .map_err(|e| service_error("list buckets", e))?;

        Ok(response
            .buckets()
            .iter()
            .filter_map(|b| b.name().map(BucketSummary::new))
            .collect())
    }

    async fn create_bucket(&self, bucket: &str) -> Result<()> {
        self.inner
            .create_bucket()
            .bucket(bucket)
            .send()
            .await
            .map_err(|e| service_error("create bucket", e))?;
        Ok(())
    }

    async fn delete_bucket(&self, bucket: &str) -> Result<()> {
        self.inner
            .delete_bucket()
            .bucket(bucket)
            .send()
            .await
            .map_err(|e| {
                let err = e.into_service_error();
                if err.to_string().contains("NoSuchBucket") {
                    Error::NotFound(bucket.to_string())
                } else {
                    service_error("delete bucket", err)
                }
            })?;
        Ok(())
    }

    async fn bucket_exists(&self, bucket: &str) -> Result<bool> {
        match self.inner.head_bucket().bucket(bucket).send().await {
            Ok(_) => Ok(true),
            Err(e) => {
                let err = e.into_service_error();
                if err.is_not_found() {
                    Ok(false)
                } else {
                    Err(service_error("head bucket", err))
                }
            }
        }
    }

    async fn get_bucket_acl(&self, bucket: &str) -> Result<AccessControlList> {
        let response = self
            .inner
            .get_bucket_acl()
            .bucket(bucket)
            .send()
            .await
            .map_err(|e| service_error("get bucket acl", e))?;

        let grants = response
            .grants()
            .iter()
            .map(|g| {
                let (grantee_id, grantee_type) = match g.grantee() {
                    Some(grantee) => (
                        grantee
                            .id()
                            .or(grantee.uri())
                            .or(grantee.email_address())
                            .unwrap_or_default()
                            .to_string(),
                        grantee.r#type().as_str().to_string(),
                    ),
                    None => (String::new(), String::new()),
                };
                Grant {
                    grantee_id,
                    grantee_type,
                    permission: g
                        .permission()
                        .map(|p| p.as_str().to_string())
                        .unwrap_or_default(),
                }
            })
            .collect();

        Ok(AccessControlList { grants })
    }

    async fn list_objects(
        &self,
        bucket: &str,
        prefix: &str,
        delimiter: Option<&str>,
        start_after: Option<&str>,
    ) -> Result<ObjectListing> {
        let mut request = self.inner.list_objects_v2().bucket(bucket);
        if !prefix.is_empty() {
            request = request.prefix(prefix);
        }
        if let Some(d) = delimiter {
            request = request.delimiter(d);
        }
        if let Some(s) = start_after {
            request = request.start_after(s);
        }

        let response = request
            .send()
            .await
            .map_err(|e| service_error("list objects", e))?;

        Ok(listing_from_output(bucket, prefix, delimiter, response))
    }

    async fn list_next_batch(&self, listing: &ObjectListing) -> Result<ObjectListing> {
        let token = listing.next_token.as_deref().ok_or_else(|| {
            Error::InvalidArgument("listing has no continuation token".into())
        })?;

        let mut request = self
            .inner
            .list_objects_v2()
            .bucket(&listing.bucket)
            .continuation_token(token);
        if !listing.prefix.is_empty() {
            request = request.prefix(&listing.prefix);
        }
        if let Some(d) = &listing.delimiter {
            request = request.delimiter(d);
        }

        let response = request
            .send()
            .await
            .map_err(|e| service_error("list objects", e))?;

        Ok(listing_from_output(
            &listing.bucket,
            &listing.prefix,
            listing.delimiter.as_deref(),
            response,
        ))
    }

    async fn put_object(
        &self,
        bucket: &str,
        object: &str,
        payload: PutPayload,
        metadata: Option<&ObjectMetadata>,
    ) -> Result<()> {
        let body = payload_stream(payload).await?;
        let request = self
            .inner
            .put_object()
            .bucket(bucket)
            .key(object)
            .body(body);

        apply_put_metadata(request, metadata)
            .send()
            .await
            .map_err(|e| service_error("put object", e))?;

        tracing::debug!(bucket, object, "object stored");
        Ok(())
    }

    async fn post_object(
        &self,
        bucket: &str,
        payload: PutPayload,
        metadata: Option<&ObjectMetadata>,
    ) -> Result<String> {
        // FDS assigns the name server-side on POST; S3 has no equivalent
        // call, so the name is generated here.
        let object = uuid::Uuid::new_v4().to_string();
        self.put_object(bucket, &object, payload, metadata).await?;
        Ok(object)
    }

    async fn get_object(&self, bucket: &str, object: &str, offset: u64) -> Result<ObjectBody> {
        let mut request = self.inner.get_object().bucket(bucket).key(object);
        if offset > 0 {
            request = request.range(format!("bytes={offset}-"));
        }

        match request.send().await {
            Ok(response) => Ok(Box::new(response.body.into_async_read())),
            Err(e) => {
                let err = e.into_service_error();
                if err.is_no_such_key() {
                    Err(Error::NotFound(format!("{bucket}/{object}")))
                } else {
                    Err(service_error("get object", err))
                }
            }
        }
    }

    async fn delete_object(&self, bucket: &str, object: &str) -> Result<()> {
        self.inner
            .delete_object()
            .bucket(bucket)
            .key(object)
            .send()
            .await
            .map_err(|e| service_error("delete object", e))?;
        Ok(())
    }

    async fn object_exists(&self, bucket: &str, object: &str) -> Result<bool> {
        match self
            .inner
            .head_object()
            .bucket(bucket)
            .key(object)
            .send()
            .await
        {
            Ok(_) => Ok(true),
            Err(e) => {
                let err = e.into_service_error();
                if err.is_not_found() {
                    Ok(false)
                } else {
                    Err(service_error("head object", err))
                }
            }
        }
    }

    async fn init_multipart_upload(
        &self,
        bucket: &str,
        object: &str,
        metadata: Option<&ObjectMetadata>,
    ) -> Result<MultipartUpload> {
        let request = self
            .inner
            .create_multipart_upload()
            .bucket(bucket)
            .key(object);

        let response = apply_multipart_metadata(request, metadata)
            .send()
            .await
            .map_err(|e| service_error("init multipart upload", e))?;

        let upload_id = response
            .upload_id()
            .ok_or_else(|| Error::Service("no upload id in multipart response".into()))?
            .to_string();

        Ok(MultipartUpload {
            bucket: bucket.to_string(),
            object: object.to_string(),
            upload_id,
        })
    }

    async fn upload_part(
        &self,
        upload: &MultipartUpload,
        part_number: i32,
        data: Vec<u8>,
    ) -> Result<UploadPartResult> {
        let response = self
            .inner
            .upload_part()
            .bucket(&upload.bucket)
            .key(&upload.object)
            .upload_id(&upload.upload_id)
            .part_number(part_number)
            .body(ByteStream::from(data))
            .send()
            .await
            .map_err(|e| service_error("upload part", e))?;

        let etag = response
            .e_tag()
            .ok_or_else(|| Error::Service("no etag in upload part response".into()))?
            .trim_matches('"')
            .to_string();

        Ok(UploadPartResult { part_number, etag })
    }

    async fn complete_multipart_upload(
        &self,
        upload: &MultipartUpload,
        parts: Vec<UploadPartResult>,
    ) -> Result<()> {
        let completed_parts: Vec<CompletedPart> = parts
            .iter()
            .map(|p| {
                CompletedPart::builder()
                    .part_number(p.part_number)
                    .e_tag(p.etag.as_str())
                    .build()
            })
            .collect();

        let completed = CompletedMultipartUpload::builder()
            .set_parts(Some(completed_parts))
            .build();

        self.inner
            .complete_multipart_upload()
            .bucket(&upload.bucket)
            .key(&upload.object)
            .upload_id(&upload.upload_id)
            .multipart_upload(completed)
            .send()
            .await
            .map_err(|e| service_error("complete multipart upload", e))?;

        tracing::debug!(
            bucket = %upload.bucket,
            object = %upload.object,
            parts = parts.len(),
            "multipart upload completed"
        );
        Ok(())
    }

    async fn abort_multipart_upload(&self, upload: &MultipartUpload) -> Result<()> {
        self.inner
            .abort_multipart_upload()
            .bucket(&upload.bucket)
            .key(&upload.object)
            .upload_id(&upload.upload_id)
            .send()
            .await
            .map_err(|e| service_error("abort multipart upload", e))?;
        Ok(())
    }
}
