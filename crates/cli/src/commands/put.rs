//! put operations
//!
//! With an object name the method uploads a file, or streams stdin through
//! a manual multipart upload when no file is given. Without an object name
//! it creates the bucket.

use std::io::Read;
use std::path::Path;

use fds_core::{ObjectMetadata, PutPayload, Result, StorageClient};

use crate::progress::Progress;

/// Buffer size for chunked stdin uploads
pub const MULTIPART_CHUNK_SIZE: usize = 10 * 1024 * 1024;

/// Create a bucket
pub async fn put_bucket<C>(client: &C, bucket: &str) -> Result<()>
where
    C: StorageClient + ?Sized,
{
    tracing::debug!(bucket, "creating bucket");
    client.create_bucket(bucket).await
}

/// Upload an object from a file, or from stdin when no file is given
pub async fn put_object<C>(
    client: &C,
    bucket: &str,
    object: &str,
    data_file: Option<&Path>,
    metadata: Option<&ObjectMetadata>,
) -> Result<()>
where
    C: StorageClient + ?Sized,
{
    match data_file {
        Some(path) => {
            let meta = metadata_with_content_type(path, metadata)?;
            client
                .put_object(
                    bucket,
                    object,
                    PutPayload::File(path.to_path_buf()),
                    meta.as_ref(),
                )
                .await
        }
        None => {
            tracing::debug!(bucket, object, "no data file, uploading stdin in parts");
            let progress = Progress::spinner(&format!("uploading {bucket}/{object}"));
            let mut stdin = std::io::stdin().lock();
            let result = upload_chunks(
                client,
                bucket,
                object,
                metadata,
                &mut stdin,
                MULTIPART_CHUNK_SIZE,
                &progress,
            )
            .await;
            progress.finish();
            result
        }
    }
}

/// Fill in a content type guessed from the file name, unless the metadata
/// already names one
pub(crate) fn metadata_with_content_type(
    path: &Path,
    metadata: Option<&ObjectMetadata>,
) -> Result<Option<ObjectMetadata>> {
    let mut meta = metadata.cloned().unwrap_or_default();
    if meta.content_type().is_none() {
        if let Some(mime) = mime_guess::from_path(path).first() {
            meta.add_header("content-type", mime.essence_str())?;
        }
    }
    Ok((!meta.is_empty()).then_some(meta))
}

/// Upload a reader in fixed-size parts
///
/// Parts are numbered sequentially from 1 and completed once the reader is
/// exhausted. Zero bytes of input falls back to a plain empty put, since
/// the service rejects a multipart completion with no parts. Any failure
/// aborts the upload before the error propagates.
pub(crate) async fn upload_chunks<C, R>(
    client: &C,
    bucket: &str,
    object: &str,
    metadata: Option<&ObjectMetadata>,
    reader: &mut R,
    chunk_size: usize,
    progress: &Progress,
) -> Result<()>
where
    C: StorageClient + ?Sized,
    R: Read,
{
    let upload = client.init_multipart_upload(bucket, object, metadata).await?;
    tracing::debug!(upload_id = %upload.upload_id, "multipart upload started");

    let mut buffer = vec![0u8; chunk_size];
    let mut parts = Vec::new();
    let mut part_number = 1;

    loop {
        let filled = match read_full(reader, &mut buffer) {
            Ok(0) => break,
            Ok(n) => n,
            Err(err) => {
                abort_quietly(client, &upload).await;
                return Err(err.into());
            }
        };

        tracing::debug!(part_number, bytes = filled, "uploading part");
        match client
            .upload_part(&upload, part_number, buffer[..filled].to_vec())
            .await
        {
            Ok(part) => parts.push(part),
            Err(err) => {
                abort_quietly(client, &upload).await;
                return Err(err);
            }
        }
        progress.inc(filled as u64);
        part_number += 1;
    }

    if parts.is_empty() {
        client.abort_multipart_upload(&upload).await?;
        return client
            .put_object(bucket, object, PutPayload::Bytes(Vec::new()), metadata)
            .await;
    }

    tracing::debug!(parts = %serde_json::to_string(&parts)?, "completing multipart upload");
    client.complete_multipart_upload(&upload, parts).await
}

async fn abort_quietly<C>(client: &C, upload: &fds_core::MultipartUpload)
where
    C: StorageClient + ?Sized,
{
    if let Err(err) = client.abort_multipart_upload(upload).await {
        tracing::debug!(%err, "failed to abort multipart upload");
    }
}

/// Fill the buffer from the reader; a short count means end of input
fn read_full<R: Read>(reader: &mut R, buffer: &mut [u8]) -> std::io::Result<usize> {
    let mut filled = 0;
    while filled < buffer.len() {
        match reader.read(&mut buffer[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(err) if err.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(err) => return Err(err),
        }
    }
    Ok(filled)
}
