//! post operation
//!
//! Uploads a file under a name the service side assigns and prints that
//! name on stdout, with no trailing newline so it can be captured directly.

use std::io::Write;
use std::path::Path;

use fds_core::{ObjectMetadata, PutPayload, Result, StorageClient};

use crate::commands::put::metadata_with_content_type;

/// Upload a file under a generated name and print the name
pub async fn post_object<C, W>(
    client: &C,
    out: &mut W,
    bucket: &str,
    data_file: &Path,
    metadata: Option<&ObjectMetadata>,
) -> Result<()>
where
    C: StorageClient + ?Sized,
    W: Write,
{
    let meta = metadata_with_content_type(data_file, metadata)?;
    let object = client
        .post_object(bucket, PutPayload::File(data_file.to_path_buf()), meta.as_ref())
        .await?;
    tracing::debug!(bucket, object = %object, "posted object");

    write!(out, "{object}")?;
    out.flush()?;
    Ok(())
}
