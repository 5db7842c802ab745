//! get operations
//!
//! With an object name the method downloads it, to a file or to stdout.
//! Without one it prints the bucket ACL.

use std::io::Write;
use std::path::Path;

use tokio::io::{AsyncReadExt, AsyncWriteExt};

use fds_core::{Result, StorageClient};

/// Download an object
///
/// The offset is applied server-side through the range request; the length
/// cap is applied while copying, -1 meaning "to the end". Object bytes go
/// straight to the destination, never through a formatter.
pub async fn get_object<C>(
    client: &C,
    bucket: &str,
    object: &str,
    data_file: Option<&Path>,
    offset: u64,
    length: i64,
) -> Result<()>
where
    C: StorageClient + ?Sized,
{
    let body = client.get_object(bucket, object, offset).await?;
    let limit = if length < 0 { u64::MAX } else { length as u64 };
    let mut reader = body.take(limit);

    match data_file {
        Some(path) => {
            let mut file = tokio::fs::File::create(path).await?;
            tokio::io::copy(&mut reader, &mut file).await?;
            file.flush().await?;
        }
        None => {
            let mut stdout = tokio::io::stdout();
            tokio::io::copy(&mut reader, &mut stdout).await?;
            stdout.flush().await?;
        }
    }
    Ok(())
}

/// Print the bucket ACL as a tab-separated table
pub async fn get_bucket_acl<C, W>(client: &C, out: &mut W, bucket: &str) -> Result<()>
where
    C: StorageClient + ?Sized,
    W: Write,
{
    let acl = client.get_bucket_acl(bucket).await?;
    writeln!(out, "ACL:")?;
    writeln!(out, "grantee_id\tgrant_type\tpermission")?;
    for grant in &acl.grants {
        writeln!(
            out,
            "{}\t{}\t{}",
            grant.grantee_id, grant.grantee_type, grant.permission
        )?;
    }
    out.flush()?;
    Ok(())
}
