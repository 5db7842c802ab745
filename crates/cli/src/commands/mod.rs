//! Command dispatch
//!
//! The listing flags short-circuit the method flag; otherwise the method
//! plus the presence of an object name select the operation, exactly as
//! the flag set documents it.

use std::io::Write;

use clap::CommandFactory;

use fds_core::{ClientConfig, ConfigManager, Error, Result, StorageClient};
use fds_s3::FdsClient;

use crate::args::{Cli, Method};
use crate::exit_code::ExitCode;

pub mod completions;
pub mod delete;
pub mod get;
pub mod head;
pub mod list;
pub mod post;
pub mod put;

#[cfg(test)]
pub(crate) mod testing;

/// Execute the parsed command line and return the process exit code
pub async fn execute(cli: Cli) -> Result<ExitCode> {
    // Nothing to do without a method or a listing flag; print the help with
    // the config-file instructions instead.
    if cli.method.is_none() && cli.list_dir.is_none() && cli.list_objects.is_none() {
        Cli::command().print_long_help()?;
        return Ok(ExitCode::Success);
    }

    let local = ConfigManager::new()?.load()?;
    let bucket = cli.bucket.clone().or_else(|| local.bucket.clone());
    let config = ClientConfig::resolve(&local, &cli.overrides());
    tracing::debug!(
        region = %config.region,
        endpoint = config.endpoint.as_deref().unwrap_or("<derived from region>"),
        https = config.enable_https,
        cdn = config.enable_cdn,
        "resolved configuration"
    );

    let client = FdsClient::new(&config).await?;
    let mut stdout = std::io::stdout().lock();
    dispatch(&client, &cli, bucket.as_deref(), &mut stdout).await
}

/// Route the parsed flags to a command implementation
///
/// Generic over the client and the output sink so tests can drive it with
/// a mock and a buffer. Downloads are the one exception: object bytes are
/// streamed straight to the file or stdout, not through `out`.
pub(crate) async fn dispatch<C, W>(
    client: &C,
    cli: &Cli,
    bucket: Option<&str>,
    out: &mut W,
) -> Result<ExitCode>
where
    C: StorageClient + ?Sized,
    W: Write,
{
    if let Some(prefix) = &cli.list_dir {
        match bucket {
            Some(bucket) => {
                list::list_directory(client, out, bucket, prefix, cli.start.as_deref()).await?;
            }
            None => list::list_buckets(client, out, prefix, cli.start.as_deref()).await?,
        }
        return Ok(ExitCode::Success);
    }

    if let Some(prefix) = &cli.list_objects {
        match bucket {
            Some(bucket) => {
                list::list_flat(client, out, bucket, prefix, cli.start.as_deref()).await?;
            }
            None => list::list_buckets(client, out, prefix, cli.start.as_deref()).await?,
        }
        return Ok(ExitCode::Success);
    }

    // The caller screens out the no-method case before building a client
    let Some(method) = cli.method else {
        return Ok(ExitCode::Success);
    };

    let bucket = bucket.ok_or_else(|| {
        Error::InvalidArgument("bucket name is required (use -b or the config file)".into())
    })?;
    let metadata = cli.parse_metadata()?;

    match method {
        Method::Put => match &cli.object {
            Some(object) => {
                put::put_object(
                    client,
                    bucket,
                    object,
                    cli.data_file.as_deref(),
                    metadata.as_ref(),
                )
                .await?;
            }
            None => put::put_bucket(client, bucket).await?,
        },
        Method::Get => match &cli.object {
            Some(object) => {
                get::get_object(
                    client,
                    bucket,
                    object,
                    cli.data_file.as_deref(),
                    cli.offset,
                    cli.length,
                )
                .await?;
            }
            None => get::get_bucket_acl(client, out, bucket).await?,
        },
        Method::Post => {
            let data_file = cli.data_file.as_deref().ok_or_else(|| {
                Error::InvalidArgument("post requires a data file (use -d)".into())
            })?;
            post::post_object(client, out, bucket, data_file, metadata.as_ref()).await?;
        }
        Method::Delete => delete::execute(client, bucket, cli.object.as_deref()).await?,
        Method::Head => {
            if !head::execute(client, bucket, cli.object.as_deref()).await? {
                return Ok(ExitCode::Failure);
            }
        }
    }

    Ok(ExitCode::Success)
}
