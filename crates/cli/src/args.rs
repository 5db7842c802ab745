//! Command-line argument definitions
//!
//! One flat flag set rather than subcommands: the method flag picks the
//! operation and the listing flags short-circuit it, matching how the
//! service's own tooling behaves.

use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueEnum};
use clap_complete::Shell;

use fds_core::{ConfigOverrides, ObjectMetadata, Result};

const AFTER_HELP: &str = r#"Config:
  Put the following JSON into ~/.config/fds/client.config:
    {
      "ak": "ACCESS_KEY",
      "sk": "SECRET_KEY",
      "region": "REGION",
      "end_point": "END_POINT"
    }
  end_point is optional; without it the endpoint is derived from the region.

Examples:
  create bucket              fds -m put -b BUCKET_NAME
  list buckets               fds -l
  list objects under bucket  fds -l -b BUCKET_NAME
  list directory             fds -L DIR -b BUCKET_NAME
  upload a file              fds -m put -b BUCKET_NAME -o OBJECT_NAME -d FILE_PATH
  upload from a pipe         cat file | fds -m put -b BUCKET_NAME -o OBJECT_NAME
"#;

/// fds - FDS command-line tool
///
/// A command-line interface for the FDS object storage service.
#[derive(Parser, Debug)]
#[command(name = "fds")]
#[command(author, version, about, after_long_help = AFTER_HELP)]
pub struct Cli {
    /// Method of the request
    #[arg(short, long, value_enum, value_name = "METHOD")]
    pub method: Option<Method>,

    /// Name of the bucket to operate on
    #[arg(short, long)]
    pub bucket: Option<String>,

    /// Name of the object to operate on
    #[arg(short, long)]
    pub object: Option<String>,

    /// Service region, e.g. cnbj0
    #[arg(short, long)]
    pub region: Option<String>,

    /// Service endpoint, e.g. cnbj1.fds.api.xiaomi.com
    #[arg(short, long = "end-point", alias = "end_point", value_name = "HOST")]
    pub end_point: Option<String>,

    /// Route requests through the CDN endpoint
    #[arg(short = 'c', long = "cdn", alias = "CDN")]
    pub cdn: bool,

    /// Talk to the service over HTTPS
    #[arg(
        long,
        value_name = "BOOL",
        default_value_t = true,
        default_missing_value = "true",
        num_args = 0..=1,
        action = ArgAction::Set
    )]
    pub https: bool,

    /// Access key, overriding the config file
    #[arg(long, value_name = "ACCESS_KEY")]
    pub ak: Option<String>,

    /// Secret key, overriding the config file
    #[arg(long, value_name = "SECRET_KEY")]
    pub sk: Option<String>,

    /// List the given prefix as a directory (lists buckets without -b)
    #[arg(
        short = 'L',
        long = "list",
        value_name = "PREFIX",
        num_args = 0..=1,
        default_missing_value = ""
    )]
    pub list_dir: Option<String>,

    /// List objects under the given prefix (lists buckets without -b)
    #[arg(
        short = 'l',
        long = "list-objects",
        alias = "list_objects",
        value_name = "PREFIX",
        num_args = 0..=1,
        default_missing_value = ""
    )]
    pub list_objects: Option<String>,

    /// File to upload from or download into
    #[arg(short = 'd', long = "data", value_name = "FILE")]
    pub data_file: Option<PathBuf>,

    /// Byte offset to start reading the object at
    #[arg(long, value_name = "BYTES", default_value_t = 0)]
    pub offset: u64,

    /// Number of bytes to read; -1 reads to the end
    #[arg(
        long,
        value_name = "BYTES",
        default_value_t = -1,
        allow_negative_numbers = true
    )]
    pub length: i64,

    /// Metadata of the uploaded object, e.g. "content-type:text/json;x-xiaomi-meta-foo:bar"
    #[arg(long, value_name = "PAIRS")]
    pub metadata: Option<String>,

    /// With -l or -L, returned names are no less than this mark
    #[arg(long, value_name = "MARK")]
    pub start: Option<String>,

    /// Print debug logs
    #[arg(long)]
    pub debug: bool,

    /// Print a completion script for the given shell and exit
    #[arg(long, value_enum, value_name = "SHELL")]
    pub completions: Option<Shell>,
}

/// Request methods supported by the tool
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// Upload an object, or create the bucket when no object is named
    Put,
    /// Download an object, or print the bucket ACL when no object is named
    Get,
    /// Delete an object, or the bucket when no object is named
    Delete,
    /// Upload an object under a generated name
    Post,
    /// Check that an object or bucket exists
    Head,
}

impl Cli {
    /// Flag values that participate in config precedence
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            access_key: self.ak.clone(),
            secret_key: self.sk.clone(),
            region: self.region.clone(),
            endpoint: self.end_point.clone(),
            enable_https: self.https,
            enable_cdn: self.cdn,
        }
    }

    /// Parse the metadata flag, if given
    pub fn parse_metadata(&self) -> Result<Option<ObjectMetadata>> {
        self.metadata.as_deref().map(str::parse).transpose()
    }
}
