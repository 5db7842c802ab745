//! fds-s3: SDK adapter for the fds CLI client
//!
//! This crate implements the StorageClient trait from fds-core on top of
//! the aws-sdk-s3 crate. It is the only crate that directly depends on the
//! SDK; signing, retries, and the multipart wire protocol all live there.

pub mod client;

pub use client::FdsClient;
