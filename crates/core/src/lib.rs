//! fds-core: Core library for the fds CLI client
//!
//! This crate provides the SDK-independent pieces of the fds CLI:
//! - Configuration loading and CLI/file precedence merging
//! - Object metadata parsing
//! - Listing, multipart, and ACL data types
//! - The StorageClient trait describing the service SDK surface

pub mod config;
pub mod error;
pub mod metadata;
pub mod traits;
pub mod types;

pub use config::{ClientConfig, ConfigManager, ConfigOverrides, LocalConfig, DEFAULT_REGION};
pub use error::{Error, Result};
pub use metadata::{ObjectMetadata, USER_METADATA_PREFIX};
pub use traits::{ObjectBody, StorageClient};
pub use types::{
    AccessControlList, BucketSummary, Grant, MultipartUpload, ObjectListing, ObjectSummary,
    PutPayload, UploadPartResult,
};
