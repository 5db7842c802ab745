//! head operation
//!
//! Existence check for an object or bucket. Prints nothing; the caller
//! maps a negative result to exit code 1.

use fds_core::{Result, StorageClient};

pub async fn execute<C>(client: &C, bucket: &str, object: Option<&str>) -> Result<bool>
where
    C: StorageClient + ?Sized,
{
    match object {
        Some(object) => client.object_exists(bucket, object).await,
        None => client.bucket_exists(bucket).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::MockClient;

    #[tokio::test]
    async fn test_head_object() {
        let mut client = MockClient::new();
        client
            .expect_object_exists()
            .withf(|bucket, object| bucket == "bucket-a" && object == "key")
            .returning(|_, _| Ok(false));

        assert!(!execute(&client, "bucket-a", Some("key")).await.unwrap());
    }

    #[tokio::test]
    async fn test_head_bucket() {
        let mut client = MockClient::new();
        client
            .expect_bucket_exists()
            .withf(|bucket| bucket == "bucket-a")
            .returning(|_| Ok(true));

        assert!(execute(&client, "bucket-a", None).await.unwrap());
    }
}
