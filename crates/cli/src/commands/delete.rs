//! delete operation
//!
//! Deletes the object when one is named, otherwise the bucket itself.

use fds_core::{Result, StorageClient};

pub async fn execute<C>(client: &C, bucket: &str, object: Option<&str>) -> Result<()>
where
    C: StorageClient + ?Sized,
{
    match object {
        Some(object) => {
            tracing::debug!(bucket, object, "deleting object");
            client.delete_object(bucket, object).await
        }
        None => {
            tracing::debug!(bucket, "deleting bucket");
            client.delete_bucket(bucket).await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::MockClient;

    #[tokio::test]
    async fn test_delete_object_branch() {
        let mut client = MockClient::new();
        client
            .expect_delete_object()
            .withf(|bucket, object| bucket == "bucket-a" && object == "key")
            .times(1)
            .returning(|_, _| Ok(()));
        client.expect_delete_bucket().times(0);

        execute(&client, "bucket-a", Some("key")).await.unwrap();
    }

    #[tokio::test]
    async fn test_delete_bucket_branch() {
        let mut client = MockClient::new();
        client
            .expect_delete_bucket()
            .withf(|bucket| bucket == "bucket-a")
            .times(1)
            .returning(|_| Ok(()));
        client.expect_delete_object().times(0);

        execute(&client, "bucket-a", None).await.unwrap();
    }
}
