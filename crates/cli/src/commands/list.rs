//! Listing operations
//!
//! Three modes share this module: bucket listing, flat object listing, and
//! directory-style listing with common-prefix grouping. The directory mode
//! pages through the listing client-side while the truncation flag is set,
//! stripping the request prefix from every printed name.

use std::io::Write;

use fds_core::{Result, StorageClient};

/// List buckets whose names start with the prefix
///
/// With a start mark, names lexicographically below the mark are skipped.
/// Bucket names print with a trailing slash.
pub async fn list_buckets<C, W>(
    client: &C,
    out: &mut W,
    prefix: &str,
    start: Option<&str>,
) -> Result<()>
where
    C: StorageClient + ?Sized,
    W: Write,
{
    let buckets = client.list_buckets().await?;
    for bucket in buckets {
        if !bucket.name.starts_with(prefix) {
            continue;
        }
        if let Some(mark) = start {
            if bucket.name.as_str() < mark {
                continue;
            }
        }
        writeln!(out, "{}/", bucket.name)?;
    }
    out.flush()?;
    Ok(())
}

/// List a prefix as a directory, one entry per line
///
/// Common prefixes come first, then objects, page by page until the
/// listing is no longer truncated.
pub async fn list_directory<C, W>(
    client: &C,
    out: &mut W,
    bucket: &str,
    prefix: &str,
    start: Option<&str>,
) -> Result<()>
where
    C: StorageClient + ?Sized,
    W: Write,
{
    let path_prefix = normalize_dir_prefix(prefix);
    let start_after = start.map(|mark| format!("{path_prefix}{mark}"));
    if let Some(mark) = &start_after {
        tracing::debug!(start_after = %mark, "directory listing start mark");
    }

    let mut listing = client
        .list_objects(bucket, &path_prefix, Some("/"), start_after.as_deref())
        .await?;

    loop {
        for common_prefix in &listing.common_prefixes {
            writeln!(out, "{}", strip_prefix(common_prefix, &path_prefix))?;
        }
        for object in &listing.objects {
            writeln!(out, "{}", strip_prefix(&object.name, &path_prefix))?;
        }
        out.flush()?;

        if !listing.truncated {
            break;
        }
        listing = client.list_next_batch(&listing).await?;
    }

    Ok(())
}

/// List objects under a prefix without delimiter grouping
///
/// Only the first batch is printed; a truncated listing ends with an
/// ellipsis line.
pub async fn list_flat<C, W>(
    client: &C,
    out: &mut W,
    bucket: &str,
    prefix: &str,
    start: Option<&str>,
) -> Result<()>
where
    C: StorageClient + ?Sized,
    W: Write,
{
    let start_after = start.map(|mark| format!("{prefix}{mark}"));
    let listing = client
        .list_objects(bucket, prefix, None, start_after.as_deref())
        .await?;

    for common_prefix in &listing.common_prefixes {
        writeln!(out, "{common_prefix}")?;
    }
    for object in &listing.objects {
        writeln!(out, "{}", object.name)?;
    }
    out.flush()?;

    if listing.truncated {
        writeln!(out, "...")?;
    }
    Ok(())
}

/// Give a non-empty prefix directory semantics by ending it with a slash
fn normalize_dir_prefix(prefix: &str) -> String {
    if prefix.is_empty() || prefix.ends_with('/') {
        prefix.to_string()
    } else {
        format!("{prefix}/")
    }
}

fn strip_prefix<'a>(name: &'a str, prefix: &str) -> &'a str {
    name.strip_prefix(prefix).unwrap_or(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::MockClient;
    use fds_core::{BucketSummary, ObjectListing, ObjectSummary};

    #[test]
    fn test_normalize_dir_prefix() {
        assert_eq!(normalize_dir_prefix(""), "");
        assert_eq!(normalize_dir_prefix("photos"), "photos/");
        assert_eq!(normalize_dir_prefix("photos/"), "photos/");
    }

    #[test]
    fn test_strip_prefix_falls_back_to_full_name() {
        assert_eq!(strip_prefix("photos/a.jpg", "photos/"), "a.jpg");
        assert_eq!(strip_prefix("other/a.jpg", "photos/"), "other/a.jpg");
    }

    #[tokio::test]
    async fn test_list_buckets_filters_prefix_and_mark() {
        let mut client = MockClient::new();
        client.expect_list_buckets().returning(|| {
            Ok(vec![
                BucketSummary::new("backup"),
                BucketSummary::new("beta"),
                BucketSummary::new("bravo"),
                BucketSummary::new("data"),
            ])
        });

        let mut out = Vec::new();
        list_buckets(&client, &mut out, "b", Some("beta")).await.unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "beta/\nbravo/\n");
    }

    #[tokio::test]
    async fn test_list_buckets_without_mark_keeps_all_matches() {
        let mut client = MockClient::new();
        client.expect_list_buckets().returning(|| {
            Ok(vec![BucketSummary::new("backup"), BucketSummary::new("data")])
        });

        let mut out = Vec::new();
        list_buckets(&client, &mut out, "", None).await.unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "backup/\ndata/\n");
    }

    #[tokio::test]
    async fn test_list_directory_paginates_and_strips_prefix() {
        let mut client = MockClient::new();
        client
            .expect_list_objects()
            .withf(|bucket, prefix, delimiter, start_after| {
                bucket == "bucket-a"
                    && prefix == "photos/"
                    && *delimiter == Some("/")
                    && start_after.is_none()
            })
            .times(1)
            .returning(|bucket, prefix, delimiter, _| {
                Ok(ObjectListing {
                    bucket: bucket.to_string(),
                    prefix: prefix.to_string(),
                    delimiter: delimiter.map(str::to_string),
                    objects: vec![ObjectSummary::new("photos/a.jpg", 1)],
                    common_prefixes: vec!["photos/2024/".to_string()],
                    truncated: true,
                    next_token: Some("token-1".to_string()),
                })
            });
        client
            .expect_list_next_batch()
            .withf(|listing| listing.next_token.as_deref() == Some("token-1"))
            .times(1)
            .returning(|listing| {
                Ok(ObjectListing {
                    objects: vec![ObjectSummary::new("photos/b.jpg", 2)],
                    common_prefixes: Vec::new(),
                    truncated: false,
                    next_token: None,
                    ..listing.clone()
                })
            });

        let mut out = Vec::new();
        list_directory(&client, &mut out, "bucket-a", "photos", None)
            .await
            .unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "2024/\na.jpg\nb.jpg\n");
    }

    #[tokio::test]
    async fn test_list_directory_start_mark_becomes_start_after() {
        let mut client = MockClient::new();
        client
            .expect_list_objects()
            .withf(|_, prefix, _, start_after| {
                prefix == "photos/" && *start_after == Some("photos/m")
            })
            .times(1)
            .returning(|bucket, prefix, delimiter, _| {
                Ok(ObjectListing {
                    bucket: bucket.to_string(),
                    prefix: prefix.to_string(),
                    delimiter: delimiter.map(str::to_string),
                    objects: vec![ObjectSummary::new("photos/new.jpg", 1)],
                    ..Default::default()
                })
            });

        let mut out = Vec::new();
        list_directory(&client, &mut out, "bucket-a", "photos", Some("m"))
            .await
            .unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "new.jpg\n");
    }

    #[tokio::test]
    async fn test_list_flat_prints_full_names_and_ellipsis() {
        let mut client = MockClient::new();
        client
            .expect_list_objects()
            .withf(|bucket, prefix, delimiter, start_after| {
                bucket == "bucket-a"
                    && prefix == "photos"
                    && delimiter.is_none()
                    && start_after.is_none()
            })
            .times(1)
            .returning(|bucket, prefix, _, _| {
                Ok(ObjectListing {
                    bucket: bucket.to_string(),
                    prefix: prefix.to_string(),
                    objects: vec![
                        ObjectSummary::new("photos-2023.tar", 10),
                        ObjectSummary::new("photos/a.jpg", 1),
                    ],
                    truncated: true,
                    next_token: Some("token-1".to_string()),
                    ..Default::default()
                })
            });

        let mut out = Vec::new();
        list_flat(&client, &mut out, "bucket-a", "photos", None)
            .await
            .unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "photos-2023.tar\nphotos/a.jpg\n...\n"
        );
    }

    #[tokio::test]
    async fn test_list_flat_single_batch_only() {
        let mut client = MockClient::new();
        client
            .expect_list_objects()
            .times(1)
            .returning(|bucket, prefix, _, _| {
                Ok(ObjectListing {
                    bucket: bucket.to_string(),
                    prefix: prefix.to_string(),
                    objects: vec![ObjectSummary::new("a", 1)],
                    ..Default::default()
                })
            });
        // list_next_batch must not be called even though more pages exist
        client.expect_list_next_batch().times(0);

        let mut out = Vec::new();
        list_flat(&client, &mut out, "bucket-a", "", None).await.unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "a\n");
    }
}
