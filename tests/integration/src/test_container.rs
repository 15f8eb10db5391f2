//! Container-level integration tests.
//!
//! The client cannot create containers, so these tests exercise the
//! documented absence behavior against container names that do not exist.

#[cfg(test)]
mod tests {
    use blobstack_model::meta::MetaEntry;
    use blobstack_model::{ResourceLocator, StorageError};
    use http::{HeaderMap, StatusCode};

    use crate::{logged_in_client, unique_name};

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_report_absent_container_on_peek() {
        let client = logged_in_client().await;
        let locator = ResourceLocator::container(unique_name("ghost")).expect("locator");

        let outcome = client
            .peek(&locator, HeaderMap::new())
            .await
            .expect("peek of missing container is a normal outcome");
        assert!(outcome.is_absent());
        assert!(outcome.metadata().is_empty());
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_report_absent_container_on_read() {
        let client = logged_in_client().await;
        let locator = ResourceLocator::container(unique_name("ghost")).expect("locator");

        let outcome = client
            .read(&locator, HeaderMap::new())
            .await
            .expect("read of missing container is a normal outcome");
        assert!(outcome.is_absent());
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_fail_configure_of_missing_container() {
        let client = logged_in_client().await;
        let locator = ResourceLocator::container(unique_name("ghost")).expect("locator");

        // Absence is only expected for peek and read; configure surfaces it.
        let err = client
            .configure(
                &locator,
                &[MetaEntry::set(["color"], "blue")],
                HeaderMap::new(),
            )
            .await
            .unwrap_err();
        match err {
            StorageError::UnexpectedStatus { status, .. } => {
                assert_eq!(status, StatusCode::NOT_FOUND);
            }
            other => panic!("unexpected error {other:?}"),
        }
    }
}
