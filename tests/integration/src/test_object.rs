//! Object-level integration tests.

#[cfg(test)]
mod tests {
    use blobstack_client::ResponseHandle;
    use blobstack_model::{ResourceLocator, StorageError};
    use bytes::Bytes;
    use futures::FutureExt;
    use futures::future::BoxFuture;
    use http::{HeaderMap, StatusCode};

    use crate::{logged_in_client, unique_name};

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_treat_missing_object_as_error() {
        let client = logged_in_client().await;
        let locator = ResourceLocator::object(unique_name("ghost"), "missing.dat").expect("locator");

        // Unlike containers, object absence is an error.
        let err = client.peek(&locator, HeaderMap::new()).await.unwrap_err();
        match err {
            StorageError::UnexpectedStatus { status, .. } => {
                assert_eq!(status, StatusCode::NOT_FOUND);
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_fail_streaming_read_of_missing_object() {
        let client = logged_in_client().await;
        let locator = ResourceLocator::object(unique_name("ghost"), "missing.dat").expect("locator");

        fn count_bytes(resp: &mut ResponseHandle) -> BoxFuture<'_, usize> {
            async move {
                let mut total = 0usize;
                while let Ok(Some(chunk)) = resp.chunk().await {
                    total += chunk.len();
                }
                total
            }
            .boxed()
        }

        let result = client
            .read_with(&locator, HeaderMap::new(), count_bytes)
            .await;
        match result {
            Err(StorageError::UnexpectedStatus { status, .. }) => {
                assert_eq!(status, StatusCode::NOT_FOUND);
            }
            other => panic!("unexpected result {other:?}"),
        }
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_read_object_when_present() {
        // Needs an object provisioned out of band; skip quietly when the
        // environment doesn't provide one.
        let Ok(path) = std::env::var("BLOBSTACK_TEST_OBJECT") else {
            return;
        };
        let Some((container, object)) = path.split_once('/') else {
            panic!("BLOBSTACK_TEST_OBJECT must look like container/object");
        };

        let client = logged_in_client().await;
        let locator = ResourceLocator::object(container, object).expect("locator");
        let outcome = client
            .read(&locator, HeaderMap::new())
            .await
            .expect("object read");
        assert_ne!(outcome.value, Bytes::new());
    }
}
