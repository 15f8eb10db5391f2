//! Account-level peek/read/configure integration tests.

#[cfg(test)]
mod tests {
    use blobstack_model::meta::MetaEntry;
    use blobstack_model::{Classification, ResourceLocator};
    use http::HeaderMap;

    use crate::{logged_in_client, unique_name, wait_for_metadata};

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_peek_account() {
        let client = logged_in_client().await;
        let outcome = client
            .peek(&ResourceLocator::account(), HeaderMap::new())
            .await
            .expect("account peek");
        assert_eq!(outcome.classification, Classification::Success);
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_read_account_listing() {
        let client = logged_in_client().await;
        let outcome = client
            .read(&ResourceLocator::account(), HeaderMap::new())
            .await
            .expect("account read");
        assert_eq!(outcome.classification, Classification::Success);
        // The body is the container listing; content depends on the account,
        // only the classification is asserted here.
        tracing::info!(len = outcome.value.len(), "account listing");
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_set_and_remove_account_metadata() {
        let client = logged_in_client().await;
        let account = ResourceLocator::account();
        let key = unique_name("meta");

        client
            .configure(
                &account,
                &[MetaEntry::set([key.as_str()], "integration")],
                HeaderMap::new(),
            )
            .await
            .expect("configure set");
        assert!(
            wait_for_metadata(&client, &account, &key, Some("integration")).await,
            "metadata {key} never became visible"
        );

        client
            .configure(
                &account,
                &[MetaEntry::remove([key.as_str()])],
                HeaderMap::new(),
            )
            .await
            .expect("configure remove");
        assert!(
            wait_for_metadata(&client, &account, &key, None).await,
            "metadata {key} was never removed"
        );
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_apply_multiple_directives_in_one_configure() {
        let client = logged_in_client().await;
        let account = ResourceLocator::account();
        let key_a = unique_name("multi_a");
        let key_b = unique_name("multi_b");

        client
            .configure(
                &account,
                &[
                    MetaEntry::set([key_a.as_str()], "one"),
                    MetaEntry::set([key_b.as_str()], "two"),
                ],
                HeaderMap::new(),
            )
            .await
            .expect("configure");
        assert!(wait_for_metadata(&client, &account, &key_a, Some("one")).await);
        assert!(wait_for_metadata(&client, &account, &key_b, Some("two")).await);

        // Cleanup.
        client
            .configure(
                &account,
                &[
                    MetaEntry::remove([key_a.as_str()]),
                    MetaEntry::remove([key_b.as_str()]),
                ],
                HeaderMap::new(),
            )
            .await
            .expect("cleanup configure");
    }
}
