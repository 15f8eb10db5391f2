//! Login and token lifecycle integration tests.

#[cfg(test)]
mod tests {
    use blobstack_client::ResourceClient;
    use blobstack_model::{ResourceLocator, StorageError};
    use http::{HeaderMap, HeaderValue};

    use crate::{logged_in_client, test_config};

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_login_and_install_session() {
        let client = logged_in_client().await;
        assert!(client.token_store().is_authenticated());
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_reject_bad_credentials() {
        let mut config = test_config();
        config.key = "definitely-not-the-key".to_owned();
        let client = ResourceClient::from_config(&config).expect("transport construction");

        let err = client.login().await.unwrap_err();
        assert!(matches!(err, StorageError::AuthenticationFailed { .. }));
        assert!(!client.token_store().is_authenticated());
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_fail_operations_before_login() {
        let client = ResourceClient::from_config(&test_config()).expect("transport construction");
        let err = client
            .peek(&ResourceLocator::account(), HeaderMap::new())
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::NotAuthenticated));
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_classify_rejected_token_as_expired() {
        let client = logged_in_client().await;

        // Override the stored token with garbage for this one request.
        let mut extra = HeaderMap::new();
        extra.insert("x-auth-token", HeaderValue::from_static("bogus-token"));
        let err = client
            .peek(&ResourceLocator::account(), extra)
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::AuthExpired));
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_refresh_session_on_relogin() {
        let client = logged_in_client().await;
        let first = client.token_store().get().expect("session after login");

        client.login().await.expect("second login");
        let second = client.token_store().get().expect("session after relogin");

        // Same endpoint either way; the newest session is the one in use.
        assert_eq!(first.storage_endpoint, second.storage_endpoint);
        client
            .peek(&ResourceLocator::account(), HeaderMap::new())
            .await
            .expect("peek with refreshed session");
    }
}
