//! Tests for client construction and configuration

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use crate::client::client::backoff_delay;
    use crate::client::{Client, ClientConfig, DEFAULT_BASE_URL};

    #[test]
    fn test_config_defaults() {
        let config = ClientConfig::new("sk-test");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout, 30);
        assert_eq!(config.max_retries, 3);
        assert!(config.organization.is_none());
    }

    #[test]
    fn test_config_builder() {
        let config = ClientConfig::builder("sk-test")
            .base_url("http://localhost:8080/v1")
            .organization("org-123")
            .timeout(5)
            .max_retries(0)
            .build();

        // Trailing slash is appended so endpoint joins stay relative
        assert_eq!(config.base_url, "http://localhost:8080/v1/");
        assert_eq!(config.organization.as_deref(), Some("org-123"));
        assert_eq!(config.max_retries, 0);
    }

    #[test]
    fn test_client_rejects_empty_api_key() {
        let err = Client::new(ClientConfig::new("")).unwrap_err();
        assert!(err.to_string().contains("API key"));
    }

    #[test]
    fn test_client_rejects_invalid_base_url() {
        let mut config = ClientConfig::new("sk-test");
        config.base_url = "not a url".to_string();
        assert!(Client::new(config).is_err());
    }

    #[test]
    fn test_backoff_doubles_then_caps() {
        assert_eq!(backoff_delay(0), Duration::from_millis(500));
        assert_eq!(backoff_delay(1), Duration::from_millis(1_000));
        assert_eq!(backoff_delay(6), Duration::from_millis(32_000));
        // Absurd retry budgets must not overflow the shift
        assert_eq!(backoff_delay(200), Duration::from_millis(32_000));
    }

    #[test]
    fn test_client_creation() {
        let client = Client::new(ClientConfig::new("sk-test"));
        assert!(client.is_ok());
    }
}
