//! Retry policy for network operations.

use reqwest::StatusCode;

/// Maximum number of attempts for a network operation.
pub const MAX_RETRIES: usize = 3;

/// Delay between attempts in milliseconds.
pub const RETRY_DELAY_MS: u64 = 1000;

/// Failures that another attempt cannot fix.
#[derive(Debug, thiserror::Error)]
pub enum NonRetryableError {
    /// HTTP 429
    #[error("Too many requests: {0}. Try again later.")]
    RateLimited(String),
    /// HTTP 401 / 403
    #[error("Access denied: {0}")]
    AccessDenied(String),
    /// HTTP 404
    #[error("Not found: {0}")]
    NotFound(String),
    /// Other 4xx responses and undecodable bodies
    #[error("Request error: {0}")]
    ClientError(String),
}

/// Classifies a failed request. Returns Ok(()) if it is worth another
/// attempt (server errors, connection failures, timeouts).
pub fn classify_error(error: &reqwest::Error) -> Result<(), NonRetryableError> {
    let Some(status) = error.status() else {
        return Ok(());
    };

    let url = error
        .url()
        .map(|u| u.to_string())
        .unwrap_or_else(|| "request".to_string());

    match status {
        StatusCode::TOO_MANY_REQUESTS => Err(NonRetryableError::RateLimited(url)),
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            Err(NonRetryableError::AccessDenied(url))
        }
        StatusCode::NOT_FOUND => Err(NonRetryableError::NotFound(url)),
        s if s.is_client_error() => Err(NonRetryableError::ClientError(format!(
            "HTTP {} from {}",
            s.as_u16(),
            url
        ))),
        _ => Ok(()),
    }
}

/// Maps an error from `error_for_status()` to an anyhow error, wrapping it in
/// [`NonRetryableError`] when retrying is pointless.
pub fn check_retryable(error: reqwest::Error) -> anyhow::Error {
    match classify_error(&error) {
        Ok(()) => anyhow::Error::from(error),
        Err(non_retryable) => anyhow::Error::from(non_retryable),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn status_error(status: usize) -> reqwest::Error {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/database.json")
            .with_status(status)
            .create_async()
            .await;

        let response = reqwest::Client::new()
            .get(format!("{}/database.json", server.url()))
            .send()
            .await
            .unwrap();
        response.error_for_status().unwrap_err()
    }

    #[test]
    fn test_non_retryable_error_display() {
        let err = NonRetryableError::RateLimited("https://host/db.json".to_string());
        assert!(err.to_string().contains("Too many requests"));

        let err = NonRetryableError::NotFound("https://host/db.json".to_string());
        assert_eq!(err.to_string(), "Not found: https://host/db.json");
    }

    #[tokio::test]
    async fn test_classify_client_errors() {
        assert!(matches!(
            classify_error(&status_error(401).await),
            Err(NonRetryableError::AccessDenied(_))
        ));
        assert!(matches!(
            classify_error(&status_error(403).await),
            Err(NonRetryableError::AccessDenied(_))
        ));
        assert!(matches!(
            classify_error(&status_error(404).await),
            Err(NonRetryableError::NotFound(_))
        ));
        assert!(matches!(
            classify_error(&status_error(429).await),
            Err(NonRetryableError::RateLimited(_))
        ));
        assert!(matches!(
            classify_error(&status_error(400).await),
            Err(NonRetryableError::ClientError(_))
        ));
    }

    #[tokio::test]
    async fn test_server_error_is_retryable() {
        let err = status_error(503).await;
        assert!(classify_error(&err).is_ok());

        let err = check_retryable(err);
        assert!(err.downcast_ref::<NonRetryableError>().is_none());
    }

    #[tokio::test]
    async fn test_check_retryable_wraps_not_found() {
        let err = check_retryable(status_error(404).await);
        let non_retryable = err.downcast_ref::<NonRetryableError>();
        assert!(matches!(non_retryable, Some(NonRetryableError::NotFound(url)) if url.ends_with("/database.json")));
    }
}
