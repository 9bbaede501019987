use async_trait::async_trait;
use happyhour_core::{DealSource, SourceError, SourceResult};
use std::time::Duration;
use tracing::debug;

/// Published Google Sheet (or any URL) serving the deals as CSV
#[derive(Clone)]
pub struct SheetSource {
    client: reqwest::Client,
    url: String,
}

impl SheetSource {
    pub fn new(url: impl Into<String>, timeout: Duration) -> SourceResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SourceError::Request(e.to_string()))?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

// Failures are returned, not logged; the caller reports them once.
#[async_trait]
impl DealSource for SheetSource {
    async fn fetch_csv(&self) -> SourceResult<String> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| SourceError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status(status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| SourceError::Request(format!("Failed to read body: {}", e)))?;

        debug!(bytes = body.len(), "Fetched sheet export");
        Ok(body)
    }

    fn describe(&self) -> String {
        format!("sheet {}", self.url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::header, http::StatusCode, routing::get, Router};
    use tokio::net::TcpListener;

    const CSV: &str = "Venue,City,Time\nRio,Boulder,\"3pm-6pm, daily\"\n";

    /// Serve `app` on an ephemeral local port and return its export URL
    async fn serve(app: Router) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}/export?format=csv", addr)
    }

    fn source(url: &str) -> SheetSource {
        SheetSource::new(url, Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_success_returns_body_unchanged() {
        let url = serve(Router::new().route(
            "/export",
            get(|| async { ([(header::CONTENT_TYPE, "text/csv")], CSV) }),
        ))
        .await;

        let csv = source(&url).fetch_csv().await.unwrap();
        assert_eq!(csv, CSV);
    }

    #[tokio::test]
    async fn test_non_success_status_is_reported() {
        let url = serve(Router::new().route(
            "/export",
            get(|| async { (StatusCode::SERVICE_UNAVAILABLE, "try later") }),
        ))
        .await;

        let err = source(&url).fetch_csv().await.unwrap_err();
        assert!(matches!(err, SourceError::Status(503)));
        assert_eq!(err.to_string(), "Sheet fetch failed: 503");
    }

    #[tokio::test]
    async fn test_missing_export_is_404() {
        let url = serve(Router::new()).await;
        let err = source(&url).fetch_csv().await.unwrap_err();
        assert!(matches!(err, SourceError::Status(404)));
    }

    #[tokio::test]
    async fn test_unreachable_host_is_request_error() {
        // bind then drop so nothing is listening on the port
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = source(&format!("http://{}/export", addr))
            .fetch_csv()
            .await
            .unwrap_err();
        assert!(matches!(err, SourceError::Request(_)));
    }

    #[tokio::test]
    async fn test_describe_names_the_url() {
        let source = source("https://docs.example.com/export?format=csv");
        assert_eq!(source.describe(), "sheet https://docs.example.com/export?format=csv");
    }
}
