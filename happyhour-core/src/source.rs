use async_trait::async_trait;

/// Failure to obtain the raw CSV export
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("Sheet request failed: {0}")]
    Request(String),

    #[error("Sheet fetch failed: {0}")]
    Status(u16),

    #[error("Failed to read CSV export: {0}")]
    Io(#[from] std::io::Error),

    #[error("No deal source configured")]
    NotConfigured,
}

pub type SourceResult<T> = Result<T, SourceError>;

/// Supplies the spreadsheet export as CSV text
#[async_trait]
pub trait DealSource: Send + Sync {
    /// Fetch the current export. Implementations do not retry.
    async fn fetch_csv(&self) -> SourceResult<String>;

    /// Short human-readable description for logs
    fn describe(&self) -> String;
}
