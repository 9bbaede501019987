use async_trait::async_trait;
use happyhour_core::{DealSource, SourceResult};
use std::path::PathBuf;
use tracing::debug;

/// CSV export saved on disk, handy for local development
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl DealSource for FileSource {
    async fn fetch_csv(&self) -> SourceResult<String> {
        let body = tokio::fs::read_to_string(&self.path).await?;
        debug!(bytes = body.len(), path = %self.path.display(), "Read CSV export");
        Ok(body)
    }

    fn describe(&self) -> String {
        format!("file {}", self.path.display())
    }
}
