pub mod app_config;
pub mod deal_store;
pub mod file_source;
pub mod sheet_source;

pub use deal_store::{DealStore, Snapshot};
pub use file_source::FileSource;
pub use sheet_source::SheetSource;

use happyhour_core::{DealSource, SourceError, SourceResult};
use std::sync::Arc;
use std::time::Duration;

/// Build the configured deal source; a sheet URL wins over a local file
pub fn source_from_config(config: &app_config::SourceConfig) -> SourceResult<Arc<dyn DealSource>> {
    if let Some(url) = config.sheet_url.as_deref().filter(|u| !u.trim().is_empty()) {
        let source = SheetSource::new(url, Duration::from_secs(config.timeout_seconds))?;
        return Ok(Arc::new(source));
    }

    if let Some(path) = config.csv_path.as_deref().filter(|p| !p.trim().is_empty()) {
        return Ok(Arc::new(FileSource::new(path)));
    }

    Err(SourceError::NotConfigured)
}
