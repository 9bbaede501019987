use happyhour_core::{DealSource, InvalidExpirationPolicy, TierResolver};
use happyhour_store::DealStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub source: Arc<dyn DealSource>,
    pub store: Arc<DealStore>,
    pub invalid_expiration: InvalidExpirationPolicy,
}

impl AppState {
    pub fn new(source: Arc<dyn DealSource>, invalid_expiration: InvalidExpirationPolicy) -> Self {
        Self {
            source,
            store: Arc::new(DealStore::new()),
            invalid_expiration,
        }
    }

    /// Tier resolver for the current local date
    pub fn tier_resolver(&self) -> TierResolver {
        TierResolver::today(self.invalid_expiration)
    }
}
