use std::time::Duration;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{info, warn};

use crate::state::AppState;

/// Periodically re-fetch the sheet. Failures are logged and the previous
/// snapshot stays in place until the next tick.
pub async fn start_refresh_worker(state: AppState, every: Duration) {
    let mut ticker = interval(every);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // the first tick fires immediately; startup already loaded the sheet
    ticker.tick().await;

    info!("Refresh worker started, every {:?} from {}", every, state.source.describe());

    loop {
        ticker.tick().await;
        if let Err(e) = state.store.refresh(state.source.as_ref()).await {
            warn!("Scheduled refresh from {} failed, keeping previous deals: {}", state.source.describe(), e);
        }
    }
}
