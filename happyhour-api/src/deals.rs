use axum::{
    extract::State,
    http::header,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use happyhour_core::Deal;
use serde::Serialize;

use crate::{error::AppError, state::AppState};

#[derive(Debug, Serialize)]
pub struct DealsResponse<'a> {
    pub fetched_at: Option<DateTime<Utc>>,
    pub count: usize,
    pub deals: &'a [Deal],
}

#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    pub deals: usize,
    pub fetched_at: Option<DateTime<Utc>>,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/deals", get(proxy_csv))
        .route("/v1/deals", get(list_deals))
        .route("/v1/deals/refresh", post(refresh_deals))
}

/// GET /api/deals
/// Pass the sheet export through untouched, so browsers never see the sheet URL
async fn proxy_csv(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let csv = state.source.fetch_csv().await.map_err(AppError::FetchFailed)?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv"),
            (header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
        ],
        csv,
    ))
}

/// GET /v1/deals
/// Every parsed deal in the current snapshot, in sheet order
async fn list_deals(State(state): State<AppState>) -> impl IntoResponse {
    let snapshot = state.store.snapshot().await;

    Json(DealsResponse {
        fetched_at: snapshot.fetched_at,
        count: snapshot.deals.len(),
        deals: &snapshot.deals,
    })
    .into_response()
}

/// POST /v1/deals/refresh
async fn refresh_deals(State(state): State<AppState>) -> Result<Json<RefreshResponse>, AppError> {
    let snapshot = state
        .store
        .refresh(state.source.as_ref())
        .await
        .map_err(AppError::UpstreamError)?;

    Ok(Json(RefreshResponse {
        deals: snapshot.deals.len(),
        fetched_at: snapshot.fetched_at,
    }))
}
