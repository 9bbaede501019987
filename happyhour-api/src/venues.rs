use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use happyhour_core::{build_listing, filters::DAYS, DrinkFilter, FilterState};
use serde::Deserialize;

use crate::{error::AppError, state::AppState};

#[derive(Debug, Default, Deserialize)]
pub struct ListingQuery {
    pub day: Option<String>,
    #[serde(rename = "type")]
    pub deal_type: Option<String>,
    pub drink: Option<String>,
    pub late_night: Option<bool>,
}

impl ListingQuery {
    /// Missing parameters fall back to today, all types, all drinks
    pub fn into_filter(self) -> Result<FilterState, AppError> {
        let mut filter = match self.day {
            Some(day) => {
                let day = canonical_day(&day)
                    .ok_or_else(|| AppError::BadRequest(format!("Unknown day: {}", day)))?;
                FilterState::for_day(day)
            }
            None => FilterState::for_today(),
        };

        if let Some(deal_type) = self.deal_type.filter(|t| !t.is_empty()) {
            filter = filter.with_deal_type(deal_type);
        }
        if let Some(drink) = self.drink {
            filter = filter.with_drink(DrinkFilter::parse(&drink));
        }
        Ok(filter.late_night(self.late_night.unwrap_or(false)))
    }
}

/// "tuesday" -> "Tuesday"; the sheet's literal day match is case-sensitive
fn canonical_day(raw: &str) -> Option<&'static str> {
    DAYS.iter().copied().find(|d| d.eq_ignore_ascii_case(raw.trim()))
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/v1/venues", get(list_venues))
}

/// GET /v1/venues?day=Tuesday&type=Drink&drink=beer&late_night=true
/// Filtered, grouped and ranked venues for the current snapshot
async fn list_venues(
    State(state): State<AppState>,
    Query(query): Query<ListingQuery>,
) -> Result<Response, AppError> {
    let filter = query.into_filter()?;
    let snapshot = state.store.snapshot().await;

    let listing = build_listing(&snapshot.deals, &filter, &state.tier_resolver());
    Ok(Json(&listing).into_response())
}
