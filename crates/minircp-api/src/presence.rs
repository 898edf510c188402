// On-site HTTP route

use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use chrono::{Local, NaiveDate};
use serde::Deserialize;

use crate::dto::OnSiteResponse;
use crate::AppState;

/// Create on-site routes
pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/v1/on-site", get(on_site))
        .with_state(state)
}

#[derive(Debug, Deserialize)]
pub struct OnSiteQuery {
    /// Day to report on; today when omitted
    pub date: Option<NaiveDate>,
}

/// GET /v1/on-site - People whose latest event of the day is an entry
#[utoipa::path(
    get,
    path = "/v1/on-site",
    params(
        ("date" = Option<String>, Query, description = "Day to report on (YYYY-MM-DD), today when omitted")
    ),
    responses(
        (status = 200, description = "People currently on-site", body = OnSiteResponse),
        (status = 500, description = "Internal server error")
    ),
    tag = "presence"
)]
pub async fn on_site(
    State(state): State<AppState>,
    Query(query): Query<OnSiteQuery>,
) -> Result<Json<OnSiteResponse>, StatusCode> {
    let people = state.service.on_site(query.date).await.map_err(|e| {
        tracing::error!("Failed to compute on-site report: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    Ok(Json(OnSiteResponse {
        date: query.date.unwrap_or_else(|| Local::now().date_naive()),
        people,
    }))
}
