// Daily and monthly time report HTTP routes

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use chrono::NaiveDate;
use minircp_core::RcpError;

use crate::dto::{DailyReport, MonthlyReport, TimeSpentEntry};
use crate::AppState;

/// Create report routes
pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/v1/reports/daily/:date", get(daily_report))
        .route("/v1/reports/monthly/:year/:month", get(monthly_report))
        .with_state(state)
}

fn to_status(e: RcpError) -> StatusCode {
    match e {
        RcpError::InvalidDate(_) => StatusCode::BAD_REQUEST,
        _ => {
            tracing::error!("Failed to compute time report: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

/// GET /v1/reports/daily/{date} - Minutes per person for one day
#[utoipa::path(
    get,
    path = "/v1/reports/daily/{date}",
    params(
        ("date" = String, Path, description = "Day to report on (YYYY-MM-DD)")
    ),
    responses(
        (status = 200, description = "Per-person minutes for the day", body = DailyReport),
        (status = 400, description = "Unparseable date"),
        (status = 500, description = "Internal server error")
    ),
    tag = "reports"
)]
pub async fn daily_report(
    State(state): State<AppState>,
    Path(date): Path<NaiveDate>,
) -> Result<Json<DailyReport>, StatusCode> {
    let entries = state
        .service
        .daily_time_spent(date)
        .await
        .map_err(to_status)?;

    Ok(Json(DailyReport {
        date,
        entries: entries.into_iter().map(TimeSpentEntry::from).collect(),
    }))
}

/// GET /v1/reports/monthly/{year}/{month} - Minutes per person for one month
#[utoipa::path(
    get,
    path = "/v1/reports/monthly/{year}/{month}",
    params(
        ("year" = i32, Path, description = "Calendar year"),
        ("month" = u32, Path, description = "Calendar month (1-12)")
    ),
    responses(
        (status = 200, description = "Per-person minutes for the month", body = MonthlyReport),
        (status = 400, description = "Month out of range"),
        (status = 500, description = "Internal server error")
    ),
    tag = "reports"
)]
pub async fn monthly_report(
    State(state): State<AppState>,
    Path((year, month)): Path<(i32, u32)>,
) -> Result<Json<MonthlyReport>, StatusCode> {
    let entries = state
        .service
        .monthly_time_spent(year, month)
        .await
        .map_err(to_status)?;

    Ok(Json(MonthlyReport {
        year,
        month,
        entries: entries.into_iter().map(TimeSpentEntry::from).collect(),
    }))
}
