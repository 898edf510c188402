// Minircp reporting API server
//
// Read-only surface over the event store: who is on-site, and per-person
// time reports for a day or a calendar month. Ingestion runs in the separate
// worker binary; this process never writes events.

mod dto;
mod presence;
mod reports;

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{routing::get, Json, Router};
use minircp_core::{AppConfig, AttendanceService, Person};
use minircp_storage::{Database, DbEventStore};
use serde::Serialize;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use dto::{DailyReport, MonthlyReport, OnSiteResponse, TimeSpentEntry};

/// App state shared across routes
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<AttendanceService>,
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        presence::on_site,
        reports::daily_report,
        reports::monthly_report,
    ),
    components(
        schemas(
            Person,
            OnSiteResponse,
            TimeSpentEntry,
            DailyReport,
            MonthlyReport,
        )
    ),
    tags(
        (name = "presence", description = "Who is currently on-site"),
        (name = "reports", description = "Daily and monthly time reports")
    ),
    info(
        title = "Minircp API",
        version = "0.1.0",
        description = "Attendance reports derived from badge events",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "minircp_api=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("minircp-api starting...");

    dotenvy::dotenv().ok();
    let config = AppConfig::load().context("Failed to load configuration")?;

    let db = Database::from_url(&config.database_url())
        .await
        .context("Failed to open events database")?;
    db.init_schema()
        .await
        .context("Failed to initialize events schema")?;
    tracing::info!("connected to events database");

    let service = Arc::new(AttendanceService::new(
        Arc::new(DbEventStore::new(db)),
        config.classifier(),
    ));
    let state = AppState { service };

    let app = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/health", get(health))
        .merge(presence::routes(state.clone()))
        .merge(reports::routes(state))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_addr))?;
    tracing::info!(addr = %config.bind_addr, "listening");

    axum::serve(listener, app).await?;
    Ok(())
}
