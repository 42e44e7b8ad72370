use crate::conflicts::{audit_schedule, detect_conflicts};
use crate::data::{Catalog, Conflict, Session};
use crate::report::{CatalogSummary, format_schedule};
use crate::seed::demo_catalog;
use crate::solver::{self, SearchStats, SolveOptions, SolveOutcome};
use crate::validation::{CatalogError, validate_catalog};
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, Default)]
pub struct AppState {
    pub options: SolveOptions,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SolveResponse {
    pub sessions: Vec<Session>,
    pub conflicts: Vec<Conflict>,
    pub summary: CatalogSummary,
    pub stats: SearchStats,
}

/// A schedule to audit or render, together with the catalog it refers to.
#[derive(Debug, Deserialize)]
pub struct ScheduleRequest {
    pub sessions: Vec<Session>,
    pub catalog: Catalog,
}

#[derive(Debug, Serialize)]
pub struct ConflictsResponse {
    pub conflicts: Vec<Conflict>,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("catalog is invalid")]
    InvalidCatalog(Vec<CatalogError>),

    #[error(
        "failed to generate a valid schedule; constraints are too tight, try adding rooms or reducing sessions"
    )]
    Unsatisfiable,

    #[error("search budget exhausted after {0} candidates without a result")]
    Inconclusive(u64),

    #[error("solver task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    details: Vec<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::InvalidCatalog(_) => StatusCode::BAD_REQUEST,
            ApiError::Unsatisfiable => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Inconclusive(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Join(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let details = match &self {
            ApiError::InvalidCatalog(errors) => errors.iter().map(ToString::to_string).collect(),
            _ => Vec::new(),
        };
        let body = ErrorBody {
            error: self.to_string(),
            details,
        };
        (status, Json(body)).into_response()
    }
}

async fn solve_handler(
    State(state): State<AppState>,
    Json(catalog): Json<Catalog>,
) -> Result<Json<SolveResponse>, ApiError> {
    validate_catalog(&catalog).map_err(ApiError::InvalidCatalog)?;

    let options = state.options;
    let (catalog, report) = tokio::task::spawn_blocking(move || {
        let report = solver::solve(&catalog, &options);
        (catalog, report)
    })
    .await?;

    match report.outcome {
        SolveOutcome::Solved(sessions) => {
            let conflicts = detect_conflicts(&sessions, &catalog);
            if !conflicts.is_empty() {
                warn!("Solver output has {} conflicts", conflicts.len());
            }
            Ok(Json(SolveResponse {
                summary: CatalogSummary::new(&catalog, &sessions),
                sessions,
                conflicts,
                stats: report.stats,
            }))
        }
        SolveOutcome::Unsatisfiable => Err(ApiError::Unsatisfiable),
        SolveOutcome::Inconclusive => Err(ApiError::Inconclusive(report.stats.candidates_tried)),
    }
}

async fn conflicts_handler(Json(request): Json<ScheduleRequest>) -> Json<ConflictsResponse> {
    Json(ConflictsResponse {
        conflicts: audit_schedule(&request.sessions, &request.catalog),
    })
}

async fn report_handler(Json(request): Json<ScheduleRequest>) -> String {
    format_schedule(&request.sessions, &request.catalog)
}

async fn demo_catalog_handler() -> Json<Catalog> {
    Json(demo_catalog())
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/v1/schedule/solve", post(solve_handler))
        .route("/v1/schedule/conflicts", post(conflicts_handler))
        .route("/v1/schedule/report", post(report_handler))
        .route("/v1/catalog/demo", get(demo_catalog_handler))
        .with_state(state)
}

pub async fn run_server(addr: SocketAddr, state: AppState) -> std::io::Result<()> {
    let app = build_router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("Server running at http://{}", listener.local_addr()?);

    axum::serve(listener, app).await
}
