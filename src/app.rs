#![cfg(feature = "web")]
use axum::{
    Json, Router,
    body::Body,
    extract::{Path, Query, State},
    http::{StatusCode, header},
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
};
use chrono::NaiveDate;
use log::{error, info};
use serde::Serialize;
use std::path::Path as FsPath;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::services::ServeDir;

use crate::claim::{Claim, ClaimTable};
use crate::config::Config;
use crate::downloader;
use crate::error::ClaimsError;
use crate::metrics::{Summary, summarize};
use crate::render::Renderer;
use crate::store::ClaimStore;
use crate::view::{self, Page, ViewQuery};

pub struct AppState {
    store: ClaimStore,
    renderer: Renderer,
    today: Option<NaiveDate>,
}

impl AppState {
    /// `today` pins the reference date for claim ageing; `None` uses the local date.
    pub fn new(store: ClaimStore, today: Option<NaiveDate>) -> Result<Self, ClaimsError> {
        Ok(AppState {
            store,
            renderer: Renderer::new()?,
            today,
        })
    }

    fn today(&self) -> NaiveDate {
        self.today
            .unwrap_or_else(|| chrono::Local::now().date_naive())
    }
}

#[derive(Serialize)]
struct StatusResponse {
    status: String,
    message: Option<String>,
}

#[derive(Serialize)]
struct ClaimsResponse {
    summary: Summary,
    headers: Vec<String>,
    shown: usize,
    claims: Vec<serde_json::Map<String, serde_json::Value>>,
}

/// Wraps failures that should surface as a 500 page.
struct AppError(ClaimsError);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        error!("request failed: {}", self.0);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(StatusResponse {
                status: "error".to_string(),
                message: Some(self.0.to_string()),
            }),
        )
            .into_response()
    }
}

impl From<ClaimsError> for AppError {
    fn from(e: ClaimsError) -> Self {
        AppError(e)
    }
}

pub fn router(state: Arc<AppState>, static_dir: impl AsRef<FsPath>) -> Router {
    Router::new()
        .route("/", get(serve_dashboard))
        .route("/api/claims", get(list_claims))
        .route("/api/claims/:cm", get(get_claim))
        .route("/api/summary", get(get_summary))
        .route("/export.csv", get(export_csv))
        .route("/export.xlsx", get(export_xlsx))
        .route("/refresh", post(refresh_claims))
        .nest_service("/static", ServeDir::new(static_dir.as_ref()))
        .with_state(state)
}

pub async fn run(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    let store = ClaimStore::open(&config.data)?;
    info!("serving claims from {}", store.source().display());

    let app_state = Arc::new(AppState::new(store, config.today)?);
    let app = router(app_state, &config.static_dir);

    let listener = TcpListener::bind(config.bind).await?;
    info!("listening on http://{}", config.bind);
    axum::serve(listener, app).await?;

    Ok(())
}

async fn serve_dashboard(
    Query(query): Query<ViewQuery>,
    State(state): State<Arc<AppState>>,
) -> Result<Response, AppError> {
    let table = state.store.snapshot();
    let page = view::build_page(&table, &query, state.today());
    let html = state.renderer.render(&page)?;

    let status = match page {
        Page::NotFound(_) => StatusCode::NOT_FOUND,
        _ => StatusCode::OK,
    };
    Ok((status, Html(html)).into_response())
}

async fn list_claims(
    Query(query): Query<ViewQuery>,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let table = state.store.snapshot();
    let filtered = query.filter().apply(&table);

    Json(ClaimsResponse {
        summary: summarize(&table, state.today()),
        headers: table.headers().to_vec(),
        shown: filtered.len(),
        claims: filtered.iter().map(|claim| claim_json(&table, claim)).collect(),
    })
}

async fn get_claim(
    Path(cm): Path<String>,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let table = state.store.snapshot();

    match table.find_by_cm(&cm) {
        Some(claim) => Json(claim_json(&table, claim)).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(StatusResponse {
                status: "error".to_string(),
                message: Some(format!("No claim found for CM Number '{}'", cm)),
            }),
        )
            .into_response(),
    }
}

async fn get_summary(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let table = state.store.snapshot();
    Json(summarize(&table, state.today()))
}

async fn export_csv(
    Query(query): Query<ViewQuery>,
    State(state): State<Arc<AppState>>,
) -> Result<Response, AppError> {
    let table = state.store.snapshot();
    let filtered = query.filter().apply(&table);
    let csv = downloader::to_csv(&table, &filtered)?;

    Ok(attachment("text/csv; charset=utf-8", "claims.csv", csv.into_bytes()))
}

async fn export_xlsx(
    Query(query): Query<ViewQuery>,
    State(state): State<Arc<AppState>>,
) -> Result<Response, AppError> {
    let table = state.store.snapshot();
    let filtered = query.filter().apply(&table);
    let xlsx = downloader::to_xlsx(&table, &filtered)?;

    Ok(attachment(
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        "claims.xlsx",
        xlsx,
    ))
}

async fn refresh_claims(State(state): State<Arc<AppState>>) -> Result<Redirect, AppError> {
    state.store.refresh()?;
    Ok(Redirect::to("/"))
}

fn attachment(content_type: &'static str, filename: &str, bytes: Vec<u8>) -> Response {
    (
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        Body::from(bytes),
    )
        .into_response()
}

fn claim_json(table: &ClaimTable, claim: &Claim) -> serde_json::Map<String, serde_json::Value> {
    let mut object = serde_json::Map::new();
    for (header, value) in table.headers().iter().zip(claim.cells()) {
        // Repeated headers keep the first column's value
        object
            .entry(header.clone())
            .or_insert_with(|| serde_json::to_value(value).unwrap_or(serde_json::Value::Null));
    }
    object
}
