// UFO Shapes Dashboard - HTTP surface
// Page, static assets and the JSON API the page drives

use crate::category::{ShapeOption, ALL};
use crate::dashboard::Dashboard;
use crate::dataset::Dataset;
use crate::render::{AggregateView, ChartSpec};
use crate::selector::{resolve_from_choice, ClickEvent};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Json},
    routing::{get, post},
    Router,
};
use log::warn;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub dataset: Arc<Dataset>,
}

impl AppState {
    pub fn new(dataset: Dataset) -> Self {
        Self {
            dataset: Arc::new(dataset),
        }
    }
}

/// API Response wrapper
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
            error: None,
        }
    }
}

impl ApiResponse<()> {
    fn err(message: String) -> Self {
        Self {
            success: false,
            data: (),
            error: Some(message),
        }
    }
}

/// Dropdown contents
#[derive(Debug, Serialize, Deserialize)]
pub struct ShapesResponse {
    pub options: Vec<ShapeOption>,
    pub default: String,
}

#[derive(Debug, Deserialize)]
pub struct ChartQuery {
    pub shape: Option<String>,
}

/// Chart for one selection
#[derive(Debug, Serialize, Deserialize)]
pub struct ChartResponse {
    pub selected: String,
    pub view: AggregateView,
    pub figure: ChartSpec,
}

/// Outcome of a chart click. `update = false` means keep the current selection.
#[derive(Debug, Serialize, Deserialize)]
pub struct ClickResponse {
    pub update: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected: Option<String>,
}

// ============================================================================
// API Handlers
// ============================================================================

/// GET /api/health - Health check
async fn health_check() -> impl IntoResponse {
    Json(ApiResponse::ok("OK"))
}

/// GET /api/shapes - Dropdown options
async fn get_shapes(State(state): State<AppState>) -> impl IntoResponse {
    Json(ApiResponse::ok(ShapesResponse {
        options: state.dataset.categories().options(),
        default: ALL.to_string(),
    }))
}

/// GET /api/chart?shape= - Aggregate view and figure for a selection
async fn get_chart(
    State(state): State<AppState>,
    Query(query): Query<ChartQuery>,
) -> impl IntoResponse {
    let value = query.shape.unwrap_or_else(|| ALL.to_string());

    match resolve_from_choice(&value, state.dataset.categories()) {
        Ok(selected) => {
            let dashboard = Dashboard::with_selection(state.dataset.clone(), selected);
            let response = ChartResponse {
                selected: dashboard.selected().as_value().to_string(),
                view: dashboard.view(),
                figure: dashboard.figure(),
            };

            (StatusCode::OK, Json(ApiResponse::ok(response))).into_response()
        }
        Err(e) => {
            warn!("rejected chart request: {}", e);
            (StatusCode::BAD_REQUEST, Json(ApiResponse::err(e.to_string()))).into_response()
        }
    }
}

/// POST /api/click - Resolve a chart click (or `null` on page load)
async fn post_click(
    State(state): State<AppState>,
    Json(event): Json<Option<ClickEvent>>,
) -> impl IntoResponse {
    let mut dashboard = Dashboard::new(state.dataset.clone());

    let response = if dashboard.click(event.as_ref()) {
        ClickResponse {
            update: true,
            selected: Some(dashboard.selected().as_value().to_string()),
        }
    } else {
        ClickResponse {
            update: false,
            selected: None,
        }
    };

    Json(ApiResponse::ok(response))
}

/// GET / - Serve the dashboard page
async fn serve_index() -> impl IntoResponse {
    Html(include_str!("../web/index.html"))
}

// ============================================================================
// Router
// ============================================================================

pub fn router(state: AppState, static_dir: &Path) -> Router {
    let api_routes = Router::new()
        .route("/health", get(health_check))
        .route("/shapes", get(get_shapes))
        .route("/chart", get(get_chart))
        .route("/click", post(post_click))
        .with_state(state);

    Router::new()
        .route("/", get(serve_index))
        .nest("/api", api_routes)
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(CorsLayer::permissive())
}
