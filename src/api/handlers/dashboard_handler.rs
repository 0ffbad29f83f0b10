//! Dashboard handlers - aggregate figures for the admin landing page.

use axum::{
    extract::{Query, State},
    response::Json,
    routing::get,
    Router,
};
use serde::Deserialize;

use crate::api::extractors::CurrentUser;
use crate::api::AppState;
use crate::errors::AppResult;
use crate::services::{DashboardStats, DateRange};
use crate::types::ApiResponse;

/// Sales window query parameter
#[derive(Debug, Default, Deserialize)]
pub struct StatsParams {
    pub range: Option<String>,
}

/// Create dashboard routes
pub fn dashboard_routes() -> Router<AppState> {
    Router::new().route("/", get(dashboard_stats))
}

/// Fetch dashboard statistics (admin)
#[utoipa::path(
    get,
    path = "/dashboard-stats",
    tag = "Dashboard",
    params(
        ("range" = Option<String>, Query, description = "Sales window: 7d, 30d, 90d or 1y (default 30d)")
    ),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Dashboard statistics", body = DashboardStats),
        (status = 401, description = "Authentication required"),
        (status = 403, description = "Admin access required")
    )
)]
pub async fn dashboard_stats(
    State(state): State<AppState>,
    user: CurrentUser,
    Query(params): Query<StatsParams>,
) -> AppResult<Json<ApiResponse<DashboardStats>>> {
    user.require_admin()?;

    let range = params
        .range
        .as_deref()
        .map(DateRange::parse)
        .unwrap_or_default();

    let stats = state.services.dashboard().stats(range).await?;
    Ok(Json(ApiResponse::success(stats)))
}
