//! JSON API handlers.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use insightdash_core::{RawTable, Relation, ResultExt, SankeyGraph, build_sankey, convert_table};
use tracing::{debug, error, warn};

use crate::dashboards::{self, Dashboard, DashboardResponse};
use crate::error::{AppError, Result};
use crate::gallery::{GalleryResponse, gallery};
use crate::state::AppState;

/// GET /api/data - overview dashboard
pub async fn overview_data(State(state): State<AppState>) -> Result<Json<DashboardResponse>> {
    dashboard_data(&state, Dashboard::Overview)
}

/// GET /api/productivity_data - productivity dashboard
pub async fn productivity_data(
    State(state): State<AppState>,
) -> Result<Json<DashboardResponse>> {
    dashboard_data(&state, Dashboard::Productivity)
}

/// GET /api/fte_data - FTE dashboard
pub async fn fte_data(State(state): State<AppState>) -> Result<Json<DashboardResponse>> {
    dashboard_data(&state, Dashboard::Fte)
}

/// GET /api/sankey_data - generated flows through the Sankey builder
pub async fn sankey_data(State(state): State<AppState>) -> Result<Json<SankeyGraph>> {
    let relation = state
        .metrics
        .flow_rows()
        .or_default_logged(Relation::default());
    let graph = build_sankey(&relation);

    if graph.nodes.is_empty() || graph.links.is_empty() {
        error!("No data available for /api/sankey_data");
        return Err(AppError::NoData);
    }

    debug!(
        nodes = graph.nodes.len(),
        links = graph.links.len(),
        "/api/sankey_data response"
    );
    Ok(Json(graph))
}

/// POST /api/sankey/convert - convert a posted table into a Sankey graph
pub async fn convert_sankey(
    payload: std::result::Result<Json<RawTable>, JsonRejection>,
) -> Result<Json<SankeyGraph>> {
    let Json(table) = payload.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
    let graph = convert_table(&table).inspect_err(|e| {
        warn!(
            schema = e.is_schema_error(),
            cell_type = e.is_type_error(),
            "Rejected table: {}",
            e
        );
    })?;
    debug!(rows = table.len(), nodes = graph.nodes.len(), "Converted table");
    Ok(Json(graph))
}

/// GET /api/gallery_data - fixed chart gallery samples
pub async fn gallery_data() -> Json<GalleryResponse> {
    Json(gallery())
}

fn dashboard_data(state: &AppState, dashboard: Dashboard) -> Result<Json<DashboardResponse>> {
    let snapshots = state
        .metrics
        .monthly_snapshots()
        .or_default_logged(Vec::new());

    let response = dashboards::assemble(dashboard, &snapshots).ok_or_else(|| {
        error!("No data available for {}", dashboard.endpoint());
        AppError::NoData
    })?;

    debug!(
        endpoint = dashboard.endpoint(),
        months = response.line_data.len(),
        "Dashboard response"
    );
    Ok(Json(response))
}
