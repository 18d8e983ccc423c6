//! HTTP routes
//!
//! ## Route Structure
//!
//! - `GET /`, `/productivity`, `/fte`, `/sankey`, `/combined`, `/gallery` - dashboard pages
//! - `GET /static/{*path}` - static assets
//! - `GET /api/data` - overview dashboard data
//! - `GET /api/productivity_data` - productivity dashboard data
//! - `GET /api/fte_data` - FTE dashboard data
//! - `GET /api/sankey_data` - generated Sankey graph
//! - `POST /api/sankey/convert` - convert a posted table into a Sankey graph
//! - `GET /api/gallery_data` - chart gallery samples
//!
//! Data handlers never panic: generator failures are logged and surface as
//! `500 {"error": "No data available"}`.

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

pub mod api;
pub mod pages;

/// Create the JSON API router.
pub fn api_router() -> Router<AppState> {
    Router::new()
        .route("/api/data", get(api::overview_data))
        .route("/api/productivity_data", get(api::productivity_data))
        .route("/api/fte_data", get(api::fte_data))
        .route("/api/sankey_data", get(api::sankey_data))
        .route("/api/sankey/convert", post(api::convert_sankey))
        .route("/api/gallery_data", get(api::gallery_data))
}
