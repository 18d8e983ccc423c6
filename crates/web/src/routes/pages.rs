//! Dashboard page and static asset routes.

use std::path::Path;

use axum::Router;
use tower_http::services::{ServeDir, ServeFile};

/// Page routes and the HTML file each one serves.
pub const PAGES: [(&str, &str); 6] = [
    ("/", "index.html"),
    ("/productivity", "productivity.html"),
    ("/fte", "fte.html"),
    ("/sankey", "sankey.html"),
    ("/combined", "combined.html"),
    ("/gallery", "gallery.html"),
];

/// Router serving every dashboard page from `pages_dir`.
pub fn page_router<S>(pages_dir: &Path) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    PAGES.into_iter().fold(Router::new(), |router, (route, file)| {
        router.route_service(route, ServeFile::new(pages_dir.join(file)))
    })
}

/// Router serving `static_dir` under `/static`.
pub fn static_router<S>(static_dir: &Path) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().nest_service("/static", ServeDir::new(static_dir))
}
