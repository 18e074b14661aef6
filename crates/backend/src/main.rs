mod config;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use axum::http::HeaderValue;
use axum::{extract::State, response::Html, routing::get, Router};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::set_header::SetResponseHeaderLayer;
use tracing_subscriber::EnvFilter;

use config::Config;

/// Page routes handled by the frontend router.
const PAGE_ROUTES: [&str; 3] = ["/", "/heatmaps", "/incidents"];

const FALLBACK_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head><title>SF Fire Dispatch</title></head>
<body>
<h1>SF Fire Dispatch</h1>
<p>Frontend not built yet. Run <code>dx bundle</code> for the frontend crate and point DIST_DIR at the output.</p>
</body>
</html>"#;

/// Build a cache-controlled static file router.
///
/// Separated so tests can exercise the caching layer with arbitrary directories.
fn cached_static_router(dir: &Path, cache_header: &'static str) -> Router {
    let layer = SetResponseHeaderLayer::overriding(
        axum::http::header::CACHE_CONTROL,
        HeaderValue::from_static(cache_header),
    );
    Router::new()
        .fallback_service(ServeDir::new(dir))
        .layer(layer)
}

const CACHE_1DAY: &str = "public, max-age=86400, must-revalidate";
const CACHE_IMMUTABLE: &str = "public, max-age=31536000, immutable";

/// Build the full application router.
fn build_app(config: &Config) -> Router {
    let static_files = Router::new()
        .nest("/static", cached_static_router(&config.static_dir, CACHE_1DAY))
        .nest(
            "/assets",
            cached_static_router(&config.dist_dir.join("assets"), CACHE_IMMUTABLE),
        );

    let index_path = Arc::new(config.index_path());
    let pages = PAGE_ROUTES
        .iter()
        .fold(Router::new(), |router, path| router.route(path, get(serve_index)))
        .with_state(index_path);

    pages
        .merge(static_files)
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
}

async fn serve_index(State(index_path): State<Arc<PathBuf>>) -> Html<String> {
    match tokio::fs::read_to_string(index_path.as_path()).await {
        Ok(html) => Html(html),
        Err(e) => {
            tracing::warn!(path = %index_path.display(), "index not available: {e}");
            Html(FALLBACK_PAGE.to_string())
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = Config::from_env()?;
    for dir in [&config.dist_dir, &config.static_dir] {
        if !dir.is_dir() {
            tracing::warn!(dir = %dir.display(), "directory missing, requests under it will 404");
        }
    }
    tracing::info!(
        dist = %config.dist_dir.display(),
        static_dir = %config.static_dir.display(),
        "serving dashboard files"
    );

    let app = build_app(&config);
    let listener = tokio::net::TcpListener::bind(config.addr())
        .await
        .with_context(|| format!("failed to bind {}", config.addr()))?;
    tracing::info!("dashboard running at http://localhost:{}", config.port);

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
