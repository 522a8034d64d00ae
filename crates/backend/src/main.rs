mod assets;
mod config;
mod graphql;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context as _;
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::http::HeaderValue;
use axum::{extract::State, response::Html, routing::get, Router};
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::set_header::SetResponseHeaderLayer;
use tracing_subscriber::EnvFilter;

use config::Config;
use graphql::Schema;

async fn graphql_handler(State(schema): State<Schema>, req: GraphQLRequest) -> GraphQLResponse {
    schema.execute(req.into_inner()).await.into()
}

async fn graphiql() -> Html<String> {
    Html(
        async_graphql::http::GraphiQLSource::build()
            .endpoint("/graphql")
            .finish(),
    )
}

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

const FALLBACK_INDEX: &str = r#"<!DOCTYPE html>
<html>
<head><title>Meem Market</title></head>
<body>
<h1>Meem Market</h1>
<p>Frontend not built yet. Visit <a href="/graphql">GraphiQL</a> to explore the branch catalog.</p>
</body>
</html>"#;

async fn serve_index(index_path: Arc<PathBuf>) -> Html<String> {
    match tokio::fs::read_to_string(index_path.as_path()).await {
        Ok(html) => Html(html),
        Err(err) => {
            tracing::debug!(
                path = %index_path.display(),
                %err,
                "index.html missing, serving placeholder"
            );
            Html(FALLBACK_INDEX.to_string())
        }
    }
}

/// Build the full application router.
fn build_app(schema: Schema, config: &Config) -> Router {
    // Static file routers are stateless, so merge them before adding app state
    let static_files = Router::new()
        .nest(
            "/static",
            cached_static_router(&config.assets_dir, CACHE_1DAY),
        )
        .nest(
            "/dist",
            cached_static_router(&config.dist_dir, CACHE_IMMUTABLE),
        )
        .nest(
            "/assets",
            cached_static_router(&config.dist_dir.join("assets"), CACHE_IMMUTABLE),
        );

    // Client-side routes all boot the same single-page app.
    let index_path = Arc::new(config.dist_dir.join("index.html"));
    let index = move || serve_index(index_path.clone());

    Router::new()
        .route("/graphql", get(graphiql).post(graphql_handler))
        .route("/", get(index.clone()))
        .route("/{locale}", get(index.clone()))
        .route("/{locale}/branches", get(index.clone()))
        .route("/{locale}/offers", get(index))
        .with_state(schema)
        .merge(static_files)
        .layer(CorsLayer::permissive())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env().context("invalid server configuration")?;

    let catalog = assets::load_catalog(&config.assets_dir).with_context(|| {
        format!(
            "failed to load branch catalog from {}",
            config.assets_dir.display()
        )
    })?;
    if catalog.is_empty() {
        tracing::warn!("branch catalog is empty");
    }

    let schema = graphql::build_schema(Arc::new(catalog));
    let app = build_app(schema, &config);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    tracing::info!(port = config.port, "Server running at http://localhost:{}", config.port);
    tracing::info!("GraphiQL playground at http://localhost:{}/graphql", config.port);

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
