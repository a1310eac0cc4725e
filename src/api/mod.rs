//! HTTP API
//!
//! Exposes the profile service over HTTP:
//! - `GET /word-frequency?article=<title>&depth=<n>`
//! - `POST /keywords` with a JSON [`KeywordsRequest`](crate::service::KeywordsRequest)
//! - `GET /health`

mod errors;
mod handlers;

pub use errors::ApiError;
pub use handlers::{health_check, keywords, word_frequency, WordFrequencyQuery};

use axum::{
    routing::{get, post},
    Extension, Router,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;
use crate::crawler::{ArticleSource, ContentExtractor};
use crate::service::ProfileService;
use crate::Result;

/// Creates the application router
///
/// # Arguments
///
/// * `service` - The profile service shared by all requests
pub fn routes<S, E>(service: Arc<ProfileService<S, E>>) -> Router
where
    S: ArticleSource + 'static,
    E: ContentExtractor + 'static,
{
    Router::new()
        .route("/health", get(health_check))
        .route("/word-frequency", get(word_frequency::<S, E>))
        .route("/keywords", post(keywords::<S, E>))
        .layer(Extension(service))
        .layer(TraceLayer::new_for_http())
}

/// Serves the API until Ctrl-C
pub async fn serve<S, E>(
    config: &ServerConfig,
    service: Arc<ProfileService<S, E>>,
) -> Result<()>
where
    S: ArticleSource + 'static,
    E: ContentExtractor + 'static,
{
    let addr = format!("{}:{}", config.host, config.port);
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, routes(service))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}
