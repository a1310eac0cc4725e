use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Extension, Json, Query,
    },
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

use crate::api::errors::ApiError;
use crate::crawler::{ArticleSource, ContentExtractor};
use crate::frequency::WordProfile;
use crate::service::{KeywordsRequest, ProfileService};

/// Query string of `GET /word-frequency`
#[derive(Debug, Deserialize)]
pub struct WordFrequencyQuery {
    /// Title of the article to start from
    pub article: String,

    /// Link hops to follow; defaults to the start article only
    #[serde(default)]
    pub depth: u32,
}

/// Handles `GET /word-frequency`
///
/// # Returns
///
/// `200` with the unfiltered profile, `404` when the article does not exist,
/// `422` for invalid parameters and `500` for anything else.
pub async fn word_frequency<S, E>(
    Extension(service): Extension<Arc<ProfileService<S, E>>>,
    query: Result<Query<WordFrequencyQuery>, QueryRejection>,
) -> Result<Json<WordProfile>, ApiError>
where
    S: ArticleSource + 'static,
    E: ContentExtractor + 'static,
{
    let Query(query) = query?;
    let profile = service.word_frequency(&query.article, query.depth).await?;
    Ok(Json(profile))
}

/// Handles `POST /keywords`
///
/// Same status mapping as [`word_frequency`], with the ignore list and
/// percentile cutoff applied to the profile.
pub async fn keywords<S, E>(
    Extension(service): Extension<Arc<ProfileService<S, E>>>,
    payload: Result<Json<KeywordsRequest>, JsonRejection>,
) -> Result<Json<WordProfile>, ApiError>
where
    S: ArticleSource + 'static,
    E: ContentExtractor + 'static,
{
    let Json(request) = payload?;
    let profile = service.keywords(&request).await?;
    Ok(Json(profile))
}

/// Liveness probe
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({ "status": "ok" })))
}
