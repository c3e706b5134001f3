use axum::{Json, extract::State, response::IntoResponse};
use skydeck_core::{Category, Error, NewsQuery, WeatherQuery};
use std::sync::Arc;
use tracing::{error, info};

use crate::{error::ApiError, state::AppState};

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

pub async fn get_weather(
    State(state): State<Arc<AppState>>,
    Json(query): Json<WeatherQuery>,
) -> Result<impl IntoResponse, ApiError> {
    // Input validation comes before the credential check, so a bad request
    // reads as a bad request even on a misconfigured deployment.
    if query.city.trim().is_empty() {
        return Err(ApiError::weather(Error::InvalidRequest(
            "City name is required".to_string(),
        )));
    }

    let provider = state
        .weather
        .as_ref()
        .ok_or_else(|| ApiError::weather(Error::Configuration("Weather")))?;

    info!(city = %query.city, "weather lookup");

    let snapshot = provider.lookup(&query.city).await.map_err(|err| {
        error!(%err, city = %query.city, "weather lookup failed");
        ApiError::weather(err)
    })?;

    Ok(Json(snapshot))
}

pub async fn get_news(
    State(state): State<Arc<AppState>>,
    Json(query): Json<NewsQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let provider = state
        .news
        .as_ref()
        .ok_or_else(|| ApiError::news(Error::Configuration("News")))?;

    let category = Category::from_tag(query.category.as_deref());

    info!(%category, "news lookup");

    let articles = provider.lookup(category).await.map_err(|err| {
        error!(%err, %category, "news lookup failed");
        ApiError::news(err)
    })?;

    Ok(Json(articles))
}
