use axum::{
    Router,
    http::{HeaderName, Method, header},
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::{handlers, state::AppState};

/// Build the application router.
///
/// The CORS layer answers OPTIONS preflights and stamps every response,
/// including error responses, with the allow headers the dashboard sends.
pub fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            header::AUTHORIZATION,
            HeaderName::from_static("x-client-info"),
            HeaderName::from_static("apikey"),
            header::CONTENT_TYPE,
        ]);

    Router::new()
        .route("/api/health", get(handlers::health))
        .route("/api/weather", post(handlers::get_weather))
        .route("/api/news", post(handlers::get_news))
        .layer(cors)
        .with_state(Arc::new(state))
}
