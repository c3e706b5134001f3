use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use skydeck_core::Error;

/// JSON error body with a stable `error` field and optional `details`.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// A core error tagged with the handler it came from, so upstream failures
/// render the handler-specific message the dashboard expects.
#[derive(Debug)]
pub struct ApiError {
    kind: Error,
    domain: Domain,
}

#[derive(Debug, Clone, Copy)]
enum Domain {
    Weather,
    News,
}

impl ApiError {
    pub fn weather(kind: Error) -> Self {
        Self {
            kind,
            domain: Domain::Weather,
        }
    }

    pub fn news(kind: Error) -> Self {
        Self {
            kind,
            domain: Domain::News,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self.kind {
            Error::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::Configuration(_) | Error::Upstream { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn body(&self) -> ErrorBody {
        match &self.kind {
            Error::InvalidRequest(msg) | Error::NotFound(msg) => ErrorBody {
                error: msg.clone(),
                details: None,
            },
            Error::Configuration(_) => ErrorBody {
                error: self.kind.to_string(),
                details: None,
            },
            Error::Upstream { message, .. } => ErrorBody {
                error: self.fetch_failed_message().to_string(),
                details: Some(message.clone()),
            },
        }
    }

    fn fetch_failed_message(&self) -> &'static str {
        match self.domain {
            Domain::Weather => "Failed to fetch weather data",
            Domain::News => "Failed to fetch news data",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(self.body())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_request_maps_to_400() {
        let err = ApiError::weather(Error::InvalidRequest("City name is required".to_string()));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn not_found_maps_to_404() {
        let err = ApiError::weather(Error::NotFound("City not found".to_string()));
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn configuration_and_upstream_map_to_500() {
        let config = ApiError::news(Error::Configuration("News"));
        assert_eq!(config.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let upstream = ApiError::news(Error::Upstream {
            status: Some(429),
            message: "rate limited".to_string(),
        });
        assert_eq!(upstream.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn upstream_body_carries_handler_specific_message() {
        let err = ApiError::weather(Error::Upstream {
            status: None,
            message: "connection refused".to_string(),
        });

        let body = serde_json::to_value(err.body()).expect("serialize body");
        assert_eq!(body["error"], "Failed to fetch weather data");
        assert_eq!(body["details"], "connection refused");
    }

    #[test]
    fn details_are_omitted_when_absent() {
        let err = ApiError::news(Error::Configuration("News"));

        let body = serde_json::to_value(err.body()).expect("serialize body");
        assert_eq!(body["error"], "News API key not configured");
        assert!(body.get("details").is_none());
    }
}
