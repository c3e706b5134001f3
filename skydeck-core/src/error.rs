use thiserror::Error;

/// Failure taxonomy for the dashboard handlers.
///
/// Every failure a handler can produce maps to exactly one variant; the
/// server layer converts each into a JSON error body with a stable `error`
/// field. Retry policy, if any, belongs to the caller.
#[derive(Debug, Error)]
pub enum Error {
    /// Required input missing or malformed. Never retried.
    #[error("{0}")]
    InvalidRequest(String),

    /// Upstream affirmatively reports the requested entity does not exist.
    #[error("{0}")]
    NotFound(String),

    /// A required credential is absent from the process configuration.
    /// Fatal for the invocation; a deployment problem, not a per-request one.
    #[error("{0} API key not configured")]
    Configuration(&'static str),

    /// Upstream returned a non-success status, or the request itself failed
    /// at the network level. Carries upstream's status when available.
    #[error("upstream error: {message}")]
    Upstream {
        status: Option<u16>,
        message: String,
    },
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Upstream {
            status: err.status().map(|s| s.as_u16()),
            message: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configuration_error_names_the_service() {
        assert_eq!(
            Error::Configuration("Weather").to_string(),
            "Weather API key not configured"
        );
        assert_eq!(
            Error::Configuration("News").to_string(),
            "News API key not configured"
        );
    }

    #[test]
    fn upstream_error_carries_message() {
        let err = Error::Upstream {
            status: Some(502),
            message: "bad gateway".to_string(),
        };
        assert!(err.to_string().contains("bad gateway"));
    }
}
