//! Proxy pipeline error taxonomy.
//!
//! One variant per client-visible failure class. Rewrite failures are
//! deliberately absent: they degrade to pass-through content inside the
//! rewriters and never surface here.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

#[derive(Debug, thiserror::Error)]
pub enum ProxyError {
    /// No proxy definition matches the requested id.
    #[error("proxy not found")]
    NotFound,

    /// The definition exists but is switched off.
    #[error("proxy is disabled")]
    Disabled,

    /// Connection, timeout, or transport fault talking to the target.
    #[error("error connecting to target: {0}")]
    Upstream(#[from] reqwest::Error),

    /// Anything else unexpected.
    #[error("proxy error: {0}")]
    Internal(String),
}

impl ProxyError {
    pub fn status(&self) -> StatusCode {
        match self {
            ProxyError::NotFound => StatusCode::NOT_FOUND,
            ProxyError::Disabled => StatusCode::FORBIDDEN,
            ProxyError::Upstream(_) => StatusCode::BAD_GATEWAY,
            ProxyError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            ProxyError::NotFound | ProxyError::Disabled => {
                tracing::debug!(status = %status, error = %self, "proxy request rejected")
            }
            ProxyError::Upstream(err) => {
                tracing::warn!(status = %status, error = %err, "upstream request failed")
            }
            ProxyError::Internal(message) => {
                tracing::error!(status = %status, error = %message, "internal proxy error")
            }
        }
        (status, self.to_string()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(ProxyError::NotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(ProxyError::Disabled.status(), StatusCode::FORBIDDEN);
        assert_eq!(
            ProxyError::Internal("boom".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
