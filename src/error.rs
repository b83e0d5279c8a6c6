//! Request-level errors and their HTTP rendering.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::store::StoreError;

/// Body shared by both 503 responses.
pub const POOL_EXHAUSTED: &str = "503 - Error due to tight resource constraints in the pool!";

/// Prefix of the 500 body; the store error detail follows on the next line.
pub const STORE_BROKEN: &str = "500 - Error due to redis cluster broken!";

pub type Result<T> = std::result::Result<T, HitError>;

/// Ways a counter request can fail. Every variant is terminal for the request.
#[derive(Debug, Error)]
pub enum HitError {
    /// The pool is at its soft limit.
    #[error("{}\n", POOL_EXHAUSTED)]
    Saturated,

    /// The increment failed after a permit was granted.
    #[error("{}\n{}", STORE_BROKEN, .0)]
    Store(#[from] StoreError),
}

impl HitError {
    pub fn status(&self) -> StatusCode {
        match self {
            HitError::Saturated => StatusCode::SERVICE_UNAVAILABLE,
            HitError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for HitError {
    fn into_response(self) -> Response {
        (self.status(), self.to_string()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn saturated_renders_as_503() {
        let err = HitError::Saturated;
        assert_eq!(err.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(
            err.to_string(),
            "503 - Error due to tight resource constraints in the pool!\n"
        );
    }

    #[test]
    fn store_failure_carries_detail() {
        let err = HitError::from(StoreError::Command("CLUSTERDOWN".into()));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            err.to_string(),
            "500 - Error due to redis cluster broken!\ncommand failed: CLUSTERDOWN"
        );
        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
