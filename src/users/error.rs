use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::{error, warn};

use crate::users::repo::StoreError;

/// Failures of the user lifecycle operations.
#[derive(Debug, thiserror::Error)]
pub enum UserError {
    #[error("email already in use")]
    DuplicateEmail,
    #[error("user {0} not found")]
    NotFound(i64),
    #[error("store unavailable: {0}")]
    StoreUnavailable(#[source] sqlx::Error),
    #[error("password hashing failed: {0}")]
    Hashing(anyhow::Error),
}

impl From<StoreError> for UserError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::UniqueViolation => UserError::DuplicateEmail,
            StoreError::Unavailable(e) => UserError::StoreUnavailable(e),
        }
    }
}

impl UserError {
    pub fn status(&self) -> StatusCode {
        match self {
            UserError::DuplicateEmail => StatusCode::CONFLICT,
            UserError::NotFound(_) => StatusCode::NOT_FOUND,
            UserError::StoreUnavailable(_) | UserError::Hashing(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for UserError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self, "user operation failed");
            // Internal details stay in the log.
            return (status, "Internal server error".to_string()).into_response();
        }
        warn!(error = %self, %status, "user operation rejected");
        let body = match self {
            UserError::DuplicateEmail => "Email already registered".to_string(),
            UserError::NotFound(_) => "User not found".to_string(),
            other => other.to_string(),
        };
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_kinds_to_status_codes() {
        assert_eq!(UserError::DuplicateEmail.status(), StatusCode::CONFLICT);
        assert_eq!(UserError::NotFound(1).status(), StatusCode::NOT_FOUND);
        assert_eq!(
            UserError::StoreUnavailable(sqlx::Error::PoolTimedOut).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            UserError::Hashing(anyhow::anyhow!("boom")).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn store_unique_violation_becomes_duplicate_email() {
        let err: UserError = StoreError::UniqueViolation.into();
        assert!(matches!(err, UserError::DuplicateEmail));

        let err: UserError = StoreError::Unavailable(sqlx::Error::PoolClosed).into();
        assert!(matches!(err, UserError::StoreUnavailable(sqlx::Error::PoolClosed)));
    }

    #[test]
    fn server_errors_hide_details() {
        let res = UserError::StoreUnavailable(sqlx::Error::PoolTimedOut).into_response();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
