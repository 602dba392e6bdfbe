use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Errors surfaced to the HTTP boundary. Everything renders as
/// `{"detail": ...}` with the mapped status.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Ya existe un usuario con esa cédula o email.")]
    DuplicateUser,

    #[error("Usuario no encontrado")]
    UserNotFound,

    #[error("Email inválido")]
    InvalidEmail,

    #[error("Error de base de datos: {0}")]
    Database(#[from] sqlx::Error),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::DuplicateUser => StatusCode::BAD_REQUEST,
            ApiError::UserNotFound => StatusCode::NOT_FOUND,
            ApiError::InvalidEmail => StatusCode::BAD_REQUEST,
            ApiError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::warn!(error = %self, "request rejected");
        }
        (status, Json(json!({ "detail": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_per_error_class() {
        assert_eq!(ApiError::DuplicateUser.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::UserNotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(ApiError::InvalidEmail.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError::Database(sqlx::Error::RowNotFound).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn database_error_keeps_underlying_message() {
        let err = ApiError::Database(sqlx::Error::RowNotFound);
        let msg = err.to_string();
        assert!(msg.starts_with("Error de base de datos:"));
        assert!(msg.len() > "Error de base de datos: ".len());
    }

    #[test]
    fn response_carries_detail_body() {
        let res = ApiError::UserNotFound.into_response();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }
}
