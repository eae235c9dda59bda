use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use validator::ValidationErrors;

/// Domain error taxonomy, matched exhaustively at the HTTP boundary.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ServiceError {
    #[error("validation failed")]
    Validation(Vec<String>),
    #[error("Already Exists: {0}")]
    AlreadyExists(String),
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error("authentication required")]
    Unauthenticated,
    #[error("Forbidden: {0}")]
    Forbidden(String),
    #[error("Not Found: {0}")]
    NotFound(String),
    #[error("Internal Error: {0}")]
    Internal(String),
}

impl From<crate::repository::repository_error::RepositoryError> for ServiceError {
    fn from(err: crate::repository::repository_error::RepositoryError) -> Self {
        use crate::repository::repository_error::RepositoryError;
        match err {
            RepositoryError::NotFound(msg) => ServiceError::NotFound(msg),
            RepositoryError::AlreadyExists(msg) => ServiceError::AlreadyExists(msg),
            RepositoryError::DatabaseError(msg) => ServiceError::Internal(msg),
            RepositoryError::ConnectionError(msg) => ServiceError::Internal(msg),
        }
    }
}

/// Flatten `validator` output into `field: message` strings for the 400 body.
pub fn format_validation_errors(errors: &ValidationErrors) -> Vec<String> {
    let mut messages = Vec::new();
    for (field, field_errors) in errors.field_errors() {
        for error in field_errors {
            let detail = error
                .message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| error.code.to_string());
            messages.push(format!("{}: {}", field, detail));
        }
    }
    messages.sort();
    messages
}

#[derive(Debug, Serialize)]
pub enum HandlerErrorKind {
    NotFound,
    Validation,
    Internal,
    Unauthorized,
    Forbidden,
    Conflict,
    BadRequest,
}

impl std::fmt::Display for HandlerErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            HandlerErrorKind::NotFound => "NotFound",
            HandlerErrorKind::Validation => "Validation",
            HandlerErrorKind::Internal => "Internal",
            HandlerErrorKind::Unauthorized => "Unauthorized",
            HandlerErrorKind::Forbidden => "Forbidden",
            HandlerErrorKind::Conflict => "Conflict",
            HandlerErrorKind::BadRequest => "BadRequest",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Serialize)]
pub struct HandlerError {
    pub error: HandlerErrorKind,
    pub message: String,
    pub details: Option<Vec<String>>,
}

impl HandlerError {
    pub fn validation(messages: Vec<String>) -> Self {
        HandlerError {
            error: HandlerErrorKind::Validation,
            message: "validation failed".to_string(),
            details: Some(messages),
        }
    }

    pub fn internal<T: Into<String>>(message: T) -> Self {
        HandlerError {
            error: HandlerErrorKind::Internal,
            message: message.into(),
            details: None,
        }
    }
}

impl std::fmt::Display for HandlerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error, self.message)
    }
}

impl std::error::Error for HandlerError {}

impl From<ServiceError> for HandlerError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Validation(messages) => HandlerError::validation(messages),
            ServiceError::AlreadyExists(_) => HandlerError {
                error: HandlerErrorKind::Conflict,
                message: err.to_string(),
                details: None,
            },
            ServiceError::InvalidCredentials => HandlerError {
                error: HandlerErrorKind::Unauthorized,
                message: err.to_string(),
                details: None,
            },
            ServiceError::Unauthenticated => HandlerError {
                error: HandlerErrorKind::Unauthorized,
                message: err.to_string(),
                details: None,
            },
            ServiceError::Forbidden(_) => HandlerError {
                error: HandlerErrorKind::Forbidden,
                message: err.to_string(),
                details: None,
            },
            ServiceError::NotFound(_) => HandlerError {
                error: HandlerErrorKind::NotFound,
                message: err.to_string(),
                details: None,
            },
            ServiceError::Internal(_) => HandlerError::internal(err.to_string()),
        }
    }
}

impl From<crate::util::cookie::CookieError> for HandlerError {
    fn from(err: crate::util::cookie::CookieError) -> Self {
        HandlerError::internal(err.to_string())
    }
}

impl IntoResponse for HandlerError {
    fn into_response(self) -> Response {
        let status = match self.error {
            HandlerErrorKind::NotFound => StatusCode::NOT_FOUND,
            HandlerErrorKind::Validation | HandlerErrorKind::BadRequest => StatusCode::BAD_REQUEST,
            HandlerErrorKind::Unauthorized => StatusCode::UNAUTHORIZED,
            HandlerErrorKind::Forbidden => StatusCode::FORBIDDEN,
            HandlerErrorKind::Conflict => StatusCode::CONFLICT,
            HandlerErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = axum::Json(self);
        (status, body).into_response()
    }
}
