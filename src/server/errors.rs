use std::any::Any;

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Bad Request")]
    BadRequest,
    #[error("Resource Not Found")]
    NotFound,
    #[error("Method Not Allowed")]
    MethodNotAllowed,
    #[error("Unprocessable")]
    Unprocessable,
    /// Every question the quiz could ask has already been asked.
    #[error("No questions left to play")]
    QuestionsExhausted,
    #[error("Internal Server Error")]
    Internal,
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest => StatusCode::BAD_REQUEST,
            ApiError::NotFound | ApiError::QuestionsExhausted => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Unprocessable => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self) -> &'static str {
        match self {
            ApiError::BadRequest => "Bad Request",
            ApiError::NotFound | ApiError::QuestionsExhausted => "Resource Not Found",
            ApiError::MethodNotAllowed => "Method Not Allowed",
            ApiError::Unprocessable => "Unprocessable",
            ApiError::Internal => "Internal Server Error",
        }
    }

    /// For operations where any database failure is the client's problem.
    pub fn unprocessable(error: sqlx::Error) -> Self {
        tracing::warn!("Rejecting request: {error}");
        ApiError::Unprocessable
    }

    pub fn not_found(error: sqlx::Error) -> Self {
        tracing::warn!("Reporting missing resource: {error}");
        ApiError::NotFound
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(error: sqlx::Error) -> Self {
        match error {
            sqlx::Error::RowNotFound => ApiError::NotFound,
            error => {
                tracing::error!("Database error: {error}");
                ApiError::Internal
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!("Bad JSON body: {rejection}");
        match rejection {
            JsonRejection::JsonDataError(_) => ApiError::Unprocessable,
            _ => ApiError::BadRequest,
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        tracing::debug!("Bad query string: {rejection}");
        ApiError::BadRequest
    }
}

// ids in paths are integers, anything else is an unknown route
impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        tracing::debug!("Bad path: {rejection}");
        ApiError::NotFound
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: u16,
    pub message: &'static str,
    pub success: bool,
}

impl From<&ApiError> for ErrorBody {
    fn from(err: &ApiError) -> Self {
        Self {
            error: err.status_code().as_u16(),
            message: err.message(),
            success: false,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(ErrorBody::from(&self))).into_response()
    }
}

pub async fn not_found_fallback() -> ApiError {
    tracing::info!("Fallback");
    ApiError::NotFound
}

pub async fn method_not_allowed_fallback() -> ApiError {
    ApiError::MethodNotAllowed
}

pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let details = if let Some(s) = err.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        *s
    } else {
        "unknown panic"
    };
    tracing::error!("Handler panicked: {details}");
    ApiError::Internal.into_response()
}
