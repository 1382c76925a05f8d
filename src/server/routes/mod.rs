mod categories;
mod questions;
mod quizzes;

use axum::{
    extract::{FromRequest, FromRequestParts},
    Json,
};

pub use categories::category_router;
pub use questions::questions_router;
pub use quizzes::quizzes_router;

use super::errors::ApiError;

pub type ApiResponse<T> = Result<Json<T>, ApiError>;

/// `Json` whose rejections render as [`ApiError`].
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

/// `Query` whose rejections render as [`ApiError`].
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct ApiQuery<T>(pub T);

/// `Path` whose rejections render as [`ApiError`].
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct ApiPath<T>(pub T);
