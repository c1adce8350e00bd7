use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use error_types::{error_codes, error_types as kinds, ErrorResponse};
use thiserror::Error;

use crate::services::RecommendError;

pub type Result<T> = std::result::Result<T, AppError>;

/// Message shown when the selected title is not in the catalog.
pub const BOOK_NOT_FOUND_MESSAGE: &str =
    "Book not found in the database. Please select another book.";

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Book not found: {0}")]
    BookNotFound(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid top_k: {0}")]
    InvalidTopK(String),
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::BookNotFound(_) => StatusCode::NOT_FOUND,
            AppError::ValidationError(_) | AppError::InvalidTopK(_) => StatusCode::BAD_REQUEST,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let (error_type, code, message) = match self {
            AppError::BookNotFound(_) => (
                kinds::NOT_FOUND_ERROR,
                error_codes::BOOK_NOT_FOUND,
                BOOK_NOT_FOUND_MESSAGE.to_string(),
            ),
            AppError::ValidationError(msg) => (
                kinds::VALIDATION_ERROR,
                error_codes::INVALID_REQUEST,
                msg.clone(),
            ),
            AppError::InvalidTopK(msg) => (
                kinds::VALIDATION_ERROR,
                error_codes::INVALID_TOP_K,
                msg.clone(),
            ),
        };

        let mut response = ErrorResponse::new(
            match status {
                StatusCode::BAD_REQUEST => "Bad Request",
                StatusCode::NOT_FOUND => "Not Found",
                _ => "Error",
            },
            &message,
            status.as_u16(),
            error_type,
            code,
        );
        if let AppError::BookNotFound(title) = self {
            response = response.with_details(format!("title: {}", title));
        }

        HttpResponse::build(status).json(response)
    }
}

impl From<RecommendError> for AppError {
    fn from(err: RecommendError) -> Self {
        match err {
            RecommendError::NotFound(title) => AppError::BookNotFound(title),
            RecommendError::InvalidTopK => {
                AppError::InvalidTopK(RecommendError::InvalidTopK.to_string())
            }
        }
    }
}
