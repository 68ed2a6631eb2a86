//! Error types and HTTP error response handling.
//!
//! This module defines all application errors and how they are converted
//! into HTTP responses with appropriate status codes and envelope bodies.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{response::ApiResponse, store::StoreError};

/// Application-wide error type.
///
/// Every business-rule violation is a value of this enum; none of them are
/// allowed to escape the service layer as a panic. Each variant maps to a
/// specific HTTP status code, and the message inside the variant is exactly
/// what the client sees in the failure envelope.
///
/// # Error Categories
///
/// - **Storage Errors**: Any `StoreError` from the persistence gateway
/// - **Resource Errors**: Requested user not found, duplicate registration
/// - **Business Logic Errors**: Disabled UPI, insufficient funds, limits
/// - **Validation Errors**: Malformed phone numbers, out-of-range amounts
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Persistence gateway failure, propagated uninterpreted.
    ///
    /// Returns HTTP 500 with a generic message; internal details are logged,
    /// never sent to the client.
    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),

    /// No user exists for the given phone number.
    ///
    /// Returns HTTP 404 Not Found.
    #[error("{0}")]
    NotFound(String),

    /// A user with the given phone number already exists.
    ///
    /// Returns HTTP 409 Conflict.
    #[error("{0}")]
    Conflict(String),

    /// Request parameters violate a range or format rule.
    ///
    /// Returns HTTP 400 Bad Request.
    #[error("{0}")]
    InvalidArgument(String),

    /// UPI is disabled for a user involved in the operation.
    ///
    /// Returns HTTP 400 Bad Request.
    #[error("{0}")]
    UpiDisabled(String),

    /// Sender balance is too low for the requested transfer.
    ///
    /// Returns HTTP 400 Bad Request.
    #[error("Insufficient balance.")]
    InsufficientFunds,

    /// A per-transfer, daily, or balance ceiling would be breached.
    ///
    /// Returns HTTP 400 Bad Request.
    #[error("{0}")]
    LimitExceeded(String),
}

/// Convert AppError into an HTTP response.
///
/// This implementation allows Axum handlers to return `Result<T, AppError>`
/// and have errors automatically converted into the failure envelope:
///
/// ```json
/// {
///   "success": false,
///   "message": "Insufficient balance.",
///   "data": null
/// }
/// ```
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            AppError::InvalidArgument(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::UpiDisabled(msg) => (StatusCode::BAD_REQUEST, msg),
            err @ AppError::InsufficientFunds => (StatusCode::BAD_REQUEST, err.to_string()),
            AppError::LimitExceeded(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Storage(err) => {
                tracing::error!(error = %err, "storage failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal error occurred.".to_string(),
                )
            }
        };

        (status, Json(ApiResponse::<()>::failure(message))).into_response()
    }
}
