//! HTTP request handlers (route handlers).
//!
//! Each handler is an async function that:
//! 1. Receives HTTP request data (JSON body, URL params, etc.)
//! 2. Validates transport-level concerns (phone number format)
//! 3. Calls into the service layer
//! 4. Wraps the result in the success envelope

use crate::error::AppError;

/// Service health endpoint
pub mod health;
/// UPI money-movement endpoints
pub mod upi;
/// User management endpoints
pub mod users;

/// Transport-boundary check: phone numbers are exactly 10 decimal digits.
///
/// The services assume this already held; they only check existence and
/// uniqueness.
pub(crate) fn validate_phone(phone_number: &str) -> Result<(), AppError> {
    if phone_number.len() == 10 && phone_number.bytes().all(|b| b.is_ascii_digit()) {
        Ok(())
    } else {
        Err(AppError::InvalidArgument(
            "Invalid phone number.".to_string(),
        ))
    }
}
