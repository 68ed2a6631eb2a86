//! User management HTTP handlers.
//!
//! This module implements the user-related API endpoints:
//! - POST /api/users - Register a new user
//! - GET /api/users/:phone_number - Get user info
//! - GET /api/users/validate/:phone_number - Existence (login) check
//! - GET /api/users/validate-receiver - Pre-transfer pair check

use axum::{
    Json,
    extract::{Path, Query, State},
};

use crate::{
    error::AppError,
    handlers::validate_phone,
    models::user::{RegisterUserRequest, UserInfoResponse, ValidateReceiverQuery},
    response::ApiResponse,
    services::account_service,
    state::AppState,
};

/// Register a new user.
///
/// # Endpoint
///
/// `POST /api/users`
///
/// # Request Body
///
/// ```json
/// {
///   "phone_number": "9000000001",
///   "initial_balance": 1000
/// }
/// ```
///
/// # Response
///
/// - **Success (200)**: envelope with the new user's public view
/// - **Error (409)**: phone number already registered
/// - **Error (400)**: malformed phone number or out-of-range balance
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterUserRequest>,
) -> Result<Json<ApiResponse<UserInfoResponse>>, AppError> {
    validate_phone(&request.phone_number)?;

    let info =
        account_service::register_user(&state, &request.phone_number, request.initial_balance)
            .await?;

    Ok(Json(ApiResponse::success(
        "User registered successfully.",
        info,
    )))
}

/// Get user info by phone number.
///
/// # Endpoint
///
/// `GET /api/users/{phone_number}`
pub async fn get_user_info(
    State(state): State<AppState>,
    Path(phone_number): Path<String>,
) -> Result<Json<ApiResponse<UserInfoResponse>>, AppError> {
    validate_phone(&phone_number)?;

    let info = account_service::get_user_info(&state, &phone_number).await?;

    Ok(Json(ApiResponse::success("User data retrieved.", info)))
}

/// Check whether a user exists (login probe).
///
/// # Endpoint
///
/// `GET /api/users/validate/{phone_number}`
pub async fn validate_user(
    State(state): State<AppState>,
    Path(phone_number): Path<String>,
) -> Result<Json<ApiResponse<UserInfoResponse>>, AppError> {
    validate_phone(&phone_number)?;

    let info = account_service::validate_user(&state, &phone_number).await?;

    Ok(Json(ApiResponse::success("User is valid.", info)))
}

/// Validate a sender/receiver pair ahead of a transfer.
///
/// # Endpoint
///
/// `GET /api/users/validate-receiver?sender_phone=...&receiver_phone=...`
///
/// The success payload is the sender's view; see
/// [`account_service::validate_receiver`].
pub async fn validate_receiver(
    State(state): State<AppState>,
    Query(query): Query<ValidateReceiverQuery>,
) -> Result<Json<ApiResponse<UserInfoResponse>>, AppError> {
    validate_phone(&query.sender_phone)?;
    validate_phone(&query.receiver_phone)?;

    let info =
        account_service::validate_receiver(&state, &query.sender_phone, &query.receiver_phone)
            .await?;

    Ok(Json(ApiResponse::success("Receiver is valid.", info)))
}
