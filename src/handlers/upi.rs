//! UPI payment HTTP handlers.
//!
//! This module implements the money-movement API endpoints:
//! - PATCH /api/upi/upi-status/:phone_number - Enable or disable UPI
//! - GET /api/upi/balance/:phone_number - Query current balance
//! - PUT /api/upi/add-money/:phone_number - Deposit funds
//! - POST /api/upi/transfer - Transfer funds between users

use axum::{
    Json,
    extract::{Path, State},
};

use crate::{
    error::AppError,
    handlers::validate_phone,
    models::transaction::{AddMoneyRequest, TransferRequest},
    response::ApiResponse,
    services::payment_service,
    state::AppState,
};

/// Enable or disable UPI for a user.
///
/// # Endpoint
///
/// `PATCH /api/upi/upi-status/{phone_number}`
///
/// # Request Body
///
/// A bare JSON boolean: `true` to enable, `false` to disable.
///
/// # Response
///
/// - **Success (200)**: envelope with the new flag value
/// - **Error (404)**: no user with that phone number
pub async fn update_upi_status(
    State(state): State<AppState>,
    Path(phone_number): Path<String>,
    Json(enable): Json<bool>,
) -> Result<Json<ApiResponse<bool>>, AppError> {
    validate_phone(&phone_number)?;

    let enabled = payment_service::update_upi_status(&state, &phone_number, enable).await?;

    let message = if enabled { "UPI enabled." } else { "UPI disabled." };
    Ok(Json(ApiResponse::success(message, enabled)))
}

/// Get a user's current balance.
///
/// # Endpoint
///
/// `GET /api/upi/balance/{phone_number}`
pub async fn get_balance(
    State(state): State<AppState>,
    Path(phone_number): Path<String>,
) -> Result<Json<ApiResponse<i64>>, AppError> {
    validate_phone(&phone_number)?;

    let balance = payment_service::get_balance(&state, &phone_number).await?;

    Ok(Json(ApiResponse::success(
        "User balance retrieved successfully.",
        balance,
    )))
}

/// Deposit money into a user's account.
///
/// # Endpoint
///
/// `PUT /api/upi/add-money/{phone_number}`
///
/// # Request Body
///
/// ```json
/// {
///   "amount": 500
/// }
/// ```
///
/// # Response
///
/// - **Success (200)**: envelope with the new balance
/// - **Error (400)**: UPI disabled, non-positive amount, or balance ceiling
/// - **Error (404)**: no user with that phone number
pub async fn add_money(
    State(state): State<AppState>,
    Path(phone_number): Path<String>,
    Json(request): Json<AddMoneyRequest>,
) -> Result<Json<ApiResponse<i64>>, AppError> {
    validate_phone(&phone_number)?;

    let new_balance = payment_service::add_money(&state, &phone_number, request.amount).await?;

    Ok(Json(ApiResponse::success(
        "Amount successfully added.",
        new_balance,
    )))
}

/// Transfer money between two users.
///
/// # Endpoint
///
/// `POST /api/upi/transfer`
///
/// # Request Body
///
/// ```json
/// {
///   "sender_phone_number": "9000000001",
///   "receiver_phone_number": "9000000002",
///   "amount": 500
/// }
/// ```
///
/// # Response
///
/// - **Success (200)**: envelope with `data: true`
/// - **Error (400)**: validation, limit, or funds failure (single reason)
/// - **Error (404)**: sender or receiver unknown
pub async fn transfer(
    State(state): State<AppState>,
    Json(request): Json<TransferRequest>,
) -> Result<Json<ApiResponse<bool>>, AppError> {
    validate_phone(&request.sender_phone_number)?;
    validate_phone(&request.receiver_phone_number)?;

    payment_service::transfer(
        &state,
        &request.sender_phone_number,
        &request.receiver_phone_number,
        request.amount,
    )
    .await?;

    Ok(Json(ApiResponse::success("Transfer successful.", true)))
}
