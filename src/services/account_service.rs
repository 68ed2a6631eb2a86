//! Account service - user onboarding and identity/status lookups.
//!
//! No money moves through this module beyond the opening balance set at
//! registration; every later mutation belongs to the payment service.

use crate::{
    error::AppError,
    models::user::{NewUser, UserInfoResponse},
    services::payment_service::MAX_BALANCE_LIMIT,
    state::AppState,
    store::StoreError,
};

/// Register a new user.
///
/// # Process
///
/// 1. Reject the phone number if it is already registered
/// 2. Reject opening balances outside `0..=100_000`
/// 3. Insert the user with UPI enabled by default
///
/// # Errors
///
/// - `Conflict`: phone number already registered (also raised if a racing
///   registration wins between the lookup and the insert)
/// - `InvalidArgument`: opening balance out of range
/// - `Storage`: persistence failure
pub async fn register_user(
    state: &AppState,
    phone_number: &str,
    initial_balance: i64,
) -> Result<UserInfoResponse, AppError> {
    if state
        .store
        .find_user_by_phone(phone_number)
        .await?
        .is_some()
    {
        return Err(AppError::Conflict("User already exists.".to_string()));
    }

    if initial_balance < 0 || initial_balance > MAX_BALANCE_LIMIT {
        return Err(AppError::InvalidArgument(
            "Invalid initial balance. Must be between \u{20b9}0 and \u{20b9}100,000.".to_string(),
        ));
    }

    let user = state
        .store
        .insert_user(NewUser {
            phone_number: phone_number.to_string(),
            is_upi_enabled: true,
            balance: initial_balance,
        })
        .await
        .map_err(|err| match err {
            StoreError::DuplicatePhone => AppError::Conflict("User already exists.".to_string()),
            other => AppError::Storage(other),
        })?;

    tracing::info!(phone = %user.phone_number, balance = user.balance, "user registered");
    Ok(user.into())
}

/// Retrieve a user's public view (phone, balance, UPI flag).
pub async fn get_user_info(
    state: &AppState,
    phone_number: &str,
) -> Result<UserInfoResponse, AppError> {
    let user = state
        .store
        .find_user_by_phone(phone_number)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found.".to_string()))?;

    Ok(user.into())
}

/// Existence check used as a login probe.
pub async fn validate_user(
    state: &AppState,
    phone_number: &str,
) -> Result<UserInfoResponse, AppError> {
    let user = state
        .store
        .find_user_by_phone(phone_number)
        .await?
        .ok_or_else(|| AppError::NotFound("Invalid user. Please register.".to_string()))?;

    Ok(user.into())
}

/// Pre-transfer sanity check on a sender/receiver pair.
///
/// # Process
///
/// 1. Reject identical phone numbers
/// 2. The sender must exist and have UPI enabled
/// 3. The receiver must exist and have UPI enabled
///
/// On success this returns the SENDER's public view, not the receiver's.
/// Clients built against the legacy endpoint read their own balance out of
/// this response, so the behavior is kept even though the endpoint name
/// suggests otherwise.
pub async fn validate_receiver(
    state: &AppState,
    sender_phone: &str,
    receiver_phone: &str,
) -> Result<UserInfoResponse, AppError> {
    if sender_phone == receiver_phone {
        return Err(AppError::InvalidArgument(
            "Sender and receiver must be different.".to_string(),
        ));
    }

    let sender = state
        .store
        .find_user_by_phone(sender_phone)
        .await?
        .ok_or_else(|| AppError::NotFound("Sender not found.".to_string()))?;
    if !sender.is_upi_enabled {
        return Err(AppError::UpiDisabled("Sender has UPI disabled.".to_string()));
    }

    let receiver = state
        .store
        .find_user_by_phone(receiver_phone)
        .await?
        .ok_or_else(|| AppError::NotFound("Receiver not found.".to_string()))?;
    if !receiver.is_upi_enabled {
        return Err(AppError::UpiDisabled(
            "Receiver has UPI disabled.".to_string(),
        ));
    }

    Ok(sender.into())
}
