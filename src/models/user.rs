//! User data models and API request/response types.
//!
//! This module defines:
//! - `User`: Database entity representing a registered user
//! - `NewUser`: Insert payload before the store assigns an id
//! - `RegisterUserRequest`: Request body for registration
//! - `UserInfoResponse`: Public view returned to clients

use serde::{Deserialize, Serialize};

/// Represents a user record from the database.
///
/// # Database Table
///
/// Maps to the `users` table. Each user:
/// - Is identified by a globally unique 10-digit phone number
/// - Carries a UPI flag gating deposits and transfers
/// - Has a balance stored in whole rupees (to avoid floating-point errors)
///
/// # Balance Storage
///
/// Balances are stored as `i64` whole rupees. The balance must stay within
/// `0..=100_000` after every mutation; the database CHECK constraint backstops
/// the non-negative half of that invariant.
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct User {
    /// Unique identifier, assigned by the store at insert time
    pub id: i64,

    /// Exactly 10 ASCII digits, unique, immutable after creation
    pub phone_number: String,

    /// Whether deposits and transfers are currently allowed for this user
    pub is_upi_enabled: bool,

    /// Current balance in whole rupees
    pub balance: i64,
}

/// Insert payload for a user that does not have an id yet.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub phone_number: String,
    pub is_upi_enabled: bool,
    pub balance: i64,
}

/// Request body for registering a new user.
///
/// # JSON Example
///
/// ```json
/// {
///   "phone_number": "9000000001",
///   "initial_balance": 1000
/// }
/// ```
///
/// # Validation
///
/// - `phone_number`: Required, exactly 10 decimal digits (checked at the
///   transport boundary)
/// - `initial_balance`: Optional, defaults to 0, must be within `0..=100_000`
#[derive(Debug, Deserialize)]
pub struct RegisterUserRequest {
    /// Phone number identifying the new user
    pub phone_number: String,

    /// Opening balance in whole rupees (defaults to 0 if not provided)
    #[serde(default)]
    pub initial_balance: i64,
}

/// Query parameters for the pre-transfer receiver validation endpoint.
#[derive(Debug, Deserialize)]
pub struct ValidateReceiverQuery {
    pub sender_phone: String,
    pub receiver_phone: String,
}

/// Public view of a user returned by account endpoints.
///
/// # JSON Example
///
/// ```json
/// {
///   "phone_number": "9000000001",
///   "balance": 1000,
///   "is_upi_enabled": true
/// }
/// ```
#[derive(Debug, Serialize, Deserialize)]
pub struct UserInfoResponse {
    /// Phone number of the user
    pub phone_number: String,

    /// Current balance in whole rupees
    pub balance: i64,

    /// Whether UPI is enabled for this user
    pub is_upi_enabled: bool,
}

/// Convert a database User to its public view.
///
/// The surrogate `id` stays internal; clients address users by phone number.
impl From<User> for UserInfoResponse {
    fn from(user: User) -> Self {
        Self {
            phone_number: user.phone_number,
            balance: user.balance,
            is_upi_enabled: user.is_upi_enabled,
        }
    }
}
