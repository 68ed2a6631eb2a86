//! Transaction data models and API request types.
//!
//! This module defines:
//! - `Transaction`: Database entity representing a completed transfer
//! - `NewTransaction`: Insert payload before the store assigns an id
//! - Request types for the deposit and transfer operations

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Represents a transaction record from the database.
///
/// # Database Table
///
/// Maps to the `transactions` table. Each transaction:
/// - References exactly two users (sender and receiver)
/// - Stores the amount in whole rupees (never floats)
/// - Is immutable once created; there is no update or delete path
///
/// The `timestamp` buckets the record into a UTC calendar day for the
/// daily-limit calculations. The day boundary is 00:00 UTC.
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct Transaction {
    /// Unique identifier, assigned by the store at insert time
    pub id: i64,

    /// User that sent the money
    pub sender_id: i64,

    /// User that received the money
    pub receiver_id: i64,

    /// Amount in whole rupees, strictly positive
    pub amount: i64,

    /// Creation instant (UTC)
    pub timestamp: DateTime<Utc>,
}

/// Insert payload for a transaction that does not have an id yet.
#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub sender_id: i64,
    pub receiver_id: i64,
    pub amount: i64,
    pub timestamp: DateTime<Utc>,
}

/// Request body for depositing money into an account.
///
/// # JSON Example
///
/// ```json
/// {
///   "amount": 500
/// }
/// ```
#[derive(Debug, Deserialize)]
pub struct AddMoneyRequest {
    /// Amount to add in whole rupees
    pub amount: i64,
}

/// Request body for transferring money between two users.
///
/// # JSON Example
///
/// ```json
/// {
///   "sender_phone_number": "9000000001",
///   "receiver_phone_number": "9000000002",
///   "amount": 500
/// }
/// ```
///
/// # Atomicity Guarantee
///
/// Both balances and the transaction record land in one storage commit.
/// A half-applied transfer is never observable.
#[derive(Debug, Deserialize)]
pub struct TransferRequest {
    /// Phone number of the account to debit
    pub sender_phone_number: String,

    /// Phone number of the account to credit
    pub receiver_phone_number: String,

    /// Amount to transfer in whole rupees
    pub amount: i64,
}
