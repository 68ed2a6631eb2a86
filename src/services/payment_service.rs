//! Payment service - balance mutation and transfer-limit enforcement.
//!
//! This is the only module with non-trivial branching logic. Every mutation
//! runs inside a per-user critical section (see [`crate::locks`]) so that two
//! concurrent requests against the same balance cannot both validate against
//! a stale read. Checks run in a fixed order and short-circuit: exactly one
//! reason is reported per call, even when several rules are violated at once.

use chrono::Utc;

use crate::{
    error::AppError,
    models::transaction::{NewTransaction, Transaction},
    state::AppState,
};

/// Maximum amount a balance may ever hold.
pub const MAX_BALANCE_LIMIT: i64 = 100_000;

/// Maximum amount allowed in a single transfer.
pub const MAX_TRANSFER_LIMIT: i64 = 20_000;

/// Maximum total a sender may transfer per UTC calendar day.
pub const MAX_DAILY_TRANSFER_AMOUNT: i64 = 50_000;

/// Maximum number of transfers a sender may make per UTC calendar day.
pub const MAX_DAILY_TRANSFER_COUNT: usize = 3;

/// Enable or disable UPI for a user.
///
/// Returns the new flag value. The flag has no transition rules; it may be
/// toggled freely in either direction.
///
/// # Errors
///
/// - `NotFound`: no user with that phone number
/// - `Storage`: persistence failure
pub async fn update_upi_status(
    state: &AppState,
    phone_number: &str,
    enable: bool,
) -> Result<bool, AppError> {
    let _guard = state.locks.acquire(phone_number).await;

    let mut user = state
        .store
        .find_user_by_phone(phone_number)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found.".to_string()))?;

    user.is_upi_enabled = enable;
    state.store.update_user(&user).await?;

    tracing::info!(phone = %phone_number, enabled = enable, "upi status updated");
    Ok(enable)
}

/// Retrieve a user's current balance. Read-only, takes no lock.
pub async fn get_balance(state: &AppState, phone_number: &str) -> Result<i64, AppError> {
    let user = state
        .store
        .find_user_by_phone(phone_number)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found.".to_string()))?;

    Ok(user.balance)
}

/// Deposit money into a user's account and return the new balance.
///
/// # Process
///
/// Checked in order under the user's lock; the first violation wins:
///
/// 1. User must exist
/// 2. User must have UPI enabled
/// 3. Amount must be positive
/// 4. The new balance must not exceed [`MAX_BALANCE_LIMIT`]
///
/// # Errors
///
/// - `NotFound`, `UpiDisabled`, `InvalidArgument`, `LimitExceeded` per the
///   checks above
/// - `Storage`: persistence failure
pub async fn add_money(
    state: &AppState,
    phone_number: &str,
    amount: i64,
) -> Result<i64, AppError> {
    let _guard = state.locks.acquire(phone_number).await;

    let mut user = state
        .store
        .find_user_by_phone(phone_number)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found.".to_string()))?;

    if !user.is_upi_enabled {
        return Err(AppError::UpiDisabled(
            "User's UPI is disabled.".to_string(),
        ));
    }

    if amount <= 0 {
        return Err(AppError::InvalidArgument(
            "Please enter a valid amount.".to_string(),
        ));
    }

    // checked_add keeps absurd amounts from wrapping past the ceiling.
    let new_balance = user
        .balance
        .checked_add(amount)
        .filter(|b| *b <= MAX_BALANCE_LIMIT)
        .ok_or_else(|| {
            AppError::LimitExceeded(
                "Maximum balance limit of \u{20b9}100,000 exceeded.".to_string(),
            )
        })?;

    user.balance = new_balance;
    state.store.update_user(&user).await?;

    tracing::info!(phone = %phone_number, amount, new_balance, "money added");
    Ok(new_balance)
}

/// Transfer money between two users.
///
/// # Process
///
/// An ordered sequence of checks; the first failing check short-circuits and
/// is the sole reported error:
///
/// 1. Amount must be within `1..=20_000`
/// 2. Sender and receiver must be different users
/// 3. Both users must exist (sender checked first)
/// 4. Both must have UPI enabled (sender checked first)
/// 5. Sender balance must cover the amount
/// 6. The sender's same-day sent total plus this amount must not exceed
///    [`MAX_DAILY_TRANSFER_AMOUNT`]
/// 7. The sender's same-day sent count must be below
///    [`MAX_DAILY_TRANSFER_COUNT`]
/// 8. The receiver's balance plus this amount must not exceed
///    [`MAX_BALANCE_LIMIT`]
///
/// Both user locks are held from before the lookups until the store commit,
/// and the store applies the debit, the credit, and the transaction record
/// atomically.
///
/// # Errors
///
/// - `InvalidArgument`, `NotFound`, `UpiDisabled`, `InsufficientFunds`,
///   `LimitExceeded` per the checks above
/// - `Storage`: persistence failure
pub async fn transfer(
    state: &AppState,
    sender_phone: &str,
    receiver_phone: &str,
    amount: i64,
) -> Result<Transaction, AppError> {
    if amount <= 0 || amount > MAX_TRANSFER_LIMIT {
        return Err(AppError::InvalidArgument(
            "Invalid amount. Must be between \u{20b9}1 and \u{20b9}20,000.".to_string(),
        ));
    }

    // Self-transfers are prohibited, and pair locking requires distinct keys.
    if sender_phone == receiver_phone {
        return Err(AppError::InvalidArgument(
            "Sender and receiver must be different.".to_string(),
        ));
    }

    let _guards = state.locks.acquire_pair(sender_phone, receiver_phone).await;

    let mut sender = state
        .store
        .find_user_by_phone(sender_phone)
        .await?
        .ok_or_else(|| AppError::NotFound("Sender not found.".to_string()))?;
    let mut receiver = state
        .store
        .find_user_by_phone(receiver_phone)
        .await?
        .ok_or_else(|| AppError::NotFound("Receiver not found.".to_string()))?;

    if !sender.is_upi_enabled {
        return Err(AppError::UpiDisabled("Sender has UPI disabled.".to_string()));
    }
    if !receiver.is_upi_enabled {
        return Err(AppError::UpiDisabled(
            "Receiver has UPI disabled.".to_string(),
        ));
    }

    if sender.balance < amount {
        return Err(AppError::InsufficientFunds);
    }

    // Same-day window: transfers SENT by this user, bucketed on the UTC
    // calendar date.
    let today = Utc::now().date_naive();
    let history = state.store.find_transactions_by_user(sender.id).await?;
    let sent_today: Vec<_> = history
        .iter()
        .filter(|t| t.sender_id == sender.id && t.timestamp.date_naive() == today)
        .collect();

    let total_today: i64 = sent_today.iter().map(|t| t.amount).sum();
    if total_today + amount > MAX_DAILY_TRANSFER_AMOUNT {
        return Err(AppError::LimitExceeded(
            "Transfer would exceed the daily limit of \u{20b9}50,000.".to_string(),
        ));
    }

    if sent_today.len() >= MAX_DAILY_TRANSFER_COUNT {
        return Err(AppError::LimitExceeded(
            "Maximum of 3 transfers allowed per day.".to_string(),
        ));
    }

    if receiver.balance + amount > MAX_BALANCE_LIMIT {
        return Err(AppError::LimitExceeded(
            "Receiver's balance would exceed \u{20b9}100,000.".to_string(),
        ));
    }

    sender.balance -= amount;
    receiver.balance += amount;

    let transaction = state
        .store
        .apply_transfer(
            &sender,
            &receiver,
            NewTransaction {
                sender_id: sender.id,
                receiver_id: receiver.id,
                amount,
                timestamp: Utc::now(),
            },
        )
        .await?;

    tracing::info!(
        transaction_id = transaction.id,
        from = %sender_phone,
        to = %receiver_phone,
        amount,
        "transfer completed"
    );
    Ok(transaction)
}
