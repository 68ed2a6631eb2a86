//! Persistence gateway consumed by the account and payment services.
//!
//! The services never talk to a database driver directly; they go through the
//! [`Store`] trait so the same business logic runs against Postgres in
//! production and against [`MemoryStore`] in tests and local development.

use async_trait::async_trait;

use crate::models::{
    transaction::{NewTransaction, Transaction},
    user::{NewUser, User},
};

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Errors surfaced by a store implementation.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Phone-number uniqueness violated on insert.
    #[error("phone number already registered")]
    DuplicatePhone,

    /// Underlying database failure, passed through uninterpreted.
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// Storage contract for users and transactions.
///
/// Users are never deleted; transactions are insert-only. `apply_transfer`
/// is the one multi-row operation and must be atomic: both user updates and
/// the transaction insert become visible together or not at all.
#[async_trait]
pub trait Store: Send + Sync {
    /// Point lookup by phone number.
    async fn find_user_by_phone(&self, phone_number: &str) -> Result<Option<User>, StoreError>;

    /// Point lookup by surrogate id.
    async fn find_user_by_id(&self, id: i64) -> Result<Option<User>, StoreError>;

    /// Insert a new user and return the persisted record with its assigned id.
    ///
    /// Fails with [`StoreError::DuplicatePhone`] if the phone number is taken.
    async fn insert_user(&self, new_user: NewUser) -> Result<User, StoreError>;

    /// Persist the mutable fields (UPI flag, balance) of an existing user.
    async fn update_user(&self, user: &User) -> Result<(), StoreError>;

    /// Insert a single transaction record.
    async fn insert_transaction(
        &self,
        new_transaction: NewTransaction,
    ) -> Result<Transaction, StoreError>;

    /// All transactions where the user appears as sender or receiver.
    async fn find_transactions_by_user(&self, user_id: i64) -> Result<Vec<Transaction>, StoreError>;

    /// Atomically persist both sides of a transfer plus its record.
    ///
    /// `sender` and `receiver` carry the already-debited/credited balances.
    async fn apply_transfer(
        &self,
        sender: &User,
        receiver: &User,
        new_transaction: NewTransaction,
    ) -> Result<Transaction, StoreError>;

    /// Connectivity probe used by the health endpoint.
    async fn ping(&self) -> Result<(), StoreError>;
}
