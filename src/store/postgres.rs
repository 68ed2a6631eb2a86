//! PostgreSQL store backed by a sqlx connection pool.
//!
//! # Atomicity Guarantees
//!
//! `apply_transfer` runs inside a database transaction with `FOR UPDATE` row
//! locks, so both balance updates and the transaction insert commit as one
//! unit. Row locks are taken in ascending user-id order.

use async_trait::async_trait;

use crate::{
    db::DbPool,
    models::{
        transaction::{NewTransaction, Transaction},
        user::{NewUser, User},
    },
    store::{Store, StoreError},
};

/// [`Store`] implementation over a Postgres pool.
#[derive(Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Store for PgStore {
    async fn find_user_by_phone(&self, phone_number: &str) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, phone_number, is_upi_enabled, balance FROM users WHERE phone_number = $1",
        )
        .bind(phone_number)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn find_user_by_id(&self, id: i64) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, phone_number, is_upi_enabled, balance FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn insert_user(&self, new_user: NewUser) -> Result<User, StoreError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (phone_number, is_upi_enabled, balance)
            VALUES ($1, $2, $3)
            RETURNING id, phone_number, is_upi_enabled, balance
            "#,
        )
        .bind(&new_user.phone_number)
        .bind(new_user.is_upi_enabled)
        .bind(new_user.balance)
        .fetch_one(&self.pool)
        .await
        .map_err(|err| {
            // The unique index on phone_number is the last line of defense
            // against racing registrations.
            if let sqlx::Error::Database(db) = &err {
                if db.is_unique_violation() {
                    return StoreError::DuplicatePhone;
                }
            }
            StoreError::Database(err)
        })?;

        Ok(user)
    }

    async fn update_user(&self, user: &User) -> Result<(), StoreError> {
        sqlx::query("UPDATE users SET is_upi_enabled = $1, balance = $2 WHERE id = $3")
            .bind(user.is_upi_enabled)
            .bind(user.balance)
            .bind(user.id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn insert_transaction(
        &self,
        new_transaction: NewTransaction,
    ) -> Result<Transaction, StoreError> {
        let transaction = sqlx::query_as::<_, Transaction>(
            r#"
            INSERT INTO transactions (sender_id, receiver_id, amount, timestamp)
            VALUES ($1, $2, $3, $4)
            RETURNING id, sender_id, receiver_id, amount, timestamp
            "#,
        )
        .bind(new_transaction.sender_id)
        .bind(new_transaction.receiver_id)
        .bind(new_transaction.amount)
        .bind(new_transaction.timestamp)
        .fetch_one(&self.pool)
        .await?;

        Ok(transaction)
    }

    async fn find_transactions_by_user(&self, user_id: i64) -> Result<Vec<Transaction>, StoreError> {
        let transactions = sqlx::query_as::<_, Transaction>(
            r#"
            SELECT id, sender_id, receiver_id, amount, timestamp
            FROM transactions
            WHERE sender_id = $1 OR receiver_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(transactions)
    }

    async fn apply_transfer(
        &self,
        sender: &User,
        receiver: &User,
        new_transaction: NewTransaction,
    ) -> Result<Transaction, StoreError> {
        let mut tx = self.pool.begin().await?;

        // Lock both rows in ascending id order.
        let (first, second) = if sender.id < receiver.id {
            (sender, receiver)
        } else {
            (receiver, sender)
        };
        for user in [first, second] {
            sqlx::query("SELECT id FROM users WHERE id = $1 FOR UPDATE")
                .bind(user.id)
                .execute(&mut *tx)
                .await?;
        }

        for user in [sender, receiver] {
            sqlx::query("UPDATE users SET is_upi_enabled = $1, balance = $2 WHERE id = $3")
                .bind(user.is_upi_enabled)
                .bind(user.balance)
                .bind(user.id)
                .execute(&mut *tx)
                .await?;
        }

        let transaction = sqlx::query_as::<_, Transaction>(
            r#"
            INSERT INTO transactions (sender_id, receiver_id, amount, timestamp)
            VALUES ($1, $2, $3, $4)
            RETURNING id, sender_id, receiver_id, amount, timestamp
            "#,
        )
        .bind(new_transaction.sender_id)
        .bind(new_transaction.receiver_id)
        .bind(new_transaction.amount)
        .bind(new_transaction.timestamp)
        .fetch_one(&mut *tx)
        .await?;

        // All three mutations become visible together, or not at all.
        tx.commit().await?;

        Ok(transaction)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
