//! In-process store used by the test suite and for local development
//! without a database.
//!
//! All state lives behind a single `parking_lot::RwLock`, which is never held
//! across an await point. Holding the write lock for the whole of
//! `apply_transfer` gives the same all-or-nothing visibility the Postgres
//! implementation gets from a database transaction.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::{
    models::{
        transaction::{NewTransaction, Transaction},
        user::{NewUser, User},
    },
    store::{Store, StoreError},
};

#[derive(Default)]
struct Inner {
    users: HashMap<i64, User>,
    phone_index: HashMap<String, i64>,
    transactions: Vec<Transaction>,
    next_user_id: i64,
    next_transaction_id: i64,
}

/// [`Store`] implementation over plain hash maps.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn find_user_by_phone(&self, phone_number: &str) -> Result<Option<User>, StoreError> {
        let inner = self.inner.read();
        Ok(inner
            .phone_index
            .get(phone_number)
            .and_then(|id| inner.users.get(id))
            .cloned())
    }

    async fn find_user_by_id(&self, id: i64) -> Result<Option<User>, StoreError> {
        Ok(self.inner.read().users.get(&id).cloned())
    }

    async fn insert_user(&self, new_user: NewUser) -> Result<User, StoreError> {
        let mut inner = self.inner.write();
        if inner.phone_index.contains_key(&new_user.phone_number) {
            return Err(StoreError::DuplicatePhone);
        }

        inner.next_user_id += 1;
        let user = User {
            id: inner.next_user_id,
            phone_number: new_user.phone_number,
            is_upi_enabled: new_user.is_upi_enabled,
            balance: new_user.balance,
        };
        inner
            .phone_index
            .insert(user.phone_number.clone(), user.id);
        inner.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update_user(&self, user: &User) -> Result<(), StoreError> {
        let mut inner = self.inner.write();
        if let Some(existing) = inner.users.get_mut(&user.id) {
            existing.is_upi_enabled = user.is_upi_enabled;
            existing.balance = user.balance;
        }
        Ok(())
    }

    async fn insert_transaction(
        &self,
        new_transaction: NewTransaction,
    ) -> Result<Transaction, StoreError> {
        let mut inner = self.inner.write();
        let transaction = record(&mut inner, new_transaction);
        Ok(transaction)
    }

    async fn find_transactions_by_user(&self, user_id: i64) -> Result<Vec<Transaction>, StoreError> {
        Ok(self
            .inner
            .read()
            .transactions
            .iter()
            .filter(|t| t.sender_id == user_id || t.receiver_id == user_id)
            .cloned()
            .collect())
    }

    async fn apply_transfer(
        &self,
        sender: &User,
        receiver: &User,
        new_transaction: NewTransaction,
    ) -> Result<Transaction, StoreError> {
        let mut inner = self.inner.write();

        for user in [sender, receiver] {
            if let Some(existing) = inner.users.get_mut(&user.id) {
                existing.is_upi_enabled = user.is_upi_enabled;
                existing.balance = user.balance;
            }
        }

        let transaction = record(&mut inner, new_transaction);
        Ok(transaction)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

fn record(inner: &mut Inner, new_transaction: NewTransaction) -> Transaction {
    inner.next_transaction_id += 1;
    let transaction = Transaction {
        id: inner.next_transaction_id,
        sender_id: new_transaction.sender_id,
        receiver_id: new_transaction.receiver_id,
        amount: new_transaction.amount,
        timestamp: new_transaction.timestamp,
    };
    inner.transactions.push(transaction.clone());
    transaction
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn new_user(phone: &str, balance: i64) -> NewUser {
        NewUser {
            phone_number: phone.to_string(),
            is_upi_enabled: true,
            balance,
        }
    }

    #[tokio::test]
    async fn insert_assigns_sequential_ids_and_indexes_phone() {
        let store = MemoryStore::new();
        let a = store.insert_user(new_user("9000000001", 100)).await.unwrap();
        let b = store.insert_user(new_user("9000000002", 200)).await.unwrap();
        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);

        let by_id = store.find_user_by_id(b.id).await.unwrap().unwrap();
        assert_eq!(by_id.phone_number, "9000000002");
        let by_phone = store
            .find_user_by_phone("9000000001")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(by_phone.balance, 100);
    }

    #[tokio::test]
    async fn duplicate_phone_is_rejected() {
        let store = MemoryStore::new();
        store.insert_user(new_user("9000000001", 0)).await.unwrap();
        let err = store
            .insert_user(new_user("9000000001", 50))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::DuplicatePhone));
    }

    #[tokio::test]
    async fn transactions_are_found_from_both_sides() {
        let store = MemoryStore::new();
        let a = store.insert_user(new_user("9000000001", 100)).await.unwrap();
        let b = store.insert_user(new_user("9000000002", 0)).await.unwrap();
        store
            .insert_transaction(NewTransaction {
                sender_id: a.id,
                receiver_id: b.id,
                amount: 40,
                timestamp: Utc::now(),
            })
            .await
            .unwrap();

        assert_eq!(store.find_transactions_by_user(a.id).await.unwrap().len(), 1);
        assert_eq!(store.find_transactions_by_user(b.id).await.unwrap().len(), 1);
    }
}
