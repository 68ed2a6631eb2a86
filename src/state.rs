//! Shared application state handed to every handler.

use std::sync::Arc;

use crate::{locks::LockRegistry, store::Store};

/// State shared across the router via axum's `State` extractor.
///
/// The store is held as a trait object so the same router serves Postgres in
/// production and the in-memory store in tests.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub locks: Arc<LockRegistry>,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self {
            store,
            locks: Arc::new(LockRegistry::new()),
        }
    }
}
