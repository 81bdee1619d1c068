//! Implements a struct that holds the state of the REST server.

use axum::extract::FromRef;

use crate::Ledger;

/// The state of the REST server.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The store that every transaction is read from and appended to.
    pub ledger: Ledger,
}

impl AppState {
    /// Create a new [AppState] that serves `ledger`.
    pub fn new(ledger: Ledger) -> Self {
        Self { ledger }
    }
}

impl FromRef<AppState> for Ledger {
    fn from_ref(state: &AppState) -> Self {
        state.ledger.clone()
    }
}
