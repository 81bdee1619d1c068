//! The transaction ledger.
//!
//! This module contains everything related to ledger transactions:
//! - The `Transaction` model and the `Ledger` store that appends and lists them
//! - The running balance projection
//! - The JSON API and the HTML ledger page

mod api;
mod balance;
mod core;
mod form;
mod page;
mod store;

pub use api::{create_transaction_endpoint, list_balances_endpoint, list_transactions_endpoint};
pub use balance::{RunningBalance, balance, project};
pub use self::core::{NewTransaction, Transaction, TransactionType, create_transaction_table};
pub use form::{AmountField, TransactionForm};
pub use page::{create_transaction_form_endpoint, get_ledger_page};
pub use store::Ledger;
