//! JSON endpoints for listing and appending transactions.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use serde::Serialize;

use crate::{
    Error,
    ledger::{
        balance::{RunningBalance, project},
        core::Transaction,
        form::TransactionForm,
        store::Ledger,
    },
};

/// The envelope every successful API response is wrapped in.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    /// Always "success".
    pub message: &'static str,
    /// The requested data.
    pub data: T,
}

impl<T> ApiResponse<T> {
    fn success(data: T) -> Json<Self> {
        Json(Self {
            message: "success",
            data,
        })
    }
}

/// A route handler that returns every transaction in ascending ID order.
pub async fn list_transactions_endpoint(
    State(ledger): State<Ledger>,
) -> Result<Json<ApiResponse<Vec<Transaction>>>, Error> {
    let transactions = ledger
        .list_all()
        .inspect_err(|error| tracing::error!("could not list transactions: {error}"))?;

    Ok(ApiResponse::success(transactions))
}

/// A route handler for appending a transaction from a JSON body.
///
/// Responds with the stored transaction, including its assigned ID and date.
pub async fn create_transaction_endpoint(
    State(ledger): State<Ledger>,
    payload: Result<Json<TransactionForm>, JsonRejection>,
) -> Result<Json<ApiResponse<Transaction>>, Error> {
    let Json(form) = payload.map_err(|rejection| Error::InvalidRequestBody(rejection.body_text()))?;

    let new_transaction = form
        .validate()
        .inspect_err(|error| tracing::debug!("rejected transaction: {error}"))?;

    let transaction = ledger
        .append(new_transaction)
        .inspect_err(|error| tracing::error!("could not create transaction: {error}"))?;

    Ok(ApiResponse::success(transaction))
}

/// A route handler that returns every transaction with its running balance.
pub async fn list_balances_endpoint(
    State(ledger): State<Ledger>,
) -> Result<Json<ApiResponse<Vec<RunningBalanceRow>>>, Error> {
    let transactions = ledger
        .list_all()
        .inspect_err(|error| tracing::error!("could not list transactions: {error}"))?;

    let rows = project(&transactions)
        .into_iter()
        .map(RunningBalanceRow::from)
        .collect();

    Ok(ApiResponse::success(rows))
}

/// An owned [RunningBalance] so it can outlive the transactions it was projected from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunningBalanceRow {
    #[serde(flatten)]
    transaction: Transaction,
    running_total: f64,
}

impl From<RunningBalance<'_>> for RunningBalanceRow {
    fn from(row: RunningBalance<'_>) -> Self {
        Self {
            transaction: row.transaction.clone(),
            running_total: row.running_total,
        }
    }
}
