//! A personal ledger for recording credits and debits and tracking the
//! running balance.
//!
//! This library provides the ledger store, the running balance projection and
//! an HTTP API that serves both JSON and a server-rendered HTML ledger page.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use serde_json::json;
use tokio::signal;

mod app_state;
mod database_id;
mod db;
mod endpoints;
mod html;
mod ledger;
mod logging;
mod routing;
mod timezone;

#[cfg(test)]
mod test_utils;

pub use app_state::AppState;
pub use database_id::TransactionId;
pub use db::initialize as initialize_db;
pub use ledger::{
    AmountField, Ledger, NewTransaction, RunningBalance, Transaction, TransactionForm,
    TransactionType, balance, project,
};
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use routing::build_router;

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {error}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(error) => {
                tracing::error!("failed to install signal handler: {error}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// Broad categories of [Error], used to decide how an error is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The caller supplied missing or malformed input. Never retried.
    Validation,
    /// The database could not be read from or written to.
    Storage,
    /// The ledger was opened with invalid settings.
    Configuration,
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// A required field was not included in the request.
    #[error("{0} is required")]
    MissingField(&'static str),

    /// The transaction type was something other than "credit" or "debit".
    #[error("\"{0}\" is not a valid transaction type, expected \"credit\" or \"debit\"")]
    InvalidTransactionType(String),

    /// The amount could not be parsed as a finite, non-negative number.
    #[error("\"{0}\" is not a valid amount, expected a number zero or greater")]
    InvalidAmount(String),

    /// The description was empty or only contained whitespace.
    #[error("description cannot be empty")]
    EmptyDescription,

    /// The request body could not be parsed.
    #[error("could not parse the request body: {0}")]
    InvalidRequestBody(String),

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezone(String),

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,
}

impl Error {
    /// The category this error falls into.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::MissingField(_)
            | Error::InvalidTransactionType(_)
            | Error::InvalidAmount(_)
            | Error::EmptyDescription
            | Error::InvalidRequestBody(_) => ErrorKind::Validation,
            Error::SqlError(_) | Error::DatabaseLockError => ErrorKind::Storage,
            Error::InvalidTimezone(_) => ErrorKind::Configuration,
        }
    }
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        tracing::error!("an unhandled SQL error occurred: {}", value);
        Error::SqlError(value)
    }
}

impl IntoResponse for Error {
    /// Every error is reported as `400 {"error": "..."}`, clients rely on
    /// that shape for both validation and storage failures.
    fn into_response(self) -> Response {
        if self.kind() != ErrorKind::Validation {
            tracing::error!("An unexpected error occurred: {}", self);
        }

        (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": self.to_string() })),
        )
            .into_response()
    }
}
