//! Defines the core data models and table schema for ledger transactions.

use std::{fmt, str::FromStr};

use rusqlite::{
    Connection, Row, ToSql,
    types::{FromSql, FromSqlError, FromSqlResult, ToSqlOutput, ValueRef},
};
use serde::{Deserialize, Serialize};
use time::Date;

use crate::{Error, database_id::TransactionId};

// ============================================================================
// MODELS
// ============================================================================

/// The direction money moved in a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Money coming in, increases the balance.
    Credit,
    /// Money going out, decreases the balance.
    Debit,
}

impl TransactionType {
    /// The name used for the type on the wire and in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Credit => "credit",
            TransactionType::Debit => "debit",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "credit" => Ok(TransactionType::Credit),
            "debit" => Ok(TransactionType::Debit),
            other => Err(Error::InvalidTransactionType(other.to_owned())),
        }
    }
}

impl ToSql for TransactionType {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for TransactionType {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|error: Error| FromSqlError::Other(Box::new(error)))
    }
}

/// A single credit or debit recorded in the ledger.
///
/// Transactions are only ever created by [crate::Ledger::append], which
/// assigns the `id` and `date`. Once stored they never change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The ID of the transaction, increasing in the order transactions were added.
    pub id: TransactionId,
    /// The day the transaction was recorded.
    pub date: Date,
    /// Whether the transaction adds to or subtracts from the balance.
    #[serde(rename = "type")]
    pub kind: TransactionType,
    /// The size of the transaction. Never negative, the sign comes from `kind`.
    pub amount: f64,
    /// A text description of what the transaction was for.
    pub description: String,
}

impl Transaction {
    /// The amount with the sign implied by the transaction type applied.
    pub fn signed_amount(&self) -> f64 {
        match self.kind {
            TransactionType::Credit => self.amount,
            TransactionType::Debit => -self.amount,
        }
    }
}

/// A validated transaction that has not been stored yet.
///
/// Use [NewTransaction::new] to create one, or build one from user input with
/// [crate::TransactionForm::validate].
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    kind: TransactionType,
    amount: f64,
    description: String,
}

impl NewTransaction {
    /// Create a new transaction ready to be appended to the ledger.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::InvalidAmount] if `amount` is negative, NaN or infinite,
    /// - or [Error::EmptyDescription] if `description` is empty or only whitespace.
    pub fn new(kind: TransactionType, amount: f64, description: &str) -> Result<Self, Error> {
        if !amount.is_finite() || amount < 0.0 {
            return Err(Error::InvalidAmount(amount.to_string()));
        }

        if description.trim().is_empty() {
            return Err(Error::EmptyDescription);
        }

        Ok(Self {
            kind,
            // -0.0 passes the check above, store it as 0.0.
            amount: amount.abs(),
            description: description.to_owned(),
        })
    }

    /// Whether the transaction is a credit or a debit.
    pub fn kind(&self) -> TransactionType {
        self.kind
    }

    /// The non-negative amount of the transaction.
    pub fn amount(&self) -> f64 {
        self.amount
    }

    /// The transaction's description.
    pub fn description(&self) -> &str {
        &self.description
    }
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

/// Create the transactions table in the database if it does not exist.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS transactions (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                date TEXT NOT NULL,
                type TEXT NOT NULL CHECK (type IN ('credit', 'debit')),
                amount REAL NOT NULL CHECK (amount >= 0),
                description TEXT NOT NULL
                )",
        (),
    )?;

    Ok(())
}

/// Map a database row to a Transaction.
///
/// Expects the columns in the order `id, date, type, amount, description`.
pub fn map_transaction_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    let id = row.get(0)?;
    let date = row.get(1)?;
    let kind = row.get(2)?;
    let amount = row.get(3)?;
    let description = row.get(4)?;

    Ok(Transaction {
        id,
        date,
        kind,
        amount,
        description,
    })
}

#[cfg(test)]
mod model_tests {
    use time::macros::date;

    use crate::{Error, NewTransaction, Transaction, TransactionType};

    #[test]
    fn parses_transaction_types() {
        assert_eq!("credit".parse(), Ok(TransactionType::Credit));
        assert_eq!("debit".parse(), Ok(TransactionType::Debit));
    }

    #[test]
    fn rejects_unknown_transaction_type() {
        let result = "refund".parse::<TransactionType>();

        assert_eq!(
            result,
            Err(Error::InvalidTransactionType("refund".to_owned()))
        );
    }

    #[test]
    fn transaction_type_is_case_sensitive() {
        assert!("Credit".parse::<TransactionType>().is_err());
    }

    #[test]
    fn debit_has_negative_signed_amount() {
        let transaction = Transaction {
            id: 1,
            date: date!(2025 - 03 - 01),
            kind: TransactionType::Debit,
            amount: 12.5,
            description: "Lunch".to_owned(),
        };

        assert_eq!(transaction.signed_amount(), -12.5);
    }

    #[test]
    fn new_transaction_rejects_negative_amount() {
        let result = NewTransaction::new(TransactionType::Credit, -1.0, "Refund");

        assert_eq!(result, Err(Error::InvalidAmount("-1".to_owned())));
    }

    #[test]
    fn new_transaction_rejects_non_finite_amount() {
        assert!(NewTransaction::new(TransactionType::Credit, f64::NAN, "Foo").is_err());
        assert!(NewTransaction::new(TransactionType::Debit, f64::INFINITY, "Foo").is_err());
    }

    #[test]
    fn new_transaction_rejects_blank_description() {
        let result = NewTransaction::new(TransactionType::Debit, 3.0, "   ");

        assert_eq!(result, Err(Error::EmptyDescription));
    }

    #[test]
    fn new_transaction_accepts_zero_amount() {
        let transaction = NewTransaction::new(TransactionType::Credit, 0.0, "Nothing").unwrap();

        assert_eq!(transaction.amount(), 0.0);
        assert_eq!(transaction.kind(), TransactionType::Credit);
        assert_eq!(transaction.description(), "Nothing");
    }

    #[test]
    fn new_transaction_normalizes_negative_zero() {
        let transaction = NewTransaction::new(TransactionType::Debit, -0.0, "Nothing").unwrap();

        assert!(transaction.amount().is_sign_positive());
    }

    #[test]
    fn serializes_with_wire_field_names() {
        let transaction = Transaction {
            id: 7,
            date: date!(2024 - 11 - 30),
            kind: TransactionType::Credit,
            amount: 100.0,
            description: "Salary".to_owned(),
        };

        let json = serde_json::to_value(&transaction).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "id": 7,
                "date": "2024-11-30",
                "type": "credit",
                "amount": 100.0,
                "description": "Salary",
            })
        );
    }
}
