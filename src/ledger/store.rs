//! The durable, append-only store of ledger transactions.

use std::{
    path::Path,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use rusqlite::Connection;

use crate::{
    Error,
    db::initialize,
    ledger::core::{NewTransaction, Transaction, map_transaction_row},
    timezone::{get_local_offset, local_today},
};

/// A handle to the ledger database.
///
/// The handle is cheap to clone and every clone shares the same SQLite
/// connection, so writes from all clones are serialized on one lock.
#[derive(Debug, Clone)]
pub struct Ledger {
    connection: Arc<Mutex<Connection>>,
    /// The canonical timezone name used to date new transactions, e.g. "Pacific/Auckland".
    timezone: String,
}

impl Ledger {
    /// Open the ledger database at `path`, creating the file and the
    /// transactions table if they do not exist.
    ///
    /// New transactions are dated with today's date in `timezone`, a
    /// canonical timezone name such as "Etc/UTC".
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::InvalidTimezone] if `timezone` is not a known timezone,
    /// - or [Error::SqlError] if the database could not be opened or initialized.
    pub fn open(path: impl AsRef<Path>, timezone: &str) -> Result<Self, Error> {
        check_timezone(timezone)?;

        let connection = Connection::open(path.as_ref())?;
        tracing::debug!("Opened ledger database at {:?}", path.as_ref());

        Self::from_connection(connection, timezone)
    }

    /// Open a ledger backed by an in-memory database.
    ///
    /// # Errors
    /// See [Ledger::open].
    pub fn open_in_memory(timezone: &str) -> Result<Self, Error> {
        check_timezone(timezone)?;

        Self::from_connection(Connection::open_in_memory()?, timezone)
    }

    fn from_connection(connection: Connection, timezone: &str) -> Result<Self, Error> {
        initialize(&connection)?;

        Ok(Self {
            connection: Arc::new(Mutex::new(connection)),
            timezone: timezone.to_owned(),
        })
    }

    /// Release this handle.
    ///
    /// The database connection is closed once the last handle is released.
    ///
    /// # Errors
    /// Returns an [Error::SqlError] if SQLite could not close the connection.
    pub fn close(self) -> Result<(), Error> {
        match Arc::try_unwrap(self.connection) {
            Ok(connection) => {
                let connection = connection
                    .into_inner()
                    .unwrap_or_else(PoisonError::into_inner);

                connection.close().map_err(|(_, error)| Error::from(error))?;
                tracing::debug!("Closed ledger database");

                Ok(())
            }
            Err(_) => {
                tracing::debug!("Released ledger handle, other handles are still open");
                Ok(())
            }
        }
    }

    /// The canonical timezone name used to date new transactions.
    pub fn timezone(&self) -> &str {
        &self.timezone
    }

    /// Add a transaction to the end of the ledger.
    ///
    /// The transaction is given the next ID and dated with today's date in the
    /// ledger's timezone. It is written to the database before this function
    /// returns.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::DatabaseLockError] if the database lock is poisoned,
    /// - or [Error::SqlError] if the insert failed.
    pub fn append(&self, new_transaction: NewTransaction) -> Result<Transaction, Error> {
        let date = local_today(&self.timezone)
            .ok_or_else(|| Error::InvalidTimezone(self.timezone.clone()))?;

        let connection = self.lock()?;

        let transaction = connection
            .prepare(
                "INSERT INTO transactions (date, type, amount, description)
                 VALUES (?1, ?2, ?3, ?4)
                 RETURNING id, date, type, amount, description",
            )?
            .query_row(
                (
                    date,
                    new_transaction.kind(),
                    new_transaction.amount(),
                    new_transaction.description(),
                ),
                map_transaction_row,
            )
            .inspect_err(|error| tracing::error!("could not append transaction: {error}"))?;

        tracing::debug!(
            "Appended {} transaction {} for {}",
            transaction.kind,
            transaction.id,
            transaction.amount
        );

        Ok(transaction)
    }

    /// Get every transaction in the order they were added, i.e. ascending ID.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::DatabaseLockError] if the database lock is poisoned,
    /// - or [Error::SqlError] if the query failed.
    pub fn list_all(&self) -> Result<Vec<Transaction>, Error> {
        let connection = self.lock()?;

        let mut statement = connection.prepare(
            "SELECT id, date, type, amount, description FROM transactions ORDER BY id ASC",
        )?;

        let transactions = statement
            .query_map([], map_transaction_row)?
            .map(|maybe_transaction| maybe_transaction.map_err(Error::from))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(transactions)
    }

    /// Get the total number of transactions in the ledger.
    ///
    /// # Errors
    /// This function will return a [Error::SqlError] there is some SQL error.
    pub fn count(&self) -> Result<u32, Error> {
        let connection = self.lock()?;

        connection
            .query_row("SELECT COUNT(id) FROM transactions", [], |row| row.get(0))
            .map_err(|error| error.into())
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, Error> {
        self.connection
            .lock()
            .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
            .map_err(|_| Error::DatabaseLockError)
    }
}

fn check_timezone(timezone: &str) -> Result<(), Error> {
    match get_local_offset(timezone) {
        Some(_) => Ok(()),
        None => {
            tracing::error!("Invalid timezone {timezone}");
            Err(Error::InvalidTimezone(timezone.to_owned()))
        }
    }
}
