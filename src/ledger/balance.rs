//! Running balance projection over an ordered list of transactions.
//!
//! Nothing here touches the database, the functions are pure and can be
//! called from any thread.

use serde::Serialize;

use crate::ledger::core::Transaction;

/// A transaction paired with the balance after it was applied.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunningBalance<'a> {
    /// The transaction at this position in the ledger.
    #[serde(flatten)]
    pub transaction: &'a Transaction,
    /// The sum of every signed amount up to and including `transaction`.
    pub running_total: f64,
}

/// Compute the running balance for each transaction in `transactions`.
///
/// Credits add to the balance and debits subtract from it, starting from
/// zero. The running total at a position only depends on the transactions at
/// or before it, so the order of `transactions` matters.
///
/// Amounts are assumed to have been validated already, i.e. they are finite
/// and non-negative.
pub fn project(transactions: &[Transaction]) -> Vec<RunningBalance<'_>> {
    transactions
        .iter()
        .scan(0.0, |total, transaction| {
            *total += transaction.signed_amount();

            Some(RunningBalance {
                transaction,
                running_total: *total,
            })
        })
        .collect()
}

/// The balance after every transaction has been applied, zero if there are none.
pub fn balance(transactions: &[Transaction]) -> f64 {
    project(transactions)
        .last()
        .map_or(0.0, |row| row.running_total)
}
