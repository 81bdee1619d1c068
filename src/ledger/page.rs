//! The HTML ledger page and the form endpoint that adds transactions from it.

use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use maud::{Markup, html};

use crate::{
    Error, ErrorKind, endpoints,
    html::{
        BUTTON_PRIMARY_STYLE, FORM_CONTAINER_STYLE, FORM_ERROR_STYLE, FORM_LABEL_STYLE,
        FORM_TEXT_INPUT_STYLE, PAGE_CONTAINER_STYLE, TABLE_AMOUNT_CELL_STYLE, TABLE_CELL_STYLE,
        TABLE_HEADER_STYLE, TABLE_ROW_STYLE, TABLE_STYLE, base, format_currency,
    },
    ledger::{
        AmountField, TransactionForm,
        balance::{RunningBalance, balance, project},
        core::{Transaction, TransactionType},
        store::Ledger,
    },
};

/// The values to pre-fill the new transaction form with.
#[derive(Debug, Default)]
struct FormValues {
    kind: String,
    amount: String,
    description: String,
}

impl From<&TransactionForm> for FormValues {
    fn from(form: &TransactionForm) -> Self {
        let amount = match &form.amount {
            Some(AmountField::Number(amount)) => amount.to_string(),
            Some(AmountField::Text(text)) => text.clone(),
            None => String::new(),
        };

        Self {
            kind: form.kind.clone().unwrap_or_default(),
            amount,
            description: form.description.clone().unwrap_or_default(),
        }
    }
}

fn amount_cell(transaction: &Transaction, kind: TransactionType) -> Markup {
    html! {
        td class=(TABLE_AMOUNT_CELL_STYLE)
        {
            @if transaction.kind == kind {
                (format_currency(transaction.amount))
            }
        }
    }
}

fn table_row(row: &RunningBalance) -> Markup {
    let transaction = row.transaction;

    html! {
        tr class=(TABLE_ROW_STYLE) data-transaction-id=(transaction.id)
        {
            td class=(TABLE_CELL_STYLE) { time datetime=(transaction.date) { (transaction.date) } }
            td class=(TABLE_CELL_STYLE) { (transaction.description) }
            (amount_cell(transaction, TransactionType::Credit))
            (amount_cell(transaction, TransactionType::Debit))
            td class=(TABLE_AMOUNT_CELL_STYLE) data-running-total { (format_currency(row.running_total)) }
        }
    }
}

fn transaction_form(values: &FormValues, error_message: Option<&str>) -> Markup {
    let selected_kind = if values.kind == TransactionType::Debit.as_str() {
        TransactionType::Debit
    } else {
        TransactionType::Credit
    };

    html! {
        form
            method="post"
            action=(endpoints::TRANSACTIONS_FORM)
            class=(FORM_CONTAINER_STYLE)
        {
            h2 { "Add Transaction" }

            @if let Some(error_message) = error_message {
                p class=(FORM_ERROR_STYLE) role="alert" { (error_message) }
            }

            label for="type" class=(FORM_LABEL_STYLE) { "Type" }
            select id="type" name="type" class=(FORM_TEXT_INPUT_STYLE)
            {
                @for kind in [TransactionType::Credit, TransactionType::Debit] {
                    option value=(kind) selected[kind == selected_kind]
                    {
                        @match kind {
                            TransactionType::Credit => { "Credit" }
                            TransactionType::Debit => { "Debit" }
                        }
                    }
                }
            }

            label for="amount" class=(FORM_LABEL_STYLE) { "Amount" }
            input
                id="amount"
                name="amount"
                type="number"
                min="0"
                step="0.01"
                required
                value=(values.amount)
                class=(FORM_TEXT_INPUT_STYLE);

            label for="description" class=(FORM_LABEL_STYLE) { "Description" }
            input
                id="description"
                name="description"
                type="text"
                required
                value=(values.description)
                class=(FORM_TEXT_INPUT_STYLE);

            button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Save" }
        }
    }
}

fn ledger_view(
    transactions: &[Transaction],
    form_values: &FormValues,
    error_message: Option<&str>,
) -> Markup {
    let rows = project(transactions);

    let content = html! {
        div class=(PAGE_CONTAINER_STYLE)
        {
            header
            {
                h1 { "Ledger" }
                p { "Balance: " span id="balance" { (format_currency(balance(transactions))) } }
            }

            (transaction_form(form_values, error_message))

            table class=(TABLE_STYLE)
            {
                thead class=(TABLE_HEADER_STYLE)
                {
                    tr
                    {
                        th scope="col" { "Date" }
                        th scope="col" { "Description" }
                        th scope="col" { "Credit" }
                        th scope="col" { "Debit" }
                        th scope="col" { "Total" }
                    }
                }

                tbody
                {
                    @for row in &rows {
                        (table_row(row))
                    }

                    @if rows.is_empty() {
                        tr
                        {
                            td colspan="5" class=(TABLE_CELL_STYLE)
                            {
                                "No transactions yet."
                            }
                        }
                    }
                }
            }
        }
    };

    base("Transactions", &content)
}

/// Route handler for the ledger page.
pub async fn get_ledger_page(State(ledger): State<Ledger>) -> Result<Response, Error> {
    let transactions = ledger
        .list_all()
        .inspect_err(|error| tracing::error!("could not list transactions: {error}"))?;

    Ok(ledger_view(&transactions, &FormValues::default(), None).into_response())
}

/// A route handler for adding a transaction from the ledger page's form.
///
/// Redirects back to the ledger page on success. If the form is invalid the
/// page is rendered again with the error message and the submitted values.
pub async fn create_transaction_form_endpoint(
    State(ledger): State<Ledger>,
    Form(form): Form<TransactionForm>,
) -> Response {
    let form_values = FormValues::from(&form);

    let error = match form.validate().and_then(|new| ledger.append(new)) {
        Ok(transaction) => {
            tracing::debug!("created transaction {} from form", transaction.id);
            return Redirect::to(endpoints::ROOT).into_response();
        }
        Err(error) if error.kind() == ErrorKind::Validation => error,
        Err(error) => return error.into_response(),
    };

    match ledger.list_all() {
        Ok(transactions) => (
            StatusCode::BAD_REQUEST,
            ledger_view(&transactions, &form_values, Some(&error.to_string())),
        )
            .into_response(),
        Err(list_error) => list_error.into_response(),
    }
}
