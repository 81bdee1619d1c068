//! Raw transaction input as sent by clients, and its validation.

use serde::Deserialize;

use crate::{Error, ledger::core::NewTransaction};

/// An amount as sent by a client, either a JSON number or numeric text.
///
/// HTML forms always send text, while JSON clients usually send numbers.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum AmountField {
    /// A number, e.g. `12.5`.
    Number(f64),
    /// Text that should contain a number, e.g. `"12.5"`.
    Text(String),
}

/// The fields for creating a transaction, before validation.
///
/// Every field is optional so that a missing field is reported as a
/// validation error rather than a deserialization failure.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TransactionForm {
    /// Either "credit" or "debit".
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    /// The non-negative size of the transaction.
    #[serde(default)]
    pub amount: Option<AmountField>,
    /// Text detailing the transaction.
    #[serde(default)]
    pub description: Option<String>,
}

impl TransactionForm {
    /// Check the form and convert it into a [NewTransaction].
    ///
    /// Blank text fields are treated the same as missing ones.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::MissingField] if a field is missing or blank,
    /// - [Error::InvalidTransactionType] if the type is not "credit" or "debit",
    /// - [Error::InvalidAmount] if the amount is not a non-negative number,
    /// - or [Error::EmptyDescription] if the description is only whitespace.
    pub fn validate(self) -> Result<NewTransaction, Error> {
        let kind = match self.kind.as_deref().map(str::trim) {
            None | Some("") => return Err(Error::MissingField("type")),
            Some(kind) => kind.parse()?,
        };

        let amount = match self.amount {
            None => return Err(Error::MissingField("amount")),
            Some(AmountField::Text(text)) if text.trim().is_empty() => {
                return Err(Error::MissingField("amount"));
            }
            Some(AmountField::Number(amount)) => amount,
            Some(AmountField::Text(text)) => text
                .trim()
                .parse::<f64>()
                .map_err(|_| Error::InvalidAmount(text.clone()))?,
        };

        let description = match self.description {
            None => return Err(Error::MissingField("description")),
            Some(description) if description.is_empty() => {
                return Err(Error::MissingField("description"));
            }
            Some(description) => description,
        };

        NewTransaction::new(kind, amount, &description)
    }
}

#[cfg(test)]
mod tests {
    use crate::{AmountField, Error, NewTransaction, TransactionForm, TransactionType};

    fn form(kind: &str, amount: AmountField, description: &str) -> TransactionForm {
        TransactionForm {
            kind: Some(kind.to_owned()),
            amount: Some(amount),
            description: Some(description.to_owned()),
        }
    }

    #[test]
    fn validates_numeric_amount() {
        let got = form("credit", AmountField::Number(100.0), "Salary").validate();

        assert_eq!(
            got,
            NewTransaction::new(TransactionType::Credit, 100.0, "Salary")
        );
    }

    #[test]
    fn validates_text_amount() {
        let got = form("debit", AmountField::Text(" 12.75 ".to_owned()), "Lunch").validate();

        assert_eq!(
            got,
            NewTransaction::new(TransactionType::Debit, 12.75, "Lunch")
        );
    }

    #[test]
    fn rejects_missing_type() {
        let mut form = form("credit", AmountField::Number(1.0), "Foo");
        form.kind = None;

        assert_eq!(form.validate(), Err(Error::MissingField("type")));
    }

    #[test]
    fn rejects_unknown_type() {
        let got = form("transfer", AmountField::Number(1.0), "Foo").validate();

        assert_eq!(
            got,
            Err(Error::InvalidTransactionType("transfer".to_owned()))
        );
    }

    #[test]
    fn rejects_missing_amount() {
        let mut form = form("credit", AmountField::Number(1.0), "Foo");
        form.amount = None;

        assert_eq!(form.validate(), Err(Error::MissingField("amount")));
    }

    #[test]
    fn rejects_blank_amount() {
        let got = form("credit", AmountField::Text("".to_owned()), "Foo").validate();

        assert_eq!(got, Err(Error::MissingField("amount")));
    }

    #[test]
    fn rejects_non_numeric_amount() {
        let got = form("credit", AmountField::Text("ten".to_owned()), "Foo").validate();

        assert_eq!(got, Err(Error::InvalidAmount("ten".to_owned())));
    }

    #[test]
    fn rejects_negative_amount() {
        let got = form("debit", AmountField::Number(-5.0), "Foo").validate();

        assert_eq!(got, Err(Error::InvalidAmount("-5".to_owned())));
    }

    #[test]
    fn negative_zero_text_amount_is_stored_as_zero() {
        let got = form("credit", AmountField::Text("-0".to_owned()), "Foo")
            .validate()
            .unwrap();

        assert_eq!(got.amount(), 0.0);
        assert!(got.amount().is_sign_positive());
        assert_eq!(serde_json::to_string(&got.amount()).unwrap(), "0.0");
    }

    #[test]
    fn rejects_missing_description() {
        let mut form = form("credit", AmountField::Number(1.0), "Foo");
        form.description = None;

        assert_eq!(form.validate(), Err(Error::MissingField("description")));
    }

    #[test]
    fn rejects_empty_description() {
        let got = form("credit", AmountField::Number(1.0), "").validate();

        assert_eq!(got, Err(Error::MissingField("description")));
    }

    #[test]
    fn deserializes_json_with_number_or_text_amount() {
        let number: TransactionForm =
            serde_json::from_str(r#"{"type": "credit", "amount": 5, "description": "A"}"#)
                .unwrap();
        let text: TransactionForm =
            serde_json::from_str(r#"{"type": "credit", "amount": "5", "description": "A"}"#)
                .unwrap();

        assert_eq!(number.amount, Some(AmountField::Number(5.0)));
        assert_eq!(text.amount, Some(AmountField::Text("5".to_owned())));
    }

    #[test]
    fn deserializes_json_with_missing_fields() {
        let form: TransactionForm = serde_json::from_str(r#"{"type": "debit"}"#).unwrap();

        assert_eq!(form.kind.as_deref(), Some("debit"));
        assert_eq!(form.amount, None);
        assert_eq!(form.description, None);
    }
}
