use std::sync::OnceLock;

use maud::{DOCTYPE, Markup, html};
use numfmt::{Formatter, Precision};

use crate::endpoints;

// Button styles
pub const BUTTON_PRIMARY_STYLE: &str = "button button-primary";

// Form styles
pub const FORM_CONTAINER_STYLE: &str = "form-container";
pub const FORM_LABEL_STYLE: &str = "form-label";
pub const FORM_TEXT_INPUT_STYLE: &str = "form-input";
pub const FORM_ERROR_STYLE: &str = "form-error";

// Table styles
pub const TABLE_STYLE: &str = "ledger-table";
pub const TABLE_HEADER_STYLE: &str = "ledger-table-header";
pub const TABLE_ROW_STYLE: &str = "ledger-table-row";
pub const TABLE_CELL_STYLE: &str = "ledger-table-cell";
pub const TABLE_AMOUNT_CELL_STYLE: &str = "ledger-table-cell amount";

// Page container
pub const PAGE_CONTAINER_STYLE: &str = "page-container";

pub fn base(title: &str, content: &Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en"
        {
            head
            {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) " - Ledger" }
                link href={ (endpoints::STATIC) "/main.css" } rel="stylesheet";
            }

            body
            {
                (content)
            }
        }
    }
}

fn currency_formatter(
    prefix: &'static str,
    cell: &'static OnceLock<Option<Formatter>>,
) -> Option<&'static Formatter> {
    cell.get_or_init(|| {
        Formatter::currency(prefix)
            .ok()
            .map(|formatter| formatter.precision(Precision::Decimals(2)))
    })
    .as_ref()
}

/// Format `number` as dollars and cents, e.g. "$1,234.50" or "-$3.00".
pub fn format_currency(number: f64) -> String {
    static POSITIVE_FMT: OnceLock<Option<Formatter>> = OnceLock::new();
    static NEGATIVE_FMT: OnceLock<Option<Formatter>> = OnceLock::new();

    // Zero is hardcoded as "0", so we must specify the formatted string for zero
    if number == 0.0 {
        return "$0.00".to_owned();
    }

    let (prefix, cell) = if number < 0.0 {
        ("-$", &NEGATIVE_FMT)
    } else {
        ("$", &POSITIVE_FMT)
    };

    let mut formatted_string = match currency_formatter(prefix, cell) {
        Some(formatter) => formatter.fmt_string(number.abs()),
        None => format!("{prefix}{:.2}", number.abs()),
    };

    // numfmt omits trailing zeros, e.g. "12.30" is rendered as "12.3".
    match formatted_string.find('.') {
        Some(point) => {
            let decimals = formatted_string.len() - point - 1;
            formatted_string.push_str(&"0".repeat(2usize.saturating_sub(decimals)));
        }
        None => formatted_string.push_str(".00"),
    }

    formatted_string
}
