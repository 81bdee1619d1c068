//! The API endpoints URIs.

/// The root route which serves the ledger page.
pub const ROOT: &str = "/";
/// The route the ledger page's form posts new transactions to.
pub const TRANSACTIONS_FORM: &str = "/transactions";
/// The route for static files.
pub const STATIC: &str = "/static";

/// The route to list and create transactions.
pub const TRANSACTIONS_API: &str = "/api/transactions";
/// The route to get every transaction along with its running balance.
pub const BALANCES_API: &str = "/api/balances";

// These tests are here so that we know when we call `Uri::from_static` it will not panic.
#[cfg(test)]
mod endpoints_tests {
    use axum::http::Uri;

    use crate::endpoints;

    fn assert_endpoint_is_valid_uri(uri: &'static str) {
        assert!(uri.starts_with('/'));
        assert_eq!(Uri::from_static(uri).path(), uri);
    }

    #[test]
    fn endpoints_are_valid_uris() {
        assert_endpoint_is_valid_uri(endpoints::ROOT);
        assert_endpoint_is_valid_uri(endpoints::TRANSACTIONS_FORM);
        assert_endpoint_is_valid_uri(endpoints::STATIC);
        assert_endpoint_is_valid_uri(endpoints::TRANSACTIONS_API);
        assert_endpoint_is_valid_uri(endpoints::BALANCES_API);
    }
}
