//! Application router configuration.

use axum::{
    Json, Router,
    extract::State,
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde_json::json;
use tower_http::{cors::CorsLayer, services::ServeDir};

use crate::{
    AppState, Ledger, endpoints,
    ledger::{
        create_transaction_endpoint, create_transaction_form_endpoint, get_ledger_page,
        list_balances_endpoint, list_transactions_endpoint,
    },
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(endpoints::ROOT, get(get_ledger_page))
        .route(
            endpoints::TRANSACTIONS_FORM,
            post(create_transaction_form_endpoint),
        )
        .route(
            endpoints::TRANSACTIONS_API,
            get(list_transactions_endpoint).post(create_transaction_endpoint),
        )
        .route(endpoints::BALANCES_API, get(list_balances_endpoint))
        .nest_service(endpoints::STATIC, ServeDir::new("static/"))
        .fallback(fallback)
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Any other page request gets the ledger page, anything else is not found.
async fn fallback(method: Method, state: State<Ledger>) -> Response {
    if method == Method::GET {
        return get_ledger_page(state).await.into_response();
    }

    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": "the requested resource could not be found" })),
    )
        .into_response()
}
