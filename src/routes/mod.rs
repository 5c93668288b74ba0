pub(crate) mod alerts;
pub(crate) mod health;
pub(crate) mod market;
pub(crate) mod portfolios;
pub(crate) mod positions;
pub(crate) mod stocks;
pub(crate) mod transactions;
pub(crate) mod watchlists;

use axum::Router;

use crate::state::AppState;

/// Every `/api` endpoint, relative to the `/api` prefix.
pub fn api_router() -> Router<AppState> {
    Router::new()
        .merge(stocks::router())
        .merge(market::router())
        .merge(watchlists::router())
        .merge(alerts::router())
        .merge(portfolios::router())
        .merge(positions::router())
        .merge(transactions::router())
}
