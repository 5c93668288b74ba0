use std::sync::Arc;

use crate::external::market_data::MarketDataProvider;
use crate::store::StockStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn StockStore>,
    pub market_data: Arc<dyn MarketDataProvider>,
}

impl AppState {
    pub fn new(store: Arc<dyn StockStore>, market_data: Arc<dyn MarketDataProvider>) -> Self {
        Self { store, market_data }
    }
}
