//! In-memory `StockStore` for handler tests.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use uuid::Uuid;

use crate::external::market_data::DailyBar;
use crate::models::history::{latest_per_symbol, split_valid_bars};
use crate::models::{
    AlertDirection, HistoryQuery, MarketSummary, NewTransaction, Portfolio, PortfolioPosition,
    PriceChange, SaveReport, SaveStock, SectorPerformance, Stock, StockAlert, StockHistoryEntry,
    StockScreenerRequest, StockWatchlist, Transaction, UpdateAlertRequest, UpdatePortfolio,
    UpdatePosition, UpsertPosition,
};
use crate::store::StockStore;

#[derive(Default)]
struct Tables {
    // Insertion order; listing walks it backwards for newest first.
    stocks: Vec<Stock>,
    history: BTreeMap<(String, chrono::NaiveDate), StockHistoryEntry>,
    watchlist: Vec<StockWatchlist>,
    alerts: Vec<StockAlert>,
    portfolios: Vec<Portfolio>,
    positions: Vec<PortfolioPosition>,
    transactions: Vec<Transaction>,
}

impl Tables {
    fn upsert_stock(&mut self, symbol: &str, input: &SaveStock) -> Stock {
        let now = Utc::now();
        let stock = Stock {
            symbol: symbol.to_string(),
            name: input.name.clone(),
            last_price: input.last_price,
            sector: input.sector.clone(),
            industry: input.industry.clone(),
            market_cap: input.market_cap,
            pe_ratio: input.pe_ratio,
            dividend_yield: input.dividend_yield,
            fifty_two_week_high: input.fifty_two_week_high,
            fifty_two_week_low: input.fifty_two_week_low,
            created_at: now,
            updated_at: now,
        };

        match self.stocks.iter().position(|s| s.symbol == symbol) {
            Some(index) => {
                let created_at = self.stocks[index].created_at;
                self.stocks[index] = Stock { created_at, ..stock };
                self.stocks[index].clone()
            }
            None => {
                self.stocks.push(stock.clone());
                stock
            }
        }
    }

    fn latest_changes(&self) -> Vec<PriceChange> {
        let mut by_symbol: BTreeMap<&str, Vec<&StockHistoryEntry>> = BTreeMap::new();
        for entry in self.history.values() {
            by_symbol.entry(entry.symbol.as_str()).or_default().push(entry);
        }

        by_symbol
            .into_iter()
            .filter_map(|(symbol, bars)| {
                let [.., prev, cur] = bars.as_slice() else {
                    return None;
                };
                let change_pct = if prev.close == 0.0 {
                    0.0
                } else {
                    (cur.close - prev.close) / prev.close * 100.0
                };
                Some(PriceChange {
                    symbol: symbol.to_string(),
                    date: cur.date,
                    close: cur.close,
                    previous_close: prev.close,
                    change_pct,
                })
            })
            .collect()
    }
}

#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StockStore for MemoryStore {
    async fn list_stocks(&self) -> Result<Vec<Stock>, sqlx::Error> {
        Ok(self.tables.lock().stocks.iter().rev().cloned().collect())
    }

    async fn get_stock(&self, symbol: &str) -> Result<Option<Stock>, sqlx::Error> {
        Ok(self
            .tables
            .lock()
            .stocks
            .iter()
            .find(|s| s.symbol == symbol)
            .cloned())
    }

    async fn save_stock(&self, symbol: &str, input: &SaveStock) -> Result<Stock, sqlx::Error> {
        Ok(self.tables.lock().upsert_stock(symbol, input))
    }

    async fn delete_stock(&self, symbol: &str) -> Result<bool, sqlx::Error> {
        let mut tables = self.tables.lock();
        let before = tables.stocks.len();
        tables.stocks.retain(|s| s.symbol != symbol);
        tables.history.retain(|(s, _), _| s != symbol);
        Ok(tables.stocks.len() < before)
    }

    async fn screen_stocks(&self, filter: &StockScreenerRequest) -> Result<Vec<Stock>, sqlx::Error> {
        let tables = self.tables.lock();
        let mut matched: Vec<Stock> = tables
            .stocks
            .iter()
            .filter(|s| filter.matches(s))
            .cloned()
            .collect();
        matched.sort_by(|a, b| a.symbol.cmp(&b.symbol));
        Ok(matched
            .into_iter()
            .skip(filter.offset() as usize)
            .take(filter.limit() as usize)
            .collect())
    }

    async fn get_history(
        &self,
        symbol: &str,
        range: &HistoryQuery,
    ) -> Result<Vec<StockHistoryEntry>, sqlx::Error> {
        let tables = self.tables.lock();
        let mut entries: Vec<StockHistoryEntry> = tables
            .history
            .values()
            .filter(|e| e.symbol == symbol)
            .filter(|e| range.from.map_or(true, |from| e.date >= from))
            .filter(|e| range.to.map_or(true, |to| e.date <= to))
            .cloned()
            .collect();
        let keep = range.limit() as usize;
        if entries.len() > keep {
            entries.drain(..entries.len() - keep);
        }
        Ok(entries)
    }

    async fn upsert_history(&self, entries: &[StockHistoryEntry]) -> Result<u64, sqlx::Error> {
        let mut tables = self.tables.lock();
        for entry in entries {
            tables
                .history
                .insert((entry.symbol.clone(), entry.date), entry.clone());
        }
        Ok(entries.len() as u64)
    }

    async fn save_quote_batch(&self, bars: &[DailyBar]) -> Result<SaveReport, sqlx::Error> {
        let (entries, skipped) = split_valid_bars(bars);
        let mut tables = self.tables.lock();

        for (symbol, latest) in latest_per_symbol(&entries) {
            match tables.stocks.iter().position(|s| s.symbol == symbol) {
                Some(index) => {
                    let stock = &mut tables.stocks[index];
                    stock.last_price = Some(latest.close);
                    stock.updated_at = Utc::now();
                }
                None => {
                    let input = SaveStock {
                        name: symbol.to_string(),
                        last_price: Some(latest.close),
                        ..Default::default()
                    };
                    tables.upsert_stock(symbol, &input);
                }
            }
        }
        for entry in &entries {
            tables
                .history
                .insert((entry.symbol.clone(), entry.date), entry.clone());
        }

        Ok(SaveReport {
            stored: entries.len(),
            skipped,
        })
    }

    async fn sector_performance(&self) -> Result<Vec<SectorPerformance>, sqlx::Error> {
        let tables = self.tables.lock();
        let changes: BTreeMap<String, f64> = tables
            .latest_changes()
            .into_iter()
            .map(|c| (c.symbol, c.change_pct))
            .collect();

        let mut sectors: BTreeMap<String, (i64, Vec<f64>, Option<i64>)> = BTreeMap::new();
        for stock in &tables.stocks {
            let sector = stock.sector.clone().unwrap_or_else(|| "Unknown".to_string());
            let slot = sectors.entry(sector).or_insert((0, Vec::new(), None));
            slot.0 += 1;
            if let Some(pct) = changes.get(&stock.symbol) {
                slot.1.push(*pct);
            }
            if let Some(cap) = stock.market_cap {
                slot.2 = Some(slot.2.unwrap_or(0) + cap);
            }
        }

        let mut result: Vec<SectorPerformance> = sectors
            .into_iter()
            .map(|(sector, (stock_count, pcts, total_market_cap))| SectorPerformance {
                sector,
                stock_count,
                avg_change_pct: (!pcts.is_empty())
                    .then(|| pcts.iter().sum::<f64>() / pcts.len() as f64),
                total_market_cap,
            })
            .collect();
        result.sort_by(|a, b| match (a.avg_change_pct, b.avg_change_pct) {
            (Some(x), Some(y)) => y.total_cmp(&x),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => a.sector.cmp(&b.sector),
        });
        Ok(result)
    }

    async fn market_summary(&self, movers: usize) -> Result<MarketSummary, sqlx::Error> {
        let tables = self.tables.lock();
        Ok(MarketSummary::from_changes(
            tables.stocks.len() as i64,
            tables.latest_changes(),
            movers,
        ))
    }

    async fn list_watchlist(&self, user_id: Uuid) -> Result<Vec<StockWatchlist>, sqlx::Error> {
        Ok(self
            .tables
            .lock()
            .watchlist
            .iter()
            .rev()
            .filter(|w| w.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn add_to_watchlist(&self, user_id: Uuid, symbol: &str) -> Result<StockWatchlist, sqlx::Error> {
        let mut tables = self.tables.lock();
        if let Some(existing) = tables
            .watchlist
            .iter()
            .find(|w| w.user_id == user_id && w.symbol == symbol)
        {
            return Ok(existing.clone());
        }
        let row = StockWatchlist {
            id: Uuid::new_v4(),
            user_id,
            symbol: symbol.to_string(),
            created_at: Utc::now(),
        };
        tables.watchlist.push(row.clone());
        Ok(row)
    }

    async fn remove_from_watchlist(&self, user_id: Uuid, symbol: &str) -> Result<bool, sqlx::Error> {
        let mut tables = self.tables.lock();
        let before = tables.watchlist.len();
        tables
            .watchlist
            .retain(|w| !(w.user_id == user_id && w.symbol == symbol));
        Ok(tables.watchlist.len() < before)
    }

    async fn list_alerts(&self, user_id: Uuid) -> Result<Vec<StockAlert>, sqlx::Error> {
        Ok(self
            .tables
            .lock()
            .alerts
            .iter()
            .rev()
            .filter(|a| a.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn get_alert(&self, id: Uuid) -> Result<Option<StockAlert>, sqlx::Error> {
        Ok(self.tables.lock().alerts.iter().find(|a| a.id == id).cloned())
    }

    async fn create_alert(
        &self,
        user_id: Uuid,
        symbol: &str,
        direction: AlertDirection,
        target_price: f64,
    ) -> Result<StockAlert, sqlx::Error> {
        let alert = StockAlert {
            id: Uuid::new_v4(),
            user_id,
            symbol: symbol.to_string(),
            alert_type: direction.as_str().to_string(),
            target_price,
            is_active: true,
            created_at: Utc::now(),
            triggered_at: None,
        };
        self.tables.lock().alerts.push(alert.clone());
        Ok(alert)
    }

    async fn update_alert(
        &self,
        id: Uuid,
        input: &UpdateAlertRequest,
    ) -> Result<Option<StockAlert>, sqlx::Error> {
        let mut tables = self.tables.lock();
        let Some(alert) = tables.alerts.iter_mut().find(|a| a.id == id) else {
            return Ok(None);
        };
        if let Some(direction) = input.alert_type {
            alert.alert_type = direction.as_str().to_string();
        }
        if let Some(target_price) = input.target_price {
            alert.target_price = target_price;
        }
        if let Some(is_active) = input.is_active {
            alert.is_active = is_active;
        }
        Ok(Some(alert.clone()))
    }

    async fn delete_alert(&self, id: Uuid) -> Result<bool, sqlx::Error> {
        let mut tables = self.tables.lock();
        let before = tables.alerts.len();
        tables.alerts.retain(|a| a.id != id);
        Ok(tables.alerts.len() < before)
    }

    async fn trigger_alert(&self, id: Uuid, at: DateTime<Utc>) -> Result<Option<StockAlert>, sqlx::Error> {
        let mut tables = self.tables.lock();
        let Some(alert) = tables.alerts.iter_mut().find(|a| a.id == id) else {
            return Ok(None);
        };
        alert.triggered_at = Some(at);
        alert.is_active = false;
        Ok(Some(alert.clone()))
    }

    async fn list_portfolios(&self, user_id: Uuid) -> Result<Vec<Portfolio>, sqlx::Error> {
        Ok(self
            .tables
            .lock()
            .portfolios
            .iter()
            .rev()
            .filter(|p| p.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn get_portfolio(&self, id: Uuid) -> Result<Option<Portfolio>, sqlx::Error> {
        Ok(self.tables.lock().portfolios.iter().find(|p| p.id == id).cloned())
    }

    async fn create_portfolio(
        &self,
        user_id: Uuid,
        name: &str,
        cash_balance: f64,
    ) -> Result<Portfolio, sqlx::Error> {
        let now = Utc::now();
        let portfolio = Portfolio {
            id: Uuid::new_v4(),
            user_id,
            name: name.to_string(),
            cash_balance,
            created_at: now,
            updated_at: now,
        };
        self.tables.lock().portfolios.push(portfolio.clone());
        Ok(portfolio)
    }

    async fn update_portfolio(
        &self,
        id: Uuid,
        input: &UpdatePortfolio,
    ) -> Result<Option<Portfolio>, sqlx::Error> {
        let mut tables = self.tables.lock();
        let Some(portfolio) = tables.portfolios.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };
        if let Some(name) = &input.name {
            portfolio.name = name.clone();
        }
        if let Some(cash_balance) = input.cash_balance {
            portfolio.cash_balance = cash_balance;
        }
        portfolio.updated_at = Utc::now();
        Ok(Some(portfolio.clone()))
    }

    async fn delete_portfolio(&self, id: Uuid) -> Result<bool, sqlx::Error> {
        let mut tables = self.tables.lock();
        let before = tables.portfolios.len();
        tables.portfolios.retain(|p| p.id != id);
        tables.positions.retain(|p| p.portfolio_id != id);
        tables.transactions.retain(|t| t.portfolio_id != id);
        Ok(tables.portfolios.len() < before)
    }

    async fn list_positions(&self, portfolio_id: Uuid) -> Result<Vec<PortfolioPosition>, sqlx::Error> {
        let mut positions: Vec<PortfolioPosition> = self
            .tables
            .lock()
            .positions
            .iter()
            .filter(|p| p.portfolio_id == portfolio_id)
            .cloned()
            .collect();
        positions.sort_by(|a, b| a.symbol.cmp(&b.symbol));
        Ok(positions)
    }

    async fn get_position(&self, id: Uuid) -> Result<Option<PortfolioPosition>, sqlx::Error> {
        Ok(self.tables.lock().positions.iter().find(|p| p.id == id).cloned())
    }

    async fn upsert_position(
        &self,
        portfolio_id: Uuid,
        input: &UpsertPosition,
    ) -> Result<PortfolioPosition, sqlx::Error> {
        let mut tables = self.tables.lock();
        let now = Utc::now();
        if let Some(existing) = tables
            .positions
            .iter_mut()
            .find(|p| p.portfolio_id == portfolio_id && p.symbol == input.symbol)
        {
            existing.quantity = input.quantity;
            existing.average_cost = input.average_cost;
            existing.updated_at = now;
            return Ok(existing.clone());
        }
        let position = PortfolioPosition {
            id: Uuid::new_v4(),
            portfolio_id,
            symbol: input.symbol.clone(),
            quantity: input.quantity,
            average_cost: input.average_cost,
            created_at: now,
            updated_at: now,
        };
        tables.positions.push(position.clone());
        Ok(position)
    }

    async fn update_position(
        &self,
        id: Uuid,
        input: &UpdatePosition,
    ) -> Result<Option<PortfolioPosition>, sqlx::Error> {
        let mut tables = self.tables.lock();
        let Some(position) = tables.positions.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };
        if let Some(quantity) = input.quantity {
            position.quantity = quantity;
        }
        if let Some(average_cost) = input.average_cost {
            position.average_cost = average_cost;
        }
        position.updated_at = Utc::now();
        Ok(Some(position.clone()))
    }

    async fn delete_position(&self, id: Uuid) -> Result<bool, sqlx::Error> {
        let mut tables = self.tables.lock();
        let before = tables.positions.len();
        tables.positions.retain(|p| p.id != id);
        Ok(tables.positions.len() < before)
    }

    async fn list_transactions(&self, portfolio_id: Uuid) -> Result<Vec<Transaction>, sqlx::Error> {
        let mut transactions: Vec<Transaction> = self
            .tables
            .lock()
            .transactions
            .iter()
            .filter(|t| t.portfolio_id == portfolio_id)
            .cloned()
            .collect();
        transactions.sort_by(|a, b| b.executed_at.cmp(&a.executed_at));
        Ok(transactions)
    }

    async fn get_transaction(&self, id: Uuid) -> Result<Option<Transaction>, sqlx::Error> {
        Ok(self.tables.lock().transactions.iter().find(|t| t.id == id).cloned())
    }

    async fn create_transaction(
        &self,
        portfolio_id: Uuid,
        input: &NewTransaction,
    ) -> Result<Transaction, sqlx::Error> {
        let transaction = Transaction {
            id: Uuid::new_v4(),
            portfolio_id,
            symbol: input.symbol.clone(),
            transaction_type: input.side.as_str().to_string(),
            quantity: input.quantity,
            price: input.price,
            fees: input.fees,
            total_amount: input.total_amount,
            executed_at: input.executed_at,
            created_at: Utc::now(),
        };
        self.tables.lock().transactions.push(transaction.clone());
        Ok(transaction)
    }

    async fn delete_transaction(&self, id: Uuid) -> Result<bool, sqlx::Error> {
        let mut tables = self.tables.lock();
        let before = tables.transactions.len();
        tables.transactions.retain(|t| t.id != id);
        Ok(tables.transactions.len() < before)
    }
}
