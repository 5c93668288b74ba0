use tracing::error;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::{CreatePortfolio, Portfolio, PortfolioDetail, UpdatePortfolio};
use crate::store::StockStore;

fn validate_cash(cash_balance: f64) -> Result<(), AppError> {
    if !cash_balance.is_finite() || cash_balance < 0.0 {
        return Err(AppError::Validation("Cash balance cannot be negative".into()));
    }
    Ok(())
}

pub(crate) fn not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Portfolio {} not found", id))
}

pub async fn create(
    store: &dyn StockStore,
    user_id: Uuid,
    input: CreatePortfolio,
) -> Result<Portfolio, AppError> {
    let name = input.name.trim();
    if name.is_empty() {
        return Err(AppError::Validation("Portfolio name cannot be empty".into()));
    }
    let cash_balance = input.cash_balance.unwrap_or(0.0);
    validate_cash(cash_balance)?;

    let portfolio = store.create_portfolio(user_id, name, cash_balance).await?;
    Ok(portfolio)
}

pub async fn update(
    store: &dyn StockStore,
    id: Uuid,
    input: UpdatePortfolio,
) -> Result<Portfolio, AppError> {
    if input.name.as_deref().is_some_and(|n| n.trim().is_empty()) {
        return Err(AppError::Validation("Portfolio name cannot be empty".into()));
    }
    if let Some(cash_balance) = input.cash_balance {
        validate_cash(cash_balance)?;
    }

    store
        .update_portfolio(id, &input)
        .await?
        .ok_or_else(|| not_found(id))
}

pub async fn fetch_all(store: &dyn StockStore, user_id: Uuid) -> Result<Vec<Portfolio>, AppError> {
    let portfolios = store.list_portfolios(user_id).await?;
    Ok(portfolios)
}

pub(crate) async fn fetch_one(store: &dyn StockStore, id: Uuid) -> Result<Portfolio, AppError> {
    store.get_portfolio(id).await?.ok_or_else(|| not_found(id))
}

/// Portfolio together with its current positions.
pub async fn fetch_detail(store: &dyn StockStore, id: Uuid) -> Result<PortfolioDetail, AppError> {
    let portfolio = fetch_one(store, id).await?;
    let positions = store.list_positions(id).await.map_err(|e| {
        error!("Failed to load positions for portfolio {}: {}", id, e);
        e
    })?;
    Ok(PortfolioDetail {
        portfolio,
        positions,
    })
}

pub(crate) async fn delete(store: &dyn StockStore, id: Uuid) -> Result<(), AppError> {
    if store.delete_portfolio(id).await? {
        Ok(())
    } else {
        Err(not_found(id))
    }
}
