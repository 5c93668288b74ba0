use chrono::Utc;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::stock::validate_symbol;
use crate::models::{CreateTransaction, NewTransaction, Transaction};
use crate::services::portfolio_service;
use crate::store::StockStore;

fn not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Transaction {} not found", id))
}

/// Validates the request and fills in fees, total and execution time.
pub fn prepare(input: CreateTransaction) -> Result<NewTransaction, AppError> {
    let symbol = validate_symbol(&input.symbol)?;
    if input.quantity <= 0 {
        return Err(AppError::Validation("Quantity must be > 0".into()));
    }
    if !input.price.is_finite() || input.price <= 0.0 {
        return Err(AppError::Validation("Price must be > 0".into()));
    }
    let fees = input.fees.unwrap_or(0.0);
    if !fees.is_finite() || fees < 0.0 {
        return Err(AppError::Validation("Fees cannot be negative".into()));
    }

    Ok(NewTransaction {
        symbol,
        side: input.side,
        quantity: input.quantity,
        price: input.price,
        fees,
        total_amount: input.side.total_amount(input.quantity, input.price, fees),
        executed_at: input.executed_at.unwrap_or_else(Utc::now),
    })
}

/// Records a trade. Positions are not adjusted.
pub async fn create(
    store: &dyn StockStore,
    portfolio_id: Uuid,
    input: CreateTransaction,
) -> Result<Transaction, AppError> {
    let new_transaction = prepare(input)?;
    portfolio_service::fetch_one(store, portfolio_id).await?;

    let transaction = store.create_transaction(portfolio_id, &new_transaction).await?;
    Ok(transaction)
}

pub async fn list(store: &dyn StockStore, portfolio_id: Uuid) -> Result<Vec<Transaction>, AppError> {
    portfolio_service::fetch_one(store, portfolio_id).await?;
    let transactions = store.list_transactions(portfolio_id).await?;
    Ok(transactions)
}

pub(crate) async fn fetch_one(store: &dyn StockStore, id: Uuid) -> Result<Transaction, AppError> {
    store.get_transaction(id).await?.ok_or_else(|| not_found(id))
}

pub(crate) async fn delete(store: &dyn StockStore, id: Uuid) -> Result<(), AppError> {
    if store.delete_transaction(id).await? {
        Ok(())
    } else {
        Err(not_found(id))
    }
}
