use uuid::Uuid;

use crate::errors::AppError;
use crate::models::stock::validate_symbol;
use crate::models::{PortfolioPosition, UpdatePosition, UpsertPosition};
use crate::services::portfolio_service;
use crate::store::StockStore;

fn validate_amounts(quantity: Option<i64>, average_cost: Option<f64>) -> Result<(), AppError> {
    if quantity.is_some_and(|q| q < 0) {
        return Err(AppError::Validation("Quantity cannot be negative".into()));
    }
    if average_cost.is_some_and(|c| !c.is_finite() || c < 0.0) {
        return Err(AppError::Validation("Average cost cannot be negative".into()));
    }
    Ok(())
}

fn not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Position {} not found", id))
}

/// Creates or replaces the holding for the symbol within the portfolio.
pub async fn upsert(
    store: &dyn StockStore,
    portfolio_id: Uuid,
    mut input: UpsertPosition,
) -> Result<PortfolioPosition, AppError> {
    input.symbol = validate_symbol(&input.symbol)?;
    validate_amounts(Some(input.quantity), Some(input.average_cost))?;

    // ensure portfolio exists
    portfolio_service::fetch_one(store, portfolio_id).await?;

    let position = store.upsert_position(portfolio_id, &input).await?;
    Ok(position)
}

pub async fn list(store: &dyn StockStore, portfolio_id: Uuid) -> Result<Vec<PortfolioPosition>, AppError> {
    portfolio_service::fetch_one(store, portfolio_id).await?;
    let positions = store.list_positions(portfolio_id).await?;
    Ok(positions)
}

pub(crate) async fn fetch_one(store: &dyn StockStore, id: Uuid) -> Result<PortfolioPosition, AppError> {
    store.get_position(id).await?.ok_or_else(|| not_found(id))
}

pub async fn update(
    store: &dyn StockStore,
    id: Uuid,
    input: UpdatePosition,
) -> Result<PortfolioPosition, AppError> {
    validate_amounts(input.quantity, input.average_cost)?;
    store.update_position(id, &input).await?.ok_or_else(|| not_found(id))
}

pub(crate) async fn delete(store: &dyn StockStore, id: Uuid) -> Result<(), AppError> {
    if store.delete_position(id).await? {
        Ok(())
    } else {
        Err(not_found(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemoryStore;

    fn holding(symbol: &str, quantity: i64, average_cost: f64) -> UpsertPosition {
        UpsertPosition {
            symbol: symbol.to_string(),
            quantity,
            average_cost,
        }
    }

    #[tokio::test]
    async fn test_upsert_replaces_same_symbol() {
        let store = MemoryStore::new();
        let portfolio = store
            .create_portfolio(Uuid::new_v4(), "Main", 0.0)
            .await
            .unwrap();

        let first = upsert(&store, portfolio.id, holding("msft", 1, 100.0))
            .await
            .unwrap();
        let second = upsert(&store, portfolio.id, holding("MSFT", 4, 120.0))
            .await
            .unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(second.quantity, 4);
        assert_eq!(list(&store, portfolio.id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_upsert_into_missing_portfolio_is_not_found() {
        let store = MemoryStore::new();
        let err = upsert(&store, Uuid::new_v4(), holding("MSFT", 1, 1.0))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_negative_quantity_is_rejected() {
        let store = MemoryStore::new();
        let err = update(
            &store,
            Uuid::new_v4(),
            UpdatePosition {
                quantity: Some(-1),
                average_cost: None,
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
