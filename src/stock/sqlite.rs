//! SQLite stock store

use std::str::FromStr;

use async_trait::async_trait;
use sqlx::{
    Sqlite, SqlitePool, query, query_as,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
};
use tracing::{debug, info};

use crate::stock::{NewStockItem, StockError, StockRecord, StockRepository};

const CREATE_SCHEMA_SQL: &str = include_str!("sql/create_schema.sql");
const INSERT_ITEM_SQL: &str = include_str!("sql/insert_item.sql");
const ADJUST_STOCK_SQL: &str = include_str!("sql/adjust_stock.sql");
const GET_ITEM_SQL: &str = include_str!("sql/get_item.sql");
const LIST_LOW_STOCK_SQL: &str = include_str!("sql/list_low_stock.sql");
const LIST_ALL_SQL: &str = include_str!("sql/list_all.sql");

/// Connect to a SQLite stock database, creating the file if it doesn't exist.
///
/// The pool holds a single long-lived connection, so `sqlite::memory:` databases survive
/// for as long as the pool does.
///
/// # Errors
///
/// Returns an error if the URL is invalid or the connection cannot be established.
pub async fn connect(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

    SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
}

/// [`StockRepository`] backed by a SQLite `item` table.
#[derive(Debug, Clone)]
pub struct SqliteStockRepository {
    pool: SqlitePool,
}

impl SqliteStockRepository {
    /// Wraps a connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StockRepository for SqliteStockRepository {
    #[tracing::instrument(name = "stock.repository.ensure_schema", skip(self), err)]
    async fn ensure_schema(&self) -> Result<(), StockError> {
        query(CREATE_SCHEMA_SQL).execute(&self.pool).await?;

        Ok(())
    }

    #[tracing::instrument(
        name = "stock.repository.insert_item",
        skip(self, item),
        fields(name = %item.name, stock = item.stock),
        err
    )]
    async fn insert_item(&self, item: NewStockItem) -> Result<StockRecord, StockError> {
        let record = query_as::<Sqlite, StockRecord>(INSERT_ITEM_SQL)
            .bind(item.item_id)
            .bind(item.name)
            .bind(item.stock)
            .bind(item.low_level)
            .fetch_one(&self.pool)
            .await?;

        info!(item_id = record.item_id, "started tracking stock item");

        Ok(record)
    }

    #[tracing::instrument(name = "stock.repository.adjust_stock", skip(self), err)]
    async fn adjust_stock(&self, item_id: i64, delta: i64) -> Result<StockRecord, StockError> {
        let record = query_as::<Sqlite, StockRecord>(ADJUST_STOCK_SQL)
            .bind(item_id)
            .bind(delta)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StockError::NotFound)?;

        debug!(stock = record.stock, low = record.is_low(), "adjusted stock");

        Ok(record)
    }

    #[tracing::instrument(name = "stock.repository.get_item", skip(self), err)]
    async fn get_item(&self, item_id: i64) -> Result<StockRecord, StockError> {
        Ok(query_as::<Sqlite, StockRecord>(GET_ITEM_SQL)
            .bind(item_id)
            .fetch_one(&self.pool)
            .await?)
    }

    #[tracing::instrument(name = "stock.repository.list_low_stock", skip(self), err)]
    async fn list_low_stock(&self) -> Result<Vec<StockRecord>, StockError> {
        let records = query_as::<Sqlite, StockRecord>(LIST_LOW_STOCK_SQL)
            .fetch_all(&self.pool)
            .await?;

        debug!(count = records.len(), "listed low stock");

        Ok(records)
    }

    #[tracing::instrument(name = "stock.repository.list_all", skip(self), err)]
    async fn list_all(&self) -> Result<Vec<StockRecord>, StockError> {
        Ok(query_as::<Sqlite, StockRecord>(LIST_ALL_SQL)
            .fetch_all(&self.pool)
            .await?)
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    async fn seeded() -> Result<SqliteStockRepository, StockError> {
        let repository = SqliteStockRepository::new(connect("sqlite::memory:").await?);

        repository.ensure_schema().await?;

        for (item_id, name, stock, low_level) in [
            (1, "Dark Truffle", 10, 3),
            (2, "Milk Bar", 5, 5),
            (3, "Sea Salt Bar", 0, 2),
        ] {
            repository
                .insert_item(NewStockItem {
                    item_id: Some(item_id),
                    name: name.to_string(),
                    stock,
                    low_level,
                })
                .await?;
        }

        Ok(repository)
    }

    #[tokio::test]
    async fn adjust_stock_applies_delta() -> TestResult {
        let repository = seeded().await?;

        let record = repository.adjust_stock(1, -4).await?;

        assert_eq!(record.stock, 6);
        assert_eq!(repository.get_item(1).await?.stock, 6);

        let record = repository.adjust_stock(1, 5).await?;

        assert_eq!(record.stock, 11);

        Ok(())
    }

    #[tokio::test]
    async fn adjust_below_zero_is_rejected_and_leaves_stock() -> TestResult {
        let repository = seeded().await?;

        let result = repository.adjust_stock(3, -1).await;

        assert!(matches!(result, Err(StockError::ConstraintViolation)));
        assert_eq!(repository.get_item(3).await?.stock, 0);

        Ok(())
    }

    #[tokio::test]
    async fn adjust_unknown_item_is_not_found() -> TestResult {
        let repository = seeded().await?;

        assert!(matches!(
            repository.adjust_stock(99, 1).await,
            Err(StockError::NotFound)
        ));
        assert!(matches!(
            repository.get_item(99).await,
            Err(StockError::NotFound)
        ));

        Ok(())
    }

    #[tokio::test]
    async fn list_low_stock_returns_items_at_or_below_level() -> TestResult {
        let repository = seeded().await?;

        let low: Vec<i64> = repository
            .list_low_stock()
            .await?
            .into_iter()
            .map(|record| record.item_id)
            .collect();

        assert_eq!(low, vec![2, 3]);

        Ok(())
    }

    #[tokio::test]
    async fn list_all_is_ordered_by_id() -> TestResult {
        let repository = seeded().await?;

        let names: Vec<String> = repository
            .list_all()
            .await?
            .into_iter()
            .map(|record| record.name)
            .collect();

        assert_eq!(names, vec!["Dark Truffle", "Milk Bar", "Sea Salt Bar"]);

        Ok(())
    }

    #[tokio::test]
    async fn insert_duplicate_name_already_exists() -> TestResult {
        let repository = seeded().await?;

        let result = repository
            .insert_item(NewStockItem {
                item_id: None,
                name: "Milk Bar".to_string(),
                stock: 1,
                low_level: 0,
            })
            .await;

        assert!(matches!(result, Err(StockError::AlreadyExists)));

        Ok(())
    }

    #[tokio::test]
    async fn insert_assigns_ids_when_missing() -> TestResult {
        let repository = seeded().await?;

        let record = repository
            .insert_item(NewStockItem {
                item_id: None,
                name: "Gift Box".to_string(),
                stock: 4,
                low_level: 1,
            })
            .await?;

        assert_eq!(record.item_id, 4);
        assert!(!record.is_low());

        Ok(())
    }

    #[tokio::test]
    async fn insert_negative_stock_violates_constraint() -> TestResult {
        let repository = seeded().await?;

        let result = repository
            .insert_item(NewStockItem {
                item_id: None,
                name: "Fudge".to_string(),
                stock: -1,
                low_level: 0,
            })
            .await;

        assert!(matches!(result, Err(StockError::ConstraintViolation)));

        Ok(())
    }

    #[tokio::test]
    async fn ensure_schema_is_idempotent() -> TestResult {
        let repository = seeded().await?;

        repository.ensure_schema().await?;

        assert_eq!(repository.list_all().await?.len(), 3);

        Ok(())
    }
}
