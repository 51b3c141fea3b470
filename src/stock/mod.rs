//! Stock store
//!
//! Persisted stock levels, kept apart from the in-memory shop [`Inventory`]. Stock can be
//! adjusted up or down but never below zero; the database enforces that with a `CHECK`
//! constraint so concurrent adjustments can't race past it.
//!
//! [`Inventory`]: crate::inventory::Inventory

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

pub mod errors;
pub mod report;
pub mod sqlite;

pub use errors::StockError;
pub use report::{ReportScope, render_stock_table, stock_report};
pub use sqlite::{SqliteStockRepository, connect};

/// One item's stock level.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct StockRecord {
    /// Item identifier
    pub item_id: i64,

    /// Item name
    pub name: String,

    /// Units on hand, never negative
    pub stock: i64,

    /// At or below this level the item counts as low on stock
    pub low_level: i64,
}

impl StockRecord {
    /// Whether stock has fallen to the low-stock level.
    pub fn is_low(&self) -> bool {
        self.stock <= self.low_level
    }
}

/// An item to start tracking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewStockItem {
    /// Item identifier, assigned by the store when `None`
    pub item_id: Option<i64>,

    /// Item name, unique across the store
    pub name: String,

    /// Opening stock
    pub stock: i64,

    /// Low-stock level
    pub low_level: i64,
}

/// Persisted stock levels.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait StockRepository: Send + Sync {
    /// Creates the stock table if it doesn't exist.
    async fn ensure_schema(&self) -> Result<(), StockError>;

    /// Starts tracking an item.
    async fn insert_item(&self, item: NewStockItem) -> Result<StockRecord, StockError>;

    /// Adds `delta` units to an item's stock (negative to take stock away), returning the
    /// updated record. Fails with [`StockError::ConstraintViolation`] and leaves the stock
    /// unchanged if the result would be negative.
    async fn adjust_stock(&self, item_id: i64, delta: i64) -> Result<StockRecord, StockError>;

    /// Looks up one item.
    async fn get_item(&self, item_id: i64) -> Result<StockRecord, StockError>;

    /// Items whose stock is at or below their low-stock level, by id.
    async fn list_low_stock(&self) -> Result<Vec<StockRecord>, StockError>;

    /// Every item, by id.
    async fn list_all(&self) -> Result<Vec<StockRecord>, StockError>;
}
