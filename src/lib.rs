//! Cocoa
//!
//! Cocoa is the bookkeeping core of a small chocolate shop: an inventory, shopping carts that
//! move stock in and out of it, orders priced with shipping and a flat wholesale discount,
//! and a SQLite store of persisted stock levels for low-stock reporting.

pub mod cart;
pub mod category;
pub mod customer;
pub mod fixtures;
pub mod inventory;
pub mod items;
pub mod ledger;
pub mod logging;
pub mod order;
pub mod payment;
pub mod prelude;
pub mod pricing;
pub mod receipt;
pub mod render;
pub mod shipping;
pub mod stock;
pub mod uuids;
