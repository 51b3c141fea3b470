//! Cocoa prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{CartError, ShoppingCart},
    category::{Catalog, CatalogError, Category, CategoryKey},
    customer::{Customer, UnknownUserType, UserType},
    fixtures::{Fixture, FixtureError},
    inventory::{Inventory, InventoryUuid},
    items::{Item, ItemError},
    ledger::{Ledger, LedgerEntry, LedgerError, QuantityLedger},
    order::{Order, OrderCustomer, OrderError, OrderUuid, PersonalDetails, wholesale_discount},
    payment::{CardDetails, InvoiceDetails, PaymentError, PaymentKind, PaymentMethod},
    pricing::PricingError,
    receipt::{Receipt, ReceiptLine},
    render::RenderError,
    shipping::{Carrier, Shipping, ShippingError},
    stock::{
        NewStockItem, ReportScope, SqliteStockRepository, StockError, StockRecord,
        StockRepository,
    },
};
