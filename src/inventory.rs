//! Inventory

use rusty_money::{Money, iso::Currency};
use tracing::debug;

use crate::{
    items::Item,
    ledger::{Ledger, LedgerEntry, LedgerError, QuantityLedger},
    pricing::PricingError,
    uuids::TypedUuid,
};

/// Inventory UUID
pub type InventoryUuid = TypedUuid<Inventory<'static>>;

/// The shop's stock.
///
/// Carts draw from an inventory through [`ShoppingCart`](crate::cart::ShoppingCart); only
/// stocking and delisting happen here directly.
#[derive(Debug, Clone, PartialEq)]
pub struct Inventory<'a> {
    uuid: InventoryUuid,
    ledger: QuantityLedger<'a>,
}

impl<'a> Inventory<'a> {
    /// Creates an empty inventory priced in `currency`.
    #[must_use]
    pub fn new(currency: &'a Currency) -> Self {
        Self {
            uuid: InventoryUuid::new(),
            ledger: QuantityLedger::new(currency),
        }
    }

    /// The identifier carts use to bind to this inventory
    pub fn uuid(&self) -> InventoryUuid {
        self.uuid
    }

    /// The currency stock is priced in
    pub fn currency(&self) -> &'a Currency {
        self.ledger.currency()
    }

    /// Stocks `quantity` units of `item`.
    ///
    /// # Errors
    ///
    /// Returns a [`LedgerError`] if the quantity is zero, the item is in another currency,
    /// or the stock level would overflow.
    pub fn add(&mut self, item: Item<'a>, quantity: u32) -> Result<(), LedgerError> {
        debug!(name = item.name(), quantity, "stocking inventory");

        self.ledger.add(item, quantity)
    }

    /// Units of the named item on hand, zero when absent.
    pub fn available(&self, name: &str) -> u32 {
        self.ledger.quantity(name)
    }

    /// The stocked item with the given name.
    pub fn item(&self, name: &str) -> Option<&Item<'a>> {
        self.ledger.item(name)
    }

    /// Value of the stock held for one item: `price × quantity`, or zero when absent.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::Overflow`] if the value doesn't fit in minor units.
    pub fn total_item_price(&self, name: &str) -> Result<Money<'a, Currency>, PricingError> {
        match self.ledger.entry(name) {
            Some(entry) => entry.value(),
            None => Ok(Money::from_minor(0, self.currency())),
        }
    }

    /// Stops selling an item, removing its entry and returning whatever was on hand.
    pub fn delist(&mut self, name: &str) -> Option<LedgerEntry<'a>> {
        let entry = self.ledger.remove_entry(name);

        if let Some(entry) = &entry {
            debug!(name, quantity = entry.quantity(), "delisted item");
        }

        entry
    }

    pub(crate) fn ledger_mut(&mut self) -> &mut QuantityLedger<'a> {
        &mut self.ledger
    }
}

impl<'a> Ledger<'a> for Inventory<'a> {
    fn ledger(&self) -> &QuantityLedger<'a> {
        &self.ledger
    }
}
