//! Quantity ledgers
//!
//! A [`QuantityLedger`] maps item names to an item and the number of units held. The
//! inventory, shopping carts and order snapshots are all built on one.

use std::{collections::BTreeMap, io, mem};

use rusty_money::{Money, iso::Currency};
use thiserror::Error;
use tracing::trace;

use crate::{
    items::Item,
    pricing::{PricingError, line_total, sum},
    render::{RenderError, write_ledger_table},
};

/// Errors raised by ledger bookkeeping.
#[derive(Debug, Error, PartialEq)]
pub enum LedgerError {
    /// Quantities moved in or out of a ledger must be at least one unit.
    #[error("quantity must be at least 1")]
    InvalidQuantity,

    /// No entry for the named item.
    #[error("item {0:?} not found")]
    ItemNotFound(String),

    /// More units were requested than the ledger holds.
    #[error("requested {requested} of {name:?}, but only {available} held")]
    InsufficientQuantity {
        /// Item name
        name: String,
        /// Units requested
        requested: u32,
        /// Units held
        available: u32,
    },

    /// The entry's quantity would exceed `u32::MAX`.
    #[error("quantity of {0:?} would overflow")]
    QuantityOverflow(String),

    /// The item is priced in a different currency to the ledger (item, item currency, ledger currency).
    #[error("item {0:?} has currency {1}, but ledger has currency {2}")]
    CurrencyMismatch(String, &'static str, &'static str),
}

/// One ledger line: an item and how many units of it are held.
#[derive(Clone, Debug, PartialEq)]
pub struct LedgerEntry<'a> {
    item: Item<'a>,
    quantity: u32,
}

impl<'a> LedgerEntry<'a> {
    /// The item held
    pub fn item(&self) -> &Item<'a> {
        &self.item
    }

    /// Units held, always at least one
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Price of the item multiplied by the quantity held.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::Overflow`] if the value doesn't fit in minor units.
    pub fn value(&self) -> Result<Money<'a, Currency>, PricingError> {
        line_total(self.item.price(), self.quantity)
    }
}

/// Item name → (item, quantity) bookkeeping.
///
/// Entries with a zero quantity are never stored: an entry is dropped as soon as its last
/// unit is taken. Entries iterate in name order.
#[derive(Clone, Debug, PartialEq)]
pub struct QuantityLedger<'a> {
    entries: BTreeMap<String, LedgerEntry<'a>>,
    currency: &'a Currency,
}

impl<'a> QuantityLedger<'a> {
    /// Creates an empty ledger priced in `currency`.
    #[must_use]
    pub fn new(currency: &'a Currency) -> Self {
        Self {
            entries: BTreeMap::new(),
            currency,
        }
    }

    /// Adds `quantity` units of `item`.
    ///
    /// If the ledger already holds an item with the same name its quantity is increased and
    /// the stored item is kept.
    ///
    /// # Errors
    ///
    /// Returns a [`LedgerError`] if the quantity is zero, the item is priced in another
    /// currency, or the total would overflow. The ledger is unchanged on error.
    pub fn add(&mut self, item: Item<'a>, quantity: u32) -> Result<(), LedgerError> {
        self.check_add(&item, quantity)?;

        match self.entries.get_mut(item.name()) {
            Some(entry) => {
                // Checked in `check_add`.
                entry.quantity = entry.quantity.saturating_add(quantity);
            }
            None => {
                self.entries
                    .insert(item.name().to_string(), LedgerEntry { item, quantity });
            }
        }

        Ok(())
    }

    /// Checks whether [`add`](Self::add) would succeed without changing anything.
    ///
    /// # Errors
    ///
    /// Returns the error `add` would return.
    pub fn check_add(&self, item: &Item<'a>, quantity: u32) -> Result<(), LedgerError> {
        if quantity == 0 {
            return Err(LedgerError::InvalidQuantity);
        }

        if item.currency() != self.currency {
            return Err(LedgerError::CurrencyMismatch(
                item.name().to_string(),
                item.currency().iso_alpha_code,
                self.currency.iso_alpha_code,
            ));
        }

        let held = self.quantity(item.name());

        if held.checked_add(quantity).is_none() {
            return Err(LedgerError::QuantityOverflow(item.name().to_string()));
        }

        Ok(())
    }

    /// Takes `quantity` units of the named item out of the ledger, returning the item.
    ///
    /// # Errors
    ///
    /// Returns a [`LedgerError`] if the quantity is zero, the item isn't held, or fewer
    /// than `quantity` units are held. The ledger is unchanged on error.
    pub fn take(&mut self, name: &str, quantity: u32) -> Result<Item<'a>, LedgerError> {
        let remaining = self.check_take(name, quantity)?.quantity - quantity;

        let item = if remaining == 0 {
            self.entries
                .remove(name)
                .map(|entry| entry.item)
                .ok_or_else(|| LedgerError::ItemNotFound(name.to_string()))?
        } else {
            let entry = self
                .entries
                .get_mut(name)
                .ok_or_else(|| LedgerError::ItemNotFound(name.to_string()))?;

            entry.quantity = remaining;
            entry.item.clone()
        };

        trace!(name, quantity, remaining, "took from ledger");

        Ok(item)
    }

    /// Checks whether [`take`](Self::take) would succeed, returning the entry it would
    /// draw from.
    ///
    /// # Errors
    ///
    /// Returns the error `take` would return.
    pub fn check_take(&self, name: &str, quantity: u32) -> Result<&LedgerEntry<'a>, LedgerError> {
        if quantity == 0 {
            return Err(LedgerError::InvalidQuantity);
        }

        let entry = self
            .entries
            .get(name)
            .ok_or_else(|| LedgerError::ItemNotFound(name.to_string()))?;

        if quantity > entry.quantity {
            return Err(LedgerError::InsufficientQuantity {
                name: name.to_string(),
                requested: quantity,
                available: entry.quantity,
            });
        }

        Ok(entry)
    }

    /// Removes the named entry outright, whatever its quantity.
    pub fn remove_entry(&mut self, name: &str) -> Option<LedgerEntry<'a>> {
        self.entries.remove(name)
    }

    /// Moves every entry into a new ledger, leaving this one empty.
    #[must_use]
    pub fn take_all(&mut self) -> Self {
        let currency = self.currency;

        mem::replace(self, Self::new(currency))
    }

    /// Units held of the named item, zero when absent
    pub fn quantity(&self, name: &str) -> u32 {
        self.entries.get(name).map_or(0, |entry| entry.quantity)
    }

    /// The item stored under `name`
    pub fn item(&self, name: &str) -> Option<&Item<'a>> {
        self.entries.get(name).map(|entry| &entry.item)
    }

    /// The entry stored under `name`
    pub fn entry(&self, name: &str) -> Option<&LedgerEntry<'a>> {
        self.entries.get(name)
    }

    /// Whether an entry exists for `name`
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Iterate over entries in name order.
    pub fn iter(&self) -> impl Iterator<Item = &LedgerEntry<'a>> {
        self.entries.values()
    }

    /// Number of distinct items held
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the ledger holds nothing
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total units held across all entries.
    #[must_use]
    pub fn units(&self) -> u64 {
        self.entries
            .values()
            .map(|entry| u64::from(entry.quantity))
            .sum()
    }

    /// The currency every item in the ledger is priced in
    #[must_use]
    pub fn currency(&self) -> &'a Currency {
        self.currency
    }

    /// Sum of `price × quantity` over every entry.
    ///
    /// # Errors
    ///
    /// Returns a [`PricingError`] if the value doesn't fit in minor units.
    pub fn total_value(&self) -> Result<Money<'a, Currency>, PricingError> {
        let values = self
            .entries
            .values()
            .map(LedgerEntry::value)
            .collect::<Result<Vec<_>, _>>()?;

        sum(values, self.currency)
    }
}

/// Shared read-side behaviour of anything backed by a [`QuantityLedger`].
pub trait Ledger<'a> {
    /// The underlying ledger.
    fn ledger(&self) -> &QuantityLedger<'a>;

    /// Sum of `price × quantity` over every entry.
    ///
    /// # Errors
    ///
    /// Returns a [`PricingError`] if the value doesn't fit in minor units.
    fn total_value(&self) -> Result<Money<'a, Currency>, PricingError> {
        self.ledger().total_value()
    }

    /// Units held of the named item, zero when absent.
    fn quantity(&self, name: &str) -> u32 {
        self.ledger().quantity(name)
    }

    /// Writes the ledger as a table followed by its total value.
    ///
    /// # Errors
    ///
    /// Returns a [`RenderError`] if the values can't be calculated or written.
    fn write_to(&self, out: impl io::Write) -> Result<(), RenderError> {
        write_ledger_table(out, self.ledger())
    }
}

impl<'a> Ledger<'a> for QuantityLedger<'a> {
    fn ledger(&self) -> &QuantityLedger<'a> {
        self
    }
}
