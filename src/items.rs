//! Items

use rusty_money::{Money, MoneyError, iso::Currency};
use thiserror::Error;

/// Errors raised while building an item.
#[derive(Debug, Error, PartialEq)]
pub enum ItemError {
    /// Items are keyed by name, so the name can't be blank.
    #[error("item name cannot be empty")]
    EmptyName,

    /// Price and cost must be in the same currency (price currency, cost currency).
    #[error("price is in {0}, but cost is in {1}")]
    CurrencyMismatch(&'static str, &'static str),
}

/// A product the shop sells.
///
/// Items are identified by name: two ledgers holding an item called "Dark Truffle" refer
/// to the same product.
#[derive(Clone, Debug, PartialEq)]
pub struct Item<'a> {
    name: String,
    price: Money<'a, Currency>,
    cost: Money<'a, Currency>,
    wholesale: bool,
    flavour: Option<String>,
}

impl<'a> Item<'a> {
    /// Creates a new retail item.
    ///
    /// # Errors
    ///
    /// Returns an [`ItemError`] if the name is blank or the price and cost currencies differ.
    pub fn new(
        name: impl Into<String>,
        price: Money<'a, Currency>,
        cost: Money<'a, Currency>,
    ) -> Result<Self, ItemError> {
        let name = name.into();

        if name.trim().is_empty() {
            return Err(ItemError::EmptyName);
        }

        if price.currency() != cost.currency() {
            return Err(ItemError::CurrencyMismatch(
                price.currency().iso_alpha_code,
                cost.currency().iso_alpha_code,
            ));
        }

        Ok(Self {
            name,
            price,
            cost,
            wholesale: false,
            flavour: None,
        })
    }

    /// Marks the item as sold to wholesale customers.
    #[must_use]
    pub fn wholesale(mut self) -> Self {
        self.wholesale = true;
        self
    }

    /// Sets the chocolate flavour.
    #[must_use]
    pub fn with_flavour(mut self, flavour: impl Into<String>) -> Self {
        self.flavour = Some(flavour.into());
        self
    }

    /// Returns the item name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the selling price of one unit
    pub fn price(&self) -> &Money<'a, Currency> {
        &self.price
    }

    /// Returns what one unit costs the shop
    pub fn cost(&self) -> &Money<'a, Currency> {
        &self.cost
    }

    /// Whether the item is a wholesale line
    pub fn is_wholesale(&self) -> bool {
        self.wholesale
    }

    /// Returns the flavour, if one was recorded
    pub fn flavour(&self) -> Option<&str> {
        self.flavour.as_deref()
    }

    /// Returns the price minus the cost of one unit.
    ///
    /// # Errors
    ///
    /// Returns a [`MoneyError`] if the subtraction fails.
    pub fn margin(&self) -> Result<Money<'a, Currency>, MoneyError> {
        self.price.sub(self.cost)
    }

    /// Returns the currency the item is priced in
    pub fn currency(&self) -> &'a Currency {
        self.price.currency()
    }
}
