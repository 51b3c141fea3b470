//! Inventory Fixtures

use rust_decimal::{Decimal, prelude::ToPrimitive};
use rusty_money::{
    Money,
    iso::{Currency, EUR, GBP, USD},
};
use serde::Deserialize;

use crate::{fixtures::FixtureError, items::Item};

/// Wrapper for stocked items in YAML
#[derive(Debug, Deserialize)]
pub struct InventoryFixture {
    /// Currency code every price must use (e.g. "USD")
    pub currency: String,

    /// Items in catalog order
    pub items: Vec<ItemFixture>,
}

/// Item Fixture
#[derive(Debug, Deserialize)]
pub struct ItemFixture {
    /// Item name
    pub name: String,

    /// Selling price (e.g. "3.95 USD")
    pub price: String,

    /// Cost to the shop (e.g. "1.20 USD")
    pub cost: String,

    /// Units on hand
    pub stock: u32,

    /// Whether the item is a wholesale line
    #[serde(default)]
    pub wholesale: bool,

    /// Chocolate flavour
    #[serde(default)]
    pub flavour: Option<String>,

    /// Catalog category
    #[serde(default)]
    pub category: Option<String>,
}

impl ItemFixture {
    /// Builds the item, checking both prices are in `currency`.
    ///
    /// # Errors
    ///
    /// Returns a [`FixtureError`] if a price can't be parsed, is in another currency, or the
    /// item is invalid.
    pub fn to_item(&self, currency: &'static Currency) -> Result<Item<'static>, FixtureError> {
        let price = parse_money(&self.price, currency)?;
        let cost = parse_money(&self.cost, currency)?;

        let mut item = Item::new(self.name.clone(), price, cost)?;

        if self.wholesale {
            item = item.wholesale();
        }

        if let Some(flavour) = &self.flavour {
            item = item.with_flavour(flavour.clone());
        }

        Ok(item)
    }
}

fn parse_money(
    s: &str,
    expected: &'static Currency,
) -> Result<Money<'static, Currency>, FixtureError> {
    let (minor_units, currency) = parse_price(s)?;

    if currency != expected {
        return Err(FixtureError::CurrencyMismatch(
            expected.iso_alpha_code.to_string(),
            currency.iso_alpha_code.to_string(),
        ));
    }

    Ok(Money::from_minor(minor_units, currency))
}

/// Parse price string (e.g., "3.95 USD") into minor units and currency
///
/// # Errors
///
/// Returns an error if the string is not in the format "AMOUNT CURRENCY", if the amount
/// cannot be parsed as a decimal or has more than two decimal places, or if the currency
/// code is not recognized.
pub fn parse_price(s: &str) -> Result<(i64, &'static Currency), FixtureError> {
    let parts: Vec<&str> = s.split_whitespace().collect();

    let [amount, currency_code] = parts.as_slice() else {
        return Err(FixtureError::InvalidPrice(format!(
            "Expected format 'AMOUNT CURRENCY', got: {s}"
        )));
    };

    let amount = amount
        .parse::<Decimal>()
        .map_err(|_err| FixtureError::InvalidPrice(s.to_string()))?;

    // Sub-cent amounts are rejected rather than rounded.
    if amount.normalize().scale() > 2 {
        return Err(FixtureError::InvalidPrice(s.to_string()));
    }

    let minor_units = amount
        .checked_mul(Decimal::new(100, 0))
        .and_then(|value| value.to_i64())
        .ok_or_else(|| FixtureError::InvalidPrice(s.to_string()))?;

    Ok((minor_units, parse_currency(currency_code)?))
}

/// Parse an ISO currency code the shop trades in.
///
/// # Errors
///
/// Returns [`FixtureError::UnknownCurrency`] for anything but GBP, USD and EUR.
pub fn parse_currency(code: &str) -> Result<&'static Currency, FixtureError> {
    match code.trim() {
        "GBP" => Ok(GBP),
        "USD" => Ok(USD),
        "EUR" => Ok(EUR),
        other => Err(FixtureError::UnknownCurrency(other.to_string())),
    }
}
