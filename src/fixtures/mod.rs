//! Fixtures
//!
//! Shop stock and customers loaded from YAML, for demos, binaries and tests.

use std::{fs, path::PathBuf};

use rustc_hash::FxHashMap;
use rusty_money::iso::Currency;
use thiserror::Error;
use tracing::debug;

use crate::{
    category::{Catalog, CatalogError},
    customer::{Customer, UnknownUserType},
    fixtures::{
        customers::{CustomerFixture, CustomersFixture},
        inventory::InventoryFixture,
    },
    inventory::Inventory,
    items::{Item, ItemError},
    ledger::LedgerError,
};

pub mod customers;
pub mod inventory;

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price format
    #[error("Invalid price format: {0}")]
    InvalidPrice(String),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// Currency mismatch between the fixture set and a price
    #[error("Currency mismatch: expected {0}, found {1}")]
    CurrencyMismatch(String, String),

    /// No inventory loaded yet
    #[error("No inventory loaded yet; currency unknown")]
    NoCurrency,

    /// Customer not found
    #[error("Customer not found: {0}")]
    CustomerNotFound(String),

    /// Invalid user type
    #[error(transparent)]
    UserType(#[from] UnknownUserType),

    /// Invalid item
    #[error(transparent)]
    Item(#[from] ItemError),

    /// Item couldn't be stocked
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    /// Item couldn't be catalogued
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Fixture
#[derive(Debug)]
pub struct Fixture {
    /// Base path for fixture files
    base_path: PathBuf,

    /// Items and their opening stock, in file order
    stock: Vec<(Item<'static>, u32)>,

    /// Browsable categories
    catalog: Catalog<'static>,

    /// Customer key -> customer fixture
    customers: FxHashMap<String, CustomerFixture>,

    /// Currency for the fixture set
    currency: Option<&'static Currency>,
}

impl Fixture {
    /// Create a new empty fixture with default base path
    pub fn new() -> Self {
        Self::with_base_path("./fixtures")
    }

    /// Create a new empty fixture with custom base path
    pub fn with_base_path(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            stock: Vec::new(),
            catalog: Catalog::new(),
            customers: FxHashMap::default(),
            currency: None,
        }
    }

    /// Load stocked items from `inventory/<name>.yml`
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if any price is in a
    /// different currency to the fixture set.
    pub fn load_inventory(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let file_path = self.base_path.join("inventory").join(format!("{name}.yml"));
        let contents = fs::read_to_string(&file_path)?;
        let fixture: InventoryFixture = serde_norway::from_str(&contents)?;

        let currency = inventory::parse_currency(&fixture.currency)?;

        if let Some(existing_currency) = self.currency {
            if existing_currency != currency {
                return Err(FixtureError::CurrencyMismatch(
                    existing_currency.iso_alpha_code.to_string(),
                    currency.iso_alpha_code.to_string(),
                ));
            }
        } else {
            self.currency = Some(currency);
        }

        for item_fixture in &fixture.items {
            let item = item_fixture.to_item(currency)?;

            if let Some(category) = &item_fixture.category {
                let key = self.catalog.ensure_category(category)?;

                self.catalog.add_item(key, item.clone())?;
            }

            self.stock.push((item, item_fixture.stock));
        }

        debug!(
            path = %file_path.display(),
            items = fixture.items.len(),
            "loaded inventory fixture"
        );

        Ok(self)
    }

    /// Load customers from `customers/<name>.yml`
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_customers(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let file_path = self.base_path.join("customers").join(format!("{name}.yml"));
        let contents = fs::read_to_string(&file_path)?;
        let fixture: CustomersFixture = serde_norway::from_str(&contents)?;

        debug!(
            path = %file_path.display(),
            customers = fixture.customers.len(),
            "loaded customers fixture"
        );

        self.customers.extend(fixture.customers);

        Ok(self)
    }

    /// Load a complete fixture set (inventory and customers with the same name)
    ///
    /// # Errors
    ///
    /// Returns an error if any of the fixture files cannot be loaded.
    pub fn from_set(name: &str) -> Result<Self, FixtureError> {
        let mut fixture = Self::new();

        fixture.load_inventory(name)?.load_customers(name)?;

        Ok(fixture)
    }

    /// Builds a fresh inventory holding the opening stock.
    ///
    /// Each call returns a new inventory with its own identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if no inventory has been loaded or an item can't be stocked.
    pub fn inventory(&self) -> Result<Inventory<'static>, FixtureError> {
        let mut inventory = Inventory::new(self.currency()?);

        for (item, stock) in &self.stock {
            if *stock > 0 {
                inventory.add(item.clone(), *stock)?;
            }
        }

        Ok(inventory)
    }

    /// Builds the customer stored under `key`, with no cart and no orders.
    ///
    /// # Errors
    ///
    /// Returns an error if the customer is not found, no inventory has been loaded, or the
    /// customer's user type is invalid.
    pub fn customer(&self, key: &str) -> Result<Customer<'static>, FixtureError> {
        let fixture = self
            .customers
            .get(key)
            .ok_or_else(|| FixtureError::CustomerNotFound(key.to_string()))?;

        fixture.to_customer(self.currency()?)
    }

    /// Customer keys in sorted order
    pub fn customer_keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.customers.keys().map(String::as_str).collect();

        keys.sort_unstable();

        keys
    }

    /// Items and their opening stock
    pub fn stock(&self) -> &[(Item<'static>, u32)] {
        &self.stock
    }

    /// Browsable categories
    pub fn catalog(&self) -> &Catalog<'static> {
        &self.catalog
    }

    /// Get the currency
    ///
    /// # Errors
    ///
    /// Returns an error if no inventory has been loaded yet.
    pub fn currency(&self) -> Result<&'static Currency, FixtureError> {
        self.currency.ok_or(FixtureError::NoCurrency)
    }
}

impl Default for Fixture {
    fn default() -> Self {
        Self::new()
    }
}
