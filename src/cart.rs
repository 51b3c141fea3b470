//! Shopping carts

use thiserror::Error;
use tracing::debug;

use crate::{
    inventory::{Inventory, InventoryUuid},
    ledger::{Ledger, LedgerError, QuantityLedger},
};

/// Errors raised when moving stock between a cart and its inventory.
///
/// Every error leaves both the cart and the inventory exactly as they were.
#[derive(Debug, Error, PartialEq)]
pub enum CartError {
    /// The cart draws from a different inventory (cart's inventory, inventory given).
    #[error("cart is bound to inventory {0}, not {1}")]
    InventoryMismatch(InventoryUuid, InventoryUuid),

    /// Quantities must be at least one unit.
    #[error("quantity must be at least 1")]
    InvalidQuantity,

    /// The item isn't stocked (on add) or isn't in the cart (on remove).
    #[error("item {0:?} not found")]
    ItemNotFound(String),

    /// The inventory holds fewer units than requested.
    #[error("requested {requested} of {name:?}, but only {available} in stock")]
    InsufficientStock {
        /// Item name
        name: String,
        /// Units requested
        requested: u32,
        /// Units in stock
        available: u32,
    },

    /// The cart holds fewer units than requested for removal.
    #[error("requested removal of {requested} {name:?}, but the cart holds {held}")]
    ExceedsCartQuantity {
        /// Item name
        name: String,
        /// Units requested
        requested: u32,
        /// Units in the cart
        held: u32,
    },

    /// Any other ledger failure, such as a quantity overflow.
    #[error(transparent)]
    Ledger(LedgerError),
}

/// A customer's cart, bound to the inventory it draws stock from.
#[derive(Debug, Clone, PartialEq)]
pub struct ShoppingCart<'a> {
    inventory: InventoryUuid,
    ledger: QuantityLedger<'a>,
}

impl<'a> ShoppingCart<'a> {
    /// Creates an empty cart drawing from `inventory`.
    #[must_use]
    pub fn new(inventory: &Inventory<'a>) -> Self {
        Self {
            inventory: inventory.uuid(),
            ledger: QuantityLedger::new(inventory.currency()),
        }
    }

    /// The inventory this cart draws from
    pub fn inventory(&self) -> InventoryUuid {
        self.inventory
    }

    /// Whether the cart holds nothing
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ledger.is_empty()
    }

    /// Moves `quantity` units of the named item from the inventory into the cart.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError`] if the cart is bound to another inventory, the quantity is
    /// zero, the item isn't stocked, or not enough is in stock. Nothing changes on error.
    pub fn add(
        &mut self,
        inventory: &mut Inventory<'a>,
        name: &str,
        quantity: u32,
    ) -> Result<(), CartError> {
        self.check_bound_to(inventory)?;

        let entry = inventory
            .ledger()
            .check_take(name, quantity)
            .map_err(|err| match err {
                LedgerError::InsufficientQuantity {
                    name,
                    requested,
                    available,
                } => CartError::InsufficientStock {
                    name,
                    requested,
                    available,
                },
                other => other.into(),
            })?;

        self.ledger
            .check_add(entry.item(), quantity)
            .map_err(CartError::from)?;

        let item = inventory.ledger_mut().take(name, quantity)?;
        self.ledger.add(item, quantity)?;

        debug!(
            name,
            quantity,
            in_cart = self.ledger.quantity(name),
            in_stock = inventory.available(name),
            "moved stock into cart"
        );

        Ok(())
    }

    /// Moves `quantity` units of the named item from the cart back into the inventory.
    ///
    /// If the inventory no longer lists the item (it was delisted while in the cart) the
    /// entry is reinstated from the cart's copy of the item.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError`] if the cart is bound to another inventory, the quantity is
    /// zero, the item isn't in the cart, or the cart holds fewer units than requested.
    /// Nothing changes on error.
    pub fn remove(
        &mut self,
        inventory: &mut Inventory<'a>,
        name: &str,
        quantity: u32,
    ) -> Result<(), CartError> {
        self.check_bound_to(inventory)?;

        let entry = self
            .ledger
            .check_take(name, quantity)
            .map_err(|err| match err {
                LedgerError::InsufficientQuantity {
                    name,
                    requested,
                    available,
                } => CartError::ExceedsCartQuantity {
                    name,
                    requested,
                    held: available,
                },
                other => other.into(),
            })?;

        inventory
            .ledger()
            .check_add(entry.item(), quantity)
            .map_err(CartError::from)?;

        let item = self.ledger.take(name, quantity)?;
        inventory.ledger_mut().add(item, quantity)?;

        debug!(
            name,
            quantity,
            in_cart = self.ledger.quantity(name),
            in_stock = inventory.available(name),
            "returned stock to inventory"
        );

        Ok(())
    }

    /// Returns everything in the cart to the inventory, leaving the cart empty.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError`] if the cart is bound to another inventory or a returned
    /// quantity would overflow the stock level. Nothing changes on error.
    pub fn release_all(&mut self, inventory: &mut Inventory<'a>) -> Result<(), CartError> {
        self.check_bound_to(inventory)?;

        for entry in self.ledger.iter() {
            inventory
                .ledger()
                .check_add(entry.item(), entry.quantity())
                .map_err(CartError::from)?;
        }

        for entry in self.ledger.take_all().iter() {
            inventory
                .ledger_mut()
                .add(entry.item().clone(), entry.quantity())?;
        }

        debug!("released cart back to inventory");

        Ok(())
    }

    /// Empties the cart without returning anything to the inventory: the point of sale.
    pub(crate) fn checkout(&mut self) -> QuantityLedger<'a> {
        self.ledger.take_all()
    }

    fn check_bound_to(&self, inventory: &Inventory<'_>) -> Result<(), CartError> {
        if self.inventory == inventory.uuid() {
            Ok(())
        } else {
            Err(CartError::InventoryMismatch(self.inventory, inventory.uuid()))
        }
    }
}

impl<'a> Ledger<'a> for ShoppingCart<'a> {
    fn ledger(&self) -> &QuantityLedger<'a> {
        &self.ledger
    }
}

impl From<LedgerError> for CartError {
    fn from(error: LedgerError) -> Self {
        match error {
            LedgerError::InvalidQuantity => Self::InvalidQuantity,
            LedgerError::ItemNotFound(name) => Self::ItemNotFound(name),
            other => Self::Ledger(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::{Money, iso::USD};
    use testresult::TestResult;

    use crate::items::{Item, ItemError};

    use super::*;

    fn item<'a>(name: &str, price: i64) -> Result<Item<'a>, ItemError> {
        Item::new(name, Money::from_minor(price, USD), Money::from_minor(50, USD))
    }

    fn stocked<'a>() -> Result<Inventory<'a>, Box<dyn std::error::Error>> {
        let mut inventory = Inventory::new(USD);

        inventory.add(item("Dark Truffle", 395)?, 10)?;
        inventory.add(item("Milk Bar", 195)?, 6)?;

        Ok(inventory)
    }

    #[test]
    fn add_moves_stock_from_inventory_to_cart() -> TestResult {
        let mut inventory = stocked()?;
        let mut cart = ShoppingCart::new(&inventory);

        cart.add(&mut inventory, "Dark Truffle", 3)?;

        assert_eq!(cart.quantity("Dark Truffle"), 3);
        assert_eq!(inventory.available("Dark Truffle"), 7);

        Ok(())
    }

    #[test]
    fn add_then_remove_restores_both_ledgers() -> TestResult {
        let mut inventory = stocked()?;
        let mut cart = ShoppingCart::new(&inventory);

        let inventory_before = inventory.clone();
        let cart_before = cart.clone();

        cart.add(&mut inventory, "Milk Bar", 6)?;
        cart.remove(&mut inventory, "Milk Bar", 6)?;

        assert_eq!(inventory, inventory_before);
        assert_eq!(cart, cart_before);

        Ok(())
    }

    #[test]
    fn add_more_than_stocked_changes_nothing() -> TestResult {
        let mut inventory = stocked()?;
        let mut cart = ShoppingCart::new(&inventory);

        cart.add(&mut inventory, "Milk Bar", 2)?;

        let inventory_before = inventory.clone();
        let cart_before = cart.clone();

        let result = cart.add(&mut inventory, "Milk Bar", 5);

        assert_eq!(
            result,
            Err(CartError::InsufficientStock {
                name: "Milk Bar".to_string(),
                requested: 5,
                available: 4,
            })
        );
        assert_eq!(inventory, inventory_before);
        assert_eq!(cart, cart_before);

        Ok(())
    }

    #[test]
    fn add_unstocked_item_is_not_found() -> TestResult {
        let mut inventory = stocked()?;
        let mut cart = ShoppingCart::new(&inventory);

        let result = cart.add(&mut inventory, "Fudge", 1);

        assert_eq!(result, Err(CartError::ItemNotFound("Fudge".to_string())));
        assert!(cart.is_empty());

        Ok(())
    }

    #[test]
    fn zero_quantities_are_rejected() -> TestResult {
        let mut inventory = stocked()?;
        let mut cart = ShoppingCart::new(&inventory);

        assert_eq!(
            cart.add(&mut inventory, "Milk Bar", 0),
            Err(CartError::InvalidQuantity)
        );

        cart.add(&mut inventory, "Milk Bar", 1)?;

        assert_eq!(
            cart.remove(&mut inventory, "Milk Bar", 0),
            Err(CartError::InvalidQuantity)
        );

        Ok(())
    }

    #[test]
    fn remove_more_than_held_changes_nothing() -> TestResult {
        let mut inventory = stocked()?;
        let mut cart = ShoppingCart::new(&inventory);

        cart.add(&mut inventory, "Dark Truffle", 2)?;

        let inventory_before = inventory.clone();
        let cart_before = cart.clone();

        let result = cart.remove(&mut inventory, "Dark Truffle", 3);

        assert_eq!(
            result,
            Err(CartError::ExceedsCartQuantity {
                name: "Dark Truffle".to_string(),
                requested: 3,
                held: 2,
            })
        );
        assert_eq!(inventory, inventory_before);
        assert_eq!(cart, cart_before);

        Ok(())
    }

    #[test]
    fn remove_item_not_in_cart_is_not_found() -> TestResult {
        let mut inventory = stocked()?;
        let mut cart = ShoppingCart::new(&inventory);

        let result = cart.remove(&mut inventory, "Dark Truffle", 1);

        assert_eq!(
            result,
            Err(CartError::ItemNotFound("Dark Truffle".to_string()))
        );

        Ok(())
    }

    #[test]
    fn remove_last_unit_drops_cart_entry() -> TestResult {
        let mut inventory = stocked()?;
        let mut cart = ShoppingCart::new(&inventory);

        cart.add(&mut inventory, "Dark Truffle", 1)?;
        cart.remove(&mut inventory, "Dark Truffle", 1)?;

        assert!(!cart.ledger().contains("Dark Truffle"));
        assert!(cart.is_empty());

        Ok(())
    }

    #[test]
    fn remove_reinstates_delisted_inventory_entry() -> TestResult {
        let mut inventory = stocked()?;
        let mut cart = ShoppingCart::new(&inventory);

        cart.add(&mut inventory, "Milk Bar", 6)?;

        assert!(inventory.item("Milk Bar").is_none());

        cart.remove(&mut inventory, "Milk Bar", 2)?;

        assert_eq!(inventory.available("Milk Bar"), 2);
        assert_eq!(
            inventory.item("Milk Bar").map(|item| item.price().to_minor_units()),
            Some(195)
        );

        Ok(())
    }

    #[test]
    fn remove_after_explicit_delist_reinstates_entry() -> TestResult {
        let mut inventory = stocked()?;
        let mut cart = ShoppingCart::new(&inventory);

        cart.add(&mut inventory, "Dark Truffle", 4)?;
        inventory.delist("Dark Truffle");

        cart.remove(&mut inventory, "Dark Truffle", 4)?;

        assert_eq!(inventory.available("Dark Truffle"), 4);
        assert!(cart.is_empty());

        Ok(())
    }

    #[test]
    fn cart_rejects_other_inventories() -> TestResult {
        let mut inventory = stocked()?;
        let mut other = stocked()?;
        let mut cart = ShoppingCart::new(&inventory);

        let result = cart.add(&mut other, "Dark Truffle", 1);

        assert_eq!(
            result,
            Err(CartError::InventoryMismatch(inventory.uuid(), other.uuid()))
        );
        assert_eq!(other.available("Dark Truffle"), 10);

        cart.add(&mut inventory, "Dark Truffle", 1)?;

        assert!(matches!(
            cart.remove(&mut other, "Dark Truffle", 1),
            Err(CartError::InventoryMismatch(_, _))
        ));
        assert_eq!(cart.quantity("Dark Truffle"), 1);

        Ok(())
    }

    #[test]
    fn release_all_returns_everything() -> TestResult {
        let mut inventory = stocked()?;
        let mut cart = ShoppingCart::new(&inventory);

        let inventory_before = inventory.clone();

        cart.add(&mut inventory, "Dark Truffle", 4)?;
        cart.add(&mut inventory, "Milk Bar", 6)?;
        cart.release_all(&mut inventory)?;

        assert!(cart.is_empty());
        assert_eq!(inventory, inventory_before);

        Ok(())
    }

    #[test]
    fn cart_total_value_prices_held_items() -> TestResult {
        let mut inventory = stocked()?;
        let mut cart = ShoppingCart::new(&inventory);

        cart.add(&mut inventory, "Dark Truffle", 3)?;
        cart.add(&mut inventory, "Milk Bar", 5)?;

        assert_eq!(cart.total_value()?, Money::from_minor(2160, USD));

        Ok(())
    }

    #[test]
    fn held_units_keep_their_price_when_restocked_at_another() -> TestResult {
        let mut inventory = stocked()?;
        let mut cart = ShoppingCart::new(&inventory);

        cart.add(&mut inventory, "Dark Truffle", 2)?;

        inventory.delist("Dark Truffle").ok_or("not stocked")?;
        inventory.add(item("Dark Truffle", 450)?, 5)?;

        cart.add(&mut inventory, "Dark Truffle", 1)?;

        assert_eq!(
            cart.ledger().item("Dark Truffle").map(|item| *item.price()),
            Some(Money::from_minor(395, USD))
        );
        assert_eq!(cart.total_value()?, Money::from_minor(1185, USD));
        assert_eq!(inventory.available("Dark Truffle"), 4);

        Ok(())
    }
}
