//! Stock is neither created nor destroyed by moving it between a cart and its inventory.

use proptest::prelude::*;
use rusty_money::{Money, iso::USD};

use cocoa::prelude::*;

const NAMES: [&str; 3] = ["Dark Truffle", "Milk Bar", "Sea Salt Bar"];
const OPENING: [u32; 3] = [10, 4, 1];

#[derive(Debug, Clone)]
enum Move {
    Add(usize, u32),
    Remove(usize, u32),
}

fn moves() -> impl Strategy<Value = Vec<Move>> {
    let one = prop_oneof![
        (0..NAMES.len(), 0..12u32).prop_map(|(idx, qty)| Move::Add(idx, qty)),
        (0..NAMES.len(), 0..12u32).prop_map(|(idx, qty)| Move::Remove(idx, qty)),
    ];

    prop::collection::vec(one, 0..40)
}

fn stocked() -> Result<Inventory<'static>, TestCaseError> {
    let mut inventory = Inventory::new(USD);

    for (name, opening) in NAMES.iter().zip(OPENING) {
        let item = Item::new(*name, Money::from_minor(250, USD), Money::from_minor(90, USD))
            .map_err(|error| TestCaseError::fail(error.to_string()))?;

        inventory
            .add(item, opening)
            .map_err(|error| TestCaseError::fail(error.to_string()))?;
    }

    Ok(inventory)
}

proptest! {
    #[test]
    fn cart_and_inventory_always_sum_to_opening_stock(moves in moves()) {
        let mut inventory = stocked()?;
        let mut cart = ShoppingCart::new(&inventory);

        for step in moves {
            let (before_cart, before_inventory) = (cart.clone(), inventory.clone());

            let result = match step {
                Move::Add(idx, qty) => NAMES
                    .get(idx)
                    .map(|name| cart.add(&mut inventory, name, qty)),
                Move::Remove(idx, qty) => NAMES
                    .get(idx)
                    .map(|name| cart.remove(&mut inventory, name, qty)),
            };

            if matches!(result, Some(Err(_))) {
                prop_assert_eq!(&cart, &before_cart);
                prop_assert_eq!(&inventory, &before_inventory);
            }

            for (name, opening) in NAMES.iter().zip(OPENING) {
                prop_assert_eq!(cart.quantity(name) + inventory.available(name), opening);
            }
        }
    }

    #[test]
    fn add_then_remove_is_a_round_trip(idx in 0..NAMES.len(), qty in 1..=10u32) {
        let mut inventory = stocked()?;
        let mut cart = ShoppingCart::new(&inventory);

        let (before_cart, before_inventory) = (cart.clone(), inventory.clone());

        if let Some(name) = NAMES.get(idx) {
            if cart.add(&mut inventory, name, qty).is_ok() {
                cart.remove(&mut inventory, name, qty)
                    .map_err(|error| TestCaseError::fail(error.to_string()))?;
            }
        }

        prop_assert_eq!(cart, before_cart);
        prop_assert_eq!(inventory, before_inventory);
    }
}
