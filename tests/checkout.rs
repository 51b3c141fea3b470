//! End-to-end checkout against the `shop` fixture set.
//!
//! The fixture stocks, among others:
//!
//! - Dark Truffle: $3.95 × 10
//! - Milk Bar: $1.95 × 12
//! - Gift Box: $10.00 × 5
//! - Hamper: $15.50 × 2
//!
//! A cart of 3 truffles and 5 milk bars comes to $21.60. With UPS shipping ($4.99) a
//! wholesale customer pays (21.60 + 4.99) × 0.8 = 21.272, or $21.27.

use rusty_money::{Money, iso::USD};
use testresult::TestResult;

use cocoa::prelude::*;

fn shop() -> anyhow::Result<(Fixture, Inventory<'static>)> {
    let fixture = Fixture::from_set("shop")?;
    let inventory = fixture.inventory()?;

    Ok((fixture, inventory))
}

fn fill_cart(customer: &mut Customer<'static>, inventory: &mut Inventory<'static>) -> TestResult {
    customer.create_cart(inventory);

    let cart = customer.cart_mut().ok_or("missing cart")?;

    cart.add(inventory, "Dark Truffle", 3)?;
    cart.add(inventory, "Milk Bar", 5)?;

    Ok(())
}

#[test]
fn member_order_without_shipping_totals_subtotal() -> TestResult {
    let (fixture, mut inventory) = shop()?;
    let mut customer = fixture.customer("ada")?;

    fill_cart(&mut customer, &mut inventory)?;

    let order = customer.place_order(&inventory, None, None, None)?;

    assert_eq!(order.total_value()?, Money::from_minor(2160, USD));

    Ok(())
}

#[test]
fn wholesale_order_with_ups_is_discounted() -> TestResult {
    let (fixture, mut inventory) = shop()?;
    let mut customer = fixture.customer("acme")?;

    fill_cart(&mut customer, &mut inventory)?;

    let invoice = PaymentMethod::invoice(
        customer.user_type(),
        customer.company_name().unwrap_or_default(),
        customer.address().unwrap_or_default(),
    )?;

    let order = customer.place_order(
        &inventory,
        Some(Shipping::from_provider("ups", USD)?),
        Some(invoice),
        None,
    )?;

    assert_eq!(order.total_value()?, Money::from_minor(2127, USD));
    assert_eq!(order.receipt()?.total(), order.total_value()?);

    Ok(())
}

#[test]
fn placing_an_order_empties_the_cart_but_keeps_stock_sold() -> TestResult {
    let (fixture, mut inventory) = shop()?;
    let mut customer = fixture.customer("ada")?;

    fill_cart(&mut customer, &mut inventory)?;

    let order = customer.place_order(&inventory, None, None, None)?;

    assert!(customer.cart().is_some_and(ShoppingCart::is_empty));
    assert_eq!(order.lines().quantity("Dark Truffle"), 3);
    assert_eq!(order.lines().quantity("Milk Bar"), 5);
    assert_eq!(inventory.available("Dark Truffle"), 7);
    assert_eq!(inventory.available("Milk Bar"), 7);

    assert_eq!(
        customer.place_order(&inventory, None, None, None),
        Err(OrderError::EmptyCart)
    );

    Ok(())
}

#[test]
fn total_spent_accumulates_over_orders() -> TestResult {
    let (fixture, mut inventory) = shop()?;
    let mut customer = fixture.customer("ada")?;

    customer.create_cart(&inventory);

    for name in ["Gift Box", "Hamper"] {
        customer
            .cart_mut()
            .ok_or("missing cart")?
            .add(&mut inventory, name, 1)?;

        customer.place_order(&inventory, None, None, None)?;
    }

    assert_eq!(customer.total_spent()?, Money::from_minor(2550, USD));

    Ok(())
}

#[test]
fn unknown_carriers_are_rejected() {
    assert_eq!(
        Shipping::from_provider("FEDEX", USD),
        Err(ShippingError::InvalidProvider("FEDEX".to_string()))
    );
}

#[test]
fn guest_cannot_pay_by_invoice() -> TestResult {
    let (fixture, mut inventory) = shop()?;
    let mut customer = fixture.customer("guest")?;

    assert_eq!(
        PaymentMethod::invoice(customer.user_type(), "Nobody Ltd", "Nowhere"),
        Err(PaymentError::UnauthorizedPaymentMethod(UserType::Guest))
    );

    fill_cart(&mut customer, &mut inventory)?;

    let card = PaymentMethod::card("4000 0000 0000 0002", "A Guest", "01/30")?;
    let order = customer.place_order(&inventory, None, Some(card), None)?;

    let mut out = Vec::new();
    order.write_receipt(&mut out)?;

    assert!(String::from_utf8(out)?.contains("************0002"));

    Ok(())
}

#[test]
fn removing_a_delisted_item_restocks_it() -> TestResult {
    let (fixture, mut inventory) = shop()?;
    let mut customer = fixture.customer("ada")?;

    fill_cart(&mut customer, &mut inventory)?;

    let delisted = inventory.delist("Dark Truffle").ok_or("not stocked")?;

    assert_eq!(delisted.quantity(), 7);

    customer
        .cart_mut()
        .ok_or("missing cart")?
        .remove(&mut inventory, "Dark Truffle", 2)?;

    assert_eq!(inventory.available("Dark Truffle"), 2);
    assert_eq!(
        customer.cart().map(|cart| cart.quantity("Dark Truffle")),
        Some(1)
    );

    Ok(())
}

#[test]
fn abandoned_carts_can_be_released() -> TestResult {
    let (fixture, mut inventory) = shop()?;
    let mut customer = fixture.customer("ada")?;

    let opening = inventory.clone();

    fill_cart(&mut customer, &mut inventory)?;

    let mut abandoned = customer.create_cart(&inventory).ok_or("missing cart")?;

    abandoned.release_all(&mut inventory)?;

    assert_eq!(inventory, opening);

    Ok(())
}
