//! Customers

use std::{fmt, str::FromStr};

use rusty_money::{Money, iso::Currency};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    cart::ShoppingCart,
    inventory::Inventory,
    order::{Order, OrderCustomer, OrderError, PersonalDetails},
    payment::{PaymentError, PaymentMethod},
    pricing::{PricingError, sum},
    shipping::Shipping,
};

/// The user type wasn't one of `guest`, `member` or `wholesale`.
#[derive(Debug, Error, PartialEq)]
#[error("unknown user type {0:?}, expected guest, member or wholesale")]
pub struct UnknownUserType(pub String);

/// Kinds of customer. Wholesale customers get a discount and may pay by invoice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    /// Checked out without an account
    Guest,
    /// Registered retail customer
    Member,
    /// Trade customer
    Wholesale,
}

impl fmt::Display for UserType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Guest => "guest",
            Self::Member => "member",
            Self::Wholesale => "wholesale",
        })
    }
}

impl FromStr for UserType {
    type Err = UnknownUserType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "guest" => Ok(Self::Guest),
            "member" => Ok(Self::Member),
            "wholesale" => Ok(Self::Wholesale),
            _ => Err(UnknownUserType(s.to_string())),
        }
    }
}

/// A shopper with at most one cart and a history of placed orders.
#[derive(Debug)]
pub struct Customer<'a> {
    name: String,
    email: String,
    user_type: UserType,
    address: Option<String>,
    company_name: Option<String>,
    currency: &'a Currency,
    orders: Vec<Order<'a>>,
    cart: Option<ShoppingCart<'a>>,
}

impl<'a> Customer<'a> {
    /// Creates a customer with no cart and no orders.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        user_type: UserType,
        currency: &'a Currency,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            user_type,
            address: None,
            company_name: None,
            currency,
            orders: Vec::new(),
            cart: None,
        }
    }

    /// Sets the customer's address.
    #[must_use]
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    /// Sets the customer's company.
    #[must_use]
    pub fn with_company(mut self, company_name: impl Into<String>) -> Self {
        self.company_name = Some(company_name.into());
        self
    }

    /// Customer name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Customer email
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Customer type
    pub fn user_type(&self) -> UserType {
        self.user_type
    }

    /// Customer address, if known
    pub fn address(&self) -> Option<&str> {
        self.address.as_deref()
    }

    /// Company name, if known
    pub fn company_name(&self) -> Option<&str> {
        self.company_name.as_deref()
    }

    /// Orders placed, oldest first
    pub fn orders(&self) -> &[Order<'a>] {
        &self.orders
    }

    /// The current cart, if one was created
    pub fn cart(&self) -> Option<&ShoppingCart<'a>> {
        self.cart.as_ref()
    }

    /// The current cart, for adding and removing items
    pub fn cart_mut(&mut self) -> Option<&mut ShoppingCart<'a>> {
        self.cart.as_mut()
    }

    /// Starts a new cart drawing from `inventory`.
    ///
    /// Returns the replaced cart, if any. Its stock is still held, so callers should
    /// [`release_all`](ShoppingCart::release_all) it back to its inventory.
    pub fn create_cart(&mut self, inventory: &Inventory<'a>) -> Option<ShoppingCart<'a>> {
        self.cart.replace(ShoppingCart::new(inventory))
    }

    /// Places an order for everything in the customer's cart and records it.
    ///
    /// # Errors
    ///
    /// Returns an [`OrderError`] if there's no cart or it's empty, the cart draws from
    /// another inventory, a non-wholesale customer tries to pay by invoice, or a payment
    /// detail is blank. Nothing changes on error.
    pub fn place_order(
        &mut self,
        inventory: &Inventory<'a>,
        shipping: Option<Shipping<'a>>,
        payment: Option<PaymentMethod>,
        personal_details: Option<PersonalDetails>,
    ) -> Result<Order<'a>, OrderError> {
        let snapshot = self.snapshot();

        let cart = self
            .cart
            .as_mut()
            .filter(|cart| !cart.is_empty())
            .ok_or(OrderError::EmptyCart)?;

        if cart.inventory() != inventory.uuid() {
            return Err(OrderError::InventoryMismatch(
                cart.inventory(),
                inventory.uuid(),
            ));
        }

        if payment
            .as_ref()
            .is_some_and(|payment| !payment.is_allowed_for(snapshot.user_type))
        {
            return Err(OrderError::UnauthorizedPaymentMethod(snapshot.user_type));
        }

        if let Some(Err(PaymentError::InvalidPaymentDetails(field))) =
            payment.as_ref().map(PaymentMethod::validate)
        {
            return Err(OrderError::InvalidPaymentDetails(field));
        }

        let order = Order::place(snapshot, cart, shipping, payment, personal_details);

        self.orders.push(order.clone());

        Ok(order)
    }

    /// Sum of every order's total, zero when nothing has been ordered.
    ///
    /// # Errors
    ///
    /// Returns a [`PricingError`] if an order can't be priced or is in another currency.
    pub fn total_spent(&self) -> Result<Money<'a, Currency>, PricingError> {
        let totals = self
            .orders
            .iter()
            .map(Order::total_value)
            .collect::<Result<Vec<_>, _>>()?;

        sum(totals, self.currency)
    }

    fn snapshot(&self) -> OrderCustomer {
        OrderCustomer {
            name: self.name.clone(),
            email: self.email.clone(),
            user_type: self.user_type,
        }
    }
}
