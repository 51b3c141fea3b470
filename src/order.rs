//! Orders

use std::io;

use decimal_percentage::Percentage;
use jiff::Timestamp;
use rust_decimal::Decimal;
use rusty_money::{Money, iso::Currency};
use thiserror::Error;
use tracing::{debug, info};

use crate::{
    cart::ShoppingCart,
    customer::UserType,
    inventory::InventoryUuid,
    ledger::QuantityLedger,
    payment::PaymentMethod,
    pricing::{PricingError, percent_of},
    receipt::Receipt,
    render::RenderError,
    shipping::Shipping,
    uuids::TypedUuid,
};

/// Order UUID
pub type OrderUuid = TypedUuid<Order<'static>>;

/// Errors raised while placing or pricing an order.
#[derive(Debug, Error, PartialEq)]
pub enum OrderError {
    /// The customer has no cart, or the cart holds nothing.
    #[error("cannot place an order from an empty cart")]
    EmptyCart,

    /// The cart was drawn from a different inventory (cart's inventory, inventory given).
    #[error("cart is bound to inventory {0}, not {1}")]
    InventoryMismatch(InventoryUuid, InventoryUuid),

    /// Only wholesale customers may pay by invoice.
    #[error("{0} customers cannot pay by invoice")]
    UnauthorizedPaymentMethod(UserType),

    /// A payment detail was blank.
    #[error("missing payment detail: {0}")]
    InvalidPaymentDetails(&'static str),

    /// The order total couldn't be calculated.
    #[error(transparent)]
    Pricing(#[from] PricingError),
}

/// The discount wholesale customers get on the whole order, shipping included.
pub fn wholesale_discount() -> Percentage {
    Percentage::from(Decimal::new(20, 2))
}

/// Who placed an order, as they were when they placed it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderCustomer {
    /// Customer name
    pub name: String,

    /// Customer email
    pub email: String,

    /// Customer type, which decides the wholesale discount
    pub user_type: UserType,
}

/// Contact details captured at checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonalDetails {
    /// Full name for delivery
    pub full_name: String,

    /// Delivery address
    pub address: String,

    /// Contact phone number
    pub phone: Option<String>,
}

/// An immutable snapshot of a cart at checkout.
#[derive(Debug, Clone, PartialEq)]
pub struct Order<'a> {
    uuid: OrderUuid,
    lines: QuantityLedger<'a>,
    placed_at: Timestamp,
    shipping: Option<Shipping<'a>>,
    payment: Option<PaymentMethod>,
    personal_details: Option<PersonalDetails>,
    customer: OrderCustomer,
}

impl<'a> Order<'a> {
    /// Places an order for everything in `cart`.
    ///
    /// The cart's contents move into the order and the cart is left empty. Stock already
    /// drawn from the inventory stays drawn: this is the point of sale.
    pub fn place(
        customer: OrderCustomer,
        cart: &mut ShoppingCart<'a>,
        shipping: Option<Shipping<'a>>,
        payment: Option<PaymentMethod>,
        personal_details: Option<PersonalDetails>,
    ) -> Self {
        let order = Self {
            uuid: OrderUuid::new(),
            lines: cart.checkout(),
            placed_at: Timestamp::now(),
            shipping,
            payment,
            personal_details,
            customer,
        };

        info!(
            order = %order.uuid,
            customer = %order.customer.email,
            lines = order.lines.len(),
            units = order.lines.units(),
            "placed order"
        );

        order
    }

    /// Order identifier
    pub fn uuid(&self) -> OrderUuid {
        self.uuid
    }

    /// The items ordered
    pub fn lines(&self) -> &QuantityLedger<'a> {
        &self.lines
    }

    /// When the order was placed
    pub fn placed_at(&self) -> Timestamp {
        self.placed_at
    }

    /// The chosen shipping, if any
    pub fn shipping(&self) -> Option<&Shipping<'a>> {
        self.shipping.as_ref()
    }

    /// The captured payment method, if any
    pub fn payment(&self) -> Option<&PaymentMethod> {
        self.payment.as_ref()
    }

    /// The captured contact details, if any
    pub fn personal_details(&self) -> Option<&PersonalDetails> {
        self.personal_details.as_ref()
    }

    /// Who placed the order
    pub fn customer(&self) -> &OrderCustomer {
        &self.customer
    }

    /// The currency the order is priced in
    pub fn currency(&self) -> &'a Currency {
        self.lines.currency()
    }

    /// Sum of `price × quantity` over every line.
    ///
    /// # Errors
    ///
    /// Returns a [`PricingError`] if the value doesn't fit in minor units.
    pub fn subtotal(&self) -> Result<Money<'a, Currency>, PricingError> {
        self.lines.total_value()
    }

    /// The shipping fee, or zero without shipping.
    pub fn shipping_fee(&self) -> Money<'a, Currency> {
        self.shipping
            .map_or_else(|| Money::from_minor(0, self.currency()), |shipping| *shipping.fee())
    }

    /// The wholesale discount on subtotal plus shipping, or zero for other customers.
    ///
    /// # Errors
    ///
    /// Returns a [`PricingError`] if the amounts are in different currencies or overflow.
    pub fn discount(&self) -> Result<Money<'a, Currency>, PricingError> {
        let gross = self.subtotal()?.add(self.shipping_fee())?;

        if self.customer.user_type == UserType::Wholesale {
            percent_of(wholesale_discount(), &gross)
        } else {
            Ok(Money::from_minor(0, self.currency()))
        }
    }

    /// What the customer pays: subtotal plus shipping, less any wholesale discount.
    ///
    /// The discount is rounded half away from zero to whole minor units before it's
    /// subtracted.
    ///
    /// # Errors
    ///
    /// Returns a [`PricingError`] if the amounts are in different currencies or overflow.
    pub fn total_value(&self) -> Result<Money<'a, Currency>, PricingError> {
        let gross = self.subtotal()?.add(self.shipping_fee())?;
        let total = gross.sub(self.discount()?)?;

        debug!(order = %self.uuid, %gross, %total, "priced order");

        Ok(total)
    }

    /// Builds the order's receipt.
    ///
    /// # Errors
    ///
    /// Returns a [`PricingError`] if the order can't be priced.
    pub fn receipt(&self) -> Result<Receipt<'a>, PricingError> {
        Receipt::from_order(self)
    }

    /// Renders the receipt to `out`.
    ///
    /// # Errors
    ///
    /// Returns a [`RenderError`] if the order can't be priced or the output can't be
    /// written.
    pub fn write_receipt(&self, out: impl io::Write) -> Result<(), RenderError> {
        self.receipt()?.write_to(out)
    }
}
