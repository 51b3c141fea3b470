//! Payment methods
//!
//! Payment details are captured for the receipt and order history only; nothing is ever
//! sent to a payment gateway.

use std::{fmt, str::FromStr};

use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::customer::UserType;

/// Errors raised while capturing payment details.
#[derive(Debug, Error, PartialEq)]
pub enum PaymentError {
    /// Only wholesale customers may pay by invoice.
    #[error("{0} customers cannot pay by invoice")]
    UnauthorizedPaymentMethod(UserType),

    /// A required field was missing or blank.
    #[error("missing payment detail: {0}")]
    InvalidPaymentDetails(&'static str),

    /// The method name isn't `card` or `invoice`.
    #[error("unknown payment method {0:?}, expected card or invoice")]
    UnknownMethod(String),
}

/// Card details, only built through [`PaymentMethod::card`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardDetails {
    pub(crate) card_number: String,
    pub(crate) name_on_card: String,
    pub(crate) expiry: String,
}

impl CardDetails {
    /// Card number as entered
    pub fn card_number(&self) -> &str {
        &self.card_number
    }

    /// Cardholder name
    pub fn name_on_card(&self) -> &str {
        &self.name_on_card
    }

    /// Expiry date as entered, e.g. `12/27`
    pub fn expiry(&self) -> &str {
        &self.expiry
    }
}

/// Invoice details, only built through [`PaymentMethod::invoice`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvoiceDetails {
    pub(crate) company_name: String,
    pub(crate) billing_address: String,
}

impl InvoiceDetails {
    /// Company the invoice is addressed to
    pub fn company_name(&self) -> &str {
        &self.company_name
    }

    /// Billing address
    pub fn billing_address(&self) -> &str {
        &self.billing_address
    }
}

/// How an order is paid for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentMethod {
    /// Card payment
    Card(CardDetails),

    /// Invoice payment, wholesale customers only
    Invoice(InvoiceDetails),
}

/// The kinds of payment method a customer can choose.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentKind {
    /// Card payment
    Card,
    /// Invoice payment
    Invoice,
}

impl FromStr for PaymentKind {
    type Err = PaymentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "card" => Ok(Self::Card),
            "invoice" => Ok(Self::Invoice),
            _ => Err(PaymentError::UnknownMethod(s.to_string())),
        }
    }
}

impl PaymentMethod {
    /// Captures card details.
    ///
    /// # Errors
    ///
    /// Returns [`PaymentError::InvalidPaymentDetails`] naming the first blank field.
    pub fn card(
        card_number: impl Into<String>,
        name_on_card: impl Into<String>,
        expiry: impl Into<String>,
    ) -> Result<Self, PaymentError> {
        Ok(Self::Card(CardDetails {
            card_number: required("card_number", card_number.into())?,
            name_on_card: required("name_on_card", name_on_card.into())?,
            expiry: required("expiry", expiry.into())?,
        }))
    }

    /// Captures invoice details for a wholesale customer.
    ///
    /// # Errors
    ///
    /// Returns [`PaymentError::UnauthorizedPaymentMethod`] unless `user_type` is wholesale,
    /// or [`PaymentError::InvalidPaymentDetails`] naming the first blank field.
    pub fn invoice(
        user_type: UserType,
        company_name: impl Into<String>,
        billing_address: impl Into<String>,
    ) -> Result<Self, PaymentError> {
        if user_type != UserType::Wholesale {
            return Err(PaymentError::UnauthorizedPaymentMethod(user_type));
        }

        Ok(Self::Invoice(InvoiceDetails {
            company_name: required("company_name", company_name.into())?,
            billing_address: required("billing_address", billing_address.into())?,
        }))
    }

    /// Builds a payment method from named fields, as collected by a form or menu.
    ///
    /// Cards read `card_number`, `name_on_card` and `expiry`; invoices read
    /// `company_name` and `billing_address`.
    ///
    /// # Errors
    ///
    /// Returns a [`PaymentError`] under the same conditions as [`card`](Self::card) and
    /// [`invoice`](Self::invoice).
    pub fn from_fields(
        kind: PaymentKind,
        fields: &FxHashMap<String, String>,
        user_type: UserType,
    ) -> Result<Self, PaymentError> {
        let field = |name: &str| fields.get(name).cloned().unwrap_or_default();

        match kind {
            PaymentKind::Card => Self::card(
                field("card_number"),
                field("name_on_card"),
                field("expiry"),
            ),
            PaymentKind::Invoice => Self::invoice(
                user_type,
                field("company_name"),
                field("billing_address"),
            ),
        }
    }

    /// Which kind of payment this is
    pub fn kind(&self) -> PaymentKind {
        match self {
            Self::Card(_) => PaymentKind::Card,
            Self::Invoice(_) => PaymentKind::Invoice,
        }
    }

    /// Whether a customer of the given type may pay this way.
    pub fn is_allowed_for(&self, user_type: UserType) -> bool {
        match self {
            Self::Card(_) => true,
            Self::Invoice(_) => user_type == UserType::Wholesale,
        }
    }

    /// Checks that no detail is blank.
    ///
    /// # Errors
    ///
    /// Returns [`PaymentError::InvalidPaymentDetails`] naming the first blank field.
    pub fn validate(&self) -> Result<(), PaymentError> {
        let fields = match self {
            Self::Card(card) => vec![
                ("card_number", &card.card_number),
                ("name_on_card", &card.name_on_card),
                ("expiry", &card.expiry),
            ],
            Self::Invoice(invoice) => vec![
                ("company_name", &invoice.company_name),
                ("billing_address", &invoice.billing_address),
            ],
        };

        match fields.into_iter().find(|(_, value)| value.trim().is_empty()) {
            Some((field, _)) => Err(PaymentError::InvalidPaymentDetails(field)),
            None => Ok(()),
        }
    }

    /// The card number with all but the last four digits hidden, for cards.
    pub fn masked_card_number(&self) -> Option<String> {
        let Self::Card(card) = self else {
            return None;
        };

        let digits: Vec<char> = card
            .card_number
            .chars().filter(char::is_ascii_digit).collect();
        let shown = digits.len().saturating_sub(4);

        Some(
            digits
                .iter()
                .enumerate()
                .map(|(idx, digit)| if idx < shown { '*' } else { *digit })
                .collect(),
        )
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Card(card) => write!(
                f,
                "Card {} ({})",
                self.masked_card_number().unwrap_or_default(),
                card.name_on_card
            ),
            Self::Invoice(invoice) => write!(f, "Invoice to {}", invoice.company_name),
        }
    }
}

fn required(field: &'static str, value: String) -> Result<String, PaymentError> {
    let trimmed = value.trim();

    if trimmed.is_empty() {
        Err(PaymentError::InvalidPaymentDetails(field))
    } else {
        Ok(trimmed.to_string())
    }
}
