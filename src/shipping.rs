//! Shipping

use std::{fmt, str::FromStr};

use rusty_money::{Money, iso::Currency};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while choosing a carrier.
#[derive(Debug, Error, PartialEq)]
pub enum ShippingError {
    /// The carrier isn't one the shop ships with.
    #[error("invalid shipping provider {0:?}, expected one of: UPS, DHL")]
    InvalidProvider(String),
}

/// Carriers the shop ships with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Carrier {
    /// United Parcel Service
    Ups,
    /// DHL Express
    Dhl,
}

impl Carrier {
    /// Every supported carrier
    pub const ALL: [Self; 2] = [Self::Ups, Self::Dhl];

    /// Flat fee in minor units
    const fn fee_minor(self) -> i64 {
        match self {
            Self::Ups => 499,
            Self::Dhl => 699,
        }
    }

    /// Display code for the carrier
    pub const fn code(self) -> &'static str {
        match self {
            Self::Ups => "UPS",
            Self::Dhl => "DHL",
        }
    }
}

impl fmt::Display for Carrier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Carrier {
    type Err = ShippingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|carrier| carrier.code().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ShippingError::InvalidProvider(s.to_string()))
    }
}

/// A chosen carrier and the flat fee it charges.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shipping<'a> {
    carrier: Carrier,
    fee: Money<'a, Currency>,
}

impl<'a> Shipping<'a> {
    /// Looks up the carrier's fee in `currency`.
    #[must_use]
    pub fn new(carrier: Carrier, currency: &'a Currency) -> Self {
        Self {
            carrier,
            fee: Money::from_minor(carrier.fee_minor(), currency),
        }
    }

    /// Parses a carrier name, ignoring case, and looks up its fee.
    ///
    /// # Errors
    ///
    /// Returns [`ShippingError::InvalidProvider`] for unsupported carriers.
    pub fn from_provider(provider: &str, currency: &'a Currency) -> Result<Self, ShippingError> {
        Ok(Self::new(provider.parse()?, currency))
    }

    /// The chosen carrier
    pub fn carrier(&self) -> Carrier {
        self.carrier
    }

    /// The flat shipping fee
    pub fn fee(&self) -> &Money<'a, Currency> {
        &self.fee
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::{GBP, USD};
    use testresult::TestResult;

    use super::*;

    #[test]
    fn carriers_parse_ignoring_case() -> TestResult {
        assert_eq!("ups".parse::<Carrier>()?, Carrier::Ups);
        assert_eq!("Dhl".parse::<Carrier>()?, Carrier::Dhl);
        assert_eq!(" UPS ".parse::<Carrier>()?, Carrier::Ups);

        Ok(())
    }

    #[test]
    fn unknown_carrier_is_rejected() {
        assert_eq!(
            "FEDEX".parse::<Carrier>(),
            Err(ShippingError::InvalidProvider("FEDEX".to_string()))
        );
    }

    #[test]
    fn fees_are_flat_per_carrier() -> TestResult {
        let ups = Shipping::from_provider("ups", USD)?;
        let dhl = Shipping::new(Carrier::Dhl, GBP);

        assert_eq!(ups.carrier(), Carrier::Ups);
        assert_eq!(ups.fee(), &Money::from_minor(499, USD));
        assert_eq!(dhl.fee(), &Money::from_minor(699, GBP));

        Ok(())
    }

    #[test]
    fn carrier_displays_its_code() {
        assert_eq!(Carrier::Ups.to_string(), "UPS");
        assert_eq!(Carrier::Dhl.to_string(), "DHL");
    }
}
