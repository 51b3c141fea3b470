//! Customer Fixtures

use rustc_hash::FxHashMap;
use rusty_money::iso::Currency;
use serde::Deserialize;

use crate::{
    customer::{Customer, UserType},
    fixtures::FixtureError,
};

/// Wrapper for customers in YAML
#[derive(Debug, Deserialize)]
pub struct CustomersFixture {
    /// Map of customer key -> customer fixture
    pub customers: FxHashMap<String, CustomerFixture>,
}

/// Customer Fixture
#[derive(Debug, Clone, Deserialize)]
pub struct CustomerFixture {
    /// Customer name
    pub name: String,

    /// Customer email
    pub email: String,

    /// `guest`, `member` or `wholesale`, any case
    pub user_type: String,

    /// Postal address
    #[serde(default)]
    pub address: Option<String>,

    /// Company name, for wholesale customers
    #[serde(default)]
    pub company_name: Option<String>,
}

impl CustomerFixture {
    /// Builds a customer with no cart and no orders.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError::UserType`] if the user type isn't recognised.
    pub fn to_customer<'a>(&self, currency: &'a Currency) -> Result<Customer<'a>, FixtureError> {
        let user_type: UserType = self.user_type.parse()?;
        let mut customer = Customer::new(self.name.clone(), self.email.clone(), user_type, currency);

        if let Some(address) = &self.address {
            customer = customer.with_address(address.clone());
        }

        if let Some(company_name) = &self.company_name {
            customer = customer.with_company(company_name.clone());
        }

        Ok(customer)
    }
}
